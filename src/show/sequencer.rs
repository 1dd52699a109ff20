use log::{error, info, warn};

use crate::{
    animation::Coin,
    clock::AnimationClock,
    error::{AnimationError, HardwareFault},
    lights::{ChannelSet, PwmOutput},
};

use super::AnimationStep;

/// The Sequencer plays a show from start to finish. It owns the lamps for the
/// whole run, turns everything off after every step no matter how the step
/// ended, and releases the hardware once the show is over.
///
/// An interrupted step is logged and skipped; the show carries on with the
/// next one. A hardware fault ends the show: the lamps are switched off and
/// released as far as the hardware still allows, and the fault is returned.
pub struct Sequencer<O, C, R> {
    channels: ChannelSet<O>,
    clock: C,
    coin: R,
}

impl<O, C, R> Sequencer<O, C, R>
where
    O: PwmOutput,
    C: AnimationClock,
    R: Coin,
{
    pub fn new(channels: ChannelSet<O>, clock: C, coin: R) -> Self {
        Self {
            channels,
            clock,
            coin,
        }
    }

    pub fn channels(&self) -> &ChannelSet<O> {
        &self.channels
    }

    pub fn run(&mut self, steps: &[AnimationStep]) -> Result<(), HardwareFault> {
        for (i, step) in steps.iter().enumerate() {
            info!("Step {}/{}: {}", i + 1, steps.len(), step);

            match step.run(&mut self.channels, &mut self.clock, &mut self.coin) {
                Ok(()) => {}
                Err(AnimationError::Interrupted(_)) => {
                    warn!("Animation got interrupted, skipping to the next step");
                }
                Err(AnimationError::Hardware(fault)) => return Err(self.abort(fault)),
            }

            if let Err(fault) = self.channels.all_off() {
                return Err(self.abort(fault));
            }
        }

        info!("Shutting down the lights");
        self.channels.shutdown()
    }

    fn abort(&mut self, fault: HardwareFault) -> HardwareFault {
        error!("{}, stopping the show", fault);

        if let Err(e) = self.channels.all_off() {
            error!("Could not turn the lights off: {}", e);
        }
        // Failures are logged inside shutdown
        let _ = self.channels.shutdown();

        fault
    }
}
