use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    animation::{self, Coin},
    clock::AnimationClock,
    error::AnimationError,
    lights::{ChannelSet, Intensity, PwmOutput, MAX_INTENSITY},
};

pub mod sequencer;

pub mod prelude {
    pub use super::sequencer::Sequencer;
    pub use super::{default_show, AnimationStep};
}

/// One entry of the show: which animation to run and how. Pacing is in whole
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AnimationStep {
    Flash { repeat: u32, pace_ms: u64 },
    Chase { repeat: u32, pace_ms: u64 },
    RandomFlicker { repeat: u32, pace_ms: u64 },
    SynchronizedFade { pace_ms: u64, fade_step: Intensity },
    SequentialFade { pace_ms: u64, fade_step: Intensity },
}

/// The show the lights were built for.
pub fn default_show() -> Vec<AnimationStep> {
    vec![
        AnimationStep::Flash {
            repeat: 5,
            pace_ms: 250,
        },
        AnimationStep::Chase {
            repeat: 5,
            pace_ms: 100,
        },
        AnimationStep::RandomFlicker {
            repeat: 20,
            pace_ms: 500,
        },
        AnimationStep::SynchronizedFade {
            pace_ms: 50,
            fade_step: MAX_INTENSITY / 50,
        },
        AnimationStep::SequentialFade {
            pace_ms: 25,
            fade_step: MAX_INTENSITY / 50,
        },
    ]
}

impl AnimationStep {
    pub fn pace(&self) -> Duration {
        let pace_ms = match *self {
            AnimationStep::Flash { pace_ms, .. }
            | AnimationStep::Chase { pace_ms, .. }
            | AnimationStep::RandomFlicker { pace_ms, .. }
            | AnimationStep::SynchronizedFade { pace_ms, .. }
            | AnimationStep::SequentialFade { pace_ms, .. } => pace_ms,
        };

        Duration::from_millis(pace_ms)
    }

    pub fn run<O, C, R>(
        &self,
        channels: &mut ChannelSet<O>,
        clock: &mut C,
        coin: &mut R,
    ) -> Result<(), AnimationError>
    where
        O: PwmOutput,
        C: AnimationClock,
        R: Coin + ?Sized,
    {
        let pace = self.pace();

        match *self {
            AnimationStep::Flash { repeat, .. } => animation::flash(channels, clock, repeat, pace),
            AnimationStep::Chase { repeat, .. } => animation::chase(channels, clock, repeat, pace),
            AnimationStep::RandomFlicker { repeat, .. } => {
                animation::random_flicker(channels, clock, coin, repeat, pace)
            }
            AnimationStep::SynchronizedFade { fade_step, .. } => {
                animation::synchronized_fade(channels, clock, pace, fade_step)
            }
            AnimationStep::SequentialFade { fade_step, .. } => {
                animation::sequential_fade(channels, clock, pace, fade_step)
            }
        }
    }
}

impl fmt::Display for AnimationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationStep::Flash { repeat, pace_ms } => {
                write!(f, "flash x{} @{}ms", repeat, pace_ms)
            }
            AnimationStep::Chase { repeat, pace_ms } => {
                write!(f, "chase x{} @{}ms", repeat, pace_ms)
            }
            AnimationStep::RandomFlicker { repeat, pace_ms } => {
                write!(f, "random flicker x{} @{}ms", repeat, pace_ms)
            }
            AnimationStep::SynchronizedFade { pace_ms, fade_step } => {
                write!(f, "synchronized fade @{}ms step {}", pace_ms, fade_step)
            }
            AnimationStep::SequentialFade { pace_ms, fade_step } => {
                write!(f, "sequential fade @{}ms step {}", pace_ms, fade_step)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{trace_channels, ScriptedCoin, TraceClock};

    #[test]
    fn test_default_show() {
        let show = default_show();

        assert_eq!(5, show.len());
        assert_eq!(
            AnimationStep::SynchronizedFade {
                pace_ms: 50,
                fade_step: 2
            },
            show[3]
        );
        assert_eq!(Duration::from_millis(25), show[4].pace());
    }

    #[test]
    fn test_step_from_ron() {
        let step: AnimationStep = ron::from_str("Chase(repeat: 2, pace_ms: 40)").unwrap();

        assert_eq!(
            AnimationStep::Chase {
                repeat: 2,
                pace_ms: 40
            },
            step
        );
        assert_eq!("chase x2 @40ms", step.to_string());
    }

    #[test]
    fn test_run_dispatches_with_pace() -> Result<(), AnimationError> {
        let (mut channels, trace) = trace_channels(2);
        let mut clock = TraceClock::new(&trace);
        let mut coin = ScriptedCoin::new([true, false]);

        AnimationStep::RandomFlicker {
            repeat: 1,
            pace_ms: 500,
        }
        .run(&mut channels, &mut clock, &mut coin)?;

        assert_eq!(vec![500], trace.sleeps());
        assert_eq!(vec![MAX_INTENSITY, 0], channels.intensities());

        Ok(())
    }

    #[test]
    fn test_zero_pace_is_allowed() -> Result<(), AnimationError> {
        let (mut channels, trace) = trace_channels(1);
        let mut clock = TraceClock::new(&trace);
        let mut coin = ScriptedCoin::new([false; 0]);

        AnimationStep::Flash {
            repeat: 2,
            pace_ms: 0,
        }
        .run(&mut channels, &mut clock, &mut coin)?;

        assert_eq!(vec![0; 4], trace.sleeps());

        Ok(())
    }
}
