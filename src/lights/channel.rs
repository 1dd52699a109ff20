use anyhow::Error;
use log::{error, info};

use crate::error::HardwareFault;

/// Intensity of a single channel, in `0..=MAX_INTENSITY`.
pub type Intensity = u8;

/// Full brightness. Also the PWM range, so one step is one percent of duty
/// cycle.
pub const MAX_INTENSITY: Intensity = 100;

/// The effectful half of a channel: whatever actually drives the lamp.
pub trait PwmOutput {
    /// Apply an intensity that is already within `0..=MAX_INTENSITY`.
    fn write(&mut self, intensity: Intensity) -> Result<(), Error>;

    /// Release the output at the end of the show.
    fn shutdown(&mut self) -> Result<(), Error>;
}

/// One lamp. The tracked intensity always mirrors the last value the output
/// accepted.
#[derive(Debug)]
pub struct Channel<O> {
    name: String,
    intensity: Intensity,
    output: O,
}

impl<O: PwmOutput> Channel<O> {
    pub fn new(name: impl Into<String>, output: O) -> Self {
        Self {
            name: name.into(),
            intensity: 0,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// Values above `MAX_INTENSITY` are silently clamped.
    pub fn set_intensity(&mut self, value: Intensity) -> Result<(), HardwareFault> {
        let value = value.min(MAX_INTENSITY);
        self.output
            .write(value)
            .map_err(|e| HardwareFault::new(&self.name, e))?;
        self.intensity = value;

        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), HardwareFault> {
        self.output
            .shutdown()
            .map_err(|e| HardwareFault::new(&self.name, e))
    }
}

/// The lamps in wiring order. The order decides which lamp is "first" for
/// chases and one-by-one fades, and the set never grows or shrinks after it is
/// built.
#[derive(Debug)]
pub struct ChannelSet<O> {
    channels: Vec<Channel<O>>,
}

impl<O: PwmOutput> ChannelSet<O> {
    pub fn new(channels: Vec<Channel<O>>) -> Self {
        Self { channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Channel<O>> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel<O>> {
        self.channels.iter()
    }

    pub fn set(&mut self, index: usize, value: Intensity) -> Result<(), HardwareFault> {
        // Make sure the index is not outside of the range of channels
        let len = self.channels.len();
        match self.channels.get_mut(index) {
            Some(channel) => channel.set_intensity(value),
            None => {
                error!("Channel {}: out of range, only {} channels", index, len);
                Ok(())
            }
        }
    }

    pub fn set_all(&mut self, value: Intensity) -> Result<(), HardwareFault> {
        self.channels
            .iter_mut()
            .try_for_each(|channel| channel.set_intensity(value))
    }

    pub fn all_off(&mut self) -> Result<(), HardwareFault> {
        info!("All off");
        self.set_all(0)
    }

    pub fn all_on(&mut self) -> Result<(), HardwareFault> {
        info!("All on");
        self.set_all(MAX_INTENSITY)
    }

    /// Current intensity of every channel, in order.
    pub fn intensities(&self) -> Vec<Intensity> {
        self.channels.iter().map(Channel::intensity).collect()
    }

    /// Run `effect` on each channel from first to last, stopping at the first
    /// error.
    pub fn for_each_ordered<E, F>(&mut self, mut effect: F) -> Result<(), E>
    where
        F: FnMut(usize, &mut Channel<O>) -> Result<(), E>,
    {
        self.channels
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, channel)| effect(index, channel))
    }

    /// Ask `value_for` for every channel's new intensity, in order, and apply
    /// each answer immediately.
    pub fn set_each_independently<F>(&mut self, mut value_for: F) -> Result<(), HardwareFault>
    where
        F: FnMut(usize) -> Intensity,
    {
        self.for_each_ordered(|index, channel| channel.set_intensity(value_for(index)))
    }

    /// Release every output. Keeps going past failures so that as many lamps
    /// as possible end up released, then reports the first one.
    pub fn shutdown(&mut self) -> Result<(), HardwareFault> {
        let mut first_fault = None;

        for channel in self.channels.iter_mut() {
            if let Err(fault) = channel.shutdown() {
                error!("{}", fault);
                first_fault.get_or_insert(fault);
            }
        }

        match first_fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}
