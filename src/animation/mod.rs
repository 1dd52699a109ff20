//! The light patterns. Every animation writes channels strictly in set order
//! and waits only through the clock, so the same inputs always produce the
//! same sequence of writes and sleeps. An interrupted sleep ends the
//! animation right there and is returned as [`AnimationError::Interrupted`].

use std::time::Duration;

use log::info;

use crate::{
    clock::AnimationClock,
    error::AnimationError,
    lights::{ChannelSet, Intensity, PwmOutput, MAX_INTENSITY},
};

mod coin;
mod fade;

pub use coin::{Coin, FairCoin};

/// Blink every channel together: off, wait, on, wait. Ends with all on.
pub fn flash<O, C>(
    channels: &mut ChannelSet<O>,
    clock: &mut C,
    repeat: u32,
    pace: Duration,
) -> Result<(), AnimationError>
where
    O: PwmOutput,
    C: AnimationClock,
{
    info!("All flash {} times at speed {}", repeat, pace.as_millis());

    for _ in 0..repeat {
        channels.all_off()?;
        clock.sleep(pace)?;
        channels.all_on()?;
        clock.sleep(pace)?;
    }

    Ok(())
}

/// Light the channels one by one until all are on, then turn them off one by
/// one in the same order.
pub fn chase<O, C>(
    channels: &mut ChannelSet<O>,
    clock: &mut C,
    repeat: u32,
    pace: Duration,
) -> Result<(), AnimationError>
where
    O: PwmOutput,
    C: AnimationClock,
{
    info!(
        "One by one on and then off {} times at speed {}",
        repeat,
        pace.as_millis()
    );

    for _ in 0..repeat {
        for level in [MAX_INTENSITY, 0] {
            channels.for_each_ordered(|_, channel| {
                channel.set_intensity(level)?;
                clock.sleep(pace)?;
                Ok::<_, AnimationError>(())
            })?;
        }
    }

    Ok(())
}

/// Each tick, every channel independently goes fully on or fully off.
pub fn random_flicker<O, C, R>(
    channels: &mut ChannelSet<O>,
    clock: &mut C,
    coin: &mut R,
    repeat: u32,
    pace: Duration,
) -> Result<(), AnimationError>
where
    O: PwmOutput,
    C: AnimationClock,
    R: Coin + ?Sized,
{
    info!("All random flash {} times at speed {}", repeat, pace.as_millis());

    for _ in 0..repeat {
        channels.set_each_independently(|_| if coin.flip() { MAX_INTENSITY } else { 0 })?;
        clock.sleep(pace)?;
    }

    Ok(())
}

/// Fade every channel up together, then back down together.
pub fn synchronized_fade<O, C>(
    channels: &mut ChannelSet<O>,
    clock: &mut C,
    pace: Duration,
    fade_step: Intensity,
) -> Result<(), AnimationError>
where
    O: PwmOutput,
    C: AnimationClock,
{
    info!(
        "All fade at speed {} with steps of {}",
        pace.as_millis(),
        fade_step
    );
    let step = fade::usable_step(fade_step);

    info!("Fading all up");
    for level in fade::ramp_up(step) {
        channels.set_all(level)?;
        clock.sleep(pace)?;
    }

    info!("Fading all down");
    for level in fade::ramp_down(step) {
        channels.set_all(level)?;
        clock.sleep(pace)?;
    }

    Ok(())
}

/// Fade the channels up one at a time, then down one at a time. Channels that
/// are not fading keep whatever level they had.
pub fn sequential_fade<O, C>(
    channels: &mut ChannelSet<O>,
    clock: &mut C,
    pace: Duration,
    fade_step: Intensity,
) -> Result<(), AnimationError>
where
    O: PwmOutput,
    C: AnimationClock,
{
    info!(
        "Fade one by one at speed {} with steps of {}",
        pace.as_millis(),
        fade_step
    );
    let step = fade::usable_step(fade_step);

    channels.for_each_ordered(|_, channel| {
        info!("Fading up {}", channel.name());
        for level in fade::ramp_up(step) {
            channel.set_intensity(level)?;
            clock.sleep(pace)?;
        }
        Ok::<_, AnimationError>(())
    })?;

    channels.for_each_ordered(|_, channel| {
        info!("Fading down {}", channel.name());
        for level in fade::ramp_down(step) {
            channel.set_intensity(level)?;
            clock.sleep(pace)?;
        }
        Ok::<_, AnimationError>(())
    })
}
