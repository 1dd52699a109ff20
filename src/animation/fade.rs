use std::iter;

use log::warn;

use crate::lights::{Intensity, MAX_INTENSITY};

/// A zero step never reaches the far end of a ramp.
pub(crate) fn usable_step(fade_step: Intensity) -> Intensity {
    if fade_step == 0 {
        warn!("Fade step of 0 would never finish, using 1 instead");
        1
    } else {
        fade_step
    }
}

/// `0, step, 2 * step, ...` up to and always ending on exactly
/// `MAX_INTENSITY`, even when the step does not divide it.
pub(crate) fn ramp_up(step: Intensity) -> impl Iterator<Item = Intensity> {
    iter::successors(Some(0), move |&level: &Intensity| {
        (level < MAX_INTENSITY).then(|| level.saturating_add(step).min(MAX_INTENSITY))
    })
}

/// `MAX_INTENSITY, MAX_INTENSITY - step, ...` down to and always ending on
/// exactly 0.
pub(crate) fn ramp_down(step: Intensity) -> impl Iterator<Item = Intensity> {
    iter::successors(Some(MAX_INTENSITY), move |&level: &Intensity| {
        (level > 0).then(|| level.saturating_sub(step))
    })
}
