//! Recording doubles for the output and the clock. Both push into one shared
//! trace, so tests can check the exact interleaving of writes and sleeps.

use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

use anyhow::{anyhow, Error};

use crate::{
    animation::Coin,
    clock::AnimationClock,
    error::Interrupted,
    lights::{Channel, ChannelSet, Intensity, PwmOutput},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write { channel: usize, intensity: Intensity },
    Sleep(u64),
    Interrupted,
    Shutdown(usize),
}

#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn sleeps(&self) -> Vec<u64> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Sleep(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn written_levels(&self) -> Vec<Intensity> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Write { intensity, .. } => Some(*intensity),
                _ => None,
            })
            .collect()
    }

    /// Replay the writes over `count` dark channels and capture what the
    /// lamps showed during each sleep.
    pub fn states_at_sleeps(&self, count: usize) -> Vec<Vec<Intensity>> {
        self.states_from(&vec![0; count])
    }

    pub fn states_from(&self, initial: &[Intensity]) -> Vec<Vec<Intensity>> {
        let mut state = initial.to_vec();
        let mut states = Vec::new();

        for event in self.0.borrow().iter() {
            match event {
                Event::Write { channel, intensity } => state[*channel] = *intensity,
                Event::Sleep(_) => states.push(state.clone()),
                Event::Interrupted | Event::Shutdown(_) => {}
            }
        }

        states
    }
}

pub struct TraceOutput {
    index: usize,
    trace: Trace,
    writes_left: Option<usize>,
}

impl PwmOutput for TraceOutput {
    fn write(&mut self, intensity: Intensity) -> Result<(), Error> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(anyhow!("bus error"));
            }
            *left -= 1;
        }

        self.trace.push(Event::Write {
            channel: self.index,
            intensity,
        });
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), Error> {
        self.trace.push(Event::Shutdown(self.index));
        Ok(())
    }
}

fn build_channels(count: usize, writes_left: Option<usize>) -> (ChannelSet<TraceOutput>, Trace) {
    let trace = Trace::default();
    let channels = (0..count)
        .map(|index| {
            Channel::new(
                format!("lamp-{}", index),
                TraceOutput {
                    index,
                    trace: trace.clone(),
                    writes_left,
                },
            )
        })
        .collect();

    (ChannelSet::new(channels), trace)
}

/// `count` dark channels named `lamp-0`, `lamp-1`, ...
pub fn trace_channels(count: usize) -> (ChannelSet<TraceOutput>, Trace) {
    build_channels(count, None)
}

/// Like [`trace_channels`], but every output fails once it has accepted
/// `successful_writes` writes.
pub fn failing_channels(
    count: usize,
    successful_writes: usize,
) -> (ChannelSet<TraceOutput>, Trace) {
    build_channels(count, Some(successful_writes))
}

/// Never actually waits. Optionally interrupts the n-th sleep (0-based).
pub struct TraceClock {
    trace: Trace,
    slept: usize,
    interrupt_at: Option<usize>,
}

impl TraceClock {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            slept: 0,
            interrupt_at: None,
        }
    }

    pub fn interrupt_at(mut self, sleep: usize) -> Self {
        self.interrupt_at = Some(sleep);
        self
    }
}

impl AnimationClock for TraceClock {
    fn sleep(&mut self, duration: Duration) -> Result<(), Interrupted> {
        self.trace.push(Event::Sleep(duration.as_millis() as u64));
        let current = self.slept;
        self.slept += 1;

        if self.interrupt_at == Some(current) {
            self.trace.push(Event::Interrupted);
            return Err(Interrupted);
        }

        Ok(())
    }
}

/// Hands out a fixed sequence of draws, then keeps answering false.
pub struct ScriptedCoin {
    draws: VecDeque<bool>,
}

impl ScriptedCoin {
    pub fn new(draws: impl IntoIterator<Item = bool>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl Coin for ScriptedCoin {
    fn flip(&mut self) -> bool {
        self.draws.pop_front().unwrap_or(false)
    }
}
