use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use crate::error::Interrupted;

/// Paces the animations. `sleep` is the only place the show ever waits.
pub trait AnimationClock {
    /// Wait for roughly `duration`, or less if interrupted. The duration is a
    /// lower bound only; drift is not compensated.
    fn sleep(&mut self, duration: Duration) -> Result<(), Interrupted>;
}

/// Blocks the calling thread. Each call to [`Interrupter::interrupt`] cuts one
/// sleep short: the one in progress, or else the next one.
pub struct ThreadClock {
    interrupts: Receiver<()>,
}

/// Handle for interrupting a [`ThreadClock`] from another thread.
#[derive(Clone)]
pub struct Interrupter {
    sender: Sender<()>,
}

impl ThreadClock {
    pub fn new() -> (Self, Interrupter) {
        let (sender, interrupts) = mpsc::channel();
        (Self { interrupts }, Interrupter { sender })
    }
}

impl AnimationClock for ThreadClock {
    fn sleep(&mut self, duration: Duration) -> Result<(), Interrupted> {
        match self.interrupts.recv_timeout(duration) {
            Ok(()) => Err(Interrupted),
            Err(RecvTimeoutError::Timeout) => Ok(()),
            // Nobody can interrupt us anymore
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(duration);
                Ok(())
            }
        }
    }
}

impl Interrupter {
    /// Returns false once the clock is gone.
    pub fn interrupt(&self) -> bool {
        self.sender.send(()).is_ok()
    }
}
