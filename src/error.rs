use thiserror::Error;

/// A sleep of the animation clock was cut short. Recoverable: the running
/// animation stops and the show moves on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("animation got interrupted")]
pub struct Interrupted;

/// The output collaborator could not apply a write to a channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("hardware fault on channel '{channel}': {reason}")]
pub struct HardwareFault {
    pub channel: String,
    pub reason: String,
}

impl HardwareFault {
    pub fn new(channel: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            channel: channel.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why an animation stopped before running to completion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
    #[error(transparent)]
    Hardware(#[from] HardwareFault),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file '{0}': {1}")]
    Read(String, std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config has no channels")]
    NoChannels,
    #[error("duplicate channel name '{0}'")]
    DuplicateChannel(String),
}
