use std::{collections::HashSet, path::Path, str::FromStr};

use log::info;
use pi_pinout::{GpioPin, PhysicalPin, WiringPiPin};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    show::{default_show, AnimationStep},
};

pub const CONFIG_PATH: &str = "config.ron";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Software PWM frequency for every lamp, in Hz.
    #[serde(default = "default_pwm_frequency")]
    pub pwm_frequency: f64,
    /// Lamps in show order.
    pub channels: Vec<Light>,
    #[serde(default = "default_show")]
    pub show: Vec<AnimationStep>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Light {
    pub name: String,
    pub pin: Pin,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub enum Pin {
    Physical(PhysicalPin),
    Gpio(GpioPin),
    WiringPi(WiringPiPin),
}

impl Pin {
    /// The BCM GPIO number behind this pin.
    pub fn gpio(&self) -> GpioPin {
        match *self {
            Pin::Physical(pin) => pin.into(),
            Pin::Gpio(pin) => pin,
            Pin::WiringPi(pin) => pin.into(),
        }
    }
}

// 100 Hz gives 1 ms of resolution per intensity step over a range of 100
fn default_pwm_frequency() -> f64 {
    100.0
}

impl Default for Config {
    /// The lamps as they are wired on the original board.
    fn default() -> Self {
        let channels = [
            ("LeftGreen", 4),    // Pin 16
            ("LeftBlue", 5),     // Pin 18
            ("LeftRed", 6),      // Pin 22
            ("Top", 10),         // Pin 24
            ("RightGreen", 11),  // Pin 26
            ("RightYellow", 31), // Pin 28
            ("RightRed", 26),    // Pin 32
        ]
        .into_iter()
        .map(|(name, pin)| Light {
            name: name.to_string(),
            pin: Pin::WiringPi(WiringPiPin(pin)),
        })
        .collect();

        Self {
            pwm_frequency: default_pwm_frequency(),
            channels,
            show: default_show(),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let config = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        config.parse()
    }

    /// Like [`Config::load`], but a missing file means the built-in wiring and
    /// show.
    pub fn load_or_default() -> Result<Config, ConfigError> {
        if Path::new(CONFIG_PATH).exists() {
            info!("Loading {}", CONFIG_PATH);
            Self::load()
        } else {
            info!("No {} found, using the built-in lights", CONFIG_PATH);
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        let mut names = HashSet::new();
        for light in &self.channels {
            if !names.insert(light.name.as_str()) {
                return Err(ConfigError::DuplicateChannel(light.name.clone()));
            }
        }

        Ok(())
    }
}
