use anyhow::Error;
use log::{debug, info, trace};

#[cfg(feature = "pi")]
use rppal::gpio::{Gpio, OutputPin};

use crate::config::Config;

mod channel;

pub use channel::{Channel, ChannelSet, Intensity, PwmOutput, MAX_INTENSITY};

/// A lamp on a GPIO pin, dimmed with software PWM.
#[cfg(feature = "pi")]
pub struct LedOutput {
    gpio: u8,
    frequency: f64,
    pin: OutputPin,
}

/// Stand-in used when the crate is built without the `pi` feature. Writes are
/// only logged.
#[cfg(not(feature = "pi"))]
pub struct LedOutput {
    gpio: u8,
    frequency: f64,
}

impl PwmOutput for LedOutput {
    fn write(&mut self, intensity: Intensity) -> Result<(), Error> {
        let duty_cycle = f64::from(intensity) / f64::from(MAX_INTENSITY);
        trace!(
            "GPIO {}: duty cycle {:.2} at {} Hz",
            self.gpio,
            duty_cycle,
            self.frequency
        );

        #[cfg(feature = "pi")]
        self.pin.set_pwm_frequency(self.frequency, duty_cycle)?;

        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), Error> {
        debug!("GPIO {}: releasing", self.gpio);

        #[cfg(feature = "pi")]
        {
            self.pin.clear_pwm()?;
            self.pin.set_low();
        }

        Ok(())
    }
}

pub struct LedController {}

impl LedController {
    /// Claim every configured pin, in config order, and hand them back as the
    /// channel set the show runs on. All lamps start dark.
    pub fn init(config: &Config) -> Result<ChannelSet<LedOutput>, Error> {
        #[cfg(feature = "pi")]
        let gpio = Gpio::new()?;

        let mut channels = Vec::with_capacity(config.channels.len());

        for (i, light) in config.channels.iter().enumerate() {
            let pin = light.pin.gpio();

            info!("Light {} ({}): initializing on pin {}", i, light.name, pin.0);

            #[cfg(feature = "pi")]
            let output = LedOutput {
                gpio: pin.0,
                frequency: config.pwm_frequency,
                pin: gpio.get(pin.0)?.into_output_low(),
            };

            #[cfg(not(feature = "pi"))]
            let output = LedOutput {
                gpio: pin.0,
                frequency: config.pwm_frequency,
            };

            let mut channel = Channel::new(light.name.clone(), output);
            channel.set_intensity(0)?;
            channels.push(channel);
        }

        Ok(ChannelSet::new(channels))
    }
}
