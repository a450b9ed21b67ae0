//! Configuration primitives for the AS5600 driver.

use crate::params::{
    FastFilterThreshold,
    Hysteresis,
    OutputStage,
    PowerMode,
    PwmFrequency,
    SlowFilter,
    Watchdog,
};
use crate::registers::Conf;

/// User-facing configuration for the AS5600 sensor, mirroring the `CONF` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Power mode selection.
    pub power_mode: PowerMode,
    /// Output hysteresis.
    pub hysteresis: Hysteresis,
    /// Output stage selection.
    pub output_stage: OutputStage,
    /// PWM frequency, only relevant with [`OutputStage::DigitalPwm`].
    pub pwm_frequency: PwmFrequency,
    /// Slow filter step response.
    pub slow_filter: SlowFilter,
    /// Fast filter threshold.
    pub fast_filter_threshold: FastFilterThreshold,
    /// Watchdog enable.
    pub watchdog: Watchdog,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Writes every setting into a `CONF` view, leaving the unused bits alone.
    pub fn apply_to(&self, conf: &mut Conf) {
        conf.set_power_mode(self.power_mode);
        conf.set_hysteresis(self.hysteresis);
        conf.set_output_stage(self.output_stage.bits());
        conf.set_pwm_frequency(self.pwm_frequency);
        conf.set_slow_filter(self.slow_filter);
        conf.set_fast_filter_threshold(self.fast_filter_threshold);
        conf.set_watchdog(self.watchdog);
    }

    /// Decodes a `CONF` view, failing on the reserved output stage encoding.
    pub fn from_conf(conf: Conf) -> core::result::Result<Self, ConfigError> {
        let output_stage =
            OutputStage::from_bits(conf.output_stage()).ok_or(ConfigError::ReservedOutputStage)?;

        Ok(Self {
            power_mode: conf.power_mode(),
            hysteresis: conf.hysteresis(),
            output_stage,
            pwm_frequency: conf.pwm_frequency(),
            slow_filter: conf.slow_filter(),
            fast_filter_threshold: conf.fast_filter_threshold(),
            watchdog: conf.watchdog(),
        })
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the power mode.
    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.config.power_mode = power_mode;
        self
    }

    /// Overrides the output hysteresis.
    pub fn hysteresis(mut self, hysteresis: Hysteresis) -> Self {
        self.config.hysteresis = hysteresis;
        self
    }

    /// Selects the output stage.
    pub fn output_stage(mut self, output_stage: OutputStage) -> Self {
        self.config.output_stage = output_stage;
        self
    }

    /// Sets the PWM frequency.
    pub fn pwm_frequency(mut self, pwm_frequency: PwmFrequency) -> Self {
        self.config.pwm_frequency = pwm_frequency;
        self
    }

    /// Sets the slow filter step response.
    pub fn slow_filter(mut self, slow_filter: SlowFilter) -> Self {
        self.config.slow_filter = slow_filter;
        self
    }

    /// Sets the fast filter threshold.
    pub fn fast_filter_threshold(mut self, threshold: FastFilterThreshold) -> Self {
        self.config.fast_filter_threshold = threshold;
        self
    }

    /// Enables or disables the watchdog.
    pub fn watchdog(mut self, watchdog: Watchdog) -> Self {
        self.config.watchdog = watchdog;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    /// Datasheet reset state: every `CONF` bit cleared.
    fn default() -> Self {
        Self {
            power_mode: PowerMode::Nom,
            hysteresis: Hysteresis::Off,
            output_stage: OutputStage::AnalogFullRange,
            pwm_frequency: PwmFrequency::Hz115,
            slow_filter: SlowFilter::X16,
            fast_filter_threshold: FastFilterThreshold::SlowOnly,
            watchdog: Watchdog::Disabled,
        }
    }
}

/// Errors generated while decoding a [`Config`] from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `CONF.OUTS` holds the reserved `0b11` encoding.
    ReservedOutputStage,
}
