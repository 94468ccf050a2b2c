use std::{fs, io, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config file: {0}")]
    Io(#[from] io::Error),
    #[error("parsing config file as TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid speed limits: {0}")]
    Speed(&'static str),
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether speed, volume and mute changes are announced on screen.
    pub osd_messages: bool,
    pub speed: SpeedConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            osd_messages: true,
            speed: SpeedConfig::default(),
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min: 0.125,
            max: 8.0,
            step: 2.0,
            initial: 1.0,
        }
    }
}

impl SpeedConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min > 0.0) {
            return Err(ConfigError::Speed("min must be positive"));
        }
        if self.min > self.max {
            return Err(ConfigError::Speed("min is larger than max"));
        }
        if !(self.step > 1.0) {
            return Err(ConfigError::Speed("step must be larger than 1"));
        }
        if !(self.min..=self.max).contains(&self.initial) {
            return Err(ConfigError::Speed("initial is outside of min and max"));
        }
        Ok(())
    }

    /// The next speed up, within `min..=max` even if `speed` was not.
    pub fn up(&self, speed: f64) -> f64 {
        (speed * self.step).clamp(self.min, self.max)
    }

    /// The next speed down, within `min..=max` even if `speed` was not.
    pub fn down(&self, speed: f64) -> f64 {
        (speed / self.step).clamp(self.min, self.max)
    }
}

impl Config {
    pub fn from_toml_str(conts: &str) -> Result<Self, ConfigError> {
        let conf: Config = toml::from_str(conts)?;
        conf.speed.validate()?;
        Ok(conf)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let conts = fs::read_to_string(path)?;
        Self::from_toml_str(&conts)
    }

    /// Like [Config::read], but a missing file gives the defaults.
    pub fn read_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::read(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            res => res,
        }
    }
}
