//! Labeller configuration with builder pattern

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::build_number::VERSION_TOKEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabellerConfig {
    pub major: u32,
    pub minor: u32,
    /// Treat an unparsable previous label as absent instead of failing
    pub initialise: bool,
    pub build_number_format: String,
}

impl Default for LabellerConfig {
    fn default() -> Self {
        Self {
            major: 1,
            minor: 0,
            initialise: false,
            build_number_format: VERSION_TOKEN.to_string(),
        }
    }
}

impl LabellerConfig {
    pub fn builder() -> LabellerConfigBuilder {
        LabellerConfigBuilder::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded labeller config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.build_number_format.contains(VERSION_TOKEN) {
            return Err(crate::Error::InvalidFormat);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct LabellerConfigBuilder {
    config: LabellerConfig,
}

impl LabellerConfigBuilder {
    pub fn major(mut self, major: u32) -> Self {
        self.config.major = major;
        self
    }

    pub fn minor(mut self, minor: u32) -> Self {
        self.config.minor = minor;
        self
    }

    pub fn initialise(mut self, initialise: bool) -> Self {
        self.config.initialise = initialise;
        self
    }

    pub fn build_number_format(mut self, format: impl Into<String>) -> Self {
        self.config.build_number_format = format.into();
        self
    }

    pub fn build(self) -> LabellerConfig {
        self.config
    }

    pub fn build_validated(self) -> crate::Result<LabellerConfig> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
