//! Date version labeller for CI integration results
//!
//! Produces `major.minor.yMMdd.revision` labels from the label of the
//! previous integration. An unparsable previous label is an error unless the
//! labeller is initialising, in which case it is ignored.

use chrono::NaiveDate;

use crate::config::LabellerConfig;
use crate::generator::next_version;
use crate::version::Version;
use crate::{Error, Result};

/// The CI server's record of an integration run
#[cfg_attr(test, mockall::automock)]
pub trait IntegrationResult {
    /// Label of the previous integration, if there ever was one
    fn label(&self) -> Option<String>;

    /// Record the label of the current integration
    fn set_label(&mut self, label: String) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct DateVersionLabeller {
    major: u32,
    minor: u32,
    initialise: bool,
}

impl DateVersionLabeller {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            initialise: false,
        }
    }

    pub fn from_config(config: &LabellerConfig) -> Self {
        Self::new(config.major, config.minor).initialise(config.initialise)
    }

    pub fn initialise(mut self, initialise: bool) -> Self {
        self.initialise = initialise;
        self
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn is_initialising(&self) -> bool {
        self.initialise
    }

    /// Generate the label for the integration following `result`
    pub fn generate(&self, result: Option<&dyn IntegrationResult>, today: NaiveDate) -> Result<Version> {
        let result = result.ok_or(Error::ArgumentNull("integration result"))?;

        let Some(label) = result.label() else {
            tracing::debug!("No previous label, starting fresh");
            return Ok(Version::fresh(self.major, self.minor, today));
        };

        let previous = match label.parse::<Version>() {
            Ok(version) => Some(version),
            Err(_) if self.initialise => {
                tracing::warn!(label = %label, "Ignoring invalid previous label while initialising");
                None
            }
            Err(_) => return Err(Error::InvalidPreviousLabel(label)),
        };

        next_version(self.major, self.minor, previous.as_ref(), today)
    }

    /// Generate the next label and store it on `result`
    pub fn run(&self, result: Option<&mut dyn IntegrationResult>, today: NaiveDate) -> Result<Version> {
        let result = result.ok_or(Error::ArgumentNull("integration result"))?;

        let version = self.generate(Some(&*result), today)?;
        result.set_label(version.to_string())?;
        tracing::info!(label = %version, "Labelled integration");
        Ok(version)
    }
}
