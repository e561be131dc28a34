//! Build number update step for a build workflow
//!
//! Looks at the latest build numbers of the team project, continues the
//! version found in the most recent one that carries a version, and records
//! the composed build number against the current build.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::LabellerConfig;
use crate::generator::next_version;
use crate::search::find_first_version;
use crate::version::Version;
use crate::{Error, Result};

/// Placeholder in the build number format replaced by the version number
pub const VERSION_TOKEN: &str = "{0}";

/// How many previous build numbers are searched for a version
pub const PREVIOUS_BUILDS_TO_SCAN: usize = 10;

/// The build currently running, and access to its team project's history
#[cfg_attr(test, mockall::automock)]
pub trait BuildDetail {
    fn team_project(&self) -> String;

    /// Latest build numbers of `team_project`, most recent first
    fn latest_build_numbers(&self, team_project: &str, max: usize) -> Result<Vec<String>>;

    /// Set and save the build number of the current build
    fn record_build_number(&mut self, build_number: &str) -> Result<()>;
}

/// Result of a build number update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildNumberOutcome {
    pub build_number: String,
    pub version_number: String,
}

/// Substitute `version` into `format`
pub fn compose_label(format: &str, version: &Version) -> Result<String> {
    if !format.contains(VERSION_TOKEN) {
        return Err(Error::InvalidFormat);
    }
    Ok(format.replace(VERSION_TOKEN, &version.to_string()))
}

#[derive(Debug, Clone)]
pub struct UpdateBuildNumber {
    build_number_format: String,
    major: u32,
    minor: u32,
}

impl UpdateBuildNumber {
    pub fn new(build_number_format: impl Into<String>, major: u32, minor: u32) -> Self {
        Self {
            build_number_format: build_number_format.into(),
            major,
            minor,
        }
    }

    pub fn from_config(config: &LabellerConfig) -> Self {
        Self::new(config.build_number_format.clone(), config.major, config.minor)
    }

    pub fn build_number_format(&self) -> &str {
        &self.build_number_format
    }

    /// Version that follows the given previous build numbers
    pub fn next_version_from(&self, previous_build_numbers: &[String], today: NaiveDate) -> Result<Version> {
        match find_first_version(previous_build_numbers) {
            Some(latest) => {
                tracing::debug!(latest = %latest, "Continuing from previous build");
                next_version(self.major, self.minor, Some(&latest), today)
            }
            None => {
                tracing::debug!(
                    scanned = previous_build_numbers.len(),
                    "No previous build number carries a version"
                );
                Ok(Version::fresh(self.major, self.minor, today))
            }
        }
    }

    /// Compute, record and return the build number of the current build
    pub fn execute(&self, detail: Option<&mut dyn BuildDetail>, today: NaiveDate) -> Result<BuildNumberOutcome> {
        if !self.build_number_format.contains(VERSION_TOKEN) {
            return Err(Error::InvalidFormat);
        }

        let detail = detail.ok_or(Error::ArgumentNull("build detail"))?;

        let team_project = detail.team_project();
        let previous = detail.latest_build_numbers(&team_project, PREVIOUS_BUILDS_TO_SCAN)?;
        let version = self.next_version_from(&previous, today)?;

        let build_number = compose_label(&self.build_number_format, &version)?;
        detail.record_build_number(&build_number)?;
        tracing::info!(
            team_project = %team_project,
            build_number = %build_number,
            "Updated build number"
        );

        Ok(BuildNumberOutcome {
            build_number,
            version_number: version.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    const FORMAT: &str = "Acme.PetShop-Trunk-Full-{0}";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
    }

    fn detail_with_history(history: Vec<&str>, expected_build_number: &'static str) -> MockBuildDetail {
        let history: Vec<String> = history.into_iter().map(String::from).collect();
        let mut detail = MockBuildDetail::new();
        detail
            .expect_team_project()
            .return_const("Acme.PetShop".to_string());
        detail
            .expect_latest_build_numbers()
            .with(eq("Acme.PetShop"), eq(PREVIOUS_BUILDS_TO_SCAN))
            .times(1)
            .returning(move |_, _| Ok(history.clone()));
        detail
            .expect_record_build_number()
            .with(eq(expected_build_number))
            .times(1)
            .returning(|_| Ok(()));
        detail
    }

    #[test]
    fn test_compose_label() {
        let version = Version::new(2, 2, 240302, 1);
        assert_eq!(
            compose_label(FORMAT, &version).unwrap(),
            "Acme.PetShop-Trunk-Full-2.2.240302.1"
        );
        assert!(matches!(
            compose_label("NoToken", &version),
            Err(Error::InvalidFormat)
        ));
    }

    #[test]
    fn test_invalid_build_number_format() {
        let mut detail = MockBuildDetail::new();
        let err = UpdateBuildNumber::new("NoToken", 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'BuildNumberFormat' value did not contain '{0}' as required (this will be replaced by the version number)."
        );
    }

    #[test]
    fn test_invalid_build_number_format_without_build_detail() {
        let err = UpdateBuildNumber::new("NoToken", 1, 0).execute(None, today()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat));
    }

    #[test]
    fn test_argument_null() {
        let err = UpdateBuildNumber::new(FORMAT, 2, 2).execute(None, today()).unwrap_err();
        assert!(matches!(err, Error::ArgumentNull("build detail")));
    }

    #[test]
    fn test_no_previous_builds() {
        let mut detail = detail_with_history(vec![], "Acme.PetShop-Trunk-Full-2.2.240302.0");
        let outcome = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
        assert_eq!(outcome.version_number, "2.2.240302.0");
    }

    #[test]
    fn test_no_previous_builds_matching_the_naming_convention() {
        let mut detail = detail_with_history(
            vec!["Acme.PetShop-Trunk-Full"],
            "Acme.PetShop-Trunk-Full-2.2.240302.0",
        );
        let outcome = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
        assert_eq!(outcome.build_number, "Acme.PetShop-Trunk-Full-2.2.240302.0");
    }

    #[test]
    fn test_previous_build_from_the_same_day() {
        let mut detail = detail_with_history(
            vec!["Acme.PetShop-Trunk-Full-2.2.240302.0"],
            "Acme.PetShop-Trunk-Full-2.2.240302.1",
        );
        let outcome = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
        assert_eq!(outcome.version_number, "2.2.240302.1");
    }

    #[test]
    fn test_previous_build_from_yesterday() {
        let mut detail = detail_with_history(
            vec!["Acme.PetShop-Trunk-Full-0.0.240301.3"],
            "Acme.PetShop-Trunk-Full-2.2.240302.0",
        );
        let outcome = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
        assert_eq!(outcome.version_number, "2.2.240302.0");
    }

    #[test]
    fn test_different_previous_build_label() {
        let mut detail = detail_with_history(
            vec!["Acme.AnotherShop-Trunk-Full-2.2.240302.0"],
            "Acme.PetShop-Trunk-Full-2.2.240302.1",
        );
        UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
    }

    #[test]
    fn test_same_day_with_changed_major_minor() {
        let mut detail = detail_with_history(
            vec!["Acme.PetShop-Trunk-Full-1.1.240302.0"],
            "Acme.PetShop-Trunk-Full-2.2.240302.1",
        );
        let outcome = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
        assert_eq!(outcome.version_number, "2.2.240302.1");
    }

    #[test]
    fn test_skips_unversioned_builds() {
        let mut detail = detail_with_history(
            vec!["Manual build", "Acme.PetShop-Trunk-Full-2.2.240302.6", "Acme.PetShop-Trunk-Full-2.2.240302.5"],
            "Acme.PetShop-Trunk-Full-2.2.240302.7",
        );
        UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap();
    }

    #[test]
    fn test_query_failure_propagates() {
        let mut detail = MockBuildDetail::new();
        detail.expect_team_project().return_const("Acme.PetShop".to_string());
        detail
            .expect_latest_build_numbers()
            .returning(|_, _| Err(Error::Config("build server unavailable".into())));
        detail.expect_record_build_number().never();

        let err = UpdateBuildNumber::new(FORMAT, 2, 2)
            .execute(Some(&mut detail), today())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
