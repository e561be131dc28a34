//! Four-part assembly version and the date-derived build component

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Separator between version components
pub const SEPARATOR: char = '.';

/// A `major.minor.build.revision` version number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Version whose build component is derived from `date`
    pub fn for_date(major: u32, minor: u32, date: NaiveDate, revision: u32) -> Self {
        Self::new(major, minor, build_component(date), revision)
    }

    /// First version of the day
    pub fn fresh(major: u32, minor: u32, date: NaiveDate) -> Self {
        Self::for_date(major, minor, date, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Strict parse: exactly four dot-separated decimal integers.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidVersion(s.to_string());

        let mut parts = s.split(SEPARATOR);
        let mut next = || -> Result<u32> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        let version = Version::new(next()?, next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Build component for a calendar date: `yMMdd` with the century dropped.
///
/// 2011-05-01 becomes 110501; 2024-03-02 becomes 240302.
pub fn build_component(date: NaiveDate) -> u32 {
    let year = date.year().rem_euclid(100) as u32;
    year * 10_000 + date.month() * 100 + date.day()
}
