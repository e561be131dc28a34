//! Next-version computation
//!
//! The build component is derived from the date; the revision counts builds
//! sharing that build component. Major and minor always come from the
//! caller's configuration, never from the previous version.

use chrono::NaiveDate;

use crate::version::{build_component, Version};
use crate::{Error, Result};

/// Compute the version that follows `previous` on `today`
pub fn next_version(
    major: u32,
    minor: u32,
    previous: Option<&Version>,
    today: NaiveDate,
) -> Result<Version> {
    let today_build = build_component(today);

    let revision = match previous {
        Some(prev) if prev.build == today_build => prev
            .revision
            .checked_add(1)
            .ok_or(Error::RevisionExhausted(*prev))?,
        _ => 0,
    };

    let next = Version::new(major, minor, today_build, revision);
    tracing::debug!(
        previous = ?previous.map(ToString::to_string),
        next = %next,
        "Computed next version"
    );
    Ok(next)
}
