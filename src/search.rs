//! Scan previous build numbers for an embedded version
//!
//! Build numbers produced from a label template carry the version somewhere
//! inside them (`"Acme.PetShop-Trunk-Full-0.0.110114.3"`). Entries that do not
//! embed a four-part version are skipped, not treated as errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::version::Version;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+").unwrap());

/// Extract the first four-part version embedded anywhere in `text`
pub fn extract_version(text: &str) -> Option<Version> {
    VERSION_PATTERN
        .find_iter(text)
        .find_map(|found| found.as_str().parse().ok())
}

/// Find the first candidate (most recent first) that embeds a version
pub fn find_first_version<I, S>(candidates: I) -> Option<Version>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates.into_iter().find_map(|candidate| {
        let candidate = candidate.as_ref();
        let version = extract_version(candidate);
        if version.is_none() {
            tracing::debug!(candidate, "Skipping build number without a version");
        }
        version
    })
}
