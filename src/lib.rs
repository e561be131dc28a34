//! Build Labeller
//!
//! Date-based build labels and version numbers for CI servers. Every label
//! is a `major.minor.build.revision` version where the build component is
//! the build date (`yMMdd`) and the revision counts builds on that date.
//!
//! # Key Features
//!
//! - **Pure generator** - the current date is always passed in
//! - **CI labeller** - continues the previous integration's label
//! - **Build number step** - finds the version inside prefixed build numbers
//!
//! # Example
//!
//! ```
//! use build_labeller::{next_version, Version};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
//! let previous: Version = "1.0.240302.0".parse()?;
//!
//! let next = next_version(1, 0, Some(&previous), today)?;
//! assert_eq!(next.to_string(), "1.0.240302.1");
//! # Ok::<(), build_labeller::Error>(())
//! ```

pub mod build_number;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod labeller;
pub mod search;
pub mod version;

pub use build_number::{compose_label, BuildDetail, BuildNumberOutcome, UpdateBuildNumber};
pub use config::LabellerConfig;
pub use error::{Error, Result};
pub use generator::next_version;
pub use history::BuildHistory;
pub use labeller::{DateVersionLabeller, IntegrationResult};
pub use search::{extract_version, find_first_version};
pub use version::{build_component, Version};
