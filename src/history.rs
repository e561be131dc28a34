//! JSON file-backed build history
//!
//! Stands in for the CI server's build store: it remembers the build numbers
//! of one team project, most recent first, and serves as both the
//! [`IntegrationResult`] of the labeller and the [`BuildDetail`] of the build
//! number update.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build_number::BuildDetail;
use crate::labeller::IntegrationResult;
use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    team_project: String,
    #[serde(default)]
    build_numbers: Vec<String>,
}

#[derive(Debug)]
pub struct BuildHistory {
    path: PathBuf,
    file: HistoryFile,
}

impl BuildHistory {
    /// Open the history at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>, team_project: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let team_project = team_project.into();

        let file = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let file: HistoryFile = serde_json::from_str(&raw)?;
            if file.team_project != team_project {
                return Err(Error::Config(format!(
                    "history {} belongs to team project '{}', not '{}'",
                    path.display(),
                    file.team_project,
                    team_project
                )));
            }
            file
        } else {
            tracing::debug!(path = %path.display(), "Starting new build history");
            HistoryFile {
                team_project,
                build_numbers: Vec::new(),
            }
        };

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build numbers, most recent first
    pub fn build_numbers(&self) -> &[String] {
        &self.file.build_numbers
    }

    pub fn latest(&self) -> Option<&str> {
        self.file.build_numbers.first().map(String::as_str)
    }

    /// Prepend a build number and persist
    pub fn push(&mut self, build_number: impl Into<String>) -> Result<()> {
        self.file.build_numbers.insert(0, build_number.into());
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), builds = self.file.build_numbers.len(), "Saved build history");
        Ok(())
    }
}

impl IntegrationResult for BuildHistory {
    fn label(&self) -> Option<String> {
        self.latest().map(str::to_string)
    }

    fn set_label(&mut self, label: String) -> Result<()> {
        self.push(label)
    }
}

impl BuildDetail for BuildHistory {
    fn team_project(&self) -> String {
        self.file.team_project.clone()
    }

    fn latest_build_numbers(&self, team_project: &str, max: usize) -> Result<Vec<String>> {
        if team_project != self.file.team_project {
            return Ok(Vec::new());
        }
        Ok(self.file.build_numbers.iter().take(max).cloned().collect())
    }

    fn record_build_number(&mut self, build_number: &str) -> Result<()> {
        self.push(build_number)
    }
}
