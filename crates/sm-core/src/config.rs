//! Configuration types and parsing for sqlmove.yml

use crate::error::{CoreError, CoreResult};
use crate::rewriter::SubstitutionRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Config file names searched for in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["sqlmove.yml", "sqlmove.yaml"];

/// Idempotent files shipped by the source repository, in apply order
pub const DEFAULT_IDEMPOTENT_FILES: [&str; 13] = [
    "base.sql",
    "tag-operators.sql",
    "matcher-functions.sql",
    "ha.sql",
    "metric-metadata.sql",
    "exemplar.sql",
    "tracing-tags.sql",
    "tracing-functions.sql",
    "tracing-views.sql",
    "telemetry.sql",
    "maintenance.sql",
    "remote-commands.sql",
    "apply_permissions.sql",
];

/// Main configuration from sqlmove.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the source migration tree
    pub source_root: String,

    /// Root of the generated migration tree. Wiped on every run.
    #[serde(default = "default_destination_root")]
    pub destination_root: String,

    /// Subdirectory of `source_root` scanned for numbered migration files
    #[serde(default = "default_preinstall_dir")]
    pub preinstall_dir: String,

    /// Subdirectory of `source_root` holding the idempotent files
    #[serde(default = "default_idempotent_dir")]
    pub idempotent_dir: String,

    /// Restrict the preinstall scan to one file extension (e.g. `sql`)
    #[serde(default)]
    pub scan_extension: Option<String>,

    /// Idempotent file names in the order they are applied
    #[serde(default = "default_idempotent_files")]
    pub idempotent_files: Vec<String>,

    /// Literal substitutions applied to every generated file
    #[serde(default = "default_substitutions")]
    pub substitutions: Vec<SubstitutionRule>,
}

fn default_destination_root() -> String {
    "migration".to_string()
}

fn default_preinstall_dir() -> String {
    "preinstall".to_string()
}

fn default_idempotent_dir() -> String {
    "idempotent".to_string()
}

fn default_idempotent_files() -> Vec<String> {
    DEFAULT_IDEMPOTENT_FILES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// `SELECT` without a target is invalid inside the procedure that runs the
/// migrations.
fn default_substitutions() -> Vec<SubstitutionRule> {
    vec![SubstitutionRule::new(
        "SELECT setval('_ps_trace.tag_key_id_seq', 1000);",
        "PERFORM setval('_ps_trace.tag_key_id_seq', 1000);",
    )]
}

impl Config {
    /// Build a configuration with defaults for everything but the two roots
    pub fn new(source_root: impl Into<String>, destination_root: impl Into<String>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            preinstall_dir: default_preinstall_dir(),
            idempotent_dir: default_idempotent_dir(),
            scan_extension: None,
            idempotent_files: default_idempotent_files(),
            substitutions: default_substitutions(),
        }
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for sqlmove.yml or sqlmove.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Locate the config file in `dir`, if any
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.source_root.is_empty() {
            return Err(invalid("source_root cannot be empty"));
        }
        if self.destination_root.is_empty() {
            return Err(invalid("destination_root cannot be empty"));
        }

        let mut seen = HashSet::new();
        for name in &self.idempotent_files {
            if name.is_empty() {
                return Err(invalid("idempotent_files cannot contain an empty name"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(invalid(format!(
                    "idempotent_files entry '{name}' must be a plain file name"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(format!(
                    "idempotent_files lists '{name}' more than once"
                )));
            }
        }

        if let Some(position) = self.substitutions.iter().position(|r| r.find.is_empty()) {
            return Err(invalid(format!(
                "substitution #{} has an empty 'find' text",
                position + 1
            )));
        }

        Ok(())
    }

    /// Refuse layouts where the destination overlaps a source tree.
    ///
    /// A destination containing a source would be deleted by the reset; one
    /// inside a source would be collected again on the next run. The source
    /// root and both category directories are checked, since the latter may
    /// point outside the source root. Paths are compared lexically after
    /// resolving against `root`.
    pub fn check_disjoint_roots(&self, root: &Path) -> CoreResult<()> {
        let destination = lexical_normalize(&self.destination_root_absolute(root));
        let sources = [
            ("source_root", self.source_root_absolute(root)),
            ("preinstall_dir", self.preinstall_path(root)),
            ("idempotent_dir", self.idempotent_path(root)),
        ];

        for (field, path) in sources {
            let source = lexical_normalize(&path);
            if source.starts_with(&destination) {
                return Err(invalid(format!(
                    "destination_root '{}' contains {field} '{}'; resetting it would delete the source",
                    destination.display(),
                    source.display()
                )));
            }
            if destination.starts_with(&source) {
                return Err(invalid(format!(
                    "destination_root '{}' is inside {field} '{}'; later runs would collect their own output",
                    destination.display(),
                    source.display()
                )));
            }
        }
        Ok(())
    }

    /// Get absolute source root relative to a project root
    pub fn source_root_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.source_root)
    }

    /// Get absolute destination root relative to a project root
    pub fn destination_root_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.destination_root)
    }

    /// Directory scanned for numbered migration files
    pub fn preinstall_path(&self, root: &Path) -> PathBuf {
        self.source_root_absolute(root).join(&self.preinstall_dir)
    }

    /// Directory the idempotent file list is resolved against
    pub fn idempotent_path(&self, root: &Path) -> PathBuf {
        self.source_root_absolute(root).join(&self.idempotent_dir)
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.into(),
    }
}

/// Resolve `.` and `..` components without touching the filesystem
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
