//! Literal find/replace rewriting of materialized files

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A literal substitution applied to every occurrence of `find`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionRule {
    /// Exact text to search for. Never interpreted as a pattern.
    pub find: String,
    /// Text written in place of each match
    pub replace: String,
}

impl SubstitutionRule {
    /// Create a rule from a match/replacement pair
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Applies an ordered list of substitution rules
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<SubstitutionRule>,
}

impl Rewriter {
    /// Create a rewriter applying `rules` in order
    pub fn new(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }

    /// Configured rules, in application order
    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Apply every rule, in order, to `text`
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .filter(|rule| !rule.find.is_empty())
            .fold(text.to_string(), |acc, rule| acc.replace(&rule.find, &rule.replace))
    }

    /// Rewrite a file in place.
    ///
    /// Returns `true` if the content changed. Files are only read when rules
    /// are configured and only written back when something was replaced.
    pub fn rewrite_file(&self, path: &Path) -> CoreResult<bool> {
        if self.rules.is_empty() {
            return Ok(false);
        }

        let original =
            std::fs::read_to_string(path).map_err(|e| CoreError::destination_read(path, e))?;
        let rewritten = self.apply(&original);
        if rewritten == original {
            return Ok(false);
        }

        std::fs::write(path, rewritten).map_err(|e| CoreError::destination_write(path, e))?;
        log::debug!("Rewrote {}", path.display());
        Ok(true)
    }
}

#[cfg(test)]
#[path = "rewriter_test.rs"]
mod tests;
