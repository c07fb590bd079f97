//! Run configuration
//!
//! Settings come from an optional TOML file and can be overridden from the
//! environment:
//!
//! ```toml
//! strict = true
//! max_ticks = 100000
//! trace = false
//! ```
//!
//! `PIXLANG_STRICT` and `PIXLANG_TRACE` switch their flag on when set to any
//! value. `PIXLANG_MAX_TICKS` takes a decimal tick budget.

use crate::error::ProgramError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Reject class bytes outside the known instruction set
    pub strict: bool,
    /// Stop with an error after this many ticks. None runs unbounded.
    pub max_ticks: Option<u64>,
    /// Log every tick at info level
    pub trace: bool,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ProgramError> {
        Ok(toml::from_str::<RunConfig>(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ProgramError> {
        let text = fs::read_to_string(path).map_err(|e| {
            ProgramError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `PIXLANG_*` environment overrides
    pub fn apply_env(self) -> Result<Self, ProgramError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ProgramError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("PIXLANG_STRICT").is_some() {
            self.strict = true;
        }
        if lookup("PIXLANG_TRACE").is_some() {
            self.trace = true;
        }
        if let Some(ticks) = lookup("PIXLANG_MAX_TICKS") {
            let ticks = ticks.trim().parse::<u64>().map_err(|_| {
                ProgramError::Config(format!("PIXLANG_MAX_TICKS is not a number: {}", ticks))
            })?;
            self.max_ticks = Some(ticks);
        }
        Ok(self)
    }
}
