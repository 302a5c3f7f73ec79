//! Settings - rule toggles and write policy, layered from several sources
//!
//! Built-in defaults come first, then an optional TOML file, then explicit
//! overrides (typically command-line flags). Later layers win.
//!
//! ```toml
//! write_policy = "if-changed"   # or "always", "never"
//!
//! [rules]
//! boolean_simplification = true
//! time_unit_spacing = false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::pipeline::PipelineConfig;
use crate::processor::WritePolicy;
use crate::rules::RuleId;
use crate::{Error, Result};

/// On-disk configuration file layout
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub write_policy: Option<WritePolicy>,
    #[serde(default)]
    pub rules: BTreeMap<String, bool>,
}

impl ConfigFile {
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text, path)
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub pipeline: PipelineConfig,
    pub write_policy: WritePolicy,
}

impl Settings {
    /// Layer a config file read from disk
    pub fn with_file(self, path: &Path) -> Result<Self> {
        let file = ConfigFile::read(path)?;
        self.with_config(file)
    }

    /// Layer an already-parsed config file; unknown rule names are an error
    pub fn with_config(mut self, file: ConfigFile) -> Result<Self> {
        for (name, enabled) in &file.rules {
            let id: RuleId = name.parse()?;
            self.pipeline = self.pipeline.with(id, *enabled);
        }
        if let Some(policy) = file.write_policy {
            self.write_policy = policy;
        }
        Ok(self)
    }

    /// Switch one rule
    pub fn with_rule(mut self, id: RuleId, enabled: bool) -> Self {
        self.pipeline = self.pipeline.with(id, enabled);
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }
}
