// File: src/config.rs
// Purpose: Validator configuration parsing from formoose.toml

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Prefix shared by every rule attribute (default: "data-formoose-")
    #[serde(default = "default_attribute_prefix", alias = "attributePrefix")]
    pub attribute_prefix: String,

    /// Suffix that marks a form for validation rather than declaring a rule
    #[serde(default = "default_form_marker", alias = "formMarker")]
    pub form_marker: String,

    /// Whether form validation skips disabled controls (default: true)
    #[serde(default = "default_true", alias = "skipDisabled")]
    pub skip_disabled: bool,
}

fn default_attribute_prefix() -> String {
    "data-formoose-".to_string()
}

fn default_form_marker() -> String {
    "form".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            attribute_prefix: default_attribute_prefix(),
            form_marker: default_form_marker(),
            skip_disabled: true,
        }
    }
}

impl ValidatorConfig {
    /// Full attribute name that marks a validated form
    pub fn form_attribute(&self) -> String {
        format!("{}{}", self.attribute_prefix, self.form_marker)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).context("Failed to parse validator config")
    }

    /// Load configuration from a TOML file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }
}
