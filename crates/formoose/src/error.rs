//! Configuration errors
//!
//! A configuration error means the page author declared something the engine
//! cannot evaluate. It is never used for a value that simply fails a rule;
//! that is reported through [`Verdict`](crate::Verdict).

use thiserror::Error;

/// Author-side mistake in the declared rule set of an element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown validation rule `{name}`")]
    UnknownRule { name: String },

    #[error("rule `{rule}` requires a length parameter")]
    MissingParameter { rule: String },

    #[error("rule `{rule}` expects a non-negative integer, got `{value}`")]
    InvalidParameter { rule: String, value: String },
}

impl ConfigError {
    /// Name of the rule the error was raised for
    pub fn rule(&self) -> &str {
        match self {
            ConfigError::UnknownRule { name } => name,
            ConfigError::MissingParameter { rule } => rule,
            ConfigError::InvalidParameter { rule, .. } => rule,
        }
    }
}
