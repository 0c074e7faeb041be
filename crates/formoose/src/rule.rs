//! Rule evaluation
//!
//! Each rule is checked in isolation against one element's current value and
//! checked state. Rules know nothing about sibling elements or forms; group
//! handling lives in [`crate::validator`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::element::ElementKind;
use crate::error::ConfigError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

// Optional sign, then an integer or decimal literal ("4.", ".5" included).
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").unwrap()
});

/// Name of a supported rule, without its parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleName {
    Required,
    Email,
    Min,
    Max,
    Number,
}

impl RuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::Required => "required",
            RuleName::Email => "email",
            RuleName::Min => "min",
            RuleName::Max => "max",
            RuleName::Number => "number",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(RuleName::Required),
            "email" => Ok(RuleName::Email),
            "min" => Ok(RuleName::Min),
            "max" => Ok(RuleName::Max),
            "number" => Ok(RuleName::Number),
            other => Err(ConfigError::UnknownRule { name: other.to_string() }),
        }
    }
}

/// A declared rule with its typed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    /// Minimum length in UTF-16 code units
    Min(usize),
    /// Maximum length in UTF-16 code units
    Max(usize),
    Number,
}

impl Rule {
    /// Build a rule from its attribute name and optional parameter.
    ///
    /// Flag rules ignore the parameter. Length rules require a
    /// non-negative integer.
    pub fn parse(name: &str, parameter: Option<&str>) -> Result<Self, ConfigError> {
        let rule = match name.parse::<RuleName>()? {
            RuleName::Required => Rule::Required,
            RuleName::Email => Rule::Email,
            RuleName::Number => Rule::Number,
            RuleName::Min => Rule::Min(parse_length(name, parameter)?),
            RuleName::Max => Rule::Max(parse_length(name, parameter)?),
        };
        Ok(rule)
    }

    pub fn name(&self) -> RuleName {
        match self {
            Rule::Required => RuleName::Required,
            Rule::Email => RuleName::Email,
            Rule::Min(_) => RuleName::Min,
            Rule::Max(_) => RuleName::Max,
            Rule::Number => RuleName::Number,
        }
    }

    /// Evaluate this rule against a single element's state
    pub fn evaluate(&self, value: &str, checked: bool, kind: ElementKind) -> bool {
        match self {
            Rule::Required if kind.is_checkable() => checked,
            Rule::Required => !value.trim().is_empty(),
            // Emptiness is only the concern of `required`
            Rule::Email => value.trim().is_empty() || is_valid_email(value),
            Rule::Min(min) => length(value) >= *min,
            Rule::Max(max) => length(value) <= *max,
            Rule::Number => is_number(value),
        }
    }
}

/// Evaluate one rule given by name.
///
/// Returns `Err` when the rule name or its parameter is unusable, and
/// `Ok(false)` when the value simply fails the rule.
pub fn evaluate_rule(
    rule_name: &str,
    parameter: Option<&str>,
    value: &str,
    checked: bool,
    kind: ElementKind,
) -> Result<bool, ConfigError> {
    Rule::parse(rule_name, parameter).map(|rule| rule.evaluate(value, checked, kind))
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check that a value is an integer or decimal literal with an optional sign
pub fn is_number(value: &str) -> bool {
    NUMBER_REGEX.is_match(value.trim())
}

// Browsers measure `minlength`/`maxlength` in UTF-16 code units.
fn length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn parse_length(rule: &str, parameter: Option<&str>) -> Result<usize, ConfigError> {
    let raw = parameter
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ConfigError::MissingParameter { rule: rule.to_string() })?;

    raw.parse::<usize>().map_err(|_| ConfigError::InvalidParameter {
        rule: rule.to_string(),
        value: raw.to_string(),
    })
}
