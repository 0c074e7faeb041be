// File: src/element.rs
// Purpose: Element snapshots and the handle interface hosts implement

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;

/// Rule name (prefix stripped) mapped to its optional raw parameter
pub type DeclaredRules = BTreeMap<String, Option<String>>;

/// How an element's `required` rule is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    TextLike,
    Checkbox,
    Radio,
}

impl ElementKind {
    /// Map an input `type` attribute to a kind. Unknown and missing types are text-like.
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("checkbox") {
            ElementKind::Checkbox
        } else if input_type.eq_ignore_ascii_case("radio") {
            ElementKind::Radio
        } else {
            ElementKind::TextLike
        }
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self, ElementKind::Checkbox | ElementKind::Radio)
    }
}

/// Read-only snapshot of a form element taken at validation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub kind: ElementKind,
    pub name: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub declared_rules: DeclaredRules,
}

impl ElementDescriptor {
    pub fn has_rules(&self) -> bool {
        !self.declared_rules.is_empty()
    }

    pub fn declares(&self, rule: &str) -> bool {
        self.declared_rules.contains_key(rule)
    }
}

/// A live element the validator can observe.
///
/// Implementations must read current state on every call; the validator
/// relies on that to never report a stale verdict.
pub trait ElementHandle: Sized {
    /// Take a fresh snapshot of the element
    fn descriptor(&self) -> ElementDescriptor;

    /// All controls of the enclosing form, in document order.
    ///
    /// Empty when the element does not belong to a form.
    fn form_controls(&self) -> Vec<Self>;
}

/// Extract the declared rule set from an element's attributes.
///
/// Only attributes carrying the configured prefix are considered, and the
/// form marker is never treated as a rule. Empty values become `None`.
pub fn declared_rules_from_attributes<'a, I>(attributes: I, config: &ValidatorConfig) -> DeclaredRules
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .filter_map(|(name, value)| {
            let rule = name.strip_prefix(config.attribute_prefix.as_str())?;
            if rule.is_empty() || rule == config.form_marker {
                return None;
            }
            let parameter = (!value.is_empty()).then(|| value.to_string());
            Some((rule.to_ascii_lowercase(), parameter))
        })
        .collect()
}
