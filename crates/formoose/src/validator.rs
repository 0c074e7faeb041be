//! Element validation
//!
//! Resolves an element's declared rules, evaluates each one, and folds the
//! results into a [`Verdict`]. The `required` rule on a radio button is judged
//! against its whole group: one checked member satisfies every member.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::{ElementDescriptor, ElementHandle, ElementKind};
use crate::error::ConfigError;
use crate::rule::{Rule, RuleName};

/// Outcome of validating one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_valid: bool,
    pub failed_rules: BTreeSet<RuleName>,
}

impl Verdict {
    /// A passing verdict with no failed rules
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            failed_rules: BTreeSet::new(),
        }
    }

    /// Build a verdict from the set of rules that failed
    pub fn from_failed(failed_rules: BTreeSet<RuleName>) -> Self {
        Self {
            is_valid: failed_rules.is_empty(),
            failed_rules,
        }
    }

    pub fn failed(&self, rule: RuleName) -> bool {
        self.failed_rules.contains(&rule)
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::valid()
    }
}

/// Parse every declared rule of an element, stopping at the first bad one
pub fn resolve_rules(descriptor: &ElementDescriptor) -> Result<Vec<Rule>, ConfigError> {
    descriptor
        .declared_rules
        .iter()
        .map(|(name, parameter)| Rule::parse(name, parameter.as_deref()))
        .collect()
}

/// Radio buttons among `controls` that share `name`
pub fn radio_group<'a>(
    controls: &'a [ElementDescriptor],
    name: &'a str,
) -> impl Iterator<Item = &'a ElementDescriptor> + 'a {
    controls
        .iter()
        .filter(move |control| control.kind == ElementKind::Radio && control.name == name)
}

/// Validate one element against its declared rules.
///
/// `Err` means the element's rules are misconfigured; an input that merely
/// fails a rule is reported as `Ok` with `is_valid == false`.
pub fn validate_element<E: ElementHandle>(element: &E) -> Result<Verdict, ConfigError> {
    let descriptor = element.descriptor();
    let rules = resolve_rules(&descriptor)?;

    let mut failed = BTreeSet::new();
    for rule in &rules {
        let passed = match rule {
            Rule::Required if descriptor.kind == ElementKind::Radio => {
                group_has_selection(element, &descriptor)
            }
            _ => rule.evaluate(&descriptor.value, descriptor.checked, descriptor.kind),
        };

        if !passed {
            failed.insert(rule.name());
        }
    }

    let verdict = Verdict::from_failed(failed);
    debug!(
        name = %descriptor.name,
        is_valid = verdict.is_valid,
        failed = ?verdict.failed_rules,
        "element validated"
    );
    Ok(verdict)
}

fn group_has_selection<E: ElementHandle>(element: &E, descriptor: &ElementDescriptor) -> bool {
    // Unnamed radios never form a group
    if descriptor.checked || descriptor.name.is_empty() {
        return descriptor.checked;
    }

    let controls: Vec<ElementDescriptor> = element
        .form_controls()
        .iter()
        .map(E::descriptor)
        .collect();

    let selected = radio_group(&controls, &descriptor.name).any(|member| member.checked);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::DeclaredRules;
    use pretty_assertions::assert_eq;

    /// Stand-alone element outside any form
    struct Loose(ElementDescriptor);

    impl ElementHandle for Loose {
        fn descriptor(&self) -> ElementDescriptor {
            self.0.clone()
        }

        fn form_controls(&self) -> Vec<Self> {
            Vec::new()
        }
    }

    fn text(value: &str, rules: &[(&str, Option<&str>)]) -> Loose {
        Loose(ElementDescriptor {
            kind: ElementKind::TextLike,
            name: "field".to_string(),
            value: value.to_string(),
            checked: false,
            disabled: false,
            declared_rules: rules
                .iter()
                .map(|(name, param)| (name.to_string(), param.map(str::to_string)))
                .collect::<DeclaredRules>(),
        })
    }

    #[test]
    fn test_no_rules_is_valid() {
        assert_eq!(validate_element(&text("", &[])), Ok(Verdict::valid()));
    }

    #[test]
    fn test_failed_rules_are_collected() {
        let element = text("abc", &[("min", Some("5")), ("number", None), ("max", Some("10"))]);
        let verdict = validate_element(&element).unwrap();

        assert!(!verdict.is_valid);
        assert_eq!(
            verdict.failed_rules,
            [RuleName::Min, RuleName::Number].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_misconfigured_rule_is_an_error_not_a_verdict() {
        let element = text("value", &[("required", None), ("min", Some("lots"))]);
        assert_eq!(
            validate_element(&element),
            Err(ConfigError::InvalidParameter {
                rule: "min".to_string(),
                value: "lots".to_string()
            })
        );
    }

    #[test]
    fn test_loose_radio_judged_on_its_own_state() {
        let mut descriptor = text("test", &[("required", Some("true"))]).0;
        descriptor.kind = ElementKind::Radio;

        assert!(!validate_element(&Loose(descriptor.clone())).unwrap().is_valid);

        descriptor.checked = true;
        assert!(validate_element(&Loose(descriptor)).unwrap().is_valid);
    }

    /// Radio buttons sharing one form, addressed by position
    #[derive(Clone)]
    struct Grouped {
        index: usize,
        members: Vec<ElementDescriptor>,
    }

    impl ElementHandle for Grouped {
        fn descriptor(&self) -> ElementDescriptor {
            self.members[self.index].clone()
        }

        fn form_controls(&self) -> Vec<Self> {
            (0..self.members.len())
                .map(|index| Grouped { index, members: self.members.clone() })
                .collect()
        }
    }

    fn grouped_radio(checked: bool) -> ElementDescriptor {
        let mut descriptor = text("", &[("required", None)]).0;
        descriptor.kind = ElementKind::Radio;
        descriptor.name = "plan".to_string();
        descriptor.checked = checked;
        descriptor
    }

    #[test]
    fn test_unchecked_radio_passes_when_sibling_is_checked() {
        let members = vec![grouped_radio(true), grouped_radio(false)];
        let unchecked = Grouped { index: 1, members };
        assert_eq!(validate_element(&unchecked), Ok(Verdict::valid()));

        let members = vec![grouped_radio(false), grouped_radio(false)];
        let verdict = validate_element(&Grouped { index: 1, members }).unwrap();
        assert!(verdict.failed(RuleName::Required));
    }

    #[test]
    fn test_radio_group_lookup() {
        let member = |kind, name: &str, checked| ElementDescriptor {
            kind,
            name: name.to_string(),
            value: String::new(),
            checked,
            disabled: false,
            declared_rules: DeclaredRules::new(),
        };
        let controls = vec![
            member(ElementKind::Radio, "size", false),
            member(ElementKind::Checkbox, "size", true),
            member(ElementKind::Radio, "color", true),
            member(ElementKind::Radio, "size", true),
        ];

        let group: Vec<_> = radio_group(&controls, "size").collect();
        assert_eq!(group.len(), 2);
        assert!(group.iter().all(|m| m.kind == ElementKind::Radio && m.name == "size"));
    }

    #[test]
    fn test_verdict_serializes_for_js() {
        let verdict = Verdict::from_failed([RuleName::Required].into_iter().collect());
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(json, r#"{"isValid":false,"failedRules":["required"]}"#);
    }
}
