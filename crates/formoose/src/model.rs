// File: src/model.rs
// Purpose: In-memory form model for hosts without a browser DOM

use crate::config::ValidatorConfig;
use crate::element::{declared_rules_from_attributes, ElementDescriptor, ElementHandle, ElementKind};
use crate::error::ConfigError;
use crate::form::{validate_form, FormReport};
use crate::validator::{validate_element, Verdict};

/// Index of a control within its form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(usize);

impl ControlId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A form control and its raw attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    input_type: String,
    name: String,
    value: String,
    checked: bool,
    disabled: bool,
    attributes: Vec<(String, String)>,
}

impl Control {
    /// An `<input>` of the given type
    pub fn input(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Self::default()
        }
    }

    /// A `<textarea>`, always text-like
    pub fn textarea() -> Self {
        Self::input("textarea")
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set an attribute, replacing an earlier one with the same name
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::from_input_type(&self.input_type)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn snapshot(&self, config: &ValidatorConfig) -> ElementDescriptor {
        let attributes = self
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));

        ElementDescriptor {
            kind: self.kind(),
            name: self.name.clone(),
            value: self.value.clone(),
            checked: self.checked,
            disabled: self.disabled,
            declared_rules: declared_rules_from_attributes(attributes, config),
        }
    }
}

/// A form: an arena of controls in document order
#[derive(Debug, Clone, Default)]
pub struct Form {
    config: ValidatorConfig,
    controls: Vec<Control>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            controls: Vec::new(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Append a control and return its id
    pub fn add(&mut self, control: Control) -> ControlId {
        self.controls.push(control);
        ControlId(self.controls.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, id: ControlId) -> Option<ControlRef<'_>> {
        (id.0 < self.controls.len()).then_some(ControlRef { form: self, id })
    }

    pub fn controls(&self) -> impl Iterator<Item = ControlRef<'_>> {
        (0..self.controls.len()).map(move |index| ControlRef {
            form: self,
            id: ControlId(index),
        })
    }

    /// First control with the given name
    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.controls
            .iter()
            .position(|control| control.name == name)
            .map(ControlId)
    }

    pub fn set_value(&mut self, id: ControlId, value: impl Into<String>) -> bool {
        match self.controls.get_mut(id.0) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Set the checked flag of one control, leaving its group untouched
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> bool {
        match self.controls.get_mut(id.0) {
            Some(control) => {
                control.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Check a control the way a user click does: checking a named radio
    /// unchecks the other radios of its group.
    pub fn check(&mut self, id: ControlId) -> bool {
        let Some(target) = self.controls.get(id.0) else {
            return false;
        };

        if target.kind() == ElementKind::Radio && !target.name.is_empty() {
            let name = target.name.clone();
            for control in self
                .controls
                .iter_mut()
                .filter(|c| c.kind() == ElementKind::Radio && c.name == name)
            {
                control.checked = false;
            }
        }

        self.set_checked(id, true)
    }

    /// Validate a single control
    pub fn validate_control(&self, id: ControlId) -> Option<Result<Verdict, ConfigError>> {
        self.control(id).map(|control| validate_element(&control))
    }

    /// Validate every rule-bearing control
    pub fn validate(&self) -> FormReport {
        validate_form(self.controls(), &self.config)
    }
}

/// Handle to a control inside a [`Form`]
#[derive(Debug, Clone, Copy)]
pub struct ControlRef<'a> {
    form: &'a Form,
    id: ControlId,
}

impl<'a> ControlRef<'a> {
    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn control(&self) -> &'a Control {
        // Ids handed out by a form always index into it; controls are never removed.
        &self.form.controls[self.id.0]
    }
}

impl ElementHandle for ControlRef<'_> {
    fn descriptor(&self) -> ElementDescriptor {
        self.control().snapshot(&self.form.config)
    }

    fn form_controls(&self) -> Vec<Self> {
        self.form.controls().collect()
    }
}
