//! Form validation
//!
//! Runs the element validator over every rule-bearing control of a form in
//! document order. A misconfigured control is logged and recorded, and the
//! remaining controls are still validated.

use tracing::{debug, warn};

use crate::config::ValidatorConfig;
use crate::element::ElementHandle;
use crate::error::ConfigError;
use crate::validator::{validate_element, Verdict};

/// Result for one visited control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReport {
    /// Position of the control among the form's controls
    pub index: usize,
    pub name: String,
    pub outcome: Result<Verdict, ConfigError>,
}

impl ElementReport {
    pub fn is_valid(&self) -> bool {
        matches!(&self.outcome, Ok(verdict) if verdict.is_valid)
    }
}

/// Aggregated result of validating a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub elements: Vec<ElementReport>,
}

impl FormReport {
    /// True iff every visited control produced a passing verdict.
    /// Configuration errors fail the form.
    pub fn is_valid(&self) -> bool {
        self.elements.iter().all(ElementReport::is_valid)
    }

    /// Controls whose input failed at least one rule
    pub fn invalid(&self) -> impl Iterator<Item = &ElementReport> {
        self.elements
            .iter()
            .filter(|report| matches!(&report.outcome, Ok(verdict) if !verdict.is_valid))
    }

    /// Controls whose declared rules could not be evaluated
    pub fn config_errors(&self) -> impl Iterator<Item = (&ElementReport, &ConfigError)> {
        self.elements
            .iter()
            .filter_map(|report| report.outcome.as_ref().err().map(|err| (report, err)))
    }

    /// Report for the first visited control with the given name
    pub fn get(&self, name: &str) -> Option<&ElementReport> {
        self.elements.iter().find(|report| report.name == name)
    }
}

/// Validate every rule-bearing control, in the order given.
pub fn validate_form<E, I>(controls: I, config: &ValidatorConfig) -> FormReport
where
    E: ElementHandle,
    I: IntoIterator<Item = E>,
{
    let mut report = FormReport::default();

    for (index, control) in controls.into_iter().enumerate() {
        let descriptor = control.descriptor();
        if !descriptor.has_rules() {
            continue;
        }
        if config.skip_disabled && descriptor.disabled {
            debug!(name = %descriptor.name, "skipping disabled control");
            continue;
        }

        let outcome = validate_element(&control);
        if let Err(err) = &outcome {
            warn!(name = %descriptor.name, rule = err.rule(), error = %err, "misconfigured control");
        }

        report.elements.push(ElementReport {
            index,
            name: descriptor.name,
            outcome,
        });
    }

    debug!(
        visited = report.elements.len(),
        is_valid = report.is_valid(),
        "form validated"
    );
    report
}
