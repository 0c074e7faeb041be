//! Formoose
//!
//! Declarative, attribute-driven form validation. Controls declare rules with
//! prefixed attributes (`data-formoose-required`, `data-formoose-min="5"`, ...)
//! and the engine reports a [`Verdict`] per element and a [`FormReport`] per form.
//!
//! The engine observes elements through [`ElementHandle`], so the same logic
//! runs against the browser DOM (see `formoose-wasm`) and the in-memory [`Form`].

pub mod config;
pub mod element;
pub mod error;
pub mod form;
pub mod model;
pub mod rule;
pub mod validator;

pub use config::ValidatorConfig;
pub use element::{declared_rules_from_attributes, DeclaredRules, ElementDescriptor, ElementHandle, ElementKind};
pub use error::ConfigError;
pub use form::{validate_form, ElementReport, FormReport};
pub use model::{Control, ControlId, ControlRef, Form};
pub use rule::{evaluate_rule, is_number, is_valid_email, Rule, RuleName};
pub use validator::{radio_group, resolve_rules, validate_element, Verdict};
