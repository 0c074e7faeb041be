//! Formoose WASM
//!
//! WebAssembly bindings that run the formoose engine against the live DOM.
//! Every call reads the current attributes, value and checked state of the
//! elements involved; nothing is cached between calls.

use std::rc::Rc;

use formoose::{
    declared_rules_from_attributes, validate_element, validate_form, ElementDescriptor,
    ElementHandle, ElementKind, ValidatorConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, NodeList};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Form controls the engine knows how to read
#[derive(Clone)]
enum Field {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl Field {
    fn from_element(element: Element) -> Option<Self> {
        element
            .dyn_into::<HtmlInputElement>()
            .map(Field::Input)
            .or_else(|element| element.dyn_into::<HtmlTextAreaElement>().map(Field::TextArea))
            .ok()
    }

    fn element(&self) -> &Element {
        match self {
            Field::Input(input) => input.as_ref(),
            Field::TextArea(textarea) => textarea.as_ref(),
        }
    }

    fn form(&self) -> Option<HtmlFormElement> {
        match self {
            Field::Input(input) => input.form(),
            Field::TextArea(textarea) => textarea.form(),
        }
    }
}

/// A DOM control seen through the engine's element interface
struct DomControl {
    field: Field,
    config: Rc<ValidatorConfig>,
}

impl DomControl {
    fn attributes(&self) -> Vec<(String, String)> {
        let attributes = self.field.element().attributes();
        (0..attributes.length())
            .filter_map(|i| attributes.item(i))
            .map(|attr| (attr.name(), attr.value()))
            .collect()
    }
}

impl ElementHandle for DomControl {
    fn descriptor(&self) -> ElementDescriptor {
        let attributes = self.attributes();
        let declared_rules = declared_rules_from_attributes(
            attributes.iter().map(|(name, value)| (name.as_str(), value.as_str())),
            &self.config,
        );

        match &self.field {
            Field::Input(input) => ElementDescriptor {
                kind: ElementKind::from_input_type(&input.type_()),
                name: input.name(),
                value: input.value(),
                checked: input.checked(),
                disabled: input.disabled(),
                declared_rules,
            },
            Field::TextArea(textarea) => ElementDescriptor {
                kind: ElementKind::TextLike,
                name: textarea.name(),
                value: textarea.value(),
                checked: false,
                disabled: textarea.disabled(),
                declared_rules,
            },
        }
    }

    fn form_controls(&self) -> Vec<Self> {
        self.field
            .form()
            .map(|form| controls_of(&form, &self.config))
            .unwrap_or_default()
    }
}

/// Readable controls of a form, in document order
fn controls_of(form: &HtmlFormElement, config: &Rc<ValidatorConfig>) -> Vec<DomControl> {
    let elements = form.elements();
    (0..elements.length())
        .filter_map(|i| elements.item(i))
        .filter_map(Field::from_element)
        .map(|field| DomControl {
            field,
            config: Rc::clone(config),
        })
        .collect()
}

/// Validator bound to one configuration
#[wasm_bindgen]
pub struct Formoose {
    config: Rc<ValidatorConfig>,
}

#[wasm_bindgen]
impl Formoose {
    /// Create a validator. `config` may be omitted to use the defaults.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// const formoose = new Formoose({ attributePrefix: 'data-formoose-' });
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Formoose, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            ValidatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        Ok(Formoose {
            config: Rc::new(config),
        })
    }

    /// All forms in the document marked for validation
    pub fn forms(&self) -> Result<NodeList, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        document.query_selector_all(&format!("form[{}]", self.config.form_attribute()))
    }

    /// Validate every rule-bearing control of a form.
    ///
    /// Misconfigured controls are reported on the console and make the form invalid.
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, form: &HtmlFormElement) -> bool {
        let report = validate_form(controls_of(form, &self.config), &self.config);

        for (element, err) in report.config_errors() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "formoose: control `{}` is misconfigured: {}",
                element.name, err
            )));
        }

        report.is_valid()
    }

    /// Validate one `<input>` or `<textarea>`.
    ///
    /// # Returns
    /// `{ isValid, failedRules }`. Throws a string when the element's rules
    /// are misconfigured.
    #[wasm_bindgen(js_name = validateInput)]
    pub fn validate_input(&self, input: Element) -> Result<JsValue, JsValue> {
        let field = Field::from_element(input)
            .ok_or_else(|| JsValue::from_str("validateInput expects an <input> or <textarea>"))?;
        let control = DomControl {
            field,
            config: Rc::clone(&self.config),
        };

        let verdict = validate_element(&control).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&verdict)?)
    }
}

/// Evaluate a single rule without an element
#[wasm_bindgen(js_name = evaluateRule)]
pub fn evaluate_rule_js(
    rule: &str,
    parameter: Option<String>,
    value: &str,
    checked: bool,
    input_type: &str,
) -> Result<bool, JsValue> {
    formoose::evaluate_rule(
        rule,
        parameter.as_deref(),
        value,
        checked,
        ElementKind::from_input_type(input_type),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    formoose::is_valid_email(email)
}

/// Quick numeric-literal check
#[wasm_bindgen(js_name = isNumber)]
pub fn is_number_js(value: &str) -> bool {
    formoose::is_number(value)
}
