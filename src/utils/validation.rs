use std::{borrow::Cow, collections::HashMap, fmt};

use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::wire_names::{FieldResolver, WireNames};
use crate::interceptors::AppError;

/// Renders one violated constraint for the field at `field` (its wire name).
pub type TranslateFn = fn(field: &str, error: &ValidationError) -> String;

/// Table from constraint code to message renderer.
#[derive(Clone)]
pub struct Translator {
    rules: HashMap<Cow<'static, str>, TranslateFn>,
}

impl Translator {
    /// Translator with no rules; every constraint uses the fallback message.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Translator pre-loaded with the English messages.
    pub fn english() -> Self {
        let mut translator = Self::empty();
        translator.register("required", |f, _| format!("{f} is a required field"));
        translator.register("email", |f, _| format!("{f} must be a valid email address"));
        translator.register("url", |f, _| format!("{f} must be a valid URL"));
        translator.register("ip", |f, _| format!("{f} must be a valid IP address"));
        translator.register("credit_card", |f, _| {
            format!("{f} must be a valid credit card number")
        });
        translator.register("non_control_character", |f, _| {
            format!("{f} cannot contain control characters")
        });
        translator.register("regex", |f, _| {
            format!("{f} does not match the required format")
        });
        translator.register("length", translate_length);
        translator.register("range", translate_range);
        translator.register("contains", |f, e| match param(e, "needle") {
            Some(needle) => format!("{f} must contain the text '{needle}'"),
            None => format!("{f} must contain the required text"),
        });
        translator.register("does_not_contain", |f, e| match param(e, "needle") {
            Some(needle) => format!("{f} cannot contain the text '{needle}'"),
            None => format!("{f} contains forbidden text"),
        });
        translator.register("must_match", |f, e| match param(e, "other") {
            Some(other) => format!("{f} must be equal to {other}"),
            None => format!("{f} must match its confirmation field"),
        });
        translator
    }

    pub fn register(&mut self, code: impl Into<Cow<'static, str>>, rule: TranslateFn) {
        self.rules.insert(code.into(), rule);
    }

    /// A `message` set on the constraint wins over the registered rule.
    pub fn translate(&self, field: &str, error: &ValidationError) -> String {
        if let Some(message) = &error.message {
            return format!("{field}: {message}");
        }
        match self.rules.get(error.code.as_ref()) {
            Some(rule) => rule(field, error),
            None => format!("{field} failed on the '{}' rule", error.code),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<_> = self.rules.keys().collect();
        codes.sort();
        f.debug_struct("Translator").field("codes", &codes).finish()
    }
}

/// Checks `#[derive(Validate)]` constraints and reports violations by wire
/// name, as resolved through [`WireNames`].
///
/// Built once at startup and shared behind an `Arc`; it is never mutated
/// while serving requests.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    translator: Translator,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            translator: Translator::english(),
        }
    }

    pub fn with_translator(translator: Translator) -> Self {
        Self { translator }
    }

    /// Adds or replaces the message for a constraint code.
    pub fn with_translation(mut self, code: impl Into<Cow<'static, str>>, rule: TranslateFn) -> Self {
        self.translator.register(code, rule);
        self
    }

    /// Validate a value, combining every violation into one error
    pub fn validate_struct<T: Validate + WireNames>(&self, value: &T) -> Result<(), AppError> {
        match value.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(self.describe(&errors, Some(T::wire_field))),
        }
    }

    /// Turns a validation error tree into the error returned to callers.
    ///
    /// Field names are looked up through `resolver`; fields it does not know
    /// keep the name `validator` reported.
    pub fn describe(&self, errors: &ValidationErrors, resolver: Option<FieldResolver>) -> AppError {
        let mut messages = Vec::new();
        self.collect(None, errors, resolver, &mut messages);

        if messages.is_empty() {
            tracing::warn!(errors = ?errors, "Invalid validation");
            return AppError::ValidationError("validation failed".to_string());
        }

        messages.sort_by(|a, b| a.0.cmp(&b.0));
        let joined = messages
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ");
        AppError::ValidationError(format!("validation error: {joined}"))
    }

    fn collect(
        &self,
        prefix: Option<&str>,
        errors: &ValidationErrors,
        resolver: Option<FieldResolver>,
        out: &mut Vec<(String, String)>,
    ) {
        for (field, kind) in errors.errors() {
            let field = field.to_string();
            let wire = resolver.and_then(|resolve| resolve(&field));
            let name = wire.map_or(field.as_str(), |wire| wire.name);
            let nested_resolver = wire.and_then(|wire| wire.nested);

            let path = match prefix {
                Some(prefix) => format!("{prefix}.{name}"),
                None => name.to_string(),
            };
            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    for error in field_errors {
                        out.push((path.clone(), self.translator.translate(&path, error)));
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    self.collect(Some(&path), nested, nested_resolver, out)
                }
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        let item_path = format!("{path}[{index}]");
                        self.collect(Some(&item_path), nested, nested_resolver, out);
                    }
                }
            }
        }
    }
}

fn param(error: &ValidationError, key: &str) -> Option<String> {
    error.params.get(key).map(|value| match value {
        Value::String(s) => s.clone(),
        // Whole floats print without the trailing ".0".
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    })
}

fn is_collection(error: &ValidationError) -> bool {
    matches!(error.params.get("value"), Some(Value::Array(_)) | Some(Value::Object(_)))
}

fn translate_length(field: &str, error: &ValidationError) -> String {
    let unit = if is_collection(error) { "items" } else { "characters" };
    match (param(error, "equal"), param(error, "min"), param(error, "max")) {
        (Some(equal), _, _) => format!("{field} must be {equal} {unit} in length"),
        (None, Some(min), Some(max)) => {
            format!("{field} must be between {min} and {max} {unit} in length")
        }
        (None, Some(min), None) => format!("{field} must be at least {min} {unit} in length"),
        (None, None, Some(max)) => format!("{field} must be a maximum of {max} {unit} in length"),
        (None, None, None) => format!("{field} has an invalid length"),
    }
}

fn translate_range(field: &str, error: &ValidationError) -> String {
    match (param(error, "min"), param(error, "max")) {
        (Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
        (Some(min), None) => format!("{field} must be {min} or greater"),
        (None, Some(max)) => format!("{field} must be {max} or less"),
        (None, None) => match (param(error, "exclusive_min"), param(error, "exclusive_max")) {
            (Some(min), _) => format!("{field} must be greater than {min}"),
            (None, Some(max)) => format!("{field} must be less than {max}"),
            (None, None) => format!("{field} is out of range"),
        },
    }
}
