use crate::error::{BomViewError, BomViewResult};
use regex::Regex;
use std::sync::OnceLock;
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> BomViewResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(BomViewError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => format!("{}: {}", field, message),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

fn record_id_regex() -> &'static Regex {
    static RECORD_ID: OnceLock<Regex> = OnceLock::new();
    RECORD_ID.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9]{15}(?:[a-zA-Z0-9]{3})?$").expect("record id pattern is valid")
    })
}

/// Record identifiers are 15 (case-sensitive) or 18 (case-safe) alphanumerics
pub fn validate_record_id(record_id: &str) -> BomViewResult<()> {
    if !record_id_regex().is_match(record_id) {
        return Err(BomViewError::validation(
            "record_id",
            format!("Invalid record id '{}'. Expected 15 or 18 alphanumeric characters", record_id),
        ));
    }

    Ok(())
}
