/// CSV documents → entities.
pub mod csv;
/// JSON documents → entities.
pub mod json;
/// EEML documents → entities.
pub mod xml;

use serde_json::Value as JsonValue;

use crate::error::Error;

/// Parse numeric-looking identifier text as an integer, falling back to the
/// raw string.
pub(crate) fn int_or_string(text: &str) -> JsonValue {
    match text.parse::<i64>() {
        Ok(number) => JsonValue::from(number),
        Err(_) => JsonValue::from(text),
    }
}

/// Parse coordinate text as a float, falling back to the raw string.
pub(crate) fn float_or_string(text: &str) -> JsonValue {
    match text.parse::<f64>() {
        Ok(number) => JsonValue::from(number),
        Err(_) => JsonValue::from(text),
    }
}

/// Constructor failures on parsed documents surface as malformed input:
/// an unexpected member means the document doesn't match any known shape.
pub(crate) fn reject_unknown(error: Error) -> Error {
    match error {
        Error::UnknownAttribute(key) => {
            Error::malformed_input(format!("unexpected member {key}"))
        }
        other => other,
    }
}
