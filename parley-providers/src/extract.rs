//! JSON extraction from model text.
//!
//! Models wrap JSON in prose or code fences. The outermost `{...}` or
//! `[...]` span is parsed; blank replies are reported as
//! [`ProviderError::Empty`], anything unparseable as
//! [`ProviderError::Malformed`]. An empty list parses to an empty `Vec`
//! so the router's empty-result policy decides what happens to it.

use parley_core::ProviderError;
use serde_json::{Map, Value};
use tracing::debug;

/// Parses the outermost JSON object in `text`.
///
/// Object replies are default-filled field by field, so `{}` carries
/// nothing and counts as a blank reply.
///
/// # Errors
///
/// [`ProviderError::Empty`] for blank text or `{}`, otherwise
/// [`ProviderError::Malformed`] if no object can be parsed.
pub fn object(text: &str) -> Result<Map<String, Value>, ProviderError> {
    if text.trim().is_empty() {
        return Err(ProviderError::Empty);
    }

    let span = outer_span(text, '{', '}')
        .ok_or_else(|| ProviderError::Malformed("no JSON object in reply".to_string()))?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) if map.is_empty() => Err(ProviderError::Empty),
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ProviderError::Malformed("reply is not a JSON object".to_string())),
        Err(e) => {
            debug!(error = %e, "Failed to parse JSON object");
            Err(ProviderError::Malformed(format!("invalid JSON object: {e}")))
        }
    }
}

/// Parses a JSON list in `text`.
///
/// Accepts a bare array, an object wrapping the list under `questions` or
/// `items`, or a single object (treated as a one-element list).
///
/// # Errors
///
/// [`ProviderError::Empty`] for blank text or a bare `{}`, otherwise
/// [`ProviderError::Malformed`] if no list can be parsed.
pub fn array(text: &str) -> Result<Vec<Value>, ProviderError> {
    if text.trim().is_empty() {
        return Err(ProviderError::Empty);
    }

    let object_first = match (text.find('{'), text.find('[')) {
        (Some(brace), Some(bracket)) => brace < bracket,
        (Some(_), None) => true,
        _ => false,
    };

    if object_first {
        let mut map = object(text)?;
        for key in ["questions", "items"] {
            if let Some(Value::Array(items)) = map.remove(key) {
                return Ok(items);
            }
        }
        return Ok(vec![Value::Object(map)]);
    }

    let span = outer_span(text, '[', ']')
        .ok_or_else(|| ProviderError::Malformed("no JSON array in reply".to_string()))?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(ProviderError::Malformed("reply is not a JSON array".to_string())),
        Err(e) => {
            debug!(error = %e, "Failed to parse JSON array");
            Err(ProviderError::Malformed(format!("invalid JSON array: {e}")))
        }
    }
}

fn outer_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
