use serde_json::Value;

/// Reduces a completed job's `output` to the summary text.
///
/// Endpoints differ in how they shape results: a bare string, an object with
/// a `text` field, or a list of generations. Anything unrecognised is
/// returned as its JSON serialization so no output is lost.
#[must_use]
pub fn normalize_output(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("text") {
            Some(Value::String(text)) => text.clone(),
            _ => output.to_string(),
        },
        Value::Array(items) => items
            .first()
            .and_then(|first| first.get("text"))
            .and_then(Value::as_str)
            .map_or_else(|| output.to_string(), ToString::to_string),
        _ => output.to_string(),
    }
}
