use serde_json::Value;

/// What the correction service had to say about a document.
///
/// The service answers in one of two shapes: a whole corrected text
/// (`{"status": true, "response": {"corrected": "..."}}`) or a list of
/// per-word error records, either under `response.errors` or as a bare
/// top-level array. Anything else is `NoCorrection`.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrectionResult {
    WholeTextCorrection(String),
    /// Raw records; malformed entries are filtered when building an `ErrorSet`.
    ErrorList(Vec<Value>),
    NoCorrection,
}

impl CorrectionResult {
    pub fn from_response(mut data: Value) -> Self {
        if let Value::Array(records) = data {
            return Self::ErrorList(records);
        }

        if data.get("status").and_then(Value::as_bool) != Some(true) {
            return Self::NoCorrection;
        }

        let Some(response) = data.get_mut("response") else {
            return Self::NoCorrection;
        };

        // An empty corrected string carries nothing to apply.
        if let Some(Value::String(corrected)) = response.get_mut("corrected").map(Value::take) {
            if !corrected.is_empty() {
                return Self::WholeTextCorrection(corrected);
            }
        }

        match response.get_mut("errors").map(Value::take) {
            Some(Value::Array(records)) => Self::ErrorList(records),
            _ => Self::NoCorrection,
        }
    }
}
