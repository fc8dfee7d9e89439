// Typed errors with thiserror. Surface meaningful messages to JS.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Engine error types. The timing core itself never fails — invalid
/// numbers are clamped at the boundary — so errors only arise at the
/// JSON interop surface.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::InvalidConfig("missing field".to_string());
        assert!(err.to_string().contains("missing field"));
    }
}
