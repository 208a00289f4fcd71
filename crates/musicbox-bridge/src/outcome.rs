use musicbox_common::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The single answer to a bridge request.
///
/// Serialized as `{"ok": value}` or `{"err": "reason"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "ok")]
    Success(Value),
    #[serde(rename = "err")]
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn into_result(self) -> Result<Value, BridgeError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(reason) => Err(BridgeError::Failed(reason)),
        }
    }
}

impl From<Result<Value, BridgeError>> for Outcome {
    fn from(result: Result<Value, BridgeError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape() {
        let ok = serde_json::to_value(Outcome::Success(json!(true))).unwrap();
        assert_eq!(ok, json!({"ok": true}));

        let err = serde_json::to_value(Outcome::Failure("invalid url: x".into())).unwrap();
        assert_eq!(err, json!({"err": "invalid url: x"}));
    }

    #[test]
    fn failure_becomes_bridge_error() {
        let result = Outcome::Failure("storage backend error: locked".into()).into_result();
        assert_eq!(
            result,
            Err(BridgeError::Failed("storage backend error: locked".into()))
        );
        assert!(Outcome::Success(Value::Null).is_success());
    }

    #[test]
    fn from_result_uses_error_display() {
        let outcome: Outcome = Err(BridgeError::UnknownCommand("eval".into())).into();
        assert_eq!(outcome, Outcome::Failure("unknown command: eval".into()));
    }
}
