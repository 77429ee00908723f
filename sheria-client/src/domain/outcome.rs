use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CallError;

/// The common shape of an action method's payload: a `success` flag, an
/// optional `error`, and whatever else the method returns alongside.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ActionOutcome {
    pub fn into_result(self) -> Result<Self, CallError> {
        if self.success {
            Ok(self)
        } else {
            Err(CallError::ApplicationError(self.error))
        }
    }
}

/// Query methods report failure as `{"error": "..."}` instead of their data.
pub(crate) fn query_error(payload: &Value) -> Option<CallError> {
    match payload {
        Value::Null => Some(CallError::ApplicationError(None)),
        Value::Object(map) => map
            .get("error")
            .and_then(Value::as_str)
            .map(|e| CallError::ApplicationError(Some(e.to_string()))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_keeps_extra_fields() {
        let outcome: ActionOutcome =
            serde_json::from_value(json!({"success": true, "request_id": "SR-0001"})).unwrap();
        let outcome = outcome.into_result().unwrap();
        assert_eq!(outcome.data.get("request_id"), Some(&json!("SR-0001")));
    }

    #[test]
    fn missing_success_flag_is_a_failure() {
        let outcome: ActionOutcome =
            serde_json::from_value(json!({"error": "Failed to submit booking"})).unwrap();
        assert_eq!(
            outcome.into_result().unwrap_err(),
            CallError::ApplicationError(Some("Failed to submit booking".to_string()))
        );
    }

    #[test]
    fn false_success_without_error_has_no_message() {
        let outcome: ActionOutcome = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(
            outcome.into_result().unwrap_err(),
            CallError::ApplicationError(None)
        );
    }

    #[test]
    fn query_error_detects_error_objects_and_null() {
        assert!(query_error(&json!({"balance": 10.0})).is_none());
        assert!(query_error(&json!([])).is_none());
        assert_eq!(
            query_error(&json!({"error": "Failed to get trust balance"})),
            Some(CallError::ApplicationError(Some(
                "Failed to get trust balance".to_string()
            )))
        );
        assert_eq!(query_error(&Value::Null), Some(CallError::ApplicationError(None)));
    }
}
