//! The response envelope shared by every API call.

use serde::{Deserialize, Serialize};

/// Uniform `{success, data, message}` wrapper.
///
/// `data` is `None` whenever `success` is false. A successful envelope may
/// still carry no data; callers decide whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }

    /// Successful data, if any. Unsuccessful envelopes never yield data.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// Server-supplied message, if it carries any text.
    pub fn message(&self) -> Option<&str> {
        let message = self.message.trim();
        (!message.is_empty()).then_some(message)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_serializes_null_data() {
        let envelope: ApiResponse<Vec<u32>> = ApiResponse::failure("boom");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn unsuccessful_envelope_never_yields_data() {
        let envelope = ApiResponse {
            success: false,
            data: Some(3),
            message: String::new(),
        };
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn blank_messages_are_treated_as_absent() {
        let envelope: ApiResponse<()> = ApiResponse::failure("   ");
        assert_eq!(envelope.message(), None);
        assert_eq!(ApiResponse::ok((), "done").message(), Some("done"));
    }
}
