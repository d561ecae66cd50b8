//! Uniform JSON response envelope.
//!
//! Every JSON body the API returns, success or failure, has the shape
//! `{"success": bool, "message": string, "data": any | null}`.

use serde::{Deserialize, Serialize};

/// Response envelope wrapping an optional payload.
///
/// # Examples
/// ```
/// use addressbook::inbound::http::envelope::ApiResponse;
///
/// let body = ApiResponse::ok("Contact deleted successfully.", "Deleted");
/// let json = serde_json::to_value(&body).unwrap();
/// assert_eq!(json["success"], true);
/// assert_eq!(json["data"], "Deleted");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Operation result; `null` when there is nothing to return.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful outcome carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failed outcome with optional supporting data.
    pub fn failure(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Successful outcome with `data: null`.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn absent_data_serialises_as_null() {
        let json = serde_json::to_value(ApiResponse::message_only("done")).expect("serialise");

        assert_eq!(json, json!({"success": true, "message": "done", "data": null}));
    }

    #[rstest]
    fn failure_keeps_supporting_data() {
        let body = ApiResponse::failure("Validation failed.", Some(vec!["Name is required."]));
        let json = serde_json::to_value(body).expect("serialise");

        assert_eq!(
            json,
            json!({"success": false, "message": "Validation failed.", "data": ["Name is required."]})
        );
    }
}
