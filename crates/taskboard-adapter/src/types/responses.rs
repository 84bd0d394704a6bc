/*
[INPUT]:  Task API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Unix timestamp, sent by the server as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskListResponse {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    pub id: String,
}

/// Failure body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_list_missing_key_is_empty() {
        let resp: TaskListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.tasks.is_empty());
    }

    #[test]
    fn test_signin_response_extra_fields() {
        let resp: SigninResponse = serde_json::from_str(
            r#"{"token":"abc","token_type":"Bearer","expires_in":"1700000000"}"#,
        )
        .unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.token_type.as_deref(), Some("Bearer"));
    }
}
