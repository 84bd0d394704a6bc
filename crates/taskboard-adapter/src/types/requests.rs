/*
[INPUT]:  Task API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Body of `POST /api/signin` and `POST /api/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /api/task`. Never carries an `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskRequest {
    pub title: String,
    pub date: String,
    pub repeat: String,
    pub comment: String,
}

/// Body of `PUT /api/task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: String,
    pub title: String,
    pub date: String,
    pub repeat: String,
    pub comment: String,
}

impl NewTaskRequest {
    /// Attach an id, turning a create into an update
    pub fn with_id(self, id: impl Into<String>) -> UpdateTaskRequest {
        UpdateTaskRequest {
            id: id.into(),
            title: self.title,
            date: self.date,
            repeat: self.repeat,
            comment: self.comment,
        }
    }
}
