/*
[INPUT]:  Task API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Server-authoritative task record.
///
/// `date` is compact `YYYYMMDD` or empty. The server omits nothing today,
/// but `repeat` and `comment` are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub repeat: String,
    #[serde(default)]
    pub comment: String,
}

impl Task {
    pub fn has_due_date(&self) -> bool {
        !self.date.is_empty()
    }

    pub fn is_recurring(&self) -> bool {
        !self.repeat.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_optional_fields_default_to_empty() {
        let task: Task = serde_json::from_str(r#"{"id":"7","title":"Call mom"}"#).unwrap();
        assert_eq!(task.date, "");
        assert_eq!(task.repeat, "");
        assert_eq!(task.comment, "");
        assert!(!task.has_due_date());
        assert!(!task.is_recurring());
    }

    #[test]
    fn test_task_full_record() {
        let task: Task = serde_json::from_str(
            r#"{"id":"1","title":"Gym","date":"20240115","repeat":"d 7","comment":"legs"}"#,
        )
        .unwrap();
        assert!(task.has_due_date());
        assert!(task.is_recurring());
        assert_eq!(task.comment, "legs");
    }
}
