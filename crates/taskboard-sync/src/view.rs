/*
[INPUT]:  Server-authoritative Task records
[OUTPUT]: Read-only view-models for rendering, editable form values
[POS]:    Presentation boundary - plain data handed to renderers
[UPDATE]: When the rendered or edited task fields change
*/

use taskboard_adapter::{Task, to_display_date};

/// One rendered row of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    /// `DD.MM.YYYY`, empty when the task has no date
    pub display_date: String,
    pub comment: Option<String>,
    pub recurring: bool,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        // Show whatever the server sent if it is not a compact date.
        let display_date = to_display_date(&task.date).unwrap_or_else(|_| task.date.clone());
        let comment = Some(task.comment.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            display_date,
            comment,
            recurring: task.is_recurring(),
        }
    }
}

/// Editable fields of a task. `date` is ISO `YYYY-MM-DD` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub date: String,
    pub repeat: String,
    pub comment: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, iso: impl Into<String>) -> Self {
        self.date = iso.into();
        self
    }

    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(date: &str, comment: &str) -> Task {
        Task {
            id: "1".to_string(),
            title: "Buy milk".to_string(),
            date: date.to_string(),
            repeat: String::new(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_view_formats_date() {
        let view = TaskView::from(&task("20240115", ""));
        assert_eq!(view.display_date, "15.01.2024");
        assert_eq!(view.comment, None);
        assert!(!view.recurring);
    }

    #[test]
    fn test_view_keeps_malformed_date_verbatim() {
        let view = TaskView::from(&task("tomorrow", "  ask Bob "));
        assert_eq!(view.display_date, "tomorrow");
        assert_eq!(view.comment.as_deref(), Some("ask Bob"));
    }

    #[test]
    fn test_form_builder() {
        let form = TaskForm::new("Gym").with_date("2024-02-01").with_repeat("d 7");
        assert_eq!(form.title, "Gym");
        assert_eq!(form.date, "2024-02-01");
        assert_eq!(form.repeat, "d 7");
        assert_eq!(form.comment, "");
    }
}
