/*
[INPUT]:  TaskView rows and notices from the controller
[OUTPUT]: Styled terminal text
[POS]:    Presentation layer - terminal renderer
[UPDATE]: When the list layout or notice styling changes
*/

use console::style;

use crate::notice::{Notice, NoticeKind};
use crate::view::TaskView;

pub const NO_TASKS: &str = "No tasks found";

/// Render the task list, one block per task
pub fn render_tasks(tasks: &[TaskView]) -> String {
    if tasks.is_empty() {
        return format!("{}\n", style(NO_TASKS).dim());
    }

    let mut out = String::new();
    for task in tasks {
        let marker = if task.recurring { "↻" } else { " " };
        out.push_str(&format!(
            "{:>5} {} {}\n",
            style(&task.id).dim(),
            marker,
            style(&task.title).bold()
        ));
        if !task.display_date.is_empty() {
            out.push_str(&format!("        Date: {}\n", task.display_date));
        }
        if let Some(comment) = &task.comment {
            out.push_str(&format!("        Comment: {comment}\n"));
        }
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Error => format!("{} {}", style("error:").red().bold(), notice.message),
        NoticeKind::Success => format!("{} {}", style("ok:").green().bold(), notice.message),
    }
}
