/*
[INPUT]:  CLI subcommand, configured controller and client
[OUTPUT]: Rendered task list and notices, process outcome
[POS]:    CLI layer - one-shot commands
[UPDATE]: When adding subcommands or changing their output
*/

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use dialoguer::{Password, theme::ColorfulTheme};
use taskboard_adapter::{
    TaskboardClient, parse_compact_date, to_compact_date, to_display_date,
};
use tracing::debug;

use taskboard_sync::render::{render_notice, render_tasks};
use taskboard_sync::state::TokenStore;
use taskboard_sync::{SyncError, TaskForm, TaskSyncController};

use super::interactive::run_interactive;

pub type Controller = TaskSyncController<TaskboardClient, Box<dyn TokenStore>>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show tasks, optionally filtered by text or a DD.MM.YYYY date
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show a single task as stored on the server
    Show { id: String },
    /// Create a task
    Add {
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Recurrence rule, e.g. "d 7", "y", "w 1,5"
        #[arg(long)]
        repeat: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Change fields of an existing task
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// YYYY-MM-DD, or an empty string to remove the date
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        repeat: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Mark a task done (recurring tasks move to their next date)
    Done { id: String },
    /// Delete a task
    Delete { id: String },
    /// Preview where a recurrence rule lands
    NextDate {
        /// YYYY-MM-DD start date
        date: String,
        repeat: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        now: Option<String>,
    },
    /// Menu-driven session with live search
    Interactive,
}

/// Everything a command needs
pub struct Session {
    pub controller: Controller,
    pub client: TaskboardClient,
}

/// Run a one-shot command. Returns whether it succeeded.
pub async fn run_command(session: &mut Session, command: Command) -> Result<bool> {
    if let Command::Interactive = command {
        run_interactive(session).await?;
        return Ok(true);
    }
    let controller = &mut session.controller;

    let outcome = match command {
        Command::Login { username, password } => {
            let password = password_or_prompt(password)?;
            let result = controller.sign_in(&username, &password).await;
            if result.is_ok() {
                print!("{}", render_tasks(&controller.view()));
            }
            result
        }
        Command::Register { username, password } => {
            let password = password_or_prompt(password)?;
            controller.register(&username, &password).await
        }
        Command::Logout => {
            controller.logout().await;
            Ok(())
        }
        Command::List { search } => {
            let result = controller.load(search.as_deref().unwrap_or("").trim()).await;
            if result.is_ok() {
                print!("{}", render_tasks(&controller.view()));
            }
            result
        }
        Command::Show { id } => {
            let Some(token) = controller.auth_token() else {
                controller.load("").await.ok();
                return Ok(flush_notices(controller));
            };
            let task = session
                .client
                .get_task(token, &id)
                .await
                .with_context(|| format!("fetch task {id}"))?;
            println!("id:      {}", task.id);
            println!("title:   {}", task.title);
            println!(
                "date:    {}",
                to_display_date(&task.date).unwrap_or(task.date.clone())
            );
            println!("repeat:  {}", task.repeat);
            println!("comment: {}", task.comment);
            Ok(())
        }
        Command::Add {
            title,
            date,
            repeat,
            comment,
        } => {
            let form = TaskForm {
                title,
                date: checked_iso_date(date.unwrap_or_default())?,
                repeat: repeat.unwrap_or_default(),
                comment: comment.unwrap_or_default(),
            };
            controller.cancel_edit();
            controller.submit(form).await
        }
        Command::Edit {
            id,
            title,
            date,
            repeat,
            comment,
        } => {
            let date = date.map(checked_iso_date).transpose()?;
            edit(controller, &id, title, date, repeat, comment).await
        }
        Command::Done { id } => controller.mark_done(&id).await,
        Command::Delete { id } => controller.delete(&id).await,
        Command::NextDate { date, repeat, now } => {
            let now = match now {
                Some(now) => parse_iso(&now)?,
                None => Local::now().date_naive(),
            };
            let start = to_compact_date(&date).context("start date must be YYYY-MM-DD")?;
            let next = session
                .client
                .next_date(now, &start, &repeat)
                .await
                .context("query next date")?;
            println!("{}", to_display_date(&next).unwrap_or(next.clone()));
            Ok(())
        }
        Command::Interactive => Ok(()),
    };

    if let Err(err) = &outcome {
        debug!(error = %err, "command failed");
    }
    let printed_ok = flush_notices(controller);
    Ok(outcome.is_ok() && printed_ok)
}

/// Load the current list so the edit session can find the task, then
/// overlay the given fields on the stored values.
async fn edit(
    controller: &mut Controller,
    id: &str,
    title: Option<String>,
    date: Option<String>,
    repeat: Option<String>,
    comment: Option<String>,
) -> Result<(), SyncError> {
    controller.load("").await?;
    let mut form = controller.begin_edit(id)?;

    if let Some(title) = title {
        form.title = title;
    }
    if let Some(date) = date {
        form.date = date;
    }
    if let Some(repeat) = repeat {
        form.repeat = repeat;
    }
    if let Some(comment) = comment {
        form.comment = comment;
    }

    controller.submit(form).await
}

/// Print and drop every pending notice. Returns false if any was an error.
pub fn flush_notices(controller: &mut Controller) -> bool {
    let mut ok = true;
    for notice in controller.notices_mut().drain() {
        ok &= !notice.is_error();
        eprintln!("{}", render_notice(&notice));
    }
    ok
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()
            .context("read password"),
    }
}

fn parse_iso(value: &str) -> Result<NaiveDate> {
    let compact = to_compact_date(value).with_context(|| format!("{value} is not YYYY-MM-DD"))?;
    Ok(parse_compact_date(&compact)?)
}

/// Reject dates that do not exist before they reach the server
pub fn checked_iso_date(value: String) -> Result<String> {
    let value = value.trim().to_string();
    if !value.is_empty() {
        parse_iso(&value)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_iso_date() {
        assert_eq!(checked_iso_date(" 2024-02-29 ".to_string()).unwrap(), "2024-02-29");
        assert_eq!(checked_iso_date(String::new()).unwrap(), "");
        assert!(checked_iso_date("2023-02-29".to_string()).is_err());
        assert!(checked_iso_date("29.02.2024".to_string()).is_err());
    }
}
