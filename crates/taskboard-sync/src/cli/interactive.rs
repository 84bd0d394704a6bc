/*
[INPUT]:  Menu selections and typed input from the terminal
[OUTPUT]: Controller calls, rendered list after every step
[POS]:    CLI interactive flow
[UPDATE]: When adding menu actions or changing live search behavior
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use tokio::io::{AsyncBufReadExt, BufReader};

use taskboard_sync::TaskForm;
use taskboard_sync::render::render_tasks;

use super::commands::{Controller, Session, checked_iso_date, flush_notices};

/// Leaves live search mode
const END_SEARCH: &str = ".";

pub async fn run_interactive(session: &mut Session) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Taskboard").bold().cyan());

    let controller = &mut session.controller;

    if controller.is_authenticated() {
        controller.load("").await.ok();
        show(controller);
    }

    loop {
        if !controller.is_authenticated() && !sign_in_menu(controller, &theme).await? {
            return Ok(());
        }

        let actions = [
            "Refresh",
            "Search",
            "Add task",
            "Edit task",
            "Mark done",
            "Delete task",
            "Log out",
            "Exit",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt("Select action")
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                controller.reload().await.ok();
            }
            1 => live_search(controller).await?,
            2 => {
                controller.cancel_edit();
                let form = prompt_form(&theme, TaskForm::default())?;
                controller.submit(form).await.ok();
            }
            3 => edit_task(controller, &theme).await?,
            4 => {
                if let Some(id) = pick_task(controller, &theme, "Task to mark done")? {
                    controller.mark_done(&id).await.ok();
                }
            }
            5 => {
                if let Some(id) = pick_task(controller, &theme, "Task to delete")? {
                    let confirmed = Confirm::with_theme(&theme)
                        .with_prompt("Delete this task?")
                        .default(false)
                        .interact()?;
                    if confirmed {
                        controller.delete(&id).await.ok();
                    }
                }
            }
            6 => {
                controller.logout().await;
                println!("{}", style("Signed out.").dim());
                continue;
            }
            _ => return Ok(()),
        }

        show(controller);
    }
}

/// Returns false when the user chose to leave
async fn sign_in_menu(controller: &mut Controller, theme: &ColorfulTheme) -> Result<bool> {
    loop {
        let actions = ["Sign in", "Register", "Exit"];
        let selection = Select::with_theme(theme)
            .with_prompt("Not signed in")
            .items(&actions)
            .default(0)
            .interact()?;
        if selection == 2 {
            return Ok(false);
        }

        let username: String = Input::with_theme(theme)
            .with_prompt("Username")
            .interact_text()?;
        let password = Password::with_theme(theme)
            .with_prompt("Password")
            .interact()?;

        let result = if selection == 0 {
            controller.sign_in(&username, &password).await
        } else {
            controller.register(&username, &password).await
        };
        if result.is_ok() {
            show(controller);
            return Ok(true);
        }
        flush_notices(controller);
    }
}

/// Every typed line restarts the quiet period; the list reloads once the
/// user stops typing.
async fn live_search(controller: &mut Controller) -> Result<()> {
    println!(
        "{}",
        style(format!(
            "Type to search by text or DD.MM.YYYY date, '{END_SEARCH}' to finish"
        ))
        .dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read search input")? else {
                    break;
                };
                if line.trim() == END_SEARCH {
                    break;
                }
                controller.debounced_search(&line);
            }
            query = controller.search_fired() => {
                controller.load(&query).await.ok();
                show(controller);
            }
        }
    }
    Ok(())
}

async fn edit_task(controller: &mut Controller, theme: &ColorfulTheme) -> Result<()> {
    let Some(id) = pick_task(controller, theme, "Task to edit")? else {
        return Ok(());
    };
    let Ok(form) = controller.begin_edit(&id) else {
        return Ok(());
    };

    let form = prompt_form(theme, form)?;
    let save = Confirm::with_theme(theme)
        .with_prompt("Save changes?")
        .default(true)
        .interact()?;
    if save {
        controller.submit(form).await.ok();
    } else {
        controller.cancel_edit();
    }
    Ok(())
}

fn pick_task(
    controller: &mut Controller,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<String>> {
    let views = controller.view();
    if views.is_empty() {
        println!("{}", style("No tasks found.").yellow());
        return Ok(None);
    }

    let items: Vec<String> = views
        .iter()
        .map(|view| match view.display_date.as_str() {
            "" => view.title.clone(),
            date => format!("{} ({date})", view.title),
        })
        .collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|index| views[index].id.clone()))
}

fn prompt_form(theme: &ColorfulTheme, current: TaskForm) -> Result<TaskForm> {
    let title: String = Input::with_theme(theme)
        .with_prompt("Title")
        .with_initial_text(current.title)
        .interact_text()?;

    let date = loop {
        let date: String = Input::with_theme(theme)
            .with_prompt("Date (YYYY-MM-DD, empty for none)")
            .with_initial_text(current.date.clone())
            .allow_empty(true)
            .interact_text()?;
        match checked_iso_date(date) {
            Ok(date) => break date,
            Err(err) => println!("{} {err}", style("invalid date:").red()),
        }
    };

    let repeat: String = Input::with_theme(theme)
        .with_prompt("Repeat (d N, y, w 1,5, m 1,-1; empty for none)")
        .with_initial_text(current.repeat)
        .allow_empty(true)
        .interact_text()?;
    let comment: String = Input::with_theme(theme)
        .with_prompt("Comment")
        .with_initial_text(current.comment)
        .allow_empty(true)
        .interact_text()?;

    Ok(TaskForm {
        title,
        date,
        repeat,
        comment,
    })
}

fn show(controller: &mut Controller) {
    flush_notices(controller);
    print!("{}", render_tasks(&controller.view()));
}
