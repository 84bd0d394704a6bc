//! Sign in and print the task list.
//!
//! ```text
//! TASKBOARD_SERVER=http://localhost:7540 cargo run --example list_tasks -- alice secret
//! ```

use taskboard_adapter::{ClientConfig, Credentials, DEFAULT_BASE_URL, TaskboardClient, to_display_date};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let username = args.next().ok_or("usage: list_tasks <username> <password> [search]")?;
    let password = args.next().ok_or("usage: list_tasks <username> <password> [search]")?;
    let search = args.next().unwrap_or_default();

    let base_url = std::env::var("TASKBOARD_SERVER").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = TaskboardClient::with_config_and_base_url(ClientConfig::default(), &base_url)?;

    let signin = client.signin(&Credentials::new(username, password)).await?;
    let tasks = client.list_tasks(&signin.token, &search).await?;

    for task in tasks {
        let date = to_display_date(&task.date).unwrap_or(task.date.clone());
        println!("{:>4}  {:<10}  {}", task.id, date, task.title);
    }

    Ok(())
}
