/*
[INPUT]:  Bearer token, task ids, task payloads and search queries
[OUTPUT]: Task records and mutation confirmations
[POS]:    HTTP layer - task endpoints (require bearer auth)
[UPDATE]: When adding new task endpoints or changing query parameters
*/

// ### Task Endpoints

use chrono::NaiveDate;
use reqwest::Method;
use tracing::debug;

use crate::http::{Result, TaskboardClient};
use crate::types::{
    COMPACT_FORMAT, CreatedTask, NewTaskRequest, Task, TaskListResponse, UpdateTaskRequest,
};

impl TaskboardClient {
    /// List tasks, optionally filtered
    ///
    /// GET /api/tasks?search={search}
    ///
    /// An empty `search` requests the unfiltered list.
    pub async fn list_tasks(&self, token: &str, search: &str) -> Result<Vec<Task>> {
        let mut builder = self.request_with_token(Method::GET, "/api/tasks", token)?;
        if !search.is_empty() {
            builder = builder.query(&[("search", search)]);
        }
        let response: TaskListResponse = self.send_json(builder).await?;
        debug!(count = response.tasks.len(), search, "tasks listed");
        Ok(response.tasks)
    }

    /// Fetch a single task
    ///
    /// GET /api/task?id={id}
    pub async fn get_task(&self, token: &str, id: &str) -> Result<Task> {
        let builder = self
            .request_with_token(Method::GET, "/api/task", token)?
            .query(&[("id", id)]);
        self.send_json(builder).await
    }

    /// Create a task
    ///
    /// POST /api/task
    pub async fn create_task(&self, token: &str, req: &NewTaskRequest) -> Result<CreatedTask> {
        let builder = self
            .request_with_token(Method::POST, "/api/task", token)?
            .json(req);
        self.send_json(builder).await
    }

    /// Replace every editable field of a task
    ///
    /// PUT /api/task
    pub async fn update_task(&self, token: &str, req: &UpdateTaskRequest) -> Result<()> {
        let builder = self
            .request_with_token(Method::PUT, "/api/task", token)?
            .json(req);
        self.send_empty(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /api/task?id={id}
    pub async fn delete_task(&self, token: &str, id: &str) -> Result<()> {
        let builder = self
            .request_with_token(Method::DELETE, "/api/task", token)?
            .query(&[("id", id)]);
        self.send_empty(builder).await
    }

    /// Mark a task done. The server deletes one-off tasks and moves
    /// recurring ones to their next date.
    ///
    /// POST /api/task/done?id={id}
    pub async fn mark_done(&self, token: &str, id: &str) -> Result<()> {
        let builder = self
            .request_with_token(Method::POST, "/api/task/done", token)?
            .query(&[("id", id)]);
        self.send_empty(builder).await
    }

    /// Ask the server where a recurrence rule lands after `now`
    ///
    /// GET /api/nextdate?now={now}&date={date}&repeat={repeat}
    pub async fn next_date(&self, now: NaiveDate, date: &str, repeat: &str) -> Result<String> {
        let now = now.format(COMPACT_FORMAT).to_string();
        let builder = self.request(Method::GET, "/api/nextdate")?.query(&[
            ("now", now.as_str()),
            ("date", date),
            ("repeat", repeat),
        ]);
        self.send_text(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, TaskboardClient, TaskboardError};
    use crate::types::{NewTaskRequest, Task};
    use chrono::NaiveDate;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TaskboardClient {
        TaskboardClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_list_tasks_sends_bearer_and_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .and(query_param("search", "milk & eggs"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": [
                    {"id": "1", "title": "Buy milk", "date": "20240115", "comment": "", "repeat": ""}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server)
            .list_tasks("tok", "milk & eggs")
            .await
            .expect("list_tasks failed");

        assert_eq!(
            tasks,
            vec![Task {
                id: "1".to_string(),
                title: "Buy milk".to_string(),
                date: "20240115".to_string(),
                repeat: String::new(),
                comment: String::new(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_tasks_without_search_omits_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tasks": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server).list_tasks("tok", "").await.unwrap();
        assert!(tasks.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_create_task_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/task"))
            .and(body_json(serde_json::json!({
                "title": "Buy milk",
                "date": "20240115",
                "repeat": "",
                "comment": "",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{\"id\":\"5\"}", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_task(
                "tok",
                &NewTaskRequest {
                    title: "Buy milk".to_string(),
                    date: "20240115".to_string(),
                    repeat: String::new(),
                    comment: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, "5");
    }

    #[tokio::test]
    async fn test_update_task_puts_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/task"))
            .and(body_json(serde_json::json!({
                "id": "42",
                "title": "Renamed",
                "date": "",
                "repeat": "",
                "comment": "",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let req = NewTaskRequest {
            title: "Renamed".to_string(),
            date: String::new(),
            repeat: String::new(),
            comment: String::new(),
        }
        .with_id("42");
        client_for(&server).update_task("tok", &req).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_task_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/task"))
            .and(query_param("id", "9"))
            .respond_with(ResponseTemplate::new(404).set_body_raw(
                "{\"error\":\"Task not found\"}\n",
                "application/json",
            ))
            .mount(&server)
            .await;

        let err = client_for(&server).delete_task("tok", "9").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Task not found");
    }

    #[tokio::test]
    async fn test_mark_done_posts_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/task/done"))
            .and(query_param("id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).mark_done("tok", "3").await.unwrap();
    }

    #[tokio::test]
    async fn test_get_task() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/task"))
            .and(query_param("id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "3", "title": "Gym", "date": "20240201", "repeat": "d 7", "comment": ""
            })))
            .mount(&server)
            .await;

        let task = client_for(&server).get_task("tok", "3").await.unwrap();
        assert_eq!(task.repeat, "d 7");
    }

    #[tokio::test]
    async fn test_next_date_plain_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/nextdate"))
            .and(query_param("now", "20240126"))
            .and(query_param("date", "20240113"))
            .and(query_param("repeat", "d 7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("20240127\n"))
            .mount(&server)
            .await;

        let now = NaiveDate::from_ymd_opt(2024, 1, 26).unwrap();
        let next = client_for(&server)
            .next_date(now, "20240113", "d 7")
            .await
            .unwrap();
        assert_eq!(next, "20240127");
    }

    #[tokio::test]
    async fn test_unreadable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_tasks("tok", "").await.unwrap_err();
        assert!(matches!(err, TaskboardError::Serialization(_)));
    }
}
