/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskboard-adapter tests

use taskboard_adapter::{ClientConfig, TaskboardClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> TaskboardClient {
    TaskboardClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Mock bearer token for testing
pub fn mock_jwt_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// A `/api/tasks` body with the given (id, title, date) rows
#[allow(dead_code)]
pub fn task_list_body(rows: &[(&str, &str, &str)]) -> serde_json::Value {
    let tasks: Vec<_> = rows
        .iter()
        .map(|(id, title, date)| {
            serde_json::json!({
                "id": id,
                "title": title,
                "date": date,
                "repeat": "",
                "comment": "",
            })
        })
        .collect();
    serde_json::json!({ "tasks": tasks })
}
