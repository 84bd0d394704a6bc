/*
[INPUT]:  Username/password credentials
[OUTPUT]: Bearer token on signin, confirmation on signup
[POS]:    HTTP layer - account endpoints (no auth required)
[UPDATE]: When auth endpoints or their payloads change
*/

use reqwest::Method;
use tracing::info;

use crate::http::{Result, TaskboardClient};
use crate::types::{Credentials, SigninResponse};

impl TaskboardClient {
    /// Exchange credentials for a bearer token
    ///
    /// POST /api/signin
    pub async fn signin(&self, credentials: &Credentials) -> Result<SigninResponse> {
        let builder = self.request(Method::POST, "/api/signin")?.json(credentials);
        let response: SigninResponse = self.send_json(builder).await?;
        info!(username = %credentials.username, "signed in");
        Ok(response)
    }

    /// Register a new account. Does not sign in.
    ///
    /// POST /api/signup
    pub async fn signup(&self, credentials: &Credentials) -> Result<()> {
        let builder = self.request(Method::POST, "/api/signup")?.json(credentials);
        self.send_empty(builder).await?;
        info!(username = %credentials.username, "account registered");
        Ok(())
    }
}
