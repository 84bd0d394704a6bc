/*
[INPUT]:  User intents (sign in, search, edit, submit, delete, done, logout), TaskApi, TokenStore
[OUTPUT]: Authoritative local task list, edit session, notices for the presentation layer
[POS]:    Core - task list synchronization and form-state controller
[UPDATE]: When changing load/mutation sequencing or edit session rules
*/

//! The controller owns the only local copy of the task list.
//!
//! Every successful mutation is followed by a full reload with the active
//! search query; the list is replaced wholesale, never patched. Failures are
//! posted to the [`NoticeBoard`] and returned as [`SyncError`], and none of
//! them leave the controller unusable.
//!
//! Methods take `&mut self`, so one load or mutation completes before the
//! next starts. Two loads can therefore never race on the same controller.

use std::time::Duration;

use taskboard_adapter::{
    Credentials, NewTaskRequest, Task, TaskboardError, to_compact_date, to_iso_date,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::TaskApi;
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::notice::{NOTICE_DISMISS, NoticeBoard};
use crate::state::TokenStore;
use crate::view::{TaskForm, TaskView};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("failed to load tasks: {0}")]
    LoadFailed(String),

    #[error("failed to save task: {0}")]
    SaveFailed(String),

    #[error("failed to delete task: {0}")]
    DeleteFailed(String),

    #[error("failed to mark task done: {0}")]
    MarkDoneFailed(String),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("{0}")]
    AuthFailed(String),
}

fn server_message(err: &TaskboardError) -> String {
    err.user_message()
}

pub struct TaskSyncController<A, S> {
    api: A,
    store: S,
    auth_token: Option<String>,
    tasks: Vec<Task>,
    current_edit_id: Option<String>,
    search_query: String,
    search: Debouncer<String>,
    notices: NoticeBoard,
}

impl<A: TaskApi, S: TokenStore> TaskSyncController<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            auth_token: None,
            tasks: Vec::new(),
            current_edit_id: None,
            search_query: String::new(),
            search: Debouncer::new(SEARCH_DEBOUNCE),
            notices: NoticeBoard::new(NOTICE_DISMISS),
        }
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search = Debouncer::new(delay);
        self
    }

    pub fn with_notice_dismiss(mut self, delay: Duration) -> Self {
        self.notices = NoticeBoard::new(delay);
        self
    }

    // ### Session

    /// Read the persisted token once at startup.
    ///
    /// Returns whether the user starts out authenticated. An unreadable
    /// store is treated as signed out.
    pub async fn restore_session(&mut self) -> bool {
        match self.store.load().await {
            Ok(Some(token)) => {
                debug!("session token restored");
                self.auth_token = Some(token);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "failed to read session token");
                false
            }
        }
    }

    /// Sign in, persist the token, then load the unfiltered list.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<(), SyncError> {
        let credentials = self.credentials(username, password)?;

        let response = match self.api.signin(&credentials).await {
            Ok(response) => response,
            Err(err) => return self.fail(SyncError::AuthFailed(server_message(&err))),
        };

        self.auth_token = Some(response.token.clone());
        if let Err(err) = self.store.save(&response.token).await {
            warn!(error = %err, "failed to persist session token");
        }
        info!(username = %credentials.username, "signed in");

        self.search_query.clear();
        // A failed first load is already on the notice board; signing in
        // itself succeeded.
        let _ = self.load("").await;
        Ok(())
    }

    /// Register a new account, then sign in with the same credentials.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), SyncError> {
        let credentials = self.credentials(username, password)?;

        if let Err(err) = self.api.signup(&credentials).await {
            return self.fail(SyncError::AuthFailed(server_message(&err)));
        }
        info!(username = %credentials.username, "registered");

        self.sign_in(&credentials.username, &credentials.password)
            .await
    }

    /// Drop the token and everything derived from it. No network call.
    pub async fn logout(&mut self) {
        self.auth_token = None;
        self.tasks.clear();
        self.current_edit_id = None;
        self.search_query.clear();
        self.search.cancel();

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to remove persisted session token");
        }
        info!("logged out");
    }

    fn credentials(&mut self, username: &str, password: &str) -> Result<Credentials, SyncError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return self.fail(SyncError::AuthFailed("fill in all fields".to_string()));
        }
        Ok(Credentials::new(username, password))
    }

    // ### Loading

    /// Replace the task list with the server's view for `query`.
    ///
    /// On failure the previous list is kept untouched.
    pub async fn load(&mut self, query: &str) -> Result<(), SyncError> {
        let token = self.token()?;

        match self.api.list_tasks(&token, query).await {
            Ok(tasks) => {
                info!(count = tasks.len(), query, "tasks loaded");
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                if err.is_auth_error() {
                    warn!("session token rejected by server");
                }
                self.fail(SyncError::LoadFailed(server_message(&err)))
            }
        }
    }

    /// Record the search input and (re)start the quiet period.
    ///
    /// The load itself happens in [`next_search`](Self::next_search) once no
    /// further input arrived for the debounce delay.
    pub fn debounced_search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
        self.search.schedule(self.search_query.clone());
    }

    /// Wait until a debounced query fires. Cancel-safe.
    pub async fn search_fired(&mut self) -> String {
        self.search.fired().await
    }

    /// Wait for the debounced query and load it.
    pub async fn next_search(&mut self) -> Result<(), SyncError> {
        let query = self.search_fired().await;
        self.load(&query).await
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Reload with the active search query
    pub async fn reload(&mut self) -> Result<(), SyncError> {
        let query = self.search_query.clone();
        self.load(&query).await
    }

    // ### Editing

    /// Start editing `task_id` and return its fields for the form.
    pub fn begin_edit(&mut self, task_id: &str) -> Result<TaskForm, SyncError> {
        let Some(task) = self.task(task_id).cloned() else {
            return self.fail(SyncError::TaskNotFound(task_id.to_string()));
        };

        let date = to_iso_date(&task.date).unwrap_or_else(|err| {
            warn!(task_id, error = %err, "task has malformed date");
            task.date.clone()
        });
        let form = TaskForm {
            title: task.title,
            date,
            repeat: task.repeat,
            comment: task.comment,
        };

        self.current_edit_id = Some(task_id.to_string());
        debug!(task_id, "edit session started");
        Ok(form)
    }

    /// Explicit cancel or dismissal of the edit form
    pub fn cancel_edit(&mut self) {
        if self.current_edit_id.take().is_some() {
            debug!("edit session cancelled");
        }
    }

    /// Create (no edit session) or update (edit session) a task, then reload.
    ///
    /// The edit session ends only here on success or in
    /// [`cancel_edit`](Self::cancel_edit). On failure it is kept so the user
    /// can retry.
    pub async fn submit(&mut self, form: TaskForm) -> Result<(), SyncError> {
        let token = self.token()?;

        let title = form.title.trim();
        if title.is_empty() {
            return self.fail(SyncError::SaveFailed("task title is required".to_string()));
        }
        let date = match to_compact_date(form.date.trim()) {
            Ok(date) => date,
            Err(err) => return self.fail(SyncError::SaveFailed(err.to_string())),
        };

        let request = NewTaskRequest {
            title: title.to_string(),
            date,
            repeat: form.repeat.trim().to_string(),
            comment: form.comment,
        };

        let result = match self.current_edit_id.clone() {
            Some(id) => {
                let request = request.with_id(id);
                self.api
                    .update_task(&token, &request)
                    .await
                    .map(|()| request.id)
            }
            None => self
                .api
                .create_task(&token, &request)
                .await
                .map(|created| created.id),
        };

        let id = match result {
            Ok(id) => id,
            Err(err) => return self.fail(SyncError::SaveFailed(server_message(&err))),
        };

        info!(task_id = %id, "task saved");
        self.current_edit_id = None;
        self.notices.post_success("task saved");
        let _ = self.reload().await;
        Ok(())
    }

    // ### Mutations

    pub async fn delete(&mut self, task_id: &str) -> Result<(), SyncError> {
        let token = self.token()?;

        if let Err(err) = self.api.delete_task(&token, task_id).await {
            return self.fail(SyncError::DeleteFailed(server_message(&err)));
        }

        info!(task_id, "task deleted");
        self.notices.post_success("task deleted");
        let _ = self.reload().await;
        Ok(())
    }

    pub async fn mark_done(&mut self, task_id: &str) -> Result<(), SyncError> {
        let token = self.token()?;

        if let Err(err) = self.api.mark_done(&token, task_id).await {
            return self.fail(SyncError::MarkDoneFailed(server_message(&err)));
        }

        info!(task_id, "task marked done");
        self.notices.post_success("task done");
        let _ = self.reload().await;
        Ok(())
    }

    // ### Accessors

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Read-only projection for rendering
    pub fn view(&self) -> Vec<TaskView> {
        self.tasks.iter().map(TaskView::from).collect()
    }

    pub fn current_edit_id(&self) -> Option<&str> {
        self.current_edit_id.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    // ### Helpers

    fn token(&mut self) -> Result<String, SyncError> {
        match self.auth_token.clone() {
            Some(token) => Ok(token),
            None => self.fail(SyncError::Unauthenticated),
        }
    }

    fn fail<T>(&mut self, err: SyncError) -> Result<T, SyncError> {
        warn!(error = %err, "task operation failed");
        self.notices.post_error(err.to_string());
        Err(err)
    }
}
