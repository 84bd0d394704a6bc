/*
[INPUT]:  Error and success messages from controller operations
[OUTPUT]: Transient notices that expire after a fixed delay
[POS]:    Presentation boundary - user-facing notifications
[UPDATE]: When adding notice kinds or changing expiry
*/

use std::time::Duration;

use tokio::time::Instant;

/// How long a notice stays visible
pub const NOTICE_DISMISS: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Instant,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Queue of notices, each auto-dismissed `dismiss_after` once posted
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    dismiss_after: Duration,
    notices: Vec<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_DISMISS)
    }
}

impl NoticeBoard {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            notices: Vec::new(),
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    pub fn post_error(&mut self, message: impl Into<String>) {
        self.post(NoticeKind::Error, message.into());
    }

    pub fn post_success(&mut self, message: impl Into<String>) {
        self.post(NoticeKind::Success, message.into());
    }

    fn post(&mut self, kind: NoticeKind, message: String) {
        self.notices.push(Notice {
            kind,
            message,
            posted_at: Instant::now(),
        });
    }

    /// Notices that have not yet expired, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        let now = Instant::now();
        self.notices
            .iter()
            .filter(move |notice| now.duration_since(notice.posted_at) < self.dismiss_after)
    }

    /// Most recent unexpired error, if any
    pub fn latest_error(&self) -> Option<&Notice> {
        self.active().filter(|notice| notice.is_error()).last()
    }

    /// Forget expired notices
    pub fn prune(&mut self) {
        let now = Instant::now();
        let dismiss_after = self.dismiss_after;
        self.notices
            .retain(|notice| now.duration_since(notice.posted_at) < dismiss_after);
    }

    /// Take every notice, expired or not. Used by one-shot front-ends that
    /// print and exit before anything could expire.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}
