use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// How long a notification stays up before auto-dismissing.
const DISMISS_AFTER_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient user-visible notification with an auto-dismiss deadline.
/// Reading it after the deadline yields nothing, which is the whole
/// dismissal mechanism, not a timer task.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(skip)]
    expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Utc::now() + Duration::seconds(DISMISS_AFTER_SECS),
        }
    }

    pub fn is_live(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notification_is_live() {
        assert!(Notification::success("Saved!").is_live());
    }

    #[test]
    fn expired_notification_is_not() {
        let mut n = Notification::error("Failed");
        n.expires_at = Utc::now() - Duration::seconds(1);
        assert!(!n.is_live());
    }
}
