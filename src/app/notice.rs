//! User-facing notices, mirrored into the log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        let notice = Self {
            level,
            message: message.into(),
            at: Utc::now(),
        };
        notice.emit();
        notice
    }

    fn emit(&self) {
        match self.level {
            NoticeLevel::Success | NoticeLevel::Info => info!(notice = %self.message),
            NoticeLevel::Warning => warn!(notice = %self.message),
            NoticeLevel::Error => error!(notice = %self.message),
        }
    }
}
