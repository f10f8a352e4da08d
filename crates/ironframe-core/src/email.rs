//! Outbound Email Tracking
//!
//! Delivery itself belongs to the notification layer. This module only
//! records what was sent so the dashboard can show read receipts.

use crate::error::{IronframeError, IronframeResult};
use crate::store::RecordLog;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Read state of a tracked message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadStatus {
    /// Not yet opened
    Pending,
}

/// Message handed to the tracker. Absent fields read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct SendEmailInput {
    pub recipient_email: String,
    pub recipient_title: String,
    pub subject: String,
    pub body: String,
}

/// Tracked outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TrackedEmailRecord {
    pub id: String,
    pub sent_time: DateTime<Utc>,
    pub recipient_email: String,
    pub recipient_title: String,
    pub subject: String,
    pub read_status: ReadStatus,
}

/// Email tracking log
#[derive(Debug, Default)]
pub struct EmailTracker {
    log: RecordLog<TrackedEmailRecord>,
}

impl EmailTracker {
    /// Tracker with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with explicit limits
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self { log: RecordLog::with_limits(view_limit, retention) }
    }

    /// Record an outbound message. The body is not stored, only its length is logged.
    pub fn send_with_tracking(&self, input: &SendEmailInput) -> IronframeResult<TrackedEmailRecord> {
        if input.recipient_email.trim().is_empty() {
            return Err(IronframeError::required("recipientEmail"));
        }

        let sent_time = Utc::now();
        let record = TrackedEmailRecord {
            id: format!(
                "email-{}-{}",
                sent_time.timestamp_millis(),
                rand::thread_rng().gen_range(0..1000)
            ),
            sent_time,
            recipient_email: input.recipient_email.clone(),
            recipient_title: input.recipient_title.clone(),
            subject: input.subject.clone(),
            read_status: ReadStatus::Pending,
        };

        self.log.append(record.clone());

        tracing::info!(
            sent_time = %record.sent_time,
            recipient_title = %record.recipient_title,
            read_status = ?record.read_status,
            recipient_email = %record.recipient_email,
            subject = %record.subject,
            body_length = input.body.len(),
            "EMAIL_TRACKER_LOG"
        );

        Ok(record)
    }

    /// Most recent messages first, at most the view limit
    pub fn list(&self) -> Vec<TrackedEmailRecord> {
        self.log.list()
    }

    /// Every retained message, most recent first
    pub fn snapshot(&self) -> Vec<TrackedEmailRecord> {
        self.log.snapshot()
    }
}
