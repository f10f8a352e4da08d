//! Audit Trail
//!
//! Immutable audit records, newest first. GRC records are exempt from TTL
//! purges; everything else ages out.

use crate::error::IronframeResult;
use crate::retention::mask_sensitive_data;
use crate::store::{RecordLog, DEFAULT_RETENTION, DEFAULT_VIEW_LIMIT};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// User recorded when the caller does not name one
pub const DEFAULT_USER_ID: &str = "Dereck";
/// Address recorded when the caller IP is unknown
pub const DEFAULT_IP: &str = "127.0.0.1";

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditActionType {
    /// Session authenticated
    Login,
    /// Settings or cadence changed
    ConfigChange,
    /// Outbound email dispatched
    EmailSent,
    /// Alert dismissed through risk acceptance
    AlertDismissed,
}

/// Which log the record belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditLogType {
    /// Governance evidence, never purged
    Grc,
    /// Application events, the default
    #[default]
    AppSystem,
    /// Server events
    Server,
    /// Telemetry events
    Telemetry,
}

/// Audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuditLogRecord {
    /// `audit-{timestamp}-{suffix}`
    pub id: String,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// Acting user
    pub user_id: String,
    /// Event kind
    pub action_type: AuditActionType,
    /// Owning log
    pub log_type: AuditLogType,
    /// Free-form tag for filtering
    pub metadata_tag: Option<String>,
    /// Human-readable summary
    pub description: String,
    /// Caller address
    pub ip_address: String,
}

impl AuditLogRecord {
    /// Copy with emails and SSNs masked out of the description
    pub fn masked(&self) -> Self {
        Self { description: mask_sensitive_data(&self.description), ..self.clone() }
    }
}

/// New audit entry. Unset fields take the logger defaults.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub struct AuditLogInput {
    pub action_type: AuditActionType,
    pub description: String,
    pub log_type: Option<AuditLogType>,
    pub metadata_tag: Option<String>,
    pub user_id: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl AuditLogInput {
    /// Entry with every optional field unset
    pub fn new(action_type: AuditActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
            log_type: None,
            metadata_tag: None,
            user_id: None,
            ip_address: None,
            timestamp: None,
        }
    }

    /// Override the default `APP_SYSTEM` log
    pub fn log_type(mut self, log_type: AuditLogType) -> Self {
        self.log_type = Some(log_type);
        self
    }

    /// Attach a metadata tag
    pub fn metadata_tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata_tag = Some(tag.into());
        self
    }

    /// Acting user
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Caller address
    pub fn ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// Event time, defaults to now
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Outcome of a TTL purge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PurgeReport {
    pub before_count: usize,
    pub after_count: usize,
    pub purged_count: usize,
    pub grc_before_count: usize,
    pub grc_after_count: usize,
    pub grc_purged_count: usize,
}

/// Export format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// CSV with a header row
    Csv,
}

/// Audit logger
#[derive(Debug)]
pub struct AuditLogger {
    log: RecordLog<AuditLogRecord>,
}

impl AuditLogger {
    /// Logger with the default 200 view and 2000 retention
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_VIEW_LIMIT, DEFAULT_RETENTION)
    }

    /// Logger with explicit limits
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self { log: RecordLog::with_limits(view_limit, retention) }
    }

    /// Record an audit event and return the stored record
    pub fn append(&self, input: AuditLogInput) -> AuditLogRecord {
        let record = build_record(input);
        tracing::debug!(id = %record.id, action = ?record.action_type, "Audit event recorded");
        self.log.append(record.clone());
        record
    }

    /// Most recent records first, at most the view limit
    pub fn list(&self) -> Vec<AuditLogRecord> {
        self.log.list()
    }

    /// Every retained record, most recent first
    pub fn snapshot(&self) -> Vec<AuditLogRecord> {
        self.log.snapshot()
    }

    /// Record a LOGIN event unless one already exists for `now`'s UTC date.
    /// Returns true if an event was appended.
    pub fn ensure_login_event(&self, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        let login = AuditLogInput::new(AuditActionType::Login, "User session authenticated.").at(now);
        let appended = self.log.append_unless(
            |entry| entry.action_type == AuditActionType::Login && entry.timestamp.date_naive() == today,
            build_record(login),
        );
        if appended {
            tracing::debug!(%today, "Session login recorded");
        }
        appended
    }

    /// Drop non-GRC records older than `ttl_days` relative to `now`.
    pub fn purge_expired(&self, ttl_days: i64, now: DateTime<Utc>) -> PurgeReport {
        // TTLs too large to represent keep everything
        let ttl = Duration::try_days(ttl_days.max(0));

        let report = self.log.sweep(|records| {
            let before_count = records.len();
            let grc_before_count = count_grc(records.iter());
            records.retain(|entry| {
                entry.log_type == AuditLogType::Grc || ttl.map_or(true, |ttl| now - entry.timestamp <= ttl)
            });
            let grc_after_count = count_grc(records.iter());

            PurgeReport {
                before_count,
                after_count: records.len(),
                purged_count: before_count - records.len(),
                grc_before_count,
                grc_after_count,
                grc_purged_count: grc_before_count - grc_after_count,
            }
        });

        tracing::info!(ttl_days, purged = report.purged_count, "Purged expired audit logs");
        report
    }

    /// Render every retained record
    pub fn export(&self, format: ExportFormat) -> IronframeResult<String> {
        let events = self.log.snapshot();
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&events)?),
            ExportFormat::Csv => Ok(to_csv(&events)),
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn build_record(input: AuditLogInput) -> AuditLogRecord {
    let timestamp = input.timestamp.unwrap_or_else(Utc::now);
    AuditLogRecord {
        id: record_id(timestamp),
        timestamp,
        user_id: input.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        action_type: input.action_type,
        log_type: input.log_type.unwrap_or_default(),
        metadata_tag: input.metadata_tag,
        description: input.description,
        ip_address: input.ip_address.unwrap_or_else(|| DEFAULT_IP.to_string()),
    }
}

fn record_id(timestamp: DateTime<Utc>) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("audit-{}-{}", timestamp.to_rfc3339_opts(SecondsFormat::Millis, true), suffix)
}

fn count_grc<'a>(events: impl Iterator<Item = &'a AuditLogRecord>) -> usize {
    events.filter(|e| e.log_type == AuditLogType::Grc).count()
}

fn to_csv(events: &[AuditLogRecord]) -> String {
    let mut csv = "timestamp,action_type,log_type,user_id,ip_address,description\n".to_string();
    for e in events {
        let row = [
            e.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            enum_label(&e.action_type),
            enum_label(&e.log_type),
            csv_field(&e.user_id),
            csv_field(&e.ip_address),
            csv_field(&e.description),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn enum_label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::{Arc, Barrier};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_append_fills_defaults() {
        let logger = AuditLogger::new();
        let record = logger.append(AuditLogInput::new(AuditActionType::ConfigChange, "cadence updated"));

        assert_eq!(record.user_id, DEFAULT_USER_ID);
        assert_eq!(record.ip_address, DEFAULT_IP);
        assert_eq!(record.log_type, AuditLogType::AppSystem);
        assert_eq!(record.metadata_tag, None);
        assert!(record.id.starts_with("audit-"));
        assert_eq!(logger.list(), vec![record]);
    }

    #[test]
    fn test_retention_cap() {
        let logger = AuditLogger::with_limits(200, 2000);
        for n in 0..2100 {
            logger.append(AuditLogInput::new(AuditActionType::EmailSent, format!("mail {n}")));
        }
        assert_eq!(logger.snapshot().len(), 2000);
        assert_eq!(logger.list().len(), 200);
        assert_eq!(logger.list()[0].description, "mail 2099");
    }

    #[test]
    fn test_login_recorded_once_per_day() {
        let logger = AuditLogger::new();
        assert!(logger.ensure_login_event(day(0)));
        assert!(!logger.ensure_login_event(day(0) + Duration::hours(3)));
        assert!(logger.ensure_login_event(day(1)));

        let logins = logger
            .snapshot()
            .into_iter()
            .filter(|e| e.action_type == AuditActionType::Login)
            .count();
        assert_eq!(logins, 2);
    }

    #[test]
    fn test_concurrent_login_checks_record_one_event() {
        let logger = Arc::new(AuditLogger::new());
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let logger = Arc::clone(&logger);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    logger.ensure_login_event(day(0))
                })
            })
            .collect();

        let appended = handles.into_iter().map(|h| h.join().unwrap()).filter(|a| *a).count();
        assert_eq!(appended, 1);
        let logins = logger
            .snapshot()
            .into_iter()
            .filter(|e| e.action_type == AuditActionType::Login)
            .count();
        assert_eq!(logins, 1);
    }

    #[test]
    fn test_purge_keeps_grc_entries() {
        let logger = AuditLogger::new();
        logger.append(
            AuditLogInput::new(AuditActionType::AlertDismissed, "old grc")
                .log_type(AuditLogType::Grc)
                .at(day(0)),
        );
        logger.append(AuditLogInput::new(AuditActionType::ConfigChange, "old app").at(day(0)));
        logger.append(
            AuditLogInput::new(AuditActionType::Login, "old server")
                .log_type(AuditLogType::Server)
                .at(day(1)),
        );
        logger.append(AuditLogInput::new(AuditActionType::EmailSent, "recent").at(day(29)));

        let report = logger.purge_expired(7, day(30));

        assert_eq!(
            report,
            PurgeReport {
                before_count: 4,
                after_count: 2,
                purged_count: 2,
                grc_before_count: 1,
                grc_after_count: 1,
                grc_purged_count: 0,
            }
        );
        let remaining: Vec<_> = logger.snapshot().into_iter().map(|e| e.description).collect();
        assert_eq!(remaining, vec!["recent", "old grc"]);
    }

    #[test]
    fn test_purge_boundary_is_inclusive() {
        let logger = AuditLogger::new();
        logger.append(AuditLogInput::new(AuditActionType::ConfigChange, "edge").at(day(0)));
        let report = logger.purge_expired(7, day(7));
        assert_eq!(report.purged_count, 0);
    }

    #[test]
    fn test_csv_export_quotes_fields() {
        let logger = AuditLogger::new();
        logger.append(
            AuditLogInput::new(AuditActionType::AlertDismissed, "Risk accepted, \"alert-9\"")
                .user("analyst")
                .ip("10.0.0.4")
                .at(day(0)),
        );

        let csv = logger.export(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("timestamp,action_type,log_type,user_id,ip_address,description"));
        assert_eq!(
            lines.next(),
            Some("2026-01-01T12:00:00.000Z,ALERT_DISMISSED,APP_SYSTEM,analyst,10.0.0.4,\"Risk accepted, \"\"alert-9\"\"\"")
        );
    }

    #[test]
    fn test_json_export_uses_wire_names() {
        let logger = AuditLogger::new();
        logger.append(AuditLogInput::new(AuditActionType::EmailSent, "sent").log_type(AuditLogType::Grc));

        let json: serde_json::Value = serde_json::from_str(&logger.export(ExportFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["action_type"], "EMAIL_SENT");
        assert_eq!(json[0]["log_type"], "GRC");
    }

    #[test]
    fn test_masked_copy() {
        let logger = AuditLogger::new();
        let record = logger.append(AuditLogInput::new(AuditActionType::EmailSent, "sent to ciso@bank.com"));
        assert_eq!(record.masked().description, "sent to [MASKED_EMAIL]");
        assert_eq!(logger.list()[0].description, "sent to ciso@bank.com");
    }
}
