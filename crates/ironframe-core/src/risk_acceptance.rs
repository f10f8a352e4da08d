//! Risk Acceptance Decisions

use crate::error::{IronframeError, IronframeResult};
use crate::store::RecordLog;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded when the caller does not name one
pub const DEFAULT_ACTOR: &str = "SECURITY_OPERATOR";
/// Reason recorded when the caller does not give one
pub const DEFAULT_REASON: &str = "Risk accepted by operator decision.";

/// Operator decision on a flagged alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RiskDecision {
    /// Alert formally dismissed
    #[serde(rename = "DISMISS/IGNORE")]
    DismissIgnore,
}

/// Recorded risk acceptance. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RiskAcceptanceDecision {
    /// `risk-accept-{timestamp}-{alertId}`
    pub id: String,
    pub alert_id: String,
    pub actor: String,
    pub decision: RiskDecision,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Caller request to accept the risk of an alert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RiskAcceptanceRequest {
    /// Required, must not be blank
    pub alert_id: Option<String>,
    /// Defaults to [`DEFAULT_ACTOR`]
    pub actor: Option<String>,
    /// Defaults to [`DEFAULT_REASON`]
    pub reason: Option<String>,
}

/// Most-recent-first log of risk acceptance decisions
#[derive(Debug, Default)]
pub struct RiskAcceptanceLog {
    log: RecordLog<RiskAcceptanceDecision>,
}

impl RiskAcceptanceLog {
    /// Log with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Log with explicit limits
    pub fn with_limits(view_limit: usize, retention: usize) -> Self {
        Self { log: RecordLog::with_limits(view_limit, retention) }
    }

    /// Validate a request, fill defaults and record the decision.
    pub fn accept(
        &self,
        request: RiskAcceptanceRequest,
        now: DateTime<Utc>,
    ) -> IronframeResult<RiskAcceptanceDecision> {
        let alert_id = request
            .alert_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| IronframeError::required("alertId"))?;

        let decision = RiskAcceptanceDecision {
            id: format!(
                "risk-accept-{}-{}",
                now.to_rfc3339_opts(SecondsFormat::Millis, true),
                alert_id
            ),
            alert_id,
            actor: request.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string()),
            decision: RiskDecision::DismissIgnore,
            reason: request.reason.unwrap_or_else(|| DEFAULT_REASON.to_string()),
            created_at: now,
        };

        tracing::info!(alert_id = %decision.alert_id, actor = %decision.actor, "Risk accepted");
        self.log.append(decision.clone());
        Ok(decision)
    }

    /// Append an already-built decision
    pub fn append(&self, decision: RiskAcceptanceDecision) {
        self.log.append(decision);
    }

    /// Most recent decisions first, at most the view limit
    pub fn list(&self) -> Vec<RiskAcceptanceDecision> {
        self.log.list()
    }

    /// Every retained decision, most recent first
    pub fn snapshot(&self) -> Vec<RiskAcceptanceDecision> {
        self.log.snapshot()
    }
}
