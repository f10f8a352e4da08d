//! Tenant Health Scoring
//!
//! Maps raw risk counters to a 0-100 posture score and a letter grade.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score every tenant starts from before penalties and boosts
pub const BASELINE_SCORE: f64 = 55.0;
/// Points awarded per percent of attested policies
pub const ATTESTATION_WEIGHT: f64 = 0.5;
/// Penalty per vulnerable asset
pub const VULNERABLE_ASSET_PENALTY: i64 = 10;
/// Penalty per open critical threat
pub const CRITICAL_THREAT_PENALTY: i64 = 20;

/// Raw risk metrics for one tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreInput {
    /// Count of assets flagged vulnerable
    pub vulnerable_assets: i64,
    /// Count of open critical threats
    pub critical_threats: i64,
    /// Share of policies attested, 0-100
    pub policy_attestation_percent: f64,
}

/// Score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreResult {
    /// Final score, always within 0..=100
    pub score: u8,
    /// Letter grade for `score`
    pub grade: HealthGrade,
    /// Points removed for vulnerable assets
    pub vulnerable_penalty: i64,
    /// Points removed for critical threats
    pub critical_threat_penalty: i64,
    /// Points added for policy attestation, one decimal place
    pub attestation_boost: f64,
}

/// Health grade, A+ through F
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[allow(missing_docs)]
pub enum HealthGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl HealthGrade {
    /// Grade thresholds, highest first. Each bound is inclusive.
    const THRESHOLDS: [(u8, HealthGrade); 7] = [
        (97, HealthGrade::APlus),
        (93, HealthGrade::A),
        (90, HealthGrade::AMinus),
        (85, HealthGrade::BPlus),
        (80, HealthGrade::B),
        (70, HealthGrade::C),
        (60, HealthGrade::D),
    ];

    /// Grade for a final score
    pub fn from_score(score: u8) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(HealthGrade::F)
    }

    /// Display label
    pub const fn as_str(self) -> &'static str {
        match self {
            HealthGrade::APlus => "A+",
            HealthGrade::A => "A",
            HealthGrade::AMinus => "A-",
            HealthGrade::BPlus => "B+",
            HealthGrade::B => "B",
            HealthGrade::C => "C",
            HealthGrade::D => "D",
            HealthGrade::F => "F",
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculate the health score for a tenant.
///
/// Total and pure: negative or oversized inputs are not rejected, the final
/// score is clamped into `0..=100` instead.
pub fn calculate_health_score(input: &HealthScoreInput) -> HealthScoreResult {
    let vulnerable_penalty = input.vulnerable_assets.saturating_mul(VULNERABLE_ASSET_PENALTY);
    let critical_threat_penalty = input.critical_threats.saturating_mul(CRITICAL_THREAT_PENALTY);
    let attestation_boost = round_tenths(input.policy_attestation_percent * ATTESTATION_WEIGHT);

    let raw_score = BASELINE_SCORE + attestation_boost
        - vulnerable_penalty as f64
        - critical_threat_penalty as f64;
    // NaN attestation collapses to the floor
    let clamped = if raw_score.is_nan() { 0.0 } else { raw_score.clamp(0.0, 100.0) };
    // clamped is non-negative, so round() is round-half-up here
    let score = clamped.round() as u8;

    HealthScoreResult {
        score,
        grade: HealthGrade::from_score(score),
        vulnerable_penalty,
        critical_threat_penalty,
        attestation_boost,
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
