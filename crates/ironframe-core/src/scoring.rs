//! Entity Risk Scoring
//!
//! Asset-posture scores, financial exposure, ALE risk levels and vendor
//! assessments for the fixed tenant set.

use crate::error::{IronframeError, IronframeResult};
use crate::tenant::{ensure_tenant_access, TenantKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Asset posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum AssetStatus {
    Secure,
    Warning,
    Vulnerable,
    Critical,
}

/// Monitored asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EntityAsset {
    /// Stable asset id, prefixed with the tenant code
    pub id: String,
    /// Display name
    pub name: String,
    /// Current posture
    pub status: AssetStatus,
}

impl EntityAsset {
    fn new(id: &str, name: &str, status: AssetStatus) -> Self {
        Self { id: id.to_string(), name: name.to_string(), status }
    }
}

/// Scoring inputs for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EntityData {
    /// Tenant label, or `GLOBAL` for the aggregate
    pub entity_name: String,
    /// Monitored assets
    pub assets: Vec<EntityAsset>,
    /// Open threats, 20 points each
    pub active_threats: u32,
    /// Percent of policies attested, 0-100
    pub policy_attestation: u32,
}

/// A-F letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[allow(missing_docs)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Grade for a 0-100 score
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => LetterGrade::A,
            80..=89 => LetterGrade::B,
            70..=79 => LetterGrade::C,
            60..=69 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }
}

/// Entity score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EntityScoreResult {
    pub score: u32,
    pub grade: LetterGrade,
    pub critical_assets: u32,
    pub vulnerable_assets: u32,
    pub active_threats: u32,
    pub policy_attestation: u32,
    pub bonus_points: u32,
}

const CRITICAL_ASSET_DEDUCTION: i64 = 15;
const VULNERABLE_ASSET_DEDUCTION: i64 = 10;
const ACTIVE_THREAT_DEDUCTION: i64 = 20;

/// Score an entity from its asset posture
pub fn calculate_entity_score(entity: &EntityData) -> EntityScoreResult {
    let count = |status: AssetStatus| entity.assets.iter().filter(|a| a.status == status).count() as u32;
    let critical_assets = count(AssetStatus::Critical);
    let vulnerable_assets = count(AssetStatus::Vulnerable);

    let deductions = i64::from(critical_assets) * CRITICAL_ASSET_DEDUCTION
        + i64::from(vulnerable_assets) * VULNERABLE_ASSET_DEDUCTION
        + i64::from(entity.active_threats) * ACTIVE_THREAT_DEDUCTION;
    let bonus_points = (entity.policy_attestation / 10) * 2;
    let score = (100 - deductions + i64::from(bonus_points)).clamp(0, 100) as u32;

    EntityScoreResult {
        score,
        grade: LetterGrade::from_score(score),
        critical_assets,
        vulnerable_assets,
        active_threats: entity.active_threats,
        policy_attestation: entity.policy_attestation,
        bonus_points,
    }
}

/// Seeded posture for a tenant
pub fn entity_seed(tenant: TenantKey) -> EntityData {
    use AssetStatus::{Critical, Secure, Vulnerable, Warning};

    let (assets, policy_attestation) = match tenant {
        TenantKey::Medshield => (
            vec![
                EntityAsset::new("ms-cloud-ehr", "Cloud EHR", Secure),
                EntityAsset::new("ms-telehealth-v3", "Remote Telehealth V3", Vulnerable),
                EntityAsset::new("ms-inpatient-nodes", "In-Patient Nodes", Secure),
            ],
            92,
        ),
        TenantKey::Vaultbank => (
            vec![
                EntityAsset::new("vb-hft-engine", "HFT Engine", Secure),
                EntityAsset::new("vb-swift-core", "SWIFT Core", Critical),
                EntityAsset::new("vb-ledger-v2", "Customer Ledger V2", Secure),
            ],
            74,
        ),
        TenantKey::Gridcore => (
            vec![
                EntityAsset::new("gc-substation-v4", "Substation Control V4", Warning),
                EntityAsset::new("gc-transmission-node", "Transmission Node", Secure),
                EntityAsset::new("gc-scada-terminal", "SCADA Master Terminal", Vulnerable),
            ],
            86,
        ),
    };

    EntityData {
        entity_name: tenant.label().to_string(),
        assets,
        active_threats: 0,
        policy_attestation,
    }
}

/// Fold several entities into one GLOBAL entity
pub fn build_aggregate_entity_data(entities: &[EntityData]) -> EntityData {
    let assets = entities.iter().flat_map(|e| e.assets.iter().cloned()).collect();
    let active_threats = entities.iter().map(|e| e.active_threats).sum();
    let policy_attestation = if entities.is_empty() {
        0
    } else {
        let total: u32 = entities.iter().map(|e| e.policy_attestation).sum();
        (f64::from(total) / entities.len() as f64).round() as u32
    };

    EntityData {
        entity_name: "GLOBAL".to_string(),
        assets,
        active_threats,
        policy_attestation,
    }
}

// ============ Financial Exposure ============

/// Exposure factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FinancialExposureInput {
    /// Threat severity factor
    pub threat_severity: f64,
    /// Asset value in USD
    pub asset_value: f64,
    /// Industry weighting
    pub industry_multiplier: f64,
}

/// Seeded exposure factors for a tenant
pub fn exposure_factors(tenant: TenantKey) -> FinancialExposureInput {
    let (threat_severity, asset_value, industry_multiplier) = match tenant {
        TenantKey::Medshield => (3.0, 1_800_000.0, 1.3),
        TenantKey::Vaultbank => (5.0, 2_500_000.0, 1.6),
        TenantKey::Gridcore => (4.0, 2_100_000.0, 1.45),
    };
    FinancialExposureInput { threat_severity, asset_value, industry_multiplier }
}

/// Dollar exposure, rounded to the nearest dollar
pub fn calculate_financial_exposure(input: &FinancialExposureInput) -> i64 {
    (input.threat_severity * input.asset_value * input.industry_multiplier).round() as i64
}

/// Exposure for `target`, refused when the active tenant is a different one
pub fn tenant_financial_exposure(active_tenant_uuid: Option<&str>, target: TenantKey) -> IronframeResult<i64> {
    ensure_tenant_access(active_tenant_uuid, target)?;
    Ok(calculate_financial_exposure(&exposure_factors(target)))
}

/// Incident severity for impact modelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum ImpactSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactSeverity {
    /// Share of the per-event impact realised at this severity
    pub const fn multiplier(self) -> f64 {
        match self {
            ImpactSeverity::Low => 0.35,
            ImpactSeverity::Medium => 0.6,
            ImpactSeverity::High => 0.8,
            ImpactSeverity::Critical => 1.0,
        }
    }
}

/// Overrides for [`calculate_financial_impact`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactOptions {
    /// Replaces the severity multiplier
    pub complexity_multiplier: Option<f64>,
    /// Regulatory fine added to the total, USD
    pub potential_fine: Option<f64>,
}

/// Modelled incident impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FinancialImpactResult {
    pub entity: TenantKey,
    pub severity: ImpactSeverity,
    pub avg_breach_liability: i64,
    pub critical_per_event_impact: i64,
    pub total_impact: i64,
    pub potential_fine: f64,
    pub complexity_multiplier: f64,
}

/// Industry breach baselines: (average breach liability, critical per-event impact)
const fn impact_baseline(tenant: TenantKey) -> (i64, i64) {
    match tenant {
        TenantKey::Medshield => (11_100_000, 1_500_000),
        TenantKey::Vaultbank => (5_900_000, 850_000),
        TenantKey::Gridcore => (4_700_000, 600_000),
    }
}

/// Model the cost of an incident at `severity` for `tenant`
pub fn calculate_financial_impact(
    tenant: TenantKey,
    severity: ImpactSeverity,
    options: ImpactOptions,
) -> FinancialImpactResult {
    let (avg_breach_liability, critical_per_event_impact) = impact_baseline(tenant);
    let complexity_multiplier = options.complexity_multiplier.unwrap_or(severity.multiplier());
    let potential_fine = options.potential_fine.unwrap_or(0.0);
    let total_impact = (critical_per_event_impact as f64 * complexity_multiplier + potential_fine).round() as i64;

    FinancialImpactResult {
        entity: tenant,
        severity,
        avg_breach_liability,
        critical_per_event_impact,
        total_impact,
        potential_fine,
        complexity_multiplier,
    }
}

// ============ ALE Risk Level ============

/// Annualised loss expectancy measured against a tenant's risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Above the threshold
    Critical,
    /// At least half the threshold
    Elevated,
    /// Below half the threshold
    Acceptable,
}

/// Risk appetite threshold for a tenant in cents: its average breach liability
pub const fn risk_threshold_cents(tenant: TenantKey) -> i64 {
    impact_baseline(tenant).0 * 100
}

/// Classify an ALE against a threshold, both in integer cents.
///
/// The ALE may be zero; the threshold must be positive.
pub fn calculate_risk_level(ale_cents: i64, threshold_cents: i64) -> IronframeResult<RiskLevel> {
    if ale_cents < 0 || threshold_cents <= 0 {
        return Err(IronframeError::Validation("Financial values must be positive integers.".into()));
    }

    Ok(if ale_cents > threshold_cents {
        RiskLevel::Critical
    } else if ale_cents >= threshold_cents / 2 {
        RiskLevel::Elevated
    } else {
        RiskLevel::Acceptable
    })
}

// ============ Vendor Questionnaire ============

/// Vendor industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[allow(missing_docs)]
pub enum VendorIndustry {
    Healthcare,
    Finance,
    Energy,
}

impl VendorIndustry {
    /// Tenant whose risk profile the vendor inherits
    pub const fn tenant(self) -> TenantKey {
        match self {
            VendorIndustry::Healthcare => TenantKey::Medshield,
            VendorIndustry::Finance => TenantKey::Vaultbank,
            VendorIndustry::Energy => TenantKey::Gridcore,
        }
    }
}

/// Vendor questionnaire answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct VendorQuestionnaireInput {
    pub vendor_name: String,
    pub industry: VendorIndustry,
    pub mfa_enabled: bool,
    pub encryption_enabled: bool,
    pub incident_response_ready: bool,
}

/// How the questionnaire reached us
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    /// Answered through the intake form
    ManualForm,
    /// Pulled from a connected AWS account
    LiveAwsSync,
}

/// Vendor scorecard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct VendorQuestionnaireResult {
    /// Tenant whose profile the vendor was scored against
    pub entity_key: TenantKey,
    pub vendor_name: String,
    pub industry: VendorIndustry,
    pub score: u32,
    pub grade: LetterGrade,
    pub potential_financial_impact: i64,
    pub mfa_enabled: bool,
    pub sync_status: SyncStatus,
    /// Top three cost drivers, most severe first
    pub cost_drivers: Vec<String>,
}

const MFA_SCORE_PENALTY: u32 = 30;
const MFA_FINANCIAL_PENALTY: i64 = 500_000;
const MAX_COST_DRIVERS: usize = 3;

/// Score a vendor against the risk profile of its industry's tenant
pub fn assess_vendor_questionnaire(input: &VendorQuestionnaireInput) -> VendorQuestionnaireResult {
    let entity_key = input.industry.tenant();
    let base = calculate_entity_score(&entity_seed(entity_key));

    let score = if input.mfa_enabled { base.score } else { base.score.saturating_sub(MFA_SCORE_PENALTY) };
    let mfa_financial_penalty = if input.mfa_enabled { 0 } else { MFA_FINANCIAL_PENALTY };
    let potential_financial_impact =
        calculate_financial_exposure(&exposure_factors(entity_key)) + mfa_financial_penalty;

    let mut cost_drivers = Vec::new();
    if !input.mfa_enabled {
        cost_drivers.push("MFA Control Gap: $500,000.00");
    }
    if !input.encryption_enabled {
        cost_drivers.push("Encryption Control Weakness: $250,000.00");
    }
    if !input.incident_response_ready {
        cost_drivers.push("Incident Response Readiness Gap: $150,000.00");
    }
    match input.industry {
        VendorIndustry::Healthcare => cost_drivers.push("HIPAA Non-Compliance Fine: $250,000.00"),
        VendorIndustry::Energy => cost_drivers.push("NERC CIP Enforcement Penalty: $200,000.00"),
        VendorIndustry::Finance => {}
    }

    VendorQuestionnaireResult {
        entity_key,
        vendor_name: input.vendor_name.clone(),
        industry: input.industry,
        score,
        grade: LetterGrade::from_score(score),
        potential_financial_impact,
        mfa_enabled: input.mfa_enabled,
        sync_status: SyncStatus::ManualForm,
        cost_drivers: cost_drivers.into_iter().take(MAX_COST_DRIVERS).map(str::to_string).collect(),
    }
}

// ============ Vendor Health Grade ============

/// Evidence and alert state for one vendor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct VendorHealthInput {
    /// Zero or less means the SOC 2 report has expired
    pub days_until_soc2_expiration: i64,
    /// Document labels in the evidence locker, e.g. `SOC2`, `ISO 27001`, `Insurance`
    pub evidence_locker_docs: Vec<String>,
    /// Harvester flagged recent activity in the vendor's industry
    pub has_active_industry_alert: bool,
    /// Breach confirmed in the vendor's industry
    pub has_active_breach_alert: bool,
    /// Document version or signature outstanding
    pub has_pending_versioning: bool,
    /// Escalation open with a stakeholder
    pub has_stakeholder_escalation: bool,
    /// Flagged for manual review
    pub requires_manual_review: bool,
}

/// Vendor health scorecard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VendorHealthScore {
    /// 0-100
    pub score: u32,
    /// A-F from the score
    pub grade: LetterGrade,
    /// One line per penalty applied, in evaluation order
    pub breakdown: Vec<String>,
}

const DOCS_POINTS: i64 = 50;
const INDUSTRY_POINTS: i64 = 30;
const INTERNAL_POINTS: i64 = 20;
const EXPIRED_SOC2_CAP: i64 = 65;
const ACTIVE_BREACH_CAP: i64 = 55;
const CLEAN_VENDOR_SUMMARY: &str =
    "SOC2/ISO/Insurance current, no industry alerts, and no internal review penalties";

/// Grade a vendor from its evidence locker, industry alerts and internal review state.
///
/// Points come from three buckets (docs 50, industry 30, internal 20), each
/// floored at zero. An expired SOC 2 caps the total at 65 and an active
/// breach alert caps it at 55.
pub fn calculate_vendor_grade(input: &VendorHealthInput) -> VendorHealthScore {
    let docs: HashSet<String> = input.evidence_locker_docs.iter().map(|d| d.trim().to_uppercase()).collect();
    let soc2_expired = input.days_until_soc2_expiration <= 0;
    let mut breakdown = Vec::new();

    let mut docs_score = DOCS_POINTS;
    let mut penalise = |score: &mut i64, points: i64, line: &str| {
        *score -= points;
        breakdown.push(line.to_string());
    };

    if !docs.contains("SOC2") {
        penalise(&mut docs_score, 25, "SOC2 missing: -25 (Docs)");
    }
    if soc2_expired {
        penalise(&mut docs_score, 30, "SOC2 expired: -30 (Docs)");
    }
    if !docs.contains("ISO") && !docs.contains("ISO 27001") {
        penalise(&mut docs_score, 12, "ISO missing: -12 (Docs)");
    }
    if !docs.contains("INSURANCE") {
        penalise(&mut docs_score, 13, "Insurance missing: -13 (Docs)");
    }

    let mut industry_score = INDUSTRY_POINTS;
    if input.has_active_breach_alert {
        penalise(&mut industry_score, 30, "Active industry breach alert: -30 (Industry)");
    } else if input.has_active_industry_alert {
        penalise(&mut industry_score, 15, "Recent harvester alert(s): -15 (Industry)");
    }

    let mut internal_score = INTERNAL_POINTS;
    if input.requires_manual_review {
        penalise(&mut internal_score, 10, "Manual review required: -10 (Internal)");
    }
    if input.has_pending_versioning {
        penalise(&mut internal_score, 6, "Pending version/signature: -6 (Internal)");
    }
    if input.has_stakeholder_escalation {
        penalise(&mut internal_score, 4, "Stakeholder escalation open: -4 (Internal)");
    }

    let mut total = docs_score.clamp(0, DOCS_POINTS)
        + industry_score.clamp(0, INDUSTRY_POINTS)
        + internal_score.clamp(0, INTERNAL_POINTS);
    if soc2_expired {
        total = total.min(EXPIRED_SOC2_CAP);
    }
    if input.has_active_breach_alert {
        total = total.min(ACTIVE_BREACH_CAP);
    }
    let score = total.clamp(0, 100) as u32;

    if breakdown.is_empty() {
        breakdown.push(CLEAN_VENDOR_SUMMARY.to_string());
    }

    VendorHealthScore { score, grade: LetterGrade::from_score(score), breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_scores() {
        let vaultbank = calculate_entity_score(&entity_seed(TenantKey::Vaultbank));
        assert_eq!(vaultbank.critical_assets, 1);
        assert_eq!(vaultbank.bonus_points, 14);
        assert_eq!(vaultbank.score, 99);
        assert_eq!(vaultbank.grade, LetterGrade::A);

        // 100 - 10 + 18 clamps to 100
        let medshield = calculate_entity_score(&entity_seed(TenantKey::Medshield));
        assert_eq!(medshield.vulnerable_assets, 1);
        assert_eq!(medshield.score, 100);
    }

    #[test]
    fn test_threats_drive_score_to_floor() {
        let mut entity = entity_seed(TenantKey::Gridcore);
        entity.active_threats = 4;
        // 100 - 10 - 80 + 16
        let result = calculate_entity_score(&entity);
        assert_eq!(result.score, 26);
        assert_eq!(result.grade, LetterGrade::F);

        entity.active_threats = 10;
        assert_eq!(calculate_entity_score(&entity).score, 0);
    }

    #[test]
    fn test_letter_grade_bounds() {
        assert_eq!(LetterGrade::from_score(90), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(89), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(80), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(70), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(60), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(59), LetterGrade::F);
    }

    #[test]
    fn test_aggregate_entity() {
        let entities: Vec<_> = TenantKey::ALL.into_iter().map(entity_seed).collect();
        let global = build_aggregate_entity_data(&entities);

        assert_eq!(global.entity_name, "GLOBAL");
        assert_eq!(global.assets.len(), 9);
        // (92 + 74 + 86) / 3 = 84
        assert_eq!(global.policy_attestation, 84);
        assert_eq!(build_aggregate_entity_data(&[]).policy_attestation, 0);
    }

    #[test]
    fn test_financial_exposure() {
        assert_eq!(calculate_financial_exposure(&exposure_factors(TenantKey::Vaultbank)), 20_000_000);
        assert_eq!(calculate_financial_exposure(&exposure_factors(TenantKey::Medshield)), 7_020_000);
    }

    #[test]
    fn test_exposure_respects_isolation() {
        let medshield = TenantKey::Medshield.uuid().to_string();
        assert_eq!(tenant_financial_exposure(Some(&medshield), TenantKey::Medshield).unwrap(), 7_020_000);
        assert!(tenant_financial_exposure(None, TenantKey::Gridcore).is_ok());

        let err = tenant_financial_exposure(Some(&medshield), TenantKey::Vaultbank).unwrap_err();
        assert!(matches!(err, IronframeError::TenantIsolation(_)));
    }

    #[test]
    fn test_financial_impact() {
        let impact = calculate_financial_impact(TenantKey::Gridcore, ImpactSeverity::High, ImpactOptions::default());
        assert_eq!(impact.total_impact, 480_000);
        assert_eq!(impact.avg_breach_liability, 4_700_000);

        let fined = calculate_financial_impact(
            TenantKey::Medshield,
            ImpactSeverity::Low,
            ImpactOptions { complexity_multiplier: Some(2.0), potential_fine: Some(250_000.0) },
        );
        assert_eq!(fined.total_impact, 3_250_000);
    }

    #[test]
    fn test_vendor_without_controls() {
        let result = assess_vendor_questionnaire(&VendorQuestionnaireInput {
            vendor_name: "Acme Health Cloud".into(),
            industry: VendorIndustry::Healthcare,
            mfa_enabled: false,
            encryption_enabled: false,
            incident_response_ready: false,
        });

        assert_eq!(result.entity_key, TenantKey::Medshield);
        assert_eq!(result.score, 70);
        assert_eq!(result.grade, LetterGrade::C);
        assert_eq!(result.potential_financial_impact, 7_520_000);
        assert_eq!(
            result.cost_drivers,
            vec![
                "MFA Control Gap: $500,000.00",
                "Encryption Control Weakness: $250,000.00",
                "Incident Response Readiness Gap: $150,000.00",
            ]
        );
    }

    #[test]
    fn test_vendor_with_controls() {
        let result = assess_vendor_questionnaire(&VendorQuestionnaireInput {
            vendor_name: "Grid Telemetry Inc".into(),
            industry: VendorIndustry::Energy,
            mfa_enabled: true,
            encryption_enabled: true,
            incident_response_ready: true,
        });

        assert_eq!(result.score, 100);
        assert_eq!(result.sync_status, SyncStatus::ManualForm);
        assert_eq!(result.cost_drivers, vec!["NERC CIP Enforcement Penalty: $200,000.00"]);
    }

    fn vendor(docs: &[&str], days_until_soc2_expiration: i64) -> VendorHealthInput {
        VendorHealthInput {
            days_until_soc2_expiration,
            evidence_locker_docs: docs.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    const ALL_DOCS: [&str; 3] = ["SOC2", "ISO 27001", "Insurance"];

    #[test]
    fn test_clean_vendor_scores_full_marks() {
        let result = calculate_vendor_grade(&vendor(&[" soc2 ", "iso", "insurance"], 120));
        assert_eq!(result.score, 100);
        assert_eq!(result.grade, LetterGrade::A);
        assert_eq!(result.breakdown, vec![CLEAN_VENDOR_SUMMARY]);
    }

    #[test]
    fn test_expired_soc2_caps_at_65() {
        // 20 + 30 + 20 = 70 before the cap
        let result = calculate_vendor_grade(&vendor(&ALL_DOCS, 0));
        assert_eq!(result.score, 65);
        assert_eq!(result.grade, LetterGrade::D);
        assert_eq!(result.breakdown, vec!["SOC2 expired: -30 (Docs)"]);

        assert_eq!(calculate_vendor_grade(&vendor(&ALL_DOCS, 1)).score, 100);
    }

    #[test]
    fn test_active_breach_caps_at_55() {
        let input = VendorHealthInput {
            has_active_breach_alert: true,
            has_active_industry_alert: true,
            ..vendor(&ALL_DOCS, 30)
        };
        let result = calculate_vendor_grade(&input);
        assert_eq!(result.score, 55);
        assert_eq!(result.grade, LetterGrade::F);
        // the harvester penalty is skipped when a breach is active
        assert_eq!(result.breakdown, vec!["Active industry breach alert: -30 (Industry)"]);
    }

    #[test]
    fn test_docs_bucket_floors_at_zero() {
        // docs: 50 - 25 - 30 - 12 - 13 = -30, floored to 0
        let result = calculate_vendor_grade(&vendor(&[], -5));
        assert_eq!(result.score, 50);
        assert_eq!(result.breakdown.len(), 4);
        assert_eq!(result.breakdown[0], "SOC2 missing: -25 (Docs)");
    }

    #[test]
    fn test_industry_and_internal_penalties() {
        let input = VendorHealthInput {
            has_active_industry_alert: true,
            requires_manual_review: true,
            has_pending_versioning: true,
            has_stakeholder_escalation: true,
            ..vendor(&ALL_DOCS, 90)
        };
        // 50 + 15 + 0
        let result = calculate_vendor_grade(&input);
        assert_eq!(result.score, 65);
        assert_eq!(
            result.breakdown,
            vec![
                "Recent harvester alert(s): -15 (Industry)",
                "Manual review required: -10 (Internal)",
                "Pending version/signature: -6 (Internal)",
                "Stakeholder escalation open: -4 (Internal)",
            ]
        );
    }

    #[test]
    fn test_tenant_risk_thresholds() {
        assert_eq!(risk_threshold_cents(TenantKey::Medshield), 1_110_000_000);
        assert_eq!(risk_threshold_cents(TenantKey::Vaultbank), 590_000_000);
        assert_eq!(risk_threshold_cents(TenantKey::Gridcore), 470_000_000);
    }

    #[test]
    fn test_risk_level_at_tenant_thresholds() {
        for tenant in TenantKey::ALL {
            let threshold = risk_threshold_cents(tenant);
            assert_eq!(calculate_risk_level(threshold, threshold).unwrap(), RiskLevel::Elevated);
            assert_eq!(calculate_risk_level(threshold + 1, threshold).unwrap(), RiskLevel::Critical);
            assert_eq!(calculate_risk_level(threshold / 4, threshold).unwrap(), RiskLevel::Acceptable);
        }
    }

    #[test]
    fn test_risk_level_half_threshold_boundary() {
        let threshold = 1_000_000_000;
        assert_eq!(calculate_risk_level(threshold - 1, threshold).unwrap(), RiskLevel::Elevated);
        assert_eq!(calculate_risk_level(threshold / 2, threshold).unwrap(), RiskLevel::Elevated);
        assert_eq!(calculate_risk_level(threshold / 2 - 1, threshold).unwrap(), RiskLevel::Acceptable);
        assert_eq!(calculate_risk_level(0, threshold).unwrap(), RiskLevel::Acceptable);
    }

    #[test]
    fn test_risk_level_rejects_invalid_values() {
        for (ale, threshold) in [(-1, 1_000), (100, 0), (100, -1), (-1, -1)] {
            let err = calculate_risk_level(ale, threshold).unwrap_err();
            let IronframeError::Validation(msg) = err else { panic!("expected a validation error") };
            assert_eq!(msg, "Financial values must be positive integers.");
        }
    }
}
