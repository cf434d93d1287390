//! crates/tax_benchmark_core/src/domain.rs
//!
//! Defines the pure, core data structures for the benchmark store.
//! All persisted JSON uses camelCase field names so the on-disk blobs and the
//! backup document keep the contract the web client reads and writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Moderation state of a submission. Starts at `Pending`; only an admin
/// action moves it to `Approved` or `Rejected`, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// An admin moderation verdict. `Pending` is the initial state only and is
/// never a legal target, so it is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl From<Verdict> for SubmissionStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Approved => SubmissionStatus::Approved,
            Verdict::Rejected => SubmissionStatus::Rejected,
        }
    }
}

/// Internal account record. Emails are stored lowercase and matched
/// case-insensitively; `password` holds an argon2 PHC string, or `None` for
/// identities that only ever signed in through the external provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

impl UserRecord {
    /// Redacted projection handed out as the session identity.
    pub fn to_session(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// The currently-authenticated identity. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Global settings: the sheet-sync webhook URL and the admin allow-list.
/// The allow-list is the source of truth for role derivation; entries are
/// lowercase, unique, and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default = "Settings::default_admin_emails")]
    pub admin_emails: Vec<String>,
}

impl Settings {
    fn default_admin_emails() -> Vec<String> {
        vec![
            "admin@taxbenchmark.com".to_string(),
            "jiyangu923@gmail.com".to_string(),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            admin_emails: Self::default_admin_emails(),
        }
    }
}

/// One respondent's survey answers plus moderation state. At most one
/// submission exists per `user_id`; a new submission replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub answers: SubmissionAnswers,
}

impl Submission {
    /// Build a fresh pending submission owned by `owner`.
    pub fn new_pending(owner: &User, answers: SubmissionAnswers) -> Self {
        Self {
            id: format!("sub-{}", Uuid::new_v4()),
            user_id: owner.id.clone(),
            user_name: owner.name.clone(),
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
            answers,
        }
    }
}

/// The questionnaire payload: eleven sections of mostly-optional answers.
/// The store treats this as an opaque value; only the service's report
/// aggregation looks inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionAnswers {
    // Section 1: context and respondent info
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub company_profile: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participation_goal: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_role: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub owned_tax_functions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_tax_functions_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_scope: Option<String>,

    // Section 2: organizational profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_range: Option<String>,

    // Section 3: operating model and governance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centralization_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_approach: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_outsourcing_extent: Option<String>,

    // Section 4: resource benchmarking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_ftes_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_outsourced_resources_ftes_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hosting_platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hosting_platform_other: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_skill_mix_frontend_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_skill_mix_backend_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_skill_mix_data_engineering_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_skill_mix_dev_ops_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_tech_skill_mix_other_percent: Option<f64>,

    // Section 5: talent and skill composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_business_ftes_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_business_outsourcing_ftes_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_specialists_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_specialists_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_specialists_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provision_specialists_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_specialists_percent: Option<f64>,

    // Section 6: process maturity and automation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_calculation_automation_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_payment_automation_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withholding_tax_automation_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_automation_coverage_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_change_response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_confidence: Option<String>,

    // Section 7: data and filing ecosystem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_tax_filings_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdictions_covered: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_data_architecture: Option<String>,

    // Section 8: technical architecture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_programming_languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cicd_tools: Option<String>,

    // Section 9: performance and innovation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_regulation_enablement_cycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p0_incidents_per_quarter: Option<String>,

    // Section 10: financial close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_close_total_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_close_completion_day: Option<u32>,

    // Section 11: AI adoption
    pub ai_adopted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gen_ai_adoption_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_use_cases: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}
