//! services/api/src/web/report.rs
//!
//! Peer-analytics aggregation for the report screen. The store hands back the
//! raw submission sequence; everything computed here is presentation-side.
//! Rejected submissions are excluded and automation ranges map to midpoint
//! percentages.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use tax_benchmark_core::{Submission, SubmissionStatus};

use crate::web::state::AppState;
use crate::web::store_guard;

//=========================================================================================
// Response Types
//=========================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Number of submissions counted (everything not rejected).
    pub total: usize,
    pub averages: Averages,
    /// Distribution of tax data architectures among counted submissions.
    pub architecture: Vec<ArchitectureSlice>,
    /// The requesting user's own submission, if they have one.
    pub my_submission: Option<Submission>,
}

/// All averages are rounded to whole numbers for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub calculation_automation: f64,
    pub payment_automation: f64,
    pub compliance_automation: f64,
    /// Average internal tech headcount, from the coarse range estimates.
    pub tech_fte: f64,
    /// Average internal business headcount, from the coarse range estimates.
    pub biz_fte: f64,
    /// Share of counted submissions reporting AI adoption, in percent.
    pub ai_adoption_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct ArchitectureSlice {
    pub name: String,
    pub value: usize,
}

//=========================================================================================
// Handler
//=========================================================================================

/// GET /report - Peer analytics over all non-rejected submissions.
pub async fn report_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Report>, (StatusCode, String)> {
    let store = store_guard(&state)?;
    let submissions = store.submissions();
    let mine = store
        .current_user()
        .and_then(|u| submissions.iter().find(|s| s.user_id == u.id).cloned());
    Ok(Json(build_report(&submissions, mine)))
}

//=========================================================================================
// Aggregation
//=========================================================================================

/// Midpoint percentage for an automation coverage range.
fn automation_midpoint(range: Option<&str>) -> f64 {
    match range {
        Some("99_plus") => 99.5,
        Some("90_99") => 95.0,
        Some("70_90") => 80.0,
        Some("40_70") => 55.0,
        Some("under_40") => 20.0,
        _ => 0.0,
    }
}

// FTE estimates are deliberately coarse: only the top range is singled out.
fn tech_fte_estimate(range: Option<&str>) -> f64 {
    if range == Some("over_100") {
        120.0
    } else {
        10.0
    }
}

fn biz_fte_estimate(range: Option<&str>) -> f64 {
    if range == Some("over_150") {
        170.0
    } else {
        20.0
    }
}

fn build_report(submissions: &[Submission], my_submission: Option<Submission>) -> Report {
    let counted: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.status != SubmissionStatus::Rejected)
        .collect();
    let n = counted.len();

    let avg = |f: &dyn Fn(&Submission) -> f64| -> f64 {
        if n == 0 {
            return 0.0;
        }
        (counted.iter().map(|s| f(s)).sum::<f64>() / n as f64).round()
    };

    let ai_adopters = counted.iter().filter(|s| s.answers.ai_adopted).count();

    let mut arch_counts: BTreeMap<String, usize> = BTreeMap::new();
    for submission in &counted {
        if let Some(arch) = &submission.answers.tax_data_architecture {
            *arch_counts.entry(arch.clone()).or_default() += 1;
        }
    }

    Report {
        total: n,
        averages: Averages {
            calculation_automation: avg(&|s| {
                automation_midpoint(s.answers.tax_calculation_automation_range.as_deref())
            }),
            payment_automation: avg(&|s| {
                automation_midpoint(s.answers.tax_payment_automation_range.as_deref())
            }),
            compliance_automation: avg(&|s| {
                automation_midpoint(s.answers.compliance_automation_coverage_range.as_deref())
            }),
            tech_fte: avg(&|s| tech_fte_estimate(s.answers.tax_tech_ftes_range.as_deref())),
            biz_fte: avg(&|s| biz_fte_estimate(s.answers.tax_business_ftes_range.as_deref())),
            ai_adoption_rate: if n == 0 {
                0.0
            } else {
                (ai_adopters as f64 * 100.0 / n as f64).round()
            },
        },
        architecture: arch_counts
            .into_iter()
            .map(|(name, value)| ArchitectureSlice { name, value })
            .collect(),
        my_submission,
    }
}
