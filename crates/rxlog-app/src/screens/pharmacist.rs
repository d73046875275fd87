use rxlog_auth::Session;
use rxlog_core::models::{Intervention, Outcome, RiskLevel};
use rxlog_core::stats::{self, Distribution, Summary};
use rxlog_storage::{Backend, DocumentStore};
use serde::Serialize;

use crate::error::AppError;

/// Entries shown in the dashboard's recent activity strip.
pub const RECENT_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub full_name: String,
    #[serde(flatten)]
    pub summary: Summary,
    pub recent: Vec<Intervention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub total_interventions: usize,
    pub outcomes: Distribution<Outcome>,
    pub risks: Distribution<RiskLevel>,
}

pub async fn dashboard<S: DocumentStore>(
    backend: &Backend<S>,
    session: &Session,
) -> Result<DashboardView, AppError> {
    let interventions = backend.list_interventions(Some(session.user_id())).await?;
    Ok(DashboardView {
        full_name: session.user.full_name.clone(),
        summary: Summary::of(&interventions),
        recent: stats::recent(&interventions, RECENT_COUNT).to_vec(),
    })
}

pub async fn analytics<S: DocumentStore>(
    backend: &Backend<S>,
    session: &Session,
) -> Result<AnalyticsView, AppError> {
    let interventions = backend.list_interventions(Some(session.user_id())).await?;
    Ok(AnalyticsView {
        total_interventions: interventions.len(),
        outcomes: stats::outcome_distribution(&interventions),
        risks: stats::risk_distribution(&interventions),
    })
}

/// The session user's own interventions, newest first.
pub async fn interventions<S: DocumentStore>(
    backend: &Backend<S>,
    session: &Session,
) -> Result<Vec<Intervention>, AppError> {
    Ok(backend.list_interventions(Some(session.user_id())).await?)
}
