//! Administrator screens.
//!
//! Every fetch here takes an [`Admin`] proof, obtained from
//! [`authorize`], so a pharmacist session is turned away before any request
//! reaches the backend.

use std::collections::HashMap;

use rxlog_auth::Session;
use rxlog_core::leaderboard::{self, LeaderboardEntry};
use rxlog_core::models::{Intervention, Role, User};
use rxlog_core::stats::AdminSummary;
use rxlog_storage::{Backend, DocumentStore};
use serde::Serialize;

use crate::error::AppError;
use crate::notice::Notice;
use crate::screens::Screen;

/// Placeholder for an owner or medication that no longer resolves.
pub const UNKNOWN: &str = "Unknown";

/// A session known to belong to an administrator.
#[derive(Debug, Clone, Copy)]
pub struct Admin<'a> {
    session: &'a Session,
}

impl Admin<'_> {
    pub fn session(&self) -> &Session {
        self.session
    }
}

pub fn authorize(session: &Session) -> Result<Admin<'_>, AppError> {
    if !session.is_administrator() {
        tracing::warn!(
            user_id = %session.user_id(),
            role = %session.role(),
            "admin screen refused"
        );
        return Err(AppError::AccessDenied {
            required: Role::Administrator,
        });
    }
    Ok(Admin { session })
}

/// An intervention with its owner and medications resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionRow {
    #[serde(flatten)]
    pub intervention: Intervention,
    pub pharmacist_name: String,
    pub medication_names: Vec<String>,
}

pub async fn dashboard<S: DocumentStore>(
    backend: &Backend<S>,
    _admin: &Admin<'_>,
) -> Result<AdminSummary, AppError> {
    let (interventions, users) =
        tokio::try_join!(backend.list_interventions(None), backend.list_users())?;
    Ok(AdminSummary::of(&interventions, &users))
}

pub async fn interventions<S: DocumentStore>(
    backend: &Backend<S>,
    _admin: &Admin<'_>,
) -> Result<Vec<InterventionRow>, AppError> {
    let (interventions, users, medications) = tokio::try_join!(
        backend.list_interventions(None),
        backend.list_users(),
        backend.list_medications(),
    )?;

    let user_names: HashMap<&str, &str> = users
        .iter()
        .map(|u| (u.id.as_str(), u.full_name.as_str()))
        .collect();
    let medication_names: HashMap<&str, &str> = medications
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();

    Ok(interventions
        .into_iter()
        .map(|intervention| {
            let pharmacist_name = user_names
                .get(intervention.user_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN)
                .to_string();
            let medication_names = intervention
                .medication_ids
                .iter()
                .map(|id| medication_names.get(id.as_str()).copied().unwrap_or(UNKNOWN).to_string())
                .collect();
            InterventionRow {
                intervention,
                pharmacist_name,
                medication_names,
            }
        })
        .collect())
}

pub async fn users<S: DocumentStore>(
    backend: &Backend<S>,
    _admin: &Admin<'_>,
) -> Result<Vec<User>, AppError> {
    Ok(backend.list_users().await?)
}

pub async fn leaderboard<S: DocumentStore>(
    backend: &Backend<S>,
    _admin: &Admin<'_>,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let (interventions, users) =
        tokio::try_join!(backend.list_interventions(None), backend.list_users())?;
    Ok(leaderboard::rank(&users, &interventions))
}

/// Give `user_id` the `role`, then reload the user list.
pub async fn set_role<S: DocumentStore>(
    backend: &Backend<S>,
    admin: &Admin<'_>,
    screen: &mut Screen<Vec<User>>,
    user_id: &str,
    role: Role,
) -> Notice {
    match backend.update_user_role(user_id, role).await {
        Ok(()) => {
            tracing::info!(
                admin_id = %admin.session().user_id(),
                user_id = %user_id,
                role = %role,
                "role changed"
            );
            screen.load(users(backend, admin)).await;
            Notice::success("Role Updated", format!("User role changed to {role}"))
        }
        Err(e) => Notice::from_error(&AppError::from(e), "Failed to update role"),
    }
}

/// Switch a user between pharmacist and administrator.
pub async fn toggle_role<S: DocumentStore>(
    backend: &Backend<S>,
    admin: &Admin<'_>,
    screen: &mut Screen<Vec<User>>,
    user: &User,
) -> Notice {
    set_role(backend, admin, screen, &user.id, user.role.toggled()).await
}

/// Add a medication to the catalogue offered by the intervention form.
pub async fn add_medication<S: DocumentStore>(
    backend: &Backend<S>,
    _admin: &Admin<'_>,
    name: &str,
) -> (Notice, Option<String>) {
    let name = name.trim();
    if name.is_empty() {
        let e = AppError::Validation("Medication name cannot be empty".to_string());
        return (Notice::from_error(&e, "Failed to add medication"), None);
    }

    match backend.create_medication(name).await {
        Ok(id) => (
            Notice::success("Success", format!("{name} added")),
            Some(id),
        ),
        Err(e) => (
            Notice::from_error(&AppError::from(e), "Failed to add medication"),
            None,
        ),
    }
}
