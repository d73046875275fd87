use rxlog_auth::{AuthProvider, Session};
use rxlog_core::models::ProfileUpdate;
use rxlog_storage::DocumentStore;

use crate::context::AppContext;
use crate::error::AppError;
use crate::notice::Notice;

/// Save a new display name and mark the profile as completed, then reload
/// the user record into `session` and persist it.
pub async fn update_profile<A: AuthProvider, S: DocumentStore>(
    ctx: &AppContext<A, S>,
    session: &mut Session,
    full_name: &str,
) -> Notice {
    match try_update_profile(ctx, session, full_name).await {
        Ok(()) => Notice::success("Success", "Profile updated successfully"),
        Err(e) => Notice::from_error(&e, "Failed to update profile"),
    }
}

async fn try_update_profile<A: AuthProvider, S: DocumentStore>(
    ctx: &AppContext<A, S>,
    session: &mut Session,
    full_name: &str,
) -> Result<(), AppError> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let update = ProfileUpdate {
        full_name: Some(full_name.to_string()),
        profile_completed: Some(true),
    };
    ctx.backend
        .update_user_profile(session.user_id(), &update)
        .await?;

    session.user = ctx.backend.get_user(session.user_id()).await?;
    ctx.sessions.save(session)?;
    Ok(())
}
