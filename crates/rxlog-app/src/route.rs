use rxlog_auth::Session;
use serde::Serialize;

/// Screens the application can open on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    PharmacistDashboard,
    Profile,
    AdminDashboard,
}

/// The first screen after start-up or sign-in. Pharmacists who have never
/// completed their profile are sent there before anything else.
pub fn landing_route(session: Option<&Session>) -> Route {
    match session {
        None => Route::Login,
        Some(s) if s.is_administrator() => Route::AdminDashboard,
        Some(s) if !s.user.profile_completed => Route::Profile,
        Some(_) => Route::PharmacistDashboard,
    }
}
