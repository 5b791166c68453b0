use axum::Router;

pub mod users;

/// Base path of the users resource, relative to `/api`.
pub const USERS_PATH: &str = "/vr1/users";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(USERS_PATH, users::router(state))
}
