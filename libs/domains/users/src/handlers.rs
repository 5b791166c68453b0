use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, UuidPath,
    errors::responses::{BadRequestUuidResponse, InternalServerErrorResponse},
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ErrorMessage, UserError, UserResult};
use crate::models::{Gender, User, UserPayload};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(get_all_users, get_user, insert_user, update_user),
    components(
        schemas(User, UserPayload, Gender, ErrorMessage),
        responses(BadRequestUuidResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router.
///
/// Deletion is a service capability only; no route exposes it.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_all_users).post(insert_user).put(update_user))
        .route("/{userUid}", get(get_user))
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.get_all_users().await?;
    Ok(Json(users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{userUid}",
    tag = TAG,
    params(
        ("userUid" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, description = "User not found", body = ErrorMessage,
            example = json!({ "errorMessage": "user 3fa85f64-5717-4562-b3fc-2c963f66afa6was nor found" })),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(user_uid): UuidPath,
) -> UserResult<Json<User>> {
    service
        .get_user(user_uid)
        .await?
        .map(Json)
        .ok_or(UserError::NotFound(user_uid))
}

/// Insert a new user; the server assigns its identifier
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserPayload,
    responses(
        (status = 200, description = "User inserted"),
        (status = 400, description = "User was not inserted"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn insert_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    Json(payload): Json<UserPayload>,
) -> UserResult<StatusCode> {
    let (count, user_uid) = service.insert_user_returning_uid(payload).await?;
    mutation_audit_event("user.create", Some(user_uid), count, &headers).log();

    if count != 1 {
        return Err(UserError::MutationRejected);
    }
    Ok(StatusCode::OK)
}

/// Replace an existing user identified by the body's `userUid`
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "userUid missing or unknown"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    Json(payload): Json<UserPayload>,
) -> UserResult<StatusCode> {
    let user_uid = payload.user_uid;
    let count = service.update_user(payload).await?;
    mutation_audit_event("user.update", user_uid, count, &headers).log();

    if count != 1 {
        return Err(UserError::MutationRejected);
    }
    Ok(StatusCode::OK)
}

/// Audit record for an insert or update. Only the resource id is recorded,
/// never payload fields.
fn mutation_audit_event(
    action: &str,
    user_uid: Option<Uuid>,
    affected: usize,
    headers: &HeaderMap,
) -> AuditEvent {
    let outcome = if affected == 1 {
        AuditOutcome::Success
    } else {
        AuditOutcome::Failure
    };

    let event = AuditEvent::new(action, user_uid.map(|id| format!("user:{}", id)), outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers));

    match outcome {
        AuditOutcome::Success => event,
        AuditOutcome::Failure => event.with_details(json!({ "affected": affected })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_successful_mutation_audit_records_resource_only() {
        let user_uid = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));

        let event = mutation_audit_event("user.create", Some(user_uid), 1, &headers);

        assert_eq!(event.action, "user.create");
        assert_eq!(event.outcome, AuditOutcome::Success);
        assert_eq!(event.resource, Some(format!("user:{}", user_uid)));
        assert_eq!(event.ip_address.as_deref(), Some("10.0.0.2"));
        assert!(event.details.is_none());
    }

    #[test]
    fn test_rejected_update_is_audited_as_failure() {
        let event = mutation_audit_event("user.update", None, 0, &HeaderMap::new());

        assert_eq!(event.outcome, AuditOutcome::Failure);
        assert_eq!(event.resource, None);
        assert_eq!(event.details, Some(json!({ "affected": 0 })));
    }

    #[test]
    fn test_audit_event_carries_no_payload_fields() {
        let event = mutation_audit_event("user.create", Some(Uuid::new_v4()), 1, &HeaderMap::new());
        let json = serde_json::to_string(&event).unwrap();

        assert!(!json.contains("email"));
        assert!(!json.contains("firstName"));
    }
}
