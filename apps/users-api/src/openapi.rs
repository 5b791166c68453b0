use axum_helpers::ErrorResponse;
use utoipa::OpenApi;

/// Combined OpenAPI document for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "In-memory user management service"
    ),
    nest(
        (path = "/vr1/users", api = domain_users::ApiDoc)
    ),
    components(schemas(ErrorResponse)),
    servers((url = "/api"))
)]
pub struct ApiDoc;
