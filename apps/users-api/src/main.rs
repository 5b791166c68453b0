use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Full application router: API routes under `/api`, docs, and `/health`.
async fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server).await?;

    Ok(router.merge(health_router(state.config.app)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let state = AppState::new(config);
    let app = build_app(&state).await?;

    info!(
        "Starting {} v{} on {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.address()
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        {
            let users = state.users.clone();
            async move {
                // Records live only in memory and are dropped with the process
                info!("Discarding {} in-memory user records", users.len().await);
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{AppInfo, Environment, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(Config {
            app: AppInfo {
                name: "users_api",
                version: "0.1.0",
            },
            server: ServerConfig::default(),
            environment: Environment::Development,
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_users_are_served_under_versioned_base_path() {
        let app = build_app(&test_state()).await.unwrap();

        let response = app
            .oneshot(
                Request::get("/api/vr1/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["email"], "joe.jones@gmail.com");
    }

    #[tokio::test]
    async fn test_insert_is_visible_through_app_router() {
        let state = test_state();
        let app = build_app(&state).await.unwrap();

        let request = Request::post("/api/vr1/users")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "firstName": "Anna",
                    "lastName": "Aser",
                    "gender": "FEMALE",
                    "age": 20,
                    "email": "asdfgh@gmail.com"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.users.len().await, 2);

        let response = app
            .oneshot(Request::get("/api/vr1/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_base_path_with_trailing_slash_lists_users() {
        let app = build_app(&test_state()).await.unwrap();

        let response = app
            .oneshot(
                Request::get("/api/vr1/users/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_insert_with_trailing_slash_reaches_handler() {
        let state = test_state();
        let app = build_app(&state).await.unwrap();

        let request = Request::post("/api/vr1/users/")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "firstName": "Anna",
                    "lastName": "Aser",
                    "gender": "FEMALE",
                    "age": 20,
                    "email": "asdfgh@gmail.com"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.users.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_user_returns_literal_not_found_body() {
        let app = build_app(&test_state()).await.unwrap();
        let missing = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

        let response = app
            .oneshot(
                Request::get(format!("/api/vr1/users/{}", missing))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "errorMessage": format!("user {}was nor found", missing) })
        );
    }

    #[tokio::test]
    async fn test_health_reports_app_identity() {
        let app = build_app(&test_state()).await.unwrap();

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "users_api");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_user_paths() {
        let app = build_app(&test_state()).await.unwrap();

        let response = app
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["paths"].get("/vr1/users").is_some());
        assert!(body["paths"].get("/vr1/users/{userUid}").is_some());
    }

    #[tokio::test]
    async fn test_unmatched_path_gets_structured_404() {
        let app = build_app(&test_state()).await.unwrap();

        let response = app
            .oneshot(Request::get("/api/v1/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
