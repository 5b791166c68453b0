use axum::Router;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Wraps a router so `/users/` and `/users` route the same.
///
/// The trailing slash is trimmed before routing; `Router::layer` middleware
/// only runs after a route was matched. Keep it off routers serving the docs
/// UIs, which redirect `/swagger-ui` to `/swagger-ui/`.
pub fn trim_trailing_slash(router: Router) -> Router {
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(router))
}
