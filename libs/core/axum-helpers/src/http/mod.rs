//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Trailing-slash normalization
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer("http://localhost:3000")?);
//! ```

pub mod cors;
pub mod normalize;
pub mod security;

pub use cors::create_cors_layer;
pub use normalize::trim_trailing_slash;
pub use security::security_headers;
