//! # Axum Helpers
//!
//! Utilities shared by the Axum services in this workspace.
//!
//! - **[`errors`]**: structured error responses ([`AppError`], [`ErrorResponse`])
//! - **[`stream`]**: incremental JSON array responses ([`JsonArrayStream`])
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown

pub mod errors;
pub mod server;
pub mod stream;

pub use errors::{AppError, ErrorResponse};
pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};
pub use stream::JsonArrayStream;
