//! SnapSolve HTTP gateway.
//!
//! One inbound operation: `POST /analyze` with a multipart image upload,
//! answered with `{"result": ...}` or `{"error": ...}`. Plus a health
//! endpoint and permissive CORS for browser frontends.

pub mod analyze;
pub mod health;
pub mod server;

pub use server::{build_router, start_server, GatewayState};
