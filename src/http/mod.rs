//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, per-request data mode)
//!     → handlers.rs (datamode, projects, profile, waitlist, proxy, status)
//!     → response.rs (error → status code + `{ "error": ... }`)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
