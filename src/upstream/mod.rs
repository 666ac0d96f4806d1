//! Upstream backend access.
//!
//! # Data Flow
//! ```text
//! configuration (data.api_base_url)
//!     → base.rs (normalize, or report unconfigured)
//!     → endpoint.rs (direct `{base}/path` or same-origin `{origin}{prefix}/path`)
//!     → forwarder.rs (dumb relay for /api/proxy/*)
//! ```
//!
//! # Design Decisions
//! - "Unconfigured" is an expected state, not a startup failure
//! - Exactly one upstream call per relay; no retries, no timeout override
//! - Upstream status, body and content-type are never rewritten

pub mod base;
pub mod endpoint;
pub mod forwarder;

pub use base::{ApiBase, Unconfigured};
pub use endpoint::Endpoints;
pub use forwarder::{ForwardError, ForwardRequest, Forwarder, UpstreamResponse};
