//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → body limit (tower-http, security.max_body_size)
//!     → handlers
//! Outgoing response:
//!     → headers.rs (nosniff, frame and referrer policy)
//! ```

pub mod headers;
