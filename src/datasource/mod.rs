//! Data access facade.
//!
//! # Data Flow
//! ```text
//! page / handler / CLI
//!     → facade.rs (resolve mode once per operation)
//!         mock → fixtures.rs
//!         api  → upstream::Endpoints → HTTP GET → Envelope<T> → data or fallback
//!     → submit_waitlist always → internal /api/waitlist endpoint
//! ```
//!
//! # Design Decisions
//! - Mode is injected as a `ModeProvider`, never read from globals
//! - Absent `data` is an explicit fallback (empty list, no profile)
//! - Upstream failures keep their status and body

pub mod error;
pub mod facade;
pub mod fixtures;
pub mod types;

pub use error::DataError;
pub use facade::DataSource;
pub use types::{Ack, Envelope, Profile, Project};
