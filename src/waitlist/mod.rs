//! Waitlist submission endpoint.
//!
//! # Data Flow
//! ```text
//! POST /api/waitlist
//!     → submission.rs (deserialize + validate, before any side effect)
//!     → service.rs (re-resolve mode)
//!         api  → POST upstream /waitlist (through the relay if proxying)
//!         mock → notify.rs (email when configured, else one log record)
//! ```
//!
//! # Design Decisions
//! - The facade only decides how to reach this endpoint; this layer decides
//!   what the submission does
//! - Notification failures never fail the submission; the ack carries a warning

pub mod notify;
pub mod service;
pub mod submission;

pub use notify::{notifier_from_config, EmailNotifier, LogNotifier, Notifier, NotifyError};
pub use service::{WaitlistError, WaitlistOutcome, WaitlistService};
pub use submission::{InvalidSubmission, WaitlistSubmission};
