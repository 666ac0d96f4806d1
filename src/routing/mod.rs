//! Proxy path policy.
//!
//! # Data Flow
//! ```text
//! /api/proxy/{*path}
//!     → policy.rs (reject dot segments, apply allow-list)
//!     → matcher.rs (segment-aware prefix matching)
//!     → Forwarder, or an explicit rejection
//! ```
//!
//! # Design Decisions
//! - Empty allow-list keeps the relay a plain pass-through
//! - Policy compiled at startup, immutable at runtime
//! - No regex: prefix matching only

pub mod matcher;
pub mod policy;

pub use policy::{PathRejection, ProxyPathPolicy};
