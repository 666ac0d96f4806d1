//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file named by OPENBOARD_CONFIG (loader.rs)
//!     → environment overlay (loader.rs)
//!     → validation.rs (semantic checks, all errors reported)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read-only after startup
//! - All fields have defaults; every external dependency is optional
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, load_from_env, ConfigError};
pub use schema::{
    AppConfig, DataConfig, ListenerConfig, LogFormat, MailConfig, ObservabilityConfig,
    ProxyConfig, SecurityConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
