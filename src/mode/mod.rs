//! Data-mode resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → cookie.rs (read `ob_datamode` override from the cookie jar)
//!     → resolver.rs (override > process default → DataMode)
//!     → handed to the data facade as a `ModeProvider`
//!
//! Mode switch:
//!     client → POST /api/datamode → Set-Cookie: ob_datamode=<mode>
//!     switch.rs keeps the same override on the client side
//! ```
//!
//! # Design Decisions
//! - Resolution is total: an unknown override or default degrades to `mock`
//! - Providers are injected at call time, never read from globals
//! - Each facade operation resolves exactly once, so a switch never races
//!   with a read already in flight

pub mod cookie;
pub mod resolver;
pub mod switch;

pub use cookie::{override_cookie, read_override, MODE_COOKIE};
pub use resolver::{DataMode, InvalidMode, ModeProvider, RequestMode};
pub use switch::{ModeSwitch, SwitchError};
