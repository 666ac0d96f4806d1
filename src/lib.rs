//! OpenBoard data layer: mock/api mode resolution, same-origin upstream relay
//! and the data access facade.

pub mod config;
pub mod datasource;
pub mod http;
pub mod lifecycle;
pub mod mode;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;
pub mod waitlist;

pub use config::schema::AppConfig;
pub use datasource::DataSource;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mode::{DataMode, ModeProvider, ModeSwitch};
