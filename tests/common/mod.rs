//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use openboard::config::AppConfig;
use openboard::http::{AppState, HttpServer};
use openboard::waitlist::LogNotifier;
use openboard::Shutdown;

/// A server running on an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), io::Error>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Defaults with a loopback bind address.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

/// Start the app. `app_origin` is pointed at the bound address so that
/// proxy-mode calls come back to this same server.
pub async fn spawn_app(mut config: AppConfig) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    if config.data.app_origin.is_none() {
        config.data.app_origin = Some(format!("http://{}", addr));
    }

    let state = AppState::with_notifier(config, reqwest::Client::new(), Arc::new(LogNotifier));
    let server = HttpServer::with_state(state);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, rx));

    TestApp {
        addr,
        shutdown,
        handle,
    }
}

/// In-memory log sink for asserting on emitted records.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Subscriber writing plain-text records into `buffer`.
pub fn capture_logs(buffer: &LogBuffer) -> tracing::subscriber::DefaultGuard {
    let buffer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || buffer.clone())
        .finish();
    tracing::subscriber::set_default(subscriber)
}
