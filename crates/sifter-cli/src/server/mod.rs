//! HTTP API and embedded web UI.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

/// Default request body limit for uploads.
pub const DEFAULT_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Server settings taken from the command line.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}
