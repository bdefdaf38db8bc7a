//! Configuration data structures for recipebox.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the document store connection, logging, and API behavior.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging and output format settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Response behavior of the recipe endpoints.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, in bytes.
    /// Default: `1048576` (1 MiB)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Settings for the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string. `memory://` opens an in-memory SQLite database,
    /// `file:///path/recipes.db` opens (or creates) a database file.
    /// Default: `memory://`
    #[serde(default = "default_database_url")]
    pub url: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for recipe endpoint responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Answer 404 when update or delete matches no record, instead of the
    /// regular success body.
    /// Default: `false`
    #[serde(default)]
    pub strict_writes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_database_url() -> String {
    "memory://".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
