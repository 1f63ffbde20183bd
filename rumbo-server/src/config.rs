//! Server configuration.
//!
//! Values come from `RUMBOS_*` environment variables, falling back to the
//! defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Attribution line printed in the header of every exported document.
pub const DEFAULT_HEADER_TEXT: &str =
    "Este programa fue creado por Honduras Constructores S de R L";

/// Errors from reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Bind address could not be parsed
    #[error("invalid {key}: {value:?} is not a socket address")]
    InvalidAddress { key: &'static str, value: String },

    /// Boolean flag could not be parsed
    #[error("invalid {key}: {value:?} (expected true/false, 1/0, on/off)")]
    InvalidFlag { key: &'static str, value: String },
}

/// Runtime configuration for the web server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// PNG logo for exported documents. A missing file means no logo.
    pub logo_path: PathBuf,

    /// Attribution line for exported documents.
    pub header_text: String,

    /// Whether DOCX export is offered.
    pub export_enabled: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("RUMBOS_BIND") {
            Some(value) => value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddress {
                    key: "RUMBOS_BIND",
                    value,
                })?,
            None => defaults.bind_addr,
        };

        let static_dir = get("RUMBOS_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let logo_path = get("RUMBOS_LOGO")
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join("logo_hc.png"));

        let header_text = get("RUMBOS_HEADER_TEXT").unwrap_or(defaults.header_text);

        let export_enabled = match get("RUMBOS_DOCX") {
            Some(value) => parse_flag("RUMBOS_DOCX", value)?,
            None => defaults.export_enabled,
        };

        Ok(Self {
            bind_addr,
            static_dir,
            logo_path,
            header_text,
            export_enabled,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
            logo_path: PathBuf::from("static/logo_hc.png"),
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            export_enabled: true,
        }
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { key, value }),
    }
}
