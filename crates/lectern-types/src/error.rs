//! Error types for LECTERN.

use std::io;

/// Errors produced while loading LECTERN inputs.
///
/// The coordination core itself never fails; these only arise at the
/// boundary where configuration, outlines and event scripts are read.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error("config error: {0}")]
    Config(String),

    #[error("outline error: {0}")]
    Outline(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LecternError>;
