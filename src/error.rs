//! Crate-level error types.

use std::fmt;

/// Errors produced by the protview crate.
///
/// None of these are fatal to the host: each one aborts only the call that
/// produced it.
#[derive(Debug)]
pub enum ProtviewError {
    /// A canvas or container id did not resolve to a host surface.
    MissingTarget(String),
    /// A visualization option is out of range or unrecognized.
    InvalidOption(String),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ProtviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget(id) => {
                write!(f, "render target not found: {id}")
            }
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ProtviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProtviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
