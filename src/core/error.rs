use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the installer backend.
/// Every module returns `Result<T, InstallerError>`; the resolver is the
/// only place where errors are folded into a per-mod outcome.
#[derive(Debug, Error)]
pub enum InstallerError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed for {url}: HTTP {status}")]
    RequestFailed { url: String, status: u16 },

    #[error("Transfer interrupted for {url}: {source}")]
    Stream {
        url: String,
        source: std::io::Error,
    },

    // ── Registry ────────────────────────────────────────
    #[error("Not found on registry: {resource}")]
    NotFound { resource: String },

    #[error("Malformed response for {resource}: {reason}")]
    Malformed { resource: String, reason: String },

    // ── Setup ───────────────────────────────────────────
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Convenience alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Coarse classification used to decide skip-vs-abort and to pick the
/// reason code reported for a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
    NotFound,
    Io,
}

impl InstallerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InstallerError::Io { .. } => ErrorKind::Io,
            InstallerError::NotFound { .. } => ErrorKind::NotFound,
            InstallerError::Malformed { .. } => ErrorKind::MalformedResponse,
            InstallerError::Http(_)
            | InstallerError::RequestFailed { .. }
            | InstallerError::Stream { .. }
            | InstallerError::InvalidUrl(_) => ErrorKind::Transport,
        }
    }
}

impl From<std::io::Error> for InstallerError {
    fn from(source: std::io::Error) -> Self {
        InstallerError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
