use std::fmt;
use std::path::PathBuf;

use crate::core::error::{ErrorKind, InstallerError};

/// Result of resolving one mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Downloaded(DownloadRecord),
    Unresolved(Unresolved),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub project_id: String,
    pub version_id: String,
    pub filename: String,
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Why nothing (or not everything) was written for a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    NotFound {
        slug: String,
    },
    Transport {
        message: String,
    },
    MalformedResponse {
        message: String,
    },
    NoVersionsPublished {
        slug: String,
    },
    NoMatchingVersion {
        project_id: String,
        game_version: String,
        loader: String,
    },
    NoFilesListed {
        version_id: String,
    },
    Io {
        message: String,
    },
}

/// Stable reason codes, one per `Unresolved` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    NotFound,
    TransportError,
    MalformedResponse,
    NoVersionsPublished,
    NoMatchingVersion,
    NoFilesListed,
    IoError,
}

impl Unresolved {
    /// Map a registry or disk error for `slug` onto a reason.
    pub fn from_error(slug: &str, err: &InstallerError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Unresolved::NotFound {
                slug: slug.to_string(),
            },
            ErrorKind::Transport => Unresolved::Transport {
                message: err.to_string(),
            },
            ErrorKind::MalformedResponse => Unresolved::MalformedResponse {
                message: err.to_string(),
            },
            ErrorKind::Io => Unresolved::Io {
                message: err.to_string(),
            },
        }
    }

    pub fn code(&self) -> ReasonCode {
        match self {
            Unresolved::NotFound { .. } => ReasonCode::NotFound,
            Unresolved::Transport { .. } => ReasonCode::TransportError,
            Unresolved::MalformedResponse { .. } => ReasonCode::MalformedResponse,
            Unresolved::NoVersionsPublished { .. } => ReasonCode::NoVersionsPublished,
            Unresolved::NoMatchingVersion { .. } => ReasonCode::NoMatchingVersion,
            Unresolved::NoFilesListed { .. } => ReasonCode::NoFilesListed,
            Unresolved::Io { .. } => ReasonCode::IoError,
        }
    }

    /// `false` for the "nothing to do" outcomes, which are reported but not alarming.
    pub fn is_error(&self) -> bool {
        !matches!(
            self,
            Unresolved::NoVersionsPublished { .. }
                | Unresolved::NoMatchingVersion { .. }
                | Unresolved::NoFilesListed { .. }
        )
    }
}

impl ResolutionOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, ResolutionOutcome::Downloaded(_))
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            ResolutionOutcome::Downloaded(_) => None,
            ResolutionOutcome::Unresolved(u) => Some(u.code()),
        }
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NotFound { slug } => write!(f, "Project '{slug}' was not found"),
            Unresolved::Transport { message } => write!(f, "Registry request failed: {message}"),
            Unresolved::MalformedResponse { message } => {
                write!(f, "Registry returned an unexpected response: {message}")
            }
            Unresolved::NoVersionsPublished { slug } => {
                write!(f, "No version IDs found for project '{slug}'")
            }
            Unresolved::NoMatchingVersion {
                project_id,
                game_version,
                loader,
            } => write!(
                f,
                "No version of {project_id} found matching game version '{game_version}' and loader '{loader}'"
            ),
            Unresolved::NoFilesListed { version_id } => {
                write!(f, "Matching version {version_id} lists no files")
            }
            Unresolved::Io { message } => write!(f, "Could not write file: {message}"),
        }
    }
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Downloaded(record) => write!(
                f,
                "Downloaded {} (version {}, {} bytes)",
                record.filename, record.version_id, record.bytes_written
            ),
            ResolutionOutcome::Unresolved(reason) => write!(f, "{reason}"),
        }
    }
}
