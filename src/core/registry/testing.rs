//! In-memory registry used by resolver and batch tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;
use tokio_util::io::StreamReader;

use super::api::{ByteStream, RegistryApi};
use super::model::{FileRecord, ProjectRecord, VersionRecord};
use crate::core::error::{InstallerError, InstallerResult};

#[derive(Default)]
pub struct FakeRegistry {
    projects: HashMap<String, Canned<ProjectRecord>>,
    versions: HashMap<String, Canned<VersionRecord>>,
    files: HashMap<String, Vec<u8>>,
    interrupted: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

/// Stored response; errors are rebuilt on each call since they are not `Clone`.
enum Canned<T> {
    Ok(T),
    NotFound,
    Transport,
    Malformed,
}

impl<T: Clone> Canned<T> {
    fn produce(&self, resource: &str) -> InstallerResult<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::NotFound => Err(InstallerError::NotFound {
                resource: resource.to_string(),
            }),
            Self::Transport => Err(InstallerError::RequestFailed {
                url: format!("fake://{resource}"),
                status: 500,
            }),
            Self::Malformed => Err(InstallerError::Malformed {
                resource: resource.to_string(),
                reason: "missing field".into(),
            }),
        }
    }
}

pub fn file(name: &str, primary: bool) -> FileRecord {
    FileRecord {
        url: format!("fake://files/{name}"),
        filename: name.to_string(),
        primary,
        size: None,
    }
}

pub fn version(
    id: &str,
    game_versions: &[&str],
    loaders: &[&str],
    files: Vec<FileRecord>,
) -> VersionRecord {
    VersionRecord {
        id: id.to_string(),
        version_number: None,
        game_versions: game_versions.iter().map(|s| s.to_string()).collect(),
        loaders: loaders.iter().map(|s| s.to_string()).collect(),
        files,
    }
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, slug: &str, version_ids: &[&str]) -> Self {
        let project = ProjectRecord {
            id: format!("id-{slug}"),
            slug: slug.to_string(),
            title: None,
            versions: version_ids.iter().map(|s| s.to_string()).collect(),
        };
        self.projects.insert(slug.to_string(), Canned::Ok(project));
        self
    }

    pub fn with_project_transport_error(mut self, slug: &str) -> Self {
        self.projects.insert(slug.to_string(), Canned::Transport);
        self
    }

    pub fn with_version(mut self, version: VersionRecord) -> Self {
        self.versions.insert(version.id.clone(), Canned::Ok(version));
        self
    }

    pub fn with_version_transport_error(mut self, id: &str) -> Self {
        self.versions.insert(id.to_string(), Canned::Transport);
        self
    }

    pub fn with_malformed_version(mut self, id: &str) -> Self {
        self.versions.insert(id.to_string(), Canned::Malformed);
        self
    }

    /// Register the bytes served for `file(name, ..)`'s URL.
    pub fn with_file_bytes(mut self, name: &str, bytes: &[u8]) -> Self {
        self.files.insert(format!("fake://files/{name}"), bytes.to_vec());
        self
    }

    /// Serve `bytes` for `file(name, ..)`'s URL, then fail the read as if
    /// the connection dropped.
    pub fn with_interrupted_file(mut self, name: &str, bytes: &[u8]) -> Self {
        self.interrupted
            .insert(format!("fake://files/{name}"), bytes.to_vec());
        self
    }

    /// Every request made so far, e.g. `project:itemlore`, `version:v2`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RegistryApi for FakeRegistry {
    async fn fetch_project(&self, slug: &str) -> InstallerResult<ProjectRecord> {
        self.record(format!("project:{slug}"));
        let resource = format!("project '{slug}'");
        match self.projects.get(slug) {
            Some(entry) => entry.produce(&resource),
            None => Canned::<ProjectRecord>::NotFound.produce(&resource),
        }
    }

    async fn fetch_version(&self, version_id: &str) -> InstallerResult<VersionRecord> {
        self.record(format!("version:{version_id}"));
        let resource = format!("version {version_id}");
        match self.versions.get(version_id) {
            Some(entry) => entry.produce(&resource),
            None => Canned::<VersionRecord>::NotFound.produce(&resource),
        }
    }

    async fn fetch_file_bytes(&self, url: &str) -> InstallerResult<ByteStream> {
        self.record(format!("file:{url}"));
        if let Some(bytes) = self.interrupted.get(url) {
            let chunks = vec![
                Ok(std::io::Cursor::new(bytes.clone())),
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                )),
            ];
            return Ok(Box::pin(StreamReader::new(stream::iter(chunks))));
        }
        match self.files.get(url) {
            Some(bytes) => Ok(Box::pin(std::io::Cursor::new(bytes.clone()))),
            None => Err(InstallerError::RequestFailed {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
