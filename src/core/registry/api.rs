use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::model::{ProjectRecord, VersionRecord};
use crate::core::error::InstallerResult;

/// Readable body of an artifact download. The caller drains and drops it.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// The three requests the resolver needs from a mod registry.
///
/// Implementations never retry; every failure goes straight back to the
/// caller, which decides whether to skip the candidate or give up on the mod.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Project metadata for an already-normalized slug.
    async fn fetch_project(&self, slug: &str) -> InstallerResult<ProjectRecord>;

    /// Metadata for a single published version.
    async fn fetch_version(&self, version_id: &str) -> InstallerResult<VersionRecord>;

    /// Open the byte stream of an artifact.
    async fn fetch_file_bytes(&self, url: &str) -> InstallerResult<ByteStream>;
}
