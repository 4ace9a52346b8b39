use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::matching::{select_file, version_matches};
use super::outcome::{DownloadRecord, ResolutionOutcome, Unresolved};
use super::reference::{ModReference, ModRequest};
use crate::core::downloader::Downloader;
use crate::core::error::InstallerResult;
use crate::core::http::build_http_client;
use crate::core::registry::{ModrinthClient, ProjectRecord, RegistryApi, VersionRecord};
use crate::core::state::InstallerSettings;

/// Finds the newest build of a mod for a game version and downloads it.
pub struct Resolver {
    registry: Arc<dyn RegistryApi>,
    downloader: Downloader,
}

impl Resolver {
    pub fn new(registry: Arc<dyn RegistryApi>) -> Self {
        Self {
            registry,
            downloader: Downloader::new(),
        }
    }

    /// Resolver backed by the Modrinth API described in `settings`.
    pub fn from_settings(settings: &InstallerSettings) -> InstallerResult<Self> {
        let http = build_http_client(settings)?;
        let client = ModrinthClient::new(http, &settings.api_base_url)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Resolve one request. Never fails: every problem becomes an outcome.
    pub async fn resolve(&self, request: &ModRequest) -> ResolutionOutcome {
        let reference = request.reference();

        if reference.slug.is_empty() {
            warn!("Empty slug after normalizing {:?}", request.slug);
            return ResolutionOutcome::Unresolved(Unresolved::NotFound {
                slug: request.slug.clone(),
            });
        }

        // 1️⃣ Project
        let project = match self.registry.fetch_project(&reference.slug).await {
            Ok(project) => project,
            Err(err) => {
                error!("Project request failed for '{}': {}", reference.slug, err);
                return ResolutionOutcome::Unresolved(Unresolved::from_error(
                    &reference.slug,
                    &err,
                ));
            }
        };
        info!(
            "Project {} ({}) lists {} versions",
            project.display_id(),
            project.title.as_deref().unwrap_or(&reference.slug),
            project.versions.len()
        );

        if project.versions.is_empty() {
            warn!("No version IDs found in project '{}'", reference.slug);
            return ResolutionOutcome::Unresolved(Unresolved::NoVersionsPublished {
                slug: reference.slug,
            });
        }

        // 2️⃣ Destination; a failure here only matters once we try to write
        if let Err(err) = tokio::fs::create_dir_all(&request.destination).await {
            warn!(
                "Cannot create destination {:?}: {}",
                request.destination, err
            );
        }

        // 3️⃣ Newest matching version
        let Some(version) = self.find_matching_version(&project, &reference).await else {
            info!(
                "No version of '{}' matches game version '{}' and loader '{}'",
                reference.slug, reference.game_version, reference.loader
            );
            return ResolutionOutcome::Unresolved(Unresolved::NoMatchingVersion {
                project_id: project.display_id().to_string(),
                game_version: reference.game_version,
                loader: reference.loader.to_string(),
            });
        };

        // 4️⃣ File selection; the match is consumed even if it has no files
        let Some(file) = select_file(&version.files) else {
            warn!("Empty files array for version ID {}", version.id);
            return ResolutionOutcome::Unresolved(Unresolved::NoFilesListed {
                version_id: version.id,
            });
        };
        if file.filename.is_empty() {
            error!("Selected file of version {} has no filename", version.id);
            return ResolutionOutcome::Unresolved(Unresolved::MalformedResponse {
                message: format!("version {}: selected file has an empty filename", version.id),
            });
        }
        info!("Download URL: {}", file.url);
        match file.size {
            Some(size) => info!("Filename: {} ({} bytes)", file.filename, size),
            None => info!("Filename: {}", file.filename),
        }

        // 5️⃣ Transfer
        match self
            .downloader
            .download_file(self.registry.as_ref(), file, &request.destination)
            .await
        {
            Ok(downloaded) => {
                info!("Successfully downloaded {}", file.filename);
                ResolutionOutcome::Downloaded(DownloadRecord {
                    project_id: project.display_id().to_string(),
                    version_id: version.id.clone(),
                    filename: file.filename.clone(),
                    path: downloaded.path,
                    bytes_written: downloaded.bytes_written,
                })
            }
            Err(err) => {
                error!("Failed to download {}: {}", file.filename, err);
                ResolutionOutcome::Unresolved(Unresolved::from_error(&reference.slug, &err))
            }
        }
    }

    /// Walk the version ids newest-first and return the first match.
    /// Versions that fail to load are skipped.
    async fn find_matching_version(
        &self,
        project: &ProjectRecord,
        reference: &ModReference,
    ) -> Option<VersionRecord> {
        for version_id in project.versions.iter().rev() {
            let version = match self.registry.fetch_version(version_id).await {
                Ok(version) => version,
                Err(err) => {
                    warn!("Skipping version {}: {}", version_id, err);
                    continue;
                }
            };

            if version_matches(&version, &reference.game_version, reference.loader) {
                info!(
                    "Found matching version ID: {} ({})",
                    version_id,
                    version.version_number.as_deref().unwrap_or("unnamed")
                );
                return Some(version);
            }

            debug!(
                "Version {} does not support {} on {}",
                version_id, reference.game_version, reference.loader
            );
        }

        None
    }
}
