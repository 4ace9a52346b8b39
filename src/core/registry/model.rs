// ─── Registry Records ───
// Typed views of the Modrinth v2 project and version documents. Only the
// fields the resolver reads are modelled; everything else is ignored.

use serde::Deserialize;

/// A project (mod) as returned by `GET /v2/project/{slug}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Version ids, oldest first.
    pub versions: Vec<String>,
}

impl ProjectRecord {
    /// Best identifier for log lines: id, then slug.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            &self.slug
        } else {
            &self.id
        }
    }
}

/// One published build as returned by `GET /v2/version/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRecord {
    pub id: String,
    #[serde(default)]
    pub version_number: Option<String>,
    pub game_versions: Vec<String>,
    pub loaders: Vec<String>,
    pub files: Vec<FileRecord>,
}

/// A downloadable artifact of a version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub size: Option<u64>,
}
