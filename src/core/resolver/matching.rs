use crate::core::registry::{FileRecord, VersionRecord};

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn contains_ignore_case(values: &[String], wanted: &str) -> bool {
    values.iter().any(|v| eq_ignore_case(v, wanted))
}

/// A version matches when it lists both the game version and the loader.
pub fn version_matches(version: &VersionRecord, game_version: &str, loader: &str) -> bool {
    contains_ignore_case(&version.game_versions, game_version)
        && contains_ignore_case(&version.loaders, loader)
}

/// First file flagged primary, else the first file. `None` when empty.
pub fn select_file(files: &[FileRecord]) -> Option<&FileRecord> {
    files.iter().find(|f| f.primary).or_else(|| files.first())
}
