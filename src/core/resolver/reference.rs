use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

/// The only loader this installer fetches builds for.
pub const TARGET_LOADER: &str = "fabric";

static MODRINTH_URL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?modrinth\.com/mod/").expect("valid prefix regex")
});

/// One entry of a batch, built by the front-end and handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRequest {
    pub slug: String,
    pub game_version: String,
    pub destination: PathBuf,
}

impl ModRequest {
    pub fn new(
        slug: impl Into<String>,
        game_version: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            slug: slug.into(),
            game_version: game_version.into(),
            destination: destination.into(),
        }
    }

    pub fn reference(&self) -> ModReference {
        ModReference {
            slug: normalize_slug(&self.slug),
            game_version: self.game_version.trim().to_string(),
            loader: TARGET_LOADER,
        }
    }
}

/// A normalized request: bare slug, target game version and loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModReference {
    pub slug: String,
    pub game_version: String,
    pub loader: &'static str,
}

/// Strip surrounding whitespace and an optional `modrinth.com/mod/` URL
/// prefix (scheme and `www.` optional, case-insensitive).
pub fn normalize_slug(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = MODRINTH_URL_PREFIX.replace(trimmed, "");
    stripped.trim().trim_end_matches('/').to_string()
}
