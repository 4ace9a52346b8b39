// ─── ModInstaller Core ───
// Resolve a Modrinth slug to a Fabric build for one game version and put the
// file on disk.
//
// Architecture:
//   core/
//     registry/   — Modrinth API client + record types
//     resolver/   — Slug normalization, version scan, file selection
//     downloader/ — Buffered stream-to-disk copy
//     state/      — Installer settings
//     http        — Shared reqwest client builder

pub mod downloader;
pub mod error;
pub mod http;
pub mod registry;
pub mod resolver;
pub mod state;
