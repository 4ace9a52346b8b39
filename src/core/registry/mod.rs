pub mod api;
pub mod client;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ByteStream, RegistryApi};
pub use client::ModrinthClient;
pub use model::{FileRecord, ProjectRecord, VersionRecord};
