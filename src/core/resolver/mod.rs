pub mod matching;
pub mod outcome;
pub mod pipeline;
pub mod reference;

pub use outcome::{DownloadRecord, ReasonCode, ResolutionOutcome, Unresolved};
pub use pipeline::Resolver;
pub use reference::{normalize_slug, ModReference, ModRequest, TARGET_LOADER};
