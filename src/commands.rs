// ─── Batch Commands ───
// The boundary front-ends talk to: turn raw input into requests, run them one
// after another and report progress as an ordered stream of events.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::resolver::{ModRequest, ResolutionOutcome, Resolver};

/// Progress notifications for a batch, delivered in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        index: usize,
        total: usize,
        slug: String,
    },
    Finished {
        index: usize,
        total: usize,
        slug: String,
        outcome: ResolutionOutcome,
    },
    Completed(BatchSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub downloaded: usize,
    /// Nothing to do: no versions, no match, no files.
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ResolutionOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            match outcome {
                ResolutionOutcome::Downloaded(_) => acc.downloaded += 1,
                ResolutionOutcome::Unresolved(u) if u.is_error() => acc.failed += 1,
                ResolutionOutcome::Unresolved(_) => acc.skipped += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

pub type EventSender = mpsc::UnboundedSender<BatchEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<BatchEvent>;

fn emit(events: &EventSender, event: BatchEvent) {
    // A front-end that stopped listening does not stop the batch
    let _ = events.send(event);
}

/// Resolve every request strictly in order, one at a time.
///
/// Each entry gets a `Started` event before any network call and a
/// `Finished` event once its outcome is known; `Completed` follows the last
/// entry. Outcomes are returned in request order.
pub async fn process_batch(
    resolver: &Resolver,
    requests: &[ModRequest],
    events: &EventSender,
) -> Vec<ResolutionOutcome> {
    let total = requests.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, request) in requests.iter().enumerate() {
        let slug = request.slug.trim().to_string();
        info!("Processing mod: {}", slug);
        emit(
            events,
            BatchEvent::Started {
                index,
                total,
                slug: slug.clone(),
            },
        );

        let outcome = resolver.resolve(request).await;

        emit(
            events,
            BatchEvent::Finished {
                index,
                total,
                slug,
                outcome: outcome.clone(),
            },
        );
        outcomes.push(outcome);
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(
        "Batch finished: {} downloaded, {} skipped, {} failed",
        summary.downloaded, summary.skipped, summary.failed
    );
    emit(events, BatchEvent::Completed(summary));

    outcomes
}

/// Run a batch on a background task. The caller keeps its own context free
/// and drains the receiver to render progress.
pub fn spawn_batch(
    resolver: Arc<Resolver>,
    requests: Vec<ModRequest>,
) -> (JoinHandle<Vec<ResolutionOutcome>>, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move { process_batch(&resolver, &requests, &tx).await });
    (handle, rx)
}

/// Build requests from a slug list.
///
/// `input` ending in `.txt` (any case) names a file with one slug per line;
/// anything else is a comma-separated list. Blank entries are dropped and
/// the rest trimmed.
pub async fn requests_from_input(
    input: &str,
    game_version: &str,
    destination: &Path,
) -> InstallerResult<Vec<ModRequest>> {
    let slugs = if input.to_lowercase().ends_with(".txt") {
        let path = PathBuf::from(input);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| InstallerError::Io { path, source })?;
        split_entries(raw.lines())
    } else {
        split_entries(input.split(','))
    };

    Ok(slugs
        .into_iter()
        .map(|slug| ModRequest::new(slug, game_version, destination))
        .collect())
}

fn split_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
