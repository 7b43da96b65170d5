use super::policy::Candidate;
use crate::catalog::{AssetHandle, MediaCatalog};

/// Progress notification cadence, in processed items.
pub const PROGRESS_EVERY: usize = 10;

/// Per-attempt result of one deletion.
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub handle: AssetHandle,
    pub title: String,
    pub success: bool,
    /// 0 on failure.
    pub freed_bytes: u64,
    /// Present only on failure.
    pub error: Option<String>,
}

/// Aggregate of a completed deletion batch.
#[derive(Debug, Clone, Default)]
pub struct DeletionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub freed_bytes: u64,
    pub outcomes: Vec<DeletionOutcome>,
}

/// Delete the frozen candidates strictly in order.
///
/// The catalog's delete endpoint is not assumed safe under concurrent
/// mutation, so there is deliberately no parallelism here. A per-item
/// failure is recorded and the batch continues; `on_progress` fires after
/// every [`PROGRESS_EVERY`]th item with (processed, total).
pub async fn execute_batch<F>(
    catalog: &dyn MediaCatalog,
    pending: &[Candidate],
    mut on_progress: F,
) -> DeletionSummary
where
    F: FnMut(usize, usize),
{
    let total = pending.len();
    let mut summary = DeletionSummary::default();

    for (processed, candidate) in pending.iter().enumerate().map(|(i, c)| (i + 1, c)) {
        tracing::info!(
            item = processed,
            total,
            title = %candidate.title,
            "deleting"
        );

        match catalog.delete(&candidate.handle).await {
            Ok(()) => {
                summary.succeeded += 1;
                summary.freed_bytes += candidate.size_bytes;
                summary.outcomes.push(DeletionOutcome {
                    handle: candidate.handle.clone(),
                    title: candidate.title.clone(),
                    success: true,
                    freed_bytes: candidate.size_bytes,
                    error: None,
                });
            }
            Err(e) => {
                tracing::error!(title = %candidate.title, error = %e, "delete failed");
                summary.failed += 1;
                summary.outcomes.push(DeletionOutcome {
                    handle: candidate.handle.clone(),
                    title: candidate.title.clone(),
                    success: false,
                    freed_bytes: 0,
                    error: Some(e.to_string()),
                });
            }
        }

        if processed % PROGRESS_EVERY == 0 {
            on_progress(processed, total);
        }
    }

    summary
}
