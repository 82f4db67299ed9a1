use crate::core::flatten::flatten;
use crate::core::rate_limit::SlidingWindowLimiter;
use crate::core::screener::AddressScreener;
use crate::models::ScreenStatus;
use crate::services::{RowSink, SinkError};
use futures::future::join_all;
use tokio::time::Instant;

/// Totals reported when a run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
    pub batches: usize,
}

/// Partition the address list into consecutive screening batches
///
/// Batch size is `min(max_parallelism, ceil(N / 2))`, so small inputs
/// collapse into at most two batches instead of many undersized ones.
/// The slices cover the input exactly once, in order, with the final
/// slice possibly shorter.
pub fn partition(addresses: &[String], max_parallelism: usize) -> Vec<&[String]> {
    if addresses.is_empty() {
        return Vec::new();
    }

    let half = addresses.len().div_ceil(2);
    let size = max_parallelism.min(half).max(1);

    addresses.chunks(size).collect()
}

/// Drives the whole screening run: batch at a time, every address in a
/// batch screened concurrently, batch starts spaced by the rate limiter
///
/// The scheduler is the only owner of the rate window and the only writer
/// to the sink; all mutation happens on this single control path between
/// batches, so concurrent screenings share no mutable state.
pub struct BatchScheduler {
    screener: AddressScreener,
    limiter: SlidingWindowLimiter,
    categories: Vec<String>,
    max_parallelism: usize,
    include_indirect: bool,
}

impl BatchScheduler {
    pub fn new(
        screener: AddressScreener,
        limiter: SlidingWindowLimiter,
        categories: Vec<String>,
        max_parallelism: usize,
        include_indirect: bool,
    ) -> Self {
        Self {
            screener,
            limiter,
            categories,
            max_parallelism,
            include_indirect,
        }
    }

    /// Screen every address and append the flattened rows to the sink
    ///
    /// Batches run strictly sequentially. Within a batch the screenings
    /// complete in any order, but `join_all` gathers them by index, so
    /// rows always land in input order. Only sink failures abort the run;
    /// per-address failures are logged and recorded in their row.
    pub async fn run<S: RowSink>(
        &mut self,
        addresses: &[String],
        sink: &mut S,
    ) -> Result<RunSummary, SinkError> {
        let batches = partition(addresses, self.max_parallelism);
        let total_batches = batches.len();
        let mut failed = 0usize;

        for (index, batch) in batches.iter().enumerate() {
            tracing::info!(
                "Screening batch {}/{} ({} addresses)",
                index + 1,
                total_batches,
                batch.len()
            );

            self.limiter.record_batch_start(Instant::now());

            let outcomes = join_all(
                batch
                    .iter()
                    .map(|address| self.screener.screen(address)),
            )
            .await;

            let mut rows = Vec::with_capacity(outcomes.len());
            for outcome in &outcomes {
                if let ScreenStatus::Failed(reason) = &outcome.status {
                    failed += 1;
                    tracing::warn!("Screening failed for {}: {}", outcome.address, reason);
                }
                rows.push(flatten(outcome, &self.categories, self.include_indirect));
            }

            sink.append_rows(rows)?;

            if index + 1 < total_batches {
                self.limiter.await_if_needed().await;
            }
        }

        Ok(RunSummary {
            total: addresses.len(),
            failed,
            batches: total_batches,
        })
    }
}
