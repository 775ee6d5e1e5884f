//! Runs one payout calculation end to end
//!
//! retrieval (optionally through the cache) -> parallel evaluation -> report

use shared::errors::ServiceError;
use shared::PayoutTable;
use tracing::info;

use crate::cache::{cached_retrieve, CacheKey, DiskCache};
use crate::cli::RunRequest;
use crate::draw_client::DrawSource;
use crate::pagination::retrieve;
use crate::payout::{evaluate_all, PayoutEvaluator};
use crate::report::RunReport;
use crate::worker_pool::WorkerPool;

pub struct Calculator<'a, S: DrawSource + ?Sized> {
    source: &'a S,
    table: &'a PayoutTable,
    pool: WorkerPool,
}

impl<'a, S: DrawSource + ?Sized> Calculator<'a, S> {
    pub fn new(source: &'a S, table: &'a PayoutTable, pool: WorkerPool) -> Self {
        Self {
            source,
            table,
            pool,
        }
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunReport, ServiceError> {
        // A table without a row for this selection size fails before any fetch.
        let evaluator = PayoutEvaluator::new(
            request.selection.clone(),
            self.table,
            request.bonus,
            request.debug,
        )?;

        let retrieval = match &request.cache_dir {
            Some(dir) => {
                let cache = DiskCache::new(dir);
                let key = CacheKey::new(&self.source.cache_scope(), request.date, &request.mode);
                cached_retrieve(&cache, &key, self.source, request.date, &request.mode).await?
            }
            None => retrieve(self.source, request.date, &request.mode).await?,
        };

        let payouts = evaluate_all(&self.pool, evaluator, retrieval.draws).await?;

        info!(
            num_payouts = payouts.len(),
            worker_count = self.pool.worker_count(),
            "Evaluated payouts"
        );

        Ok(RunReport::from_payouts(
            &request.selection,
            request.bonus,
            request.date,
            retrieval.pages,
            &payouts,
        ))
    }
}
