//! Payout evaluation
//!
//! Scores each draw from its match count alone, so draws can be evaluated
//! independently and in parallel.

use shared::errors::ServiceError;
use shared::{Draw, PayoutRow, PayoutTable, Selection, BONUS_MULTIPLIER};
use tracing::info;

use crate::worker_pool::WorkerPool;

/// Evaluates draws for one selection against one payout table row
#[derive(Debug, Clone)]
pub struct PayoutEvaluator {
    selection: Selection,
    row: PayoutRow,
    bonus: bool,
    debug: bool,
}

impl PayoutEvaluator {
    /// Resolve the table row for the selection size up front
    pub fn new(
        selection: Selection,
        table: &PayoutTable,
        bonus: bool,
        debug: bool,
    ) -> Result<Self, ServiceError> {
        let row = table.row(selection.len())?.clone();
        Ok(Self {
            selection,
            row,
            bonus,
            debug,
        })
    }

    /// Payout for a single draw
    ///
    /// The diagnostic carries the payout before the bonus multiplier.
    pub fn evaluate(&self, draw: &Draw) -> f64 {
        let matches = self.selection.matched_numbers(draw);
        let payout = self.row.payout(matches.len());

        if self.debug {
            info!(
                target: "kino::diagnostics",
                draw_id = %draw.id,
                matches = ?matches,
                payout,
                "{}: matches={:?}, payout={}",
                draw,
                matches,
                payout
            );
        }

        if self.bonus {
            payout * BONUS_MULTIPLIER
        } else {
            payout
        }
    }
}

/// Evaluate every draw on the pool; payouts line up with `draws`
pub async fn evaluate_all(
    pool: &WorkerPool,
    evaluator: PayoutEvaluator,
    draws: Vec<Draw>,
) -> Result<Vec<f64>, ServiceError> {
    pool.map(draws, move |draw| evaluator.evaluate(&draw)).await
}
