//! Run report: the single JSON object printed on success

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::Selection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub selected_numbers: Vec<u8>,
    /// Only present when playing with KINO bonus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<bool>,
    pub date: NaiveDate,
    pub pages: Vec<u32>,
    pub num_payouts: usize,
    pub mean_payout: Option<f64>,
}

impl RunReport {
    pub fn from_payouts(
        selection: &Selection,
        bonus: bool,
        date: NaiveDate,
        pages: Vec<u32>,
        payouts: &[f64],
    ) -> Self {
        Self {
            selected_numbers: selection.as_slice().to_vec(),
            bonus: bonus.then_some(true),
            date,
            pages,
            num_payouts: payouts.len(),
            mean_payout: mean(payouts),
        }
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
