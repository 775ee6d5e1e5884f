/// KINO payout table
///
/// Two-level lookup: amount of selected numbers -> amount of matches -> payout
/// per unit stake. Rows are sparse: a match count that pays nothing may be
/// omitted, and looking it up yields 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ServiceError;

/// Payouts for a single selection size, keyed by match count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoutRow(BTreeMap<usize, f64>);

impl PayoutRow {
    pub fn new(entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Payout for the given amount of matches, 0 when the row has no entry
    pub fn payout(&self, matches: usize) -> f64 {
        self.0.get(&matches).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoutTable(BTreeMap<usize, PayoutRow>);

impl PayoutTable {
    pub fn new(rows: impl IntoIterator<Item = (usize, PayoutRow)>) -> Self {
        Self(rows.into_iter().collect())
    }

    /// The published OPAP KINO table
    pub fn kino() -> Self {
        Self::new([
            (1, PayoutRow::new([(1, 2.5)])),
            (2, PayoutRow::new([(1, 1.0), (2, 5.0)])),
            (3, PayoutRow::new([(2, 2.5), (3, 25.0)])),
            (4, PayoutRow::new([(2, 1.0), (3, 4.0), (4, 100.0)])),
            (5, PayoutRow::new([(3, 2.0), (4, 20.0), (5, 450.0)])),
            (6, PayoutRow::new([(3, 1.0), (4, 7.0), (5, 50.0), (6, 1600.0)])),
            (
                7,
                PayoutRow::new([(0, 1.0), (4, 3.0), (5, 20.0), (6, 100.0), (7, 5000.0)]),
            ),
            (
                8,
                PayoutRow::new([
                    (0, 1.0),
                    (4, 2.0),
                    (5, 10.0),
                    (6, 50.0),
                    (7, 1000.0),
                    (8, 15000.0),
                ]),
            ),
            (
                9,
                PayoutRow::new([
                    (0, 2.0),
                    (4, 1.0),
                    (5, 5.0),
                    (6, 25.0),
                    (7, 200.0),
                    (8, 4000.0),
                    (9, 40000.0),
                ]),
            ),
            (
                10,
                PayoutRow::new([
                    (0, 2.0),
                    (5, 2.0),
                    (6, 20.0),
                    (7, 80.0),
                    (8, 500.0),
                    (9, 10000.0),
                    (10, 100000.0),
                ]),
            ),
            (
                11,
                PayoutRow::new([
                    (0, 2.0),
                    (5, 1.0),
                    (6, 10.0),
                    (7, 50.0),
                    (8, 250.0),
                    (9, 1500.0),
                    (10, 15000.0),
                    (11, 500000.0),
                ]),
            ),
            (
                12,
                PayoutRow::new([
                    (0, 4.0),
                    (6, 5.0),
                    (7, 25.0),
                    (8, 150.0),
                    (9, 1000.0),
                    (10, 2500.0),
                    (11, 25000.0),
                    (12, 1000000.0),
                ]),
            ),
        ])
    }

    /// Parse a table from JSON of the form `{"3": {"2": 2.5, "3": 25}}`
    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(json).map_err(ServiceError::invalid_config)
    }

    /// Row for the given selection size
    ///
    /// A missing row means the table does not cover a legal selection, which
    /// is a configuration defect rather than a zero payout.
    pub fn row(&self, selection_size: usize) -> Result<&PayoutRow, ServiceError> {
        self.0
            .get(&selection_size)
            .ok_or_else(|| ServiceError::missing_selection_size(selection_size))
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::kino()
    }
}
