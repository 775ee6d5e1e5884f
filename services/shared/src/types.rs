/// Type-safe wrappers for domain primitives
///
/// These types enforce the game's invariants at construction time so the
/// retrieval and evaluation pipeline never sees an invalid selection or page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::constants::*;
use crate::errors::ServiceError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one number must be selected")]
    EmptySelection,

    #[error("Too many numbers selected: {count} (max {max})")]
    TooManyNumbers { count: usize, max: usize },

    #[error("Selected numbers contain duplicates: {0:?}")]
    DuplicateNumbers(Vec<u8>),

    #[error("Number out of range: {number} (min: {min}, max: {max})")]
    NumberOutOfRange { number: u8, min: u8, max: u8 },

    #[error("Page out of range: {page} (min: {min}, max: {max})")]
    PageOutOfRange { page: u32, min: u32, max: u32 },
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::EmptySelection => ServiceError::empty_selection(),
            ValidationError::TooManyNumbers { count, max } => {
                ServiceError::too_many_numbers(count, max)
            }
            ValidationError::DuplicateNumbers(duplicates) => {
                ServiceError::duplicate_numbers(&duplicates)
            }
            ValidationError::NumberOutOfRange { number, min, max } => {
                ServiceError::number_out_of_range(number, min, max)
            }
            ValidationError::PageOutOfRange { page, min, max } => {
                ServiceError::page_out_of_range(page, min, max)
            }
        }
    }
}

/// Opaque draw identifier
///
/// The draws API sends integers, but the identifier is never interpreted, so
/// string identifiers are accepted too and round-trip in their original shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrawId {
    Number(u64),
    Text(String),
}

impl fmt::Display for DrawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawId::Number(id) => write!(f, "{}", id),
            DrawId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for DrawId {
    fn from(id: u64) -> Self {
        DrawId::Number(id)
    }
}

impl From<&str> for DrawId {
    fn from(id: &str) -> Self {
        DrawId::Text(id.to_string())
    }
}

/// One official KINO draw: its identifier and winning numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub id: DrawId,
    pub numbers: Vec<u8>,
}

impl Draw {
    pub fn new(id: impl Into<DrawId>, numbers: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            numbers,
        }
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Draw(id={}, numbers={:?})", self.id, self.numbers)
    }
}

/// The player's selected numbers
///
/// Keeps the order the player entered them in for reporting, while matching
/// against draws is purely set-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    numbers: Vec<u8>,
    set: BTreeSet<u8>,
}

impl Selection {
    /// Create a new Selection with validation
    pub fn new(numbers: Vec<u8>) -> Result<Self, ValidationError> {
        if numbers.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        if numbers.len() > MAX_SELECTED_NUMBERS {
            return Err(ValidationError::TooManyNumbers {
                count: numbers.len(),
                max: MAX_SELECTED_NUMBERS,
            });
        }
        if let Some(&number) = numbers
            .iter()
            .find(|n| **n < MIN_NUMBER || **n > MAX_NUMBER)
        {
            return Err(ValidationError::NumberOutOfRange {
                number,
                min: MIN_NUMBER,
                max: MAX_NUMBER,
            });
        }

        let mut set = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for &number in &numbers {
            if !set.insert(number) {
                duplicates.insert(number);
            }
        }
        if !duplicates.is_empty() {
            return Err(ValidationError::DuplicateNumbers(
                duplicates.into_iter().collect(),
            ));
        }

        Ok(Self { numbers, set })
    }

    /// Numbers in the order they were selected
    pub fn as_slice(&self) -> &[u8] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.set.contains(&number)
    }

    /// Sorted intersection of the selection with a draw's winning numbers
    pub fn matched_numbers(&self, draw: &Draw) -> Vec<u8> {
        draw.numbers
            .iter()
            .copied()
            .filter(|n| self.contains(*n))
            .collect::<BTreeSet<u8>>()
            .into_iter()
            .collect()
    }
}

/// Validate an explicitly requested 1-based page number
pub fn validate_page(page: u32) -> Result<u32, ValidationError> {
    if !(MIN_PAGE..=MAX_PAGE).contains(&page) {
        return Err(ValidationError::PageOutOfRange {
            page,
            min: MIN_PAGE,
            max: MAX_PAGE,
        });
    }
    Ok(page)
}

/// Draws retrieved for a date together with the pages that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrieval {
    pub draws: Vec<Draw>,
    pub pages: Vec<u32>,
}
