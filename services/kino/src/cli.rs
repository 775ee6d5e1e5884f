//! Command line surface of the `kino` binary

use chrono::NaiveDate;
use clap::Parser;
use shared::errors::ServiceError;
use shared::{validate_page, Selection, DATE_FORMAT};
use std::path::PathBuf;

use crate::pagination::RetrievalMode;

/// KINO payout calculator
#[derive(Debug, Parser)]
#[command(name = "kino", version, about = "KINO payout calculator")]
pub struct Cli {
    /// One or more selected numbers, up to 12
    #[arg(
        value_name = "NUMBER",
        required = true,
        num_args = 1..,
        value_parser = clap::value_parser!(u8).range(1..=80)
    )]
    pub numbers: Vec<u8>,

    /// Play with KINO bonus
    #[arg(short, long)]
    pub bonus: bool,

    /// Draw date in YYYY-MM-DD format [default: today]
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<String>,

    /// Fetch only the given page(s) of draws for the given date
    #[arg(
        short,
        long,
        value_name = "PAGE",
        num_args = 1..,
        value_parser = clap::value_parser!(u32).range(1..=18)
    )]
    pub page: Vec<u32>,

    /// Cache retrieved draws in this directory
    #[arg(short, long, value_name = "CACHE")]
    pub cache: Option<PathBuf>,

    /// Log each draw for debugging
    #[arg(long)]
    pub debug: bool,
}

/// Validated input for one run
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub selection: Selection,
    pub bonus: bool,
    pub date: NaiveDate,
    pub mode: RetrievalMode,
    pub cache_dir: Option<PathBuf>,
    pub debug: bool,
}

impl Cli {
    /// Validate the arguments; `today` is used when no date was given
    pub fn into_request(self, today: NaiveDate) -> Result<RunRequest, ServiceError> {
        let selection = Selection::new(self.numbers)?;

        let date = match self.date {
            Some(input) => NaiveDate::parse_from_str(&input, DATE_FORMAT)
                .map_err(|e| ServiceError::invalid_date(&input, e))?,
            None => today,
        };

        let pages = self
            .page
            .into_iter()
            .map(validate_page)
            .collect::<Result<Vec<u32>, _>>()?;

        Ok(RunRequest {
            selection,
            bonus: self.bonus,
            date,
            mode: RetrievalMode::from_pages(&pages),
            cache_dir: self.cache,
            debug: self.debug,
        })
    }
}
