//! Pagination driver
//!
//! Walks the draws listing for a date, either over an explicit list of pages
//! or page by page until the source reports the last one. Fetches are strictly
//! sequential: whether page N+1 is needed depends on page N.

use chrono::NaiveDate;
use shared::errors::ServiceError;
use shared::Retrieval;
use std::fmt;
use tracing::{debug, info};

use crate::draw_client::DrawSource;

/// Which pages a retrieval walks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalMode {
    /// Exactly these pages, in this order, duplicates included
    Explicit(Vec<u32>),
    /// Every page from 1 until the source reports the last one
    Exhaustive,
}

impl RetrievalMode {
    pub fn from_pages(pages: &[u32]) -> Self {
        if pages.is_empty() {
            RetrievalMode::Exhaustive
        } else {
            RetrievalMode::Explicit(pages.to_vec())
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalMode::Explicit(pages) => {
                let pages: Vec<String> = pages.iter().map(u32::to_string).collect();
                write!(f, "pages-{}", pages.join("_"))
            }
            RetrievalMode::Exhaustive => write!(f, "all"),
        }
    }
}

/// Retrieve the draws of `date` according to `mode`
pub async fn retrieve<S>(
    source: &S,
    date: NaiveDate,
    mode: &RetrievalMode,
) -> Result<Retrieval, ServiceError>
where
    S: DrawSource + ?Sized,
{
    let retrieval = match mode {
        RetrievalMode::Explicit(pages) => retrieve_pages(source, date, pages).await?,
        RetrievalMode::Exhaustive => retrieve_all(source, date).await?,
    };

    info!(
        %date,
        mode = %mode,
        draws_count = retrieval.draws.len(),
        pages = ?retrieval.pages,
        "Retrieved draws"
    );

    Ok(retrieval)
}

async fn retrieve_pages<S>(
    source: &S,
    date: NaiveDate,
    pages: &[u32],
) -> Result<Retrieval, ServiceError>
where
    S: DrawSource + ?Sized,
{
    let mut retrieval = Retrieval::default();

    for &page in pages {
        let draws_page = source
            .fetch_page(date, page)
            .await
            .map_err(|e| e.into_service_error(date, page))?;

        retrieval.draws.extend(draws_page.draws);
        retrieval.pages.push(page);
    }

    Ok(retrieval)
}

async fn retrieve_all<S>(source: &S, date: NaiveDate) -> Result<Retrieval, ServiceError>
where
    S: DrawSource + ?Sized,
{
    let mut retrieval = Retrieval::default();
    let mut page: u32 = 1;

    // No page cap: the source decides when the listing ends.
    loop {
        let draws_page = source
            .fetch_page(date, page)
            .await
            .map_err(|e| e.into_service_error(date, page))?;

        // Recording a page and stopping are independent decisions.
        if !draws_page.draws.is_empty() {
            retrieval.draws.extend(draws_page.draws);
            retrieval.pages.push(page);
        } else {
            debug!(page, "Page carried no draws");
        }

        if draws_page.is_last_page {
            break;
        }
        page += 1;
    }

    Ok(retrieval)
}
