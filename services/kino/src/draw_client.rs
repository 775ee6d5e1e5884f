//! HTTP client for the OPAP draws API
//!
//! Fetches a single page of KINO draws for a date. There is no retry here:
//! every failure is classified and handed back to the caller, which ends the run.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shared::errors::ServiceError;
use shared::{Draw, DrawId};
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;

/// One page of the draws listing
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPage {
    pub draws: Vec<Draw>,
    pub is_last_page: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    fn classify(error: reqwest::Error) -> Self {
        // A connect timeout reports both flags; it is a timeout first.
        if error.is_timeout() {
            FetchError::Timeout(error.to_string())
        } else if error.is_connect() {
            FetchError::Connection(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }

    /// Wrap into the run-level error, adding which page of which date failed
    pub fn into_service_error(self, date: NaiveDate, page: u32) -> ServiceError {
        let context = format!("page: {}, date: {}, error: {}", page, date, self);
        match self {
            FetchError::Connection(_) => ServiceError::connection_failed(context),
            FetchError::Timeout(_) => ServiceError::timeout(context),
            FetchError::Request(_) => ServiceError::request_failed(context),
            FetchError::Malformed(_) => ServiceError::malformed_response(context),
        }
    }
}

/// A paginated listing of draws per date
#[async_trait]
pub trait DrawSource: Send + Sync {
    /// Fetch the 1-based `page` of draws held on `date`
    async fn fetch_page(&self, date: NaiveDate, page: u32) -> Result<DrawPage, FetchError>;

    /// Names the listing this source reads, so cached retrievals from
    /// different sources never mix
    fn cache_scope(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct DrawsResponse {
    content: Vec<RawDraw>,
    last: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDraw {
    draw_id: DrawId,
    winning_numbers: WinningNumbers,
}

#[derive(Debug, Deserialize)]
struct WinningNumbers {
    list: Vec<u8>,
}

impl From<RawDraw> for Draw {
    fn from(raw: RawDraw) -> Self {
        Draw {
            id: raw.draw_id,
            numbers: raw.winning_numbers.list,
        }
    }
}

/// Parse a draws listing body into a page
pub fn parse_page(body: &str) -> Result<DrawPage, FetchError> {
    let response: DrawsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    Ok(DrawPage {
        draws: response.content.into_iter().map(Draw::from).collect(),
        is_last_page: response.last,
    })
}

/// Client for the OPAP draws web service
///
/// Holds one `reqwest::Client`, so the connection is reused across pages.
#[derive(Clone)]
pub struct OpapClient {
    http_client: Client,
    base_url: String,
    game_id: u32,
}

impl OpapClient {
    pub fn new(base_url: String, game_id: u32, timeout: Duration) -> Result<Self, ServiceError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ServiceError::invalid_config)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            game_id,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.base_url.clone(),
            config.game_id,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Listing URL for a date; the date is both start and end of the range
    pub fn draws_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/draws/v3.0/{}/draw-date/{}/{}",
            self.base_url, self.game_id, date, date
        )
    }
}

#[async_trait]
impl DrawSource for OpapClient {
    async fn fetch_page(&self, date: NaiveDate, page: u32) -> Result<DrawPage, FetchError> {
        let url = self.draws_url(date);
        // The API counts pages from zero.
        let api_page = page.saturating_sub(1);

        debug!(url = %url, page, api_page, "Fetching draws page");

        let response = self
            .http_client
            .get(&url)
            .query(&[("page", api_page)])
            .send()
            .await
            .map_err(FetchError::classify)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Request(format!(
                "draws API error {}: {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(FetchError::classify)?;
        let draws_page = parse_page(&body)?;

        debug!(
            page,
            draws_count = draws_page.draws.len(),
            is_last_page = draws_page.is_last_page,
            "Fetched draws page"
        );

        Ok(draws_page)
    }

    /// Host of the API plus the game id, safe to use in a file name
    ///
    /// The port is left out so the same API reached on another port shares entries.
    fn cache_scope(&self) -> String {
        let host = reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.base_url.clone());

        let host: String = host
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        format!("{}-{}", host, self.game_id)
    }
}
