/// Integration tests for the draws API client, pagination and full runs
mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{closed_port_url, page, Behavior, FakeApi, SeenRequest};
use kino::pagination::{retrieve, RetrievalMode};
use kino::{Calculator, OpapClient, RunRequest, WorkerPool};
use shared::errors::ErrorCategory;
use shared::{Draw, PayoutRow, PayoutTable, Selection};
use std::path::PathBuf;
use std::time::Duration;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 7, 19).unwrap()
}

fn client(base_url: &str) -> OpapClient {
    OpapClient::new(base_url.to_string(), 1100, Duration::from_secs(5)).unwrap()
}

fn two_page_listing() -> Behavior {
    Behavior::Pages(vec![
        page(vec![(1, vec![1, 2, 9, 30]), (2, vec![4, 5, 6, 7])], false),
        page(vec![(3, vec![3, 2, 1, 80])], true),
    ])
}

fn request(numbers: &[u8], bonus: bool, mode: RetrievalMode) -> RunRequest {
    RunRequest {
        selection: Selection::new(numbers.to_vec()).unwrap(),
        bonus,
        date: date(),
        mode,
        cache_dir: None,
        debug: false,
    }
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("kino-it-{}", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_exhaustive_retrieval_over_http() {
    let api = FakeApi::start(two_page_listing()).await;

    let retrieval = retrieve(&client(&api.base_url), date(), &RetrievalMode::Exhaustive)
        .await
        .expect("Retrieval failed");

    assert_eq!(retrieval.pages, vec![1, 2]);
    assert_eq!(
        retrieval.draws,
        vec![
            Draw::new(1u64, vec![1, 2, 9, 30]),
            Draw::new(2u64, vec![4, 5, 6, 7]),
            Draw::new(3u64, vec![3, 2, 1, 80]),
        ]
    );

    // Pages go out zero-based, with the date as both ends of the range
    assert_eq!(
        api.seen(),
        vec![
            SeenRequest {
                game_id: 1100,
                from: "2020-07-19".to_string(),
                to: "2020-07-19".to_string(),
                page: 0,
            },
            SeenRequest {
                game_id: 1100,
                from: "2020-07-19".to_string(),
                to: "2020-07-19".to_string(),
                page: 1,
            },
        ]
    );
}

#[tokio::test]
async fn test_explicit_duplicate_pages_over_http() {
    let api = FakeApi::start(two_page_listing()).await;

    let retrieval = retrieve(
        &client(&api.base_url),
        date(),
        &RetrievalMode::Explicit(vec![2, 2]),
    )
    .await
    .expect("Retrieval failed");

    assert_eq!(retrieval.pages, vec![2, 2]);
    assert_eq!(retrieval.draws.len(), 2);
    assert_eq!(retrieval.draws[0], retrieval.draws[1]);
    assert_eq!(api.seen_pages(), vec![1, 1]);
}

#[tokio::test]
async fn test_empty_last_page_is_not_recorded() {
    let api = FakeApi::start(Behavior::Pages(vec![
        page(vec![(1, vec![1, 2, 3]), (2, vec![4, 5, 6])], false),
        page(vec![], true),
    ]))
    .await;

    let retrieval = retrieve(&client(&api.base_url), date(), &RetrievalMode::Exhaustive)
        .await
        .expect("Retrieval failed");

    assert_eq!(retrieval.draws.len(), 2);
    assert_eq!(retrieval.pages, vec![1]);
    assert_eq!(api.seen_pages(), vec![0, 1]);
}

#[tokio::test]
async fn test_full_run_with_and_without_bonus() {
    let api = FakeApi::start(two_page_listing()).await;
    let source = client(&api.base_url);
    let table = PayoutTable::new([(3, PayoutRow::new([(2, 5.0), (3, 20.0)]))]);
    let calculator = Calculator::new(&source, &table, WorkerPool::new(2));

    // Draw 1 matches {1, 2}, draw 2 matches nothing, draw 3 matches {1, 2, 3}
    let plain = calculator
        .run(&request(&[1, 2, 3], false, RetrievalMode::Exhaustive))
        .await
        .expect("Run failed");
    assert_eq!(plain.selected_numbers, vec![1, 2, 3]);
    assert_eq!(plain.bonus, None);
    assert_eq!(plain.pages, vec![1, 2]);
    assert_eq!(plain.num_payouts, 3);
    assert_eq!(plain.mean_payout, Some(25.0 / 3.0));

    let bonus = calculator
        .run(&request(&[1, 2, 3], true, RetrievalMode::Exhaustive))
        .await
        .expect("Run failed");
    assert_eq!(bonus.bonus, Some(true));
    assert_eq!(bonus.mean_payout, Some(50.0 / 3.0));
}

#[tokio::test]
async fn test_run_over_empty_day_has_no_mean() {
    let api = FakeApi::start(Behavior::Pages(vec![page(vec![], true)])).await;
    let source = client(&api.base_url);
    let table = PayoutTable::kino();
    let calculator = Calculator::new(&source, &table, WorkerPool::new(2));

    let report = calculator
        .run(&request(&[10, 20], false, RetrievalMode::Exhaustive))
        .await
        .expect("Run failed");

    assert_eq!(report.num_payouts, 0);
    assert!(report.pages.is_empty());
    assert_eq!(report.mean_payout, None);
}

#[tokio::test]
async fn test_cached_run_does_not_need_the_api() {
    let cache_dir = temp_dir();
    let table = PayoutTable::kino();

    let mut cached_request = request(&[1, 2, 3, 4], false, RetrievalMode::Exhaustive);
    cached_request.cache_dir = Some(cache_dir.clone());

    let api = FakeApi::start(two_page_listing()).await;
    let online = client(&api.base_url);
    let first = Calculator::new(&online, &table, WorkerPool::new(2))
        .run(&cached_request)
        .await
        .expect("Run failed");
    assert_eq!(api.seen_pages(), vec![0, 1]);

    let offline = client(&closed_port_url().await);
    let second = Calculator::new(&offline, &table, WorkerPool::new(2))
        .run(&cached_request)
        .await
        .expect("Cached run failed");
    assert_eq!(first, second);

    // A different page selection is a different cache entry
    let mut other_pages = cached_request.clone();
    other_pages.mode = RetrievalMode::Explicit(vec![1]);
    let error = Calculator::new(&offline, &table, WorkerPool::new(2))
        .run(&other_pages)
        .await
        .unwrap_err();
    assert_eq!(error.code, "NETWORK_CONNECTION_FAILED");

    tokio::fs::remove_dir_all(&cache_dir).await.unwrap();
}

#[tokio::test]
async fn test_cache_entries_are_scoped_to_the_api_host() {
    let cache_dir = temp_dir();
    let table = PayoutTable::kino();

    let mut cached_request = request(&[1, 2, 3, 4], false, RetrievalMode::Exhaustive);
    cached_request.cache_dir = Some(cache_dir.clone());

    let api = FakeApi::start(two_page_listing()).await;
    Calculator::new(&client(&api.base_url), &table, WorkerPool::new(2))
        .run(&cached_request)
        .await
        .expect("Run failed");

    // Same closed port, other host name: the entry cached from 127.0.0.1 is not served
    let offline_url = closed_port_url().await.replace("127.0.0.1", "localhost");
    let error = Calculator::new(&client(&offline_url), &table, WorkerPool::new(2))
        .run(&cached_request)
        .await
        .unwrap_err();
    assert_eq!(error.category, ErrorCategory::Network);

    tokio::fs::remove_dir_all(&cache_dir).await.unwrap();
}

#[tokio::test]
async fn test_missing_payout_row_fails_before_fetching() {
    let api = FakeApi::start(two_page_listing()).await;
    let source = client(&api.base_url);
    let table = PayoutTable::new([(3, PayoutRow::new([(2, 5.0)]))]);
    let calculator = Calculator::new(&source, &table, WorkerPool::new(2));

    let error = calculator
        .run(&request(&[1, 2], false, RetrievalMode::Exhaustive))
        .await
        .unwrap_err();

    assert_eq!(error.category, ErrorCategory::Configuration);
    assert!(api.seen().is_empty());
}

#[tokio::test]
async fn test_server_error_is_request_failure() {
    let api = FakeApi::start(Behavior::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let error = retrieve(&client(&api.base_url), date(), &RetrievalMode::Exhaustive)
        .await
        .unwrap_err();

    assert_eq!(error.code, "NETWORK_REQUEST_FAILED");
    assert_eq!(error.exit_code(), 3);
    let context = error.context.unwrap();
    assert!(context.contains("page: 1"));
    assert!(context.contains("500"));
}

#[tokio::test]
async fn test_missing_page_in_explicit_mode_is_request_failure() {
    let api = FakeApi::start(two_page_listing()).await;

    let error = retrieve(
        &client(&api.base_url),
        date(),
        &RetrievalMode::Explicit(vec![1, 7]),
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, "NETWORK_REQUEST_FAILED");
    assert!(error.context.unwrap().contains("page: 7"));
}

#[tokio::test]
async fn test_unexpected_body_is_malformed_response() {
    let api = FakeApi::start(Behavior::Garbage).await;

    let error = retrieve(&client(&api.base_url), date(), &RetrievalMode::Exhaustive)
        .await
        .unwrap_err();

    assert_eq!(error.code, "DATA_MALFORMED_RESPONSE");
    assert_eq!(error.category, ErrorCategory::Data);
}

#[tokio::test]
async fn test_refused_connection_is_connection_failure() {
    let source = client(&closed_port_url().await);

    let error = retrieve(&source, date(), &RetrievalMode::Exhaustive)
        .await
        .unwrap_err();

    assert_eq!(error.code, "NETWORK_CONNECTION_FAILED");
    assert_eq!(error.category, ErrorCategory::Network);
}

#[tokio::test]
async fn test_slow_api_is_timeout() {
    let api = FakeApi::start(Behavior::Slow(Duration::from_secs(3))).await;
    let source = OpapClient::new(api.base_url.clone(), 1100, Duration::from_millis(200)).unwrap();

    let error = retrieve(&source, date(), &RetrievalMode::Exhaustive)
        .await
        .unwrap_err();

    assert_eq!(error.code, "NETWORK_TIMEOUT");
}
