/// Common test utilities: an in-process fake of the OPAP draws API
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake API does for every request
#[derive(Clone)]
pub enum Behavior {
    /// Serve these zero-based pages; anything past the end is a 404
    Pages(Vec<Value>),
    /// Always answer with this status
    Status(StatusCode),
    /// Answer 200 with a body that is not a draws listing
    Garbage,
    /// Sleep before answering
    Slow(Duration),
}

/// A request seen by the fake API
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub game_id: u32,
    pub from: String,
    pub to: String,
    pub page: u32,
}

struct FakeApiState {
    behavior: Behavior,
    seen: Mutex<Vec<SeenRequest>>,
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
}

pub struct FakeApi {
    pub base_url: String,
    state: Arc<FakeApiState>,
}

impl FakeApi {
    /// Start the fake API on an ephemeral port
    pub async fn start(behavior: Behavior) -> Self {
        let state = Arc::new(FakeApiState {
            behavior,
            seen: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/draws/v3.0/:game_id/draw-date/:from/:to", get(draws))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake API stopped");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn seen_pages(&self) -> Vec<u32> {
        self.seen().into_iter().map(|r| r.page).collect()
    }
}

async fn draws(
    State(state): State<Arc<FakeApiState>>,
    Path((game_id, from, to)): Path<(u32, String, String)>,
    Query(query): Query<PageQuery>,
) -> Response {
    state.seen.lock().unwrap().push(SeenRequest {
        game_id,
        from,
        to,
        page: query.page,
    });

    match &state.behavior {
        Behavior::Pages(pages) => match pages.get(query.page as usize) {
            Some(page) => Json(page.clone()).into_response(),
            None => (StatusCode::NOT_FOUND, "no such page").into_response(),
        },
        Behavior::Status(status) => (*status, "upstream failure").into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(*delay).await;
            Json(page(vec![], true)).into_response()
        }
    }
}

/// Draws listing page in the OPAP wire format
pub fn page(draws: Vec<(u64, Vec<u8>)>, last: bool) -> Value {
    let content: Vec<Value> = draws
        .iter()
        .map(|(id, numbers)| {
            json!({
                "drawId": id,
                "drawTime": 1595116800000u64,
                "status": "results",
                "winningNumbers": { "list": numbers, "bonus": [numbers[0]] }
            })
        })
        .collect();

    json!({
        "content": content,
        "totalPages": 0,
        "last": last,
        "first": false
    })
}

/// Base URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}
