// Test utilities: a local stand-in for the Discogs and iTunes APIs
use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::sources::{DiscogsClient, ItunesClient};
use crate::suggestion::SuggestionService;

/// How a mock endpoint answers.
#[derive(Clone)]
pub enum MockReply {
    Json(Value),
    Raw(StatusCode, String),
    Delayed(Duration, Value),
}

/// Canned upstream responses. Every request path and query is recorded.
#[derive(Clone)]
pub struct MockUpstream {
    first_page: Value,
    pages: HashMap<u64, MockReply>,
    search: MockReply,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self {
            first_page: json!({ "pagination": { "items": 0 }, "releases": [] }),
            pages: HashMap::new(),
            search: MockReply::Json(json!({ "resultCount": 0, "results": [] })),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// A mock server bound to an ephemeral local port.
pub struct RunningUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl RunningUpstream {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn collection_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with("/users/"))
            .collect()
    }

    pub fn search_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.starts_with("/search"))
            .collect()
    }
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// First page reporting `total` items.
    pub fn with_total(mut self, total: u64) -> Self {
        self.first_page = json!({ "pagination": { "items": total }, "releases": [] });
        self
    }

    pub fn with_first_page(mut self, body: Value) -> Self {
        self.first_page = body;
        self
    }

    pub fn with_page(mut self, page: u64, releases: Vec<Value>) -> Self {
        self.pages
            .insert(page, MockReply::Json(json!({ "releases": releases })));
        self
    }

    pub fn with_page_body(mut self, page: u64, body: Value) -> Self {
        self.pages.insert(page, MockReply::Json(body));
        self
    }

    pub fn with_page_reply(mut self, page: u64, reply: MockReply) -> Self {
        self.pages.insert(page, reply);
        self
    }

    pub fn with_search(mut self, reply: MockReply) -> Self {
        self.search = reply;
        self
    }

    pub async fn spawn(self) -> RunningUpstream {
        let requests = self.requests.clone();
        let app = Router::new()
            .route(
                "/users/:username/collection/folders/0/releases",
                get(collection_handler),
            )
            .route("/search", get(search_handler))
            .with_state(Arc::new(self));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningUpstream {
            base_url: format!("http://{}", addr),
            requests,
        }
    }
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn collection_handler(
    State(mock): State<Arc<MockUpstream>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.requests.lock().unwrap().push(uri.to_string());

    match params.get("page").and_then(|p| p.parse::<u64>().ok()) {
        None => json_response(StatusCode::OK, mock.first_page.to_string()),
        Some(page) => match mock.pages.get(&page) {
            Some(reply) => respond(reply).await,
            None => json_response(StatusCode::OK, json!({ "releases": [] }).to_string()),
        },
    }
}

async fn search_handler(State(mock): State<Arc<MockUpstream>>, uri: Uri) -> Response {
    mock.requests.lock().unwrap().push(uri.to_string());
    respond(&mock.search).await
}

async fn respond(reply: &MockReply) -> Response {
    match reply {
        MockReply::Json(body) => json_response(StatusCode::OK, body.to_string()),
        MockReply::Raw(status, body) => (*status, body.clone()).into_response(),
        MockReply::Delayed(delay, body) => {
            tokio::time::sleep(*delay).await;
            json_response(StatusCode::OK, body.to_string())
        }
    }
}

/// A release entry shaped like the collection listing's.
pub fn release(title: &str, artist: &str) -> Value {
    json!({
        "id": 1,
        "basic_information": {
            "title": title,
            "artists": [{ "name": artist, "id": 1 }]
        }
    })
}

/// `count` distinct releases titled "Album <page>-<i>".
pub fn releases_for_page(page: u64, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| release(&format!("Album {}-{}", page, i), &format!("Artist {}", i)))
        .collect()
}

pub fn search_hit(artwork: &str, collection: &str) -> Value {
    json!({
        "resultCount": 1,
        "results": [{
            "wrapperType": "collection",
            "artworkUrl100": artwork,
            "collectionViewUrl": collection
        }]
    })
}

/// A service talking to `base_url` that always picks `index`.
pub fn service_picking(base_url: &str, index: u64) -> SuggestionService {
    service_with_timeout(base_url, Duration::from_secs(5)).with_index_picker(move |_| index)
}

pub fn service_with_timeout(base_url: &str, timeout: Duration) -> SuggestionService {
    SuggestionService::new(
        DiscogsClient::new(base_url, timeout).unwrap(),
        ItunesClient::new(base_url, timeout).unwrap(),
    )
}

/// Base URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_for_page_shape() {
        let releases = releases_for_page(2, 3);

        assert_eq!(releases.len(), 3);
        assert_eq!(releases[2]["basic_information"]["title"], "Album 2-2");
        assert_eq!(
            releases[2]["basic_information"]["artists"][0]["name"],
            "Artist 2"
        );
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let upstream = MockUpstream::new().with_total(3).spawn().await;

        let body: Value = reqwest::get(format!(
            "{}/users/alice/collection/folders/0/releases",
            upstream.base_url
        ))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

        assert_eq!(body["pagination"]["items"], 3);
        assert_eq!(
            upstream.requests(),
            vec!["/users/alice/collection/folders/0/releases".to_string()]
        );
    }
}
