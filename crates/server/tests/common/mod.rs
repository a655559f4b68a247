//! Common test utilities for API testing with mocks.
//!
//! Builds the router in-process with a mock scrapper per page kind, so route
//! dispatch and status mapping can be checked without touching the network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tapedeck_core::testing::MockScrapper;
use tapedeck_server::{api::create_router, state::AppState};

pub const DOMAIN: &str = "bandcamp.com";

/// Test fixture for the HTTP API.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_album_route() {
///     let fixture = TestFixture::new();
///     let response = fixture.get("/api/v1/band/record").await;
///     assert_eq!(response.status, StatusCode::OK);
///     assert_eq!(fixture.album.executed().len(), 1);
/// }
/// ```
pub struct TestFixture {
    pub router: Router,
    pub discography: Arc<MockScrapper>,
    pub album: Arc<MockScrapper>,
    pub track: Arc<MockScrapper>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestFixture {
    pub fn new() -> Self {
        let discography = Arc::new(MockScrapper::new());
        let album = Arc::new(MockScrapper::new());
        let track = Arc::new(MockScrapper::new());

        let state = Arc::new(AppState::new(
            DOMAIN,
            Arc::clone(&discography) as _,
            Arc::clone(&album) as _,
            Arc::clone(&track) as _,
        ));

        Self {
            router: create_router(state),
            discography,
            album,
            track,
        }
    }

    /// Total number of crawls started, across all scrappers.
    pub fn executed_count(&self) -> usize {
        self.discography.executed().len()
            + self.album.executed().len()
            + self.track.executed().len()
    }

    /// Send a GET request to the router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TestResponse {
            status,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}
