//! HTTP API integration tests.
//!
//! Route dispatch, input validation and status mapping, with every scrapper
//! replaced by a mock.

mod common;

use axum::http::StatusCode;
use common::TestFixture;

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_discography_route() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/testartist").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        "Discography of testartist downloaded successfully"
    );
    assert_eq!(
        fixture.discography.executed(),
        vec!["https://testartist.bandcamp.com/music"]
    );
}

#[tokio::test]
async fn test_album_route() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/testartist/testalbum").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        "Album testalbum of testartist downloaded successfully"
    );
    assert_eq!(
        fixture.album.executed(),
        vec!["https://testartist.bandcamp.com/album/testalbum"]
    );
}

#[tokio::test]
async fn test_track_route() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/testartist/track/testtrack").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        "Track testtrack of testartist downloaded successfully"
    );
    assert_eq!(
        fixture.track.executed(),
        vec!["https://testartist.bandcamp.com/track/testtrack"]
    );
}

#[tokio::test]
async fn test_invalid_slug_is_rejected() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/Test_Artist").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = fixture.get("/api/v1/testartist/Bad%20Album").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(fixture.executed_count(), 0);
}

#[tokio::test]
async fn test_scrapper_failure_is_500_with_error_text() {
    let fixture = TestFixture::new();
    fixture
        .album
        .fail_on("https://testartist.bandcamp.com/album/broken", "upstream gone");

    let response = fixture.get("/api/v1/testartist/broken").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("upstream gone"));
}

#[tokio::test]
async fn test_scrapp_dispatches_by_kind() {
    let fixture = TestFixture::new();

    for url in [
        "https://band.bandcamp.com/music",
        "https://band.bandcamp.com/album/record",
        "https://band.bandcamp.com/track/song",
    ] {
        let response = fixture.get(&format!("/api/v1/scrapp?url={}", url)).await;
        assert_eq!(response.status, StatusCode::OK, "{}", url);
        assert_eq!(response.body, "Request processed successfully");
    }

    assert_eq!(
        fixture.discography.executed(),
        vec!["https://band.bandcamp.com/music"]
    );
    assert_eq!(
        fixture.album.executed(),
        vec!["https://band.bandcamp.com/album/record"]
    );
    assert_eq!(
        fixture.track.executed(),
        vec!["https://band.bandcamp.com/track/song"]
    );
}

#[tokio::test]
async fn test_scrapp_requires_url() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/scrapp").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = fixture.get("/api/v1/scrapp?url=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scrapp_rejects_invalid_urls() {
    let fixture = TestFixture::new();

    for url in [
        // malformed
        "not%20a%20url",
        // off-domain
        "https://band.example.com/album/record",
        "https://evilbandcamp.com/album/record",
        // not a crawlable page
        "https://band.bandcamp.com/merch",
        "https://band.bandcamp.com/album/record/extra",
        "http://band.bandcamp.com/album/record",
        "https://band.bandcamp.com/album/record%3Fsort%3Ddate",
    ] {
        let response = fixture.get(&format!("/api/v1/scrapp?url={}", url)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", url);
    }

    assert_eq!(fixture.executed_count(), 0);
}

#[tokio::test]
async fn test_scrapp_failure_is_500() {
    let fixture = TestFixture::new();
    fixture
        .track
        .fail_on("https://band.bandcamp.com/track/song", "connection reset");

    let response = fixture
        .get("/api/v1/scrapp?url=https://band.bandcamp.com/track/song")
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("connection reset"));
}
