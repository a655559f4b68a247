//! Crawl API handlers.
//!
//! Every crawl handler answers with plain text: a confirmation on success,
//! the error message otherwise.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tapedeck_core::{ArtistPage, Scrapper, SiteUrl, UrlKind};
use tracing::{error, info};
use url::Url;

use crate::state::AppState;

type ApiResult = Result<String, (StatusCode, String)>;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Query parameters of `/scrapp`
#[derive(Debug, Deserialize)]
pub struct ScrappParams {
    pub url: Option<String>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Classify a full site URL and crawl it with the matching scrapper.
pub async fn scrapp(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrappParams>,
) -> ApiResult {
    let raw = params
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| bad_request("Scrapp url param is required"))?;
    info!(url = %raw, "Scrapp request");

    let site_url =
        SiteUrl::parse_validated(&raw, state.domain()).map_err(|e| bad_request(e.to_string()))?;
    if !site_url.is_canonical() {
        return Err(bad_request(format!(
            "Not a discography, album or track URL: {}",
            raw
        )));
    }

    let kind = site_url.classify();
    let scrapper = state
        .scrapper(kind)
        .ok_or_else(|| bad_request(format!("Unsupported page kind: {}", kind)))?;
    run(scrapper, site_url.url()).await?;

    Ok("Request processed successfully".to_string())
}

pub async fn discography(
    State(state): State<Arc<AppState>>,
    Path(artist): Path<String>,
) -> ApiResult {
    check_slug("Artist", &artist)?;
    let url = artist_url(&state, &artist, ArtistPage::Discography)?;

    run(scrapper(&state, UrlKind::Discography)?, &url).await?;
    Ok(format!("Discography of {} downloaded successfully", artist))
}

pub async fn album(
    State(state): State<Arc<AppState>>,
    Path((artist, album)): Path<(String, String)>,
) -> ApiResult {
    check_slug("Artist", &artist)?;
    check_slug("Album", &album)?;
    let url = artist_url(&state, &artist, ArtistPage::Album(&album))?;

    run(scrapper(&state, UrlKind::Album)?, &url).await?;
    Ok(format!("Album {} of {} downloaded successfully", album, artist))
}

pub async fn track(
    State(state): State<Arc<AppState>>,
    Path((artist, track)): Path<(String, String)>,
) -> ApiResult {
    check_slug("Artist", &artist)?;
    check_slug("Track", &track)?;
    let url = artist_url(&state, &artist, ArtistPage::Track(&track))?;

    run(scrapper(&state, UrlKind::Track)?, &url).await?;
    Ok(format!("Track {} of {} downloaded successfully", track, artist))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.into())
}

/// Path parameters must be non-empty `[a-z0-9-]` slugs.
fn check_slug(name: &str, value: &str) -> Result<(), (StatusCode, String)> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(bad_request(format!("{} is required as a lowercase slug", name)))
    }
}

fn artist_url(
    state: &AppState,
    artist: &str,
    page: ArtistPage<'_>,
) -> Result<Url, (StatusCode, String)> {
    SiteUrl::for_artist(artist, page, state.domain())
        .map(SiteUrl::into_url)
        .map_err(|e| bad_request(e.to_string()))
}

fn scrapper(state: &AppState, kind: UrlKind) -> Result<&Arc<dyn Scrapper>, (StatusCode, String)> {
    state.scrapper(kind).ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("No scrapper for {}", kind),
        )
    })
}

async fn run(scrapper: &Arc<dyn Scrapper>, url: &Url) -> Result<(), (StatusCode, String)> {
    scrapper.execute(url).await.map_err(|e| {
        error!(url = %url, error = %e, "Crawl failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}
