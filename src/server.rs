//! HTTP transport
//!
//! Thin axum service over the search component: each request fetches the
//! current snapshot, builds its own index, runs the query, and hands the
//! ranked posts back as a JSON array with no further transformation.
//! Requests are independent; there is no cross-request state.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tokio::time::{timeout, Duration};
use tracing::{debug, info};

use crate::error::AppError;
use crate::posts::{Post, SnapshotProvider};
use crate::search::{SearchIndex, SearchQuery};

/// Per-request wall-clock budget. The index rebuild is O(n) per query, so
/// the budget is the only brake on oversized snapshots.
const REQUEST_BUDGET: Duration = Duration::from_secs(30);

/// Query parameters for `GET /posts/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub limit: Option<usize>,
}

/// Run the HTTP service until the listener fails
pub async fn serve(provider: SnapshotProvider, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(Arc::new(provider));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("wavesearch listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(provider: Arc<SnapshotProvider>) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/search", get(search_posts))
        .with_state(provider)
}

/// `GET /posts` - the full collection, unranked
async fn list_posts(State(provider): State<Arc<SnapshotProvider>>) -> Response {
    match timeout(REQUEST_BUDGET, provider.fetch_all()).await {
        Ok(Ok(posts)) => Json(posts).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(_) => error_response(&AppError::Timeout(
            "listing exceeded the request budget".to_string(),
        )),
    }
}

/// `GET /posts/search?q=<term>&tags=<a,b>` - ranked fuzzy search
async fn search_posts(
    State(provider): State<Arc<SnapshotProvider>>,
    Query(params): Query<SearchParams>,
) -> Response {
    match timeout(REQUEST_BUDGET, execute_search(&provider, &params)).await {
        Ok(Ok(posts)) => Json(posts).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(_) => error_response(&AppError::Timeout(
            "search exceeded the request budget".to_string(),
        )),
    }
}

/// Shared search implementation, used by the HTTP handler and the CLI.
///
/// The engine itself never caps results; `limit` is applied here because
/// capping is a transport concern.
pub async fn execute_search(
    provider: &SnapshotProvider,
    params: &SearchParams,
) -> Result<Vec<Post>, AppError> {
    let query = SearchQuery::parse(params.q.as_deref(), params.tags.as_deref())?;

    let posts = provider.fetch_all().await?;
    debug!("Searching {} posts", posts.len());

    let index = SearchIndex::build(&posts);
    let mut matches = index.search(&query)?;

    if let Some(limit) = params.limit {
        matches.truncate(limit);
    }

    Ok(matches)
}

/// Map a typed failure to its transport status
fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        AppError::MalformedInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &AppError) -> Response {
    let body = json!({
        "error": err.error_code(),
        "errorMessage": err.message(),
    });
    (status_for(err), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn sample_snapshot() -> tempfile::NamedTempFile {
        snapshot_file(
            r#"[
                { "_id": "1", "title": "Chill Beats", "tags": ["lofi"] },
                { "_id": "2", "title": "Rock Anthem", "tags": ["rock", "guitar"] },
                { "_id": "3", "title": "Lo Fi Vibes", "tags": ["lofi", "chill"] }
            ]"#,
        )
    }

    #[tokio::test]
    async fn test_execute_search_ranks_posts() {
        let file = sample_snapshot();
        let provider = SnapshotProvider::new(file.path());

        let params = SearchParams {
            q: None,
            tags: Some("lofi".to_string()),
            limit: None,
        };
        let results = execute_search(&provider, &params).await.unwrap();

        let titles: Vec<&str> = results.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Chill Beats", "Lo Fi Vibes"]);
    }

    #[tokio::test]
    async fn test_execute_search_applies_limit() {
        let file = sample_snapshot();
        let provider = SnapshotProvider::new(file.path());

        let params = SearchParams {
            q: None,
            tags: Some("lofi".to_string()),
            limit: Some(1),
        };
        let results = execute_search(&provider, &params).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Chill Beats");
    }

    #[tokio::test]
    async fn test_execute_search_rejects_empty_criteria() {
        let file = sample_snapshot();
        let provider = SnapshotProvider::new(file.path());

        let params = SearchParams {
            q: None,
            tags: None,
            limit: None,
        };
        let err = execute_search(&provider, &params).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_execute_search_surfaces_malformed_snapshot() {
        let file = snapshot_file("{ broken");
        let provider = SnapshotProvider::new(file.path());

        let params = SearchParams {
            q: Some("rock".to_string()),
            tags: None,
            limit: None,
        };
        let err = execute_search(&provider, &params).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&AppError::InvalidQuery(String::new())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AppError::MalformedInput(String::new())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&AppError::Timeout(String::new())),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&AppError::Internal(String::new())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
