use serde::Deserialize;

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

/// Axum handler for `GET /api/v1/search?term=`.
///
/// Verifies the anti-forgery token, then delegates to the aggregator.
/// The aggregator itself is side-effect free, so there is nothing to
/// roll back on failure.
#[cfg(feature = "ssr")]
pub async fn search_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::extract::Query(params): axum::extract::Query<SearchQuery>,
) -> Result<axum::Json<crate::models::search::SearchResultSet>, crate::error::AppError> {
    crate::auth::session::verify_request(&jar, &headers, &state.session_secret)?;

    let results =
        crate::search::aggregator::run_search(state.content_store.as_ref(), &params.term)
            .await?;
    Ok(axum::Json(results))
}
