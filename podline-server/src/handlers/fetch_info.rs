use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use tracing::warn;

use podline_core::GenerationResult;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult, MSG_FETCH_FAILED},
};

#[derive(Debug, Deserialize)]
pub struct FetchInfoRequest {
    #[serde(default)]
    pub link: Option<String>,
}

/// `POST /api/fetch_info`
///
/// The body is parsed by hand so a malformed payload yields the same JSON
/// error envelope as every other failure.
pub async fn fetch_info_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<GenerationResult>> {
    let request: FetchInfoRequest =
        serde_json::from_slice(&body).map_err(|err| {
            warn!(error = %err, "malformed fetch_info body");
            AppError::internal(MSG_FETCH_FAILED)
        })?;

    let link = request.link.unwrap_or_default();
    let card = state.generator.generate(&link).await?;

    Ok(Json(card))
}
