// handlers/fyyur/shows.rs - Show handlers

use axum::extract::State;

use super::FyyurState;
use crate::api::fyyur::{ShowList, ShowPayload, ShowView};
use crate::api::Created;
use crate::error::ApiError;
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};

/// GET /shows - every show with venue and artist names, earliest first
pub async fn shows_get(State(state): State<FyyurState>) -> ApiResult<ShowList> {
    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.shows().await?) }.await;
    let shows = settle(unit, outcome).await?;

    Ok(ApiResponse::success(ShowList {
        shows: shows.into_iter().map(ShowView::from).collect(),
    }))
}

/// POST /shows (alias POST /shows/create) - book an artist at a venue
pub async fn show_create(
    State(state): State<FyyurState>,
    JsonBody(payload): JsonBody<ShowPayload>,
) -> ApiResult<Created> {
    let new_show = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.insert_show(new_show).await?) }.await;
    let show = settle(unit, outcome).await?;
    tracing::info!(
        "Show {} was successfully listed (venue {}, artist {})",
        show.id,
        show.venue_id,
        show.artist_id
    );

    Ok(ApiResponse::success(Created { created: show.id }))
}
