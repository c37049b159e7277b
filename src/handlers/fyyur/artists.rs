// handlers/fyyur/artists.rs - Artist handlers

use axum::extract::State;

use super::FyyurState;
use crate::api::fyyur::{
    search_hits, ArtistDetail, ArtistEnvelope, ArtistList, ArtistPayload, ArtistSummary,
    ArtistUpdated, EntitySummary, SearchPayload, SearchResults,
};
use crate::api::{Created, Deleted};
use crate::database::models::Schedule;
use crate::error::{ApiError, NOT_FOUND};
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, JsonBody};
use crate::query::SearchTerm;

/// GET /artists - id and name of every artist
pub async fn artists_get(State(state): State<FyyurState>) -> ApiResult<ArtistList> {
    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.artists().await?) }.await;
    let artists = settle(unit, outcome).await?;

    Ok(ApiResponse::success(ArtistList {
        artists: artists.into_iter().map(ArtistSummary::from).collect(),
    }))
}

/// POST /artists/search - artists whose name contains the term, ignoring case
pub async fn artists_search(
    State(state): State<FyyurState>,
    JsonBody(payload): JsonBody<SearchPayload>,
) -> ApiResult<SearchResults<EntitySummary>> {
    let term = SearchTerm::new(payload.search_term);
    let now = state.clock.now();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let artists = unit.search_artists(&term).await?;
        let upcoming = unit.upcoming_shows_by_artist(now).await?;
        Ok::<_, ApiError>(search_hits(artists.into_iter().map(|a| (a.id, a.name)), &upcoming))
    }
    .await;

    Ok(ApiResponse::success(settle(unit, outcome).await?))
}

/// GET /artists/:id - artist detail with past and upcoming shows
pub async fn artist_get(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
) -> ApiResult<ArtistEnvelope> {
    let now = state.clock.now();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let artist = unit
            .artist(id)
            .await?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        let shows = unit.shows_for_artist(id).await?;
        Ok::<_, ApiError>(ArtistDetail::new(artist, Schedule::split(shows, now)))
    }
    .await;
    let artist = settle(unit, outcome).await?;

    Ok(ApiResponse::success(ArtistEnvelope { artist }))
}

/// POST /artists (alias POST /artists/create) - create an artist
pub async fn artist_create(
    State(state): State<FyyurState>,
    JsonBody(payload): JsonBody<ArtistPayload>,
) -> ApiResult<Created> {
    let new_artist = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.insert_artist(new_artist).await?) }.await;
    let artist = settle(unit, outcome).await?;
    tracing::info!("Artist {} was successfully listed as {}", artist.name, artist.id);

    Ok(ApiResponse::success(Created { created: artist.id }))
}

/// PATCH /artists/:id (alias POST /artists/:id/edit) - merge the given fields into an artist
pub async fn artist_edit(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<ArtistPayload>,
) -> ApiResult<ArtistUpdated> {
    let changes = payload.into_changes();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let mut artist = unit
            .artist(id)
            .await?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        changes.apply(&mut artist);
        unit.update_artist(&artist).await?;
        Ok::<_, ApiError>(artist)
    }
    .await;
    let artist = settle(unit, outcome).await?;
    tracing::info!("Artist {} was successfully updated", id);

    Ok(ApiResponse::success(ArtistUpdated {
        updated: id,
        artist: artist.into(),
    }))
}

/// DELETE /artists/:id - remove an artist and their shows
pub async fn artist_delete(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
) -> ApiResult<Deleted> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        if !unit.delete_artist(id).await? {
            return Err(ApiError::not_found(NOT_FOUND));
        }
        Ok::<_, ApiError>(())
    }
    .await;
    settle(unit, outcome).await?;
    tracing::info!("Artist {} was successfully deleted", id);

    Ok(ApiResponse::success(Deleted { deleted: id }))
}
