// handlers/fyyur/venues.rs - Venue handlers

use axum::extract::State;

use super::FyyurState;
use crate::api::fyyur::{
    group_by_area, search_hits, AreaList, EntitySummary, SearchPayload, SearchResults,
    VenueDetail, VenueEnvelope, VenuePayload, VenueUpdated,
};
use crate::api::{Created, Deleted};
use crate::database::models::Schedule;
use crate::error::{ApiError, NOT_FOUND};
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, JsonBody};
use crate::query::SearchTerm;

/// GET /venues - venues grouped by state and city with upcoming show counts
pub async fn venues_get(State(state): State<FyyurState>) -> ApiResult<AreaList> {
    let now = state.clock.now();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let venues = unit.venues().await?;
        let upcoming = unit.upcoming_shows_by_venue(now).await?;
        Ok::<_, ApiError>(group_by_area(venues, &upcoming))
    }
    .await;
    let areas = settle(unit, outcome).await?;

    Ok(ApiResponse::success(AreaList { areas }))
}

/// POST /venues/search - venues whose name contains the term, ignoring case
pub async fn venues_search(
    State(state): State<FyyurState>,
    JsonBody(payload): JsonBody<SearchPayload>,
) -> ApiResult<SearchResults<EntitySummary>> {
    let term = SearchTerm::new(payload.search_term);
    let now = state.clock.now();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let venues = unit.search_venues(&term).await?;
        let upcoming = unit.upcoming_shows_by_venue(now).await?;
        Ok::<_, ApiError>(search_hits(venues.into_iter().map(|v| (v.id, v.name)), &upcoming))
    }
    .await;

    Ok(ApiResponse::success(settle(unit, outcome).await?))
}

/// GET /venues/:id - venue detail with its past and upcoming shows
pub async fn venue_get(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
) -> ApiResult<VenueEnvelope> {
    let now = state.clock.now();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let venue = unit
            .venue(id)
            .await?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        let shows = unit.shows_for_venue(id).await?;
        Ok::<_, ApiError>(VenueDetail::new(venue, Schedule::split(shows, now)))
    }
    .await;
    let venue = settle(unit, outcome).await?;

    Ok(ApiResponse::success(VenueEnvelope { venue }))
}

/// POST /venues (alias POST /venues/create) - create a venue
pub async fn venue_create(
    State(state): State<FyyurState>,
    JsonBody(payload): JsonBody<VenuePayload>,
) -> ApiResult<Created> {
    let new_venue = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.insert_venue(new_venue).await?) }.await;
    let venue = settle(unit, outcome).await?;
    tracing::info!("Venue {} was successfully listed as {}", venue.name, venue.id);

    Ok(ApiResponse::success(Created { created: venue.id }))
}

/// PATCH /venues/:id (alias POST /venues/:id/edit) - merge the given fields into a venue
pub async fn venue_edit(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<VenuePayload>,
) -> ApiResult<VenueUpdated> {
    let changes = payload.into_changes();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let mut venue = unit
            .venue(id)
            .await?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
        changes.apply(&mut venue);
        unit.update_venue(&venue).await?;
        Ok::<_, ApiError>(venue)
    }
    .await;
    let venue = settle(unit, outcome).await?;
    tracing::info!("Venue {} was successfully updated", id);

    Ok(ApiResponse::success(VenueUpdated {
        updated: id,
        venue: venue.into(),
    }))
}

/// DELETE /venues/:id - remove a venue and its shows
pub async fn venue_delete(
    State(state): State<FyyurState>,
    EntityId(id): EntityId,
) -> ApiResult<Deleted> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        if !unit.delete_venue(id).await? {
            return Err(ApiError::not_found(NOT_FOUND));
        }
        Ok::<_, ApiError>(())
    }
    .await;
    settle(unit, outcome).await?;
    tracing::info!("Venue {} was successfully deleted", id);

    Ok(ApiResponse::success(Deleted { deleted: id }))
}
