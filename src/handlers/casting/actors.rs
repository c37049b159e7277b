// handlers/casting/actors.rs - Actor handlers

use axum::extract::{Query, State};

use super::{actor_not_found, CastingState};
use crate::api::casting::{ActorList, ActorPayload, ActorUpdated, ActorView};
use crate::api::{Created, Deleted};
use crate::auth::guard::{DeleteActors, GetActors, PatchActors, PostActors};
use crate::auth::Authorized;
use crate::error::ApiError;
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, JsonBody, PageQuery};

/// GET /actors - one page of actors ordered by id
pub async fn actors_get(
    _auth: Authorized<GetActors>,
    State(state): State<CastingState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<ActorList> {
    let page = query.page(state.per_page);

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.actors().await?) }.await;
    let selection = settle(unit, outcome).await?;

    let actors: Vec<ActorView> = page.take(selection).into_iter().map(ActorView::from).collect();
    if actors.is_empty() {
        return Err(ApiError::not_found("no actors found in database."));
    }

    Ok(ApiResponse::success(ActorList { actors }))
}

/// POST /actors - create an actor; `gender` defaults to "Other"
pub async fn actor_create(
    auth: Authorized<PostActors>,
    State(state): State<CastingState>,
    JsonBody(payload): JsonBody<ActorPayload>,
) -> ApiResult<Created> {
    let new_actor = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.insert_actor(new_actor).await?) }.await;
    let actor = settle(unit, outcome).await?;
    tracing::info!("{} created actor {}", auth.subject(), actor.id);

    Ok(ApiResponse::success(Created { created: actor.id }))
}

/// PATCH /actors/:id - merge the given fields into an actor
pub async fn actor_edit(
    auth: Authorized<PatchActors>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<ActorPayload>,
) -> ApiResult<ActorUpdated> {
    let changes = payload.into_changes();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let mut actor = unit
            .actor(id)
            .await?
            .ok_or_else(|| ApiError::not_found(actor_not_found(id)))?;
        changes.apply(&mut actor);
        unit.update_actor(&actor).await?;
        Ok::<_, ApiError>(actor)
    }
    .await;
    let actor = settle(unit, outcome).await?;
    tracing::info!("{} updated actor {}", auth.subject(), id);

    Ok(ApiResponse::success(ActorUpdated {
        updated: id,
        actor: vec![actor.into()],
    }))
}

/// DELETE /actors/:id - remove an actor and their performances
pub async fn actor_delete(
    auth: Authorized<DeleteActors>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
) -> ApiResult<Deleted> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        if !unit.delete_actor(id).await? {
            return Err(ApiError::not_found(actor_not_found(id)));
        }
        Ok::<_, ApiError>(())
    }
    .await;
    settle(unit, outcome).await?;
    tracing::info!("{} deleted actor {}", auth.subject(), id);

    Ok(ApiResponse::success(Deleted { deleted: id }))
}
