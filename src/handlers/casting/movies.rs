// handlers/casting/movies.rs - Movie and cast handlers

use axum::extract::{Query, State};

use super::{actor_not_found, movie_not_found, CastingState};
use crate::api::casting::{
    ActorView, CastPayload, CastUpdated, MovieCast, MovieList, MoviePayload, MovieUpdated,
    MovieView,
};
use crate::api::{Created, Deleted};
use crate::auth::guard::{DeleteMovies, GetMovies, PatchMovies, PostMovies};
use crate::auth::Authorized;
use crate::database::models::Performance;
use crate::error::ApiError;
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, JsonBody, PageQuery};

/// GET /movies - one page of movies ordered by id
pub async fn movies_get(
    _auth: Authorized<GetMovies>,
    State(state): State<CastingState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<MovieList> {
    let page = query.page(state.per_page);

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.movies().await?) }.await;
    let selection = settle(unit, outcome).await?;

    let movies: Vec<MovieView> = page.take(selection).into_iter().map(MovieView::from).collect();
    if movies.is_empty() {
        return Err(ApiError::not_found("no movies found in DB."));
    }

    Ok(ApiResponse::success(MovieList { movies }))
}

/// POST /movies - create a movie
pub async fn movie_create(
    auth: Authorized<PostMovies>,
    State(state): State<CastingState>,
    JsonBody(payload): JsonBody<MoviePayload>,
) -> ApiResult<Created> {
    let new_movie = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.insert_movie(new_movie).await?) }.await;
    let movie = settle(unit, outcome).await?;
    tracing::info!("{} created movie {}", auth.subject(), movie.id);

    Ok(ApiResponse::success(Created { created: movie.id }))
}

/// PATCH /movies/:id - merge the given fields into a movie
pub async fn movie_edit(
    auth: Authorized<PatchMovies>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<MoviePayload>,
) -> ApiResult<MovieUpdated> {
    let changes = payload.into_changes();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let mut movie = unit
            .movie(id)
            .await?
            .ok_or_else(|| ApiError::not_found(movie_not_found(id)))?;
        changes.apply(&mut movie);
        unit.update_movie(&movie).await?;
        Ok::<_, ApiError>(movie)
    }
    .await;
    let movie = settle(unit, outcome).await?;
    tracing::info!("{} updated movie {}", auth.subject(), id);

    Ok(ApiResponse::success(MovieUpdated {
        updated: id,
        movie: vec![movie.into()],
    }))
}

/// DELETE /movies/:id - remove a movie and its performances
pub async fn movie_delete(
    auth: Authorized<DeleteMovies>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
) -> ApiResult<Deleted> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        if !unit.delete_movie(id).await? {
            return Err(ApiError::not_found(movie_not_found(id)));
        }
        Ok::<_, ApiError>(())
    }
    .await;
    settle(unit, outcome).await?;
    tracing::info!("{} deleted movie {}", auth.subject(), id);

    Ok(ApiResponse::success(Deleted { deleted: id }))
}

/// GET /movies/:id/actors - a movie with the actors cast in it
pub async fn cast_get(
    _auth: Authorized<GetMovies>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
) -> ApiResult<MovieCast> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        let movie = unit
            .movie(id)
            .await?
            .ok_or_else(|| ApiError::not_found(movie_not_found(id)))?;
        let actors = unit.cast(id).await?;
        Ok::<_, ApiError>((movie, actors))
    }
    .await;
    let (movie, actors) = settle(unit, outcome).await?;

    Ok(ApiResponse::success(MovieCast {
        movie: movie.into(),
        actors: actors.into_iter().map(ActorView::from).collect(),
    }))
}

/// POST /movies/:id/actors - cast an actor in a movie
pub async fn cast_add(
    auth: Authorized<PatchMovies>,
    State(state): State<CastingState>,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<CastPayload>,
) -> ApiResult<CastUpdated> {
    let actor_id = payload
        .actor_id
        .ok_or_else(|| ApiError::unprocessable_entity("no actor_id provided."))?;

    let mut unit = state.store.begin().await?;
    let outcome = async {
        if unit.movie(id).await?.is_none() {
            return Err(ApiError::not_found(movie_not_found(id)));
        }
        if unit.actor(actor_id).await?.is_none() {
            return Err(ApiError::not_found(actor_not_found(actor_id)));
        }
        unit.add_performance(Performance {
            movie_id: id,
            actor_id,
        })
        .await?;
        Ok::<_, ApiError>(unit.cast(id).await?)
    }
    .await;
    let actors = settle(unit, outcome).await?;
    tracing::info!("{} cast actor {} in movie {}", auth.subject(), actor_id, id);

    Ok(ApiResponse::success(CastUpdated {
        updated: id,
        actors: actors.into_iter().map(ActorView::from).collect(),
    }))
}
