// handlers/casting/mod.rs - Casting agency API
//
// Every route takes an `Authorized<P>` argument, so a request never reaches
// the store without a verified token granting the route's permission.

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, patch},
    Router,
};

use crate::auth::TokenVerifier;
use crate::database::CastingStore;

pub mod actors; // /actors, /actors/:id
pub mod movies; // /movies, /movies/:id, /movies/:id/actors

pub use actors::{actor_create, actor_delete, actor_edit, actors_get};
pub use movies::{cast_add, cast_get, movie_create, movie_delete, movie_edit, movies_get};

pub(crate) fn actor_not_found(id: i32) -> String {
    format!("Actor with id {} not found in database.", id)
}

pub(crate) fn movie_not_found(id: i32) -> String {
    format!("Movie with id {} not found in DB.", id)
}

#[derive(Clone)]
pub struct CastingState {
    pub store: Arc<dyn CastingStore>,
    pub verifier: Arc<TokenVerifier>,
    pub per_page: usize,
}

impl FromRef<CastingState> for Arc<TokenVerifier> {
    fn from_ref(state: &CastingState) -> Self {
        state.verifier.clone()
    }
}

pub fn router(state: CastingState) -> Router {
    Router::new()
        .route("/actors", get(actors_get).post(actor_create))
        .route("/actors/:id", patch(actor_edit).delete(actor_delete))
        .route("/movies", get(movies_get).post(movie_create))
        .route("/movies/:id", patch(movie_edit).delete(movie_delete))
        .route("/movies/:id/actors", get(cast_get).post(cast_add))
        .with_state(state)
}
