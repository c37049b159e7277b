// handlers/fyyur/mod.rs - Venue and artist booking API
//
// Shows are classified past/upcoming against the injected clock, so every
// handler that reports show counts reads "now" from the state, never the OS.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::clock::Clock;
use crate::database::FyyurStore;

pub mod artists; // /artists, /artists/search, /artists/:id, /artists/:id/edit
pub mod shows; // /shows, /shows/create
pub mod venues; // /venues, /venues/search, /venues/:id, /venues/:id/edit

pub use artists::{artist_create, artist_delete, artist_edit, artist_get, artists_get, artists_search};
pub use shows::{show_create, shows_get};
pub use venues::{venue_create, venue_delete, venue_edit, venue_get, venues_get, venues_search};

#[derive(Clone)]
pub struct FyyurState {
    pub store: Arc<dyn FyyurStore>,
    pub clock: Arc<dyn Clock>,
}

pub fn router(state: FyyurState) -> Router {
    Router::new()
        .route("/venues", get(venues_get).post(venue_create))
        .route("/venues/create", post(venue_create))
        .route("/venues/search", post(venues_search))
        .route(
            "/venues/:id",
            get(venue_get).patch(venue_edit).delete(venue_delete),
        )
        .route("/venues/:id/edit", post(venue_edit))
        .route("/artists", get(artists_get).post(artist_create))
        .route("/artists/create", post(artist_create))
        .route("/artists/search", post(artists_search))
        .route(
            "/artists/:id",
            get(artist_get).patch(artist_edit).delete(artist_delete),
        )
        .route("/artists/:id/edit", post(artist_edit))
        .route("/shows", get(shows_get).post(show_create))
        .route("/shows/create", post(show_create))
        .with_state(state)
}
