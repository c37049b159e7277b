//! Storage seams.
//!
//! Every request opens one unit of work through a store, performs its reads
//! and writes on it, then either commits or rolls back. Dropping a unit
//! without committing discards its writes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::*;
use super::DatabaseError;
use crate::query::SearchTerm;

#[async_trait]
pub trait UnitOfWork: Send {
    async fn commit(self: Box<Self>) -> Result<(), DatabaseError>;
    async fn rollback(self: Box<Self>) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait FyyurUnit: UnitOfWork {
    /// All venues ordered by state, city, id
    async fn venues(&mut self) -> Result<Vec<Venue>, DatabaseError>;
    async fn venue(&mut self, id: i32) -> Result<Option<Venue>, DatabaseError>;
    async fn search_venues(&mut self, term: &SearchTerm) -> Result<Vec<Venue>, DatabaseError>;
    async fn insert_venue(&mut self, venue: NewVenue) -> Result<Venue, DatabaseError>;
    async fn update_venue(&mut self, venue: &Venue) -> Result<(), DatabaseError>;
    /// Also removes the venue's shows. `false` when no such venue
    async fn delete_venue(&mut self, id: i32) -> Result<bool, DatabaseError>;

    /// All artists ordered by id
    async fn artists(&mut self) -> Result<Vec<Artist>, DatabaseError>;
    async fn artist(&mut self, id: i32) -> Result<Option<Artist>, DatabaseError>;
    async fn search_artists(&mut self, term: &SearchTerm) -> Result<Vec<Artist>, DatabaseError>;
    async fn insert_artist(&mut self, artist: NewArtist) -> Result<Artist, DatabaseError>;
    async fn update_artist(&mut self, artist: &Artist) -> Result<(), DatabaseError>;
    async fn delete_artist(&mut self, id: i32) -> Result<bool, DatabaseError>;

    /// Count of shows starting after `now`, keyed by venue id
    async fn upcoming_shows_by_venue(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError>;
    async fn upcoming_shows_by_artist(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError>;

    /// All shows ordered by start time
    async fn shows(&mut self) -> Result<Vec<ShowListing>, DatabaseError>;
    async fn shows_for_venue(&mut self, venue_id: i32) -> Result<Vec<ShowListing>, DatabaseError>;
    async fn shows_for_artist(&mut self, artist_id: i32) -> Result<Vec<ShowListing>, DatabaseError>;
    /// Fails with `Constraint` when either side does not exist
    async fn insert_show(&mut self, show: NewShow) -> Result<Show, DatabaseError>;
}

#[async_trait]
pub trait TriviaUnit: UnitOfWork {
    /// All categories ordered by id
    async fn categories(&mut self) -> Result<Vec<Category>, DatabaseError>;
    async fn insert_category(&mut self, kind: &str) -> Result<Category, DatabaseError>;

    /// All questions ordered by id
    async fn questions(&mut self) -> Result<Vec<Question>, DatabaseError>;
    async fn questions_in_category(&mut self, category: i32) -> Result<Vec<Question>, DatabaseError>;
    async fn search_questions(&mut self, term: &SearchTerm) -> Result<Vec<Question>, DatabaseError>;
    /// Fails with `Constraint` when the category does not exist
    async fn insert_question(&mut self, question: NewQuestion) -> Result<Question, DatabaseError>;
    async fn delete_question(&mut self, id: i32) -> Result<bool, DatabaseError>;

    /// Questions in `category` (all when `None`) whose id is not in `exclude`
    async fn quiz_candidates(
        &mut self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DatabaseError>;
}

#[async_trait]
pub trait CastingUnit: UnitOfWork {
    /// All actors ordered by id
    async fn actors(&mut self) -> Result<Vec<Actor>, DatabaseError>;
    async fn actor(&mut self, id: i32) -> Result<Option<Actor>, DatabaseError>;
    async fn insert_actor(&mut self, actor: NewActor) -> Result<Actor, DatabaseError>;
    async fn update_actor(&mut self, actor: &Actor) -> Result<(), DatabaseError>;
    async fn delete_actor(&mut self, id: i32) -> Result<bool, DatabaseError>;

    /// All movies ordered by id
    async fn movies(&mut self) -> Result<Vec<Movie>, DatabaseError>;
    async fn movie(&mut self, id: i32) -> Result<Option<Movie>, DatabaseError>;
    async fn insert_movie(&mut self, movie: NewMovie) -> Result<Movie, DatabaseError>;
    async fn update_movie(&mut self, movie: &Movie) -> Result<(), DatabaseError>;
    async fn delete_movie(&mut self, id: i32) -> Result<bool, DatabaseError>;

    /// Actors cast in a movie ordered by id
    async fn cast(&mut self, movie_id: i32) -> Result<Vec<Actor>, DatabaseError>;
    /// Fails with `Constraint` on a missing side or an existing pair
    async fn add_performance(&mut self, performance: Performance) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait FyyurStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn FyyurUnit>, DatabaseError>;
}

#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TriviaUnit>, DatabaseError>;
}

#[async_trait]
pub trait CastingStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn CastingUnit>, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
