use async_trait::async_trait;

use super::{missing, MemoryUnit};
use crate::database::models::{Actor, Movie, NewActor, NewMovie, Performance};
use crate::database::repository::CastingUnit;
use crate::database::DatabaseError;

#[async_trait]
impl CastingUnit for MemoryUnit {
    async fn actors(&mut self) -> Result<Vec<Actor>, DatabaseError> {
        Ok(self.working.actors.all())
    }

    async fn actor(&mut self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        Ok(self.working.actors.get(id))
    }

    async fn insert_actor(&mut self, actor: NewActor) -> Result<Actor, DatabaseError> {
        Ok(self.working.actors.insert_with(|id| actor.into_actor(id)))
    }

    async fn update_actor(&mut self, actor: &Actor) -> Result<(), DatabaseError> {
        self.working.actors.replace(actor.id, actor.clone());
        Ok(())
    }

    async fn delete_actor(&mut self, id: i32) -> Result<bool, DatabaseError> {
        if !self.working.actors.remove(id) {
            return Ok(false);
        }
        self.working.performances.retain(|p| p.actor_id != id);
        Ok(true)
    }

    async fn movies(&mut self) -> Result<Vec<Movie>, DatabaseError> {
        Ok(self.working.movies.all())
    }

    async fn movie(&mut self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.working.movies.get(id))
    }

    async fn insert_movie(&mut self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        Ok(self.working.movies.insert_with(|id| movie.into_movie(id)))
    }

    async fn update_movie(&mut self, movie: &Movie) -> Result<(), DatabaseError> {
        self.working.movies.replace(movie.id, movie.clone());
        Ok(())
    }

    async fn delete_movie(&mut self, id: i32) -> Result<bool, DatabaseError> {
        if !self.working.movies.remove(id) {
            return Ok(false);
        }
        self.working.performances.retain(|p| p.movie_id != id);
        Ok(true)
    }

    async fn cast(&mut self, movie_id: i32) -> Result<Vec<Actor>, DatabaseError> {
        let working = &self.working;
        Ok(working
            .performances
            .iter()
            .filter(|p| p.movie_id == movie_id)
            .filter_map(|p| working.actors.get(p.actor_id))
            .collect())
    }

    async fn add_performance(&mut self, performance: Performance) -> Result<(), DatabaseError> {
        if !self.working.movies.contains(performance.movie_id) {
            return Err(missing("movie", performance.movie_id));
        }
        if !self.working.actors.contains(performance.actor_id) {
            return Err(missing("actor", performance.actor_id));
        }
        if !self.working.performances.insert(performance) {
            return Err(DatabaseError::Constraint(format!(
                "actor {} already cast in movie {}",
                performance.actor_id, performance.movie_id
            )));
        }
        Ok(())
    }
}
