use async_trait::async_trait;

use super::PgUnit;
use crate::database::models::{Actor, Movie, NewActor, NewMovie, Performance};
use crate::database::repository::CastingUnit;
use crate::database::DatabaseError;

#[async_trait]
impl CastingUnit for PgUnit {
    async fn actors(&mut self) -> Result<Vec<Actor>, DatabaseError> {
        let rows = sqlx::query_as::<_, Actor>("SELECT id, name, age, gender FROM actors ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn actor(&mut self, id: i32) -> Result<Option<Actor>, DatabaseError> {
        let row = sqlx::query_as::<_, Actor>("SELECT id, name, age, gender FROM actors WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_actor(&mut self, actor: NewActor) -> Result<Actor, DatabaseError> {
        let row = sqlx::query_as::<_, Actor>(
            "INSERT INTO actors (name, age, gender) VALUES ($1, $2, $3) \
             RETURNING id, name, age, gender",
        )
        .bind(&actor.name)
        .bind(actor.age)
        .bind(&actor.gender)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn update_actor(&mut self, actor: &Actor) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE actors SET name = $2, age = $3, gender = $4 WHERE id = $1")
            .bind(actor.id)
            .bind(&actor.name)
            .bind(actor.age)
            .bind(&actor.gender)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_actor(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn movies(&mut self) -> Result<Vec<Movie>, DatabaseError> {
        let rows = sqlx::query_as::<_, Movie>("SELECT id, title, release_date FROM movies ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn movie(&mut self, id: i32) -> Result<Option<Movie>, DatabaseError> {
        let row = sqlx::query_as::<_, Movie>("SELECT id, title, release_date FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_movie(&mut self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let row = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, release_date) VALUES ($1, $2) \
             RETURNING id, title, release_date",
        )
        .bind(&movie.title)
        .bind(movie.release_date)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn update_movie(&mut self, movie: &Movie) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE movies SET title = $2, release_date = $3 WHERE id = $1")
            .bind(movie.id)
            .bind(&movie.title)
            .bind(movie.release_date)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_movie(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn cast(&mut self, movie_id: i32) -> Result<Vec<Actor>, DatabaseError> {
        let rows = sqlx::query_as::<_, Actor>(
            "SELECT a.id, a.name, a.age, a.gender FROM actors a \
             JOIN performances p ON p.actor_id = a.id WHERE p.movie_id = $1 ORDER BY a.id",
        )
        .bind(movie_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn add_performance(&mut self, performance: Performance) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO performances (movie_id, actor_id) VALUES ($1, $2)")
            .bind(performance.movie_id)
            .bind(performance.actor_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}
