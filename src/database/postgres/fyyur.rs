use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PgUnit;
use crate::database::models::{genres, *};
use crate::database::repository::FyyurUnit;
use crate::database::DatabaseError;
use crate::query::SearchTerm;

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     website, genres, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, website, \
     genres, seeking_venue, seeking_description";

const LISTING_SELECT: &str = "SELECT s.id, s.venue_id, v.name AS venue_name, \
     v.image_link AS venue_image_link, s.artist_id, a.name AS artist_name, \
     a.image_link AS artist_image_link, s.start_time \
     FROM shows s JOIN venues v ON v.id = s.venue_id JOIN artists a ON a.id = s.artist_id";

#[async_trait]
impl FyyurUnit for PgUnit {
    async fn venues(&mut self) -> Result<Vec<Venue>, DatabaseError> {
        let sql = format!("SELECT {} FROM venues ORDER BY state, city, id", VENUE_COLUMNS);
        let rows = sqlx::query_as::<_, Venue>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn venue(&mut self, id: i32) -> Result<Option<Venue>, DatabaseError> {
        let sql = format!("SELECT {} FROM venues WHERE id = $1", VENUE_COLUMNS);
        let row = sqlx::query_as::<_, Venue>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn search_venues(&mut self, term: &SearchTerm) -> Result<Vec<Venue>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM venues WHERE name ILIKE $1 ESCAPE '\\'",
            VENUE_COLUMNS
        );
        let rows = sqlx::query_as::<_, Venue>(&sql)
            .bind(term.like_pattern())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_venue(&mut self, venue: NewVenue) -> Result<Venue, DatabaseError> {
        let sql = format!(
            "INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link, \
             website, genres, seeking_talent, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            VENUE_COLUMNS
        );
        let row = sqlx::query_as::<_, Venue>(&sql)
            .bind(&venue.name)
            .bind(&venue.city)
            .bind(&venue.state)
            .bind(&venue.address)
            .bind(&venue.phone)
            .bind(&venue.image_link)
            .bind(&venue.facebook_link)
            .bind(&venue.website)
            .bind(genres::join(&venue.genres))
            .bind(venue.seeking_talent)
            .bind(&venue.seeking_description)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_venue(&mut self, venue: &Venue) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE venues SET name = $2, city = $3, state = $4, address = $5, phone = $6, \
             image_link = $7, facebook_link = $8, website = $9, genres = $10, \
             seeking_talent = $11, seeking_description = $12 WHERE id = $1",
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website)
        .bind(&venue.genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_venue(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn artists(&mut self) -> Result<Vec<Artist>, DatabaseError> {
        let sql = format!("SELECT {} FROM artists ORDER BY id", ARTIST_COLUMNS);
        let rows = sqlx::query_as::<_, Artist>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn artist(&mut self, id: i32) -> Result<Option<Artist>, DatabaseError> {
        let sql = format!("SELECT {} FROM artists WHERE id = $1", ARTIST_COLUMNS);
        let row = sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn search_artists(&mut self, term: &SearchTerm) -> Result<Vec<Artist>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM artists WHERE name ILIKE $1 ESCAPE '\\'",
            ARTIST_COLUMNS
        );
        let rows = sqlx::query_as::<_, Artist>(&sql)
            .bind(term.like_pattern())
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_artist(&mut self, artist: NewArtist) -> Result<Artist, DatabaseError> {
        let sql = format!(
            "INSERT INTO artists (name, city, state, phone, image_link, facebook_link, website, \
             genres, seeking_venue, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            ARTIST_COLUMNS
        );
        let row = sqlx::query_as::<_, Artist>(&sql)
            .bind(&artist.name)
            .bind(&artist.city)
            .bind(&artist.state)
            .bind(&artist.phone)
            .bind(&artist.image_link)
            .bind(&artist.facebook_link)
            .bind(&artist.website)
            .bind(genres::join(&artist.genres))
            .bind(artist.seeking_venue)
            .bind(&artist.seeking_description)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_artist(&mut self, artist: &Artist) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE artists SET name = $2, city = $3, state = $4, phone = $5, image_link = $6, \
             facebook_link = $7, website = $8, genres = $9, seeking_venue = $10, \
             seeking_description = $11 WHERE id = $1",
        )
        .bind(artist.id)
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website)
        .bind(&artist.genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn delete_artist(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upcoming_shows_by_venue(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT venue_id, COUNT(*) FROM shows WHERE start_time > $1 GROUP BY venue_id",
        )
        .bind(now)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().collect())
    }

    async fn upcoming_shows_by_artist(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            "SELECT artist_id, COUNT(*) FROM shows WHERE start_time > $1 GROUP BY artist_id",
        )
        .bind(now)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().collect())
    }

    async fn shows(&mut self) -> Result<Vec<ShowListing>, DatabaseError> {
        let sql = format!("{} ORDER BY s.start_time, s.id", LISTING_SELECT);
        let rows = sqlx::query_as::<_, ShowListing>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn shows_for_venue(&mut self, venue_id: i32) -> Result<Vec<ShowListing>, DatabaseError> {
        let sql = format!("{} WHERE s.venue_id = $1 ORDER BY s.start_time, s.id", LISTING_SELECT);
        let rows = sqlx::query_as::<_, ShowListing>(&sql)
            .bind(venue_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn shows_for_artist(&mut self, artist_id: i32) -> Result<Vec<ShowListing>, DatabaseError> {
        let sql = format!("{} WHERE s.artist_id = $1 ORDER BY s.start_time, s.id", LISTING_SELECT);
        let rows = sqlx::query_as::<_, ShowListing>(&sql)
            .bind(artist_id)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_show(&mut self, show: NewShow) -> Result<Show, DatabaseError> {
        let row = sqlx::query_as::<_, Show>(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES ($1, $2, $3) \
             RETURNING id, venue_id, artist_id, start_time",
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }
}
