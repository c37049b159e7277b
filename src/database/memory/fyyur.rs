use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{missing, MemoryUnit};
use crate::database::models::*;
use crate::database::repository::FyyurUnit;
use crate::database::DatabaseError;
use crate::query::SearchTerm;

impl MemoryUnit {
    fn listing(&self, show: &Show) -> Option<ShowListing> {
        let venue = self.working.venues.rows.get(&show.venue_id)?;
        let artist = self.working.artists.rows.get(&show.artist_id)?;
        Some(ShowListing {
            id: show.id,
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: show.start_time,
        })
    }

    fn listings(&self, keep: impl Fn(&Show) -> bool) -> Vec<ShowListing> {
        let mut listings: Vec<ShowListing> = self
            .working
            .shows
            .rows
            .values()
            .filter(|show| keep(*show))
            .filter_map(|show| self.listing(show))
            .collect();
        listings.sort_by_key(|s| (s.start_time, s.id));
        listings
    }

    fn count_upcoming(&self, now: DateTime<Utc>, key: impl Fn(&Show) -> i32) -> HashMap<i32, i64> {
        let mut counts = HashMap::new();
        for show in self.working.shows.rows.values().filter(|s| s.is_upcoming(now)) {
            *counts.entry(key(show)).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl FyyurUnit for MemoryUnit {
    async fn venues(&mut self) -> Result<Vec<Venue>, DatabaseError> {
        let mut venues = self.working.venues.all();
        venues.sort_by(|a, b| (&a.state, &a.city, a.id).cmp(&(&b.state, &b.city, b.id)));
        Ok(venues)
    }

    async fn venue(&mut self, id: i32) -> Result<Option<Venue>, DatabaseError> {
        Ok(self.working.venues.get(id))
    }

    async fn search_venues(&mut self, term: &SearchTerm) -> Result<Vec<Venue>, DatabaseError> {
        Ok(self.working.venues.filter(|v| term.matches(&v.name)))
    }

    async fn insert_venue(&mut self, venue: NewVenue) -> Result<Venue, DatabaseError> {
        Ok(self.working.venues.insert_with(|id| venue.into_venue(id)))
    }

    async fn update_venue(&mut self, venue: &Venue) -> Result<(), DatabaseError> {
        self.working.venues.replace(venue.id, venue.clone());
        Ok(())
    }

    async fn delete_venue(&mut self, id: i32) -> Result<bool, DatabaseError> {
        if !self.working.venues.remove(id) {
            return Ok(false);
        }
        self.working.shows.rows.retain(|_, show| show.venue_id != id);
        Ok(true)
    }

    async fn artists(&mut self) -> Result<Vec<Artist>, DatabaseError> {
        Ok(self.working.artists.all())
    }

    async fn artist(&mut self, id: i32) -> Result<Option<Artist>, DatabaseError> {
        Ok(self.working.artists.get(id))
    }

    async fn search_artists(&mut self, term: &SearchTerm) -> Result<Vec<Artist>, DatabaseError> {
        Ok(self.working.artists.filter(|a| term.matches(&a.name)))
    }

    async fn insert_artist(&mut self, artist: NewArtist) -> Result<Artist, DatabaseError> {
        Ok(self.working.artists.insert_with(|id| artist.into_artist(id)))
    }

    async fn update_artist(&mut self, artist: &Artist) -> Result<(), DatabaseError> {
        self.working.artists.replace(artist.id, artist.clone());
        Ok(())
    }

    async fn delete_artist(&mut self, id: i32) -> Result<bool, DatabaseError> {
        if !self.working.artists.remove(id) {
            return Ok(false);
        }
        self.working.shows.rows.retain(|_, show| show.artist_id != id);
        Ok(true)
    }

    async fn upcoming_shows_by_venue(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError> {
        Ok(self.count_upcoming(now, |s| s.venue_id))
    }

    async fn upcoming_shows_by_artist(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>, DatabaseError> {
        Ok(self.count_upcoming(now, |s| s.artist_id))
    }

    async fn shows(&mut self) -> Result<Vec<ShowListing>, DatabaseError> {
        Ok(self.listings(|_| true))
    }

    async fn shows_for_venue(&mut self, venue_id: i32) -> Result<Vec<ShowListing>, DatabaseError> {
        Ok(self.listings(|s| s.venue_id == venue_id))
    }

    async fn shows_for_artist(&mut self, artist_id: i32) -> Result<Vec<ShowListing>, DatabaseError> {
        Ok(self.listings(|s| s.artist_id == artist_id))
    }

    async fn insert_show(&mut self, show: NewShow) -> Result<Show, DatabaseError> {
        if !self.working.venues.contains(show.venue_id) {
            return Err(missing("venue", show.venue_id));
        }
        if !self.working.artists.contains(show.artist_id) {
            return Err(missing("artist", show.artist_id));
        }
        Ok(self.working.shows.insert_with(|id| Show {
            id,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        }))
    }
}
