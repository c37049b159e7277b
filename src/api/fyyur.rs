use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{de, required};
use crate::database::models::show::parse_start_time;
use crate::database::models::*;
use crate::error::ApiError;

// Request payloads

/// Body of venue create and edit requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenuePayload {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default, deserialize_with = "de::genres")]
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl VenuePayload {
    pub fn into_new(self) -> Result<NewVenue, ApiError> {
        Ok(NewVenue {
            name: required(self.name).ok_or_else(|| ApiError::missing_field("name"))?,
            city: required(self.city).ok_or_else(|| ApiError::missing_field("city"))?,
            state: required(self.state).ok_or_else(|| ApiError::missing_field("state"))?,
            address: required(self.address).ok_or_else(|| ApiError::missing_field("address"))?,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: self.genres.unwrap_or_default(),
            seeking_talent: self.seeking_talent.unwrap_or(false),
            seeking_description: self.seeking_description,
        })
    }

    pub fn into_changes(self) -> VenueChanges {
        VenueChanges {
            name: required(self.name),
            city: required(self.city),
            state: required(self.state),
            address: required(self.address),
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: self.genres,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// Body of artist create and edit requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPayload {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default, deserialize_with = "de::genres")]
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistPayload {
    pub fn into_new(self) -> Result<NewArtist, ApiError> {
        Ok(NewArtist {
            name: required(self.name).ok_or_else(|| ApiError::missing_field("name"))?,
            city: required(self.city).ok_or_else(|| ApiError::missing_field("city"))?,
            state: required(self.state).ok_or_else(|| ApiError::missing_field("state"))?,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: self.genres.unwrap_or_default(),
            seeking_venue: self.seeking_venue.unwrap_or(false),
            seeking_description: self.seeking_description,
        })
    }

    pub fn into_changes(self) -> ArtistChanges {
        ArtistChanges {
            name: required(self.name),
            city: required(self.city),
            state: required(self.state),
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: self.genres,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowPayload {
    #[serde(default, deserialize_with = "de::int")]
    pub venue_id: Option<i32>,
    #[serde(default, deserialize_with = "de::int")]
    pub artist_id: Option<i32>,
    pub start_time: Option<String>,
}

impl ShowPayload {
    pub fn into_new(self) -> Result<NewShow, ApiError> {
        let venue_id = self.venue_id.ok_or_else(|| ApiError::missing_field("venue_id"))?;
        let artist_id = self.artist_id.ok_or_else(|| ApiError::missing_field("artist_id"))?;
        let raw = required(self.start_time).ok_or_else(|| ApiError::missing_field("start_time"))?;
        let start_time = parse_start_time(&raw)
            .ok_or_else(|| ApiError::bad_request(format!("invalid start_time '{}'", raw)))?;
        Ok(NewShow {
            venue_id,
            artist_id,
            start_time,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default, alias = "searchTerm")]
    pub search_term: String,
}

// Response views

/// `{id, name, num_upcoming_shows}`, used in area listings and search hits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group venues under their (state, city), each with its upcoming show count
pub fn group_by_area(venues: Vec<Venue>, upcoming: &HashMap<i32, i64>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<EntitySummary>> = BTreeMap::new();
    for venue in venues {
        let summary = EntitySummary {
            id: venue.id,
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        };
        areas.entry((venue.state, venue.city)).or_default().push(summary);
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| Area { city, state, venues })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

pub fn search_hits<I>(rows: I, upcoming: &HashMap<i32, i64>) -> SearchResults<EntitySummary>
where
    I: IntoIterator<Item = (i32, String)>,
{
    rows.into_iter()
        .map(|(id, name)| EntitySummary {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect::<Vec<_>>()
        .into()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueInfo {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<Venue> for VenueInfo {
    fn from(venue: Venue) -> Self {
        Self {
            genres: venue.genre_list(),
            id: venue.id,
            name: venue.name,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
        }
    }
}

/// A show as seen from its venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListing> for ArtistAppearance {
    fn from(show: ShowListing) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time,
        }
    }
}

/// A show as seen from its artist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListing> for VenueAppearance {
    fn from(show: ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub info: VenueInfo,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: Venue, schedule: Schedule) -> Self {
        let past_shows: Vec<ArtistAppearance> = schedule.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistAppearance> =
            schedule.upcoming.into_iter().map(Into::into).collect();
        Self {
            info: venue.into(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

impl From<Artist> for ArtistSummary {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistInfo {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<Artist> for ArtistInfo {
    fn from(artist: Artist) -> Self {
        Self {
            genres: artist.genre_list(),
            id: artist.id,
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub info: ArtistInfo,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, schedule: Schedule) -> Self {
        let past_shows: Vec<VenueAppearance> = schedule.past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueAppearance> =
            schedule.upcoming.into_iter().map(Into::into).collect();
        Self {
            info: artist.into(),
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowView {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListing> for ShowView {
    fn from(show: ShowListing) -> Self {
        Self {
            id: show.id,
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaList {
    pub areas: Vec<Area>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueEnvelope {
    pub venue: VenueDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueUpdated {
    pub updated: i32,
    pub venue: VenueInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistList {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistEnvelope {
    pub artist: ArtistDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistUpdated {
    pub updated: i32,
    pub artist: ArtistInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowList {
    pub shows: Vec<ShowView>,
}
