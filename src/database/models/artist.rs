use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::genres;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn genre_list(&self) -> Vec<String> {
        genres::split(&self.genres)
    }
}

impl NewArtist {
    pub fn into_artist(self, id: i32) -> Artist {
        Artist {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: genres::join(&self.genres),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

impl ArtistChanges {
    pub fn apply(self, artist: &mut Artist) {
        if let Some(v) = self.name {
            artist.name = v;
        }
        if let Some(v) = self.city {
            artist.city = v;
        }
        if let Some(v) = self.state {
            artist.state = v;
        }
        if let Some(v) = self.phone {
            artist.phone = Some(v);
        }
        if let Some(v) = self.image_link {
            artist.image_link = Some(v);
        }
        if let Some(v) = self.facebook_link {
            artist.facebook_link = Some(v);
        }
        if let Some(v) = self.website {
            artist.website = Some(v);
        }
        if let Some(v) = self.genres {
            artist.genres = genres::join(&v);
        }
        if let Some(v) = self.seeking_venue {
            artist.seeking_venue = v;
        }
        if let Some(v) = self.seeking_description {
            artist.seeking_description = Some(v);
        }
    }
}
