use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::genres;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    /// Comma-joined, see [`genres`]
    pub genres: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Field-wise edit; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Option<Vec<String>>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
}

impl Venue {
    pub fn genre_list(&self) -> Vec<String> {
        genres::split(&self.genres)
    }
}

impl NewVenue {
    pub fn into_venue(self, id: i32) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            genres: genres::join(&self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

impl VenueChanges {
    pub fn apply(self, venue: &mut Venue) {
        if let Some(v) = self.name {
            venue.name = v;
        }
        if let Some(v) = self.city {
            venue.city = v;
        }
        if let Some(v) = self.state {
            venue.state = v;
        }
        if let Some(v) = self.address {
            venue.address = v;
        }
        if let Some(v) = self.phone {
            venue.phone = Some(v);
        }
        if let Some(v) = self.image_link {
            venue.image_link = Some(v);
        }
        if let Some(v) = self.facebook_link {
            venue.facebook_link = Some(v);
        }
        if let Some(v) = self.website {
            venue.website = Some(v);
        }
        if let Some(v) = self.genres {
            venue.genres = genres::join(&v);
        }
        if let Some(v) = self.seeking_talent {
            venue.seeking_talent = v;
        }
        if let Some(v) = self.seeking_description {
            venue.seeking_description = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_keep_stored_values() {
        let mut venue = NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            seeking_talent: true,
            ..Default::default()
        }
        .into_venue(1);

        VenueChanges {
            phone: Some("123-123-1234".into()),
            genres: Some(vec!["Swing".into()]),
            seeking_talent: Some(false),
            ..Default::default()
        }
        .apply(&mut venue);

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(venue.genre_list(), vec!["Swing"]);
        assert!(!venue.seeking_talent);
    }
}
