use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{de, required};
use crate::database::models::{Actor, ActorChanges, Movie, MovieChanges, NewActor, NewMovie};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

impl From<Actor> for ActorView {
    fn from(actor: Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            age: actor.age,
            gender: actor.gender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

impl From<Movie> for MovieView {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorList {
    pub actors: Vec<ActorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieList {
    pub movies: Vec<MovieView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorUpdated {
    pub updated: i32,
    pub actor: Vec<ActorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieUpdated {
    pub updated: i32,
    pub movie: Vec<MovieView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCast {
    pub movie: MovieView,
    pub actors: Vec<ActorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastUpdated {
    pub updated: i32,
    pub actors: Vec<ActorView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorPayload {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::int")]
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl ActorPayload {
    pub fn into_new(self) -> Result<NewActor, ApiError> {
        let name =
            required(self.name).ok_or_else(|| ApiError::unprocessable_entity("no name provided."))?;
        let age = self
            .age
            .filter(|age| *age > 0)
            .ok_or_else(|| ApiError::unprocessable_entity("no age provided."))?;
        Ok(NewActor::new(name, age, required(self.gender)))
    }

    pub fn into_changes(self) -> ActorChanges {
        ActorChanges {
            name: required(self.name),
            age: self.age,
            gender: required(self.gender),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePayload {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl MoviePayload {
    pub fn into_new(self) -> Result<NewMovie, ApiError> {
        let title =
            required(self.title).ok_or_else(|| ApiError::unprocessable_entity("no title provided."))?;
        let release_date = self
            .release_date
            .ok_or_else(|| ApiError::unprocessable_entity("no \"release_date\" provided."))?;
        Ok(NewMovie {
            title,
            release_date,
        })
    }

    pub fn into_changes(self) -> MovieChanges {
        MovieChanges {
            title: required(self.title),
            release_date: self.release_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastPayload {
    #[serde(default, deserialize_with = "de::int")]
    pub actor_id: Option<i32>,
}
