use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_GENDER: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl NewActor {
    /// `gender` falls back to [`DEFAULT_GENDER`]
    pub fn new(name: String, age: i32, gender: Option<String>) -> Self {
        Self {
            name,
            age,
            gender: gender.unwrap_or_else(|| DEFAULT_GENDER.to_string()),
        }
    }

    pub fn into_actor(self, id: i32) -> Actor {
        Actor {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
        }
    }
}

impl ActorChanges {
    pub fn apply(self, actor: &mut Actor) {
        if let Some(name) = self.name {
            actor.name = name;
        }
        if let Some(age) = self.age {
            actor.age = age;
        }
        if let Some(gender) = self.gender {
            actor.gender = gender;
        }
    }
}
