use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An actor cast in a movie; the pair is unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, FromRow)]
pub struct Performance {
    pub movie_id: i32,
    pub actor_id: i32,
}
