//! Lenient field decoders for request payloads.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IntLike {
    fn to_i32<E: de::Error>(self) -> Result<i32, E> {
        let wide = match self {
            IntLike::Int(i) => i,
            IntLike::Float(f) if f.fract() == 0.0 => f as i64,
            IntLike::Float(f) => return Err(E::custom(format!("expected an integer, got {}", f))),
            IntLike::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("expected an integer, got '{}'", s)))?,
        };
        i32::try_from(wide).map_err(|_| E::custom(format!("integer {} out of range", wide)))
    }
}

/// Optional integer given as a JSON number or a numeric string
pub fn int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntLike>::deserialize(deserializer)?
        .map(IntLike::to_i32)
        .transpose()
}

/// List of integers, each a number or numeric string; `null` is empty
pub fn int_list<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<IntLike>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(IntLike::to_i32)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenreInput {
    List(Vec<String>),
    Joined(String),
}

/// Genres as a JSON array or one comma-separated string
pub fn genres<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<GenreInput>::deserialize(deserializer)?.map(|input| match input {
        GenreInput::List(list) => list,
        GenreInput::Joined(text) => crate::database::models::genres::split(&text),
    }))
}
