/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// The three services this crate can serve.
/// Used by the CLI to pick a router and by the root endpoint to describe itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    /// Venue and artist booking
    Fyyur,
    /// Trivia questions and quiz play
    Trivia,
    /// Actors and movies behind JWT permissions
    Casting,
}

impl AppKind {
    pub fn name(&self) -> &'static str {
        match self {
            AppKind::Fyyur => "fyyur",
            AppKind::Trivia => "trivia",
            AppKind::Casting => "casting",
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
