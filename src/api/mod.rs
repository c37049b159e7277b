//! Wire shapes: request payloads and fixed-field response views per endpoint.

pub mod casting;
pub mod de;
pub mod fyyur;
pub mod trivia;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Created {
    pub created: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub deleted: i32,
}

/// Trimmed value of a required text field, or `None` when absent or blank
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
