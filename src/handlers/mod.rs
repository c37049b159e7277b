// handlers/mod.rs - Route handlers for the three apps
//
// Each app module owns its state type and a `router` that wires its routes.
// Handlers open one unit of work per request and finish it through `settle`.

pub mod casting; // Movie casting API, every route gated by a JWT permission
pub mod fyyur; // Venue and artist booking
pub mod trivia; // Quiz questions and play

use crate::database::UnitOfWork;
use crate::error::{ApiError, NOT_FOUND, UNPROCESSABLE};

/// Commit the unit when the handler body succeeded, roll it back otherwise
pub async fn settle<U, T>(unit: Box<U>, outcome: Result<T, ApiError>) -> Result<T, ApiError>
where
    U: UnitOfWork + ?Sized,
{
    match outcome {
        Ok(value) => {
            unit.commit().await.map_err(|e| {
                tracing::error!("Commit failed: {}", e);
                ApiError::unprocessable_entity(UNPROCESSABLE)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(e) = unit.rollback().await {
                tracing::error!("Rollback failed: {}", e);
            }
            Err(err)
        }
    }
}

/// Any path no router matched
pub async fn fallback() -> ApiError {
    ApiError::not_found(NOT_FOUND)
}
