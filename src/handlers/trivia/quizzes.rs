// handlers/trivia/quizzes.rs - POST /quizzes handler

use axum::extract::State;
use rand::seq::SliceRandom;

use super::TriviaState;
use crate::api::trivia::{QuestionView, QuizPayload, QuizQuestion};
use crate::database::models::Question;
use crate::error::{ApiError, NOT_FOUND};
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};

/// POST /quizzes - one random question from the category not yet seen
pub async fn quizzes_post(
    State(state): State<TriviaState>,
    JsonBody(payload): JsonBody<QuizPayload>,
) -> ApiResult<QuizQuestion> {
    let category = payload.category_filter();

    let mut unit = state.store.begin().await?;
    let outcome = async {
        Ok::<_, ApiError>(unit.quiz_candidates(category, &payload.previous_questions).await?)
    }
    .await;
    let candidates = settle(unit, outcome).await?;

    let question = pick(&candidates).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(QuizQuestion {
        question: QuestionView::from(question.clone()),
    }))
}

/// Uniform choice over the candidates; `None` only when there are none
fn pick(candidates: &[Question]) -> Option<&Question> {
    candidates.choose(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i32) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            answer: "answer".into(),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn pick_stays_within_candidates() {
        assert!(pick(&[]).is_none());
        assert_eq!(pick(&[question(7)]).map(|q| q.id), Some(7));

        let candidates: Vec<Question> = (1..=3).map(question).collect();
        for _ in 0..200 {
            let chosen = pick(&candidates).unwrap();
            assert!(candidates.contains(chosen));
        }
    }
}
