// handlers/trivia/mod.rs - Trivia quiz API
//
// Questions are listed ten to a page, searched by substring, created and
// deleted; quizzes draw one random unseen question at a time.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::database::TriviaStore;

pub mod categories; // GET /categories, GET /categories/:id/questions
pub mod questions; // GET/POST /questions, DELETE /questions/:id
pub mod quizzes; // POST /quizzes

pub use categories::{categories_get, category_questions_get};
pub use questions::{question_delete, questions_get, questions_post};
pub use quizzes::quizzes_post;

#[derive(Clone)]
pub struct TriviaState {
    pub store: Arc<dyn TriviaStore>,
    pub per_page: usize,
}

pub fn router(state: TriviaState) -> Router {
    Router::new()
        .route("/categories", get(categories_get))
        .route("/categories/:id/questions", get(category_questions_get))
        .route("/questions", get(questions_get).post(questions_post))
        .route("/questions/:id", delete(question_delete))
        .route("/quizzes", post(quizzes_post))
        .with_state(state)
}
