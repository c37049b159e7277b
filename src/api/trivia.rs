use serde::{Deserialize, Serialize};

use super::{de, required};
use crate::database::models::{Category, NewQuestion, Question};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

pub fn views(questions: Vec<Question>) -> Vec<QuestionView> {
    questions.into_iter().map(QuestionView::from).collect()
}

pub fn category_types(categories: Vec<Category>) -> Vec<String> {
    categories.into_iter().map(|c| c.kind).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub categories: Vec<String>,
    pub current_category: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub current_category: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub current_category: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionCreated {
    pub created: i32,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    pub question: QuestionView,
}

/// `POST /questions` body: a search when `searchTerm` is present, otherwise a create
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPayload {
    #[serde(default, rename = "searchTerm", alias = "search_term")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "de::int")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "de::int")]
    pub difficulty: Option<i32>,
}

impl QuestionPayload {
    pub fn into_new(self) -> Result<NewQuestion, ApiError> {
        Ok(NewQuestion {
            question: required(self.question).ok_or_else(|| ApiError::missing_field("question"))?,
            answer: required(self.answer).ok_or_else(|| ApiError::missing_field("answer"))?,
            category: self.category.ok_or_else(|| ApiError::missing_field("category"))?,
            difficulty: self
                .difficulty
                .ok_or_else(|| ApiError::missing_field("difficulty"))?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "de::int")]
    pub id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizPayload {
    #[serde(default, deserialize_with = "de::int_list")]
    pub previous_questions: Vec<i32>,
    pub quiz_category: Option<QuizCategory>,
}

impl QuizPayload {
    /// Category filter; an absent category or id 0 means every category
    pub fn category_filter(&self) -> Option<i32> {
        self.quiz_category
            .as_ref()
            .and_then(|c| c.id)
            .filter(|&id| id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quiz_category_zero_means_all() {
        let all: QuizPayload =
            serde_json::from_value(json!({ "quiz_category": { "type": "click", "id": 0 } })).unwrap();
        assert_eq!(all.category_filter(), None);
        assert!(all.previous_questions.is_empty());

        let science: QuizPayload = serde_json::from_value(
            json!({
                "previous_questions": [20, "21"],
                "quiz_category": { "type": "Science", "id": "1" },
            }),
        )
        .unwrap();
        assert_eq!(science.category_filter(), Some(1));
        assert_eq!(science.previous_questions, vec![20, 21]);

        let none: QuizPayload = serde_json::from_value(json!({ "quiz_category": null })).unwrap();
        assert_eq!(none.category_filter(), None);
    }

    #[test]
    fn create_names_first_missing_field() {
        let payload: QuestionPayload =
            serde_json::from_value(json!({ "question": "Who?", "answer": "Me", "difficulty": 1 }))
                .unwrap();
        assert_eq!(payload.into_new().unwrap_err(), ApiError::missing_field("category"));
    }

    #[test]
    fn search_term_presence_selects_search() {
        let payload: QuestionPayload = serde_json::from_value(json!({ "searchTerm": "title" })).unwrap();
        assert_eq!(payload.search_term.as_deref(), Some("title"));
        let payload: QuestionPayload = serde_json::from_value(json!({ "question": "q" })).unwrap();
        assert!(payload.search_term.is_none());
    }
}
