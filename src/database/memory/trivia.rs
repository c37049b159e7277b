use async_trait::async_trait;

use super::{missing, MemoryUnit};
use crate::database::models::{Category, NewQuestion, Question};
use crate::database::repository::TriviaUnit;
use crate::database::DatabaseError;
use crate::query::SearchTerm;

#[async_trait]
impl TriviaUnit for MemoryUnit {
    async fn categories(&mut self) -> Result<Vec<Category>, DatabaseError> {
        Ok(self.working.categories.all())
    }

    async fn insert_category(&mut self, kind: &str) -> Result<Category, DatabaseError> {
        Ok(self.working.categories.insert_with(|id| Category {
            id,
            kind: kind.to_string(),
        }))
    }

    async fn questions(&mut self) -> Result<Vec<Question>, DatabaseError> {
        Ok(self.working.questions.all())
    }

    async fn questions_in_category(&mut self, category: i32) -> Result<Vec<Question>, DatabaseError> {
        Ok(self.working.questions.filter(|q| q.category == category))
    }

    async fn search_questions(&mut self, term: &SearchTerm) -> Result<Vec<Question>, DatabaseError> {
        Ok(self.working.questions.filter(|q| term.matches(&q.question)))
    }

    async fn insert_question(&mut self, question: NewQuestion) -> Result<Question, DatabaseError> {
        if !self.working.categories.contains(question.category) {
            return Err(missing("category", question.category));
        }
        Ok(self.working.questions.insert_with(|id| question.into_question(id)))
    }

    async fn delete_question(&mut self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.working.questions.remove(id))
    }

    async fn quiz_candidates(
        &mut self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DatabaseError> {
        Ok(self.working.questions.filter(|q| {
            category.map_or(true, |c| q.category == c) && !exclude.contains(&q.id)
        }))
    }
}
