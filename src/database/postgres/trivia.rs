use async_trait::async_trait;

use super::PgUnit;
use crate::database::models::{Category, NewQuestion, Question};
use crate::database::repository::TriviaUnit;
use crate::database::DatabaseError;
use crate::query::SearchTerm;

#[async_trait]
impl TriviaUnit for PgUnit {
    async fn categories(&mut self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories ORDER BY id"#)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn insert_category(&mut self, kind: &str) -> Result<Category, DatabaseError> {
        let row = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories ("type") VALUES ($1) RETURNING id, "type""#,
        )
        .bind(kind)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn questions(&mut self) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn questions_in_category(&mut self, category: i32) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE category = $1 ORDER BY id",
        )
        .bind(category)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn search_questions(&mut self, term: &SearchTerm) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE question ILIKE $1 ESCAPE '\\'",
        )
        .bind(term.like_pattern())
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn insert_question(&mut self, question: NewQuestion) -> Result<Question, DatabaseError> {
        let row = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) RETURNING id, question, answer, category, difficulty",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    async fn delete_question(&mut self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn quiz_candidates(
        &mut self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Vec<Question>, DatabaseError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE ($1::int IS NULL OR category = $1) AND NOT (id = ANY($2)) ORDER BY id",
        )
        .bind(category)
        .bind(exclude)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }
}
