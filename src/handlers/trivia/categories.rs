// handlers/trivia/categories.rs - Category listing and per-category questions

use axum::extract::{Query, State};

use super::TriviaState;
use crate::api::trivia::{category_types, views, CategoryList, CategoryQuestions};
use crate::error::{ApiError, NOT_FOUND};
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, PageQuery};

/// GET /categories - every category's type label
pub async fn categories_get(State(state): State<TriviaState>) -> ApiResult<CategoryList> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        let categories = unit.categories().await?;
        if categories.is_empty() {
            return Err(ApiError::not_found(NOT_FOUND));
        }
        Ok::<_, ApiError>(category_types(categories))
    }
    .await;
    let categories = settle(unit, outcome).await?;

    Ok(ApiResponse::success(CategoryList { categories }))
}

/// GET /categories/:id/questions - one page of the category's questions
pub async fn category_questions_get(
    State(state): State<TriviaState>,
    EntityId(id): EntityId,
    Query(query): Query<PageQuery>,
) -> ApiResult<CategoryQuestions> {
    let page = query.page(state.per_page);

    let mut unit = state.store.begin().await?;
    let outcome = async { Ok::<_, ApiError>(unit.questions_in_category(id).await?) }.await;
    let selection = settle(unit, outcome).await?;

    let total_questions = selection.len();
    let questions = views(page.take(selection));
    if questions.is_empty() {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(CategoryQuestions {
        questions,
        total_questions,
        current_category: id,
    }))
}
