// handlers/trivia/questions.rs - Question listing, search, create and delete

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use super::TriviaState;
use crate::api::trivia::{
    category_types, views, QuestionCreated, QuestionPage, QuestionPayload, SearchResult,
};
use crate::api::Deleted;
use crate::error::{ApiError, NOT_FOUND};
use crate::handlers::settle;
use crate::middleware::{ApiResponse, ApiResult, EntityId, JsonBody, PageQuery};
use crate::query::{Page, SearchTerm};

/// GET /questions - one page of all questions ordered by id, plus the category labels
pub async fn questions_get(
    State(state): State<TriviaState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<QuestionPage> {
    let page = query.page(state.per_page);

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let selection = unit.questions().await?;
        let categories = unit.categories().await?;
        Ok::<_, ApiError>((selection, categories))
    }
    .await;
    let (selection, categories) = settle(unit, outcome).await?;

    let total_questions = selection.len();
    let questions = views(page.take(selection));
    if questions.is_empty() {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(QuestionPage {
        questions,
        total_questions,
        categories: category_types(categories),
        current_category: None,
    }))
}

/// POST /questions - search when the body carries `searchTerm`, otherwise create
pub async fn questions_post(
    State(state): State<TriviaState>,
    Query(query): Query<PageQuery>,
    JsonBody(mut payload): JsonBody<QuestionPayload>,
) -> Result<Response, ApiError> {
    match payload.search_term.take() {
        Some(term) => Ok(search(state, SearchTerm::new(term)).await?.into_response()),
        None => {
            let page = query.page(state.per_page);
            Ok(create(state, payload, page).await?.into_response())
        }
    }
}

async fn search(state: TriviaState, term: SearchTerm) -> ApiResult<SearchResult> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        let found = unit.search_questions(&term).await?;
        let total = unit.questions().await?.len();
        Ok::<_, ApiError>((found, total))
    }
    .await;
    let (found, total_questions) = settle(unit, outcome).await?;

    if found.is_empty() {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    Ok(ApiResponse::success(SearchResult {
        questions: views(found),
        total_questions,
        current_category: None,
    }))
}

async fn create(
    state: TriviaState,
    payload: QuestionPayload,
    page: Page,
) -> ApiResult<QuestionCreated> {
    let new_question = payload.into_new()?;

    let mut unit = state.store.begin().await?;
    let outcome = async {
        let created = unit.insert_question(new_question).await?;
        let selection = unit.questions().await?;
        Ok::<_, ApiError>((created, selection))
    }
    .await;
    let (created, selection) = settle(unit, outcome).await?;
    tracing::info!("Created question {} in category {}", created.id, created.category);

    Ok(ApiResponse::success(QuestionCreated {
        created: created.id,
        total_questions: selection.len(),
        questions: views(page.take(selection)),
    }))
}

/// DELETE /questions/:id - remove one question
pub async fn question_delete(
    State(state): State<TriviaState>,
    EntityId(id): EntityId,
) -> ApiResult<Deleted> {
    let mut unit = state.store.begin().await?;
    let outcome = async {
        if !unit.delete_question(id).await? {
            return Err(ApiError::not_found(NOT_FOUND));
        }
        Ok::<_, ApiError>(())
    }
    .await;
    settle(unit, outcome).await?;
    tracing::info!("Deleted question {}", id);

    Ok(ApiResponse::success(Deleted { deleted: id }))
}
