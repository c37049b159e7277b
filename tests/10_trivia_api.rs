mod common;

use anyhow::Result;
use fullstack_api::database::MemoryStore;
use fullstack_api::types::AppKind;
use reqwest::StatusCode;
use serde_json::json;

use common::{body, expect_error, spawn, trivia_store};

#[tokio::test]
async fn categories_are_listed_by_type() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server.get("/categories").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["categories"], json!(["Science", "Art", "Geography"]));
    Ok(())
}

#[tokio::test]
async fn no_categories_is_not_found() -> Result<()> {
    let server = spawn(AppKind::Trivia, MemoryStore::new()).await?;
    expect_error(server.get("/categories").send().await?, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn questions_are_paginated() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let first = body(server.get("/questions").send().await?).await?;
    assert_eq!(first["total_questions"], json!(5));
    assert_eq!(first["questions"].as_array().map(Vec::len), Some(5));
    assert_eq!(first["questions"][0]["id"], json!(1));
    assert_eq!(first["categories"].as_array().map(Vec::len), Some(3));
    assert_eq!(first["current_category"], json!(null));

    // Unparseable page numbers fall back to the first page
    let fallback = body(server.get("/questions?page=abc").send().await?).await?;
    assert_eq!(fallback["questions"][0]["id"], json!(1));

    expect_error(
        server.get("/questions?page=1000").send().await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/questions")
        .json(&json!({ "searchTerm": "LAKE" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await?;
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["questions"][0]["answer"], json!("Lake Victoria"));
    assert_eq!(body["total_questions"], json!(5));

    let res = server
        .post("/questions")
        .json(&json!({ "searchTerm": "zzzz" }))
        .send()
        .await?;
    expect_error(res, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn empty_search_term_matches_everything() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/questions")
        .json(&json!({ "searchTerm": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await?;
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["current_category"], json!(null));
    Ok(())
}

#[tokio::test]
async fn create_then_delete_question() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/questions")
        .json(&json!({
            "question": "What is the capital of Peru?",
            "answer": "Lima",
            "category": "3",
            "difficulty": 2,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created = body(res).await?;
    assert_eq!(created["created"], json!(6));
    assert_eq!(created["total_questions"], json!(6));

    let res = server.delete("/questions/6").send().await?;
    assert_eq!(body(res).await?["deleted"], json!(6));

    expect_error(server.delete("/questions/6").send().await?, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn create_names_the_missing_field() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/questions")
        .json(&json!({ "question": "Orphan?", "category": 1, "difficulty": 1 }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::BAD_REQUEST).await?;
    assert!(message.contains("answer"), "{}", message);
    Ok(())
}

#[tokio::test]
async fn question_in_unknown_category_is_rolled_back() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/questions")
        .json(&json!({ "question": "Q?", "answer": "A", "category": 99, "difficulty": 1 }))
        .send()
        .await?;
    expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;

    let body = body(server.get("/questions").send().await?).await?;
    assert_eq!(body["total_questions"], json!(5));
    Ok(())
}

#[tokio::test]
async fn category_questions_report_current_category() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let body = body(server.get("/categories/2/questions").send().await?).await?;
    assert_eq!(body["current_category"], json!(2));
    assert_eq!(body["total_questions"], json!(2));
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["category"] == json!(2)));

    expect_error(
        server.get("/categories/42/questions").send().await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn quiz_never_repeats_a_question() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/quizzes")
        .json(&json!({
            "previous_questions": [1],
            "quiz_category": { "id": 1, "type": "Science" },
        }))
        .send()
        .await?;
    let body = body(res).await?;
    assert_eq!(body["question"]["id"], json!(2));

    let res = server
        .post("/quizzes")
        .json(&json!({
            "previous_questions": [1, 2],
            "quiz_category": { "id": 1, "type": "Science" },
        }))
        .send()
        .await?;
    expect_error(res, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn quiz_category_zero_means_all() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/quizzes")
        .json(&json!({
            "previous_questions": [1, 2, 3, 4],
            "quiz_category": { "id": 0, "type": "click" },
        }))
        .send()
        .await?;
    assert_eq!(body(res).await?["question"]["id"], json!(5));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let res = server
        .post("/quizzes")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    expect_error(res, StatusCode::BAD_REQUEST).await?;
    Ok(())
}

#[tokio::test]
async fn unknown_routes_and_methods_get_json_errors() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    expect_error(server.get("/nowhere").send().await?, StatusCode::NOT_FOUND).await?;
    expect_error(
        server.patch("/categories").send().await?,
        StatusCode::METHOD_NOT_ALLOWED,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn root_describes_the_app() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    let body = body(server.get("/").send().await?).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["app"], json!("trivia"));
    assert_eq!(body["name"], json!("fullstack-api"));
    Ok(())
}

#[tokio::test]
async fn twelve_questions_make_two_pages() -> Result<()> {
    let server = spawn(AppKind::Trivia, trivia_store().await?).await?;

    for n in 0..7 {
        let res = server
            .post("/questions")
            .json(&json!({
                "question": format!("Filler question {}?", n),
                "answer": "filler",
                "category": 1,
                "difficulty": 1,
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let first = body(server.get("/questions?page=1").send().await?).await?;
    assert_eq!(first["total_questions"], json!(12));
    assert_eq!(first["questions"].as_array().map(Vec::len), Some(10));

    let second = body(server.get("/questions?page=2").send().await?).await?;
    let ids: Vec<i64> = second["questions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|q| q["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![11, 12]);

    expect_error(server.get("/questions?page=3").send().await?, StatusCode::NOT_FOUND).await?;
    Ok(())
}
