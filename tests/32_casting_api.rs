mod common;

use anyhow::Result;
use fullstack_api::database::MemoryStore;
use fullstack_api::types::AppKind;
use reqwest::StatusCode;
use serde_json::json;

use common::{bearer, body, casting_store, expect_error, spawn, CASTING_DIRECTOR, EXECUTIVE_PRODUCER};

#[tokio::test]
async fn actors_are_listed() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let res = server
        .get("/actors")
        .header("Authorization", bearer(CASTING_DIRECTOR))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body(res).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["actors"][2],
        json!({ "id": 3, "name": "Harrison Ford", "age": 77, "gender": "Other" })
    );
    Ok(())
}

#[tokio::test]
async fn empty_lists_are_not_found() -> Result<()> {
    let server = spawn(AppKind::Casting, MemoryStore::new()).await?;
    let token = bearer(EXECUTIVE_PRODUCER);

    let res = server.get("/actors").header("Authorization", &token).send().await?;
    let message = expect_error(res, StatusCode::NOT_FOUND).await?;
    assert_eq!(message, "no actors found in database.");

    let res = server.get("/movies?page=2").header("Authorization", &token).send().await?;
    let message = expect_error(res, StatusCode::NOT_FOUND).await?;
    assert_eq!(message, "no movies found in DB.");
    Ok(())
}

#[tokio::test]
async fn create_actor_validates_and_defaults_gender() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let token = bearer(CASTING_DIRECTOR);

    let res = server
        .post("/actors")
        .header("Authorization", &token)
        .json(&json!({ "age": 30 }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(message, "no name provided.");

    let res = server
        .post("/actors")
        .header("Authorization", &token)
        .json(&json!({ "name": "Daisy Ridley" }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(message, "no age provided.");

    let res = server
        .post("/actors")
        .header("Authorization", &token)
        .json(&json!({ "name": "Daisy Ridley", "age": 0 }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(message, "no age provided.");

    let res = server
        .post("/actors")
        .header("Authorization", &token)
        .json(&json!({ "name": "Daisy Ridley", "age": "27" }))
        .send()
        .await?;
    assert_eq!(body(res).await?["created"], json!(4));

    let res = server.get("/actors").header("Authorization", &token).send().await?;
    let list = body(res).await?;
    assert_eq!(list["actors"][3]["gender"], json!("Other"));
    Ok(())
}

#[tokio::test]
async fn patch_actor_returns_the_updated_row() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let token = bearer(CASTING_DIRECTOR);

    let res = server
        .patch("/actors/2")
        .header("Authorization", &token)
        .json(&json!({ "age": 61 }))
        .send()
        .await?;
    let updated = body(res).await?;
    assert_eq!(updated["updated"], json!(2));
    assert_eq!(
        updated["actor"],
        json!([{ "id": 2, "name": "Carrie Fisher", "age": 61, "gender": "Female" }])
    );

    let res = server
        .patch("/actors/123")
        .header("Authorization", &token)
        .json(&json!({ "age": 1 }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::NOT_FOUND).await?;
    assert_eq!(message, "Actor with id 123 not found in database.");
    Ok(())
}

#[tokio::test]
async fn movies_need_the_producer_to_create_and_delete() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let movie = json!({ "title": "The Empire Strikes Back", "release_date": "1980-05-21" });

    let res = server
        .post("/movies")
        .header("Authorization", bearer(CASTING_DIRECTOR))
        .json(&movie)
        .send()
        .await?;
    expect_error(res, StatusCode::FORBIDDEN).await?;

    let producer = bearer(EXECUTIVE_PRODUCER);
    let res = server
        .post("/movies")
        .header("Authorization", &producer)
        .json(&movie)
        .send()
        .await?;
    assert_eq!(body(res).await?["created"], json!(3));

    let res = server
        .post("/movies")
        .header("Authorization", &producer)
        .json(&json!({ "title": "Untitled" }))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(message, "no \"release_date\" provided.");

    let res = server
        .delete("/movies/3")
        .header("Authorization", &producer)
        .send()
        .await?;
    assert_eq!(body(res).await?["deleted"], json!(3));

    let res = server
        .delete("/movies/3")
        .header("Authorization", &producer)
        .send()
        .await?;
    let message = expect_error(res, StatusCode::NOT_FOUND).await?;
    assert_eq!(message, "Movie with id 3 not found in DB.");
    Ok(())
}

#[tokio::test]
async fn patch_movie_keeps_the_title() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let res = server
        .patch("/movies/2")
        .header("Authorization", bearer(CASTING_DIRECTOR))
        .json(&json!({ "release_date": "1982-06-26" }))
        .send()
        .await?;
    let updated = body(res).await?;
    assert_eq!(updated["updated"], json!(2));
    assert_eq!(
        updated["movie"],
        json!([{ "id": 2, "title": "Blade Runner", "release_date": "1982-06-26" }])
    );
    Ok(())
}

#[tokio::test]
async fn actors_are_cast_in_movies() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let token = bearer(CASTING_DIRECTOR);

    let res = server
        .get("/movies/1/actors")
        .header("Authorization", &token)
        .send()
        .await?;
    let cast = body(res).await?;
    assert_eq!(cast["movie"]["title"], json!("Star Wars"));
    assert_eq!(cast["actors"].as_array().map(Vec::len), Some(1));

    let res = server
        .post("/movies/1/actors")
        .header("Authorization", &token)
        .json(&json!({ "actor_id": 2 }))
        .send()
        .await?;
    let cast = body(res).await?;
    assert_eq!(cast["updated"], json!(1));
    assert_eq!(cast["actors"].as_array().map(Vec::len), Some(2));

    // The same pair twice violates uniqueness and is rolled back
    let res = server
        .post("/movies/1/actors")
        .header("Authorization", &token)
        .json(&json!({ "actor_id": 2 }))
        .send()
        .await?;
    expect_error(res, StatusCode::UNPROCESSABLE_ENTITY).await?;

    let res = server
        .post("/movies/1/actors")
        .header("Authorization", &token)
        .json(&json!({ "actor_id": 77 }))
        .send()
        .await?;
    expect_error(res, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn deleting_an_actor_removes_their_performances() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let token = bearer(EXECUTIVE_PRODUCER);

    let res = server
        .delete("/actors/1")
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(body(res).await?["deleted"], json!(1));

    let res = server
        .get("/movies/1/actors")
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(body(res).await?["actors"], json!([]));
    Ok(())
}

#[tokio::test]
async fn actors_paginate() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let token = bearer(CASTING_DIRECTOR);

    let res = server
        .get("/actors?page=2")
        .header("Authorization", &token)
        .send()
        .await?;
    expect_error(res, StatusCode::NOT_FOUND).await?;
    Ok(())
}
