mod common;

use anyhow::Result;
use chrono::Utc;
use fullstack_api::types::AppKind;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use common::{bearer, body, casting_store, expect_error, spawn, AUDIENCE, SECRET};

fn signed(claims: serde_json::Value, secret: &str) -> String {
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

#[tokio::test]
async fn missing_header_is_unauthorized() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let message = expect_error(server.get("/actors").send().await?, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(message, "Authorization header is expected.");
    Ok(())
}

#[tokio::test]
async fn non_bearer_header_is_unauthorized() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let res = server
        .get("/actors")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    expect_error(res, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}

#[tokio::test]
async fn foreign_signature_is_unauthorized() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let claims = json!({
        "aud": AUDIENCE,
        "exp": Utc::now().timestamp() + 600,
        "permissions": ["get:actors"],
    });
    let res = server
        .get("/actors")
        .header("Authorization", signed(claims, "someone-else"))
        .send()
        .await?;
    expect_error(res, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let claims = json!({
        "aud": AUDIENCE,
        "exp": Utc::now().timestamp() - 3600,
        "permissions": ["get:actors"],
    });
    let res = server
        .get("/actors")
        .header("Authorization", signed(claims, SECRET))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(message, "Token expired.");
    Ok(())
}

#[tokio::test]
async fn wrong_audience_is_unauthorized() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let claims = json!({
        "aud": "another-api",
        "exp": Utc::now().timestamp() + 600,
        "permissions": ["get:actors"],
    });
    let res = server
        .get("/actors")
        .header("Authorization", signed(claims, SECRET))
        .send()
        .await?;
    expect_error(res, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}

#[tokio::test]
async fn token_without_permissions_is_forbidden() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let claims = json!({ "aud": AUDIENCE, "exp": Utc::now().timestamp() + 600 });
    let res = server
        .get("/actors")
        .header("Authorization", signed(claims, SECRET))
        .send()
        .await?;
    let message = expect_error(res, StatusCode::FORBIDDEN).await?;
    assert_eq!(message, "Permissions not included in JWT.");
    Ok(())
}

#[tokio::test]
async fn missing_permission_is_forbidden_and_changes_nothing() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;
    let assistant = bearer(&["get:actors", "get:movies"]);

    let res = server
        .delete("/actors/1")
        .header("Authorization", &assistant)
        .send()
        .await?;
    let message = expect_error(res, StatusCode::FORBIDDEN).await?;
    assert_eq!(message, "Permission not found.");

    let res = server
        .get("/actors")
        .header("Authorization", &assistant)
        .send()
        .await?;
    assert_eq!(body(res).await?["actors"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn auth_is_checked_before_the_body() -> Result<()> {
    let server = spawn(AppKind::Casting, casting_store().await?).await?;

    let res = server
        .post("/movies")
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    expect_error(res, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}
