mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{bearer, TestServer};

#[tokio::test]
async fn get_me_requires_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let missing = server.client.get(server.url("/users/me")).send().await?;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>().await?["code"], "UNAUTHORIZED");

    let garbage = server
        .client
        .get(server.url("/users/me"))
        .header("Authorization", bearer("not-a-token"))
        .send()
        .await?;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn get_me_returns_profile() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("vlad@gmail.com", "123").await?;

    let res = server
        .client
        .get(server.url("/users/me"))
        .header("Authorization", bearer(&token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["email"], "vlad@gmail.com");
    assert!(body.get("id").is_some());
    assert!(body.get("hash").is_none(), "hash leaked: {}", body);
    Ok(())
}

#[tokio::test]
async fn edit_user_persists() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("vlad@gmail.com", "123").await?;

    let res = server
        .client
        .patch(server.url("/users"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "firstName": "Vladimir", "email": "vlad@codewithvlad.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["firstName"], "Vladimir");
    assert_eq!(body["email"], "vlad@codewithvlad.com");

    let me = server
        .client
        .get(server.url("/users/me"))
        .header("Authorization", bearer(&token))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(me["firstName"], "Vladimir");
    assert!(me["lastName"].is_null());
    assert_eq!(me["email"], "vlad@codewithvlad.com");

    // the new email is the one that signs in now
    server.signin("vlad@codewithvlad.com", "123").await?;
    Ok(())
}

#[tokio::test]
async fn edit_user_requires_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .patch(server.url("/users"))
        .json(&json!({ "firstName": "Vladimir" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn edit_user_validates_email() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("vlad@gmail.com", "123").await?;
    server.signup("taken@gmail.com", "123").await?;

    let invalid = server
        .client
        .patch(server.url("/users"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "email": "not-an-email" }))
        .send()
        .await?;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let taken = server
        .client
        .patch(server.url("/users"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "email": "taken@gmail.com" }))
        .send()
        .await?;
    assert_eq!(taken.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn null_clears_a_name() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("vlad@gmail.com", "123").await?;

    let res = server
        .client
        .patch(server.url("/users"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "firstName": "Vladimir", "lastName": "Ivanov" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .patch(server.url("/users"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "firstName": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let me = server
        .client
        .get(server.url("/users/me"))
        .header("Authorization", bearer(&token))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(me["firstName"].is_null(), "{}", me);
    assert_eq!(me["lastName"], "Ivanov");
    Ok(())
}
