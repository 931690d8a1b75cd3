mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{read, TestServer, PASSWORD};

#[tokio::test]
async fn signup_returns_token_and_profile() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .post(
            "/api/auth/signup",
            &json!({"name": "Asha Kumari", "email": "Asha@NITJ.ac.in", "password": PASSWORD}),
            None,
        )
        .await?;
    let (status, body) = read(res).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Asha Kumari");
    assert_eq!(body["data"]["email"], "asha@nitj.ac.in");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["data"].get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn non_institutional_email_is_rejected_everywhere() -> Result<()> {
    let server = TestServer::spawn().await?;

    for email in ["asha@gmail.com", "asha@nitj.ac.in.example.com", "asha@nitjac.in"] {
        let (status, body) = read(
            server
                .post(
                    "/api/auth/signup",
                    &json!({"name": "Asha", "email": email, "password": PASSWORD}),
                    None,
                )
                .await?,
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "signup accepted {email}");
        assert_eq!(body["message"], "Please use your NITJ email address");
        assert_eq!(body["errors"][0]["field"], "email");

        let (status, body) = read(
            server
                .post("/api/auth/login", &json!({"email": email, "password": PASSWORD}), None)
                .await?,
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "login accepted {email}");
        assert_eq!(body["message"], "Please use your NITJ email address");
    }
    Ok(())
}

#[tokio::test]
async fn password_length_boundary() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = read(
        server
            .post(
                "/api/auth/signup",
                &json!({"name": "Short", "email": "short@nitj.ac.in", "password": "1234567"}),
                None,
            )
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 8 characters");

    let (status, _) = read(
        server
            .post(
                "/api/auth/signup",
                &json!({"name": "Exact", "email": "exact@nitj.ac.in", "password": "!!!!!!!!"}),
                None,
            )
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn missing_fields_get_aggregate_message() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = read(
        server
            .post("/api/auth/signup", &json!({"email": "asha@nitj.ac.in"}), None)
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all required fields");
    assert_eq!(body["error"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_is_rejected_without_second_account() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.signup("Asha", "asha@nitj.ac.in").await?;

    let (status, body) = read(
        server
            .post(
                "/api/auth/signup",
                &json!({"name": "Impostor", "email": "ASHA@nitj.ac.in", "password": "another-password"}),
                None,
            )
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // The original credentials still work and the name was not overwritten
    let (status, body) = read(
        server
            .post(
                "/api/auth/login",
                &json!({"email": "asha@nitj.ac.in", "password": PASSWORD}),
                None,
            )
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Asha");

    let (status, _) = read(
        server
            .post(
                "/api/auth/login",
                &json!({"email": "asha@nitj.ac.in", "password": "another-password"}),
                None,
            )
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.signup("Asha", "asha@nitj.ac.in").await?;

    let wrong_password = json!({"email": "asha@nitj.ac.in", "password": "wrong-password"});
    let unknown_email = json!({"email": "nobody@nitj.ac.in", "password": PASSWORD});

    let (s1, b1) = read(server.post("/api/auth/login", &wrong_password, None).await?).await?;
    let (s2, b2) = read(server.post("/api/auth/login", &unknown_email, None).await?).await?;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1["message"], "Invalid email or password");
    assert_eq!(b1, b2);
    Ok(())
}

#[tokio::test]
async fn me_requires_a_valid_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let res = server.client.get(server.url("/api/auth/me")).bearer_auth(&token).send().await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "asha@nitj.ac.in");
    assert!(body["data"]["createdAt"].is_string());

    let (status, body) = read(server.get("/api/auth/me").await?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let res = server.client.get(server.url("/api/auth/me")).bearer_auth("not.a.jwt").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn body_rejections_keep_their_status() -> Result<()> {
    let server = TestServer::spawn_with(|config| config.api.max_request_size_bytes = 1024).await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .body(r#"{"email":"asha@nitj.ac.in","password":"password123"}"#)
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(body["success"], false);

    let oversized = "x".repeat(4096);
    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .header("content-type", "application/json")
        .body(format!(r#"{{"email":"{oversized}"}}"#))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
    Ok(())
}
