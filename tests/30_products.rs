mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{product_body, read, TestServer};

#[tokio::test]
async fn create_then_get_round_trips_submitted_fields() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let submitted = product_body("Electronics Textbook");
    let created = server.create_product(&token, &submitted).await?;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, body) = read(server.get(&format!("/api/products/{id}")).await?).await?;
    assert_eq!(status, StatusCode::OK);
    let product = &body["data"];

    assert_eq!(product["name"], "Electronics Textbook");
    assert_eq!(product["category"], "books");
    assert_eq!(product["price"], 350.0);
    assert_eq!(product["condition"], "Very Good");
    assert_eq!(product["description"], submitted["description"]);
    assert_eq!(product["image"], submitted["image"]);
    assert_eq!(product["owner"]["phone"], "9876543210");
    assert_eq!(product["owner"]["year"], "2nd");
    assert_eq!(product["owner"]["branch"], "ECE");
    assert_eq!(product["owner"]["email"], "asha@nitj.ac.in");
    assert_eq!(product["owner"]["name"], "Asha");
    assert_eq!(product["isAvailable"], true);
    assert!(product["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn listing_is_newest_first_with_count() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let names = ["Cycle", "Drafter", "Calculator", "Lab Coat"];
    for name in names {
        server.create_product(&token, &product_body(name)).await?;
    }

    let (status, body) = read(server.get("/api/products").await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], names.len());

    let listed: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    let mut expected = names.to_vec();
    expected.reverse();
    assert_eq!(listed, expected);
    Ok(())
}

#[tokio::test]
async fn price_boundary() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let mut body = product_body("Free Notes");
    body["price"] = json!(0);
    let created = server.create_product(&token, &body).await?;
    assert_eq!(created["price"], 0.0);

    for bad in [json!(-1), json!("-0.5")] {
        body["price"] = bad;
        let (status, res) = read(server.post("/api/products", &body, Some(&token)).await?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(res["message"], "Price cannot be negative");
    }
    Ok(())
}

#[tokio::test]
async fn create_requires_authentication() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = read(server.post("/api/products", &product_body("Cycle"), None).await?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (_, body) = read(server.get("/api/products").await?).await?;
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let (status, body) = read(
        server
            .post("/api/products", &json!({"name": "Cycle", "price": 100}), Some(&token))
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all required fields");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"category"));
    assert!(fields.contains(&"image"));
    Ok(())
}

#[tokio::test]
async fn condition_must_match_exactly() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let mut body = product_body("Cycle");
    body["condition"] = json!("like new");
    let (status, res) = read(server.post("/api/products", &body, Some(&token)).await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["errors"][0]["field"], "condition");
    Ok(())
}

#[tokio::test]
async fn unavailable_products_leave_the_listing_but_resolve_by_id() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    let kept = server.create_product(&token, &product_body("Cycle")).await?;
    let sold = server.create_product(&token, &product_body("Drafter")).await?;
    let sold_id = sold["id"].as_str().expect("id");

    let (status, body) = read(
        server
            .put(&format!("/api/products/{sold_id}"), &json!({"isAvailable": false}), Some(&token))
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isAvailable"], false);
    assert_eq!(body["data"]["name"], "Drafter");

    let (_, body) = read(server.get("/api/products").await?).await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], kept["id"]);

    let (status, body) = read(server.get(&format!("/api/products/{sold_id}")).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isAvailable"], false);
    Ok(())
}

#[tokio::test]
async fn update_cannot_bypass_create_rules() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;
    let product = server.create_product(&token, &product_body("Cycle")).await?;
    let id = product["id"].as_str().expect("id");

    let (status, body) = read(
        server
            .put(&format!("/api/products/{id}"), &json!({"price": -10}), Some(&token))
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Price cannot be negative");

    let (_, body) = read(server.get(&format!("/api/products/{id}")).await?).await?;
    assert_eq!(body["data"]["price"], 350.0);
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_product() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;
    let product = server.create_product(&token, &product_body("Cycle")).await?;
    let id = product["id"].as_str().expect("id");

    let (status, body) = read(server.delete(&format!("/api/products/{id}"), Some(&token)).await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, body) = read(server.get(&format!("/api/products/{id}")).await?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    for id in ["0b7e9c2a-5d41-4f6e-9c1a-2f3b4c5d6e7f", "not-an-id"] {
        let (status, body) = read(server.get(&format!("/api/products/{id}")).await?).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Product not found");
    }
    Ok(())
}

#[tokio::test]
async fn search_filters_by_name_and_category() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.signup("Asha", "asha@nitj.ac.in").await?;

    server.create_product(&token, &product_body("Study Lamp")).await?;
    let mut cycle = product_body("Hero Cycle");
    cycle["category"] = json!("Vehicles");
    server.create_product(&token, &cycle).await?;

    let (_, body) = read(server.get("/api/products?search=lamp").await?).await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Study Lamp");

    let (_, body) = read(server.get("/api/products?search=VEHICLES").await?).await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Hero Cycle");

    let (_, body) = read(server.get("/api/products?search=").await?).await?;
    assert_eq!(body["count"], 2);
    Ok(())
}
