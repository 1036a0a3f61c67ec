mod common;

use axum::http::StatusCode;
use common::{TestApp, setup_test_app};
use serde_json::{Value, json};

async fn seeded_app() -> (TestApp, String) {
    let app = setup_test_app();
    let (_, admin) = app.create_admin("boss", "70000000001").await;

    for name in ["Drinks", "Snacks"] {
        let (status, _) = app
            .send("POST", "/category", Some(&admin.access), Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    for (name, price, category, visible) in [
        ("Orange Juice", 3.49, "Drinks", true),
        ("Apple Juice", 2.99, "Drinks", true),
        ("Secret Cola", 1.5, "Drinks", false),
        ("Salted Chips", 1.99, "Snacks", true),
    ] {
        let (status, body) = app
            .send(
                "POST",
                "/product",
                Some(&admin.access),
                Some(json!({
                    "name": name,
                    "weight": 1.0,
                    "volume": 1.0,
                    "price": price,
                    "visible": visible,
                    "category": category
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    (app, admin.access)
}

fn names(body: &Value) -> Vec<&str> {
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    names
}

#[tokio::test]
async fn test_add_category_returns_created() {
    let app = setup_test_app();
    let (_, admin) = app.create_admin("boss", "70000000001").await;

    let (status, body) = app
        .send("POST", "/category", Some(&admin.access), Some(json!({ "name": "Drinks" })))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Drinks");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send("POST", "/category", Some(&admin), Some(json!({ "name": "   " })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name must not be blank");
}

#[tokio::test]
async fn test_duplicate_category_conflicts() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send("POST", "/category", Some(&admin), Some(json!({ "name": "Drinks" })))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "category already exists");
}

#[tokio::test]
async fn test_add_product_echoes_price_and_category() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "POST",
            "/product",
            Some(&admin),
            Some(json!({
                "name": "Pretzels",
                "weight": 0.2,
                "volume": 0.5,
                "description": "Twisted",
                "photos": ["pretzels.jpg"],
                "price": 4.25,
                "category": "Snacks"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], 4.25);
    assert_eq!(body["category"], "Snacks");
    assert_eq!(body["visible"], true);
    assert_eq!(body["photos"], json!(["pretzels.jpg"]));
}

#[tokio::test]
async fn test_add_product_unknown_category() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "POST",
            "/product",
            Some(&admin),
            Some(json!({
                "name": "Soap",
                "weight": 0.1,
                "volume": 0.1,
                "price": 1.0,
                "category": "Household"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "category not found");
}

#[tokio::test]
async fn test_add_product_duplicate_name() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "POST",
            "/product",
            Some(&admin),
            Some(json!({
                "name": "Orange Juice",
                "weight": 1.0,
                "volume": 1.0,
                "price": 3.0,
                "category": "Drinks"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "product already exists");
}

#[tokio::test]
async fn test_add_product_rejects_negative_price() {
    let (app, admin) = seeded_app().await;

    let (status, _) = app
        .send(
            "POST",
            "/product",
            Some(&admin),
            Some(json!({
                "name": "Free Lunch",
                "weight": 1.0,
                "volume": 1.0,
                "price": -1.0,
                "category": "Snacks"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_lists_only_visible_products() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app.send("GET", "/catalog", Some(&admin), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Apple Juice", "Orange Juice", "Salted Chips"]);
}

#[tokio::test]
async fn test_catalog_requires_token() {
    let (app, _) = seeded_app().await;

    let (status, body) = app.send("GET", "/catalog", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn test_change_visibility() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "PUT",
            "/product/change",
            Some(&admin),
            Some(json!({ "name": "Secret Cola", "visible": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Secret Cola", "visible": true }));

    let (_, body) = app.send("GET", "/catalog", Some(&admin), None).await;
    assert!(names(&body).contains(&"Secret Cola"));
}

#[tokio::test]
async fn test_change_visibility_unknown_product() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "PUT",
            "/product/change",
            Some(&admin),
            Some(json!({ "name": "Nope", "visible": false })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product not found");
}

#[tokio::test]
async fn test_search_by_product_term() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send("GET", "/catalog/search?product=juice", Some(&admin), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Apple Juice", "Orange Juice"]);
}

#[tokio::test]
async fn test_search_by_category() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send("GET", "/catalog/search?category=Snacks", Some(&admin), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Salted Chips"]);
}

#[tokio::test]
async fn test_search_combines_filters() {
    let (app, admin) = seeded_app().await;

    let (status, body) = app
        .send(
            "GET",
            "/catalog/search?product=juice&category=Snacks",
            Some(&admin),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_hides_invisible_products() {
    let (app, admin) = seeded_app().await;

    let (_, body) = app
        .send("GET", "/catalog/search?product=cola", Some(&admin), None)
        .await;

    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_without_filters_is_bad_request() {
    let (app, admin) = seeded_app().await;

    for uri in ["/catalog/search", "/catalog/search?product=&category=%20"] {
        let (status, body) = app.send("GET", uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            body["error"],
            "product or category query parameter is required"
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_allowed() {
    let app = setup_test_app();

    let (status, body) = app.send("GET", "/nowhere", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not allowed request");
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
