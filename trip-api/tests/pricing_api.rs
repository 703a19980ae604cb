mod common;

use axum::http::{Method, StatusCode};
use common::{date, offer, package, TestApp};
use serde_json::json;
use trip_catalog::PricingConfig;
use trip_core::DiscountType;

#[tokio::test]
async fn test_custom_package_is_stored_then_priced() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/packages",
            json!({
                "trip_route": "Dhaka-Sylhet",
                "duration": "3",
                "hotel_type": "5-star",
                "travelers": "2",
                "transport_type": "Train",
                "food_included": "Yes",
                "tour_guide": "Yes",
                "room_count": "1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Package added successfully");
    let custom_id = body["custom_id"].as_i64().unwrap();

    let stored = app.store.custom_package(custom_id).unwrap();
    assert!(stored.request.food_included);
    assert_eq!(stored.request.room_count, Some(1));

    let (status, body) = app.get(&format!("/calculate-price/{}", custom_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], 15800.0);
    assert_eq!(body["breakdown"]["base_price"], 2500.0);
    assert_eq!(body["breakdown"]["hotel"], 6000.0);
    assert_eq!(body["breakdown"]["transport"], 4000.0);
    assert_eq!(body["breakdown"]["food"], 1800.0);
    assert_eq!(body["breakdown"]["guide"], 1500.0);
}

#[tokio::test]
async fn test_unknown_route_prices_with_defaults() {
    let app = TestApp::new();
    let (_, body) = app
        .post(
            "/api/packages",
            json!({
                "trip_route": "Rangpur-Kuakata",
                "duration": 1,
                "hotel_type": "3-star",
                "travelers": 1,
                "transport_type": "Boat",
                "food_included": "No",
                "tour_guide": false
            }),
        )
        .await;
    let custom_id = body["custom_id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/calculate-price/{}", custom_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_price"], 3000.0);
}

#[tokio::test]
async fn test_omitted_extras_are_not_charged() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/packages",
            json!({
                "trip_route": "Dhaka-Sylhet",
                "duration": 3,
                "hotel_type": "5-star",
                "travelers": 2,
                "transport_type": "Train"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let custom_id = body["custom_id"].as_i64().unwrap();

    let (_, body) = app.get(&format!("/calculate-price/{}", custom_id)).await;
    assert_eq!(body["breakdown"]["food"], 0.0);
    assert_eq!(body["breakdown"]["guide"], 0.0);
    assert_eq!(body["total_price"], 12500.0);
}

#[tokio::test]
async fn test_price_of_missing_custom_package() {
    let app = TestApp::new();
    let (status, body) = app.get("/calculate-price/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_invalid_custom_package_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/packages",
            json!({
                "trip_route": "Dhaka-Sylhet",
                "duration": 0,
                "hotel_type": "3-star",
                "travelers": 2,
                "transport_type": "Bus",
                "food_included": "No",
                "tour_guide": "No"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/packages", json!({ "trip_route": "Dhaka-Sylhet", "duration": "three" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_discount_stacks_group_and_duration_offers() {
    let app = TestApp::new();
    let id = app.store.add_package(package("Sylhet Tea Trail", 1000.0, 4, date(2025, 4, 1)));
    app.store.add_offer(offer(id, DiscountType::GroupSize, 10.0, 3, None));
    app.store.add_offer(offer(id, DiscountType::Duration, 5.0, 2, None));

    let (status, body) = app
        .post("/calculate-discount", json!({ "packageId": id.to_string(), "travellers": "5" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseCost"], 5000.0);
    assert_eq!(body["totalDiscount"], 15.0);
    assert_eq!(body["discountAmount"], 750.0);
    assert_eq!(body["finalPrice"], 4250.0);
    assert_eq!(body["groupSizeDiscount"], 10.0);
    assert_eq!(body["durationDiscount"], 5.0);
}

#[tokio::test]
async fn test_discount_without_offers() {
    let app = TestApp::new();
    let id = app.store.add_package(package("Plain", 800.0, 2, date(2025, 4, 1)));

    let (status, body) = app
        .post("/calculate-discount", json!({ "packageId": id, "travellers": 3 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalDiscount"], 0.0);
    assert_eq!(body["finalPrice"], body["baseCost"]);
    assert_eq!(body["baseCost"], 2400.0);
}

#[tokio::test]
async fn test_discount_for_unknown_package() {
    let app = TestApp::new();
    let (status, _) = app
        .post("/calculate-discount", json!({ "packageId": 77, "travellers": 2 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discount_rejects_zero_travellers() {
    let app = TestApp::new();
    let id = app.store.add_package(package("Plain", 800.0, 2, date(2025, 4, 1)));
    let (status, _) = app
        .post("/calculate-discount", json!({ "packageId": id, "travellers": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_configured_policy_clamps_discount() {
    let mut pricing = PricingConfig::default();
    pricing.discount_policy.clamp_final_price = true;
    let app = TestApp::with_config(pricing, 10);

    let id = app.store.add_package(package("Flash Sale", 100.0, 3, date(2025, 4, 1)));
    app.store.add_offer(offer(id, DiscountType::GroupSize, 80.0, 1, None));
    app.store.add_offer(offer(id, DiscountType::Duration, 40.0, 1, None));

    let (_, body) = app
        .request(
            Method::POST,
            "/calculate-discount",
            Some(json!({ "packageId": id, "travellers": 2 })),
        )
        .await;
    assert_eq!(body["totalDiscount"], 100.0);
    assert_eq!(body["finalPrice"], 0.0);
}

#[tokio::test]
async fn test_non_numeric_id_uses_error_envelope() {
    let app = TestApp::new();
    let (status, body) = app.get("/calculate-price/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
