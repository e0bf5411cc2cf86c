//! Integration tests for dashboard endpoints

mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_daily_progress_uses_default_goal() {
    let app = common::TestApp::new();
    app.log_meal("Pasta", 400.0, "2024-03-01", "dinner").await;

    let (status, body) = app.get("/api/dashboard?date=2024-03-01").await;

    assert_eq!(status, StatusCode::OK);
    let progress: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(progress["calorieGoal"], 2000);
    assert_eq!(progress["caloriesConsumed"], 400);
    assert_eq!(progress["caloriesRemaining"], 1600);
    assert_eq!(progress["progressPercent"], 20.0);
    assert_eq!(progress["status"], "on_track");
}

#[tokio::test]
async fn test_daily_progress_over_goal() {
    let app = common::TestApp::new();
    app.save_reference_profile().await;
    app.log_meal("Feast", 3000.0, "2024-03-01", "dinner").await;

    let (_, body) = app.get("/api/dashboard?date=2024-03-01").await;

    let progress: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(progress["calorieGoal"], 2763);
    assert_eq!(progress["caloriesRemaining"], -237);
    assert_eq!(progress["progressPercent"], 100.0);
    assert_eq!(progress["status"], "slightly_over");
}

#[tokio::test]
async fn test_calorie_trend_fills_empty_days() {
    let app = common::TestApp::new();
    app.log_meal("Pasta", 400.0, "2024-03-01", "dinner").await;

    let (status, body) = app.get("/api/dashboard/trend?days=3&end=2024-03-02").await;

    assert_eq!(status, StatusCode::OK);
    let trend: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(trend["start"], "2024-02-29");
    assert_eq!(trend["end"], "2024-03-02");
    let days = trend["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[1]["calories"], 400.0);
    assert_eq!(days[2]["calories"], 0.0);
}

#[tokio::test]
async fn test_trend_rejects_zero_days() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/api/dashboard/trend?days=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
