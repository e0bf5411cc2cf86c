//! Common test utilities for integration tests
//!
//! Every [`TestApp`] runs the full router over its own in-memory store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use meal_tracker_backend::{
    config::{AppConfig, StorageBackend},
    routes,
    state::AppState,
    storage::{MemoryStore, Store},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<dyn Store>,
}

impl TestApp {
    /// Create a new test application with an empty memory store
    pub fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), test_config());
        let app = routes::create_router(state);

        Self { app, store }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("PUT", path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, None).await
    }

    /// Log a meal through the API and return the stored record
    pub async fn log_meal(&self, food_name: &str, calories: f64, date: &str, meal_type: &str) -> Value {
        let body = json!({
            "foodName": food_name,
            "calories": calories,
            "protein": 10.0,
            "carbs": 20.0,
            "fats": 5.0,
            "date": date,
            "mealType": meal_type,
        });
        let (status, response) = self.post("/api/meals", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "{}", response);
        serde_json::from_str(&response).unwrap()
    }

    /// Store the reference profile (30 year old male, 5'10", 180 lbs)
    pub async fn save_reference_profile(&self) -> Value {
        let (status, response) = self.put("/api/profile", &reference_profile().to_string()).await;
        assert_eq!(status, StatusCode::OK, "{}", response);
        serde_json::from_str(&response).unwrap()
    }

    async fn send(&self, method: &str, path: &str, body: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

pub fn reference_profile() -> Value {
    json!({
        "age": 30,
        "gender": "male",
        "heightFeet": 5,
        "heightInches": 10,
        "weightPounds": 180,
        "activityLevel": "moderately_active",
        "goal": "maintain",
    })
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.storage.backend = StorageBackend::Memory;
    config.storage.seed_sample_data = false;
    config
}
