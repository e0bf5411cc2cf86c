//! Remote store
//!
//! Talks to another meal tracker instance through its JSON API. `base_url`
//! is the API root, e.g. `http://tracker.example.com/api`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_tracker_shared::models::{Meal, MealInput, Profile};
use meal_tracker_shared::types::CreateMealRequest;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{MealStore, ProfileStore, Store, StoreError, StoreResult};

/// Store backed by a remote meal tracker API
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
}

impl RemoteStore {
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meal-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// API root joined with `segments`, each percent-encoded as one path segment
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // never fails: `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn meal_url(&self, id: &str) -> Url {
        self.url(&["meals", id])
    }
}

/// Turn a non-success response into [`StoreError::RemoteStatus`]
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::RemoteStatus {
        status: status.as_u16(),
        body,
    })
}

/// Decode a JSON body, mapping 404 to `None`
async fn optional_json<T: DeserializeOwned>(response: Response) -> StoreResult<Option<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(check(response).await?.json().await?))
}

#[async_trait]
impl MealStore for RemoteStore {
    async fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        let response = self.client.get(self.url(&["meals"])).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn get_meal(&self, id: &str) -> StoreResult<Option<Meal>> {
        let response = self.client.get(self.meal_url(id)).send().await?;
        optional_json(response).await
    }

    async fn insert_meal(&self, meal: &Meal) -> StoreResult<()> {
        debug!(id = %meal.id, "Sending meal to remote store");
        let response = self
            .client
            .post(self.url(&["meals"]))
            .json(&CreateMealRequest::from(meal))
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::Duplicate(meal.id.clone()));
        }
        check(response).await?;
        Ok(())
    }

    async fn update_meal(
        &self,
        id: &str,
        input: &MealInput,
        _now: DateTime<Utc>,
    ) -> StoreResult<Option<Meal>> {
        // the remote instance stamps updatedAt itself
        let response = self.client.put(self.meal_url(id)).json(input).send().await?;
        optional_json(response).await
    }

    async fn delete_meal(&self, id: &str) -> StoreResult<bool> {
        let response = self.client.delete(self.meal_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }
}

#[async_trait]
impl ProfileStore for RemoteStore {
    async fn load_profile(&self) -> StoreResult<Option<Profile>> {
        let response = self.client.get(self.url(&["profile"])).send().await?;
        optional_json(response).await
    }

    async fn save_profile(&self, profile: &Profile) -> StoreResult<()> {
        let response = self
            .client
            .put(self.url(&["profile"]))
            .json(&profile.input())
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for RemoteStore {
    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{edit_of, fake_meal};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> RemoteStore {
        RemoteStore::new(&format!("{}/api/", server.uri()), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_list_meals() {
        let server = MockServer::start().await;
        let meal = fake_meal("m1", "2024-01-01", 300.0);

        Mock::given(method("GET"))
            .and(path("/api/meals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![meal.clone()]))
            .expect(1)
            .mount(&server)
            .await;

        let meals = store_for(&server).list_meals().await.unwrap();
        assert_eq!(meals, vec![meal]);
    }

    #[tokio::test]
    async fn test_missing_meal_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/meals/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/meals/nope"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = store_for(&server);
        assert!(store.get_meal("nope").await.unwrap().is_none());
        assert!(!store.delete_meal("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_sends_identity() {
        let server = MockServer::start().await;
        let meal = fake_meal("m7", "2024-01-03", 410.0);

        Mock::given(method("POST"))
            .and(path("/api/meals"))
            .and(body_partial_json(json!({
                "id": "m7",
                "calories": 410.0,
                "date": "2024-01-03",
                "mealType": "Lunch"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(&meal))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server).insert_meal(&meal).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_conflict_is_duplicate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/meals"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .insert_meal(&fake_meal("taken", "2024-01-03", 410.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "taken"));
    }

    #[tokio::test]
    async fn test_meal_ids_are_escaped_as_one_segment() {
        let server = MockServer::start().await;
        let meal = fake_meal("a/b?c#d%e", "2024-01-01", 300.0);

        Mock::given(method("GET"))
            .and(path("/api/meals/a%2Fb%3Fc%23d%25e"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&meal))
            .expect(1)
            .mount(&server)
            .await;

        let fetched = store_for(&server).get_meal(&meal.id).await.unwrap();
        assert_eq!(fetched, Some(meal));
    }

    #[test]
    fn test_endpoint_urls() {
        let store = RemoteStore::new("http://tracker.example.com/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.url(&["meals"]).as_str(), "http://tracker.example.com/api/meals");
        assert_eq!(
            store.meal_url("x y").as_str(),
            "http://tracker.example.com/api/meals/x%20y"
        );

        let bare = RemoteStore::new("http://tracker.example.com", Duration::from_secs(1)).unwrap();
        assert_eq!(bare.url(&["profile"]).as_str(), "http://tracker.example.com/profile");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let err = RemoteStore::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
        let err = RemoteStore::new("mailto:meals@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_update_returns_remote_meal() {
        let server = MockServer::start().await;
        let meal = fake_meal("m1", "2024-01-01", 300.0);
        let mut edited = meal.clone();
        edited.calories = 350.0;
        edited.updated_at = Some(Utc::now());

        Mock::given(method("PUT"))
            .and(path("/api/meals/m1"))
            .and(body_partial_json(json!({ "calories": 350.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&edited))
            .expect(1)
            .mount(&server)
            .await;

        let updated = store_for(&server)
            .update_meal("m1", &edit_of(&meal, 350.0), Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.calories, 350.0);
    }

    #[tokio::test]
    async fn test_server_error_is_remote_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = store_for(&server).load_profile().await.unwrap_err();
        match err {
            StoreError::RemoteStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_profile_sends_input() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/profile"))
            .and(body_partial_json(json!({
                "age": 30,
                "gender": "male",
                "heightFeet": 5,
                "activityLevel": "moderately_active"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let input = meal_tracker_shared::models::ProfileInput {
            age: 30,
            gender: "male".to_string(),
            height_feet: 5,
            height_inches: 10,
            weight_pounds: 180.0,
            activity_level: "moderately_active".to_string(),
            goal: "maintain".to_string(),
        };
        let profile = meal_tracker_shared::profile::compute_profile(&input, Utc::now()).unwrap();
        store_for(&server).save_profile(&profile).await.unwrap();
    }
}
