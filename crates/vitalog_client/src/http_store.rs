//! Document store client.
//!
//! Reqwest-based implementation of the [`HealthStore`](crate::HealthStore)
//! trait against the per-user document REST API. The profile is a singleton
//! document; daily records are keyed by ISO date. All writes go through
//! merge-style PUTs so fields absent from the payload are preserved
//! server-side.

use crate::{ClientError, DailyRecord, HealthStore, UserProfile};
use async_trait::async_trait;
use metrics::counter;
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug)]
pub struct ReqwestHealthStore {
    base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl ReqwestHealthStore {
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_key.expose_secret())
    }

    fn put_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .put(url)
            .bearer_auth(self.api_key.expose_secret())
    }

    /// Fetch a document, mapping 404 to `None`.
    async fn fetch_optional<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Option<T>, ClientError> {
        counter!("vitalog_store_requests_total", "op" => "get").increment(1);
        let resp = self.get_request(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(Some(resp.json::<T>().await?))
    }

    /// Merge-write a document; no response body expected.
    async fn merge_put<T: serde::Serialize>(&self, url: &str, doc: &T) -> Result<(), ClientError> {
        counter!("vitalog_store_requests_total", "op" => "put").increment(1);
        let resp = self
            .put_request(url)
            .query(&[("merge", "true")])
            .json(doc)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }
}

async fn error_from_response(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    ClientError::Api {
        status,
        body: body.chars().take(256).collect(),
    }
}

#[async_trait]
impl HealthStore for ReqwestHealthStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ClientError> {
        let url = format!("{}/v1/users/{}/profile", self.base_url, user_id);
        self.fetch_optional(&url).await
    }

    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), ClientError> {
        let url = format!("{}/v1/users/{}/profile", self.base_url, user_id);
        self.merge_put(&url, profile).await
    }

    async fn get_daily_record(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<DailyRecord>, ClientError> {
        let url = format!("{}/v1/users/{}/days/{}", self.base_url, user_id, date);
        self.fetch_optional(&url).await
    }

    async fn put_daily_record(
        &self,
        user_id: &str,
        record: &DailyRecord,
    ) -> Result<(), ClientError> {
        let url = format!("{}/v1/users/{}/days/{}", self.base_url, user_id, record.date);
        self.merge_put(&url, record).await
    }

    async fn list_recent_records(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<DailyRecord>, ClientError> {
        counter!("vitalog_store_requests_total", "op" => "list").increment(1);
        let url = format!("{}/v1/users/{}/days", self.base_url, user_id);
        let resp = self
            .get_request(&url)
            .query(&[("order", "desc"), ("limit", &limit.to_string())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json::<Vec<DailyRecord>>().await?)
    }
}
