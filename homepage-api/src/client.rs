use std::time::Duration;

use homepage_categories::{CategoryId, CategorySnapshot};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::dto::{
    ApiEnvelope, CategoryRecord, CategoryRequest, CategoryWithPostsCount,
    LoginRequest, LoginResult,
};
use crate::errors::Result;

/// Default base URL of a local blog server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Async client for the blog REST API.
///
/// The login JWT comes back as a cookie, so the underlying client keeps a
/// cookie store. Cloning is cheap and clones share the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let envelope: ApiEnvelope<T> = response.json().await?;
        log::debug!("api response status {status}");
        envelope.into_result()
    }

    /// Authenticate and store the session cookie.
    pub async fn login(
        &self,
        id: &str,
        password: &SecretString,
    ) -> Result<LoginResult> {
        let body = LoginRequest {
            id,
            pw: password.expose_secret(),
        };
        let request =
            self.client.post(self.url("/api/users/login")).json(&body);
        let result: LoginResult = self.send(request).await?;
        log::info!("logged in as {}", result.id);
        Ok(result)
    }

    /// Fetch the category forest with post counts.
    ///
    /// `visible` filters by visibility when set.
    pub async fn categories(
        &self,
        visible: Option<bool>,
    ) -> Result<Vec<CategorySnapshot>> {
        let mut request = self
            .client
            .get(self.url("/api/categories"))
            .query(&[("count", "post")]);
        if let Some(visible) = visible {
            request = request.query(&[("visible", visible)]);
        }

        let forest: Vec<CategoryWithPostsCount> = self.send(request).await?;
        log::debug!("fetched {} root categories", forest.len());
        Ok(forest.into_iter().map(Into::into).collect())
    }

    pub async fn create_category(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<CategoryRecord> {
        let body = CategoryRequest {
            name,
            parent_id: parent_id.map(CategoryId::get),
        };
        let request = self.client.post(self.url("/api/categories")).json(&body);
        self.send(request).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<CategoryRecord> {
        let body = CategoryRequest {
            name,
            parent_id: parent_id.map(CategoryId::get),
        };
        let request = self
            .client
            .patch(self.url(&format!("/api/categories/{id}")))
            .json(&body);
        self.send(request).await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<bool> {
        let request = self
            .client
            .delete(self.url(&format!("/api/categories/{id}")));
        self.send(request).await
    }
}
