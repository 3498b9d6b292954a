use crate::error::{Result, StarsManagerError};
use crate::types::{GitHubRepo, GitHubUser};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

/// The GitHub operations the manager performs. The loops in `session`,
/// `compare` and `import` run against this trait so they can be exercised
/// with an in-memory double.
#[async_trait]
pub trait StarsApi: Send + Sync {
    /// One page of the repositories `username` has starred.
    async fn starred_page(&self, username: &str, page: u32) -> Result<Vec<GitHubRepo>>;

    /// One page of the users `username` follows.
    async fn following_page(&self, username: &str, page: u32) -> Result<Vec<GitHubUser>>;

    /// Single unpaginated following request; the unit of fetch for the
    /// compare feature.
    async fn following(&self, username: &str) -> Result<Vec<GitHubUser>>;

    async fn star(&self, owner: &str, repo: &str) -> Result<()>;

    async fn unstar(&self, owner: &str, repo: &str) -> Result<()>;

    async fn unfollow(&self, username: &str) -> Result<()>;
}

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
}

impl GitHubClient {
    /// The token is optional; read endpoints work anonymously (at a lower
    /// rate limit), write endpoints refuse to run without one.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("github-stars-manager/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient { client, token })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(StarsManagerError::NotFound(format!(
                "Resource not found: {}",
                url
            ))),
            StatusCode::UNAUTHORIZED => Err(StarsManagerError::AuthError(
                "GitHub rejected the supplied token".to_string(),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(StarsManagerError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn mutate(&self, method: Method, path: &str) -> Result<()> {
        let token = self.token.as_deref().ok_or_else(|| {
            StarsManagerError::AuthError("a token is required for write operations".to_string())
        })?;

        let url = format!("{}{}", API_BASE_URL, path);
        let response = self
            .client
            .request(method, &url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", token))
            // PUT /user/starred requires an explicit zero content length
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            Err(StarsManagerError::ApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            )))
        }
    }
}

#[async_trait]
impl StarsApi for GitHubClient {
    async fn starred_page(&self, username: &str, page: u32) -> Result<Vec<GitHubRepo>> {
        let url = format!(
            "{}/users/{}/starred?per_page={}&page={}",
            API_BASE_URL, username, PER_PAGE, page
        );
        self.get_json(&url).await
    }

    async fn following_page(&self, username: &str, page: u32) -> Result<Vec<GitHubUser>> {
        let url = format!(
            "{}/users/{}/following?per_page={}&page={}",
            API_BASE_URL, username, PER_PAGE, page
        );
        self.get_json(&url).await
    }

    async fn following(&self, username: &str) -> Result<Vec<GitHubUser>> {
        let url = format!("{}/users/{}/following", API_BASE_URL, username);
        self.get_json(&url).await
    }

    async fn star(&self, owner: &str, repo: &str) -> Result<()> {
        self.mutate(Method::PUT, &format!("/user/starred/{}/{}", owner, repo))
            .await
    }

    async fn unstar(&self, owner: &str, repo: &str) -> Result<()> {
        self.mutate(Method::DELETE, &format!("/user/starred/{}/{}", owner, repo))
            .await
    }

    async fn unfollow(&self, username: &str) -> Result<()> {
        self.mutate(Method::DELETE, &format!("/user/following/{}", username))
            .await
    }
}
