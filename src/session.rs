use crate::collector::{collect_pages, Collected};
use crate::error::Result;
use crate::github::StarsApi;
use crate::types::{GitHubRepo, GitHubUser};
use tracing::{info, warn};

/// Per-invocation context. Owns the API client and the last fetched lists.
/// Lists are only ever replaced wholesale by a refresh, never mutated in
/// place.
pub struct Session<A> {
    api: A,
    starred: Vec<GitHubRepo>,
    following: Vec<GitHubUser>,
}

impl<A: StarsApi> Session<A> {
    pub fn new(api: A) -> Self {
        Session {
            api,
            starred: Vec::new(),
            following: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn starred(&self) -> &[GitHubRepo] {
        &self.starred
    }

    pub fn following(&self) -> &[GitHubUser] {
        &self.following
    }

    /// Replace the starred list with a fresh paginated fetch. Pages
    /// collected before a failure are kept, and the failure is returned so
    /// the caller decides how loudly to report it.
    pub async fn refresh_starred(&mut self, username: &str) -> Result<usize> {
        let Collected { items, failure } =
            collect_pages(|page| self.api.starred_page(username, page)).await;

        let count = items.len();
        self.starred = items;
        info!(username, count, "starred list refreshed");

        match failure {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Replace the following list with a fresh paginated fetch.
    pub async fn refresh_following(&mut self, username: &str) -> Result<usize> {
        let Collected { items, failure } =
            collect_pages(|page| self.api.following_page(username, page)).await;

        let count = items.len();
        self.following = items;
        info!(username, count, "following list refreshed");

        match failure {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Unstar everything in the fetched list, one delete at a time. Every
    /// item is attempted; individual failures are logged and do not stop the
    /// loop. Returns the number of deletes attempted.
    pub async fn unstar_all(&self) -> usize {
        let mut attempted = 0;
        for repo in &self.starred {
            attempted += 1;
            if let Err(err) = self.api.unstar(&repo.owner.login, &repo.name).await {
                warn!(repo = %repo.full_name, error = %err, "unstar failed");
            }
        }
        attempted
    }

    /// Unfollow everyone in the fetched list. Same best-effort contract as
    /// `unstar_all`.
    pub async fn unfollow_all(&self) -> usize {
        let mut attempted = 0;
        for user in &self.following {
            attempted += 1;
            if let Err(err) = self.api.unfollow(&user.login).await {
                warn!(user = %user.login, error = %err, "unfollow failed");
            }
        }
        attempted
    }

    /// Starred repos with more than one open issue, in fetched order.
    pub fn contribution_opportunities(&self) -> Vec<&GitHubRepo> {
        self.starred
            .iter()
            .filter(|repo| repo.open_issues_count > 1)
            .collect()
    }

    /// HTML URLs of the fetched starred repos, in fetched order.
    pub fn starred_urls(&self) -> Vec<String> {
        self.starred.iter().map(|repo| repo.html_url.clone()).collect()
    }
}
