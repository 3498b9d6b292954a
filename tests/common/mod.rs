// Shared across integration test crates; not every crate uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use github_stars_manager::error::{Result, StarsManagerError};
use github_stars_manager::github::StarsApi;
use github_stars_manager::types::{GitHubRepo, GitHubUser, RepoOwner};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory `StarsApi` double. Page responses are scripted per user and
/// every mutating call is recorded in order, so the sequential loops can be
/// exercised without the network.
#[derive(Default)]
pub struct FakeApi {
    /// username -> pages of starred repos (page N is index N-1)
    pub starred_pages: HashMap<String, Vec<Vec<GitHubRepo>>>,
    /// username -> pages of followed users
    pub following_pages: HashMap<String, Vec<Vec<GitHubUser>>>,
    /// username -> following list for the unpaginated compare fetch;
    /// None scripts a failing fetch
    pub followings: HashMap<String, Option<Vec<GitHubUser>>>,
    /// username -> page number whose request fails
    pub failing_starred_pages: HashMap<String, u32>,
    /// full names whose star request fails
    pub failing_stars: Vec<String>,
    /// full names whose unstar request fails
    pub failing_unstars: Vec<String>,
    /// logins whose unfollow request fails
    pub failing_unfollows: Vec<String>,

    pub star_calls: Mutex<Vec<String>>,
    pub unstar_calls: Mutex<Vec<String>>,
    pub unfollow_calls: Mutex<Vec<String>>,
}

#[async_trait]
impl StarsApi for FakeApi {
    async fn starred_page(&self, username: &str, page: u32) -> Result<Vec<GitHubRepo>> {
        if self.failing_starred_pages.get(username) == Some(&page) {
            return Err(StarsManagerError::ApiError(format!(
                "scripted failure on page {}",
                page
            )));
        }
        let pages = self
            .starred_pages
            .get(username)
            .ok_or_else(|| StarsManagerError::NotFound(format!("no such user: {}", username)))?;
        Ok(pages.get((page - 1) as usize).cloned().unwrap_or_default())
    }

    async fn following_page(&self, username: &str, page: u32) -> Result<Vec<GitHubUser>> {
        let pages = self
            .following_pages
            .get(username)
            .ok_or_else(|| StarsManagerError::NotFound(format!("no such user: {}", username)))?;
        Ok(pages.get((page - 1) as usize).cloned().unwrap_or_default())
    }

    async fn following(&self, username: &str) -> Result<Vec<GitHubUser>> {
        match self.followings.get(username) {
            Some(Some(users)) => Ok(users.clone()),
            Some(None) => Err(StarsManagerError::ApiError(format!(
                "scripted failure for {}",
                username
            ))),
            None => Err(StarsManagerError::NotFound(format!(
                "no such user: {}",
                username
            ))),
        }
    }

    async fn star(&self, owner: &str, repo: &str) -> Result<()> {
        let full_name = format!("{}/{}", owner, repo);
        self.star_calls.lock().unwrap().push(full_name.clone());
        if self.failing_stars.contains(&full_name) {
            return Err(StarsManagerError::ApiError(format!(
                "scripted star failure for {}",
                full_name
            )));
        }
        Ok(())
    }

    async fn unstar(&self, owner: &str, repo: &str) -> Result<()> {
        let full_name = format!("{}/{}", owner, repo);
        self.unstar_calls.lock().unwrap().push(full_name.clone());
        if self.failing_unstars.contains(&full_name) {
            return Err(StarsManagerError::ApiError(format!(
                "scripted unstar failure for {}",
                full_name
            )));
        }
        Ok(())
    }

    async fn unfollow(&self, username: &str) -> Result<()> {
        self.unfollow_calls
            .lock()
            .unwrap()
            .push(username.to_string());
        if self.failing_unfollows.contains(&username.to_string()) {
            return Err(StarsManagerError::ApiError(format!(
                "scripted unfollow failure for {}",
                username
            )));
        }
        Ok(())
    }
}

pub fn repo(full_name: &str) -> GitHubRepo {
    repo_with_issues(full_name, 0)
}

pub fn repo_with_issues(full_name: &str, open_issues: u32) -> GitHubRepo {
    let (owner, name) = full_name
        .split_once('/')
        .expect("full name must be owner/name");
    GitHubRepo {
        name: name.to_string(),
        full_name: full_name.to_string(),
        html_url: format!("https://github.com/{}", full_name),
        stargazers_count: 1,
        open_issues_count: open_issues,
        description: None,
        owner: RepoOwner {
            login: owner.to_string(),
        },
    }
}

pub fn user(login: &str) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        id: 1,
        avatar_url: None,
        html_url: format!("https://github.com/{}", login),
    }
}
