use crate::error::{Result, StarsManagerError};
use crate::types::GitHubRepo;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SHEET_TITLE: &str = "Stars";

#[derive(Debug, Deserialize)]
pub struct CreatedSpreadsheet {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(rename = "spreadsheetUrl")]
    pub spreadsheet_url: String,
}

pub struct SheetsClient {
    client: Client,
    token: String,
}

impl SheetsClient {
    pub fn new(token: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("github-stars-manager/0.1.0")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(SheetsClient { client, token })
    }

    /// Create a dated spreadsheet with a single "Stars" sheet and return its
    /// id and browsable URL.
    pub async fn create_spreadsheet(&self) -> Result<CreatedSpreadsheet> {
        let body = json!({
            "properties": {
                "title": format!("GitHub Starred Repos {}", Utc::now().format("%Y-%m-%d")),
            },
            "sheets": [{ "properties": { "title": SHEET_TITLE } }],
        });

        let response = self
            .client
            .post(SHEETS_API_BASE)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StarsManagerError::SheetsError(format!(
                "spreadsheet creation failed with status {}: {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }

    /// Append rows to the "Stars" sheet starting at A1.
    pub async fn append_rows(&self, spreadsheet_id: &str, values: Vec<Vec<Value>>) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}!A1:append?valueInputOption=RAW",
            SHEETS_API_BASE, spreadsheet_id, SHEET_TITLE
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": values }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StarsManagerError::SheetsError(format!(
                "append failed with status {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }

    /// Create a spreadsheet and append one row per starred repo.
    pub async fn export_starred(&self, repos: &[GitHubRepo]) -> Result<CreatedSpreadsheet> {
        let sheet = self.create_spreadsheet().await?;
        self.append_rows(&sheet.spreadsheet_id, repo_rows(repos))
            .await?;
        Ok(sheet)
    }
}

/// Row shape appended to the sheet: full name, URL, star count, description
/// (empty string when the repo has none).
pub fn repo_rows(repos: &[GitHubRepo]) -> Vec<Vec<Value>> {
    repos
        .iter()
        .map(|repo| {
            vec![
                Value::from(repo.full_name.clone()),
                Value::from(repo.html_url.clone()),
                Value::from(repo.stargazers_count),
                Value::from(repo.description.clone().unwrap_or_default()),
            ]
        })
        .collect()
}
