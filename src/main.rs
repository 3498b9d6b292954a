use clap::Parser;
use colored::*;
use github_stars_manager::cli::{Cli, Command};
use github_stars_manager::compare::{self, FailurePolicy};
use github_stars_manager::export;
use github_stars_manager::github::GitHubClient;
use github_stars_manager::import;
use github_stars_manager::oauth::GoogleAuth;
use github_stars_manager::session::Session;
use github_stars_manager::sheets::SheetsClient;
use github_stars_manager::storage::{FileTokenStorage, TokenStorage};
use github_stars_manager::types::GitHubRepo;
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const OAUTH_POLL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let storage = FileTokenStorage::new();

    let token = match cli.token {
        Some(token) => Some(token),
        None => storage.load()?,
    };

    if cli.remember {
        match &token {
            Some(token) => {
                storage.save(token)?;
                println!("{}", "Token saved.".green());
            }
            None => println!("{}", "No token to remember.".yellow()),
        }
    }

    let client = GitHubClient::new(token)?;
    let mut session = Session::new(client);

    match cli.command {
        Command::Stars {
            username,
            export: export_path,
        } => {
            println!("Fetching starred repos...");
            let count = fetch_starred(&mut session, &username).await?;
            for repo in session.starred() {
                print_repo(repo);
            }
            println!("{}", format!("{} repos fetched.", count).green());

            if let Some(path) = export_path {
                let urls = session.starred_urls();
                export::write_url_list(&path, &urls)?;
                println!(
                    "{}",
                    format!("Saved {} URLs to {}.", urls.len(), path.display()).green()
                );
            }
        }

        Command::Following { username } => {
            println!("Fetching followed users...");
            let count = match session.refresh_following(&username).await {
                Ok(count) => count,
                Err(err) => {
                    eprintln!("{}", "Error fetching followed users.".red());
                    return Err(err.into());
                }
            };
            for user in session.following() {
                println!("{}  {}", user.login.bold(), user.html_url.dimmed());
            }
            println!("{}", format!("{} users fetched.", count).green());
        }

        Command::UnstarAll { username, yes } => {
            println!("Fetching starred repos...");
            let count = fetch_starred(&mut session, &username).await?;
            if count == 0 {
                println!("Nothing to unstar.");
                return Ok(());
            }
            if !yes && !confirm(&format!("Are you sure you want to unstar ALL {} repos?", count)) {
                println!("Aborted.");
                return Ok(());
            }
            session.unstar_all().await;
            println!("{}", "All repos unstarred.".green());
        }

        Command::UnfollowAll { username, yes } => {
            println!("Fetching followed users...");
            let count = match session.refresh_following(&username).await {
                Ok(count) => count,
                Err(err) => {
                    eprintln!("{}", "Error fetching followed users.".red());
                    return Err(err.into());
                }
            };
            if count == 0 {
                println!("Nothing to unfollow.");
                return Ok(());
            }
            if !yes && !confirm(&format!("Unfollow ALL {} users?", count)) {
                println!("Aborted.");
                return Ok(());
            }
            session.unfollow_all().await;
            println!("{}", "All unfollowed.".green());
        }

        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let report = import::import_urls(session.api(), &text).await;
            println!("{}", format!("{} repos starred.", report.starred).green());
            if report.failed > 0 || report.skipped > 0 {
                println!(
                    "{}",
                    format!("({} failed, {} skipped)", report.failed, report.skipped).yellow()
                );
            }
        }

        Command::Compare { users, strict } => {
            let usernames = compare::parse_user_list(&users);
            if usernames.is_empty() {
                println!("{}", "No users provided.".yellow());
                return Ok(());
            }
            let policy = if strict {
                FailurePolicy::Fail
            } else {
                FailurePolicy::EmptyList
            };
            let common = compare::compare_followings(session.api(), &usernames, policy).await?;
            if common.is_empty() {
                println!("No common followings found.");
            } else {
                for login in &common {
                    println!("{}", login);
                }
                println!("{}", format!("{} common followings.", common.len()).green());
            }
        }

        Command::Opportunities { username } => {
            println!("Searching contribution opportunities...");
            fetch_starred(&mut session, &username).await?;
            let opportunities = session.contribution_opportunities();
            for repo in &opportunities {
                println!(
                    "{} - {} open issues",
                    repo.full_name.bold(),
                    repo.open_issues_count
                );
            }
            println!(
                "{}",
                format!("{} opportunities found.", opportunities.len()).green()
            );
        }

        Command::SheetsExport {
            username,
            client_id,
            client_secret,
        } => {
            println!("Fetching starred repos...");
            fetch_starred(&mut session, &username).await?;

            let auth = GoogleAuth::new(client_id, client_secret)?;
            let device_code = auth.request_device_code().await?;
            println!("Please visit: {}", device_code.verification_url);
            println!("and enter code: {}", device_code.user_code.bold());

            let sheets_token = auth.poll_for_token(&device_code, OAUTH_POLL_TIMEOUT).await?;
            let sheets = SheetsClient::new(sheets_token)?;
            let sheet = sheets.export_starred(session.starred()).await?;

            println!("{}", "Exported to Google Sheets!".green());
            println!("{}", sheet.spreadsheet_url);
        }

        Command::Logout => {
            storage.delete()?;
            println!("{}", "Stored token deleted.".green());
        }
    }

    Ok(())
}

async fn fetch_starred(
    session: &mut Session<GitHubClient>,
    username: &str,
) -> anyhow::Result<usize> {
    match session.refresh_starred(username).await {
        Ok(count) => Ok(count),
        Err(err) => {
            eprintln!("{}", "Error fetching starred repos.".red());
            Err(err.into())
        }
    }
}

fn print_repo(repo: &GitHubRepo) {
    match &repo.description {
        Some(description) => println!(
            "{} ⭐{}  {}",
            repo.full_name.bold(),
            repo.stargazers_count,
            description.dimmed()
        ),
        None => println!("{} ⭐{}", repo.full_name.bold(), repo.stargazers_count),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
