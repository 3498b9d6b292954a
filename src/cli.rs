use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "github-stars-manager")]
#[command(about = "Manage GitHub starred repositories and followed users")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub personal access token; required for star/unstar/unfollow
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Persist the token for later invocations
    #[arg(long, global = true)]
    pub remember: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch and list a user's starred repositories
    Stars {
        username: String,

        /// Also write the repository URLs to a file, one per line
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },

    /// Fetch and list the users an account follows
    Following { username: String },

    /// Unstar every repository the user has starred
    UnstarAll {
        username: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Unfollow every user the account follows
    UnfollowAll {
        username: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Star every repository URL in a newline-separated file
    Import { file: PathBuf },

    /// Show the users that everyone in a comma-separated list follows
    Compare {
        users: String,

        /// Fail the comparison when any following list cannot be fetched,
        /// instead of treating it as empty
        #[arg(long)]
        strict: bool,
    },

    /// List starred repositories with more than one open issue
    Opportunities { username: String },

    /// Export starred repositories to a new Google Sheets spreadsheet
    SheetsExport {
        username: String,

        /// OAuth client id for the device authorization flow
        #[arg(long, env = "GOOGLE_CLIENT_ID")]
        client_id: String,

        /// OAuth client secret for the device authorization flow
        #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,
    },

    /// Delete the stored token
    Logout,
}
