//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use homeroom_core::auth::ResetRequest;
use homeroom_core::config::Config;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "homeroom")]
#[command(version)]
#[command(about = "Terminal admin console for the school CMS")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL", env = "HOMEROOM_API_URL", global = true)]
    api_url: Option<String>,

    /// Reset-password token from an emailed link (opens the reset screen)
    #[arg(long, value_name = "TOKEN", requires = "reset_email")]
    reset_token: Option<String>,

    /// Email address the reset link was sent to
    #[arg(long, value_name = "EMAIL", requires = "reset_token")]
    reset_email: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in without the console (prompts for missing values)
    Login {
        /// Email address to sign in with
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,
    },

    /// Sign out locally (deletes the stored session; works offline)
    Logout,

    /// Validate the stored session and print who is signed in
    Whoami,

    /// Ask the backend to email a password reset link
    ForgotPassword {
        /// Email address the link should go to
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init().context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;

    if let Some(url) = cli.api_url.as_deref() {
        config.api_base_url = validated_api_url(url)?;
    }

    let Cli {
        command,
        api_url: _,
        reset_token,
        reset_email,
    } = cli;

    // default to the console
    let Some(command) = command else {
        let reset = match (reset_token, reset_email) {
            (Some(token), Some(email)) => Some(ResetRequest { token, email }),
            _ => None,
        };
        return commands::console::run(&config, reset).await;
    };

    match command {
        Commands::Login { email } => commands::auth::login(&config, email.as_deref()).await,
        Commands::Logout => commands::auth::logout(&config),
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::ForgotPassword { email } => {
            commands::auth::forgot_password(&config, &email).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// The override must be an absolute http(s) URL; a bad value is a usage
/// error, not something to discover on the first request.
fn validated_api_url(raw: &str) -> Result<String> {
    let parsed =
        url::Url::parse(raw).with_context(|| format!("invalid API URL '{raw}'"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("invalid API URL '{raw}': expected an http(s) URL");
    }
    Ok(raw.trim_end_matches('/').to_string())
}
