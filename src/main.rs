// Copyright (c) 2024 Nexus. All rights reserved.

mod api;
mod auth;
mod cli_messages;
mod config;
mod consts;
mod controller;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod selection;
mod session;
mod ui;

use crate::config::{Config, ConfigOverrides, ResolvedConfig, get_config_path};
use crate::selection::SelectedFile;
use crate::session::{run_export, run_history, run_tui_mode, run_upload, setup_session};
use crate::ui::UIConfig;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Connection settings. Each one overrides its environment variable and the config file.
#[derive(clap::Args, Debug, Default)]
struct ConnectionArgs {
    /// Base URL of the analysis service
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Username for HTTP Basic authentication
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long, global = true)]
    password: Option<String>,

    /// Directory the PDF report is written to
    #[arg(long, global = true, value_name = "DIR")]
    download_dir: Option<PathBuf>,
}

impl From<ConnectionArgs> for ConfigOverrides {
    fn from(args: ConnectionArgs) -> Self {
        ConfigOverrides {
            api_url: args.api_url,
            username: args.username,
            password: args.password,
            download_dir: args.download_dir,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        /// CSV file to preselect
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Disable background colour
        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_background_color: bool,
    },
    /// Upload a CSV file and print its analysis
    Upload {
        /// CSV file to analyse
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// Print the most recent uploads
    History,
    /// Download the PDF report
    Export {
        /// Directory to write Equipment_Report.pdf to
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Store credentials in the config file
    Login,
    /// Delete the config file
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_max_level();

    let args = Args::parse();
    let result = run(args).await;
    if let Err(e) = &result {
        print_cmd_error!("Command failed", &e.to_string());
    }
    result
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let connection = args.connection;

    match args.command {
        Command::Start {
            file,
            no_background_color,
        } => {
            let initial_file = file.map(SelectedFile::from_path).transpose()?;
            let session = setup_session(resolve(connection, &config_path)?)?;
            run_tui_mode(session, UIConfig::new(!no_background_color, initial_file)).await
        }
        Command::Upload { file } => {
            let file = SelectedFile::from_path(file)?;
            let session = setup_session(resolve(connection, &config_path)?)?;
            run_upload(session, file).await
        }
        Command::History => run_history(setup_session(resolve(connection, &config_path)?)?).await,
        Command::Export { output } => {
            let mut connection = connection;
            if output.is_some() {
                connection.download_dir = output;
            }
            run_export(setup_session(resolve(connection, &config_path)?)?).await
        }
        Command::Login => login(connection, &config_path),
        Command::Logout => {
            print_cmd_info!("Logging out", "removing {}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

fn resolve(
    connection: ConnectionArgs,
    config_path: &Path,
) -> Result<ResolvedConfig, Box<dyn Error>> {
    Ok(ResolvedConfig::resolve(connection.into(), config_path)?)
}

/// Saves the given connection settings, keeping any already stored.
fn login(connection: ConnectionArgs, config_path: &Path) -> Result<(), Box<dyn Error>> {
    let (Some(username), Some(password)) = (connection.username, connection.password) else {
        return Err(Box::from("login requires --username and --password"));
    };
    if let Some(url) = &connection.api_url {
        url.parse::<environment::Environment>()
            .map_err(|_| config::ConfigError::InvalidApiUrl(url.clone()))?;
    }

    let stored = if config_path.exists() {
        Config::load_from_file(config_path)?
    } else {
        Config::default()
    };
    let config = Config {
        api_url: connection.api_url.or(stored.api_url),
        download_dir: connection.download_dir.or(stored.download_dir),
        ..Config::with_credentials(username.clone(), password)
    };
    config
        .save(config_path)
        .map_err(|e| format!("Failed to save config: {}", e))?;

    print_cmd_success!("Logged in", "{} saved to {}", username, config_path.display());
    Ok(())
}
