//! Session setup and initialization

use crate::api::{ApiClient, EquipmentApi};
use crate::config::ResolvedConfig;
use crate::controller::Controller;
use crate::environment::Environment;
use crate::events::Completion;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// The service every request goes to
    pub environment: Environment,
    /// User the requests are authorized as
    pub username: String,
    /// Issues the requests
    pub controller: Controller,
    /// Finished requests, in completion order
    pub completions: mpsc::Receiver<Completion>,
}

/// Builds the authorized client and the controller for one run.
///
/// Fails when the HTTP client cannot be constructed.
pub fn setup_session(config: ResolvedConfig) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(config.environment.clone(), &config.credentials)?;
    log::debug!(
        "Session for {} against {}",
        config.credentials.username(),
        client.environment()
    );
    Ok(setup_session_with(
        Arc::new(client),
        config.credentials.username().to_string(),
        config.download_dir,
    ))
}

/// Session over any API implementation.
pub fn setup_session_with(
    api: Arc<dyn EquipmentApi>,
    username: String,
    download_dir: PathBuf,
) -> SessionData {
    let environment = api.environment().clone();
    let (controller, completions) = Controller::new(api, download_dir);
    SessionData {
        environment,
        username,
        controller,
        completions,
    }
}
