//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::controller::Controller;
use crate::environment::Environment;
use crate::events::Completion;
use crate::selection::SelectedFile;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone, Default)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// File to preselect when the dashboard opens.
    pub initial_file: Option<SelectedFile>,
}

impl UIConfig {
    pub fn new(with_background_color: bool, initial_file: Option<SelectedFile>) -> Self {
        Self {
            with_background_color,
            initial_file,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The analysis dashboard.
    Dashboard(Box<DashboardState>),
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Raw mode delivers Ctrl+C as a plain key press.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The service the dashboard talks to.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Issues requests on behalf of the dashboard.
    controller: Controller,

    /// Receives finished requests from the controller's tasks.
    completions: mpsc::Receiver<Completion>,

    ui_config: UIConfig,

    /// File path being typed, while the path prompt is open.
    prompt: Option<String>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        controller: Controller,
        completions: mpsc::Receiver<Completion>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            controller,
            completions,
            ui_config,
            prompt: None,
        }
    }

    /// Leaves the splash screen. Opening the dashboard loads the history.
    fn open_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.with_background_color,
        );
        if let Some(file) = self.ui_config.initial_file.take() {
            state = state.select_file(file);
        }
        let state = self.controller.fetch_history(state);
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Replaces the dashboard state with the result of `transition`.
    fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(&mut Controller, DashboardState) -> DashboardState,
    {
        if let Screen::Dashboard(state) = &mut self.current_screen {
            let current = std::mem::take(state.as_mut());
            **state = transition(&mut self.controller, current);
        }
    }

    fn alert_open(&self) -> bool {
        matches!(&self.current_screen, Screen::Dashboard(state) if state.alert().is_some())
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(input) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let path = self.prompt.take().unwrap_or_default();
                match SelectedFile::from_path(path.trim()) {
                    Ok(file) => self.apply(|_, state| state.select_file(file)),
                    Err(e) => self.apply(|_, state| state.show_alert(e.to_string())),
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Flow {
        if is_interrupt(&key) {
            return Flow::Quit;
        }
        // The alert blocks every other action until dismissed.
        if self.alert_open() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.apply(|_, state| state.dismiss_alert());
            }
            return Flow::Continue;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('f') => self.prompt = Some(String::new()),
            KeyCode::Char('u') => self.apply(|c, state| c.handle_file_upload(state)),
            KeyCode::Char('c') => self.apply(|c, state| c.cancel_upload(state)),
            KeyCode::Char('r') => self.apply(|c, state| c.download_report(state)),
            KeyCode::Char('h') => self.apply(|c, state| c.fetch_history(state)),
            KeyCode::Char('t') => self.apply(|_, state| state.toggle_theme()),
            _ => {}
        }
        Flow::Continue
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    loop {
        // Apply every request that finished since the last frame
        while let Ok(completion) = app.completions.try_recv() {
            app.apply(|c, state| c.handle_completion(state, completion));
        }

        app.apply(|_, state| state.next_tick());
        terminal.draw(|f| render(f, &app))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.open_dashboard();
                continue;
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                let on_splash = matches!(app.current_screen, Screen::Splash);
                let flow = if !on_splash {
                    app.handle_dashboard_key(key)
                } else if is_interrupt(&key)
                    || matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
                {
                    Flow::Quit
                } else {
                    // Any other key skips the splash screen
                    app.open_dashboard();
                    Flow::Continue
                };

                if flow == Flow::Quit {
                    app.controller.shutdown();
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match &app.current_screen {
        Screen::Splash => render_splash(f, &app.environment),
        Screen::Dashboard(state) => render_dashboard(f, state, app.prompt.as_deref()),
    }
}
