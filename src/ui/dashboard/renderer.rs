//! Dashboard main renderer

use super::components::{alert, footer, header, history, logs, summary, upload};
use super::state::DashboardState;
use super::utils::Palette;
use super::view::DashboardView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::Style;
use ratatui::widgets::Block;

/// Draws the whole dashboard. `prompt` is the file path being typed, if any.
pub fn render_dashboard(f: &mut Frame, state: &DashboardState, prompt: Option<&str>) {
    let view = DashboardView::from_state(state);
    let palette = Palette::for_theme(view.theme);

    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], &view.header, state, &palette);
    upload::render_upload(
        f,
        main_chunks[1],
        &view.upload,
        prompt,
        state.tick,
        &palette,
    );

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[2]);

    summary::render_summary(f, content_chunks[0], view.results.as_ref(), &palette);
    history::render_history(
        f,
        content_chunks[1],
        view.history_headers,
        &view.history_rows,
        state.is_history_loading(),
        &palette,
    );
    logs::render_logs_panel(f, main_chunks[3], state, &palette);
    footer::render_footer(f, main_chunks[4], state, &palette);

    if let Some(message) = &view.alert {
        alert::render_alert(f, message, &palette);
    }
}
