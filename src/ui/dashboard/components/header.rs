//! Dashboard header component
//!
//! Renders the title and the header actions

use super::super::state::DashboardState;
use super::super::utils::Palette;
use super::super::view::HeaderView;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title bar with the report and theme actions.
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    header: &HeaderView,
    state: &DashboardState,
    palette: &Palette,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .split(area);

    let title = Paragraph::new(header.title)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(title, header_chunks[0]);

    let report_status = if state.is_report_pending() {
        " (generating...)".to_string()
    } else if let Some(path) = state.last_report() {
        format!(" (saved {})", path.display())
    } else {
        String::new()
    };

    let actions = Line::from(vec![
        Span::styled("[R] ", Style::default().fg(palette.muted)),
        Span::styled(
            header.report_label,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(report_status, Style::default().fg(palette.muted)),
        Span::raw("    "),
        Span::styled("[T] ", Style::default().fg(palette.muted)),
        Span::styled(
            header.theme_label,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            format!("API: {}", state.environment.api_url()),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(
        Paragraph::new(actions).alignment(Alignment::Center),
        header_chunks[1],
    );
}
