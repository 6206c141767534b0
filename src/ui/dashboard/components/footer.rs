//! Dashboard footer component
//!
//! Renders the key bindings and uptime

use super::super::state::DashboardState;
use super::super::utils::Palette;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn format_uptime(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let footer_text = format!(
        "[F] File | [U] Upload | [R] Report | [H] Refresh | [T] Theme | [Q] Quit | Up {}",
        format_uptime(state.start_time.elapsed().as_secs())
    );

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(footer, area);
}
