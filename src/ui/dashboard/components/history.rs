//! Upload history component

use super::super::utils::Palette;
use super::super::view::HistoryRow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Row, Table};

/// Render the most recent uploads as a table.
pub fn render_history(
    f: &mut Frame,
    area: Rect,
    headers: [&str; 3],
    rows: &[HistoryRow],
    loading: bool,
    palette: &Palette,
) {
    let title = if loading {
        "RECENT UPLOADS (refreshing...)"
    } else {
        "RECENT UPLOADS"
    };

    let header = Row::new(headers).style(
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|row| {
        Row::new(vec![
            row.file_name.clone(),
            row.uploaded_at.clone(),
            row.average_temp.clone(),
        ])
        .style(Style::default().fg(palette.text))
    });

    let widths = [
        Constraint::Percentage(45),
        Constraint::Percentage(35),
        Constraint::Percentage(20),
    ];

    let table = Table::new(body, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::horizontal(1)),
    );

    f.render_widget(table, area);
}
