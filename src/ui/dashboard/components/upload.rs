//! Upload section component
//!
//! Shows the selected file, the path prompt and the upload control

use super::super::utils::Palette;
use super::super::view::UploadView;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the upload section. `prompt` holds the path being typed, if any.
pub fn render_upload(
    f: &mut Frame,
    area: Rect,
    upload: &UploadView,
    prompt: Option<&str>,
    tick: usize,
    palette: &Palette,
) {
    let file_line = match prompt {
        Some(input) => Line::from(vec![
            Span::styled("CSV path: ", Style::default().fg(palette.muted)),
            Span::styled(format!("{}_", input), Style::default().fg(palette.text)),
        ]),
        None => {
            let name = upload.selected_file.as_deref().unwrap_or("No file selected");
            Line::from(vec![
                Span::styled("[F] ", Style::default().fg(palette.muted)),
                Span::styled(name.to_string(), Style::default().fg(palette.text)),
            ])
        }
    };

    let button = if upload.enabled {
        Line::from(vec![
            Span::styled("[U] ", Style::default().fg(palette.muted)),
            Span::styled(
                upload.button_label,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER[tick % SPINNER.len()]),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                upload.button_label,
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled("   [C] Cancel", Style::default().fg(palette.muted)),
        ])
    };

    let block = Block::default()
        .title("UPLOAD CSV")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(vec![file_line, button]).block(block), area);
}
