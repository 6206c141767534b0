//! Results section component
//!
//! Renders the analysis totals and the equipment type bar chart

use super::super::utils::Palette;
use super::super::view::ResultsView;
use crate::consts::cli_consts::CHART_LABEL;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Padding, Paragraph};

/// Render the latest analysis, or a hint when nothing has been uploaded yet.
pub fn render_summary(f: &mut Frame, area: Rect, results: Option<&ResultsView>, palette: &Palette) {
    let block = Block::default()
        .title("ANALYSIS RESULTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .padding(Padding::horizontal(1));

    let Some(results) = results else {
        let hint = Paragraph::new("Upload a CSV file to see its analysis.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(hint, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Fill(1)])
        .split(inner);

    let stats = Line::from(vec![
        Span::styled("Total Count: ", Style::default().fg(palette.muted)),
        Span::styled(
            results.total_count.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Avg Temp: ", Style::default().fg(palette.muted)),
        Span::styled(
            results.average_temp.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(stats), chunks[0]);

    let bars: Vec<Bar> = results
        .bars
        .iter()
        .map(|(category, count)| {
            Bar::default()
                .label(Line::from(category.clone()))
                .value(*count)
        })
        .collect();

    // Spread the bars over the available width.
    let count = bars.len().max(1) as u16;
    let bar_width = (chunks[1].width / count).saturating_sub(2).clamp(3, 12);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(CHART_LABEL)
                .title_style(Style::default().fg(palette.muted)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.bar))
        .value_style(
            Style::default()
                .fg(palette.background)
                .bg(palette.bar)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(palette.text));
    f.render_widget(chart, chunks[1]);
}
