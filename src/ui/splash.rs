//! Splash screen rendering module.

use crate::consts::cli_consts::APP_TITLE;
use crate::environment::Environment;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

pub const LOGO_NAME: &str = r#"
   ██████╗  ███████╗  ██╗   ██╗
  ██╔════╝  ██╔════╝  ██║   ██║
  ██║       █████╗    ██║   ██║
  ██║       ██╔══╝    ╚██╗ ██╔╝
  ╚██████╗  ███████╗   ╚████╔╝
   ╚═════╝  ╚══════╝    ╚═══╝
"#;

/// Logo, title and the service being connected to, centered on screen.
pub fn render_splash(f: &mut Frame, environment: &Environment) {
    let logo_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = LOGO_NAME
        .trim_matches('\n')
        .lines()
        .map(|row| Line::styled(row, logo_style))
        .collect();
    lines.extend([
        Line::raw(""),
        Line::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!("v{}  |  {}", env!("CARGO_PKG_VERSION"), environment.api_url()),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        ),
        Line::styled("Press any key to continue", Style::default().fg(Color::DarkGray)),
    ]);

    let [area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(f.area());

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
