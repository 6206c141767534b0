//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use super::state::Theme;
use crate::events::Operation;
use ratatui::prelude::Color;

/// Colours used by every component for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub bar: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(244, 246, 248),
                text: Color::Rgb(33, 37, 41),
                muted: Color::Gray,
                accent: Color::Rgb(37, 99, 235),
                border: Color::Rgb(148, 163, 184),
                bar: Color::Rgb(54, 162, 235),
                alert: Color::Rgb(220, 38, 38),
            },
            Theme::Dark => Self {
                background: Color::Rgb(16, 20, 24),
                text: Color::Rgb(226, 232, 240),
                muted: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::Rgb(71, 85, 105),
                bar: Color::Rgb(75, 192, 192),
                alert: Color::LightRed,
            },
        }
    }
}

/// Get a ratatui color for an operation in the activity log
pub fn get_operation_color(operation: &Operation, palette: &Palette) -> Color {
    match operation {
        Operation::HistoryLoader => palette.muted,
        Operation::UploadOrchestrator => palette.accent,
        Operation::ReportExporter => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_drops_year_and_seconds() {
        assert_eq!(format_compact_timestamp("2024-05-06 09:10:11"), "05-06 09:10");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn themes_use_distinct_backgrounds() {
        assert_ne!(
            Palette::for_theme(Theme::Light).background,
            Palette::for_theme(Theme::Dark).background
        );
    }
}
