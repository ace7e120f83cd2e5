//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use taskdeck_core::Priority;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Overdue due-date indicator color.
pub const OVERDUE: Color = Color::LightRed;

/// Tag label color.
pub const TAG: Color = Color::LightBlue;

/// High priority indicator color.
pub const PRIORITY_HIGH: Color = Color::Red;

/// Medium priority indicator color.
pub const PRIORITY_MEDIUM: Color = Color::Yellow;

/// Low priority indicator color.
pub const PRIORITY_LOW: Color = Color::Green;

/// Panel title color for the form panel.
pub const FORM_TITLE: Color = Color::Blue;

/// Panel title color for the task list panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Color for a priority level.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    }
}

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, placeholders).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for completed task titles (dim, struck through).
#[must_use]
pub fn completed() -> Style {
    Style::default()
        .fg(FG_SECONDARY)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Style for overdue due dates.
#[must_use]
pub fn overdue() -> Style {
    Style::default().fg(OVERDUE).add_modifier(Modifier::BOLD)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
