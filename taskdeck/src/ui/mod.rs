//! Terminal UI rendering.

pub mod filter_bar;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    // Form on the left, filter bar + list on the right
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(content_area);

    task_form::render(frame, content_chunks[0], app);

    let list_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(content_chunks[1]);

    filter_bar::render(frame, list_chunks[0], app);
    task_list::render(frame, list_chunks[1], app);

    // Render status bar
    status_bar::render(frame, status_area, app);
}
