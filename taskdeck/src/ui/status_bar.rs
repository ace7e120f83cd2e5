//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Form => {
            if app.editing.is_some() {
                "Enter: save | Esc: cancel edit | Tab: switch panel | \u{2191}\u{2193}: move field"
            } else {
                "Enter: add task | Tab: switch panel | \u{2191}\u{2193}: move field | Esc: quit"
            }
        }
        PanelFocus::List => {
            "Space: toggle | e: edit | d: delete | f/p/t: filters | Tab: switch panel | q: quit"
        }
    };

    let stats = app.stats();
    let status_line = Line::from(vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(format!(
            "{} tasks \u{b7} {} active \u{b7} {} done",
            stats.total, stats.active, stats.completed
        )),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
