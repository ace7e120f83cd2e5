//! Filter bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;

/// Render the one-line filter bar above the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let priority = app
        .filter
        .priority
        .map_or_else(|| "all".to_string(), |p| p.to_string());
    let tag = app
        .filter
        .tag
        .clone()
        .map_or_else(|| "all".to_string(), |t| format!("#{t}"));

    let line = Line::from(vec![
        Span::styled("View: ", theme::dimmed()),
        facet_span(
            app.filter.completion.label().to_string(),
            app.filter.completion == taskdeck_core::CompletionFilter::All,
        ),
        Span::styled("  Priority: ", theme::dimmed()),
        facet_span(priority, app.filter.priority.is_none()),
        Span::styled("  Tag: ", theme::dimmed()),
        facet_span(tag, app.filter.tag.is_none()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// A facet value, highlighted when it actually narrows the view.
fn facet_span(value: String, is_default: bool) -> Span<'static> {
    if is_default {
        Span::styled(value, theme::normal())
    } else {
        Span::styled(value, theme::highlighted())
    }
}
