//! Task list rendering.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use taskdeck_core::{CompletionFilter, Task, is_overdue};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the filtered task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let visible = app.visible_tasks();

    let block = Block::default()
        .title(Span::styled("Tasks", theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if visible.is_empty() {
        let message = if app.filter.completion == CompletionFilter::All
            && app.filter.priority.is_none()
            && app.filter.tag.is_none()
        {
            "No tasks yet. Fill in the form to add one."
        } else {
            "No tasks match the current filters."
        };
        let paragraph = Paragraph::new(Span::styled(message, theme::dimmed())).block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let is_selected = idx == app.selected;
            let line = task_line(task, &app.date_format, now);
            let style = if is_selected && is_focused {
                theme::selected()
            } else if is_selected {
                theme::highlighted()
            } else {
                theme::normal()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Build the one-line summary for a task row.
fn task_line<'a>(task: &'a Task, date_format: &str, now: chrono::DateTime<Utc>) -> Line<'a> {
    let checkbox = if task.completed { "[\u{2713}]" } else { "[ ]" };
    let title_style = if task.completed {
        theme::completed()
    } else {
        theme::normal()
    };

    let mut spans = vec![
        Span::raw(checkbox),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority),
            theme::normal().fg(theme::priority_color(task.priority)),
        ),
    ];

    if let Some(due) = task.due_date {
        let overdue = is_overdue(task, now);
        let style = if overdue { theme::overdue() } else { theme::dimmed() };
        let suffix = if overdue { " (overdue)" } else { "" };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("due {}{suffix}", due.format(date_format)),
            style,
        ));
    }

    for tag in &task.tags {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("#{tag}"),
            theme::normal().fg(theme::TAG),
        ));
    }

    Line::from(spans)
}
