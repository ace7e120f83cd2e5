//! Task form rendering (create and edit modes).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, FormField, PanelFocus};

/// Render the task form panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Form;
    let title = if app.editing.is_some() {
        "Edit task"
    } else {
        "New task"
    };

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::FORM_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(3), // Priority
            Constraint::Length(3), // Due date
            Constraint::Length(3), // Tag input
            Constraint::Min(1),    // Added tags
        ])
        .split(inner);

    render_text_field(frame, rows[0], app, FormField::Title, &app.form.title);
    render_text_field(
        frame,
        rows[1],
        app,
        FormField::Description,
        &app.form.description,
    );
    render_priority_field(frame, rows[2], app);
    render_text_field(frame, rows[3], app, FormField::DueDate, &app.form.due_date);
    render_text_field(frame, rows[4], app, FormField::Tags, &app.form.tag_input);
    render_tags(frame, rows[5], app);
}

/// Render one text field with a cursor when focused.
fn render_text_field(frame: &mut Frame, area: Rect, app: &App, field: FormField, text: &str) {
    let is_active = app.focus == PanelFocus::Form && app.form.field == field;

    // Build the field text with cursor
    let mut display_text = text.to_string();
    if is_active {
        let cursor = app.form.cursor.min(display_text.len());
        display_text.insert(cursor, '\u{2588}');
    }

    let line = if display_text.is_empty() {
        Line::from(Span::styled(placeholder(field), theme::dimmed()))
    } else {
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let block = Block::default()
        .title(field.label())
        .borders(Borders::ALL)
        .border_style(if is_active {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the priority selector field.
fn render_priority_field(frame: &mut Frame, area: Rect, app: &App) {
    let is_active = app.focus == PanelFocus::Form && app.form.field == FormField::Priority;

    let line = Line::from(vec![
        Span::styled("\u{2190} ", theme::dimmed()),
        Span::styled(
            app.form.priority.to_string(),
            theme::bold().fg(theme::priority_color(app.form.priority)),
        ),
        Span::styled(" \u{2192}", theme::dimmed()),
    ]);

    let block = Block::default()
        .title(FormField::Priority.label())
        .borders(Borders::ALL)
        .border_style(if is_active {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the chips line of already-added tags.
fn render_tags(frame: &mut Frame, area: Rect, app: &App) {
    if app.form.tags.is_empty() {
        return;
    }
    let mut spans = Vec::with_capacity(app.form.tags.len() * 2);
    for tag in &app.form.tags {
        spans.push(Span::styled(
            format!("#{tag}"),
            theme::normal().fg(theme::TAG),
        ));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Placeholder text for an empty, unfocused field.
const fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Title => "What needs doing?",
        FormField::Description => "Details (optional)",
        FormField::DueDate => "YYYY-MM-DD (optional)",
        FormField::Tags => "Tag, then Enter",
        FormField::Priority => "",
    }
}
