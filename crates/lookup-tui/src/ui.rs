use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use lookup_core::DisplayMode;

use crate::app::{App, HitAreas};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg())),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input box
            Constraint::Length(1), // pills / validation
            Constraint::Min(1),    // dropdown
            Constraint::Length(1), // status bar
        ])
        .split(area);

    // Hit areas are rebuilt on every frame; stale rects must not survive.
    app.areas = HitAreas::default();

    render_input(frame, app, rows[0]);
    render_pills(frame, app, rows[1]);
    render_dropdown(frame, app, rows[2]);
    render_status(frame, app, rows[3]);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.lookup.config().label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.active()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.areas.input = Some(inner);

    if app.lookup.display_mode() == DisplayMode::Inline {
        // The sole selection renders inside the input, with a clear glyph.
        let name = app.lookup.selection()[0].name.clone();
        let glyph_x = (inner.x + name.chars().count() as u16 + 1).min(inner.right().saturating_sub(1));
        app.areas.inline_clear = Some(Rect::new(glyph_x, inner.y, 1, 1));

        let line = Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(app.theme.fg_bright())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("✕", Style::default().fg(app.theme.muted())),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
        return;
    }

    if app.input.is_empty() {
        frame.render_widget(
            Paragraph::new(app.lookup.config().placeholder.clone())
                .style(Style::default().fg(app.theme.muted())),
            inner,
        );
    } else {
        frame.render_widget(
            Paragraph::new(app.input.clone()).style(Style::default().fg(app.theme.fg())),
            inner,
        );
    }

    // Focus stays in the input; selection actions re-land it here on the
    // next frame.
    let cursor_x = inner.x + app.input.chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}

fn render_pills(frame: &mut Frame, app: &mut App, area: Rect) {
    let pills_mode = matches!(
        app.lookup.display_mode(),
        DisplayMode::MultiPills | DisplayMode::SinglePill
    );

    if pills_mode && !app.lookup.selection().is_empty() {
        let selection = app.lookup.selection().to_vec();
        let mut spans = Vec::new();
        let mut x = area.x;
        for record in &selection {
            let text = format!(" {} ✕ ", record.name);
            let width = text.chars().count() as u16;
            if x + width >= area.right() {
                break;
            }
            app.areas
                .pills
                .push((Rect::new(x, area.y, width, 1), record.id.clone()));
            spans.push(Span::styled(
                text,
                Style::default()
                    .fg(app.theme.fg_bright())
                    .bg(app.theme.bg_secondary()),
            ));
            spans.push(Span::raw(" "));
            x += width + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    } else if let Some(message) = app.lookup.validation_message() {
        let message = message.to_string();
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(app.theme.red())),
            area,
        );
    }
}

fn render_dropdown(frame: &mut Frame, app: &mut App, area: Rect) {
    if !app.lookup.session().is_visible() && !app.lookup.session().is_searching() {
        return;
    }

    let block = Block::default()
        .title(format!(" {} ", app.lookup.config().object_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.lookup.session().is_searching() {
        frame.render_widget(
            Paragraph::new("Searching...").style(Style::default().fg(app.theme.muted())),
            inner,
        );
        return;
    }

    let entries = app.lookup.session().results().to_vec();
    if entries.is_empty() {
        let term = app.lookup.session().term().to_string();
        frame.render_widget(
            Paragraph::new(format!("No results for '{term}'"))
                .style(Style::default().fg(app.theme.muted())),
            inner,
        );
        return;
    }

    // Two rows per entry: label, then dimmed secondary fields.
    let visible = (inner.height as usize / 2).max(1);
    let offset = if app.cursor >= visible {
        app.cursor + 1 - visible
    } else {
        0
    };
    app.areas.dropdown = Some(inner);
    app.areas.dropdown_offset = offset;

    let mut lines: Vec<Line> = Vec::new();
    for (i, entry) in entries.iter().enumerate().skip(offset).take(visible) {
        let mut style = Style::default().fg(app.theme.fg());
        if i == app.cursor {
            style = style.bg(app.theme.bg_secondary()).fg(app.theme.fg_bright());
        }

        lines.push(Line::from(Span::styled(
            entry.display_value.clone(),
            style.add_modifier(Modifier::BOLD),
        )));

        let info = entry
            .additional_info
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|f| format!("{}: {}", f.field, f.display()))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(Span::styled(
            format!("  {info}"),
            style.fg(app.theme.muted()),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status(frame: &mut Frame, app: &mut App, area: Rect) {
    let left = if app.status_message.is_empty() {
        "Type to search · Up/Down move · Enter select · Esc close · Ctrl-D clear".to_string()
    } else {
        app.status_message.clone()
    };

    let mut spans = vec![Span::styled(left, Style::default().fg(app.theme.muted()))];
    let count = app.lookup.selection().len();
    if count > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{count} selected"),
            Style::default().fg(app.theme.green()),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
