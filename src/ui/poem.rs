use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::input::Focus;
use crate::types::ItemKind;
use crate::ui::create_titled_block;

/// Render the poem list and its plain-text preview.
pub fn draw_poem(f: &mut Frame, app: &mut App, area: Rect) {
    // Items on the left, the assembled text on the right
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let is_focused = app.focus == Focus::Poem;
    let drag = app.composer.drag_state();
    let selected = app.poem_selected();

    let selection_bg = Color::Rgb(80, 80, 120);
    let dragging_bg = Color::Rgb(120, 60, 120);

    let items: Vec<ListItem> = app
        .composer
        .poem()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = Some(i) == selected;
            let is_dragged = drag.current() == Some(i);

            let prefix = if is_dragged {
                "≡ "
            } else if is_focused && is_selected {
                "> "
            } else {
                "  "
            };

            let kind_color = match item.kind {
                ItemKind::Image => Color::Green,
                ItemKind::Text => Color::Blue,
            };
            let modifier = if is_focused && is_selected { Modifier::BOLD } else { Modifier::empty() };
            let content_fg = if is_focused && is_selected { Color::Yellow } else { Color::White };

            let mut spans = vec![
                Span::raw(prefix),
                Span::styled(format!("[{}] ", item.kind.label()), Style::default().fg(kind_color)),
                Span::styled(item.content.clone(), Style::default().fg(content_fg).add_modifier(modifier)),
            ];
            if let Some(source) = &item.source_group {
                spans.push(Span::styled(format!("  ({source})"), Style::default().fg(Color::DarkGray)));
            }

            let bg = if is_dragged {
                dragging_bg
            } else if is_selected {
                selection_bg
            } else {
                Color::Reset
            };
            ListItem::new(Line::from(spans)).style(Style::default().bg(bg))
        })
        .collect();

    let title = if drag.is_dragging() {
        format!("Poem ({}) - dragging", app.composer.len())
    } else {
        format!("Poem ({})", app.composer.len())
    };

    app.poem_area = chunks[0];
    if items.is_empty() {
        let hint = Paragraph::new("double-click words or type below...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(create_titled_block(&title, is_focused));
        f.render_widget(hint, chunks[0]);
    } else {
        let list = List::new(items).block(create_titled_block(&title, is_focused));
        f.render_stateful_widget(list, chunks[0], &mut app.poem_list_state);
    }

    let preview = Paragraph::new(app.composer.to_plain_text())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::ITALIC))
        .wrap(Wrap { trim: true })
        .block(create_titled_block("Reads", false));
    f.render_widget(preview, chunks[1]);
}
