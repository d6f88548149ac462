//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the poem composer using
//! ratatui. Drawing also records where the lists landed so pointer events
//! can be mapped back to rows.

mod bank;
mod poem;

pub use bank::draw_bank;
pub use poem::draw_poem;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::constants::ui;
use crate::input::Focus;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(ui::POEM_PANE_PERCENT),
            Constraint::Length(ui::TEXT_ENTRY_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(ui::COMMAND_BAR_HEIGHT), // Command/status bar at bottom
        ])
        .split(f.size());

    draw_poem(f, app, chunks[0]);
    draw_text_entry(f, app, chunks[1]);
    draw_bank(f, app, chunks[2]);
    draw_command_bar(f, app, chunks[3]);

    // Draw status/info modal (blocking)
    if let Some(status) = &app.status_message {
        draw_message(f, "Info", Color::Cyan, status);
        return;
    }
    // Draw error message if present (blocking)
    if let Some(error) = &app.error_message {
        draw_message(f, "Error", Color::Red, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f);
    }
}

fn draw_text_entry(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::TextEntry;
    let block = create_titled_block("Add words", is_focused);

    let paragraph = if app.text_input.is_empty() && !is_focused {
        Paragraph::new(" add missing words...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!(" {}", app.text_input)).style(Style::default().fg(Color::White))
    };
    f.render_widget(paragraph.block(block), area);

    if is_focused {
        f.set_cursor(line_cursor_x(area.left() + 2, &app.text_input, area.right()), area.top() + 1);
    }
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = match app.focus {
        Focus::Search => ("Search Bank", Color::Cyan),
        _ => ("Commands/Status", Color::Yellow),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    if app.focus == Focus::Search {
        let search = Paragraph::new(format!(" /{}", app.search_query))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(search, inner_area);
        f.set_cursor(
            line_cursor_x(inner_area.left() + 2, &app.search_query, inner_area.right()),
            inner_area.top(),
        );
        return;
    }

    let dragging = app.composer.drag_state().is_dragging();
    let help_text = match app.focus {
        Focus::Poem if dragging => create_help_text(&[
            ("↑/↓", "Move"),
            ("Space/Enter", "Drop"),
            ("Esc", "Cancel"),
        ]),
        Focus::Poem => create_help_text(&[
            ("Enter/x", "Remove"),
            ("Space", "Pick up"),
            ("Tab", "Bank"),
            ("i", "Type"),
            ("C", "Clear"),
            ("y", "Copy"),
            ("q", "Quit"),
        ]),
        Focus::TextEntry => create_help_text(&[("Enter", "Add"), ("Esc", "Done")]),
        Focus::Bank | Focus::Search => create_help_text(&[
            ("Enter", "Add"),
            ("/", "Search"),
            ("Tab", "Poem"),
            ("i", "Type"),
            ("C", "Clear"),
            ("y", "Copy"),
            ("q", "Quit"),
        ]),
    };

    let status_bar = Paragraph::new(Line::from(help_text)).style(Style::default().fg(Color::Gray));
    f.render_widget(status_bar, inner_area);
}

/// Column for the cursor after `text` typed from `start`, kept inside the
/// box that ends at `right`.
fn line_cursor_x(start: u16, text: &str, right: u16) -> u16 {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    start.saturating_add(width).min(right.saturating_sub(2))
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Center a `width` x `height` box in `outer`.
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (outer.width.saturating_sub(width)) / 2,
        y: (outer.height.saturating_sub(height)) / 2,
        width: width.min(outer.width),
        height: height.min(outer.height),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_message(f: &mut Frame, title: &str, color: Color, message: &str) {
    let size = f.size();

    // Calculate box width (max 80% of screen, min 40)
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(40) as u16;

    let inner_width = width.saturating_sub(4).max(1) as usize;
    let msg_lines = message.width().div_ceil(inner_width);
    let height = u16::try_from(msg_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(size.height.saturating_sub(4));

    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // message (flexible)
            Constraint::Length(1), // hint
        ])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame) {
    let size = f.size();
    let width = 60.min(size.width.saturating_sub(4));
    let height = 26.min(size.height.saturating_sub(4));
    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = build_help_content()
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

fn build_help_content() -> Vec<(&'static str, &'static str, bool)> {
    vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Tab", "Switch bank / poem", false),
        ("i", "Type missing words", false),
        ("C", "Clear the poem", false),
        ("y", "Copy poem as text", false),
        ("q / Ctrl+C", "Quit", false),
        ("", "", false),
        ("── Word Bank ──", "", true),
        ("↑/↓ or j/k", "Navigate words", false),
        ("Enter", "Add word to poem", false),
        ("Double-click", "Add word to poem", false),
        ("/", "Search words", false),
        ("", "", false),
        ("── Poem ──", "", true),
        ("Enter / x", "Remove item", false),
        ("Double-click", "Remove item", false),
        ("Space", "Pick up / drop item", false),
        ("↑/↓ dragging", "Move picked-up item", false),
        ("Esc dragging", "Stop dragging here", false),
        ("Mouse drag", "Reorder items", false),
        ("", "", false),
        ("Press Esc, F1 or ? to close", "", true),
    ]
}
