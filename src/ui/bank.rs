use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::App;
use crate::input::Focus;
use crate::ui::create_titled_block;

/// Render the unplaced tokens grouped by source, recording row positions
/// for mouse hit-testing.
pub fn draw_bank(f: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = matches!(app.focus, Focus::Bank | Focus::Search);
    let selected = app.bank_selected;

    // Rows interleave group headers with tokens; remember which is which for
    // mouse hit-testing
    let mut rows: Vec<Option<usize>> = Vec::new();
    let mut selected_row = None;
    let mut list_items: Vec<ListItem> = Vec::new();
    let mut token_index = 0;

    let bank = app.visible_bank();
    let total = bank.len();
    for (source, tokens) in bank.groups() {
        rows.push(None);
        list_items.push(ListItem::new(Line::from(Span::styled(
            format!("src: {source}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED),
        ))));

        for token in tokens {
            let is_selected = token_index == selected;
            if is_selected {
                selected_row = Some(rows.len());
            }
            let (prefix, style) = if is_selected && is_focused {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            let bg = if is_selected { Color::Rgb(80, 80, 120) } else { Color::Reset };

            rows.push(Some(token_index));
            list_items.push(
                ListItem::new(Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(token.word.clone(), style),
                    Span::styled(format!("  {}", token.image_ref), Style::default().fg(Color::DarkGray)),
                ]))
                .style(Style::default().bg(bg)),
            );
            token_index += 1;
        }
    }
    drop(bank);

    let title = if app.search_query.is_empty() {
        format!("Word Bank ({total})")
    } else {
        format!("Word Bank ({total} matching \"{}\")", app.search_query)
    };

    let list = List::new(list_items).block(create_titled_block(&title, is_focused));
    app.bank_list_state.select(selected_row);
    app.bank_rows = rows;
    app.bank_area = area;
    f.render_stateful_widget(list, area, &mut app.bank_list_state);
}
