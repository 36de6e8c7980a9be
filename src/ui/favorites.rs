use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::create_titled_block;

pub fn draw_favorites(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let selected = app.favorites_state.selected();
    let items: Vec<ListItem> = app
        .favorite_list
        .iter()
        .enumerate()
        .map(|(i, favorite)| {
            let is_selected = Some(i) == selected;
            let (prefix, style) = if is_selected {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            let saved = favorite
                .saved_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let arabic_marker = if favorite.arabic_text.is_some() { "" } else { " (no Arabic)" };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    format!("{} {}:{}", favorite.chapter_name, favorite.chapter_number, favorite.verse_number),
                    style,
                ),
                Span::styled(arabic_marker, Style::default().fg(Color::Red)),
                Span::raw("  "),
                Span::styled(saved, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let title = format!("Favorites ({})", app.favorite_list.len());
    let list = List::new(items)
        .block(create_titled_block(&title, true))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("");
    f.render_stateful_widget(list, chunks[0], &mut app.favorites_state);

    let detail = selected.and_then(|i| app.favorite_list.get(i)).map_or_else(
        || vec![Line::from(Span::styled("No favorites yet", Style::default().fg(Color::DarkGray)))],
        |favorite| {
            let mut lines = Vec::new();
            if let Some(arabic) = &favorite.arabic_text {
                lines.push(Line::from(Span::styled(arabic.clone(), Style::default().fg(Color::Green))));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(favorite.text.clone()));
            lines
        },
    );
    let paragraph = Paragraph::new(detail)
        .block(create_titled_block("Ayah", false))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[1]);
}
