use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::ui::NAME_COLUMN_WIDTH;
use crate::ui::create_titled_block;

pub fn draw_chapter_list(f: &mut Frame, app: &mut App, area: Rect) {
    let has_result = app.lookup_result.is_some() || app.lookup_pending;
    let constraints = if has_result {
        [Constraint::Length(3), Constraint::Min(1), Constraint::Length(6)]
    } else {
        [Constraint::Length(3), Constraint::Min(1), Constraint::Length(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    // --- Search box ---
    let (search_line, search_style) = if app.search_query.is_empty() && !app.search_active {
        ("Press / to search surahs or enter a reference like 2:255".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (format!("/{}", app.search_query), Style::default().fg(Color::Cyan))
    };
    let mut spans = vec![Span::styled(search_line, search_style)];
    if let Some(notice) = &app.search_notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Red)));
    }
    let search = Paragraph::new(Line::from(spans)).block(create_titled_block("Search", app.search_active));
    f.render_widget(search, chunks[0]);

    // --- Chapter list ---
    let selected = app.chapter_list_state.selected();
    let items: Vec<ListItem> = app
        .visible()
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let is_selected = Some(i) == selected;
            let (prefix, name_style) = if is_selected {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{:>3}. ", chapter.number), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<NAME_COLUMN_WIDTH$}", chapter.english_name), name_style),
                Span::styled(
                    format!("{:<28}", chapter.english_name_translation),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{:>4} ayahs  {}", chapter.verse_count, chapter.revelation_type.name()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(chapter.name.clone(), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let title = format!("Surahs ({})", app.visible_chapters.len());
    let list = List::new(items)
        .block(create_titled_block(&title, !app.search_active))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("");
    f.render_stateful_widget(list, chunks[1], &mut app.chapter_list_state);

    // --- Lookup preview ---
    if has_result {
        let lines = match &app.lookup_result {
            Some(verse) => vec![
                Line::from(Span::styled(
                    verse.arabic_text.clone().unwrap_or_default(),
                    Style::default().fg(Color::Green),
                )),
                Line::from(Span::raw(verse.text.clone())),
            ],
            None => vec![Line::from(Span::styled("Looking up...", Style::default().fg(Color::DarkGray)))],
        };
        let open_key = if app.search_active { "Enter" } else { "v" };
        let title = app
            .lookup_result
            .as_ref()
            .map_or_else(|| "Ayah".to_string(), |v| format!("{} ({open_key} to open)", v.label()));
        let preview = Paragraph::new(lines)
            .block(create_titled_block(&title, false))
            .wrap(Wrap { trim: true });
        f.render_widget(preview, chunks[2]);
    }
}
