use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::alquran::types::Verse;
use crate::app::App;
use crate::ui::create_titled_block;

/// Lines for one verse: Arabic, translation, then a metadata line
fn verse_lines(verse: &Verse, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_selected { "> " } else { "  " };
    let number_style = if is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = Vec::new();
    if let Some(arabic) = &verse.arabic_text {
        lines.push(
            Line::from(Span::styled(arabic.clone(), Style::default().fg(Color::Green))).alignment(Alignment::Right),
        );
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{marker}{:>3}  ", verse.number_in_chapter), number_style),
        Span::raw(verse.text.clone()),
    ]));

    let mut meta = format!(
        "      juz {} | page {} | ruku {} | hizb quarter {}",
        verse.juz, verse.page, verse.ruku, verse.hizb_quarter
    );
    if verse.sajda.is_prostration() {
        meta.push_str(" | sajda");
    }
    lines.push(Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(""));
    lines
}

pub fn draw_chapter_view(f: &mut Frame, app: &mut App, area: Rect) {
    let title = app.current_chapter.as_ref().map_or_else(
        || "Surah".to_string(),
        |c| format!("{}. {} ({}) - {}", c.number, c.english_name, c.english_name_translation, c.name),
    );

    let selected = app.verse_list_state.selected();
    let mut lines = Vec::new();
    let mut selected_line = 0;
    for (i, verse) in app.verses.iter().enumerate() {
        if Some(i) == selected {
            selected_line = lines.len();
        }
        lines.extend(verse_lines(verse, Some(i) == selected));
    }

    // Keep the selected verse in view
    let visible_height = usize::from(area.height.saturating_sub(2));
    let scroll = selected_line.saturating_sub(visible_height / 3);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(create_titled_block(&title, true))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

pub fn draw_verse_view(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(verse) = &app.lookup_result else {
        let empty = Paragraph::new("No ayah selected").block(create_titled_block("Ayah", true));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = verse_lines(verse, false);
    if let Some(url) = verse.web_url() {
        lines.push(Line::from(Span::styled(url, Style::default().fg(Color::Cyan))));
    }

    let label = verse.label();
    let paragraph = Paragraph::new(lines)
        .block(create_titled_block(&label, true))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
