//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod chapter_list;
mod favorites;
mod verse_view;

pub use chapter_list::draw_chapter_list;
pub use favorites::draw_favorites;
pub use verse_view::{draw_chapter_view, draw_verse_view};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Splash => draw_splash(f, app, chunks[0]),
        AppMode::ChapterList => draw_chapter_list(f, app, chunks[0]),
        AppMode::ChapterView => draw_chapter_view(f, app, chunks[0]),
        AppMode::VerseView => draw_verse_view(f, app, chunks[0]),
        AppMode::Favorites => draw_favorites(f, app, chunks[0]),
    }

    if app.is_loading {
        draw_loading_indicator(f);
    }

    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }

    if app.mode == AppMode::Splash {
        let msg = "Press any key to continue...";

        if chunks[1].width >= msg.len() as u16 && chunks[1].height >= 3 {
            let width = msg.len() as u16;
            let x = (chunks[1].width.saturating_sub(width)) / 2;
            let text_area = Rect {
                x: chunks[1].left() + x,
                y: chunks[1].top() + 1,
                width,
                height: 1,
            };
            f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Yellow)), text_area);
        }
    } else {
        draw_command_bar(f, app, chunks[1]);
    }
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = if app.search_active {
        ("Search", Color::Cyan)
    } else {
        ("Commands/Status", Color::Yellow)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    if app.search_active {
        let hints = create_help_text(&[("Enter", "Open"), ("Esc", "Done")]);
        let mut spans = vec![Span::styled(
            format!(" /{} ", app.search_query),
            Style::default().fg(Color::Cyan),
        )];
        spans.push(Span::raw("| "));
        spans.extend(hints);
        f.render_widget(Paragraph::new(Line::from(spans)), inner_area);
        return;
    }

    let help_text = match app.mode {
        AppMode::Splash => vec![],
        AppMode::ChapterList => create_help_text(&[
            ("/", "Search"),
            ("Enter", "Open"),
            ("f", "Favorites"),
            ("?", "Help"),
            ("q", "Quit"),
        ]),
        AppMode::ChapterView | AppMode::VerseView => create_help_text(&[
            ("Esc", "Back"),
            ("a", "Favorite"),
            ("c/C/b", "Copy"),
            ("o", "Copy link"),
            ("?", "Help"),
        ]),
        AppMode::Favorites => create_help_text(&[
            ("Esc", "Back"),
            ("d", "Remove"),
            ("c/C/b", "Copy"),
            ("o", "Copy link"),
        ]),
    };

    let mut text = help_text;
    text.push(Span::styled(
        format!(" | {}", app.config.edition),
        Style::default().fg(Color::DarkGray),
    ));

    let status_bar = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray));
    f.render_widget(status_bar, inner_area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

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

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, app: &App, area: Rect) {
    let logo = [
        r"   ___                       _____ _                ",
        r"  / _ \ _   _ _ __ __ _ _ __ |  ___| | _____      __",
        r" | | | | | | | '__/ _` | '_ \| |_  | |/ _ \ \ /\ / /",
        r" | |_| | |_| | | | (_| | | | |  _| | | (_) \ V  V / ",
        r"  \__\_\\__,_|_|  \__,_|_| |_|_|   |_|\___/ \_/\_/  ",
        r"                                                    ",
        r"           Surahs, ayahs and favorites              ",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue))
        .title(Span::styled(
            "QuranFlow",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(block, area);

    let logo_height = logo.len() as u16;
    let logo_width = logo[0].len() as u16;

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let vertical_pad = (inner_area.height.saturating_sub(logo_height)) / 2;
    let horizontal_pad = (inner_area.width.saturating_sub(logo_width)) / 2;

    for (i, line) in logo.iter().enumerate() {
        let y = inner_area.top() + vertical_pad + i as u16;
        if y >= inner_area.bottom() {
            break;
        }
        let text_area = Rect {
            x: inner_area.left() + horizontal_pad,
            y,
            width: (line.len() as u16).min(inner_area.width),
            height: 1,
        };
        let style = if i < 5 {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        f.render_widget(Paragraph::new(*line).style(style), text_area);
    }

    let version_text = format!("v{}", app.config.app_version());
    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(version_text).style(Style::default().fg(Color::Gray)),
            version_area,
        );
    }
}

/// Rect of `width` x `height` centered in `size`
fn centered(size: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn draw_loading_indicator(f: &mut Frame) {
    let area = centered(f.size(), 22, 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let text = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];
    f.render_widget(text, inner_area);
}

fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let area = centered(size, 50.min(size.width.saturating_sub(4)), 7);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[1]);
    f.render_widget(dismiss_hint(), inner_area[2]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_status_message(f: &mut Frame, message: &str) {
    use unicode_width::UnicodeWidthStr;
    let size = f.size();

    // Max 80% of screen, min 40
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(40) as u16;
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let msg_lines = message.width().div_ceil(inner_width);
    let height = (msg_lines as u16 + 4).min(size.height.saturating_sub(4));
    let area = centered(size, width, height);

    let block = Block::default()
        .title(Span::styled("Info", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);
    f.render_widget(dismiss_hint(), inner_area[1]);
}

fn dismiss_hint() -> Paragraph<'static> {
    Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();
    let area = centered(
        size,
        60.min(size.width.saturating_sub(4)),
        24.min(size.height.saturating_sub(4)),
    );

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
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

    let help_text: Vec<Line> = build_help_content(app.mode)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>12}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Ctrl+C", "Quit application", false),
        ("Esc", "Go back / dismiss modal", false),
        ("", "", false),
    ];

    match mode {
        AppMode::ChapterList => lines.extend([
            ("── Surahs ──", "", true),
            ("↑/↓ or j/k", "Navigate surahs", false),
            ("/", "Search by name, number or 2:255", false),
            ("Enter", "Open surah or found ayah", false),
            ("v", "Show found ayah", false),
            ("f", "Favorites", false),
            ("r", "Reload surah list", false),
            ("q", "Quit", false),
        ]),
        AppMode::ChapterView | AppMode::VerseView => lines.extend([
            ("── Ayahs ──", "", true),
            ("↑/↓ or j/k", "Navigate ayahs", false),
            ("a", "Add to favorites", false),
            ("c", "Copy translation", false),
            ("C", "Copy Arabic", false),
            ("b", "Copy both", false),
            ("o", "Copy quran.com link", false),
            ("f", "Favorites", false),
        ]),
        AppMode::Favorites => lines.extend([
            ("── Favorites ──", "", true),
            ("↑/↓ or j/k", "Navigate favorites", false),
            ("d / Del", "Remove favorite", false),
            ("c / C / b", "Copy translation / Arabic / both", false),
            ("o", "Copy quran.com link", false),
        ]),
        AppMode::Splash => lines.extend([("── Splash ──", "", true), ("Any key", "Continue to app", false)]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));
    lines
}
