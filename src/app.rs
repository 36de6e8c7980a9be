use std::sync::Arc;

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::alquran::types::{Chapter, Verse};
use crate::alquran::QuranClient;
use crate::cache::LocalCache;
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::{Error, Result};
use crate::favorites::{FavoriteVerse, FavoritesStore};
use crate::services::library::Library;
use crate::services::lookup::{plan_search, LookupOutcome, LookupSession, SearchAction};
use crate::storage::FileStore;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    /// Chapter list with the search box.
    ChapterList,
    /// All verses of one chapter.
    ChapterView,
    /// Result of a chapter:verse lookup.
    VerseView,
    Favorites,
}

/// Results sent back from spawned fetch tasks
pub enum AppUpdate {
    ChaptersLoaded(Result<Vec<Chapter>>),
    VersesLoaded {
        chapter: u32,
        result: Result<Vec<Verse>>,
    },
    LookupFinished {
        ticket: u64,
        outcome: LookupOutcome,
    },
    FavoritesLoaded(Vec<FavoriteVerse>),
}

/// What a copy action should put on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Translation,
    Arabic,
    Both,
    Link,
}

pub struct App {
    pub mode: AppMode,
    pub config: Config,
    library: Arc<Library>,
    favorites: Arc<FavoritesStore>,
    session: LookupSession,
    pub chapters: Vec<Chapter>,
    /// Chapter numbers currently shown in the list (after filtering)
    pub visible_chapters: Vec<u32>,
    pub chapter_list_state: ListState,
    pub search_active: bool,
    pub search_query: String,
    /// Validation error, "not found" or "no match" message under the search box
    pub search_notice: Option<String>,
    pub lookup_pending: bool,
    pub lookup_result: Option<Verse>,
    pub current_chapter: Option<Chapter>,
    pub verses: Vec<Verse>,
    pub verse_list_state: ListState,
    pub favorite_list: Vec<FavoriteVerse>,
    pub favorites_state: ListState,
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let cache = Arc::new(LocalCache::new(Arc::new(FileStore::new(config.cache_dir()))));
        let client = QuranClient::new(&config, cache);
        let library = Arc::new(Library::new(client, config.edition.clone()));
        let favorites = Arc::new(FavoritesStore::new(Arc::new(FileStore::new(config.data_dir.clone()))));

        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            mode: AppMode::Splash,
            config,
            library,
            favorites,
            session: LookupSession::new(),
            chapters: Vec::new(),
            visible_chapters: Vec::new(),
            chapter_list_state: ListState::default(),
            search_active: false,
            search_query: String::new(),
            search_notice: None,
            lookup_pending: false,
            lookup_result: None,
            current_chapter: None,
            verses: Vec::new(),
            verse_list_state: ListState::default(),
            favorite_list: Vec::new(),
            favorites_state: ListState::default(),
            async_task_tx,
            async_task_rx,
            is_loading: false,
            error_message: None,
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Chapters in the current (possibly filtered) list order
    pub fn visible(&self) -> Vec<&Chapter> {
        self.visible_chapters
            .iter()
            .filter_map(|n| self.chapters.iter().find(|c| c.number == *n))
            .collect()
    }

    fn selected_chapter(&self) -> Option<Chapter> {
        let idx = self.chapter_list_state.selected()?;
        self.visible().get(idx).map(|c| (*c).clone())
    }

    fn selected_verse(&self) -> Option<&Verse> {
        match self.mode {
            AppMode::ChapterView => self.verse_list_state.selected().and_then(|i| self.verses.get(i)),
            AppMode::VerseView => self.lookup_result.as_ref(),
            _ => None,
        }
    }

    // --- Loading ---

    /// Kick off the chapter list fetch
    pub fn load_chapters(&mut self) {
        self.is_loading = true;
        let library = Arc::clone(&self.library);
        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            let result = library.load_chapters().await;
            let _ = tx.send(AppUpdate::ChaptersLoaded(result)).await;
        });
    }

    fn open_chapter(&mut self, chapter: Chapter) {
        self.is_loading = true;
        self.verses.clear();
        self.verse_list_state.select(None);
        let number = chapter.number;
        self.current_chapter = Some(chapter);
        self.mode = AppMode::ChapterView;

        let library = Arc::clone(&self.library);
        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            let result = library.load_chapter_verses(number).await;
            let _ = tx.send(AppUpdate::VersesLoaded { chapter: number, result }).await;
        });
    }

    fn open_favorites(&mut self) {
        self.mode = AppMode::Favorites;
        self.is_loading = true;
        let library = Arc::clone(&self.library);
        let favorites = Arc::clone(&self.favorites);
        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            let list = favorites.list(library.client()).await;
            let _ = tx.send(AppUpdate::FavoritesLoaded(list)).await;
        });
    }

    // --- Search ---

    /// Re-classify the search box after every edit
    pub fn on_search_changed(&mut self) {
        let action = plan_search(&self.search_query, &self.chapters);
        self.lookup_result = None;
        self.lookup_pending = false;
        self.search_notice = None;

        match action {
            SearchAction::ShowAll => {
                self.session.cancel();
                self.visible_chapters = self.chapters.iter().map(|c| c.number).collect();
            }
            SearchAction::Filter(numbers) => {
                self.session.cancel();
                if numbers.is_empty() {
                    self.search_notice = Some("No surah matches".to_string());
                }
                self.visible_chapters = numbers;
            }
            SearchAction::Reject(e) => {
                self.session.cancel();
                self.search_notice = Some(e.to_string());
            }
            SearchAction::Lookup(reference) => {
                let ticket = self.session.begin();
                self.lookup_pending = true;
                let library = Arc::clone(&self.library);
                let tx = self.async_task_tx.clone();
                tokio::spawn(async move {
                    if let Some(outcome) = library.lookup(reference, &ticket).await {
                        let _ = tx.send(AppUpdate::LookupFinished { ticket: ticket.id(), outcome }).await;
                    }
                });
            }
        }

        let selected = (!self.visible_chapters.is_empty()).then_some(0);
        self.chapter_list_state.select(selected);
    }

    // --- Async updates ---

    /// Drain results from async tasks
    pub fn handle_updates(&mut self) {
        loop {
            match self.async_task_rx.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::ChaptersLoaded(result) => {
                self.is_loading = false;
                match result {
                    Ok(chapters) => {
                        self.chapters = chapters;
                        self.on_search_changed();
                    }
                    Err(e) => {
                        self.error_message = Some(format!("Unable to load surahs: {e}"));
                    }
                }
            }
            AppUpdate::VersesLoaded { chapter, result } => {
                if self.current_chapter.as_ref().map(|c| c.number) != Some(chapter) {
                    return;
                }
                self.is_loading = false;
                match result {
                    Ok(verses) => {
                        self.verses = verses;
                        self.verse_list_state.select((!self.verses.is_empty()).then_some(0));
                    }
                    Err(e) if e.is_not_found() => {
                        self.error_message = Some(format!("Surah {chapter} not found"));
                    }
                    Err(e) => {
                        self.error_message = Some(format!("Unable to load surah {chapter}: {e}"));
                    }
                }
            }
            AppUpdate::LookupFinished { ticket, outcome } => {
                if !self.session.is_current(ticket) {
                    return;
                }
                self.lookup_pending = false;
                self.search_notice = outcome.message();
                if let LookupOutcome::Found(verse) = outcome {
                    self.lookup_result = Some(verse);
                }
            }
            AppUpdate::FavoritesLoaded(list) => {
                self.is_loading = false;
                self.favorite_list = list;
                self.favorites_state.select((!self.favorite_list.is_empty()).then_some(0));
            }
        }
    }

    // --- Actions ---

    fn add_favorite(&mut self) {
        let Some(verse) = self.selected_verse() else { return };
        let Some(favorite) = FavoriteVerse::from_verse(verse) else {
            self.status_message = Some("This ayah cannot be saved".to_string());
            return;
        };
        let label = verse.label();
        let (chapter, number) = favorite.location();
        if self.favorites.contains(chapter, number) {
            self.status_message = Some(format!("{label} is already in favorites"));
            return;
        }
        match self.favorites.add(favorite) {
            Ok(()) => self.status_message = Some(format!("Saved {label} to favorites")),
            Err(e) => self.error_message = Some(format!("Failed to save favorite: {e}")),
        }
    }

    fn remove_favorite(&mut self) {
        let Some(favorite) = self.favorites_state.selected().and_then(|i| self.favorite_list.get(i)) else {
            return;
        };
        let (chapter, verse) = favorite.location();
        match self.favorites.remove(chapter, verse) {
            Ok(_) => {
                self.favorite_list.retain(|f| f.location() != (chapter, verse));
                let len = self.favorite_list.len();
                let selected = self.favorites_state.selected().map(|i| i.min(len.saturating_sub(1)));
                self.favorites_state.select(if len == 0 { None } else { selected });
            }
            Err(e) => self.error_message = Some(format!("Failed to remove favorite: {e}")),
        }
    }

    fn copy(&mut self, target: CopyTarget) {
        let text = if self.mode == AppMode::Favorites {
            self.favorites_state
                .selected()
                .and_then(|i| self.favorite_list.get(i))
                .and_then(|f| favorite_copy_text(f, target))
        } else {
            self.selected_verse().and_then(|v| verse_copy_text(v, target))
        };

        let Some(text) = text else {
            self.status_message = Some("Nothing to copy".to_string());
            return;
        };
        match copy_to_clipboard(&text) {
            Ok(()) => self.status_message = Some("Copied to clipboard".to_string()),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // Modals block input until dismissed
        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return;
        }
        if self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.status_message = None;
            }
            return;
        }

        if self.mode == AppMode::Splash {
            self.mode = AppMode::ChapterList;
            if self.chapters.is_empty() && !self.is_loading {
                self.load_chapters();
            }
            return;
        }

        if self.search_active {
            self.handle_search_input(key);
            return;
        }

        if key.code == KeyCode::F(1) || key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }

        match self.mode {
            AppMode::Splash => {}
            AppMode::ChapterList => self.handle_chapter_list_key(key),
            AppMode::ChapterView | AppMode::VerseView => self.handle_verse_key(key),
            AppMode::Favorites => self.handle_favorites_key(key),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search_active = false,
            KeyCode::Enter => {
                self.search_active = false;
                if self.lookup_result.is_some() {
                    self.mode = AppMode::VerseView;
                } else if let Some(chapter) = self.selected_chapter() {
                    self.open_chapter(chapter);
                }
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.on_search_changed();
            }
            KeyCode::Down => move_selection(&mut self.chapter_list_state, self.visible_chapters.len(), 1),
            KeyCode::Up => move_selection(&mut self.chapter_list_state, self.visible_chapters.len(), -1),
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.on_search_changed();
            }
            _ => {}
        }
    }

    fn handle_chapter_list_key(&mut self, key: KeyEvent) {
        let len = self.visible_chapters.len();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('j') | KeyCode::Down => move_selection(&mut self.chapter_list_state, len, 1),
            KeyCode::Char('k') | KeyCode::Up => move_selection(&mut self.chapter_list_state, len, -1),
            KeyCode::Char('f') => self.open_favorites(),
            KeyCode::Char('r') => self.load_chapters(),
            KeyCode::Char('v') if self.lookup_result.is_some() => self.mode = AppMode::VerseView,
            KeyCode::Enter => {
                if let Some(chapter) = self.selected_chapter() {
                    self.open_chapter(chapter);
                }
            }
            KeyCode::Esc => {
                self.search_query.clear();
                self.on_search_changed();
            }
            _ => {}
        }
    }

    fn handle_verse_key(&mut self, key: KeyEvent) {
        let len = self.verses.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = AppMode::ChapterList,
            KeyCode::Char('j') | KeyCode::Down if self.mode == AppMode::ChapterView => {
                move_selection(&mut self.verse_list_state, len, 1);
            }
            KeyCode::Char('k') | KeyCode::Up if self.mode == AppMode::ChapterView => {
                move_selection(&mut self.verse_list_state, len, -1);
            }
            KeyCode::Char('a') => self.add_favorite(),
            KeyCode::Char('f') => self.open_favorites(),
            KeyCode::Char('c') => self.copy(CopyTarget::Translation),
            KeyCode::Char('C') => self.copy(CopyTarget::Arabic),
            KeyCode::Char('b') => self.copy(CopyTarget::Both),
            KeyCode::Char('o') => self.copy(CopyTarget::Link),
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) {
        let len = self.favorite_list.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = AppMode::ChapterList,
            KeyCode::Char('j') | KeyCode::Down => move_selection(&mut self.favorites_state, len, 1),
            KeyCode::Char('k') | KeyCode::Up => move_selection(&mut self.favorites_state, len, -1),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_favorite(),
            KeyCode::Char('c') => self.copy(CopyTarget::Translation),
            KeyCode::Char('C') => self.copy(CopyTarget::Arabic),
            KeyCode::Char('b') => self.copy(CopyTarget::Both),
            KeyCode::Char('o') => self.copy(CopyTarget::Link),
            _ => {}
        }
    }
}

/// Move a list selection by `delta`, clamped to the list bounds
pub fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

fn verse_copy_text(verse: &Verse, target: CopyTarget) -> Option<String> {
    match target {
        CopyTarget::Translation => Some(verse.text.clone()),
        CopyTarget::Arabic => verse.arabic_text.clone(),
        CopyTarget::Both => Some(verse.combined_text()),
        CopyTarget::Link => verse.web_url(),
    }
}

fn favorite_copy_text(favorite: &FavoriteVerse, target: CopyTarget) -> Option<String> {
    match target {
        CopyTarget::Translation => Some(favorite.text.clone()),
        CopyTarget::Arabic => favorite.arabic_text.clone(),
        CopyTarget::Both => Some(match &favorite.arabic_text {
            Some(arabic) => format!("{arabic}\n\n{}", favorite.text),
            None => favorite.text.clone(),
        }),
        CopyTarget::Link => Some(format!(
            "{}/{}/{}",
            crate::constants::api::WEB_BASE_URL,
            favorite.chapter_number,
            favorite.verse_number
        )),
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .and_then(|mut cb| cb.set_text(text.to_owned()))
        .map_err(|e| Error::Clipboard(e.to_string()))
}
