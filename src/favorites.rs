//! Favorite verses persisted under a single durable key.
//!
//! The list is append-only from the user's point of view: `add` never checks
//! for an existing entry at the same location, and `remove` drops every entry
//! at a location. Entries saved before Arabic text was stored are repaired on
//! load by fetching the Arabic text once and rewriting the list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future;
use serde::{Deserialize, Serialize};

use crate::alquran::types::Verse;
use crate::constants::storage::FAVORITES_KEY;
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;

/// A saved verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteVerse {
    /// Translation text at the time it was saved
    pub text: String,
    /// Arabic text; missing on entries saved by older versions
    #[serde(default)]
    pub arabic_text: Option<String>,
    pub chapter_name: String,
    pub chapter_number: u32,
    pub verse_number: u32,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl FavoriteVerse {
    /// Build a favorite from a displayed verse.
    ///
    /// Returns `None` for verses without a chapter back-reference or
    /// without translation text.
    pub fn from_verse(verse: &Verse) -> Option<Self> {
        let chapter = verse.chapter.as_ref()?;
        if verse.text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text: verse.text.clone(),
            arabic_text: verse.arabic_text.clone(),
            chapter_name: chapter.english_name.clone(),
            chapter_number: chapter.number,
            verse_number: verse.number_in_chapter,
            saved_at: Some(Utc::now()),
        })
    }

    /// (chapter, verse) location of this favorite
    pub const fn location(&self) -> (u32, u32) {
        (self.chapter_number, self.verse_number)
    }

    fn needs_arabic(&self) -> bool {
        self.arabic_text.as_deref().map_or(true, |t| t.trim().is_empty())
    }
}

/// Source of Arabic text for the backfill pass
#[async_trait]
pub trait ArabicSource: Send + Sync {
    /// Arabic text of one verse in the fixed Arabic edition.
    async fn fetch_arabic_text(&self, chapter: u32, verse: u32) -> Result<String>;
}

/// Fill missing Arabic text from `fetched`, keyed by (chapter, verse).
///
/// Returns the repaired list and how many entries were changed.
pub fn backfill_arabic(
    entries: Vec<FavoriteVerse>,
    fetched: &HashMap<(u32, u32), String>,
) -> (Vec<FavoriteVerse>, usize) {
    let mut repaired = 0;
    let entries = entries
        .into_iter()
        .map(|mut entry| {
            if entry.needs_arabic() {
                if let Some(text) = fetched.get(&entry.location()) {
                    entry.arabic_text = Some(text.clone());
                    repaired += 1;
                }
            }
            entry
        })
        .collect();
    (entries, repaired)
}

/// Favorites persisted in a `KeyValueStore`
///
/// Every read-modify-write of the stored list runs under `write_lock`.
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    /// Create a store over the given backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::storage(FAVORITES_KEY, "favorites lock poisoned"))
    }

    /// Read the stored list, failing on unreadable or corrupt data.
    pub fn try_load(&self) -> Result<Vec<FavoriteVerse>> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw)
            .map_err(|e| Error::storage(FAVORITES_KEY, format!("Corrupt favorites data: {e}")))
    }

    /// Read the stored list; an unreadable store yields an empty list.
    pub fn load(&self) -> Vec<FavoriteVerse> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable favorites: {e}");
            Vec::new()
        })
    }

    fn save(&self, entries: &[FavoriteVerse]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::storage(FAVORITES_KEY, format!("Failed to serialize favorites: {e}")))?;
        self.store.put(FAVORITES_KEY, &json)
    }

    /// Append a favorite. Duplicates at the same location are kept.
    pub fn add(&self, favorite: FavoriteVerse) -> Result<()> {
        if favorite.text.trim().is_empty() {
            return Err(Error::Msg("Cannot save a favorite without translation text".into()));
        }
        let _guard = self.lock()?;
        let mut entries = self.try_load()?;
        entries.push(favorite);
        self.save(&entries)
    }

    /// Remove every favorite at (chapter, verse). Returns how many were removed.
    pub fn remove(&self, chapter: u32, verse: u32) -> Result<usize> {
        let _guard = self.lock()?;
        let entries = self.try_load()?;
        let before = entries.len();
        let kept: Vec<_> = entries
            .into_iter()
            .filter(|f| f.location() != (chapter, verse))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.save(&kept)?;
        }
        Ok(removed)
    }

    /// Whether any favorite exists at (chapter, verse).
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        self.load().iter().any(|f| f.location() == (chapter, verse))
    }

    /// Load favorites, backfilling missing Arabic text first.
    ///
    /// Each location lacking Arabic text is fetched once. The fetched text is
    /// applied to the list as stored after the fetches finish, so favorites
    /// added or removed meanwhile are kept. When at least one entry is
    /// repaired the list is written back in a single write; entries whose
    /// fetch failed stay as they are until the next call.
    pub async fn list(&self, source: &dyn ArabicSource) -> Vec<FavoriteVerse> {
        let entries = self.load();

        let mut missing: Vec<(u32, u32)> = entries
            .iter()
            .filter(|f| f.needs_arabic())
            .map(FavoriteVerse::location)
            .collect();
        missing.sort_unstable();
        missing.dedup();
        if missing.is_empty() {
            return entries;
        }

        let results = future::join_all(missing.into_iter().map(|(chapter, verse)| async move {
            ((chapter, verse), source.fetch_arabic_text(chapter, verse).await)
        }))
        .await;

        let fetched: HashMap<(u32, u32), String> = results
            .into_iter()
            .filter_map(|((chapter, verse), result)| match result {
                Ok(text) if !text.trim().is_empty() => Some(((chapter, verse), text)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Arabic backfill failed for {chapter}:{verse}: {e}");
                    None
                }
            })
            .collect();

        self.apply_backfill(&fetched)
    }

    /// Re-read the stored list and apply fetched Arabic text to it under the lock.
    fn apply_backfill(&self, fetched: &HashMap<(u32, u32), String>) -> Vec<FavoriteVerse> {
        let _guard = match self.lock() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!("Skipping Arabic backfill: {e}");
                return self.load();
            }
        };
        let current = match self.try_load() {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!("Ignoring unreadable favorites: {e}");
                return Vec::new();
            }
        };

        let (entries, repaired) = backfill_arabic(current, fetched);
        if repaired > 0 {
            match self.save(&entries) {
                Ok(()) => tracing::info!("Backfilled Arabic text for {repaired} favorites"),
                Err(e) => tracing::warn!("Failed to persist backfilled favorites: {e}"),
            }
        }
        entries
    }
}
