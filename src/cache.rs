//! Local cache of chapter lists and per-chapter verse lists.
//!
//! Entries are keyed by `"{kind}:{id}:{edition}"` so data from one edition is
//! never served for another. Reads fail closed: anything that cannot be read
//! or decoded is a miss. Only the component that fetched and displays a full
//! list writes it (see `services::library`).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::alquran::types::{Chapter, Verse};
use crate::constants::storage::{CHAPTER_LIST_ID, KIND_CHAPTERS, KIND_VERSES};
use crate::error::{Error, Result};
use crate::reference::VerseRef;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::Edition;

/// Key for the chapter list of an edition.
pub fn chapters_key(edition: &Edition) -> String {
    format!("{KIND_CHAPTERS}:{CHAPTER_LIST_ID}:{edition}")
}

/// Key for one chapter's verses in an edition.
pub fn verses_key(chapter: u32, edition: &Edition) -> String {
    format!("{KIND_VERSES}:{chapter}:{edition}")
}

/// Typed view over a `KeyValueStore`
pub struct LocalCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCache {
    /// Wrap an injected store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Process-local cache with no persistence.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read failed for {key}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| Error::storage(key, format!("Failed to serialize cache entry: {e}")))?;
        self.store.put(key, &json)
    }

    /// Cached chapter list for an edition.
    pub fn chapters(&self, edition: &Edition) -> Option<Vec<Chapter>> {
        self.read(&chapters_key(edition))
    }

    /// Cached verses of one chapter for an edition.
    pub fn chapter_verses(&self, chapter: u32, edition: &Edition) -> Option<Vec<Verse>> {
        self.read(&verses_key(chapter, edition))
    }

    /// Resolve a single verse from cache alone.
    ///
    /// Needs both the chapter metadata and that chapter's verse list; the
    /// returned verse carries the chapter back-reference.
    pub fn cached_verse(&self, reference: VerseRef, edition: &Edition) -> Option<Verse> {
        let chapter = self
            .chapters(edition)?
            .into_iter()
            .find(|c| c.number == reference.chapter)?;
        let mut verse = self
            .chapter_verses(reference.chapter, edition)?
            .into_iter()
            .find(|v| v.number_in_chapter == reference.verse)?;
        verse.chapter = Some(chapter.summary());
        Some(verse)
    }

    /// Persist a freshly fetched chapter list.
    pub fn store_chapters(&self, edition: &Edition, chapters: &[Chapter]) -> Result<()> {
        self.write(&chapters_key(edition), chapters)
    }

    /// Persist a freshly fetched chapter's verses.
    pub fn store_chapter_verses(&self, chapter: u32, edition: &Edition, verses: &[Verse]) -> Result<()> {
        self.write(&verses_key(chapter, edition), verses)
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::fixtures::{chapters, verse};
    use super::*;

    #[test]
    fn keys_include_edition() {
        let asad = Edition::new("en.asad");
        let sahih = Edition::new("en.sahih");
        assert_eq!(chapters_key(&asad), "surahs:all:en.asad");
        assert_eq!(verses_key(2, &asad), "ayahs:2:en.asad");
        assert_ne!(verses_key(2, &asad), verses_key(2, &sahih));
    }

    #[test]
    fn cached_verse_needs_both_entries() {
        let cache = LocalCache::in_memory();
        let edition = Edition::default();
        let reference = VerseRef::new(112, 1);

        cache.store_chapter_verses(112, &edition, &[verse(112, 1, "Say: He is God, the One")]).unwrap();
        assert!(cache.cached_verse(reference, &edition).is_none());

        cache.store_chapters(&edition, &chapters()).unwrap();
        let hit = cache.cached_verse(reference, &edition).unwrap();
        assert_eq!(hit.text, "Say: He is God, the One");
        let chapter = hit.chapter.unwrap();
        assert_eq!(chapter.number, 112);
        assert_eq!(chapter.english_name, "Al-Ikhlaas");
    }

    #[test]
    fn other_edition_is_a_miss() {
        let cache = LocalCache::in_memory();
        let edition = Edition::default();
        cache.store_chapters(&edition, &chapters()).unwrap();
        cache.store_chapter_verses(1, &edition, &[verse(1, 1, "In the name of God")]).unwrap();

        assert!(cache.cached_verse(VerseRef::new(1, 1), &edition).is_some());
        assert!(cache.cached_verse(VerseRef::new(1, 1), &Edition::new("en.sahih")).is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let edition = Edition::default();
        store.put(&chapters_key(&edition), "{not json").unwrap();
        let cache = LocalCache::new(store);
        assert!(cache.chapters(&edition).is_none());
    }

    #[test]
    fn verse_beyond_cached_list_is_a_miss() {
        let cache = LocalCache::in_memory();
        let edition = Edition::default();
        cache.store_chapters(&edition, &chapters()).unwrap();
        cache.store_chapter_verses(1, &edition, &[verse(1, 1, "a")]).unwrap();
        assert!(cache.cached_verse(VerseRef::new(1, 2), &edition).is_none());
    }
}
