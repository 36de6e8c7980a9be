//! Fetch-and-persist layer between the UI and the remote client.
//!
//! Full lists fetched here are written to the local cache under the same key
//! scheme the client reads, so later single-verse lookups in those chapters
//! are answered without a network round-trip.

use std::sync::Arc;

use crate::alquran::transport::{HttpTransport, Transport};
use crate::alquran::types::{Chapter, Verse};
use crate::alquran::QuranClient;
use crate::cache::LocalCache;
use crate::error::Result;
use crate::reference::VerseRef;
use crate::types::Edition;

use super::lookup::{LookupOutcome, LookupTicket};

/// Loads chapters and verses for one translation edition
pub struct Library<T = HttpTransport> {
    client: QuranClient<T>,
    cache: Arc<LocalCache>,
    edition: Edition,
}

impl<T: Transport> Library<T> {
    /// Create a library over a client and the cache that client reads.
    pub fn new(client: QuranClient<T>, edition: Edition) -> Self {
        let cache = Arc::clone(client.cache());
        Self { client, cache, edition }
    }

    /// Selected translation edition.
    pub const fn edition(&self) -> &Edition {
        &self.edition
    }

    /// Underlying client.
    pub const fn client(&self) -> &QuranClient<T> {
        &self.client
    }

    /// Chapter list: fetched and cached, or the cached copy if the fetch fails.
    pub async fn load_chapters(&self) -> Result<Vec<Chapter>> {
        match self.client.fetch_chapter_list().await {
            Ok(chapters) => {
                if let Err(e) = self.cache.store_chapters(&self.edition, &chapters) {
                    tracing::warn!("Failed to cache chapter list: {e}");
                }
                Ok(chapters)
            }
            Err(e) => self.cache.chapters(&self.edition).map_or(Err(e), |cached| {
                tracing::info!("Using cached chapter list ({} chapters)", cached.len());
                Ok(cached)
            }),
        }
    }

    /// Verses of one chapter: fetched and cached, or the cached copy if the fetch fails.
    ///
    /// "Not found" is never masked by the cache.
    pub async fn load_chapter_verses(&self, chapter: u32) -> Result<Vec<Verse>> {
        match self.client.fetch_chapter_verses(chapter, &self.edition).await {
            Ok(verses) => {
                if let Err(e) = self.cache.store_chapter_verses(chapter, &self.edition, &verses) {
                    tracing::warn!("Failed to cache verses of chapter {chapter}: {e}");
                }
                Ok(verses)
            }
            Err(e) if e.is_not_found() => Err(e),
            Err(e) => self.cache.chapter_verses(chapter, &self.edition).map_or(Err(e), |cached| {
                tracing::info!("Using cached verses of chapter {chapter}");
                Ok(cached)
            }),
        }
    }

    /// Look up one verse.
    ///
    /// Returns `None` if `ticket` went stale while the request was in flight.
    pub async fn lookup(&self, reference: VerseRef, ticket: &LookupTicket) -> Option<LookupOutcome> {
        if !ticket.is_current() {
            return None;
        }
        let result = self.client.fetch_verse_at(reference, &self.edition).await;
        if !ticket.is_current() {
            tracing::debug!("Dropping stale result for {reference}");
            return None;
        }
        Some(LookupOutcome::from_result(result))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::alquran::api::testing::*;
    use crate::services::lookup::{plan_search, LookupSession, SearchAction};
    use serde_json::json;

    const FAATIHA_PATH: &str = "/surah/1/editions/en.asad,quran-uthmani";

    fn faatiha_editions() -> serde_json::Value {
        let translation: Vec<_> = (1..=7).map(|n| raw_ayah(n, &format!("t{n}"))).collect();
        let arabic: Vec<_> = (1..=7).map(|n| raw_ayah(n, &format!("a{n}"))).collect();
        json!([
            surah_edition(1, "Al-Faatiha", "en.asad", translation),
            surah_edition(1, "Al-Faatiha", "quran-uthmani", arabic),
        ])
    }

    fn library(transport: FakeTransport) -> Library<FakeTransport> {
        let client = QuranClient::with_transport(transport, Arc::new(LocalCache::in_memory()));
        Library::new(client, Edition::default())
    }

    #[tokio::test]
    async fn loaded_chapter_answers_lookups_from_cache() {
        let transport = FakeTransport::new()
            .with("/surah", json!([raw_surah(1, "Al-Faatiha", 7), raw_surah(2, "Al-Baqara", 286)]))
            .with(FAATIHA_PATH, faatiha_editions());
        let library = library(transport);

        let chapters = library.load_chapters().await.unwrap();
        library.load_chapter_verses(1).await.unwrap();
        let calls_before = library.client.transport_calls();

        let session = LookupSession::new();
        for n in 1..=7 {
            let SearchAction::Lookup(reference) = plan_search(&format!("1:{n}"), &chapters) else {
                panic!("expected lookup");
            };
            let outcome = library.lookup(reference, &session.begin()).await.unwrap();
            let LookupOutcome::Found(verse) = outcome else {
                panic!("expected verse");
            };
            assert_eq!(verse.chapter_number(), Some(1));
            assert_eq!(verse.number_in_chapter, n);
            assert_eq!(verse.arabic_text, Some(format!("a{n}")));
        }
        assert_eq!(library.client.transport_calls(), calls_before);
    }

    #[tokio::test]
    async fn failed_refresh_falls_back_to_cache() {
        let cache = Arc::new(LocalCache::in_memory());
        let edition = Edition::default();
        cache.store_chapters(&edition, &crate::cache::fixtures::chapters()).unwrap();

        let client = QuranClient::with_transport(FakeTransport::new().failing("/surah"), cache);
        let library = Library::new(client, edition);
        let chapters = library.load_chapters().await.unwrap();
        assert_eq!(chapters.len(), 4);
    }

    #[tokio::test]
    async fn failure_without_cache_is_an_error() {
        let library = library(FakeTransport::new().failing("/surah"));
        assert!(library.load_chapters().await.is_err());
    }

    #[tokio::test]
    async fn not_found_is_not_masked_by_cache() {
        let library = library(FakeTransport::new());
        let err = library.load_chapter_verses(1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn lookup_reports_not_found_and_failure_separately() {
        let library = library(FakeTransport::new().failing("/ayah/2:1/editions/en.asad,quran-uthmani"));
        let session = LookupSession::new();

        let missing = library.lookup(VerseRef::new(3, 1), &session.begin()).await.unwrap();
        assert_eq!(missing, LookupOutcome::NotFound);

        let failed = library.lookup(VerseRef::new(2, 1), &session.begin()).await.unwrap();
        assert!(matches!(failed, LookupOutcome::Failed(_)));
    }

    /// Transport that starts a newer lookup while a request is in flight
    struct SupersedingTransport {
        session: LookupSession,
        inner: FakeTransport,
    }

    #[async_trait::async_trait]
    impl Transport for SupersedingTransport {
        async fn get_data(&self, path: &str) -> crate::error::Result<serde_json::Value> {
            tokio::task::yield_now().await;
            let _newer = self.session.begin();
            self.inner.get_data(path).await
        }
    }

    #[tokio::test]
    async fn ticket_superseded_during_fetch_drops_result() {
        let session = LookupSession::new();
        let inner = FakeTransport::new().with(
            "/ayah/2:255/editions/en.asad,quran-uthmani",
            json!([single_ayah(2, "Al-Baqara", 255, "en.asad", "God - there is no deity save Him")]),
        );
        let transport = SupersedingTransport { session: session.clone(), inner };
        let client = QuranClient::with_transport(transport, Arc::new(LocalCache::in_memory()));
        let library = Library::new(client, Edition::default());

        let ticket = session.begin();
        assert!(library.lookup(VerseRef::new(2, 255), &ticket).await.is_none());
        assert!(!ticket.is_current());
    }

    #[tokio::test]
    async fn stale_ticket_skips_fetch() {
        let library = library(FakeTransport::new());
        let session = LookupSession::new();
        let stale = session.begin();
        let _fresh = session.begin();
        assert!(library.lookup(VerseRef::new(1, 1), &stale).await.is_none());
        assert_eq!(library.client.transport_calls(), 0);
    }
}
