use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::cache::LocalCache;
use crate::config::Config;
use crate::constants::api::ARABIC_EDITION;
use crate::error::{Error, Result};
use crate::favorites::ArabicSource;
use crate::reference::{parse_reference, VerseRef};
use crate::types::Edition;

use super::merge::{join_editions, join_single};
use super::transport::{HttpTransport, Transport};
use super::types::{Chapter, ChapterRef, RawAyah, RawSurah, RawSurahEdition, Verse};

/// Client for the alquran.cloud text API
///
/// Verse-level requests always ask for two editions at once (the selected
/// translation and the fixed Arabic edition) and merge them into one record.
/// Single-verse lookups are served from the local cache when possible.
pub struct QuranClient<T = HttpTransport> {
    transport: T,
    cache: Arc<LocalCache>,
}

impl QuranClient<HttpTransport> {
    /// Create a client from config, sharing the given cache
    pub fn new(config: &Config, cache: Arc<LocalCache>) -> Self {
        Self::with_transport(HttpTransport::new(config), cache)
    }
}

impl<T: Transport> QuranClient<T> {
    /// Create a client over any transport
    pub const fn with_transport(transport: T, cache: Arc<LocalCache>) -> Self {
        Self { transport, cache }
    }

    /// The cache this client reads from
    pub fn cache(&self) -> &Arc<LocalCache> {
        &self.cache
    }

    /// GET a path and decode its `data` member
    async fn get<D: DeserializeOwned>(&self, path: &str) -> Result<D> {
        let data: Value = self.transport.get_data(path).await?;
        serde_json::from_value(data)
            .map_err(|e| Error::parse(format!("Unexpected payload from {path}: {e}"), None))
    }

    /// Fetch all 114 chapters in canonical order
    pub async fn fetch_chapter_list(&self) -> Result<Vec<Chapter>> {
        let raw: Vec<RawSurah> = self.get("/surah").await
            .inspect_err(|e| tracing::warn!("Failed to fetch chapter list: {e}"))?;

        let mut chapters: Vec<Chapter> = raw.into_iter().map(Chapter::from).collect();
        chapters.sort_by_key(|c| c.number);
        Ok(chapters)
    }

    /// Fetch every verse of a chapter in the translation and Arabic editions
    pub async fn fetch_chapter_verses(&self, chapter: u32, edition: &Edition) -> Result<Vec<Verse>> {
        let path = format!("/surah/{chapter}/editions/{edition},{ARABIC_EDITION}");
        let editions: Vec<RawSurahEdition> = self.get(&path).await
            .inspect_err(|e| tracing::warn!("Failed to fetch verses of chapter {chapter}: {e}"))?;

        let (translation, arabic) = split_editions(editions, edition, |e| e.edition.identifier.as_str());

        let Some(translation) = translation else {
            tracing::warn!("Edition {edition} missing from chapter {chapter} response");
            return Err(Error::NotFound(format!("chapter {chapter} in edition {edition}")));
        };

        let chapter_ref = ChapterRef {
            number: translation.number,
            english_name: translation.english_name.clone(),
        };
        let arabic_ayahs = arabic.map(|a| a.ayahs).unwrap_or_default();

        let mut verses = join_editions(translation.ayahs, arabic_ayahs);
        let fetched = verses.len();
        verses.retain(|v| !v.text.trim().is_empty());
        if verses.len() < fetched {
            tracing::warn!(
                "Dropped {} verses of chapter {chapter} without {edition} text",
                fetched - verses.len()
            );
        }
        for verse in &mut verses {
            verse.chapter = Some(chapter_ref.clone());
        }
        Ok(verses)
    }

    /// Fetch a single verse by reference text such as `"2:255"`
    ///
    /// Served from cache when both the chapter list and that chapter's verses
    /// are cached for `edition`. Text that does not parse as a reference is
    /// passed to the API unchanged.
    pub async fn fetch_verse(&self, reference: &str, edition: &Edition) -> Result<Verse> {
        let parsed = parse_reference(reference).map(|r| VerseRef::new(r.chapter, r.verse));

        if let Some(verse_ref) = parsed {
            if let Some(verse) = self.cache.cached_verse(verse_ref, edition) {
                tracing::debug!("Serving {verse_ref} ({edition}) from cache");
                return Ok(verse);
            }
        }

        let target = parsed.map_or_else(|| reference.trim().to_string(), |r| r.to_string());
        let path = format!("/ayah/{target}/editions/{edition},{ARABIC_EDITION}");
        let ayahs: Vec<RawAyah> = self.get(&path).await
            .inspect_err(|e| tracing::warn!("Failed to fetch verse {target}: {e}"))?;

        let (translation, arabic) = split_editions(ayahs, edition, |a| {
            a.edition.as_ref().map_or("", |e| e.identifier.as_str())
        });

        let Some(translation) = translation else {
            tracing::warn!("Edition {edition} missing from verse {target} response");
            return Err(Error::NotFound(format!("{target} in edition {edition}")));
        };
        if translation.text.trim().is_empty() {
            tracing::warn!("Verse {target} has no {edition} text");
            return Err(Error::NotFound(format!("{target} in edition {edition}")));
        }

        Ok(join_single(translation, arabic))
    }

    /// Fetch a validated reference
    pub async fn fetch_verse_at(&self, reference: VerseRef, edition: &Edition) -> Result<Verse> {
        self.fetch_verse(&reference.to_string(), edition).await
    }

    /// Fetch only the Arabic text of a verse
    pub async fn fetch_arabic(&self, chapter: u32, verse: u32) -> Result<String> {
        let path = format!("/ayah/{chapter}:{verse}/{ARABIC_EDITION}");
        let ayah: RawAyah = self.get(&path).await
            .inspect_err(|e| tracing::warn!("Failed to fetch Arabic text of {chapter}:{verse}: {e}"))?;
        Ok(ayah.text)
    }
}

#[async_trait]
impl<T: Transport> ArabicSource for QuranClient<T> {
    async fn fetch_arabic_text(&self, chapter: u32, verse: u32) -> Result<String> {
        self.fetch_arabic(chapter, verse).await
    }
}

/// Demultiplex per-edition payloads into (translation, arabic)
fn split_editions<P>(
    payloads: Vec<P>,
    edition: &Edition,
    identifier: impl Fn(&P) -> &str,
) -> (Option<P>, Option<P>) {
    let mut translation = None;
    let mut arabic = None;
    for payload in payloads {
        let id = identifier(&payload);
        if id == edition.as_str() && translation.is_none() {
            translation = Some(payload);
        } else if id == ARABIC_EDITION && arabic.is_none() {
            arabic = Some(payload);
        }
    }
    (translation, arabic)
}


#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::testing::*;
    use super::*;
    use crate::cache::fixtures;
    use serde_json::json;

    fn client(transport: FakeTransport) -> QuranClient<FakeTransport> {
        QuranClient::with_transport(transport, Arc::new(LocalCache::in_memory()))
    }

    #[tokio::test]
    async fn chapter_list_is_sorted() {
        let transport = FakeTransport::new().with(
            "/surah",
            json!([raw_surah(2, "Al-Baqara", 286), raw_surah(1, "Al-Faatiha", 7)]),
        );
        let chapters = client(transport).fetch_chapter_list().await.unwrap();
        assert_eq!(chapters.iter().map(|c| c.number).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(chapters[1].verse_count, 286);
    }

    #[tokio::test]
    async fn chapter_list_failure_is_reported() {
        let transport = FakeTransport::new().failing("/surah");
        let err = client(transport).fetch_chapter_list().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn malformed_payload_is_parse_error() {
        let transport = FakeTransport::new().with("/surah", json!({"unexpected": true}));
        let err = client(transport).fetch_chapter_list().await.unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[tokio::test]
    async fn chapter_verses_merge_editions() {
        let transport = FakeTransport::new().with(
            "/surah/1/editions/en.asad,quran-uthmani",
            json!([
                surah_edition(1, "Al-Faatiha", "quran-uthmani", vec![
                    raw_ayah(1, "a1"), raw_ayah(2, "a2"),
                ]),
                surah_edition(1, "Al-Faatiha", "en.asad", vec![
                    raw_ayah(1, "t1"), raw_ayah(2, "t2"), raw_ayah(3, "t3"),
                ]),
            ]),
        );
        let verses = client(transport)
            .fetch_chapter_verses(1, &Edition::default())
            .await
            .unwrap();

        assert_eq!(verses.len(), 3);
        assert_eq!(verses[0].arabic_text.as_deref(), Some("a1"));
        assert_eq!(verses[1].arabic_text.as_deref(), Some("a2"));
        assert_eq!(verses[2].arabic_text, None);
        assert!(verses.iter().all(|v| v.chapter_number() == Some(1)));
        assert_eq!(verses[0].label(), "Al-Faatiha 1:1");
    }

    #[tokio::test]
    async fn chapter_verses_without_translation_is_not_found() {
        let transport = FakeTransport::new().with(
            "/surah/1/editions/en.asad,quran-uthmani",
            json!([surah_edition(1, "Al-Faatiha", "quran-uthmani", vec![raw_ayah(1, "a1")])]),
        );
        let err = client(transport)
            .fetch_chapter_verses(1, &Edition::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn verse_lookup_merges_and_normalizes_reference() {
        let transport = FakeTransport::new().with(
            "/ayah/2:255/editions/en.asad,quran-uthmani",
            json!([
                single_ayah(2, "Al-Baqara", 255, "en.asad", "God - there is no deity save Him"),
                single_ayah(2, "Al-Baqara", 255, "quran-uthmani", "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ"),
            ]),
        );
        let client = client(transport);
        let verse = client.fetch_verse("2 / 255", &Edition::default()).await.unwrap();
        assert_eq!(verse.chapter_number(), Some(2));
        assert_eq!(verse.number_in_chapter, 255);
        assert!(verse.arabic_text.is_some());
        assert_eq!(client.transport.requested(), vec!["/ayah/2:255/editions/en.asad,quran-uthmani"]);
    }

    #[tokio::test]
    async fn unparsed_reference_is_passed_through() {
        let transport = FakeTransport::new().with(
            "/ayah/262/editions/en.asad,quran-uthmani",
            json!([single_ayah(2, "Al-Baqara", 255, "en.asad", "God - there is no deity save Him")]),
        );
        let client = client(transport);
        let verse = client.fetch_verse("262", &Edition::default()).await.unwrap();
        assert_eq!(verse.number_in_chapter, 255);
        assert!(verse.arabic_text.is_none());
    }

    #[tokio::test]
    async fn verse_without_translation_is_not_found() {
        let transport = FakeTransport::new().with(
            "/ayah/2:255/editions/en.asad,quran-uthmani",
            json!([single_ayah(2, "Al-Baqara", 255, "quran-uthmani", "arabic")]),
        );
        let err = client(transport).fetch_verse("2:255", &Edition::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn blank_translation_is_not_found() {
        let transport = FakeTransport::new().with(
            "/ayah/2:255/editions/en.asad,quran-uthmani",
            json!([
                single_ayah(2, "Al-Baqara", 255, "en.asad", "   "),
                single_ayah(2, "Al-Baqara", 255, "quran-uthmani", "arabic"),
            ]),
        );
        let err = client(transport).fetch_verse("2:255", &Edition::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn chapter_verses_skip_blank_translations() {
        let transport = FakeTransport::new().with(
            "/surah/1/editions/en.asad,quran-uthmani",
            json!([
                surah_edition(1, "Al-Faatiha", "en.asad", vec![
                    raw_ayah(1, "t1"), raw_ayah(2, ""), raw_ayah(3, "t3"),
                ]),
                surah_edition(1, "Al-Faatiha", "quran-uthmani", vec![
                    raw_ayah(1, "a1"), raw_ayah(2, "a2"), raw_ayah(3, "a3"),
                ]),
            ]),
        );
        let verses = client(transport)
            .fetch_chapter_verses(1, &Edition::default())
            .await
            .unwrap();
        let numbers: Vec<u32> = verses.iter().map(|v| v.number_in_chapter).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(verses[1].arabic_text.as_deref(), Some("a3"));
    }

    #[tokio::test]
    async fn cached_chapter_serves_verse_without_network() {
        let cache = Arc::new(LocalCache::in_memory());
        let edition = Edition::default();
        cache.store_chapters(&edition, &fixtures::chapters()).unwrap();
        let verses: Vec<_> = (1..=7).map(|n| fixtures::verse(1, n, &format!("t{n}"))).collect();
        cache.store_chapter_verses(1, &edition, &verses).unwrap();

        let client = QuranClient::with_transport(FakeTransport::new(), cache);
        for n in 1..=7 {
            let verse = client.fetch_verse(&format!("1:{n}"), &edition).await.unwrap();
            assert_eq!(verse.number_in_chapter, n);
            assert_eq!(verse.text, format!("t{n}"));
            assert_eq!(verse.chapter_number(), Some(1));
        }
        assert_eq!(client.transport.calls(), 0);
    }

    #[tokio::test]
    async fn cache_for_other_edition_goes_to_network() {
        let cache = Arc::new(LocalCache::in_memory());
        let asad = Edition::default();
        cache.store_chapters(&asad, &fixtures::chapters()).unwrap();
        cache.store_chapter_verses(1, &asad, &[fixtures::verse(1, 1, "t1")]).unwrap();

        let client = QuranClient::with_transport(FakeTransport::new(), cache);
        let err = client.fetch_verse("1:1", &Edition::new("en.sahih")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(client.transport.calls(), 1);
    }

    #[tokio::test]
    async fn arabic_only_fetch() {
        let transport = FakeTransport::new().with(
            "/ayah/112:1/quran-uthmani",
            single_ayah(112, "Al-Ikhlaas", 1, "quran-uthmani", "قُلْ هُوَ ٱللَّهُ أَحَدٌ"),
        );
        let text = client(transport).fetch_arabic_text(112, 1).await.unwrap();
        assert_eq!(text, "قُلْ هُوَ ٱللَّهُ أَحَدٌ");
    }
}
