//! alquran.cloud data types.
//!
//! `Chapter` and `Verse` are the normalized records the rest of the crate
//! works with (and what the cache stores). The `Raw*` types mirror the API
//! payloads and are only used while decoding responses.

use serde::{Deserialize, Serialize};

use crate::constants::api::WEB_BASE_URL;
use crate::types::{RevelationType, Sajda};

/// One of the 114 chapters (surahs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Canonical number, 1..=114
    pub number: u32,
    /// Arabic name
    #[serde(default)]
    pub name: String,
    /// Transliterated english name (e.g. "Al-Baqara")
    pub english_name: String,
    /// English translation of the name (e.g. "The Cow")
    pub english_name_translation: String,
    /// Number of verses in the chapter
    pub verse_count: u32,
    pub revelation_type: RevelationType,
}

impl Chapter {
    /// Lightweight back-reference for verses of this chapter.
    pub fn summary(&self) -> ChapterRef {
        ChapterRef {
            number: self.number,
            english_name: self.english_name.clone(),
        }
    }
}

/// Weak back-reference from a verse to its chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub number: u32,
    pub english_name: String,
}

/// A verse (ayah) merged from the translation and Arabic editions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Global number across the whole text (1..=6236)
    pub number: u32,
    /// Number within its chapter
    pub number_in_chapter: u32,
    /// Translation text in the selected edition
    pub text: String,
    /// Arabic source text, when the Arabic edition had a counterpart
    #[serde(default)]
    pub arabic_text: Option<String>,
    /// Thirtieth-part index
    pub juz: u32,
    /// Seventh-part index
    pub manzil: u32,
    pub page: u32,
    /// Subsection index
    pub ruku: u32,
    /// Quarter-of-eighth index
    pub hizb_quarter: u32,
    #[serde(default)]
    pub sajda: Sajda,
    #[serde(default)]
    pub chapter: Option<ChapterRef>,
}

impl Verse {
    /// Chapter number, if the back-reference is attached.
    pub fn chapter_number(&self) -> Option<u32> {
        self.chapter.as_ref().map(|c| c.number)
    }

    /// "Al-Baqara 2:255" style label, or just the verse number without a chapter.
    pub fn label(&self) -> String {
        self.chapter.as_ref().map_or_else(
            || format!("Ayah {}", self.number_in_chapter),
            |c| format!("{} {}:{}", c.english_name, c.number, self.number_in_chapter),
        )
    }

    /// Canonical web page for this verse.
    pub fn web_url(&self) -> Option<String> {
        self.chapter
            .as_ref()
            .map(|c| format!("{WEB_BASE_URL}/{}/{}", c.number, self.number_in_chapter))
    }

    /// Translation and Arabic text together, for copying.
    pub fn combined_text(&self) -> String {
        match &self.arabic_text {
            Some(arabic) => format!("{arabic}\n\n{}", self.text),
            None => self.text.clone(),
        }
    }
}

/// Edition descriptor attached to every per-edition payload
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdition {
    pub identifier: String,
}

/// Chapter as sent by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurah {
    pub number: u32,
    #[serde(default)]
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    #[serde(default)]
    pub revelation_type: RevelationType,
}

impl From<RawSurah> for Chapter {
    fn from(raw: RawSurah) -> Self {
        Self {
            number: raw.number,
            name: raw.name,
            english_name: raw.english_name,
            english_name_translation: raw.english_name_translation,
            verse_count: raw.number_of_ayahs,
            revelation_type: raw.revelation_type,
        }
    }
}

/// `sajda` is `false` or an object describing the prostration
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSajda {
    Flag(bool),
    Detail {
        #[serde(default)]
        recommended: bool,
        #[serde(default)]
        obligatory: bool,
    },
}

impl Default for RawSajda {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl From<RawSajda> for Sajda {
    fn from(raw: RawSajda) -> Self {
        match raw {
            RawSajda::Flag(false) => Self::None,
            RawSajda::Detail { obligatory: true, .. } => Self::Obligatory,
            RawSajda::Flag(true) | RawSajda::Detail { .. } => Self::Recommended,
        }
    }
}

/// Verse as sent by the API, in either the chapter or single-verse shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAyah {
    pub number: u32,
    pub text: String,
    pub number_in_surah: u32,
    #[serde(default)]
    pub juz: u32,
    #[serde(default)]
    pub manzil: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub ruku: u32,
    #[serde(default)]
    pub hizb_quarter: u32,
    #[serde(default)]
    pub sajda: RawSajda,
    /// Present on single-verse responses
    #[serde(default)]
    pub edition: Option<RawEdition>,
    /// Present on single-verse responses
    #[serde(default)]
    pub surah: Option<RawSurah>,
}

impl RawAyah {
    /// Normalize into a `Verse` without Arabic text.
    pub fn into_verse(self) -> Verse {
        let chapter = self.surah.map(|s| ChapterRef {
            number: s.number,
            english_name: s.english_name,
        });
        Verse {
            number: self.number,
            number_in_chapter: self.number_in_surah,
            text: self.text,
            arabic_text: None,
            juz: self.juz,
            manzil: self.manzil,
            page: self.page,
            ruku: self.ruku,
            hizb_quarter: self.hizb_quarter,
            sajda: self.sajda.into(),
            chapter,
        }
    }
}

/// One edition's view of a chapter, from `/surah/{n}/editions/...`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurahEdition {
    pub number: u32,
    pub english_name: String,
    #[serde(default)]
    pub ayahs: Vec<RawAyah>,
    pub edition: RawEdition,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn decodes_sajda_variants() {
        let flag: RawSajda = serde_json::from_str("false").unwrap();
        assert_eq!(Sajda::from(flag), Sajda::None);

        let detail: RawSajda =
            serde_json::from_str(r#"{"id":1,"recommended":true,"obligatory":false}"#).unwrap();
        assert_eq!(Sajda::from(detail), Sajda::Recommended);

        let obligatory: RawSajda =
            serde_json::from_str(r#"{"id":15,"recommended":false,"obligatory":true}"#).unwrap();
        assert_eq!(Sajda::from(obligatory), Sajda::Obligatory);
    }

    #[test]
    fn single_verse_payload_carries_chapter() {
        let json = r#"{
            "number": 262, "text": "God - there is no deity save Him",
            "edition": {"identifier": "en.asad"},
            "surah": {"number": 2, "name": "سُورَةُ البَقَرَةِ", "englishName": "Al-Baqara",
                      "englishNameTranslation": "The Cow", "numberOfAyahs": 286,
                      "revelationType": "Medinan"},
            "numberInSurah": 255, "juz": 3, "manzil": 1, "page": 42,
            "ruku": 35, "hizbQuarter": 17, "sajda": false
        }"#;
        let raw: RawAyah = serde_json::from_str(json).unwrap();
        assert_eq!(raw.edition.as_ref().unwrap().identifier, "en.asad");
        let verse = raw.into_verse();
        assert_eq!(verse.chapter_number(), Some(2));
        assert_eq!(verse.number_in_chapter, 255);
        assert_eq!(verse.label(), "Al-Baqara 2:255");
        assert_eq!(verse.web_url().as_deref(), Some("https://quran.com/2/255"));
    }

    #[test]
    fn chapter_from_raw_surah() {
        let json = r#"{"number": 1, "name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha",
                       "englishNameTranslation": "The Opening", "numberOfAyahs": 7,
                       "revelationType": "Meccan"}"#;
        let chapter: Chapter = serde_json::from_str::<RawSurah>(json).unwrap().into();
        assert_eq!(chapter.verse_count, 7);
        assert_eq!(chapter.revelation_type, RevelationType::Meccan);
        assert_eq!(chapter.summary().english_name, "Al-Faatiha");
    }
}
