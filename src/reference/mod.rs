//! Chapter:verse reference parsing and validation.
//!
//! Input such as `"2:255"` or `"2 / 255"` is recognised as a reference;
//! anything else is "not a reference" and callers fall back to chapter search.
//! A recognised reference is then validated against the canonical chapter
//! range and, when known, the chapter's verse count.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::alquran::types::Chapter;
use crate::constants::quran::CHAPTER_COUNT;

/// Regex matching `<digits> [:/] <digits>` with optional whitespace.
#[allow(clippy::expect_used)]
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*[:/]\s*(\d+)\s*$").expect("valid regex: RE_REFERENCE")
});

/// A validated chapter:verse coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseRef {
    /// Chapter number, 1..=114.
    pub chapter: u32,
    /// Verse number within the chapter, >= 1.
    pub verse: u32,
}

impl VerseRef {
    /// Create a reference without validation (for values that are already known good).
    pub const fn new(chapter: u32, verse: u32) -> Self {
        Self { chapter, verse }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// Text that matched the reference pattern but has not been validated yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReference {
    /// Chapter digits; `u32::MAX` if they overflowed.
    pub chapter: u32,
    /// Verse digits; `u32::MAX` if they overflowed.
    pub verse: u32,
}

/// Why a reference was rejected before any lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Chapter number outside 1..=114.
    #[error("Surah number must be between 1 and {CHAPTER_COUNT}")]
    ChapterOutOfRange {
        /// The rejected chapter number.
        chapter: u32,
    },

    /// Verse number was zero.
    #[error("Ayah number must be positive")]
    VerseNotPositive,

    /// Verse number beyond the chapter's known verse count.
    #[error("{chapter_name} has only {verse_count} ayahs")]
    VerseExceedsChapter {
        /// English name of the chapter.
        chapter_name: String,
        /// Number of verses the chapter has.
        verse_count: u32,
    },
}

/// Match `text` against the reference pattern.
///
/// Returns `None` when the text is not shaped like a reference at all.
pub fn parse_reference(text: &str) -> Option<RawReference> {
    let caps = RE_REFERENCE.captures(text)?;
    let number = |i: usize| {
        caps.get(i)
            .map_or(u32::MAX, |m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
    };
    Some(RawReference {
        chapter: number(1),
        verse: number(2),
    })
}

impl RawReference {
    /// Validate against the chapter range and any already-fetched chapter metadata.
    pub fn validate(self, chapters: &[Chapter]) -> Result<VerseRef, ReferenceError> {
        if !(1..=CHAPTER_COUNT).contains(&self.chapter) {
            return Err(ReferenceError::ChapterOutOfRange { chapter: self.chapter });
        }
        if self.verse == 0 {
            return Err(ReferenceError::VerseNotPositive);
        }
        if let Some(chapter) = chapters.iter().find(|c| c.number == self.chapter) {
            if self.verse > chapter.verse_count {
                return Err(ReferenceError::VerseExceedsChapter {
                    chapter_name: chapter.english_name.clone(),
                    verse_count: chapter.verse_count,
                });
            }
        }
        Ok(VerseRef::new(self.chapter, self.verse))
    }
}

/// Parse and validate in one step.
///
/// `None` means "not a reference"; `Some(Err(_))` means "a reference, but invalid".
pub fn resolve_reference(
    text: &str,
    chapters: &[Chapter],
) -> Option<Result<VerseRef, ReferenceError>> {
    parse_reference(text).map(|raw| raw.validate(chapters))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::RevelationType;

    fn baqara() -> Chapter {
        Chapter {
            number: 2,
            name: String::new(),
            english_name: "Al-Baqara".to_string(),
            english_name_translation: "The Cow".to_string(),
            verse_count: 286,
            revelation_type: RevelationType::Medinan,
        }
    }

    #[test]
    fn test_parse_colon_and_slash() {
        assert_eq!(parse_reference("2:255"), Some(RawReference { chapter: 2, verse: 255 }));
        assert_eq!(parse_reference("2 / 255"), Some(RawReference { chapter: 2, verse: 255 }));
        assert_eq!(parse_reference("  18 :10 "), Some(RawReference { chapter: 18, verse: 10 }));
    }

    #[test]
    fn test_not_a_reference() {
        assert_eq!(parse_reference("baqarah"), None);
        assert_eq!(parse_reference("2"), None);
        assert_eq!(parse_reference("2:"), None);
        assert_eq!(parse_reference("2-255"), None);
        assert_eq!(parse_reference("2:255:1"), None);
        assert_eq!(parse_reference(""), None);
    }

    #[test]
    fn test_normalized_display() {
        let r = resolve_reference("2 / 255", &[]).unwrap().unwrap();
        assert_eq!(r.to_string(), "2:255");
    }

    #[test]
    fn test_chapter_out_of_range() {
        let err = resolve_reference("999:1", &[]).unwrap().unwrap_err();
        assert_eq!(err, ReferenceError::ChapterOutOfRange { chapter: 999 });
        assert!(resolve_reference("0:1", &[]).unwrap().is_err());
        assert!(resolve_reference("115:1", &[]).unwrap().is_err());
        assert!(resolve_reference("114:1", &[]).unwrap().is_ok());
    }

    #[test]
    fn test_overflowing_digits_are_out_of_range() {
        let err = resolve_reference("99999999999:1", &[]).unwrap().unwrap_err();
        assert!(matches!(err, ReferenceError::ChapterOutOfRange { .. }));
    }

    #[test]
    fn test_verse_must_be_positive() {
        let err = resolve_reference("2:0", &[]).unwrap().unwrap_err();
        assert_eq!(err, ReferenceError::VerseNotPositive);
        assert_eq!(err.to_string(), "Ayah number must be positive");
    }

    #[test]
    fn test_verse_exceeds_known_chapter() {
        let chapters = vec![baqara()];
        let err = resolve_reference("2:287", &chapters).unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Al-Baqara has only 286 ayahs");
        assert!(resolve_reference("2:286", &chapters).unwrap().is_ok());
    }

    #[test]
    fn test_unknown_chapter_length_passes() {
        // Without metadata the verse count cannot be checked yet
        assert!(resolve_reference("2:287", &[]).unwrap().is_ok());
    }

    #[test]
    fn test_ayat_al_kursi() {
        let r = resolve_reference("2:255", &[baqara()]).unwrap().unwrap();
        assert_eq!(r, VerseRef::new(2, 255));
    }
}
