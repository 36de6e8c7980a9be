//! Joining the translation and Arabic editions of the same verses.

use std::cmp::Ordering;

use super::types::{RawAyah, Verse};

/// Join translation verses with their Arabic counterparts by number-in-chapter.
///
/// Both sides are ordered by verse number and walked once. The output has one
/// entry per translation verse; Arabic text is attached when a counterpart
/// with the same number exists and left `None` otherwise.
pub fn join_editions(translation: Vec<RawAyah>, arabic: Vec<RawAyah>) -> Vec<Verse> {
    let mut translation = translation;
    let mut arabic = arabic;
    translation.sort_by_key(|a| a.number_in_surah);
    arabic.sort_by_key(|a| a.number_in_surah);

    let mut arabic = arabic.into_iter().peekable();
    let mut out = Vec::with_capacity(translation.len());

    for ayah in translation {
        let wanted = ayah.number_in_surah;
        let mut arabic_text = None;

        // Skip Arabic verses that have no translation counterpart
        while let Some(candidate) = arabic.peek() {
            match candidate.number_in_surah.cmp(&wanted) {
                Ordering::Less => {
                    arabic.next();
                }
                Ordering::Equal => {
                    arabic_text = arabic.next().map(|a| a.text);
                    break;
                }
                Ordering::Greater => break,
            }
        }

        let mut verse = ayah.into_verse();
        verse.arabic_text = arabic_text;
        out.push(verse);
    }

    out
}

/// Attach the Arabic counterpart of a single verse, if it is the same verse.
pub fn join_single(translation: RawAyah, arabic: Option<RawAyah>) -> Verse {
    let arabic_text = arabic
        .filter(|a| a.number_in_surah == translation.number_in_surah)
        .map(|a| a.text);
    let mut verse = translation.into_verse();
    verse.arabic_text = arabic_text;
    verse
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::alquran::types::RawSajda;

    fn ayah(n: u32, text: &str) -> RawAyah {
        RawAyah {
            number: n,
            text: text.to_string(),
            number_in_surah: n,
            juz: 1,
            manzil: 1,
            page: 1,
            ruku: 1,
            hizb_quarter: 1,
            sajda: RawSajda::default(),
            edition: None,
            surah: None,
        }
    }

    #[test]
    fn output_follows_translation_length() {
        let translation = vec![ayah(1, "t1"), ayah(2, "t2"), ayah(3, "t3")];
        let arabic = vec![ayah(1, "a1"), ayah(2, "a2"), ayah(3, "a3")];
        let verses = join_editions(translation, arabic);
        assert_eq!(verses.len(), 3);
        for (i, verse) in verses.iter().enumerate() {
            let n = i + 1;
            assert_eq!(verse.text, format!("t{n}"));
            assert_eq!(verse.arabic_text.as_deref(), Some(format!("a{n}").as_str()));
        }
    }

    #[test]
    fn missing_counterpart_leaves_arabic_absent() {
        let translation = vec![ayah(1, "t1"), ayah(2, "t2"), ayah(3, "t3")];
        let arabic = vec![ayah(3, "a3"), ayah(1, "a1")];
        let verses = join_editions(translation, arabic);
        assert_eq!(verses[0].arabic_text.as_deref(), Some("a1"));
        assert_eq!(verses[1].arabic_text, None);
        assert_eq!(verses[2].arabic_text.as_deref(), Some("a3"));
    }

    #[test]
    fn extra_arabic_verses_are_ignored() {
        let translation = vec![ayah(2, "t2")];
        let arabic = vec![ayah(1, "a1"), ayah(2, "a2"), ayah(5, "a5")];
        let verses = join_editions(translation, arabic);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].arabic_text.as_deref(), Some("a2"));
    }

    #[test]
    fn empty_arabic_side() {
        let verses = join_editions(vec![ayah(1, "t1")], Vec::new());
        assert_eq!(verses.len(), 1);
        assert!(verses[0].arabic_text.is_none());
    }

    #[test]
    fn single_join_checks_verse_number() {
        let verse = join_single(ayah(4, "t4"), Some(ayah(5, "a5")));
        assert!(verse.arabic_text.is_none());
        let verse = join_single(ayah(4, "t4"), Some(ayah(4, "a4")));
        assert_eq!(verse.arabic_text.as_deref(), Some("a4"));
    }
}
