//! Core type definitions for compile-time safety.
//!
//! This module provides newtype wrappers around string identifiers to prevent
//! accidental mixing of edition identifiers with other strings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::api::{ARABIC_EDITION, DEFAULT_TRANSLATION_EDITION};

/// A text edition identifier (e.g. `en.asad`, `quran-uthmani`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edition(pub String);

impl Edition {
    /// Create a new `Edition` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The fixed Arabic source edition.
    pub fn arabic() -> Self {
        Self(ARABIC_EDITION.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the fixed Arabic source edition.
    pub fn is_arabic(&self) -> bool {
        self.0 == ARABIC_EDITION
    }
}

impl Default for Edition {
    fn default() -> Self {
        Self(DEFAULT_TRANSLATION_EDITION.to_string())
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Edition {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Edition {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Edition {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a chapter was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RevelationType {
    /// Revealed in Mecca.
    #[default]
    Meccan,
    /// Revealed in Medina.
    Medinan,
}

impl RevelationType {
    /// Returns the human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Meccan => "Meccan",
            Self::Medinan => "Medinan",
        }
    }
}

/// Prostration marker on a verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sajda {
    /// No prostration.
    #[default]
    None,
    /// Prostration is recommended.
    Recommended,
    /// Prostration is obligatory.
    Obligatory,
}

impl Sajda {
    /// Whether the verse carries any prostration marker.
    #[must_use]
    pub const fn is_prostration(self) -> bool {
        !matches!(self, Self::None)
    }
}
