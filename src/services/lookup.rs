//! Turning live search input into a filter or a verse lookup.
//!
//! Input is re-classified on every change. References are validated before
//! anything touches the network. Lookups carry a `LookupTicket`; starting a
//! newer lookup makes older tickets stale so their results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::alquran::types::{Chapter, Verse};
use crate::error::Error;
use crate::reference::{resolve_reference, ReferenceError, VerseRef};

use super::search::filter_chapters;

/// What the search box currently asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Blank input: show every chapter.
    ShowAll,
    /// Chapter numbers matching a name/number filter (may be empty).
    Filter(Vec<u32>),
    /// A valid reference to look up.
    Lookup(VerseRef),
    /// A reference that failed validation; no fetch is made.
    Reject(ReferenceError),
}

/// Classify search input against the chapters fetched so far.
pub fn plan_search(input: &str, chapters: &[Chapter]) -> SearchAction {
    match resolve_reference(input, chapters) {
        Some(Ok(reference)) => SearchAction::Lookup(reference),
        Some(Err(e)) => SearchAction::Reject(e),
        None => match filter_chapters(chapters, input) {
            None => SearchAction::ShowAll,
            Some(hits) => SearchAction::Filter(hits.into_iter().map(|c| c.number).collect()),
        },
    }
}

/// Result of a verse lookup as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Verse),
    /// The API has no such verse or edition.
    NotFound,
    /// The request could not be completed.
    Failed(String),
    Invalid(ReferenceError),
}

impl LookupOutcome {
    /// Map a client result, keeping "not found" apart from transport failures.
    pub fn from_result(result: Result<Verse, Error>) -> Self {
        match result {
            Ok(verse) => Self::Found(verse),
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// User-facing message for non-success outcomes.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Found(_) => None,
            Self::NotFound => Some("Ayah not found".to_string()),
            Self::Failed(reason) => Some(format!("Unable to load ayah: {reason}")),
            Self::Invalid(e) => Some(e.to_string()),
        }
    }
}

/// Issues tickets; only the most recent ticket is current.
#[derive(Debug, Clone, Default)]
pub struct LookupSession {
    generation: Arc<AtomicU64>,
}

impl LookupSession {
    /// Create a session with no lookups started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new lookup, invalidating all earlier tickets.
    pub fn begin(&self) -> LookupTicket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LookupTicket {
            id,
            generation: Arc::clone(&self.generation),
        }
    }

    /// Invalidate every outstanding ticket without starting a lookup.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether `id` belongs to the current lookup.
    pub fn is_current(&self, id: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == id
    }
}

/// Handle carried by one in-flight lookup
#[derive(Debug, Clone)]
pub struct LookupTicket {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl LookupTicket {
    /// Identifier echoed back with the result.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// False once a newer lookup started or the session was cancelled.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }
}
