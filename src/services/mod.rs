//! Service modules sitting between the terminal UI and the core.
//!
//! These hold the logic the UI drives (search classification, lookups with
//! cancellation, fetch-and-cache) so it can be tested without a terminal.

pub mod library;
pub mod lookup;
pub mod search;
