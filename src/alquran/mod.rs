//! alquran.cloud API integration.
//!
//! Provides the remote client for chapter lists, chapter verses and single
//! verses, plus the payload types and the edition merge.

/// API client for alquran.cloud requests
pub mod api;
/// Joining translation and Arabic editions
pub mod merge;
/// HTTP transport seam
pub mod transport;
/// Data types representing alquran.cloud resources
pub mod types;

// Re-export key components
pub use api::QuranClient;
pub use transport::{HttpTransport, Transport};
pub use types::{Chapter, ChapterRef, Verse};
