//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Remote API constants.
pub mod api {
    /// Default base URL of the alquran.cloud REST API.
    pub const DEFAULT_BASE_URL: &str = "https://api.alquran.cloud/v1";

    /// Fixed Arabic source edition fetched alongside every translation.
    pub const ARABIC_EDITION: &str = "quran-uthmani";

    /// Translation edition used when none is configured.
    pub const DEFAULT_TRANSLATION_EDITION: &str = "en.asad";

    /// Default HTTP request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Base URL for the canonical web page of a verse.
    pub const WEB_BASE_URL: &str = "https://quran.com";
}

/// Canonical numbering constants.
pub mod quran {
    /// Number of chapters (surahs).
    pub const CHAPTER_COUNT: u32 = 114;
}

/// Local storage constants.
pub mod storage {
    /// Application directory name under the platform data directory.
    pub const APP_DIR: &str = "quranflow";

    /// Durable key holding the favorites list.
    pub const FAVORITES_KEY: &str = "favorites";

    /// Subdirectory holding cache entries.
    pub const CACHE_DIR: &str = "cache";

    /// Cache kind for the chapter list.
    pub const KIND_CHAPTERS: &str = "surahs";

    /// Cache kind for one chapter's verses.
    pub const KIND_VERSES: &str = "ayahs";

    /// Constant id used for the chapter list entry.
    pub const CHAPTER_LIST_ID: &str = "all";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

/// UI layout constants.
pub mod ui {
    /// Maximum width of the chapter-name column in list views.
    pub const NAME_COLUMN_WIDTH: usize = 24;
}
