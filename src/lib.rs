//! `QuranFlow` - terminal reader for Quranic text.
//!
//! Fetches surahs and ayahs from the alquran.cloud API with the Arabic text
//! merged alongside a translation, caches what it fetched for offline use,
//! and keeps a local list of favorite ayahs.

// Re-export public modules for use in integration tests and as a library
pub mod alquran;
pub mod app;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod reference;
pub mod services;
pub mod storage;
pub mod types;
pub mod ui;
