//! Bilingual gallery site scraping and content normalization.
//!
//! Crawls an existing bilingual website, extracts structured entities
//! from inconsistent HTML via heuristic DOM search strategies, merges
//! per-locale content, parses embedded date ranges, and produces a
//! normalized record ready for import. Persistence, media upload, and
//! UI binding are downstream concerns; this crate ends at the record.

pub mod cli;
pub mod config;
pub mod models;
pub mod scrapers;
