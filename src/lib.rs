//! # Dante Telegram Bot
//!
//! A Telegram bot that tells whether an English word has Latin roots, using a
//! hand-curated dictionary stored in PostgreSQL, and translates phrases
//! through the DeepL API. Also hosts the dictionary maintenance tools.

pub mod bot;
pub mod config;
pub mod csv_export;
pub mod db;
pub mod dictionary;
pub mod localization;
pub mod query;
pub mod store;
pub mod translate;
pub mod upsert;
