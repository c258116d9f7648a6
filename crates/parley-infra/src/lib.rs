//! Infrastructure layer for Parley.
//!
//! Contains implementations of the traits defined in `parley-core`: SQLite
//! storage, HTTP generation provider clients, and configuration loading.

pub mod config;
pub mod generation;
pub mod sqlite;
