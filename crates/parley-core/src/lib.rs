//! Business logic and trait definitions for Parley.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the turn orchestration pipeline.
//! It depends only on `parley-types` -- never on `parley-infra` or any
//! database/IO crate.

pub mod chat;
pub mod generation;
pub mod intent;
pub mod turn;
