//! KeyForge Snapshot Core Library
//!
//! This crate fetches card and house metadata from the KeyForge deck listing
//! API and turns it into a static data snapshot.
//!
//! # Features
//! - Retry with exponential backoff around flaky requests
//! - Page-by-page collection until each expansion has all its cards
//! - Deduplicated, sorted card and house lists
//! - Pretty-printed JSON snapshot files

pub mod client;
pub mod collector;
pub mod error;
pub mod output;
pub mod retry;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, KeyforgeClient};
pub use collector::{Collector, CollectorConfig};
pub use error::{KeyforgeError, Result};
pub use output::write_snapshot;
pub use retry::{retry, RetryPolicy};
pub use types::{default_expansions, Card, DeckPage, Expansion, House, Snapshot};
