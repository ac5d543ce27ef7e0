//! Per-expansion card collection
//!
//! This module walks the deck listing page by page until every expansion has
//! its full set of cards, then merges the results into a [`Snapshot`].

use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::client::KeyforgeClient;
use crate::error::{KeyforgeError, Result};
use crate::types::{Expansion, Snapshot};

/// Pause after every page (in seconds)
const DEFAULT_PAGE_DELAY_SECS: u64 = 5;

/// Configuration for the collection loop
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Politeness delay after each page request (default: 5s)
    pub page_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(DEFAULT_PAGE_DELAY_SECS),
        }
    }
}

/// Collects cards and houses of each expansion from the deck listing
///
/// # Example
/// ```no_run
/// use keyforge_core::{default_expansions, Collector};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let collector = Collector::new()?;
///     let snapshot = collector.collect(default_expansions()).await?;
///     println!("Collected {} cards", snapshot.cards.len());
///     Ok(())
/// }
/// ```
pub struct Collector {
    client: KeyforgeClient,
    config: CollectorConfig,
}

impl Collector {
    /// Create a collector with default client and pacing.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = KeyforgeClient::new()?;
        Ok(Self::with_client(client, CollectorConfig::default()))
    }

    /// Create a collector around a pre-configured client.
    pub fn with_client(client: KeyforgeClient, config: CollectorConfig) -> Self {
        Self { client, config }
    }

    /// Request pages for `expansion` until it holds its full card count, then
    /// sort its cards and houses.
    ///
    /// # Errors
    /// - Any error from [`KeyforgeClient::fetch_page`]
    /// - `KeyforgeError::Payload` if a record lacks a field the scan reads
    /// - `KeyforgeError::PagesExhausted` if a page carries no cards at all
    pub async fn collect_expansion(&self, expansion: &mut Expansion) -> Result<()> {
        let mut page = 1;

        while !expansion.is_complete() {
            info!(
                expansion = %expansion.name,
                page,
                "Searching through deck list of expansion {}, page {}",
                expansion.name,
                page
            );
            let deck_page = self.client.fetch_page(expansion.id, page).await?;

            if deck_page.linked.cards.is_empty() {
                return Err(KeyforgeError::PagesExhausted {
                    expansion: expansion.name.clone(),
                    page,
                    missing: expansion.missing(),
                });
            }

            expansion.absorb_page(deck_page)?;
            info!(
                expansion = %expansion.name,
                missing = expansion.missing(),
                "Missing {}",
                expansion.missing()
            );

            page += 1;
            sleep(self.config.page_delay).await;
        }

        expansion.finalize()
    }

    /// Collect every expansion of `catalog` in order and merge the results.
    ///
    /// Any failure aborts the whole run; nothing collected so far is returned.
    pub async fn collect(&self, catalog: Vec<Expansion>) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();

        for mut expansion in catalog {
            self.collect_expansion(&mut expansion).await?;
            info!(
                expansion = %expansion.name,
                cards = expansion.cards.len(),
                houses = expansion.houses.len(),
                "expansion complete"
            );
            snapshot.add_expansion(expansion);
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_config_default() {
        let config = CollectorConfig::default();
        assert_eq!(config.page_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_collector_creation() {
        let collector = Collector::new();
        assert!(collector.is_ok());
    }

    #[tokio::test]
    async fn test_complete_expansion_needs_no_requests() {
        // The default client points at the live API; a zero target must not reach it.
        let collector = Collector::new().unwrap();
        let mut expansion = Expansion::new("Empty", 1, 0);
        collector.collect_expansion(&mut expansion).await.unwrap();
        assert!(expansion.cards.is_empty());
    }

    #[tokio::test]
    async fn test_collect_empty_catalog() {
        let collector = Collector::new().unwrap();
        let snapshot = collector.collect(Vec::new()).await.unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
