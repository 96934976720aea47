//! One tracking session owns the topology store, the normalizer and the
//! feed source, and runs one full resolution pass per poll.

use std::sync::Arc;

use log::debug;

use crate::error::Error;
use crate::feed::{FeedNormalizer, FeedRules, FeedSource};
use crate::loading::{self, NetworkConfig};
use crate::model::TransitNetwork;
use crate::resolve::{self, ResolvedPosition};

pub struct TrackingSession<S: FeedSource> {
    network: Arc<TransitNetwork>,
    normalizer: FeedNormalizer,
    source: S,
}

impl<S: FeedSource> TrackingSession<S> {
    /// Builds the topology store and normalizer from the static tables.
    ///
    /// # Errors
    ///
    /// Fails fast if a table cannot be read or the topology violates
    /// referential integrity; a session never starts over a broken network.
    pub fn open(config: &NetworkConfig, rules: FeedRules, source: S) -> Result<Self, Error> {
        let network = Arc::new(loading::create_network(config)?);
        let crosswalk = loading::load_crosswalk(&config.crosswalk_path)?;
        Ok(Self::with_network(
            network,
            FeedNormalizer::new(rules, crosswalk),
            source,
        ))
    }

    /// Session over an already-built topology store. The store can be
    /// shared with other sessions; it is never mutated.
    pub fn with_network(
        network: Arc<TransitNetwork>,
        normalizer: FeedNormalizer,
        source: S,
    ) -> Self {
        Self {
            network,
            normalizer,
            source,
        }
    }

    pub fn network(&self) -> &Arc<TransitNetwork> {
        &self.network
    }

    /// Runs one resolution pass: fetch, normalize, resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeedUnavailable`] when the live feed cannot be
    /// fetched this cycle; the caller should keep rendering the previous
    /// batch instead of blanking the map.
    pub fn poll(&self) -> Result<Vec<ResolvedPosition>, Error> {
        let snapshot = self.source.fetch()?;
        let reports = self.normalizer.normalize(&snapshot);
        let positions = resolve::resolve_positions(&self.network, &reports);
        debug!(
            "Resolved {} of {} normalized vehicles",
            positions.len(),
            reports.len()
        );
        Ok(positions)
    }
}
