//! Realtime feed ingestion
//!
//! A [`FeedSource`] hands the engine two flat record tables per polling
//! cycle; the [`FeedNormalizer`] turns them into resolvable
//! [`VehicleReport`](crate::model::VehicleReport)s. Wire transport and
//! protobuf decoding live behind the trait so callers with their own
//! decoder can plug it in; [`GtfsRealtimeFeed`] is the built-in HTTP
//! implementation.

mod gtfs_rt;
mod normalize;
mod records;
mod rules;

pub use gtfs_rt::GtfsRealtimeFeed;
pub use normalize::FeedNormalizer;
pub use records::{FeedSnapshot, StopTimeRow, VehicleRow};
pub use rules::{BranchRule, BranchSplit, FeedRules};

use crate::Error;

/// Source of one cycle's worth of raw feed records.
pub trait FeedSource {
    /// Fetches a fresh snapshot of both realtime tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeedUnavailable`] when the feed cannot be fetched
    /// or decoded; the caller should keep its previous output rather than
    /// render an empty cycle.
    fn fetch(&self) -> Result<FeedSnapshot, Error>;
}
