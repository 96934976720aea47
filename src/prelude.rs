// Re-export key components
pub use crate::error::Error;
pub use crate::feed::{
    FeedNormalizer, FeedRules, FeedSnapshot, FeedSource, GtfsRealtimeFeed, StopTimeRow, VehicleRow,
};
pub use crate::loading::{NetworkConfig, create_network, load_crosswalk, network_from_tables};
pub use crate::model::{Segment, Station, TransitNetwork, VehicleReport, VehicleStatus};
pub use crate::resolve::{ResolvedPosition, resolve_positions};
pub use crate::session::TrackingSession;

// Core identifier types
pub use crate::DirectionId;
pub use crate::RouteId;
pub use crate::StationId;
