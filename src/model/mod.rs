//! Data model for the monitored transit network
//!
//! Contains the immutable topology store and the per-cycle report types
//! that flow through it.

pub mod network;
pub mod types;

pub use network::TransitNetwork;
pub use types::{Segment, SegmentKey, Station, VehicleReport, VehicleStatus};
