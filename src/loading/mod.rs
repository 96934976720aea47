//! This module is responsible for loading the static topology tables
//! (stations, segments, stop-code crosswalk) and building the immutable
//! network model.

mod builder;
mod config;
mod de;
pub mod tables;

pub use builder::{create_network, load_crosswalk, network_from_tables};
pub use config::NetworkConfig;
