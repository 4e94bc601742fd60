//! Static reference tables loaded once and treated as constants.

/// Bivalent-point (boiler switchover) configurations.
pub mod bivalent;
/// Building types with gas-to-heat factors and occupancy classes.
pub mod building;
/// Grid-connection capacity table.
pub mod grid;
/// Heat-pump model catalog.
pub mod heat_pump;

// Re-export the main types for convenience
pub use bivalent::BivalentPoint;
pub use building::{BuildingType, OccupancyClass};
pub use grid::GridConnection;
pub use heat_pump::{HeatPumpModel, HpClass};
