//! Synthetic hourly profile generation from annual totals.

/// Building load synthesis from occupancy weight curves.
pub mod building;
/// Heat-pump load synthesis from degree-hours and COP.
pub mod heat_pump;
/// Hourly weather and spot-price inputs.
pub mod weather;

// Re-export the main types for convenience
pub use building::EnergyPoint;
pub use heat_pump::{HpPoint, HpProfile};
pub use weather::{HourlyTable, PriceTempPoint, PriceTempSource};
