//! Analysis stages over the merged hourly series.

/// Fixed-vs-dynamic tariff comparison.
pub mod dynamic;
/// Combined-load and grid-capacity exceedance analysis.
pub mod peak;
/// Net-metering (saldering) scenario analysis.
pub mod saldering;
/// Price-driven load shifting heuristic.
pub mod steering;
/// Ambient temperature at exceedance hours.
pub mod temperature;

// Re-export the main types for convenience
pub use dynamic::DynamicPricingAnalysis;
pub use peak::{CombinedLoadPoint, ExceedanceEvent, PeakStats};
pub use saldering::SalderingAnalysis;
pub use steering::SteeringResult;
pub use temperature::TemperatureStats;
