//! Pure calculation stages: heat demand, heat-pump selection, savings.

pub mod heat_demand;
pub mod savings;
pub mod selector;

// Re-export the main types for convenience
pub use heat_demand::HeatDemand;
pub use savings::{Payback, Savings};
pub use selector::{ModelOption, Selection};
