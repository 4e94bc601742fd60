//! Ambient temperature at grid exceedance hours.

use crate::analysis::peak::CombinedLoadPoint;
use crate::profile::weather::PriceTempSource;

/// Temperature statistics over exceedance hours.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureStats {
    pub min_c: f64,
    pub max_c: f64,
    pub avg_c: f64,
    pub count: usize,
}

/// A 5 °C histogram band.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureBand {
    /// Inclusive lower bound (°C).
    pub lower_c: f64,
    /// Exclusive upper bound (°C).
    pub upper_c: f64,
    pub count: usize,
}

/// Collects the ambient temperature of every flagged exceedance hour.
///
/// Hours without temperature data are skipped.
pub fn exceedance_temperatures(
    points: &[CombinedLoadPoint],
    temperatures: &dyn PriceTempSource,
) -> Vec<f64> {
    points
        .iter()
        .filter(|p| p.exceedance)
        .filter_map(|p| temperatures.temperature_c(p.timestamp))
        .collect()
}

/// Min/max/average over the collected temperatures.
///
/// Returns `None` when there were no exceedance hours; callers treat that as
/// a normal outcome, not an error.
pub fn temperature_stats(values: &[f64]) -> Option<TemperatureStats> {
    if values.is_empty() {
        return None;
    }
    let mut min_c = f64::INFINITY;
    let mut max_c = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min_c = min_c.min(v);
        max_c = max_c.max(v);
        sum += v;
    }
    Some(TemperatureStats {
        min_c,
        max_c,
        avg_c: sum / values.len() as f64,
        count: values.len(),
    })
}

/// Distributes the temperatures over fixed 5 °C bands from -15 °C to 20 °C,
/// with a wide final band for warm outliers.
pub fn temperature_histogram(values: &[f64]) -> [TemperatureBand; 8] {
    let bounds = [
        (-15.0, -10.0),
        (-10.0, -5.0),
        (-5.0, 0.0),
        (0.0, 5.0),
        (5.0, 10.0),
        (10.0, 15.0),
        (15.0, 20.0),
        (20.0, 35.0),
    ];
    bounds.map(|(lower_c, upper_c)| TemperatureBand {
        lower_c,
        upper_c,
        count: values.iter().filter(|&&t| t >= lower_c && t < upper_c).count(),
    })
}
