//! Combined-load and grid-capacity exceedance analysis.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::calc::heat_demand::{BOILER_EFFICIENCY, GAS_ENERGY_CONTENT_KWH_PER_M3};
use crate::catalog::GridConnection;
use crate::profile::building::EnergyPoint;
use crate::profile::heat_pump::HpPoint;
use crate::series::HourKey;

/// One hour of building and heat-pump load against the grid connection.
#[derive(Debug, Clone, Copy)]
pub struct CombinedLoadPoint {
    pub timestamp: NaiveDateTime,
    pub building_kw: f64,
    pub hp_kw: f64,
    pub combined_kw: f64,
    pub exceedance: bool,
    /// Load above the connection capacity (kW); 0 when within limits.
    pub exceedance_kw: f64,
}

/// A contiguous run of exceedance hours.
#[derive(Debug, Clone, Copy)]
pub struct ExceedanceEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_h: f64,
    pub peak_exceedance_kw: f64,
}

/// Aggregate statistics over the combined series.
#[derive(Debug, Clone, Copy)]
pub struct PeakStats {
    pub peak_kw: f64,
    pub avg_kw: f64,
    pub connection_capacity_kw: f64,
    pub exceedance_count: usize,
    pub exceedance_percent: f64,
    pub event_count: usize,
    pub min_event_duration_h: f64,
    pub max_event_duration_h: f64,
    pub median_event_duration_h: f64,
    pub total_exceedance_h: f64,
    /// Extra boiler gas if every exceedance hour fell back to the boiler (m³).
    pub hybrid_fallback_gas_m3: f64,
}

/// Merges the building series with the heat-pump profile.
///
/// Points are joined by month/day/hour, so both series must describe the
/// same calendar year (single-year analysis only). Hours missing from the
/// heat-pump profile contribute zero. `interval_minutes` converts the
/// building kWh readings to average kW; at the 60-minute default the
/// conversion is the identity.
pub fn merge_loads(
    building: &[EnergyPoint],
    hp: &[HpPoint],
    interval_minutes: f64,
) -> Vec<CombinedLoadPoint> {
    let hp_by_hour: BTreeMap<HourKey, f64> = hp
        .iter()
        .map(|p| (HourKey::from_datetime(p.timestamp), p.power_kw))
        .collect();

    let interval_hours = interval_minutes / 60.0;

    building
        .iter()
        .map(|point| {
            let key = HourKey::from_datetime(point.timestamp);
            let building_kw = point.offtake_kwh / interval_hours;
            let hp_kw = hp_by_hour.get(&key).copied().unwrap_or(0.0);
            CombinedLoadPoint {
                timestamp: point.timestamp,
                building_kw,
                hp_kw,
                combined_kw: building_kw + hp_kw,
                exceedance: false,
                exceedance_kw: 0.0,
            }
        })
        .collect()
}

/// Flags exceedances against the connection capacity and aggregates the
/// peak, average and duration statistics.
///
/// Exceedance is a strict comparison: a point exactly at the limit is within
/// contract.
pub fn analyze_peak_load(
    points: &mut [CombinedLoadPoint],
    connection: &GridConnection,
    interval_minutes: f64,
) -> PeakStats {
    let capacity_kw = connection.max_power_kw;

    let mut peak_kw: f64 = 0.0;
    let mut sum_kw = 0.0;
    let mut exceedance_count = 0;

    for point in points.iter_mut() {
        if point.combined_kw > capacity_kw {
            point.exceedance = true;
            point.exceedance_kw = point.combined_kw - capacity_kw;
            exceedance_count += 1;
        } else {
            point.exceedance = false;
            point.exceedance_kw = 0.0;
        }
        peak_kw = peak_kw.max(point.combined_kw);
        sum_kw += point.combined_kw;
    }

    let n = points.len();
    let avg_kw = if n > 0 { sum_kw / n as f64 } else { 0.0 };
    let exceedance_percent = if n > 0 {
        exceedance_count as f64 / n as f64 * 100.0
    } else {
        0.0
    };

    let events = find_exceedance_events(points, interval_minutes);
    let mut durations: Vec<f64> = events.iter().map(|e| e.duration_h).collect();
    durations.sort_by(f64::total_cmp);
    let total_exceedance_h: f64 = durations.iter().sum();

    // Boiler takes over during exceedance hours in a hybrid installation;
    // assumes half the average combined draw is heat-pump load to replace.
    let hybrid_fallback_gas_m3 = if exceedance_count > 0 {
        exceedance_count as f64 * avg_kw * 0.5 / (GAS_ENERGY_CONTENT_KWH_PER_M3 * BOILER_EFFICIENCY)
    } else {
        0.0
    };

    PeakStats {
        peak_kw,
        avg_kw,
        connection_capacity_kw: capacity_kw,
        exceedance_count,
        exceedance_percent,
        event_count: events.len(),
        min_event_duration_h: durations.first().copied().unwrap_or(0.0),
        max_event_duration_h: durations.last().copied().unwrap_or(0.0),
        median_event_duration_h: median(&durations),
        total_exceedance_h,
        hybrid_fallback_gas_m3,
    }
}

/// Scans chronologically and merges adjacent exceedance hours into events.
///
/// A trailing in-progress event at series end is closed and counted.
pub fn find_exceedance_events(
    points: &[CombinedLoadPoint],
    interval_minutes: f64,
) -> Vec<ExceedanceEvent> {
    let interval_hours = interval_minutes / 60.0;
    let mut events = Vec::new();
    let mut current: Option<ExceedanceEvent> = None;

    for point in points {
        if point.exceedance {
            match current.as_mut() {
                None => {
                    current = Some(ExceedanceEvent {
                        start: point.timestamp,
                        end: point.timestamp,
                        duration_h: interval_hours,
                        peak_exceedance_kw: point.exceedance_kw,
                    });
                }
                Some(event) => {
                    event.end = point.timestamp;
                    event.duration_h += interval_hours;
                    event.peak_exceedance_kw = event.peak_exceedance_kw.max(point.exceedance_kw);
                }
            }
        } else if let Some(event) = current.take() {
            events.push(event);
        }
    }

    if let Some(event) = current {
        events.push(event);
    }

    events
}

/// Median of a sorted slice; 0 when empty.
fn median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

impl fmt::Display for PeakStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Peak Load ---")?;
        writeln!(
            f,
            "Connection capacity:   {:.1} kW",
            self.connection_capacity_kw
        )?;
        writeln!(f, "Peak combined load:    {:.2} kW", self.peak_kw)?;
        writeln!(f, "Average combined load: {:.2} kW", self.avg_kw)?;
        writeln!(
            f,
            "Exceedance hours:      {} ({:.2}% of the year, {} events)",
            self.exceedance_count, self.exceedance_percent, self.event_count
        )?;
        writeln!(
            f,
            "Event duration:        min {:.1} h, median {:.1} h, max {:.1} h, total {:.1} h",
            self.min_event_duration_h,
            self.median_event_duration_h,
            self.max_event_duration_h,
            self.total_exceedance_h
        )?;
        write!(
            f,
            "Hybrid fallback gas:   {:.1} m3",
            self.hybrid_fallback_gas_m3
        )
    }
}
