//! Synthetic heat-pump load profile from degree-hours, occupancy and COP.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};

use crate::calc::heat_demand::{BOILER_EFFICIENCY, GAS_ENERGY_CONTENT_KWH_PER_M3};
use crate::catalog::{BivalentPoint, HeatPumpModel};
use crate::config::OccupancyConfig;
use crate::profile::weather::PriceTempSource;
use crate::series;

/// Outdoor temperature below which space heating is needed (°C).
pub const HEATING_THRESHOLD_C: f64 = 15.0;

/// Outdoor temperature of the A7/W35 rating point (°C).
const COP_REFERENCE_TEMP_C: f64 = 7.0;
/// COP gain per °C above the rating point.
const COP_GAIN_PER_DEGREE: f64 = 0.01;
/// COP loss per °C below the rating point.
const COP_DROP_PER_DEGREE: f64 = 0.025;
/// Worst-case COP of the compressor.
const COP_FLOOR: f64 = 2.0;

/// Assumed temperature for hours missing from the weather source (°C).
const FALLBACK_TEMP_C: f64 = 10.0;

/// One hour of synthesized heat-pump operation.
#[derive(Debug, Clone, Copy)]
pub struct HpPoint {
    pub timestamp: NaiveDateTime,
    /// Electrical draw (kW).
    pub power_kw: f64,
    /// Heat delivered (kW).
    pub heat_kw: f64,
    /// Instantaneous COP; `None` while the unit is off.
    pub cop: Option<f64>,
}

/// A full year of synthesized heat-pump operation with summary statistics.
#[derive(Debug, Clone)]
pub struct HpProfile {
    pub points: Vec<HpPoint>,
    /// Peak electrical draw over active hours (kW).
    pub peak_power_kw: f64,
    /// Mean electrical draw over all hours, active or not (kW).
    pub avg_power_kw: f64,
    /// Smallest non-zero electrical draw (kW), 0 if the unit never ran.
    pub min_power_kw: f64,
}

impl HpProfile {
    /// Rescales the profile for a different installed-unit count.
    ///
    /// Power and heat scale linearly; the COP is unit-count independent, so
    /// no recomputation is needed.
    pub fn scaled(&self, factor: f64) -> HpProfile {
        HpProfile {
            points: self
                .points
                .iter()
                .map(|p| HpPoint {
                    timestamp: p.timestamp,
                    power_kw: p.power_kw * factor,
                    heat_kw: p.heat_kw * factor,
                    cop: p.cop,
                })
                .collect(),
            peak_power_kw: self.peak_power_kw * factor,
            avg_power_kw: self.avg_power_kw * factor,
            min_power_kw: self.min_power_kw * factor,
        }
    }

    /// Electrical energy per hour, keyed by timestamp. At hourly resolution
    /// the kW draw doubles as the kWh of the hour.
    pub fn energy_map(&self) -> BTreeMap<NaiveDateTime, f64> {
        self.points
            .iter()
            .map(|p| (p.timestamp, p.power_kw))
            .collect()
    }
}

/// Instantaneous COP at an outdoor temperature, from the seasonal rating.
///
/// Above the rating point the COP improves 1%/°C; below it degrades
/// 2.5%/°C, floored at the compressor minimum.
pub fn cop_at(outdoor_temp_c: f64, scop: f64) -> f64 {
    if outdoor_temp_c >= COP_REFERENCE_TEMP_C {
        scop * (1.0 + (outdoor_temp_c - COP_REFERENCE_TEMP_C) * COP_GAIN_PER_DEGREE)
    } else {
        let drop = (COP_REFERENCE_TEMP_C - outdoor_temp_c) * COP_DROP_PER_DEGREE;
        (scop * (1.0 - drop)).max(COP_FLOOR)
    }
}

/// Heating intensity multiplier for an hour of the day.
///
/// Full heat during occupied hours, night setback before 06:00, a pre-heat
/// boost in the two hours before occupancy, a tail-off in the two hours
/// after, and a reduced base level otherwise.
pub fn occupancy_factor(hour: u32, weekend: bool, occupancy: &OccupancyConfig) -> f64 {
    let (start, end) = if weekend {
        (occupancy.weekend_start as i64, occupancy.weekend_end as i64)
    } else {
        (occupancy.weekday_start as i64, occupancy.weekday_end as i64)
    };
    let hour = hour as i64;

    if hour >= start && hour <= end {
        1.0
    } else if hour < 6 {
        0.3
    } else if hour >= start - 2 && hour < start {
        1.2
    } else if hour > end && hour <= end + 2 {
        0.7
    } else {
        0.5
    }
}

/// Synthesizes one unit's hourly heat-pump profile for a calendar year.
///
/// The annual heat target (`gas × energy content × boiler efficiency ×
/// coverage`) is distributed over the year proportional to each hour's
/// degree-hours below the heating threshold, then shaped by the occupancy
/// factor. Hours warmer than both the bivalent switchover and the heating
/// threshold are zeroed: the unit is off, not throttled.
pub fn generate_hp_profile(
    gas_m3: f64,
    occupancy: &OccupancyConfig,
    model: &HeatPumpModel,
    bivalent: &BivalentPoint,
    temperatures: &dyn PriceTempSource,
    year: i32,
) -> HpProfile {
    let annual_heat_kwh = gas_m3 * GAS_ENERGY_CONTENT_KWH_PER_M3 * BOILER_EFFICIENCY;
    let hp_annual_heat_kwh = annual_heat_kwh * bivalent.coverage_fraction();

    // Pass 1: degree-hours per hour and the annual total.
    let mut hours = Vec::with_capacity(series::hours_in_year(year));
    let mut total_degree_hours = 0.0;
    for ts in series::year_hours(year) {
        let temp_c = temperatures.temperature_c(ts).unwrap_or(FALLBACK_TEMP_C);
        let degree_hours = (HEATING_THRESHOLD_C - temp_c).max(0.0);
        total_degree_hours += degree_hours;
        hours.push((ts, degree_hours, temp_c));
    }

    // Pass 2: allocate, shape by occupancy, convert to electrical draw.
    let mut points = Vec::with_capacity(hours.len());
    let mut peak_power_kw: f64 = 0.0;
    let mut min_power_kw = f64::INFINITY;
    let mut power_sum_kw = 0.0;

    for (ts, degree_hours, temp_c) in hours {
        let heat_kwh = if total_degree_hours > 0.0 {
            hp_annual_heat_kwh * degree_hours / total_degree_hours
        } else {
            0.0
        };

        let factor = occupancy_factor(ts.hour(), series::is_weekend(ts), occupancy);
        let shaped_heat_kwh = heat_kwh * factor;

        let cop = cop_at(temp_c, model.scop);
        let active = temp_c <= bivalent.switchover_temp_c || temp_c <= HEATING_THRESHOLD_C;

        let point = if active {
            HpPoint {
                timestamp: ts,
                power_kw: shaped_heat_kwh / cop,
                heat_kw: shaped_heat_kwh,
                cop: Some(cop),
            }
        } else {
            HpPoint {
                timestamp: ts,
                power_kw: 0.0,
                heat_kw: 0.0,
                cop: None,
            }
        };

        if point.power_kw > 0.0 {
            peak_power_kw = peak_power_kw.max(point.power_kw);
            min_power_kw = min_power_kw.min(point.power_kw);
        }
        power_sum_kw += point.power_kw;
        points.push(point);
    }

    let avg_power_kw = if points.is_empty() {
        0.0
    } else {
        power_sum_kw / points.len() as f64
    };

    HpProfile {
        peak_power_kw,
        avg_power_kw,
        min_power_kw: if min_power_kw.is_finite() { min_power_kw } else { 0.0 },
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bivalent::bivalent_point;
    use crate::catalog::heat_pump::model_by_id;
    use crate::profile::weather::{HourlyTable, PriceTempPoint};

    /// Weather fixture with a fixed temperature for every hour of 2023.
    fn flat_weather(temp_c: f64) -> HourlyTable {
        let mut table = HourlyTable::new();
        for ts in series::year_hours(2023) {
            table.insert(
                ts,
                PriceTempPoint {
                    spot_price_ct_per_kwh: 22.0,
                    gas_price_eur_per_m3: 1.40,
                    temperature_c: temp_c,
                },
            );
        }
        table
    }

    fn occupancy() -> OccupancyConfig {
        OccupancyConfig {
            weekday_start: 7,
            weekday_end: 22,
            weekend_start: 8,
            weekend_end: 23,
        }
    }

    #[test]
    fn cop_improves_above_reference() {
        assert!((cop_at(7.0, 4.8) - 4.8).abs() < 1e-9);
        assert!((cop_at(17.0, 4.8) - 4.8 * 1.10).abs() < 1e-9);
    }

    #[test]
    fn cop_degrades_below_reference_with_floor() {
        // 2.5% per degree: at 7-16 degrees below, 4.8 × 0.6 = 2.88
        assert!((cop_at(-9.0, 4.8) - 4.8 * 0.6).abs() < 1e-9);
        // deep frost hits the floor
        assert_eq!(cop_at(-40.0, 4.8), 2.0);
    }

    #[test]
    fn occupancy_factor_schedule() {
        let occ = occupancy();
        assert_eq!(occupancy_factor(12, false, &occ), 1.0); // occupied
        assert_eq!(occupancy_factor(3, false, &occ), 0.3); // night setback
        assert_eq!(occupancy_factor(6, false, &occ), 1.2); // pre-heat boost
        assert_eq!(occupancy_factor(23, false, &occ), 0.7); // tail-off
        // weekend schedule starts later: 6 falls in the night..pre-heat gap
        assert_eq!(occupancy_factor(6, true, &occ), 1.2);
        assert_eq!(occupancy_factor(8, true, &occ), 1.0);
    }

    #[test]
    fn night_setback_wins_over_early_preheat() {
        // Occupancy from 05:00: hours 3-4 would be pre-heat, but the night
        // setback takes precedence below 06:00.
        let occ = OccupancyConfig {
            weekday_start: 5,
            weekday_end: 20,
            weekend_start: 5,
            weekend_end: 20,
        };
        assert_eq!(occupancy_factor(3, false, &occ), 0.3);
        assert_eq!(occupancy_factor(4, false, &occ), 0.3);
    }

    #[test]
    fn warm_hours_are_zeroed_entirely() {
        let model = model_by_id("mt50i").expect("catalog entry");
        let profile = generate_hp_profile(
            50_000.0,
            &occupancy(),
            model,
            bivalent_point("0").expect("entry"),
            &flat_weather(20.0),
            2023,
        );
        // 20 °C everywhere: no degree-hours, unit always off.
        assert!(profile.points.iter().all(|p| p.power_kw == 0.0));
        assert!(profile.points.iter().all(|p| p.cop.is_none()));
        assert_eq!(profile.peak_power_kw, 0.0);
        assert_eq!(profile.min_power_kw, 0.0);
    }

    #[test]
    fn cold_year_heat_matches_coverage_target() {
        let model = model_by_id("mt50i").expect("catalog entry");
        let bivalent = bivalent_point("-7").expect("entry");
        let profile = generate_hp_profile(
            50_000.0,
            &occupancy(),
            model,
            bivalent,
            &flat_weather(0.0),
            2023,
        );
        // Flat temperature: every hour gets the same base allocation and the
        // occupancy factors shape it. The unshaped total would equal the
        // coverage target; the shaped sum stays within the factor range.
        let target = 50_000.0 * GAS_ENERGY_CONTENT_KWH_PER_M3 * BOILER_EFFICIENCY
            * bivalent.coverage_fraction();
        let delivered: f64 = profile.points.iter().map(|p| p.heat_kw).sum();
        assert!(delivered > target * 0.3 && delivered < target * 1.2);
        // COP at 0 °C: 4.5... for mt50i scop 5.2 → 5.2 × (1 − 0.175) = 4.29
        for p in profile.points.iter().filter(|p| p.cop.is_some()) {
            let cop = p.cop.expect("active hour");
            assert!((cop - 5.2 * (1.0 - 0.175)).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_temperature_defaults_keep_unit_running() {
        let model = model_by_id("mt40i").expect("catalog entry");
        // Empty weather source: every hour falls back to 10 °C, below the
        // heating threshold, so the unit stays active.
        let profile = generate_hp_profile(
            10_000.0,
            &occupancy(),
            model,
            bivalent_point("0").expect("entry"),
            &HourlyTable::new(),
            2023,
        );
        assert!(profile.points.iter().all(|p| p.cop.is_some()));
        assert!(profile.peak_power_kw > 0.0);
    }

    #[test]
    fn scaling_is_linear_and_keeps_cop() {
        let model = model_by_id("mt40i").expect("catalog entry");
        let profile = generate_hp_profile(
            10_000.0,
            &occupancy(),
            model,
            bivalent_point("0").expect("entry"),
            &flat_weather(2.0),
            2023,
        );
        let tripled = profile.scaled(3.0);
        assert_eq!(tripled.points.len(), profile.points.len());
        for (a, b) in profile.points.iter().zip(tripled.points.iter()) {
            assert!((b.power_kw - a.power_kw * 3.0).abs() < 1e-12);
            assert!((b.heat_kw - a.heat_kw * 3.0).abs() < 1e-12);
            assert_eq!(a.cop, b.cop);
        }
        assert!((tripled.peak_power_kw - profile.peak_power_kw * 3.0).abs() < 1e-12);
    }

    #[test]
    fn energy_map_mirrors_points() {
        let model = model_by_id("mt40i").expect("catalog entry");
        let profile = generate_hp_profile(
            5_000.0,
            &occupancy(),
            model,
            bivalent_point("0").expect("entry"),
            &flat_weather(2.0),
            2023,
        );
        let map = profile.energy_map();
        assert_eq!(map.len(), profile.points.len());
        let first = &profile.points[0];
        assert_eq!(map.get(&first.timestamp), Some(&first.power_kw));
    }
}
