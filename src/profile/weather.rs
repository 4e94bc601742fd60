//! Hourly weather and market-price inputs for the analysis stages.
//!
//! The analysis stages only see the [`PriceTempSource`] trait, so the
//! synthetic placeholder below can be swapped for a real data feed without
//! touching them. Tests inject fixed-value sources instead of the generator.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::series;

/// One hour of ambient and market conditions.
#[derive(Debug, Clone, Copy)]
pub struct PriceTempPoint {
    /// Electricity spot price (ct/kWh).
    pub spot_price_ct_per_kwh: f64,
    /// Gas day-ahead price (€/m³).
    pub gas_price_eur_per_m3: f64,
    /// Outdoor temperature (°C).
    pub temperature_c: f64,
}

/// Source of hourly temperature and price data for one analysis year.
///
/// Every accessor returns `None` for hours the source does not know about;
/// the analysis stages are sparse-tolerant and substitute their documented
/// defaults.
pub trait PriceTempSource {
    /// Outdoor temperature for the given hour (°C).
    fn temperature_c(&self, ts: NaiveDateTime) -> Option<f64>;

    /// Electricity spot price for the given hour (ct/kWh).
    fn spot_price_ct(&self, ts: NaiveDateTime) -> Option<f64>;

    /// Gas day-ahead price for the given hour (€/m³).
    fn gas_price_eur(&self, ts: NaiveDateTime) -> Option<f64>;
}

/// Dense hour-keyed table of price/temperature points.
#[derive(Debug, Clone, Default)]
pub struct HourlyTable {
    points: BTreeMap<NaiveDateTime, PriceTempPoint>,
}

impl HourlyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ts: NaiveDateTime, point: PriceTempPoint) {
        self.points.insert(ts, point);
    }

    pub fn get(&self, ts: NaiveDateTime) -> Option<&PriceTempPoint> {
        self.points.get(&ts)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &PriceTempPoint)> {
        self.points.iter()
    }
}

impl PriceTempSource for HourlyTable {
    fn temperature_c(&self, ts: NaiveDateTime) -> Option<f64> {
        self.get(ts).map(|p| p.temperature_c)
    }

    fn spot_price_ct(&self, ts: NaiveDateTime) -> Option<f64> {
        self.get(ts).map(|p| p.spot_price_ct_per_kwh)
    }

    fn gas_price_eur(&self, ts: NaiveDateTime) -> Option<f64> {
        self.get(ts).map(|p| p.gas_price_eur_per_m3)
    }
}

/// Synthesizes a placeholder year of weather and prices.
///
/// Seasonal and diurnal sinusoids plus uniform noise; a stand-in for a real
/// KNMI/EPEX feed. Deterministic for a given seed.
pub fn synthetic_year(year: i32, seed: u64) -> HourlyTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = HourlyTable::new();

    for ts in series::year_hours(year) {
        let month0 = (ts.month() - 1) as f64;
        let hour = ts.hour() as f64;

        // Seasonal mean peaks in summer, diurnal swing peaks mid-afternoon.
        let season_c = 10.0 + 8.0 * ((month0 - 3.0) * std::f64::consts::PI / 6.0).sin();
        let diurnal_c = 3.0 * ((hour - 14.0) * std::f64::consts::PI / 12.0).sin();
        let temperature_c = season_c + diurnal_c + (rng.random::<f64>() - 0.5) * 4.0;

        // Morning and evening demand peaks on top of a flat base price.
        let peak_ct = if (7.0..=9.0).contains(&hour) {
            15.0
        } else if (17.0..=20.0).contains(&hour) {
            20.0
        } else {
            0.0
        };
        let spot_price_ct_per_kwh = 22.0 + peak_ct + (rng.random::<f64>() - 0.5) * 10.0;
        let gas_price_eur_per_m3 = 1.40 + (rng.random::<f64>() - 0.5) * 0.2;

        table.insert(
            ts,
            PriceTempPoint {
                spot_price_ct_per_kwh,
                gas_price_eur_per_m3,
                temperature_c,
            },
        );
    }

    table
}
