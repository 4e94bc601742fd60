//! Price-driven load shifting for the heat-pump profile.
//!
//! A per-day greedy heuristic, not an optimizer: expensive hours hand part of
//! their load to a cheaper hour earlier in the same day (pre-heating), bounded
//! by the thermal buffer capacity. The buffer budget only accumulates within a
//! day and resets at the day boundary.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::profile::weather::PriceTempSource;

/// Assumed spot price for hours without price data (ct/kWh).
const DEFAULT_PRICE_CT_PER_KWH: f64 = 22.5;

/// Price bands relative to the daily average.
const CHEAP_BELOW: f64 = 0.8;
const EXPENSIVE_ABOVE: f64 = 1.2;

/// One hour of the steered profile.
#[derive(Debug, Clone, Copy)]
pub struct SteeredHour {
    pub timestamp: NaiveDateTime,
    pub original_kwh: f64,
    pub steered_kwh: f64,
    pub price_ct_per_kwh: f64,
    pub original_cost_eur: f64,
    pub steered_cost_eur: f64,
}

/// Outcome of the steering heuristic.
#[derive(Debug, Clone)]
pub struct SteeringResult {
    pub cost_without_eur: f64,
    pub cost_with_eur: f64,
    pub savings_eur: f64,
    /// Energy moved to cheaper hours, counted once per shifted kWh.
    pub shifted_kwh: f64,
    pub hours: Vec<SteeredHour>,
    /// The steered profile, keyed like the input.
    pub steered_profile: BTreeMap<NaiveDateTime, f64>,
}

/// Inputs for the steering heuristic.
pub struct SteeringInput<'a> {
    /// Heat-pump electricity per hour (kWh), keyed by timestamp.
    pub hp_energy_kwh: &'a BTreeMap<NaiveDateTime, f64>,
    pub prices: &'a dyn PriceTempSource,
    /// Maximum share of an expensive hour's load that may move.
    pub max_shift_ratio: f64,
    /// Thermal buffer capacity per day (kWh).
    pub buffer_capacity_kwh: f64,
}

/// Applies the per-day shifting heuristic to the heat-pump profile.
pub fn apply_smart_steering(input: &SteeringInput<'_>) -> SteeringResult {
    let mut hours = Vec::with_capacity(input.hp_energy_kwh.len());
    let mut steered_profile = BTreeMap::new();
    let mut cost_without_eur = 0.0;
    let mut cost_with_eur = 0.0;
    let mut shifted_abs_kwh = 0.0;

    // BTreeMap iteration is chronological, so days come out in order and the
    // hours within each day are already sorted.
    let mut days: BTreeMap<chrono::NaiveDate, Vec<(NaiveDateTime, f64)>> = BTreeMap::new();
    for (&ts, &kwh) in input.hp_energy_kwh {
        days.entry(ts.date()).or_default().push((ts, kwh));
    }

    for day_hours in days.values() {
        for hour in steer_day(day_hours, input) {
            cost_without_eur += hour.original_cost_eur;
            cost_with_eur += hour.steered_cost_eur;
            shifted_abs_kwh += (hour.original_kwh - hour.steered_kwh).abs();
            steered_profile.insert(hour.timestamp, hour.steered_kwh);
            hours.push(hour);
        }
    }

    SteeringResult {
        cost_without_eur,
        cost_with_eur,
        savings_eur: cost_without_eur - cost_with_eur,
        // every move shows up twice, as a removal and an addition
        shifted_kwh: shifted_abs_kwh / 2.0,
        hours,
        steered_profile,
    }
}

/// Shifts one day's consumption from its expensive hours into cheaper,
/// earlier hours.
fn steer_day(day_hours: &[(NaiveDateTime, f64)], input: &SteeringInput<'_>) -> Vec<SteeredHour> {
    let priced: Vec<(NaiveDateTime, f64, f64)> = day_hours
        .iter()
        .map(|&(ts, kwh)| {
            let price = input
                .prices
                .spot_price_ct(ts)
                .unwrap_or(DEFAULT_PRICE_CT_PER_KWH);
            (ts, kwh, price)
        })
        .collect();

    let avg_price: f64 =
        priced.iter().map(|&(_, _, p)| p).sum::<f64>() / priced.len().max(1) as f64;

    let mut cheap: Vec<(NaiveDateTime, f64)> = priced
        .iter()
        .filter(|&&(_, _, p)| p < avg_price * CHEAP_BELOW)
        .map(|&(ts, _, p)| (ts, p))
        .collect();
    cheap.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut expensive: Vec<(NaiveDateTime, f64, f64)> = priced
        .iter()
        .filter(|&&(_, _, p)| p > avg_price * EXPENSIVE_ABOVE)
        .copied()
        .collect();
    expensive.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut steered: BTreeMap<NaiveDateTime, f64> =
        priced.iter().map(|&(ts, kwh, _)| (ts, kwh)).collect();

    // One-shot daily budget: the buffer never drains within the day.
    let mut buffer_kwh = 0.0;

    for &(expensive_ts, original_kwh, _) in &expensive {
        let max_shift = original_kwh * input.max_shift_ratio;
        let to_shift = max_shift.min(input.buffer_capacity_kwh - buffer_kwh);
        if to_shift <= 0.0 {
            continue;
        }
        // Cheapest hour first; only earlier hours qualify (pre-heating can
        // move load backward in time, never forward).
        if let Some(&(cheap_ts, _)) = cheap.iter().find(|&&(ts, _)| ts < expensive_ts) {
            *steered.entry(cheap_ts).or_insert(0.0) += to_shift;
            *steered.entry(expensive_ts).or_insert(0.0) -= to_shift;
            buffer_kwh += to_shift;
        }
    }

    priced
        .iter()
        .map(|&(ts, original_kwh, price)| {
            let steered_kwh = steered.get(&ts).copied().unwrap_or(0.0);
            SteeredHour {
                timestamp: ts,
                original_kwh,
                steered_kwh,
                price_ct_per_kwh: price,
                original_cost_eur: original_kwh * price / 100.0,
                steered_cost_eur: steered_kwh * price / 100.0,
            }
        })
        .collect()
}

impl fmt::Display for SteeringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Smart Steering ---")?;
        writeln!(f, "Cost without steering: {:.2} EUR", self.cost_without_eur)?;
        writeln!(f, "Cost with steering:    {:.2} EUR", self.cost_with_eur)?;
        writeln!(f, "Savings:               {:.2} EUR", self.savings_eur)?;
        write!(f, "Shifted energy:        {:.1} kWh", self.shifted_kwh)
    }
}
