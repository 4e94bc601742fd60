//! Fixed-tariff versus dynamic (spot) pricing comparison.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::profile::building::EnergyPoint;
use crate::profile::weather::PriceTempSource;

/// Annual totals for one tariff scenario.
#[derive(Debug, Clone, Copy)]
pub struct DynamicScenario {
    pub offtake_kwh: f64,
    pub feed_in_kwh: f64,
    /// Net annual cost on the fixed tariff (€).
    pub fixed_tariff_eur: f64,
    /// Net annual cost on hourly spot prices (€).
    pub dynamic_tariff_eur: f64,
    /// Fixed minus dynamic: positive when the dynamic contract wins (€).
    pub difference_eur: f64,
}

/// A with/without heat-pump pair under one revenue-offsetting regime.
#[derive(Debug, Clone, Copy)]
pub struct DynamicScenarioPair {
    pub without_hp: DynamicScenario,
    pub with_hp: DynamicScenario,
}

/// Observed spot and gas price statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceStats {
    pub min_spot_ct_per_kwh: f64,
    pub max_spot_ct_per_kwh: f64,
    pub avg_spot_ct_per_kwh: f64,
    pub min_gas_eur_per_m3: f64,
    pub max_gas_eur_per_m3: f64,
    pub avg_gas_eur_per_m3: f64,
}

/// Outcome of the fixed-versus-dynamic comparison.
#[derive(Debug, Clone, Copy)]
pub struct DynamicPricingAnalysis {
    /// Revenue offset against cost, as under net metering.
    pub with_offsetting: DynamicScenarioPair,
    /// Revenue fully subtracted, no offset cap.
    pub without_offsetting: DynamicScenarioPair,
    pub price_stats: PriceStats,
    /// Hours with a known spot price; only these enter the dynamic sums.
    pub hours_with_price: usize,
    pub total_hours: usize,
}

/// Inputs for the dynamic pricing comparison.
pub struct DynamicPricingInput<'a> {
    pub series: &'a [EnergyPoint],
    /// Heat-pump electricity per hour (kWh), keyed by timestamp.
    pub hp_energy_kwh: &'a BTreeMap<NaiveDateTime, f64>,
    pub prices: &'a dyn PriceTempSource,
    pub fixed_electricity_price_eur_per_kwh: f64,
    pub fixed_feed_in_tariff_eur_per_kwh: f64,
}

fn scenario(
    offtake_kwh: f64,
    feed_in_kwh: f64,
    fixed_cost: f64,
    fixed_revenue: f64,
    dynamic_cost: f64,
    dynamic_revenue: f64,
    with_offsetting: bool,
) -> DynamicScenario {
    let net = |cost: f64, revenue: f64| {
        if with_offsetting {
            cost - revenue.min(cost)
        } else {
            cost - revenue
        }
    };
    let fixed_tariff_eur = net(fixed_cost, fixed_revenue);
    let dynamic_tariff_eur = net(dynamic_cost, dynamic_revenue);
    DynamicScenario {
        offtake_kwh,
        feed_in_kwh,
        fixed_tariff_eur,
        dynamic_tariff_eur,
        difference_eur: fixed_tariff_eur - dynamic_tariff_eur,
    }
}

fn stats(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    (min, max, sum / values.len() as f64)
}

/// Compares fixed and spot tariffs over the year, with and without the heat
/// pump and with and without revenue offsetting.
///
/// Hours without a known spot price are excluded from the dynamic sums but
/// still count toward the fixed-tariff totals.
pub fn dynamic_pricing_analysis(input: &DynamicPricingInput<'_>) -> DynamicPricingAnalysis {
    let mut total_offtake_kwh = 0.0;
    let mut total_feed_in_kwh = 0.0;
    let mut dynamic_cost_without_hp = 0.0;
    let mut dynamic_revenue_without_hp = 0.0;
    let mut dynamic_cost_with_hp = 0.0;
    let mut dynamic_revenue_with_hp = 0.0;
    let mut hours_with_price = 0;
    let mut spot_prices = Vec::new();
    let mut gas_prices = Vec::new();

    for point in input.series {
        total_offtake_kwh += point.offtake_kwh;
        total_feed_in_kwh += point.feed_in_kwh;

        let Some(spot_ct) = input.prices.spot_price_ct(point.timestamp) else {
            continue;
        };
        hours_with_price += 1;
        spot_prices.push(spot_ct);
        if let Some(gas) = input.prices.gas_price_eur(point.timestamp) {
            gas_prices.push(gas);
        }

        let spot_eur = spot_ct / 100.0;
        let hp_kwh = input
            .hp_energy_kwh
            .get(&point.timestamp)
            .copied()
            .unwrap_or(0.0);

        dynamic_cost_without_hp += point.offtake_kwh * spot_eur;
        dynamic_revenue_without_hp += point.feed_in_kwh * spot_eur;

        // Heat-pump draw raises offtake and eats into the exported surplus.
        dynamic_cost_with_hp += (point.offtake_kwh + hp_kwh) * spot_eur;
        dynamic_revenue_with_hp += (point.feed_in_kwh - hp_kwh).max(0.0) * spot_eur;
    }

    let total_hp_kwh: f64 = input.hp_energy_kwh.values().sum();

    let fixed_cost_without_hp = total_offtake_kwh * input.fixed_electricity_price_eur_per_kwh;
    let fixed_revenue_without_hp = total_feed_in_kwh * input.fixed_feed_in_tariff_eur_per_kwh;
    let fixed_cost_with_hp =
        (total_offtake_kwh + total_hp_kwh) * input.fixed_electricity_price_eur_per_kwh;
    let fixed_revenue_with_hp =
        (total_feed_in_kwh - total_hp_kwh).max(0.0) * input.fixed_feed_in_tariff_eur_per_kwh;

    let hp_offtake_kwh = total_offtake_kwh + total_hp_kwh;
    let hp_feed_in_kwh = (total_feed_in_kwh - total_hp_kwh).max(0.0);

    let pair = |with_offsetting: bool| DynamicScenarioPair {
        without_hp: scenario(
            total_offtake_kwh,
            total_feed_in_kwh,
            fixed_cost_without_hp,
            fixed_revenue_without_hp,
            dynamic_cost_without_hp,
            dynamic_revenue_without_hp,
            with_offsetting,
        ),
        with_hp: scenario(
            hp_offtake_kwh,
            hp_feed_in_kwh,
            fixed_cost_with_hp,
            fixed_revenue_with_hp,
            dynamic_cost_with_hp,
            dynamic_revenue_with_hp,
            with_offsetting,
        ),
    };

    let (min_spot, max_spot, avg_spot) = stats(&spot_prices);
    let (min_gas, max_gas, avg_gas) = stats(&gas_prices);

    DynamicPricingAnalysis {
        with_offsetting: pair(true),
        without_offsetting: pair(false),
        price_stats: PriceStats {
            min_spot_ct_per_kwh: min_spot,
            max_spot_ct_per_kwh: max_spot,
            avg_spot_ct_per_kwh: avg_spot,
            min_gas_eur_per_m3: min_gas,
            max_gas_eur_per_m3: max_gas,
            avg_gas_eur_per_m3: avg_gas,
        },
        hours_with_price,
        total_hours: input.series.len(),
    }
}

impl fmt::Display for DynamicPricingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(f: &mut fmt::Formatter<'_>, label: &str, s: &DynamicScenario) -> fmt::Result {
            writeln!(
                f,
                "{label:<22} fixed {:>10.2} EUR, dynamic {:>10.2} EUR, difference {:>9.2} EUR",
                s.fixed_tariff_eur, s.dynamic_tariff_eur, s.difference_eur
            )
        }

        writeln!(f, "--- Dynamic Pricing ---")?;
        writeln!(f, "With offsetting:")?;
        line(f, "  without heat pump:", &self.with_offsetting.without_hp)?;
        line(f, "  with heat pump:", &self.with_offsetting.with_hp)?;
        writeln!(f, "Without offsetting:")?;
        line(f, "  without heat pump:", &self.without_offsetting.without_hp)?;
        line(f, "  with heat pump:", &self.without_offsetting.with_hp)?;
        writeln!(
            f,
            "Spot price:            {:.1} / {:.1} / {:.1} ct/kWh (min/avg/max)",
            self.price_stats.min_spot_ct_per_kwh,
            self.price_stats.avg_spot_ct_per_kwh,
            self.price_stats.max_spot_ct_per_kwh
        )?;
        writeln!(
            f,
            "Gas price:             {:.2} / {:.2} / {:.2} EUR/m3 (min/avg/max)",
            self.price_stats.min_gas_eur_per_m3,
            self.price_stats.avg_gas_eur_per_m3,
            self.price_stats.max_gas_eur_per_m3
        )?;
        write!(
            f,
            "Price coverage:        {} of {} hours",
            self.hours_with_price, self.total_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::weather::{HourlyTable, PriceTempPoint};
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    fn point(hour: u32, offtake_kwh: f64, feed_in_kwh: f64) -> EnergyPoint {
        EnergyPoint {
            timestamp: ts(hour),
            offtake_kwh,
            feed_in_kwh,
            gas_m3: 0.0,
        }
    }

    fn priced_hours(prices_ct: &[(u32, f64)]) -> HourlyTable {
        let mut table = HourlyTable::new();
        for &(hour, ct) in prices_ct {
            table.insert(
                ts(hour),
                PriceTempPoint {
                    spot_price_ct_per_kwh: ct,
                    gas_price_eur_per_m3: 1.50,
                    temperature_c: 8.0,
                },
            );
        }
        table
    }

    #[test]
    fn dynamic_sums_cover_only_priced_hours() {
        let series = vec![point(0, 10.0, 0.0), point(1, 10.0, 0.0), point(2, 10.0, 0.0)];
        let prices = priced_hours(&[(0, 20.0), (1, 40.0)]);
        let hp = BTreeMap::new();
        let analysis = dynamic_pricing_analysis(&DynamicPricingInput {
            series: &series,
            hp_energy_kwh: &hp,
            prices: &prices,
            fixed_electricity_price_eur_per_kwh: 0.30,
            fixed_feed_in_tariff_eur_per_kwh: 0.09,
        });
        assert_eq!(analysis.hours_with_price, 2);
        assert_eq!(analysis.total_hours, 3);
        // dynamic: 10×0.20 + 10×0.40; fixed covers all 30 kWh
        let s = analysis.without_offsetting.without_hp;
        assert!((s.dynamic_tariff_eur - 6.0).abs() < 1e-9);
        assert!((s.fixed_tariff_eur - 9.0).abs() < 1e-9);
    }

    #[test]
    fn hp_load_shifts_offtake_and_feed_in() {
        let series = vec![point(0, 10.0, 8.0)];
        let prices = priced_hours(&[(0, 50.0)]);
        let mut hp = BTreeMap::new();
        hp.insert(ts(0), 5.0);
        let analysis = dynamic_pricing_analysis(&DynamicPricingInput {
            series: &series,
            hp_energy_kwh: &hp,
            prices: &prices,
            fixed_electricity_price_eur_per_kwh: 0.30,
            fixed_feed_in_tariff_eur_per_kwh: 0.09,
        });
        let s = analysis.without_offsetting.with_hp;
        assert_eq!(s.offtake_kwh, 15.0);
        assert_eq!(s.feed_in_kwh, 3.0);
        // dynamic: (10+5)×0.50 − (8−5)×0.50 = 7.5 − 1.5
        assert!((s.dynamic_tariff_eur - 6.0).abs() < 1e-9);
    }

    #[test]
    fn offsetting_caps_revenue_at_cost() {
        // Large export, tiny consumption: revenue exceeds cost.
        let series = vec![point(0, 1.0, 50.0)];
        let prices = priced_hours(&[(0, 30.0)]);
        let hp = BTreeMap::new();
        let analysis = dynamic_pricing_analysis(&DynamicPricingInput {
            series: &series,
            hp_energy_kwh: &hp,
            prices: &prices,
            fixed_electricity_price_eur_per_kwh: 0.30,
            fixed_feed_in_tariff_eur_per_kwh: 0.09,
        });
        // with offsetting the net cost floors at zero
        assert_eq!(analysis.with_offsetting.without_hp.dynamic_tariff_eur, 0.0);
        // without offsetting the surplus turns the bill negative
        assert!(analysis.without_offsetting.without_hp.dynamic_tariff_eur < 0.0);
    }

    #[test]
    fn price_stats_track_min_avg_max() {
        let series = vec![point(0, 1.0, 0.0), point(1, 1.0, 0.0), point(2, 1.0, 0.0)];
        let prices = priced_hours(&[(0, 10.0), (1, 20.0), (2, 60.0)]);
        let hp = BTreeMap::new();
        let analysis = dynamic_pricing_analysis(&DynamicPricingInput {
            series: &series,
            hp_energy_kwh: &hp,
            prices: &prices,
            fixed_electricity_price_eur_per_kwh: 0.30,
            fixed_feed_in_tariff_eur_per_kwh: 0.09,
        });
        assert_eq!(analysis.price_stats.min_spot_ct_per_kwh, 10.0);
        assert_eq!(analysis.price_stats.max_spot_ct_per_kwh, 60.0);
        assert!((analysis.price_stats.avg_spot_ct_per_kwh - 30.0).abs() < 1e-9);
        assert_eq!(analysis.price_stats.avg_gas_eur_per_m3, 1.50);
    }

    #[test]
    fn empty_price_feed_yields_zero_stats() {
        let series = vec![point(0, 10.0, 0.0)];
        let prices = HourlyTable::new();
        let hp = BTreeMap::new();
        let analysis = dynamic_pricing_analysis(&DynamicPricingInput {
            series: &series,
            hp_energy_kwh: &hp,
            prices: &prices,
            fixed_electricity_price_eur_per_kwh: 0.30,
            fixed_feed_in_tariff_eur_per_kwh: 0.09,
        });
        assert_eq!(analysis.hours_with_price, 0);
        assert_eq!(analysis.price_stats.avg_spot_ct_per_kwh, 0.0);
        // fixed side still sees the full year
        assert!((analysis.with_offsetting.without_hp.fixed_tariff_eur - 3.0).abs() < 1e-9);
    }
}
