//! Net-metering (saldering) scenario analysis.
//!
//! Compares four annual scenarios: with and without the heat pump, each under
//! the current net-metering regime and under its abolition.

use std::fmt;

use crate::profile::building::EnergyPoint;

/// One annual net-metering scenario.
#[derive(Debug, Clone, Copy)]
pub struct SalderingScenario {
    /// Exported energy after self-consumption (kWh).
    pub feed_in_kwh: f64,
    /// Energy offset kWh-for-kWh against offtake (kWh); zero without
    /// net metering.
    pub offset_kwh: f64,
    /// Payout for the non-offset surplus at the feed-in tariff (€).
    pub revenue_eur: f64,
    /// Feed-in penalty over the same surplus (€).
    pub penalty_eur: f64,
    pub net_eur: f64,
}

/// A with/without heat-pump pair under one metering regime.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioPair {
    pub without_hp: SalderingScenario,
    pub with_hp: SalderingScenario,
    /// Net effect of adding the heat pump (€).
    pub hp_impact_eur: f64,
}

/// Outcome of the four-scenario comparison.
#[derive(Debug, Clone, Copy)]
pub struct SalderingAnalysis {
    pub with_net_metering: ScenarioPair,
    pub without_net_metering: ScenarioPair,
    /// Heat-pump electricity served directly from surplus solar (kWh).
    pub self_consumption_kwh: f64,
    /// Value of not exporting that energy: electricity price minus tariff
    /// plus avoided penalty (€).
    pub self_consumption_benefit_eur: f64,
    pub total_feed_in_kwh: f64,
    pub total_offtake_kwh: f64,
}

/// Inputs for the saldering comparison.
#[derive(Debug, Clone, Copy)]
pub struct SalderingInput<'a> {
    pub series: &'a [EnergyPoint],
    /// Additional heat-pump electricity per year (kWh).
    pub hp_extra_kwh: f64,
    pub electricity_price_eur_per_kwh: f64,
    pub feed_in_tariff_eur_per_kwh: f64,
    pub feed_in_penalty_eur_per_kwh: f64,
}

fn scenario(
    feed_in_kwh: f64,
    offtake_kwh: f64,
    net_metering: bool,
    tariff: f64,
    penalty: f64,
) -> SalderingScenario {
    let (offset_kwh, paid_kwh) = if net_metering {
        (
            feed_in_kwh.min(offtake_kwh),
            (feed_in_kwh - offtake_kwh).max(0.0),
        )
    } else {
        (0.0, feed_in_kwh)
    };
    let revenue_eur = paid_kwh * tariff;
    let penalty_eur = paid_kwh * penalty;
    SalderingScenario {
        feed_in_kwh,
        offset_kwh,
        revenue_eur,
        penalty_eur,
        net_eur: revenue_eur - penalty_eur,
    }
}

/// Runs the four-scenario net-metering comparison.
///
/// The heat pump's extra electricity is first served from surplus solar
/// (`min(hp_extra, feed_in)`); only the remainder raises grid offtake.
pub fn saldering_analysis(input: &SalderingInput<'_>) -> SalderingAnalysis {
    let mut total_feed_in_kwh = 0.0;
    let mut total_offtake_kwh = 0.0;
    for point in input.series {
        total_feed_in_kwh += point.feed_in_kwh;
        total_offtake_kwh += point.offtake_kwh;
    }

    let tariff = input.feed_in_tariff_eur_per_kwh;
    let penalty = input.feed_in_penalty_eur_per_kwh;

    let self_consumption_kwh = input.hp_extra_kwh.min(total_feed_in_kwh);
    let hp_offtake_kwh = total_offtake_kwh + input.hp_extra_kwh - self_consumption_kwh;
    let hp_feed_in_kwh = total_feed_in_kwh - self_consumption_kwh;

    let with_net_metering = {
        let without_hp = scenario(total_feed_in_kwh, total_offtake_kwh, true, tariff, penalty);
        let with_hp = scenario(hp_feed_in_kwh, hp_offtake_kwh, true, tariff, penalty);
        ScenarioPair {
            without_hp,
            with_hp,
            hp_impact_eur: with_hp.net_eur - without_hp.net_eur,
        }
    };

    let without_net_metering = {
        let without_hp = scenario(total_feed_in_kwh, total_offtake_kwh, false, tariff, penalty);
        let with_hp = scenario(hp_feed_in_kwh, hp_offtake_kwh, false, tariff, penalty);
        ScenarioPair {
            without_hp,
            with_hp,
            hp_impact_eur: with_hp.net_eur - without_hp.net_eur,
        }
    };

    // Full round-trip value of self-consumed solar: the offtake price it
    // avoids, minus the lost tariff, plus the avoided penalty.
    let self_consumption_benefit_eur = self_consumption_kwh
        * (input.electricity_price_eur_per_kwh - tariff + penalty);

    SalderingAnalysis {
        with_net_metering,
        without_net_metering,
        self_consumption_kwh,
        self_consumption_benefit_eur,
        total_feed_in_kwh,
        total_offtake_kwh,
    }
}

impl fmt::Display for SalderingAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(
            f: &mut fmt::Formatter<'_>,
            label: &str,
            s: &SalderingScenario,
        ) -> fmt::Result {
            writeln!(
                f,
                "{label:<22} feed-in {:>9.0} kWh, offset {:>9.0} kWh, net {:>9.2} EUR",
                s.feed_in_kwh, s.offset_kwh, s.net_eur
            )
        }

        writeln!(f, "--- Net Metering ---")?;
        writeln!(f, "With net metering:")?;
        line(f, "  without heat pump:", &self.with_net_metering.without_hp)?;
        line(f, "  with heat pump:", &self.with_net_metering.with_hp)?;
        writeln!(f, "Without net metering:")?;
        line(f, "  without heat pump:", &self.without_net_metering.without_hp)?;
        line(f, "  with heat pump:", &self.without_net_metering.with_hp)?;
        write!(
            f,
            "Self-consumption:      {:.0} kWh worth {:.2} EUR",
            self.self_consumption_kwh, self.self_consumption_benefit_eur
        )
    }
}
