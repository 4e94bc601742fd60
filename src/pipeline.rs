//! End-to-end analysis pipeline: validated scenario in, full report out.
//!
//! Stages run in strict dependency order: heat demand feeds selection feeds
//! savings; once a model is chosen, the profile generators and the analysis
//! stages run over the merged series. Every stage is a pure function and the
//! whole pipeline recomputes from scratch on any input change.

use std::fmt;

use crate::analysis::dynamic::{
    DynamicPricingAnalysis, DynamicPricingInput, dynamic_pricing_analysis,
};
use crate::analysis::peak::{CombinedLoadPoint, PeakStats, analyze_peak_load, merge_loads};
use crate::analysis::saldering::{SalderingAnalysis, SalderingInput, saldering_analysis};
use crate::analysis::steering::{SteeringInput, SteeringResult, apply_smart_steering};
use crate::analysis::temperature::{
    TemperatureBand, TemperatureStats, exceedance_temperatures, temperature_histogram,
    temperature_stats,
};
use crate::calc::heat_demand::{HeatDemand, dhw_heat_demand_kwh, heat_demand};
use crate::calc::savings::{Savings, SavingsInput, savings};
use crate::calc::selector::{ModelOption, Selection, SelectionInput, select_heat_pump};
use crate::config::{ConfigError, Scenario};
use crate::profile::building::{EnergyPoint, generate_building_profile};
use crate::profile::heat_pump::{HpProfile, generate_hp_profile};
use crate::profile::weather::{PriceTempSource, synthetic_year};

/// Everything the pipeline derives for one scenario.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Whether net metering currently applies to this connection; selects
    /// which scenario row is the customer's actual situation.
    pub net_metering_active: bool,
    /// Daily hot-water demand, configured or derived from the building type.
    pub dhw_liters_per_day: f64,
    /// Annual heat needed for that hot-water volume (kWh).
    pub dhw_heat_demand_kwh: f64,
    pub heat_demand: HeatDemand,
    pub selection: Selection,
    /// The configuration the downstream stages analyzed (the top
    /// recommendation).
    pub chosen: ModelOption,
    pub savings: Savings,
    pub building_profile: Vec<EnergyPoint>,
    /// Heat-pump profile scaled to the chosen unit count.
    pub hp_profile: HpProfile,
    pub combined_load: Vec<CombinedLoadPoint>,
    pub peak: PeakStats,
    /// `None` when the year has no exceedance hours.
    pub exceedance_temperatures: Option<TemperatureStats>,
    pub temperature_histogram: [TemperatureBand; 8],
    pub saldering: SalderingAnalysis,
    pub dynamic_pricing: DynamicPricingAnalysis,
    pub steering: SteeringResult,
}

/// Result of a pipeline run on a valid scenario.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Complete(Box<AnalysisReport>),
    /// No catalog option meets the requirement; a normal outcome, the
    /// sizing stages still report their numbers.
    NoSuitableModel {
        heat_demand: HeatDemand,
        selection: Selection,
    },
}

/// Runs the full pipeline with the built-in synthetic weather/price year.
///
/// # Errors
///
/// Returns the validation errors when the scenario fails its preconditions;
/// nothing is computed in that case.
pub fn run_analysis(scenario: &Scenario) -> Result<AnalysisOutcome, Vec<ConfigError>> {
    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err(errors);
    }
    let weather = synthetic_year(scenario.analysis.year, scenario.analysis.seed);
    run_analysis_with_source(scenario, &weather)
}

/// Runs the full pipeline against a caller-provided weather/price source.
///
/// Tests inject deterministic fixtures here; production callers use
/// [`run_analysis`].
pub fn run_analysis_with_source(
    scenario: &Scenario,
    weather: &dyn PriceTempSource,
) -> Result<AnalysisOutcome, Vec<ConfigError>> {
    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err(errors);
    }

    let building = scenario.building_type().expect("validated above");
    let connection = scenario.grid_connection().expect("validated above");
    let bivalent = scenario.bivalent_point().expect("validated above");
    let year = scenario.analysis.year;

    // 1. Heat demand from the metered gas volume.
    let demand = heat_demand(scenario, building);

    // 2. Catalog matching.
    let selection = select_heat_pump(
        SelectionInput {
            required_power_kw: demand.required_power_kw,
            coastal_location: scenario.building.coastal_location,
            prefer_high_temp: scenario.analysis.prefer_high_temp,
        },
        bivalent,
    );
    let Some(chosen) = selection.recommendations.first().copied() else {
        return Ok(AnalysisOutcome::NoSuitableModel {
            heat_demand: demand,
            selection,
        });
    };

    // 3. Savings for the chosen configuration.
    let savings = savings(
        &SavingsInput {
            heat_demand: &demand,
            model: chosen.model,
            total_price_eur: chosen.total_price_eur,
            gas_price_eur_per_m3: scenario.prices.gas_eur_per_m3,
            electricity_price_eur_per_kwh: scenario.prices.electricity_eur_per_kwh,
            gas_m3: scenario.energy.gas_m3,
        },
        bivalent,
    );

    // 4. Building load profile from annual totals.
    let building_profile = generate_building_profile(
        building,
        scenario.energy.electricity_offtake_kwh,
        scenario.energy.electricity_feed_in_kwh,
        scenario.energy.gas_m3,
        year,
    );

    // 5. Heat-pump profile for one unit, rescaled to the cascade size.
    let hp_profile = generate_hp_profile(
        scenario.energy.gas_m3,
        &scenario.occupancy,
        chosen.model,
        bivalent,
        weather,
        year,
    )
    .scaled(f64::from(chosen.units_needed));

    // 6. Merge and check against the grid connection.
    let mut combined_load = merge_loads(
        &building_profile,
        &hp_profile.points,
        scenario.analysis.interval_minutes,
    );
    let peak = analyze_peak_load(
        &mut combined_load,
        connection,
        scenario.analysis.interval_minutes,
    );

    // 7. Ambient temperature at the flagged hours.
    let temperatures = exceedance_temperatures(&combined_load, weather);
    let exceedance_stats = temperature_stats(&temperatures);
    let histogram = temperature_histogram(&temperatures);

    // 8. Financial scenario analyzers over the merged data.
    let saldering = saldering_analysis(&SalderingInput {
        series: &building_profile,
        hp_extra_kwh: savings.hp_electricity_kwh,
        electricity_price_eur_per_kwh: scenario.prices.electricity_eur_per_kwh,
        feed_in_tariff_eur_per_kwh: scenario.prices.feed_in_eur_per_kwh,
        feed_in_penalty_eur_per_kwh: scenario.prices.feed_in_penalty_eur_per_kwh,
    });

    let hp_energy = hp_profile.energy_map();
    let dynamic_pricing = dynamic_pricing_analysis(&DynamicPricingInput {
        series: &building_profile,
        hp_energy_kwh: &hp_energy,
        prices: weather,
        fixed_electricity_price_eur_per_kwh: scenario.prices.electricity_eur_per_kwh,
        fixed_feed_in_tariff_eur_per_kwh: scenario.prices.feed_in_eur_per_kwh,
    });

    let steering = apply_smart_steering(&SteeringInput {
        hp_energy_kwh: &hp_energy,
        prices: weather,
        max_shift_ratio: scenario.analysis.max_shift_ratio,
        buffer_capacity_kwh: scenario.analysis.buffer_capacity_kwh,
    });

    Ok(AnalysisOutcome::Complete(Box::new(AnalysisReport {
        net_metering_active: scenario.prices.net_metering,
        dhw_liters_per_day: scenario.dhw_liters_per_day(),
        dhw_heat_demand_kwh: dhw_heat_demand_kwh(scenario.dhw_liters_per_day()),
        heat_demand: demand,
        selection,
        chosen,
        savings,
        building_profile,
        hp_profile,
        combined_load,
        peak,
        exceedance_temperatures: exceedance_stats,
        temperature_histogram: histogram,
        saldering,
        dynamic_pricing,
        steering,
    })))
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heat_demand)?;
        writeln!(
            f,
            "Hot water demand:      {:.0} l/day ({:.0} kWh/year)",
            self.dhw_liters_per_day, self.dhw_heat_demand_kwh
        )?;
        writeln!(f)?;
        writeln!(f, "--- Heat Pump Selection ---")?;
        writeln!(
            f,
            "Required capacity:     {:.1} kW at {:.0}% annual coverage",
            self.selection.required_capacity_kw, self.selection.coverage_percent
        )?;
        for option in &self.selection.recommendations {
            writeln!(
                f,
                "  {} x {:<10} {:>6.1} kW total, {:>9.0} EUR{}",
                option.units_needed,
                option.model.name,
                option.total_capacity_kw,
                option.total_price_eur,
                if option.model.id == self.chosen.model.id {
                    "  (analyzed)"
                } else {
                    ""
                }
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.savings)?;
        writeln!(f)?;
        writeln!(f, "{}", self.peak)?;
        writeln!(f)?;
        match &self.exceedance_temperatures {
            Some(stats) => writeln!(
                f,
                "Exceedances occur between {:.1} and {:.1} C (average {:.1} C, {} hours)",
                stats.min_c, stats.max_c, stats.avg_c, stats.count
            )?,
            None => writeln!(f, "No grid exceedances found.")?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.saldering)?;
        writeln!(
            f,
            "Applicable regime:     {}",
            if self.net_metering_active {
                "net metering"
            } else {
                "no net metering"
            }
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.dynamic_pricing)?;
        writeln!(f)?;
        write!(f, "{}", self.steering)
    }
}
