//! Annual heat demand estimation from metered gas consumption.

use std::fmt;

use crate::catalog::BuildingType;
use crate::config::Scenario;

/// Energy content of natural gas (kWh per m³, Groningen quality average).
pub const GAS_ENERGY_CONTENT_KWH_PER_M3: f64 = 9.769;

/// Efficiency of the existing gas boiler.
pub const BOILER_EFFICIENCY: f64 = 0.90;

/// Equivalent full-load heating hours for the Dutch climate.
pub const FULL_LOAD_HOURS: f64 = 1800.0;

/// Current annual energy costs at the contracted tariffs.
#[derive(Debug, Clone, Copy)]
pub struct CurrentCosts {
    pub gas_eur: f64,
    /// Net electricity cost; can be negative for net producers.
    pub electricity_eur: f64,
    /// Gas plus electricity, with negative electricity floored to zero
    /// (net producers are not paid in the current-state baseline).
    pub total_eur: f64,
}

/// Annual heat demand derived from gas consumption and building factors.
///
/// A pure function of the scenario inputs; recomputed in full whenever any
/// input changes.
#[derive(Debug, Clone, Copy)]
pub struct HeatDemand {
    pub total_heat_kwh: f64,
    pub space_heating_kwh: f64,
    pub space_heating_percent: f64,
    pub hot_water_kwh: f64,
    pub hot_water_percent: f64,
    /// Peak thermal power via the full-load-hours method (kW).
    pub required_power_kw: f64,
    pub current_costs: CurrentCosts,
}

/// Derives the heat demand for a scenario.
///
/// `building` must be the scenario's resolved building type; the caller
/// validates the scenario first.
pub fn heat_demand(scenario: &Scenario, building: &BuildingType) -> HeatDemand {
    // Useful heat delivered by the boiler from the metered gas volume.
    let total_heat_kwh =
        scenario.energy.gas_m3 * GAS_ENERGY_CONTENT_KWH_PER_M3 * BOILER_EFFICIENCY;

    let hot_water_percent = building.hot_water_percent;
    let space_heating_percent = 100.0 - hot_water_percent;
    let hot_water_kwh = total_heat_kwh * hot_water_percent / 100.0;
    let space_heating_kwh = total_heat_kwh - hot_water_kwh;

    let required_power_kw = space_heating_kwh / FULL_LOAD_HOURS;

    let gas_eur = scenario.energy.gas_m3 * scenario.prices.gas_eur_per_m3;
    let electricity_eur = (scenario.energy.electricity_offtake_kwh
        - scenario.energy.electricity_feed_in_kwh)
        * scenario.prices.electricity_eur_per_kwh;
    let total_eur = gas_eur + electricity_eur.max(0.0);

    HeatDemand {
        total_heat_kwh,
        space_heating_kwh,
        space_heating_percent,
        hot_water_kwh,
        hot_water_percent,
        required_power_kw,
        current_costs: CurrentCosts {
            gas_eur,
            electricity_eur,
            total_eur,
        },
    }
}

/// Default domestic-hot-water demand (liters/day) for a building type and
/// unit count. Used to pre-fill the scenario; not a constraint.
pub fn default_dhw_liters(building: &BuildingType, units: u32) -> f64 {
    building.default_dhw_liters_per_unit * f64::from(units)
}

/// Annual heat demand (kWh) to supply `liters_per_day` of domestic hot water.
///
/// Q = m · c · ΔT with c = 4.186 kJ/kg·K and a 45 K rise (10 °C to 55 °C).
pub fn dhw_heat_demand_kwh(liters_per_day: f64) -> f64 {
    const SPECIFIC_HEAT_KJ_PER_KG_K: f64 = 4.186;
    const DELTA_T_K: f64 = 45.0;
    const KJ_PER_KWH: f64 = 3600.0;

    let daily_kwh = liters_per_day * SPECIFIC_HEAT_KJ_PER_KG_K * DELTA_T_K / KJ_PER_KWH;
    daily_kwh * 365.0
}

impl fmt::Display for HeatDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Heat Demand ---")?;
        writeln!(f, "Total heat demand:     {:.0} kWh", self.total_heat_kwh)?;
        writeln!(
            f,
            "Space heating:         {:.0} kWh ({:.0}%)",
            self.space_heating_kwh, self.space_heating_percent
        )?;
        writeln!(
            f,
            "Hot water:             {:.0} kWh ({:.0}%)",
            self.hot_water_kwh, self.hot_water_percent
        )?;
        writeln!(f, "Required peak power:   {:.1} kW", self.required_power_kw)?;
        write!(
            f,
            "Current annual cost:   {:.2} EUR (gas {:.2}, electricity {:.2})",
            self.current_costs.total_eur,
            self.current_costs.gas_eur,
            self.current_costs.electricity_eur
        )
    }
}
