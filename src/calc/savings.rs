//! Financial and CO₂ savings from a selected heat-pump configuration.

use std::fmt;

use crate::calc::heat_demand::{BOILER_EFFICIENCY, GAS_ENERGY_CONTENT_KWH_PER_M3, HeatDemand};
use crate::catalog::{BivalentPoint, HeatPumpModel};

/// CO₂ emission factor of natural gas (kg per m³).
pub const GAS_KG_CO2_PER_M3: f64 = 1.88;

/// CO₂ emission factor of grid electricity (kg per kWh).
pub const ELECTRICITY_KG_CO2_PER_KWH: f64 = 0.40;

/// Payback period of the investment.
///
/// `Unbounded` marks zero or negative annual savings; it never leaks an
/// infinity into arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    Years(f64),
    Unbounded,
}

impl Payback {
    /// The payback in years, or `None` when unbounded.
    pub fn years(&self) -> Option<f64> {
        match self {
            Payback::Years(y) => Some(*y),
            Payback::Unbounded => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Years(y) => write!(f, "{y:.1} years"),
            Payback::Unbounded => write!(f, "not recoverable"),
        }
    }
}

/// Inputs for the savings calculation.
#[derive(Debug, Clone, Copy)]
pub struct SavingsInput<'a> {
    pub heat_demand: &'a HeatDemand,
    pub model: &'static HeatPumpModel,
    /// Investment for the selected configuration (€).
    pub total_price_eur: f64,
    pub gas_price_eur_per_m3: f64,
    pub electricity_price_eur_per_kwh: f64,
    /// Current annual gas consumption (m³).
    pub gas_m3: f64,
}

/// Annual effect of replacing part of the boiler load with the heat pump.
#[derive(Debug, Clone, Copy)]
pub struct Savings {
    pub annual_savings_eur: f64,
    /// Savings relative to the current gas bill; `None` when that bill is zero.
    pub savings_percent: Option<f64>,
    pub co2_reduction_kg: f64,
    pub payback: Payback,
    pub heat_by_hp_kwh: f64,
    pub heat_by_hp_percent: f64,
    pub heat_by_boiler_kwh: f64,
    pub heat_by_boiler_percent: f64,
    /// Remaining boiler gas in the new situation (m³).
    pub boiler_gas_m3: f64,
    /// Heat-pump electricity at the flat seasonal COP (kWh).
    pub hp_electricity_kwh: f64,
    pub new_gas_cost_eur: f64,
    pub new_electricity_cost_eur: f64,
}

/// Computes the annual savings for a selected model and bivalent point.
///
/// Space heating splits by the coverage fraction; hot water stays on the
/// boiler except for the all-electric bivalent point. Electricity is priced
/// at the flat SCOP here; temperature dependence only enters the synthetic
/// hourly profile.
pub fn savings(input: &SavingsInput<'_>, bivalent: &BivalentPoint) -> Savings {
    let coverage = bivalent.coverage_fraction();
    let demand = input.heat_demand;

    let space_by_hp_kwh = demand.space_heating_kwh * coverage;
    let space_by_boiler_kwh = demand.space_heating_kwh * (1.0 - coverage);

    let hot_water_by_boiler_kwh = if bivalent.all_electric {
        0.0
    } else {
        demand.hot_water_kwh
    };
    let hot_water_by_hp_kwh = demand.hot_water_kwh - hot_water_by_boiler_kwh;

    let heat_by_hp_kwh = space_by_hp_kwh + hot_water_by_hp_kwh;
    let heat_by_boiler_kwh = space_by_boiler_kwh + hot_water_by_boiler_kwh;

    let hp_electricity_kwh = heat_by_hp_kwh / input.model.scop;
    let boiler_gas_m3 =
        heat_by_boiler_kwh / (GAS_ENERGY_CONTENT_KWH_PER_M3 * BOILER_EFFICIENCY);

    let current_gas_cost_eur = input.gas_m3 * input.gas_price_eur_per_m3;
    let new_gas_cost_eur = boiler_gas_m3 * input.gas_price_eur_per_m3;
    let new_electricity_cost_eur = hp_electricity_kwh * input.electricity_price_eur_per_kwh;

    let annual_savings_eur = current_gas_cost_eur - new_gas_cost_eur - new_electricity_cost_eur;
    let savings_percent = if current_gas_cost_eur > 0.0 {
        Some(annual_savings_eur / current_gas_cost_eur * 100.0)
    } else {
        None
    };

    let payback = if annual_savings_eur > 0.0 {
        Payback::Years(input.total_price_eur / annual_savings_eur)
    } else {
        Payback::Unbounded
    };

    let current_co2_kg = input.gas_m3 * GAS_KG_CO2_PER_M3;
    let new_co2_kg =
        boiler_gas_m3 * GAS_KG_CO2_PER_M3 + hp_electricity_kwh * ELECTRICITY_KG_CO2_PER_KWH;
    let co2_reduction_kg = current_co2_kg - new_co2_kg;

    Savings {
        annual_savings_eur,
        savings_percent,
        co2_reduction_kg,
        payback,
        heat_by_hp_kwh,
        heat_by_hp_percent: heat_by_hp_kwh / demand.total_heat_kwh * 100.0,
        heat_by_boiler_kwh,
        heat_by_boiler_percent: heat_by_boiler_kwh / demand.total_heat_kwh * 100.0,
        boiler_gas_m3,
        hp_electricity_kwh,
        new_gas_cost_eur,
        new_electricity_cost_eur,
    }
}

impl fmt::Display for Savings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Savings ---")?;
        writeln!(
            f,
            "Heat by heat pump:     {:.0} kWh ({:.0}%)",
            self.heat_by_hp_kwh, self.heat_by_hp_percent
        )?;
        writeln!(
            f,
            "Heat by boiler:        {:.0} kWh ({:.0}%, {:.0} m3 gas)",
            self.heat_by_boiler_kwh, self.heat_by_boiler_percent, self.boiler_gas_m3
        )?;
        writeln!(
            f,
            "Heat pump electricity: {:.0} kWh",
            self.hp_electricity_kwh
        )?;
        match self.savings_percent {
            Some(pct) => writeln!(
                f,
                "Annual savings:        {:.2} EUR ({pct:.1}% of gas bill)",
                self.annual_savings_eur
            )?,
            None => writeln!(f, "Annual savings:        {:.2} EUR", self.annual_savings_eur)?,
        }
        writeln!(f, "CO2 reduction:         {:.0} kg/year", self.co2_reduction_kg)?;
        write!(f, "Payback period:        {}", self.payback)
    }
}
