//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{
    BivalentPoint, BuildingType, GridConnection, bivalent::bivalent_point,
    building::building_type, grid::connection_by_id,
};

/// Top-level analysis scenario parsed from TOML.
///
/// All fields have defaults matching the apartment-block baseline. Load from
/// TOML with [`Scenario::from_toml_file`] or use [`Scenario::apartment_block`]
/// for the built-in default. A scenario is immutable once the pipeline runs;
/// re-editing inputs means building a fresh value and recomputing everything.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Building identity and site properties.
    #[serde(default)]
    pub building: BuildingConfig,
    /// Annual metered energy totals.
    #[serde(default)]
    pub energy: EnergyConfig,
    /// Occupancy hours driving the heat-pump load shape.
    #[serde(default)]
    pub occupancy: OccupancyConfig,
    /// Contracted unit prices.
    #[serde(default)]
    pub prices: PriceConfig,
    /// Analysis parameters (bivalent point, year, seed, steering limits).
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Building identity and site properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    /// Building type id, e.g. `"apartment_building"`.
    pub building_type: String,
    /// Number of occupancy units (apartments, beds, workplaces).
    pub units: u32,
    /// Coastal site: restricts the catalog to EC-coated models.
    pub coastal_location: bool,
    /// Grid connection code, e.g. `"3x80A"`.
    pub grid_connection: String,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            building_type: "apartment_building".to_string(),
            units: 40,
            coastal_location: false,
            grid_connection: "3x80A".to_string(),
        }
    }
}

/// Annual metered energy totals.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnergyConfig {
    /// Annual electricity offtake (kWh).
    pub electricity_offtake_kwh: f64,
    /// Annual solar feed-in (kWh).
    pub electricity_feed_in_kwh: f64,
    /// Annual gas consumption (m³).
    pub gas_m3: f64,
    /// Domestic hot water demand (liters/day). When absent, the
    /// building-type default times the unit count is used.
    pub dhw_liters_per_day: Option<f64>,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            electricity_offtake_kwh: 600_000.0,
            electricity_feed_in_kwh: 180_000.0,
            gas_m3: 50_000.0,
            dhw_liters_per_day: None,
        }
    }
}

/// Occupancy hours (0-23, inclusive bounds) for weekdays and weekends.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OccupancyConfig {
    pub weekday_start: u32,
    pub weekday_end: u32,
    pub weekend_start: u32,
    pub weekend_end: u32,
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self {
            weekday_start: 7,
            weekday_end: 22,
            weekend_start: 8,
            weekend_end: 23,
        }
    }
}

/// Contracted unit prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceConfig {
    /// Gas price (€/m³).
    pub gas_eur_per_m3: f64,
    /// Electricity offtake price (€/kWh).
    pub electricity_eur_per_kwh: f64,
    /// Feed-in tariff (€/kWh).
    pub feed_in_eur_per_kwh: f64,
    /// Feed-in penalty charged per exported kWh (€/kWh).
    pub feed_in_penalty_eur_per_kwh: f64,
    /// Whether net metering (saldering) applies to this connection.
    pub net_metering: bool,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            gas_eur_per_m3: 1.45,
            electricity_eur_per_kwh: 0.30,
            feed_in_eur_per_kwh: 0.09,
            feed_in_penalty_eur_per_kwh: 0.02,
            net_metering: true,
        }
    }
}

/// Analysis parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Bivalent point id: `"0"`, `"-7"` or `"-10"`.
    pub bivalent_point: String,
    /// Prefer high-temperature models when any survive filtering.
    pub prefer_high_temp: bool,
    /// Calendar year the synthetic series describe.
    pub year: i32,
    /// Master random seed for the synthetic weather/price year.
    pub seed: u64,
    /// Metering interval for kWh-to-kW conversion (minutes).
    pub interval_minutes: f64,
    /// Maximum share of an expensive hour's load that steering may shift.
    pub max_shift_ratio: f64,
    /// Thermal buffer capacity available for pre-heating (kWh).
    pub buffer_capacity_kwh: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bivalent_point: "0".to_string(),
            prefer_high_temp: false,
            year: 2024,
            seed: 42,
            interval_minutes: 60.0,
            max_shift_ratio: 0.7,
            buffer_capacity_kwh: 50.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"energy.gas_m3"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scenario error: {}: {}", self.field, self.message)
    }
}

impl Scenario {
    /// Returns the apartment-block baseline scenario.
    pub fn apartment_block() -> Self {
        Self {
            building: BuildingConfig::default(),
            energy: EnergyConfig::default(),
            occupancy: OccupancyConfig::default(),
            prices: PriceConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Returns the office-campus preset: daytime occupancy, duo bivalent point.
    pub fn office_campus() -> Self {
        Self {
            building: BuildingConfig {
                building_type: "office".to_string(),
                units: 120,
                grid_connection: "3x63A".to_string(),
                ..BuildingConfig::default()
            },
            energy: EnergyConfig {
                electricity_offtake_kwh: 420_000.0,
                electricity_feed_in_kwh: 110_000.0,
                gas_m3: 24_000.0,
                dhw_liters_per_day: None,
            },
            occupancy: OccupancyConfig {
                weekday_start: 8,
                weekday_end: 18,
                weekend_start: 9,
                weekend_end: 13,
            },
            prices: PriceConfig::default(),
            analysis: AnalysisConfig {
                bivalent_point: "-7".to_string(),
                ..AnalysisConfig::default()
            },
        }
    }

    /// Returns the coastal-hotel preset: EC-coated catalog, all-electric
    /// bivalent point, high-temperature preference for hot-water flow.
    pub fn hotel_coastal() -> Self {
        Self {
            building: BuildingConfig {
                building_type: "hotel".to_string(),
                units: 60,
                coastal_location: true,
                grid_connection: "3x63A".to_string(),
            },
            energy: EnergyConfig {
                electricity_offtake_kwh: 350_000.0,
                electricity_feed_in_kwh: 60_000.0,
                gas_m3: 30_000.0,
                dhw_liters_per_day: None,
            },
            occupancy: OccupancyConfig {
                weekday_start: 6,
                weekday_end: 23,
                weekend_start: 6,
                weekend_end: 23,
            },
            prices: PriceConfig::default(),
            analysis: AnalysisConfig {
                bivalent_point: "-10".to_string(),
                prefer_high_temp: true,
                ..AnalysisConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["apartment_block", "office_campus", "hotel_coastal"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "apartment_block" => Ok(Self::apartment_block()),
            "office_campus" => Ok(Self::office_campus()),
            "hotel_coastal" => Ok(Self::hotel_coastal()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolved building type, if the id is known.
    pub fn building_type(&self) -> Option<&'static BuildingType> {
        building_type(&self.building.building_type)
    }

    /// Resolved grid connection, if the code is known.
    pub fn grid_connection(&self) -> Option<&'static GridConnection> {
        connection_by_id(&self.building.grid_connection)
    }

    /// Resolved bivalent point, if the id is known.
    pub fn bivalent_point(&self) -> Option<&'static BivalentPoint> {
        bivalent_point(&self.analysis.bivalent_point)
    }

    /// Daily hot-water demand: the configured value, or the building-type
    /// default times the unit count. A pre-fill convenience, not validation.
    pub fn dhw_liters_per_day(&self) -> f64 {
        self.energy.dhw_liters_per_day.unwrap_or_else(|| {
            self.building_type()
                .map(|b| crate::calc::heat_demand::default_dhw_liters(b, self.building.units))
                .unwrap_or(0.0)
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the scenario is valid. The pipeline refuses
    /// to run while this list is non-empty; defaults are never substituted
    /// for invalid required fields.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let b = &self.building;
        if self.building_type().is_none() {
            errors.push(ConfigError {
                field: "building.building_type".into(),
                message: format!("unknown building type \"{}\"", b.building_type),
            });
        }
        if b.units == 0 {
            errors.push(ConfigError {
                field: "building.units".into(),
                message: "must be > 0".into(),
            });
        }
        if self.grid_connection().is_none() {
            errors.push(ConfigError {
                field: "building.grid_connection".into(),
                message: format!("unknown grid connection \"{}\"", b.grid_connection),
            });
        }

        let e = &self.energy;
        if e.gas_m3 <= 0.0 {
            errors.push(ConfigError {
                field: "energy.gas_m3".into(),
                message: "must be > 0".into(),
            });
        }
        if e.electricity_offtake_kwh < 0.0 {
            errors.push(ConfigError {
                field: "energy.electricity_offtake_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if e.electricity_feed_in_kwh < 0.0 {
            errors.push(ConfigError {
                field: "energy.electricity_feed_in_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if let Some(liters) = e.dhw_liters_per_day
            && liters < 0.0
        {
            errors.push(ConfigError {
                field: "energy.dhw_liters_per_day".into(),
                message: "must be >= 0".into(),
            });
        }

        let o = &self.occupancy;
        for (field, start, end) in [
            ("occupancy.weekday_start", o.weekday_start, o.weekday_end),
            ("occupancy.weekend_start", o.weekend_start, o.weekend_end),
        ] {
            if start > 23 || end > 23 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "hours must be in 0-23".into(),
                });
            } else if start > end {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "start hour must be <= end hour".into(),
                });
            }
        }

        let p = &self.prices;
        for (field, value) in [
            ("prices.gas_eur_per_m3", p.gas_eur_per_m3),
            ("prices.electricity_eur_per_kwh", p.electricity_eur_per_kwh),
            ("prices.feed_in_eur_per_kwh", p.feed_in_eur_per_kwh),
            (
                "prices.feed_in_penalty_eur_per_kwh",
                p.feed_in_penalty_eur_per_kwh,
            ),
        ] {
            if value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be >= 0".into(),
                });
            }
        }

        let a = &self.analysis;
        if self.bivalent_point().is_none() {
            errors.push(ConfigError {
                field: "analysis.bivalent_point".into(),
                message: format!(
                    "unknown bivalent point \"{}\" (expected \"0\", \"-7\" or \"-10\")",
                    a.bivalent_point
                ),
            });
        }
        if !(1970..=2100).contains(&a.year) {
            errors.push(ConfigError {
                field: "analysis.year".into(),
                message: "must be in 1970-2100".into(),
            });
        }
        if a.interval_minutes <= 0.0 {
            errors.push(ConfigError {
                field: "analysis.interval_minutes".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&a.max_shift_ratio) {
            errors.push(ConfigError {
                field: "analysis.max_shift_ratio".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if a.buffer_capacity_kwh < 0.0 {
            errors.push(ConfigError {
                field: "analysis.buffer_capacity_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apartment_block_preset_valid() {
        let scenario = Scenario::apartment_block();
        let errors = scenario.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in Scenario::PRESETS {
            let scenario = Scenario::from_preset(name);
            assert!(scenario.is_ok(), "preset \"{name}\" should load");
            let errors = scenario.as_ref().map(|s| s.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = Scenario::from_preset("villa");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[building]
building_type = "hospital"
units = 250
coastal_location = false
grid_connection = "3x100A"

[energy]
electricity_offtake_kwh = 900000.0
electricity_feed_in_kwh = 100000.0
gas_m3 = 80000.0
dhw_liters_per_day = 40000.0

[occupancy]
weekday_start = 0
weekday_end = 23
weekend_start = 0
weekend_end = 23

[prices]
gas_eur_per_m3 = 1.30
electricity_eur_per_kwh = 0.28
feed_in_eur_per_kwh = 0.08
feed_in_penalty_eur_per_kwh = 0.015
net_metering = false

[analysis]
bivalent_point = "-7"
year = 2023
seed = 7
"#;
        let scenario = Scenario::from_toml_str(toml);
        assert!(
            scenario.is_ok(),
            "valid TOML should parse: {:?}",
            scenario.err()
        );
        let scenario = scenario.ok();
        assert_eq!(
            scenario.as_ref().map(|s| &*s.building.building_type),
            Some("hospital")
        );
        assert_eq!(scenario.as_ref().map(|s| s.analysis.year), Some(2023));
        assert_eq!(
            scenario.as_ref().map(|s| s.energy.dhw_liters_per_day),
            Some(Some(40000.0))
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[energy]
gas_m3 = 12000.0
"#;
        let scenario = Scenario::from_toml_str(toml);
        assert!(scenario.is_ok());
        let scenario = scenario.ok();
        // gas overridden
        assert_eq!(scenario.as_ref().map(|s| s.energy.gas_m3), Some(12000.0));
        // building kept default
        assert_eq!(scenario.as_ref().map(|s| s.building.units), Some(40));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[energy]
gas_m3 = 12000.0
oil_liters = 3.0
"#;
        let result = Scenario::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_gas() {
        let mut scenario = Scenario::apartment_block();
        scenario.energy.gas_m3 = 0.0;
        let errors = scenario.validate();
        assert!(errors.iter().any(|e| e.field == "energy.gas_m3"));
    }

    #[test]
    fn validation_catches_zero_units() {
        let mut scenario = Scenario::apartment_block();
        scenario.building.units = 0;
        let errors = scenario.validate();
        assert!(errors.iter().any(|e| e.field == "building.units"));
    }

    #[test]
    fn validation_catches_unknown_ids() {
        let mut scenario = Scenario::apartment_block();
        scenario.building.building_type = "castle".to_string();
        scenario.building.grid_connection = "9x9A".to_string();
        scenario.analysis.bivalent_point = "-3".to_string();
        let errors = scenario.validate();
        assert!(errors.iter().any(|e| e.field == "building.building_type"));
        assert!(errors.iter().any(|e| e.field == "building.grid_connection"));
        assert!(errors.iter().any(|e| e.field == "analysis.bivalent_point"));
    }

    #[test]
    fn validation_catches_occupancy_out_of_range() {
        let mut scenario = Scenario::apartment_block();
        scenario.occupancy.weekday_end = 24;
        let errors = scenario.validate();
        assert!(errors.iter().any(|e| e.field == "occupancy.weekday_start"));
    }

    #[test]
    fn dhw_default_scales_with_units() {
        let mut scenario = Scenario::apartment_block();
        scenario.energy.dhw_liters_per_day = None;
        // 40 apartments at 120 l/unit
        assert_eq!(scenario.dhw_liters_per_day(), 4800.0);
        scenario.building.units = 41;
        assert_eq!(scenario.dhw_liters_per_day(), 4920.0);
        // explicit value wins over the derived default
        scenario.energy.dhw_liters_per_day = Some(1000.0);
        assert_eq!(scenario.dhw_liters_per_day(), 1000.0);
    }
}
