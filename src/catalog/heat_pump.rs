//! Heat-pump model catalog.

/// Temperature class of a heat-pump model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpClass {
    /// Medium temperature, flow up to ~45 °C.
    MediumTemp,
    /// High temperature, flow up to 70-75 °C.
    HighTemp,
}

/// Static heat-pump catalog entry. Never mutated at runtime.
#[derive(Debug, Clone, Copy)]
pub struct HeatPumpModel {
    pub id: &'static str,
    pub name: &'static str,
    pub class: HpClass,
    /// Rated thermal output (kW).
    pub power_kw: f64,
    /// Seasonal COP at A7/W35 reference conditions.
    pub scop: f64,
    /// Maximum flow temperature (°C).
    pub max_flow_temp_c: f64,
    pub refrigerant: &'static str,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub weight_kg: u32,
    pub max_current_a: u32,
    /// List price per unit (€). Zero for price-on-request variants.
    pub price_eur: f64,
    pub price_on_request: bool,
    /// EC-coated (corrosion-protected) variant required for coastal sites.
    pub ec_coated: bool,
}

/// The full model catalog, medium- and high-temperature lines.
pub static HEAT_PUMP_CATALOG: &[HeatPumpModel] = &[
    HeatPumpModel {
        id: "mt20i",
        name: "MT20i",
        class: HpClass::MediumTemp,
        power_kw: 13.23,
        scop: 4.8,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1200,
        width_mm: 450,
        height_mm: 1450,
        weight_kg: 185,
        max_current_a: 18,
        price_eur: 12990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt20i-ec",
        name: "MT20i EC",
        class: HpClass::MediumTemp,
        power_kw: 13.23,
        scop: 4.8,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1200,
        width_mm: 450,
        height_mm: 1450,
        weight_kg: 185,
        max_current_a: 18,
        price_eur: 0.0,
        price_on_request: true,
        ec_coated: true,
    },
    HeatPumpModel {
        id: "ht20i",
        name: "HT20i",
        class: HpClass::HighTemp,
        power_kw: 12.30,
        scop: 4.5,
        max_flow_temp_c: 70.0,
        refrigerant: "R290",
        length_mm: 1200,
        width_mm: 450,
        height_mm: 1450,
        weight_kg: 195,
        max_current_a: 20,
        price_eur: 16490.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "ht20i-ec",
        name: "HT20i EC",
        class: HpClass::HighTemp,
        power_kw: 12.30,
        scop: 4.5,
        max_flow_temp_c: 70.0,
        refrigerant: "R290",
        length_mm: 1200,
        width_mm: 450,
        height_mm: 1450,
        weight_kg: 195,
        max_current_a: 20,
        price_eur: 20090.0,
        price_on_request: false,
        ec_coated: true,
    },
    HeatPumpModel {
        id: "mt26i",
        name: "MT26i",
        class: HpClass::MediumTemp,
        power_kw: 17.50,
        scop: 4.9,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1400,
        width_mm: 520,
        height_mm: 1550,
        weight_kg: 220,
        max_current_a: 22,
        price_eur: 15490.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "ht30i",
        name: "HT30i",
        class: HpClass::HighTemp,
        power_kw: 15.10,
        scop: 5.17,
        max_flow_temp_c: 75.0,
        refrigerant: "R290",
        length_mm: 1881,
        width_mm: 672,
        height_mm: 1806,
        weight_kg: 355,
        max_current_a: 30,
        price_eur: 19490.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt33i",
        name: "MT33i",
        class: HpClass::MediumTemp,
        power_kw: 17.90,
        scop: 5.0,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1500,
        width_mm: 550,
        height_mm: 1600,
        weight_kg: 245,
        max_current_a: 24,
        price_eur: 16990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt40i",
        name: "MT40i",
        class: HpClass::MediumTemp,
        power_kw: 20.60,
        scop: 5.1,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1600,
        width_mm: 580,
        height_mm: 1650,
        weight_kg: 280,
        max_current_a: 28,
        price_eur: 18990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt50i",
        name: "MT50i",
        class: HpClass::MediumTemp,
        power_kw: 38.00,
        scop: 5.2,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1800,
        width_mm: 650,
        height_mm: 1750,
        weight_kg: 320,
        max_current_a: 45,
        price_eur: 24990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt60i",
        name: "MT60i",
        class: HpClass::MediumTemp,
        power_kw: 43.90,
        scop: 5.15,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 1900,
        width_mm: 680,
        height_mm: 1800,
        weight_kg: 360,
        max_current_a: 52,
        price_eur: 27990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt70i",
        name: "MT70i",
        class: HpClass::MediumTemp,
        power_kw: 50.00,
        scop: 5.1,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 2000,
        width_mm: 720,
        height_mm: 1850,
        weight_kg: 400,
        max_current_a: 60,
        price_eur: 31990.0,
        price_on_request: false,
        ec_coated: false,
    },
    HeatPumpModel {
        id: "mt80i",
        name: "MT80i",
        class: HpClass::MediumTemp,
        power_kw: 56.30,
        scop: 5.0,
        max_flow_temp_c: 45.0,
        refrigerant: "R290",
        length_mm: 2100,
        width_mm: 750,
        height_mm: 1900,
        weight_kg: 440,
        max_current_a: 68,
        price_eur: 35990.0,
        price_on_request: false,
        ec_coated: false,
    },
];

/// Looks up a catalog model by id.
pub fn model_by_id(id: &str) -> Option<&'static HeatPumpModel> {
    HEAT_PUMP_CATALOG.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twelve_models() {
        assert_eq!(HEAT_PUMP_CATALOG.len(), 12);
    }

    #[test]
    fn lookup_by_id() {
        let m = model_by_id("mt50i").expect("known id");
        assert_eq!(m.power_kw, 38.0);
        assert_eq!(m.class, HpClass::MediumTemp);
    }

    #[test]
    fn lookup_unknown_is_none() {
        assert!(model_by_id("mt999").is_none());
    }

    #[test]
    fn ec_models_exist_for_coastal_sites() {
        assert!(HEAT_PUMP_CATALOG.iter().any(|m| m.ec_coated));
        assert!(HEAT_PUMP_CATALOG.iter().any(|m| !m.ec_coated));
    }

    #[test]
    fn only_quote_models_have_zero_price() {
        for m in HEAT_PUMP_CATALOG {
            assert_eq!(m.price_eur == 0.0, m.price_on_request, "model {}", m.id);
            assert!(m.power_kw > 0.0 && m.scop > 1.0, "model {}", m.id);
        }
    }
}
