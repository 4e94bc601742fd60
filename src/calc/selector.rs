//! Heat-pump catalog matching and ranking.

use crate::catalog::BivalentPoint;
use crate::catalog::heat_pump::{HEAT_PUMP_CATALOG, HeatPumpModel, HpClass};

/// Largest cascade size considered a sane installation. Options needing more
/// units stay listed but are not recommended.
pub const MAX_UNITS_PER_CASCADE: u32 = 16;

/// Sizing requirements for catalog matching.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput {
    /// Required peak thermal power before the beta factor (kW).
    pub required_power_kw: f64,
    /// Coastal site: only EC-coated models are eligible.
    pub coastal_location: bool,
    /// Narrow to high-temperature models when any survive filtering.
    pub prefer_high_temp: bool,
}

/// One catalog model evaluated against the required capacity.
#[derive(Debug, Clone, Copy)]
pub struct ModelOption {
    pub model: &'static HeatPumpModel,
    pub units_needed: u32,
    pub total_capacity_kw: f64,
    pub total_price_eur: f64,
}

/// Outcome of catalog matching.
///
/// `recommendations` is empty when no option meets the requirement within a
/// sane cascade size; that is a valid result, not an error.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Required heat-pump capacity after the beta factor (kW).
    pub required_capacity_kw: f64,
    /// Share of annual heat energy the heat pump covers (percent).
    pub coverage_percent: f64,
    /// Up to three recommended options, de-duplicated by model.
    pub recommendations: Vec<ModelOption>,
    /// Every eligible catalog option, ranked.
    pub options: Vec<ModelOption>,
}

/// Number of units of `model` needed to reach `required_capacity_kw`.
pub fn units_needed(model: &HeatPumpModel, required_capacity_kw: f64) -> u32 {
    (required_capacity_kw / model.power_kw).ceil() as u32
}

/// Matches the catalog against the required power.
///
/// The EC filter is exclusive in both directions: coastal sites only get
/// EC-coated models, inland sites only uncoated ones. Options are ranked by
/// unit count first, then price, then descending SCOP.
pub fn select_heat_pump(input: SelectionInput, bivalent: &BivalentPoint) -> Selection {
    let required_capacity_kw = input.required_power_kw * bivalent.beta_factor;

    let mut eligible: Vec<&'static HeatPumpModel> = HEAT_PUMP_CATALOG
        .iter()
        .filter(|m| m.ec_coated == input.coastal_location)
        .collect();

    if input.prefer_high_temp {
        let ht: Vec<_> = eligible
            .iter()
            .copied()
            .filter(|m| m.class == HpClass::HighTemp)
            .collect();
        if !ht.is_empty() {
            eligible = ht;
        }
    }

    let mut options: Vec<ModelOption> = eligible
        .into_iter()
        .map(|model| {
            let units = units_needed(model, required_capacity_kw);
            ModelOption {
                model,
                units_needed: units,
                total_capacity_kw: f64::from(units) * model.power_kw,
                total_price_eur: f64::from(units) * model.price_eur,
            }
        })
        .collect();

    // Fewer units beats lower price, price beats efficiency.
    options.sort_by(|a, b| {
        a.units_needed
            .cmp(&b.units_needed)
            .then(a.total_price_eur.total_cmp(&b.total_price_eur))
            .then(b.model.scop.total_cmp(&a.model.scop))
    });

    let recommendations = recommend(&options, required_capacity_kw);

    Selection {
        required_capacity_kw,
        coverage_percent: bivalent.coverage_percent,
        recommendations,
        options,
    }
}

/// Picks up to three recommendations from the ranked options: lowest total
/// price, highest SCOP, and a single-unit option if one exists.
fn recommend(options: &[ModelOption], required_capacity_kw: f64) -> Vec<ModelOption> {
    let valid: Vec<ModelOption> = options
        .iter()
        .copied()
        .filter(|o| {
            o.total_capacity_kw >= required_capacity_kw && o.units_needed <= MAX_UNITS_PER_CASCADE
        })
        .collect();

    let mut recommendations = Vec::new();

    let Some(best_price) = valid
        .iter()
        .copied()
        .reduce(|best, cur| if cur.total_price_eur < best.total_price_eur { cur } else { best })
    else {
        return recommendations;
    };
    recommendations.push(best_price);

    let best_scop = valid
        .iter()
        .copied()
        .reduce(|best, cur| if cur.model.scop > best.model.scop { cur } else { best });
    if let Some(best_scop) = best_scop
        && best_scop.model.id != best_price.model.id
    {
        recommendations.push(best_scop);
    }

    let single_unit = valid.iter().copied().find(|o| {
        o.units_needed == 1 && !recommendations.iter().any(|r| r.model.id == o.model.id)
    });
    if let Some(single_unit) = single_unit {
        recommendations.push(single_unit);
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bivalent::bivalent_point;

    fn hybrid() -> &'static BivalentPoint {
        bivalent_point("0").expect("table entry")
    }

    #[test]
    fn beta_factor_scales_required_capacity() {
        let input = SelectionInput {
            required_power_kw: 170.96,
            coastal_location: false,
            prefer_high_temp: false,
        };
        let selection = select_heat_pump(input, hybrid());
        // 170.96 × 0.30 ≈ 51.29 kW
        assert!((selection.required_capacity_kw - 51.29).abs() < 0.01);
        assert_eq!(selection.coverage_percent, 40.0);
    }

    #[test]
    fn unit_counts_are_ceiling_of_capacity_ratio() {
        let input = SelectionInput {
            required_power_kw: 170.96,
            coastal_location: false,
            prefer_high_temp: false,
        };
        let selection = select_heat_pump(input, hybrid());
        assert!(!selection.options.is_empty());
        for o in &selection.options {
            let expected =
                (selection.required_capacity_kw / o.model.power_kw).ceil() as u32;
            assert_eq!(o.units_needed, expected, "model {}", o.model.id);
            assert!(o.total_capacity_kw >= selection.required_capacity_kw - 1e-9);
        }
    }

    #[test]
    fn ranking_prefers_fewer_units_then_price() {
        let input = SelectionInput {
            required_power_kw: 170.96,
            coastal_location: false,
            prefer_high_temp: false,
        };
        let selection = select_heat_pump(input, hybrid());
        for pair in selection.options.windows(2) {
            assert!(
                pair[0].units_needed < pair[1].units_needed
                    || (pair[0].units_needed == pair[1].units_needed
                        && pair[0].total_price_eur <= pair[1].total_price_eur)
            );
        }
    }

    #[test]
    fn coastal_filter_is_exclusive() {
        let coastal = select_heat_pump(
            SelectionInput {
                required_power_kw: 100.0,
                coastal_location: true,
                prefer_high_temp: false,
            },
            hybrid(),
        );
        assert!(!coastal.options.is_empty());
        assert!(coastal.options.iter().all(|o| o.model.ec_coated));

        let inland = select_heat_pump(
            SelectionInput {
                required_power_kw: 100.0,
                coastal_location: false,
                prefer_high_temp: false,
            },
            hybrid(),
        );
        assert!(inland.options.iter().all(|o| !o.model.ec_coated));
    }

    #[test]
    fn high_temp_preference_narrows_when_possible() {
        let selection = select_heat_pump(
            SelectionInput {
                required_power_kw: 100.0,
                coastal_location: false,
                prefer_high_temp: true,
            },
            hybrid(),
        );
        assert!(!selection.options.is_empty());
        assert!(
            selection
                .options
                .iter()
                .all(|o| o.model.class == HpClass::HighTemp)
        );
    }

    #[test]
    fn recommendations_are_deduplicated_and_capped() {
        let selection = select_heat_pump(
            SelectionInput {
                required_power_kw: 170.96,
                coastal_location: false,
                prefer_high_temp: false,
            },
            hybrid(),
        );
        assert!(!selection.recommendations.is_empty());
        assert!(selection.recommendations.len() <= 3);
        for (i, a) in selection.recommendations.iter().enumerate() {
            for b in &selection.recommendations[i + 1..] {
                assert_ne!(a.model.id, b.model.id);
            }
        }
    }

    #[test]
    fn oversized_demand_yields_no_recommendation() {
        // Beyond any model's reach within a sane cascade.
        let selection = select_heat_pump(
            SelectionInput {
                required_power_kw: 10_000.0,
                coastal_location: false,
                prefer_high_temp: false,
            },
            hybrid(),
        );
        assert!(selection.recommendations.is_empty());
        // The ranked list still describes every eligible model.
        assert!(!selection.options.is_empty());
    }

    #[test]
    fn bivalent_choice_moves_capacity_and_coverage_independently() {
        let input = SelectionInput {
            required_power_kw: 100.0,
            coastal_location: false,
            prefer_high_temp: false,
        };
        let hybrid = select_heat_pump(input, bivalent_point("0").expect("entry"));
        let electric = select_heat_pump(input, bivalent_point("-10").expect("entry"));
        assert!((hybrid.required_capacity_kw - 30.0).abs() < 1e-9);
        assert!((electric.required_capacity_kw - 90.0).abs() < 1e-9);
        assert_eq!(hybrid.coverage_percent, 40.0);
        assert_eq!(electric.coverage_percent, 95.0);
    }
}
