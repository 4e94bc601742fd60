//! Integration tests for the full analysis pipeline.

mod common;

use hp_advisor::pipeline::{AnalysisOutcome, run_analysis, run_analysis_with_source};

#[test]
fn baseline_sizes_the_reference_apartment_block() {
    let report = common::complete_report(&common::apartment_scenario());

    // 50 000 m³ × 9.769 × 0.90 = 439 605 kWh of useful heat
    assert!((report.heat_demand.total_heat_kwh - 439_605.0).abs() < 1.0);
    // 170.96 kW peak, × beta 0.30 = 51.29 kW required capacity
    assert!((report.heat_demand.required_power_kw - 170.96).abs() < 0.05);
    assert!((report.selection.required_capacity_kw - 51.29).abs() < 0.05);

    // The single large unit wins on unit count and price.
    assert_eq!(report.chosen.model.id, "mt80i");
    assert_eq!(report.chosen.units_needed, 1);
    assert!(report.chosen.total_capacity_kw >= report.selection.required_capacity_kw);
}

#[test]
fn baseline_savings_are_positive_with_finite_payback() {
    let report = common::complete_report(&common::apartment_scenario());
    assert!(report.savings.annual_savings_eur > 0.0);
    assert!(report.savings.payback.years().is_some());
    assert!(report.savings.co2_reduction_kg > 0.0);
    let pct = report.savings.savings_percent.expect("gas bill is non-zero");
    assert!(pct > 0.0 && pct < 100.0);
}

#[test]
fn building_profile_conserves_annual_totals_end_to_end() {
    let scenario = common::apartment_scenario();
    let report = common::complete_report(&scenario);
    let offtake: f64 = report.building_profile.iter().map(|p| p.offtake_kwh).sum();
    let feed_in: f64 = report.building_profile.iter().map(|p| p.feed_in_kwh).sum();
    let gas: f64 = report.building_profile.iter().map(|p| p.gas_m3).sum();
    assert!((offtake - scenario.energy.electricity_offtake_kwh).abs() < 1e-3);
    assert!((feed_in - scenario.energy.electricity_feed_in_kwh).abs() < 1e-3);
    assert!((gas - scenario.energy.gas_m3).abs() < 1e-3);
}

#[test]
fn combined_load_is_building_plus_heat_pump_everywhere() {
    let report = common::complete_report(&common::apartment_scenario());
    for p in &report.combined_load {
        assert!((p.combined_kw - (p.building_kw + p.hp_kw)).abs() < 1e-9);
        // flags and magnitudes agree
        assert_eq!(p.exceedance, p.exceedance_kw > 0.0);
    }
    let flagged = report.combined_load.iter().filter(|p| p.exceedance).count();
    assert_eq!(flagged, report.peak.exceedance_count);
}

#[test]
fn same_seed_is_deterministic_different_seed_is_not() {
    let scenario = common::apartment_scenario();
    let a = common::complete_report(&scenario);
    let b = common::complete_report(&scenario);
    assert_eq!(a.peak.peak_kw, b.peak.peak_kw);
    assert_eq!(a.steering.cost_without_eur, b.steering.cost_without_eur);
    assert_eq!(
        a.dynamic_pricing.price_stats.avg_spot_ct_per_kwh,
        b.dynamic_pricing.price_stats.avg_spot_ct_per_kwh
    );

    let mut reseeded = common::apartment_scenario();
    reseeded.analysis.seed = 1234;
    let c = common::complete_report(&reseeded);
    assert_ne!(a.peak.peak_kw, c.peak.peak_kw);
}

#[test]
fn injected_weather_fixture_drives_the_analysis() {
    let scenario = common::apartment_scenario();
    // A mild flat year: heating runs (10 °C < 15 °C threshold) but never
    // hits a demand peak, and flat prices leave nothing to steer.
    let weather = common::flat_weather(scenario.analysis.year, 10.0, 25.0);
    let outcome =
        run_analysis_with_source(&scenario, &weather).expect("scenario should validate");
    let report = match outcome {
        AnalysisOutcome::Complete(report) => report,
        AnalysisOutcome::NoSuitableModel { .. } => panic!("baseline must find a model"),
    };
    assert!(report.hp_profile.peak_power_kw > 0.0);
    assert_eq!(report.steering.shifted_kwh, 0.0);
    assert_eq!(report.dynamic_pricing.price_stats.avg_spot_ct_per_kwh, 25.0);
    assert_eq!(report.dynamic_pricing.hours_with_price, 8784);
}

#[test]
fn saldering_identities_hold_on_the_synthetic_year() {
    let scenario = common::apartment_scenario();
    let report = common::complete_report(&scenario);
    let s = &report.saldering;
    // offset = min(feed-in, offtake), surplus = max(0, feed-in − offtake)
    let expected_offset = s.total_feed_in_kwh.min(s.total_offtake_kwh);
    assert!(
        (s.with_net_metering.without_hp.offset_kwh - expected_offset).abs() < 1e-6
    );
    assert_eq!(s.without_net_metering.without_hp.offset_kwh, 0.0);
    assert!(s.self_consumption_kwh <= s.total_feed_in_kwh + 1e-9);
}

#[test]
fn hp_profile_scales_with_the_chosen_cascade() {
    let report = common::complete_report(&common::apartment_scenario());
    let rescaled = report.hp_profile.scaled(2.0);
    assert!((rescaled.peak_power_kw - report.hp_profile.peak_power_kw * 2.0).abs() < 1e-9);
    assert_eq!(rescaled.points.len(), report.hp_profile.points.len());
}

#[test]
fn invalid_scenario_reports_every_failed_precondition() {
    let mut scenario = common::apartment_scenario();
    scenario.energy.gas_m3 = 0.0;
    scenario.building.grid_connection = "2x10A".to_string();
    let errors = run_analysis(&scenario).err().expect("must refuse to run");
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"energy.gas_m3"));
    assert!(fields.contains(&"building.grid_connection"));
}
