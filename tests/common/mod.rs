//! Shared test fixtures for integration tests.

use hp_advisor::config::Scenario;
use hp_advisor::pipeline::{AnalysisOutcome, AnalysisReport, run_analysis};
use hp_advisor::profile::weather::{HourlyTable, PriceTempPoint};
use hp_advisor::series;

/// The apartment-block baseline scenario (40 units, 50 000 m³ gas).
pub fn apartment_scenario() -> Scenario {
    Scenario::apartment_block()
}

/// Deterministic weather fixture: the same temperature and prices for every
/// hour of `year`.
pub fn flat_weather(year: i32, temperature_c: f64, spot_price_ct: f64) -> HourlyTable {
    let mut table = HourlyTable::new();
    for ts in series::year_hours(year) {
        table.insert(
            ts,
            PriceTempPoint {
                spot_price_ct_per_kwh: spot_price_ct,
                gas_price_eur_per_m3: 1.40,
                temperature_c,
            },
        );
    }
    table
}

/// Runs the pipeline and unwraps the complete report.
pub fn complete_report(scenario: &Scenario) -> Box<AnalysisReport> {
    match run_analysis(scenario).expect("scenario should validate") {
        AnalysisOutcome::Complete(report) => report,
        AnalysisOutcome::NoSuitableModel { selection, .. } => panic!(
            "expected a complete analysis, no model for {:.1} kW",
            selection.required_capacity_kw
        ),
    }
}
