//! CSV export of a full pipeline run.

mod common;

use hp_advisor::io::export::write_csv;

#[test]
fn export_covers_the_whole_year() {
    let report = common::complete_report(&common::apartment_scenario());
    let mut buf = Vec::new();
    write_csv(&report.combined_load, &mut buf).expect("export should succeed");
    let csv = String::from_utf8(buf).expect("valid UTF-8");
    // header plus one row per hour of the leap year
    assert_eq!(csv.lines().count(), 1 + 8784);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,building_kw,hp_kw,combined_kw,exceedance,exceedance_kw")
    );
    let first = lines.next().expect("first data row");
    assert!(first.starts_with("2024-01-01T00:00,"));
}

#[test]
fn export_is_deterministic_for_a_fixed_seed() {
    let report_a = common::complete_report(&common::apartment_scenario());
    let report_b = common::complete_report(&common::apartment_scenario());

    let mut out_a = Vec::new();
    write_csv(&report_a.combined_load, &mut out_a).expect("first export should succeed");

    let mut out_b = Vec::new();
    write_csv(&report_b.combined_load, &mut out_b).expect("second export should succeed");

    assert_eq!(out_a, out_b);
}
