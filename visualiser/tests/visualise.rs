use pretty_assertions::assert_eq;
use slipstream_summary_model::{load_scenario_records, ScenarioRecord};
use slipstream_visualiser::template::render_page;
use slipstream_visualiser::{visualise, visualise_value, ReportError};
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

fn load_fixture(name: &str) -> Vec<ScenarioRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(name);
    load_scenario_records(File::open(path).expect("Failed to open fixture"))
        .expect("Failed to load fixture")
}

#[test]
fn dht_sync_lag_report() {
    let records = load_fixture("dht_sync_lag.json");
    let report = visualise(records).expect("Failed to generate report");

    assert_eq!("dht_sync_lag-eZeDqrMBqlqu46953Zs7c", report.title);
    assert!(
        report
            .html
            .starts_with("<section class=\"scenario scenario-dht-sync-lag\">"),
        "html should start with the scenario section, got: {}",
        &report.html[..80.min(report.html.len())]
    );
    // Composite identifiers are shortened and utilisation ratios are shown as percentages.
    assert!(report
        .html
        .contains("Utilisation for DNA uhC...abc / agent uhC...jkl"));
    assert!(report.html.contains("<td>25%</td><td>75%</td>"));
    // The x-axis spans the whole run: 5 windows of 10s.
    assert!(report.html.contains(">50s</text>"));
}

#[test]
fn two_records_keep_input_order() {
    let mut records = load_fixture("dht_sync_lag.json");
    records.extend(load_fixture("app_install.json"));
    records[0].run_summary.run_id = "a".to_string();
    records[1].run_summary.run_id = "b".to_string();

    let report = visualise(records).expect("Failed to generate report");

    assert_eq!("dht_sync_lag-a, app_install-b", report.title);
    assert_eq!(2, report.html.matches("<section class=\"scenario ").count());
    let first = report.html.find("scenario-dht-sync-lag").unwrap();
    let second = report.html.find("scenario-app-install").unwrap();
    assert!(first < second);
    // Fragments are separated by a blank line.
    assert!(report.html.contains("</section>\n\n<section"));
}

#[test]
fn a_single_object_is_treated_as_one_record() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join("first_call.json");
    let value = serde_json::from_reader(File::open(path).unwrap()).unwrap();

    let report = visualise_value(value).expect("Failed to generate report");
    assert_eq!("first_call-Zw7pTcR4yN9gBq1mXsK2u", report.title);
}

#[test]
fn scalar_input_is_an_input_error() {
    let err = visualise_value(serde_json::json!(42)).unwrap_err();
    assert!(matches!(err, ReportError::Input { .. }));
}

#[test]
fn a_scenario_without_a_template_aborts_the_report() {
    let mut records = load_fixture("dht_sync_lag.json");
    records[0].run_summary.scenario_name = "mystery_scenario".to_string();

    let err = visualise(records).unwrap_err();
    assert!(matches!(err, ReportError::MissingTemplate { .. }));
    assert!(err.to_string().contains("mystery_scenario"));
}

#[test]
fn a_shape_mismatch_aborts_the_report_naming_the_scenario() {
    let mut records = load_fixture("dht_sync_lag.json");
    records[0].scenario_metrics = serde_json::json!({ "wrong": "shape" });

    let err = visualise(records).unwrap_err();
    assert!(matches!(err, ReportError::Transform { .. }));
    assert!(err.to_string().contains("dht_sync_lag"));
}

#[test]
fn every_fixture_renders() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");
    let mut seen = 0;
    for entry in WalkDir::new(&fixtures_dir) {
        let entry = entry.unwrap();
        if !entry.file_type().is_file() {
            continue;
        }
        seen += 1;

        let records = load_scenario_records(File::open(entry.path()).unwrap())
            .unwrap_or_else(|e| panic!("Failed to load {}: {e}", entry.path().display()));
        let report = visualise(records)
            .unwrap_or_else(|e| panic!("Failed to render {}: {e}", entry.path().display()));

        assert!(report.html.starts_with("<section class=\"scenario "));
        assert!(!report.title.is_empty());
    }
    assert!(seen >= 3, "expected fixtures in {}", fixtures_dir.display());
}

#[test]
fn page_wraps_the_report_and_can_be_written_out() {
    let records = load_fixture("app_install.json");
    let report = visualise(records).expect("Failed to generate report");
    let page = render_page(&report);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("report.html");
    std::fs::write(&path, &page).expect("Failed to write page");

    let contents = std::fs::read_to_string(&path).expect("Failed to read page back");
    assert!(contents.starts_with("<html>"));
    assert!(contents.contains("<title>app_install-q3VbnKxwFh2sLJ8dPrM1e</title>"));
    assert!(contents.contains(&report.html));
}
