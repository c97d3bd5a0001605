use slipstream_summary_model::{scenario_records_from_value, ScenarioRecord};

pub mod chart;
pub mod error;
pub mod format;
pub mod model;
pub mod scenario;
pub mod template;

pub use error::ReportError;
pub use model::{DisplayModel, Report};

/// Generate the report body and title for a sequence of scenario records.
///
/// Records are processed in input order: each one is shaped by its scenario's transform and
/// rendered through its scenario's template. Any failure aborts the whole report with an error
/// naming the scenario; there is no partial output.
pub fn visualise(
    records: impl IntoIterator<Item = ScenarioRecord>,
) -> Result<Report, ReportError> {
    let mut fragments = Vec::new();
    let mut titles = Vec::new();

    for record in records {
        let scenario_name = record.run_summary.scenario_name.clone();
        log::debug!("Rendering scenario: {scenario_name}");

        let transform = scenario::transform_for(&scenario_name);
        let model = transform(record)?;

        let template =
            template::template_for(&scenario_name).ok_or_else(|| ReportError::MissingTemplate {
                scenario: scenario_name.clone(),
            })?;
        fragments.push(template(&model)?);

        titles.push(format!(
            "{}-{}",
            model.run_summary.scenario_name, model.run_summary.run_id
        ));
    }

    Ok(Report {
        html: fragments.join("\n\n"),
        title: titles.join(", "),
    })
}

/// Generate a report from a parsed JSON document.
///
/// The document is either a single scenario record object or an array of them; a single
/// object is treated as a one-element sequence.
pub fn visualise_value(value: serde_json::Value) -> Result<Report, ReportError> {
    let records = scenario_records_from_value(value).map_err(|e| ReportError::Input {
        message: e.to_string(),
    })?;
    visualise(records)
}
