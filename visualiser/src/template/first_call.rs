use super::partials::{run_summary_block, scenario_section, timing_stats_block};
use crate::error::ReportError;
use crate::model::DisplayModel;
use crate::scenario::first_call::FirstCallDisplay;

pub(crate) fn render(model: &DisplayModel) -> Result<String, ReportError> {
    let scenario = model.run_summary.scenario_name.as_str();
    let data: FirstCallDisplay = serde_json::from_value(model.data.clone())
        .map_err(|e| ReportError::render(scenario, e))?;

    let mut body = run_summary_block(&model.run_summary);
    body.push_str(&timing_stats_block(
        scenario,
        "first-call-timing",
        "Call timing",
        &data.call_timing,
        "s",
    )?);

    Ok(scenario_section(
        scenario,
        &model.title,
        model.description.as_deref(),
        &body,
    ))
}
