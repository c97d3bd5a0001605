use super::partials::{run_summary_block, scenario_section, timing_stats_block};
use crate::error::ReportError;
use crate::format::{format_number, percent_change};
use crate::model::DisplayModel;
use crate::scenario::app_install::AppInstallDisplay;

pub(crate) fn render(model: &DisplayModel) -> Result<String, ReportError> {
    let scenario = model.run_summary.scenario_name.as_str();
    let data: AppInstallDisplay = serde_json::from_value(model.data.clone())
        .map_err(|e| ReportError::render(scenario, e))?;

    let mut body = run_summary_block(&model.run_summary);
    body.push_str(&format!(
        "<p>First install: {first}ms ({change} vs steady state)</p>\n",
        first = format_number(data.first_install, 3),
        change = percent_change(data.install_app.mean, data.first_install),
    ));
    body.push_str(&timing_stats_block(
        scenario,
        "app-install-timing",
        "Install app",
        &data.install_app,
        "ms",
    )?);

    Ok(scenario_section(
        scenario,
        &model.title,
        model.description.as_deref(),
        &body,
    ))
}
