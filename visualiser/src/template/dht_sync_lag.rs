use super::partials::{
    escape_html, rate_stats_block, run_summary_block, scenario_section, timing_stats_block,
};
use crate::error::ReportError;
use crate::format::format_number;
use crate::model::DisplayModel;
use crate::scenario::dht_sync_lag::DhtSyncLagDisplay;

pub(crate) fn render(model: &DisplayModel) -> Result<String, ReportError> {
    let scenario = model.run_summary.scenario_name.as_str();
    let data: DhtSyncLagDisplay = serde_json::from_value(model.data.clone())
        .map_err(|e| ReportError::render(scenario, e))?;

    let mut body = run_summary_block(&model.run_summary);
    body.push_str(&rate_stats_block(
        scenario,
        "dht-sync-lag-create-rate",
        "Create rate",
        &data.create_rate,
    )?);
    body.push_str(&timing_stats_block(
        scenario,
        "dht-sync-lag-timing",
        "Sync lag",
        &data.sync_lag_timing,
        "s",
    )?);
    body.push_str(&rate_stats_block(
        scenario,
        "dht-sync-lag-rate",
        "Sync rate",
        &data.sync_lag_rate,
    )?);
    body.push_str(&db_utilisation_table(&data));
    body.push_str(&format!(
        "<p class=\"errors\">Errors: {}</p>\n",
        data.error_count
    ));

    Ok(scenario_section(
        scenario,
        &model.title,
        model.description.as_deref(),
        &body,
    ))
}

fn db_utilisation_table(data: &DhtSyncLagDisplay) -> String {
    let mut rows = String::new();
    rows.push_str(&utilisation_row(
        "Conductor database",
        data.conductor_db_utilization.mean,
        data.conductor_db_utilization.max,
    ));
    rows.push_str(&utilisation_row(
        "DHT database",
        data.dht_db_utilization.mean,
        data.dht_db_utilization.max,
    ));
    for entry in &data.authored_db_utilization {
        rows.push_str(&utilisation_row(&entry.name, entry.mean, entry.max));
    }
    format!(
        "<div class=\"metric\">\n\
         <h3>Database utilisation</h3>\n\
         <table>\n\
         <tr><th>Database</th><th>Mean</th><th>Max</th></tr>\n\
         {rows}</table>\n\
         </div>\n"
    )
}

fn utilisation_row(name: &str, mean: f64, max: f64) -> String {
    format!(
        "<tr><td>{}</td><td>{}%</td><td>{}%</td></tr>\n",
        escape_html(name),
        format_number(mean, 0),
        format_number(max, 0)
    )
}
