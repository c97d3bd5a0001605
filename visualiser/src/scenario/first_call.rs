use crate::error::ReportError;
use crate::model::DisplayModel;
use serde::{Deserialize, Serialize};
use slipstream_summary_model::{ScenarioRecord, StandardTimingsStats};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct FirstCallDisplay {
    pub call_timing: StandardTimingsStats,
}

pub(crate) fn transform(record: ScenarioRecord) -> Result<DisplayModel, ReportError> {
    let scenario = record.run_summary.scenario_name.clone();
    let metrics: FirstCallDisplay = serde_json::from_value(record.scenario_metrics)
        .map_err(|e| ReportError::transform(&scenario, e))?;

    DisplayModel::new(
        record.run_summary,
        "First Call",
        Some(
            "Times the first call made against a freshly set up app, where caches are cold."
                .to_string(),
        ),
        metrics,
    )
    .map_err(|e| ReportError::transform(&scenario, e))
}
