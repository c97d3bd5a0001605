use crate::error::ReportError;
use crate::model::DisplayModel;
use serde::{Deserialize, Serialize};
use slipstream_summary_model::{ScenarioRecord, StandardTimingsStats};

/// This scenario's metrics already arrive display-ready; the transform only validates the
/// shape and injects the title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct AppInstallDisplay {
    /// Install duration for the first app, which pays one-off setup costs
    pub first_install: f64,
    pub install_app: StandardTimingsStats,
}

pub(crate) fn transform(record: ScenarioRecord) -> Result<DisplayModel, ReportError> {
    let scenario = record.run_summary.scenario_name.clone();
    let metrics: AppInstallDisplay = serde_json::from_value(record.scenario_metrics)
        .map_err(|e| ReportError::transform(&scenario, e))?;

    DisplayModel::new(
        record.run_summary,
        "App Install",
        Some("Repeatedly installs the test app and measures how long each install takes.".to_string()),
        metrics,
    )
    .map_err(|e| ReportError::transform(&scenario, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::tests::test_run_summary;
    use pretty_assertions::assert_eq;

    #[test]
    fn injects_title_and_keeps_the_metrics() {
        let record = ScenarioRecord {
            run_summary: test_run_summary("app_install"),
            scenario_metrics: serde_json::json!({
                "first_install": 4523.2,
                "install_app": {
                    "mean": 812.5, "std": 110.0,
                    "within_std": 0.69, "within_2std": 0.96, "within_3std": 1.0,
                    "trend": { "samples": [850.0, 820.0, 790.0, 805.0], "window_duration": "10s" }
                }
            }),
        };

        let model = transform(record).unwrap();
        assert_eq!("App Install", model.title);
        assert_eq!(4523.2, model.data["first_install"].as_f64().unwrap());
    }

    #[test]
    fn missing_fields_are_a_transform_error() {
        let record = ScenarioRecord {
            run_summary: test_run_summary("app_install"),
            scenario_metrics: serde_json::json!({ "first_install": 4523.2 }),
        };

        let err = transform(record).unwrap_err();
        assert!(err.to_string().contains("app_install"));
    }
}
