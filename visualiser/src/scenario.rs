use crate::error::ReportError;
use crate::model::DisplayModel;
use slipstream_summary_model::ScenarioRecord;

pub(crate) mod app_install;
pub(crate) mod dht_sync_lag;
pub(crate) mod first_call;

/// A pure function from one scenario record to its display model
pub type Transform = fn(ScenarioRecord) -> Result<DisplayModel, ReportError>;

/// Resolve the transform for a scenario
///
/// Every scenario name maps to some transform. Names without a registered transform get a
/// pass-through that injects the scenario name as the title and leaves the metrics untouched;
/// whether the record can then be rendered is decided by the template lookup.
pub fn transform_for(scenario_name: &str) -> Transform {
    match scenario_name {
        "app_install" => app_install::transform,
        "dht_sync_lag" => dht_sync_lag::transform,
        "first_call" => first_call::transform,
        name => {
            log::debug!("No transform registered for scenario: {name}");
            pass_through
        }
    }
}

fn pass_through(record: ScenarioRecord) -> Result<DisplayModel, ReportError> {
    let title = record.run_summary.scenario_name.clone();
    Ok(DisplayModel {
        run_summary: record.run_summary,
        title,
        description: None,
        data: record.scenario_metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slipstream_summary_model::RunSummary;
    use std::collections::HashMap;

    pub(crate) fn test_run_summary(scenario_name: &str) -> RunSummary {
        RunSummary::new(
            "X".to_string(),
            scenario_name.to_string(),
            1_700_000_000,
            Some(300),
            5,
            HashMap::from([("default".to_string(), 5)]),
            "0.1.0".to_string(),
        )
    }

    #[test]
    fn unregistered_scenarios_get_a_title_and_nothing_else() {
        let metrics = serde_json::json!({ "made_up_metric": { "mean": 1.0, "max": 2.0 } });
        let record = ScenarioRecord {
            run_summary: test_run_summary("mystery_scenario"),
            scenario_metrics: metrics.clone(),
        };

        let model = transform_for("mystery_scenario")(record).unwrap();

        assert_eq!("mystery_scenario", model.title);
        assert_eq!(None, model.description);
        assert_eq!(metrics, model.data);
    }
}
