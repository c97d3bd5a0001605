use crate::error::ReportError;
use crate::model::DisplayModel;
use serde::{Deserialize, Serialize};
use slipstream_summary_model::{
    MetricValue, ScenarioRecord, StandardRateStats, StandardTimingsStats,
};
use std::collections::BTreeMap;

/// Raw metrics as the summariser emits them for this scenario
#[derive(Debug, Clone, Deserialize)]
struct DhtSyncLagMetrics {
    create_rate: StandardRateStats,
    sync_lag_timing: StandardTimingsStats,
    sync_lag_rate: StandardRateStats,
    error_count: usize,
    /// Authored database utilisation, keyed by `DnaHash(..), AgentPubKey(..)` composites
    authored_db_utilization: BTreeMap<String, MetricValue>,
    conductor_db_utilization: MetricValue,
    dht_db_utilization: MetricValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct DhtSyncLagDisplay {
    pub create_rate: StandardRateStats,
    pub sync_lag_timing: StandardTimingsStats,
    pub sync_lag_rate: StandardRateStats,
    pub error_count: usize,
    pub authored_db_utilization: Vec<NamedDbUtilisation>,
    pub conductor_db_utilization: DbUtilisation,
    pub dht_db_utilization: DbUtilisation,
}

/// Database utilisation scaled from a [0, 1] ratio to a [0, 100] percentage
///
/// The raw metric also carries min/std/count; the report doesn't show them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct DbUtilisation {
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct NamedDbUtilisation {
    pub name: String,
    pub mean: f64,
    pub max: f64,
}

pub(crate) fn transform(record: ScenarioRecord) -> Result<DisplayModel, ReportError> {
    let scenario = record.run_summary.scenario_name.clone();
    let metrics: DhtSyncLagMetrics = serde_json::from_value(record.scenario_metrics)
        .map_err(|e| ReportError::transform(&scenario, e))?;

    let authored_db_utilization = metrics
        .authored_db_utilization
        .into_iter()
        .map(|(key, metric)| {
            let dna = extract_tagged(&key, "DnaHash").ok_or_else(|| {
                ReportError::transform(&scenario, format!("no DnaHash in utilisation key {key:?}"))
            })?;
            let agent = extract_tagged(&key, "AgentPubKey").ok_or_else(|| {
                ReportError::transform(
                    &scenario,
                    format!("no AgentPubKey in utilisation key {key:?}"),
                )
            })?;
            Ok(NamedDbUtilisation {
                name: format!(
                    "Utilisation for DNA {} / agent {}",
                    shrink_identifier(dna),
                    shrink_identifier(agent)
                ),
                mean: metric.mean * 100.0,
                max: metric.max * 100.0,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    DisplayModel::new(
        record.run_summary,
        "DHT Sync Lag",
        Some(
            "Writers create timed entries while the remaining peers record how long each entry \
             takes to become visible locally."
                .to_string(),
        ),
        DhtSyncLagDisplay {
            create_rate: metrics.create_rate,
            sync_lag_timing: metrics.sync_lag_timing,
            sync_lag_rate: metrics.sync_lag_rate,
            error_count: metrics.error_count,
            authored_db_utilization,
            conductor_db_utilization: as_percentage(metrics.conductor_db_utilization),
            dht_db_utilization: as_percentage(metrics.dht_db_utilization),
        },
    )
    .map_err(|e| ReportError::transform(&scenario, e))
}

fn as_percentage(metric: MetricValue) -> DbUtilisation {
    DbUtilisation {
        mean: metric.mean * 100.0,
        max: metric.max * 100.0,
    }
}

/// Extract the payload of `tag(payload)` from a composite identifier string.
///
/// Empty payloads are treated as missing.
fn extract_tagged<'a>(identifier: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("{tag}(");
    let start = identifier.find(&open)? + open.len();
    let payload = &identifier[start..start + identifier[start..].find(')')?];
    (!payload.is_empty()).then_some(payload)
}

/// Shorten an identifier payload to its first and last three characters.
///
/// Payloads of six characters or fewer are shown whole; there is nothing to elide.
fn shrink_identifier(identifier: &str) -> String {
    let chars = identifier.chars().collect::<Vec<_>>();
    if chars.len() <= 6 {
        return identifier.to_string();
    }
    format!(
        "{}...{}",
        chars[..3].iter().collect::<String>(),
        chars[chars.len() - 3..].iter().collect::<String>()
    )
}
