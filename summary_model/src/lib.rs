use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha3::Digest;
use std::collections::HashMap;
use std::io::{Read, Write};

/// Summary of a run
///
/// Written by the scenario runner when a run completes and carried, unmodified, through the
/// summariser into the report that the visualiser consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// The unique run id
    ///
    /// Chosen by the runner. Unique for each run.
    pub run_id: String,
    /// The name of the scenario that was run
    pub scenario_name: String,
    /// The time the run started
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// The duration that the run was configured with, in seconds
    ///
    /// Not set when the run was configured for soak testing.
    pub run_duration: Option<u64>,
    /// The number of peers configured for the run
    pub peer_count: usize,
    /// The number of peers still present at the end of the run
    ///
    /// If some peers exit early, for example due to a fatal error during a behaviour run, then
    /// this will be less than [RunSummary::peer_count].
    pub peer_end_count: usize,
    /// The behaviour configuration
    ///
    /// This is the number of agents that were assigned to each behaviour.
    pub assigned_behaviours: HashMap<String, usize>,
    /// Environment variables set for the run
    ///
    /// This won't capture all environment variables. Just the ones that the runner is aware of or
    /// that are included by the scenario itself.
    pub env: HashMap<String, String>,
    /// The version of the Slipstream runner that produced this summary
    pub runner_version: String,
}

impl RunSummary {
    /// Create a new run summary
    pub fn new(
        run_id: String,
        scenario_name: String,
        started_at: i64,
        run_duration: Option<u64>,
        peer_count: usize,
        assigned_behaviours: HashMap<String, usize>,
        runner_version: String,
    ) -> Self {
        Self {
            run_id,
            scenario_name,
            started_at,
            run_duration,
            peer_count,
            peer_end_count: 0,
            assigned_behaviours,
            env: HashMap::with_capacity(0),
            runner_version,
        }
    }

    /// Set the peer end count
    pub fn set_peer_end_count(&mut self, peer_end_count: usize) {
        self.peer_end_count = peer_end_count;
    }

    /// Add an environment variable
    pub fn add_env(&mut self, key: String, value: String) {
        self.env.insert(key, value);
    }

    /// Compute a fingerprint for this run summary
    ///
    /// The fingerprint is intended to uniquely identify the configuration used to run the
    /// scenario, so that repeated runs of the same configuration can be correlated. It uses the
    ///     - Scenario name
    ///     - Run duration
    ///     - Assigned behaviours
    ///     - Selected environment variables
    ///     - Runner version
    ///
    /// The fingerprint is computed using [sha3::Sha3_256].
    pub fn fingerprint(&self) -> String {
        let mut hasher = sha3::Sha3_256::new();
        Digest::update(&mut hasher, self.scenario_name.as_bytes());
        if let Some(run_duration) = self.run_duration {
            Digest::update(&mut hasher, run_duration.to_le_bytes());
        }
        self.assigned_behaviours
            .iter()
            .sorted_by_key(|(k, _)| k.to_owned())
            .for_each(|(k, v)| {
                Digest::update(&mut hasher, k.as_bytes());
                Digest::update(&mut hasher, v.to_le_bytes());
            });
        self.env
            .iter()
            .sorted_by_key(|(k, _)| k.to_owned())
            .for_each(|(k, v)| {
                Digest::update(&mut hasher, k.as_bytes());
                Digest::update(&mut hasher, v.as_bytes());
            });
        Digest::update(&mut hasher, self.runner_version.as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

/// One scenario execution, as it appears in a summariser report
///
/// The shape of `scenario_metrics` is scenario-specific. It is kept as raw JSON here; each
/// consumer deserializes exactly the part it understands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    pub run_summary: RunSummary,
    pub scenario_metrics: serde_json::Value,
}

impl ScenarioRecord {
    pub fn new<V>(run_summary: RunSummary, scenario_metrics: V) -> anyhow::Result<Self>
    where
        V: serde::Serialize,
    {
        Ok(Self {
            run_summary,
            scenario_metrics: serde_json::to_value(scenario_metrics)?,
        })
    }
}

/// A statistical summary of one measured quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricValue {
    pub mean: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// A metric sampled once per fixed-size time window over the duration of a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSeries {
    /// One sample per window, in window order
    pub samples: Vec<f64>,
    /// The mean over the whole run, when the producer computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    /// The window size as digits followed by a unit suffix, e.g. `"10s"`
    pub window_duration: String,
}

/// Timing statistics in the shape every scenario summariser produces them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardTimingsStats {
    pub mean: f64,
    pub std: f64,
    pub within_std: f64,
    pub within_2std: f64,
    pub within_3std: f64,
    pub trend: TrendSeries,
}

/// Rate statistics in the shape every scenario summariser produces them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardRateStats {
    pub mean: f64,
    pub trend: TrendSeries,
}

/// Serialize scenario records to a writer as a JSON array
pub fn store_scenario_records<W: Write>(
    records: &[ScenarioRecord],
    writer: &mut W,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Load scenario records from a reader
///
/// The input is either a single scenario record object or an array of them. A single object is
/// normalized to a one-element list.
pub fn load_scenario_records<R: Read>(reader: R) -> anyhow::Result<Vec<ScenarioRecord>> {
    let reader = std::io::BufReader::new(reader);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    scenario_records_from_value(value)
}

/// Normalize a parsed JSON document into a list of scenario records
pub fn scenario_records_from_value(value: serde_json::Value) -> anyhow::Result<Vec<ScenarioRecord>> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Into::into))
            .collect(),
        value @ serde_json::Value::Object(_) => {
            let record: ScenarioRecord = serde_json::from_value(value)?;
            Ok(vec![record])
        }
        other => anyhow::bail!(
            "expected a scenario record or an array of scenario records, got: {}",
            other
        ),
    }
}
