use serde::{Deserialize, Serialize};
use slipstream_summary_model::RunSummary;

/// The shaped, render-ready structure a scenario transform produces from a raw record
///
/// Every display model carries a title and an optional description; the rest of the shape is
/// scenario-specific and lives in `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayModel {
    pub run_summary: RunSummary,
    pub title: String,
    pub description: Option<String>,
    pub data: serde_json::Value,
}

impl DisplayModel {
    pub fn new<V>(
        run_summary: RunSummary,
        title: impl Into<String>,
        description: Option<String>,
        data: V,
    ) -> Result<Self, serde_json::Error>
    where
        V: serde::Serialize,
    {
        Ok(Self {
            run_summary,
            title: title.into(),
            description,
            data: serde_json::to_value(data)?,
        })
    }
}

/// A fully assembled report body and its aggregate title
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Rendered scenario fragments, joined with a blank line, in input order
    pub html: String,
    /// Per-record `{scenario_name}-{run_id}`, joined with `", "`, in input order
    pub title: String,
}
