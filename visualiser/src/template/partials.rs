use crate::chart;
use crate::error::ReportError;
use crate::format::{format_datetime, format_number, plural};
use itertools::Itertools;
use slipstream_summary_model::{RunSummary, StandardRateStats, StandardTimingsStats, TrendSeries};

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap a scenario's rendered body in its section element, with heading and description.
///
/// The section class is derived from the scenario name and is what scenario-specific CSS
/// hooks onto.
pub(crate) fn scenario_section(
    scenario_name: &str,
    title: &str,
    description: Option<&str>,
    body: &str,
) -> String {
    let description = match description {
        Some(text) => format!("<p class=\"description\">{}</p>\n", escape_html(text)),
        None => String::new(),
    };
    format!(
        "<section class=\"scenario scenario-{class}\">\n<h2>{title}</h2>\n{description}{body}</section>",
        class = scenario_name.replace('_', "-"),
        title = escape_html(title),
    )
}

/// The run header block every scenario section starts with.
pub(crate) fn run_summary_block(summary: &RunSummary) -> String {
    let duration = match summary.run_duration {
        Some(seconds) => plural(seconds as f64, " second", " seconds"),
        None => "soak".to_string(),
    };
    let behaviours = summary
        .assigned_behaviours
        .iter()
        .sorted_by_key(|(name, _)| name.to_owned())
        .map(|(name, count)| format!("{}: {count}", escape_html(name)))
        .join(", ");
    let fingerprint = summary.fingerprint().chars().take(8).collect::<String>();

    format!(
        "<dl class=\"run-summary\">\n\
         <dt>Run</dt><dd>{run_id}</dd>\n\
         <dt>Started</dt><dd>{started}</dd>\n\
         <dt>Duration</dt><dd>{duration}</dd>\n\
         <dt>Peers</dt><dd>{peers_at_end} of {peers} at end</dd>\n\
         <dt>Behaviours</dt><dd>{behaviours}</dd>\n\
         <dt>Config</dt><dd><code>{fingerprint}</code></dd>\n\
         <dt>Runner</dt><dd>{runner_version}</dd>\n\
         </dl>\n",
        run_id = escape_html(&summary.run_id),
        started = format_datetime(summary.started_at),
        peers_at_end = summary.peer_end_count,
        peers = summary.peer_count,
        runner_version = escape_html(&summary.runner_version),
    )
}

/// Embed a trend chart for a series, preferring an explicitly supplied mean over the one the
/// series itself carries.
pub(crate) fn trend_chart(
    scenario: &str,
    chart_id: &str,
    trend: &TrendSeries,
    mean: Option<f64>,
    unit: &str,
) -> Result<String, ReportError> {
    let mean = mean.or(trend.mean);
    chart::trend_svg(chart_id, &trend.samples, mean, &trend.window_duration, unit)
        .map_err(|e| ReportError::render(scenario, e))
}

/// Timing statistics with their distribution summary and trend chart.
pub(crate) fn timing_stats_block(
    scenario: &str,
    chart_id: &str,
    heading: &str,
    stats: &StandardTimingsStats,
    unit: &str,
) -> Result<String, ReportError> {
    let chart = trend_chart(scenario, chart_id, &stats.trend, Some(stats.mean), unit)?;
    Ok(format!(
        "<div class=\"metric\">\n\
         <h3>{heading}</h3>\n\
         <table>\n\
         <tr><th>Mean</th><th>Std</th><th>Within 1σ</th><th>Within 2σ</th><th>Within 3σ</th></tr>\n\
         <tr><td>{mean}{unit}</td><td>{std}{unit}</td><td>{w1}%</td><td>{w2}%</td><td>{w3}%</td></tr>\n\
         </table>\n\
         {chart}\n\
         </div>\n",
        heading = escape_html(heading),
        mean = format_number(stats.mean, 3),
        std = format_number(stats.std, 3),
        w1 = format_number(stats.within_std * 100.0, 0),
        w2 = format_number(stats.within_2std * 100.0, 0),
        w3 = format_number(stats.within_3std * 100.0, 0),
    ))
}

/// Rate statistics: mean per window plus the trend chart.
pub(crate) fn rate_stats_block(
    scenario: &str,
    chart_id: &str,
    heading: &str,
    stats: &StandardRateStats,
) -> Result<String, ReportError> {
    let chart = trend_chart(scenario, chart_id, &stats.trend, Some(stats.mean), "")?;
    Ok(format!(
        "<div class=\"metric\">\n\
         <h3>{heading}</h3>\n\
         <p>Mean per window: {mean}</p>\n\
         {chart}\n\
         </div>\n",
        heading = escape_html(heading),
        mean = format_number(stats.mean, 3),
    ))
}
