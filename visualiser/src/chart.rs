use crate::format::format_number;
use thiserror::Error;

const MARGIN_TOP: f64 = 25.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 20.0;
const MARGIN_LEFT: f64 = 60.0;
/// Horizontal pixels allocated to each sample
const POINT_WIDTH: f64 = 40.0;
/// Nominal chart height including margins
const CHART_HEIGHT: f64 = 120.0;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("cannot lay out a chart for an empty series")]
    EmptySeries,
    #[error("series sample {index} is not a finite number")]
    NonFiniteSample { index: usize },
    #[error("window duration must start with digits: {0:?}")]
    InvalidWindowDuration(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabels {
    /// Largest sample, formatted, shown at the top of the y-axis
    pub y_max: String,
    /// The fixed zero baseline label
    pub y_min: String,
    pub x_start: String,
    pub x_end: String,
}

/// Pixel-space geometry for one trend chart
///
/// Derived per render and never persisted. Knows nothing about how it will be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    /// Top of the y-domain: the largest sample plus 5% headroom
    pub y_max: f64,
    pub points: Vec<Point>,
    pub line_path: String,
    pub area_path: String,
    pub mean_y: Option<f64>,
    pub axis_labels: AxisLabels,
}

/// Compute the geometry for a trend chart from a series of per-window samples.
///
/// The y-scale is zero-based regardless of the smallest sample, so the chart communicates
/// absolute magnitude rather than relative variation. `window_duration` is the size of one
/// sample window as digits plus a unit suffix, e.g. `"10s"`; `unit` is suffixed to the
/// y-axis labels.
pub fn layout(
    series: &[f64],
    mean: Option<f64>,
    window_duration: &str,
    unit: &str,
) -> Result<ChartGeometry, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    if let Some(index) = series.iter().position(|v| !v.is_finite()) {
        return Err(ChartError::NonFiniteSample { index });
    }
    let (duration_value, duration_unit) = split_window_duration(window_duration)?;

    let width = series.len() as f64 * POINT_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let max_val = series.iter().copied().fold(f64::MIN, f64::max);
    let y_max = max_val * 1.05;

    // A single sample has no horizontal extent; an all-zero series sits on the baseline.
    let x = |i: usize| {
        if series.len() == 1 {
            0.0
        } else {
            i as f64 / (series.len() - 1) as f64 * width
        }
    };
    let y = |v: f64| {
        if y_max <= 0.0 {
            height
        } else {
            height - (v / y_max) * height
        }
    };

    let points = series
        .iter()
        .enumerate()
        .map(|(i, &v)| Point { x: x(i), y: y(v) })
        .collect::<Vec<_>>();

    let line_path = line_path(&points);
    let area_path = area_path(&points, width, height);
    let mean_y = mean.filter(|m| m.is_finite()).map(y);

    let axis_labels = AxisLabels {
        y_max: format!("{}{}", format_number(max_val, 3), unit),
        y_min: format!("0{unit}"),
        x_start: format!("0{duration_unit}"),
        x_end: format!(
            "{}{}",
            format_number(duration_value * series.len() as f64, 3),
            duration_unit
        ),
    };

    Ok(ChartGeometry {
        width,
        height,
        y_max,
        points,
        line_path,
        area_path,
        mean_y,
        axis_labels,
    })
}

/// Lay out a trend chart and paint it as an inline SVG fragment.
pub fn trend_svg(
    svg_id: &str,
    series: &[f64],
    mean: Option<f64>,
    window_duration: &str,
    unit: &str,
) -> Result<String, ChartError> {
    let geometry = layout(series, mean, window_duration, unit)?;
    Ok(render_trend_svg(svg_id, &geometry))
}

/// Paint a [ChartGeometry] as an `<svg>` element.
pub fn render_trend_svg(svg_id: &str, geometry: &ChartGeometry) -> String {
    let outer_width = geometry.width + MARGIN_LEFT + MARGIN_RIGHT;
    let outer_height = geometry.height + MARGIN_TOP + MARGIN_BOTTOM;

    let mean_line = match geometry.mean_y {
        Some(mean_y) => format!(
            "<line class=\"mean-line\" x1=\"0\" x2=\"{}\" y1=\"{}\" y2=\"{}\"/>\n",
            coord(geometry.width),
            coord(mean_y),
            coord(mean_y),
        ),
        None => String::new(),
    };

    format!(
        "<svg id=\"{svg_id}\" class=\"trend\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
         <g transform=\"translate({left},{top})\">\n\
         <path class=\"trend-area\" d=\"{area}\"/>\n\
         <path class=\"trend-line\" d=\"{line}\"/>\n\
         {mean_line}\
         <text class=\"axis-label\" x=\"-5\" y=\"0\" text-anchor=\"end\" dominant-baseline=\"middle\">{y_max}</text>\n\
         <text class=\"axis-label\" x=\"-5\" y=\"{height}\" text-anchor=\"end\" dominant-baseline=\"middle\">{y_min}</text>\n\
         <text class=\"axis-label\" x=\"0\" y=\"{x_label_y}\" text-anchor=\"start\">{x_start}</text>\n\
         <text class=\"axis-label\" x=\"{width}\" y=\"{x_label_y}\" text-anchor=\"end\">{x_end}</text>\n\
         </g>\n\
         </svg>",
        w = coord(outer_width),
        h = coord(outer_height),
        left = coord(MARGIN_LEFT),
        top = coord(MARGIN_TOP),
        area = geometry.area_path,
        line = geometry.line_path,
        height = coord(geometry.height),
        width = coord(geometry.width),
        x_label_y = coord(geometry.height + 15.0),
        y_max = geometry.axis_labels.y_max,
        y_min = geometry.axis_labels.y_min,
        x_start = geometry.axis_labels.x_start,
        x_end = geometry.axis_labels.x_end,
    )
}

/// Split a window duration like `"10s"` into its numeric value and unit suffix.
fn split_window_duration(window_duration: &str) -> Result<(f64, &str), ChartError> {
    let digits_end = window_duration
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(window_duration.len());
    let (digits, unit) = window_duration.split_at(digits_end);
    let value = digits
        .parse::<u64>()
        .map_err(|_| ChartError::InvalidWindowDuration(window_duration.to_string()))?;
    Ok((value as f64, unit))
}

fn line_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{command}{},{}", coord(point.x), coord(point.y)));
    }
    path
}

/// The filled area under the line: same top edge, closed to the baseline at both ends.
fn area_path(points: &[Point], width: f64, height: f64) -> String {
    let mut path = format!("M0,{}", coord(height));
    for point in points {
        path.push_str(&format!("L{},{}", coord(point.x), coord(point.y)));
    }
    path.push_str(&format!("L{},{}Z", coord(width), coord(height)));
    path
}

/// Render a pixel coordinate with up to two decimal places and no trailing zeros.
fn coord(v: f64) -> String {
    let rendered = format!("{v:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn y_domain_has_five_percent_headroom() {
        let geometry = layout(&[1.0, 2.0, 3.0, 4.0, 5.0], None, "10s", "s").unwrap();
        assert!((geometry.y_max - 5.25).abs() < 1e-12);
    }

    #[test]
    fn width_scales_with_the_number_of_samples() {
        let geometry = layout(&[1.0, 2.0, 3.0, 4.0, 5.0], None, "10s", "s").unwrap();
        assert_eq!(5.0 * 40.0 - 60.0 - 20.0, geometry.width);
        assert_eq!(0.0, geometry.points[0].x);
        assert_eq!(geometry.width, geometry.points.last().unwrap().x);
    }

    #[test]
    fn axis_labels_cover_the_whole_run() {
        let geometry = layout(&[1.0, 2.0, 3.0, 4.0, 5.0], None, "10s", "s").unwrap();
        assert_eq!("5s", geometry.axis_labels.y_max);
        assert_eq!("0s", geometry.axis_labels.y_min);
        assert_eq!("0s", geometry.axis_labels.x_start);
        assert_eq!("50s", geometry.axis_labels.x_end);
    }

    #[test]
    fn mean_at_the_top_of_the_domain_maps_to_zero() {
        let geometry = layout(&[1.0, 2.0, 3.0, 4.0, 5.0], Some(5.25), "10s", "s").unwrap();
        let mean_y = geometry.mean_y.unwrap();
        assert!(mean_y.abs() < 1e-9, "expected ~0, got {mean_y}");
    }

    #[test]
    fn baseline_is_zero_not_the_smallest_sample() {
        let geometry = layout(&[10.0, 10.5, 11.0], None, "10s", "ms").unwrap();
        // Every point sits well above the baseline because the domain starts at 0.
        for point in &geometry.points {
            assert!(point.y < geometry.height * 0.15);
        }
    }

    #[test]
    fn an_all_zero_series_draws_on_the_baseline() {
        let geometry = layout(&[0.0, 0.0, 0.0], None, "10s", "").unwrap();
        for point in &geometry.points {
            assert_eq!(geometry.height, point.y);
        }
    }

    #[test]
    fn a_single_sample_is_pinned_to_the_left_edge() {
        let geometry = layout(&[3.0], None, "10s", "s").unwrap();
        assert_eq!(1, geometry.points.len());
        assert_eq!(0.0, geometry.points[0].x);
        assert_eq!("10s", geometry.axis_labels.x_end);
    }

    #[test]
    fn paths_share_the_top_edge_and_close_to_the_baseline() {
        let geometry = layout(&[1.0, 2.0, 3.0], None, "10s", "s").unwrap();
        assert!(geometry.line_path.starts_with('M'));
        assert!(geometry.area_path.starts_with("M0,75"));
        assert!(geometry.area_path.ends_with(&format!(
            "L{},75Z",
            super::coord(geometry.width)
        )));
        // The area's middle section is the line path's edge.
        assert!(geometry
            .area_path
            .contains(&geometry.line_path.replacen('M', "L", 1)));
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            layout(&[], None, "10s", "s"),
            Err(ChartError::EmptySeries)
        ));
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        assert!(matches!(
            layout(&[1.0, f64::NAN], None, "10s", "s"),
            Err(ChartError::NonFiniteSample { index: 1 })
        ));
    }

    #[test]
    fn window_duration_must_lead_with_digits() {
        assert!(matches!(
            layout(&[1.0], None, "s10", "s"),
            Err(ChartError::InvalidWindowDuration(_))
        ));
        let (value, unit) = split_window_duration("90m").unwrap();
        assert_eq!(90.0, value);
        assert_eq!("m", unit);
    }

    #[test]
    fn svg_carries_the_geometry_classes() {
        let svg = trend_svg("chart-1", &[1.0, 2.0, 3.0], Some(2.0), "10s", "s").unwrap();
        assert!(svg.starts_with("<svg id=\"chart-1\""));
        assert!(svg.contains("class=\"trend-area\""));
        assert!(svg.contains("class=\"trend-line\""));
        assert!(svg.contains("class=\"mean-line\""));
        assert!(svg.contains(">30s</text>"));
    }

    #[test]
    fn svg_omits_the_mean_line_without_a_mean() {
        let svg = trend_svg("chart-2", &[1.0, 2.0, 3.0], None, "10s", "s").unwrap();
        assert!(!svg.contains("mean-line"));
    }
}
