//! Chart construction and SVG rendering
//!
//! A [`ChartSpec`] is built from the filled trajectory after the solver
//! returns and rendered with plotters into an SVG string for the viewer.

use std::ops::Range;

use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::ranged1d::Ranged;
use plotters::drawing::IntoDrawingArea;
use plotters::element::PathElement;
use plotters::prelude::SVGBackend;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, RGBColor};

use crate::error::DriverError;
use crate::scenario::Scenario;
use crate::trajectory::Trajectory;

const FONT_SIZE_TITLE: i32 = 22;
const FONT_SIZE_AXIS_LABEL: i32 = 16;
const FONT_SIZE_LEGEND: i32 = 14;
const LINE_WIDTH: u32 = 2;

/// Grid lines per axis (hint for the key points)
const GRID_LINES: usize = 10;

/// Points drawn per series; longer series are strided down
pub const MAX_POINTS_PER_SERIES: usize = 5000;

const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
    pub legend: bool,
}

/// Chart title: `"<library file name>: <symbol>"`
pub fn chart_title(library_name: &str, symbol: &str) -> String {
    format!("{}: {}", library_name, symbol)
}

/// Pad a value range, with a fixed padding for very small ranges.
fn padded_range(min_val: f64, max_val: f64, ratio: f64) -> Range<f64> {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = max - min;
    let padding = if range < 1e-12 { 0.5 } else { range * ratio };
    (min - padding)..(max + padding)
}

/// Keep every n-th point so at most `max_points` remain, always keeping the last one.
pub fn decimate(points: &[(f64, f64)], max_points: usize) -> Vec<(f64, f64)> {
    if points.len() <= max_points || max_points < 2 {
        return points.to_vec();
    }
    let stride = points.len().div_ceil(max_points - 1);
    let mut out: Vec<(f64, f64)> = points.iter().step_by(stride).copied().collect();
    if let Some(last) = points.last() {
        if out.last() != Some(last) {
            out.push(*last);
        }
    }
    out
}

fn render_err<E: std::fmt::Display>(e: E) -> DriverError {
    DriverError::Render(e.to_string())
}

impl ChartSpec {
    pub fn from_trajectory(scenario: &Scenario, library_name: &str, trajectory: &Trajectory) -> Self {
        let series: Vec<PlotSeries> = scenario
            .series
            .iter()
            .map(|s| PlotSeries {
                label: s.label.to_string(),
                points: trajectory.points(s.x, s.y),
            })
            .collect();

        ChartSpec {
            title: chart_title(library_name, scenario.symbol),
            x_label: scenario.x_label.to_string(),
            y_label: scenario.y_label.to_string(),
            legend: series.len() > 1 || series.iter().any(|s| !s.label.is_empty()),
            series,
        }
    }

    /// Value ranges over all finite samples
    pub fn ranges(&self) -> (Range<f64>, Range<f64>) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for &(x, y) in self.series.iter().flat_map(|s| s.points.iter()) {
            if x.is_finite() && y.is_finite() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        if x_min > x_max {
            return (0.0..1.0, 0.0..1.0);
        }
        (padded_range(x_min, x_max, 0.0), padded_range(y_min, y_max, 0.05))
    }

    /// Render to an SVG document of `width x height` pixels
    pub fn render_svg(&self, width: u32, height: u32) -> Result<String, DriverError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let (x_range, y_range) = self.ranges();
            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, ("sans-serif", FONT_SIZE_TITLE))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(65)
                .build_cartesian_2d(x_range.clone(), y_range.clone())
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(GRID_LINES)
                .y_labels(GRID_LINES)
                .x_desc(self.x_label.as_str())
                .y_desc(self.y_label.as_str())
                .axis_desc_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
                .draw()
                .map_err(render_err)?;

            // Dotted grid at the same key points the axis labels use
            let grid_style = BLACK.mix(0.3).stroke_width(1);
            let x_keys = chart.as_coord_spec().x_spec().key_points(GRID_LINES);
            let y_keys = chart.as_coord_spec().y_spec().key_points(GRID_LINES);
            for x in x_keys {
                chart
                    .draw_series(DashedLineSeries::new(
                        vec![(x, y_range.start), (x, y_range.end)],
                        1,
                        4,
                        grid_style,
                    ))
                    .map_err(render_err)?;
            }
            for y in y_keys {
                chart
                    .draw_series(DashedLineSeries::new(
                        vec![(x_range.start, y), (x_range.end, y)],
                        1,
                        4,
                        grid_style,
                    ))
                    .map_err(render_err)?;
            }

            for (idx, series) in self.series.iter().enumerate() {
                let color = PALETTE[idx % PALETTE.len()];
                let points: Vec<(f64, f64)> = decimate(&series.points, MAX_POINTS_PER_SERIES)
                    .into_iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .collect();

                let drawn = chart
                    .draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH)))
                    .map_err(render_err)?;
                if self.legend {
                    drawn.label(series.label.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                    });
                }
            }

            if self.legend {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .label_font(("sans-serif", FONT_SIZE_LEGEND))
                    .draw()
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario;

    fn filled(scenario: &Scenario) -> Trajectory {
        let mut tr = Trajectory::allocate(scenario);
        for i in 1..tr.steps() {
            tr.set(i, 0, i as f64 * scenario.dt);
            for c in 1..tr.column_count() {
                tr.set(i, c, (i as f64 * scenario.dt * c as f64).sin());
            }
        }
        tr
    }

    #[test]
    fn test_title_and_labels() {
        let tr = filled(&scenario::TWO_STATE_B);
        let chart = ChartSpec::from_trajectory(&scenario::TWO_STATE_B, "librk4.so", &tr);
        assert_eq!(chart.title, "librk4.so: solve2_2");
        assert_eq!(chart.x_label, "time");
        assert_eq!(chart.y_label, "value");
        assert_eq!(chart.series.len(), 2);
        assert!(chart.legend);
        assert_eq!(chart.series[0].points[0], (0.0, 10.0));
        assert_eq!(chart.series[1].label, "y");
    }

    #[test]
    fn test_trig_series_use_time_column() {
        let tr = filled(&scenario::TRIG);
        let chart = ChartSpec::from_trajectory(&scenario::TRIG, "rk4.dll", &tr);
        assert_eq!(chart.series[0].label, "sin");
        assert_eq!(chart.series[1].points[0], (0.0, 1.0));
        assert_eq!(chart.series[1].points.len(), 5000);
    }

    #[test]
    fn test_ranges_skip_non_finite() {
        let chart = ChartSpec {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            series: vec![PlotSeries {
                label: "x".into(),
                points: vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0)],
            }],
            legend: false,
        };
        let (x, y) = chart.ranges();
        assert_eq!(x, 0.0..2.0);
        assert!(y.start < 1.0 && y.end > 3.0);
    }

    #[test]
    fn test_degenerate_range_is_padded() {
        assert_eq!(padded_range(2.0, 2.0, 0.05), 1.5..2.5);
        let r = padded_range(4.0, 0.0, 0.0);
        assert_eq!(r, 0.0..4.0);
    }

    #[test]
    fn test_decimate_keeps_endpoints() {
        let pts: Vec<(f64, f64)> = (0..500_000).map(|i| (i as f64, 0.0)).collect();
        let out = decimate(&pts, MAX_POINTS_PER_SERIES);
        assert!(out.len() <= MAX_POINTS_PER_SERIES + 1);
        assert_eq!(out.first(), pts.first());
        assert_eq!(out.last(), pts.last());

        let short = vec![(0.0, 0.0), (1.0, 1.0)];
        assert_eq!(decimate(&short, MAX_POINTS_PER_SERIES), short);
    }

    #[test]
    fn test_render_svg() {
        let tr = filled(&scenario::TWO_STATE_A);
        let chart = ChartSpec::from_trajectory(&scenario::TWO_STATE_A, "librk4.so", &tr);
        let svg = chart.render_svg(800, 600).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("librk4.so: solve2_1"));
        assert!(svg.contains("time"));
        assert!(svg.contains("value"));

        // One legend entry per series
        assert!(svg.contains(">x<"));
        assert!(svg.contains(">y<"));

        // Dotted grid: every dash is its own element at 30% black
        let grid_dashes = svg.matches("opacity=\"0.3\"").count();
        assert!(grid_dashes > 2 * GRID_LINES, "only {grid_dashes} grid dashes");
    }

    #[test]
    fn test_render_without_legend() {
        let tr = filled(&scenario::TWO_STATE_A);
        let mut chart = ChartSpec::from_trajectory(&scenario::TWO_STATE_A, "librk4.so", &tr);
        chart.legend = false;

        let svg = chart.render_svg(800, 600).unwrap();
        assert!(!svg.contains(">x<"));
        assert!(!svg.contains(">y<"));
        assert!(svg.contains("librk4.so: solve2_1"));
    }

    #[test]
    fn test_render_all_zero_chart() {
        let tr = Trajectory::allocate(&scenario::SINGLE);
        let chart = ChartSpec::from_trajectory(&scenario::SINGLE, "librk4.so", &tr);
        assert!(chart.render_svg(640, 480).is_ok());
    }
}
