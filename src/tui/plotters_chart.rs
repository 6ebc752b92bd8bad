//! Plotters-powered chart widgets for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`. Both widgets are data-driven: all series and
//! bounds are computed outside the render call, so the data prep is testable
//! without a terminal.

use plotters::prelude::*;
// `ratatui::style::Color` below shadows the `plotters` `Color` trait from the
// prelude glob; re-import the trait anonymously so `.filled()` resolves.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Scatter chart of (package size, price) observations.
pub struct ScatterChart<'a> {
    pub points: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl Widget for ScatterChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // We disable the mesh lines to reduce visual clutter in
            // low-resolution terminal rendering; axes + labels are enough.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // A `Pixel` per observation: in terminal resolution a one-cell
            // dot reads better than circle markers.
            let point_color = RGBColor(0, 255, 255);
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), point_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Vertical histogram over pre-bucketed data.
///
/// Buckets are computed by `report::series::package_size_histogram`; this
/// widget only draws labels and counts.
pub struct HistogramChart<'a> {
    pub labels: &'a [String],
    pub values: &'a [f64],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.values.len();
        if n == 0 {
            buf.set_string(
                area.x,
                area.y,
                "No data.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let y_max = self
            .values
            .iter()
            .copied()
            .fold(0.0_f64, f64::max)
            .max(1.0);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max * 1.1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(n.min(8))
                .y_labels(5)
                .x_label_formatter(&|v| match v {
                    SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                        self.labels.get(*i).cloned().unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(RGBColor(0, 255, 255).filled())
                    .margin(1)
                    .data(self.values.iter().enumerate().map(|(i, v)| (i, *v))),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
