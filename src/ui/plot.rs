use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::ColorMap;
use crate::data::chart::ChartData;

const CHART_HEIGHT: f32 = 320.0;
/// egui_plot only fills convex polygons, so slices are drawn in pieces no
/// wider than a quarter turn.
const MAX_SEGMENT: f64 = FRAC_PI_2;
const ARC_STEP: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Destination share (pie chart)
// ---------------------------------------------------------------------------

/// Pie chart of rows per destination, starting at 12 o'clock and running
/// counter-clockwise, each slice labelled with its percentage.
pub fn destination_pie(ui: &mut Ui, charts: &ChartData, color_map: Option<&ColorMap>) {
    let total = charts.destination_total();

    Plot::new("destination_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let mut start = FRAC_PI_2;
            for slice in &charts.destinations {
                let sweep = TAU * slice.count as f64 / total as f64;
                let name = slice.value.to_string();
                let color = color_map
                    .map(|cm| cm.color_for(&slice.value))
                    .unwrap_or(Color32::LIGHT_BLUE);

                for points in slice_segments(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(points))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    format!("{:.1}%", slice.share(total)),
                ));
                start += sweep;
            }
        });
}

/// Convex pieces of a unit-circle sector, each as a closed outline starting
/// at the centre.
fn slice_segments(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_SEGMENT).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;
    (0..pieces)
        .map(|p| {
            let a0 = start + piece_sweep * p as f64;
            let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = a0 + piece_sweep * s as f64 / steps as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rating counts (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of tourists per rating, ordered by rating.
pub fn rating_bars(ui: &mut Ui, charts: &ChartData) {
    let labels: Vec<String> = charts.ratings.iter().map(|c| c.value.to_string()).collect();
    let bars: Vec<Bar> = charts
        .ratings
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(c.value.to_string())
                .width(0.6)
        })
        .collect();

    Plot::new("rating_bars")
        .height(CHART_HEIGHT)
        .x_axis_label("Rating")
        .y_axis_label("Number of Tourists")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Tourists")
                    .color(Color32::from_rgb(70, 130, 180)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_slices_are_split_into_convex_pieces() {
        let pieces = slice_segments(0.0, TAU * 0.7);
        assert_eq!(pieces.len(), 3);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            assert!(piece.len() >= 3);
        }
    }

    #[test]
    fn thin_slice_is_one_piece() {
        assert_eq!(slice_segments(1.0, 0.01).len(), 1);
    }
}
