use eframe::egui::Ui;
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points, uniform_grid_spacer,
};

use crate::color::ChartPalette;
use crate::data::aggregate::{HourKind, HourlyPeak, MonthlyTotal, SeasonSplit, YearlyTotal};
use crate::data::model::{Categorical, Month, Season, Year};

const PLOT_HEIGHT: f32 = 280.0;
const BAR_WIDTH: f64 = 0.6;

/// Static plot frame shared by the four charts: categorical x axis, no
/// panning or zooming.
fn styled(plot: Plot) -> Plot {
    plot.height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// Axis label for the category at an integer grid mark.
fn category_label<C: Categorical>(mark: GridMark) -> String {
    let v = mark.value;
    if v < 0.0 || v.fract() != 0.0 {
        return String::new();
    }
    C::categories()
        .get(v as usize)
        .map(|c| c.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// by Month
// ---------------------------------------------------------------------------

/// One line per year over the months, with markers.
pub fn monthly_line_chart(ui: &mut Ui, data: &[MonthlyTotal], palette: &ChartPalette) {
    styled(Plot::new("by_month"))
        .x_axis_label("Month")
        .y_axis_label("Total Rentals")
        .x_axis_formatter(|mark, _range| category_label::<Month>(mark))
        .show(ui, |plot_ui| {
            for year in Year::ALL {
                let points: Vec<[f64; 2]> = data
                    .iter()
                    .filter(|m| m.year == *year)
                    .map(|m| [m.month.position() as f64, m.total as f64])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let color = palette.years.color_for(year);
                let name = year.to_string();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(&name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&name)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// by Year
// ---------------------------------------------------------------------------

pub fn yearly_bar_chart(ui: &mut Ui, data: &[YearlyTotal], palette: &ChartPalette) {
    styled(Plot::new("by_year"))
        .x_axis_label("year")
        .y_axis_label("total")
        .x_axis_formatter(|mark, _range| category_label::<Year>(mark))
        .show(ui, |plot_ui| {
            for y in data {
                let name = y.year.to_string();
                let bar = Bar::new(y.year.position() as f64, y.total as f64)
                    .width(BAR_WIDTH)
                    .name(&name);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&name)
                        .color(palette.years.color_for(&y.year)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// by Season
// ---------------------------------------------------------------------------

/// Casual riders at the bottom, registered stacked on top.
pub fn seasonal_stacked_chart(ui: &mut Ui, data: &[SeasonSplit], palette: &ChartPalette) {
    styled(Plot::new("by_season"))
        .x_axis_label("season")
        .y_axis_label("value")
        .x_axis_formatter(|mark, _range| category_label::<Season>(mark))
        .show(ui, |plot_ui| {
            let casual = BarChart::new(
                data.iter()
                    .map(|s| {
                        Bar::new(s.season.position() as f64, s.casual as f64)
                            .width(BAR_WIDTH)
                            .name(s.season.to_string())
                    })
                    .collect(),
            )
            .name("casual")
            .color(palette.casual);

            let registered = BarChart::new(
                data.iter()
                    .map(|s| {
                        Bar::new(s.season.position() as f64, s.registered as f64)
                            .width(BAR_WIDTH)
                            .name(s.season.to_string())
                    })
                    .collect(),
            )
            .name("registered")
            .color(palette.registered)
            .stack_on(&[&casual]);

            plot_ui.bar_chart(casual);
            plot_ui.bar_chart(registered);
        });
}

// ---------------------------------------------------------------------------
// by Hour
// ---------------------------------------------------------------------------

/// Maximum rentals per hour, peak hours highlighted.
pub fn hourly_bar_chart(ui: &mut Ui, data: &[HourlyPeak], palette: &ChartPalette) {
    styled(Plot::new("by_hour"))
        .x_axis_label("Hour")
        .y_axis_label("Total Rentals")
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{}", mark.value)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for kind in [HourKind::Normal, HourKind::Peak] {
                let bars: Vec<Bar> = data
                    .iter()
                    .filter(|h| h.kind == kind)
                    .map(|h| {
                        Bar::new(h.hour.value() as f64, h.max as f64)
                            .width(BAR_WIDTH)
                            .name(h.hour.to_string())
                    })
                    .collect();
                if bars.is_empty() {
                    continue;
                }
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(kind.to_string())
                        .color(palette.hour_kind(kind)),
                );
            }
        });
}
