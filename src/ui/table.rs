use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{HourlyPeak, MonthlyTotal, SeasonSplit, YearlyTotal};
use crate::data::model::{DayRecord, HourRecord};

const ROW_HEIGHT: f32 = 18.0;
const MAX_HEIGHT: f32 = 240.0;

/// A row that can be shown in a raw-data table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Table of the rows selected by `indices`.
pub fn filtered_table<T: TableRow>(ui: &mut Ui, id: &str, rows: &[T], indices: &[usize]) {
    render(ui, id, T::HEADERS, indices.len(), |i| rows[indices[i]].cells());
}

/// Table of every row, used for the per-chart aggregates.
pub fn table<T: TableRow>(ui: &mut Ui, id: &str, rows: &[T]) {
    render(ui, id, T::HEADERS, rows.len(), |i| rows[i].cells());
}

fn render<F>(ui: &mut Ui, id: &str, headers: &[&str], len: usize, cells: F)
where
    F: Fn(usize) -> Vec<String>,
{
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_HEIGHT)
            .columns(Column::auto().at_least(60.0), headers.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, len, |mut row| {
                    for cell in cells(row.index()) {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
    ui.add_space(8.0);
}

fn weather_cell(w: Option<impl ToString>) -> String {
    w.map(|w| w.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Row layouts
// ---------------------------------------------------------------------------

impl TableRow for DayRecord {
    const HEADERS: &'static [&'static str] = &[
        "date", "season", "year", "month", "weather", "workingday", "casual", "registered",
        "total",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.season.to_string(),
            self.year.to_string(),
            self.month.to_string(),
            weather_cell(self.weather),
            u8::from(self.working_day).to_string(),
            self.rentals.casual.to_string(),
            self.rentals.registered.to_string(),
            self.rentals.total.to_string(),
        ]
    }
}

impl TableRow for HourRecord {
    const HEADERS: &'static [&'static str] = &[
        "date", "hour", "season", "year", "month", "weather", "workingday", "casual",
        "registered", "total",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.hour.to_string(),
            self.season.to_string(),
            self.year.to_string(),
            self.month.to_string(),
            weather_cell(self.weather),
            u8::from(self.working_day).to_string(),
            self.rentals.casual.to_string(),
            self.rentals.registered.to_string(),
            self.rentals.total.to_string(),
        ]
    }
}

impl TableRow for MonthlyTotal {
    const HEADERS: &'static [&'static str] = &["year", "month", "total"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.to_string(),
            self.total.to_string(),
        ]
    }
}

impl TableRow for YearlyTotal {
    const HEADERS: &'static [&'static str] = &["year", "total"];

    fn cells(&self) -> Vec<String> {
        vec![self.year.to_string(), self.total.to_string()]
    }
}

impl TableRow for SeasonSplit {
    const HEADERS: &'static [&'static str] = &["season", "casual", "registered"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.season.to_string(),
            self.casual.to_string(),
            self.registered.to_string(),
        ]
    }
}

impl TableRow for HourlyPeak {
    const HEADERS: &'static [&'static str] = &["hour", "max", "type"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.hour.to_string(),
            self.max.to_string(),
            self.kind.to_string(),
        ]
    }
}
