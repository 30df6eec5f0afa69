use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate;
use crate::data::filter::{ALL_MONTHS, ALL_SEASONS, ALL_YEARS, DayType, Selection};
use crate::data::model::{Month, Season, Year};
use crate::state::AppState;
use crate::ui::{metrics, plot, table};

// ---------------------------------------------------------------------------
// Left side panel – control panel
// ---------------------------------------------------------------------------

/// Render the sidebar selectors and the raw-data toggle.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Control Panel");
    ui.separator();

    let mut filters = state.filters;

    selector(
        ui,
        "Select Year:",
        &mut filters.year,
        &Selection::<Year>::options(),
        |s| s.label(ALL_YEARS),
    );
    selector(
        ui,
        "Select Month:",
        &mut filters.month,
        &Selection::<Month>::options(),
        |s| s.label(ALL_MONTHS),
    );
    selector(
        ui,
        "Select Season:",
        &mut filters.season,
        &Selection::<Season>::options(),
        |s| s.label(ALL_SEASONS),
    );
    selector(
        ui,
        "Select Day Type:",
        &mut filters.day_type,
        DayType::ALL,
        |d| d.to_string(),
    );

    state.set_filters(filters);

    ui.add_space(4.0);
    ui.checkbox(&mut state.show_raw, "Show Raw Data");

    ui.separator();

    ui.strong("About");
    ui.label(
        "Daily and hourly bike rental counts for 2011–2012, split into \
         casual and registered riders.",
    );
}

/// A labelled combo box choosing one of `options`.
fn selector<T, F>(ui: &mut Ui, label: &str, current: &mut T, options: &[T], text: F)
where
    T: Copy + PartialEq,
    F: Fn(&T) -> String,
{
    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(text(current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                ui.selectable_value(current, *opt, text(opt));
            }
        });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Central panel – dashboard
// ---------------------------------------------------------------------------

/// Title, metric cards, optional raw data, and the four chart sections.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Bike Rentals Dashboard").size(28.0).strong())
                .on_hover_text("Dashboard for displaying bike rentals statistics");
            ui.add_space(8.0);

            if state.dataset.is_empty() {
                ui.label("No dataset loaded  (File → Open…)");
                return;
            }

            let day = &state.dataset.day;
            let visible = &state.visible_day;

            metrics::summary_row(ui, &state.summary);
            ui.add_space(12.0);

            if state.show_raw {
                ui.heading("Raw Data");
                ui.strong("Days");
                table::filtered_table(ui, "raw_day", day, visible);
                ui.strong("Hours");
                table::filtered_table(
                    ui,
                    "raw_hour",
                    &state.dataset.hour,
                    &state.visible_hour,
                );
            }

            if state.filters.shows_monthly_trend() {
                ui.heading("by Month");
                let monthly = aggregate::monthly_by_year(day, visible);
                if state.show_raw {
                    table::table(ui, "month_table", &monthly);
                }
                plot::monthly_line_chart(ui, &monthly, &state.palette);
            }

            ui.heading("by Year");
            let yearly = aggregate::yearly_totals(day, visible);
            if state.show_raw {
                table::table(ui, "year_table", &yearly);
            }
            plot::yearly_bar_chart(ui, &yearly, &state.palette);

            ui.heading("by Season");
            let seasonal = aggregate::seasonal_split(day, visible);
            if state.show_raw {
                table::table(ui, "season_table", &seasonal);
            }
            plot::seasonal_stacked_chart(ui, &seasonal, &state.palette);

            ui.heading("by Hour");
            let hourly = aggregate::hourly_peaks(&state.dataset.hour, &state.visible_hour);
            if state.show_raw {
                table::table(ui, "hour_table", &hourly);
            }
            plot::hourly_bar_chart(ui, &hourly, &state.palette);

            ui.add_space(8.0);
            ui.label(RichText::new("Bike sharing data, 2011–2012").small().weak());
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open day data…").clicked() {
                open_file_dialog(state, Table::Day);
                ui.close_menu();
            }
            if ui.button("Open hour data…").clicked() {
                open_file_dialog(state, Table::Hour);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.dataset.is_empty() {
            ui.label(format!(
                "{} days, {} hours loaded; {} days visible",
                state.dataset.day.len(),
                state.dataset.hour.len(),
                state.visible_day.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Table {
    Day,
    Hour,
}

/// Pick a replacement CSV for one table and reload both.
fn open_file_dialog(state: &mut AppState, which: Table) {
    let title = match which {
        Table::Day => "Open day-level rentals",
        Table::Hour => "Open hour-level rentals",
    };
    let file = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match which {
            Table::Day => state.open_day_csv(path),
            Table::Hour => state.open_hour_csv(path),
        }
    }
}
