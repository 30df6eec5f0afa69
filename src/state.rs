use std::path::PathBuf;

use crate::color::ChartPalette;
use crate::data::aggregate::{self, Summary};
use crate::data::filter::{FilterState, filter_chain, filtered_indices};
use crate::data::model::RentalDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded tables (empty until a load succeeds).
    pub dataset: RentalDataset,

    /// Where the current tables came from. A failed File → Open leaves them
    /// pointing at the last files that loaded.
    pub day_path: PathBuf,
    pub hour_path: PathBuf,

    /// Sidebar selections.
    pub filters: FilterState,

    /// Indices of day / hour rows passing the current filters (cached).
    pub visible_day: Vec<usize>,
    pub visible_hour: Vec<usize>,

    /// Metric cards for the visible day rows (cached with the indices).
    pub summary: Summary,

    /// "Show Raw Data" checkbox.
    pub show_raw: bool,

    pub palette: ChartPalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(day_path: PathBuf, hour_path: PathBuf) -> Self {
        Self {
            dataset: RentalDataset::default(),
            day_path,
            hour_path,
            filters: FilterState::default(),
            visible_day: Vec::new(),
            visible_hour: Vec::new(),
            summary: Summary::default(),
            show_raw: false,
            palette: ChartPalette::default(),
            status_message: None,
        }
    }

    /// Ingest newly loaded tables and recompute the visible rows.
    pub fn set_dataset(&mut self, dataset: RentalDataset) {
        log::info!(
            "Loaded {} day rows and {} hour rows",
            dataset.day.len(),
            dataset.hour.len()
        );
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Load both tables from `day_path` / `hour_path`. On failure the
    /// previous tables stay in place and the error is surfaced in the UI.
    /// Returns whether the load succeeded.
    pub fn reload(&mut self) -> bool {
        match crate::data::loader::load_dataset(&self.day_path, &self.hour_path) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                true
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    /// Swap in a new day-level CSV. The previous path is kept if it fails to load.
    pub fn open_day_csv(&mut self, path: PathBuf) {
        let previous = std::mem::replace(&mut self.day_path, path);
        if !self.reload() {
            self.day_path = previous;
        }
    }

    /// Swap in a new hour-level CSV. The previous path is kept if it fails to load.
    pub fn open_hour_csv(&mut self, path: PathBuf) {
        let previous = std::mem::replace(&mut self.hour_path, path);
        if !self.reload() {
            self.hour_path = previous;
        }
    }

    /// Recompute visible indices after a selection change.
    pub fn refilter(&mut self) {
        let chain = filter_chain(&self.dataset.day, &self.filters);
        log::debug!(
            "Filters {:?}: day rows per stage {:?}",
            self.filters,
            chain.stage_counts(self.dataset.day.len())
        );
        self.visible_day = chain.into_indices();
        self.visible_hour = filtered_indices(&self.dataset.hour, &self.filters);
        self.summary = aggregate::summarize(&self.dataset.day, &self.visible_day);
    }

    /// Replace the sidebar selections, refiltering only on change.
    pub fn set_filters(&mut self, filters: FilterState) {
        if filters != self.filters {
            self.filters = filters;
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{DayType, Selection};
    use crate::data::model::{DayRecord, Month, Rentals, Season, Year};

    fn state() -> AppState {
        let mut state = AppState::new("missing-day.csv".into(), "missing-hour.csv".into());
        let row = |year, working_day, total| DayRecord {
            date: NaiveDate::from_ymd_opt(2011, 3, 1).unwrap(),
            season: Season::Spring,
            year,
            month: Month::Mar,
            weather: None,
            working_day,
            rentals: Rentals { casual: 0, registered: total, total },
        };
        state.set_dataset(RentalDataset::new(
            vec![
                row(Year::Y2011, true, 10),
                row(Year::Y2011, false, 20),
                row(Year::Y2012, true, 40),
            ],
            Vec::new(),
        ));
        state
    }

    #[test]
    fn new_dataset_shows_every_row() {
        let state = state();
        assert_eq!(state.visible_day, vec![0, 1, 2]);
        assert_eq!(state.summary.total, 70);
    }

    #[test]
    fn changing_filters_updates_summary() {
        let mut state = state();
        state.set_filters(FilterState {
            year: Selection::Only(Year::Y2011),
            day_type: DayType::WorkingDays,
            ..FilterState::default()
        });
        assert_eq!(state.visible_day, vec![0]);
        assert_eq!(state.summary.total, 10);
    }

    #[test]
    fn failed_reload_keeps_previous_tables() {
        let mut state = state();
        state.reload();
        assert_eq!(state.dataset.day.len(), 3);
        let msg = state.status_message.as_deref().unwrap_or_default();
        assert!(msg.contains("missing-day.csv"), "{msg}");
    }

    const DAY_CSV: &str = "date,season,year,month,workingday,casual,registered,total\n\
                           2011-01-03,Spring,2011,Jan,1,120,1229,1349\n";
    const HOUR_CSV: &str = "date,season,year,month,hour,workingday,casual,registered,total\n\
                            2011-01-03,Spring,2011,Jan,8,5,95,100\n";

    #[test]
    fn failed_open_restores_previous_path() {
        let dir = tempfile::tempdir().unwrap();
        let day_path = dir.path().join("day_data.csv");
        let hour_path = dir.path().join("hour_data.csv");
        std::fs::write(&day_path, DAY_CSV).unwrap();
        std::fs::write(&hour_path, HOUR_CSV).unwrap();

        let mut state = AppState::new(day_path.clone(), hour_path.clone());
        assert!(state.reload());
        assert_eq!(state.dataset.hour.len(), 1);

        let broken = dir.path().join("broken.csv");
        std::fs::write(&broken, "date,season\n2011-01-03,Monsoon\n").unwrap();

        state.open_day_csv(broken.clone());
        assert_eq!(state.day_path, day_path);
        assert!(state.status_message.is_some());

        state.open_hour_csv(broken);
        assert_eq!(state.hour_path, hour_path);

        // The restored paths still load.
        assert!(state.reload());
        assert!(state.status_message.is_none());
        assert_eq!(state.dataset.day.len(), 1);
    }

    #[test]
    fn successful_open_switches_path() {
        let dir = tempfile::tempdir().unwrap();
        let day_path = dir.path().join("day_data.csv");
        let hour_path = dir.path().join("hour_data.csv");
        let other = dir.path().join("other_day.csv");
        std::fs::write(&day_path, DAY_CSV).unwrap();
        std::fs::write(&hour_path, HOUR_CSV).unwrap();
        std::fs::write(&other, DAY_CSV).unwrap();

        let mut state = AppState::new(day_path, hour_path);
        state.open_day_csv(other.clone());
        assert_eq!(state.day_path, other);
        assert_eq!(state.dataset.day.len(), 1);
    }
}
