use std::fmt;

use super::model::{Categorical, Month, RentalRecord, Season, Year};

// ---------------------------------------------------------------------------
// Sidebar selections
// ---------------------------------------------------------------------------

/// A single-choice selector: either the "All …" entry or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: Categorical> Selection<T> {
    /// The "All …" entry followed by every category in order.
    pub fn options() -> Vec<Selection<T>> {
        std::iter::once(Selection::All)
            .chain(T::categories().into_iter().map(Selection::Only))
            .collect()
    }

    pub fn label(&self, all_label: &str) -> String {
        match self {
            Selection::All => all_label.to_string(),
            Selection::Only(v) => v.to_string(),
        }
    }
}

/// Day-type selector, matched against the `workingday` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayType {
    #[default]
    AllDays,
    WorkingDays,
    Holidays,
}

impl DayType {
    pub const ALL: &'static [DayType] = &[DayType::AllDays, DayType::WorkingDays, DayType::Holidays];

    pub fn matches(&self, working_day: bool) -> bool {
        match self {
            DayType::AllDays => true,
            DayType::WorkingDays => working_day,
            DayType::Holidays => !working_day,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayType::AllDays => "All Days",
            DayType::WorkingDays => "Working Days",
            DayType::Holidays => "Holidays",
        })
    }
}

/// Labels of the "All …" entries.
pub const ALL_YEARS: &str = "All Years";
pub const ALL_MONTHS: &str = "All Months";
pub const ALL_SEASONS: &str = "All Seasons";

/// Current sidebar selections. The default selects everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub year: Selection<Year>,
    pub month: Selection<Month>,
    pub season: Selection<Season>,
    pub day_type: DayType,
}

impl FilterState {
    /// The month-by-month trend only makes sense across months.
    pub fn shows_monthly_trend(&self) -> bool {
        self.month.is_all()
    }
}

// ---------------------------------------------------------------------------
// Filter chain
// ---------------------------------------------------------------------------

/// Surviving row indices after each stage, applied in sidebar order:
/// year, month, season, day type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    pub by_year: Vec<usize>,
    pub by_month: Vec<usize>,
    pub by_season: Vec<usize>,
    pub by_day_type: Vec<usize>,
}

impl FilterChain {
    /// Row counts per stage, first entry is the unfiltered count.
    pub fn stage_counts(&self, total: usize) -> [usize; 5] {
        [
            total,
            self.by_year.len(),
            self.by_month.len(),
            self.by_season.len(),
            self.by_day_type.len(),
        ]
    }

    /// Indices passing every stage.
    pub fn into_indices(self) -> Vec<usize> {
        self.by_day_type
    }
}

/// Run every stage over `rows`. Each stage only looks at the survivors of the
/// previous one, so the index lists can only shrink.
pub fn filter_chain<R: RentalRecord>(rows: &[R], filters: &FilterState) -> FilterChain {
    let by_year = narrow(rows, 0..rows.len(), |r| filters.year.matches(&r.year()));
    let by_month = narrow(rows, by_year.iter().copied(), |r| {
        filters.month.matches(&r.month())
    });
    let by_season = narrow(rows, by_month.iter().copied(), |r| {
        filters.season.matches(&r.season())
    });
    let by_day_type = narrow(rows, by_season.iter().copied(), |r| {
        filters.day_type.matches(r.working_day())
    });

    FilterChain {
        by_year,
        by_month,
        by_season,
        by_day_type,
    }
}

/// Return indices of rows that pass all active filters.
pub fn filtered_indices<R: RentalRecord>(rows: &[R], filters: &FilterState) -> Vec<usize> {
    filter_chain(rows, filters).into_indices()
}

fn narrow<R, I, P>(rows: &[R], candidates: I, keep: P) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
    P: Fn(&R) -> bool,
{
    candidates.into_iter().filter(|&i| keep(&rows[i])).collect()
}
