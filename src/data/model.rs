use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// A label that is not part of a column's fixed category set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct CategoryError {
    pub kind: &'static str,
    pub value: String,
}

/// A column restricted to a fixed, ordered set of labels.
///
/// `categories()` is the display order; the derived `Ord` of every
/// implementor agrees with it.
pub trait Categorical: Copy + Ord + fmt::Display + Sized + 'static {
    /// Column name used in error messages.
    const KIND: &'static str;

    fn categories() -> Vec<Self>;

    /// Recode a raw cell into the category with the same label.
    fn parse(raw: &str) -> Result<Self, CategoryError> {
        let raw = raw.trim();
        Self::categories()
            .into_iter()
            .find(|c| c.to_string() == raw)
            .ok_or_else(|| CategoryError {
                kind: Self::KIND,
                value: raw.to_string(),
            })
    }

    /// Position within `categories()`, used as the x coordinate in charts.
    fn position(&self) -> usize {
        Self::categories()
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }
}

/// Declare a fieldless categorical enum together with its labels.
macro_rules! categorical_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Categorical for $name {
            const KIND: &'static str = $kind;

            fn categories() -> Vec<Self> {
                Self::ALL.to_vec()
            }
        }
    };
}

categorical_enum!(Season, "season", {
    Spring => "Spring",
    Summer => "Summer",
    Fall => "Fall",
    Winter => "Winter",
});

categorical_enum!(Year, "year", {
    Y2011 => "2011",
    Y2012 => "2012",
});

categorical_enum!(Month, "month", {
    Jan => "Jan",
    Feb => "Feb",
    Mar => "Mar",
    Apr => "Apr",
    May => "May",
    Jun => "Jun",
    Jul => "Jul",
    Aug => "Aug",
    Sep => "Sep",
    Oct => "Oct",
    Nov => "Nov",
    Dec => "Dec",
});

categorical_enum!(
    /// Weather situation of the day or hour.
    Weather, "weather", {
    Clear => "Clear",
    Mist => "Mist",
    LightRainSnow => "Light Rain/Snow",
    HeavyRainSnow => "Heavy Rain/Snow",
});

/// Hour of day, 0–23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

impl Hour {
    pub const COUNT: u8 = 24;

    pub fn new(h: u8) -> Option<Self> {
        (h < Self::COUNT).then_some(Hour(h))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Categorical for Hour {
    const KIND: &'static str = "hour";

    fn categories() -> Vec<Self> {
        (0..Self::COUNT).map(Hour).collect()
    }

    // Numeric cells may be written as "7" or "07".
    fn parse(raw: &str) -> Result<Self, CategoryError> {
        raw.trim()
            .parse::<u8>()
            .ok()
            .and_then(Hour::new)
            .ok_or_else(|| CategoryError {
                kind: Self::KIND,
                value: raw.trim().to_string(),
            })
    }

    fn position(&self) -> usize {
        self.0 as usize
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Rental counts of one row. `casual + registered` is expected to equal `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rentals {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl Rentals {
    /// False when the rider counts overflow `u64`.
    pub fn is_consistent(&self) -> bool {
        self.casual.checked_add(self.registered) == Some(self.total)
    }
}

impl std::ops::AddAssign for Rentals {
    fn add_assign(&mut self, rhs: Self) {
        self.casual = self.casual.saturating_add(rhs.casual);
        self.registered = self.registered.saturating_add(rhs.registered);
        self.total = self.total.saturating_add(rhs.total);
    }
}

/// One row of the day-level table.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub year: Year,
    pub month: Month,
    pub weather: Option<Weather>,
    pub working_day: bool,
    pub rentals: Rentals,
}

/// One row of the hour-level table.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    pub date: NaiveDate,
    pub hour: Hour,
    pub season: Season,
    pub year: Year,
    pub month: Month,
    pub weather: Option<Weather>,
    pub working_day: bool,
    pub rentals: Rentals,
}

/// Fields shared by both tables; filters and aggregates are written against this.
pub trait RentalRecord {
    fn year(&self) -> Year;
    fn month(&self) -> Month;
    fn season(&self) -> Season;
    fn working_day(&self) -> bool;
    fn rentals(&self) -> Rentals;
}

macro_rules! impl_rental_record {
    ($ty:ty) => {
        impl RentalRecord for $ty {
            fn year(&self) -> Year {
                self.year
            }
            fn month(&self) -> Month {
                self.month
            }
            fn season(&self) -> Season {
                self.season
            }
            fn working_day(&self) -> bool {
                self.working_day
            }
            fn rentals(&self) -> Rentals {
                self.rentals
            }
        }
    };
}

impl_rental_record!(DayRecord);
impl_rental_record!(HourRecord);

// ---------------------------------------------------------------------------
// RentalDataset – both tables
// ---------------------------------------------------------------------------

/// The day- and hour-level tables loaded together.
#[derive(Debug, Clone, Default)]
pub struct RentalDataset {
    pub day: Vec<DayRecord>,
    pub hour: Vec<HourRecord>,
}

impl RentalDataset {
    pub fn new(day: Vec<DayRecord>, hour: Vec<HourRecord>) -> Self {
        RentalDataset { day, hour }
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty() && self.hour.is_empty()
    }
}
