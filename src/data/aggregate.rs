use std::collections::BTreeMap;
use std::fmt;

use super::model::{Hour, HourRecord, Month, RentalRecord, Rentals, Season, Year};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Column sums over the visible rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    pub registered: u64,
    pub casual: u64,
}

pub fn summarize<R: RentalRecord>(rows: &[R], indices: &[usize]) -> Summary {
    let sums = sum_rentals(rows, indices);
    Summary {
        total: sums.total,
        registered: sums.registered,
        casual: sums.casual,
    }
}

fn sum_rentals<R: RentalRecord>(rows: &[R], indices: &[usize]) -> Rentals {
    let mut acc = Rentals::default();
    for &i in indices {
        acc += rows[i].rentals();
    }
    acc
}

/// Group visible rows by `key` and accumulate their counts. Groups come back
/// in category order.
fn group_by<R, K, F>(rows: &[R], indices: &[usize], key: F) -> BTreeMap<K, Rentals>
where
    R: RentalRecord,
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut groups: BTreeMap<K, Rentals> = BTreeMap::new();
    for &i in indices {
        let row = &rows[i];
        *groups.entry(key(row)).or_default() += row.rentals();
    }
    groups
}

// ---------------------------------------------------------------------------
// Chart tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: Year,
    pub month: Month,
    pub total: u64,
}

/// Total rentals per (year, month). Months without rentals are dropped.
pub fn monthly_by_year<R: RentalRecord>(rows: &[R], indices: &[usize]) -> Vec<MonthlyTotal> {
    group_by(rows, indices, |r| (r.year(), r.month()))
        .into_iter()
        .filter(|(_, sums)| sums.total != 0)
        .map(|((year, month), sums)| MonthlyTotal {
            year,
            month,
            total: sums.total,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyTotal {
    pub year: Year,
    pub total: u64,
}

pub fn yearly_totals<R: RentalRecord>(rows: &[R], indices: &[usize]) -> Vec<YearlyTotal> {
    group_by(rows, indices, |r| r.year())
        .into_iter()
        .filter(|(_, sums)| sums.total != 0)
        .map(|(year, sums)| YearlyTotal {
            year,
            total: sums.total,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonSplit {
    pub season: Season,
    pub casual: u64,
    pub registered: u64,
}

/// Casual and registered sums per season. Seasons with no casual riders are
/// dropped.
pub fn seasonal_split<R: RentalRecord>(rows: &[R], indices: &[usize]) -> Vec<SeasonSplit> {
    group_by(rows, indices, |r| r.season())
        .into_iter()
        .filter(|(_, sums)| sums.casual != 0)
        .map(|(season, sums)| SeasonSplit {
            season,
            casual: sums.casual,
            registered: sums.registered,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HourKind {
    Normal,
    Peak,
}

impl fmt::Display for HourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HourKind::Normal => "Normal",
            HourKind::Peak => "Peak",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyPeak {
    pub hour: Hour,
    /// Largest single-row total seen in this hour.
    pub max: u64,
    pub kind: HourKind,
}

/// Busiest single hour-row per hour of day. Every hour whose maximum equals
/// the overall maximum is tagged `Peak`.
pub fn hourly_peaks(rows: &[HourRecord], indices: &[usize]) -> Vec<HourlyPeak> {
    let mut maxima: BTreeMap<Hour, u64> = BTreeMap::new();
    for &i in indices {
        let row = &rows[i];
        let slot = maxima.entry(row.hour).or_default();
        *slot = (*slot).max(row.rentals.total);
    }
    maxima.retain(|_, max| *max != 0);

    let peak = maxima.values().copied().max().unwrap_or_default();
    maxima
        .into_iter()
        .map(|(hour, max)| HourlyPeak {
            hour,
            max,
            kind: if max == peak {
                HourKind::Peak
            } else {
                HourKind::Normal
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{DayType, FilterState, Selection, filtered_indices};
    use crate::data::loader::read_day_records;
    use crate::data::model::{Categorical, DayRecord};

    fn day(year: Year, month: Month, working_day: bool, casual: u64, registered: u64) -> DayRecord {
        DayRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            season: Season::ALL[month.position() / 3],
            year,
            month,
            weather: None,
            working_day,
            rentals: Rentals {
                casual,
                registered,
                total: casual + registered,
            },
        }
    }

    fn hour(h: u8, total: u64) -> HourRecord {
        HourRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            hour: Hour::new(h).unwrap(),
            season: Season::Spring,
            year: Year::Y2011,
            month: Month::Jan,
            weather: None,
            working_day: true,
            rentals: Rentals {
                casual: 0,
                registered: total,
                total,
            },
        }
    }

    fn days() -> Vec<DayRecord> {
        vec![
            day(Year::Y2011, Month::Jan, true, 10, 90),
            day(Year::Y2011, Month::Jan, false, 30, 20),
            day(Year::Y2011, Month::Jul, true, 100, 400),
            day(Year::Y2012, Month::Oct, false, 0, 0),
            day(Year::Y2012, Month::Dec, true, 5, 45),
        ]
    }

    fn all(rows: &[DayRecord]) -> Vec<usize> {
        (0..rows.len()).collect()
    }

    #[test]
    fn summary_sums_columns() {
        let rows = days();
        let s = summarize(&rows, &all(&rows));
        assert_eq!(s, Summary { total: 700, registered: 555, casual: 145 });
        assert_eq!(summarize(&rows, &[]), Summary::default());
    }

    // Totals are written out independently of the rider columns.
    const RENTALS_CSV: &str = "\
date,season,year,month,workingday,casual,registered,total
2011-01-03,Spring,2011,Jan,1,120,1229,1349
2011-01-08,Spring,2011,Jan,0,68,891,959
2011-04-16,Summer,2011,Apr,0,1133,1536,2669
2011-07-04,Fall,2011,Jul,0,3065,2978,6043
2011-10-12,Winter,2011,Oct,1,246,3174,3420
2012-03-17,Spring,2012,Mar,0,3155,4681,7836
2012-06-20,Summer,2012,Jun,1,1047,5641,6688
2012-09-15,Fall,2012,Sep,0,3160,5554,8714
2012-12-31,Spring,2012,Dec,1,439,2290,2729
";

    #[test]
    fn casual_plus_registered_is_total_for_every_filter() {
        let rows = read_day_records(RENTALS_CSV.as_bytes()).unwrap();
        for year in Selection::<Year>::options() {
            for month in Selection::<Month>::options() {
                for season in Selection::<Season>::options() {
                    for &day_type in DayType::ALL {
                        let filters = FilterState {
                            year,
                            month,
                            season,
                            day_type,
                        };
                        let s = summarize(&rows, &filtered_indices(&rows, &filters));
                        assert_eq!(s.casual + s.registered, s.total, "{filters:?}");
                    }
                }
            }
        }
        let s = summarize(&rows, &all(&rows));
        assert_eq!(s.total, 1349 + 959 + 2669 + 6043 + 3420 + 7836 + 6688 + 8714 + 2729);
    }

    #[test]
    fn monthly_totals_drop_empty_months() {
        let rows = days();
        let monthly = monthly_by_year(&rows, &all(&rows));
        assert_eq!(
            monthly,
            vec![
                MonthlyTotal { year: Year::Y2011, month: Month::Jan, total: 150 },
                MonthlyTotal { year: Year::Y2011, month: Month::Jul, total: 500 },
                MonthlyTotal { year: Year::Y2012, month: Month::Dec, total: 50 },
            ]
        );
    }

    #[test]
    fn yearly_totals_follow_filter() {
        let rows = days();
        let yearly = yearly_totals(&rows, &all(&rows));
        assert_eq!(
            yearly,
            vec![
                YearlyTotal { year: Year::Y2011, total: 650 },
                YearlyTotal { year: Year::Y2012, total: 50 },
            ]
        );

        let only_2012 = FilterState {
            year: Selection::Only(Year::Y2012),
            ..FilterState::default()
        };
        let yearly = yearly_totals(&rows, &filtered_indices(&rows, &only_2012));
        assert_eq!(yearly, vec![YearlyTotal { year: Year::Y2012, total: 50 }]);
    }

    #[test]
    fn seasons_split_riders_in_season_order() {
        let rows = days();
        let split = seasonal_split(&rows, &all(&rows));
        assert_eq!(
            split,
            vec![
                SeasonSplit { season: Season::Spring, casual: 40, registered: 110 },
                SeasonSplit { season: Season::Fall, casual: 100, registered: 400 },
                SeasonSplit { season: Season::Winter, casual: 5, registered: 45 },
            ]
        );
    }

    #[test]
    fn hourly_peaks_mark_every_maximum() {
        let rows = vec![
            hour(8, 300),
            hour(8, 120),
            hour(17, 300),
            hour(3, 0),
            hour(12, 90),
        ];
        let idx: Vec<usize> = (0..rows.len()).collect();
        let peaks = hourly_peaks(&rows, &idx);

        let summary: Vec<(u8, u64, HourKind)> = peaks
            .iter()
            .map(|p| (p.hour.value(), p.max, p.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                (8, 300, HourKind::Peak),
                (12, 90, HourKind::Normal),
                (17, 300, HourKind::Peak),
            ]
        );

        assert!(hourly_peaks(&rows, &[]).is_empty());
    }
}
