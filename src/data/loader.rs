use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{
    Categorical, DayRecord, Hour, HourRecord, Month, RentalDataset, Rentals, Season, Weather,
    Year,
};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load both tables. Fails if either file cannot be read or recoded.
pub fn load_dataset(day_path: &Path, hour_path: &Path) -> Result<RentalDataset> {
    let day = load_day_csv(day_path)?;
    let hour = load_hour_csv(hour_path)?;
    Ok(RentalDataset::new(day, hour))
}

pub fn load_day_csv(path: &Path) -> Result<Vec<DayRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_day_records(file).with_context(|| format!("loading {}", path.display()))
}

pub fn load_hour_csv(path: &Path) -> Result<Vec<HourRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_hour_records(file).with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV layout
// ---------------------------------------------------------------------------

/// One CSV row before categorical recoding.
///
/// Header names follow the published dataset:
/// `date,season,year,month,[hour],weather,workingday,casual,registered,total`.
/// Any other columns (temperature, humidity, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    season: String,
    year: String,
    month: String,
    #[serde(default)]
    hour: Option<String>,
    #[serde(default)]
    weather: Option<String>,
    workingday: String,
    casual: u64,
    registered: u64,
    total: u64,
}

/// Categorical fields common to both tables, already recoded.
struct Recoded {
    date: NaiveDate,
    season: Season,
    year: Year,
    month: Month,
    weather: Option<Weather>,
    working_day: bool,
    rentals: Rentals,
}

impl RawRow {
    fn recode(&self) -> Result<Recoded> {
        let weather = match self.weather.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(w) => Some(Weather::parse(w)?),
        };
        Ok(Recoded {
            date: parse_date(&self.date)?,
            season: Season::parse(&self.season)?,
            year: Year::parse(&self.year)?,
            month: Month::parse(&self.month)?,
            weather,
            working_day: parse_flag(&self.workingday)?,
            rentals: Rentals {
                casual: self.casual,
                registered: self.registered,
                total: self.total,
            },
        })
    }
}

pub fn read_day_records<R: Read>(reader: R) -> Result<Vec<DayRecord>> {
    read_rows(reader, |raw| {
        let r = raw.recode()?;
        Ok(DayRecord {
            date: r.date,
            season: r.season,
            year: r.year,
            month: r.month,
            weather: r.weather,
            working_day: r.working_day,
            rentals: r.rentals,
        })
    })
}

pub fn read_hour_records<R: Read>(reader: R) -> Result<Vec<HourRecord>> {
    read_rows(reader, |raw| {
        let hour = raw.hour.as_deref().context("missing 'hour' value")?;
        let hour = Hour::parse(hour)?;
        let r = raw.recode()?;
        Ok(HourRecord {
            date: r.date,
            hour,
            season: r.season,
            year: r.year,
            month: r.month,
            weather: r.weather,
            working_day: r.working_day,
            rentals: r.rentals,
        })
    })
}

fn read_rows<R, T, F>(reader: R, convert: F) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&RawRow) -> Result<T>,
{
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    let mut inconsistent = 0usize;

    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        let row = convert(&raw).with_context(|| format!("CSV row {}", row_no + 1))?;
        let counts = Rentals {
            casual: raw.casual,
            registered: raw.registered,
            total: raw.total,
        };
        if !counts.is_consistent() {
            inconsistent += 1;
        }
        rows.push(row);
    }

    if inconsistent > 0 {
        log::warn!("{inconsistent} rows where casual + registered != total");
    }
    Ok(rows)
}

// -- cell helpers --

/// `YYYY-MM-DD`, optionally followed by a time part which is dropped.
fn parse_date(s: &str) -> Result<NaiveDate> {
    let day = s.trim().split([' ', 'T']).next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.trim() {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        other => bail!("invalid workingday flag '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DAY_CSV: &str = "\
date,season,year,month,holiday,weekday,workingday,weather,temp,casual,registered,total
2011-01-01,Spring,2011,Jan,0,6,0,Mist,0.34,331,654,985
2011-01-03,Spring,2011,Jan,0,1,1,Clear,0.19,120,1229,1349
2012-07-04,Fall,2012,Jul,1,3,0,Light Rain/Snow,0.8,2000,3000,5000
";

    const HOUR_CSV: &str = "\
date,season,year,month,hour,workingday,weather,casual,registered,total
2011-01-01,Spring,2011,Jan,0,0,Clear,3,13,16
2011-01-01,Spring,2011,Jan,1,0,Clear,8,32,40
";

    #[test]
    fn reads_day_rows_and_ignores_extra_columns() {
        let rows = read_day_records(DAY_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);

        let first = &rows[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(first.season, Season::Spring);
        assert_eq!(first.year, Year::Y2011);
        assert_eq!(first.month, Month::Jan);
        assert_eq!(first.weather, Some(Weather::Mist));
        assert!(!first.working_day);
        assert_eq!(first.rentals.total, 985);

        assert!(rows[1].working_day);
        assert_eq!(rows[2].weather, Some(Weather::LightRainSnow));
    }

    #[test]
    fn reads_hour_rows() {
        let rows = read_hour_records(HOUR_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].hour, Hour::new(1).unwrap());
        assert_eq!(rows[1].rentals.registered, 32);
    }

    #[test]
    fn hour_table_requires_hour_column() {
        let err = read_hour_records(DAY_CSV.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("hour"));
    }

    #[test]
    fn weather_column_is_optional() {
        let csv = "date,season,year,month,workingday,casual,registered,total\n\
                   2011-02-01 00:00:00,Spring,2011,Feb,1,1,2,3\n";
        let rows = read_day_records(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].weather, None);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2011, 2, 1).unwrap());
    }

    #[test]
    fn unknown_category_reports_row() {
        let csv = "date,season,year,month,workingday,casual,registered,total\n\
                   2011-01-01,Spring,2011,Jan,1,1,2,3\n\
                   2011-01-02,Monsoon,2011,Jan,1,1,2,3\n";
        let err = read_day_records(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 2"), "{msg}");
        assert!(msg.contains("unknown season 'Monsoon'"), "{msg}");
    }

    #[test]
    fn bad_flag_and_date_are_rejected() {
        let flag = "date,season,year,month,workingday,casual,registered,total\n\
                    2011-01-01,Spring,2011,Jan,yes,1,2,3\n";
        assert!(read_day_records(flag.as_bytes()).is_err());

        let date = "date,season,year,month,workingday,casual,registered,total\n\
                    01/01/2011,Spring,2011,Jan,1,1,2,3\n";
        assert!(read_day_records(date.as_bytes()).is_err());
    }

    #[test]
    fn overflowing_counts_load_without_panicking() {
        let csv = "date,season,year,month,workingday,casual,registered,total\n\
                   2011-01-01,Spring,2011,Jan,1,18446744073709551615,1,0\n";
        let rows = read_day_records(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rentals.casual, u64::MAX);
        assert!(!rows[0].rentals.is_consistent());
    }

    #[test]
    fn inconsistent_rows_are_kept() {
        let csv = "date,season,year,month,workingday,casual,registered,total\n\
                   2011-01-01,Spring,2011,Jan,1,1,2,3\n\
                   2011-01-02,Spring,2011,Jan,1,5,5,99\n";
        let rows = read_day_records(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].rentals, Rentals { casual: 5, registered: 5, total: 99 });
        assert!(!rows[1].rentals.is_consistent());
    }

    #[test]
    fn loads_dataset_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let day_path = dir.path().join("day_data.csv");
        let hour_path = dir.path().join("hour_data.csv");
        File::create(&day_path).unwrap().write_all(DAY_CSV.as_bytes()).unwrap();
        File::create(&hour_path).unwrap().write_all(HOUR_CSV.as_bytes()).unwrap();

        let ds = load_dataset(&day_path, &hour_path).unwrap();
        assert_eq!(ds.day.len(), 3);
        assert_eq!(ds.hour.len(), 2);

        let missing = dir.path().join("nope.csv");
        let err = load_dataset(&missing, &hour_path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.csv"));
    }
}
