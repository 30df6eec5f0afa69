use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use clap::Parser;
use serde::Serialize;

/// Write synthetic `day_data.csv` and `hour_data.csv` for the dashboard.
#[derive(Debug, Parser)]
struct Args {
    /// Output directory.
    #[arg(default_value = "dashboard")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEATHER: [&str; 4] = ["Clear", "Mist", "Light Rain/Snow", "Heavy Rain/Snow"];

/// Relative demand per hour on working days: commuter peaks at 8 and 17–18.
const WORKDAY_PROFILE: [f64; 24] = [
    0.2, 0.1, 0.05, 0.03, 0.03, 0.2, 0.9, 2.7, 4.4, 2.2, 1.3, 1.6, 2.0, 1.9, 1.8, 2.0, 3.4, 5.6,
    5.1, 3.6, 2.6, 1.9, 1.4, 0.8,
];
/// Relative demand per hour on weekends and holidays: one broad midday hump.
const HOLIDAY_PROFILE: [f64; 24] = [
    0.9, 0.7, 0.5, 0.25, 0.1, 0.1, 0.2, 0.5, 1.1, 1.9, 2.9, 3.5, 4.0, 4.1, 4.0, 3.9, 3.8, 3.5,
    3.0, 2.3, 1.8, 1.5, 1.3, 1.0,
];

#[derive(Debug, Serialize)]
struct DayRow<'a> {
    date: String,
    season: &'a str,
    year: i32,
    month: &'a str,
    weather: &'a str,
    workingday: u8,
    casual: u64,
    registered: u64,
    total: u64,
}

#[derive(Debug, Serialize)]
struct HourRow<'a> {
    date: String,
    season: &'a str,
    year: i32,
    month: &'a str,
    hour: u8,
    weather: &'a str,
    workingday: u8,
    casual: u64,
    registered: u64,
    total: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Seasons change at the solstices and equinoxes; Spring runs from
/// 21 December to 20 March.
fn season_of(date: NaiveDate) -> &'static str {
    match (date.month(), date.day()) {
        (12, d) if d >= 21 => "Spring",
        (1..=2, _) => "Spring",
        (3, d) if d <= 20 => "Spring",
        (3..=5, _) => "Summer",
        (6, d) if d <= 20 => "Summer",
        (6..=8, _) => "Fall",
        (9, d) if d <= 22 => "Fall",
        _ => "Winter",
    }
}

fn pick_weather(rng: &mut SimpleRng) -> usize {
    match rng.next_f64() {
        r if r < 0.63 => 0,
        r if r < 0.93 => 1,
        r if r < 0.995 => 2,
        _ => 3,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let day_path = args.out_dir.join("day_data.csv");
    let hour_path = args.out_dir.join("hour_data.csv");
    let mut day_out = csv::Writer::from_path(&day_path).context("creating day CSV")?;
    let mut hour_out = csv::Writer::from_path(&hour_path).context("creating hour CSV")?;

    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let end = NaiveDate::from_ymd_opt(2012, 12, 31).context("end date")?;

    let mut date = start;
    let mut days = 0usize;
    while date <= end {
        let season = season_of(date);
        let month = MONTHS[date.month0() as usize];
        let working = !matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let weather = pick_weather(&mut rng);

        // Demand grows year over year and peaks in late summer.
        let growth = if date.year() == 2011 { 1.0 } else { 1.6 };
        let seasonal = 0.55 + 0.45 * ((date.ordinal() as f64 - 20.0) / 366.0 * std::f64::consts::PI).sin();
        let weather_factor = [1.0, 0.85, 0.45, 0.15][weather];
        let scale = 60.0 * growth * seasonal * weather_factor;

        let (profile, casual_share) = if working {
            (&WORKDAY_PROFILE, 0.12)
        } else {
            (&HOLIDAY_PROFILE, 0.35)
        };

        let mut day_casual = 0u64;
        let mut day_registered = 0u64;
        for (hour, weight) in profile.iter().enumerate() {
            let noise = 0.8 + 0.4 * rng.next_f64();
            let total = (scale * weight * noise).round() as u64;
            let casual = (total as f64 * casual_share * (0.7 + 0.6 * rng.next_f64())).round() as u64;
            let casual = casual.min(total);
            let registered = total - casual;

            hour_out.serialize(HourRow {
                date: date.to_string(),
                season,
                year: date.year(),
                month,
                hour: hour as u8,
                weather: WEATHER[weather],
                workingday: u8::from(working),
                casual,
                registered,
                total,
            })?;
            day_casual += casual;
            day_registered += registered;
        }

        day_out.serialize(DayRow {
            date: date.to_string(),
            season,
            year: date.year(),
            month,
            weather: WEATHER[weather],
            workingday: u8::from(working),
            casual: day_casual,
            registered: day_registered,
            total: day_casual + day_registered,
        })?;

        days += 1;
        date += Duration::days(1);
    }

    day_out.flush()?;
    hour_out.flush()?;

    println!(
        "Wrote {days} days to {} and {} hours to {}",
        day_path.display(),
        days * 24,
        hour_path.display()
    );
    Ok(())
}
