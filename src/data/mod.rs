/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  day_data.csv / hour_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, recode categorical columns → RentalDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RentalDataset │  Vec<DayRecord>, Vec<HourRecord>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year → month → season → day type → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics and per-chart group-by tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
