/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///    .csv file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (typed columns, Null for gaps)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ passenger  │  schema check → Passenger rows
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  by sex / by age group & sex / by class
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod passenger;
