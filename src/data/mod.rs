/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site order, payload bounds
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  site selection → pie counts, scatter indices
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
