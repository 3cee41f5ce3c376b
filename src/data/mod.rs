/// Data layer: core types, loading, correlation and extrema.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (typed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  numeric  │  keep int/float columns → NumericTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ correlation  │  pairwise-complete Pearson → CorrelationMatrix
///   └─────────────┘
///        │                      (cache memoizes everything above per path)
///        ▼
///   ┌──────────┐
///   │  extrema  │  strongest positive / negative pair
///   └──────────┘
/// ```

pub mod cache;
pub mod correlation;
pub mod extrema;
pub mod loader;
pub mod model;
pub mod numeric;
