/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → RawTable → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Venue>, column schema, distinct sectors
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  sector predicate → venue indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;

pub use loader::load_file;
pub use model::{CellValue, Column, Dataset, Field, RawTable, Venue};
