/// Data layer: core types, remote loading, and query functions.
///
/// Architecture:
/// ```text
///  HTTP GET → xlsx bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse sheet → ScoreTable + ColumnRoleMap
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ ScoreTable  │  Vec<ScoreRecord>, trimmed headers
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  pure filters / aggregate / top-N → derived views
///   └──────────┘
/// ```
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
