/// Data layer: core types, loading, normalization, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog (normalize runs per row)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<Title> with derived genre/language sets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply Selection predicates → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  explode / frequency / bounds → chart views
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
