//! Catalog text processing and search for the car sales agent
//!
//! Users write brands and models the way they speak: abbreviated,
//! misspelled, accented. This crate turns that text into catalog matches:
//! - `text`: normalization (casing, accents, whitespace)
//! - `aliases`: the brand alias table and `BrandResolution`
//! - `matcher`: fuzzy similarity over live catalog candidates
//! - `search`: `CarSearchService`, resolution composed with repository search
//! - `memory`: `InMemoryCatalog` for demos and tests

pub mod aliases;
pub mod matcher;
pub mod memory;
pub mod search;
pub mod text;

pub use aliases::{normalize_brand, resolve_brand, BrandResolution};
pub use matcher::{find_similar_brand, find_similar_model, similarity_ratio};
pub use memory::InMemoryCatalog;
pub use search::{CarQuery, CarSearchService};
pub use text::{extract_car_references, normalize_model, normalize_text};
