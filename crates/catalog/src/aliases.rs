//! Brand Alias Resolution
//!
//! Users abbreviate and misspell brands ("vw", "chev", "mercedes"). A static
//! alias table maps known variants to the catalog's canonical spelling, and a
//! fuzzy pass over the table keys absorbs close misspellings before the
//! normalized input falls through unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use car_agent_config::constants::matching::DEFAULT_SIMILARITY_THRESHOLD;

use crate::matcher::similarity_ratio;
use crate::text::normalize_text;

/// Known brand variants. Keys are normalized; values are canonical catalog
/// spellings. Slice order is the tie-break order for the fuzzy pass.
const BRAND_VARIANTS: &[(&str, &str)] = &[
    ("vw", "volkswagen"),
    ("volkswagen", "volkswagen"),
    ("mercedes", "mercedes benz"),
    ("mercedes benz", "mercedes benz"),
    ("mercedes-benz", "mercedes benz"),
    ("bmw", "bmw"),
    ("toyota", "toyota"),
    ("honda", "honda"),
    ("nissan", "nissan"),
    ("ford", "ford"),
    ("chevrolet", "chevrolet"),
    ("chev", "chevrolet"),
    ("mazda", "mazda"),
    ("kia", "kia"),
    ("volvo", "volvo"),
    ("audi", "audi"),
    ("jeep", "jeep"),
    ("land rover", "land rover"),
    ("landrover", "land rover"),
    ("dodge", "dodge"),
    ("renault", "renault"),
    ("fiat", "fiat"),
    ("mini", "mini"),
    ("infiniti", "infiniti"),
    ("lincoln", "lincoln"),
    ("mg", "mg"),
    ("suzuki", "suzuki"),
    ("peugeot", "peugeot"),
    ("seat", "seat"),
    ("jac", "jac"),
];

static BRAND_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BRAND_VARIANTS.iter().copied().collect());

/// How a brand string resolved against the alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandResolution {
    /// Input was empty after normalization.
    NoMatch,
    /// Resolved through the alias table, exactly or fuzzily.
    Alias(String),
    /// Unknown brand; the normalized input passes through unchanged.
    Fallback(String),
}

impl BrandResolution {
    /// The resolved brand, if any.
    pub fn into_canonical(self) -> Option<String> {
        match self {
            BrandResolution::NoMatch => None,
            BrandResolution::Alias(brand) | BrandResolution::Fallback(brand) => Some(brand),
        }
    }
}

/// Resolve a raw brand string against the alias table.
///
/// Exact table hits win; otherwise the best fuzzy hit over the table keys at
/// the default threshold; otherwise the normalized input falls through as
/// [`BrandResolution::Fallback`].
pub fn resolve_brand(brand: &str) -> BrandResolution {
    let normalized = normalize_text(brand);
    if normalized.is_empty() {
        return BrandResolution::NoMatch;
    }

    if let Some(canonical) = BRAND_INDEX.get(normalized.as_str()) {
        return BrandResolution::Alias((*canonical).to_string());
    }

    // Strictly-greater scan keeps the first key on ties
    let mut best: Option<(&'static str, f64)> = None;
    for &(variant, canonical) in BRAND_VARIANTS {
        let score = similarity_ratio(&normalized, variant);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((canonical, score));
        }
    }

    match best {
        Some((canonical, score)) if score >= DEFAULT_SIMILARITY_THRESHOLD => {
            BrandResolution::Alias(canonical.to_string())
        }
        _ => BrandResolution::Fallback(normalized),
    }
}

/// Normalize and correct a brand name. `None` when the input is empty.
pub fn normalize_brand(brand: &str) -> Option<String> {
    resolve_brand(brand).into_canonical()
}
