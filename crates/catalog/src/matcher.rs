//! Fuzzy Brand and Model Matching
//!
//! Matches user text against live catalog candidates: an exact pass over
//! normalized forms first, then a best-score fuzzy pass. Scores are
//! normalized Levenshtein similarity on a 0-100 scale, case-insensitive.

use car_agent_config::constants::matching::DEFAULT_SIMILARITY_THRESHOLD;

use crate::aliases::normalize_brand;
use crate::text::normalize_model;

/// Similarity between two strings on a 0-100 scale.
///
/// Identical strings (ignoring case) score 100, fully disjoint strings 0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase()) * 100.0
}

/// Find the catalog brand closest to `brand` at the default threshold.
pub fn find_similar_brand(brand: &str, candidates: &[String]) -> Option<String> {
    find_similar_brand_with_threshold(brand, candidates, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Find the catalog brand closest to `brand`.
///
/// The query resolves through the alias table first, so "vw" matches a
/// catalog entry of "Volkswagen". The exact pass compares alias-resolved
/// forms on both sides and returns the candidate verbatim; the fuzzy pass
/// scores against the raw candidates and takes the best hit at or above
/// `threshold`.
pub fn find_similar_brand_with_threshold(
    brand: &str,
    candidates: &[String],
    threshold: f64,
) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let resolved = normalize_brand(brand)?;

    for candidate in candidates {
        if normalize_brand(candidate).as_deref() == Some(resolved.as_str()) {
            return Some(candidate.clone());
        }
    }

    best_match(&resolved, candidates, threshold)
}

/// Find the catalog model closest to `model` at the default threshold.
pub fn find_similar_model(model: &str, candidates: &[String]) -> Option<String> {
    find_similar_model_with_threshold(model, candidates, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Find the catalog model closest to `model`.
///
/// Same two passes as the brand variant, without the alias table: the exact
/// pass compares normalized text on both sides.
pub fn find_similar_model_with_threshold(
    model: &str,
    candidates: &[String],
    threshold: f64,
) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let normalized = normalize_model(model);
    if normalized.is_empty() {
        return None;
    }

    for candidate in candidates {
        if normalize_model(candidate) == normalized {
            return Some(candidate.clone());
        }
    }

    best_match(&normalized, candidates, threshold)
}

/// Best-scoring candidate at or above `threshold`.
fn best_match(query: &str, candidates: &[String], threshold: f64) -> Option<String> {
    // Strictly-greater scan keeps the first candidate on ties
    let mut best: Option<(&String, f64)> = None;
    for candidate in candidates {
        let score = similarity_ratio(query, candidate);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((candidate, score)) if score >= threshold => Some(candidate.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_similarity_ratio_is_case_insensitive() {
        assert_eq!(similarity_ratio("TOYOTA", "toyota"), 100.0);
        assert_eq!(similarity_ratio("CR-V", "cr-v"), 100.0);
    }

    #[test]
    fn test_similarity_ratio_pinned_scores() {
        assert!((similarity_ratio("toyta", "Toyota") - 83.33).abs() < 0.01);
        assert!((similarity_ratio("corola", "Corolla") - 85.71).abs() < 0.01);
        assert!((similarity_ratio("chevorlet", "Chevrolet") - 77.78).abs() < 0.01);
        assert!((similarity_ratio("ferrari", "Honda") - 14.29).abs() < 0.01);
        assert_eq!(similarity_ratio("ferrari", "Toyota"), 0.0);
    }

    #[test]
    fn test_similarity_ratio_empty_strings() {
        assert_eq!(similarity_ratio("", ""), 100.0);
        assert_eq!(similarity_ratio("toyota", ""), 0.0);
    }

    #[test]
    fn test_find_brand_exact_returns_verbatim_casing() {
        let brands = candidates(&["Toyota", "Honda"]);
        assert_eq!(find_similar_brand("TOYOTA", &brands), Some("Toyota".to_string()));
        assert_eq!(find_similar_brand("  honda ", &brands), Some("Honda".to_string()));
    }

    #[test]
    fn test_find_brand_alias_resolves_before_matching() {
        let brands = candidates(&["Volkswagen", "Mercedes Benz"]);
        assert_eq!(find_similar_brand("vw", &brands), Some("Volkswagen".to_string()));
        // Fuzzy alone scores mercedes vs "Mercedes Benz" at 61.54; the alias
        // table is what carries this one over
        assert_eq!(find_similar_brand("mercedes", &brands), Some("Mercedes Benz".to_string()));
    }

    #[test]
    fn test_find_brand_fuzzy_hit() {
        let brands = candidates(&["Toyota", "Honda"]);
        assert_eq!(find_similar_brand("toyta", &brands), Some("Toyota".to_string()));
        assert_eq!(find_similar_brand("hnda", &brands), Some("Honda".to_string()));
    }

    #[test]
    fn test_find_brand_below_threshold() {
        let brands = candidates(&["Toyota", "Honda"]);
        assert_eq!(find_similar_brand("ferrari", &brands), None);
    }

    #[test]
    fn test_find_brand_empty_inputs() {
        assert_eq!(find_similar_brand("toyota", &[]), None);
        assert_eq!(find_similar_brand("", &candidates(&["Toyota"])), None);
    }

    #[test]
    fn test_find_brand_custom_threshold() {
        let brands = candidates(&["Renault"]);
        // renol vs renault scores 57.14
        assert_eq!(find_similar_brand("renol", &brands), None);
        assert_eq!(
            find_similar_brand_with_threshold("renol", &brands, 50.0),
            Some("Renault".to_string())
        );
    }

    #[test]
    fn test_find_model_exact_and_fuzzy() {
        let models = candidates(&["Corolla", "Yaris", "RAV4"]);
        assert_eq!(find_similar_model("corolla", &models), Some("Corolla".to_string()));
        assert_eq!(find_similar_model("corola", &models), Some("Corolla".to_string()));
        assert_eq!(find_similar_model("civic", &models), None);
    }

    #[test]
    fn test_find_model_accents_fold_in_exact_pass() {
        let models = candidates(&["Corolla"]);
        assert_eq!(find_similar_model("Corólla", &models), Some("Corolla".to_string()));
    }

    #[test]
    fn test_tie_break_keeps_first_candidate() {
        // Neither matches exactly; both score 83.33 in the fuzzy pass
        let models = candidates(&["Corola", "Corolb"]);
        assert_eq!(find_similar_model("corol", &models), Some("Corola".to_string()));
    }
}
