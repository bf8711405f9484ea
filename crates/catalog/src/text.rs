//! Text Normalization Utilities
//!
//! Canonicalizes free-form user text (WhatsApp messages mix casing, accents
//! and stray whitespace) so the matcher and repository compare like with like.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::aliases::normalize_brand;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize text for catalog comparisons.
///
/// Trims, lowercases, folds the Spanish accented vowels and `ñ` to their
/// ASCII forms, and collapses every whitespace run to a single space.
///
/// # Examples
/// ```
/// use car_agent_catalog::text::normalize_text;
/// assert_eq!(normalize_text("  Toyota   Corolla "), "toyota corolla");
/// assert_eq!(normalize_text("Él Ñandú"), "el nandu");
/// ```
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let folded: String = lowered
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect();
    WHITESPACE.replace_all(&folded, " ").into_owned()
}

/// Normalize a model name.
///
/// Models have no alias table; this is plain text normalization, kept as a
/// named operation because callers treat models and free text differently.
pub fn normalize_model(model: &str) -> String {
    normalize_text(model)
}

/// Extract a (brand, model) pair from a free-text car reference.
///
/// Takes the first word as the brand and the second as the model, the way
/// users write "toyota corolla 2020" or "vw golf". Returns `(None, None)`
/// when the text has fewer than two words.
pub fn extract_car_references(text: &str) -> (Option<String>, Option<String>) {
    let normalized = normalize_text(text);
    let mut words = normalized.split_whitespace();

    let (first, second) = match (words.next(), words.next()) {
        (Some(first), Some(second)) => (first, second),
        _ => return (None, None),
    };

    (normalize_brand(first), Some(normalize_model(second)))
}
