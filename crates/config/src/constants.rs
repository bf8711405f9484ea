//! Centralized constants for the car agent
//!
//! Single source of truth for business constants and default values used
//! across the workspace. Instead of hardcoding values in multiple files,
//! use these constants to ensure consistency.

/// Financing terms
pub mod financing {
    /// Financing terms offered to customers, in years
    pub const SUPPORTED_TERM_YEARS: [i64; 4] = [3, 4, 5, 6];

    /// Months per year for term conversion
    pub const MONTHS_PER_YEAR: i64 = 12;
}

/// Brand/model matching
pub mod matching {
    /// Minimum similarity (0-100 scale) to accept a fuzzy match
    pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 70.0;
}

/// Catalog search
pub mod search {
    /// Result count when the caller does not ask for one
    pub const DEFAULT_RESULT_LIMIT: usize = 10;

    /// Hard cap on result count regardless of what the caller asks for
    pub const MAX_RESULT_LIMIT: usize = 50;
}
