//! Search tuning knobs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_page_size() -> u32 {
    24
}

const fn default_max_page_size() -> u32 {
    100
}

const fn default_max_query_chars() -> usize {
    200
}

const fn default_fuzzy_limit() -> u32 {
    200
}

const fn default_fallback_cap() -> usize {
    1000
}

const fn default_short_token_chars() -> usize {
    3
}

const fn default_medium_token_chars() -> usize {
    6
}

const fn default_short_threshold() -> f64 {
    0.18
}

const fn default_medium_threshold() -> f64 {
    0.25
}

const fn default_long_threshold() -> f64 {
    0.30
}

const fn default_split_threshold() -> f64 {
    0.25
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Page size when the caller does not pass one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Requested page sizes are clamped to this.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Normalized queries are truncated to this many code points.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,

    /// Candidate cap for each similarity / edit-distance call.
    #[serde(default = "default_fuzzy_limit")]
    pub fuzzy_limit: u32,

    /// Id cap for the whole-string fallback.
    #[serde(default = "default_fallback_cap")]
    pub fallback_cap: usize,

    /// Tokens at or under this length (code points) are always broadened.
    #[serde(default = "default_short_token_chars")]
    pub short_token_chars: usize,

    /// Upper bound of the medium similarity threshold band.
    #[serde(default = "default_medium_token_chars")]
    pub medium_token_chars: usize,

    #[serde(default = "default_short_threshold")]
    pub short_threshold: f64,

    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,

    #[serde(default = "default_long_threshold")]
    pub long_threshold: f64,

    /// Similarity threshold used when broadening a smart-split half.
    #[serde(default = "default_split_threshold")]
    pub split_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_query_chars: default_max_query_chars(),
            fuzzy_limit: default_fuzzy_limit(),
            fallback_cap: default_fallback_cap(),
            short_token_chars: default_short_token_chars(),
            medium_token_chars: default_medium_token_chars(),
            short_threshold: default_short_threshold(),
            medium_threshold: default_medium_threshold(),
            long_threshold: default_long_threshold(),
            split_threshold: default_split_threshold(),
        }
    }
}

impl SearchConfig {
    /// Similarity threshold for a token of `chars` code points.
    #[must_use]
    pub fn threshold_for(&self, chars: usize) -> f64 {
        if chars <= self.short_token_chars {
            self.short_threshold
        } else if chars <= self.medium_token_chars {
            self.medium_threshold
        } else {
            self.long_threshold
        }
    }

    /// Reject sizes of zero and thresholds outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("search.default_page_size", self.default_page_size as usize),
            ("search.max_page_size", self.max_page_size as usize),
            ("search.max_query_chars", self.max_query_chars),
            ("search.fuzzy_limit", self.fuzzy_limit as usize),
            ("search.fallback_cap", self.fallback_cap),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.medium_token_chars < self.short_token_chars {
            return Err(ConfigError::InvalidValue {
                field: "search.medium_token_chars".to_string(),
                reason: "must not be less than search.short_token_chars".to_string(),
            });
        }

        let thresholds = [
            ("search.short_threshold", self.short_threshold),
            ("search.medium_threshold", self.medium_threshold),
            ("search.long_threshold", self.long_threshold),
            ("search.split_threshold", self.split_threshold),
        ];
        for (field, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("must be within [0, 1], got {value}"),
                });
            }
        }

        Ok(())
    }
}
