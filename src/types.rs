use serde::{Deserialize, Serialize};

/// How many matches a host shows when it doesn't ask for a specific number.
pub const DEFAULT_LIMIT: usize = 5;

/// Palettes at least this large are scored on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchRequest {
    /// Query colour as hex, e.g. "#FF6600" or "ff6600"
    pub color: String,
    /// Maximum number of matches to return (best match included)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl MatchRequest {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatcherOptions {
    /// Minimum palette size before scoring is split across threads
    pub parallel_threshold: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_limit_defaults_to_five() {
        let req: MatchRequest = serde_json::from_str(r##"{"color":"#FF6600"}"##).unwrap();
        assert_eq!(req, MatchRequest::new("#FF6600"));
        assert_eq!(req.limit, 5);

        let req: MatchRequest = serde_json::from_str(r#"{"color":"00ff00","limit":2}"#).unwrap();
        assert_eq!(req.limit, 2);
    }

    #[test]
    fn options_fill_missing_fields() {
        let opts: MatcherOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, MatcherOptions::default());
        let opts: MatcherOptions = serde_json::from_str(r#"{"parallel_threshold":8}"#).unwrap();
        assert_eq!(opts.parallel_threshold, 8);
    }
}
