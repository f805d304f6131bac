use serde::{Deserialize, Serialize};

/// One candidate that survived a ranking call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    /// Zero-based position of the candidate in the caller's sequence
    pub index: usize,

    /// Copy of the candidate string
    #[serde(rename = "match")]
    pub text: String,

    /// Similarity score (0.0 - 100.0)
    pub score: f64,
}

impl Match {
    /// Create a new match record
    pub fn new(index: usize, text: impl Into<String>, score: f64) -> Self {
        Self {
            index,
            text: text.into(),
            score,
        }
    }

    /// Get display string for logging/CLI output
    pub fn display(&self) -> String {
        format!("[{}] {} - {:.2}", self.index, self.text, self.score)
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_creation() {
        let m = Match::new(2, "ab", 80.0);
        assert_eq!(m.index, 2);
        assert_eq!(m.text, "ab");
        assert_eq!(m.score, 80.0);
    }

    #[test]
    fn test_json_field_names() {
        let m = Match::new(0, "abc", 100.0);
        let json = m.to_json().unwrap();
        assert_eq!(json, r#"{"index":0,"match":"abc","score":100.0}"#);

        let back: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_display() {
        let m = Match::new(1, "apple", 66.666);
        assert_eq!(m.display(), "[1] apple - 66.67");
    }
}
