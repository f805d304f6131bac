use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::FuzzError;

/// Optional string preprocessing applied before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    /// Compare strings exactly as given
    #[default]
    None,
    /// Lowercase, non-alphanumerics to spaces, trimmed
    Default,
}

impl Processor {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Processor::None => Cow::Borrowed(text),
            Processor::Default => Cow::Owned(default_process(text)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Processor::None => "none",
            Processor::Default => "default",
        }
    }
}

impl FromStr for Processor {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Processor::None),
            "default" => Ok(Processor::Default),
            other => Err(FuzzError::UnknownProcessor(other.to_string())),
        }
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase `text`, replace every non-alphanumeric character with a space
/// and trim the ends.
pub fn default_process(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_process() {
        assert_eq!(default_process("  Mid-Year Report 2! "), "mid year report 2");
        assert_eq!(default_process("PART II"), "part ii");
        assert_eq!(default_process("..."), "");
    }

    #[test]
    fn test_none_borrows() {
        let out = Processor::None.apply("Keep Me");
        assert!(matches!(out, Cow::Borrowed("Keep Me")));
    }

    #[test]
    fn test_parse() {
        assert_eq!("default".parse::<Processor>().unwrap(), Processor::Default);
        assert_eq!(" NONE ".parse::<Processor>().unwrap(), Processor::None);
        assert!(matches!(
            "nfkc".parse::<Processor>(),
            Err(FuzzError::UnknownProcessor(_))
        ));
    }
}
