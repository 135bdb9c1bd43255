//! Parser options
//!
//! The parser needs very little configuration; the only knob is the optional
//! timestamp cutoff. Kept as a builder struct so callers that do not care can
//! pass `ParseOptions::default()`.

use serde::{Deserialize, Serialize};

/// Options controlling how a report is parsed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Optional inclusive cutoff on the formatted interval timestamp
    ///
    /// Compared lexicographically against the `%Y-%m-%d %H:%M:%S` display
    /// string; parsing stops at the first interval whose timestamp is not
    /// earlier than the bound. Because the format is fixed-width, passing a
    /// full timestamp string gives chronological semantics. Omit to include
    /// every interval.
    #[serde(default)]
    pub cutoff: Option<String>,
}

impl ParseOptions {
    /// Create options with default settings (no cutoff)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the timestamp cutoff
    pub fn with_cutoff(mut self, cutoff: impl Into<String>) -> Self {
        self.cutoff = Some(cutoff.into());
        self
    }

    /// The cutoff bound, if set
    pub fn cutoff(&self) -> Option<&str> {
        self.cutoff.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ParseOptions::new().with_cutoff("2023-11-15 07:13:25");
        assert_eq!(options.cutoff(), Some("2023-11-15 07:13:25"));
    }

    #[test]
    fn test_default_has_no_cutoff() {
        let options = ParseOptions::default();
        assert_eq!(options.cutoff(), None);
    }
}
