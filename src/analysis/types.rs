//! Data types for enzyme site reporting

use serde::{Deserialize, Serialize};

/// Marker REBASE uses for a recognition sequence that has not been established
pub const UNKNOWN_SEQUENCE: &str = "?";

/// Raw recognition sequence text as it appears in the reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionSequence(String);

impl RecognitionSequence {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the reference data marks the site as not established
    pub fn is_unknown(&self) -> bool {
        self.0.trim() == UNKNOWN_SEQUENCE
    }
}

impl From<&str> for RecognitionSequence {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// One enzyme that binds a strand, with every 1-based site position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnzymeSites {
    pub enzyme: String,
    pub recognition_sequence: String,
    pub positions: Vec<usize>,
}

/// Results for a single strand
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrandReport {
    /// Record id when the strand came from a FASTA file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub strand_length: usize,
    pub enzymes: Vec<EnzymeSites>,
}

impl StrandReport {
    pub fn enzyme_names(&self) -> impl Iterator<Item = &str> {
        self.enzymes.iter().map(|e| e.enzyme.as_str())
    }
}
