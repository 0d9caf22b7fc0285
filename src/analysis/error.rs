//! Error types for table loading and enzyme queries

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnzymeError {
    /// The reference file could not be opened or read
    #[error("cannot read reference file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The enzyme is not a key of the loaded table
    #[error("enzyme without known recognition sequence: {0}")]
    UnknownEnzyme(String),

    /// Nothing matchable was left after dropping non-IUPAC characters
    #[error("recognition sequence {sequence:?} contains no IUPAC codes")]
    EmptyPattern { sequence: String },

    #[error("pattern build failed: {0}")]
    Pattern(#[from] regex::Error),

    /// A FASTA input record could not be read
    #[error("FASTA input: {0}")]
    Fasta(String),
}

pub type Result<T> = std::result::Result<T, EnzymeError>;
