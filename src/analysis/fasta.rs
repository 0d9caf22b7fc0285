//! FASTA input for scanning many strands at once

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use super::error::{EnzymeError, Result};

/// One named strand read from a FASTA file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandRecord {
    pub id: String,
    pub sequence: String,
}

/// Read every record of a FASTA file.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<StrandRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EnzymeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fasta(file)
}

/// Parse FASTA records from any reader. Sequence lines are joined as-is;
/// no case folding or character filtering is applied.
pub fn parse_fasta<R: Read>(reader: R) -> Result<Vec<StrandRecord>> {
    let mut records = Vec::new();

    for result in fasta::Reader::new(reader).records() {
        let record = result.map_err(|e| EnzymeError::Fasta(e.to_string()))?;
        records.push(StrandRecord {
            id: record.id().to_string(),
            sequence: String::from_utf8_lossy(record.seq()).into_owned(),
        });
    }

    Ok(records)
}
