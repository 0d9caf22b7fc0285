//! REBASE reference table parsing
//!
//! The reference file is a sequence of tagged records. Only two tags are
//! read: `<1>` carries the enzyme name and `<5>`, four lines further down,
//! carries the recognition sequence. Everything else in a record is ignored.

use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::{EnzymeError, Result};
use super::iupac::{compile, CompiledPattern};
use super::types::RecognitionSequence;

/// Tag of the line holding the enzyme name
pub const NAME_TAG: &str = "<1>";

/// Tag of the line holding the recognition sequence
pub const SEQUENCE_TAG: &str = "<5>";

/// Line distance from the name line to the sequence line
const SEQUENCE_LINE_OFFSET: usize = 4;

/// Enzyme name to compiled recognition pattern, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct EnzymeTable {
    patterns: BTreeMap<String, CompiledPattern>,
}

impl EnzymeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (name, recognition sequence) pairs, applying the
    /// same skipping rules as the file loader.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (name, sequence) in entries {
            table.add_record(name, &RecognitionSequence::from(sequence));
        }
        table
    }

    /// Insert a compiled pattern, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, pattern: CompiledPattern) -> Option<CompiledPattern> {
        self.patterns.insert(name.into(), pattern)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledPattern> {
        self.patterns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Enzyme names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, CompiledPattern> {
        self.patterns.iter()
    }

    /// Compile and store one record. Returns false when the record was skipped.
    fn add_record(&mut self, name: &str, sequence: &RecognitionSequence) -> bool {
        if name.is_empty() {
            debug!("skipping record with empty enzyme name");
            return false;
        }
        if sequence.is_unknown() {
            debug!(enzyme = name, "skipping enzyme with unknown recognition sequence");
            return false;
        }

        match compile(sequence) {
            Ok(pattern) => {
                if self.insert(name, pattern).is_some() {
                    debug!(enzyme = name, "duplicate enzyme name, later record wins");
                }
                true
            }
            Err(err) => {
                warn!(enzyme = name, error = %err, "skipping enzyme");
                false
            }
        }
    }
}

impl<'a> IntoIterator for &'a EnzymeTable {
    type Item = (&'a String, &'a CompiledPattern);
    type IntoIter = btree_map::Iter<'a, String, CompiledPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read and parse a REBASE file.
pub fn load_table(path: impl AsRef<Path>) -> Result<EnzymeTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| EnzymeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "loading reference table");
    Ok(parse_rebase(&text))
}

/// Parse REBASE text into an enzyme table.
///
/// A record is a `<1>` line whose fourth following line starts with `<5>`.
/// Records with `?` as sequence are left out. A repeated name overwrites
/// the earlier entry.
pub fn parse_rebase(text: &str) -> EnzymeTable {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut table = EnzymeTable::new();
    let mut records = 0usize;
    let mut skipped = 0usize;
    let mut i = 0;

    while i < lines.len() {
        let record = lines[i].strip_prefix(NAME_TAG).and_then(|name| {
            lines
                .get(i + SEQUENCE_LINE_OFFSET)
                .and_then(|line| line.strip_prefix(SEQUENCE_TAG))
                .map(|sequence| (name.trim(), sequence))
        });

        match record {
            Some((name, sequence)) => {
                records += 1;
                if !table.add_record(name, &RecognitionSequence::new(sequence)) {
                    skipped += 1;
                }
                i += SEQUENCE_LINE_OFFSET + 1;
            }
            None => i += 1,
        }
    }

    info!(
        records,
        skipped,
        enzymes = table.len(),
        "parsed reference table"
    );
    table
}
