//! Overlapping site scanning over a strand

use super::iupac::CompiledPattern;

/// Every 1-based position where `pattern` starts in `strand`, overlapping
/// hits included.
///
/// After a hit at 0-based `i` the search resumes at `i + 1`, so "AA" in
/// "AAAA" yields `[1, 2, 3]`. Positions are byte offsets; nucleotide text is
/// ASCII so they coincide with letter positions. Compiled patterns never
/// match the empty string, which keeps every hit inside the strand.
pub fn find_matches(pattern: &CompiledPattern, strand: &str) -> Vec<usize> {
    let bytes = strand.as_bytes();
    let mut positions = Vec::new();
    let mut offset = 0;

    while offset <= bytes.len() {
        match pattern.find_from(bytes, offset) {
            Some(i) => {
                positions.push(i + 1);
                offset = i + 1;
            }
            None => break,
        }
    }

    positions
}

/// 1-based position of the first site, if any
pub fn first_match(pattern: &CompiledPattern, strand: &str) -> Option<usize> {
    pattern.find_from(strand.as_bytes(), 0).map(|i| i + 1)
}
