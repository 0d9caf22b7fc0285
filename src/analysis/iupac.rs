//! IUPAC ambiguity codes and recognition sequence compilation

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::bytes::{Regex, RegexBuilder};

use super::error::{EnzymeError, Result};
use super::types::RecognitionSequence;

/// Standard DNA bases, in mask bit order
pub const STANDARD_BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Separator between whole alternative sites in a recognition sequence
pub const ALTERNATIVE_SEPARATOR: char = ',';

/// IUPAC code to the exact bases it stands for
const EXPANSIONS: [(u8, &[u8]); 15] = [
    (b'A', b"A"),
    (b'C', b"C"),
    (b'G', b"G"),
    (b'T', b"T"),
    (b'R', b"AG"),
    (b'Y', b"CT"),
    (b'M', b"AC"),
    (b'K', b"GT"),
    (b'S', b"CG"),
    (b'W', b"AT"),
    (b'B', b"CGT"),
    (b'D', b"AGT"),
    (b'H', b"ACT"),
    (b'V', b"ACG"),
    (b'N', b"ACGT"),
];

/// IUPAC code to the regex fragment matching one position
static CODE_TO_CLASS: Lazy<HashMap<u8, String>> = Lazy::new(|| {
    EXPANSIONS
        .iter()
        .map(|&(code, _)| (code, mask_to_class(base_to_bit(code))))
        .collect()
});

// ── Bitmask representation: bit 0 = A, bit 1 = C, bit 2 = G, bit 3 = T ────

/// Convert an IUPAC code byte to the bitmask of the bases it represents.
/// Returns 0 for unrecognized bytes, lowercase included.
#[inline]
pub fn base_to_bit(b: u8) -> u8 {
    match b {
        b'A' => 0b0001,
        b'C' => 0b0010,
        b'G' => 0b0100,
        b'T' => 0b1000,
        b'R' => 0b0101,
        b'Y' => 0b1010,
        b'S' => 0b0110,
        b'W' => 0b1001,
        b'K' => 0b1100,
        b'M' => 0b0011,
        b'B' => 0b1110,
        b'D' => 0b1101,
        b'H' => 0b1011,
        b'V' => 0b0111,
        b'N' => 0b1111,
        _ => 0,
    }
}

/// Check if a byte is one of the fifteen IUPAC nucleotide codes
#[inline]
pub fn is_iupac_code(b: u8) -> bool {
    base_to_bit(b) != 0
}

/// Get the exact bases represented by an IUPAC code
pub fn expand_code(code: u8) -> Option<&'static [u8]> {
    EXPANSIONS
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, bases)| bases)
}

/// Render a base mask as a single-position regex fragment: `A` or `[AG]`
fn mask_to_class(mask: u8) -> String {
    let bases: String = STANDARD_BASES
        .iter()
        .enumerate()
        .filter(|&(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, &base)| base as char)
        .collect();

    if bases.len() == 1 {
        bases
    } else {
        format!("[{}]", bases)
    }
}

/// Regex fragment for one comma-free alternative. Characters outside the
/// IUPAC table (cut marks, offsets, whitespace) contribute nothing.
fn alternative_expression(alternative: &str) -> String {
    alternative
        .bytes()
        .filter_map(|b| CODE_TO_CLASS.get(&b))
        .map(String::as_str)
        .collect()
}

/// A recognition sequence compiled into a case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    expression: String,
    alternatives: usize,
    regex: Regex,
}

impl CompiledPattern {
    /// The generated expression, e.g. `GAATTC` or `G[AG]CG[CT]C`
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// The recognition sequence text this pattern was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of OR'd site variants
    pub fn alternatives(&self) -> usize {
        self.alternatives
    }

    pub fn is_match(&self, strand: &str) -> bool {
        self.regex.is_match(strand.as_bytes())
    }

    /// 0-based start of the leftmost match beginning at or after `offset`
    pub(crate) fn find_from(&self, strand: &[u8], offset: usize) -> Option<usize> {
        self.regex.find_at(strand, offset).map(|m| m.start())
    }
}

/// Compile a recognition sequence into a matcher.
///
/// Alternatives left empty once unrecognized characters are dropped are
/// discarded; if none remain the sequence is rejected, so a compiled
/// pattern always consumes at least one base.
pub fn compile(sequence: &RecognitionSequence) -> Result<CompiledPattern> {
    let alternatives: Vec<String> = sequence
        .as_str()
        .split(ALTERNATIVE_SEPARATOR)
        .map(alternative_expression)
        .filter(|expr| !expr.is_empty())
        .collect();

    if alternatives.is_empty() {
        return Err(EnzymeError::EmptyPattern {
            sequence: sequence.as_str().to_string(),
        });
    }

    let expression = alternatives.join("|");
    let regex = RegexBuilder::new(&expression)
        .case_insensitive(true)
        .unicode(false)
        .build()?;

    Ok(CompiledPattern {
        source: sequence.as_str().to_string(),
        expression,
        alternatives: alternatives.len(),
        regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(seq: &str) -> CompiledPattern {
        compile(&RecognitionSequence::new(seq)).unwrap()
    }

    #[test]
    fn test_single_codes_match_exactly_their_bases() {
        for &(code, bases) in EXPANSIONS.iter() {
            let p = pattern(&(code as char).to_string());
            for &base in STANDARD_BASES.iter() {
                let expected = bases.contains(&base);
                let upper = (base as char).to_string();
                let lower = upper.to_ascii_lowercase();
                assert_eq!(p.is_match(&upper), expected, "code {} base {}", code as char, upper);
                assert_eq!(p.is_match(&lower), expected, "code {} base {}", code as char, lower);
            }
        }
    }

    #[test]
    fn test_mask_matches_expansion_table() {
        for &(code, bases) in EXPANSIONS.iter() {
            let mask = bases.iter().fold(0u8, |acc, &b| acc | base_to_bit(b));
            assert_eq!(base_to_bit(code), mask, "mask for '{}'", code as char);
        }
        assert_eq!(base_to_bit(b'X'), 0);
        assert_eq!(base_to_bit(b'a'), 0);
        assert!(is_iupac_code(b'N'));
        assert!(!is_iupac_code(b','));
    }

    #[test]
    fn test_expression_rendering() {
        assert_eq!(pattern("GAATTC").as_str(), "GAATTC");
        assert_eq!(pattern("GRCGYC").as_str(), "G[AG]CG[CT]C");
        assert_eq!(pattern("N").as_str(), "[ACGT]");
        assert_eq!(expand_code(b'B'), Some(&b"CGT"[..]));
        assert_eq!(expand_code(b'?'), None);
    }

    #[test]
    fn test_alternatives() {
        let p = pattern("AT,GC");
        assert_eq!(p.alternatives(), 2);
        assert!(p.is_match("AT"));
        assert!(p.is_match("gc"));
        assert!(p.is_match("TTGCTT"));
        assert!(!p.is_match("ACGA"));
        assert!(!p.is_match("TTAA"));
        assert!(!p.is_match(""));
    }

    #[test]
    fn test_unrecognized_characters_are_dropped() {
        assert_eq!(pattern("GACNNN^NNGTC").as_str(), "GAC[ACGT][ACGT][ACGT][ACGT][ACGT]GTC");
        assert_eq!(pattern("CCTTC(6/5)").as_str(), "CCTTC");
        assert_eq!(pattern(" GA ATTC\t").as_str(), "GAATTC");
    }

    #[test]
    fn test_lowercase_codes_are_not_codes() {
        assert_eq!(pattern("GAattC").as_str(), "GAC");
        assert!(compile(&RecognitionSequence::new("gaattc")).is_err());
    }

    #[test]
    fn test_empty_alternatives_are_discarded() {
        let p = pattern("GAATTC,");
        assert_eq!(p.alternatives(), 1);
        assert_eq!(p.as_str(), "GAATTC");
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = compile(&RecognitionSequence::new("(8/7)")).unwrap_err();
        assert!(matches!(err, EnzymeError::EmptyPattern { .. }));
        assert!(compile(&RecognitionSequence::new("")).is_err());
    }

    #[test]
    fn test_source_is_kept() {
        let p = pattern("CCTTC(6/5)");
        assert_eq!(p.source(), "CCTTC(6/5)");
    }
}
