//! Enzyme lookups against a loaded reference table

use super::error::{EnzymeError, Result};
use super::rebase::EnzymeTable;
use super::scanner::{find_matches, first_match};
use super::types::{EnzymeSites, StrandReport};

/// Read-only query layer over an [`EnzymeTable`].
#[derive(Debug, Clone, Copy)]
pub struct EnzymeQuery<'t> {
    table: &'t EnzymeTable,
}

impl<'t> EnzymeQuery<'t> {
    pub fn new(table: &'t EnzymeTable) -> Self {
        Self { table }
    }

    /// All 1-based positions where `enzyme` binds `strand`.
    ///
    /// Enzymes absent from the table, including those whose recognition
    /// sequence was unknown in the reference data, are an error.
    pub fn match_positions(&self, enzyme: &str, strand: &str) -> Result<Vec<usize>> {
        let pattern = self
            .table
            .get(enzyme)
            .ok_or_else(|| EnzymeError::UnknownEnzyme(enzyme.to_string()))?;
        Ok(find_matches(pattern, strand))
    }

    /// Names of every enzyme with at least one site in `strand`, ascending
    pub fn binding_enzymes(&self, strand: &str) -> Vec<String> {
        self.table
            .iter()
            .filter(|(_, pattern)| first_match(pattern, strand).is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Every binding enzyme with its sites, ordered by name
    pub fn binding_sites(&self, strand: &str) -> Vec<EnzymeSites> {
        self.table
            .iter()
            .filter_map(|(name, pattern)| {
                let positions = find_matches(pattern, strand);
                (!positions.is_empty()).then(|| EnzymeSites {
                    enzyme: name.clone(),
                    recognition_sequence: pattern.source().to_string(),
                    positions,
                })
            })
            .collect()
    }

    pub fn report(&self, id: Option<String>, strand: &str) -> StrandReport {
        StrandReport {
            id,
            strand_length: strand.len(),
            enzymes: self.binding_sites(strand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EnzymeTable {
        EnzymeTable::from_entries([
            ("EcoRI", "GAATTC"),
            ("BamHI", "GGATCC"),
            ("HinfI", "G^ANTC"),
            ("AagI", "?"),
            ("AluI", "AG^CT"),
        ])
    }

    #[test]
    fn test_match_positions() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        assert_eq!(query.match_positions("EcoRI", "AGAATTCAGAATTC").unwrap(), vec![2, 9]);
        assert!(query.match_positions("BamHI", "AGAATTC").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_enzyme() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        let err = query.match_positions("NotAnEnzyme", "ACGT").unwrap_err();
        assert!(matches!(err, EnzymeError::UnknownEnzyme(ref name) if name == "NotAnEnzyme"));
        // Unknown recognition sequence never entered the table
        assert!(matches!(
            query.match_positions("AagI", "ACGT"),
            Err(EnzymeError::UnknownEnzyme(_))
        ));
    }

    #[test]
    fn test_enzyme_names_are_case_sensitive() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        assert!(query.match_positions("ecori", "GAATTC").is_err());
    }

    #[test]
    fn test_binding_enzymes_sorted() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        assert_eq!(query.binding_enzymes("AGAATTCAGAATTC"), vec!["EcoRI"]);
        assert_eq!(
            query.binding_enzymes("AGCTGGATCC"),
            vec!["AluI".to_string(), "BamHI".to_string()]
        );
        assert!(query.binding_enzymes("").is_empty());
    }

    #[test]
    fn test_binding_enzymes_idempotent() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        let strand = "gaattcggatccagct";
        assert_eq!(query.binding_enzymes(strand), query.binding_enzymes(strand));
    }

    #[test]
    fn test_binding_sites_agree_with_binding_enzymes() {
        let table = table();
        let query = EnzymeQuery::new(&table);
        let strand = "AGAATTCAGCTGACTCGGATCC";
        let names: Vec<String> = query
            .binding_sites(strand)
            .into_iter()
            .map(|s| s.enzyme)
            .collect();
        assert_eq!(names, query.binding_enzymes(strand));

        let report = query.report(None, strand);
        assert_eq!(report.strand_length, strand.len());
        let hinf = report.enzymes.iter().find(|s| s.enzyme == "HinfI").unwrap();
        assert_eq!(hinf.recognition_sequence, "G^ANTC");
        assert_eq!(hinf.positions, vec![12]);
        let names: Vec<&str> = report.enzyme_names().collect();
        assert_eq!(names, vec!["AluI", "BamHI", "EcoRI", "HinfI"]);
    }

    #[test]
    fn test_independent_tables() {
        let a = EnzymeTable::from_entries([("X", "AAA")]);
        let b = EnzymeTable::from_entries([("X", "CCC")]);
        assert_eq!(EnzymeQuery::new(&a).binding_enzymes("AAA"), vec!["X"]);
        assert!(EnzymeQuery::new(&b).binding_enzymes("AAA").is_empty());
    }
}
