//! Restriction Scan - Restriction Enzyme Site Finder
//!
//! Loads a REBASE reference table, compiles each IUPAC recognition
//! sequence into a case-insensitive matcher and reports which enzymes
//! bind a DNA strand, with every (overlapping) 1-based site position.

pub mod analysis;

pub use analysis::*;
