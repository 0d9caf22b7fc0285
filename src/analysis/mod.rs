mod error;
mod types;
mod iupac;
mod rebase;
mod scanner;
mod query;
mod fasta;

pub use error::*;
pub use types::*;
pub use iupac::*;
pub use rebase::*;
pub use scanner::*;
pub use query::*;
pub use fasta::*;
