//! Command-line surface: argument parsing, strand input and output rendering

use std::env;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use restriction_scan::{load_table, read_fasta, EnzymeQuery, StrandReport};

/// Reference file name looked up next to the executable
pub const DEFAULT_REFERENCE_FILE: &str = "link_allenz.txt";

/// Prompt shown when no strand is given on the command line
pub const STRAND_PROMPT: &str = "Enter a DNA sequence: ";

/// Report which restriction enzymes bind a DNA strand
#[derive(Debug, Parser)]
#[command(name = "restriction_scan", version)]
pub struct Args {
    /// DNA strand to scan (prompted for when omitted)
    pub strand: Option<String>,

    /// REBASE reference file (default: link_allenz.txt next to the executable)
    #[arg(short, long, value_name = "FILE", env = "RESTRICTION_SCAN_REFERENCE")]
    pub reference: Option<PathBuf>,

    /// Print the 1-based site positions of a single enzyme
    #[arg(short, long, value_name = "NAME")]
    pub enzyme: Option<String>,

    /// Print sites for every binding enzyme
    #[arg(short, long)]
    pub positions: bool,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Scan every record of a FASTA file instead of a single strand
    #[arg(short, long, value_name = "FILE", conflicts_with = "strand")]
    pub fasta: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log directive for the verbosity flag
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Plain-text layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Names,
    Sites,
    Json,
}

impl OutputFormat {
    pub fn from_args(args: &Args) -> Self {
        if args.json {
            Self::Json
        } else if args.positions {
            Self::Sites
        } else {
            Self::Names
        }
    }
}

/// Resolve the reference file: explicit path, then next to the executable,
/// then the working directory.
pub fn reference_path(args: &Args) -> PathBuf {
    if let Some(path) = &args.reference {
        return path.clone();
    }

    let beside_exe = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_REFERENCE_FILE)));

    match beside_exe {
        Some(path) if path.is_file() => path,
        _ => PathBuf::from(DEFAULT_REFERENCE_FILE),
    }
}

/// Prompt for a strand on `output` and read one line from `input`
pub fn prompt_strand<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    write!(output, "{}", STRAND_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("reading strand from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Strands to scan as (optional id, sequence)
fn collect_strands(args: &Args) -> Result<Vec<(Option<String>, String)>> {
    if let Some(path) = &args.fasta {
        let records = read_fasta(path)?;
        info!(path = %path.display(), records = records.len(), "read FASTA input");
        return Ok(records
            .into_iter()
            .map(|r| (Some(r.id), r.sequence))
            .collect());
    }

    let strand = match &args.strand {
        Some(strand) => strand.clone(),
        None => prompt_strand(io::stdin().lock(), io::stdout())?,
    };
    Ok(vec![(None, strand)])
}

pub fn run(args: &Args) -> Result<()> {
    let path = reference_path(args);
    debug!(path = %path.display(), "resolved reference file");
    let table = load_table(&path)?;
    let query = EnzymeQuery::new(&table);

    let strands = collect_strands(args)?;
    let format = OutputFormat::from_args(args);
    let mut out = BufWriter::new(io::stdout().lock());

    match &args.enzyme {
        Some(enzyme) => {
            let mut all = Vec::with_capacity(strands.len());
            for (id, strand) in &strands {
                let positions = query.match_positions(enzyme, strand)?;
                all.push((id, positions));
            }
            write_positions(&mut out, &all, format)?;
        }
        None => {
            let reports: Vec<StrandReport> = strands
                .into_iter()
                .map(|(id, strand)| query.report(id, &strand))
                .collect();
            write_reports(&mut out, &reports, format)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Write binding results for each strand
pub fn write_reports<W: Write>(out: &mut W, reports: &[StrandReport], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        match reports {
            [single] if single.id.is_none() => serde_json::to_writer_pretty(&mut *out, single)?,
            _ => serde_json::to_writer_pretty(&mut *out, reports)?,
        }
        writeln!(out)?;
        return Ok(());
    }

    for report in reports {
        if let Some(id) = &report.id {
            writeln!(out, ">{}", id)?;
        }
        for sites in &report.enzymes {
            match format {
                OutputFormat::Sites => writeln!(
                    out,
                    "{}\t{}\t{}",
                    sites.enzyme,
                    sites.recognition_sequence,
                    join_positions(&sites.positions)
                )?,
                _ => writeln!(out, "{}", sites.enzyme)?,
            }
        }
    }
    Ok(())
}

/// Write the site positions of one enzyme for each strand
pub fn write_positions<W: Write>(
    out: &mut W,
    results: &[(&Option<String>, Vec<usize>)],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        match results {
            [(None, positions)] => serde_json::to_writer(&mut *out, positions)?,
            _ => {
                let by_id: Vec<serde_json::Value> = results
                    .iter()
                    .map(|(id, positions)| serde_json::json!({ "id": id, "positions": positions }))
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &by_id)?;
            }
        }
        writeln!(out)?;
        return Ok(());
    }

    for (id, positions) in results {
        if let Some(id) = id {
            writeln!(out, ">{}", id)?;
        }
        for position in positions {
            writeln!(out, "{}", position)?;
        }
    }
    Ok(())
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
