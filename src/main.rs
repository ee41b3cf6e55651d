use anyhow::Context;
use clap::Parser;
use pdbchain::{read_entries, run_batch, summarize, ArchiveLayout, BatchReport, ChainSummary};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, info, trace, warn, Level};

/// Extract one chain per entry from a local archive of gzipped PDB files.
///
/// Each line of the list file names a PDB entry and a chain, e.g. `1TSR B`.
/// For every entry a directory such as `1tsrb/` is created holding the
/// decompressed structure (`original.pdb`) and the chain's ATOM/TER records
/// from the first model it appears in (`input.pdb`).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// List file with one `<pdb id> <chain id>` pair per line
    list: PathBuf,

    /// Root of the archive, laid out as `<root>/<middle two letters>/pdb<id>.ent.gz`
    #[arg(
        short,
        long,
        env = "PDB_ARCHIVE_ROOT",
        default_value = "/home/programs/pdb_copy/pdb"
    )]
    archive_root: PathBuf,

    /// Directory in which the per-entry directories are created
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Abort on the first malformed list line instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Parse each extracted chain and log its residue count and sequence
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    trace!("{args:?}");

    let (report, _) = run(&args)?;

    info!(
        "Extracted {} chains; {} not found, {} failed, {} list lines skipped",
        report.extracted, report.chain_not_found, report.failed, report.skipped_lines
    );
    if report.failed > 0 || report.chain_not_found > 0 {
        warn!(
            "{} of {} entries produced no chain",
            report.failed + report.chain_not_found,
            report.extracted + report.failed + report.chain_not_found
        );
    }

    Ok(())
}

/// Read the list, process every entry and, with `--summary`, summarise the
/// chains extracted in this run.
fn run(args: &Args) -> anyhow::Result<(BatchReport, Vec<ChainSummary>)> {
    let list = File::open(&args.list)
        .with_context(|| format!("Failed to open list file {}", args.list.display()))?;
    let entries = read_entries(BufReader::new(list))
        .with_context(|| format!("Failed to read list file {}", args.list.display()))?;
    debug!("Read {} list lines", entries.len());

    let layout = ArchiveLayout::new(&args.archive_root, &args.output);
    let report = run_batch(&layout, entries, args.strict).context("Malformed list file")?;

    let summaries = match args.summary {
        true => report.outputs.iter().flat_map(|output| summarize(output)).collect(),
        false => Vec::new(),
    };

    Ok((report, summaries))
}
