//! Stage, extract and report, one entry at a time.

use crate::entry::{ArchiveLayout, Entry};
use crate::error::ExtractError;
use crate::extract::{extract_chain, ExtractStats};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;
use tracing::{debug, error, info, info_span, warn};

/// How the extraction of one entry ended.
#[derive(Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Records of the chain were written to `output`.
    Extracted {
        /// Path of the extracted chain
        output: PathBuf,
        /// Counters from the scan
        stats: ExtractStats,
    },
    /// The chain does not occur in the structure; `output` is empty.
    ChainNotFound {
        /// Path of the (empty) output file
        output: PathBuf,
    },
}

/// Stage the archive for `entry` and extract its chain into the entry directory.
///
/// Any output left by an earlier run is removed first, so a failed entry never
/// leaves a chain file behind.
pub fn process_entry(layout: &ArchiveLayout, entry: &Entry) -> Result<EntryOutcome, ExtractError> {
    let output = layout.output_path(entry);
    match std::fs::remove_file(&output) {
        Ok(()) => debug!("Removed previous {}", output.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ExtractError::io(&output, e)),
    }

    let staging = layout.stage(entry)?;

    let input = File::open(&staging).map_err(|e| ExtractError::io(&staging, e))?;
    let out = File::create(&output).map_err(|e| ExtractError::io(&output, e))?;
    let stats = extract_chain(BufReader::new(input), BufWriter::new(out), entry.chain())
        .map_err(|e| ExtractError::io(&output, e))?;
    debug!(?stats, "scan finished");

    if stats.chain_found {
        Ok(EntryOutcome::Extracted { output, stats })
    } else {
        Ok(EntryOutcome::ChainNotFound { output })
    }
}

/// Totals over a batch of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output files written in this batch, in list order
    pub outputs: Vec<PathBuf>,
    /// Entries whose chain was written out
    pub extracted: usize,
    /// Entries whose structure lacks the requested chain
    pub chain_not_found: usize,
    /// Entries that could not be staged or written
    pub failed: usize,
    /// List lines that did not parse as an entry
    pub skipped_lines: usize,
}

/// Process `entries` in order.
///
/// Malformed list lines are skipped with a warning, or abort the batch with
/// the offending error when `strict` is set. Failures of individual entries
/// are logged and counted; they never stop the batch.
pub fn run_batch<I>(
    layout: &ArchiveLayout,
    entries: I,
    strict: bool,
) -> Result<BatchReport, ExtractError>
where
    I: IntoIterator<Item = Result<Entry, ExtractError>>,
{
    let mut report = BatchReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if strict => return Err(e),
            Err(e) => {
                warn!("Skipping list line: {e}");
                report.skipped_lines += 1;
                continue;
            }
        };

        let _span = info_span!("entry", pdb_id = %entry.pdb_id(), chain = %entry.chain_char())
            .entered();
        match process_entry(layout, &entry) {
            Ok(EntryOutcome::Extracted { output, stats }) => {
                info!(
                    "Wrote {} records to {}",
                    stats.lines_written,
                    output.display()
                );
                if stats.alt_locs_dropped > 0 {
                    debug!("Dropped {} alternate-location records", stats.alt_locs_dropped);
                }
                report.extracted += 1;
                report.outputs.push(output);
            }
            Ok(EntryOutcome::ChainNotFound { output }) => {
                warn!(
                    "Chain {} not found in {}; {} is empty",
                    entry.chain_char(),
                    entry.pdb_id(),
                    output.display()
                );
                report.chain_not_found += 1;
            }
            Err(e) => {
                error!("{e}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
