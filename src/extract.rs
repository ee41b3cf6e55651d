//! Single-pass chain extraction.
//!
//! Keeps the `ATOM` and `TER` records of one chain, resolves alternate
//! locations to the unlabelled/`A` conformer, and stops at the end of the
//! first model that contains the chain.

use crate::record::{Record, RecordKind};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use tracing::trace;

/// What to do with one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<'a> {
    /// Write these bytes to the output.
    Emit(Cow<'a, [u8]>),
    /// Drop the line.
    Skip,
    /// Drop a record of the chain that belongs to an alternate location other than `A`.
    DropAltLoc,
    /// The first model containing the chain is complete; read no further.
    Stop,
}

/// Per-entry scan state for one requested chain.
#[derive(Debug)]
pub struct ChainExtractor {
    chain: u8,
    chain_seen: bool,
}

impl ChainExtractor {
    /// Create an extractor for `chain`. The identifier is matched upper-cased
    /// against the record column verbatim.
    pub fn new(chain: u8) -> Self {
        Self {
            chain: chain.to_ascii_uppercase(),
            chain_seen: false,
        }
    }

    /// Whether a record of the requested chain has been seen yet.
    pub fn chain_seen(&self) -> bool {
        self.chain_seen
    }

    /// Decide what to do with the next line of input.
    pub fn feed<'a>(&mut self, line: &'a [u8]) -> Step<'a> {
        let record = Record::new(line);
        match record.kind() {
            RecordKind::EndModel if self.chain_seen => Step::Stop,
            RecordKind::Atom | RecordKind::Ter if record.chain_id() == Some(self.chain) => {
                self.chain_seen = true;
                match record.alt_loc() {
                    Some(b' ') => Step::Emit(Cow::Borrowed(record.as_bytes())),
                    Some(b'A') => Step::Emit(Cow::Owned(record.with_blank_alt_loc())),
                    _ => Step::DropAltLoc,
                }
            }
            _ => Step::Skip,
        }
    }
}

/// Counters from one extraction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read from the input, including the one that stopped the scan
    pub lines_read: usize,
    /// Lines written to the output
    pub lines_written: usize,
    /// Matching records dropped for carrying an alternate location other than `A`
    pub alt_locs_dropped: usize,
    /// Whether any record of the chain was found
    pub chain_found: bool,
    /// Whether the scan ended on `ENDMDL` rather than end of input
    pub stopped_at_model_end: bool,
}

/// Copy the records of `chain` from `reader` to `writer`.
pub fn extract_chain<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    chain: u8,
) -> io::Result<ExtractStats> {
    let mut extractor = ChainExtractor::new(chain);
    let mut stats = ExtractStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let was_seen = extractor.chain_seen();
        match extractor.feed(&line) {
            Step::Emit(out) => {
                writer.write_all(&out)?;
                stats.lines_written += 1;
            }
            Step::Skip => {}
            Step::DropAltLoc => stats.alt_locs_dropped += 1,
            Step::Stop => {
                trace!(line = stats.lines_read, "end of first model containing the chain");
                stats.stopped_at_model_end = true;
                break;
            }
        }
        if !was_seen && extractor.chain_seen() {
            trace!(line = stats.lines_read, "first record of the chain");
        }
    }

    writer.flush()?;
    stats.chain_found = extractor.chain_seen();
    Ok(stats)
}
