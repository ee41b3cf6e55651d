#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # pdbchain library
//!
//! Building blocks for pulling one chain out of archived PDB entries:
//! [`Record`] gives named access to the fixed columns of a structure line,
//! [`ChainExtractor`] holds the per-entry scan state, and [`run_batch`]
//! drives staging and extraction for a whole list of entries.
//!
//! ```no_run
//! use pdbchain::{run_batch, ArchiveLayout, Entry};
//!
//! let layout = ArchiveLayout::new("/data/pdb", ".");
//! let entries = vec![Entry::new("1tsr", "B"), Entry::new("1a5w", "A")];
//! let report = run_batch(&layout, entries, false).unwrap();
//! println!("{} chains extracted", report.extracted);
//! ```

mod chains;
mod entry;
mod error;
mod extract;
mod pipeline;
mod record;

// Re-export key public types
pub use chains::{summarize, ChainSummary};
pub use entry::{read_entries, ArchiveLayout, Entry, OUTPUT_FILE, STAGING_FILE};
pub use error::ExtractError;
pub use extract::{extract_chain, ChainExtractor, ExtractStats, Step};
pub use pipeline::{process_entry, run_batch, BatchReport, EntryOutcome};
pub use record::{Record, RecordKind, ALT_LOC_COLUMN, CHAIN_ID_COLUMN};
