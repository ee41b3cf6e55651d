//! Fixed-column access to PDB text records.
//!
//! Column numbers in the PDB format documentation are 1-based; the constants
//! below are the corresponding 0-based byte offsets.
//! See <https://www.wwpdb.org/documentation/file-format-content/format33/sect9.html>

/// Byte offset of the alternate location indicator (column 17).
pub const ALT_LOC_COLUMN: usize = 16;
/// Byte offset of the chain identifier (column 22).
pub const CHAIN_ID_COLUMN: usize = 21;

/// The record types that matter for chain extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// `ATOM` coordinate record
    Atom,
    /// `TER` chain terminator
    Ter,
    /// `ENDMDL` end of a model
    EndModel,
    /// Anything else, including `HETATM`
    Other,
}

/// A single line of structure text, viewed through its fixed columns.
///
/// The line is borrowed as raw bytes (including any line terminator) so that
/// records are written back out exactly as read.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    line: &'a [u8],
}

impl<'a> Record<'a> {
    /// Wrap one line of structure text.
    pub fn new(line: &'a [u8]) -> Self {
        Self { line }
    }

    /// The raw bytes of the line.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.line
    }

    /// Classify the record by its tag in columns 1-6.
    pub fn kind(&self) -> RecordKind {
        if self.line.starts_with(b"ENDMDL") {
            RecordKind::EndModel
        } else if self.line.starts_with(b"ATOM") {
            RecordKind::Atom
        } else if self.line.starts_with(b"TER") {
            RecordKind::Ter
        } else {
            RecordKind::Other
        }
    }

    /// Chain identifier in column 22, or `None` if the line is too short.
    pub fn chain_id(&self) -> Option<u8> {
        self.line.get(CHAIN_ID_COLUMN).copied()
    }

    /// Alternate location indicator in column 17, or `None` if the line is too short.
    pub fn alt_loc(&self) -> Option<u8> {
        self.line.get(ALT_LOC_COLUMN).copied()
    }

    /// Copy of the line with the alternate location indicator replaced by a blank.
    pub fn with_blank_alt_loc(&self) -> Vec<u8> {
        let mut line = self.line.to_vec();
        if let Some(alt_loc) = line.get_mut(ALT_LOC_COLUMN) {
            *alt_loc = b' ';
        }
        line
    }
}
