//! Entries from the list file and where their files live.

use crate::error::ExtractError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the decompressed archive inside an entry's directory.
pub const STAGING_FILE: &str = "original.pdb";
/// Name of the extracted chain inside an entry's directory.
pub const OUTPUT_FILE: &str = "input.pdb";

/// A structure identifier and the chain to take from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pdb_id: String,
    chain: u8,
}

impl Entry {
    /// Build an entry from a structure and chain identifier, normalising case.
    pub fn new(pdb_id: &str, chain: &str) -> Result<Self, ExtractError> {
        if pdb_id.len() != 4 || !pdb_id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ExtractError::InvalidPdbId(pdb_id.to_string()));
        }
        let chain = match chain.as_bytes() {
            [c] if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
            _ => return Err(ExtractError::InvalidChainId(chain.to_string())),
        };

        Ok(Self {
            pdb_id: pdb_id.to_ascii_lowercase(),
            chain,
        })
    }

    /// Parse `<pdb id> <chain id> [ignored...]` from one list line.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, ExtractError> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(pdb_id), Some(chain)) => Self::new(pdb_id, chain),
            _ => Err(ExtractError::MalformedLine {
                line_no,
                line: line.to_string(),
            }),
        }
    }

    /// Lower-case four character PDB identifier.
    pub fn pdb_id(&self) -> &str {
        &self.pdb_id
    }

    /// Upper-case chain identifier.
    pub fn chain(&self) -> u8 {
        self.chain
    }

    /// The chain identifier as a character.
    pub fn chain_char(&self) -> char {
        self.chain as char
    }

    /// Directory name for this entry, e.g. `1tsrb` for 1TSR chain B.
    pub fn dir_name(&self) -> String {
        format!("{}{}", self.pdb_id, self.chain_char().to_ascii_lowercase())
    }

    /// The two-character archive shard, e.g. `ts` for `1tsr`.
    pub fn shard(&self) -> &str {
        &self.pdb_id[1..3]
    }
}

/// Read every non-blank line of a list file as an entry.
///
/// Blank lines are skipped; every other line yields either an entry or the
/// error that prevented parsing it, in file order.
pub fn read_entries<R: BufRead>(reader: R) -> io::Result<Vec<Result<Entry, ExtractError>>> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        entries.push(Entry::parse(&line, i + 1));
    }
    Ok(entries)
}

/// File-system layout of the source archive and the extraction output.
#[derive(Clone, Debug)]
pub struct ArchiveLayout {
    /// Root of the sharded archive: `<root>/<shard>/pdb<id>.ent.gz`
    pub archive_root: PathBuf,
    /// Directory under which one working directory per entry is created
    pub output_root: PathBuf,
}

impl ArchiveLayout {
    /// Layout reading archives under `archive_root` and writing under `output_root`.
    pub fn new(archive_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Location of the compressed archive for `entry`.
    pub fn archive_path(&self, entry: &Entry) -> PathBuf {
        self.archive_root
            .join(entry.shard())
            .join(format!("pdb{}.ent.gz", entry.pdb_id))
    }

    /// Working directory for `entry`.
    pub fn entry_dir(&self, entry: &Entry) -> PathBuf {
        self.output_root.join(entry.dir_name())
    }

    /// Decompressed archive for `entry`.
    pub fn staging_path(&self, entry: &Entry) -> PathBuf {
        self.entry_dir(entry).join(STAGING_FILE)
    }

    /// Extracted chain for `entry`.
    pub fn output_path(&self, entry: &Entry) -> PathBuf {
        self.entry_dir(entry).join(OUTPUT_FILE)
    }

    /// Decompress the archive for `entry` into its staging file, overwriting
    /// any previous copy, and return the staging path.
    pub fn stage(&self, entry: &Entry) -> Result<PathBuf, ExtractError> {
        let archive = self.archive_path(entry);
        if !archive.is_file() {
            return Err(ExtractError::ArchiveNotFound(archive));
        }

        let dir = self.entry_dir(entry);
        std::fs::create_dir_all(&dir).map_err(|e| ExtractError::io(&dir, e))?;

        let staging = self.staging_path(entry);
        let written = decompress(&archive, &staging)?;
        debug!(
            archive = %archive.display(),
            staging = %staging.display(),
            bytes = written,
            "staged archive"
        );

        if written == 0 {
            return Err(ExtractError::EmptyArchive(archive));
        }
        Ok(staging)
    }
}

fn decompress(archive: &Path, staging: &Path) -> Result<u64, ExtractError> {
    let file = File::open(archive).map_err(|e| ExtractError::io(archive, e))?;
    let mut decoder = GzDecoder::new(BufReader::new(file));

    let out = File::create(staging).map_err(|e| ExtractError::io(staging, e))?;
    let mut writer = BufWriter::new(out);
    let written = io::copy(&mut decoder, &mut writer).map_err(|e| ExtractError::io(archive, e))?;
    writer.flush().map_err(|e| ExtractError::io(staging, e))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn write_archive(root: &Path, entry: &Entry, text: &str) {
        let layout = ArchiveLayout::new(root, root);
        let path = layout.archive_path(entry);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    #[test]
    fn parse_normalises_case() {
        let entry = Entry::parse("1TSR b", 1).unwrap();
        assert_eq!(entry.pdb_id(), "1tsr");
        assert_eq!(entry.chain(), b'B');
        assert_eq!(entry.dir_name(), "1tsrb");
        assert_eq!(entry.shard(), "ts");
    }

    #[test]
    fn parse_ignores_extra_tokens() {
        let entry = Entry::parse("  1a5w\tA  extra tokens here", 3).unwrap();
        assert_eq!(entry, Entry::new("1a5w", "A").unwrap());
    }

    #[test]
    fn parse_rejects_short_lines() {
        match Entry::parse("1tsr", 7) {
            Err(ExtractError::MalformedLine { line_no, line }) => {
                assert_eq!(line_no, 7);
                assert_eq!(line, "1tsr");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_identifiers() {
        assert!(matches!(
            Entry::new("1ts", "B"),
            Err(ExtractError::InvalidPdbId(_))
        ));
        assert!(matches!(
            Entry::new("1t-r", "B"),
            Err(ExtractError::InvalidPdbId(_))
        ));
        assert!(matches!(
            Entry::new("1tsr", "AB"),
            Err(ExtractError::InvalidChainId(_))
        ));
    }

    #[test]
    fn chain_cannot_escape_entry_dir() {
        for chain in ["/", "\\", ".", "*"] {
            assert!(
                matches!(Entry::new("1tsr", chain), Err(ExtractError::InvalidChainId(_))),
                "{chain:?} accepted"
            );
        }
        assert_eq!(Entry::new("1tsr", "7").unwrap().dir_name(), "1tsr7");
    }

    #[test]
    fn read_entries_keeps_order_and_errors() {
        let list = "1TSR B\n\n1tsr\n1A5W A\n";
        let entries = read_entries(list.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].as_ref().unwrap(), &Entry::new("1tsr", "B").unwrap());
        assert!(matches!(
            entries[1],
            Err(ExtractError::MalformedLine { line_no: 3, .. })
        ));
        assert_eq!(entries[2].as_ref().unwrap().dir_name(), "1a5wa");
    }

    #[test]
    fn archive_path_uses_shard() {
        let layout = ArchiveLayout::new("/data/pdb", "/work");
        let entry = Entry::new("1TSR", "B").unwrap();
        assert_eq!(
            layout.archive_path(&entry),
            PathBuf::from("/data/pdb/ts/pdb1tsr.ent.gz")
        );
        assert_eq!(
            layout.output_path(&entry),
            PathBuf::from("/work/1tsrb/input.pdb")
        );
        assert_eq!(
            layout.staging_path(&entry),
            PathBuf::from("/work/1tsrb/original.pdb")
        );
    }

    #[test]
    fn stage_decompresses_archive() {
        let tmp = TempDir::new().unwrap();
        let entry = Entry::new("1abc", "A").unwrap();
        write_archive(tmp.path(), &entry, "ATOM      1  N   ALA A   1\n");

        let layout = ArchiveLayout::new(tmp.path(), tmp.path().join("out"));
        let staging = layout.stage(&entry).unwrap();
        assert_eq!(staging, tmp.path().join("out/1abca/original.pdb"));
        assert_eq!(
            std::fs::read_to_string(staging).unwrap(),
            "ATOM      1  N   ALA A   1\n"
        );
    }

    #[test]
    fn stage_reports_missing_archive() {
        let tmp = TempDir::new().unwrap();
        let layout = ArchiveLayout::new(tmp.path(), tmp.path());
        let entry = Entry::new("9xyz", "A").unwrap();
        assert!(matches!(
            layout.stage(&entry),
            Err(ExtractError::ArchiveNotFound(_))
        ));
        assert!(!layout.entry_dir(&entry).exists());
    }

    #[test]
    fn stage_reports_empty_archive() {
        let tmp = TempDir::new().unwrap();
        let entry = Entry::new("1abc", "A").unwrap();
        write_archive(tmp.path(), &entry, "");

        let layout = ArchiveLayout::new(tmp.path(), tmp.path());
        assert!(matches!(
            layout.stage(&entry),
            Err(ExtractError::EmptyArchive(_))
        ));
    }

    #[test]
    fn stage_reports_corrupt_archive() {
        let tmp = TempDir::new().unwrap();
        let entry = Entry::new("1abc", "A").unwrap();
        let layout = ArchiveLayout::new(tmp.path(), tmp.path().join("out"));
        let path = layout.archive_path(&entry);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not gzip at all").unwrap();

        assert!(matches!(
            layout.stage(&entry),
            Err(ExtractError::Io { .. })
        ));
    }
}
