use pdbtbx::*;
use std::path::Path;
use tracing::{error, info, warn};

/// Residue count and one-letter sequence of a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainSummary {
    /// Chain identifier
    pub id: String,
    /// Number of residues in the chain
    pub residues: usize,
    /// One-letter sequence, `X` for anything that is not a standard amino acid
    pub sequence: String,
}

pub trait ChainExt {
    fn pdb_seq(&self) -> Vec<&str>;
}

impl ChainExt for Chain {
    fn pdb_seq(&self) -> Vec<&str> {
        self.residues()
            .map(|res| one_letter_code(res.name().unwrap_or("")))
            .collect()
    }
}

/// The residue one-letter code, or `X` if it's not a standard amino acid.
fn one_letter_code(name: &str) -> &'static str {
    match name.to_uppercase().as_str() {
        "ALA" => "A",
        "ARG" => "R",
        "ASN" => "N",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        _ => "X",
    }
}

/// Read an extracted chain file with [`pdbtbx`] and summarise its chains.
///
/// Parser messages are logged; a file that cannot be parsed at all yields an
/// empty summary.
pub fn summarize(path: &Path) -> Vec<ChainSummary> {
    let Some(file) = path.to_str() else {
        warn!("Cannot summarise non UTF-8 path {}", path.display());
        return Vec::new();
    };

    let (pdb, pdb_warnings) = match ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(StrictnessLevel::Loose)
        .read(file)
    {
        Ok(res) => res,
        Err(errors) => {
            errors.iter().for_each(|e| error!("{e}"));
            return Vec::new();
        }
    };
    pdb_warnings.iter().for_each(|e| match e.level() {
        ErrorLevel::BreakingError | ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });

    pdb.chains()
        .map(|chain| {
            let summary = ChainSummary {
                id: chain.id().to_string(),
                residues: chain.residue_count(),
                sequence: chain.pdb_seq().join(""),
            };
            info!(
                "Chain {}: {} residues\n{}",
                summary.id, summary.residues, summary.sequence
            );
            summary
        })
        .collect()
}
