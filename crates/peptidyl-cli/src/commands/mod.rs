pub mod angles;
pub mod backbones;
pub mod bonds;
pub mod build;
pub mod dedup;

use crate::error::{CliError, Result};
use peptidyl::core::io::traits::MolecularFile;
use peptidyl::core::io::xyz::XyzFile;
use peptidyl::core::models::structure::Structure;
use peptidyl::engine::bonding::{BondReport, detect_bonds};
use peptidyl::engine::config::BondingConfig;
use std::path::Path;
use tracing::info;

/// Reads an XYZ file and perceives its bonds.
pub(crate) fn load_bonded(path: &Path, config: &BondingConfig) -> Result<(Structure, BondReport)> {
    let mut structure = XyzFile::read_from_path(path).map_err(|source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Read {} atom(s) from {}.",
        structure.len(),
        path.display()
    );
    let report = detect_bonds(&mut structure, config)?;
    Ok((structure, report))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use peptidyl::core::io::traits::MolecularFile;
    use peptidyl::core::io::xyz::XyzFile;
    use peptidyl::engine::progress::ProgressReporter;
    use peptidyl::workflows::peptide;
    use std::path::{Path, PathBuf};

    /// Writes a freshly built peptide to `dir` and returns its path.
    pub fn peptide_file(dir: &Path, name: &str, sequence: &str, angles: &[Vec<f64>]) -> PathBuf {
        let built = peptide::build(sequence, angles, &ProgressReporter::new()).unwrap();
        let path = dir.join(name);
        XyzFile::write_to_path(&built.structure, &path).unwrap();
        path
    }
}
