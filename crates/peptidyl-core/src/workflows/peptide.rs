use crate::core::models::structure::Structure;
use crate::core::templates::AminoAcid;
use crate::engine::angles::check_angles;
use crate::engine::assembly::append_residue;
use crate::engine::backbone::{self, AaBackbone};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// A peptide built by [`build`].
#[derive(Debug, Clone)]
pub struct Peptide {
    pub structure: Structure,
    pub residues: Vec<AminoAcid>,
    /// Backbone units in N-to-C order, one per residue.
    pub units: Vec<AaBackbone>,
}

fn parse_sequence(sequence: &str) -> Result<Vec<AminoAcid>, EngineError> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| AminoAcid::from_code(c).ok_or(EngineError::UnknownResidue(c)))
        .collect()
}

/// Builds a peptide from one-letter codes, appending template residues from
/// the N-terminus on.
///
/// `angles` is either empty, which keeps the template placement at every
/// junction, or holds one target array per junction. Every array is
/// validated before the first residue is placed.
///
/// # Errors
///
/// [`EngineError::UnknownResidue`], [`EngineError::EmptyInput`] for a blank
/// sequence, [`EngineError::JunctionCountMismatch`] and the target-angle
/// errors of [`check_angles`], plus any assembly failure.
#[instrument(skip_all, name = "peptide_workflow", fields(sequence = sequence))]
pub fn build(
    sequence: &str,
    angles: &[Vec<f64>],
    reporter: &ProgressReporter,
) -> Result<Peptide, EngineError> {
    let residues = parse_sequence(sequence)?;
    let Some((&first, rest)) = residues.split_first() else {
        return Err(EngineError::EmptyInput("peptide sequence"));
    };
    if !angles.is_empty() && angles.len() != rest.len() {
        return Err(EngineError::JunctionCountMismatch {
            expected: rest.len(),
            found: angles.len(),
        });
    }
    angles.iter().try_for_each(|targets| check_angles(targets))?;

    let mut structure = first.build();
    let mut units = vec![backbone::find_one(&structure)?];

    reporter.phase("Peptide Assembly", rest.len() as u64, |reporter| {
        for (index, residue) in rest.iter().enumerate() {
            let mut template = residue.build();
            for id in template.atom_ids().to_vec() {
                if let Some(atom) = template.atom_mut(id) {
                    atom.group_index = Some(index + 1);
                }
            }
            let unit = backbone::find_one(&template)?;
            let tail = units[units.len() - 1];
            let targets = angles.get(index).map(Vec::as_slice).unwrap_or_default();

            let fusion = append_residue(&mut structure, &tail, &template, &unit, targets)?;
            let last = units.len() - 1;
            units[last] = fusion.previous;
            units.push(fusion.appended);

            reporter.report(Progress::Message(format!(
                "Appended {} at position {}.",
                residue,
                index + 2
            )));
            reporter.report(Progress::TaskIncrement);
        }
        Ok::<(), EngineError>(())
    })?;

    let name: Vec<&str> = residues.iter().map(|aa| aa.three_letter()).collect();
    structure.set_description(&name.join("-"));
    structure.set_num_chains(Some(1));
    structure.set_num_groups(Some(residues.len()));

    info!(
        residues = residues.len(),
        atoms = structure.len(),
        "Peptide assembled."
    );
    Ok(Peptide {
        structure,
        residues,
        units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::wrap_degrees;
    use crate::core::io::traits::MolecularFile;
    use crate::core::io::xyz::XyzFile;
    use crate::core::models::ids::AtomId;
    use crate::engine::angles::{AngleKind, read_angles_along_chain};
    use crate::engine::bonding::detect_bonds;
    use crate::engine::config::BondingConfig;
    use std::sync::Mutex;

    fn bond_indices(structure: &Structure) -> Vec<(usize, usize)> {
        let index = |id: AtomId| structure.index_of(id).unwrap();
        let mut pairs: Vec<(usize, usize)> = structure
            .bonds()
            .into_iter()
            .map(|(a, b)| (index(a).min(index(b)), index(a).max(index(b))))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn builds_a_tripeptide_with_targets() {
        let angles = vec![vec![180.0, -57.0, -47.0], vec![180.0, -139.0, 135.0]];
        let peptide = build("GAS", &angles, &ProgressReporter::new()).unwrap();

        assert_eq!(peptide.structure.len(), 10 + 13 + 14 - 6);
        assert_eq!(peptide.units, backbone::find_all(&peptide.structure));
        assert_eq!(peptide.structure.description(), "GLY-ALA-SER");

        let measured = read_angles_along_chain(&peptide.structure, &peptide.units).unwrap();
        for (junction, targets) in measured.iter().zip(&angles) {
            for (kind, target) in [AngleKind::Omega, AngleKind::Phi, AngleKind::Psi]
                .into_iter()
                .zip(targets)
            {
                assert!(wrap_degrees(junction[kind] - target).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn residues_are_tagged_with_their_position() {
        let peptide = build("ga", &[], &ProgressReporter::new()).unwrap();
        let groups: Vec<Option<usize>> = peptide
            .structure
            .atoms_iter()
            .map(|(_, atom)| atom.group_index)
            .collect();
        assert_eq!(groups.iter().filter(|g| **g == Some(0)).count(), 10 - 2);
        assert_eq!(groups.iter().filter(|g| **g == Some(1)).count(), 13 - 1);
    }

    #[test]
    fn single_residue_needs_no_angles() {
        let peptide = build("P", &[], &ProgressReporter::new()).unwrap();
        assert_eq!(peptide.structure.len(), 17);
        assert_eq!(peptide.units.len(), 1);
    }

    #[test]
    fn rejects_bad_input_before_building() {
        let reporter = ProgressReporter::new();
        assert!(matches!(
            build("GXA", &[], &reporter),
            Err(EngineError::UnknownResidue('X'))
        ));
        assert!(matches!(
            build("  ", &[], &reporter),
            Err(EngineError::EmptyInput(_))
        ));
        assert!(matches!(
            build("GAS", &[vec![180.0, -60.0, -45.0]], &reporter),
            Err(EngineError::JunctionCountMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(
            build("GA", &[vec![180.0, -60.0, 200.0]], &reporter),
            Err(EngineError::AngleOutOfRange { kind: AngleKind::Psi, .. })
        ));
    }

    #[test]
    fn reports_one_increment_per_junction() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        build("GGG", &[], &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let increments = events
            .iter()
            .filter(|e| matches!(e, Progress::TaskIncrement))
            .count();
        assert_eq!(increments, 2);
        assert!(matches!(
            events.first(),
            Some(Progress::PhaseStart { name: "Peptide Assembly" })
        ));
        assert!(matches!(events.last(), Some(Progress::PhaseFinish)));
    }

    #[test]
    fn written_peptide_reads_back_with_the_same_bonds() {
        let peptide = build("GA", &[vec![180.0, -57.0, -47.0]], &ProgressReporter::new()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ga.xyz");
        XyzFile::write_to_path(&peptide.structure, &path).unwrap();

        let mut restored = XyzFile::read_from_path(&path).unwrap();
        assert_eq!(restored.bond_count(), 0);
        let report = detect_bonds(&mut restored, &BondingConfig::default()).unwrap();

        assert!(report.overlaps.is_empty());
        assert_eq!(restored.description(), "GLY-ALA");
        assert_eq!(bond_indices(&restored), bond_indices(&peptide.structure));
        assert_eq!(backbone::find_all(&restored).len(), 2);
    }
}
