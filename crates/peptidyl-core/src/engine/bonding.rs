use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::engine::config::BondingConfig;
use crate::engine::error::EngineError;
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How an atom pair relates to its expected covalent bond length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairClass {
    /// The distance lies in `[expected - tolerance, expected + tolerance)`.
    Bonded,
    /// The atoms sit closer than any plausible bond; they are left unbonded.
    Overlapping,
    Unbonded,
}

/// A pair of atoms found closer together than a covalent bond allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub first: AtomId,
    pub second: AtomId,
    pub distance: f64,
    pub expected: f64,
}

/// Outcome of [`detect_bonds`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondReport {
    /// Number of bonds created.
    pub bonds: usize,
    /// Pairs that were too close to be bonded, in scan order.
    pub overlaps: Vec<Overlap>,
}

fn covalent_radius(element: Element) -> Result<f64, EngineError> {
    element
        .covalent_radius()
        .ok_or(EngineError::UnsupportedElement { element })
}

/// Expected bond length between two elements: the sum of their covalent radii.
pub fn average_bond_distance(first: Element, second: Element) -> Result<f64, EngineError> {
    if first == Element::H && second == Element::H {
        return Ok(2.0 * covalent_radius(Element::H)?);
    }
    Ok(covalent_radius(first)? + covalent_radius(second)?)
}

/// Classifies a pair of atoms by distance.
pub fn classify_pair(a: &Atom, b: &Atom, tolerance: f64) -> Result<PairClass, EngineError> {
    let expected = average_bond_distance(a.element, b.element)?;
    let distance = a.distance_to(b);
    Ok(if distance < expected - tolerance {
        PairClass::Overlapping
    } else if distance < expected + tolerance {
        PairClass::Bonded
    } else {
        PairClass::Unbonded
    })
}

/// Returns `true` if the two atoms are at bonding distance.
pub fn is_bond(a: &Atom, b: &Atom, tolerance: f64) -> Result<bool, EngineError> {
    Ok(classify_pair(a, b, tolerance)? == PairClass::Bonded)
}

/// Replaces the bond set of `structure` with bonds perceived from geometry.
///
/// Every unordered atom pair is tested once. Pairs closer than the lower
/// bound are reported as overlaps and stay unbonded. The structure is left
/// untouched if it contains an element without a covalent radius.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedElement`] for the first atom whose
/// element has no covalent radius.
#[instrument(skip_all, name = "bond_detection", fields(atoms = structure.len()))]
pub fn detect_bonds(
    structure: &mut Structure,
    config: &BondingConfig,
) -> Result<BondReport, EngineError> {
    if let Some((_, atom)) = structure
        .atoms_iter()
        .find(|(_, atom)| atom.element.covalent_radius().is_none())
    {
        return Err(EngineError::UnsupportedElement {
            element: atom.element,
        });
    }

    let tolerance = config.tolerance;
    let pairs: Vec<(AtomId, AtomId)> = structure
        .atom_ids()
        .iter()
        .copied()
        .tuple_combinations()
        .collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let snapshot = &*structure;
    let classified: Vec<(AtomId, AtomId, PairClass)> = iterator
        .filter_map(|&(a, b)| {
            let (atom_a, atom_b) = (snapshot.atom(a)?, snapshot.atom(b)?);
            match classify_pair(atom_a, atom_b, tolerance) {
                Ok(PairClass::Unbonded) | Err(_) => None,
                Ok(class) => Some((a, b, class)),
            }
        })
        .collect();

    let mut report = BondReport::default();
    let mut bonds = Vec::new();
    for (a, b, class) in classified {
        match class {
            PairClass::Bonded => bonds.push((a, b)),
            PairClass::Overlapping => {
                let (atom_a, atom_b) = match (structure.atom(a), structure.atom(b)) {
                    (Some(atom_a), Some(atom_b)) => (atom_a, atom_b),
                    _ => continue,
                };
                let overlap = Overlap {
                    first: a,
                    second: b,
                    distance: atom_a.distance_to(atom_b),
                    expected: average_bond_distance(atom_a.element, atom_b.element)?,
                };
                warn!(
                    first = %atom_a.element,
                    second = %atom_b.element,
                    distance = overlap.distance,
                    expected = overlap.expected,
                    "Atoms are closer than a covalent bond allows; leaving them unbonded."
                );
                report.overlaps.push(overlap);
            }
            PairClass::Unbonded => {}
        }
    }

    structure.clear_bonds();
    for (a, b) in bonds {
        if structure.link(a, b) {
            report.bonds += 1;
        }
    }

    debug!(pairs = pairs.len(), "Scanned atom pairs.");
    info!(
        bonds = report.bonds,
        overlaps = report.overlaps.len(),
        "Bond detection complete."
    );
    Ok(report)
}
