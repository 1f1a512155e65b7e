//! Recognition of amino-acid backbone units in a bonded structure.
//!
//! A unit is anchored at its double-bonded carbonyl oxygen: an oxygen with
//! exactly one bond, to a carbon. From there the matcher walks the graph
//! through three stages, carbonyl carbon, alpha carbon and amine nitrogen, and
//! at each stage tries a small table of exact neighbor compositions. The
//! first matching row decides the shape of that stage.
//!
//! | Stage    | Shape       | Neighbor composition |
//! |----------|-------------|----------------------|
//! | carbonyl | free acid   | O×2 C×1              |
//! | carbonyl | peptide     | O×1 C×1 N×1          |
//! | alpha    | generic     | C×2 N×1 H×1          |
//! | alpha    | glycine     | C×1 N×1 H×2          |
//! | amine    | tail        | C×1 H×2              |
//! | amine    | connected   | C×2 H×1              |
//! | amine    | proline     | C×3, or C×2 H×1 closing the pyrrolidine ring |

use crate::core::models::element::Element::{self, C, H, N, O};
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Atom handles of one amino-acid backbone unit.
///
/// Optional fields are absent once the corresponding terminus has been used
/// to form a peptide bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AaBackbone {
    /// Amine nitrogen.
    pub n: AtomId,
    /// The nitrogen's hydrogen, or the ring carbon for proline.
    pub hcn1: AtomId,
    /// Second nitrogen hydrogen; present only on a free amine terminus.
    pub hn2: Option<AtomId>,
    /// Alpha carbon.
    pub cmain: AtomId,
    /// The alpha hydrogen.
    pub hc: AtomId,
    /// Carbonyl carbon.
    pub coo: AtomId,
    /// Double-bonded carbonyl oxygen; the anchor of the match.
    pub o2: AtomId,
    /// Hydroxyl oxygen; present only on a free carboxyl terminus.
    pub o1: Option<AtomId>,
    /// Hydroxyl hydrogen, paired with `o1`.
    pub ho: Option<AtomId>,
    /// The alpha carbon's side-chain neighbor, a hydrogen for glycine.
    pub payload: AtomId,
}

impl AaBackbone {
    pub fn has_free_amine(&self) -> bool {
        self.hn2.is_some()
    }

    pub fn has_free_carboxyl(&self) -> bool {
        self.o1.is_some()
    }

    /// Returns `true` when the side chain closes a ring back onto the nitrogen.
    pub fn is_proline(&self, structure: &Structure) -> bool {
        structure.element(self.hcn1) == Some(C)
    }

    /// Every atom handle of the unit, required ones first.
    pub fn atoms(&self) -> Vec<AtomId> {
        let mut atoms = vec![
            self.n,
            self.hcn1,
            self.cmain,
            self.hc,
            self.coo,
            self.o2,
            self.payload,
        ];
        atoms.extend([self.hn2, self.o1, self.ho].into_iter().flatten());
        atoms
    }

    /// Nitrogen of the following unit, bonded to this unit's carbonyl carbon.
    pub fn next_nitrogen(&self, structure: &Structure) -> Option<AtomId> {
        structure.only_neighbor_with_element(self.coo, N)
    }

    /// Translates every handle through an atom-id map, e.g. the one returned by
    /// [`Structure::merge`].
    pub fn remap(&self, map: &HashMap<AtomId, AtomId>) -> Option<AaBackbone> {
        let get = |id: AtomId| map.get(&id).copied();
        let get_opt = |id: Option<AtomId>| match id {
            Some(id) => get(id).map(Some),
            None => Some(None),
        };
        Some(AaBackbone {
            n: get(self.n)?,
            hcn1: get(self.hcn1)?,
            hn2: get_opt(self.hn2)?,
            cmain: get(self.cmain)?,
            hc: get(self.hc)?,
            coo: get(self.coo)?,
            o2: get(self.o2)?,
            o1: get_opt(self.o1)?,
            ho: get_opt(self.ho)?,
            payload: get(self.payload)?,
        })
    }
}

/// One end of an amino-acid unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminus {
    /// The amine (N) terminus.
    Amine,
    /// The carboxyl (C) terminus.
    Carboxyl,
}

impl fmt::Display for Terminus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminus::Amine => f.write_str("amine (N)"),
            Terminus::Carboxyl => f.write_str("carboxyl (C)"),
        }
    }
}

type Composition = &'static [(Element, usize)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarboxylShape {
    Free { o1: AtomId, ho: AtomId },
    Peptide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaShape {
    Generic,
    Glycine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmineShape {
    Tail { h1: AtomId, h2: AtomId },
    Connected { h: AtomId },
    ProlineRing { ring_carbon: AtomId, h: Option<AtomId> },
}

type CarboxylRule = fn(&Structure, AtomId, AtomId) -> Option<CarboxylShape>;
type AmineRule = fn(&Structure, AtomId, AtomId) -> Option<AmineShape>;

const CARBOXYL_SHAPES: &[(Composition, CarboxylRule)] = &[
    (&[(O, 2), (C, 1)], free_carboxyl),
    (&[(O, 1), (C, 1), (N, 1)], peptide_carboxyl),
];

const ALPHA_SHAPES: &[(Composition, AlphaShape)] = &[
    (&[(C, 2), (N, 1), (H, 1)], AlphaShape::Generic),
    (&[(C, 1), (N, 1), (H, 2)], AlphaShape::Glycine),
];

const AMINE_SHAPES: &[(Composition, AmineRule)] = &[
    (&[(C, 1), (H, 2)], tail_amine),
    (&[(C, 2), (H, 1)], connected_amine),
    (&[(C, 3)], connected_proline_amine),
];

const HYDROXYL: Composition = &[(C, 1), (H, 1)];
const PROLINE_BETA: Composition = &[(C, 2), (H, 2)];
const PROLINE_DELTA: Composition = &[(N, 1), (C, 1), (H, 2)];

fn free_carboxyl(structure: &Structure, coo: AtomId, o2: AtomId) -> Option<CarboxylShape> {
    let o1 = structure
        .neighbors_with_element(coo, O)
        .find(|&o| o != o2)?;
    if !structure.has_bond_composition(o1, HYDROXYL) {
        return None;
    }
    let ho = structure.only_neighbor_with_element(o1, H)?;
    Some(CarboxylShape::Free { o1, ho })
}

fn peptide_carboxyl(_: &Structure, _: AtomId, _: AtomId) -> Option<CarboxylShape> {
    Some(CarboxylShape::Peptide)
}

fn tail_amine(structure: &Structure, n: AtomId, _cmain: AtomId) -> Option<AmineShape> {
    let mut hydrogens = structure.neighbors_with_element(n, H);
    Some(AmineShape::Tail {
        h1: hydrogens.next()?,
        h2: hydrogens.next()?,
    })
}

fn connected_amine(structure: &Structure, n: AtomId, cmain: AtomId) -> Option<AmineShape> {
    let h = structure.only_neighbor_with_element(n, H)?;
    let other = structure
        .neighbors_with_element(n, C)
        .find(|&c| c != cmain)?;
    if closes_proline_ring(structure, other, cmain) {
        Some(AmineShape::ProlineRing {
            ring_carbon: other,
            h: Some(h),
        })
    } else {
        Some(AmineShape::Connected { h })
    }
}

fn connected_proline_amine(structure: &Structure, n: AtomId, cmain: AtomId) -> Option<AmineShape> {
    let ring_carbon = structure
        .neighbors_with_element(n, C)
        .find(|&c| c != cmain && closes_proline_ring(structure, c, cmain))?;
    Some(AmineShape::ProlineRing {
        ring_carbon,
        h: None,
    })
}

/// Checks that `delta` closes the five-membered ring N-CA-CB-CG-CD.
///
/// `delta` must be a CH2 bonded to the nitrogen and to a gamma carbon, and
/// that gamma carbon must also be bonded to a CH2 beta carbon hanging off the
/// alpha carbon.
fn closes_proline_ring(structure: &Structure, delta: AtomId, cmain: AtomId) -> bool {
    if !structure.has_bond_composition(delta, PROLINE_DELTA) {
        return false;
    }
    let Some(gamma) = structure.only_neighbor_with_element(delta, C) else {
        return false;
    };
    structure
        .neighbors_with_element(cmain, C)
        .filter(|&beta| structure.has_bond_composition(beta, PROLINE_BETA))
        .any(|beta| beta != gamma && structure.has_bond(beta, gamma))
}

fn classify_carboxyl(structure: &Structure, coo: AtomId, o2: AtomId) -> Option<CarboxylShape> {
    CARBOXYL_SHAPES
        .iter()
        .find(|(composition, _)| structure.has_bond_composition(coo, composition))
        .and_then(|(_, rule)| rule(structure, coo, o2))
}

fn classify_alpha(structure: &Structure, cmain: AtomId) -> Option<AlphaShape> {
    ALPHA_SHAPES
        .iter()
        .find(|(composition, _)| structure.has_bond_composition(cmain, composition))
        .map(|&(_, shape)| shape)
}

fn classify_amine(structure: &Structure, n: AtomId, cmain: AtomId) -> Option<AmineShape> {
    AMINE_SHAPES
        .iter()
        .find(|(composition, _)| structure.has_bond_composition(n, composition))
        .and_then(|(_, rule)| rule(structure, n, cmain))
}

/// Returns `true` for an oxygen with exactly one bond, and that bond to a carbon.
pub fn is_anchor(structure: &Structure, id: AtomId) -> bool {
    structure.element(id) == Some(O) && structure.has_bond_composition(id, &[(C, 1)])
}

/// Attempts to match a backbone unit anchored at the carbonyl oxygen `o2`.
pub fn match_at(structure: &Structure, o2: AtomId) -> Option<AaBackbone> {
    if !is_anchor(structure, o2) {
        return None;
    }
    let coo = structure.only_neighbor_with_element(o2, C)?;
    let Some(carboxyl) = classify_carboxyl(structure, coo, o2) else {
        trace!(anchor = ?o2, "Carbonyl carbon shape does not match.");
        return None;
    };

    let cmain = structure.only_neighbor_with_element(coo, C)?;
    let Some(alpha) = classify_alpha(structure, cmain) else {
        trace!(anchor = ?o2, "Alpha carbon shape does not match.");
        return None;
    };
    let n = structure.only_neighbor_with_element(cmain, N)?;
    let (hc, payload) = match alpha {
        AlphaShape::Generic => {
            let hc = structure.only_neighbor_with_element(cmain, H)?;
            let payload = structure
                .neighbors_with_element(cmain, C)
                .find(|&c| c != coo)?;
            (hc, payload)
        }
        AlphaShape::Glycine => {
            let mut hydrogens = structure.neighbors_with_element(cmain, H);
            (hydrogens.next()?, hydrogens.next()?)
        }
    };

    let Some(amine) = classify_amine(structure, n, cmain) else {
        trace!(anchor = ?o2, "Amine nitrogen shape does not match.");
        return None;
    };
    let (hcn1, hn2) = match amine {
        AmineShape::Tail { h1, h2 } => (h1, Some(h2)),
        AmineShape::Connected { h } => (h, None),
        AmineShape::ProlineRing { ring_carbon, h } => (ring_carbon, h),
    };
    let (o1, ho) = match carboxyl {
        CarboxylShape::Free { o1, ho } => (Some(o1), Some(ho)),
        CarboxylShape::Peptide => (None, None),
    };

    Some(AaBackbone {
        n,
        hcn1,
        hn2,
        cmain,
        hc,
        coo,
        o2,
        o1,
        ho,
        payload,
    })
}

/// Every backbone unit, in the insertion order of the anchor oxygens.
pub fn find_all(structure: &Structure) -> Vec<AaBackbone> {
    let units: Vec<AaBackbone> = structure
        .atom_ids()
        .iter()
        .filter_map(|&id| match_at(structure, id))
        .collect();
    debug!(units = units.len(), "Backbone scan complete.");
    units
}

/// The first backbone unit in anchor order.
pub fn find_first(structure: &Structure) -> Result<AaBackbone, EngineError> {
    structure
        .atom_ids()
        .iter()
        .find_map(|&id| match_at(structure, id))
        .ok_or(EngineError::BackboneNotFound)
}

/// The last backbone unit in anchor order.
pub fn find_last(structure: &Structure) -> Result<AaBackbone, EngineError> {
    structure
        .atom_ids()
        .iter()
        .rev()
        .find_map(|&id| match_at(structure, id))
        .ok_or(EngineError::BackboneNotFound)
}

/// The only backbone unit of a structure.
///
/// # Errors
///
/// [`EngineError::BackboneNotFound`] when there is none and
/// [`EngineError::AmbiguousBackbone`] when there are several.
pub fn find_one(structure: &Structure) -> Result<AaBackbone, EngineError> {
    let units = find_all(structure);
    match units.as_slice() {
        [] => Err(EngineError::BackboneNotFound),
        [unit] => Ok(*unit),
        _ => Err(EngineError::AmbiguousBackbone { count: units.len() }),
    }
}

/// Groups backbone units into chains ordered from amine to carboxyl end.
///
/// Each chain starts at a unit whose nitrogen is not bonded to another
/// unit's carbonyl carbon and follows [`AaBackbone::next_nitrogen`] from
/// there. Chains are listed in the anchor order of their first unit. A closed
/// ring of units becomes one chain starting at its first unit in anchor order.
pub fn find_chains(structure: &Structure) -> Vec<Vec<AaBackbone>> {
    let units = find_all(structure);
    let by_nitrogen: HashMap<AtomId, usize> =
        units.iter().enumerate().map(|(index, unit)| (unit.n, index)).collect();
    let successor: Vec<Option<usize>> = units
        .iter()
        .map(|unit| {
            unit.next_nitrogen(structure)
                .and_then(|n| by_nitrogen.get(&n).copied())
        })
        .collect();

    let mut has_predecessor = vec![false; units.len()];
    for &next in successor.iter().flatten() {
        has_predecessor[next] = true;
    }

    let mut visited = vec![false; units.len()];
    let mut chains = Vec::new();
    let heads = (0..units.len())
        .filter(|&index| !has_predecessor[index])
        .chain(0..units.len());
    for head in heads {
        if visited[head] {
            continue;
        }
        let mut chain = Vec::new();
        let mut current = Some(head);
        while let Some(index) = current.filter(|&index| !visited[index]) {
            visited[index] = true;
            chain.push(units[index]);
            current = successor[index];
        }
        chains.push((head, chain));
    }
    chains.sort_by_key(|(head, _)| *head);
    debug!(chains = chains.len(), "Backbone chains ordered.");
    chains.into_iter().map(|(_, chain)| chain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    /// Builds a graph from `(element, bonds-to-earlier-indices)` rows.
    /// Coordinates are irrelevant to matching and are all zero.
    fn graph(rows: &[(Element, &[usize])]) -> (Structure, Vec<AtomId>) {
        let mut s = Structure::new("graph");
        let mut ids = Vec::new();
        for (element, bonds) in rows {
            let id = s.add_atom(Atom::new(*element, Point3::origin()));
            for &other in *bonds {
                s.link(id, ids[other]);
            }
            ids.push(id);
        }
        (s, ids)
    }

    /// Free alanine: N H H CA HA C O OXT HXT CB HB1 HB2 HB3.
    fn alanine() -> (Structure, Vec<AtomId>) {
        graph(&[
            (N, &[]),
            (H, &[0]),
            (H, &[0]),
            (C, &[0]),
            (H, &[3]),
            (C, &[3]),
            (O, &[5]),
            (O, &[5]),
            (H, &[7]),
            (C, &[3]),
            (H, &[9]),
            (H, &[9]),
            (H, &[9]),
        ])
    }

    /// Free glycine: N H H CA HA2 C O OXT HXT HA3.
    fn glycine() -> (Structure, Vec<AtomId>) {
        graph(&[
            (N, &[]),
            (H, &[0]),
            (H, &[0]),
            (C, &[0]),
            (H, &[3]),
            (C, &[3]),
            (O, &[5]),
            (O, &[5]),
            (H, &[7]),
            (H, &[3]),
        ])
    }

    /// Free proline: N CA HA C O OXT HXT CB CG CD HB2 HB3 HG2 HG3 HD2 HD3 H.
    fn proline() -> (Structure, Vec<AtomId>) {
        graph(&[
            (N, &[]),
            (C, &[0]),
            (H, &[1]),
            (C, &[1]),
            (O, &[3]),
            (O, &[3]),
            (H, &[5]),
            (C, &[1]),
            (C, &[7]),
            (C, &[8, 0]),
            (H, &[7]),
            (H, &[7]),
            (H, &[8]),
            (H, &[8]),
            (H, &[9]),
            (H, &[9]),
            (H, &[0]),
        ])
    }

    mod free_residues {
        use super::*;

        #[test]
        fn matches_free_alanine() {
            let (s, ids) = alanine();
            let unit = find_one(&s).unwrap();

            assert_eq!(unit.n, ids[0]);
            assert_eq!((unit.hcn1, unit.hn2), (ids[1], Some(ids[2])));
            assert_eq!(unit.cmain, ids[3]);
            assert_eq!(unit.hc, ids[4]);
            assert_eq!(unit.coo, ids[5]);
            assert_eq!(unit.o2, ids[6]);
            assert_eq!((unit.o1, unit.ho), (Some(ids[7]), Some(ids[8])));
            assert_eq!(unit.payload, ids[9]);
            assert!(unit.has_free_amine());
            assert!(unit.has_free_carboxyl());
            assert!(!unit.is_proline(&s));
        }

        #[test]
        fn matches_free_glycine_with_hydrogen_payload() {
            let (s, ids) = glycine();
            let unit = find_one(&s).unwrap();

            assert_eq!(unit.hc, ids[4]);
            assert_eq!(unit.payload, ids[9]);
            assert_eq!(s.element(unit.payload), Some(H));
        }

        #[test]
        fn matches_free_proline_with_ring_carbon() {
            let (s, ids) = proline();
            let unit = find_one(&s).unwrap();

            assert_eq!(unit.hcn1, ids[9]);
            assert_eq!(unit.hn2, Some(ids[16]));
            assert_eq!(unit.payload, ids[7]);
            assert!(unit.is_proline(&s));
            assert!(unit.has_free_amine());
        }

        #[test]
        fn only_the_carbonyl_oxygen_anchors_a_free_acid() {
            let (s, ids) = alanine();
            // The hydroxyl oxygen has two bonds, so only O can anchor.
            assert!(is_anchor(&s, ids[6]));
            assert!(!is_anchor(&s, ids[7]));
            assert!(match_at(&s, ids[7]).is_none());
        }

        #[test]
        fn atoms_lists_every_handle() {
            let (s, _) = alanine();
            let unit = find_one(&s).unwrap();
            assert_eq!(unit.atoms().len(), 10);
        }
    }

    mod chains {
        use super::*;

        /// Gly-Ala dipeptide topology.
        fn gly_ala() -> (Structure, Vec<AtomId>) {
            graph(&[
                (N, &[]),     // 0 gly N
                (H, &[0]),    // 1
                (H, &[0]),    // 2
                (C, &[0]),    // 3 gly CA
                (H, &[3]),    // 4
                (C, &[3]),    // 5 gly C
                (O, &[5]),    // 6 gly O
                (H, &[3]),    // 7 gly HA3
                (N, &[5]),    // 8 ala N
                (H, &[8]),    // 9
                (C, &[8]),    // 10 ala CA
                (H, &[10]),   // 11
                (C, &[10]),   // 12 ala C
                (O, &[12]),   // 13 ala O
                (O, &[12]),   // 14 ala OXT
                (H, &[14]),   // 15
                (C, &[10]),   // 16 ala CB
                (H, &[16]),   // 17
                (H, &[16]),   // 18
                (H, &[16]),   // 19
            ])
        }

        #[test]
        fn finds_units_in_anchor_order() {
            let (s, ids) = gly_ala();
            let units = find_all(&s);

            assert_eq!(units.len(), 2);
            assert_eq!(units[0].o2, ids[6]);
            assert_eq!(units[0].o1, None);
            assert_eq!(units[0].next_nitrogen(&s), Some(ids[8]));
            assert_eq!(units[1].n, ids[8]);
            assert_eq!(units[1].hcn1, ids[9]);
            assert_eq!(units[1].hn2, None);
            assert_eq!(find_first(&s).unwrap(), units[0]);
            assert_eq!(find_last(&s).unwrap(), units[1]);
        }

        #[test]
        fn chains_follow_peptide_bonds_not_storage_order() {
            let (s, ids) = graph(&[
                (N, &[]),      // 0 ala N
                (H, &[0]),     // 1
                (C, &[0]),     // 2 ala CA
                (H, &[2]),     // 3
                (C, &[2]),     // 4 ala C
                (O, &[4]),     // 5 ala O
                (O, &[4]),     // 6 ala OXT
                (H, &[6]),     // 7
                (C, &[2]),     // 8 ala CB
                (H, &[8]),     // 9
                (H, &[8]),     // 10
                (H, &[8]),     // 11
                (N, &[]),      // 12 gly N
                (H, &[12]),    // 13
                (H, &[12]),    // 14
                (C, &[12]),    // 15 gly CA
                (H, &[15]),    // 16
                (H, &[15]),    // 17
                (C, &[15, 0]), // 18 gly C
                (O, &[18]),    // 19 gly O
            ]);
            let units = find_all(&s);
            assert_eq!(units[0].o2, ids[5]);

            let chains = find_chains(&s);
            assert_eq!(chains.len(), 1);
            let anchors: Vec<AtomId> = chains[0].iter().map(|unit| unit.o2).collect();
            assert_eq!(anchors, vec![ids[19], ids[5]]);
        }

        #[test]
        fn separate_residues_form_separate_chains() {
            let (mut s, first) = alanine();
            let (other, _) = alanine();
            s.merge(&other);

            let chains = find_chains(&s);
            assert_eq!(chains.len(), 2);
            assert!(chains.iter().all(|chain| chain.len() == 1));
            assert_eq!(chains[0][0].n, first[0]);
        }

        #[test]
        fn find_one_rejects_chains() {
            let (s, _) = gly_ala();
            assert!(matches!(
                find_one(&s),
                Err(EngineError::AmbiguousBackbone { count: 2 })
            ));
        }

        #[test]
        fn matches_connected_proline_without_amide_hydrogen() {
            // Ala C(=O) bonded to a proline nitrogen.
            let (s, ids) = graph(&[
                (C, &[]),       // 0 previous CA
                (C, &[0]),      // 1 previous C
                (O, &[1]),      // 2 previous O
                (N, &[1]),      // 3 pro N
                (C, &[3]),      // 4 pro CA
                (H, &[4]),      // 5
                (C, &[4]),      // 6 pro C
                (O, &[6]),      // 7
                (O, &[6]),      // 8
                (H, &[8]),      // 9
                (C, &[4]),      // 10 CB
                (C, &[10]),     // 11 CG
                (C, &[11, 3]),  // 12 CD
                (H, &[10]),
                (H, &[10]),
                (H, &[11]),
                (H, &[11]),
                (H, &[12]),
                (H, &[12]),
            ]);
            let unit = match_at(&s, ids[7]).unwrap();

            assert_eq!(unit.n, ids[3]);
            assert_eq!(unit.hcn1, ids[12]);
            assert_eq!(unit.hn2, None);
            assert_eq!(unit.payload, ids[10]);
            assert!(unit.is_proline(&s));
        }
    }

    mod rejections {
        use super::*;

        #[test]
        fn water_has_no_backbone() {
            let (s, _) = graph(&[(O, &[]), (H, &[0]), (H, &[0])]);
            assert!(find_all(&s).is_empty());
            assert!(matches!(find_first(&s), Err(EngineError::BackboneNotFound)));
            assert!(matches!(find_last(&s), Err(EngineError::BackboneNotFound)));
            assert!(matches!(find_one(&s), Err(EngineError::BackboneNotFound)));
        }

        #[test]
        fn acetic_acid_lacks_an_amine() {
            let (s, _) = graph(&[
                (C, &[]),
                (H, &[0]),
                (H, &[0]),
                (H, &[0]),
                (C, &[0]),
                (O, &[4]),
                (O, &[4]),
                (H, &[6]),
            ]);
            assert!(find_all(&s).is_empty());
        }

        #[test]
        fn charged_amine_does_not_match() {
            let (mut s, ids) = alanine();
            let extra = s.add_atom(Atom::new(H, Point3::origin()));
            s.link(ids[0], extra);
            assert!(find_all(&s).is_empty());
        }

        #[test]
        fn open_chain_amine_with_two_carbons_is_not_proline() {
            // N-methyl alanine: the methyl is a CH3, not a ring CH2.
            let (mut s, ids) = alanine();
            s.remove_atom(ids[2]);
            let methyl = s.add_atom(Atom::new(C, Point3::origin()));
            s.link(ids[0], methyl);
            for _ in 0..3 {
                let h = s.add_atom(Atom::new(H, Point3::origin()));
                s.link(methyl, h);
            }

            let unit = find_one(&s).unwrap();
            assert_eq!(unit.hcn1, ids[1]);
            assert_eq!(unit.hn2, None);
            assert!(!unit.is_proline(&s));
        }
    }
}
