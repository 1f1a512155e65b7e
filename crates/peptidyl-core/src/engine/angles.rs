use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{self, AngleAxis, rotation_from_axis_angle, wrap_degrees};
use crate::engine::backbone::AaBackbone;
use crate::engine::error::EngineError;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, Range};
use std::str::FromStr;
use tracing::trace;

/// Target-angle array lengths accepted by peptide assembly.
pub const ACCEPTED_ANGLE_COUNTS: [usize; 4] = [0, 3, 6, 10];

/// The ten angles describing the geometry of one peptide junction.
///
/// The declaration order is the order of target-angle arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AngleKind {
    /// Peptide-bond dihedral Cα–C–N–Cα.
    Omega,
    /// Dihedral C–N–Cα–C about the N–Cα bond of the following residue.
    Phi,
    /// Dihedral N–Cα–C–N about the Cα–C bond of the preceding residue.
    Psi,
    /// Bond angle C–N–Cα at the nitrogen.
    AdjN,
    /// Bond angle N–Cα–C at the alpha carbon of the following residue.
    AdjCmain,
    /// Bond angle Cα–C–N at the carbonyl carbon.
    AdjCoo,
    /// Elevation of the carbonyl oxygen above the peptide plane.
    O2Rise,
    /// In-plane deviation of the carbonyl oxygen from the bisector.
    O2Tilt,
    /// Elevation of the side-chain payload above the N–Cα–C plane.
    PlRise,
    /// In-plane deviation of the side-chain payload from the bisector.
    PlTilt,
}

/// Groups of angle kinds sharing a value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleCategory {
    Ramachandran,
    Adjacency,
    Secondary,
}

impl AngleCategory {
    /// Inclusive `(min, max)` bounds of valid target values, in degrees.
    pub fn domain(self) -> (f64, f64) {
        match self {
            AngleCategory::Ramachandran => (-180.0, 180.0),
            AngleCategory::Adjacency => (0.0, 180.0),
            AngleCategory::Secondary => (-90.0, 90.0),
        }
    }
}

impl AngleKind {
    pub const ALL: [AngleKind; 10] = [
        AngleKind::Omega,
        AngleKind::Phi,
        AngleKind::Psi,
        AngleKind::AdjN,
        AngleKind::AdjCmain,
        AngleKind::AdjCoo,
        AngleKind::O2Rise,
        AngleKind::O2Tilt,
        AngleKind::PlRise,
        AngleKind::PlTilt,
    ];

    /// Position of this kind in a target-angle array.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn category(self) -> AngleCategory {
        match self {
            AngleKind::Omega | AngleKind::Phi | AngleKind::Psi => AngleCategory::Ramachandran,
            AngleKind::AdjN | AngleKind::AdjCmain | AngleKind::AdjCoo => AngleCategory::Adjacency,
            _ => AngleCategory::Secondary,
        }
    }

    pub fn domain(self) -> (f64, f64) {
        self.category().domain()
    }

    pub fn name(self) -> &'static str {
        match self {
            AngleKind::Omega => "omega",
            AngleKind::Phi => "phi",
            AngleKind::Psi => "psi",
            AngleKind::AdjN => "adjN",
            AngleKind::AdjCmain => "adjCmain",
            AngleKind::AdjCoo => "adjCoo",
            AngleKind::O2Rise => "O2Rise",
            AngleKind::O2Tilt => "O2Tilt",
            AngleKind::PlRise => "PlRise",
            AngleKind::PlTilt => "PlTilt",
        }
    }

    fn check(self, value: f64) -> Result<(), EngineError> {
        let (min, max) = self.domain();
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(EngineError::AngleOutOfRange {
                kind: self,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AngleKind {
    type Err = String;

    /// Parses an angle name case-insensitively (`"phi"`, `"adjCmain"`, `"PLTILT"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AngleKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown angle '{s}'"))
    }
}

/// Validates a target-angle array: its length and every entry's domain.
///
/// # Errors
///
/// [`EngineError::InvalidAngleCount`] unless the length is 0, 3, 6 or 10, and
/// [`EngineError::AngleOutOfRange`] for the first entry outside its domain.
pub fn check_angles(angles: &[f64]) -> Result<(), EngineError> {
    if !ACCEPTED_ANGLE_COUNTS.contains(&angles.len()) {
        return Err(EngineError::InvalidAngleCount {
            found: angles.len(),
        });
    }
    AngleKind::ALL
        .iter()
        .zip(angles)
        .try_for_each(|(kind, &value)| kind.check(value))
}

/// All ten angle values measured at one junction, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionAngles([f64; 10]);

impl JunctionAngles {
    pub fn get(&self, kind: AngleKind) -> f64 {
        self.0[kind.index()]
    }

    pub fn values(&self) -> &[f64; 10] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (AngleKind, f64)> + '_ {
        AngleKind::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<AngleKind> for JunctionAngles {
    type Output = f64;

    fn index(&self, kind: AngleKind) -> &f64 {
        &self.0[kind.index()]
    }
}

/// The atoms an angle is measured on.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Dihedral([AtomId; 4]),
    Bond([AtomId; 3]),
    Rise([AtomId; 4]),
    Tilt([AtomId; 4]),
}

/// The downstream walk from `root` reached `fixed` through a second path.
#[derive(Debug)]
struct RingClosure;

/// Atoms on the `root` side of the bond `fixed`–`root`, `root` included.
fn downstream(
    structure: &Structure,
    fixed: AtomId,
    root: AtomId,
) -> Result<Vec<AtomId>, RingClosure> {
    let mut seen = HashSet::from([root]);
    let mut moving = vec![root];
    let mut stack = vec![root];
    while let Some(atom) = stack.pop() {
        for &next in structure.bonded_neighbors(atom) {
            if next == fixed {
                if atom == root {
                    continue;
                }
                return Err(RingClosure);
            }
            if seen.insert(next) {
                moving.push(next);
                stack.push(next);
            }
        }
    }
    Ok(moving)
}

/// Two consecutive backbone units joined by a peptide bond `prev.coo`–`next.n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
    pub prev: AaBackbone,
    pub next: AaBackbone,
}

impl Junction {
    pub fn new(prev: AaBackbone, next: AaBackbone) -> Self {
        Self { prev, next }
    }

    pub fn is_bonded(&self, structure: &Structure) -> bool {
        structure.has_bond(self.prev.coo, self.next.n)
    }

    fn frame(&self, kind: AngleKind) -> Frame {
        let (p, q) = (&self.prev, &self.next);
        match kind {
            AngleKind::Omega => Frame::Dihedral([p.cmain, p.coo, q.n, q.cmain]),
            AngleKind::Phi => Frame::Dihedral([p.coo, q.n, q.cmain, q.coo]),
            AngleKind::Psi => Frame::Dihedral([p.n, p.cmain, p.coo, q.n]),
            AngleKind::AdjN => Frame::Bond([p.coo, q.n, q.cmain]),
            AngleKind::AdjCmain => Frame::Bond([q.n, q.cmain, q.coo]),
            AngleKind::AdjCoo => Frame::Bond([p.cmain, p.coo, q.n]),
            AngleKind::O2Rise => Frame::Rise([p.o2, p.coo, p.cmain, q.n]),
            AngleKind::O2Tilt => Frame::Tilt([p.o2, p.coo, p.cmain, q.n]),
            AngleKind::PlRise => Frame::Rise([q.payload, q.cmain, q.n, q.coo]),
            AngleKind::PlTilt => Frame::Tilt([q.payload, q.cmain, q.n, q.coo]),
        }
    }

    /// `(fixed, root, center)`: the moving fragment hangs off `root` away
    /// from `fixed`, and rotates about an axis through `center`.
    fn hinge(&self, kind: AngleKind) -> (AtomId, AtomId, AtomId) {
        match self.frame(kind) {
            Frame::Dihedral([_, b, c, _]) => (b, c, c),
            Frame::Bond([_, pivot, next]) => (pivot, next, pivot),
            Frame::Rise([side, center, ..]) | Frame::Tilt([side, center, ..]) => {
                (center, side, center)
            }
        }
    }

    /// Measures one angle together with the axis that rotates it.
    pub fn measure(&self, structure: &Structure, kind: AngleKind) -> Result<AngleAxis, EngineError> {
        let pos = |id: AtomId| structure.position(id).ok_or(EngineError::MissingAtom(id));
        let measured = match self.frame(kind) {
            Frame::Dihedral([a, b, c, d]) => {
                geometry::dihedral_angle(&pos(a)?, &pos(b)?, &pos(c)?, &pos(d)?)
            }
            Frame::Bond([a, b, c]) => geometry::bond_angle(&pos(a)?, &pos(b)?, &pos(c)?),
            Frame::Rise([s, c, i1, i2]) => {
                geometry::rise_angle(&pos(s)?, &pos(c)?, &pos(i1)?, &pos(i2)?)
            }
            Frame::Tilt([s, c, i1, i2]) => {
                geometry::tilt_angle(&pos(s)?, &pos(c)?, &pos(i1)?, &pos(i2)?)
            }
        };
        measured.ok_or_else(|| {
            EngineError::DegenerateGeometry(format!("{kind} is undefined for collinear atoms"))
        })
    }

    pub fn measure_all(&self, structure: &Structure) -> Result<JunctionAngles, EngineError> {
        let mut values = [0.0; 10];
        for kind in AngleKind::ALL {
            values[kind.index()] = self.measure(structure, kind)?.degrees;
        }
        Ok(JunctionAngles(values))
    }

    /// Rotates the downstream fragment of `kind` so that the angle reads `target`.
    ///
    /// On a proline the side chain ring ties the nitrogen to the alpha carbon,
    /// so phi and the nitrogen bond angle turn the whole following residue
    /// rigidly about the same axis instead. The nitrogen bond angle then keeps
    /// the ring carbon in the amide plane; phi tilts it out by the change.
    pub(crate) fn set(
        &self,
        structure: &mut Structure,
        kind: AngleKind,
        target: f64,
    ) -> Result<(), EngineError> {
        kind.check(target)?;
        let current = self.measure(structure, kind)?;
        let (fixed, root, center) = self.hinge(kind);

        let moving = match downstream(structure, fixed, root) {
            Ok(moving) => moving,
            Err(RingClosure) if matches!(kind, AngleKind::Phi | AngleKind::AdjN) => {
                downstream(structure, self.prev.coo, self.next.n)
                    .map_err(|_| EngineError::RingConstrained { kind })?
            }
            Err(RingClosure) => return Err(EngineError::RingConstrained { kind }),
        };

        let mut delta = target - current.degrees;
        if kind.category() == AngleCategory::Ramachandran {
            delta = wrap_degrees(delta);
        }
        let pivot = structure
            .position(center)
            .ok_or(EngineError::MissingAtom(center))?;
        let rotation = rotation_from_axis_angle(&current.axis, delta);
        structure.rotate_atoms_about(&moving, &pivot, &rotation);

        trace!(%kind, from = current.degrees, to = target, moved = moving.len(), "Angle set.");
        Ok(())
    }

    /// Applies a validated target array in dependency order: the dihedrals
    /// from the preceding residue outwards, then the bond angles, then the
    /// rise and tilt corrections.
    pub(crate) fn apply_targets(
        &self,
        structure: &mut Structure,
        targets: &[f64],
    ) -> Result<(), EngineError> {
        const ORDER: [AngleKind; 10] = [
            AngleKind::Psi,
            AngleKind::Phi,
            AngleKind::Omega,
            AngleKind::AdjCmain,
            AngleKind::AdjN,
            AngleKind::AdjCoo,
            AngleKind::O2Rise,
            AngleKind::O2Tilt,
            AngleKind::PlRise,
            AngleKind::PlTilt,
        ];
        for kind in ORDER.into_iter().filter(|kind| kind.index() < targets.len()) {
            self.set(structure, kind, targets[kind.index()])?;
        }
        Ok(())
    }
}

/// Resolves junction `index` of a chain given in N-to-C unit order.
///
/// # Errors
///
/// [`EngineError::EmptyInput`] for an empty unit list,
/// [`EngineError::JunctionOutOfRange`] for an index past the last junction and
/// [`EngineError::NotAdjacent`] if the two units are not peptide-bonded.
pub fn junction(
    structure: &Structure,
    units: &[AaBackbone],
    index: usize,
) -> Result<Junction, EngineError> {
    if units.is_empty() {
        return Err(EngineError::EmptyInput("backbone units"));
    }
    let junctions = units.len() - 1;
    if index >= junctions {
        return Err(EngineError::JunctionOutOfRange { index, junctions });
    }
    let junction = Junction::new(units[index], units[index + 1]);
    if !junction.is_bonded(structure) {
        return Err(EngineError::NotAdjacent { index });
    }
    Ok(junction)
}

pub fn angle_at(
    structure: &Structure,
    units: &[AaBackbone],
    index: usize,
    kind: AngleKind,
) -> Result<AngleAxis, EngineError> {
    junction(structure, units, index)?.measure(structure, kind)
}

/// Measures one angle kind at every junction of `range`.
pub fn angles_in_range(
    structure: &Structure,
    units: &[AaBackbone],
    range: Range<usize>,
    kind: AngleKind,
) -> Result<Vec<AngleAxis>, EngineError> {
    range
        .map(|index| angle_at(structure, units, index, kind))
        .collect()
}

/// Reports all ten angles at every junction of a chain without modifying it.
///
/// A single unit has no junctions and yields an empty list.
pub fn read_angles_along_chain(
    structure: &Structure,
    units: &[AaBackbone],
) -> Result<Vec<JunctionAngles>, EngineError> {
    if units.is_empty() {
        return Err(EngineError::EmptyInput("backbone units"));
    }
    (0..units.len() - 1)
        .map(|index| junction(structure, units, index)?.measure_all(structure))
        .collect()
}

/// Sets one angle at one junction by rotating the fragment downstream of it.
///
/// # Errors
///
/// Besides the junction lookup errors of [`junction`], fails with
/// [`EngineError::AngleOutOfRange`] for a target outside the kind's domain and
/// [`EngineError::RingConstrained`] when the moving fragment is tied back to
/// the fixed side by a ring.
pub fn set_angle(
    structure: &mut Structure,
    units: &[AaBackbone],
    index: usize,
    kind: AngleKind,
    value: f64,
) -> Result<(), EngineError> {
    kind.check(value)?;
    let junction = junction(structure, units, index)?;
    junction.set(structure, kind, value)
}

pub fn set_junction_angles(
    _structure: &mut Structure,
    _units: &[AaBackbone],
    _index: usize,
    _angles: &[f64],
) -> Result<(), EngineError> {
    Err(EngineError::NotImplemented(
        "setting several angles of one junction at once",
    ))
}

pub fn set_angles_in_range(
    _structure: &mut Structure,
    _units: &[AaBackbone],
    _range: Range<usize>,
    _kind: AngleKind,
    _values: &[f64],
) -> Result<(), EngineError> {
    Err(EngineError::NotImplemented(
        "setting angles across a range of junctions",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templates::AminoAcid;
    use crate::engine::assembly::append_amino_acid;
    use crate::engine::backbone;

    fn angle_diff(a: f64, b: f64) -> f64 {
        wrap_degrees(a - b).abs()
    }

    fn chain(residues: &[AminoAcid], targets: &[&[f64]]) -> (Structure, Vec<AaBackbone>) {
        let mut structure = residues[0].build();
        for (residue, angles) in residues[1..].iter().zip(targets) {
            append_amino_acid(&mut structure, residue.build(), angles).unwrap();
        }
        let units = backbone::find_all(&structure);
        (structure, units)
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_empty_and_complete_arrays() {
            assert!(check_angles(&[]).is_ok());
            assert!(check_angles(&[180.0, -60.0, -45.0]).is_ok());
            assert!(check_angles(&[180.0, -60.0, -45.0, 120.0, 110.0, 115.0]).is_ok());
            assert!(
                check_angles(&[-180.0, 180.0, 0.0, 0.0, 180.0, 90.0, -90.0, 90.0, 0.0, 0.0])
                    .is_ok()
            );
        }

        #[test]
        fn rejects_other_lengths() {
            for len in [1, 2, 4, 5, 7, 9, 11] {
                let angles = vec![0.0; len];
                assert!(matches!(
                    check_angles(&angles),
                    Err(EngineError::InvalidAngleCount { found }) if found == len
                ));
            }
        }

        #[test]
        fn rejects_values_outside_their_category() {
            assert!(matches!(
                check_angles(&[180.5, 0.0, 0.0]),
                Err(EngineError::AngleOutOfRange { kind: AngleKind::Omega, .. })
            ));
            assert!(matches!(
                check_angles(&[0.0, 0.0, 0.0, -1.0, 100.0, 100.0]),
                Err(EngineError::AngleOutOfRange { kind: AngleKind::AdjN, .. })
            ));
            assert!(matches!(
                check_angles(&[0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 0.0, 0.0, 91.0, 0.0]),
                Err(EngineError::AngleOutOfRange { kind: AngleKind::PlRise, .. })
            ));
            assert!(check_angles(&[f64::NAN, 0.0, 0.0]).is_err());
        }

        #[test]
        fn kinds_parse_and_print_by_name() {
            for kind in AngleKind::ALL {
                assert_eq!(kind.to_string().parse::<AngleKind>(), Ok(kind));
            }
            assert_eq!("ADJCMAIN".parse::<AngleKind>(), Ok(AngleKind::AdjCmain));
            assert!("chi1".parse::<AngleKind>().is_err());
            assert_eq!(AngleKind::PlTilt.index(), 9);
        }
    }

    mod ring_detection {
        use super::*;
        use crate::core::models::atom::Atom;
        use crate::core::models::element::Element;
        use nalgebra::Point3;

        #[test]
        fn downstream_collects_the_far_side_of_a_bond() {
            let mut s = Structure::default();
            let ids: Vec<AtomId> = (0..4)
                .map(|_| s.add_atom(Atom::new(Element::C, Point3::origin())))
                .collect();
            s.link(ids[0], ids[1]);
            s.link(ids[1], ids[2]);
            s.link(ids[2], ids[3]);

            let moving = downstream(&s, ids[1], ids[2]).unwrap();
            assert_eq!(moving.len(), 2);
            assert!(moving.contains(&ids[2]) && moving.contains(&ids[3]));
        }

        #[test]
        fn downstream_reports_rings() {
            let mut s = Structure::default();
            let ids: Vec<AtomId> = (0..3)
                .map(|_| s.add_atom(Atom::new(Element::C, Point3::origin())))
                .collect();
            s.link(ids[0], ids[1]);
            s.link(ids[1], ids[2]);
            s.link(ids[2], ids[0]);

            assert!(downstream(&s, ids[0], ids[1]).is_err());
        }
    }

    mod chain_angles {
        use super::*;

        #[test]
        fn single_unit_has_no_junctions() {
            let (s, units) = chain(&[AminoAcid::Alanine], &[]);
            assert!(read_angles_along_chain(&s, &units).unwrap().is_empty());
            assert!(matches!(
                angle_at(&s, &units, 0, AngleKind::Phi),
                Err(EngineError::JunctionOutOfRange { index: 0, junctions: 0 })
            ));
        }

        #[test]
        fn empty_unit_list_is_rejected() {
            let s = Structure::default();
            assert!(matches!(
                read_angles_along_chain(&s, &[]),
                Err(EngineError::EmptyInput(_))
            ));
        }

        #[test]
        fn units_must_be_bonded() {
            let (s, units) = chain(&[AminoAcid::Glycine, AminoAcid::Alanine], &[&[]]);
            let reversed = [units[1], units[0]];
            assert!(matches!(
                read_angles_along_chain(&s, &reversed),
                Err(EngineError::NotAdjacent { index: 0 })
            ));
        }

        #[test]
        fn set_angle_changes_only_the_requested_junction() {
            let (mut s, units) = chain(
                &[AminoAcid::Glycine, AminoAcid::Alanine, AminoAcid::Serine],
                &[&[180.0, -60.0, -45.0], &[180.0, -60.0, -45.0]],
            );
            let before = read_angles_along_chain(&s, &units).unwrap();

            set_angle(&mut s, &units, 1, AngleKind::Phi, -100.0).unwrap();
            let after = read_angles_along_chain(&s, &units).unwrap();

            assert!(angle_diff(after[1][AngleKind::Phi], -100.0) < 1e-6);
            for kind in AngleKind::ALL {
                assert!(angle_diff(after[0][kind], before[0][kind]) < 1e-6, "{kind} moved");
            }
            assert!(angle_diff(after[1][AngleKind::Psi], before[1][AngleKind::Psi]) < 1e-6);
        }

        #[test]
        fn set_angle_preserves_bond_lengths() {
            let (mut s, units) = chain(&[AminoAcid::Alanine, AminoAcid::Alanine], &[&[]]);
            let lengths = |s: &Structure| -> Vec<f64> {
                s.bonds()
                    .iter()
                    .map(|&(a, b)| nalgebra::distance(&s.position(a).unwrap(), &s.position(b).unwrap()))
                    .collect()
            };
            let before = lengths(&s);

            set_angle(&mut s, &units, 0, AngleKind::Psi, 135.0).unwrap();
            set_angle(&mut s, &units, 0, AngleKind::AdjCoo, 118.0).unwrap();
            set_angle(&mut s, &units, 0, AngleKind::PlTilt, 4.0).unwrap();

            for (a, b) in before.iter().zip(lengths(&s)) {
                assert!((a - b).abs() < 1e-9);
            }
            let angles = read_angles_along_chain(&s, &units).unwrap();
            assert!(angle_diff(angles[0][AngleKind::Psi], 135.0) < 1e-6);
            assert!((angles[0][AngleKind::AdjCoo] - 118.0).abs() < 1e-6);
            assert!((angles[0][AngleKind::PlTilt] - 4.0).abs() < 1e-6);
        }

        #[test]
        fn proline_side_chain_angles_are_ring_constrained() {
            let (mut s, units) = chain(&[AminoAcid::Glycine, AminoAcid::Proline], &[&[]]);

            assert!(matches!(
                set_angle(&mut s, &units, 0, AngleKind::PlRise, 10.0),
                Err(EngineError::RingConstrained { kind: AngleKind::PlRise })
            ));
            set_angle(&mut s, &units, 0, AngleKind::Phi, -65.0).unwrap();
            let phi = angle_at(&s, &units, 0, AngleKind::Phi).unwrap();
            assert!(angle_diff(phi.degrees, -65.0) < 1e-6);
        }

        #[test]
        fn proline_nitrogen_angle_keeps_the_ring_in_the_amide_plane() {
            let (mut s, units) = chain(&[AminoAcid::Glycine, AminoAcid::Proline], &[&[]]);
            set_angle(&mut s, &units, 0, AngleKind::AdjN, 125.0).unwrap();

            let adj_n = angle_at(&s, &units, 0, AngleKind::AdjN).unwrap();
            assert!((adj_n.degrees - 125.0).abs() < 1e-6);
            let pos = |id| s.position(id).unwrap();
            let n = pos(units[1].n);
            let normal = (pos(units[0].coo) - n).cross(&(pos(units[1].cmain) - n)).normalize();
            let ring = (pos(units[1].hcn1) - n).normalize();
            assert!(normal.dot(&ring).abs() < 1e-9);
        }

        #[test]
        fn out_of_domain_targets_are_rejected_before_mutation() {
            let (mut s, units) = chain(&[AminoAcid::Glycine, AminoAcid::Alanine], &[&[]]);
            let snapshot = s.clone();

            assert!(matches!(
                set_angle(&mut s, &units, 0, AngleKind::AdjN, 190.0),
                Err(EngineError::AngleOutOfRange { .. })
            ));
            assert!(s.is_equal(&snapshot));
        }

        #[test]
        fn batch_setters_are_not_implemented() {
            let (mut s, units) = chain(&[AminoAcid::Glycine, AminoAcid::Alanine], &[&[]]);
            assert!(matches!(
                set_junction_angles(&mut s, &units, 0, &[180.0, -60.0, -45.0]),
                Err(EngineError::NotImplemented(_))
            ));
            assert!(matches!(
                set_angles_in_range(&mut s, &units, 0..1, AngleKind::Phi, &[-60.0]),
                Err(EngineError::NotImplemented(_))
            ));
        }

        #[test]
        fn angles_in_range_measures_each_junction() {
            let (s, units) = chain(
                &[AminoAcid::Glycine, AminoAcid::Glycine, AminoAcid::Glycine],
                &[&[180.0, -70.0, 150.0], &[180.0, -80.0, 140.0]],
            );
            let phis = angles_in_range(&s, &units, 0..2, AngleKind::Phi).unwrap();
            assert_eq!(phis.len(), 2);
            assert!(angle_diff(phis[0].degrees, -70.0) < 1e-6);
            assert!(angle_diff(phis[1].degrees, -80.0) < 1e-6);
            assert!(matches!(
                angles_in_range(&s, &units, 1..3, AngleKind::Phi),
                Err(EngineError::JunctionOutOfRange { index: 2, junctions: 2 })
            ));
        }
    }
}
