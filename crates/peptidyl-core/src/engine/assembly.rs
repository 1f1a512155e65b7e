use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{PARALLEL_EPSILON, orthogonal_component, rotate_corner_to_corner};
use crate::engine::angles::{Junction, check_angles};
use crate::engine::backbone::{self, AaBackbone, Terminus};
use crate::engine::error::EngineError;
use nalgebra::{Point3, Rotation3, Unit, Vector3};
use tracing::{debug, instrument};

/// The two backbone units joined by a successful [`append_residue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fusion {
    /// The former tail of the chain, now without its hydroxyl group.
    pub previous: AaBackbone,
    /// The appended unit, now the tail of the chain.
    pub appended: AaBackbone,
}

impl Fusion {
    pub fn junction(&self) -> Junction {
        Junction::new(self.previous, self.appended)
    }
}

fn position(structure: &Structure, id: AtomId) -> Result<Point3<f64>, EngineError> {
    structure.position(id).ok_or(EngineError::MissingAtom(id))
}

fn direction(v: Vector3<f64>, what: &str) -> Result<Unit<Vector3<f64>>, EngineError> {
    Unit::try_new(v, PARALLEL_EPSILON)
        .ok_or_else(|| EngineError::DegenerateGeometry(format!("{what} has zero length")))
}

/// The along and double-bond directions of a unit's carboxyl end.
///
/// `along` runs from the nitrogen to `along_end`, `double` is the component of
/// the C=O bond perpendicular to it.
fn carboxyl_frame(
    structure: &Structure,
    unit: &AaBackbone,
    along_end: AtomId,
) -> Result<(Vector3<f64>, Vector3<f64>), EngineError> {
    let n = position(structure, unit.n)?;
    let along = direction(position(structure, along_end)? - n, "backbone axis")?;
    let carbonyl = position(structure, unit.o2)? - position(structure, unit.coo)?;
    let double = direction(orthogonal_component(&carbonyl, &along), "carbonyl offset")?;
    Ok((along.into_inner(), double.into_inner()))
}

/// Of the unit's two amine hydrogens, the one sitting closest to `carbon`.
fn displaced_hydrogen(
    structure: &Structure,
    unit: &AaBackbone,
    carbon: &Point3<f64>,
) -> Result<AtomId, EngineError> {
    let mut candidates = Vec::with_capacity(2);
    if structure.element(unit.hcn1) == Some(Element::H) {
        candidates.push(unit.hcn1);
    }
    candidates.extend(unit.hn2);

    let mut best: Option<(AtomId, f64)> = None;
    for id in candidates {
        let distance = nalgebra::distance(&position(structure, id)?, carbon);
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((id, distance));
        }
    }
    best.map(|(id, _)| id).ok_or(EngineError::TerminusNotFree {
        terminus: Terminus::Amine,
    })
}

/// Orientation for a residue whose amine nitrogen carries only hydrogens.
///
/// The residue is turned so that its carboxyl end points away from the
/// chain and the two carbonyl oxygens sit on opposite sides of the backbone.
fn carboxyl_alignment(
    chain: &Structure,
    tail: &AaBackbone,
    tail_o1: AtomId,
    residue: &Structure,
    unit: &AaBackbone,
) -> Result<Rotation3<f64>, EngineError> {
    let (tail_along, tail_double) = carboxyl_frame(chain, tail, tail_o1)?;
    let residue_along_end = match unit.o1 {
        Some(o1) => o1,
        None => unit.next_nitrogen(residue).ok_or_else(|| {
            EngineError::DegenerateGeometry("residue unit has no carboxyl partner".to_string())
        })?,
    };
    let (residue_along, residue_double) = carboxyl_frame(residue, unit, residue_along_end)?;
    rotate_corner_to_corner(&tail_along, &tail_double, &residue_along, &-residue_double)
        .ok_or_else(|| EngineError::DegenerateGeometry("cannot align residue to the chain".into()))
}

/// Orientation for a residue whose nitrogen closes a ring.
///
/// The new peptide bond leaves the nitrogen opposite the bisector of its two
/// ring bonds, which keeps the amide planar, and the two alpha carbons end up
/// trans across it.
fn ring_alignment(
    chain: &Structure,
    tail: &AaBackbone,
    tail_o1: AtomId,
    residue: &Structure,
    unit: &AaBackbone,
) -> Result<Rotation3<f64>, EngineError> {
    let coo = position(chain, tail.coo)?;
    let bond = direction(coo - position(chain, tail_o1)?, "hydroxyl bond")?;
    let tail_side = orthogonal_component(&(position(chain, tail.cmain)? - coo), &bond);

    let n = position(residue, unit.n)?;
    let to_alpha = direction(position(residue, unit.cmain)? - n, "amine to alpha bond")?;
    let to_ring = direction(position(residue, unit.hcn1)? - n, "amine to ring bond")?;
    let outward = direction(-(to_alpha.into_inner() + to_ring.into_inner()), "ring bisector")?;
    let residue_side = -orthogonal_component(&to_alpha, &outward);

    rotate_corner_to_corner(&bond, &tail_side, &outward, &residue_side)
        .ok_or_else(|| EngineError::DegenerateGeometry("cannot align residue to the chain".into()))
}

/// Appends an amino-acid residue to the carboxyl end of a chain.
///
/// The residue is rigidly placed so that its nitrogen takes the position of
/// the tail's hydroxyl oxygen, with the carbonyl oxygens of the two units on
/// opposite sides of the backbone. A ring-closed nitrogen such as proline's
/// is instead oriented by its ring bonds so that the amide stays planar. The
/// tail's hydroxyl group and the residue's amine hydrogen nearest the new
/// bond are removed, the peptide bond is formed and the target angles are
/// applied to the new junction.
///
/// # Arguments
///
/// * `chain` - The growing chain; modified only on success.
/// * `tail` - Backbone unit of `chain` with a free carboxyl terminus.
/// * `residue` - The residue to append, typically a fresh template.
/// * `unit` - Backbone unit of `residue` with a free amine terminus.
/// * `targets` - 0, 3, 6 or 10 target angles in [`AngleKind`](crate::engine::angles::AngleKind) order.
///
/// # Return
///
/// The updated handles of the former tail and of the appended unit.
///
/// # Errors
///
/// Target validation errors, [`EngineError::TerminusNotFree`] if either end
/// is already bonded, and the errors of angle setting. On error `chain` is
/// unchanged.
#[instrument(skip_all, name = "append_residue", fields(targets = targets.len()))]
pub fn append_residue(
    chain: &mut Structure,
    tail: &AaBackbone,
    residue: &Structure,
    unit: &AaBackbone,
    targets: &[f64],
) -> Result<Fusion, EngineError> {
    check_angles(targets)?;
    let (Some(tail_o1), Some(tail_ho)) = (tail.o1, tail.ho) else {
        return Err(EngineError::TerminusNotFree {
            terminus: Terminus::Carboxyl,
        });
    };
    if unit.hn2.is_none() {
        return Err(EngineError::TerminusNotFree {
            terminus: Terminus::Amine,
        });
    }

    let mut work = chain.clone();
    work.center_at(&position(&work, tail_o1)?);
    let rotation = if residue.element(unit.hcn1) == Some(Element::H) {
        carboxyl_alignment(&work, tail, tail_o1, residue, unit)?
    } else {
        ring_alignment(&work, tail, tail_o1, residue, unit)?
    };

    let origin = position(residue, unit.n)?;
    let mut placed = residue.clone();
    placed.center_at(&origin);
    let id_map = work.merge_transformed(&placed, &Vector3::zeros(), &rotation);
    let mut appended = unit.remap(&id_map).ok_or_else(|| {
        EngineError::DegenerateGeometry("residue unit refers to atoms outside the residue".into())
    })?;

    let carbon = position(&work, tail.coo)?;
    let displaced = displaced_hydrogen(&work, &appended, &carbon)?;
    if displaced == appended.hcn1 {
        if let Some(kept) = appended.hn2 {
            appended.hcn1 = kept;
        }
    }
    for id in [tail_o1, tail_ho, displaced] {
        work.remove_atom(id);
    }
    work.link(tail.coo, appended.n);
    appended.hn2 = None;

    let previous = AaBackbone {
        o1: None,
        ho: None,
        ..*tail
    };
    let fusion = Fusion {
        previous,
        appended,
    };
    fusion.junction().apply_targets(&mut work, targets)?;

    debug!(atoms = work.len(), bonds = work.bond_count(), "Residue appended.");
    *chain = work;
    Ok(fusion)
}

/// Appends a standalone amino acid to the last backbone unit of `chain`.
///
/// `residue` must contain exactly one backbone unit.
pub fn append_amino_acid(
    chain: &mut Structure,
    residue: Structure,
    targets: &[f64],
) -> Result<Fusion, EngineError> {
    let tail = backbone::find_last(chain)?;
    let unit = backbone::find_one(&residue)?;
    append_residue(chain, &tail, &residue, &unit, targets)
}
