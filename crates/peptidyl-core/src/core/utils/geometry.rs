use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Below this length a cross product is treated as zero, i.e. the two
/// vectors are considered parallel or antiparallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// An angle in degrees together with the rotation axis that changes it.
///
/// Rotating the moving side of an angle by `+delta` degrees about `axis`
/// (right-hand rule) increases the measured angle by `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleAxis {
    pub degrees: f64,
    pub axis: Unit<Vector3<f64>>,
}

pub fn rotation_from_axis_angle(axis: &Unit<Vector3<f64>>, angle_degrees: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(axis, angle_degrees.to_radians())
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Component of `v` perpendicular to the unit vector `axis`.
pub fn orthogonal_component(v: &Vector3<f64>, axis: &Unit<Vector3<f64>>) -> Vector3<f64> {
    let axis = axis.as_ref();
    v - axis * v.dot(axis)
}

/// Rotation that maps the direction of `from` onto the direction of `to`.
///
/// Parallel inputs give the identity. Antiparallel inputs have no unique
/// rotation axis, so the half turn is taken about `fallback_axis`, which the
/// caller chooses perpendicular to both vectors. Returns `None` if an input
/// vector has zero length.
pub fn rotation_between(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
    fallback_axis: &Vector3<f64>,
) -> Option<Rotation3<f64>> {
    let from = from.try_normalize(PARALLEL_EPSILON)?;
    let to = to.try_normalize(PARALLEL_EPSILON)?;
    let cross = from.cross(&to);
    let sine = cross.norm();
    let cosine = from.dot(&to);

    if sine > PARALLEL_EPSILON {
        let axis = Unit::new_unchecked(cross / sine);
        return Some(Rotation3::from_axis_angle(&axis, sine.atan2(cosine)));
    }
    if cosine > 0.0 {
        return Some(Rotation3::identity());
    }
    let fallback = Unit::try_new(*fallback_axis, PARALLEL_EPSILON)?;
    Some(Rotation3::from_axis_angle(&fallback, std::f64::consts::PI))
}

/// Rotation that carries the frame (`m1`, `m2`) onto the frame (`n1`, `n2`).
///
/// `m2` is first aligned with `n2`, then the rotated `m1` is aligned with
/// `n1`. When `m1 ⟂ m2` and `n1 ⟂ n2` both pairs end up aligned exactly.
/// Each step falls back to the other target direction as the half-turn axis.
pub fn rotate_corner_to_corner(
    n1: &Vector3<f64>,
    n2: &Vector3<f64>,
    m1: &Vector3<f64>,
    m2: &Vector3<f64>,
) -> Option<Rotation3<f64>> {
    let first = rotation_between(m2, n2, n1)?;
    let second = rotation_between(&(first * m1), n1, n2)?;
    Some(second * first)
}

/// Places a fourth atom from three reference atoms using internal coordinates.
///
/// The new atom is bonded to `c` at `length`, forms the angle `b-c-new` of
/// `angle` degrees and the dihedral `a-b-c-new` of `dihedral` degrees.
pub fn place_atom(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    length: f64,
    angle: f64,
    dihedral: f64,
) -> Point3<f64> {
    let bc = (c - b).normalize();
    let normal = (b - a).cross(&bc).normalize();
    let in_plane = normal.cross(&bc);
    let (theta, phi) = (angle.to_radians(), dihedral.to_radians());

    let offset = bc * (-length * theta.cos())
        + in_plane * (length * theta.sin() * phi.cos())
        + normal * (length * theta.sin() * phi.sin());
    c + offset
}

/// The two remaining tetrahedral positions around `center` given two bonded neighbors.
pub fn tetrahedral_pair(
    center: &Point3<f64>,
    first: &Point3<f64>,
    second: &Point3<f64>,
    length: f64,
) -> [Point3<f64>; 2] {
    let u1 = (first - center).normalize();
    let u2 = (second - center).normalize();
    let bisector = -(u1 + u2).normalize();
    let normal = u1.cross(&u2).normalize();
    let half = (109.5f64 / 2.0).to_radians();

    let up = bisector * half.cos() + normal * half.sin();
    let down = bisector * half.cos() - normal * half.sin();
    [center + up * length, center + down * length]
}

/// Dihedral angle `p0-p1-p2-p3` with its rotation axis along `p1 -> p2`.
///
/// Uses the IUPAC sign convention: looking down the axis, a clockwise turn
/// from the front bond to the back bond is positive.
pub fn dihedral_angle(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Option<AngleAxis> {
    let axis = Unit::try_new(p2 - p1, PARALLEL_EPSILON)?;
    let u = orthogonal_component(&(p0 - p1), &axis);
    let v = orthogonal_component(&(p3 - p2), &axis);
    if u.norm() < PARALLEL_EPSILON || v.norm() < PARALLEL_EPSILON {
        return None;
    }
    let degrees = axis.dot(&u.cross(&v)).atan2(u.dot(&v)).to_degrees();
    Some(AngleAxis { degrees, axis })
}

/// Bond angle `prev-pivot-next` in `[0, 180]`.
///
/// The axis is the normal of the plane spanned by the two arms; rotating
/// `next` about it opens the angle.
pub fn bond_angle(
    prev: &Point3<f64>,
    pivot: &Point3<f64>,
    next: &Point3<f64>,
) -> Option<AngleAxis> {
    let u = (prev - pivot).try_normalize(PARALLEL_EPSILON)?;
    let v = (next - pivot).try_normalize(PARALLEL_EPSILON)?;
    let axis = Unit::try_new(u.cross(&v), PARALLEL_EPSILON)?;
    let degrees = u.dot(&v).clamp(-1.0, 1.0).acos().to_degrees();
    Some(AngleAxis { degrees, axis })
}

/// Unit normal of the plane through `center`, `in1`, `in2`.
fn plane_normal(
    center: &Point3<f64>,
    in1: &Point3<f64>,
    in2: &Point3<f64>,
) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new((in1 - center).cross(&(in2 - center)), PARALLEL_EPSILON)
}

/// Elevation of the bond `center -> side` above the plane `(center, in1, in2)`, in `[-90, 90]`.
pub fn rise_angle(
    side: &Point3<f64>,
    center: &Point3<f64>,
    in1: &Point3<f64>,
    in2: &Point3<f64>,
) -> Option<AngleAxis> {
    let normal = plane_normal(center, in1, in2)?;
    let bond = (side - center).try_normalize(PARALLEL_EPSILON)?;
    let projected = orthogonal_component(&bond, &normal).try_normalize(PARALLEL_EPSILON)?;
    let axis = Unit::try_new(projected.cross(normal.as_ref()), PARALLEL_EPSILON)?;
    let degrees = bond.dot(normal.as_ref()).clamp(-1.0, 1.0).asin().to_degrees();
    Some(AngleAxis { degrees, axis })
}

/// In-plane deviation of the bond `center -> side` from the external
/// bisector of the angle `in1-center-in2`, in `(-180, 180]`.
pub fn tilt_angle(
    side: &Point3<f64>,
    center: &Point3<f64>,
    in1: &Point3<f64>,
    in2: &Point3<f64>,
) -> Option<AngleAxis> {
    let normal = plane_normal(center, in1, in2)?;
    let projected = orthogonal_component(&(side - center), &normal);
    if projected.norm() < PARALLEL_EPSILON {
        return None;
    }
    let arm1 = (in1 - center).normalize();
    let arm2 = (in2 - center).normalize();
    let bisector = -(arm1 + arm2).try_normalize(PARALLEL_EPSILON)?;
    let degrees = bisector
        .cross(&projected)
        .dot(normal.as_ref())
        .atan2(bisector.dot(&projected))
        .to_degrees();
    Some(AngleAxis {
        degrees,
        axis: normal,
    })
}
