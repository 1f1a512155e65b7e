use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{place_atom, tetrahedral_pair};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Amino acids with a built-in free (zwitterion-free, neutral) template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    Glycine,  // Glycine (GLY)
    Alanine,  // Alanine (ALA)
    Serine,   // Serine (SER)
    Cysteine, // Cysteine (CYS)
    Proline,  // Proline (PRO)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown amino acid '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl AminoAcid {
    pub const ALL: [AminoAcid; 5] = [
        AminoAcid::Glycine,
        AminoAcid::Alanine,
        AminoAcid::Serine,
        AminoAcid::Cysteine,
        AminoAcid::Proline,
    ];

    /// Looks up a one-letter code, ignoring case.
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|aa| aa.code() == code.to_ascii_uppercase())
    }

    pub fn code(self) -> char {
        match self {
            AminoAcid::Glycine => 'G',
            AminoAcid::Alanine => 'A',
            AminoAcid::Serine => 'S',
            AminoAcid::Cysteine => 'C',
            AminoAcid::Proline => 'P',
        }
    }

    pub fn three_letter(self) -> &'static str {
        match self {
            AminoAcid::Glycine => "GLY",
            AminoAcid::Alanine => "ALA",
            AminoAcid::Serine => "SER",
            AminoAcid::Cysteine => "CYS",
            AminoAcid::Proline => "PRO",
        }
    }

    /// Builds the free amino acid with idealized geometry and named atoms.
    ///
    /// The nitrogen sits at the origin and the alpha carbon on the +x axis.
    /// Bonds are set from the template topology; no detection is involved.
    pub fn build(self) -> Structure {
        let mut t = Template::new(self.three_letter());
        let n = Point3::origin();
        let ca = Point3::new(1.46, 0.0, 0.0);
        let c = ca + Vector3::new(69f64.to_radians().cos(), 69f64.to_radians().sin(), 0.0) * 1.52;

        t.atom("N", Element::N, n);
        if self != AminoAcid::Proline {
            t.atom("H1", Element::H, place_atom(&c, &ca, &n, 1.01, 109.5, 60.0));
            t.atom("H2", Element::H, place_atom(&c, &ca, &n, 1.01, 109.5, -60.0));
        }
        t.atom("CA", Element::C, ca);

        let cb = match self {
            AminoAcid::Proline => place_atom(&n, &c, &ca, 1.52, 109.5, 115.2975),
            _ => place_atom(&n, &c, &ca, 1.52, 109.5, 122.686),
        };
        let alpha = tetrahedral_pair(&ca, &n, &c, 1.09);
        let (ha, other) = if self == AminoAcid::Glycine
            || nalgebra::distance(&alpha[0], &cb) > nalgebra::distance(&alpha[1], &cb)
        {
            (alpha[0], alpha[1])
        } else {
            (alpha[1], alpha[0])
        };
        t.atom(
            if self == AminoAcid::Glycine { "HA2" } else { "HA" },
            Element::H,
            ha,
        );

        t.atom("C", Element::C, c);
        t.atom("O", Element::O, place_atom(&n, &ca, &c, 1.23, 120.5, -20.0));
        let oxt = t.atom("OXT", Element::O, place_atom(&n, &ca, &c, 1.34, 113.0, 160.0));
        t.atom("HXT", Element::H, place_atom(&ca, &c, &oxt, 0.97, 107.0, 180.0));

        match self {
            AminoAcid::Glycine => {
                t.atom("HA3", Element::H, other);
            }
            AminoAcid::Alanine => {
                t.atom("CB", Element::C, cb);
                for (name, dihedral) in [("HB1", 60.0), ("HB2", 180.0), ("HB3", -60.0)] {
                    t.atom(name, Element::H, place_atom(&n, &ca, &cb, 1.09, 109.5, dihedral));
                }
            }
            AminoAcid::Serine => {
                t.atom("CB", Element::C, cb);
                let og = t.atom("OG", Element::O, place_atom(&n, &ca, &cb, 1.417, 110.773, -63.3));
                let [hb2, hb3] = tetrahedral_pair(&cb, &ca, &og, 1.09);
                t.atom("HB2", Element::H, hb2);
                t.atom("HB3", Element::H, hb3);
                t.atom("HG", Element::H, place_atom(&ca, &cb, &og, 0.97, 109.0, 180.0));
            }
            AminoAcid::Cysteine => {
                t.atom("CB", Element::C, cb);
                let sg = t.atom("SG", Element::S, place_atom(&n, &ca, &cb, 1.81, 113.8, -62.2));
                let [hb2, hb3] = tetrahedral_pair(&cb, &ca, &sg, 1.09);
                t.atom("HB2", Element::H, hb2);
                t.atom("HB3", Element::H, hb3);
                t.atom("HG", Element::H, place_atom(&ca, &cb, &sg, 1.34, 96.0, 180.0));
            }
            AminoAcid::Proline => {
                t.atom("CB", Element::C, cb);
                let cg = t.atom("CG", Element::C, place_atom(&n, &ca, &cb, 1.49, 104.21, 29.6));
                let cd = t.atom("CD", Element::C, place_atom(&ca, &cb, &cg, 1.50, 105.03, -34.8));
                let ring = [
                    (["HB2", "HB3"], tetrahedral_pair(&cb, &ca, &cg, 1.09)),
                    (["HG2", "HG3"], tetrahedral_pair(&cg, &cb, &cd, 1.09)),
                    (["HD2", "HD3"], tetrahedral_pair(&cd, &cg, &n, 1.09)),
                ];
                for (names, positions) in ring {
                    for (name, position) in names.into_iter().zip(positions) {
                        t.atom(name, Element::H, position);
                    }
                }
                t.atom("H", Element::H, tetrahedral_pair(&n, &ca, &cd, 1.01)[0]);
            }
        }

        for (a, b) in BACKBONE_BONDS.iter().chain(self.side_chain_bonds()) {
            t.bond(a, b);
        }
        t.finish()
    }

    fn side_chain_bonds(self) -> &'static [(&'static str, &'static str)] {
        match self {
            AminoAcid::Glycine => GLYCINE_BONDS,
            AminoAcid::Alanine => ALANINE_BONDS,
            AminoAcid::Serine => SERINE_BONDS,
            AminoAcid::Cysteine => CYSTEINE_BONDS,
            AminoAcid::Proline => PROLINE_BONDS,
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter())
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    /// Accepts a one-letter code or a three-letter name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            return Self::from_code(code).ok_or_else(|| ParseAminoAcidError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|aa| aa.three_letter().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseAminoAcidError(s.to_string()))
    }
}

#[rustfmt::skip]
const BACKBONE_BONDS: &[(&str, &str)] = &[
    ("N", "H1"), ("N", "H2"), ("N", "CA"),
    ("CA", "C"), ("C", "O"), ("C", "OXT"), ("OXT", "HXT"),
];

#[rustfmt::skip]
const GLYCINE_BONDS: &[(&str, &str)] = &[("CA", "HA2"), ("CA", "HA3")];

#[rustfmt::skip]
const ALANINE_BONDS: &[(&str, &str)] = &[
    ("CA", "HA"), ("CA", "CB"),
    ("CB", "HB1"), ("CB", "HB2"), ("CB", "HB3"),
];

#[rustfmt::skip]
const SERINE_BONDS: &[(&str, &str)] = &[
    ("CA", "HA"), ("CA", "CB"),
    ("CB", "OG"), ("CB", "HB2"), ("CB", "HB3"), ("OG", "HG"),
];

#[rustfmt::skip]
const CYSTEINE_BONDS: &[(&str, &str)] = &[
    ("CA", "HA"), ("CA", "CB"),
    ("CB", "SG"), ("CB", "HB2"), ("CB", "HB3"), ("SG", "HG"),
];

#[rustfmt::skip]
const PROLINE_BONDS: &[(&str, &str)] = &[
    ("N", "H"), ("CA", "HA"), ("CA", "CB"),
    ("CB", "CG"), ("CG", "CD"), ("CD", "N"),
    ("CB", "HB2"), ("CB", "HB3"), ("CG", "HG2"), ("CG", "HG3"), ("CD", "HD2"), ("CD", "HD3"),
];

/// Accumulates named template atoms; bonds refer to atoms by name.
struct Template {
    structure: Structure,
    names: HashMap<&'static str, AtomId>,
}

impl Template {
    fn new(description: &str) -> Self {
        Self {
            structure: Structure::new(description),
            names: HashMap::new(),
        }
    }

    fn atom(&mut self, name: &'static str, element: Element, position: Point3<f64>) -> Point3<f64> {
        let id = self
            .structure
            .add_atom(Atom::new(element, position).with_name(name).with_group(0));
        self.names.insert(name, id);
        position
    }

    /// Links two named atoms; names absent from this residue are skipped.
    fn bond(&mut self, a: &str, b: &str) {
        if let (Some(&a), Some(&b)) = (self.names.get(a), self.names.get(b)) {
            self.structure.link(a, b);
        }
    }

    fn finish(mut self) -> Structure {
        self.structure.set_num_groups(Some(1));
        self.structure
    }
}
