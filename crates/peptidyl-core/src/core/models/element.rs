use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A chemical element from hydrogen through krypton.
///
/// The discriminant equals the atomic number, so the derived ordering sorts
/// elements by atomic number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
}

#[rustfmt::skip]
const ELEMENTS: [Element; 36] = [
    Element::H, Element::He,
    Element::Li, Element::Be, Element::B, Element::C, Element::N, Element::O, Element::F, Element::Ne,
    Element::Na, Element::Mg, Element::Al, Element::Si, Element::P, Element::S, Element::Cl, Element::Ar,
    Element::K, Element::Ca,
    Element::Sc, Element::Ti, Element::V, Element::Cr, Element::Mn,
    Element::Fe, Element::Co, Element::Ni, Element::Cu, Element::Zn,
    Element::Ga, Element::Ge, Element::As, Element::Se, Element::Br, Element::Kr,
];

#[rustfmt::skip]
const SYMBOLS: [&str; 36] = [
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
];

#[rustfmt::skip]
static SYMBOL_LOOKUP: Map<&'static str, Element> = phf_map! {
    "H" => Element::H, "He" => Element::He,
    "Li" => Element::Li, "Be" => Element::Be, "B" => Element::B, "C" => Element::C,
    "N" => Element::N, "O" => Element::O, "F" => Element::F, "Ne" => Element::Ne,
    "Na" => Element::Na, "Mg" => Element::Mg, "Al" => Element::Al, "Si" => Element::Si,
    "P" => Element::P, "S" => Element::S, "Cl" => Element::Cl, "Ar" => Element::Ar,
    "K" => Element::K, "Ca" => Element::Ca,
    "Sc" => Element::Sc, "Ti" => Element::Ti, "V" => Element::V, "Cr" => Element::Cr,
    "Mn" => Element::Mn, "Fe" => Element::Fe, "Co" => Element::Co, "Ni" => Element::Ni,
    "Cu" => Element::Cu, "Zn" => Element::Zn,
    "Ga" => Element::Ga, "Ge" => Element::Ge, "As" => Element::As, "Se" => Element::Se,
    "Br" => Element::Br, "Kr" => Element::Kr,
};

// Single-bond covalent radii in Angstroms.
#[rustfmt::skip]
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.37,
    "C" => 0.70, "N" => 0.66, "O" => 0.63, "F" => 0.57,
    "P" => 1.07, "S" => 1.04, "Cl" => 1.02,
    "Se" => 1.20, "Br" => 1.20,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    pub fn atomic_number(self) -> u8 {
        self as u8
    }

    pub fn from_atomic_number(number: u8) -> Option<Self> {
        ELEMENTS.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[usize::from(self.atomic_number()) - 1]
    }

    /// Returns the covalent radius used for bond perception, if one is known.
    ///
    /// Only elements that commonly occur in peptides and small organic
    /// molecules carry a radius; bond detection rejects every other element.
    pub fn covalent_radius(self) -> Option<f64> {
        COVALENT_RADII.get(self.symbol()).copied()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol, accepting any letter case (`"CL"`, `"cl"`, `"Cl"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        };
        SYMBOL_LOOKUP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| ParseElementError(trimmed.to_string()))
    }
}
