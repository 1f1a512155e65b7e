use super::element::Element;
use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Secondary-structure label carried as optional atom metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SecondaryStructure {
    #[default]
    Unknown,
    Helix,
    Sheet,
    Turn,
    Coil,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown secondary structure label: '{0}'")]
pub struct ParseSecondaryStructureError(pub String);

impl FromStr for SecondaryStructure {
    type Err = ParseSecondaryStructureError;

    /// Parses a label, case-insensitively, accepting the usual one-letter codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "helix" | "h" => Ok(SecondaryStructure::Helix),
            "sheet" | "strand" | "e" => Ok(SecondaryStructure::Sheet),
            "turn" | "t" => Ok(SecondaryStructure::Turn),
            "coil" | "c" => Ok(SecondaryStructure::Coil),
            "unknown" | "" => Ok(SecondaryStructure::Unknown),
            _ => Err(ParseSecondaryStructureError(s.to_string())),
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SecondaryStructure::Unknown => "unknown",
            SecondaryStructure::Helix => "helix",
            SecondaryStructure::Sheet => "sheet",
            SecondaryStructure::Turn => "turn",
            SecondaryStructure::Coil => "coil",
        };
        f.write_str(label)
    }
}

/// A single atom of a [`Structure`](super::structure::Structure).
///
/// Only the element and the position take part in geometry and graph
/// algorithms. The remaining fields are descriptive metadata that travels
/// with the atom through merges and transformations.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical element.
    pub element: Element,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Optional atom name (e.g., "CA", "OXT").
    pub name: Option<String>,
    /// Whether the atom belongs to a hetero group.
    pub is_hetero: bool,
    /// Index of the chain the atom belongs to, if known.
    pub chain_index: Option<usize>,
    /// Index of the residue or group the atom belongs to, if known.
    pub group_index: Option<usize>,
    pub secondary_structure: SecondaryStructure,
}

impl Atom {
    /// Creates an atom with the given element and position and empty metadata.
    pub fn new(element: Element, position: Point3<f64>) -> Self {
        Self {
            element,
            position,
            name: None,
            is_hetero: false,
            chain_index: None,
            group_index: None,
            secondary_structure: SecondaryStructure::default(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_group(mut self, group_index: usize) -> Self {
        self.group_index = Some(group_index);
        self
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Returns a copy rotated about the origin and then shifted.
    pub fn transformed(&self, shift: &Vector3<f64>, rotation: &Rotation3<f64>) -> Self {
        Self {
            position: rotation * self.position + shift,
            ..self.clone()
        }
    }
}
