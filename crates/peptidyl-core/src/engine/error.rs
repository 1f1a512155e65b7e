use thiserror::Error;

use super::angles::AngleKind;
use super::backbone::Terminus;
use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Bond detection does not support element {element}")]
    UnsupportedElement { element: Element },

    #[error("No amino-acid backbone found")]
    BackboneNotFound,

    #[error("Expected exactly one amino-acid backbone, found {count}")]
    AmbiguousBackbone { count: usize },

    #[error("Invalid number of target angles: {found} (expected 0, 3, 6 or 10)")]
    InvalidAngleCount { found: usize },

    #[error("Angle {kind} = {value} lies outside of [{min}, {max}]")]
    AngleOutOfRange {
        kind: AngleKind,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Junction {index} is out of range for a chain with {junctions} junction(s)")]
    JunctionOutOfRange { index: usize, junctions: usize },

    #[error("Expected angles for {expected} junction(s), found {found}")]
    JunctionCountMismatch { expected: usize, found: usize },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Backbone units {index} and {next} are not bonded to each other", next = index + 1)]
    NotAdjacent { index: usize },

    #[error("The {terminus} terminus is not free")]
    TerminusNotFree { terminus: Terminus },

    #[error("Angle {kind} cannot be changed: the moving fragment closes a ring")]
    RingConstrained { kind: AngleKind },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Atom {0:?} is not part of the structure")]
    MissingAtom(AtomId),

    #[error("Unknown amino-acid code '{0}'")]
    UnknownResidue(char),
}
