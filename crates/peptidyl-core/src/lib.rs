//! # Peptidyl Core Library
//!
//! Molecular structures as atom/bond graphs, with the structural analysis
//! needed to read and build peptides: bond perception from coordinates,
//! amino-acid backbone recognition, junction angle geometry, residue-by-residue
//! chain assembly and structural signatures for deduplication.
//!
//! ## Architectural Philosophy
//!
//! The library is layered so that each level only depends on the ones below it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Atom`,
//!   `Element`), vector geometry, XYZ file I/O and the built-in amino-acid templates.
//!
//! - **[`engine`]: The Logic Core.** The algorithms: bond detection, backbone
//!   matching, angle measurement and mutation, chain assembly and signatures,
//!   together with their configuration, error type and progress events.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as building a
//!   peptide from a sequence or grouping duplicate structures.

pub mod core;
pub mod engine;
pub mod workflows;
