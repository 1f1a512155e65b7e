//! # Core Module
//!
//! Stateless building blocks shared by the rest of the crate.
//!
//! - **Molecular representation** ([`models`]) - Elements, atoms and the
//!   [`Structure`](models::structure::Structure) graph
//! - **Geometry** ([`utils`]) - Vector helpers for angles, rotations and atom placement
//! - **File I/O** ([`io`]) - Reading and writing XYZ coordinate files
//! - **Residue templates** ([`templates`]) - Free amino-acid builders used by peptide assembly

pub mod io;
pub mod models;
pub mod templates;
pub mod utils;
