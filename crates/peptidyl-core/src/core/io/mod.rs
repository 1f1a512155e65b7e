//! Reading and writing molecular coordinate files.
//!
//! Formats implement the [`traits::MolecularFile`] trait, which provides
//! path-based helpers on top of reader/writer based parsing and serialization.
//! Readers only restore atoms; bonds are perceived afterwards with
//! [`detect_bonds`](crate::engine::bonding::detect_bonds).

pub mod traits;
pub mod xyz;
