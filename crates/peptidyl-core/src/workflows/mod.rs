//! # Workflows Module
//!
//! High-level procedures that combine the core models and the engine into
//! complete tasks with progress reporting.
//!
//! - **Peptide Building** ([`peptide`]) - Builds a peptide from a one-letter sequence and
//!   per-junction target angles
//! - **Deduplication** ([`dedup`]) - Groups structures that share a signature

pub mod dedup;
pub mod peptide;
