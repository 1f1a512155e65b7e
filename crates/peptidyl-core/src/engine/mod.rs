//! # Engine Module
//!
//! The structural algorithms of the crate. Every operation here works on a
//! [`Structure`](crate::core::models::structure::Structure) and reports
//! failures through [`error::EngineError`].
//!
//! ## Overview
//!
//! Raw coordinates enter through the bond detector, which produces the bond
//! graph every other component reads. The backbone matcher recognizes
//! amino-acid units in that graph, angle geometry measures and changes the
//! conformation between consecutive units, and chain assembly grows a peptide
//! one residue at a time. The signature canonicalizer condenses a bonded
//! structure into an order-independent key for deduplication.
//!
//! ## Architecture
//!
//! - **Bond Detection** ([`bonding`]) - Distance-based covalent bond perception
//! - **Backbone Matching** ([`backbone`]) - Table-driven recognition of amino-acid units,
//!   including glycine and proline
//! - **Angle Geometry** ([`angles`]) - The ten junction angles with their rotation axes
//! - **Chain Assembly** ([`assembly`]) - Rigid residue placement and peptide bond formation
//! - **Signatures** ([`signature`]) - Depth-bounded structural keys and a lookup table
//! - **Configuration** ([`config`]) - Bond tolerance and signature depth
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - The engine error type
//!
//! ## Key Capabilities
//!
//! - **Transactional assembly**: a failed append leaves the chain untouched
//! - **Proline-aware geometry** with ring-constrained angle changes reported as errors
//! - **Optional parallelism** for pair scans and signatures behind the `parallel` feature

pub mod angles;
pub mod assembly;
pub mod backbone;
pub mod bonding;
pub mod config;
pub mod error;
pub mod progress;
pub mod signature;
