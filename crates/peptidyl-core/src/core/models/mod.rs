//! # Core Models Module
//!
//! Data structures for molecular graphs: chemical elements, atoms and the
//! [`structure::Structure`] container that owns them together with their bonds.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical elements H through Kr and their covalent radii
//! - [`atom`] - A single atom with its element, coordinates and optional metadata
//! - [`structure`] - An ordered atom arena with an undirected bond graph
//! - [`ids`] - Stable atom handles that survive removals
//!
//! ## Usage
//!
//! ```ignore
//! use peptidyl::core::models::{atom::Atom, element::Element, structure::Structure};
//!
//! let mut water = Structure::new("water");
//! let o = water.add_atom(Atom::new(Element::O, Point3::origin()));
//! let h = water.add_atom(Atom::new(Element::H, Point3::new(0.96, 0.0, 0.0)));
//! water.link(o, h);
//! ```

pub mod atom;
pub mod element;
pub mod ids;
pub mod structure;
