use crate::core::models::element::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::engine::config::SignatureConfig;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The bounded-depth neighborhood tree of one atom.
///
/// Children are the bonded neighbors not already on the path from the root,
/// kept sorted so that equal neighborhoods compare equal whatever the atom
/// order of the structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomSignature {
    element: Element,
    children: Vec<AtomSignature>,
}

impl AtomSignature {
    pub fn element(&self) -> Element {
        self.element
    }

    pub fn children(&self) -> &[AtomSignature] {
        &self.children
    }

    /// Builds the signature tree rooted at `root`, looking `depth` bonds out.
    pub fn compute(structure: &Structure, root: AtomId, depth: usize) -> Option<Self> {
        let mut path = Vec::with_capacity(depth);
        Self::expand(structure, root, &mut path, depth)
    }

    fn expand(
        structure: &Structure,
        atom: AtomId,
        path: &mut Vec<AtomId>,
        max_depth: usize,
    ) -> Option<Self> {
        let element = structure.element(atom)?;
        let mut children = Vec::new();
        if path.len() < max_depth {
            path.push(atom);
            for &neighbor in structure.bonded_neighbors(atom) {
                if path.contains(&neighbor) {
                    continue;
                }
                if let Some(child) = Self::expand(structure, neighbor, path, max_depth) {
                    children.push(child);
                }
            }
            path.pop();
        }
        children.sort();
        Some(Self { element, children })
    }
}

impl Ord for AtomSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.element
            .cmp(&other.element)
            .then_with(|| self.children.len().cmp(&other.children.len()))
            .then_with(|| self.children.cmp(&other.children))
    }
}

impl PartialOrd for AtomSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AtomSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{elt: \"{}\"", self.element)?;
        if !self.children.is_empty() {
            f.write_str(", n: [")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

/// Order-independent structural key of a whole structure.
///
/// Two structures share a signature when their atoms can be paired so that
/// every pair has the same neighborhood tree. Structures that differ only
/// farther than the signature depth from every atom are not told apart, so
/// this is a deduplication key, not a graph isomorphism test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MoleculeSignature(Vec<AtomSignature>);

impl MoleculeSignature {
    /// Computes the signature at the configured depth.
    pub fn compute(structure: &Structure, config: &SignatureConfig) -> Self {
        Self::compute_with_depth(structure, config.depth)
    }

    #[instrument(skip_all, name = "signature", fields(atoms = structure.len(), depth = depth))]
    pub fn compute_with_depth(structure: &Structure, depth: usize) -> Self {
        #[cfg(not(feature = "parallel"))]
        let iterator = structure.atom_ids().iter();

        #[cfg(feature = "parallel")]
        let iterator = structure.atom_ids().par_iter();

        let mut atoms: Vec<AtomSignature> = iterator
            .filter_map(|&id| AtomSignature::compute(structure, id, depth))
            .collect();
        atoms.sort();
        debug!(atoms = atoms.len(), "Signature computed.");
        Self(atoms)
    }

    pub fn atoms(&self) -> &[AtomSignature] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ord for MoleculeSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for MoleculeSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MoleculeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, atom) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{atom}")?;
        }
        f.write_str("]")
    }
}

/// Maps structure signatures to caller-chosen identifiers.
#[derive(Debug, Clone, Default)]
pub struct StructureDb {
    config: SignatureConfig,
    entries: BTreeMap<MoleculeSignature, String>,
}

impl StructureDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SignatureConfig) -> Self {
        Self {
            config,
            entries: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    pub fn signature(&self, structure: &Structure) -> MoleculeSignature {
        MoleculeSignature::compute(structure, &self.config)
    }

    /// Registers `structure` under `id`.
    ///
    /// # Return
    ///
    /// The identifier previously stored for an equivalent structure, which
    /// `id` replaces.
    pub fn add(&mut self, structure: &Structure, id: &str) -> Option<String> {
        let signature = self.signature(structure);
        self.insert(signature, id)
    }

    pub fn insert(&mut self, signature: MoleculeSignature, id: &str) -> Option<String> {
        self.entries.insert(signature, id.to_string())
    }

    /// Looks up the identifier of a previously added equivalent structure.
    pub fn find(&self, structure: &Structure) -> Option<&str> {
        self.get(&self.signature(structure))
    }

    pub fn get(&self, signature: &MoleculeSignature) -> Option<&str> {
        self.entries.get(signature).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in signature order.
    pub fn iter(&self) -> btree_map::Iter<'_, MoleculeSignature, String> {
        self.entries.iter()
    }
}
