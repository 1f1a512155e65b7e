use super::atom::Atom;
use super::element::Element;
use super::ids::AtomId;
use nalgebra::{Point3, Rotation3, Vector3};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;

/// A molecular graph: an ordered collection of atoms plus undirected bonds.
///
/// Atoms live in a slot map so that an [`AtomId`] stays valid, and keeps
/// pointing at the same atom, when other atoms are removed. A separate order
/// vector records insertion order, which is the order used for iteration,
/// file output, "first"/"last" queries and order-sensitive equality.
///
/// Bonds are stored as a symmetric adjacency list. Linking is idempotent and
/// removing an atom removes every bond that touches it.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Free-form description, written as the comment line of XYZ files.
    description: String,
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Atom ids in insertion order.
    order: Vec<AtomId>,
    /// Symmetric adjacency list, one entry per live atom.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    /// Optional chain count metadata.
    num_chains: Option<usize>,
    /// Optional group (residue) count metadata.
    num_groups: Option<usize>,
}

impl Structure {
    /// Creates an empty structure with the given description.
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn num_chains(&self) -> Option<usize> {
        self.num_chains
    }

    pub fn set_num_chains(&mut self, count: Option<usize>) {
        self.num_chains = count;
    }

    pub fn num_groups(&self) -> Option<usize> {
        self.num_groups
    }

    pub fn set_num_groups(&mut self, count: Option<usize>) {
        self.num_groups = count;
    }

    /// Returns the number of atoms.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&mut Atom)` if the atom exists, otherwise `None`.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn contains(&self, id: AtomId) -> bool {
        self.atoms.contains_key(id)
    }

    /// Returns the element of an atom, if it exists.
    pub fn element(&self, id: AtomId) -> Option<Element> {
        self.atoms.get(id).map(|atom| atom.element)
    }

    /// Returns the position of an atom, if it exists.
    pub fn position(&self, id: AtomId) -> Option<Point3<f64>> {
        self.atoms.get(id).map(|atom| atom.position)
    }

    /// Returns the atom ids in insertion order.
    pub fn atom_ids(&self) -> &[AtomId] {
        &self.order
    }

    /// Returns the position of an atom within the insertion order.
    pub fn index_of(&self, id: AtomId) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }

    /// Returns an iterator over all atoms in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.order
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    /// Appends an atom and returns its new ID.
    ///
    /// The atom starts without bonds.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let id = self.atoms.insert(atom);
        self.order.push(id);
        self.bond_adjacency.insert(id, Vec::new());
        id
    }

    /// Appends a copy of every atom of `other`, preserving order and internal bonds.
    ///
    /// # Arguments
    ///
    /// * `other` - The structure to copy atoms and bonds from.
    ///
    /// # Return
    ///
    /// A map from each atom ID of `other` to the ID of its copy in `self`.
    pub fn merge(&mut self, other: &Structure) -> HashMap<AtomId, AtomId> {
        self.merge_transformed(other, &Vector3::zeros(), &Rotation3::identity())
    }

    /// Like [`merge`](Self::merge), but every copied atom is first rotated
    /// about the origin and then shifted.
    pub fn merge_transformed(
        &mut self,
        other: &Structure,
        shift: &Vector3<f64>,
        rotation: &Rotation3<f64>,
    ) -> HashMap<AtomId, AtomId> {
        let id_map: HashMap<AtomId, AtomId> = other
            .atoms_iter()
            .map(|(old_id, atom)| (old_id, self.add_atom(atom.transformed(shift, rotation))))
            .collect();

        for (a, b) in other.bonds() {
            if let (Some(&new_a), Some(&new_b)) = (id_map.get(&a), id_map.get(&b)) {
                self.link(new_a, new_b);
            }
        }
        id_map
    }

    /// Removes an atom from the structure.
    ///
    /// All bonds touching the atom are removed with it and the IDs of the
    /// remaining atoms are unaffected.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the atom to remove.
    ///
    /// # Return
    ///
    /// Returns `Some(Atom)` if the atom existed and was removed, otherwise `None`.
    pub fn remove_atom(&mut self, id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(id)?;
        self.order.retain(|&candidate| candidate != id);

        let neighbors = self.bond_adjacency.remove(id).unwrap_or_default();
        for neighbor in neighbors {
            if let Some(adjacency) = self.bond_adjacency.get_mut(neighbor) {
                adjacency.retain(|&other| other != id);
            }
        }
        Some(atom)
    }

    /// Adds an undirected bond between two atoms.
    ///
    /// Linking an already bonded pair is a no-op.
    ///
    /// # Return
    ///
    /// Returns `false` if either atom does not exist or both IDs are the same atom.
    pub fn link(&mut self, a: AtomId, b: AtomId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        if self.has_bond(a, b) {
            return true;
        }
        self.bond_adjacency[a].push(b);
        self.bond_adjacency[b].push(a);
        true
    }

    /// Removes the bond between two atoms.
    ///
    /// # Return
    ///
    /// Returns `true` if a bond was removed.
    pub fn unlink(&mut self, a: AtomId, b: AtomId) -> bool {
        if !self.has_bond(a, b) {
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(adjacency) = self.bond_adjacency.get_mut(from) {
                adjacency.retain(|&other| other != to);
            }
        }
        true
    }

    pub fn has_bond(&self, a: AtomId, b: AtomId) -> bool {
        self.bond_adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// Retrieves the bonded neighbors of an atom.
    ///
    /// # Return
    ///
    /// The neighbors in bonding order, or an empty slice for an unknown atom.
    pub fn bonded_neighbors(&self, id: AtomId) -> &[AtomId] {
        self.bond_adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the total number of bonds.
    pub fn bond_count(&self) -> usize {
        self.bond_adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Lists every bond once, ordered by the insertion index of the first atom.
    pub fn bonds(&self) -> Vec<(AtomId, AtomId)> {
        let rank = self.insertion_ranks();
        let mut bonds = Vec::with_capacity(self.bond_count());
        for (index, &a) in self.order.iter().enumerate() {
            for &b in self.bonded_neighbors(a) {
                if rank.get(&b).is_some_and(|&rb| rb > index) {
                    bonds.push((a, b));
                }
            }
        }
        bonds
    }

    fn insertion_ranks(&self) -> HashMap<AtomId, usize> {
        self.order
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect()
    }

    /// Removes every bond while keeping all atoms.
    pub fn clear_bonds(&mut self) {
        for adjacency in self.bond_adjacency.values_mut() {
            adjacency.clear();
        }
    }

    /// Shifts every atom by the given vector.
    pub fn translate(&mut self, shift: &Vector3<f64>) {
        for atom in self.atoms.values_mut() {
            atom.position += *shift;
        }
    }

    /// Translates the structure so that `center` becomes the origin.
    pub fn center_at(&mut self, center: &Point3<f64>) {
        self.translate(&-center.coords);
    }

    /// Rotates every atom about the origin.
    pub fn rotate(&mut self, rotation: &Rotation3<f64>) {
        for atom in self.atoms.values_mut() {
            atom.position = rotation * atom.position;
        }
    }

    /// Rotates a subset of atoms about an arbitrary center.
    ///
    /// Unknown IDs are ignored.
    pub fn rotate_atoms_about(
        &mut self,
        ids: &[AtomId],
        center: &Point3<f64>,
        rotation: &Rotation3<f64>,
    ) {
        for &id in ids {
            if let Some(atom) = self.atoms.get_mut(id) {
                atom.position = center + rotation * (atom.position - center);
            }
        }
    }

    /// Returns the first atom of the given element in insertion order.
    pub fn find_first(&self, element: Element) -> Option<AtomId> {
        self.atoms_iter()
            .find(|(_, atom)| atom.element == element)
            .map(|(id, _)| id)
    }

    /// Returns the last atom of the given element in insertion order.
    pub fn find_last(&self, element: Element) -> Option<AtomId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&id| self.element(id) == Some(element))
    }

    /// Neighbors of `id` with the given element, in bonding order.
    pub fn neighbors_with_element(
        &self,
        id: AtomId,
        element: Element,
    ) -> impl Iterator<Item = AtomId> + '_ {
        self.bonded_neighbors(id)
            .iter()
            .copied()
            .filter(move |&neighbor| self.element(neighbor) == Some(element))
    }

    pub fn first_neighbor_with_element(&self, id: AtomId, element: Element) -> Option<AtomId> {
        self.neighbors_with_element(id, element).next()
    }

    /// Returns the neighbor with the given element if there is exactly one.
    pub fn only_neighbor_with_element(&self, id: AtomId, element: Element) -> Option<AtomId> {
        let mut matches = self.neighbors_with_element(id, element);
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    /// Checks that an atom's neighbors have exactly the given element composition.
    ///
    /// `composition` lists `(element, count)` pairs. The atom matches when, for
    /// every listed element, it has exactly that many neighbors of that element,
    /// and it has no neighbors of any element left unlisted.
    pub fn has_bond_composition(&self, id: AtomId, composition: &[(Element, usize)]) -> bool {
        if !self.contains(id) {
            return false;
        }
        let neighbors = self.bonded_neighbors(id);
        let listed: usize = composition.iter().map(|&(_, count)| count).sum();
        listed == neighbors.len()
            && composition.iter().all(|&(element, count)| {
                self.neighbors_with_element(id, element).count() == count
            })
    }

    /// Order-sensitive structural equality.
    ///
    /// Two structures are equal when they have the same number of atoms, the
    /// atoms at each insertion index share element and exact position, and the
    /// bonds connect the same pairs of insertion indices. Descriptions and atom
    /// metadata are ignored.
    pub fn is_equal(&self, other: &Structure) -> bool {
        if self.len() != other.len() || self.bond_count() != other.bond_count() {
            return false;
        }
        let same_atoms = self
            .atoms_iter()
            .zip(other.atoms_iter())
            .all(|((_, a), (_, b))| a.element == b.element && a.position == b.position);
        if !same_atoms {
            return false;
        }

        let my_index = self.insertion_ranks();
        let other_index = other.insertion_ranks();
        self.order.iter().zip(other.order.iter()).all(|(&a, &b)| {
            let mut mine: Vec<usize> = self
                .bonded_neighbors(a)
                .iter()
                .filter_map(|n| my_index.get(n).copied())
                .collect();
            let mut theirs: Vec<usize> = other
                .bonded_neighbors(b)
                .iter()
                .filter_map(|n| other_index.get(n).copied())
                .collect();
            mine.sort_unstable();
            theirs.sort_unstable();
            mine == theirs
        })
    }
}
