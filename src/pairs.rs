use crate::error::ScoreError;
use std::collections::HashSet;

/// Granularity at which neighbor pairs are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Pairs of residues.
    Residue,
    /// Pairs of atoms.
    Atom,
}

/// A residue together with its owning chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueEntity {
    /// Chain identifier.
    pub chain: String,
    /// Residue serial number.
    pub resi: isize,
    /// Residue insertion code, empty if absent.
    pub insertion: String,
    /// Residue name, e.g. "SER".
    pub resn: String,
}

/// An atom together with its owning residue and chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomEntity {
    /// The residue this atom belongs to.
    pub residue: ResidueEntity,
    /// Atom name, e.g. "CB".
    pub atomn: String,
    /// Atom serial number.
    pub atomi: usize,
}

/// One member of a neighbor pair, at either granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    /// A residue-level member.
    Residue(ResidueEntity),
    /// An atom-level member.
    Atom(AtomEntity),
}

impl Entity {
    /// The granularity of this entity.
    pub fn level(&self) -> Level {
        match self {
            Entity::Residue(_) => Level::Residue,
            Entity::Atom(_) => Level::Atom,
        }
    }
}

/// Two entities found within the search radius of each other.
///
/// Raw pairs from [`crate::NeighborIndex`] may have their members in either
/// order; pairs returned by [`PairResolver::resolve`] always have the
/// first-group member first. At residue granularity `distance` is the
/// smallest distance over the backing atom pairs.
#[derive(Debug, Clone)]
pub struct NeighborPair {
    /// First member; resolved pairs have the first-group member here.
    pub first: Entity,
    /// Second member; resolved pairs have the second-group member here.
    pub second: Entity,
    /// Inter-atomic distance backing the pair, in the coordinate unit.
    pub distance: f64,
}

/// Resolve the owning chain of an entity by walking up the hierarchy the
/// number of levels implied by `level`.
///
/// Asking for a level the entity does not have fails with
/// [`ScoreError::InvalidLevel`] rather than silently defaulting.
pub fn get_chain(entity: &Entity, level: Level) -> Result<&str, ScoreError> {
    match (entity, level) {
        (Entity::Residue(res), Level::Residue) => Ok(&res.chain),
        (Entity::Atom(atom), Level::Atom) => Ok(&atom.residue.chain),
        _ => Err(ScoreError::InvalidLevel {
            requested: level,
            found: entity.level(),
        }),
    }
}

/// Filters raw neighbor pairs down to those crossing between two disjoint
/// chain groups and fixes their member order.
pub struct PairResolver<'a> {
    first: &'a [String],
    second: &'a [String],
}

impl<'a> PairResolver<'a> {
    /// Create a resolver for the given chain groups.
    pub fn new(first: &'a [String], second: &'a [String]) -> Self {
        Self { first, second }
    }

    /// Keep only pairs with exactly one member in each group, orient them
    /// first-group-first, and drop duplicates.
    ///
    /// Pairs entirely inside one group, outside both, or straddling neither
    /// group correctly are discarded. The result is sorted so identical
    /// inputs yield identical output order.
    pub fn resolve(
        &self,
        pairs: Vec<NeighborPair>,
        level: Level,
    ) -> Result<Vec<NeighborPair>, ScoreError> {
        let mut seen: HashSet<(Entity, Entity)> = HashSet::new();
        let mut resolved = Vec::new();

        for mut pair in pairs {
            let chain_a = get_chain(&pair.first, level)?.to_string();
            let chain_b = get_chain(&pair.second, level)?.to_string();

            let crossing = if self.first.contains(&chain_a) && self.second.contains(&chain_b) {
                true
            } else if self.first.contains(&chain_b) && self.second.contains(&chain_a) {
                std::mem::swap(&mut pair.first, &mut pair.second);
                true
            } else {
                false
            };

            if crossing && seen.insert((pair.first.clone(), pair.second.clone())) {
                resolved.push(pair);
            }
        }

        resolved.sort_by(|a, b| (&a.first, &a.second).cmp(&(&b.first, &b.second)));
        Ok(resolved)
    }
}

/// Lift resolved atom pairs to their owning residues, deduplicated.
///
/// A residue pair appears once even when several atom pairs back it; the
/// orientation of the atom pairs carries over, so the first-group residue is
/// always first.
pub fn lift_to_residues(pairs: &[NeighborPair]) -> Vec<(ResidueEntity, ResidueEntity)> {
    let mut seen: HashSet<(ResidueEntity, ResidueEntity)> = HashSet::new();
    let mut residue_pairs = Vec::new();

    for pair in pairs {
        if let (Entity::Atom(a), Entity::Atom(b)) = (&pair.first, &pair.second) {
            let key = (a.residue.clone(), b.residue.clone());
            if seen.insert(key.clone()) {
                residue_pairs.push(key);
            }
        }
    }

    residue_pairs.sort();
    residue_pairs
}
