use crate::filter::Candidate;
use crate::pairs::{Entity, Level, NeighborPair, ResidueEntity};
use nalgebra as na;
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::collections::HashMap;
use tracing::debug;

type PoolPoint = GeomWithData<[f64; 3], usize>;

/// Spatial index over a pool of candidate atoms, answering radius queries at
/// residue or atom granularity.
///
/// Built once per scoring invocation; read-only afterwards, so it can be
/// queried from multiple threads.
pub struct NeighborIndex<'a> {
    pool: &'a [Candidate],
    tree: RTree<PoolPoint>,
}

impl<'a> NeighborIndex<'a> {
    /// Build the index over `pool`.
    pub fn new(pool: &'a [Candidate]) -> Self {
        let points: Vec<PoolPoint> = pool
            .iter()
            .enumerate()
            .map(|(idx, candidate)| GeomWithData::new(candidate.pos, idx))
            .collect();
        Self {
            pool,
            tree: RTree::bulk_load(points),
        }
    }

    /// All unordered pairs of pool atoms whose centers lie within `radius`
    /// of each other (inclusive), lifted to `level` and deduplicated.
    ///
    /// Self pairs never appear: an atom is not paired with itself, and at
    /// residue granularity two atoms of the same residue form no pair. The
    /// member order within each emitted pair is unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not positive.
    pub fn search_interactions(&self, radius: f64, level: Level) -> Vec<NeighborPair> {
        assert!(radius > 0.0, "search radius must be positive");
        let radius_squared = radius * radius;

        // Each atom queries the tree; j > i keeps every unordered atom pair once.
        let hits: Vec<(usize, usize, f64)> = (0..self.pool.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                self.tree
                    .locate_within_distance(self.pool[i].pos, radius_squared)
                    .map(|point| point.data)
                    .filter(move |&j| j > i)
                    .map(move |j| (i, j, self.distance(i, j)))
            })
            .collect();
        debug!("Found {} atom pairs within {} of each other", hits.len(), radius);

        match level {
            Level::Atom => hits
                .into_iter()
                .map(|(i, j, distance)| NeighborPair {
                    first: Entity::Atom(self.pool[i].entity.clone()),
                    second: Entity::Atom(self.pool[j].entity.clone()),
                    distance,
                })
                .collect(),
            Level::Residue => {
                let mut residue_pairs: HashMap<(ResidueEntity, ResidueEntity), f64> =
                    HashMap::new();
                for (i, j, distance) in hits {
                    let res_i = &self.pool[i].entity.residue;
                    let res_j = &self.pool[j].entity.residue;
                    if res_i == res_j {
                        continue;
                    }
                    // Normalize the unordered key so (a, b) and (b, a) collapse
                    let key = if res_i <= res_j {
                        (res_i.clone(), res_j.clone())
                    } else {
                        (res_j.clone(), res_i.clone())
                    };
                    residue_pairs
                        .entry(key)
                        .and_modify(|d| *d = d.min(distance))
                        .or_insert(distance);
                }
                residue_pairs
                    .into_iter()
                    .map(|((first, second), distance)| NeighborPair {
                        first: Entity::Residue(first),
                        second: Entity::Residue(second),
                        distance,
                    })
                    .collect()
            }
        }
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        na::distance(
            &na::Point3::from(self.pool[i].pos),
            &na::Point3::from(self.pool[j].pos),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::AtomEntity;

    fn candidate(
        chain: &str,
        resi: isize,
        resn: &str,
        atomn: &str,
        atomi: usize,
        pos: [f64; 3],
    ) -> Candidate {
        Candidate {
            entity: AtomEntity {
                residue: ResidueEntity {
                    chain: chain.to_string(),
                    resi,
                    insertion: String::new(),
                    resn: resn.to_string(),
                },
                atomn: atomn.to_string(),
                atomi,
            },
            pos,
        }
    }

    fn pool() -> Vec<Candidate> {
        vec![
            candidate("A", 1, "ALA", "CB", 1, [0.0, 0.0, 0.0]),
            candidate("A", 3, "SER", "CB", 2, [0.0, 3.0, 0.0]),
            candidate("A", 3, "SER", "OG", 3, [0.0, 4.0, 0.0]),
            candidate("B", 1, "ALA", "CB", 4, [3.0, 0.0, 0.0]),
            candidate("B", 2, "SER", "CB", 5, [0.0, 8.0, 0.0]),
        ]
    }

    #[test]
    fn atom_search_has_no_self_pairs_or_duplicates() {
        let pool = pool();
        let index = NeighborIndex::new(&pool);
        let pairs = index.search_interactions(6.0, Level::Atom);

        let mut seen = std::collections::HashSet::new();
        for pair in &pairs {
            let (Entity::Atom(a), Entity::Atom(b)) = (&pair.first, &pair.second) else {
                panic!("expected atom-level pairs");
            };
            assert_ne!(a.atomi, b.atomi);
            let key = (a.atomi.min(b.atomi), a.atomi.max(b.atomi));
            assert!(seen.insert(key), "unordered pair {key:?} emitted twice");
        }
        // Within 6.0: (1,2) d3, (1,3) d4, (1,4) d3, (2,3) d1, (2,4) d4.24,
        // (2,5) d5, (3,4) d5, (3,5) d4
        assert_eq!(pairs.len(), 8);
    }

    #[test]
    fn radius_is_inclusive() {
        let pool = pool();
        let index = NeighborIndex::new(&pool);
        // Atoms 1 and 4 are exactly 3.0 apart
        let pairs = index.search_interactions(3.0, Level::Atom);
        assert!(pairs.iter().any(|p| {
            let (Entity::Atom(a), Entity::Atom(b)) = (&p.first, &p.second) else {
                return false;
            };
            (a.atomi.min(b.atomi), a.atomi.max(b.atomi)) == (1, 4)
        }));
    }

    #[test]
    fn residue_search_collapses_atom_pairs() {
        let pool = pool();
        let index = NeighborIndex::new(&pool);
        let pairs = index.search_interactions(6.0, Level::Residue);

        // Atoms 2 and 3 share residue A:3, so their pair vanishes; both of
        // their contacts with B:1 collapse into one residue pair.
        let mut keys: Vec<(String, isize, String, isize)> = pairs
            .iter()
            .map(|p| {
                let (Entity::Residue(a), Entity::Residue(b)) = (&p.first, &p.second) else {
                    panic!("expected residue-level pairs");
                };
                (a.chain.clone(), a.resi, b.chain.clone(), b.resi)
            })
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), 1, "A".to_string(), 3),
                ("A".to_string(), 1, "B".to_string(), 1),
                ("A".to_string(), 3, "B".to_string(), 1),
                ("A".to_string(), 3, "B".to_string(), 2),
            ]
        );
    }

    #[test]
    fn residue_pairs_carry_the_minimum_distance() {
        let pool = pool();
        let index = NeighborIndex::new(&pool);
        let pairs = index.search_interactions(6.0, Level::Residue);

        let a3_b1 = pairs
            .iter()
            .find(|p| {
                let (Entity::Residue(a), Entity::Residue(b)) = (&p.first, &p.second) else {
                    return false;
                };
                (a.chain.as_str(), a.resi, b.chain.as_str(), b.resi) == ("A", 3, "B", 1)
            })
            .unwrap();
        // A:3 CB is 4.243 from B:1 CB; A:3 OG is 5.0 away
        assert!((a3_b1.distance - 18.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "search radius must be positive")]
    fn zero_radius_is_rejected() {
        let pool = pool();
        NeighborIndex::new(&pool).search_interactions(0.0, Level::Atom);
    }
}
