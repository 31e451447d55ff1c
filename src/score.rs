use crate::error::ScoreError;
use crate::filter::{AtomFilter, Candidate, SideChainFilter};
use crate::pairs::{lift_to_residues, Level, NeighborPair, PairResolver};
use crate::report::{write_atoms, write_residues};
use crate::search::NeighborIndex;
use pdbtbx::*;
use std::collections::HashSet;
use std::io::Write;
use tracing::debug;

/// A monotonically decreasing weight for one atom pair, given its distance
/// and the search radius.
pub type WeightFn = fn(distance: f64, radius: f64) -> f64;

/// Default weight: linear falloff from 1 at zero distance to 0 at the radius.
pub fn linear_falloff(distance: f64, radius: f64) -> f64 {
    (1.0 - distance / radius).max(0.0)
}

/// How resolved atom pairs aggregate into the scalar score.
#[derive(Debug, Clone, Copy)]
pub enum ScorePolicy {
    /// The score is the number of atom pairs.
    Count,
    /// The score is the sum of a per-pair distance weight.
    Weighted(WeightFn),
}

/// Orchestrates filtering, neighbor search and pair resolution across two
/// chain groups, and aggregates the result into a score.
///
/// The atom filter is a constructor-supplied strategy so tests can swap it
/// without touching shared state.
pub struct InteractionScorer<F: AtomFilter = SideChainFilter> {
    radius: f64,
    policy: ScorePolicy,
    filter: F,
}

impl InteractionScorer {
    /// Scorer with the default side-chain filter.
    pub fn new(radius: f64, policy: ScorePolicy) -> Self {
        Self::with_filter(radius, policy, SideChainFilter)
    }
}

impl<F: AtomFilter> InteractionScorer<F> {
    /// Scorer with a custom atom filter.
    pub fn with_filter(radius: f64, policy: ScorePolicy, filter: F) -> Self {
        Self {
            radius,
            policy,
            filter,
        }
    }

    /// The resolved atom-level contact set between the two chain groups,
    /// oriented first-group-first and sorted.
    pub fn contacts(
        &self,
        pdb: &PDB,
        first_chains: &[String],
        second_chains: &[String],
    ) -> Result<Vec<NeighborPair>, ScoreError> {
        if let Some(shared) = first_chains.iter().find(|c| second_chains.contains(*c)) {
            return Err(ScoreError::OverlappingGroups(shared.clone()));
        }

        // Only the first model is scored
        let model = pdb.models().next().ok_or(ScoreError::EmptyStructure)?;

        let mut pool: Vec<Candidate> = Vec::new();
        let mut pooled: HashSet<&str> = HashSet::new();
        for chain_id in first_chains.iter().chain(second_chains.iter()) {
            let chain = model
                .chains()
                .find(|c| c.id() == chain_id.as_str())
                .ok_or_else(|| ScoreError::ChainNotFound(chain_id.clone()))?;
            if pooled.insert(chain_id) {
                pool.extend(self.filter.potential_interactor_atoms(chain));
            }
        }
        debug!(
            "Pooled {} candidate atoms from {} chains",
            pool.len(),
            pooled.len()
        );

        let index = NeighborIndex::new(&pool);
        let raw_pairs = index.search_interactions(self.radius, Level::Atom);
        let resolved = PairResolver::new(first_chains, second_chains)
            .resolve(raw_pairs, Level::Atom)?;
        debug!("Resolved {} cross-group atom pairs", resolved.len());
        Ok(resolved)
    }

    /// Aggregate a resolved contact set into the scalar score.
    pub fn score_pairs(&self, pairs: &[NeighborPair]) -> f64 {
        match self.policy {
            ScorePolicy::Count => pairs.len() as f64,
            ScorePolicy::Weighted(weight) => pairs
                .iter()
                .map(|pair| weight(pair.distance, self.radius))
                .sum(),
        }
    }

    /// Convenience: contacts followed by aggregation.
    pub fn score(
        &self,
        pdb: &PDB,
        first_chains: &[String],
        second_chains: &[String],
    ) -> Result<f64, ScoreError> {
        let pairs = self.contacts(pdb, first_chains, second_chains)?;
        Ok(self.score_pairs(&pairs))
    }
}

/// Score the interaction between two chain groups of `pdb`.
///
/// The score is the number of cross-group atom pairs within `radius`
/// (inclusive) of each other, or, with `weight`, the sum of
/// [`linear_falloff`] over those pairs. If a sink is supplied the residue
/// and/or atom contact tables are written to it as tab-separated values with
/// a header line; each pair appears exactly once.
///
/// # Errors
///
/// [`ScoreError::ChainNotFound`] if a requested chain is absent from the
/// first model, [`ScoreError::OverlappingGroups`] if the groups share a
/// chain, and I/O or table errors from the sinks.
pub fn interaction_score(
    pdb: &PDB,
    radius: f64,
    weight: bool,
    first_chains: &[String],
    second_chains: &[String],
    residues: Option<&mut dyn Write>,
    atoms: Option<&mut dyn Write>,
) -> Result<f64, ScoreError> {
    let policy = match weight {
        true => ScorePolicy::Weighted(linear_falloff),
        false => ScorePolicy::Count,
    };
    let scorer = InteractionScorer::new(radius, policy);
    let pairs = scorer.contacts(pdb, first_chains, second_chains)?;

    if let Some(sink) = residues {
        write_residues(&lift_to_residues(&pairs), sink)?;
    }
    if let Some(sink) = atoms {
        write_atoms(&pairs, sink)?;
    }

    Ok(scorer.score_pairs(&pairs))
}
