#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Interscore Library
//!
//! This library scores physical contact between two groups of chains in a
//! PDB or mmCIF structure. Atoms that cannot mediate a side-chain contact
//! are filtered out, the remaining atoms go into a spatial index, and every
//! cross-group pair within the search radius contributes to the score —
//! either as a plain count or through a distance-derived weight.
//!
//! The residue-level and atom-level contact tables behind the score can be
//! written to any sink as tab-separated values.

mod error;
mod filter;
mod pairs;
mod report;
mod score;
mod search;
mod utils;

// Re-export key public types
pub use error::ScoreError;
pub use filter::{AtomFilter, Candidate, SideChainFilter, BACKBONE_ATOM_NAMES};
pub use pairs::{
    get_chain, lift_to_residues, AtomEntity, Entity, Level, NeighborPair, PairResolver,
    ResidueEntity,
};
pub use report::{write_atoms, write_residues};
pub use score::{interaction_score, linear_falloff, InteractionScorer, ScorePolicy, WeightFn};
pub use search::NeighborIndex;
pub use utils::{is_amino_acid, load_model};
