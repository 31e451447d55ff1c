use crate::pairs::{AtomEntity, ResidueEntity};
use pdbtbx::*;

/// Backbone atom names present in (almost) every residue. These cannot
/// mediate a side-chain-level contact and are excluded from the pool.
pub const BACKBONE_ATOM_NAMES: [&str; 5] = ["N", "CA", "C", "O", "OXT"];

/// A filtered atom retained in the candidate pool, with an owned view of its
/// identity and its coordinate.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Identity of the atom and its owning residue and chain.
    pub entity: AtomEntity,
    /// Atom center.
    pub pos: [f64; 3],
}

/// Selects, per chain, the atoms eligible to register a contact.
pub trait AtomFilter {
    /// The potential interactor atoms of `chain`, residues in chain order,
    /// atoms in declaration order. Residues left without atoms contribute
    /// nothing.
    fn potential_interactor_atoms(&self, chain: &Chain) -> Vec<Candidate>;
}

/// Keeps every named atom except the invariant backbone
/// ([`BACKBONE_ATOM_NAMES`]), so glycine contributes no atoms at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideChainFilter;

impl AtomFilter for SideChainFilter {
    fn potential_interactor_atoms(&self, chain: &Chain) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for residue in chain.residues() {
            let (resi, insertion) = residue.id();
            let residue_entity = ResidueEntity {
                chain: chain.id().to_string(),
                resi,
                insertion: insertion.unwrap_or("").to_string(),
                resn: residue.name().unwrap_or("").to_string(),
            };
            for atom in residue.atoms() {
                if BACKBONE_ATOM_NAMES.contains(&atom.name()) {
                    continue;
                }
                let (x, y, z) = atom.pos();
                candidates.push(Candidate {
                    entity: AtomEntity {
                        residue: residue_entity.clone(),
                        atomn: atom.name().to_string(),
                        atomi: atom.serial_number(),
                    },
                    pos: [x, y, z],
                });
            }
        }
        candidates
    }
}
