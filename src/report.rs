use crate::error::ScoreError;
use crate::pairs::{Entity, NeighborPair, ResidueEntity};
use polars::prelude::*;
use std::io::Write;

/// Write the residue-level contact table to `sink` as tab-separated values.
///
/// One row per residue pair, first-group fields then second-group fields,
/// preceded by a header line.
pub fn write_residues(
    pairs: &[(ResidueEntity, ResidueEntity)],
    sink: &mut dyn Write,
) -> Result<(), ScoreError> {
    let mut df = df!(
        "Chain A" => pairs.iter().map(|p| p.0.chain.clone()).collect::<Vec<String>>(),
        "Residue number A" => pairs.iter().map(|p| p.0.resi as i64).collect::<Vec<i64>>(),
        "Residue name A" => pairs.iter().map(|p| p.0.resn.clone()).collect::<Vec<String>>(),
        "Chain B" => pairs.iter().map(|p| p.1.chain.clone()).collect::<Vec<String>>(),
        "Residue number B" => pairs.iter().map(|p| p.1.resi as i64).collect::<Vec<i64>>(),
        "Residue name B" => pairs.iter().map(|p| p.1.resn.clone()).collect::<Vec<String>>(),
    )?;
    write_tsv(&mut df, sink)
}

/// Write the atom-level contact table to `sink` as tab-separated values.
///
/// One row per atom pair; members that are not atom-level entities are
/// skipped.
pub fn write_atoms(pairs: &[NeighborPair], sink: &mut dyn Write) -> Result<(), ScoreError> {
    let atom_pairs: Vec<_> = pairs
        .iter()
        .filter_map(|pair| match (&pair.first, &pair.second) {
            (Entity::Atom(a), Entity::Atom(b)) => Some((a, b)),
            _ => None,
        })
        .collect();

    let mut df = df!(
        "Chain A" => atom_pairs.iter().map(|(a, _)| a.residue.chain.clone()).collect::<Vec<String>>(),
        "Residue number A" => atom_pairs.iter().map(|(a, _)| a.residue.resi as i64).collect::<Vec<i64>>(),
        "Residue name A" => atom_pairs.iter().map(|(a, _)| a.residue.resn.clone()).collect::<Vec<String>>(),
        "Atom A" => atom_pairs.iter().map(|(a, _)| a.atomn.clone()).collect::<Vec<String>>(),
        "Chain B" => atom_pairs.iter().map(|(_, b)| b.residue.chain.clone()).collect::<Vec<String>>(),
        "Residue number B" => atom_pairs.iter().map(|(_, b)| b.residue.resi as i64).collect::<Vec<i64>>(),
        "Residue name B" => atom_pairs.iter().map(|(_, b)| b.residue.resn.clone()).collect::<Vec<String>>(),
        "Atom B" => atom_pairs.iter().map(|(_, b)| b.atomn.clone()).collect::<Vec<String>>(),
    )?;
    write_tsv(&mut df, sink)
}

fn write_tsv(df: &mut DataFrame, sink: &mut dyn Write) -> Result<(), ScoreError> {
    CsvWriter::new(sink)
        .with_separator(b'\t')
        .finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::AtomEntity;

    fn residue(chain: &str, resi: isize, resn: &str) -> ResidueEntity {
        ResidueEntity {
            chain: chain.to_string(),
            resi,
            insertion: String::new(),
            resn: resn.to_string(),
        }
    }

    fn atom_pair(
        a: (&str, isize, &str, &str, usize),
        b: (&str, isize, &str, &str, usize),
    ) -> NeighborPair {
        NeighborPair {
            first: Entity::Atom(AtomEntity {
                residue: residue(a.0, a.1, a.2),
                atomn: a.3.to_string(),
                atomi: a.4,
            }),
            second: Entity::Atom(AtomEntity {
                residue: residue(b.0, b.1, b.2),
                atomn: b.3.to_string(),
                atomi: b.4,
            }),
            distance: 0.0,
        }
    }

    #[test]
    fn residue_table_layout() {
        let pairs = vec![
            (residue("A", 1, "MET"), residue("B", 1, "MET")),
            (residue("A", 2, "HIS"), residue("B", 2, "TYR")),
        ];
        let mut buffer = Vec::new();
        write_residues(&pairs, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Chain A\tResidue number A\tResidue name A\tChain B\tResidue number B\tResidue name B"
        );
        assert_eq!(lines.next().unwrap(), "A\t1\tMET\tB\t1\tMET");
        assert_eq!(lines.next().unwrap(), "A\t2\tHIS\tB\t2\tTYR");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn atom_table_layout() {
        let pairs = vec![
            atom_pair(("A", 1, "MET", "SD", 4), ("B", 1, "MET", "CE", 9)),
            atom_pair(("A", 2, "HIS", "NE2", 12), ("B", 2, "TYR", "OH", 20)),
        ];
        let mut buffer = Vec::new();
        write_atoms(&pairs, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Chain A\tResidue number A\tResidue name A\tAtom A\t\
             Chain B\tResidue number B\tResidue name B\tAtom B"
        );
        assert_eq!(lines.next().unwrap(), "A\t1\tMET\tSD\tB\t1\tMET\tCE");
        assert_eq!(lines.next().unwrap(), "A\t2\tHIS\tNE2\tB\t2\tTYR\tOH");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_tables_still_get_a_header() {
        let mut buffer = Vec::new();
        write_residues(&[], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Chain A\t"));
        assert_eq!(text.lines().count(), 1);
    }
}
