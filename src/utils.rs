use crate::error::ScoreError;
use pdbtbx::*;

/// Open an atomic data file with [`pdbtbx::open`] and remove non-protein
/// residues.
///
/// Non-fatal parse warnings are returned alongside the model so the caller
/// can log them by severity; a breaking parse failure is
/// [`ScoreError::Read`].
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), ScoreError> {
    let (mut pdb, warnings) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(ScoreError::Read)?;

    // Remove non-protein residues from the model
    pdb.remove_residues_by(|res| !is_amino_acid(res.name().unwrap_or("")));

    Ok((pdb, warnings))
}

/// Whether a three-letter residue name is one of the twenty standard amino
/// acids.
pub fn is_amino_acid(resn: &str) -> bool {
    matches!(
        resn.to_uppercase().as_str(),
        "ALA" | "ARG" | "ASN" | "ASP" | "CYS" | "GLN" | "GLU" | "GLY" | "HIS" | "ILE" | "LEU"
            | "LYS" | "MET" | "PHE" | "PRO" | "SER" | "THR" | "TRP" | "TYR" | "VAL"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_loads_with_both_chains() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/dimer.pdb");

        let (pdb, _) = load_model(&path).unwrap();
        assert_eq!(pdb.chain_count(), 2);
        let ids: Vec<&str> = pdb.chains().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_model("no-such-file.pdb");
        assert!(matches!(result, Err(ScoreError::Read(_))));
    }

    #[test]
    fn water_is_not_an_amino_acid() {
        assert!(is_amino_acid("SER"));
        assert!(is_amino_acid("gly"));
        assert!(!is_amino_acid("HOH"));
        assert!(!is_amino_acid(""));
    }
}
