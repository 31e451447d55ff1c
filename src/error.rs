use crate::pairs::Level;
use thiserror::Error;

/// Errors that can abort a scoring invocation.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// A requested chain identifier does not exist in the first model.
    #[error("chain {0} not found in the first model of the structure")]
    ChainNotFound(String),

    /// An entity was resolved at a granularity it does not have.
    #[error("cannot resolve a {found:?}-level entity at the {requested:?} level")]
    InvalidLevel {
        /// The level the caller asked for.
        requested: Level,
        /// The actual granularity of the entity.
        found: Level,
    },

    /// The same chain identifier appears in both chain groups.
    #[error("chain groups must be disjoint, but both contain {0}")]
    OverlappingGroups(String),

    /// The structure contains no models at all.
    #[error("structure contains no models")]
    EmptyStructure,

    /// The structure file could not be parsed.
    #[error("failed to read structure: {}", join_errors(.0))]
    Read(Vec<pdbtbx::PDBError>),

    /// Building or writing a report table failed.
    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),

    /// Reading the input or writing a sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[pdbtbx::PDBError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
