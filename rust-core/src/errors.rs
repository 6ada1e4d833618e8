use thiserror::Error;

/// Errors raised while building, classifying or sampling lattices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("degenerate cell: determinant {determinant:e} is too small, vectors are zero or linearly dependent")]
    DegenerateCell { determinant: f64 },

    /// A family's ordering convention is violated (for example a < b < c for orthorhombic).
    /// Callers may retry with another family or permutation.
    #[error("unconventional lattice: {0}")]
    UnconventionalLattice(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{family} expects parameters ({expected}), got ({got})")]
    ParameterMismatch {
        family: String,
        expected: String,
        got: String,
    },

    #[error("unknown lattice type '{0}'")]
    UnknownLatticeType(String),

    #[error("cannot classify cell: {0}")]
    ClassificationFailure(String),

    #[error("invalid path string: {0:?}")]
    InvalidPathSpec(String),

    #[error("unknown special point '{0}'")]
    UnknownSpecialPoint(String),

    #[error("Niggli reduction did not converge within {0} iterations")]
    ReductionDidNotConverge(usize),
}

impl LatticeError {
    /// True for errors a classifier may recover from by trying another candidate.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LatticeError::UnconventionalLattice(_) | LatticeError::InvalidParameter(_)
        )
    }
}
