// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Enumeration to track the space a cell lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Real,
    Reciprocal,
}

impl Space {
    /// The space reached by taking the reciprocal.
    pub fn dual(self) -> Space {
        match self {
            Space::Real => Space::Reciprocal,
            Space::Reciprocal => Space::Real,
        }
    }
}
