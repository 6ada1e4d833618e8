//! Bravais lattice identification library
//!
//! This library classifies 3D unit cells into the 14 Bravais lattice families, builds their
//! canonical cells, evaluates the high-symmetry points of every variant and samples
//! band-structure paths through the Brillouin zone.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod lattice;
pub mod symmetries;

pub use errors::LatticeError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A convenience prelude for the most common entry points.
pub mod prelude {
    pub use crate::config::{ClassifierOptions, DEFAULT_EPS, DEFAULT_NPOINTS};
    pub use crate::errors::LatticeError;
    pub use crate::lattice::{
        BravaisLattice, BravaisType, Cell, Classification, Variant, get_bravais_lattice,
        identify_bravais_lattice,
    };
    pub use crate::symmetries::{BandPath, SpecialPoint};
}
