//! Lattice module: cells, reduction, the Bravais family registry and classification.
//!
//! Quick reference
//! - Types: [`Cell`], [`BravaisLattice`], [`BravaisType`], [`Variant`], [`Classification`]
//! - Identification: [`get_bravais_lattice`], [`identify_bravais_lattice`], [`classify_with_options`]
//! - Construction: [`cubic_lattice`], [`face_centered_cubic_lattice`], [`body_centered_cubic_lattice`],
//!   [`tetragonal_lattice`], [`body_centered_tetragonal_lattice`], [`orthorhombic_lattice`], ...
//! - Reduction: [`niggli_reduce`]
//!
//! See submodules for full details: [`cell`], [`lattice_families`], [`lattice_classification`].

// ======================== MODULE DECLARATIONS ========================
pub mod bravais_lattice;
pub mod cell;
pub mod lattice_classification;
pub mod lattice_construction;
pub mod lattice_families;
pub mod lattice_reduction;
pub mod lattice_types;

mod _tests_bravais_lattice;

// ======================== RE-EXPORTED PUBLIC API (curated) ========================
#[doc(inline)]
pub use cell::{Cell, CellSpec};

#[doc(inline)]
pub use bravais_lattice::{BravaisLattice, LatticeSpec};

pub use lattice_types::{
    BravaisType, Centering, CrystalSystem, EqualityPattern, approx_equal, categorize_differences,
};

pub use lattice_families::{LatticeFamily, Variant, bravais_families};

pub use lattice_classification::{
    Classification, SkippedCandidate, classify_with_options, get_bravais_lattice,
    identify_bravais_lattice,
};

pub use lattice_construction::{
    base_centered_monoclinic_lattice, base_centered_orthorhombic_lattice,
    body_centered_cubic_lattice, body_centered_orthorhombic_lattice,
    body_centered_tetragonal_lattice, cubic_lattice, face_centered_cubic_lattice,
    face_centered_orthorhombic_lattice, hexagonal_lattice, monoclinic_lattice,
    orthorhombic_lattice, rhombohedral_lattice, tetragonal_lattice, triclinic_lattice,
};

pub use lattice_reduction::niggli_reduce;

/// A convenience prelude for importing common lattice items.
pub mod prelude {
    #[doc(no_inline)]
    pub use super::{BravaisLattice, BravaisType, Cell, get_bravais_lattice};
}
