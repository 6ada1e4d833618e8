use crate::Result;
use crate::lattice::bravais_lattice::BravaisLattice;
use crate::lattice::lattice_types::BravaisType;

/// Standard lattice construction utilities, one per Bravais family.
/// Lengths are in arbitrary units, angles in degrees.

/// Create a simple cubic lattice (CUB)
pub fn cubic_lattice(a: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Cub, &[("a", a)])
}

/// Create a face-centred cubic lattice (FCC) with conventional edge `a`
pub fn face_centered_cubic_lattice(a: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Fcc, &[("a", a)])
}

/// Create a body-centred cubic lattice (BCC) with conventional edge `a`
pub fn body_centered_cubic_lattice(a: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Bcc, &[("a", a)])
}

pub fn tetragonal_lattice(a: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Tet, &[("a", a), ("c", c)])
}

/// BCT1 for c < a, BCT2 otherwise
pub fn body_centered_tetragonal_lattice(a: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Bct, &[("a", a), ("c", c)])
}

/// Create an orthorhombic lattice; requires a < b < c
pub fn orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Orc, &[("a", a), ("b", b), ("c", c)])
}

pub fn face_centered_orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Orcf, &[("a", a), ("b", b), ("c", c)])
}

pub fn body_centered_orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Orci, &[("a", a), ("b", b), ("c", c)])
}

/// Create a C-centred orthorhombic lattice; requires a < b
pub fn base_centered_orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Orcc, &[("a", a), ("b", b), ("c", c)])
}

/// Create a hexagonal lattice with in-plane constant `a` and height `c`
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Hex, &[("a", a), ("c", c)])
}

/// Create a rhombohedral lattice; requires alpha < 120
pub fn rhombohedral_lattice(a: f64, alpha: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(BravaisType::Rhl, &[("a", a), ("alpha", alpha)])
}

/// Create a primitive monoclinic lattice; requires a, b <= c and alpha < 90
pub fn monoclinic_lattice(a: f64, b: f64, c: f64, alpha: f64) -> Result<BravaisLattice> {
    BravaisLattice::new(
        BravaisType::Mcl,
        &[("a", a), ("b", b), ("c", c), ("alpha", alpha)],
    )
}

pub fn base_centered_monoclinic_lattice(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
) -> Result<BravaisLattice> {
    BravaisLattice::new(
        BravaisType::Mclc,
        &[("a", a), ("b", b), ("c", c), ("alpha", alpha)],
    )
}

pub fn triclinic_lattice(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<BravaisLattice> {
    BravaisLattice::new(
        BravaisType::Tri,
        &[
            ("a", a),
            ("b", b),
            ("c", c),
            ("alpha", alpha),
            ("beta", beta),
            ("gamma", gamma),
        ],
    )
}
