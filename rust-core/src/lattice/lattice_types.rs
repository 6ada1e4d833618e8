use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LatticeError;

/// Centerings that make sense in 3D setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Centering {
    Primitive,
    BodyCentered,
    FaceCentered,
    BaseCentered,
    Rhombohedral,
}

/// The seven 3D crystal systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CrystalSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

/// The 14 Bravais lattice families, named by their conventional codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum BravaisType {
    Cub,
    Fcc,
    Bcc,
    Tet,
    Bct,
    Orc,
    Orcf,
    Orci,
    Orcc,
    Hex,
    Rhl,
    Mcl,
    Mclc,
    Tri,
}

impl BravaisType {
    pub const ALL: [BravaisType; 14] = [
        BravaisType::Cub,
        BravaisType::Fcc,
        BravaisType::Bcc,
        BravaisType::Tet,
        BravaisType::Bct,
        BravaisType::Orc,
        BravaisType::Orcf,
        BravaisType::Orci,
        BravaisType::Orcc,
        BravaisType::Hex,
        BravaisType::Rhl,
        BravaisType::Mcl,
        BravaisType::Mclc,
        BravaisType::Tri,
    ];

    /// Conventional code, e.g. "ORCF".
    pub fn code(self) -> &'static str {
        match self {
            BravaisType::Cub => "CUB",
            BravaisType::Fcc => "FCC",
            BravaisType::Bcc => "BCC",
            BravaisType::Tet => "TET",
            BravaisType::Bct => "BCT",
            BravaisType::Orc => "ORC",
            BravaisType::Orcf => "ORCF",
            BravaisType::Orci => "ORCI",
            BravaisType::Orcc => "ORCC",
            BravaisType::Hex => "HEX",
            BravaisType::Rhl => "RHL",
            BravaisType::Mcl => "MCL",
            BravaisType::Mclc => "MCLC",
            BravaisType::Tri => "TRI",
        }
    }

    pub fn crystal_system(self) -> CrystalSystem {
        match self {
            BravaisType::Cub | BravaisType::Fcc | BravaisType::Bcc => CrystalSystem::Cubic,
            BravaisType::Tet | BravaisType::Bct => CrystalSystem::Tetragonal,
            BravaisType::Orc | BravaisType::Orcf | BravaisType::Orci | BravaisType::Orcc => {
                CrystalSystem::Orthorhombic
            }
            BravaisType::Hex => CrystalSystem::Hexagonal,
            BravaisType::Rhl => CrystalSystem::Trigonal,
            BravaisType::Mcl | BravaisType::Mclc => CrystalSystem::Monoclinic,
            BravaisType::Tri => CrystalSystem::Triclinic,
        }
    }

    pub fn centering(self) -> Centering {
        match self {
            BravaisType::Fcc | BravaisType::Orcf => Centering::FaceCentered,
            BravaisType::Bcc | BravaisType::Bct | BravaisType::Orci => Centering::BodyCentered,
            BravaisType::Orcc | BravaisType::Mclc => Centering::BaseCentered,
            BravaisType::Rhl => Centering::Rhombohedral,
            _ => Centering::Primitive,
        }
    }
}

impl fmt::Display for BravaisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BravaisType {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        BravaisType::ALL
            .into_iter()
            .find(|kind| kind.code() == upper)
            .ok_or_else(|| LatticeError::UnknownLatticeType(s.to_string()))
    }
}

/// How three values relate to each other under a tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EqualityPattern {
    AllEqual,
    AllDifferent,
    /// Two values agree and the value at this index stands out.
    Distinguished(usize),
    /// Tolerance chain: two pairs agree but the third pair does not. Cannot happen for exact input.
    Ambiguous,
}

/// Check if two values are approximately equal within tolerance (inclusive)
pub fn approx_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Categorize the pairwise equalities of three numbers.
pub fn categorize_differences(values: [f64; 3], eps: f64) -> EqualityPattern {
    let [a, b, c] = values;
    let equal = [
        approx_equal(b, c, eps),
        approx_equal(c, a, eps),
        approx_equal(a, b, eps),
    ];
    match equal.iter().filter(|&&e| e).count() {
        3 => EqualityPattern::AllEqual,
        0 => EqualityPattern::AllDifferent,
        1 => equal
            .iter()
            .position(|&e| e)
            .map_or(EqualityPattern::Ambiguous, EqualityPattern::Distinguished),
        _ => EqualityPattern::Ambiguous,
    }
}
