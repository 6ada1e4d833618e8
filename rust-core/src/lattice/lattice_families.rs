//! Static registry of the 14 Bravais lattice families.
//!
//! Every family is described by its parameter names, its variants and three plain functions:
//! the canonical cell, the variant rule and the special-point formula.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::Result;
use crate::errors::LatticeError;
use crate::lattice::cell::cellpar_of;
use crate::lattice::lattice_types::BravaisType;
use crate::symmetries::high_symmetry_points as points;

/// Canonical cell (columns) from the family parameters.
pub type CellFn = fn(&[f64]) -> Matrix3<f64>;
/// Variant name from the family parameters and the tolerance.
pub type VariantFn = fn(&[f64], f64) -> Result<&'static str>;
/// Special points, ordered like the variant's labels.
pub type SpecialPointsFn = fn(&[f64], &Variant) -> Vec<Vector3<f64>>;

/// A symmetry-distinct sub-case of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: &'static str,
    /// Concatenated labels, e.g. "GMNPXZZ1".
    pub special_point_names: &'static str,
    /// Default band path, e.g. "GXMGZPNZ1M,XP".
    pub special_path: &'static str,
}

impl Variant {
    const fn new(
        name: &'static str,
        special_point_names: &'static str,
        special_path: &'static str,
    ) -> Self {
        Self {
            name,
            special_point_names,
            special_path,
        }
    }

    /// Individual labels ("G", "Z1", ...) in declaration order.
    pub fn kpoint_labels(&self) -> Vec<&'static str> {
        split_labels(self.special_point_names)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Variant name: {}", self.name)?;
        writeln!(f, "  Special point names: {}", self.special_point_names)?;
        writeln!(f, "  Default path: {}", self.special_path)
    }
}

/// One entry of the registry.
#[derive(Debug)]
pub struct LatticeFamily {
    pub kind: BravaisType,
    pub long_name: &'static str,
    pub parameters: &'static [&'static str],
    pub variants: &'static [Variant],
    pub cell: CellFn,
    pub variant_name: VariantFn,
    pub special_points: SpecialPointsFn,
}

impl LatticeFamily {
    pub fn variant(&self, name: &str) -> Option<&'static Variant> {
        self.variants.iter().find(|variant| variant.name == name)
    }

    pub fn variant_names(&self) -> Vec<&'static str> {
        self.variants.iter().map(|variant| variant.name).collect()
    }

    /// Human readable description of the family and all of its variants.
    pub fn type_description(&self) -> String {
        let mut description = format!(
            "Lattice name: {}\n  Long name: {}\n  Parameters: {}\n",
            self.kind.code(),
            self.long_name,
            self.parameters.join(", ")
        );
        for variant in self.variants {
            for line in variant.to_string().lines() {
                description.push_str("  ");
                description.push_str(line);
                description.push('\n');
            }
            description.push('\n');
        }
        description
    }
}

impl BravaisType {
    /// Registry entry of this family.
    pub fn family(self) -> &'static LatticeFamily {
        &BRAVAIS_FAMILIES[self as usize]
    }

    pub fn long_name(self) -> &'static str {
        self.family().long_name
    }

    pub fn parameter_names(self) -> &'static [&'static str] {
        self.family().parameters
    }

    pub fn variants(self) -> &'static [Variant] {
        self.family().variants
    }

    pub fn type_description(self) -> String {
        self.family().type_description()
    }
}

/// The registry, indexed like [`BravaisType::ALL`].
pub fn bravais_families() -> &'static [LatticeFamily] {
    &BRAVAIS_FAMILIES
}

/// True for the length parameters a, b, c (as opposed to angles in degrees).
pub fn is_length_parameter(name: &str) -> bool {
    matches!(name, "a" | "b" | "c")
}

// ======================== VARIANT TABLES ========================

const CUB_VARIANTS: &[Variant] = &[Variant::new("CUB", "GXRM", "GXMGRX,MR")];
const FCC_VARIANTS: &[Variant] = &[Variant::new("FCC", "GKLUWX", "GXWKGLUWLK,UX")];
const BCC_VARIANTS: &[Variant] = &[Variant::new("BCC", "GHPN", "GHNGPH,PN")];
const TET_VARIANTS: &[Variant] = &[Variant::new("TET", "GAMRXZ", "GXMGZRAZ,XR,MA")];
const BCT_VARIANTS: &[Variant] = &[
    Variant::new("BCT1", "GMNPXZZ1", "GXMGZPNZ1M,XP"),
    Variant::new("BCT2", "GNPSS1XYY1Z", "GXYSGZS1NPY1Z,XP"),
];
const ORC_VARIANTS: &[Variant] = &[Variant::new("ORC", "GRSTUXYZ", "GXSYGZURTZ,YT,UX,SR")];
const ORCF_VARIANTS: &[Variant] = &[
    Variant::new("ORCF1", "GAA1LTXX1YZ", "GYTZGXA1Y,TX1,XAZ,LG"),
    Variant::new("ORCF2", "GCC1DD1LHH1XYZ", "GYCDXGZD1HC,C1Z,XH1,HY,LG"),
    Variant::new("ORCF3", "GAA1LTXX1YZ", "GYTZGXA1Y,XAZ,LG"),
];
const ORCI_VARIANTS: &[Variant] = &[Variant::new(
    "ORCI",
    "GLL1L2RSTWXX1YY1Z",
    "GXLTWRX1ZGYSW,L1Y,Y1Z",
)];
const ORCC_VARIANTS: &[Variant] = &[Variant::new("ORCC", "GAA1RSTXX1YZ", "GXSRAZGYX1A1TY,ZT")];
const HEX_VARIANTS: &[Variant] = &[Variant::new("HEX", "GMKALH", "GMKGALHA,LM,KH")];
const RHL_VARIANTS: &[Variant] = &[
    Variant::new("RHL1", "GBB1FLL1PP1P2QXZ", "GLB1,BZGX,QFP1Z,LP"),
    Variant::new("RHL2", "GFLPP1QQ1Z", "GPZQGFP1Q1LZ"),
];
const MCL_VARIANTS: &[Variant] = &[Variant::new(
    "MCL",
    "GACDD1EHH1H2MM1M2XYY1Z",
    "GYHCEM1AXH1,MDZ,YD",
)];
const MCLC_VARIANTS: &[Variant] = &[
    Variant::new("MCLC1", "GNN1FF1F2F3II1LMXX1X2YY1Z", "GYFLI,I1ZF1,YX1,XGN,MG"),
    Variant::new("MCLC2", "GNN1FF1F2F3II1LMXX1X2YY1Z", "GYFLI,I1ZF1,NGM"),
    Variant::new("MCLC3", "GFF1F2HH1H2IMNN1XYY1Y2Y3Z", "GYFHZIF1,H1Y1XGN,MG"),
    Variant::new("MCLC4", "GFF1F2HH1H2IMNN1XYY1Y2Y3Z", "GYFHZI,H1Y1XGN,MG"),
    Variant::new("MCLC5", "GFF1F2HH1H2II1LMNN1XYY1Y2Y3Z", "GYFLI,I1ZHF1,H1Y1XGN,MG"),
];
// Labels and paths are shared by all triclinic variants
const TRI_VARIANTS: &[Variant] = &[
    Variant::new("TRI1a", "GLMNRXYZ", "XGY,LGZ,NGM,RG"),
    Variant::new("TRI2a", "GLMNRXYZ", "XGY,LGZ,NGM,RG"),
    Variant::new("TRI1b", "GLMNRXYZ", "XGY,LGZ,NGM,RG"),
    Variant::new("TRI2b", "GLMNRXYZ", "XGY,LGZ,NGM,RG"),
];

// ======================== REGISTRY ========================

static BRAVAIS_FAMILIES: [LatticeFamily; 14] = [
    LatticeFamily {
        kind: BravaisType::Cub,
        long_name: "cubic",
        parameters: &["a"],
        variants: CUB_VARIANTS,
        cell: cub_cell,
        variant_name: cub_variant,
        special_points: points::cub_points,
    },
    LatticeFamily {
        kind: BravaisType::Fcc,
        long_name: "face-centered cubic",
        parameters: &["a"],
        variants: FCC_VARIANTS,
        cell: fcc_cell,
        variant_name: fcc_variant,
        special_points: points::fcc_points,
    },
    LatticeFamily {
        kind: BravaisType::Bcc,
        long_name: "body-centered cubic",
        parameters: &["a"],
        variants: BCC_VARIANTS,
        cell: bcc_cell,
        variant_name: bcc_variant,
        special_points: points::bcc_points,
    },
    LatticeFamily {
        kind: BravaisType::Tet,
        long_name: "tetragonal",
        parameters: &["a", "c"],
        variants: TET_VARIANTS,
        cell: tet_cell,
        variant_name: tet_variant,
        special_points: points::tet_points,
    },
    LatticeFamily {
        kind: BravaisType::Bct,
        long_name: "body-centered tetragonal",
        parameters: &["a", "c"],
        variants: BCT_VARIANTS,
        cell: bct_cell,
        variant_name: bct_variant,
        special_points: points::bct_points,
    },
    LatticeFamily {
        kind: BravaisType::Orc,
        long_name: "orthorhombic",
        parameters: &["a", "b", "c"],
        variants: ORC_VARIANTS,
        cell: orc_cell,
        variant_name: orc_variant,
        special_points: points::orc_points,
    },
    LatticeFamily {
        kind: BravaisType::Orcf,
        long_name: "face-centered orthorhombic",
        parameters: &["a", "b", "c"],
        variants: ORCF_VARIANTS,
        cell: orcf_cell,
        variant_name: orcf_variant,
        special_points: points::orcf_points,
    },
    LatticeFamily {
        kind: BravaisType::Orci,
        long_name: "body-centered orthorhombic",
        parameters: &["a", "b", "c"],
        variants: ORCI_VARIANTS,
        cell: orci_cell,
        variant_name: orci_variant,
        special_points: points::orci_points,
    },
    LatticeFamily {
        kind: BravaisType::Orcc,
        long_name: "c-centered orthorhombic",
        parameters: &["a", "b", "c"],
        variants: ORCC_VARIANTS,
        cell: orcc_cell,
        variant_name: orcc_variant,
        special_points: points::orcc_points,
    },
    LatticeFamily {
        kind: BravaisType::Hex,
        long_name: "hexagonal",
        parameters: &["a", "c"],
        variants: HEX_VARIANTS,
        cell: hex_cell,
        variant_name: hex_variant,
        special_points: points::hex_points,
    },
    LatticeFamily {
        kind: BravaisType::Rhl,
        long_name: "rhombohedral",
        parameters: &["a", "alpha"],
        variants: RHL_VARIANTS,
        cell: rhl_cell,
        variant_name: rhl_variant,
        special_points: points::rhl_points,
    },
    LatticeFamily {
        kind: BravaisType::Mcl,
        long_name: "monoclinic",
        parameters: &["a", "b", "c", "alpha"],
        variants: MCL_VARIANTS,
        cell: mcl_cell,
        variant_name: mcl_variant,
        special_points: points::mcl_points,
    },
    LatticeFamily {
        kind: BravaisType::Mclc,
        long_name: "c-centered monoclinic",
        parameters: &["a", "b", "c", "alpha"],
        variants: MCLC_VARIANTS,
        cell: mclc_cell,
        variant_name: mclc_variant,
        special_points: points::mclc_points,
    },
    LatticeFamily {
        kind: BravaisType::Tri,
        long_name: "triclinic",
        parameters: &["a", "b", "c", "alpha", "beta", "gamma"],
        variants: TRI_VARIANTS,
        cell: tri_cell,
        variant_name: tri_variant,
        special_points: points::tri_points,
    },
];

// ======================== SHARED CHECKS ========================

/// Orthorhombic families require a < b < c.
pub fn check_orthorhombic(a: f64, b: f64, c: f64) -> Result<()> {
    if !(a < b && b < c) {
        return Err(LatticeError::UnconventionalLattice(format!(
            "expected a < b < c, got {a}, {b}, {c}"
        )));
    }
    Ok(())
}

/// Monoclinic families require a <= c, b <= c and alpha < 90.
pub fn check_monoclinic(a: f64, b: f64, c: f64, alpha: f64) -> Result<()> {
    if !(a <= c && b <= c && alpha < 90.0) {
        return Err(LatticeError::UnconventionalLattice(format!(
            "expected a <= c, b <= c, alpha < 90; got a={a}, b={b}, c={c}, alpha={alpha}"
        )));
    }
    Ok(())
}

// ======================== CANONICAL CELLS ========================

fn basis(a1: [f64; 3], a2: [f64; 3], a3: [f64; 3]) -> Matrix3<f64> {
    Matrix3::from_columns(&[Vector3::from(a1), Vector3::from(a2), Vector3::from(a3)])
}

fn cub_cell(p: &[f64]) -> Matrix3<f64> {
    Matrix3::identity() * p[0]
}

fn fcc_cell(p: &[f64]) -> Matrix3<f64> {
    let a = p[0];
    basis([0.0, a, a], [a, 0.0, a], [a, a, 0.0]) * 0.5
}

fn bcc_cell(p: &[f64]) -> Matrix3<f64> {
    let a = p[0];
    basis([-a, a, a], [a, -a, a], [a, a, -a]) * 0.5
}

fn tet_cell(p: &[f64]) -> Matrix3<f64> {
    Matrix3::from_diagonal(&Vector3::new(p[0], p[0], p[1]))
}

fn bct_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, c) = (p[0], p[1]);
    basis([-a, a, c], [a, -a, c], [a, a, -c]) * 0.5
}

fn orc_cell(p: &[f64]) -> Matrix3<f64> {
    Matrix3::from_diagonal(&Vector3::new(p[0], p[1], p[2]))
}

fn orcf_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c) = (p[0], p[1], p[2]);
    basis([0.0, b, c], [a, 0.0, c], [a, b, 0.0]) * 0.5
}

fn orci_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c) = (p[0], p[1], p[2]);
    basis([-a, b, c], [a, -b, c], [a, b, -c]) * 0.5
}

fn orcc_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c) = (p[0], p[1], p[2]);
    basis([0.5 * a, -0.5 * b, 0.0], [0.5 * a, 0.5 * b, 0.0], [0.0, 0.0, c])
}

fn hex_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, c) = (p[0], p[1]);
    let x = 0.5 * 3f64.sqrt();
    basis([0.5 * a, -x * a, 0.0], [0.5 * a, x * a, 0.0], [0.0, 0.0, c])
}

fn rhl_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, alpha) = (p[0], p[1].to_radians());
    let acosa2 = a * (0.5 * alpha).cos();
    let asina2 = a * (0.5 * alpha).sin();
    let acosfrac = a * alpha.cos() / acosa2;
    let xx = 1.0 - acosfrac * acosfrac;
    basis(
        [acosa2, -asina2, 0.0],
        [acosa2, asina2, 0.0],
        [a * acosfrac, 0.0, a * xx.sqrt()],
    )
}

fn mcl_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c, alpha) = (p[0], p[1], p[2], p[3].to_radians());
    basis(
        [a, 0.0, 0.0],
        [0.0, b, 0.0],
        [0.0, c * alpha.cos(), c * alpha.sin()],
    )
}

fn mclc_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c, alpha) = (p[0], p[1], p[2], p[3].to_radians());
    basis(
        [0.5 * a, 0.5 * b, 0.0],
        [-0.5 * a, 0.5 * b, 0.0],
        [0.0, c * alpha.cos(), c * alpha.sin()],
    )
}

fn tri_cell(p: &[f64]) -> Matrix3<f64> {
    let (a, b, c) = (p[0], p[1], p[2]);
    let (alpha, beta, gamma) = (p[3].to_radians(), p[4].to_radians(), p[5].to_radians());
    let (singamma, cosgamma) = gamma.sin_cos();
    let cosbeta = beta.cos();
    let cosalpha = alpha.cos();
    let a3x = c * cosbeta;
    let a3y = c / singamma * (cosalpha - cosbeta * cosgamma);
    let a3z = c / singamma
        * (singamma * singamma - cosalpha * cosalpha - cosbeta * cosbeta
            + 2.0 * cosalpha * cosbeta * cosgamma)
            .sqrt();
    basis(
        [a, 0.0, 0.0],
        [b * cosgamma, b * singamma, 0.0],
        [a3x, a3y, a3z],
    )
}

// ======================== VARIANT RULES ========================

fn cub_variant(_: &[f64], _: f64) -> Result<&'static str> {
    Ok("CUB")
}

fn fcc_variant(_: &[f64], _: f64) -> Result<&'static str> {
    Ok("FCC")
}

fn bcc_variant(_: &[f64], _: f64) -> Result<&'static str> {
    Ok("BCC")
}

fn tet_variant(_: &[f64], _: f64) -> Result<&'static str> {
    Ok("TET")
}

fn hex_variant(_: &[f64], _: f64) -> Result<&'static str> {
    Ok("HEX")
}

fn bct_variant(p: &[f64], _: f64) -> Result<&'static str> {
    Ok(if p[1] < p[0] { "BCT1" } else { "BCT2" })
}

fn orc_variant(p: &[f64], _: f64) -> Result<&'static str> {
    check_orthorhombic(p[0], p[1], p[2])?;
    Ok("ORC")
}

fn orcf_variant(p: &[f64], eps: f64) -> Result<&'static str> {
    let (a, b, c) = (p[0], p[1], p[2]);
    check_orthorhombic(a, b, c)?;

    let diff = 1.0 / (a * a) - 1.0 / (b * b) - 1.0 / (c * c);
    if diff.abs() < eps {
        return Ok("ORCF3");
    }
    Ok(if diff > 0.0 { "ORCF1" } else { "ORCF2" })
}

fn orci_variant(p: &[f64], _: f64) -> Result<&'static str> {
    check_orthorhombic(p[0], p[1], p[2])?;
    Ok("ORCI")
}

fn orcc_variant(p: &[f64], _: f64) -> Result<&'static str> {
    let (a, b) = (p[0], p[1]);
    if !(a < b) {
        return Err(LatticeError::UnconventionalLattice(format!(
            "expected a < b, got a={a}, b={b}"
        )));
    }
    Ok("ORCC")
}

fn rhl_variant(p: &[f64], _: f64) -> Result<&'static str> {
    Ok(if p[1] < 90.0 { "RHL1" } else { "RHL2" })
}

fn mcl_variant(p: &[f64], _: f64) -> Result<&'static str> {
    check_monoclinic(p[0], p[1], p[2], p[3])?;
    Ok("MCL")
}

fn mclc_variant(p: &[f64], eps: f64) -> Result<&'static str> {
    let (a, b, c, alpha) = (p[0], p[1], p[2], p[3]);
    check_monoclinic(a, b, c, alpha)?;

    let kgamma = reciprocal_angles(&mclc_cell(p))?[2];

    // Angles in degrees are compared with the same eps as lengths
    if (kgamma - 90.0).abs() < eps {
        return Ok("MCLC2");
    }
    if kgamma > 90.0 {
        return Ok("MCLC1");
    }

    let (sina, cosa) = alpha.to_radians().sin_cos();
    let num = b * cosa / c + b * b * sina * sina / (a * a);
    if (num - 1.0).abs() < eps {
        Ok("MCLC4")
    } else if num < 1.0 {
        Ok("MCLC3")
    } else {
        Ok("MCLC5")
    }
}

fn tri_variant(p: &[f64], eps: f64) -> Result<&'static str> {
    let [kalpha, kbeta, kgamma] = reciprocal_angles(&tri_cell(p))?;

    if (kgamma - 90.0).abs() < eps {
        if kalpha > 90.0 && kbeta > 90.0 {
            return Ok("TRI2a");
        }
        if kalpha < 90.0 && kbeta < 90.0 {
            return Ok("TRI2b");
        }
    } else if kalpha > 90.0 && kbeta > 90.0 && kgamma > 90.0 {
        return Ok("TRI1a");
    } else if kalpha < 90.0 && kbeta < 90.0 && kgamma < 90.0 {
        return Ok("TRI1b");
    }

    Err(LatticeError::UnconventionalLattice(format!(
        "reciprocal lattice has unexpected angles: kalpha={kalpha}, kbeta={kbeta}, kgamma={kgamma}"
    )))
}

/// Angles of the reciprocal cell in degrees. The 2π factor does not change angles.
fn reciprocal_angles(cell: &Matrix3<f64>) -> Result<[f64; 3]> {
    let determinant = cell.determinant();
    let inverse = cell
        .try_inverse()
        .filter(|_| determinant.is_finite())
        .ok_or_else(|| {
            LatticeError::InvalidParameter(format!(
                "parameters do not span a cell (determinant {determinant})"
            ))
        })?;
    let reciprocal = (2.0 * PI) * inverse.transpose();
    let cellpar = cellpar_of(&reciprocal);
    Ok([cellpar[3], cellpar[4], cellpar[5]])
}

/// Split a concatenated label string into labels: an uppercase letter plus an optional digit.
pub(crate) fn split_labels(names: &'static str) -> Vec<&'static str> {
    let mut labels = Vec::new();
    let mut start = None;
    for (i, ch) in names.char_indices() {
        if ch.is_ascii_digit() {
            continue;
        }
        if let Some(s) = start {
            labels.push(&names[s..i]);
        }
        start = Some(i);
    }
    if let Some(s) = start {
        labels.push(&names[s..]);
    }
    labels
}
