use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::lattice::lattice_families::Variant;

/// A labelled high symmetry point in fractional coordinates of the reciprocal cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialPoint {
    /// Conventional label ("G" for Γ, "X", "Z1", ...)
    pub label: String,
    /// Position in reciprocal space (fractional coordinates of the reciprocal basis)
    pub position: Vector3<f64>,
}

impl SpecialPoint {
    pub fn new(label: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }

    /// Label for printing, with Γ spelled out.
    pub fn display_label(&self) -> &str {
        display_label(&self.label)
    }
}

/// Conventional string representation of a label.
pub fn display_label(label: &str) -> &str {
    match label {
        "G" => "Γ",
        other => other,
    }
}

/// Look up a point by label.
pub fn find_special_point<'a>(points: &'a [SpecialPoint], label: &str) -> Option<&'a SpecialPoint> {
    points.iter().find(|point| point.label == label)
}

fn coords(rows: &[[f64; 3]]) -> Vec<Vector3<f64>> {
    rows.iter().map(|&row| Vector3::from(row)).collect()
}

// ======================== STATIC POINT SETS ========================
// Single-variant families: points do not depend on the parameters.

/// G X R M
pub fn cub_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [0.0, 0.5, 0.0],
        [0.5, 0.5, 0.5],
        [0.5, 0.5, 0.0],
    ])
}

/// G K L U W X
pub fn fcc_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [3.0 / 8.0, 3.0 / 8.0, 3.0 / 4.0],
        [0.5, 0.5, 0.5],
        [5.0 / 8.0, 1.0 / 4.0, 5.0 / 8.0],
        [0.5, 1.0 / 4.0, 3.0 / 4.0],
        [0.5, 0.0, 0.5],
    ])
}

/// G H P N
pub fn bcc_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [0.5, -0.5, 0.5],
        [0.25, 0.25, 0.25],
        [0.0, 0.0, 0.5],
    ])
}

/// G A M R X Z
pub fn tet_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [0.5, 0.5, 0.5],
        [0.5, 0.5, 0.0],
        [0.0, 0.5, 0.5],
        [0.0, 0.5, 0.0],
        [0.0, 0.0, 0.5],
    ])
}

/// G R S T U X Y Z
pub fn orc_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [0.5, 0.5, 0.5],
        [0.5, 0.5, 0.0],
        [0.0, 0.5, 0.5],
        [0.5, 0.0, 0.5],
        [0.5, 0.0, 0.0],
        [0.0, 0.5, 0.0],
        [0.0, 0.0, 0.5],
    ])
}

/// G M K A L H
pub fn hex_points(_: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    coords(&[
        [0.0, 0.0, 0.0],
        [0.0, 0.5, 0.0],
        [1.0 / 3.0, 1.0 / 3.0, 0.0],
        [0.0, 0.0, 0.5],
        [0.0, 0.5, 0.5],
        [1.0 / 3.0, 1.0 / 3.0, 0.5],
    ])
}

// ======================== PARAMETER DEPENDENT POINT SETS ========================

pub fn bct_points(p: &[f64], variant: &Variant) -> Vec<Vector3<f64>> {
    let (a2, c2) = (p[0] * p[0], p[1] * p[1]);

    if variant.name == "BCT1" {
        let eta = 0.25 * (1.0 + c2 / a2);
        coords(&[
            [0.0, 0.0, 0.0],
            [-0.5, 0.5, 0.5],
            [0.0, 0.5, 0.0],
            [0.25, 0.25, 0.25],
            [0.0, 0.0, 0.5],
            [eta, eta, -eta],
            [-eta, 1.0 - eta, eta],
        ])
    } else {
        // Not the same eta as BCT1
        let eta = 0.25 * (1.0 + a2 / c2);
        let zeta = 0.5 * a2 / c2;
        coords(&[
            [0.0, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.25, 0.25, 0.25],
            [-eta, eta, eta],
            [eta, 1.0 - eta, -eta],
            [0.0, 0.0, 0.5],
            [-zeta, zeta, 0.5],
            [0.5, 0.5, -zeta],
            [0.5, 0.5, -0.5],
        ])
    }
}

pub fn orcf_points(p: &[f64], variant: &Variant) -> Vec<Vector3<f64>> {
    let (a2, b2, c2) = (p[0] * p[0], p[1] * p[1], p[2] * p[2]);
    let xminus = 0.25 * (1.0 + a2 / b2 - a2 / c2);
    let xplus = 0.25 * (1.0 + a2 / b2 + a2 / c2);

    if variant.name == "ORCF2" {
        let phi = 0.25 * (1.0 + c2 / b2 - c2 / a2);
        let delta = 0.25 * (1.0 + b2 / a2 - b2 / c2);
        let eta = xminus;
        coords(&[
            [0.0, 0.0, 0.0],
            [0.5, 0.5 - eta, 1.0 - eta],
            [0.5, 0.5 + eta, eta],
            [0.5 - delta, 0.5, 1.0 - delta],
            [0.5 + delta, 0.5, delta],
            [0.5, 0.5, 0.5],
            [1.0 - phi, 0.5 - phi, 0.5],
            [phi, 0.5 + phi, 0.5],
            [0.0, 0.5, 0.5],
            [0.5, 0.0, 0.5],
            [0.5, 0.5, 0.0],
        ])
    } else {
        // ORCF1 and ORCF3
        let zeta = xminus;
        let eta = xplus;
        coords(&[
            [0.0, 0.0, 0.0],
            [0.5, 0.5 + zeta, zeta],
            [0.5, 0.5 - zeta, 1.0 - zeta],
            [0.5, 0.5, 0.5],
            [1.0, 0.5, 0.5],
            [0.0, eta, eta],
            [1.0, 1.0 - eta, 1.0 - eta],
            [0.5, 0.0, 0.5],
            [0.5, 0.5, 0.0],
        ])
    }
}

pub fn orci_points(p: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    let (a2, b2, c2) = (p[0] * p[0], p[1] * p[1], p[2] * p[2]);
    let zeta = 0.25 * (1.0 + a2 / c2);
    let eta = 0.25 * (1.0 + b2 / c2);
    let delta = 0.25 * (b2 - a2) / c2;
    let mu = 0.25 * (a2 + b2) / c2;

    coords(&[
        [0.0, 0.0, 0.0],
        [-mu, mu, 0.5 - delta],
        [mu, -mu, 0.5 + delta],
        [0.5 - delta, 0.5 + delta, -mu],
        [0.0, 0.5, 0.0],
        [0.5, 0.0, 0.0],
        [0.0, 0.0, 0.5],
        [0.25, 0.25, 0.25],
        [-zeta, zeta, zeta],
        [zeta, 1.0 - zeta, -zeta],
        [eta, -eta, eta],
        [1.0 - eta, eta, -eta],
        [0.5, 0.5, -0.5],
    ])
}

pub fn orcc_points(p: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    let (a, b) = (p[0], p[1]);
    let zeta = 0.25 * (1.0 + a * a / (b * b));

    coords(&[
        [0.0, 0.0, 0.0],
        [zeta, zeta, 0.5],
        [-zeta, 1.0 - zeta, 0.5],
        [0.0, 0.5, 0.5],
        [0.0, 0.5, 0.0],
        [-0.5, 0.5, 0.5],
        [zeta, zeta, 0.0],
        [-zeta, 1.0 - zeta, 0.0],
        [-0.5, 0.5, 0.0],
        [0.0, 0.0, 0.5],
    ])
}

pub fn rhl_points(p: &[f64], variant: &Variant) -> Vec<Vector3<f64>> {
    let alpha = p[1].to_radians();

    if variant.name == "RHL1" {
        let cosa = alpha.cos();
        let eta = (1.0 + 4.0 * cosa) / (2.0 + 4.0 * cosa);
        let nu = 0.75 - 0.5 * eta;
        coords(&[
            [0.0, 0.0, 0.0],
            [eta, 0.5, 1.0 - eta],
            [0.5, 1.0 - eta, eta - 1.0],
            [0.5, 0.5, 0.0],
            [0.5, 0.0, 0.0],
            [0.0, 0.0, -0.5],
            [eta, nu, nu],
            [1.0 - nu, 1.0 - nu, 1.0 - eta],
            [nu, nu, eta - 1.0],
            [1.0 - nu, nu, 0.0],
            [nu, 0.0, -nu],
            [0.5, 0.5, 0.5],
        ])
    } else {
        let eta = 1.0 / (2.0 * (0.5 * alpha).tan().powi(2));
        let nu = 0.75 - 0.5 * eta;
        coords(&[
            [0.0, 0.0, 0.0],
            [0.5, -0.5, 0.0],
            [0.5, 0.0, 0.0],
            [1.0 - nu, -nu, 1.0 - nu],
            [nu, nu - 1.0, nu - 1.0],
            [eta, eta, eta],
            [1.0 - eta, -eta, -eta],
            [0.5, -0.5, 0.5],
        ])
    }
}

pub fn mcl_points(p: &[f64], _: &Variant) -> Vec<Vector3<f64>> {
    let (b, c) = (p[1], p[2]);
    let (sina, cosa) = p[3].to_radians().sin_cos();
    let eta = (1.0 - b * cosa / c) / (2.0 * sina * sina);
    let nu = 0.5 - eta * c * cosa / b;

    coords(&[
        [0.0, 0.0, 0.0],
        [0.5, 0.5, 0.0],
        [0.0, 0.5, 0.5],
        [0.5, 0.0, 0.5],
        [0.5, 0.0, -0.5],
        [0.5, 0.5, 0.5],
        [0.0, eta, 1.0 - nu],
        [0.0, 1.0 - eta, nu],
        [0.0, eta, -nu],
        [0.5, eta, 1.0 - nu],
        [0.5, 1.0 - eta, nu],
        [0.5, eta, -nu],
        [0.0, 0.5, 0.0],
        [0.0, 0.0, 0.5],
        [0.0, 0.0, -0.5],
        [0.5, 0.0, 0.0],
    ])
}

pub fn mclc_points(p: &[f64], variant: &Variant) -> Vec<Vector3<f64>> {
    let (a, b, c) = (p[0], p[1], p[2]);
    let (a2, b2) = (a * a, b * b);
    let (sina, cosa) = p[3].to_radians().sin_cos();
    let sina2 = sina * sina;

    match variant.name {
        "MCLC1" | "MCLC2" => {
            let zeta = (2.0 - b * cosa / c) / (4.0 * sina2);
            let eta = 0.5 + 2.0 * zeta * c * cosa / b;
            let psi = 0.75 - a2 / (4.0 * b2 * sina2);
            let phi = psi + (0.75 - psi) * b * cosa / c;
            coords(&[
                [0.0, 0.0, 0.0],
                [0.5, 0.0, 0.0],
                [0.0, -0.5, 0.0],
                [1.0 - zeta, 1.0 - zeta, 1.0 - eta],
                [zeta, zeta, eta],
                [-zeta, -zeta, 1.0 - eta],
                [1.0 - zeta, -zeta, 1.0 - eta],
                [phi, 1.0 - phi, 0.5],
                [1.0 - phi, phi - 1.0, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.0, 0.5],
                [1.0 - psi, psi - 1.0, 0.0],
                [psi, 1.0 - psi, 0.0],
                [psi - 1.0, -psi, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, -0.5, 0.0],
                [0.0, 0.0, 0.5],
            ])
        }
        "MCLC3" | "MCLC4" => {
            let mu = 0.25 * (1.0 + b2 / a2);
            let delta = b * c * cosa / (2.0 * a2);
            let zeta = mu - 0.25 + (1.0 - b * cosa / c) / (4.0 * sina2);
            let eta = 0.5 + 2.0 * zeta * c * cosa / b;
            let phi = 1.0 + zeta - 2.0 * mu;
            let psi = eta - 2.0 * delta;
            coords(&[
                [0.0, 0.0, 0.0],
                [1.0 - phi, 1.0 - phi, 1.0 - psi],
                [phi, phi - 1.0, psi],
                [1.0 - phi, -phi, 1.0 - psi],
                [zeta, zeta, eta],
                [1.0 - zeta, -zeta, 1.0 - eta],
                [-zeta, -zeta, 1.0 - eta],
                [0.5, -0.5, 0.5],
                [0.5, 0.0, 0.5],
                [0.5, 0.0, 0.0],
                [0.0, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [mu, mu, delta],
                [1.0 - mu, -mu, -delta],
                [-mu, -mu, -delta],
                [mu, mu - 1.0, delta],
                [0.0, 0.0, 0.5],
            ])
        }
        _ => {
            // MCLC5
            let zeta = 0.25 * (b2 / a2 + (1.0 - b * cosa / c) / sina2);
            let eta = 0.5 + 2.0 * zeta * c * cosa / b;
            let mu = 0.5 * eta + b2 / (4.0 * a2) - b * c * cosa / (2.0 * a2);
            let nu = 2.0 * mu - zeta;
            let omega = (4.0 * nu - 1.0 - b2 * sina2 / a2) * c / (2.0 * b * cosa);
            let delta = zeta * c * cosa / b + omega / 2.0 - 0.25;
            let rho = 1.0 - zeta * a2 / b2;
            coords(&[
                [0.0, 0.0, 0.0],
                [nu, nu, omega],
                [1.0 - nu, 1.0 - nu, 1.0 - omega],
                [nu, nu - 1.0, omega],
                [zeta, zeta, eta],
                [1.0 - zeta, -zeta, 1.0 - eta],
                [-zeta, -zeta, 1.0 - eta],
                [rho, 1.0 - rho, 0.5],
                [1.0 - rho, rho - 1.0, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.0, 0.5],
                [0.5, 0.0, 0.0],
                [0.0, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [mu, mu, delta],
                [1.0 - mu, -mu, -delta],
                [-mu, -mu, -delta],
                [mu, mu - 1.0, delta],
                [0.0, 0.0, 0.5],
            ])
        }
    }
}

/// None of the triclinic points depend on the parameters.
pub fn tri_points(_: &[f64], variant: &Variant) -> Vec<Vector3<f64>> {
    if variant.name == "TRI1a" || variant.name == "TRI2a" {
        coords(&[
            [0.0, 0.0, 0.0],
            [0.5, 0.5, 0.0],
            [0.0, 0.5, 0.5],
            [0.5, 0.0, 0.5],
            [0.5, 0.5, 0.5],
            [0.5, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, 0.0, 0.5],
        ])
    } else {
        coords(&[
            [0.0, 0.0, 0.0],
            [0.5, -0.5, 0.0],
            [0.0, 0.0, 0.5],
            [-0.5, -0.5, 0.5],
            [0.0, -0.5, 0.5],
            [0.0, -0.5, 0.0],
            [0.5, 0.0, 0.0],
            [-0.5, 0.0, 0.5],
        ])
    }
}
