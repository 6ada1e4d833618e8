//! Niggli reduction of 3D cells (Krivy-Gruber algorithm with a relative tolerance).

use log::trace;
use nalgebra::{Matrix3, Vector3};

use crate::Result;
use crate::config::{NIGGLI_EPS_FACTOR, NIGGLI_MAX_ITERATIONS};
use crate::errors::LatticeError;

/// Niggli-reduce a basis (columns) with the default tolerance.
///
/// Returns the reduced basis and the integer transform `C` with `reduced = basis * C`, `det C = 1`.
pub fn niggli_reduce(basis: &Matrix3<f64>) -> Result<(Matrix3<f64>, Matrix3<i32>)> {
    niggli_reduce_with_tolerance(basis, NIGGLI_EPS_FACTOR)
}

/// Same as [`niggli_reduce`], with the tolerance `eps_factor * |det|^(1/3)`.
pub fn niggli_reduce_with_tolerance(
    basis: &Matrix3<f64>,
    eps_factor: f64,
) -> Result<(Matrix3<f64>, Matrix3<i32>)> {
    let determinant = basis.determinant();
    if !determinant.is_finite() || determinant == 0.0 {
        return Err(LatticeError::DegenerateCell { determinant });
    }
    let eps = eps_factor * determinant.abs().cbrt();

    let lt = |x: f64, y: f64| x < y - eps;
    let gt = |x: f64, y: f64| y < x - eps;
    let eq = |x: f64, y: f64| !(lt(x, y) || gt(x, y));

    let mut transform = Matrix3::<i32>::identity();
    let mut g = niggli_parameters(&(basis * transform.cast::<f64>()));

    for iteration in 0..NIGGLI_MAX_ITERATIONS {
        // Order the lengths
        if gt(g[0], g[1]) || (eq(g[0], g[1]) && gt(g[3].abs(), g[4].abs())) {
            transform *= Matrix3::new(0, -1, 0, -1, 0, 0, 0, 0, -1);
            g = niggli_parameters(&(basis * transform.cast::<f64>()));
            continue;
        }
        if gt(g[1], g[2]) || (eq(g[1], g[2]) && gt(g[4].abs(), g[5].abs())) {
            transform *= Matrix3::new(-1, 0, 0, 0, 0, -1, 0, -1, 0);
            g = niggli_parameters(&(basis * transform.cast::<f64>()));
            continue;
        }

        // Normalize signs of the off-diagonal terms to all positive or all non-positive
        let signs = sign_flips([g[3], g[4], g[5]], eps / 2.0);
        transform *= Matrix3::from_diagonal(&Vector3::new(signs[0], signs[1], signs[2]));
        g = niggli_parameters(&(basis * transform.cast::<f64>()));

        let step = if gt(g[3].abs(), g[1])
            || (eq(g[3], g[1]) && lt(2.0 * g[4], g[5]))
            || (eq(g[3], -g[1]) && lt(g[5], 0.0))
        {
            let s = if g[3] > 0.0 { 1 } else { -1 };
            Matrix3::new(1, 0, 0, 0, 1, -s, 0, 0, 1)
        } else if gt(g[4].abs(), g[0])
            || (eq(g[4], g[0]) && lt(2.0 * g[3], g[5]))
            || (eq(g[4], -g[0]) && lt(g[5], 0.0))
        {
            let s = if g[4] > 0.0 { 1 } else { -1 };
            Matrix3::new(1, 0, -s, 0, 1, 0, 0, 0, 1)
        } else if gt(g[5].abs(), g[0])
            || (eq(g[5], g[0]) && lt(2.0 * g[3], g[4]))
            || (eq(g[5], -g[0]) && lt(g[4], 0.0))
        {
            let s = if g[5] > 0.0 { 1 } else { -1 };
            Matrix3::new(1, -s, 0, 0, 1, 0, 0, 0, 1)
        } else {
            let sum = g[0] + g[1] + g[3] + g[4] + g[5];
            if lt(sum, 0.0) || (eq(sum, 0.0) && gt(2.0 * (g[0] + g[4]) + g[5], 0.0)) {
                Matrix3::new(1, 0, 1, 0, 1, 1, 0, 0, 1)
            } else {
                trace!("Niggli reduction converged after {} iterations", iteration);
                return Ok((basis * transform.cast::<f64>(), transform));
            }
        };
        transform *= step;
        g = niggli_parameters(&(basis * transform.cast::<f64>()));
    }

    Err(LatticeError::ReductionDidNotConverge(NIGGLI_MAX_ITERATIONS))
}

/// (a.a, b.b, c.c, 2 b.c, 2 a.c, 2 a.b)
fn niggli_parameters(basis: &Matrix3<f64>) -> [f64; 6] {
    let a = basis.column(0);
    let b = basis.column(1);
    let c = basis.column(2);
    [
        a.dot(&a),
        b.dot(&b),
        c.dot(&c),
        2.0 * b.dot(&c),
        2.0 * a.dot(&c),
        2.0 * a.dot(&b),
    ]
}

/// Column sign flips that make (xi, eta, zeta) all positive or all non-positive, keeping det = +1.
fn sign_flips(off_diagonal: [f64; 3], eps: f64) -> [i32; 3] {
    let signs = off_diagonal.map(|x| {
        if x > eps {
            1
        } else if x < -eps {
            -1
        } else {
            0
        }
    });

    if signs[0] * signs[1] * signs[2] == 1 {
        return signs;
    }

    let mut flips = [1, 1, 1];
    if signs.iter().any(|&s| s != -1) {
        let mut zero_index = None;
        for (i, &s) in signs.iter().enumerate() {
            if s == 1 {
                flips[i] = -1;
            } else if s == 0 {
                zero_index = Some(i);
            }
        }
        if flips[0] * flips[1] * flips[2] == -1 {
            if let Some(i) = zero_index {
                flips[i] = -1;
            }
        }
    }
    flips
}
