//! Identification of the Bravais lattice of an arbitrary cell.
//!
//! The cell is Niggli-reduced first. Every family is then tried in order of decreasing
//! symmetry: candidate bases of the reduced lattice are built (a static table of integer
//! basis changes, or a geometric construction for the monoclinic and triclinic families),
//! the family parameters are fitted from the candidate's metric tensor and the canonical
//! cell of the fitted lattice is compared with the candidate. Lengths must agree within
//! `eps`, angles within `eps` plus `ANGLE_RELATIVE_TOLERANCE` per degree. The first match
//! wins.

use log::{debug, trace};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::{
    ANGLE_RELATIVE_TOLERANCE, CENTERING_TOLERANCE, ClassifierOptions, NIGGLI_EPS_FACTOR,
};
use crate::errors::LatticeError;
use crate::lattice::bravais_lattice::BravaisLattice;
use crate::lattice::cell::{Cell, angle_between, cellpar_of};
use crate::lattice::lattice_families::is_length_parameter;
use crate::lattice::lattice_reduction::niggli_reduce;
use crate::lattice::lattice_types::{BravaisType, EqualityPattern, categorize_differences};
use crate::symmetries::high_symmetry_points::SpecialPoint;

/// Families in the order they are tried.
pub const CLASSIFICATION_ORDER: [BravaisType; 14] = [
    BravaisType::Cub,
    BravaisType::Fcc,
    BravaisType::Bcc,
    BravaisType::Bct,
    BravaisType::Hex,
    BravaisType::Tet,
    BravaisType::Orcc,
    BravaisType::Orc,
    BravaisType::Orcf,
    BravaisType::Orci,
    BravaisType::Rhl,
    BravaisType::Mcl,
    BravaisType::Mclc,
    BravaisType::Tri,
];

// ======================== BASIS CHANGES ========================
// Rows of M in `candidate = reduced * M`; column j of M holds the coefficients of the
// j-th candidate vector in the reduced basis.

type Op = [[i32; 3]; 3];

const IDENTITY: Op = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
const CYCLE: Op = [[0, 0, 1], [1, 0, 0], [0, 1, 0]];

const BCT_OPS: &[Op] = &[
    [[0, 1, 0], [1, -1, 0], [0, 0, -1]],
    [[0, 1, -1], [0, 1, 0], [1, 1, -1]],
    [[0, 1, 0], [1, 0, 0], [1, 1, -1]],
    CYCLE,
    IDENTITY,
];

const ORCC_OPS: &[Op] = &[
    [[0, -1, 0], [1, -1, 0], [0, 0, 1]],
    [[0, 0, 1], [0, -1, 0], [1, -1, 0]],
    [[0, 1, 0], [0, 0, -1], [-1, 1, 0]],
    IDENTITY,
    CYCLE,
];

const ORCF_OPS: &[Op] = &[
    [[-1, 0, 0], [1, 0, 1], [1, 1, 0]],
    [[0, 0, 1], [-1, 0, 0], [-1, -1, 0]],
];

const ORCI_OPS: &[Op] = &[
    [[-1, 0, 1], [-1, 0, 0], [-1, -1, 1]],
    [[0, -1, 0], [0, 1, -1], [1, 0, 0]],
    [[0, 1, 0], [1, 0, 0], [1, 1, -1]],
    [[0, 0, -1], [0, -1, 0], [-1, 0, 0]],
];

const RHL_OPS: &[Op] = &[
    IDENTITY,
    [[0, 0, -1], [-1, 0, 0], [1, 1, 1]],
    [[0, 0, 1], [-1, 0, 1], [0, -1, 1]],
];

/// Index-2 sublattices; each row holds the coefficients of one sublattice vector.
const INDEX_TWO_SUBLATTICES: [Op; 7] = [
    [[2, 0, 0], [0, 1, 0], [0, 0, 1]],
    [[1, 0, 0], [0, 2, 0], [0, 0, 1]],
    [[1, 0, 0], [0, 1, 0], [0, 0, 2]],
    [[1, 1, 0], [0, 2, 0], [0, 0, 1]],
    [[1, 0, 1], [0, 1, 0], [0, 0, 2]],
    [[1, 0, 0], [0, 1, 1], [0, 0, 2]],
    [[1, 1, 0], [0, 1, 1], [1, 0, 1]],
];

fn table_ops(kind: BravaisType) -> &'static [Op] {
    match kind {
        BravaisType::Bct => BCT_OPS,
        BravaisType::Hex | BravaisType::Tet => &[CYCLE, IDENTITY],
        BravaisType::Orcc => ORCC_OPS,
        BravaisType::Orcf => ORCF_OPS,
        BravaisType::Orci => ORCI_OPS,
        BravaisType::Rhl => RHL_OPS,
        _ => &[IDENTITY],
    }
}

fn op_matrix(op: &Op) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| f64::from(op[i][j]))
}

// ======================== CLASSIFICATION RESULT ========================

/// A family whose fitted parameters were rejected by the family itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub lattice: BravaisType,
    pub parameters: Vec<f64>,
    pub reason: String,
}

/// Result of classifying a cell, with the bookkeeping needed to relate it to the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub lattice: BravaisLattice,
    pub input_cell: Cell,
    pub reduced_cell: Cell,
    /// `reduced = input * reduction`
    pub reduction: Matrix3<i32>,
    /// `matched = input * transform`, where `matched` has the canonical cell parameters
    pub transform: Matrix3<i32>,
    pub length_pattern: EqualityPattern,
    pub angle_pattern: EqualityPattern,
    pub scalar_product_pattern: EqualityPattern,
    pub skipped: Vec<SkippedCandidate>,
}

impl Classification {
    pub fn kind(&self) -> BravaisType {
        self.lattice.kind()
    }

    /// Basis of the input lattice that matched the canonical cell.
    pub fn matched_basis(&self) -> Matrix3<f64> {
        self.input_cell.basis() * self.transform.cast::<f64>()
    }

    /// Special points of the lattice, expressed in the reciprocal basis of the input cell.
    pub fn special_points_in_input_basis(&self) -> Result<Vec<SpecialPoint>> {
        let transform = self.transform.cast::<f64>();
        let inverse_transpose = transform
            .try_inverse()
            .ok_or(LatticeError::DegenerateCell {
                determinant: transform.determinant(),
            })?
            .transpose();
        Ok(self
            .lattice
            .special_points()
            .into_iter()
            .map(|point| SpecialPoint::new(point.label, inverse_transpose * point.position))
            .collect())
    }
}

// ======================== ENTRY POINTS ========================

/// Bravais lattice of `cell` with tolerance `eps` (absolute, lengths and degrees).
///
/// `reduce = false` skips the Niggli reduction and only makes sense for reduced input.
pub fn get_bravais_lattice(cell: &Cell, eps: f64, reduce: bool) -> Result<BravaisLattice> {
    let options = ClassifierOptions { eps, reduce };
    classify_with_options(cell, &options).map(|classification| classification.lattice)
}

/// Classify `cell` with the default options.
pub fn identify_bravais_lattice(cell: &Cell) -> Result<Classification> {
    classify_with_options(cell, &ClassifierOptions::default())
}

pub fn classify_with_options(cell: &Cell, options: &ClassifierOptions) -> Result<Classification> {
    let eps = options.eps;
    if !(eps.is_finite() && eps >= 0.0) {
        return Err(LatticeError::InvalidParameter(format!(
            "tolerance must be finite and non-negative, got {eps}"
        )));
    }

    // A reduction tolerance below eps lets noise pick a different boundary setting
    let (reduced_cell, reduction) = if options.reduce {
        cell.reduce_with_tolerance(NIGGLI_EPS_FACTOR.max(eps))?
    } else {
        (cell.clone(), Matrix3::identity())
    };
    let [a, b, c, alpha, beta, gamma] = reduced_cell.cellpar();
    let length_pattern = categorize_differences([a, b, c], eps);
    let angle_pattern = categorize_differences([alpha, beta, gamma], eps);
    let scalar_product_pattern = categorize_differences(reduced_cell.scalar_products(), eps);
    debug!(
        "reduced cell ({a:.6}, {b:.6}, {c:.6}, {alpha:.4}, {beta:.4}, {gamma:.4}): lengths {length_pattern:?}, angles {angle_pattern:?}"
    );

    let reduced = *reduced_cell.basis();
    let mut classifier = Classifier::new(eps);
    for kind in CLASSIFICATION_ORDER {
        for candidate in candidate_bases(kind, &reduced, eps)? {
            let Some(lattice) = classifier.try_candidate(kind, &candidate)? else {
                continue;
            };
            let transform = integer_transform(cell.basis(), &candidate)?;
            debug!("classified as {}", lattice.repr());
            return Ok(Classification {
                lattice,
                input_cell: cell.clone(),
                reduced_cell,
                reduction,
                transform,
                length_pattern,
                angle_pattern,
                scalar_product_pattern,
                skipped: classifier.skipped,
            });
        }
    }

    Err(LatticeError::ClassificationFailure(format!(
        "no family matches cell parameters ({a}, {b}, {c}, {alpha}, {beta}, {gamma}) within eps={eps}"
    )))
}

/// Tries candidates and remembers the ones the families rejected.
struct Classifier {
    eps: f64,
    skipped: Vec<SkippedCandidate>,
}

impl Classifier {
    fn new(eps: f64) -> Self {
        Self {
            eps,
            skipped: Vec::new(),
        }
    }

    fn try_candidate(
        &mut self,
        kind: BravaisType,
        candidate: &Matrix3<f64>,
    ) -> Result<Option<BravaisLattice>> {
        let Some(values) = fit_parameters(kind, candidate, self.eps) else {
            trace!("{kind}: no parameters fit candidate {candidate:?}");
            return Ok(None);
        };

        let lattice = match BravaisLattice::from_values(kind, values.clone(), self.eps) {
            Ok(lattice) => lattice,
            Err(err) if err.is_recoverable() => {
                debug!("{kind}: skipping candidate {values:?}: {err}");
                self.skipped.push(SkippedCandidate {
                    lattice: kind,
                    parameters: values,
                    reason: err.to_string(),
                });
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let canonical = lattice.cellpar()?;
        let target = cellpar_of(candidate);
        let matches = canonical.iter().zip(&target).enumerate().all(|(i, (x, y))| {
            let slack = if i < 3 { 0.0 } else { ANGLE_RELATIVE_TOLERANCE * y.abs() };
            (x - y).abs() <= self.eps + slack
        });
        trace!("{}: candidate {:?} matches: {}", kind, values, matches);
        Ok(matches.then_some(lattice))
    }
}

// ======================== PARAMETER FITS ========================

/// Family parameters implied by the metric tensor of `candidate`, assuming it is a basis
/// with the family's canonical shape. Lengths not above `eps` and non-finite values reject
/// the fit.
fn fit_parameters(kind: BravaisType, candidate: &Matrix3<f64>, eps: f64) -> Option<Vec<f64>> {
    let g = candidate.transpose() * candidate;
    let l = [g[(0, 0)].sqrt(), g[(1, 1)].sqrt(), g[(2, 2)].sqrt()];
    let column = |i: usize| -> Vector3<f64> { candidate.column(i).into() };

    let values = match kind {
        BravaisType::Cub => vec![l[0]],
        BravaisType::Fcc => vec![2f64.sqrt() * l[0]],
        BravaisType::Bcc => vec![2.0 * l[0] / 3f64.sqrt()],
        BravaisType::Tet | BravaisType::Hex => vec![l[0], l[2]],
        BravaisType::Bct => {
            let c = 2.0 * (-g[(1, 2)]).sqrt();
            vec![(2.0 * l[0] * l[0] - 0.5 * c * c).sqrt(), c]
        }
        BravaisType::Orc => l.to_vec(),
        BravaisType::Orcf => vec![
            2.0 * g[(1, 2)].sqrt(),
            2.0 * g[(0, 2)].sqrt(),
            2.0 * g[(0, 1)].sqrt(),
        ],
        BravaisType::Orci => vec![
            (-2.0 * (g[(0, 1)] + g[(0, 2)])).sqrt(),
            (-2.0 * (g[(0, 1)] + g[(1, 2)])).sqrt(),
            (-2.0 * (g[(0, 2)] + g[(1, 2)])).sqrt(),
        ],
        BravaisType::Orcc => vec![
            (2.0 * (g[(0, 0)] + g[(0, 1)])).sqrt(),
            (2.0 * (g[(0, 0)] - g[(0, 1)])).sqrt(),
            l[2],
        ],
        BravaisType::Rhl => vec![l[0], angle_between(&column(1), &column(2))],
        BravaisType::Mcl => vec![l[0], l[1], l[2], angle_between(&column(1), &column(2))],
        BravaisType::Mclc => {
            let b = (2.0 * (g[(0, 0)] + g[(0, 1)])).sqrt();
            let a = (2.0 * (g[(0, 0)] - g[(0, 1)])).sqrt();
            let c = l[2];
            // No clamp: an impossible cosine gives NaN and rejects the fit
            let alpha = (2.0 * g[(0, 2)] / (b * c)).acos().to_degrees();
            vec![a, b, c, alpha]
        }
        BravaisType::Tri => cellpar_of(candidate).to_vec(),
    };

    let parameters = kind.parameter_names();
    let valid = values.iter().zip(parameters).all(|(value, name)| {
        value.is_finite() && (!is_length_parameter(name) || *value > eps)
    });
    valid.then_some(values)
}

// ======================== CANDIDATE BASES ========================

fn candidate_bases(
    kind: BravaisType,
    reduced: &Matrix3<f64>,
    eps: f64,
) -> Result<Vec<Matrix3<f64>>> {
    let candidates: Vec<Matrix3<f64>> = match kind {
        BravaisType::Mcl => monoclinic_candidate(reduced, eps).into_iter().collect(),
        BravaisType::Mclc => base_centered_monoclinic_candidate(reduced, eps)?
            .into_iter()
            .collect(),
        BravaisType::Tri => triclinic_candidates(reduced)?,
        _ => table_ops(kind)
            .iter()
            .map(|op| reduced * op_matrix(op))
            .collect(),
    };
    Ok(candidates)
}

/// Find a basis vector perpendicular to the two others while those two are not
/// perpendicular to each other. Returns `(axis, p, q)`.
fn unique_axis(
    basis: &Matrix3<f64>,
    eps: f64,
) -> Option<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
    let tolerance = eps + ANGLE_RELATIVE_TOLERANCE * 90.0;
    let perpendicular =
        |u: &Vector3<f64>, v: &Vector3<f64>| (angle_between(u, v) - 90.0).abs() <= tolerance;
    (0..3).find_map(|i| {
        let u: Vector3<f64> = basis.column(i).into();
        let p: Vector3<f64> = basis.column((i + 1) % 3).into();
        let q: Vector3<f64> = basis.column((i + 2) % 3).into();
        (perpendicular(&u, &p) && perpendicular(&u, &q) && !perpendicular(&p, &q))
            .then_some((u, p, q))
    })
}

/// Smallest `c + n b` (n >= 0, after orienting c towards b) whose length reaches `target`.
fn lengthen(b: &Vector3<f64>, c: &Vector3<f64>, target: f64) -> Vector3<f64> {
    let c = if b.dot(c) < 0.0 { -c } else { *c };
    let (bb, bc, cc) = (b.dot(b), b.dot(&c), c.dot(&c));
    if cc >= target * target {
        return c;
    }
    let n = ((-bc + (bc * bc - bb * (cc - target * target)).sqrt()) / bb).ceil();
    c + b * n
}

/// Primitive monoclinic basis `(a, b, c)` with `a` along the unique axis, `b <= c` and
/// `alpha < 90`.
fn monoclinic_candidate(reduced: &Matrix3<f64>, eps: f64) -> Option<Matrix3<f64>> {
    let (u, mut p, mut q) = unique_axis(reduced, eps)?;
    if p.norm() > q.norm() {
        std::mem::swap(&mut p, &mut q);
    }
    let q = lengthen(&p, &q, u.norm());
    Some(Matrix3::from_columns(&[u, p, q]))
}

/// Primitive C-centred monoclinic basis built from the conventional cell of an index-2
/// sublattice whose centering vector has a half component along the unique axis.
fn base_centered_monoclinic_candidate(
    reduced: &Matrix3<f64>,
    eps: f64,
) -> Result<Option<Matrix3<f64>>> {
    for rows in &INDEX_TWO_SUBLATTICES {
        let sublattice = reduced * op_matrix(rows).transpose();
        let (sublattice, _) = niggli_reduce(&sublattice)?;
        let Some((u, p, q)) = unique_axis(&sublattice, eps) else {
            continue;
        };
        let Some(to_fractional) = Matrix3::from_columns(&[u, p, q]).try_inverse() else {
            continue;
        };
        let Some(centering) = centering_vector(reduced, &to_fractional) else {
            continue;
        };
        if centering[0] != 1 || (centering[1] == 0 && centering[2] == 0) {
            continue;
        }

        let (b, c) = match (centering[1], centering[2]) {
            (1, 0) => (p, q),
            (0, _) => (q, p),
            _ => (p + q, p),
        };
        let c = lengthen(&b, &c, u.norm().max(b.norm()));
        return Ok(Some(Matrix3::from_columns(&[(u + b) * 0.5, (b - u) * 0.5, c])));
    }
    Ok(None)
}

/// Doubled fractional coordinates (mod 2) of the first reduced vector that is not a
/// sublattice vector.
fn centering_vector(reduced: &Matrix3<f64>, to_fractional: &Matrix3<f64>) -> Option<[i64; 3]> {
    reduced.column_iter().find_map(|column| {
        let fractional = to_fractional * column;
        let fractional = fractional.map(|x| x - (x + 1e-6).floor());
        fractional
            .iter()
            .any(|f| (f - 0.5).abs() < CENTERING_TOLERANCE)
            .then(|| {
                let doubled = |f: f64| ((2.0 * f).round() as i64).rem_euclid(2);
                [doubled(fractional[0]), doubled(fractional[1]), doubled(fractional[2])]
            })
    })
}

/// The reduced cell and the dual of its reduced reciprocal cell.
fn triclinic_candidates(reduced: &Matrix3<f64>) -> Result<Vec<Matrix3<f64>>> {
    let (reduced_reciprocal, _) = Cell::from_matrix(*reduced)?.reciprocal()?.reduce()?;
    let dual = reduced_reciprocal.reciprocal()?;
    Ok(vec![*reduced, *dual.basis()])
}

/// Integer matrix `T` with `target = input * T`.
fn integer_transform(input: &Matrix3<f64>, target: &Matrix3<f64>) -> Result<Matrix3<i32>> {
    let inverse = input.try_inverse().ok_or(LatticeError::DegenerateCell {
        determinant: input.determinant(),
    })?;
    Ok((inverse * target).map(|x| x.round() as i32))
}
