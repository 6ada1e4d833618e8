use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::BASE_VECTOR_TOLERANCE;
use crate::errors::LatticeError;
use crate::interfaces::Space;
use crate::lattice::lattice_reduction::{niggli_reduce, niggli_reduce_with_tolerance};

/// A 3D unit cell. Basis vectors are stored as the columns of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellSpec", into = "CellSpec")]
pub struct Cell {
    basis: Matrix3<f64>,
    space: Space,
}

/// Serialized form of a cell. Deserialization checks the determinant again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    pub basis: Matrix3<f64>,
    pub space: Space,
}

impl TryFrom<CellSpec> for Cell {
    type Error = LatticeError;

    fn try_from(spec: CellSpec) -> Result<Self> {
        Self::from_matrix_in(spec.basis, spec.space)
    }
}

impl From<Cell> for CellSpec {
    fn from(cell: Cell) -> Self {
        CellSpec {
            basis: cell.basis,
            space: cell.space,
        }
    }
}

impl Cell {
    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
        space: Space,
    ) -> Result<Self> {
        let basis = Matrix3::from_columns(&[base_1, base_2, base_3]);

        // Linearly non-dependent (also rejects NaN entries)
        let determinant = basis.determinant();
        if !(determinant.abs() >= BASE_VECTOR_TOLERANCE) {
            return Err(LatticeError::DegenerateCell { determinant });
        }

        Ok(Cell { basis, space })
    }

    /// Real-space cell from a matrix whose columns are the basis vectors.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self> {
        Self::from_matrix_in(matrix, Space::Real)
    }

    pub fn from_matrix_in(matrix: Matrix3<f64>, space: Space) -> Result<Self> {
        Self::from_base_vectors(
            matrix.column(0).into(),
            matrix.column(1).into(),
            matrix.column(2).into(),
            space,
        )
    }

    /// Real-space cell from the row listing `[a, b, c]` used in crystallographic tables.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Result<Self> {
        Self::from_base_vectors(
            Vector3::from(rows[0]),
            Vector3::from(rows[1]),
            Vector3::from(rows[2]),
            Space::Real,
        )
    }

    pub fn basis(&self) -> &Matrix3<f64> {
        &self.basis
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn base_vector(&self, index: usize) -> Vector3<f64> {
        self.basis.column(index).into()
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [self.base_vector(0), self.base_vector(1), self.base_vector(2)]
    }

    /// Basis vectors as rows, the layout of `from_rows`.
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let t = self.basis.transpose();
        [
            [t[(0, 0)], t[(0, 1)], t[(0, 2)]],
            [t[(1, 0)], t[(1, 1)], t[(1, 2)]],
            [t[(2, 0)], t[(2, 1)], t[(2, 2)]],
        ]
    }

    pub fn determinant(&self) -> f64 {
        self.basis.determinant()
    }

    pub fn volume(&self) -> f64 {
        self.determinant().abs()
    }

    pub fn inverse(&self) -> Result<Matrix3<f64>> {
        self.basis
            .try_inverse()
            .ok_or(LatticeError::DegenerateCell {
                determinant: self.determinant(),
            })
    }

    /// Metric tensor G = A^T * A.
    pub fn metric(&self) -> Matrix3<f64> {
        self.basis.transpose() * self.basis
    }

    pub fn lengths(&self) -> [f64; 3] {
        let [a, b, c] = self.base_vectors();
        [a.norm(), b.norm(), c.norm()]
    }

    /// Angles (alpha, beta, gamma) in degrees: alpha = angle(b, c), beta = angle(a, c), gamma = angle(a, b).
    pub fn angles(&self) -> [f64; 3] {
        let [a, b, c] = self.base_vectors();
        [
            angle_between(&b, &c),
            angle_between(&a, &c),
            angle_between(&a, &b),
        ]
    }

    /// Cell parameters (a, b, c, alpha, beta, gamma), angles in degrees.
    pub fn cellpar(&self) -> [f64; 6] {
        cellpar_of(&self.basis)
    }

    /// Scalar products (b.c, c.a, a.b).
    pub fn scalar_products(&self) -> [f64; 3] {
        let [a, b, c] = self.base_vectors();
        [b.dot(&c), c.dot(&a), a.dot(&b)]
    }

    /// Reciprocal cell with the 2π convention, B = 2π (A^-1)^T.
    ///
    /// Converts whatever space the cell is in to the other one, so taking the reciprocal twice
    /// gives back the original basis.
    pub fn reciprocal(&self) -> Result<Cell> {
        let inverse = self.inverse()?;
        Self::from_matrix_in((2.0 * PI) * inverse.transpose(), self.space.dual())
    }

    /// Cell spanned by `basis * op`, i.e. new vector j = sum_i op[(i, j)] * a_i.
    pub fn transformed(&self, op: &Matrix3<i32>) -> Result<Cell> {
        Self::from_matrix_in(self.basis * op.cast::<f64>(), self.space)
    }

    /// Niggli-reduced cell together with the integer transform, `reduced = self * transform`.
    pub fn reduce(&self) -> Result<(Cell, Matrix3<i32>)> {
        let (reduced, transform) = niggli_reduce(&self.basis)?;
        Ok((Self::from_matrix_in(reduced, self.space)?, transform))
    }

    /// Same as [`Cell::reduce`] with the reduction tolerance `eps_factor * |det|^(1/3)`.
    pub fn reduce_with_tolerance(&self, eps_factor: f64) -> Result<(Cell, Matrix3<i32>)> {
        let (reduced, transform) = niggli_reduce_with_tolerance(&self.basis, eps_factor)?;
        Ok((Self::from_matrix_in(reduced, self.space)?, transform))
    }

    /// Fractional coordinates to cartesian.
    pub fn frac_to_cart(&self, v_frac: &Vector3<f64>) -> Vector3<f64> {
        self.basis * v_frac
    }

    pub fn cart_to_frac(&self, v_cart: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.inverse()? * v_cart)
    }
}

/// Angle between two vectors in degrees.
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let cosine = u.dot(v) / (u.norm() * v.norm());
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Cell parameters of an arbitrary basis (columns).
pub fn cellpar_of(basis: &Matrix3<f64>) -> [f64; 6] {
    let a: Vector3<f64> = basis.column(0).into();
    let b: Vector3<f64> = basis.column(1).into();
    let c: Vector3<f64> = basis.column(2).into();
    [
        a.norm(),
        b.norm(),
        c.norm(),
        angle_between(&b, &c),
        angle_between(&a, &c),
        angle_between(&a, &b),
    ]
}
