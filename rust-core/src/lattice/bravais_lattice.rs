use std::collections::BTreeMap;
use std::fmt;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::DEFAULT_EPS;
use crate::errors::LatticeError;
use crate::lattice::cell::Cell;
use crate::lattice::lattice_families::{LatticeFamily, Variant, is_length_parameter};
use crate::lattice::lattice_types::BravaisType;
use crate::symmetries::high_symmetry_paths::BandPath;
use crate::symmetries::high_symmetry_points::SpecialPoint;

/// A Bravais lattice: family, validated parameters, tolerance and resolved variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatticeSpec", into = "LatticeSpec")]
pub struct BravaisLattice {
    kind: BravaisType,
    /// Values in the order of the family's parameter names.
    parameters: Vec<f64>,
    eps: f64,
    variant: &'static Variant,
}

/// Serialized form of a lattice: type, named parameters and tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeSpec {
    pub lattice: BravaisType,
    pub parameters: BTreeMap<String, f64>,
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Informational only; the variant is always recomputed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

impl BravaisLattice {
    /// Build a lattice from named parameters with the default tolerance.
    ///
    /// The names must match the family's parameter names exactly, in any order.
    pub fn new(kind: BravaisType, parameters: &[(&str, f64)]) -> Result<Self> {
        Self::with_eps(kind, parameters, DEFAULT_EPS)
    }

    pub fn with_eps(kind: BravaisType, parameters: &[(&str, f64)], eps: f64) -> Result<Self> {
        let family = kind.family();
        let mismatch = || LatticeError::ParameterMismatch {
            family: kind.code().to_string(),
            expected: family.parameters.join(", "),
            got: parameters
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        };

        if parameters.len() != family.parameters.len() {
            return Err(mismatch());
        }
        let values = family
            .parameters
            .iter()
            .map(|name| {
                parameters
                    .iter()
                    .find(|(given, _)| given == name)
                    .map(|&(_, value)| value)
                    .ok_or_else(mismatch)
            })
            .collect::<Result<Vec<f64>>>()?;

        Self::from_values(kind, values, eps)
    }

    /// Build a lattice from values ordered like `kind.parameter_names()`.
    pub fn from_values(kind: BravaisType, values: Vec<f64>, eps: f64) -> Result<Self> {
        let family = kind.family();
        if values.len() != family.parameters.len() {
            return Err(LatticeError::ParameterMismatch {
                family: kind.code().to_string(),
                expected: family.parameters.join(", "),
                got: format!("{} values", values.len()),
            });
        }
        validate_parameters(family, &values)?;

        let name = (family.variant_name)(&values, eps)?;
        let variant = family.variant(name).ok_or_else(|| {
            LatticeError::InvalidParameter(format!("{} has no variant {}", kind.code(), name))
        })?;

        let lattice = Self {
            kind,
            parameters: values,
            eps,
            variant,
        };
        // Parameters that do not span a cell (e.g. impossible triclinic angles)
        lattice
            .to_cell()
            .map_err(|err| LatticeError::InvalidParameter(format!("{}: {}", lattice.repr(), err)))?;
        debug_assert_eq!(
            lattice.special_points_array().len(),
            lattice.kpoint_labels().len()
        );
        Ok(lattice)
    }

    pub fn kind(&self) -> BravaisType {
        self.kind
    }

    /// Family code, e.g. "BCT".
    pub fn name(&self) -> &'static str {
        self.kind.code()
    }

    pub fn long_name(&self) -> &'static str {
        self.kind.long_name()
    }

    pub fn family(&self) -> &'static LatticeFamily {
        self.kind.family()
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn variant(&self) -> &'static Variant {
        self.variant
    }

    /// Parameter value by name ("a", "alpha", ...).
    pub fn get(&self, name: &str) -> Option<f64> {
        self.family()
            .parameters
            .iter()
            .position(|&parameter| parameter == name)
            .map(|index| self.parameters[index])
    }

    /// Named parameters in declaration order.
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        self.family()
            .parameters
            .iter()
            .copied()
            .zip(self.parameters.iter().copied())
            .collect()
    }

    pub fn values(&self) -> &[f64] {
        &self.parameters
    }

    pub fn kpoint_labels(&self) -> Vec<&'static str> {
        self.variant.kpoint_labels()
    }

    /// Default band path of the variant.
    pub fn special_path(&self) -> &'static str {
        self.variant.special_path
    }

    /// Canonical cell of this lattice.
    pub fn to_cell(&self) -> Result<Cell> {
        Cell::from_matrix((self.family().cell)(&self.parameters))
    }

    pub fn cellpar(&self) -> Result<[f64; 6]> {
        Ok(self.to_cell()?.cellpar())
    }

    /// Canonical cell with the basis vectors shifted cyclically: vector `i` of the result is
    /// canonical vector `(i + cycle) % 3`. The handedness is kept.
    pub fn to_cell_cycled(&self, cycle: usize) -> Result<Cell> {
        let basis = (self.family().cell)(&self.parameters);
        let columns = [0, 1, 2].map(|i| basis.column((i + cycle) % 3).into_owned());
        Cell::from_matrix(Matrix3::from_columns(&columns))
    }

    pub fn cellpar_cycled(&self, cycle: usize) -> Result<[f64; 6]> {
        Ok(self.to_cell_cycled(cycle)?.cellpar())
    }

    /// Special point coordinates ordered like [`Self::kpoint_labels`].
    pub fn special_points_array(&self) -> Vec<Vector3<f64>> {
        (self.family().special_points)(&self.parameters, self.variant)
    }

    pub fn special_points(&self) -> Vec<SpecialPoint> {
        self.kpoint_labels()
            .into_iter()
            .zip(self.special_points_array())
            .map(|(label, position)| SpecialPoint::new(label, position))
            .collect()
    }

    pub fn special_point(&self, label: &str) -> Option<Vector3<f64>> {
        self.kpoint_labels()
            .into_iter()
            .position(|candidate| candidate == label)
            .map(|index| self.special_points_array()[index])
    }

    /// Sample a band path through the Brillouin zone of the canonical cell.
    ///
    /// `path` defaults to the variant's default path, `special_points` to this lattice's points.
    pub fn bandpath(
        &self,
        path: Option<&str>,
        npoints: usize,
        special_points: Option<Vec<SpecialPoint>>,
    ) -> Result<BandPath> {
        let special_points = special_points.unwrap_or_else(|| self.special_points());
        let path = path.unwrap_or(self.variant.special_path);
        BandPath::new(self.to_cell()?, path, special_points, npoints)
    }

    /// Short form, e.g. "BCT(a=3, c=5)".
    pub fn repr(&self) -> String {
        let parameters = self
            .parameters()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name(), parameters)
    }
}

fn validate_parameters(family: &LatticeFamily, values: &[f64]) -> Result<()> {
    for (&name, &value) in family.parameters.iter().zip(values) {
        if !value.is_finite() {
            return Err(LatticeError::InvalidParameter(format!(
                "{}: {name} must be finite, got {value}",
                family.kind
            )));
        }
        if is_length_parameter(name) {
            if value <= 0.0 {
                return Err(LatticeError::InvalidParameter(format!(
                    "{}: {name} must be positive, got {value}",
                    family.kind
                )));
            }
        } else if !(value > 0.0 && value < 180.0) {
            return Err(LatticeError::InvalidParameter(format!(
                "{}: {name} must lie strictly between 0 and 180 degrees, got {value}",
                family.kind
            )));
        }
    }

    if family.kind == BravaisType::Rhl && values[1] >= 120.0 {
        return Err(LatticeError::InvalidParameter(format!(
            "need alpha < 120 degrees, got {}",
            values[1]
        )));
    }
    Ok(())
}

impl fmt::Display for BravaisLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.repr())?;
        for line in self.variant.to_string().lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "  Special point coordinates:")?;
        for point in self.special_points() {
            writeln!(
                f,
                "    {:2} {:7.4} {:7.4} {:7.4}",
                point.label, point.position[0], point.position[1], point.position[2]
            )?;
        }
        Ok(())
    }
}

impl TryFrom<LatticeSpec> for BravaisLattice {
    type Error = LatticeError;

    fn try_from(spec: LatticeSpec) -> Result<Self> {
        let parameters: Vec<(&str, f64)> = spec
            .parameters
            .iter()
            .map(|(name, &value)| (name.as_str(), value))
            .collect();
        Self::with_eps(spec.lattice, &parameters, spec.eps)
    }
}

impl From<BravaisLattice> for LatticeSpec {
    fn from(lattice: BravaisLattice) -> Self {
        LatticeSpec {
            lattice: lattice.kind,
            parameters: lattice
                .parameters()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            eps: lattice.eps,
            variant: Some(lattice.variant.name.to_string()),
        }
    }
}
