//! Band paths: parsing of path strings, label resolution and proportional k-point sampling.

use std::fmt;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::{DEFAULT_NPOINTS, PATH_LENGTH_TOLERANCE};
use crate::errors::LatticeError;
use crate::lattice::cell::Cell;
use crate::symmetries::high_symmetry_points::{SpecialPoint, display_label, find_special_point};

/// Split a path string such as "GXMGRX,MR" into segments of labels.
///
/// Segments are separated by commas; a label is one uppercase letter optionally followed by
/// one digit. Any other character, or an empty segment, rejects the whole string.
pub fn parse_path_string(path: &str) -> Result<Vec<Vec<String>>> {
    path.split(',')
        .map(|segment| {
            tokenize_segment(segment).ok_or_else(|| LatticeError::InvalidPathSpec(path.to_string()))
        })
        .collect()
}

fn tokenize_segment(segment: &str) -> Option<Vec<String>> {
    let mut labels: Vec<String> = Vec::new();
    let mut chars = segment.chars().peekable();
    while let Some(ch) = chars.next() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        let mut label = ch.to_string();
        if let Some(digit) = chars.next_if(|next| next.is_ascii_digit()) {
            label.push(digit);
        }
        labels.push(label);
    }
    (!labels.is_empty()).then_some(labels)
}

/// One continuous piece of a band path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub labels: Vec<String>,
    /// Fractional reciprocal coordinates, one per label
    pub coordinates: Vec<Vector3<f64>>,
}

impl PathSegment {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A parsed path whose labels have been mapped to coordinates. Iterating is side-effect free
/// and can be repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPath {
    segments: Vec<PathSegment>,
}

impl ResolvedPath {
    pub fn segments(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    pub fn labels(&self) -> Vec<Vec<String>> {
        self.segments.iter().map(|s| s.labels.clone()).collect()
    }

    /// All labelled points of all segments, in order.
    pub fn points(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.segments.iter().flat_map(|s| s.coordinates.iter())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedPath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Parse `path` and look every label up in `special_points`.
pub fn resolve_kpt_path_string(path: &str, special_points: &[SpecialPoint]) -> Result<ResolvedPath> {
    let segments = parse_path_string(path)?
        .into_iter()
        .map(|labels| {
            let coordinates = labels
                .iter()
                .map(|label| {
                    find_special_point(special_points, label)
                        .map(|point| point.position)
                        .ok_or_else(|| LatticeError::UnknownSpecialPoint(label.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(PathSegment {
                labels,
                coordinates,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ResolvedPath { segments })
}

/// Sampled k-points together with the linear axis used for band structure plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampledPath {
    /// Fractional reciprocal coordinates
    pub kpts: Vec<Vector3<f64>>,
    /// Accumulated cartesian distance of every k-point
    pub x: Vec<f64>,
    /// Positions of the labelled points on the linear axis, one per vertex (jumps count once)
    pub special_x: Vec<f64>,
}

/// Distribute about `npoints` samples over the path, proportional to the cartesian length of
/// each piece. Jumps between segments have zero length, every labelled point is sampled.
pub fn paths_to_kpts(path: &ResolvedPath, reciprocal: &Matrix3<f64>, npoints: usize) -> SampledPath {
    let points: Vec<Vector3<f64>> = path.points().copied().collect();
    let Some(&last) = points.last() else {
        return SampledPath::default();
    };

    let dists: Vec<Vector3<f64>> = points.windows(2).map(|w| w[1] - w[0]).collect();
    let mut lengths: Vec<f64> = dists.iter().map(|d| (reciprocal * d).norm()).collect();

    let mut joins = Vec::new();
    let mut index = 0;
    for segment in path.segments.iter().take(path.len().saturating_sub(1)) {
        index += segment.len();
        lengths[index - 1] = 0.0;
        joins.push(index - 1);
    }
    let total: f64 = lengths.iter().sum();

    let mut sampled = SampledPath {
        special_x: vec![0.0],
        ..SampledPath::default()
    };
    let mut x0 = 0.0;
    for (i, ((start, d), &length)) in points.iter().zip(&dists).zip(&lengths).enumerate() {
        let remaining = total - x0;
        let n = if remaining.abs() < PATH_LENGTH_TOLERANCE {
            2
        } else {
            let share = length * (npoints as f64 - sampled.x.len() as f64) / remaining;
            share.round().max(2.0) as usize
        };
        for step in 0..n - 1 {
            let t = step as f64 / (n - 1) as f64;
            sampled.kpts.push(start + d * t);
            sampled.x.push(x0 + t * length);
        }
        x0 += length;
        if !joins.contains(&i) {
            sampled.special_x.push(x0);
        }
    }
    sampled.kpts.push(last);
    sampled.x.push(x0);
    sampled
}

/// Sampled band path through the Brillouin zone of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandPathSpec", into = "BandPathSpec")]
pub struct BandPath {
    cell: Cell,
    reciprocal: Matrix3<f64>,
    scaled_kpts: Vec<Vector3<f64>>,
    special_points: Vec<SpecialPoint>,
    labelseq: String,
    npoints: usize,
    linear_axis: Vec<f64>,
    special_axis: Vec<f64>,
    labels: Vec<String>,
}

/// Serialized form of a band path. Only the cell, path, special points and requested
/// sample count are read back; the path is then sampled again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPathSpec {
    pub cell: Cell,
    pub path: String,
    pub special_points: Vec<SpecialPoint>,
    #[serde(default = "default_npoints")]
    pub npoints: usize,
    #[serde(default)]
    pub scaled_kpts: Vec<Vector3<f64>>,
    #[serde(default)]
    pub linear_axis: Vec<f64>,
    #[serde(default)]
    pub special_axis: Vec<f64>,
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_npoints() -> usize {
    DEFAULT_NPOINTS
}

impl BandPath {
    /// Resolve `path` against `special_points` and sample about `npoints` k-points.
    pub fn new(
        cell: Cell,
        path: &str,
        special_points: Vec<SpecialPoint>,
        npoints: usize,
    ) -> Result<Self> {
        let resolved = resolve_kpt_path_string(path, &special_points)?;
        let labels = join_segment_labels(&resolved.labels());
        let reciprocal = *cell.reciprocal()?.basis();
        let sampled = paths_to_kpts(&resolved, &reciprocal, npoints);

        Ok(Self {
            cell,
            reciprocal,
            scaled_kpts: sampled.kpts,
            special_points,
            labelseq: path.to_string(),
            npoints,
            linear_axis: sampled.x,
            special_axis: sampled.special_x,
            labels,
        })
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    /// Reciprocal basis (columns, 2π convention) used for scaling.
    pub fn reciprocal(&self) -> &Matrix3<f64> {
        &self.reciprocal
    }

    /// k-points in fractional reciprocal coordinates.
    pub fn scaled_kpts(&self) -> &[Vector3<f64>] {
        &self.scaled_kpts
    }

    /// k-points in cartesian coordinates.
    pub fn kpts(&self) -> Vec<Vector3<f64>> {
        self.scaled_kpts.iter().map(|k| self.reciprocal * k).collect()
    }

    pub fn special_points(&self) -> &[SpecialPoint] {
        &self.special_points
    }

    /// The label sequence, e.g. "GXMGRX,MR".
    pub fn path(&self) -> &str {
        &self.labelseq
    }

    /// The path split into labelled segments.
    pub fn segments(&self) -> Result<ResolvedPath> {
        resolve_kpt_path_string(&self.labelseq, &self.special_points)
    }

    /// Number of k-points requested at construction.
    pub fn npoints(&self) -> usize {
        self.npoints
    }

    /// Linear axis of every k-point, the positions of the labelled points and their labels.
    pub fn linear_kpoint_axis(&self) -> (&[f64], &[f64], &[String]) {
        (&self.linear_axis, &self.special_axis, &self.labels)
    }

    pub fn len(&self) -> usize {
        self.scaled_kpts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scaled_kpts.is_empty()
    }
}

impl TryFrom<BandPathSpec> for BandPath {
    type Error = LatticeError;

    fn try_from(spec: BandPathSpec) -> Result<Self> {
        Self::new(spec.cell, &spec.path, spec.special_points, spec.npoints)
    }
}

impl From<BandPath> for BandPathSpec {
    fn from(path: BandPath) -> Self {
        BandPathSpec {
            cell: path.cell,
            path: path.labelseq,
            special_points: path.special_points,
            npoints: path.npoints,
            scaled_kpts: path.scaled_kpts,
            linear_axis: path.linear_axis,
            special_axis: path.special_axis,
            labels: path.labels,
        }
    }
}

impl fmt::Display for BandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.special_points.iter().map(|p| p.display_label()).collect();
        let [a, b, c, alpha, beta, gamma] = self.cell.cellpar();
        write!(
            f,
            "BandPath(path='{}', cell=[{:.4}, {:.4}, {:.4}, {:.2}, {:.2}, {:.2}], special_points={{{}}}, kpts=[{} kpoints])",
            self.labelseq,
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
            labels.join(""),
            self.scaled_kpts.len()
        )
    }
}

/// One label per vertex of the linear axis; the vertices at a segment jump read "X,M".
fn join_segment_labels(segments: &[Vec<String>]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        for (j, label) in segment.iter().enumerate() {
            let label = display_label(label).to_string();
            if i > 0 && j == 0 {
                if let Some(previous) = labels.last_mut() {
                    previous.push(',');
                    previous.push_str(&label);
                    continue;
                }
            }
            labels.push(label);
        }
    }
    labels
}
