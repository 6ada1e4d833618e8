// Symmetries module: high-symmetry points of the Bravais variants and band paths
// through the Brillouin zone

// ======================== MODULE DECLARATIONS ========================
pub mod high_symmetry_paths;
pub mod high_symmetry_points;

mod _tests_high_symmetry_paths;
mod _tests_high_symmetry_points;

// ======================== HIGH SYMMETRY POINTS ========================
pub use high_symmetry_points::{
    SpecialPoint,       // struct - labelled point in fractional reciprocal coordinates
    display_label,      // fn(label: &str) -> &str - "G" is shown as the Greek Gamma
    find_special_point, // fn(points: &[SpecialPoint], label: &str) -> Option<&SpecialPoint>
};

// ======================== BAND PATHS ========================
pub use high_symmetry_paths::{
    BandPath,                // struct - sampled k-points with labels and the linear axis
    BandPathSpec,            // struct - serialized form, sampled again on deserialization
    PathSegment,             // struct - one continuous run of labels with coordinates
    ResolvedPath,            // struct - segments of a path string, restartable iteration
    SampledPath,             // struct - raw output of the sampler
    parse_path_string,       // fn(path: &str) -> Result<Vec<Vec<String>>> - "GX,MR" -> [[G, X], [M, R]]
    paths_to_kpts,           // fn(path, reciprocal, npoints) -> SampledPath - proportional sampling
    resolve_kpt_path_string, // fn(path, special_points) -> Result<ResolvedPath>
};

// BandPath impl methods:
//   new(cell, path, special_points, npoints) -> Result<Self>      - resolve and sample
//   scaled_kpts(&self) -> &[Vector3<f64>]                          - fractional reciprocal coordinates
//   kpts(&self) -> Vec<Vector3<f64>>                               - cartesian coordinates
//   linear_kpoint_axis(&self) -> (&[f64], &[f64], &[String])      - x, special x, labels
//   npoints(&self) -> usize                                        - requested sample count
