#[cfg(test)]
mod _tests_high_symmetry_paths {
    use super::super::high_symmetry_paths::*;
    use super::super::high_symmetry_points::SpecialPoint;
    use crate::errors::LatticeError;
    use crate::lattice::lattice_construction::cubic_lattice;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    const TOL: f64 = 1e-12;

    fn cubic_points() -> Vec<SpecialPoint> {
        vec![
            SpecialPoint::new("G", Vector3::new(0.0, 0.0, 0.0)),
            SpecialPoint::new("X", Vector3::new(0.0, 0.5, 0.0)),
            SpecialPoint::new("M", Vector3::new(0.5, 0.5, 0.0)),
            SpecialPoint::new("R", Vector3::new(0.5, 0.5, 0.5)),
        ]
    }

    fn labels(segments: &[&[&str]]) -> Vec<Vec<String>> {
        segments
            .iter()
            .map(|segment| segment.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_segments() {
        assert_eq!(
            parse_path_string("GXMGRX,MR").unwrap(),
            labels(&[&["G", "X", "M", "G", "R", "X"], &["M", "R"]])
        );
        assert_eq!(
            parse_path_string("GZ1M").unwrap(),
            labels(&[&["G", "Z1", "M"]])
        );
        assert_eq!(parse_path_string("R").unwrap(), labels(&[&["R"]]));
    }

    #[test]
    fn test_parse_rejects_malformed_paths() {
        for path in ["gx", "GX,,M", "", "G11", "G X", "GX,"] {
            assert!(
                matches!(parse_path_string(path), Err(LatticeError::InvalidPathSpec(_))),
                "{path:?} accepted"
            );
        }
    }

    #[test]
    fn test_resolve_unknown_label() {
        let err = resolve_kpt_path_string("GXQ", &cubic_points()).unwrap_err();
        assert_eq!(err, LatticeError::UnknownSpecialPoint("Q".to_string()));
    }

    #[test]
    fn test_resolve_is_restartable() {
        let resolved = resolve_kpt_path_string("GX,MR", &cubic_points()).unwrap();
        assert_eq!(resolved.len(), 2);
        let first: Vec<_> = resolved.points().copied().collect();
        let second: Vec<_> = resolved.points().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(resolved.labels(), labels(&[&["G", "X"], &["M", "R"]]));
    }

    #[test]
    fn test_sampling_is_proportional() {
        let resolved = resolve_kpt_path_string("GXM", &cubic_points()).unwrap();
        let sampled = paths_to_kpts(&resolved, &Matrix3::identity(), 11);

        assert_eq!(sampled.kpts.len(), 11);
        assert_eq!(sampled.x.len(), 11);
        assert_relative_eq!(sampled.kpts[0], Vector3::zeros(), epsilon = TOL);
        assert_relative_eq!(sampled.kpts[5], Vector3::new(0.0, 0.5, 0.0), epsilon = TOL);
        assert_relative_eq!(sampled.kpts[10], Vector3::new(0.5, 0.5, 0.0), epsilon = TOL);
        assert_eq!(sampled.special_x.len(), 3);
        assert_relative_eq!(sampled.special_x[1], 0.5, epsilon = TOL);
        assert_relative_eq!(sampled.special_x[2], 1.0, epsilon = TOL);
        assert!(sampled.x.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_jump_has_zero_length() {
        let resolved = resolve_kpt_path_string("GX,M", &cubic_points()).unwrap();
        let sampled = paths_to_kpts(&resolved, &Matrix3::identity(), 10);

        // The isolated M is sampled once, right after X
        let m = Vector3::new(0.5, 0.5, 0.0);
        let count = sampled.kpts.iter().filter(|k| (*k - m).norm() < TOL).count();
        assert_eq!(count, 1);
        assert_eq!(sampled.kpts.last(), Some(&m));

        let n = sampled.x.len();
        assert_relative_eq!(sampled.x[n - 1], sampled.x[n - 2], epsilon = TOL);
        assert_eq!(sampled.special_x.len(), 2);
    }

    #[test]
    fn test_single_point_path() {
        let resolved = resolve_kpt_path_string("G", &cubic_points()).unwrap();
        let sampled = paths_to_kpts(&resolved, &Matrix3::identity(), 10);
        assert_eq!(sampled.kpts, vec![Vector3::zeros()]);
        assert_eq!(sampled.special_x, vec![0.0]);
    }

    #[test]
    fn test_bandpath_linear_axis() {
        let lattice = cubic_lattice(1.0).unwrap();
        let path = lattice.bandpath(None, 50, None).unwrap();
        assert_eq!(path.path(), "GXMGRX,MR");

        let (x, special_x, labels) = path.linear_kpoint_axis();
        assert_eq!(x.len(), path.len());
        assert_eq!(special_x.len(), labels.len());
        assert_eq!(labels, vec!["Γ", "X", "M", "Γ", "R", "X,M", "R"]);
        assert_relative_eq!(special_x[0], 0.0);
        assert_relative_eq!(*special_x.last().unwrap(), *x.last().unwrap(), epsilon = TOL);
    }

    #[test]
    fn test_bandpath_cartesian_points() {
        let lattice = cubic_lattice(2.0).unwrap();
        let path = lattice.bandpath(Some("GR"), 5, None).unwrap();
        let kpts = path.kpts();
        // 2π/a scaling of the reciprocal basis
        let expected = Vector3::new(1.0, 1.0, 1.0) * std::f64::consts::PI / 2.0;
        assert_relative_eq!(kpts[kpts.len() - 1], expected, epsilon = 1e-12);
        assert!(path.to_string().contains("path='GR'"));
        assert_eq!(path.segments().unwrap().len(), 1);
    }

    #[test]
    fn test_bandpath_serde_samples_again() {
        let lattice = cubic_lattice(2.0).unwrap();
        let path = lattice.bandpath(Some("GXM,R"), 20, None).unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: BandPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.npoints(), 20);

        // Only the inputs are read back
        let mut value = serde_json::to_value(&path).unwrap();
        value["scaled_kpts"] = serde_json::json!([]);
        value["labels"] = serde_json::json!(["Q"]);
        let back: BandPath = serde_json::from_value(value).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_bandpath_deserialization_rejects_bad_paths() {
        let lattice = cubic_lattice(2.0).unwrap();
        let path = lattice.bandpath(Some("GX"), 10, None).unwrap();
        let value = serde_json::to_value(&path).unwrap();

        for (bad, message) in [("G-X", "invalid path string"), ("GQ", "unknown special point 'Q'")] {
            let mut value = value.clone();
            value["path"] = serde_json::json!(bad);
            let err = serde_json::from_value::<BandPath>(value).unwrap_err();
            assert!(err.to_string().contains(message), "{err}");
        }

        let mut value = value.clone();
        value["cell"]["basis"] = serde_json::to_value(Matrix3::<f64>::zeros()).unwrap();
        assert!(serde_json::from_value::<BandPath>(value).is_err());
    }
}
