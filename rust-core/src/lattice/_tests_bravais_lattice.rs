#[cfg(test)]
mod _tests_bravais_lattice {
    use super::super::bravais_lattice::BravaisLattice;
    use super::super::lattice_construction::*;
    use super::super::lattice_types::BravaisType;
    use crate::errors::LatticeError;
    use crate::symmetries::high_symmetry_paths::parse_path_string;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};
    use std::collections::BTreeSet;

    const TOL: f64 = 1e-10;

    /// One lattice per variant, with the variant it must resolve to.
    fn variant_representatives() -> Vec<(BravaisLattice, &'static str)> {
        let sin60 = 60f64.to_radians().sin();
        let cos60 = 60f64.to_radians().cos();
        // b cos(alpha) / c + b^2 sin^2(alpha) / a^2 = 1
        let mclc4_a = (9.0 * sin60 * sin60 / (1.0 - 3.0 * cos60 / 5.0)).sqrt();

        vec![
            (cubic_lattice(5.0).unwrap(), "CUB"),
            (face_centered_cubic_lattice(4.0).unwrap(), "FCC"),
            (body_centered_cubic_lattice(3.0).unwrap(), "BCC"),
            (tetragonal_lattice(3.0, 5.0).unwrap(), "TET"),
            (body_centered_tetragonal_lattice(6.0, 5.0).unwrap(), "BCT1"),
            (body_centered_tetragonal_lattice(3.0, 5.0).unwrap(), "BCT2"),
            (orthorhombic_lattice(3.0, 4.0, 5.0).unwrap(), "ORC"),
            (face_centered_orthorhombic_lattice(1.0, 2.0, 3.0).unwrap(), "ORCF1"),
            (face_centered_orthorhombic_lattice(4.0, 5.0, 6.0).unwrap(), "ORCF2"),
            (face_centered_orthorhombic_lattice(2.4, 3.0, 4.0).unwrap(), "ORCF3"),
            (body_centered_orthorhombic_lattice(3.0, 4.0, 5.0).unwrap(), "ORCI"),
            (base_centered_orthorhombic_lattice(3.0, 4.0, 5.0).unwrap(), "ORCC"),
            (hexagonal_lattice(3.0, 5.0).unwrap(), "HEX"),
            (rhombohedral_lattice(3.0, 55.0).unwrap(), "RHL1"),
            (rhombohedral_lattice(3.0, 105.0).unwrap(), "RHL2"),
            (monoclinic_lattice(3.0, 4.0, 5.0, 55.0).unwrap(), "MCL"),
            (base_centered_monoclinic_lattice(3.0, 4.0, 5.0, 80.0).unwrap(), "MCLC1"),
            (base_centered_monoclinic_lattice(3.0 * sin60, 3.0, 5.0, 60.0).unwrap(), "MCLC2"),
            (base_centered_monoclinic_lattice(4.0, 3.0, 5.0, 70.0).unwrap(), "MCLC3"),
            (base_centered_monoclinic_lattice(mclc4_a, 3.0, 5.0, 60.0).unwrap(), "MCLC4"),
            (base_centered_monoclinic_lattice(4.0, 4.0, 4.4, 50.0).unwrap(), "MCLC5"),
            (triclinic_lattice(3.0, 4.0, 5.0, 60.0, 70.0, 80.0).unwrap(), "TRI1a"),
            (triclinic_lattice(3.0, 4.0, 5.0, 100.0, 110.0, 120.0).unwrap(), "TRI1b"),
            (
                triclinic_lattice(
                    1.0663761262, 0.8479368805, 0.7218844646, 79.3509632587, 69.6779629835,
                    86.3203555996,
                )
                .unwrap(),
                "TRI2a",
            ),
            (
                triclinic_lattice(
                    1.0175242566, 0.8886467719, 0.7218844646, 110.3220370165, 100.6490367413,
                    86.3203555996,
                )
                .unwrap(),
                "TRI2b",
            ),
        ]
    }

    #[test]
    fn test_every_variant_is_reachable() {
        let mut reached = BTreeSet::new();
        for (lattice, expected) in variant_representatives() {
            assert_eq!(lattice.variant().name, expected, "{}", lattice.repr());
            reached.insert(expected);
        }
        for kind in BravaisType::ALL {
            for variant in kind.variants() {
                assert!(reached.contains(variant.name), "{} not reached", variant.name);
            }
        }
    }

    #[test]
    fn test_special_points_match_labels() {
        for (lattice, _) in variant_representatives() {
            let labels = lattice.kpoint_labels();
            let points = lattice.special_points_array();
            assert_eq!(points.len(), labels.len(), "{}", lattice.variant().name);
            assert_eq!(labels[0], "G");
            assert_eq!(points[0], Vector3::zeros());
            for point in &points {
                assert!(point.iter().all(|x| x.is_finite()));
            }
        }
    }

    #[test]
    fn test_default_paths_use_declared_labels() {
        for (lattice, _) in variant_representatives() {
            let labels = lattice.kpoint_labels();
            for segment in parse_path_string(lattice.special_path()).unwrap() {
                for label in segment {
                    assert!(
                        labels.contains(&label.as_str()),
                        "{}: {} not declared",
                        lattice.variant().name,
                        label
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_bandpath_starts_and_ends_on_labels() {
        for (lattice, _) in variant_representatives() {
            let path = lattice.bandpath(None, 50, None).unwrap();
            let segments = parse_path_string(lattice.special_path()).unwrap();
            let first = &segments[0][0];
            let last = segments.last().and_then(|s| s.last()).unwrap();

            let kpts = path.scaled_kpts();
            assert_relative_eq!(kpts[0], lattice.special_point(first).unwrap(), epsilon = TOL);
            assert_relative_eq!(
                kpts[kpts.len() - 1],
                lattice.special_point(last).unwrap(),
                epsilon = TOL
            );
            assert!(path.len() >= 45, "{}: {} points", lattice.repr(), path.len());
        }
    }

    #[test]
    fn test_cubic_cell() {
        let lattice = cubic_lattice(5.0).unwrap();
        let cell = lattice.to_cell().unwrap();
        assert_relative_eq!(*cell.basis(), Matrix3::identity() * 5.0, epsilon = TOL);
        assert_eq!(lattice.special_point("X"), Some(Vector3::new(0.0, 0.5, 0.0)));
        assert_eq!(lattice.special_point("Q"), None);
    }

    #[test]
    fn test_canonical_cells_have_expected_volumes() {
        let (a, b, c) = (3.0, 4.0, 5.0);
        let cases = [
            (face_centered_orthorhombic_lattice(a, b, c).unwrap(), a * b * c / 4.0),
            (body_centered_orthorhombic_lattice(a, b, c).unwrap(), a * b * c / 2.0),
            (base_centered_orthorhombic_lattice(a, b, c).unwrap(), a * b * c / 2.0),
            (body_centered_tetragonal_lattice(a, c).unwrap(), a * a * c / 2.0),
            (hexagonal_lattice(a, c).unwrap(), a * a * c * 3f64.sqrt() / 2.0),
        ];
        for (lattice, volume) in cases {
            assert_relative_eq!(lattice.to_cell().unwrap().volume(), volume, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cycled_cell() {
        let lattice = monoclinic_lattice(3.0, 4.0, 5.0, 70.0).unwrap();
        let expected = [4.0, 5.0, 3.0, 90.0, 90.0, 70.0];
        for (x, y) in lattice.cellpar_cycled(1).unwrap().iter().zip(expected) {
            assert_relative_eq!(*x, y, epsilon = 1e-10);
        }

        let canonical = lattice.to_cell().unwrap();
        assert_eq!(lattice.to_cell_cycled(0).unwrap(), canonical);
        assert_eq!(lattice.to_cell_cycled(3).unwrap(), canonical);
        let cycled = lattice.to_cell_cycled(2).unwrap();
        assert_relative_eq!(cycled.determinant(), canonical.determinant(), epsilon = 1e-10);
        assert_eq!(cycled.base_vector(0), canonical.base_vector(2));
    }

    #[test]
    fn test_rhombohedral_cell_parameters() {
        let cellpar = rhombohedral_lattice(3.0, 55.0).unwrap().cellpar().unwrap();
        for length in &cellpar[..3] {
            assert_relative_eq!(*length, 3.0, epsilon = TOL);
        }
        for angle in &cellpar[3..] {
            assert_relative_eq!(*angle, 55.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_bct_variant_boundary() {
        assert_eq!(
            body_centered_tetragonal_lattice(5.0, 4.999).unwrap().variant().name,
            "BCT1"
        );
        assert_eq!(
            body_centered_tetragonal_lattice(5.0, 5.001).unwrap().variant().name,
            "BCT2"
        );
    }

    #[test]
    fn test_orthorhombic_ordering_is_enforced() {
        assert!(matches!(
            orthorhombic_lattice(3.0, 2.0, 1.0),
            Err(LatticeError::UnconventionalLattice(_))
        ));
        assert!(matches!(
            base_centered_orthorhombic_lattice(4.0, 3.0, 5.0),
            Err(LatticeError::UnconventionalLattice(_))
        ));
        assert!(matches!(
            base_centered_monoclinic_lattice(3.0, 4.0, 5.0, 95.0),
            Err(LatticeError::UnconventionalLattice(_))
        ));
        assert!(matches!(
            triclinic_lattice(3.0, 4.0, 5.0, 70.0, 80.0, 90.0),
            Err(LatticeError::UnconventionalLattice(_))
        ));
    }

    #[test]
    fn test_parameter_names_must_match() {
        let err = BravaisLattice::new(BravaisType::Cub, &[("b", 3.0)]).unwrap_err();
        assert!(matches!(err, LatticeError::ParameterMismatch { .. }));

        assert!(matches!(
            BravaisLattice::new(BravaisType::Tet, &[("a", 3.0)]),
            Err(LatticeError::ParameterMismatch { .. })
        ));
        assert!(matches!(
            BravaisLattice::new(BravaisType::Hex, &[("a", 3.0), ("c", 5.0), ("b", 4.0)]),
            Err(LatticeError::ParameterMismatch { .. })
        ));

        // Order does not matter
        let lattice = BravaisLattice::new(BravaisType::Tet, &[("c", 5.0), ("a", 3.0)]).unwrap();
        assert_eq!(lattice.values(), &[3.0, 5.0]);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let invalid = [
            cubic_lattice(0.0),
            cubic_lattice(-1.0),
            cubic_lattice(f64::NAN),
            rhombohedral_lattice(3.0, 120.0),
            rhombohedral_lattice(3.0, 0.0),
            monoclinic_lattice(3.0, 4.0, 5.0, 180.0),
            triclinic_lattice(3.0, 4.0, 5.0, 10.0, 10.0, 100.0),
        ];
        for result in invalid {
            assert!(
                matches!(result, Err(LatticeError::InvalidParameter(_))),
                "{:?}",
                result
            );
        }
    }

    #[test]
    fn test_get_accessor() {
        let lattice = monoclinic_lattice(3.0, 4.0, 5.0, 55.0).unwrap();
        assert_eq!(lattice.get("c"), Some(5.0));
        assert_eq!(lattice.get("alpha"), Some(55.0));
        assert_eq!(lattice.get("beta"), None);
        assert_eq!(
            lattice.parameters(),
            vec![("a", 3.0), ("b", 4.0), ("c", 5.0), ("alpha", 55.0)]
        );
    }

    #[test]
    fn test_display() {
        let lattice = body_centered_tetragonal_lattice(6.0, 5.0).unwrap();
        assert_eq!(lattice.repr(), "BCT(a=6, c=5)");
        let text = lattice.to_string();
        assert!(text.starts_with("BCT(a=6, c=5)"));
        assert!(text.contains("Variant name: BCT1"));
        assert!(text.contains("Default path: GXMGZPNZ1M,XP"));
        assert!(text.contains("Z1"));
    }

    #[test]
    fn test_serde_round_trip() {
        let lattice = base_centered_monoclinic_lattice(3.0, 4.0, 5.0, 80.0).unwrap();
        let json = serde_json::to_string(&lattice).unwrap();
        assert!(json.contains("\"MCLC\""));
        let back: BravaisLattice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lattice);
    }

    #[test]
    fn test_deserialization_validates() {
        let lattice: BravaisLattice =
            serde_json::from_str(r#"{"lattice": "TET", "parameters": {"a": 3.0, "c": 5.0}}"#)
                .unwrap();
        assert_eq!(lattice.eps(), crate::config::DEFAULT_EPS);

        let unconventional = serde_json::from_str::<BravaisLattice>(
            r#"{"lattice": "ORC", "parameters": {"a": 3.0, "b": 2.0, "c": 1.0}}"#,
        );
        assert!(unconventional.is_err());

        let missing = serde_json::from_str::<BravaisLattice>(
            r#"{"lattice": "ORC", "parameters": {"a": 3.0}}"#,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn test_custom_special_points_in_bandpath() {
        use crate::symmetries::high_symmetry_points::SpecialPoint;

        let lattice = cubic_lattice(2.0).unwrap();
        let points = vec![
            SpecialPoint::new("G", Vector3::zeros()),
            SpecialPoint::new("A", Vector3::new(0.25, 0.0, 0.0)),
        ];
        let path = lattice.bandpath(Some("GA"), 5, Some(points)).unwrap();
        assert_eq!(path.len(), 5);
        assert_relative_eq!(path.scaled_kpts()[4], Vector3::new(0.25, 0.0, 0.0), epsilon = TOL);

        assert!(matches!(
            lattice.bandpath(Some("GA"), 5, None),
            Err(LatticeError::UnknownSpecialPoint(_))
        ));
    }
}
