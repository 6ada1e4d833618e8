#[cfg(test)]
mod _tests_high_symmetry_points {
    use super::super::high_symmetry_points::*;
    use crate::lattice::lattice_construction::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("G"), "Γ");
        assert_eq!(display_label("Z1"), "Z1");
        assert_eq!(SpecialPoint::new("G", Vector3::zeros()).display_label(), "Γ");
    }

    #[test]
    fn test_find_special_point() {
        let points = face_centered_cubic_lattice(4.0).unwrap().special_points();
        let k = find_special_point(&points, "K").unwrap();
        assert_relative_eq!(k.position, Vector3::new(0.375, 0.375, 0.75), epsilon = TOL);
        assert!(find_special_point(&points, "Q").is_none());
    }

    #[test]
    fn test_fcc_points() {
        let lattice = face_centered_cubic_lattice(4.0).unwrap();
        assert_eq!(lattice.kpoint_labels(), vec!["G", "K", "L", "U", "W", "X"]);
        assert_eq!(lattice.special_point("X"), Some(Vector3::new(0.5, 0.0, 0.5)));
        assert_eq!(lattice.special_point("L"), Some(Vector3::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_bct_points_depend_on_variant() {
        let bct1 = body_centered_tetragonal_lattice(6.0, 5.0).unwrap();
        let eta = 0.25 * (1.0 + 25.0 / 36.0);
        assert_relative_eq!(
            bct1.special_point("Z").unwrap(),
            Vector3::new(eta, eta, -eta),
            epsilon = TOL
        );
        assert_relative_eq!(
            bct1.special_point("Z1").unwrap(),
            Vector3::new(-eta, 1.0 - eta, eta),
            epsilon = TOL
        );

        let bct2 = body_centered_tetragonal_lattice(3.0, 5.0).unwrap();
        let eta = 0.25 * (1.0 + 9.0 / 25.0);
        let zeta = 0.5 * 9.0 / 25.0;
        assert_relative_eq!(
            bct2.special_point("S").unwrap(),
            Vector3::new(-eta, eta, eta),
            epsilon = TOL
        );
        assert_relative_eq!(
            bct2.special_point("Y").unwrap(),
            Vector3::new(-zeta, zeta, 0.5),
            epsilon = TOL
        );
        assert!(bct2.special_point("M").is_none());
    }

    #[test]
    fn test_orcf_points() {
        let lattice = face_centered_orthorhombic_lattice(1.0, 2.0, 3.0).unwrap();
        let zeta = 0.25 * (1.0 + 1.0 / 4.0 - 1.0 / 9.0);
        let eta = 0.25 * (1.0 + 1.0 / 4.0 + 1.0 / 9.0);
        assert_relative_eq!(
            lattice.special_point("A").unwrap(),
            Vector3::new(0.5, 0.5 + zeta, zeta),
            epsilon = TOL
        );
        assert_relative_eq!(
            lattice.special_point("X").unwrap(),
            Vector3::new(0.0, eta, eta),
            epsilon = TOL
        );
    }

    #[test]
    fn test_special_point_serialization() {
        let point = SpecialPoint::new("X", Vector3::new(0.0, 0.5, 0.0));
        let json = serde_json::to_string(&point).unwrap();
        let back: SpecialPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
