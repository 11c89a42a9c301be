use glam::{Mat4, Vec3, Vec4};
use lorentz_view::core::geometry::spherical::{inverse_translation, FLAT_EPSILON};
use lorentz_view::core::geometry::{Euclidean3, GeometryError, Manifold, Spherical3};

fn sample_points() -> Vec<Vec3> {
    let mut points = Vec::new();
    for &radius in &[FLAT_EPSILON, 0.01, 0.3, 1.0, 2.5, 3.0] {
        for direction in [
            Vec3::X,
            Vec3::NEG_Y,
            Vec3::new(1.0, 2.0, -3.0).normalize(),
            Vec3::new(-0.5, 0.25, 0.8).normalize(),
        ] {
            points.push(direction * radius);
        }
    }
    points
}

#[test]
fn points_near_origin_embed_flat() {
    for p in [Vec3::ZERO, Vec3::new(1e-5, 0.0, 0.0), Vec3::new(2e-5, -3e-5, 5e-5)] {
        assert_eq!(Spherical3::embed(p), p.extend(1.0));
    }
}

#[test]
fn embedded_points_lie_on_unit_sphere() {
    for p in sample_points() {
        let q = Spherical3::embed(p);
        let norm = q.truncate().length_squared() + q.w * q.w;
        assert!((norm - 1.0).abs() < 1e-5, "{p:?} embedded off the sphere: {norm}");
    }
}

#[test]
fn embedding_preserves_geodesic_distance() {
    let p = Vec3::new(0.0, 0.0, -1.2);
    let q = Spherical3::embed(p);
    let angle = Spherical3::form(q, Vec4::W).clamp(-1.0, 1.0).acos();
    assert!((angle - 1.2).abs() < 1e-5);
}

#[test]
fn translation_from_origin_is_identity() {
    let translation = Spherical3::translation(Vec4::W).expect("origin is regular");
    assert_eq!(translation, Mat4::IDENTITY);
}

#[test]
fn translation_carries_origin_to_target() {
    for p in sample_points() {
        let to = Spherical3::embed(p);
        let translation = Spherical3::translation(to).expect("target is regular");
        let moved = translation * Vec4::W;
        assert!(moved.abs_diff_eq(to, 1e-5), "{moved:?} != {to:?}");
    }
}

#[test]
fn translation_is_an_isometry() {
    let to = Spherical3::embed(Vec3::new(0.4, -0.7, 1.1));
    let translation = Spherical3::translation(to).expect("target is regular");

    assert!((translation.transpose() * translation).abs_diff_eq(Mat4::IDENTITY, 1e-5));

    let a = Vec4::new(0.2, 0.1, -0.4, 0.9);
    let b = Vec4::new(-1.0, 0.5, 0.3, 0.2);
    let before = Spherical3::form(a, b);
    let after = Spherical3::form(translation * a, translation * b);
    assert!((before - after).abs() < 1e-5);
}

#[test]
fn inverse_translation_returns_target_to_origin() {
    let to = Spherical3::embed(Vec3::new(-0.3, 0.0, 0.2));
    let translation = Spherical3::translation(to).expect("target is regular");
    let back = inverse_translation(translation) * to;
    assert!(back.abs_diff_eq(Vec4::W, 1e-5));
}

#[test]
fn antipode_of_origin_is_rejected() {
    let err = Spherical3::translation(Vec4::new(0.0, 0.0, 0.0, -1.0)).unwrap_err();
    assert!(matches!(err, GeometryError::AntipodalSingularity { .. }));

    let far = Spherical3::embed(Vec3::new(std::f32::consts::PI, 0.0, 0.0));
    assert!(Spherical3::translation(far).is_err());
}

#[test]
fn flat_translation_matches_affine_translate() {
    let offset = Vec3::new(-100.0, 0.0, 25.0);
    let translation = Euclidean3::translation(Euclidean3::embed(offset)).expect("flat space is regular");
    assert_eq!(translation, Mat4::from_translation(offset));
    assert_eq!(translation * Euclidean3::ORIGIN, offset.extend(1.0));

    let direction = Vec4::new(1.0, 2.0, 3.0, 0.0);
    assert_eq!(
        Euclidean3::form(translation * direction, translation * direction),
        Euclidean3::form(direction, direction)
    );
}
