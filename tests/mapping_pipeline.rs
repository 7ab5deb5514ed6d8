//! End-to-end checks through the public API

use immersive_mapping::warp::{project_quad, verify_rect_to_quad};
use immersive_mapping::{
    embed, fullscreen_quad, project_point, solve_rect_to_quad, validate_quad, Alignment, FitMode,
    MappingConfig, MappingError, Point2D, PerspectiveWarp, Quad, QuadError, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5eed_cafe;

fn close(a: Point2D, b: Point2D, rel: f64) -> bool {
    a.distance(b) <= rel * b.x.abs().max(b.y.abs()).max(1.0)
}

/// A rect with every corner nudged by up to a fifth of its short side;
/// small enough that the result stays convex and clockwise.
fn random_target(rng: &mut StdRng) -> (f64, f64, Quad) {
    let width = rng.random_range(16.0..4096.0);
    let height = rng.random_range(16.0..4096.0);
    let reach = 0.2 * f64::min(width, height);
    let origin = Point2D::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));

    let mut quad = Rect::new(origin.x, origin.y, width, height).to_quad();
    for corner in quad.points.iter_mut() {
        corner.x += rng.random_range(-reach..reach);
        corner.y += rng.random_range(-reach..reach);
    }
    (width, height, quad)
}

#[test]
fn test_corner_pin_scenario() {
    let quad = Quad::from([(10.0, 10.0), (210.0, 10.0), (200.0, 110.0), (0.0, 100.0)]);
    let h = solve_rect_to_quad(100.0, 50.0, &quad).unwrap();

    let source = Rect::from_size(100.0, 50.0).to_quad();
    let projected = project_quad(&h, &source).unwrap();
    for (p, t) in projected.points.iter().zip(quad.points) {
        assert!(close(*p, t, 1e-6));
    }

    let css = embed(&h).to_css_matrix3d();
    assert!(css.starts_with("matrix3d("));
    assert_eq!(css.matches(',').count(), 15);
}

#[test]
fn test_random_quads_reproduce_corners() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..500 {
        let (width, height, quad) = random_target(&mut rng);
        assert_eq!(validate_quad(&quad, 1e-6), Ok(()), "{:?}", quad);

        let h = solve_rect_to_quad(width, height, &quad).unwrap();
        assert!(verify_rect_to_quad(&h, width, height, &quad, 1e-6).is_ok());

        let source = Rect::from_size(width, height).to_quad();
        for (s, t) in source.points.iter().zip(quad.points) {
            let p = project_point(&h, *s).unwrap();
            assert!(close(p, t, 1e-6), "{:?} -> {:?}, want {:?}", s, p, t);
        }
    }
}

#[test]
fn test_random_embedding_matches_projection() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    for _ in 0..200 {
        let (width, height, quad) = random_target(&mut rng);
        let h = solve_rect_to_quad(width, height, &quad).unwrap();
        let m = embed(&h);

        for _ in 0..8 {
            let p = Point2D::new(
                rng.random_range(0.0..=width),
                rng.random_range(0.0..=height),
            );
            let [x, y, z, w] = m.transform([p.x, p.y, 0.0, 1.0]);
            let expected = project_point(&h, p).unwrap();
            assert!(close(Point2D::new(x / w, y / w), expected, 1e-9));
            assert_eq!(z, 0.0);
        }
    }
}

#[test]
fn test_random_scale_laws() {
    let mut rng = StdRng::seed_from_u64(SEED ^ 2);
    for _ in 0..200 {
        let (_, _, quad) = random_target(&mut rng);
        assert_eq!(quad.scaled(1.0, 1.0), quad);

        let sx = rng.random_range(0.25..4.0);
        let sy = rng.random_range(0.25..4.0);
        let scaled = quad.scaled(sx, sy);
        assert!(close(scaled.centroid(), quad.centroid(), 1e-9));
        assert!(scaled.is_valid());
    }
}

#[test]
fn test_invalid_targets_are_named() {
    let cases = [
        (
            Quad::from([(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (0.0, 10.0)]),
            "duplicate",
        ),
        (
            Quad::from([(0.0, 0.0), (5.0, 5.0), (10.0, 10.0), (0.0, 10.0)]),
            "collinear",
        ),
        (
            Quad::from([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            "orientation",
        ),
        (
            Quad::from([(0.0, 0.0), (2.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            "crossing",
        ),
    ];

    for (quad, label) in cases {
        let err = solve_rect_to_quad(100.0, 50.0, &quad).unwrap_err();
        let reason = match err {
            MappingError::InvalidQuad(reason) => reason,
            other => panic!("{}: unexpected {:?}", label, other),
        };
        let matched = match label {
            "duplicate" => matches!(reason, QuadError::DuplicatePoint { .. }),
            "collinear" => matches!(reason, QuadError::CollinearPoints { .. }),
            "orientation" => matches!(reason, QuadError::WrongOrientation { .. }),
            _ => matches!(reason, QuadError::SelfIntersecting { .. }),
        };
        assert!(matched, "{}: got {:?}", label, reason);
    }
}

#[test]
fn test_fullscreen_layout_feeds_solver() {
    let quad = fullscreen_quad(1000.0, 500.0, 400.0, 400.0, FitMode::Contain, Alignment::Center);
    let h = solve_rect_to_quad(400.0, 400.0, &quad).unwrap();

    // Contain is a pure scale plus offset: no perspective terms
    assert!(h.m[2][0].abs() < 1e-9 && h.m[2][1].abs() < 1e-9);
    let center = project_point(&h, Point2D::new(200.0, 200.0)).unwrap();
    assert!(close(center, Point2D::new(500.0, 250.0), 1e-9));
}

#[test]
fn test_editor_drag_session() {
    let mut warp = PerspectiveWarp::new(1920.0, 1080.0).unwrap();
    warp.move_corner(1, Point2D::new(-120.0, 40.0)).unwrap();
    warp.move_corner(2, Point2D::new(-60.0, -30.0)).unwrap();
    let good = warp.corners();

    // Pulling corner 3 far to the right makes the outline cross itself
    assert!(warp.set_corner(3, Point2D::new(2500.0, 1000.0)).is_err());
    assert_eq!(warp.corners(), good);

    let h = warp.homography().unwrap();
    let mapped = warp.map_point(Point2D::new(1920.0, 0.0)).unwrap();
    assert!(close(mapped, Point2D::new(1800.0, 40.0), 1e-6));
    assert!(close(warp.unmap_point(mapped).unwrap(), Point2D::new(1920.0, 0.0), 1e-6));
    assert_eq!(warp.render_matrix().unwrap(), embed(&h));
}

#[test]
fn test_config_from_json_drives_solver() {
    let config = MappingConfig::from_json(r#"{ "epsilon": 50.0, "verifySolution": true }"#).unwrap();
    assert!(config.verify_solution);

    // A sliver that passes the default tolerance fails a coarse one
    let sliver = Quad::from([(0.0, 0.0), (100.0, 0.0), (100.0, 0.4), (0.0, 0.4)]);
    assert!(validate_quad(&sliver, MappingConfig::default().epsilon).is_ok());
    assert!(validate_quad(&sliver, config.epsilon).is_err());
}
