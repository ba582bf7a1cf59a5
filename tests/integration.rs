use coaster_engine::track::{
    CartOptions, Curve3, CursorWrap, MeshOptions, NormalMode, Point3, Spline, TrackConfig,
    TrackEngine, build_track_mesh, cart_pose, de_casteljau, rebuild,
};

fn s_curve() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, -1.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]
}

fn circuit() -> Vec<Point3> {
    // Four smooth quarter arcs around the origin, closing on the first point.
    let k = 0.552_284_749_8 * 10.0;
    vec![
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, k),
        Point3::new(k, 0.0, 10.0),
        Point3::new(0.0, 0.0, 10.0),
        Point3::new(-k, 0.0, 10.0),
        Point3::new(-10.0, 0.0, k),
        Point3::new(-10.0, 0.0, 0.0),
        Point3::new(-10.0, 0.0, -k),
        Point3::new(-k, 0.0, -10.0),
        Point3::new(0.0, 0.0, -10.0),
        Point3::new(k, 0.0, -10.0),
        Point3::new(10.0, 0.0, -k),
        Point3::new(10.0, 0.0, 0.0),
    ]
}

#[test]
fn s_curve_mesh_end_to_end() {
    let options = MeshOptions {
        resolution: 0.1,
        width: 1.0,
        height: 0.2,
        ..MeshOptions::default()
    };
    let (mesh, diag) = rebuild(&s_curve(), &options);

    assert_eq!(mesh.vertex_count(), 44);
    assert_eq!(mesh.indices.len(), 252);
    assert_eq!(mesh.normals.len(), 44);
    assert!(diag.is_watertight());
    assert!(diag.is_manifold());
    assert!(diag.is_clean());
    assert_eq!(mesh.validate(), Ok(()));
}

#[test]
fn circuit_meshes_and_cart_loops() {
    let config = TrackConfig {
        resolution: 0.05,
        width: 1.5,
        height: 0.25,
        speed: 1.0,
        cart_offset: [0.0, 0.5, 0.0],
        ..TrackConfig::default()
    };
    let mut engine = TrackEngine::new(config).expect("valid config");
    engine.set_control_points(circuit());

    let mesh = engine.rebuild().clone();
    let diag = engine.diagnostics();
    assert_eq!(diag.segment_count, 4);
    assert_eq!(diag.ring_count, 4 * 21);
    assert_eq!(mesh.vertex_count(), 4 * 21 * 4);
    assert!(diag.is_watertight());
    assert_eq!(diag.degenerate_lateral_count, 0);

    let mut last_cursor = engine.cursor();
    for _ in 0..50 {
        let pose = engine.tick(0.1).expect("pose");
        let radius = (pose.position.x.powi(2) + pose.position.z.powi(2)).sqrt();
        assert!((radius - 10.0).abs() < 0.05, "radius {radius}");
        assert!((pose.position.y - 0.5).abs() < 1e-12);
        assert!(engine.cursor() < 4.0);
        last_cursor = engine.cursor();
    }
    assert!((last_cursor - 1.0).abs() < 1e-9);
}

#[test]
fn cart_pose_matches_evaluator() {
    let spline = Spline::new(s_curve());
    let options = CartOptions {
        wrap: CursorWrap::Clamp,
        ..CartOptions::default()
    };
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        let pose = cart_pose(&spline, t, &options).expect("pose");
        let expected = de_casteljau(&s_curve(), t).expect("point");
        assert!(pose.position.distance_to(expected) < 1e-12);

        let tangent = spline.segment(0).expect("segment").tangent_at(t).expect("tangent");
        assert!((pose.forward() - tangent).length() < 1e-9);
    }
}

#[test]
fn editing_control_points_between_rebuilds() {
    let mut engine = TrackEngine::new(TrackConfig {
        resolution: 0.25,
        ..TrackConfig::default()
    })
    .expect("valid config");

    engine.set_control_points(s_curve()[..2].to_vec());
    assert!(engine.rebuild().is_empty());
    assert!(engine.tick(0.016).is_none());

    engine.set_control_points(s_curve());
    assert_eq!(engine.rebuild().vertex_count(), 5 * 4);
    assert!(engine.tick(0.016).is_some());

    let mut points = s_curve();
    points.extend([Point3::new(4.0, 1.0, 0.0), Point3::new(5.0, 1.0, 0.0)]);
    engine.set_control_points(points);
    assert_eq!(engine.rebuild().vertex_count(), 5 * 4);
    assert_eq!(engine.diagnostics().excess_control_points, 2);
}

#[test]
fn smooth_and_flat_share_geometry() {
    let flat = MeshOptions {
        resolution: 0.1,
        ..MeshOptions::default()
    };
    let smooth = MeshOptions {
        normals: NormalMode::Smooth,
        ..flat
    };
    let (a, _) = build_track_mesh(&circuit(), &flat);
    let (b, _) = build_track_mesh(&circuit(), &smooth);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.indices, b.indices);
    assert_eq!(b.validate(), Ok(()));
}
