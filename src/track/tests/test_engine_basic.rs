use crate::track::{ConfigError, Point3, TrackConfig, TrackEngine};

fn canonical_points() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, -1.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]
}

fn canonical_config() -> TrackConfig {
    TrackConfig {
        resolution: 0.1,
        width: 1.0,
        height: 0.2,
        ..TrackConfig::default()
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = TrackConfig {
        width: -1.0,
        ..TrackConfig::default()
    };
    assert_eq!(TrackEngine::new(config).err(), Some(ConfigError::InvalidWidth(-1.0)));

    let mut engine = TrackEngine::new(canonical_config()).unwrap();
    let bad = TrackConfig {
        resolution: 2.0,
        ..canonical_config()
    };
    assert_eq!(engine.set_config(bad), Err(ConfigError::InvalidResolution(2.0)));
    assert_eq!(engine.config(), &canonical_config());
}

#[test]
fn rebuild_only_when_inputs_change() {
    let mut engine = TrackEngine::new(canonical_config()).unwrap();
    assert!(engine.is_dirty());
    assert!(engine.rebuild().is_empty());

    engine.set_control_points(canonical_points());
    assert!(engine.is_dirty());
    assert_eq!(engine.rebuild().vertex_count(), 44);
    assert!(!engine.is_dirty());
    assert_eq!(engine.diagnostics().triangle_count, 84);

    engine.set_control_points(canonical_points());
    assert!(!engine.is_dirty());

    engine.set_config(canonical_config()).unwrap();
    assert!(!engine.is_dirty());

    let wider = TrackConfig {
        width: 2.0,
        ..canonical_config()
    };
    engine.set_config(wider).unwrap();
    assert!(engine.is_dirty());
    assert_eq!(engine.rebuild().vertex_count(), 44);
}

#[test]
fn accepted_resolution_is_meshed_as_given() {
    let config = TrackConfig {
        resolution: 0.002,
        ..canonical_config()
    };
    assert_eq!(config.validate(), Ok(()));

    let mut engine = TrackEngine::new(config).unwrap();
    engine.set_control_points(canonical_points());
    assert_eq!(engine.rebuild().vertex_count(), 501 * 4);
    assert_eq!(engine.diagnostics().ring_count, 501);
    assert!(!engine.diagnostics().resolution_clamped);
}

#[test]
fn tick_advances_cursor() {
    let mut engine = TrackEngine::new(canonical_config()).unwrap();
    assert!(engine.tick(0.1).is_none());
    assert_eq!(engine.cursor(), 0.0);

    engine.set_control_points(canonical_points());
    let pose = engine.tick(1.0).unwrap();
    assert!((engine.cursor() - 0.5).abs() < 1e-12);
    assert!((pose.position.x - 1.5).abs() < 1e-12);

    engine.reset_cursor();
    assert_eq!(engine.cursor(), 0.0);
}

#[test]
fn handle_edit_marks_mesh_dirty() {
    let mut points = canonical_points();
    points.extend([
        Point3::new(4.0, 2.0, 0.0),
        Point3::new(5.0, 1.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
    ]);
    let mut engine = TrackEngine::new(canonical_config()).unwrap();
    engine.set_control_points(points);
    engine.rebuild();

    assert_eq!(engine.mirror_handle(2), Some(4));
    assert!(engine.is_dirty());
    assert_eq!(engine.control_points()[4], Point3::new(4.0, 1.0, 0.0));

    assert_eq!(engine.mirror_handle(3), None);
}

#[test]
fn frame_and_preview_use_current_points() {
    let mut engine = TrackEngine::new(canonical_config()).unwrap();
    assert!(engine.frame(60.0, 0.0).is_none());
    assert!(engine.preview().is_empty());

    engine.set_control_points(canonical_points());
    let frame = engine.frame(60.0, 0.0).unwrap();
    assert!(frame.distance > 0.0);
    let preview = engine.preview();
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].len(), 11);
}
