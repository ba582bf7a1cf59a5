use crate::track::{Curve3, Point3, Spline, mirror_handle, mirror_partner};

fn seven_points() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, 1.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
        Point3::new(5.0, 0.0, 2.0),
        Point3::new(6.0, 0.0, 3.0),
        Point3::new(7.0, 0.0, 3.0),
    ]
}

#[test]
fn incoming_handle_mirrors_outgoing() {
    let mut points = seven_points();
    assert_eq!(mirror_handle(&mut points, 2), Some(4));
    // joint (3,0,0) reflected from handle (2,1,0)
    assert_eq!(points[4], Point3::new(4.0, -1.0, 0.0));
}

#[test]
fn outgoing_handle_mirrors_incoming() {
    let mut points = seven_points();
    assert_eq!(mirror_handle(&mut points, 4), Some(2));
    assert_eq!(points[2], Point3::new(1.0, 0.0, -2.0));
}

#[test]
fn joints_and_unpaired_handles_are_left_alone() {
    let original = seven_points();
    for moved in [0, 1, 3, 5, 6, 7, 100] {
        let mut points = original.clone();
        assert_eq!(mirror_handle(&mut points, moved), None, "moved={moved}");
        assert_eq!(points, original);
    }
    assert_eq!(mirror_partner(3, 1), None);
}

#[test]
fn mirrored_joint_is_tangent_continuous() {
    let mut points = seven_points();
    mirror_handle(&mut points, 2).unwrap();

    let spline = Spline::new(points);
    let incoming = spline.segment(0).unwrap().tangent_at(1.0).unwrap();
    let outgoing = spline.segment(1).unwrap().tangent_at(0.0).unwrap();
    assert!((incoming - outgoing).length() < 1e-12);
}
