use crate::track::{
    CartOptions, CartState, CursorWrap, Point3, Spline, TrackError, Vec3, cart_pose,
};

fn straight_spline() -> Spline {
    Spline::new((0..4).map(|i| Point3::new(0.0, 0.0, i as f64)).collect())
}

fn two_segment_spline() -> Spline {
    Spline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 1.0),
        Point3::new(4.0, 0.0, 2.0),
    ])
}

fn assert_vec_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn pose_sits_on_curve_and_faces_tangent() {
    let spline = two_segment_spline();
    let options = CartOptions::default();

    let pose = cart_pose(&spline, 0.0, &options).unwrap();
    assert_eq!(pose.position, Point3::new(0.0, 0.0, 0.0));
    assert_vec_close(pose.forward(), Vec3::X);

    let pose = cart_pose(&spline, 1.0, &options).unwrap();
    assert_eq!(pose.position, Point3::new(3.0, 0.0, 0.0));
    assert_vec_close(pose.forward(), Vec3::X);

    let pose = cart_pose(&spline, 2.0, &options).unwrap();
    assert_eq!(pose.position, Point3::new(4.0, 0.0, 2.0));
    assert_vec_close(pose.forward(), Vec3::Z);
    assert_vec_close(pose.rotation.mul_vec(Vec3::Y), Vec3::Y);
}

#[test]
fn offsets_apply_after_spline_frame() {
    let spline = straight_spline();
    let options = CartOptions {
        offset: Vec3::new(0.0, 0.5, 0.0),
        rotation_offset: Vec3::new(0.0, 90.0, 0.0),
        ..CartOptions::default()
    };

    let pose = cart_pose(&spline, 0.5, &options).unwrap();
    assert!((pose.position.y - 0.5).abs() < 1e-12);
    assert!((pose.position.z - 1.5).abs() < 1e-12);
    assert_vec_close(pose.forward(), Vec3::X);

    let transform = pose.to_transform();
    assert_vec_close(transform.translation(), pose.position.to_vec3());
    assert_vec_close(transform.apply_vec(Vec3::Z), Vec3::X);
}

#[test]
fn cyclic_cursor_wraps_modulo_segments() {
    let spline = two_segment_spline();
    let options = CartOptions {
        speed: 1.0,
        wrap: CursorWrap::Cyclic,
        ..CartOptions::default()
    };
    let mut cart = CartState::new();

    cart.advance(&spline, 1.5, &options).unwrap();
    assert!((cart.cursor() - 1.5).abs() < 1e-12);

    cart.advance(&spline, 1.0, &options).unwrap();
    assert!((cart.cursor() - 0.5).abs() < 1e-12);

    let mut cart = CartState::with_cursor(0.25);
    cart.advance(&spline, -1.0, &options).unwrap();
    assert!((cart.cursor() - 1.25).abs() < 1e-12);
}

#[test]
fn clamped_cursor_stops_at_track_end() {
    let spline = two_segment_spline();
    let options = CartOptions {
        speed: 1.0,
        wrap: CursorWrap::Clamp,
        ..CartOptions::default()
    };
    let mut cart = CartState::new();

    let pose = cart.advance(&spline, 10.0, &options).unwrap();
    assert_eq!(cart.cursor(), 2.0);
    assert_eq!(pose.position, Point3::new(4.0, 0.0, 2.0));

    cart.reset();
    assert_eq!(cart.cursor(), 0.0);
}

#[test]
fn local_parameter_clamp_is_a_policy_knob() {
    let spline = straight_spline();

    let clamped = CartOptions::default();
    let pose = cart_pose(&spline, -0.5, &clamped).unwrap();
    assert_eq!(pose.position, Point3::new(0.0, 0.0, 0.0));

    let free = CartOptions {
        clamp_local_t: false,
        ..CartOptions::default()
    };
    let pose = cart_pose(&spline, -0.5, &free).unwrap();
    assert!((pose.position.z + 1.5).abs() < 1e-12);
}

#[test]
fn pose_is_a_pure_function_of_cursor() {
    let spline = two_segment_spline();
    let options = CartOptions::default();
    let a = cart_pose(&spline, 1.37, &options).unwrap();
    let b = cart_pose(&spline, 1.37, &options).unwrap();
    assert_eq!(a, b);

    let mut cart = CartState::with_cursor(1.0);
    let pose = cart.advance(&spline, 0.0, &options).unwrap();
    assert_eq!(pose, cart_pose(&spline, 1.0, &options).unwrap());
}

#[test]
fn insufficient_input_skips_tick() {
    let spline = Spline::new(vec![Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)]);
    let mut cart = CartState::with_cursor(0.3);

    assert!(cart.advance(&spline, 1.0, &CartOptions::default()).is_none());
    assert!(cart.advance(&spline, 1.0, &CartOptions::default()).is_none());
    assert_eq!(cart.cursor(), 0.3);

    assert_eq!(
        cart_pose(&spline, 0.0, &CartOptions::default()),
        Err(TrackError::EmptyOrInsufficientInput { count: 2 })
    );
}

#[test]
fn ease_in_joint_keeps_cart_moving() {
    let spline = Spline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 2.0),
        Point3::new(0.0, 0.0, 3.0),
    ]);
    let options = CartOptions::default();

    let pose = cart_pose(&spline, 0.0, &options).unwrap();
    assert_vec_close(pose.forward(), Vec3::Z);

    // One full lap wraps the cursor exactly onto the joint.
    let mut cart = CartState::new();
    let dt = 1.0 / options.speed;
    let pose = cart.advance(&spline, dt, &options).expect("pose at joint");
    assert_eq!(cart.cursor(), 0.0);
    assert_vec_close(pose.position.to_vec3(), Vec3::ZERO);
    assert_vec_close(pose.forward(), Vec3::Z);
}

#[test]
fn degenerate_tangent_skips_tick() {
    let p = Point3::new(1.0, 1.0, 1.0);
    let spline = Spline::new(vec![p; 4]);
    let mut cart = CartState::new();

    assert!(cart.advance(&spline, 0.2, &CartOptions::default()).is_none());
    assert!(matches!(
        cart_pose(&spline, 0.5, &CartOptions::default()),
        Err(TrackError::DegenerateTangent { .. })
    ));
}
