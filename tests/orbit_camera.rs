use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yule3d::camera::{Camera3d, OrbitCamera3d};
use yule3d::event::{Action, Modifiers, MouseButton, WindowEvent};
use yule3d::glamx::{Vec2, Vec3};

fn assert_within_limits(camera: &OrbitCamera3d) {
    let limits = *camera.limits();
    let (_, target_polar, target_distance) = camera.target();

    for (polar, distance) in [
        (camera.polar(), camera.distance()),
        (target_polar, target_distance),
    ] {
        assert!(distance >= limits.min_distance - 1.0e-5);
        assert!(distance <= limits.max_distance + 1.0e-5);
        assert!(polar >= limits.min_polar - 1.0e-5);
        assert!(polar <= limits.max_polar + 1.0e-5);
    }
}

#[test]
fn random_drags_and_scrolls_stay_clamped() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut camera = OrbitCamera3d::for_tree(Vec3::new(0.0, 2.0, 0.0));
    camera.set_aspect(420, 380);
    assert_within_limits(&camera);

    for _ in 0..500 {
        let drag = Vec2::new(
            (rng.random::<f32>() - 0.5) * 800.0,
            (rng.random::<f32>() - 0.5) * 800.0,
        );
        camera.handle_rotate(drag);
        camera.handle_scroll((rng.random::<f32>() - 0.5) * 400.0);
        camera.update(rng.random::<f32>() * 0.1);
        assert_within_limits(&camera);
    }
}

#[test]
fn mouse_drag_goes_through_events() {
    let mut camera = OrbitCamera3d::for_tree(Vec3::new(0.0, 2.0, 0.0));
    camera.set_aspect(420, 380);
    let (yaw, _, _) = camera.target();
    let none = Modifiers::empty();

    camera.handle_event(&WindowEvent::CursorPos(100.0, 100.0, none));
    camera.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Press, none));
    camera.handle_event(&WindowEvent::CursorPos(160.0, 100.0, none));
    camera.handle_event(&WindowEvent::MouseButton(MouseButton::Button1, Action::Release, none));
    camera.handle_event(&WindowEvent::CursorPos(400.0, 100.0, none));

    let (moved, _, _) = camera.target();
    let expected = 60.0 * std::f32::consts::TAU / 380.0;
    assert!(((yaw - moved).abs() - expected).abs() < 1.0e-4);
}

#[test]
fn damping_converges_on_the_target() {
    let mut camera = OrbitCamera3d::for_tree(Vec3::new(0.0, 2.0, 0.0));
    camera.set_aspect(420, 380);
    camera.handle_scroll(1000.0);

    for _ in 0..600 {
        camera.update(1.0 / 60.0);
    }

    let (_, _, distance) = camera.target();
    assert!((camera.distance() - distance).abs() < 1.0e-3);
}
