use rand::rngs::StdRng;
use rand::SeedableRng;
use yule3d::animation::{SpinControl, SpinSpeed, SPIN_FAST, SPIN_SLOW};
use yule3d::glamx::Quat;
use yule3d::resource::{ResourceKind, ResourceLedger};
use yule3d::tree::SceneParameters;
use yule3d::window::{Lifecycle, LifecycleState, Mount};
use yule3d::Error;

fn mount(interactive: bool, ledger: &ResourceLedger) -> Mount {
    let mut rng = StdRng::seed_from_u64(2025);
    let params = SceneParameters::new(420, 380, 1.0, interactive);
    Mount::new(params, &mut rng, ledger).unwrap()
}

#[test]
fn resize_cycles_do_not_leak() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(true, &ledger);
    let live = ledger.total_live();
    let targets = ledger.live(ResourceKind::RenderTarget);

    for (w, h) in [(800, 600), (1, 1), (1920, 1080), (420, 380)] {
        mount.resize(w, h).unwrap();
        assert_eq!(mount.surface_size(), (w, h));
        assert_eq!(mount.state(), LifecycleState::Running);
        assert!(mount.frame(1.0 / 60.0).unwrap());
    }

    assert_eq!(ledger.total_live(), live);
    assert_eq!(ledger.live(ResourceKind::RenderTarget), targets);
}

#[test]
fn zero_sizes_are_clamped() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(false, &ledger);

    mount.resize(0, 0).unwrap();
    assert_eq!(mount.surface_size(), (1, 1));
}

#[test]
fn disposal_is_idempotent() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(true, &ledger);
    let _ = mount.frame(0.5).unwrap();

    assert!(mount.unmount() > 0);
    assert_eq!(mount.unmount(), 0);
    assert_eq!(mount.unmount(), 0);
    assert_eq!(mount.state(), LifecycleState::Unmounted);
    assert_eq!(ledger.total_live(), 0);
    assert_eq!(ledger.double_releases(), 0);

    assert!(matches!(mount.frame(0.1), Err(Error::Lifecycle { .. })));
    assert!(mount.resize(10, 10).is_err());

    drop(mount);
    assert_eq!(ledger.double_releases(), 0);
}

#[test]
fn lifecycle_rejects_invalid_edges() {
    let mut lifecycle = Lifecycle::new();

    assert!(lifecycle.transition(LifecycleState::Running).is_err());
    lifecycle.transition(LifecycleState::Building).unwrap();
    lifecycle.transition(LifecycleState::Running).unwrap();
    lifecycle.transition(LifecycleState::Resizing).unwrap();
    assert!(lifecycle.transition(LifecycleState::Disposing).is_err());
    lifecycle.transition(LifecycleState::Running).unwrap();
    lifecycle.transition(LifecycleState::Disposing).unwrap();
    lifecycle.transition(LifecycleState::Unmounted).unwrap();
}

#[test]
fn clicks_only_toggle_interactive_scenes() {
    let mut fixed = SpinControl::new(false);
    for _ in 0..100 {
        assert_eq!(fixed.click().radians_per_second(), SPIN_FAST);
    }

    let mut toggling = SpinControl::new(true);
    let speeds: Vec<f32> = (0..100)
        .map(|_| toggling.click().radians_per_second())
        .collect();
    assert!(speeds.iter().all(|&s| s == SPIN_FAST || s == SPIN_SLOW));
    assert!(speeds.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn mount_clicks_change_the_spin() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(true, &ledger);

    assert_eq!(mount.click(), SpinSpeed::Slow);
    let _ = mount.frame(2.0).unwrap();
    assert!((mount.scene_state().tree_rotation_y - 2.0 * SPIN_SLOW).abs() < 1.0e-6);

    let ledger = ResourceLedger::new();
    let mut still = self::mount(false, &ledger);
    assert_eq!(still.click(), SpinSpeed::Fast);
}

#[test]
fn frames_write_the_state_into_the_scene() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(true, &ledger);

    assert!(mount.frame(1.3).unwrap());

    let state = mount.scene_state();
    let scene = mount.scene();
    let graph = &scene.graph;
    let intensity = |id| graph.object(id).unwrap().material().emissive_intensity;

    assert_eq!(scene.ornaments().len(), 64);
    assert_eq!(scene.bulbs().len(), 160);
    for (&id, &expected) in scene.ornaments().iter().zip(&state.ornament_intensity) {
        assert_eq!(intensity(id), expected);
    }
    for (&id, &expected) in scene.bulbs().iter().zip(&state.garland_intensity) {
        assert_eq!(intensity(id), expected);
    }

    assert!((state.star_intensity - 0.6).abs() > 1.0e-3);
    assert_eq!(intensity(scene.star()), state.star_intensity);
    assert_eq!(
        graph.object(scene.starfield()).unwrap().material().opacity,
        state.starfield_opacity
    );

    let rotation = graph.node(scene.tree()).unwrap().transform.rotation;
    assert_eq!(
        rotation,
        Quat::from_rotation_x(state.tree_tilt_x) * Quat::from_rotation_y(state.tree_rotation_y)
    );
}

#[test]
fn failed_resize_keeps_the_previous_size() {
    let ledger = ResourceLedger::new();
    let mut mount = mount(true, &ledger);
    mount.resize(640, 480).unwrap();
    let _ = mount.unmount();

    assert!(matches!(mount.resize(800, 600), Err(Error::Lifecycle { .. })));
    assert_eq!(mount.surface_size(), (640, 480));
    assert_eq!(mount.params().width(), 640);
    assert_eq!(mount.params().height(), 480);
    assert_eq!(mount.state(), LifecycleState::Unmounted);
}
