use rand::rngs::StdRng;
use rand::SeedableRng;
use yule3d::resource::ResourceLedger;
use yule3d::tree::{
    build_tree_scene, garland_bulbs, place_ornaments, GarlandSpec, OrnamentSettings, RingPlan,
    SceneParameters, Silhouette, RADIUS_FLOOR,
};

#[test]
fn silhouette_never_widens_between_breakpoints() {
    let silhouette = Silhouette::default();
    let breakpoints = silhouette.breakpoints();
    let top = silhouette.top_y();

    let steps = 4000;
    let samples: Vec<(f32, f32)> = (0..=steps)
        .map(|i| {
            let y = top * i as f32 / steps as f32;
            (y, silhouette.radius_at_layered(y))
        })
        .collect();

    for pair in samples.windows(2) {
        let ((y0, r0), (y1, r1)) = (pair[0], pair[1]);
        assert!(r0 >= RADIUS_FLOOR && r1 >= RADIUS_FLOOR);

        let crosses = breakpoints.iter().any(|&b| y0 <= b && b < y1);
        if !crosses {
            assert!(r1 <= r0 + 1.0e-6, "radius grew from {} to {} at y = {}", r0, r1, y1);
        }
    }
}

#[test]
fn ornaments_follow_the_ring_plan() {
    let silhouette = Silhouette::default();
    let plan = RingPlan::for_silhouette(&silhouette);
    let settings = OrnamentSettings::default();
    let mut rng = StdRng::seed_from_u64(42);

    let placed = place_ornaments(&plan, &silhouette, &settings, &mut rng);
    assert_eq!(placed.len(), 64);
    assert_eq!(placed.len(), plan.total());

    for ornament in &placed {
        let p = ornament.position;
        let distance = (p.x * p.x + p.z * p.z).sqrt();
        let surface = silhouette.radius_at_layered(p.y);

        assert!(distance >= surface - 1.0e-4);
        assert!(distance <= surface + settings.margin + 1.0e-4);
        assert!(ornament.size >= settings.size.0 && ornament.size <= settings.size.1);
    }
}

#[test]
fn garland_climbs_from_start_to_end() {
    let silhouette = Silhouette::default();
    let spec = GarlandSpec::for_silhouette(&silhouette);
    let bulbs = garland_bulbs(&spec, &silhouette);

    assert_eq!(bulbs.len(), 160);
    assert_eq!(bulbs[0].position.y, spec.y_start);
    assert!((bulbs[159].position.y - spec.y_end).abs() < 1.0e-5);
    assert!(bulbs.windows(2).all(|w| w[0].position.y <= w[1].position.y));
}

#[test]
fn built_scene_holds_every_decoration() {
    let ledger = ResourceLedger::new();
    let mut rng = StdRng::seed_from_u64(1);
    let params = SceneParameters::new(420, 380, 1.0, true);

    let mut scene = build_tree_scene(params, &ledger, &mut rng);
    assert_eq!(scene.ornaments().len(), 64);
    assert_eq!(scene.bulbs().len(), 160);
    assert!(ledger.total_live() > 0);

    let released = scene.dispose();
    assert!(released > 0);
    assert_eq!(scene.dispose(), 0);
    assert_eq!(ledger.total_live(), 0);
    assert_eq!(ledger.double_releases(), 0);
}
