//! Assembly of the whole greeting scene.

use super::garland::{garland_bulbs, GarlandSpec};
use super::ornaments::{place_ornaments, OrnamentSettings, RingPlan};
use super::params::SceneParameters;
use super::tiers::{Silhouette, TRUNK_HEIGHT, TRUNK_RADIUS_BOTTOM, TRUNK_RADIUS_TOP};
use crate::color::{self, GIFT_PALETTE};
use crate::light;
use crate::procedural::{self, GroundWaves, StarSettings};
use crate::resource::ResourceLedger;
use crate::scene::{Material, NodeId, ObjectKind, SceneGraph};
use glamx::{Quat, Vec3};
use rand::Rng;

/// Where the three gift boxes sit on the ground.
pub const GIFT_POSITIONS: [(f32, f32); 3] = [(1.2, 0.9), (-1.0, -0.8), (0.2, -1.2)];
/// Resting tilt of the tree before the first animated frame.
pub const TREE_REST_TILT: f32 = -0.08;

/// A built scene: the graph owning everything, and non-owning handles on the
/// nodes the animation drives.
pub struct TreeScene {
    pub graph: SceneGraph,
    params: SceneParameters,
    silhouette: Silhouette,
    tree: NodeId,
    star: NodeId,
    starfield: NodeId,
    ornaments: Vec<NodeId>,
    bulbs: Vec<NodeId>,
    look_at: Vec3,
}

impl TreeScene {
    #[inline]
    pub fn params(&self) -> &SceneParameters {
        &self.params
    }

    #[inline]
    pub fn silhouette(&self) -> &Silhouette {
        &self.silhouette
    }

    /// The group holding the foliage, trunk, star, ornaments and garland.
    #[inline]
    pub fn tree(&self) -> NodeId {
        self.tree
    }

    #[inline]
    pub fn star(&self) -> NodeId {
        self.star
    }

    #[inline]
    pub fn starfield(&self) -> NodeId {
        self.starfield
    }

    /// The ornament spheres, in ring order. Caps are not included.
    #[inline]
    pub fn ornaments(&self) -> &[NodeId] {
        &self.ornaments
    }

    /// The garland bulbs, from the bottom of the spiral to the top.
    #[inline]
    pub fn bulbs(&self) -> &[NodeId] {
        &self.bulbs
    }

    /// Mutable access to the graph alongside the ornament and bulb handles.
    pub fn graph_and_decorations(&mut self) -> (&mut SceneGraph, &[NodeId], &[NodeId]) {
        (&mut self.graph, &self.ornaments, &self.bulbs)
    }

    /// The point the camera orbits around.
    #[inline]
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Releases every resource of the scene. See [`SceneGraph::dispose`].
    pub fn dispose(&mut self) -> usize {
        self.graph.dispose()
    }
}

/// Builds the greeting scene, registering all its resources in `ledger`.
///
/// Geometry does not depend on the surface size; only `params.scale()` is
/// applied, to the tree group.
pub fn build_tree_scene<R: Rng + ?Sized>(
    params: SceneParameters,
    ledger: &ResourceLedger,
    rng: &mut R,
) -> TreeScene {
    let silhouette = Silhouette::default();
    let top_y = silhouette.top_y();
    let mut graph = SceneGraph::new(ledger);
    let root = graph.root();

    /*
     * Tree group: foliage, trunk and star.
     */
    let tree = graph.add_group(root, "tree");
    graph.set_scale(tree, Vec3::splat(params.scale()));
    graph.set_rotation(tree, Quat::from_rotation_x(TREE_REST_TILT));

    let foliage = Material::standard(color::TREE_GREEN, 0.5, 0.2);
    for tier in silhouette.tiers() {
        let node = graph.add_object(
            tree,
            "tier",
            procedural::cone(tier.radius, tier.height, 48),
            foliage,
            ObjectKind::Surface,
        );
        graph.set_position(node, Vec3::new(0.0, tier.y_bottom + tier.height * 0.5, 0.0));
    }

    let top_cap = graph.add_object(
        tree,
        "top_cap",
        procedural::cone(0.35, 0.35, 48),
        foliage,
        ObjectKind::Surface,
    );
    graph.set_position(top_cap, Vec3::new(0.0, top_y + 0.20, 0.0));

    let trunk = graph.add_object(
        tree,
        "trunk",
        procedural::frustum(TRUNK_RADIUS_BOTTOM, TRUNK_RADIUS_TOP, TRUNK_HEIGHT, 24),
        Material::standard(color::TRUNK_BROWN, 0.8, 0.0),
        ObjectKind::Surface,
    );
    graph.set_position(trunk, Vec3::new(0.0, TRUNK_HEIGHT * 0.5, 0.0));

    let star_y = top_y + 0.65;
    let star = graph.add_object(
        tree,
        "star",
        procedural::extruded_star(&StarSettings::default()),
        Material::standard(color::STAR_GOLD, 0.35, 0.35).with_emissive(color::STAR_GLOW, 0.7),
        ObjectKind::Surface,
    );
    graph.set_position(star, Vec3::new(0.0, star_y, 0.0));
    graph.set_rotation(star, Quat::from_rotation_y(std::f32::consts::PI / 5.0));

    /*
     * Ornaments, each with its gold cap.
     */
    let plan = RingPlan::for_silhouette(&silhouette);
    let placements = place_ornaments(&plan, &silhouette, &OrnamentSettings::default(), rng);
    let cap_material = Material::standard(color::CAP_GOLD, 0.3, 0.8);
    let mut ornaments = Vec::with_capacity(placements.len());

    for placement in &placements {
        let node = graph.add_object(
            tree,
            "ornament",
            procedural::sphere(placement.size, 16, 16),
            Material::standard(placement.color, 0.5, 0.25)
                .with_emissive(placement.color, placement.emissive_base),
            ObjectKind::Surface,
        );
        graph.set_position(node, placement.position);
        ornaments.push(node);

        let cap = graph.add_object(
            tree,
            "ornament_cap",
            procedural::cylinder(0.045, 0.06, 12),
            cap_material,
            ObjectKind::Surface,
        );
        graph.set_position(cap, placement.position + Vec3::new(0.0, 0.1, 0.0));
        graph.set_rotation(cap, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
    }

    /*
     * Garland.
     */
    let spec = GarlandSpec::for_silhouette(&silhouette);
    let bulbs = garland_bulbs(&spec, &silhouette)
        .into_iter()
        .map(|bulb| {
            let node = graph.add_object(
                tree,
                "garland_bulb",
                procedural::sphere(spec.bulb_radius, 12, 12),
                Material::standard(bulb.color, 0.45, 0.25)
                    .with_emissive(bulb.color, spec.emissive_base),
                ObjectKind::Surface,
            );
            graph.set_position(node, bulb.position);
            node
        })
        .collect();

    /*
     * Surroundings: snow, stars, gifts and lights.
     */
    let _ = graph.add_object(
        root,
        "snow_ground",
        procedural::undulating_ground(
            procedural::GROUND_SIZE,
            procedural::GROUND_SUBDIVISIONS,
            GroundWaves::default(),
        ),
        Material::standard(color::SNOW_WHITE, 1.0, 0.0),
        ObjectKind::Surface,
    );

    let starfield = graph.add_object(
        root,
        "starfield",
        procedural::starfield(procedural::STARFIELD_COUNT, rng),
        Material::default().with_opacity(0.9),
        ObjectKind::Points,
    );

    for (&(x, z), &wrapping) in GIFT_POSITIONS.iter().zip(GIFT_PALETTE.iter()) {
        let gift = graph.add_object(
            root,
            "gift",
            procedural::cuboid(Vec3::new(0.45, 0.35, 0.45)),
            Material::standard(wrapping, 0.6, 0.2),
            ObjectKind::Surface,
        );
        graph.set_position(gift, Vec3::new(x, 0.175, z));

        let ribbon = graph.add_object(
            root,
            "gift_ribbon",
            procedural::cuboid(Vec3::new(0.46, 0.05, 0.12)),
            Material::standard(color::RIBBON_WHITE, 0.4, 0.0),
            ObjectKind::Surface,
        );
        graph.set_position(ribbon, Vec3::new(x, 0.365, z));
    }

    for rig in light::tree_rig() {
        let node = graph.add_light(root, rig.name, rig.light);
        graph.set_position(node, rig.position);
    }

    let star_light = graph.add_light(root, "star_light", light::star_light());
    graph.set_position(star_light, Vec3::new(0.0, star_y + 0.05, 0.0));

    log::debug!(
        "Built tree scene: {} nodes, {} ornaments, {} resources.",
        graph.len(),
        ornaments.len(),
        ledger.total_live()
    );

    TreeScene {
        graph,
        params,
        silhouette,
        tree,
        star,
        starfield,
        ornaments,
        bulbs,
        look_at: Vec3::new(0.0, (top_y + TRUNK_HEIGHT) * 0.55, 0.0),
    }
}
