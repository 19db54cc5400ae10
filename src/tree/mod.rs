//! The procedural tree: its silhouette, decorations, and the scene around it.

pub use self::builder::{build_tree_scene, TreeScene, GIFT_POSITIONS, TREE_REST_TILT};
pub use self::garland::{garland_bulbs, GarlandBulb, GarlandSpec};
pub use self::ornaments::{place_ornaments, OrnamentPlacement, OrnamentSettings, Ring, RingPlan};
pub use self::params::SceneParameters;
pub use self::tiers::{
    Silhouette, TierSpec, BASE_TOLERANCE, RADIUS_FLOOR, TREE_TIERS, TRUNK_HEIGHT,
    TRUNK_RADIUS_BOTTOM, TRUNK_RADIUS_TOP,
};

mod builder;
mod garland;
mod ornaments;
mod params;
mod tiers;
