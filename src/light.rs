//! Lights of the greeting scene.
//!
//! Lights live in the scene graph like any other node. Positional lights take
//! their position from the node's world transform; ambient and hemisphere
//! lights only contribute a constant term.

use crate::color::{self, Color};
use crate::scene::SceneGraph;
use glamx::Vec3;

/// Maximum number of positional lights the mesh shader evaluates.
pub const MAX_LIGHTS: usize = 8;

/// The type of light source.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightType {
    /// Uniform light reaching every surface.
    Ambient,
    /// Sky light blending from `ground` (facing down) to the light color (facing up).
    Hemisphere { ground: Color },
    /// Parallel rays shining from the node's position towards the origin.
    Directional,
    /// Light emitted from the node's position, fading to zero at `range`.
    Point { range: f32, decay: f32 },
}

/// A light source attached to a scene node.
///
/// ```
/// # use yule3d::light::Light;
/// # use yule3d::color;
/// let star_glow = Light::point(6.0, 2.0)
///     .with_color(color::STAR_GLOW)
///     .with_intensity(1.3);
/// assert!(star_glow.is_positional());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f32,
    pub enabled: bool,
}

impl Light {
    fn new(light_type: LightType) -> Self {
        Self {
            light_type,
            color: color::WHITE,
            intensity: 1.0,
            enabled: true,
        }
    }

    pub fn ambient() -> Self {
        Self::new(LightType::Ambient)
    }

    pub fn hemisphere(ground: Color) -> Self {
        Self::new(LightType::Hemisphere { ground })
    }

    pub fn directional() -> Self {
        Self::new(LightType::Directional)
    }

    /// A point light reaching `range` units with the given decay exponent.
    pub fn point(range: f32, decay: f32) -> Self {
        Self::new(LightType::Point { range, decay })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Whether this light depends on the position of its node.
    pub fn is_positional(&self) -> bool {
        matches!(
            self.light_type,
            LightType::Directional | LightType::Point { .. }
        )
    }
}

/// A positional light with its world-space position, as gathered from the scene graph.
#[derive(Clone, Copy, Debug)]
pub struct CollectedLight {
    pub light: Light,
    pub world_position: Vec3,
}

/// All the lights of a frame, flattened for upload.
#[derive(Clone, Debug)]
pub struct LightCollection {
    /// Positional lights, at most [`MAX_LIGHTS`].
    pub lights: Vec<CollectedLight>,
    /// Sum of the ambient lights, premultiplied by their intensities.
    pub ambient: Vec3,
    /// Sky color, ground color and intensity of the hemisphere light.
    pub hemisphere: Option<(Vec3, Vec3, f32)>,
}

impl Default for LightCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl LightCollection {
    pub fn new() -> Self {
        Self {
            lights: Vec::with_capacity(MAX_LIGHTS),
            ambient: Vec3::ZERO,
            hemisphere: None,
        }
    }

    /// Adds a light found at `world_position`.
    ///
    /// Returns `false` if the light was dropped because the collection is full.
    pub fn add(&mut self, light: &Light, world_position: Vec3) -> bool {
        if !light.enabled {
            return true;
        }

        match light.light_type {
            LightType::Ambient => {
                self.ambient += rgb_of(light.color) * light.intensity;
                true
            }
            LightType::Hemisphere { ground } => {
                self.hemisphere = Some((rgb_of(light.color), rgb_of(ground), light.intensity));
                true
            }
            LightType::Directional | LightType::Point { .. } => {
                if self.lights.len() < MAX_LIGHTS {
                    self.lights.push(CollectedLight {
                        light: *light,
                        world_position,
                    });
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Gathers the enabled lights of `scene`, with their world positions.
    pub fn gather(scene: &SceneGraph) -> Self {
        let mut collection = Self::new();

        scene.walk_depth_first(|_, node, world| {
            if let Some(light) = node.light() {
                if !collection.add(light, world.w_axis.truncate()) {
                    log::warn!("Too many lights, dropping `{}`.", node.name);
                }
            }
        });

        collection
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.ambient = Vec3::ZERO;
        self.hemisphere = None;
    }
}

/// Exponential squared fog, blending towards `color` with distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Fog {
            color: color::BLACK,
            density: 0.012,
        }
    }
}

impl Fog {
    /// Fraction of the fog color mixed into a fragment at `distance` from the eye.
    pub fn factor(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        1.0 - (-d * d).exp()
    }
}

/// A light of the default rig with the node position it is placed at.
pub struct RigLight {
    pub name: &'static str,
    pub position: Vec3,
    pub light: Light,
}

/// The lights surrounding the tree: soft ambient, a key and a rim light, and
/// a cool sky fill. The warm glow of the star is added next to the star.
pub fn tree_rig() -> Vec<RigLight> {
    vec![
        RigLight {
            name: "ambient",
            position: Vec3::ZERO,
            light: Light::ambient().with_intensity(0.6),
        },
        RigLight {
            name: "key_light",
            position: Vec3::new(3.0, 6.0, 5.0),
            light: Light::directional().with_intensity(1.0),
        },
        RigLight {
            name: "rim_light",
            position: Vec3::new(-3.0, 4.0, -5.0),
            light: Light::directional().with_intensity(0.5),
        },
        RigLight {
            name: "sky_fill",
            position: Vec3::ZERO,
            light: Light::hemisphere(color::HORIZON_BLUE).with_intensity(0.25),
        },
    ]
}

/// The light attached to the star at the top of the tree.
pub fn star_light() -> Light {
    Light::point(6.0, 2.0)
        .with_color(color::STAR_GLOW)
        .with_intensity(1.3)
}

fn rgb_of(c: Color) -> Vec3 {
    Vec3::new(c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_folds_constant_terms() {
        let mut lights = LightCollection::new();

        for rig in tree_rig() {
            assert!(lights.add(&rig.light, rig.position));
        }

        assert_eq!(lights.len(), 2);
        assert!((lights.ambient - Vec3::splat(0.6)).length() < 1.0e-6);
        assert!(lights.hemisphere.is_some());
    }

    #[test]
    fn test_collection_is_bounded() {
        let mut lights = LightCollection::new();
        let light = star_light();

        for _ in 0..MAX_LIGHTS {
            assert!(lights.add(&light, Vec3::Y));
        }
        assert!(!lights.add(&light, Vec3::Y));
        assert_eq!(lights.len(), MAX_LIGHTS);
    }

    #[test]
    fn test_fog_grows_with_distance() {
        let fog = Fog::default();
        assert_eq!(fog.factor(0.0), 0.0);
        assert!(fog.factor(10.0) < fog.factor(50.0));
        assert!(fog.factor(1.0e4) > 0.99);
    }

    #[test]
    fn test_gather_uses_world_positions() {
        let ledger = crate::resource::ResourceLedger::new();
        let mut scene = SceneGraph::new(&ledger);
        let group = scene.add_group(scene.root(), "group");
        scene.set_position(group, Vec3::new(0.0, 2.0, 0.0));
        let star = scene.add_light(group, "star", star_light());
        scene.set_position(star, Vec3::new(1.0, 0.0, 0.0));
        let _ = scene.add_light(scene.root(), "ambient", Light::ambient().with_intensity(0.5));

        let lights = LightCollection::gather(&scene);
        assert_eq!(lights.len(), 1);
        assert!((lights.lights[0].world_position - Vec3::new(1.0, 2.0, 0.0)).length() < 1.0e-6);
        assert!((lights.ambient - Vec3::splat(0.5)).length() < 1.0e-6);
    }
}
