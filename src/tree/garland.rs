//! The spiral light garland.

use super::tiers::{Silhouette, TRUNK_HEIGHT};
use crate::color::{Color, ORNAMENT_PALETTE};
use glamx::Vec3;

/// Shape of the garland spiral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GarlandSpec {
    /// Number of full turns around the tree.
    pub turns: f32,
    /// Number of bulbs.
    pub steps: usize,
    pub y_start: f32,
    pub y_end: f32,
    /// Distance kept between the foliage surface and the bulbs.
    pub margin: f32,
    pub bulb_radius: f32,
    /// Emissive intensity before the first animated frame.
    pub emissive_base: f32,
}

impl GarlandSpec {
    /// The default garland, from just above the trunk to just below the tip.
    pub fn for_silhouette(silhouette: &Silhouette) -> Self {
        GarlandSpec {
            turns: 5.0,
            steps: 160,
            y_start: TRUNK_HEIGHT + 0.35,
            y_end: silhouette.top_y() - 0.10,
            margin: 0.08,
            bulb_radius: 0.06,
            emissive_base: 0.6,
        }
    }
}

/// One bulb of the garland.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GarlandBulb {
    pub position: Vec3,
    pub color: Color,
}

/// Samples the garland spiral.
///
/// Bulb `i` sits at parameter `t = i / (steps - 1)`: its height interpolates
/// linearly from `y_start` to `y_end` and its angle is `t · turns · 2π`.
pub fn garland_bulbs(spec: &GarlandSpec, silhouette: &Silhouette) -> Vec<GarlandBulb> {
    let last = spec.steps.saturating_sub(1).max(1) as f32;

    (0..spec.steps)
        .map(|i| {
            let t = i as f32 / last;
            let y = spec.y_start + (spec.y_end - spec.y_start) * t;
            let r = silhouette.radius_at_layered(y) + spec.margin;
            let theta = t * spec.turns * std::f32::consts::TAU;

            GarlandBulb {
                position: Vec3::new(theta.cos() * r, y, theta.sin() * r),
                color: ORNAMENT_PALETTE[i % ORNAMENT_PALETTE.len()],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bulb_garland_sits_at_the_start() {
        let silhouette = Silhouette::default();
        let spec = GarlandSpec {
            steps: 1,
            ..GarlandSpec::for_silhouette(&silhouette)
        };
        let bulbs = garland_bulbs(&spec, &silhouette);

        assert_eq!(bulbs.len(), 1);
        assert_eq!(bulbs[0].position.y, spec.y_start);
    }

    #[test]
    fn test_bulbs_hug_the_foliage() {
        let silhouette = Silhouette::default();
        let spec = GarlandSpec::for_silhouette(&silhouette);

        for bulb in garland_bulbs(&spec, &silhouette) {
            let p = bulb.position;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            let expected = silhouette.radius_at_layered(p.y) + spec.margin;
            assert!((r - expected).abs() < 1.0e-4);
        }
    }
}
