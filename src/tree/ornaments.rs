//! Ornament rings hung around the silhouette.

use super::tiers::{Silhouette, TRUNK_HEIGHT};
use crate::color::{Color, ORNAMENT_PALETTE};
use glamx::Vec3;
use rand::Rng;

/// One ring of ornaments: `count` spheres around the tree at height `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub y: f32,
    pub count: usize,
}

/// The ordered rings of ornaments.
#[derive(Clone, Debug, PartialEq)]
pub struct RingPlan {
    rings: Vec<Ring>,
}

impl RingPlan {
    pub fn new(rings: Vec<Ring>) -> Self {
        RingPlan { rings }
    }

    /// The default plan: one ring over the trunk, then rings at fixed
    /// fractions of each tier's height.
    pub fn for_silhouette(silhouette: &Silhouette) -> Self {
        const FRACTIONS: [(usize, f32, usize); 5] =
            [(0, 0.35, 12), (0, 0.75, 12), (1, 0.50, 12), (2, 0.50, 10), (3, 0.50, 8)];

        let mut rings = vec![Ring {
            y: TRUNK_HEIGHT + 0.5,
            count: 10,
        }];

        rings.extend(FRACTIONS.iter().filter_map(|&(tier, fraction, count)| {
            silhouette.tiers().get(tier).map(|t| Ring {
                y: t.y_bottom + t.height * fraction,
                count,
            })
        }));

        RingPlan { rings }
    }

    #[inline]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Total number of ornaments placed by this plan.
    pub fn total(&self) -> usize {
        self.rings.iter().map(|r| r.count).sum()
    }
}

/// Random spread of the ornaments around their nominal ring position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentSettings {
    /// Distance kept between the foliage surface and the ring.
    pub margin: f32,
    /// Largest extra angle added to the evenly spaced one, in radians.
    pub angle_jitter: f32,
    /// Range of the factor applied to the ring radius.
    pub radius_factor: (f32, f32),
    /// Largest vertical offset, both up and down.
    pub vertical_jitter: f32,
    /// Range of the sphere radii.
    pub size: (f32, f32),
    /// Emissive intensity before the first animated frame.
    pub emissive_base: f32,
}

impl Default for OrnamentSettings {
    fn default() -> Self {
        OrnamentSettings {
            margin: 0.12,
            angle_jitter: 0.4,
            radius_factor: (0.90, 0.98),
            vertical_jitter: 0.09,
            size: (0.11, 0.16),
            emissive_base: 0.8,
        }
    }
}

/// Where and how one ornament is hung.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentPlacement {
    pub position: Vec3,
    /// Radius of the ornament sphere.
    pub size: f32,
    pub color: Color,
    pub emissive_base: f32,
}

/// Places every ornament of `plan`.
///
/// The vertical jitter is applied first, so the ring radius follows the
/// foliage at the ornament's final height. The radius factor then pulls the
/// ornament inward, but never below the foliage surface: every ornament ends up
/// between `radius_at_layered(y)` and `radius_at_layered(y) + margin` from the
/// axis.
pub fn place_ornaments<R: Rng + ?Sized>(
    plan: &RingPlan,
    silhouette: &Silhouette,
    settings: &OrnamentSettings,
    rng: &mut R,
) -> Vec<OrnamentPlacement> {
    let mut placements = Vec::with_capacity(plan.total());

    for ring in plan.rings() {
        for i in 0..ring.count {
            let angle = i as f32 / ring.count as f32 * std::f32::consts::TAU
                + rng.random::<f32>() * settings.angle_jitter;
            let factor = lerp(settings.radius_factor, rng.random());
            let size = lerp(settings.size, rng.random());
            let y = ring.y + (rng.random::<f32>() - 0.5) * 2.0 * settings.vertical_jitter;

            let surface = silhouette.radius_at_layered(y);
            let r = ((surface + settings.margin) * factor).max(surface);
            let color = ORNAMENT_PALETTE[i % ORNAMENT_PALETTE.len()];

            placements.push(OrnamentPlacement {
                position: Vec3::new(angle.cos() * r, y, angle.sin() * r),
                size,
                color,
                emissive_base: settings.emissive_base,
            });
        }
    }

    placements
}

#[inline]
fn lerp((lo, hi): (f32, f32), t: f32) -> f32 {
    lo + (hi - lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_plan() {
        let plan = RingPlan::for_silhouette(&Silhouette::default());
        let counts: Vec<usize> = plan.rings().iter().map(|r| r.count).collect();

        assert_eq!(counts, [10, 12, 12, 12, 10, 8]);
        assert_eq!(plan.total(), 64);
        assert!((plan.rings()[0].y - 2.3).abs() < 1.0e-5);
        assert!((plan.rings()[1].y - 2.17).abs() < 1.0e-5);
    }

    #[test]
    fn test_colors_cycle_within_each_ring() {
        let silhouette = Silhouette::default();
        let plan = RingPlan::new(vec![Ring { y: 2.5, count: 8 }]);
        let mut rng = StdRng::seed_from_u64(3);
        let placed = place_ornaments(&plan, &silhouette, &OrnamentSettings::default(), &mut rng);

        assert_eq!(placed[0].color, ORNAMENT_PALETTE[0]);
        assert_eq!(placed[6].color, ORNAMENT_PALETTE[0]);
        assert_eq!(placed[7].color, ORNAMENT_PALETTE[1]);
    }
}
