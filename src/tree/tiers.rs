//! The layered silhouette of the tree.

/// Height of the trunk, which is also where the lowest tier starts.
pub const TRUNK_HEIGHT: f32 = 1.8;
pub const TRUNK_RADIUS_TOP: f32 = 0.35;
pub const TRUNK_RADIUS_BOTTOM: f32 = 0.42;

/// Distance below a tier's base where its base radius still applies.
pub const BASE_TOLERANCE: f32 = 0.15;
/// Smallest radius the silhouette ever reports.
pub const RADIUS_FLOOR: f32 = 0.05;

/// One cone of stacked foliage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierSpec {
    pub height: f32,
    /// Radius at the base of the cone.
    pub radius: f32,
    pub y_bottom: f32,
}

impl TierSpec {
    #[inline]
    pub fn y_top(&self) -> f32 {
        self.y_bottom + self.height
    }

    /// Radius of this cone at height `y`, if `y` lies within it.
    #[inline]
    pub fn radius_at(&self, y: f32) -> Option<f32> {
        let rel = y - self.y_bottom;
        (0.0..=self.height)
            .contains(&rel)
            .then(|| self.radius * (1.0 - rel / self.height))
    }
}

/// The four tiers, from the bottom up. Each one overlaps the previous.
pub const TREE_TIERS: [TierSpec; 4] = [
    TierSpec {
        height: 1.20,
        radius: 1.80,
        y_bottom: TRUNK_HEIGHT - 0.05,
    },
    TierSpec {
        height: 1.00,
        radius: 1.50,
        y_bottom: TRUNK_HEIGHT + 1.20 - 0.35,
    },
    TierSpec {
        height: 0.85,
        radius: 1.20,
        y_bottom: TRUNK_HEIGHT + 1.00 + 1.20 - 0.65,
    },
    TierSpec {
        height: 0.70,
        radius: 0.95,
        y_bottom: TRUNK_HEIGHT + 0.85 + 1.00 + 1.20 - 0.95,
    },
];

/// Radius profile of a stack of tiers.
#[derive(Clone, Debug, PartialEq)]
pub struct Silhouette {
    tiers: Vec<TierSpec>,
}

impl Default for Silhouette {
    fn default() -> Self {
        Silhouette::new(&TREE_TIERS)
    }
}

impl Silhouette {
    /// Creates a silhouette from tiers listed from the bottom up.
    pub fn new(tiers: &[TierSpec]) -> Self {
        Silhouette {
            tiers: tiers.to_vec(),
        }
    }

    #[inline]
    pub fn tiers(&self) -> &[TierSpec] {
        &self.tiers
    }

    /// Height of the tip of the highest tier.
    pub fn top_y(&self) -> f32 {
        self.tiers.last().map_or(TRUNK_HEIGHT, TierSpec::y_top)
    }

    /// Radius of the foliage surface at height `y`.
    ///
    /// This is the largest radius among the tiers spanning `y`, where a tier
    /// also claims its full base radius slightly below its base (within
    /// [`BASE_TOLERANCE`]). The result never drops below [`RADIUS_FLOOR`].
    pub fn radius_at_layered(&self, y: f32) -> f32 {
        let r = self.tiers.iter().fold(0.0f32, |r, tier| {
            let rel = y - tier.y_bottom;
            match tier.radius_at(y) {
                Some(rr) => r.max(rr),
                None if rel < 0.0 && rel > -BASE_TOLERANCE => r.max(tier.radius),
                None => r,
            }
        });

        r.max(RADIUS_FLOOR)
    }

    /// Heights where [`radius_at_layered`](Self::radius_at_layered) may jump
    /// up: just above each tier's base tolerance. Between two consecutive
    /// breakpoints the radius never increases with height.
    pub fn breakpoints(&self) -> Vec<f32> {
        let mut points: Vec<f32> = self
            .tiers
            .iter()
            .map(|t| t.y_bottom - BASE_TOLERANCE)
            .collect();
        points.sort_by(f32::total_cmp);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        let silhouette = Silhouette::default();
        let bottoms: Vec<f32> = silhouette.tiers().iter().map(|t| t.y_bottom).collect();
        let expected = [1.75, 2.65, 3.35, 3.90];

        for (b, e) in bottoms.iter().zip(expected) {
            assert!((b - e).abs() < 1.0e-5);
        }
        assert!((silhouette.top_y() - 4.60).abs() < 1.0e-5);
    }

    #[test]
    fn test_radius_inside_a_single_tier() {
        let silhouette = Silhouette::default();
        // Halfway up the lowest tier, no other tier reaches down that far.
        assert!((silhouette.radius_at_layered(2.35) - 0.9).abs() < 1.0e-5);
        // Just below the lowest tier's base, within the tolerance.
        assert!((silhouette.radius_at_layered(1.70) - 1.8).abs() < 1.0e-5);
        // On the trunk, far below any tier.
        assert_eq!(silhouette.radius_at_layered(0.5), RADIUS_FLOOR);
        assert_eq!(silhouette.radius_at_layered(10.0), RADIUS_FLOOR);
    }

    #[test]
    fn test_higher_tier_takes_over_near_its_base() {
        let silhouette = Silhouette::default();
        assert!((silhouette.radius_at_layered(2.60) - 1.5).abs() < 1.0e-5);
    }
}
