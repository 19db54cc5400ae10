//! The decorative snow falling behind the card.

use rand::Rng;

pub const SNOWFALL_COUNT: usize = 120;

/// One looping flake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flake {
    /// Diameter, in pixels.
    pub size: f32,
    /// Horizontal position, in percent of the width.
    pub left: f32,
    /// Seconds to fall across the screen.
    pub duration: f32,
    /// Seconds before the first fall starts.
    pub delay: f32,
    pub opacity: f32,
}

impl Flake {
    /// Vertical progress in `[0, 1)` at `t` seconds, or `None` before the
    /// flake first appears.
    pub fn offset_at(&self, t: f32) -> Option<f32> {
        if t < self.delay || self.duration <= 0.0 {
            return None;
        }

        Some(((t - self.delay) % self.duration) / self.duration)
    }
}

fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

pub fn snowfall<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Flake> {
    (0..count)
        .map(|_| Flake {
            size: random_in(rng, 2.0, 6.0),
            left: random_in(rng, 0.0, 100.0),
            duration: random_in(rng, 6.0, 12.0),
            delay: random_in(rng, 0.0, 6.0),
            opacity: random_in(rng, 0.3, 0.9),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_flakes_loop_after_their_delay() {
        let mut rng = StdRng::seed_from_u64(11);
        let flakes = snowfall(SNOWFALL_COUNT, &mut rng);
        assert_eq!(flakes.len(), SNOWFALL_COUNT);
        assert!(flakes.iter().all(|f| (6.0..12.0).contains(&f.duration)));

        let flake = Flake {
            size: 3.0,
            left: 50.0,
            duration: 8.0,
            delay: 2.0,
            opacity: 0.5,
        };
        assert_eq!(flake.offset_at(1.0), None);
        assert_eq!(flake.offset_at(6.0), Some(0.5));
        assert_eq!(flake.offset_at(14.0), Some(0.5));
    }
}
