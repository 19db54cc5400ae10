//! Snow piling up over the whole card until it is swept away.

use glamx::Vec2;
use rand::Rng;

/// Thresholds and rates of the accumulation overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowSettings {
    pub flakes_per_frame: usize,
    /// Flake radius range, in pixels.
    pub size: (f32, f32),
    /// Fall speed range, in pixels per second.
    pub speed: (f32, f32),
    pub max_flakes: usize,
    /// Longest step simulated at once, in seconds.
    pub max_dt: f32,
    /// Fraction of the remaining clear area covered each frame.
    pub fade: f32,
    /// Level at which the overlay counts as full and shows the hint.
    pub full_level: f32,
    /// Level at or below which the hint hides.
    pub hint_hide_level: f32,
    /// Level removed by one sweep.
    pub clear_amount: f32,
    /// Radius of the area swept around each pointer, in pixels.
    pub clear_radius: f32,
    /// Seconds between two automatic refills.
    pub refill_interval: f32,
}

impl Default for SnowSettings {
    fn default() -> Self {
        SnowSettings {
            flakes_per_frame: 10,
            size: (2.0, 5.0),
            speed: (30.0, 80.0),
            max_flakes: 2000,
            max_dt: 0.05,
            fade: 0.10,
            full_level: 0.85,
            hint_hide_level: 0.05,
            clear_amount: 0.2,
            clear_radius: 36.0,
            refill_interval: 300.0,
        }
    }
}

/// A falling or settled flake of the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowFlake {
    pub position: Vec2,
    pub radius: f32,
    /// Zero once the flake has settled.
    pub speed: f32,
}

/// Whether a pointer gesture sweeps snow: two fingers on a touch screen,
/// or a mouse drag holding Shift or the right button.
pub fn is_clear_gesture(touches: usize, shift: bool, right_button: bool) -> bool {
    touches >= 2 || (touches == 0 && (shift || right_button))
}

/// The accumulation overlay.
#[derive(Clone, Debug)]
pub struct SnowAccumulation {
    settings: SnowSettings,
    size: Vec2,
    flakes: Vec<SnowFlake>,
    level: f32,
    full: bool,
    hint_visible: bool,
    since_refill: f32,
}

impl SnowAccumulation {
    pub fn new(width: f32, height: f32, settings: SnowSettings) -> Self {
        SnowAccumulation {
            settings,
            size: Vec2::new(width.max(1.0), height.max(1.0)),
            flakes: Vec::new(),
            level: 0.0,
            full: false,
            hint_visible: false,
            since_refill: 0.0,
        }
    }

    #[inline]
    pub fn settings(&self) -> &SnowSettings {
        &self.settings
    }

    #[inline]
    pub fn flakes(&self) -> &[SnowFlake] {
        &self.flakes
    }

    /// Approximate covered fraction of the screen, in `[0, 1]`.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    #[inline]
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Covers the whole screen at once.
    pub fn fill(&mut self) {
        self.level = 1.0;
        self.full = true;
        self.hint_visible = true;
    }

    /// Spawns, moves and settles flakes, then thickens the layer.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let wall_dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let dt = wall_dt.min(self.settings.max_dt);
        let s = self.settings;

        for _ in 0..s.flakes_per_frame {
            self.flakes.push(SnowFlake {
                position: Vec2::new(rng.random::<f32>() * self.size.x, -10.0),
                radius: s.size.0 + rng.random::<f32>() * (s.size.1 - s.size.0),
                speed: s.speed.0 + rng.random::<f32>() * (s.speed.1 - s.speed.0),
            });
        }

        let ground = self.size.y - 2.0;
        for flake in &mut self.flakes {
            flake.position.y += flake.speed * dt;
            if flake.position.y > ground {
                flake.position.y = ground;
                flake.speed = 0.0;
            }
        }

        if self.flakes.len() > s.max_flakes {
            let excess = self.flakes.len() - s.max_flakes;
            let _ = self.flakes.drain(..excess);
        }

        self.level = 1.0 - (1.0 - self.level) * (1.0 - s.fade);
        self.full = self.level >= s.full_level;
        if self.full {
            self.hint_visible = true;
        }
        if self.level <= s.hint_hide_level {
            self.hint_visible = false;
        }

        self.since_refill += wall_dt;
        if self.since_refill >= s.refill_interval {
            self.since_refill = 0.0;
            self.fill();
        }
    }

    /// Sweeps the snow around `points`. Returns the number of settled
    /// flakes removed.
    pub fn clear_at(&mut self, points: &[Vec2]) -> usize {
        self.hint_visible = false;
        self.level = (self.level - self.settings.clear_amount).max(0.0);
        self.full = false;

        let radius = self.settings.clear_radius;
        let before = self.flakes.len();
        self.flakes
            .retain(|f| points.iter().all(|p| p.distance(f.position) > radius));
        before - self.flakes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_accumulation_fills_and_sweeps() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut snow = SnowAccumulation::new(800.0, 600.0, SnowSettings::default());

        snow.update(1.0 / 60.0, &mut rng);
        assert!((snow.level() - 0.1).abs() < 1.0e-6);
        assert!(!snow.is_full());

        for _ in 0..30 {
            snow.update(1.0 / 60.0, &mut rng);
        }
        assert!(snow.is_full());
        assert!(snow.hint_visible());

        let level = snow.level();
        let _ = snow.clear_at(&[Vec2::new(400.0, 598.0)]);
        assert!((snow.level() - (level - 0.2)).abs() < 1.0e-6);
        assert!(!snow.is_full());
        assert!(!snow.hint_visible());
    }

    #[test]
    fn test_flakes_are_capped_and_settle() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut snow = SnowAccumulation::new(100.0, 50.0, SnowSettings::default());

        for _ in 0..400 {
            snow.update(1.0, &mut rng);
        }
        assert_eq!(snow.flakes().len(), 2000);
        assert!(snow.flakes().iter().all(|f| f.position.y <= 48.0));
    }

    #[test]
    fn test_refill_and_gestures() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = SnowSettings {
            refill_interval: 1.0,
            ..Default::default()
        };
        let mut snow = SnowAccumulation::new(100.0, 100.0, settings);

        snow.update(1.0, &mut rng);
        assert_eq!(snow.level(), 1.0);

        assert!(is_clear_gesture(2, false, false));
        assert!(is_clear_gesture(0, true, false));
        assert!(is_clear_gesture(0, false, true));
        assert!(!is_clear_gesture(1, true, false));
        assert!(!is_clear_gesture(0, false, false));
    }
}
