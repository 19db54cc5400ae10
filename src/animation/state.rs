//! Per-frame animation state of the tree, advanced by a pure step function.

use crate::tree::TreeScene;
use glamx::Quat;

/// Spin speed of the tree before any click, in radians per second.
pub const SPIN_FAST: f32 = 0.12;
/// Spin speed after one click, in radians per second.
pub const SPIN_SLOW: f32 = 0.06;

/// The two speeds the tree can spin at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpinSpeed {
    #[default]
    Fast,
    Slow,
}

impl SpinSpeed {
    /// Angular speed in radians per second.
    pub fn radians_per_second(self) -> f32 {
        match self {
            SpinSpeed::Fast => SPIN_FAST,
            SpinSpeed::Slow => SPIN_SLOW,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SpinSpeed::Fast => SpinSpeed::Slow,
            SpinSpeed::Slow => SpinSpeed::Fast,
        }
    }
}

/// Click handling for the spin speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinControl {
    interactive: bool,
    speed: SpinSpeed,
}

impl SpinControl {
    pub fn new(interactive: bool) -> Self {
        SpinControl {
            interactive,
            speed: SpinSpeed::default(),
        }
    }

    /// Toggles the speed if the scene is interactive; otherwise does nothing.
    ///
    /// Returns the speed in effect after the click.
    pub fn click(&mut self) -> SpinSpeed {
        if self.interactive {
            self.speed = self.speed.toggled();
        }
        self.speed
    }

    #[inline]
    pub fn speed(&self) -> SpinSpeed {
        self.speed
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Everything the animation changes from one frame to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    /// Seconds since the scene was created.
    pub elapsed: f32,
    /// Current spin speed, in radians per second.
    pub spin: f32,
    pub tree_rotation_y: f32,
    pub tree_tilt_x: f32,
    pub ornament_intensity: Vec<f32>,
    pub garland_intensity: Vec<f32>,
    pub star_intensity: f32,
    pub starfield_opacity: f32,
}

impl SceneState {
    /// The state at time zero for a scene with the given decorations.
    pub fn new(ornaments: usize, bulbs: usize) -> Self {
        let empty = SceneState {
            elapsed: 0.0,
            spin: SPIN_FAST,
            tree_rotation_y: 0.0,
            tree_tilt_x: 0.0,
            ornament_intensity: vec![0.0; ornaments],
            garland_intensity: vec![0.0; bulbs],
            star_intensity: 0.0,
            starfield_opacity: 0.0,
        };
        advance(&empty, 0.0)
    }

    /// The state at time zero for `scene`.
    pub fn for_scene(scene: &TreeScene) -> Self {
        Self::new(scene.ornaments().len(), scene.bulbs().len())
    }

    /// Writes this state into the materials and transforms of `scene`.
    ///
    /// Handles that no longer resolve, after disposal for instance, are skipped.
    pub fn apply(&self, scene: &mut TreeScene) {
        let tree = scene.tree();
        let star = scene.star();
        let starfield = scene.starfield();
        let (graph, ornaments, bulbs) = scene.graph_and_decorations();

        graph.set_rotation(
            tree,
            Quat::from_rotation_x(self.tree_tilt_x) * Quat::from_rotation_y(self.tree_rotation_y),
        );

        let ornaments = ornaments.iter().zip(&self.ornament_intensity);
        let bulbs = bulbs.iter().zip(&self.garland_intensity);
        for (&id, &intensity) in ornaments.chain(bulbs) {
            if let Some(object) = graph.object_mut(id) {
                object.material_mut().emissive_intensity = intensity;
            }
        }

        if let Some(object) = graph.object_mut(star) {
            object.material_mut().emissive_intensity = self.star_intensity;
        }
        if let Some(object) = graph.object_mut(starfield) {
            object.material_mut().opacity = self.starfield_opacity;
        }
    }
}

/// Advances `state` by `dt` seconds.
///
/// Negative or non-finite steps are treated as zero. The result only depends
/// on the new elapsed time, the spin speed and the decoration counts.
pub fn advance(state: &SceneState, dt: f32) -> SceneState {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let t = state.elapsed + dt;

    SceneState {
        elapsed: t,
        spin: state.spin,
        tree_rotation_y: t * state.spin,
        tree_tilt_x: (t * 0.4).sin() * 0.03,
        ornament_intensity: (0..state.ornament_intensity.len())
            .map(|i| 0.4 + 0.3 * (t * 2.0 + i as f32 * 0.6).sin())
            .collect(),
        garland_intensity: (0..state.garland_intensity.len())
            .map(|i| 0.35 + 0.35 * (t * 2.5 + i as f32 * 0.25).sin())
            .collect(),
        star_intensity: 0.6 + 0.3 * (t * 1.8).sin(),
        starfield_opacity: 0.85 + 0.15 * (t * 0.7).sin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SceneState::new(3, 2);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.tree_rotation_y, 0.0);
        assert!((state.ornament_intensity[0] - 0.4).abs() < 1.0e-6);
        assert!((state.garland_intensity[0] - 0.35).abs() < 1.0e-6);
        assert!((state.star_intensity - 0.6).abs() < 1.0e-6);
        assert!((state.starfield_opacity - 0.85).abs() < 1.0e-6);
    }

    #[test]
    fn test_invalid_steps_do_not_move_time() {
        let state = SceneState::new(1, 1);
        assert_eq!(advance(&state, -1.0).elapsed, 0.0);
        assert_eq!(advance(&state, f32::NAN).elapsed, 0.0);
    }

    #[test]
    fn test_neighbouring_ornaments_are_out_of_phase() {
        let state = advance(&SceneState::new(4, 0), 1.3);
        assert_ne!(state.ornament_intensity[0], state.ornament_intensity[1]);
        assert!(state
            .ornament_intensity
            .iter()
            .all(|i| (0.1 - 1.0e-6..=0.7 + 1.0e-6).contains(i)));
    }
}
