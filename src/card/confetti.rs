//! The confetti thrown while the envelope opens.

use crate::color::{Color, CONFETTI_PALETTE};
use glamx::Vec2;
use rand::Rng;

pub const CONFETTI_COUNT: usize = 60;
/// Farthest distance a piece flies, in pixels.
pub const CONFETTI_SPREAD: f32 = 420.0;
/// Nominal flight time, in seconds.
pub const CONFETTI_DURATION: f32 = 1.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfettiShape {
    Square,
    Round,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Where the piece lands, relative to the burst center.
    pub offset: Vec2,
    /// Final rotation, in degrees.
    pub rotation: f32,
    /// Side length, in pixels.
    pub size: f32,
    /// Flight time, in seconds.
    pub duration: f32,
    pub color: Color,
    pub shape: ConfettiShape,
}

impl ConfettiPiece {
    /// Position at `t` seconds after the burst, easing out to `offset`.
    pub fn position_at(&self, t: f32) -> Vec2 {
        let p = (t / self.duration).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        self.offset * eased
    }

    /// Whether the piece has landed and faded out.
    pub fn is_done(&self, t: f32) -> bool {
        t >= self.duration
    }
}

/// Throws `count` pieces in random directions.
pub fn confetti_burst<R: Rng + ?Sized>(
    count: usize,
    spread: f32,
    duration: f32,
    rng: &mut R,
) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|i| {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let distance = (0.45 + rng.random::<f32>() * 0.55) * spread;
            let rotation = rng.random::<f32>() * 360.0;
            let size = 6.0 + rng.random::<f32>() * 8.0;
            let duration = duration * (0.8 + rng.random::<f32>() * 0.6);
            let shape = match rng.random::<f32>() {
                s if s > 0.66 => ConfettiShape::Triangle,
                s if s > 0.33 => ConfettiShape::Round,
                _ => ConfettiShape::Square,
            };

            ConfettiPiece {
                offset: Vec2::from_angle(angle) * distance,
                rotation,
                size,
                duration,
                color: CONFETTI_PALETTE[i % CONFETTI_PALETTE.len()],
                shape,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let pieces = confetti_burst(CONFETTI_COUNT, CONFETTI_SPREAD, CONFETTI_DURATION, &mut rng);

        assert_eq!(pieces.len(), CONFETTI_COUNT);
        for piece in &pieces {
            let d = piece.offset.length();
            assert!(d >= 0.45 * CONFETTI_SPREAD - 1.0e-3 && d <= CONFETTI_SPREAD + 1.0e-3);
            assert!((6.0..14.0).contains(&piece.size));
            assert!(piece.duration >= 0.8 * CONFETTI_DURATION - 1.0e-6);
            assert!(piece.duration < 1.4 * CONFETTI_DURATION);
            assert_eq!(piece.position_at(0.0), Vec2::ZERO);
            assert!((piece.position_at(piece.duration) - piece.offset).length() < 1.0e-3);
        }
        assert_eq!(pieces[1].color, CONFETTI_PALETTE[1]);
    }
}
