//! The process-wide audio engine used for sound effects.

use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Sample rate of the engine.
pub const SAMPLE_RATE: u32 = 48_000;

thread_local! {
    static ENGINE: RefCell<Option<Rc<AudioEngine>>> = const { RefCell::new(None) };
    static USERS: Cell<usize> = const { Cell::new(0) };
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Shared audio state, created on first use and torn down after its last user.
#[derive(Debug)]
pub struct AudioEngine {
    sample_rate: u32,
    generation: u64,
}

impl AudioEngine {
    /// Registers a user of the engine, creating it if needed.
    ///
    /// The engine lives until every returned guard is dropped. Acquiring
    /// while it is alive returns the same engine.
    pub fn acquire() -> AudioEngineGuard {
        let engine = ENGINE.with(|cell| {
            cell.borrow_mut()
                .get_or_insert_with(|| {
                    let generation = GENERATION.with(|g| {
                        g.set(g.get() + 1);
                        g.get()
                    });
                    log::debug!("Starting audio engine #{}.", generation);
                    Rc::new(AudioEngine {
                        sample_rate: SAMPLE_RATE,
                        generation,
                    })
                })
                .clone()
        });

        USERS.with(|users| users.set(users.get() + 1));
        AudioEngineGuard { engine }
    }

    /// Whether an engine is currently alive.
    pub fn is_initialized() -> bool {
        ENGINE.with(|cell| cell.borrow().is_some())
    }

    /// Number of live guards.
    pub fn users() -> usize {
        USERS.with(Cell::get)
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Increases each time a new engine is created.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Keeps the engine alive.
#[derive(Debug)]
pub struct AudioEngineGuard {
    engine: Rc<AudioEngine>,
}

impl std::ops::Deref for AudioEngineGuard {
    type Target = AudioEngine;

    fn deref(&self) -> &AudioEngine {
        &self.engine
    }
}

impl Drop for AudioEngineGuard {
    fn drop(&mut self) {
        let last = USERS.with(|users| {
            let remaining = users.get().saturating_sub(1);
            users.set(remaining);
            remaining == 0
        });

        if last {
            ENGINE.with(|cell| *cell.borrow_mut() = None);
            log::debug!("Audio engine #{} stopped.", self.engine.generation);
        }
    }
}

/// Length of the swipe noise, in seconds.
pub const SWIPE_DURATION: f32 = 0.25;
/// Time to reach the peak gain, in seconds.
pub const SWIPE_ATTACK: f32 = 0.03;
pub const SWIPE_PEAK_GAIN: f32 = 0.35;
/// Cutoff of the low-pass filter softening the noise.
pub const SWIPE_CUTOFF_HZ: f32 = 1600.0;

/// Gain of the swipe envelope at `t` seconds: a linear attack to the peak,
/// then a linear release to silence at the end of the sound.
pub fn swipe_gain(t: f32) -> f32 {
    if t <= 0.0 || t >= SWIPE_DURATION {
        0.0
    } else if t < SWIPE_ATTACK {
        SWIPE_PEAK_GAIN * t / SWIPE_ATTACK
    } else {
        SWIPE_PEAK_GAIN * (SWIPE_DURATION - t) / (SWIPE_DURATION - SWIPE_ATTACK)
    }
}

/// The mono "whoosh" played when snow is swept away: low-passed white noise
/// shaped by [`swipe_gain`].
pub fn swipe_noise<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R) -> Vec<f32> {
    let rate = sample_rate.max(1) as f32;
    let len = (rate * SWIPE_DURATION) as usize;
    let alpha = 1.0 - (-std::f32::consts::TAU * SWIPE_CUTOFF_HZ / rate).exp();
    let mut filtered = 0.0;

    (0..len)
        .map(|i| {
            let noise = (rng.random::<f32>() * 2.0 - 1.0) * 0.5;
            filtered += alpha * (noise - filtered);
            filtered * swipe_gain(i as f32 / rate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_engine_lives_while_guarded() {
        assert!(!AudioEngine::is_initialized());

        let first = AudioEngine::acquire();
        let second = AudioEngine::acquire();
        assert_eq!(first.generation(), second.generation());
        assert_eq!(AudioEngine::users(), 2);

        drop(first);
        assert!(AudioEngine::is_initialized());
        let generation = second.generation();
        drop(second);
        assert!(!AudioEngine::is_initialized());

        let third = AudioEngine::acquire();
        assert_eq!(third.generation(), generation + 1);
    }

    #[test]
    fn test_swipe_noise_envelope() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = swipe_noise(8000, &mut rng);

        assert_eq!(samples.len(), 2000);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= SWIPE_PEAK_GAIN * 0.5 + 1.0e-6));
        assert!((swipe_gain(SWIPE_ATTACK) - SWIPE_PEAK_GAIN).abs() < 1.0e-6);
    }
}
