//! The envelope the card arrives in.

/// Seconds between the tap and the envelope being open.
pub const OPENING_DELAY: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnvelopeState {
    Closed,
    /// Opening for the given number of seconds.
    Opening(f32),
    Open,
}

/// A closed envelope opening on the first tap.
#[derive(Clone, Debug)]
pub struct Envelope {
    state: EnvelopeState,
    delay: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope {
            state: EnvelopeState::Closed,
            delay: OPENING_DELAY,
        }
    }
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Taps the envelope.
    ///
    /// Returns `true` only for the tap that starts opening it: the music must
    /// start while handling that same tap.
    pub fn tap(&mut self) -> bool {
        if self.state == EnvelopeState::Closed {
            self.state = EnvelopeState::Opening(0.0);
            true
        } else {
            false
        }
    }

    /// Advances the opening animation. Returns `true` when the envelope just opened.
    pub fn update(&mut self, dt: f32) -> bool {
        if let EnvelopeState::Opening(t) = self.state {
            let t = t + dt.max(0.0);
            if t >= self.delay {
                self.state = EnvelopeState::Open;
                return true;
            }
            self.state = EnvelopeState::Opening(t);
        }
        false
    }

    #[inline]
    pub fn is_opening(&self) -> bool {
        matches!(self.state, EnvelopeState::Opening(_))
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == EnvelopeState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_first_tap_starts_music() {
        let mut envelope = Envelope::new();

        assert!(envelope.tap());
        assert!(!envelope.tap());
        assert!(envelope.is_opening());

        assert!(!envelope.update(0.5));
        assert!(envelope.update(0.5));
        assert!(envelope.is_open());
        assert!(!envelope.tap());
        assert!(!envelope.update(1.0));
    }
}
