//! The states a mounted scene goes through.

use crate::error::{Error, Result};

/// State of one scene instance.
///
/// ```text
/// Unmounted -> Building -> Running <-> Resizing
///                          Running -> Disposing -> Unmounted
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Unmounted,
    Building,
    Running,
    /// Camera and render targets are being resized; the graph is untouched.
    Resizing,
    Disposing,
}

impl LifecycleState {
    /// Whether the machine may go from `self` to `to`.
    pub fn can_transition_to(self, to: LifecycleState) -> bool {
        use LifecycleState::*;

        matches!(
            (self, to),
            (Unmounted, Building)
                | (Building, Running)
                | (Running, Resizing)
                | (Resizing, Running)
                | (Running, Disposing)
                | (Disposing, Unmounted)
        )
    }
}

/// Guards the transitions of a [`LifecycleState`].
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Moves to `to`, or fails with [`Error::Lifecycle`] leaving the state as is.
    pub fn transition(&mut self, to: LifecycleState) -> Result<()> {
        if !self.state.can_transition_to(to) {
            return Err(Error::Lifecycle {
                from: self.state,
                to,
            });
        }

        log::debug!("Lifecycle: {:?} -> {:?}", self.state, to);
        self.state = to;
        Ok(())
    }

    /// Fails unless the scene is running.
    pub fn ensure_running(&self) -> Result<()> {
        if self.state == LifecycleState::Running {
            Ok(())
        } else {
            Err(Error::Lifecycle {
                from: self.state,
                to: LifecycleState::Running,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    #[test]
    fn test_full_cycle() {
        let mut lifecycle = Lifecycle::new();

        for to in [Building, Running, Resizing, Running, Disposing, Unmounted] {
            lifecycle.transition(to).unwrap();
        }
        assert_eq!(lifecycle.state(), Unmounted);
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut lifecycle = Lifecycle::new();

        assert!(matches!(
            lifecycle.transition(Running),
            Err(Error::Lifecycle { from: Unmounted, to: Running })
        ));
        assert_eq!(lifecycle.state(), Unmounted);
        assert!(lifecycle.ensure_running().is_err());

        lifecycle.transition(Building).unwrap();
        assert!(lifecycle.transition(Resizing).is_err());
        assert!(!Resizing.can_transition_to(Disposing));
    }
}
