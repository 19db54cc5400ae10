//! Accounting of the GPU-backed resources owned by a mounted card.
//!
//! Every geometry, material and render target the card creates is registered
//! here and released exactly once. The ledger never touches the GPU, so the
//! disposal discipline can be checked without a device.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// The family a tracked resource belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Geometry,
    Material,
    RenderTarget,
}

/// Handle of one tracked resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    kind: ResourceKind,
    serial: u64,
}

impl ResourceId {
    /// The family of this resource.
    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

#[derive(Default)]
struct LedgerState {
    next_serial: u64,
    live: HashSet<ResourceId>,
    double_releases: usize,
}

/// A shared registry of live resources.
///
/// Cloning the ledger gives another handle on the same registry.
#[derive(Clone, Default)]
pub struct ResourceLedger {
    state: Rc<RefCell<LedgerState>>,
}

impl ResourceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new live resource.
    pub fn allocate(&self, kind: ResourceKind) -> ResourceId {
        let mut state = self.state.borrow_mut();
        let id = ResourceId {
            kind,
            serial: state.next_serial,
        };
        state.next_serial += 1;
        let _ = state.live.insert(id);
        id
    }

    /// Releases a resource.
    ///
    /// Returns `false`, and logs a warning, if `id` was already released.
    pub fn release(&self, id: ResourceId) -> bool {
        let mut state = self.state.borrow_mut();

        if state.live.remove(&id) {
            true
        } else {
            state.double_releases += 1;
            log::warn!("Resource {:?} #{} released twice.", id.kind, id.serial);
            false
        }
    }

    /// Whether `id` is still live.
    pub fn is_live(&self, id: ResourceId) -> bool {
        self.state.borrow().live.contains(&id)
    }

    /// Number of live resources of the given kind.
    pub fn live(&self, kind: ResourceKind) -> usize {
        self.state
            .borrow()
            .live
            .iter()
            .filter(|id| id.kind == kind)
            .count()
    }

    /// Number of live resources of every kind.
    pub fn total_live(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Number of resources ever allocated through this ledger.
    pub fn total_allocated(&self) -> u64 {
        self.state.borrow().next_serial
    }

    /// Number of rejected releases of already released resources.
    pub fn double_releases(&self) -> usize {
        self.state.borrow().double_releases
    }
}

impl std::fmt::Debug for ResourceLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceLedger")
            .field("geometries", &self.live(ResourceKind::Geometry))
            .field("materials", &self.live(ResourceKind::Material))
            .field("render_targets", &self.live(ResourceKind::RenderTarget))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release_per_kind() {
        let ledger = ResourceLedger::new();
        let g = ledger.allocate(ResourceKind::Geometry);
        let m = ledger.allocate(ResourceKind::Material);
        let _t = ledger.allocate(ResourceKind::RenderTarget);

        assert_eq!(ledger.total_live(), 3);
        assert_eq!(ledger.live(ResourceKind::Geometry), 1);
        assert!(ledger.release(g));
        assert!(ledger.release(m));
        assert_eq!(ledger.total_live(), 1);
        assert_eq!(ledger.live(ResourceKind::RenderTarget), 1);
    }

    #[test]
    fn test_double_release_is_rejected_without_panicking() {
        let ledger = ResourceLedger::new();
        let clone = ledger.clone();
        let id = ledger.allocate(ResourceKind::Material);

        assert!(clone.release(id));
        assert!(!ledger.release(id));
        assert!(!ledger.is_live(id));
        assert_eq!(ledger.double_releases(), 1);
    }
}
