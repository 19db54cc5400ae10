use super::{ResourceId, ResourceKind, ResourceLedger};

/// Ledger bookkeeping for one resizable render target.
///
/// The slot owns at most one live `RenderTarget` entry. Resizing to a new size
/// releases the previous entry before allocating the next one, so repeated
/// resizes never grow the live count. Sizes are floored at 1x1.
#[derive(Debug)]
pub struct TargetSlot {
    ledger: ResourceLedger,
    id: Option<ResourceId>,
    width: u32,
    height: u32,
}

impl TargetSlot {
    /// Allocates a slot of the given size.
    pub fn new(ledger: &ResourceLedger, width: u32, height: u32) -> Self {
        TargetSlot {
            ledger: ledger.clone(),
            id: Some(ledger.allocate(ResourceKind::RenderTarget)),
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Reallocates the slot if its size changes.
    ///
    /// Returns `true` if the backing storage must be recreated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));

        if self.id.is_some() && self.width == width && self.height == height {
            return false;
        }

        self.release();
        self.id = Some(self.ledger.allocate(ResourceKind::RenderTarget));
        self.width = width;
        self.height = height;
        true
    }

    /// Releases the slot's ledger entry. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            let _ = self.ledger.release(id);
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for TargetSlot {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_cycles_keep_one_live_entry() {
        let ledger = ResourceLedger::new();
        let mut slot = TargetSlot::new(&ledger, 420, 380);

        for i in 0..50 {
            let _ = slot.resize(300 + i, 200 + 2 * i);
            assert_eq!(ledger.live(ResourceKind::RenderTarget), 1);
        }

        assert!(!slot.resize(349, 298));
        assert!(slot.resize(0, 0));
        assert_eq!(slot.size(), (1, 1));

        slot.release();
        slot.release();
        assert_eq!(ledger.total_live(), 0);
        assert_eq!(ledger.double_releases(), 0);
    }
}
