use std::{cell::Cell, rc::Rc};

/// Shared flag flipped once when the owning view goes away.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Monotonic counter used to drop results of superseded loads.
#[derive(Clone, Debug, Default)]
pub struct LoadGeneration {
    current: Rc<Cell<u64>>,
}

#[derive(Clone, Debug)]
pub struct LoadTicket {
    generation: u64,
    source: Rc<Cell<u64>>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        LoadTicket {
            generation: next,
            source: Rc::clone(&self.current),
        }
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }
}

impl LoadTicket {
    pub fn is_current(&self) -> bool {
        self.source.get() == self.generation
    }
}
