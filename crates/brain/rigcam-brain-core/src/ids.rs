//! Identifiers and a simple allocator for core entities.
//!
//! `CameraId` is assigned by the host's camera directory and is opaque to the
//! engine; `OverrideId` is handed out by the engine when an override client
//! does not bring its own.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CameraId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct OverrideId(pub u32);

/// Monotonic allocator for OverrideId.
/// IDs are never reused within an engine instance.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_override: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_override(&mut self) -> OverrideId {
        let id = OverrideId(self.next_override);
        self.next_override = self.next_override.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_override(), OverrideId(0));
        assert_eq!(alloc.alloc_override(), OverrideId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_override(), OverrideId(0));
    }
}
