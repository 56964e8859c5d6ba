/// Generation-checked registry of GPU resources owned by one renderer
///
/// Keys combine a slot index and a generation (slotmap), so a handle to a
/// destroyed resource never aliases a newer one in the same slot. Each table
/// also carries a process-unique id checked on every lookup: handles from
/// another renderer, or from before a re-initialization, resolve to nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Slot index + generation
    pub struct ResourceKey;
}

/// Table ids start at 1; 0 marks the null handle
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Untyped resource handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawHandle {
    table: u64,
    key: ResourceKey,
}

impl RawHandle {
    pub fn is_null(&self) -> bool {
        self.table == 0
    }
}

pub struct ResourceTable<T> {
    id: u64,
    slots: SlotMap<ResourceKey, T>,
}

impl<T> Default for ResourceTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceTable<T> {
    /// Create an empty table with a fresh id
    pub fn new() -> Self {
        Self {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            slots: SlotMap::with_key(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn insert(&mut self, value: T) -> RawHandle {
        RawHandle {
            table: self.id,
            key: self.slots.insert(value),
        }
    }

    pub fn get(&self, handle: RawHandle) -> Option<&T> {
        if handle.table != self.id {
            return None;
        }
        self.slots.get(handle.key)
    }

    pub fn get_mut(&mut self, handle: RawHandle) -> Option<&mut T> {
        if handle.table != self.id {
            return None;
        }
        self.slots.get_mut(handle.key)
    }

    /// Remove an entry. Returns `None` for stale or foreign handles.
    pub fn remove(&mut self, handle: RawHandle) -> Option<T> {
        if handle.table != self.id {
            return None;
        }
        self.slots.remove(handle.key)
    }

    pub fn contains(&self, handle: RawHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.values()
    }

    /// Remove every entry
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.slots.drain().map(|(_, value)| value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resource_table_tests.rs"]
mod tests;
