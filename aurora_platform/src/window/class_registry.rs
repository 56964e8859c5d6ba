/// Reference-counted registry of native window classes
///
/// A class is registered with the platform when its first window is created
/// and unregistered when its last window is destroyed. The registry is owned
/// by the `SystemFactory` that creates the windows.

use rustc_hash::FxHashMap;
use crate::platform_debug;

const SOURCE: &str = "aurora::Window";

#[derive(Debug, Default)]
pub struct WindowClassRegistry {
    classes: FxHashMap<String, u32>,
}

impl WindowClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a reference on `class_name`. Returns `true` when this call
    /// registered the class.
    pub fn acquire(&mut self, class_name: &str) -> bool {
        let count = self.classes.entry(class_name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            platform_debug!(SOURCE, "Registered window class '{}'", class_name);
            true
        } else {
            false
        }
    }

    /// Drop a reference on `class_name`. Returns `true` when this call
    /// unregistered the class. Releasing an unknown class does nothing.
    pub fn release(&mut self, class_name: &str) -> bool {
        let Some(count) = self.classes.get_mut(class_name) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.classes.remove(class_name);
            platform_debug!(SOURCE, "Unregistered window class '{}'", class_name);
            true
        } else {
            false
        }
    }

    pub fn ref_count(&self, class_name: &str) -> u32 {
        self.classes.get(class_name).copied().unwrap_or(0)
    }

    pub fn is_registered(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Number of classes currently registered
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "class_registry_tests.rs"]
mod tests;
