//! Process-local slot storage. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{SlotError, SlotStorage};

#[derive(Default)]
pub struct MemorySlots {
    slots: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without counting it as a write.
    #[cfg(test)]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let slots = Self::default();
        if let Ok(mut map) = slots.slots.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        slots
    }

    /// Number of successful `set` calls so far.
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl SlotStorage for MemorySlots {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        let map = self.slots.lock().map_err(|_| SlotError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let mut map = self.slots.lock().map_err(|_| SlotError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slots_roundtrip_and_count() {
        let slots = MemorySlots::with_slot("seed", "x");
        assert_eq!(slots.write_count(), 0);
        assert_eq!(slots.get("seed").unwrap().as_deref(), Some("x"));

        slots.set("seed", "y").unwrap();
        assert_eq!(slots.get("seed").unwrap().as_deref(), Some("y"));
        assert_eq!(slots.write_count(), 1);
        assert!(slots.get("other").unwrap().is_none());
    }
}
