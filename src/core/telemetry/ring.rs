//! Debug log ring buffer
//!
//! Fixed-capacity circular buffer of log entries. The oldest entry is
//! silently overwritten on wraparound; entries are never individually
//! removed, only bulk-cleared.

use heapless::String;

/// Ring capacity in entries
pub const DEBUG_RING_SIZE: usize = 20;

/// Maximum entry text length in bytes
pub const DEBUG_MSG_SIZE: usize = 96;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// One log entry
#[derive(Debug, Clone, PartialEq)]
pub struct DebugEntry {
    pub text: String<DEBUG_MSG_SIZE>,
    pub level: LogLevel,
    /// Uptime when the entry was accepted (ms)
    pub timestamp_ms: u32,
}

/// Fixed-capacity log ring
///
/// Slot occupancy is tracked per entry so iteration skips never-written
/// slots before the first wraparound.
#[derive(Debug)]
pub struct DebugRing {
    slots: [Option<DebugEntry>; DEBUG_RING_SIZE],
    /// Next slot to overwrite
    next: usize,
    /// Entries lost to wraparound since the last clear
    overwritten: u32,
}

impl DebugRing {
    /// Create an empty ring
    pub const fn new() -> Self {
        const EMPTY: Option<DebugEntry> = None;
        Self {
            slots: [EMPTY; DEBUG_RING_SIZE],
            next: 0,
            overwritten: 0,
        }
    }

    /// Append an entry, overwriting the oldest once full
    pub fn push(&mut self, entry: DebugEntry) {
        if self.slots[self.next].is_some() {
            self.overwritten = self.overwritten.saturating_add(1);
        }
        self.slots[self.next] = Some(entry);
        self.next = (self.next + 1) % DEBUG_RING_SIZE;
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Entries lost to wraparound since the last clear
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }

    /// Iterate entries newest-first
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &DebugEntry> {
        (1..=DEBUG_RING_SIZE).filter_map(move |back| {
            let idx = (self.next + DEBUG_RING_SIZE - back) % DEBUG_RING_SIZE;
            self.slots[idx].as_ref()
        })
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.next = 0;
        self.overwritten = 0;
    }
}

impl Default for DebugRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    fn make_entry(text: &str, timestamp_ms: u32) -> DebugEntry {
        let mut buf = String::new();
        let _ = buf.write_str(text);
        DebugEntry {
            text: buf,
            level: LogLevel::Info,
            timestamp_ms,
        }
    }

    #[test]
    fn test_push_and_len() {
        let mut ring = DebugRing::new();
        assert!(ring.is_empty());

        ring.push(make_entry("first", 10));
        ring.push(make_entry("second", 20));

        assert_eq!(ring.len(), 2);
        assert!(!ring.is_empty());
    }

    #[test]
    fn test_newest_first_order() {
        let mut ring = DebugRing::new();
        ring.push(make_entry("first", 10));
        ring.push(make_entry("second", 20));
        ring.push(make_entry("third", 30));

        let texts: std::vec::Vec<&str> =
            ring.iter_newest_first().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }

    #[test]
    fn test_wraparound_retains_most_recent_capacity() {
        let mut ring = DebugRing::new();
        for i in 0..(DEBUG_RING_SIZE + 5) {
            let mut text = String::new();
            let _ = write!(text, "msg {}", i);
            ring.push(DebugEntry {
                text,
                level: LogLevel::Info,
                timestamp_ms: i as u32,
            });
        }

        assert_eq!(ring.len(), DEBUG_RING_SIZE);
        assert_eq!(ring.overwritten(), 5);

        // Newest entry first, oldest surviving entry last
        let newest = ring.iter_newest_first().next().unwrap();
        assert_eq!(newest.text.as_str(), "msg 24");
        let oldest = ring.iter_newest_first().last().unwrap();
        assert_eq!(oldest.text.as_str(), "msg 5");
    }

    #[test]
    fn test_clear_empties_all_slots() {
        let mut ring = DebugRing::new();
        for i in 0..DEBUG_RING_SIZE {
            ring.push(make_entry("x", i as u32));
        }
        ring.clear();

        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.overwritten(), 0);
        assert_eq!(ring.iter_newest_first().count(), 0);
    }
}
