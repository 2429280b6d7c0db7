//! Fixed-capacity ring buffer with overwrite-on-wrap semantics.
//!
//! Both particle pools and the world's obstacle set use the same discipline:
//! a monotonically increasing write cursor, a live count capped at capacity,
//! and silent overwrite of the oldest ring *slot* (not the oldest entry by
//! age) once the buffer is full. There is no individual removal — entries
//! only leave by being overwritten or by `clear`.
//!
//! Iteration order is purely by slot index `0..len`, matching the write
//! order until the first wraparound.

/// A fixed-capacity overwriting ring buffer.
///
/// Backing storage grows with `push` until the capacity is reached (one
/// allocation amortised over the fill phase, none afterwards), then every
/// further `push` overwrites slot `write_cursor % capacity` in place.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    write_cursor: usize,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring with the given capacity.
    ///
    /// Panics if `capacity` is zero; a zero-capacity ring has no valid write
    /// slot.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self {
            slots: Vec::with_capacity(capacity),
            write_cursor: 0,
            capacity,
        }
    }

    /// Writes `value` at the cursor slot, overwriting whatever was there once
    /// the ring has wrapped.
    pub fn push(&mut self, value: T) {
        let slot = self.write_cursor % self.capacity;
        if slot < self.slots.len() {
            self.slots[slot] = value;
        } else {
            self.slots.push(value);
        }
        self.write_cursor += 1;
    }

    /// Number of live entries: `min(write_cursor, capacity)`.
    pub fn len(&self) -> usize {
        self.write_cursor.min(self.capacity)
    }

    /// True until the first `push`.
    pub fn is_empty(&self) -> bool {
        self.write_cursor == 0
    }

    /// Configured capacity (never changes after construction).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of pushes so far, including overwritten ones.
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Drops all live entries and rewinds the cursor. Capacity is retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.write_cursor = 0;
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Mutably iterates live entries in slot order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Live entries as a slice, in slot order.
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ring_has_zero_len() {
        let ring: RingBuffer<i32> = RingBuffer::new(4);
        assert_eq!(ring.len(), 0);
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ring: RingBuffer<i32> = RingBuffer::new(0);
    }

    #[test]
    fn len_tracks_pushes_until_capacity() {
        let mut ring = RingBuffer::new(3);
        for i in 0..3 {
            ring.push(i);
            assert_eq!(ring.len(), i as usize + 1);
        }
        ring.push(99);
        assert_eq!(ring.len(), 3, "len must cap at capacity");
        assert_eq!(ring.write_cursor(), 4);
    }

    #[test]
    fn overflow_overwrites_oldest_slot() {
        let mut ring = RingBuffer::new(3);
        for i in 0..5 {
            ring.push(i);
        }
        // Slots after 5 pushes into capacity 3: [3, 4, 2]
        assert_eq!(ring.as_slice(), &[3, 4, 2]);
    }

    #[test]
    fn survivors_are_last_capacity_entries() {
        let mut ring = RingBuffer::new(4);
        for i in 0..10 {
            ring.push(i);
        }
        let mut survivors: Vec<i32> = ring.iter().copied().collect();
        survivors.sort_unstable();
        assert_eq!(
            survivors,
            vec![6, 7, 8, 9],
            "exactly the last `capacity` pushes must survive"
        );
    }

    #[test]
    fn clear_rewinds_cursor() {
        let mut ring = RingBuffer::new(2);
        ring.push(1);
        ring.push(2);
        ring.push(3);
        ring.clear();
        assert!(ring.is_empty());
        ring.push(7);
        assert_eq!(ring.as_slice(), &[7], "push after clear starts at slot 0");
    }

    #[test]
    fn iter_mut_allows_in_place_update() {
        let mut ring = RingBuffer::new(3);
        ring.push(1);
        ring.push(2);
        for v in ring.iter_mut() {
            *v *= 10;
        }
        assert_eq!(ring.as_slice(), &[10, 20]);
    }
}
