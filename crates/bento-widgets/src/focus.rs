//! Tab-order focus over a fixed number of slots, some of which can be skipped.

/// Cycles keyboard focus across `len` slots.
///
/// Slots marked skipped (a disabled input, say) are stepped over by
/// [`next`](FocusRing::next) and [`prev`](FocusRing::prev). If every slot is
/// skipped, focus stays where it is.
#[derive(Debug, Clone)]
pub struct FocusRing {
    focused: usize,
    skipped: Vec<bool>,
}

impl FocusRing {
    /// A ring of `len` slots with focus on slot 0.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "focus ring needs at least one slot");
        Self {
            focused: 0,
            skipped: vec![false; len],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    /// Always `false`; a ring has at least one slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The focused slot.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Whether `index` is the focused slot.
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == index
    }

    /// Mark a slot as skipped or not. Out-of-range indices are ignored.
    ///
    /// Skipping the focused slot moves focus forward.
    pub fn set_skipped(&mut self, index: usize, skipped: bool) {
        if let Some(slot) = self.skipped.get_mut(index) {
            *slot = skipped;
        }
        if skipped && index == self.focused {
            self.next();
        }
    }

    /// Focus `index` directly, unless it is out of range or skipped.
    pub fn focus(&mut self, index: usize) -> bool {
        if self.skipped.get(index) == Some(&false) {
            self.focused = index;
            true
        } else {
            false
        }
    }

    /// Move to the next slot that is not skipped, wrapping.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Move to the previous slot that is not skipped, wrapping.
    pub fn prev(&mut self) {
        self.step(self.len() - 1);
    }

    fn step(&mut self, stride: usize) {
        let len = self.len();
        let mut candidate = self.focused;
        for _ in 0..len {
            candidate = (candidate + stride) % len;
            if !self.skipped[candidate] {
                self.focused = candidate;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_forward_and_back() {
        let mut ring = FocusRing::new(3);
        ring.next();
        ring.next();
        ring.next();
        assert_eq!(ring.focused(), 0);
        ring.prev();
        assert_eq!(ring.focused(), 2);
    }

    #[test]
    fn skips_marked_slots() {
        let mut ring = FocusRing::new(4);
        ring.set_skipped(1, true);
        ring.set_skipped(2, true);
        ring.next();
        assert_eq!(ring.focused(), 3);
        ring.prev();
        assert_eq!(ring.focused(), 0);
    }

    #[test]
    fn skipping_focused_slot_moves_on() {
        let mut ring = FocusRing::new(3);
        ring.set_skipped(0, true);
        assert_eq!(ring.focused(), 1);
        assert!(!ring.focus(0));
        assert!(ring.focus(2));
        assert!(ring.is_focused(2));
    }

    #[test]
    fn all_skipped_stays_put() {
        let mut ring = FocusRing::new(2);
        ring.set_skipped(1, true);
        ring.set_skipped(0, true);
        ring.next();
        assert_eq!(ring.focused(), 0);
    }

    #[test]
    fn focus_out_of_range_is_refused() {
        let mut ring = FocusRing::new(2);
        assert!(!ring.focus(5));
        assert_eq!(ring.focused(), 0);
    }
}
