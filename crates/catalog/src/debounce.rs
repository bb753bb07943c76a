//! Cancel-on-repeat debounce state.
//!
//! The browser timer only schedules a callback; whether that callback is
//! still the most recent one is decided here, through explicit generation
//! tokens. This keeps "two triggers inside the quiet period collapse into
//! one recomputation" and "Enter flushes immediately" testable without any
//! timer at all, and makes a stale timer callback a provable no-op.

#[derive(Debug, Default)]
pub struct Debounce {
    generation: u64,
    pending: Option<u64>,
}

impl Debounce {
    /// Arms a new pending cycle, invalidating any previous one. The caller
    /// passes the returned token back to [`fire`](Self::fire) when its
    /// timer elapses.
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.generation
    }

    /// True when `token` is the currently pending cycle; the cycle is
    /// consumed. A token superseded by a later [`arm`](Self::arm) or by a
    /// [`flush`](Self::flush) returns false.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Consumes the pending cycle immediately (the Enter-key path). Returns
    /// whether a cycle was pending.
    pub fn flush(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_arm_supersedes_the_first() {
        let mut debounce = Debounce::default();
        let first = debounce.arm();
        let second = debounce.arm();
        // The first timer fires late: exactly one recomputation happens,
        // driven by the latest trigger.
        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
        assert!(!debounce.fire(second));
    }

    #[test]
    fn flush_invalidates_the_pending_timer() {
        let mut debounce = Debounce::default();
        let token = debounce.arm();
        assert!(debounce.flush());
        assert!(!debounce.fire(token));
        assert!(!debounce.flush());
    }

    #[test]
    fn idle_flush_is_a_no_op() {
        let mut debounce = Debounce::default();
        assert!(!debounce.flush());
        assert!(!debounce.is_pending());
    }
}
