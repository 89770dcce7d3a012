use std::collections::VecDeque;

/// How many previously shown images are remembered for backward navigation.
pub const MAX_HISTORY: usize = 100;

// ---------------------------------------------------------------------------
// Navigation state
// ---------------------------------------------------------------------------

/// Position in the image set plus the path the user took to get there.
///
/// Backward navigation replays `history` rather than stepping to
/// `current - 1`, so it retraces the actual viewing order (including wraps).
#[derive(Debug, Clone)]
pub struct Navigator {
    image_count: usize,
    current_index: usize,
    /// First index shown this session; forward navigation wraps back here.
    seed: usize,
    /// Visited indices, oldest first. The last entry is always `current_index`.
    history: VecDeque<usize>,
    suppress_auto_advance: bool,
}

impl Navigator {
    /// `image_count` must be non-zero and `seed` a valid index; `ImageSet`
    /// guarantees the former and the caller clamps the latter.
    pub fn new(image_count: usize, seed: usize) -> Self {
        debug_assert!(image_count > 0);
        debug_assert!(seed < image_count);
        let mut history = VecDeque::with_capacity(MAX_HISTORY + 1);
        history.push_back(seed);
        Self {
            image_count,
            current_index: seed,
            seed,
            history,
            suppress_auto_advance: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether a backward step would change anything. Drives the back button.
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn step_forward(&mut self, user_initiated: bool) -> usize {
        if user_initiated {
            self.suppress_auto_advance = true;
        }
        let mut next = self.current_index + 1;
        if next >= self.image_count {
            next = self.seed;
        }
        self.history.push_back(next);
        if self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
        log::debug!(
            "[nav] forward {} -> {} (history {})",
            self.current_index,
            next,
            self.history_len()
        );
        self.current_index = next;
        next
    }

    pub fn step_backward(&mut self, user_initiated: bool) -> usize {
        if !self.can_go_back() {
            return self.current_index;
        }
        if user_initiated {
            self.suppress_auto_advance = true;
        }
        self.history.pop_back();
        if let Some(&prev) = self.history.back() {
            log::debug!(
                "[nav] backward {} -> {} (history {})",
                self.current_index,
                prev,
                self.history_len()
            );
            self.current_index = prev;
        }
        self.current_index
    }

    /// Timer entry point. Returns `None` when a user move consumed this tick.
    pub fn tick(&mut self) -> Option<usize> {
        if self.suppress_auto_advance {
            log::debug!("[nav] tick skipped after user navigation");
            self.suppress_auto_advance = false;
            return None;
        }
        Some(self.step_forward(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps_to_seed() {
        let mut nav = Navigator::new(5, 0);
        let seen: Vec<usize> = (0..5).map(|_| nav.step_forward(false)).collect();
        assert_eq!(seen, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn wrap_returns_to_seed_not_zero() {
        let mut nav = Navigator::new(4, 2);
        assert_eq!(nav.step_forward(false), 3);
        assert_eq!(nav.step_forward(false), 2);
        assert_eq!(nav.step_forward(false), 3);
    }

    #[test]
    fn single_image_set_stays_put() {
        let mut nav = Navigator::new(1, 0);
        assert_eq!(nav.step_forward(true), 0);
        assert_eq!(nav.tick(), None);
        assert_eq!(nav.tick(), Some(0));
        assert_eq!(nav.step_backward(true), 0);
    }

    #[test]
    fn backward_is_noop_at_start() {
        let mut nav = Navigator::new(3, 0);
        assert!(!nav.can_go_back());
        assert_eq!(nav.step_backward(true), 0);
        assert_eq!(nav.history_len(), 1);
        // A no-op backward press must not eat the next tick.
        assert_eq!(nav.tick(), Some(1));
    }

    #[test]
    fn backward_retraces_history() {
        let mut nav = Navigator::new(3, 1);
        nav.step_forward(false); // 2
        nav.step_forward(false); // wraps to 1
        nav.step_forward(false); // 2
        assert!(nav.can_go_back());
        assert_eq!(nav.step_backward(false), 1);
        assert_eq!(nav.step_backward(false), 2);
        assert_eq!(nav.step_backward(false), 1);
        assert!(!nav.can_go_back());
        assert_eq!(nav.step_backward(false), 1);
        assert_eq!(nav.history_len(), 1);
    }

    #[test]
    fn forward_reenables_back() {
        let mut nav = Navigator::new(3, 0);
        nav.step_forward(true);
        nav.step_backward(true);
        assert!(!nav.can_go_back());
        nav.step_forward(true);
        assert!(nav.can_go_back());
    }

    #[test]
    fn tick_skips_once_after_user_forward() {
        let mut nav = Navigator::new(5, 0);
        assert_eq!(nav.step_forward(true), 1);
        assert_eq!(nav.tick(), None);
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.tick(), Some(2));
    }

    #[test]
    fn tick_skips_once_after_user_backward() {
        let mut nav = Navigator::new(5, 0);
        nav.step_forward(false);
        nav.step_forward(false);
        assert_eq!(nav.step_backward(true), 1);
        assert_eq!(nav.tick(), None);
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.tick(), Some(2));
    }

    #[test]
    fn history_is_bounded() {
        let mut nav = Navigator::new(1000, 0);
        for _ in 0..MAX_HISTORY - 1 {
            nav.step_forward(false);
        }
        assert_eq!(nav.history_len(), MAX_HISTORY);
        nav.step_forward(false);
        assert_eq!(nav.history_len(), MAX_HISTORY);
        // Oldest entry (the seed) was evicted, so rewinding stops at 1.
        for _ in 0..MAX_HISTORY * 2 {
            nav.step_backward(false);
        }
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn wrap_target_survives_history_eviction() {
        let mut nav = Navigator::new(150, 0);
        for _ in 0..149 {
            nav.step_forward(false);
        }
        assert_eq!(nav.current_index(), 149);
        assert_eq!(nav.step_forward(false), 0);
    }

    #[test]
    fn index_stays_in_range_under_mixed_input() {
        for n in 1..8 {
            let mut nav = Navigator::new(n, n / 2);
            // Deterministic pseudo-random mix of operations.
            let mut x: u32 = 0x9e37_79b9;
            for _ in 0..500 {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                match x % 5 {
                    0 | 1 => {
                        nav.step_forward(x % 2 == 0);
                    }
                    2 | 3 => {
                        nav.step_backward(x % 2 == 0);
                    }
                    _ => {
                        nav.tick();
                    }
                }
                assert!(nav.current_index() < n);
                assert!(nav.history_len() >= 1 && nav.history_len() <= MAX_HISTORY);
            }
        }
    }
}
