/// Frame counter driving the spinner on the thinking indicator and the
/// skeleton shimmer. Advances once per event loop tick.
pub struct AnimationClock {
    frame_counter: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self { frame_counter: 0 }
    }

    pub fn tick(&mut self) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNERS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        // One step every 2 ticks
        SPINNERS[(self.frame_counter / 2) as usize % SPINNERS.len()]
    }

    /// Alternates every 8 ticks; skeleton rows dim and brighten with it
    pub fn shimmer_on(&self) -> bool {
        self.frame_counter % 16 < 8
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_every_two_ticks() {
        let mut clock = AnimationClock::new();
        let initial = clock.spinner_char();
        clock.tick();
        assert_eq!(clock.spinner_char(), initial);
        clock.tick();
        assert_ne!(clock.spinner_char(), initial);
    }

    #[test]
    fn test_shimmer_cycle() {
        let mut clock = AnimationClock::new();
        assert!(clock.shimmer_on());
        for _ in 0..8 {
            clock.tick();
        }
        assert!(!clock.shimmer_on());
        for _ in 0..8 {
            clock.tick();
        }
        assert!(clock.shimmer_on());
    }
}
