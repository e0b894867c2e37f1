//! State owned by the text overlay that sits on top of the network.
//!
//! The network only reports hover transitions. What the overlay does with
//! them lives here: a latch that flips once and stays flipped, and a phrase
//! carousel driven by elapsed time that stops for good once the latch trips
//! or the view is torn down.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::constants::{PHRASE_INTERVAL_SECS, PHRASE_LOOPS};

/// Rotating headline phrases.
pub const DEFAULT_PHRASES: [&str; 5] = [
    "So you want to change the world",
    "Build something that matters",
    "Maximize impact by Leveraging AI",
    "Work with high agency people",
    "And ethic comes first",
];

/// Shown in place of the carousel once a node has been hovered.
pub const HOVER_PROMPT: &str = "let's work together";

/// Hover state that becomes `true` on the first hover and never resets.
///
/// Clones share the same flag, so one clone can be handed to the network as
/// its hover callback while another is read by the overlay.
#[derive(Debug, Clone, Default)]
pub struct HoverLatch {
    latched: Rc<Cell<bool>>,
}

impl HoverLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hover event. Only `true` has any effect.
    pub fn observe(&self, hovering: bool) {
        if hovering {
            self.latched.set(true);
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched.get()
    }

    /// A callback that feeds this latch, suitable for
    /// [`NeuralNetwork::set_hover_callback`](crate::NeuralNetwork::set_hover_callback).
    pub fn observer(&self) -> impl FnMut(bool) + 'static {
        let latch = self.clone();
        move |hovering| latch.observe(hovering)
    }
}

/// Cycles through `phrase_count` phrases on a fixed interval.
///
/// The carousel fires one tick per elapsed interval. The tick that brings
/// the total to `phrase_count * loops` stops it without advancing; every
/// earlier tick moves to the next phrase, wrapping around. [`halt`] stops it
/// immediately and permanently.
///
/// [`halt`]: PhraseCarousel::halt
#[derive(Debug, Clone)]
pub struct PhraseCarousel {
    phrase_count: usize,
    index: usize,
    ticks: usize,
    max_ticks: usize,
    interval: Duration,
    pending: Duration,
    running: bool,
}

impl PhraseCarousel {
    /// A carousel with the default 3 second interval and 3 loops.
    pub fn new(phrase_count: usize) -> Self {
        Self::with_timing(
            phrase_count,
            Duration::from_secs_f32(PHRASE_INTERVAL_SECS),
            PHRASE_LOOPS,
        )
    }

    pub fn with_timing(phrase_count: usize, interval: Duration, loops: usize) -> Self {
        let max_ticks = phrase_count * loops;
        Self {
            phrase_count,
            index: 0,
            ticks: 0,
            max_ticks,
            interval: interval.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
            running: max_ticks > 0,
        }
    }

    /// Feed elapsed time. Returns `true` if the phrase index changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }

        let mut changed = false;
        self.pending += dt;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            self.ticks += 1;
            if self.ticks >= self.max_ticks {
                self.halt();
                break;
            }
            self.index = (self.index + 1) % self.phrase_count;
            changed = true;
        }
        changed
    }

    /// Stop the carousel for good. Used on hover and on teardown.
    pub fn halt(&mut self) {
        self.running = false;
        self.pending = Duration::ZERO;
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks fired so far, including the one that stopped the carousel.
    #[inline]
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_latch_is_monotonic() {
        let latch = HoverLatch::new();
        latch.observe(false);
        assert!(!latch.is_latched());

        latch.observe(true);
        latch.observe(false);
        assert!(latch.is_latched());
    }

    #[test]
    fn test_latch_observer_shares_state() {
        let latch = HoverLatch::new();
        let mut callback = latch.observer();
        callback(false);
        assert!(!latch.is_latched());
        callback(true);
        assert!(latch.is_latched());
    }

    #[test]
    fn test_carousel_waits_for_interval() {
        let mut carousel = PhraseCarousel::new(5);
        assert!(!carousel.advance(SEC * 2));
        assert_eq!(carousel.index(), 0);
        assert!(carousel.advance(SEC));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn test_carousel_wraps_and_stops_after_loops() {
        let mut carousel = PhraseCarousel::new(5);
        let mut seen = Vec::new();
        for _ in 0..20 {
            carousel.advance(SEC * 3);
            seen.push(carousel.index());
        }

        // 14 advancing ticks, then the 15th stops it on phrase 4
        assert_eq!(&seen[..6], &[1, 2, 3, 4, 0, 1]);
        assert_eq!(seen[13], 4);
        assert!(seen[14..].iter().all(|&i| i == 4));
        assert!(!carousel.is_running());
        assert_eq!(carousel.ticks(), 15);
    }

    #[test]
    fn test_large_step_fires_several_ticks() {
        let mut carousel = PhraseCarousel::new(5);
        assert!(carousel.advance(SEC * 7));
        assert_eq!(carousel.index(), 2);
        assert!(carousel.advance(SEC * 2));
        assert_eq!(carousel.index(), 3);
    }

    #[test]
    fn test_halt_is_permanent() {
        let mut carousel = PhraseCarousel::new(5);
        carousel.advance(SEC * 3);
        carousel.halt();
        assert!(!carousel.advance(SEC * 30));
        assert_eq!(carousel.index(), 1);
        assert!(!carousel.is_running());
    }

    #[test]
    fn test_no_phrases_never_runs() {
        let mut carousel = PhraseCarousel::new(0);
        assert!(!carousel.is_running());
        assert!(!carousel.advance(SEC * 100));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_default_phrases() {
        let carousel = PhraseCarousel::new(DEFAULT_PHRASES.len());
        assert!(carousel.is_running());
        assert_eq!(DEFAULT_PHRASES[carousel.index()], "So you want to change the world");
    }
}
