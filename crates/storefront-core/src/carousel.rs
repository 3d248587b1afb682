//! # Carousel
//!
//! Cyclic navigation over a fixed, ordered sequence of slides.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  N = 4                                                                  │
//! │                                                                         │
//! │        next            next            next                             │
//! │   ┌───┐ ─────► ┌───┐ ─────► ┌───┐ ─────► ┌───┐                          │
//! │   │ 0 │        │ 1 │        │ 2 │        │ 3 │                          │
//! │   └───┘ ◄───── └───┘ ◄───── └───┘ ◄───── └───┘                          │
//! │     ▲    prev           prev           prev  │                          │
//! │     └──────────────── next ──────────────────┘                          │
//! │     ─────────────────  prev  ────────────────►  (0 → 3)                 │
//! │                                                                         │
//! │  go_to(k): jump straight to k (dot k was clicked)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input sources (buttons, dots, swipe, autoplay) all funnel into the three
//! transitions. The autoplay timer lives in the app crate; this module only
//! knows indices.

// =============================================================================
// Carousel
// =============================================================================

/// Current-slide pointer over `slide_count` slides.
///
/// ## Invariant
/// `current < slide_count` whenever `slide_count > 0`. A carousel without
/// slides stays at index 0 and ignores navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    slide_count: usize,
}

impl Carousel {
    /// Creates a carousel showing the first slide.
    pub const fn new(slide_count: usize) -> Self {
        Carousel {
            current: 0,
            slide_count,
        }
    }

    /// Index of the visible slide.
    #[inline]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[inline]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Advances one slide, wrapping from the last back to the first.
    pub fn next(&mut self) -> usize {
        if self.slide_count > 0 {
            self.current = (self.current + 1) % self.slide_count;
        }
        self.current
    }

    /// Goes back one slide, wrapping from the first to the last.
    pub fn prev(&mut self) -> usize {
        if self.slide_count > 0 {
            self.current = (self.current + self.slide_count - 1) % self.slide_count;
        }
        self.current
    }

    /// Jumps to slide `index`.
    ///
    /// The index is not range-checked; indicator dots only ever pass indices
    /// they were created for.
    pub fn go_to(&mut self, index: usize) -> usize {
        if self.slide_count > 0 {
            debug_assert!(index < self.slide_count, "dot index out of range");
            self.current = index;
        }
        self.current
    }

    /// Horizontal offset of the slide track, as a CSS transform.
    pub fn transform(&self) -> String {
        format!("translateX(-{}%)", self.current * 100)
    }

    /// Which indicator dot is highlighted, one entry per slide.
    pub fn indicators(&self) -> Vec<bool> {
        (0..self.slide_count).map(|i| i == self.current).collect()
    }
}

// =============================================================================
// Swipe Detection
// =============================================================================

/// Navigation requested by a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next slide.
    Next,
    /// Finger moved right: show the previous slide.
    Prev,
}

/// Tracks one touch from start to end and classifies it.
///
/// ```rust
/// use storefront_core::carousel::{SwipeDirection, SwipeTracker};
///
/// let mut touch = SwipeTracker::new(50.0);
/// touch.touch_start(300.0);
/// assert_eq!(touch.touch_end(240.0), Some(SwipeDirection::Next));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold_px: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    /// Creates a tracker that ignores motions shorter than `threshold_px`.
    pub const fn new(threshold_px: f64) -> Self {
        SwipeTracker {
            threshold_px,
            start_x: None,
        }
    }

    /// Records where a touch began.
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finishes the touch at `x` and returns the swipe, if it was long enough.
    ///
    /// A touch end without a recorded start is ignored.
    pub fn touch_end(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let delta = start - x;

        if delta >= self.threshold_px {
            Some(SwipeDirection::Next)
        } else if -delta >= self.threshold_px {
            Some(SwipeDirection::Prev)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_n_times_returns_to_start() {
        for n in 1..=6 {
            let mut carousel = Carousel::new(n);
            carousel.go_to(n / 2);
            let start = carousel.current();

            for _ in 0..n {
                carousel.next();
            }
            assert_eq!(carousel.current(), start, "n = {}", n);
        }
    }

    #[test]
    fn test_prev_from_zero_wraps_to_last() {
        let mut carousel = Carousel::new(4);
        assert_eq!(carousel.prev(), 3);
        assert_eq!(carousel.prev(), 2);
    }

    #[test]
    fn test_next_wraps_from_last() {
        let mut carousel = Carousel::new(3);
        carousel.go_to(2);
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn test_go_to_and_render_state() {
        let mut carousel = Carousel::new(3);
        carousel.go_to(2);

        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.transform(), "translateX(-200%)");
        assert_eq!(carousel.indicators(), vec![false, false, true]);
    }

    #[test]
    fn test_empty_carousel_ignores_navigation() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
        assert_eq!(carousel.go_to(5), 0);
        assert!(carousel.indicators().is_empty());
        assert_eq!(carousel.transform(), "translateX(-0%)");
    }

    #[test]
    fn test_swipe_thresholds() {
        let mut touch = SwipeTracker::new(50.0);

        touch.touch_start(200.0);
        assert_eq!(touch.touch_end(150.0), Some(SwipeDirection::Next));

        touch.touch_start(200.0);
        assert_eq!(touch.touch_end(250.0), Some(SwipeDirection::Prev));

        touch.touch_start(200.0);
        assert_eq!(touch.touch_end(151.0), None);

        touch.touch_start(200.0);
        assert_eq!(touch.touch_end(249.5), None);
    }

    #[test]
    fn test_touch_end_without_start_is_ignored() {
        let mut touch = SwipeTracker::new(50.0);
        assert_eq!(touch.touch_end(0.0), None);

        touch.touch_start(500.0);
        assert_eq!(touch.touch_end(0.0), Some(SwipeDirection::Next));
        // the start was consumed
        assert_eq!(touch.touch_end(0.0), None);
    }
}
