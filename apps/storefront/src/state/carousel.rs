//! # Carousel Controller
//!
//! Drives the core [`Carousel`] from the slider's three input sources and
//! renders the result.
//!
//! Autoplay is a tokio task that posts [`PageEvent::AutoplayTick`] every
//! interval. It is never paused by manual navigation; both simply call
//! `next`. The task handle is owned here and aborted on `stop_autoplay` or
//! drop.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::events::{CarouselInput, PageEvent};
use crate::page::{Page, SliderView};
use storefront_core::{Carousel, SwipeDirection, SwipeTracker};

/// Slider state plus its autoplay timer.
#[derive(Debug)]
pub struct CarouselController {
    carousel: Carousel,
    touch: SwipeTracker,
    autoplay: Option<JoinHandle<()>>,
}

impl CarouselController {
    pub fn new(slide_count: usize, swipe_threshold_px: f64) -> Self {
        CarouselController {
            carousel: Carousel::new(slide_count),
            touch: SwipeTracker::new(swipe_threshold_px),
            autoplay: None,
        }
    }

    pub fn current(&self) -> usize {
        self.carousel.current()
    }

    pub fn slide_count(&self) -> usize {
        self.carousel.slide_count()
    }

    /// Starts posting autoplay ticks. Replaces a running autoplay task.
    ///
    /// A carousel without slides has nothing to advance and never starts.
    pub fn start_autoplay(&mut self, period: Duration, events: mpsc::Sender<PageEvent>) {
        self.stop_autoplay();
        if self.carousel.slide_count() == 0 {
            debug!("No slides, autoplay not started");
            return;
        }

        info!(period_ms = period.as_millis() as u64, "Starting carousel autoplay");
        self.autoplay = Some(tokio::spawn(async move {
            // first tick one full period from now, not immediately
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                if events.send(PageEvent::AutoplayTick).await.is_err() {
                    debug!("Event loop closed, autoplay stopping");
                    break;
                }
            }
        }));
    }

    /// Cancels the autoplay task, if any.
    pub fn stop_autoplay(&mut self) {
        if let Some(task) = self.autoplay.take() {
            task.abort();
            debug!("Carousel autoplay stopped");
        }
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Applies a slider input. Returns the index shown afterwards.
    pub fn handle(&mut self, input: CarouselInput) -> usize {
        match input {
            CarouselInput::Next => self.carousel.next(),
            CarouselInput::Prev => self.carousel.prev(),
            CarouselInput::GoTo(index) => {
                if index < self.carousel.slide_count() {
                    self.carousel.go_to(index)
                } else {
                    // dots only exist for real slides
                    debug!(index, "Ignoring dot outside the slider");
                    self.carousel.current()
                }
            }
            CarouselInput::TouchStart(x) => {
                self.touch.touch_start(x);
                self.carousel.current()
            }
            CarouselInput::TouchEnd(x) => match self.touch.touch_end(x) {
                Some(SwipeDirection::Next) => self.carousel.next(),
                Some(SwipeDirection::Prev) => self.carousel.prev(),
                None => self.carousel.current(),
            },
        }
    }

    /// Autoplay tick: same as the next arrow.
    pub fn tick(&mut self) -> usize {
        self.carousel.next()
    }

    /// Writes the track offset and dot highlight into the page.
    pub fn render(&self, page: &mut Page) {
        page.slider = SliderView {
            transform: self.carousel.transform(),
            dots: self.carousel.indicators(),
        };
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop_autoplay();
    }
}
