//! Rotating carousel: index state plus the auto-advance driver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::normalize::CarouselItem;
use crate::surface::CarouselView;
use crate::timer::{Scheduler, TimerHandle};

/// Default number of slides.
pub const DEFAULT_CAROUSEL_SIZE: usize = 5;

/// Default auto-advance period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5_000);

/// The first `size` items of an already sorted pool.
pub fn select_top(pool: &[CarouselItem], size: usize) -> Vec<CarouselItem> {
    pool.iter().take(size).cloned().collect()
}

/// Active slide moved from one index to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Slides and the active index. Pure, no timers.
#[derive(Debug, Clone, Default)]
pub struct CarouselState {
    items: Vec<CarouselItem>,
    current: usize,
}

impl CarouselState {
    pub fn new(items: Vec<CarouselItem>) -> Self {
        Self { items, current: 0 }
    }

    /// Replace the slides and go back to the first.
    pub fn replace(&mut self, items: Vec<CarouselItem>) {
        self.items = items;
        self.current = 0;
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advance, wrapping from the last slide to the first.
    pub fn next(&mut self) -> Option<Transition> {
        if self.items.is_empty() {
            return None;
        }
        self.move_to((self.current + 1) % self.items.len())
    }

    /// Go back, wrapping from the first slide to the last.
    pub fn prev(&mut self) -> Option<Transition> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len();
        self.move_to((self.current + len - 1) % len)
    }

    /// Jump to `index`. Out of range leaves the state untouched.
    pub fn go_to(&mut self, index: usize) -> Option<Transition> {
        if index >= self.items.len() {
            return None;
        }
        self.move_to(index)
    }

    fn move_to(&mut self, to: usize) -> Option<Transition> {
        let from = self.current;
        if from == to {
            return None;
        }
        self.current = to;
        Some(Transition { from, to })
    }
}

struct Shared {
    state: Mutex<CarouselState>,
    view: Arc<dyn CarouselView>,
    /// Bumped under the state lock on every `set_items`. A tick only moves
    /// slides for the generation it was started with.
    generation: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a move and render it while still holding the state, so the view
    /// never sees two moves interleave.
    fn step(
        &self,
        f: impl FnOnce(&mut CarouselState) -> Option<Transition>,
    ) -> Option<Transition> {
        let mut state = self.lock();
        let transition = f(&mut state)?;
        self.view.switch_slide(transition.from, transition.to);
        Some(transition)
    }

    /// Auto-advance for timer `generation`. A no-op once the slides were
    /// replaced, even if the timer fired before it was cancelled.
    fn tick(&self, generation: u64) -> Option<Transition> {
        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return None;
        }
        let transition = state.next()?;
        self.view.switch_slide(transition.from, transition.to);
        Some(transition)
    }
}

/// Carousel bound to a view, advancing on a timer.
///
/// At most one auto-advance timer exists at a time. Dropping the carousel
/// stops it.
pub struct Carousel {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
    period: Duration,
    timer: Mutex<Option<TimerHandle>>,
}

impl Carousel {
    pub fn new(
        view: Arc<dyn CarouselView>,
        scheduler: Arc<dyn Scheduler>,
        period: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CarouselState::default()),
                view,
                generation: AtomicU64::new(0),
            }),
            scheduler,
            period,
            timer: Mutex::new(None),
        }
    }

    /// Show `items` from the first slide and restart auto-advance.
    ///
    /// The previous timer is cancelled before a new one starts. An empty list
    /// shows the empty state and leaves no timer running, as does a zero
    /// period.
    pub fn set_items(&self, items: Vec<CarouselItem>) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(running) = timer.take() {
            running.cancel();
        }

        let empty = items.is_empty();
        let generation = {
            let mut state = self.shared.lock();
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.replace(items);
            if empty {
                self.shared.view.show_empty();
            } else {
                self.shared.view.show_slides(state.items(), state.current());
            }
            generation
        };

        if empty {
            debug!("Carousel empty, auto-advance stopped");
            return;
        }
        if self.period.is_zero() {
            warn!("Carousel period is zero, auto-advance disabled");
            return;
        }

        let shared = Arc::downgrade(&self.shared);
        *timer = Some(self.scheduler.every(
            self.period,
            Arc::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.tick(generation);
                }
            }),
        ));
        debug!(period_ms = self.period.as_millis() as u64, "Carousel auto-advance restarted");
    }

    pub fn next(&self) -> Option<Transition> {
        self.shared.step(CarouselState::next)
    }

    pub fn prev(&self) -> Option<Transition> {
        self.shared.step(CarouselState::prev)
    }

    pub fn go_to(&self, index: usize) -> Option<Transition> {
        self.shared.step(|state| state.go_to(index))
    }

    pub fn current(&self) -> usize {
        self.shared.lock().current()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }

    pub fn items(&self) -> Vec<CarouselItem> {
        self.shared.lock().items().to_vec()
    }

    /// Whether an auto-advance timer is running.
    pub fn is_ticking(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
