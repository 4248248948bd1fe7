//! Periodic work owned by a mounted page, and the gallery carousel.

use std::fmt;

use tracing::trace;

/// The three periodic refreshes of the invitation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    Countdown,
    Carousel,
    Timeline,
}

impl Tick {
    pub const ALL: [Tick; 3] = [Tick::Countdown, Tick::Carousel, Tick::Timeline];

    pub fn period_ms(self) -> u32 {
        match self {
            Tick::Countdown => 1_000,
            Tick::Carousel => 3_000,
            Tick::Timeline => 10_000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tick::Countdown => "countdown",
            Tick::Carousel => "carousel",
            Tick::Timeline => "timeline",
        }
    }
}

type Cancel = Box<dyn FnOnce()>;

/// Cancellation handles of everything a page started. Tearing down (or
/// dropping) runs each handle exactly once, so no tick outlives the page.
#[derive(Default)]
pub struct PageTasks {
    tasks: Vec<(&'static str, Cancel)>,
}

impl PageTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, cancel: impl FnOnce() + 'static) {
        trace!(task = name, "registered page task");
        self.tasks.push((name, Box::new(cancel)));
    }

    /// Runs and forgets the handle registered under `name`.
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.tasks.iter().position(|(task, _)| *task == name) {
            Some(pos) => {
                let (task, cancel) = self.tasks.remove(pos);
                trace!(task, "cancelled page task");
                cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.tasks.iter().any(|(task, _)| *task == name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn teardown(&mut self) {
        for (task, cancel) in self.tasks.drain(..) {
            trace!(task, "tearing down page task");
            cancel();
        }
    }
}

impl Drop for PageTasks {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for PageTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tasks.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Index into the gallery. With no images every move is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn back(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}
