// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesce bursts of events into a single call.
//!
//! ## Usage
//!
//! 1) For every raw event, call [`Debounce::trigger`]. It re-arms the quiet
//!    timer and tells you whether to run the handler now (leading edge only).
//! 2) When the host reports a timer, pass it to [`Debounce::settle`]. It tells
//!    you whether the timer was this debouncer's and whether to run the
//!    handler now (trailing edge only).
//!
//! ## Minimal example
//!
//! ```
//! use understory_carousel::{Debounce, Repeat, Settled, Timers};
//!
//! #[derive(Default)]
//! struct Clock { next: u32, armed: Vec<u32> }
//!
//! impl Timers for Clock {
//!     type Timer = u32;
//!     fn set_timer(&mut self, _delay_ms: u32, _repeat: Repeat) -> u32 {
//!         self.next += 1;
//!         self.armed.push(self.next);
//!         self.next
//!     }
//!     fn clear_timer(&mut self, timer: u32) {
//!         self.armed.retain(|t| *t != timer);
//!     }
//! }
//!
//! let mut clock = Clock::default();
//! let mut resize = Debounce::trailing(100);
//!
//! // A burst of three events leaves exactly one armed timer.
//! for _ in 0..3 {
//!     assert!(!resize.trigger(&mut clock));
//! }
//! assert_eq!(clock.armed, vec![3]);
//!
//! // Only that timer closes the burst.
//! assert_eq!(resize.settle(1), Settled::Foreign);
//! assert_eq!(resize.settle(3), Settled::Fire);
//! ```

use crate::surface::{Repeat, Timers};

/// Outcome of [`Debounce::settle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Settled {
    /// The timer does not belong to this debouncer.
    Foreign,
    /// The burst is over; run the handler now.
    Fire,
    /// The burst is over; the handler already ran on the leading edge.
    Quiet,
}

/// Trailing- or leading-edge debouncer over host timers.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    quiet_ms: u32,
    leading: bool,
    pending: Option<T>,
}

impl<T: Copy + PartialEq> Debounce<T> {
    /// Runs the handler once, `quiet_ms` after the last event of a burst.
    #[must_use]
    pub const fn trailing(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            leading: false,
            pending: None,
        }
    }

    /// Runs the handler once, on the first event of a burst.
    ///
    /// A new burst starts only after `quiet_ms` without events.
    #[must_use]
    pub const fn leading(quiet_ms: u32) -> Self {
        Self {
            quiet_ms,
            leading: true,
            pending: None,
        }
    }

    /// Records a raw event. Returns `true` if the handler should run now.
    pub fn trigger<H: Timers<Timer = T>>(&mut self, host: &mut H) -> bool {
        let fire_now = match self.pending.take() {
            Some(timer) => {
                host.clear_timer(timer);
                false
            }
            None => self.leading,
        };
        self.pending = Some(host.set_timer(self.quiet_ms, Repeat::Once));
        fire_now
    }

    /// Consumes a fired timer.
    pub fn settle(&mut self, timer: T) -> Settled {
        if self.pending != Some(timer) {
            return Settled::Foreign;
        }
        self.pending = None;
        if self.leading {
            Settled::Quiet
        } else {
            Settled::Fire
        }
    }

    /// Returns `true` while a burst is open.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any open burst without running the handler.
    pub fn cancel<H: Timers<Timer = T>>(&mut self, host: &mut H) {
        if let Some(timer) = self.pending.take() {
            host.clear_timer(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct Clock {
        next: u32,
        armed: Vec<u32>,
    }

    impl Timers for Clock {
        type Timer = u32;

        fn set_timer(&mut self, _delay_ms: u32, repeat: Repeat) -> u32 {
            assert_eq!(repeat, Repeat::Once, "debounce timers are one-shot");
            self.next += 1;
            self.armed.push(self.next);
            self.next
        }

        fn clear_timer(&mut self, timer: u32) {
            self.armed.retain(|t| *t != timer);
        }
    }

    #[test]
    fn trailing_fires_once_per_burst() {
        let mut clock = Clock::default();
        let mut d = Debounce::trailing(100);

        assert!(!d.trigger(&mut clock));
        assert!(!d.trigger(&mut clock));
        assert_eq!(clock.armed, [2]);
        assert!(d.is_pending());

        assert_eq!(d.settle(1), Settled::Foreign);
        assert_eq!(d.settle(2), Settled::Fire);
        assert!(!d.is_pending());
        // The same timer cannot settle twice.
        assert_eq!(d.settle(2), Settled::Foreign);
    }

    #[test]
    fn leading_fires_on_first_event_only() {
        let mut clock = Clock::default();
        let mut d = Debounce::leading(100);

        assert!(d.trigger(&mut clock));
        assert!(!d.trigger(&mut clock));
        assert_eq!(d.settle(2), Settled::Quiet);

        // Next burst fires on its first event again.
        assert!(d.trigger(&mut clock));
    }

    #[test]
    fn cancel_disarms_the_timer() {
        let mut clock = Clock::default();
        let mut d = Debounce::trailing(100);
        d.trigger(&mut clock);
        d.cancel(&mut clock);
        assert!(clock.armed.is_empty());
        assert_eq!(d.settle(1), Settled::Foreign);
    }
}
