// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine flags and the status snapshot handed to hooks.

bitflags::bitflags! {
    /// Gates that decide whether a transition request may start.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateFlags: u8 {
        /// A transition animation is in flight.
        const ANIMATING = 0b0000_0001;
        /// Auto-advance is suspended and navigation requests are dropped.
        const PAUSED    = 0b0000_0010;
        /// The window is being resized and has not settled yet.
        const RESIZING  = 0b0000_0100;
    }
}

/// Point-in-time view of a carousel, passed to every hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
    /// 1-based current slide.
    ///
    /// Between a `next`/`prev` request and its completion this may briefly be
    /// `0` or `len + 1`, pointing at a boundary clone.
    pub current: usize,
    /// Number of real slides.
    pub len: usize,
    /// Current gate flags.
    pub flags: StateFlags,
}

impl Status {
    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.flags.contains(StateFlags::ANIMATING)
    }

    /// Returns `true` while paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.flags.contains(StateFlags::PAUSED)
    }
}
