// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle hooks.
//!
//! [`CarouselHooks`] has one method per lifecycle point, each with a no-op
//! default, so embedders only override what they observe. Hooks run
//! synchronously inside the carousel call that triggers them and receive a
//! [`Status`] snapshot; they cannot call back into the carousel. Hosts that
//! need to react (for example by appending more slides after the last one
//! was shown) should queue the follow-up and issue it after the call returns.
//!
//! [`CarouselHooks::request_dropped`] is a trace point rather than a
//! lifecycle hook: it reports navigation requests that were silently dropped
//! by the paused, resizing, or animating gate.

use crate::state::Status;

/// A navigation request, as reported to [`CarouselHooks::request_dropped`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Advance by one slide.
    Next,
    /// Go back by one slide.
    Prev,
    /// Jump to a 1-based index.
    Index(usize),
}

/// Why a request was dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The carousel is paused.
    Paused,
    /// A window resize has not settled.
    Resizing,
    /// Another transition is in flight.
    Animating,
}

/// Named hook points invoked by the carousel.
#[expect(unused_variables, reason = "Default implementations ignore their arguments")]
pub trait CarouselHooks {
    /// Flags are initialized; nothing has been built yet.
    fn initialized(&mut self, status: &Status) {}

    /// The transition's build pipeline, including navigation, has finished.
    fn build_complete(&mut self, status: &Status) {}

    /// A transition is about to start.
    fn before_slide(&mut self, status: &Status) {}

    /// A transition has completed and its state is committed.
    fn after_slide(&mut self, status: &Status) {}

    /// Slides were appended.
    fn items_appended(&mut self, status: &Status) {}

    /// Slides were removed.
    fn items_removed(&mut self, status: &Status) {}

    /// The carousel was paused.
    fn paused(&mut self, status: &Status) {}

    /// The carousel was reset to the first slide.
    fn reset(&mut self, status: &Status) {}

    /// The carousel resumed after a pause.
    fn resumed(&mut self, status: &Status) {}

    /// Options were updated.
    fn updated(&mut self, status: &Status) {}

    /// A navigation request was dropped by a gate.
    fn request_dropped(&mut self, request: Request, reason: DropReason) {}
}

/// Hooks that do nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoHooks;

impl CarouselHooks for NoHooks {}
