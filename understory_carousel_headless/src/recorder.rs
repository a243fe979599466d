// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hooks that record every call, for assertions and debugging.

use alloc::vec::Vec;

use understory_carousel::{CarouselHooks, DropReason, Request, Status};

/// One recorded hook call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HookEvent {
    /// [`CarouselHooks::initialized`].
    Initialized(Status),
    /// [`CarouselHooks::build_complete`].
    BuildComplete(Status),
    /// [`CarouselHooks::before_slide`].
    BeforeSlide(Status),
    /// [`CarouselHooks::after_slide`].
    AfterSlide(Status),
    /// [`CarouselHooks::items_appended`].
    ItemsAppended(Status),
    /// [`CarouselHooks::items_removed`].
    ItemsRemoved(Status),
    /// [`CarouselHooks::paused`].
    Paused(Status),
    /// [`CarouselHooks::reset`].
    Reset(Status),
    /// [`CarouselHooks::resumed`].
    Resumed(Status),
    /// [`CarouselHooks::updated`].
    Updated(Status),
    /// [`CarouselHooks::request_dropped`].
    Dropped(Request, DropReason),
}

/// Records hook calls in order.
#[derive(Clone, Debug, Default)]
pub struct HookRecorder {
    events: Vec<HookEvent>,
}

impl HookRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> &[HookEvent] {
        &self.events
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The `current` index reported by each `after_slide`, in order.
    #[must_use]
    pub fn settled_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HookEvent::AfterSlide(status) => Some(status.current),
                _ => None,
            })
            .collect()
    }

    /// Drop reasons reported by `request_dropped`, in order.
    #[must_use]
    pub fn drops(&self) -> Vec<(Request, DropReason)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HookEvent::Dropped(request, reason) => Some((*request, *reason)),
                _ => None,
            })
            .collect()
    }
}

impl CarouselHooks for HookRecorder {
    fn initialized(&mut self, status: &Status) {
        self.events.push(HookEvent::Initialized(*status));
    }

    fn build_complete(&mut self, status: &Status) {
        self.events.push(HookEvent::BuildComplete(*status));
    }

    fn before_slide(&mut self, status: &Status) {
        self.events.push(HookEvent::BeforeSlide(*status));
    }

    fn after_slide(&mut self, status: &Status) {
        self.events.push(HookEvent::AfterSlide(*status));
    }

    fn items_appended(&mut self, status: &Status) {
        self.events.push(HookEvent::ItemsAppended(*status));
    }

    fn items_removed(&mut self, status: &Status) {
        self.events.push(HookEvent::ItemsRemoved(*status));
    }

    fn paused(&mut self, status: &Status) {
        self.events.push(HookEvent::Paused(*status));
    }

    fn reset(&mut self, status: &Status) {
        self.events.push(HookEvent::Reset(*status));
    }

    fn resumed(&mut self, status: &Status) {
        self.events.push(HookEvent::Resumed(*status));
    }

    fn updated(&mut self, status: &Status) {
        self.events.push(HookEvent::Updated(*status));
    }

    fn request_dropped(&mut self, request: Request, reason: DropReason) {
        self.events.push(HookEvent::Dropped(request, reason));
    }
}
