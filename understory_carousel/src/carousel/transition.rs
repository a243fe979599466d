// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition controller: gating, slide and fade transitions, auto-advance.
//!
//! The controller is a two-state machine, idle and animating. A request
//! (next, prev, index, auto tick) starts a transition only when the carousel
//! is idle, not paused, and not resizing; otherwise it is dropped without
//! queueing. The in-flight animation's completion returns it to idle.

use super::{Carousel, InFlight};
use crate::config::{CarouselUpdate, TransitionKind};
use crate::error::ValidationError;
use crate::geometry::{normalize_index, wrap_next, wrap_prev};
use crate::hooks::{CarouselHooks, DropReason, Request};
use crate::nav::ACTIVE_CLASS;
use crate::state::StateFlags;
use crate::surface::{Repeat, Style, Surface};

/// Where a fade transition goes.
#[derive(Copy, Clone, Debug)]
enum FadeTarget {
    Next,
    Prev,
    Index(usize),
}

impl<S: Surface, H: CarouselHooks> Carousel<S, H> {
    /// Advances one slide. Returns `true` if a transition started.
    ///
    /// From the last slide this moves onto the first.
    pub fn next(&mut self) -> bool {
        if !self.admit(Request::Next) {
            return false;
        }
        self.current += 1;
        match self.config.transition {
            TransitionKind::Slide => self.transition_slide(None),
            TransitionKind::Fade => self.transition_fade(FadeTarget::Next),
        }
        true
    }

    /// Goes back one slide. Returns `true` if a transition started.
    ///
    /// From the first slide this moves onto the last.
    pub fn prev(&mut self) -> bool {
        if !self.admit(Request::Prev) {
            return false;
        }
        self.current = self.current.saturating_sub(1);
        match self.config.transition {
            TransitionKind::Slide => self.transition_slide(None),
            TransitionKind::Fade => self.transition_fade(FadeTarget::Prev),
        }
        true
    }

    /// Jumps to the 1-based slide `index`.
    ///
    /// An out-of-range index is rejected before any state changes. A valid
    /// request is still subject to the gates; `Ok(false)` means it was
    /// dropped.
    pub fn index(&mut self, index: usize) -> Result<bool, ValidationError> {
        let len = self.slides.len();
        if index == 0 || index > len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        Ok(self.go_to(index))
    }

    /// Gated jump to an index already known to be in range.
    pub(super) fn go_to(&mut self, index: usize) -> bool {
        if !self.admit(Request::Index(index)) {
            return false;
        }
        match self.config.transition {
            TransitionKind::Slide => self.transition_slide(Some(index)),
            TransitionKind::Fade => self.transition_fade(FadeTarget::Index(index)),
        }
        true
    }

    /// Applies the paused, resizing, and animating gates.
    fn admit(&mut self, request: Request) -> bool {
        let reason = if self.flags.contains(StateFlags::PAUSED) {
            DropReason::Paused
        } else if self.flags.contains(StateFlags::RESIZING) {
            DropReason::Resizing
        } else if self.flags.contains(StateFlags::ANIMATING) {
            DropReason::Animating
        } else {
            return true;
        };
        self.hooks.request_dropped(request, reason);
        false
    }

    fn transition_slide(&mut self, target: Option<usize>) {
        self.clear_timer();
        let status = self.status();
        self.hooks.before_slide(&status);

        self.flags.insert(StateFlags::ANIMATING);
        let offset = self.geometry.offset_for(target.unwrap_or(self.current));
        let animation = self.surface.animate(
            &self.container,
            &[Style::MarginLeft(offset)],
            self.config.speed_ms,
        );
        self.in_flight = Some(InFlight { animation, target });
    }

    pub(super) fn finish_slide(&mut self, target: Option<usize>) {
        if let Some(target) = target {
            self.current = target;
        }
        self.flags.remove(StateFlags::ANIMATING);
        self.current = normalize_index(self.current, self.slides.len());
        self.highlight_dot(self.current);
        // Off a clone and onto the real slide it mirrors.
        self.apply_offset();

        let status = self.status();
        self.hooks.after_slide(&status);
        self.rearm();
    }

    fn transition_fade(&mut self, target: FadeTarget) {
        self.clear_timer();
        let status = self.status();
        self.hooks.before_slide(&status);

        let len = self.slides.len();
        let previous = self.active.clone();
        let from = previous
            .as_ref()
            .and_then(|a| self.slides.iter().position(|s| s == a));
        let to = match target {
            FadeTarget::Next => from.map_or(0, |p| wrap_next(p, len)),
            FadeTarget::Prev => from.map_or(len - 1, |p| wrap_prev(p, len)),
            FadeTarget::Index(index) => {
                self.current = index;
                index - 1
            }
        };
        let incoming = self.slides[to].clone();

        self.flags.insert(StateFlags::ANIMATING);
        if let Some(outgoing) = previous.filter(|p| *p != incoming) {
            self.surface.fade_out(&outgoing, self.config.speed_ms);
            self.surface.remove_class(&outgoing, ACTIVE_CLASS);
        }
        let animation = self.surface.fade_in(&incoming, self.config.speed_ms);
        self.surface.add_class(&incoming, ACTIVE_CLASS);
        self.in_flight = Some(InFlight {
            animation,
            target: None,
        });

        // The new slide is active immediately, before the fade finishes.
        self.active = Some(incoming);
        self.highlight_dot(to + 1);
        self.rearm();
    }

    pub(super) fn finish_fade(&mut self) {
        self.flags.remove(StateFlags::ANIMATING);
        self.current = normalize_index(self.current, self.slides.len());
        let status = self.status();
        self.hooks.after_slide(&status);
    }

    /// Arms the auto-advance timer, replacing any armed one.
    ///
    /// Calling this repeatedly never leaves more than one timer armed.
    pub fn start(&mut self) {
        self.clear_timer();
        let timer = self
            .surface
            .set_timer(self.config.duration_ms, Repeat::Every);
        self.auto_timer = Some(timer);
    }

    /// Restarts auto-advance after a transition, unless paused meanwhile.
    fn rearm(&mut self) {
        if self.config.auto && !self.flags.contains(StateFlags::PAUSED) {
            self.start();
        }
    }

    pub(super) fn clear_timer(&mut self) {
        if let Some(timer) = self.auto_timer.take() {
            self.surface.clear_timer(timer);
        }
    }

    /// Suspends auto-advance and drops navigation requests until resumed.
    ///
    /// A transition already in flight still completes.
    pub fn pause(&mut self) {
        self.flags.insert(StateFlags::PAUSED);
        self.clear_timer();
        let status = self.status();
        self.hooks.paused(&status);
    }

    /// Leaves the paused state, immediately advancing one slide and
    /// re-arming auto-advance if enabled. Does nothing unless paused.
    pub fn resume(&mut self) {
        if !self.flags.contains(StateFlags::PAUSED) {
            return;
        }
        self.flags.remove(StateFlags::PAUSED);
        self.next();
        if self.config.auto {
            self.start();
        }
        let status = self.status();
        self.hooks.resumed(&status);
    }

    /// Unpauses and jumps back to the first slide.
    pub fn reset(&mut self) {
        self.flags.remove(StateFlags::PAUSED);
        self.go_to(1);
        if self.config.auto {
            self.start();
        }
        let status = self.status();
        self.hooks.reset(&status);
    }

    /// Merges `update` into the options.
    ///
    /// The carousel is paused first and resumed afterwards only if
    /// auto-advance is (still) enabled; otherwise it stays paused.
    pub fn update(&mut self, update: CarouselUpdate) {
        self.pause();
        update.apply_to(&mut self.config);
        let status = self.status();
        self.hooks.updated(&status);
        if self.config.auto {
            self.resume();
        }
    }
}
