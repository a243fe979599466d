// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Appending and removing slides.
//!
//! Both operations pause the carousel, mutate the slide set and the element
//! tree, rebuild everything derived from the set (clones, navigation), and
//! then recover. Slide mode recovers with [`Carousel::reset`] after a
//! removal, fade mode shows the new first slide and resumes directly.
//!
//! The slide set is never touched while a transition is in flight. A change
//! requested meanwhile is queued and applied, in order, once the transition
//! completes.

use alloc::vec::Vec;

use super::Carousel;
use crate::config::TransitionKind;
use crate::error::ValidationError;
use crate::geometry::normalize_index;
use crate::hooks::CarouselHooks;
use crate::nav::ACTIVE_CLASS;
use crate::state::StateFlags;
use crate::surface::{Float, Style, Surface};

/// A slide-set change waiting for the running transition to complete.
#[derive(Debug)]
pub(super) enum Mutation<E> {
    Append(Vec<E>),
    Remove { start: usize, count: usize },
}

impl<S: Surface, H: CarouselHooks> Carousel<S, H> {
    /// Appends detached elements as new slides at the end.
    ///
    /// Resuming afterwards advances one slide, as [`resume`](Self::resume)
    /// always does. Appending nothing is a no-op. While a transition is in
    /// flight the append is queued until it completes.
    pub fn append(&mut self, slides: impl IntoIterator<Item = S::Element>) {
        let added: Vec<S::Element> = slides.into_iter().collect();
        if added.is_empty() {
            return;
        }
        if self.flags.contains(StateFlags::ANIMATING) {
            self.deferred.push_back(Mutation::Append(added));
            return;
        }
        self.apply_append(added);
    }

    /// Removes `count` slides starting at the 0-based position `start`.
    ///
    /// Fails without touching anything if fewer than two slides would remain
    /// or if the range runs past the end. While a transition is in flight
    /// the removal is queued until it completes; the checks then apply to
    /// the slide set as it will be once earlier queued changes have run.
    pub fn remove(&mut self, start: usize, count: usize) -> Result<(), ValidationError> {
        let len = self.pending_len();
        if count > len.saturating_sub(2) {
            return Err(ValidationError::RemoveBelowFloor { count, len });
        }
        if start.checked_add(count).is_none_or(|end| end > len) {
            return Err(ValidationError::RemoveOutOfBounds { start, count, len });
        }
        if count == 0 {
            return Ok(());
        }
        if self.flags.contains(StateFlags::ANIMATING) {
            self.deferred.push_back(Mutation::Remove { start, count });
        } else {
            self.apply_remove(start, count);
        }
        Ok(())
    }

    /// Slide count once every queued change has been applied.
    fn pending_len(&self) -> usize {
        self.deferred
            .iter()
            .fold(self.slides.len(), |len, mutation| match mutation {
                Mutation::Append(added) => len + added.len(),
                Mutation::Remove { count, .. } => len - count,
            })
    }

    /// Applies queued changes until one of them starts a new transition.
    pub(super) fn apply_deferred(&mut self) {
        while !self.flags.contains(StateFlags::ANIMATING) {
            let Some(mutation) = self.deferred.pop_front() else {
                return;
            };
            match mutation {
                Mutation::Append(added) => self.apply_append(added),
                Mutation::Remove { start, count } => self.apply_remove(start, count),
            }
        }
    }

    fn apply_append(&mut self, added: Vec<S::Element>) {
        self.pause();

        match self.config.transition {
            TransitionKind::Slide => {
                for slide in &added {
                    self.surface.set_style(slide, &[Style::Float(Float::Left)]);
                    match &self.clones {
                        Some(clones) => {
                            self.surface
                                .insert_before(&self.container, slide, &clones.trailing);
                        }
                        None => self.surface.append_child(&self.container, slide),
                    }
                }
                self.slides.extend(added);

                self.purge_clones();
                self.create_clones();
                self.measure_slides();
                self.size_clones();
                self.size_slides();
                self.size_container();
                self.apply_offset();
            }
            TransitionKind::Fade => {
                for slide in &added {
                    Self::stage_fade_slide(&mut self.surface, slide);
                    self.surface.append_child(&self.container, slide);
                }
                self.slides.extend(added);
            }
        }

        self.rebuild_nav();
        self.resume();
        let status = self.status();
        self.hooks.items_appended(&status);
    }

    /// Removes an already validated range.
    fn apply_remove(&mut self, start: usize, count: usize) {
        self.pause();
        let removed: Vec<S::Element> = self.slides.drain(start..start + count).collect();
        self.current = normalize_index(self.current, self.slides.len());
        for slide in &removed {
            self.surface.remove(slide);
        }

        match self.config.transition {
            TransitionKind::Slide => {
                self.purge_clones();
                self.create_clones();
                self.measure_slides();
                self.size_container();
                self.apply_offset();
                self.rebuild_nav();
                self.reset();
            }
            TransitionKind::Fade => {
                let first = self.slides[0].clone();
                let stale = self
                    .active
                    .take()
                    .filter(|a| *a != first && !removed.contains(a));
                if let Some(active) = stale {
                    self.surface.hide(&active);
                    self.surface.remove_class(&active, ACTIVE_CLASS);
                }
                self.surface.show(&first);
                self.surface.add_class(&first, ACTIVE_CLASS);
                self.active = Some(first);
                self.current = 1;
                self.rebuild_nav();
                self.resume();
            }
        }

        let status = self.status();
        self.hooks.items_removed(&status);
    }
}
