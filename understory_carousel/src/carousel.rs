// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel engine: construction, layout, and event intake.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use crate::config::{CarouselConfig, TransitionKind};
use crate::debounce::{Debounce, Settled};
use crate::error::ConfigError;
use crate::geometry::{CloneSet, Geometry, normalize_index};
use crate::hooks::{CarouselHooks, NoHooks};
use crate::nav::{ACTIVE_CLASS, Arrow, ArrowNav, DotNav};
use crate::state::{StateFlags, Status};
use crate::surface::{Float, Overflow, Position, Repeat, Style, Surface, Tag};

mod mutation;
mod transition;

use mutation::Mutation;

pub(crate) const CONTAINER_CLASS: &str = "mod-slider-container";
pub(crate) const CLONE_CLASS: &str = "clone";

/// How the host should treat a click it forwarded with
/// [`Carousel::on_click`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickResponse {
    /// The element is not one of the carousel's controls.
    Ignored,
    /// The click was consumed.
    Handled,
    /// The click was consumed and the element's default action (link
    /// navigation) must be suppressed.
    PreventDefault,
}

/// The transition animation currently in flight.
#[derive(Copy, Clone, Debug)]
struct InFlight<A> {
    animation: A,
    /// Slide-mode index to commit on completion; `None` keeps `current`.
    target: Option<usize>,
}

/// A carousel over the children of a content element.
///
/// All state lives here and is mutated only through `&mut self`; the host
/// feeds timers, animation completions, clicks, and resizes back in through
/// the `on_*` methods. See the [crate documentation](crate) for the flow.
pub struct Carousel<S: Surface, H = NoHooks> {
    surface: S,
    hooks: H,
    config: CarouselConfig<S::Element>,
    content: S::Element,
    container: S::Element,
    slides: Vec<S::Element>,
    clones: Option<CloneSet<S::Element>>,
    /// Fade mode: the slide currently faded in.
    active: Option<S::Element>,
    geometry: Geometry,
    current: usize,
    flags: StateFlags,
    auto_timer: Option<S::Timer>,
    resize_settle: Debounce<S::Timer>,
    resize_retry: Option<S::Timer>,
    in_flight: Option<InFlight<S::Animation>>,
    dots: Option<DotNav<S::Element>>,
    arrows: Option<ArrowNav<S::Element>>,
    /// Slide-set changes requested while a transition was in flight.
    deferred: VecDeque<Mutation<S::Element>>,
}

impl<S: Surface, H> fmt::Debug for Carousel<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("transition", &self.config.transition)
            .field("current", &self.current)
            .field("len", &self.slides.len())
            .field("flags", &self.flags)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, H: CarouselHooks> Carousel<S, H> {
    /// Builds a carousel over the children of `config.content`.
    ///
    /// Fails if no content element is configured, if it has fewer than two
    /// children, or if the options are inconsistent with the slide count. On
    /// success the chosen transition's build pipeline has run, navigation is
    /// in place, and auto-advance is armed if enabled.
    pub fn new(
        mut surface: S,
        config: CarouselConfig<S::Element>,
        hooks: H,
    ) -> Result<Self, ConfigError> {
        let content = config.content.clone().ok_or(ConfigError::MissingContent)?;
        let slides = surface.children(&content);
        config.validate(slides.len())?;

        surface.set_style(&content, &[Style::Overflow(Overflow::Hidden)]);
        if !surface.position(&content).is_containing_block() {
            surface.set_style(&content, &[Style::Position(Position::Relative)]);
        }

        let container = surface.create_element(Tag::Div, CONTAINER_CLASS);
        let resize_settle = if config.resize_leading_edge {
            Debounce::leading(config.resize_debounce_ms)
        } else {
            Debounce::trailing(config.resize_debounce_ms)
        };

        let mut carousel = Self {
            surface,
            hooks,
            config,
            content,
            container,
            slides,
            clones: None,
            active: None,
            geometry: Geometry::default(),
            current: 1,
            flags: StateFlags::empty(),
            auto_timer: None,
            resize_settle,
            resize_retry: None,
            in_flight: None,
            dots: None,
            arrows: None,
            deferred: VecDeque::new(),
        };

        let status = carousel.status();
        carousel.hooks.initialized(&status);

        match carousel.config.transition {
            TransitionKind::Slide => carousel.build_slide(),
            TransitionKind::Fade => carousel.build_fade(),
        }
        Ok(carousel)
    }

    fn build_slide(&mut self) {
        self.surface.set_style(&self.container, &[Style::Overflow(Overflow::Hidden)]);
        self.surface.append_child(&self.content, &self.container);
        for slide in &self.slides {
            self.surface.append_child(&self.container, slide);
            self.surface.set_style(slide, &[Style::Float(Float::Left)]);
        }

        // Sizing the slides reflows the content element, so measure twice.
        for _ in 0..2 {
            self.measure_slides();
            self.size_container();
            self.size_slides();
        }
        self.create_clones();

        self.current = self.config.start_index;
        self.apply_offset();

        self.finish_build();
    }

    fn build_fade(&mut self) {
        self.surface.set_style(&self.container, &[Style::Overflow(Overflow::Hidden)]);
        self.surface.append_child(&self.content, &self.container);
        for slide in &self.slides {
            self.surface.append_child(&self.container, slide);
            Self::stage_fade_slide(&mut self.surface, slide);
        }

        self.current = self.config.start_index;
        let active = self.slides[self.current - 1].clone();
        self.surface.show(&active);
        self.surface.add_class(&active, ACTIVE_CLASS);
        self.active = Some(active);

        self.measure_fade();
        self.size_content();

        self.finish_build();
    }

    /// Shared tail of both build pipelines.
    fn finish_build(&mut self) {
        self.surface.listen_resize();
        self.rebuild_nav();
        if self.config.auto {
            self.start();
        }
        let status = self.status();
        self.hooks.build_complete(&status);
    }

    /// Positions a fade-mode slide on top of the others, hidden.
    fn stage_fade_slide(surface: &mut S, slide: &S::Element) {
        surface.set_style(
            slide,
            &[
                Style::Position(Position::Absolute),
                Style::Left(0.0),
                Style::Top(0.0),
            ],
        );
        surface.remove_class(slide, ACTIVE_CLASS);
        surface.hide(slide);
    }

    // --- geometry --------------------------------------------------------

    fn measure_slides(&mut self) {
        let viewport = self.surface.measure(&self.content);
        let index = normalize_index(self.current, self.slides.len());
        let slide_height = self.surface.measure(&self.slides[index - 1]).height;
        self.geometry = Geometry::for_slides(viewport, slide_height, self.slides.len());
    }

    fn measure_fade(&mut self) {
        if let Some(active) = &self.active {
            self.geometry = Geometry::for_fade(self.surface.measure(active));
        }
    }

    fn size_container(&mut self) {
        self.surface.set_style(
            &self.container,
            &[
                Style::Width(self.geometry.container_width),
                Style::Height(self.geometry.height),
            ],
        );
    }

    fn size_slides(&mut self) {
        for slide in &self.slides {
            self.surface.set_style(slide, &[Style::Width(self.geometry.width)]);
        }
    }

    fn size_clones(&mut self) {
        if let Some(clones) = &self.clones {
            for clone in clones.iter() {
                self.surface.set_style(clone, &[Style::Width(self.geometry.width)]);
            }
        }
    }

    fn size_content(&mut self) {
        self.surface.set_style(&self.content, &[Style::Height(self.geometry.height)]);
    }

    /// Snaps the container to the current index without animating.
    fn apply_offset(&mut self) {
        let offset = self.geometry.offset_for(self.current);
        self.surface.set_style(&self.container, &[Style::MarginLeft(offset)]);
    }

    fn create_clones(&mut self) {
        let (Some(first), Some(last)) = (self.slides.first(), self.slides.last()) else {
            return;
        };
        let leading = self.surface.clone_element(last);
        let trailing = self.surface.clone_element(first);
        for clone in [&leading, &trailing] {
            self.surface.add_class(clone, CLONE_CLASS);
            self.surface.remove_class(clone, ACTIVE_CLASS);
            self.surface.set_style(
                clone,
                &[Style::Float(Float::Left), Style::Width(self.geometry.width)],
            );
        }
        self.surface.prepend_child(&self.container, &leading);
        self.surface.append_child(&self.container, &trailing);
        self.clones = Some(CloneSet { leading, trailing });
    }

    fn purge_clones(&mut self) {
        if let Some(clones) = self.clones.take() {
            for clone in clones.iter() {
                self.surface.remove(clone);
            }
        }
    }

    /// Re-measures and re-applies geometry after the viewport changed.
    ///
    /// While a transition is in flight this only schedules a retry, so the
    /// offset of the running animation is never torn.
    fn resize(&mut self) {
        if self.flags.contains(StateFlags::ANIMATING) {
            if self.resize_retry.is_none() {
                let retry = self
                    .surface
                    .set_timer(self.config.resize_retry_ms, Repeat::Once);
                self.resize_retry = Some(retry);
            }
            return;
        }

        match self.config.transition {
            TransitionKind::Slide => {
                self.measure_slides();
                self.size_slides();
                self.size_clones();
                self.size_container();
                self.size_content();
                self.apply_offset();
            }
            TransitionKind::Fade => {
                self.measure_fade();
                self.size_content();
            }
        }
        if let Some(dots) = &self.dots {
            dots.center(&mut self.surface, &self.content);
        }
    }

    // --- navigation ------------------------------------------------------

    /// Tears down and rebuilds the enabled navigation controls.
    fn rebuild_nav(&mut self) {
        if let Some(dots) = self.dots.take() {
            dots.teardown(&mut self.surface);
        }
        if let Some(arrows) = self.arrows.take() {
            arrows.teardown(&mut self.surface);
        }
        if self.config.show_buttons {
            let active = normalize_index(self.current, self.slides.len());
            self.dots = Some(DotNav::build(
                &mut self.surface,
                &self.content,
                self.slides.len(),
                &self.config.nav_classes.dot,
                active,
            ));
        }
        if self.config.show_arrows {
            self.arrows = Some(ArrowNav::build(
                &mut self.surface,
                &self.content,
                &self.config.nav_classes.left_arrow,
                &self.config.nav_classes.right_arrow,
            ));
        }
    }

    fn highlight_dot(&mut self, index: usize) {
        if let Some(dots) = &self.dots {
            dots.highlight(&mut self.surface, index);
        }
    }

    // --- event intake ----------------------------------------------------

    /// Forwards a click on `element`.
    ///
    /// Dots jump to their slide (ignored while paused) and become the only
    /// active dot once the jump starts. Arrows step backwards or forwards
    /// and always ask the host to suppress link navigation.
    pub fn on_click(&mut self, element: &S::Element) -> ClickResponse {
        if let Some(position) = self.dots.as_ref().and_then(|d| d.position_of(element)) {
            if !self.flags.contains(StateFlags::PAUSED) && self.go_to(position) {
                self.highlight_dot(position);
            }
            return ClickResponse::Handled;
        }
        match self.arrows.as_ref().and_then(|a| a.arrow_for(element)) {
            Some(Arrow::Prev) => {
                self.prev();
                ClickResponse::PreventDefault
            }
            Some(Arrow::Next) => {
                self.next();
                ClickResponse::PreventDefault
            }
            None => ClickResponse::Ignored,
        }
    }

    /// Forwards a raw (not debounced) window resize.
    ///
    /// Navigation is suppressed until the burst settles; the settle timer is
    /// armed here and reported back through [`on_timer`](Self::on_timer).
    pub fn on_resize(&mut self) {
        self.flags.insert(StateFlags::RESIZING);
        self.resize();
        if self.resize_settle.trigger(&mut self.surface) {
            self.resize();
            self.flags.remove(StateFlags::RESIZING);
        }
    }

    /// Forwards a fired timer. Returns `false` if it is not one of ours.
    pub fn on_timer(&mut self, timer: S::Timer) -> bool {
        if self.auto_timer == Some(timer) {
            if self.config.reverse {
                self.prev();
            } else {
                self.next();
            }
            return true;
        }
        if self.resize_retry == Some(timer) {
            self.resize_retry = None;
            self.resize();
            return true;
        }
        match self.resize_settle.settle(timer) {
            Settled::Foreign => false,
            Settled::Fire => {
                self.resize();
                self.flags.remove(StateFlags::RESIZING);
                true
            }
            Settled::Quiet => {
                self.flags.remove(StateFlags::RESIZING);
                true
            }
        }
    }

    /// Forwards a finished animation. Returns `false` if it is not the
    /// transition in flight.
    ///
    /// Slide-set changes queued during the transition are applied here.
    pub fn on_animation_complete(&mut self, animation: S::Animation) -> bool {
        match self.in_flight {
            Some(in_flight) if in_flight.animation == animation => {
                self.in_flight = None;
                match self.config.transition {
                    TransitionKind::Slide => self.finish_slide(in_flight.target),
                    TransitionKind::Fade => self.finish_fade(),
                }
                self.apply_deferred();
                true
            }
            _ => false,
        }
    }

    // --- accessors -------------------------------------------------------

    /// Snapshot of the current index, slide count, and flags.
    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            current: self.current,
            len: self.slides.len(),
            flags: self.flags,
        }
    }

    /// 1-based current slide.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of real slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`: a carousel holds at least two slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Current gate flags.
    #[must_use]
    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flags.contains(StateFlags::ANIMATING)
    }

    /// Returns `true` while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.flags.contains(StateFlags::PAUSED)
    }

    /// Returns `true` while a resize burst is open.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.flags.contains(StateFlags::RESIZING)
    }

    /// Returns `true` while the auto-advance timer is armed.
    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_timer.is_some()
    }

    /// Current measurements.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Effective options.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig<S::Element> {
        &self.config
    }

    /// The content element.
    #[must_use]
    pub fn content(&self) -> &S::Element {
        &self.content
    }

    /// The generated container the slides live in.
    #[must_use]
    pub fn container(&self) -> &S::Element {
        &self.container
    }

    /// Real slides, in order.
    #[must_use]
    pub fn slides(&self) -> &[S::Element] {
        &self.slides
    }

    /// Boundary clones (slide mode only).
    #[must_use]
    pub fn clones(&self) -> Option<&CloneSet<S::Element>> {
        self.clones.as_ref()
    }

    /// Fade mode: the slide faded in most recently.
    #[must_use]
    pub fn active(&self) -> Option<&S::Element> {
        self.active.as_ref()
    }

    /// Dot elements, one per slide; empty if dots are disabled.
    #[must_use]
    pub fn dot_buttons(&self) -> &[S::Element] {
        match &self.dots {
            Some(dots) => dots.buttons(),
            None => &[],
        }
    }

    /// An arrow element, if arrows are enabled.
    #[must_use]
    pub fn arrow(&self, arrow: Arrow) -> Option<&S::Element> {
        self.arrows.as_ref().map(|a| a.element(arrow))
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for hosts that pump it.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Replaces the hooks, returning the previous ones.
    pub fn set_hooks(&mut self, hooks: H) -> H {
        core::mem::replace(&mut self.hooks, hooks)
    }

    /// Tears the carousel down, returning the surface and hooks.
    ///
    /// Outstanding timers are cleared; the element tree is left as is.
    pub fn into_parts(mut self) -> (S, H) {
        self.clear_timer();
        self.resize_settle.cancel(&mut self.surface);
        if let Some(retry) = self.resize_retry.take() {
            self.surface.clear_timer(retry);
        }
        (self.surface, self.hooks)
    }
}
