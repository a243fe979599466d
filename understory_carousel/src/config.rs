// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration and partial updates.

use alloc::string::String;

use crate::error::ConfigError;

/// Default auto-advance interval.
pub const DEFAULT_DURATION_MS: u32 = 5000;
/// Default transition length.
pub const DEFAULT_SPEED_MS: u32 = 600;
/// Default quiet interval before a resize burst is considered settled.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 100;
/// Default poll interval while a resize waits for a transition to finish.
pub const DEFAULT_RESIZE_RETRY_MS: u32 = 1;

/// How one slide replaces another.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Slides sit side by side and the container's leading offset is
    /// animated. Two boundary clones make the strip appear endless.
    #[default]
    Slide,
    /// Slides are stacked; the outgoing one fades out while the incoming one
    /// fades in.
    Fade,
}

/// Extra classes appended to the generated navigation elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavClasses {
    /// Extra classes for the previous arrow.
    pub left_arrow: String,
    /// Extra classes for the next arrow.
    pub right_arrow: String,
    /// Extra classes for every dot.
    pub dot: String,
}

/// Carousel options.
///
/// Built with [`CarouselConfig::new`] and the `with_*` methods; validated once
/// when the carousel is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig<E> {
    /// Element whose children become the slides.
    pub content: Option<E>,
    /// Interval between auto-advances, in milliseconds.
    pub duration_ms: u32,
    /// Length of one transition, in milliseconds.
    pub speed_ms: u32,
    /// Transition style.
    pub transition: TransitionKind,
    /// Auto-advance backwards instead of forwards.
    pub reverse: bool,
    /// Advance automatically every [`duration_ms`](Self::duration_ms).
    pub auto: bool,
    /// 1-based slide shown first.
    pub start_index: usize,
    /// Build dot navigation.
    pub show_buttons: bool,
    /// Build arrow navigation.
    pub show_arrows: bool,
    /// Extra navigation classes.
    pub nav_classes: NavClasses,
    /// Quiet interval that closes a resize burst.
    pub resize_debounce_ms: u32,
    /// Run the settled-resize handler at the start of a burst instead of
    /// after it.
    pub resize_leading_edge: bool,
    /// Poll interval while a resize waits for a transition to finish.
    pub resize_retry_ms: u32,
}

impl<E> Default for CarouselConfig<E> {
    fn default() -> Self {
        Self {
            content: None,
            duration_ms: DEFAULT_DURATION_MS,
            speed_ms: DEFAULT_SPEED_MS,
            transition: TransitionKind::Slide,
            reverse: false,
            auto: true,
            start_index: 1,
            show_buttons: false,
            show_arrows: false,
            nav_classes: NavClasses::default(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            resize_leading_edge: false,
            resize_retry_ms: DEFAULT_RESIZE_RETRY_MS,
        }
    }
}

impl<E> CarouselConfig<E> {
    /// Default options over the given content element.
    #[must_use]
    pub fn new(content: E) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    /// Sets the auto-advance interval.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the transition length.
    #[must_use]
    pub fn with_speed(mut self, speed_ms: u32) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Sets the transition style.
    #[must_use]
    pub fn with_transition(mut self, transition: TransitionKind) -> Self {
        self.transition = transition;
        self
    }

    /// Sets the auto-advance direction.
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enables or disables auto-advance.
    #[must_use]
    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    /// Sets the 1-based start slide.
    #[must_use]
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Enables or disables dot navigation.
    #[must_use]
    pub fn with_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    /// Enables or disables arrow navigation.
    #[must_use]
    pub fn with_arrows(mut self, show: bool) -> Self {
        self.show_arrows = show;
        self
    }

    /// Sets extra navigation classes.
    #[must_use]
    pub fn with_nav_classes(mut self, nav_classes: NavClasses) -> Self {
        self.nav_classes = nav_classes;
        self
    }

    /// Sets the resize debounce interval and edge.
    #[must_use]
    pub fn with_resize_debounce(mut self, quiet_ms: u32, leading_edge: bool) -> Self {
        self.resize_debounce_ms = quiet_ms;
        self.resize_leading_edge = leading_edge;
        self
    }

    /// Checks the options against the number of slides found.
    pub fn validate(&self, slide_count: usize) -> Result<(), ConfigError> {
        if slide_count < 2 {
            return Err(ConfigError::TooFewSlides { found: slide_count });
        }
        if self.start_index == 0 || self.start_index > slide_count {
            return Err(ConfigError::StartIndexOutOfRange {
                start_index: self.start_index,
                len: slide_count,
            });
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Options that may change after construction.
///
/// `None` keeps the current value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CarouselUpdate {
    /// New auto-advance interval. Zero is ignored.
    pub duration_ms: Option<u32>,
    /// New transition length.
    pub speed_ms: Option<u32>,
    /// New auto-advance direction.
    pub reverse: Option<bool>,
    /// Enable or disable auto-advance.
    pub auto: Option<bool>,
}

impl CarouselUpdate {
    /// Merges the set fields into `config`.
    pub fn apply_to<E>(&self, config: &mut CarouselConfig<E>) {
        if let Some(duration_ms) = self.duration_ms.filter(|d| *d > 0) {
            config.duration_ms = duration_ms;
        }
        if let Some(speed_ms) = self.speed_ms {
            config.speed_ms = speed_ms;
        }
        if let Some(reverse) = self.reverse {
            config.reverse = reverse;
        }
        if let Some(auto) = self.auto {
            config.auto = auto;
        }
    }
}
