// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host capability a carousel drives.
//!
//! A [`Surface`] owns the element tree, layout, timers, and animation
//! tweening. The carousel never interpolates values or measures text itself;
//! it only issues requests and reacts to completions that the host reports
//! back:
//!
//! - timers armed with [`Timers::set_timer`] are reported through
//!   [`Carousel::on_timer`](crate::Carousel::on_timer),
//! - animations started with [`Surface::animate`] or [`Surface::fade_in`] are
//!   reported through
//!   [`Carousel::on_animation_complete`](crate::Carousel::on_animation_complete),
//! - clicks on elements registered with [`Surface::listen`] go to
//!   [`Carousel::on_click`](crate::Carousel::on_click),
//! - raw window resizes registered with [`Surface::listen_resize`] go to
//!   [`Carousel::on_resize`](crate::Carousel::on_resize).
//!
//! Completions must be delivered asynchronously, after the call that started
//! the work has returned.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Size;

/// CSS-like `position` of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// Normal flow.
    #[default]
    Static,
    /// Offset from its normal position; establishes a containing block.
    Relative,
    /// Positioned against the nearest containing block.
    Absolute,
    /// Positioned against the viewport.
    Fixed,
    /// Sticky positioning.
    Sticky,
}

impl Position {
    /// Returns `true` if absolutely positioned children are laid out against
    /// an element with this position.
    #[must_use]
    pub const fn is_containing_block(self) -> bool {
        matches!(self, Self::Relative | Self::Absolute | Self::Fixed)
    }
}

/// CSS-like `overflow`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may paint outside the element.
    Visible,
    /// Content is clipped to the element.
    Hidden,
}

/// CSS-like `float`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Float {
    /// No float.
    None,
    /// Float to the leading edge.
    Left,
}

/// Style properties the carousel writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    /// See [`Style::Overflow`].
    Overflow,
    /// See [`Style::Position`].
    Position,
    /// See [`Style::Float`].
    Float,
    /// See [`Style::Left`].
    Left,
    /// See [`Style::Top`].
    Top,
    /// See [`Style::MarginLeft`].
    MarginLeft,
    /// See [`Style::Width`].
    Width,
    /// See [`Style::Height`].
    Height,
}

/// A single style assignment.
///
/// Lengths are in the surface's logical pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Style {
    /// Clipping behavior.
    Overflow(Overflow),
    /// Positioning scheme.
    Position(Position),
    /// Float behavior.
    Float(Float),
    /// Leading offset for positioned elements.
    Left(f64),
    /// Top offset for positioned elements.
    Top(f64),
    /// Leading margin; the slide transition animates this on the container.
    MarginLeft(f64),
    /// Content width.
    Width(f64),
    /// Content height.
    Height(f64),
}

impl Style {
    /// The property this assignment targets.
    #[must_use]
    pub const fn property(self) -> StyleProperty {
        match self {
            Self::Overflow(_) => StyleProperty::Overflow,
            Self::Position(_) => StyleProperty::Position,
            Self::Float(_) => StyleProperty::Float,
            Self::Left(_) => StyleProperty::Left,
            Self::Top(_) => StyleProperty::Top,
            Self::MarginLeft(_) => StyleProperty::MarginLeft,
            Self::Width(_) => StyleProperty::Width,
            Self::Height(_) => StyleProperty::Height,
        }
    }

    /// The numeric value of a length property, if this is one.
    ///
    /// Hosts use this to decide which properties can be tweened.
    #[must_use]
    pub const fn length(self) -> Option<f64> {
        match self {
            Self::Left(v)
            | Self::Top(v)
            | Self::MarginLeft(v)
            | Self::Width(v)
            | Self::Height(v) => Some(v),
            Self::Overflow(_) | Self::Position(_) | Self::Float(_) => None,
        }
    }

    /// Rebuilds a length assignment of `property` with `value`.
    ///
    /// Returns `None` for non-length properties.
    #[must_use]
    pub const fn with_length(property: StyleProperty, value: f64) -> Option<Self> {
        match property {
            StyleProperty::Left => Some(Self::Left(value)),
            StyleProperty::Top => Some(Self::Top(value)),
            StyleProperty::MarginLeft => Some(Self::MarginLeft(value)),
            StyleProperty::Width => Some(Self::Width(value)),
            StyleProperty::Height => Some(Self::Height(value)),
            StyleProperty::Overflow | StyleProperty::Position | StyleProperty::Float => None,
        }
    }
}

/// Element kinds the carousel creates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Generic block (`div`).
    Div,
    /// Unordered list (`ul`), hosts the dot navigation.
    List,
    /// List item (`li`), one per dot.
    ListItem,
    /// Link (`a`), used for arrows.
    Anchor,
}

impl Tag {
    /// The HTML tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::List => "ul",
            Self::ListItem => "li",
            Self::Anchor => "a",
        }
    }
}

/// Element events the carousel subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary activation.
    Click,
}

/// Whether a timer fires once or keeps firing every interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Repeat {
    /// Fire once after the delay.
    Once,
    /// Fire every `delay` until cleared.
    Every,
}

/// Timer scheduling, split out so that timer-only helpers such as
/// [`Debounce`](crate::Debounce) do not need a whole surface.
pub trait Timers {
    /// Opaque handle to an armed timer.
    type Timer: Copy + PartialEq + Debug;

    /// Arms a timer firing after `delay_ms`, once or repeatedly.
    fn set_timer(&mut self, delay_ms: u32, repeat: Repeat) -> Self::Timer;

    /// Disarms a timer. Clearing an unknown or already fired timer is a no-op.
    fn clear_timer(&mut self, timer: Self::Timer);
}

/// Element tree, layout, and animation capability.
pub trait Surface: Timers {
    /// Cheap handle to an element.
    type Element: Clone + PartialEq + Debug;
    /// Opaque handle to a running animation.
    type Animation: Copy + PartialEq + Debug;

    /// Child elements of `parent`, in document order.
    fn children(&self, parent: &Self::Element) -> Vec<Self::Element>;

    /// Client size of `element` (synchronous layout query).
    fn measure(&self, element: &Self::Element) -> Size;

    /// Computed `position` of `element`.
    fn position(&self, element: &Self::Element) -> Position;

    /// Applies style assignments to `element`.
    fn set_style(&mut self, element: &Self::Element, styles: &[Style]);

    /// Adds a class to `element`.
    fn add_class(&mut self, element: &Self::Element, class: &str);

    /// Removes a class from `element`.
    fn remove_class(&mut self, element: &Self::Element, class: &str);

    /// Sets an attribute on `element`.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Creates a detached element. `class` is a space separated class list.
    fn create_element(&mut self, tag: Tag, class: &str) -> Self::Element;

    /// Deep-clones `element` into a new detached element, without listeners.
    fn clone_element(&mut self, element: &Self::Element) -> Self::Element;

    /// Moves `child` to the end of `parent`.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Moves `child` to the start of `parent`.
    fn prepend_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Moves `child` into `parent` just before `reference`.
    fn insert_before(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
        reference: &Self::Element,
    );

    /// Detaches `element` and drops its listeners.
    fn remove(&mut self, element: &Self::Element);

    /// Makes `element` visible.
    fn show(&mut self, element: &Self::Element);

    /// Hides `element`.
    fn hide(&mut self, element: &Self::Element);

    /// Interpolates the given length properties of `element` to `targets`
    /// over `duration_ms`.
    fn animate(
        &mut self,
        element: &Self::Element,
        targets: &[Style],
        duration_ms: u32,
    ) -> Self::Animation;

    /// Shows `element` and fades its opacity in over `duration_ms`.
    fn fade_in(&mut self, element: &Self::Element, duration_ms: u32) -> Self::Animation;

    /// Fades `element` out over `duration_ms` and hides it at the end.
    fn fade_out(&mut self, element: &Self::Element, duration_ms: u32) -> Self::Animation;

    /// Subscribes to `kind` events on `element`.
    fn listen(&mut self, element: &Self::Element, kind: EventKind);

    /// Subscribes to raw window resize events.
    fn listen_resize(&mut self);
}
