// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dot and arrow navigation.
//!
//! Both are disposable: they are built from the current slide set and torn
//! down wholesale whenever the set changes, never patched.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::geometry::centered_left;
use crate::surface::{EventKind, Position, Style, Surface, Tag};

pub(crate) const NAV_CONTAINER_CLASS: &str = "mod-slider-nav-container";
pub(crate) const NAV_BUTTON_CLASS: &str = "mod-slider-nav-button";
pub(crate) const LEFT_ARROW_CLASS: &str = "mod-slider-left-arrow";
pub(crate) const RIGHT_ARROW_CLASS: &str = "mod-slider-right-arrow";
pub(crate) const ACTIVE_CLASS: &str = "active";

/// Joins a fixed class with optional user classes.
pub(crate) fn class_list(base: &str, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        String::from(base)
    } else {
        format!("{base} {extra}")
    }
}

/// One dot per slide inside an absolutely positioned list.
#[derive(Debug)]
pub(crate) struct DotNav<E> {
    list: E,
    buttons: Vec<E>,
}

impl<E: Clone + PartialEq> DotNav<E> {
    /// Builds `count` dots under `host` and highlights `active` (1-based).
    pub(crate) fn build<S>(
        surface: &mut S,
        host: &E,
        count: usize,
        dot_class: &str,
        active: usize,
    ) -> Self
    where
        S: Surface<Element = E>,
    {
        let list = surface.create_element(Tag::List, NAV_CONTAINER_CLASS);
        surface.set_style(&list, &[Style::Position(Position::Absolute)]);
        surface.append_child(host, &list);

        let class = class_list(NAV_BUTTON_CLASS, dot_class);
        let buttons = (0..count)
            .map(|_| {
                let button = surface.create_element(Tag::ListItem, &class);
                surface.append_child(&list, &button);
                surface.listen(&button, EventKind::Click);
                button
            })
            .collect();

        let nav = Self { list, buttons };
        nav.highlight(surface, active);
        nav.center(surface, host);
        nav
    }

    /// Marks dot `index` (1-based) as the only active one.
    pub(crate) fn highlight<S: Surface<Element = E>>(&self, surface: &mut S, index: usize) {
        for (i, button) in self.buttons.iter().enumerate() {
            if i + 1 == index {
                surface.add_class(button, ACTIVE_CLASS);
            } else {
                surface.remove_class(button, ACTIVE_CLASS);
            }
        }
    }

    /// Horizontally centres the list inside `host`.
    pub(crate) fn center<S: Surface<Element = E>>(&self, surface: &mut S, host: &E) {
        let outer = surface.measure(host).width;
        let inner = surface.measure(&self.list).width;
        surface.set_style(&self.list, &[Style::Left(centered_left(outer, inner))]);
    }

    /// 1-based slide position of a dot element.
    pub(crate) fn position_of(&self, element: &E) -> Option<usize> {
        self.buttons.iter().position(|b| b == element).map(|i| i + 1)
    }

    pub(crate) fn buttons(&self) -> &[E] {
        &self.buttons
    }

    pub(crate) fn teardown<S: Surface<Element = E>>(self, surface: &mut S) {
        for button in &self.buttons {
            surface.remove(button);
        }
        surface.remove(&self.list);
    }
}

/// Which way an arrow steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arrow {
    /// Previous slide.
    Prev,
    /// Next slide.
    Next,
}

/// Previous/next links.
#[derive(Debug)]
pub(crate) struct ArrowNav<E> {
    prev: E,
    next: E,
}

impl<E: Clone + PartialEq> ArrowNav<E> {
    pub(crate) fn build<S>(surface: &mut S, host: &E, left_class: &str, right_class: &str) -> Self
    where
        S: Surface<Element = E>,
    {
        let mut link = |base: &str, extra: &str| {
            let a = surface.create_element(Tag::Anchor, &class_list(base, extra));
            surface.set_attribute(&a, "href", "#");
            surface.append_child(host, &a);
            surface.listen(&a, EventKind::Click);
            a
        };
        let prev = link(LEFT_ARROW_CLASS, left_class);
        let next = link(RIGHT_ARROW_CLASS, right_class);
        Self { prev, next }
    }

    pub(crate) fn arrow_for(&self, element: &E) -> Option<Arrow> {
        if *element == self.prev {
            Some(Arrow::Prev)
        } else if *element == self.next {
            Some(Arrow::Next)
        } else {
            None
        }
    }

    pub(crate) fn element(&self, arrow: Arrow) -> &E {
        match arrow {
            Arrow::Prev => &self.prev,
            Arrow::Next => &self.next,
        }
    }

    pub(crate) fn teardown<S: Surface<Element = E>>(self, surface: &mut S) {
        surface.remove(&self.prev);
        surface.remove(&self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_skips_empty_extras() {
        assert_eq!(class_list("a", ""), "a");
        assert_eq!(class_list("a", "  "), "a");
        assert_eq!(class_list("a", "b c"), "a b c");
    }
}
