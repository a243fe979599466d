// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel measurements and index arithmetic behind both transition kinds.
//!
//! ## Looping
//!
//! In slide mode the container holds `len + 2` equally wide cells:
//!
//! ```text
//! [ clone of N ][ 1 ][ 2 ] ... [ N ][ clone of 1 ]
//!       0         1    2         N       N + 1
//! ```
//!
//! The visible cell for index `i` is reached with a leading offset of
//! `-(i × width)`. Stepping past either end animates onto a clone; when the
//! animation completes, [`normalize_index`] maps the index back onto the real
//! slide the clone mirrors and the offset is re-applied without animation.
//! Since a clone is pixel-identical to its source the snap is invisible.

use kurbo::Size;

/// Measurements that drive layout and transition offsets.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Width of one slide cell. Unused in fade mode.
    pub width: f64,
    /// Height of the current slide.
    pub height: f64,
    /// Width of the sliding container, clones included. Unused in fade mode.
    pub container_width: f64,
}

impl Geometry {
    /// Geometry for slide mode.
    ///
    /// `viewport` is the content element's client size; `slide_height` is the
    /// current slide's client height.
    #[must_use]
    pub fn for_slides(viewport: Size, slide_height: f64, slide_count: usize) -> Self {
        let width = viewport.width;
        Self {
            width,
            height: slide_height,
            container_width: width * cell_count(slide_count) as f64,
        }
    }

    /// Geometry for fade mode: only the active slide's height matters.
    #[must_use]
    pub fn for_fade(active: Size) -> Self {
        Self {
            width: 0.0,
            height: active.height,
            container_width: 0.0,
        }
    }

    /// Leading offset that brings cell `index` into view.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f64 {
        -(index as f64 * self.width)
    }
}

/// Number of container cells for `slide_count` real slides.
#[must_use]
pub const fn cell_count(slide_count: usize) -> usize {
    slide_count + 2
}

/// Maps an index that stepped onto a boundary clone back onto the real slide.
///
/// `len + 1` (the trailing clone) becomes `1` and `0` (the leading clone)
/// becomes `len`; in-range indices are returned unchanged.
#[must_use]
pub const fn normalize_index(current: usize, len: usize) -> usize {
    if current > len {
        1
    } else if current == 0 {
        len
    } else {
        current
    }
}

/// 0-based position of the slide after `position`, wrapping to the first.
#[must_use]
pub const fn wrap_next(position: usize, len: usize) -> usize {
    if position + 1 >= len { 0 } else { position + 1 }
}

/// 0-based position of the slide before `position`, wrapping to the last.
#[must_use]
pub const fn wrap_prev(position: usize, len: usize) -> usize {
    if position == 0 || position > len {
        len.saturating_sub(1)
    } else {
        position - 1
    }
}

/// Leading offset that horizontally centres `inner` within `outer`.
#[must_use]
pub fn centered_left(outer: f64, inner: f64) -> f64 {
    (outer - inner) / 2.0
}

/// The two decorative boundary clones used in slide mode.
///
/// They are never part of the slide set and are recreated whenever the set
/// changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloneSet<E> {
    /// Copy of the last slide, first child of the container.
    pub leading: E,
    /// Copy of the first slide, last child of the container.
    pub trailing: E,
}

impl<E> CloneSet<E> {
    /// Both clones, leading first.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        [&self.leading, &self.trailing].into_iter()
    }
}
