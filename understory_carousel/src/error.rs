// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for construction and runtime validation.

use core::fmt;

/// Reasons a [`Carousel`](crate::Carousel) cannot be constructed.
///
/// Construction errors are fatal: no DOM work has been performed when one is
/// returned, apart from reading the content element's children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// [`CarouselConfig::content`](crate::CarouselConfig::content) was not set.
    MissingContent,
    /// The content element has fewer than two children.
    TooFewSlides {
        /// Number of children found.
        found: usize,
    },
    /// [`CarouselConfig::start_index`](crate::CarouselConfig::start_index) is
    /// outside `1..=len`.
    StartIndexOutOfRange {
        /// Requested 1-based start index.
        start_index: usize,
        /// Number of slides.
        len: usize,
    },
    /// The auto-advance interval is zero.
    ZeroDuration,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContent => f.write_str("missing content element"),
            Self::TooFewSlides { found } => {
                write!(f, "too few slides: found {found}, at least 2 are required")
            }
            Self::StartIndexOutOfRange { start_index, len } => write!(
                f,
                "start index {start_index} is outside 1..={len}"
            ),
            Self::ZeroDuration => f.write_str("auto-advance duration must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Rejected runtime requests.
///
/// A validation failure never mutates the carousel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// [`Carousel::index`](crate::Carousel::index) was called with a value
    /// outside `1..=len`.
    IndexOutOfRange {
        /// Requested 1-based index.
        index: usize,
        /// Number of slides.
        len: usize,
    },
    /// [`Carousel::remove`](crate::Carousel::remove) would leave fewer than
    /// two slides.
    RemoveBelowFloor {
        /// Number of slides requested for removal.
        count: usize,
        /// Number of slides.
        len: usize,
    },
    /// [`Carousel::remove`](crate::Carousel::remove) addressed slides past the
    /// end of the set.
    RemoveOutOfBounds {
        /// 0-based first slide to remove.
        start: usize,
        /// Number of slides requested for removal.
        count: usize,
        /// Number of slides.
        len: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "cannot slide to index {index}: valid indices are 1..={len}")
            }
            Self::RemoveBelowFloor { count, len } => write!(
                f,
                "cannot remove {count} of {len} slides: two slides must remain"
            ),
            Self::RemoveOutOfBounds { start, count, len } => write!(
                f,
                "cannot remove {count} slides starting at {start}: only {len} slides exist"
            ),
        }
    }
}

impl core::error::Error for ValidationError {}
