// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a host-agnostic carousel engine.
//!
//! This crate cycles a content element's children ("slides") either by
//! sliding a strip of them sideways or by cross-fading stacked slides. It owns
//! the orchestration only: which slide is current, when a transition may
//! start, what offsets to animate to, and how to keep that state consistent
//! while auto-advance ticks, clicks, programmatic calls, and window resizes
//! all compete.
//!
//! Everything visual is delegated to a [`Surface`]: element creation and
//! styling, layout measurement, tweening, and timers. The host reports
//! asynchronous completions back:
//!
//! - [`Carousel::on_timer`] for timers armed through [`Timers::set_timer`],
//! - [`Carousel::on_animation_complete`] for [`Surface::animate`] and
//!   [`Surface::fade_in`],
//! - [`Carousel::on_click`] for clicks on navigation elements,
//! - [`Carousel::on_resize`] for raw window resizes.
//!
//! ## State machine
//!
//! A carousel is either idle or animating. [`Carousel::next`],
//! [`Carousel::prev`], [`Carousel::index`], and auto-advance ticks start a
//! transition only when idle, not paused, and not resizing; any other request
//! is dropped (reported through [`CarouselHooks::request_dropped`]) and never
//! queued. At most one transition is ever in flight.
//!
//! ## Looping
//!
//! Slide mode keeps two boundary clones (last slide before the first, first
//! slide after the last) so stepping past either end animates onto a clone
//! and then snaps, invisibly, onto the real slide:
//!
//! ```rust
//! use understory_carousel::{Geometry, normalize_index};
//! use kurbo::Size;
//!
//! let g = Geometry::for_slides(Size::new(400.0, 300.0), 300.0, 4);
//! // Four slides plus two clones.
//! assert_eq!(g.container_width, 2400.0);
//!
//! // `next` from slide 4 animates to cell 5 (the clone of slide 1)...
//! assert_eq!(g.offset_for(5), -2000.0);
//! // ...and completion maps it back to slide 1.
//! assert_eq!(normalize_index(5, 4), 1);
//! assert_eq!(g.offset_for(1), -400.0);
//! ```
//!
//! ## Resizing
//!
//! Raw resizes set the resizing gate and re-measure immediately; a
//! [`Debounce`] coalesces the burst and re-measures once more when it
//! settles, then lifts the gate. Re-measuring never happens while a
//! transition is in flight; it is retried on a short timer instead.
//!
//! ## Hosts
//!
//! `understory_carousel_headless` provides an in-memory surface with a
//! virtual clock, useful for tests and simulation.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod carousel;
mod config;
mod debounce;
mod error;
mod geometry;
mod hooks;
mod nav;
mod state;
mod surface;

pub use carousel::{Carousel, ClickResponse};
pub use config::{
    CarouselConfig, CarouselUpdate, DEFAULT_DURATION_MS, DEFAULT_RESIZE_DEBOUNCE_MS,
    DEFAULT_RESIZE_RETRY_MS, DEFAULT_SPEED_MS, NavClasses, TransitionKind,
};
pub use debounce::{Debounce, Settled};
pub use error::{ConfigError, ValidationError};
pub use geometry::{
    CloneSet, Geometry, cell_count, centered_left, normalize_index, wrap_next, wrap_prev,
};
pub use hooks::{CarouselHooks, DropReason, NoHooks, Request};
pub use nav::Arrow;
pub use state::{StateFlags, Status};
pub use surface::{
    EventKind, Float, Overflow, Position, Repeat, Style, StyleProperty, Surface, Tag, Timers,
};
