// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel_headless --heading-base-level=0

//! Understory Carousel Headless: an in-memory surface for carousels.
//!
//! [`HeadlessSurface`] implements [`understory_carousel::Surface`] over a
//! small element tree with a trivial layout model and a virtual clock. Timers
//! and animations never fire on their own; the host pumps the clock and
//! forwards whatever became due, which makes carousel behavior fully
//! deterministic and easy to assert on.
//!
//! The [`run_until`] and [`run_for`] drivers do the pumping for a
//! [`Carousel`] that owns a [`HeadlessSurface`], and [`HookRecorder`]
//! records lifecycle hooks for later inspection.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{Carousel, CarouselConfig, NoHooks};
//! use understory_carousel_headless::{HeadlessSurface, run_for};
//!
//! let mut surface = HeadlessSurface::new(Size::new(400.0, 300.0));
//! let content = surface.insert_block(surface.body(), "gallery", 300.0);
//! for _ in 0..3 {
//!     surface.insert_block(content, "slide", 250.0);
//! }
//!
//! let config = CarouselConfig::new(content).with_duration(1000).with_speed(200);
//! let mut carousel = Carousel::new(surface, config, NoHooks).unwrap();
//! assert_eq!(carousel.current(), 1);
//!
//! // The auto-advance tick at 1000ms starts a 200ms slide to slide 2.
//! run_for(&mut carousel, 1500);
//! assert_eq!(carousel.current(), 2);
//! assert!(!carousel.is_animating());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `understory_carousel` and Kurbo.
//! - `libm`: forwards to `understory_carousel` and Kurbo for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod clock;
mod dom;
mod recorder;

pub use clock::{AnimationId, TimerId, Wake};
pub use dom::{HeadlessSurface, NodeId};
pub use recorder::{HookEvent, HookRecorder};

use understory_carousel::{Carousel, CarouselHooks};

/// Forwards one wake-up to `carousel`. Returns whether the carousel claimed
/// it.
pub fn dispatch<H: CarouselHooks>(carousel: &mut Carousel<HeadlessSurface, H>, wake: Wake) -> bool {
    match wake {
        Wake::Timer(timer) => carousel.on_timer(timer),
        Wake::Animation(animation) => carousel.on_animation_complete(animation),
    }
}

/// Pumps everything due up to `deadline` into `carousel`, then moves the
/// clock to `deadline`.
///
/// Returns the number of wake-ups dispatched, claimed or not.
pub fn run_until<H: CarouselHooks>(
    carousel: &mut Carousel<HeadlessSurface, H>,
    deadline: u64,
) -> usize {
    let mut dispatched = 0;
    while let Some(wake) = carousel.surface_mut().pop_due(deadline) {
        dispatch(carousel, wake);
        dispatched += 1;
    }
    carousel.surface_mut().advance_to(deadline);
    dispatched
}

/// Runs `carousel` for `ms` milliseconds of virtual time.
pub fn run_for<H: CarouselHooks>(carousel: &mut Carousel<HeadlessSurface, H>, ms: u64) -> usize {
    let deadline = carousel.surface().now() + ms;
    run_until(carousel, deadline)
}
