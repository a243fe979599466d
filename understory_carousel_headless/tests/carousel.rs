// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `understory_carousel`, driven through the headless
//! surface and its virtual clock.

use kurbo::Size;
use understory_carousel::{
    Arrow, Carousel, CarouselConfig, CarouselUpdate, ClickResponse, ConfigError, DropReason,
    NavClasses, NoHooks, Overflow, Position, Request, Style, StyleProperty, Surface, Tag,
    TransitionKind, ValidationError,
};
use understory_carousel_headless::{
    HeadlessSurface, HookEvent, HookRecorder, NodeId, run_for, run_until,
};

type TestCarousel = Carousel<HeadlessSurface, HookRecorder>;

const SPEED: u64 = 100;

/// A 400x300 viewport with a content element holding `count` slides.
fn gallery(count: usize) -> (HeadlessSurface, NodeId, Vec<NodeId>) {
    let mut surface = HeadlessSurface::new(Size::new(400.0, 300.0));
    let content = surface.insert_block(surface.body(), "gallery", 300.0);
    let slides = (0..count)
        .map(|_| surface.insert_block(content, "slide", 250.0))
        .collect();
    (surface, content, slides)
}

/// Manual (non-auto) carousel with `SPEED` ms transitions, further configured by
/// `configure`.
fn build(
    count: usize,
    configure: impl FnOnce(CarouselConfig<NodeId>) -> CarouselConfig<NodeId>,
) -> (TestCarousel, Vec<NodeId>) {
    let (surface, content, slides) = gallery(count);
    let config = configure(
        CarouselConfig::new(content)
            .with_auto(false)
            .with_speed(100),
    );
    let carousel = Carousel::new(surface, config, HookRecorder::new()).unwrap();
    (carousel, slides)
}

fn margin_left(carousel: &TestCarousel) -> Option<f64> {
    carousel
        .surface()
        .length(*carousel.container(), StyleProperty::MarginLeft)
}

fn active_dots(carousel: &TestCarousel) -> Vec<usize> {
    carousel
        .dot_buttons()
        .iter()
        .enumerate()
        .filter(|(_, dot)| carousel.surface().has_class(**dot, "active"))
        .map(|(i, _)| i + 1)
        .collect()
}

// --- construction ----------------------------------------------------------

#[test]
fn slide_build_wraps_slides_between_clones() {
    let (carousel, slides) = build(3, |c| c);
    let surface = carousel.surface();
    let content = *carousel.content();
    let container = *carousel.container();

    assert_eq!(surface.parent(container), Some(content));
    assert!(surface.has_class(container, "mod-slider-container"));
    assert_eq!(
        surface.style(content, StyleProperty::Overflow),
        Some(Style::Overflow(Overflow::Hidden))
    );
    assert_eq!(surface.position(&content), Position::Relative);

    let clones = carousel.clones().unwrap().clone();
    let mut expected = vec![clones.leading];
    expected.extend(slides.iter().copied());
    expected.push(clones.trailing);
    assert_eq!(surface.children(&container), expected);
    assert!(surface.has_class(clones.leading, "clone"));
    assert!(surface.has_class(clones.trailing, "clone"));
    assert!(!slides.iter().any(|s| surface.has_class(*s, "clone")));

    let geometry = carousel.geometry();
    assert_eq!(geometry.width, 400.0);
    assert_eq!(geometry.height, 250.0);
    assert_eq!(geometry.container_width, 2000.0);
    assert_eq!(surface.length(container, StyleProperty::Width), Some(2000.0));
    assert_eq!(margin_left(&carousel), Some(-400.0));
    assert_eq!(surface.resize_listeners(), 1);

    assert!(matches!(
        carousel.hooks().events(),
        [HookEvent::Initialized(_), HookEvent::BuildComplete(s)] if s.current == 1 && s.len == 3
    ));
}

#[test]
fn start_index_sets_initial_offset_and_dot() {
    let (carousel, _) = build(4, |c| c.with_start_index(3).with_buttons(true));
    assert_eq!(carousel.current(), 3);
    assert_eq!(margin_left(&carousel), Some(-1200.0));
    assert_eq!(active_dots(&carousel), [3]);
}

#[test]
fn fade_build_stacks_slides_and_shows_the_start_slide() {
    let (carousel, slides) = build(3, |c| {
        c.with_transition(TransitionKind::Fade).with_start_index(2)
    });
    let surface = carousel.surface();

    for slide in &slides {
        assert_eq!(surface.position(slide), Position::Absolute);
    }
    assert!(!surface.is_visible(slides[0]));
    assert!(surface.is_visible(slides[1]));
    assert!(!surface.is_visible(slides[2]));
    assert!(surface.has_class(slides[1], "active"));
    assert_eq!(carousel.active(), Some(&slides[1]));
    assert!(carousel.clones().is_none());
    assert_eq!(
        surface.length(*carousel.content(), StyleProperty::Height),
        Some(250.0)
    );
}

#[test]
fn auto_advance_arms_one_repeating_timer() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true));
    assert!(carousel.is_auto_advancing());
    assert_eq!(carousel.surface().repeating_timer_count(), 1);

    carousel.start();
    carousel.start();
    assert_eq!(carousel.surface().repeating_timer_count(), 1);
}

#[test]
fn invalid_configs_are_rejected() {
    let (surface, _, _) = gallery(3);
    let missing = Carousel::new(surface, CarouselConfig::default(), NoHooks).err();
    assert_eq!(missing, Some(ConfigError::MissingContent));

    let (surface, content, _) = gallery(1);
    let too_few = Carousel::new(surface, CarouselConfig::new(content), NoHooks).err();
    assert_eq!(too_few, Some(ConfigError::TooFewSlides { found: 1 }));

    let (surface, content, _) = gallery(3);
    let config = CarouselConfig::new(content).with_start_index(5);
    assert_eq!(
        Carousel::new(surface, config, NoHooks).err(),
        Some(ConfigError::StartIndexOutOfRange {
            start_index: 5,
            len: 3
        })
    );

    let (surface, content, _) = gallery(3);
    let config = CarouselConfig::new(content).with_duration(0);
    assert_eq!(
        Carousel::new(surface, config, NoHooks).err(),
        Some(ConfigError::ZeroDuration)
    );
}

// --- transitions -------------------------------------------------------------

#[test]
fn index_jumps_and_highlights_the_matching_dot() {
    let (mut carousel, _) = build(4, |c| c.with_buttons(true));
    assert_eq!(active_dots(&carousel), [1]);

    assert_eq!(carousel.index(4), Ok(true));
    assert!(carousel.is_animating());
    run_for(&mut carousel, SPEED);

    assert_eq!(carousel.current(), 4);
    assert!(!carousel.is_animating());
    assert_eq!(active_dots(&carousel), [4]);
    assert_eq!(margin_left(&carousel), Some(-1600.0));
    assert_eq!(carousel.hooks().settled_indices(), [4]);
}

#[test]
fn index_out_of_range_changes_nothing() {
    let (mut carousel, _) = build(3, |c| c);
    carousel.hooks_mut().clear();

    assert_eq!(
        carousel.index(0),
        Err(ValidationError::IndexOutOfRange { index: 0, len: 3 })
    );
    assert_eq!(
        carousel.index(4),
        Err(ValidationError::IndexOutOfRange { index: 4, len: 3 })
    );
    assert_eq!(carousel.current(), 1);
    assert!(!carousel.is_animating());
    assert!(carousel.hooks().events().is_empty());
}

#[test]
fn next_past_the_end_lands_on_the_first_slide() {
    let (mut carousel, _) = build(3, |c| c.with_start_index(3));

    assert!(carousel.next());
    // Animating onto the trailing clone.
    assert_eq!(carousel.current(), 4);
    run_for(&mut carousel, SPEED / 2);
    assert_eq!(margin_left(&carousel), Some(-1400.0));

    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 1);
    assert_eq!(margin_left(&carousel), Some(-400.0));
}

#[test]
fn prev_before_the_start_lands_on_the_last_slide() {
    let (mut carousel, _) = build(3, |c| c);

    assert!(carousel.prev());
    assert_eq!(carousel.current(), 0);
    run_for(&mut carousel, SPEED);

    assert_eq!(carousel.current(), 3);
    assert_eq!(margin_left(&carousel), Some(-1200.0));
}

#[test]
fn one_transition_at_a_time() {
    let (mut carousel, _) = build(3, |c| c);

    assert!(carousel.next());
    assert!(!carousel.next());
    assert!(!carousel.prev());
    assert_eq!(carousel.index(3), Ok(false));
    assert_eq!(carousel.surface().animation_count(), 1);
    assert_eq!(
        carousel.hooks().drops(),
        [
            (Request::Next, DropReason::Animating),
            (Request::Prev, DropReason::Animating),
            (Request::Index(3), DropReason::Animating),
        ]
    );

    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 2);
    assert!(carousel.next());
}

#[test]
fn auto_advance_cycles_through_every_slide() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true).with_duration(1000));

    // Each step is a 1000ms wait plus a 100ms transition.
    run_until(&mut carousel, 8800);
    assert_eq!(carousel.hooks().settled_indices(), [2, 3, 1, 2, 3, 1, 2, 3]);
    assert_eq!(carousel.surface().repeating_timer_count(), 1);
}

#[test]
fn reverse_auto_advance_walks_backwards() {
    let (mut carousel, _) = build(3, |c| {
        c.with_auto(true).with_duration(1000).with_reverse(true)
    });

    run_until(&mut carousel, 2200);
    assert_eq!(carousel.hooks().settled_indices(), [3, 2]);
}

#[test]
fn fade_next_cycles_and_normalizes() {
    let (mut carousel, slides) = build(3, |c| c.with_transition(TransitionKind::Fade));

    for _ in 0..3 {
        assert!(carousel.next());
        assert!(!carousel.next());
        run_for(&mut carousel, SPEED);
    }

    assert_eq!(carousel.hooks().settled_indices(), [2, 3, 1]);
    assert_eq!(carousel.current(), 1);
    let surface = carousel.surface();
    assert!(surface.is_visible(slides[0]));
    assert_eq!(surface.opacity(slides[0]), 1.0);
    assert!(!surface.is_visible(slides[1]));
    assert!(!surface.is_visible(slides[2]));
    assert!(surface.has_class(slides[0], "active"));
    assert!(!surface.has_class(slides[2], "active"));
}

#[test]
fn fade_prev_and_index() {
    let (mut carousel, slides) = build(4, |c| {
        c.with_transition(TransitionKind::Fade).with_buttons(true)
    });

    assert!(carousel.prev());
    assert_eq!(carousel.active(), Some(&slides[3]));
    assert_eq!(active_dots(&carousel), [4]);
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 4);

    assert_eq!(carousel.index(2), Ok(true));
    assert_eq!(carousel.current(), 2);
    assert_eq!(active_dots(&carousel), [2]);
    run_for(&mut carousel, SPEED);
    assert!(carousel.surface().is_visible(slides[1]));
    assert!(!carousel.surface().is_visible(slides[3]));
}

// --- pause, resume, reset, update --------------------------------------------

#[test]
fn paused_requests_are_dropped_until_resume() {
    let (mut carousel, _) = build(3, |c| c);

    carousel.pause();
    assert!(carousel.is_paused());
    assert!(!carousel.next());
    assert_eq!(carousel.current(), 1);
    assert_eq!(carousel.hooks().drops(), [(Request::Next, DropReason::Paused)]);

    carousel.resume();
    assert!(!carousel.is_paused());
    assert!(carousel.is_animating());
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 2);
    assert!(
        carousel
            .hooks()
            .events()
            .iter()
            .any(|e| matches!(e, HookEvent::Resumed(_)))
    );
}

#[test]
fn resume_without_pause_does_nothing() {
    let (mut carousel, _) = build(3, |c| c);
    carousel.hooks_mut().clear();

    carousel.resume();
    assert!(!carousel.is_animating());
    assert!(carousel.hooks().events().is_empty());
}

#[test]
fn pause_stops_auto_advance() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true).with_duration(1000));

    carousel.pause();
    assert!(!carousel.is_auto_advancing());
    run_for(&mut carousel, 5000);
    assert_eq!(carousel.current(), 1);
    assert!(carousel.hooks().settled_indices().is_empty());
}

#[test]
fn pausing_mid_transition_lets_it_finish_without_rearming() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true).with_duration(1000));
    run_until(&mut carousel, 1000 + SPEED / 2);
    assert!(carousel.is_animating());

    carousel.pause();
    run_until(&mut carousel, 3000);
    assert_eq!(carousel.current(), 2);
    assert_eq!(carousel.hooks().settled_indices(), [2]);
    assert!(carousel.is_paused());
    assert!(!carousel.is_auto_advancing());
    assert_eq!(carousel.surface().timer_count(), 0);
}

#[test]
fn reset_returns_to_the_first_slide() {
    let (mut carousel, _) = build(4, |c| c);
    carousel.index(3).unwrap();
    run_for(&mut carousel, SPEED);
    carousel.pause();

    carousel.reset();
    assert!(!carousel.is_paused());
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 1);
    assert_eq!(margin_left(&carousel), Some(-400.0));
    assert!(
        carousel
            .hooks()
            .events()
            .iter()
            .any(|e| matches!(e, HookEvent::Reset(_)))
    );
}

#[test]
fn update_merges_options_and_resumes() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true));
    carousel.hooks_mut().clear();

    carousel.update(CarouselUpdate {
        duration_ms: Some(1000),
        speed_ms: Some(50),
        ..CarouselUpdate::default()
    });

    assert_eq!(carousel.config().duration_ms, 1000);
    assert_eq!(carousel.config().speed_ms, 50);
    assert!(matches!(
        carousel.hooks().events(),
        [
            HookEvent::Paused(_),
            HookEvent::Updated(_),
            HookEvent::BeforeSlide(_),
            HookEvent::Resumed(_),
        ]
    ));
    assert!(carousel.is_auto_advancing());
    run_for(&mut carousel, 50);
    assert_eq!(carousel.current(), 2);
}

#[test]
fn update_can_turn_auto_advance_off() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true));

    carousel.update(CarouselUpdate {
        auto: Some(false),
        duration_ms: Some(0),
        ..CarouselUpdate::default()
    });

    assert!(!carousel.config().auto);
    assert_eq!(carousel.config().duration_ms, 5000);
    assert!(carousel.is_paused());
    assert!(!carousel.is_auto_advancing());
    assert_eq!(carousel.surface().timer_count(), 0);
}

// --- resizing ------------------------------------------------------------------

#[test]
fn resize_remeasures_once_the_burst_settles() {
    let (mut carousel, _) = build(3, |c| c.with_start_index(2));

    carousel.surface_mut().set_viewport(Size::new(600.0, 300.0));
    carousel.on_resize();
    assert!(carousel.is_resizing());
    assert_eq!(carousel.geometry().width, 600.0);

    assert!(!carousel.next());
    assert_eq!(
        carousel.hooks().drops(),
        [(Request::Next, DropReason::Resizing)]
    );

    run_for(&mut carousel, 100);
    assert!(!carousel.is_resizing());
    assert_eq!(margin_left(&carousel), Some(-1200.0));
    assert_eq!(
        carousel
            .surface()
            .length(*carousel.container(), StyleProperty::Width),
        Some(3000.0)
    );
    assert!(carousel.next());
}

#[test]
fn resize_bursts_settle_once_after_the_last_event() {
    let (mut carousel, _) = build(3, |c| c);

    // Events at 0, 50, and 130ms; the quiet period is 100ms.
    carousel.on_resize();
    run_for(&mut carousel, 50);
    carousel.on_resize();
    run_for(&mut carousel, 80);
    assert!(carousel.is_resizing());
    carousel.on_resize();
    assert_eq!(carousel.surface().timer_count(), 1);

    run_for(&mut carousel, 99);
    assert!(carousel.is_resizing());
    assert!(!carousel.next());

    run_for(&mut carousel, 1);
    assert!(!carousel.is_resizing());
    assert_eq!(carousel.surface().timer_count(), 0);
    assert!(carousel.next());
}

#[test]
fn resize_waits_for_the_running_transition() {
    let (mut carousel, _) = build(3, |c| c);
    assert!(carousel.next());

    carousel.surface_mut().set_viewport(Size::new(600.0, 300.0));
    carousel.on_resize();
    // Geometry is frozen while the strip is moving.
    assert_eq!(carousel.geometry().width, 400.0);

    run_for(&mut carousel, SPEED / 2);
    assert_eq!(carousel.geometry().width, 400.0);

    run_for(&mut carousel, 200);
    assert_eq!(carousel.current(), 2);
    assert_eq!(carousel.geometry().width, 600.0);
    assert_eq!(margin_left(&carousel), Some(-1200.0));
    assert!(!carousel.is_resizing());
}

#[test]
fn leading_edge_resize_lifts_the_gate_immediately() {
    let (mut carousel, _) = build(3, |c| c.with_resize_debounce(100, true));

    carousel.on_resize();
    assert!(!carousel.is_resizing());

    carousel.on_resize();
    assert!(carousel.is_resizing());
    run_for(&mut carousel, 100);
    assert!(!carousel.is_resizing());
}

#[test]
fn fade_resize_tracks_the_active_slide_height() {
    let (mut carousel, slides) = build(3, |c| c.with_transition(TransitionKind::Fade));

    carousel
        .surface_mut()
        .set_intrinsic_size(slides[0], None, Some(180.0));
    carousel.on_resize();
    assert_eq!(
        carousel
            .surface()
            .length(*carousel.content(), StyleProperty::Height),
        Some(180.0)
    );
}

// --- navigation ----------------------------------------------------------------

#[test]
fn dots_are_built_one_per_slide() {
    let (mut carousel, _) = build(3, |c| {
        c.with_buttons(true).with_nav_classes(NavClasses {
            dot: "dot".into(),
            ..NavClasses::default()
        })
    });
    let dots = carousel.dot_buttons().to_vec();
    assert_eq!(dots.len(), 3);

    let surface = carousel.surface();
    let list = surface.parent(dots[0]).unwrap();
    assert_eq!(surface.tag(list), Tag::List);
    assert_eq!(surface.parent(list), Some(*carousel.content()));
    assert!(surface.has_class(list, "mod-slider-nav-container"));
    for dot in &dots {
        assert_eq!(surface.tag(*dot), Tag::ListItem);
        assert!(surface.has_class(*dot, "mod-slider-nav-button"));
        assert!(surface.has_class(*dot, "dot"));
    }

    carousel
        .surface_mut()
        .set_intrinsic_size(list, Some(100.0), None);
    carousel.on_resize();
    assert_eq!(
        carousel.surface().length(list, StyleProperty::Left),
        Some(150.0)
    );
}

#[test]
fn clicking_a_dot_jumps_to_its_slide() {
    let (mut carousel, _) = build(3, |c| c.with_buttons(true));
    let third = carousel.dot_buttons()[2];

    assert_eq!(carousel.on_click(&third), ClickResponse::Handled);
    assert_eq!(active_dots(&carousel), [3]);
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 3);
}

#[test]
fn dot_clicks_are_ignored_while_paused() {
    let (mut carousel, _) = build(3, |c| c.with_buttons(true));
    let second = carousel.dot_buttons()[1];

    carousel.pause();
    assert_eq!(carousel.on_click(&second), ClickResponse::Handled);
    assert!(!carousel.is_animating());
    assert_eq!(active_dots(&carousel), [1]);
}

#[test]
fn arrows_step_and_suppress_navigation() {
    let (mut carousel, _) = build(3, |c| {
        c.with_arrows(true).with_nav_classes(NavClasses {
            left_arrow: "back".into(),
            ..NavClasses::default()
        })
    });
    let prev = *carousel.arrow(Arrow::Prev).unwrap();
    let next = *carousel.arrow(Arrow::Next).unwrap();

    let surface = carousel.surface();
    assert_eq!(surface.tag(prev), Tag::Anchor);
    assert_eq!(surface.attribute(prev, "href"), Some("#"));
    assert!(surface.has_class(prev, "mod-slider-left-arrow"));
    assert!(surface.has_class(prev, "back"));
    assert!(surface.has_class(next, "mod-slider-right-arrow"));

    assert_eq!(carousel.on_click(&prev), ClickResponse::PreventDefault);
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 3);

    assert_eq!(carousel.on_click(&next), ClickResponse::PreventDefault);
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 1);

    // Still suppressed when the step itself is dropped.
    carousel.pause();
    assert_eq!(carousel.on_click(&next), ClickResponse::PreventDefault);
    assert_eq!(carousel.current(), 1);
}

#[test]
fn unrelated_clicks_are_ignored() {
    let (mut carousel, slides) = build(3, |c| c.with_buttons(true).with_arrows(true));
    assert_eq!(carousel.on_click(&slides[0]), ClickResponse::Ignored);
    assert!(!carousel.is_animating());
}

// --- mutation ------------------------------------------------------------------

#[test]
fn append_extends_the_strip_and_rebuilds_clones() {
    let (mut carousel, slides) = build(3, |c| c.with_buttons(true));
    carousel.hooks_mut().clear();
    let extra = carousel.surface_mut().detached_block("slide", 250.0);

    carousel.append([extra]);
    assert_eq!(carousel.len(), 4);
    assert_eq!(carousel.dot_buttons().len(), 4);

    let clones = carousel.clones().unwrap().clone();
    let container = *carousel.container();
    assert_eq!(
        carousel.surface().children(&container),
        [
            clones.leading,
            slides[0],
            slides[1],
            slides[2],
            extra,
            clones.trailing
        ]
    );
    assert_eq!(
        carousel.surface().length(container, StyleProperty::Width),
        Some(2400.0)
    );
    assert_eq!(
        carousel.surface().length(extra, StyleProperty::Width),
        Some(400.0)
    );

    // Resuming after the append advances one slide.
    assert!(matches!(
        carousel.hooks().events().last(),
        Some(HookEvent::ItemsAppended(s)) if s.len == 4
    ));
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 2);
}

#[test]
fn append_nothing_is_a_no_op() {
    let (mut carousel, _) = build(3, |c| c);
    carousel.hooks_mut().clear();

    carousel.append(Vec::new());
    assert!(!carousel.is_paused());
    assert!(carousel.hooks().events().is_empty());
}

#[test]
fn fade_append_stages_new_slides_hidden() {
    let (mut carousel, _) = build(2, |c| c.with_transition(TransitionKind::Fade));
    let extra = carousel.surface_mut().detached_block("slide", 250.0);

    carousel.append([extra]);
    let surface = carousel.surface();
    assert_eq!(surface.parent(extra), Some(*carousel.container()));
    assert_eq!(surface.position(&extra), Position::Absolute);
    assert!(!surface.is_visible(extra));
    assert_eq!(carousel.len(), 3);
}

#[test]
fn remove_keeps_at_least_two_slides() {
    let (mut carousel, slides) = build(4, |c| c);
    carousel.hooks_mut().clear();

    assert_eq!(
        carousel.remove(0, 3),
        Err(ValidationError::RemoveBelowFloor { count: 3, len: 4 })
    );
    assert_eq!(carousel.slides(), &slides[..]);
    assert!(!carousel.is_paused());
    assert!(carousel.hooks().events().is_empty());
}

#[test]
fn remove_rejects_ranges_past_the_end() {
    let (mut carousel, _) = build(4, |c| c);
    assert_eq!(
        carousel.remove(3, 2),
        Err(ValidationError::RemoveOutOfBounds {
            start: 3,
            count: 2,
            len: 4
        })
    );
    assert_eq!(carousel.len(), 4);
    assert_eq!(carousel.remove(1, 0), Ok(()));
    assert_eq!(carousel.len(), 4);
}

#[test]
fn remove_detaches_slides_and_resets() {
    let (mut carousel, slides) = build(4, |c| c.with_buttons(true));
    carousel.index(4).unwrap();
    run_for(&mut carousel, SPEED);
    carousel.hooks_mut().clear();

    assert_eq!(carousel.remove(1, 2), Ok(()));
    assert_eq!(carousel.slides(), [slides[0], slides[3]]);
    assert_eq!(carousel.surface().parent(slides[1]), None);
    assert_eq!(carousel.surface().parent(slides[2]), None);
    assert_eq!(carousel.dot_buttons().len(), 2);

    let clones = carousel.clones().unwrap();
    assert_eq!(
        carousel.surface().children(carousel.container()),
        [clones.leading, slides[0], slides[3], clones.trailing]
    );

    assert!(matches!(
        carousel.hooks().events(),
        [
            HookEvent::Paused(_),
            HookEvent::BeforeSlide(_),
            HookEvent::Reset(_),
            HookEvent::ItemsRemoved(s),
        ] if s.len == 2
    ));
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 1);
    assert_eq!(margin_left(&carousel), Some(-400.0));
}

#[test]
fn fade_remove_restarts_from_the_first_slide() {
    let (mut carousel, slides) = build(4, |c| c.with_transition(TransitionKind::Fade));
    assert!(carousel.next());
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.active(), Some(&slides[1]));

    assert_eq!(carousel.remove(1, 1), Ok(()));
    assert_eq!(carousel.len(), 3);
    assert_eq!(carousel.surface().parent(slides[1]), None);
    assert!(matches!(
        carousel.hooks().events().last(),
        Some(HookEvent::ItemsRemoved(s)) if s.len == 3
    ));

    // Resuming steps from the first slide to the next one.
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 2);
    assert_eq!(carousel.active(), Some(&slides[2]));
    assert!(!carousel.surface().is_visible(slides[0]));
}

#[test]
fn fade_removal_waits_for_the_running_fade() {
    let (mut carousel, slides) = build(4, |c| c.with_transition(TransitionKind::Fade));
    assert!(carousel.next());
    run_for(&mut carousel, SPEED / 2);

    assert_eq!(carousel.remove(3, 1), Ok(()));
    assert_eq!(carousel.len(), 4);
    assert_eq!(
        carousel.surface().parent(slides[3]),
        Some(*carousel.container())
    );

    run_for(&mut carousel, 2 * SPEED);
    assert!(!carousel.is_animating());
    assert_eq!(carousel.len(), 3);
    assert_eq!(carousel.surface().parent(slides[3]), None);
    assert_eq!(carousel.active(), Some(&slides[1]));
    let visible: Vec<bool> = carousel
        .slides()
        .iter()
        .map(|s| carousel.surface().is_visible(*s))
        .collect();
    assert_eq!(visible, [false, true, false]);
}

#[test]
fn append_waits_for_the_running_slide() {
    let (mut carousel, _) = build(3, |c| c);
    assert!(carousel.next());
    run_for(&mut carousel, SPEED / 2);
    let extra = carousel.surface_mut().detached_block("slide", 250.0);

    carousel.append([extra]);
    assert_eq!(carousel.len(), 3);
    assert_eq!(carousel.surface().parent(extra), None);
    assert_eq!(margin_left(&carousel), Some(-600.0));

    // Applied on completion, then resuming starts the next step.
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.len(), 4);
    assert_eq!(
        carousel.surface().parent(extra),
        Some(*carousel.container())
    );
    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.current(), 3);
    assert_eq!(margin_left(&carousel), Some(-1200.0));
    assert_eq!(carousel.hooks().settled_indices(), [2, 3]);
}

#[test]
fn queued_removals_respect_the_floor() {
    let (mut carousel, slides) = build(4, |c| c);
    assert!(carousel.next());

    assert_eq!(carousel.remove(0, 2), Ok(()));
    assert_eq!(
        carousel.remove(0, 1),
        Err(ValidationError::RemoveBelowFloor { count: 1, len: 2 })
    );

    run_for(&mut carousel, SPEED);
    assert_eq!(carousel.slides(), [slides[2], slides[3]]);
}

#[test]
fn into_parts_clears_timers() {
    let (mut carousel, _) = build(3, |c| c.with_auto(true));
    carousel.on_resize();
    assert!(carousel.surface().timer_count() >= 2);

    let (surface, hooks) = carousel.into_parts();
    assert_eq!(surface.timer_count(), 0);
    assert!(!hooks.events().is_empty());
}
