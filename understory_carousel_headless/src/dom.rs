// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory element tree implementing [`Surface`].
//!
//! ## Layout model
//!
//! Layout is deliberately simple:
//!
//! - Width is the `Width` style if set, else the intrinsic width if set,
//!   else the parent's width. The body is as wide as the viewport.
//! - Height is the `Height` style if set, else the intrinsic height, else `0`.
//! - Hidden elements measure as zero.
//!
//! That is enough to exercise the carousel's measurement passes without a
//! real layout engine.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Size;
use smallvec::SmallVec;
use understory_carousel::{
    EventKind, Position, Repeat, Style, StyleProperty, Surface, Tag, Timers,
};

use crate::clock::{AnimationId, AnimationKind, Clock, Popped, TimerId, Tween, Wake};

/// Handle to an element of a [`HeadlessSurface`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn idx(self) -> usize {
        self.0 as usize
    }

    #[cfg(test)]
    pub(crate) const fn for_tests(idx: u32) -> Self {
        Self(idx)
    }
}

#[derive(Clone, Debug)]
struct Node {
    tag: Tag,
    classes: SmallVec<[String; 4]>,
    attributes: SmallVec<[(String, String); 2]>,
    styles: HashMap<StyleProperty, Style>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visible: bool,
    opacity: f64,
    intrinsic_width: Option<f64>,
    intrinsic_height: Option<f64>,
}

impl Node {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: SmallVec::new(),
            attributes: SmallVec::new(),
            styles: HashMap::new(),
            parent: None,
            children: Vec::new(),
            visible: true,
            opacity: 1.0,
            intrinsic_width: None,
            intrinsic_height: None,
        }
    }

    fn length(&self, property: StyleProperty) -> Option<f64> {
        self.styles.get(&property).and_then(|s| s.length())
    }
}

/// An in-memory [`Surface`] driven by a virtual clock.
///
/// Nothing happens on its own: timers and animations become due only when
/// the clock is pumped with [`pop_due`](Self::pop_due) (or the
/// [`run_until`](crate::run_until) driver).
///
/// Nodes live in an append-only arena. [`Surface::remove`] detaches a node
/// but never frees its slot, so memory grows with every clone and navigation
/// rebuild. This is fine for tests and short simulations, not for
/// long-running hosts.
#[derive(Debug)]
pub struct HeadlessSurface {
    nodes: Vec<Node>,
    body: NodeId,
    viewport: Size,
    clock: Clock,
    listeners: HashSet<(NodeId, EventKind)>,
    resize_listeners: usize,
}

impl HeadlessSurface {
    /// Creates a surface with an empty body of the given viewport size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut body = Node::new(Tag::Div);
        body.styles
            .insert(StyleProperty::Position, Style::Position(Position::Relative));
        Self {
            nodes: alloc::vec![body],
            body: NodeId(0),
            viewport,
            clock: Clock::default(),
            listeners: HashSet::new(),
            resize_listeners: 0,
        }
    }

    /// The root element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Creates a `div` with `class` under `parent` with the given intrinsic
    /// height.
    pub fn insert_block(&mut self, parent: NodeId, class: &str, height: f64) -> NodeId {
        let id = self.create_element(Tag::Div, class);
        self.node_mut(id).intrinsic_height = Some(height);
        self.append_child(&parent, &id);
        id
    }

    /// Creates a detached `div` with `class` and the given intrinsic height.
    pub fn detached_block(&mut self, class: &str, height: f64) -> NodeId {
        let id = self.create_element(Tag::Div, class);
        self.node_mut(id).intrinsic_height = Some(height);
        id
    }

    /// Sets the size an element reports when no explicit style overrides it.
    pub fn set_intrinsic_size(&mut self, element: NodeId, width: Option<f64>, height: Option<f64>) {
        let node = self.node_mut(element);
        node.intrinsic_width = width;
        node.intrinsic_height = height;
    }

    /// Changes the viewport. Hosts should follow up with a resize event.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Earliest time anything is due, if anything is pending.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.clock.next_due()
    }

    /// Pops the earliest timer or animation due at or before `deadline`.
    ///
    /// The clock moves to its due time and running animations are sampled
    /// there. A finished animation has its final values applied before it is
    /// returned.
    pub fn pop_due(&mut self, deadline: u64) -> Option<Wake> {
        let popped = self.clock.pop_due(deadline)?;
        self.sample();
        Some(match popped {
            Popped::Timer(id) => Wake::Timer(id),
            Popped::Animation(entry) => {
                let node = self.node_mut(entry.element);
                match entry.kind {
                    AnimationKind::Tween { finals, .. } => {
                        for style in finals {
                            node.styles.insert(style.property(), style);
                        }
                    }
                    AnimationKind::FadeIn { .. } => {
                        node.visible = true;
                        node.opacity = 1.0;
                    }
                    AnimationKind::FadeOut { .. } => {
                        node.visible = false;
                        node.opacity = 0.0;
                    }
                }
                Wake::Animation(entry.id)
            }
        })
    }

    /// Moves the clock forward to `time`, sampling running animations.
    ///
    /// Anything due before `time` stays pending; pump it with
    /// [`pop_due`](Self::pop_due) first.
    pub fn advance_to(&mut self, time: u64) {
        self.clock.advance_to(time);
        self.sample();
    }

    /// Writes interpolated values of running animations at the current time.
    fn sample(&mut self) {
        let now = self.clock.now();
        for entry in self.clock.animations() {
            let t = entry.progress(now);
            let node = &mut self.nodes[entry.element.idx()];
            match &entry.kind {
                AnimationKind::Tween { tweens, .. } => {
                    for tween in tweens {
                        let value = tween.from + (tween.to - tween.from) * t;
                        if let Some(style) = Style::with_length(tween.property, value) {
                            node.styles.insert(tween.property, style);
                        }
                    }
                }
                AnimationKind::FadeIn { from } => node.opacity = from + (1.0 - from) * t,
                AnimationKind::FadeOut { from } => node.opacity = from * (1.0 - t),
            }
        }
    }

    /// Number of armed timers.
    #[must_use]
    pub fn timer_count(&self) -> usize {
        self.clock.timer_count()
    }

    /// Number of armed repeating timers.
    #[must_use]
    pub fn repeating_timer_count(&self) -> usize {
        self.clock.repeating_timer_count()
    }

    /// Number of running animations.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.clock.animations().len()
    }

    /// The tag `element` was created with.
    #[must_use]
    pub fn tag(&self, element: NodeId) -> Tag {
        self.node(element).tag
    }

    /// The current value of a style property, if set.
    #[must_use]
    pub fn style(&self, element: NodeId, property: StyleProperty) -> Option<Style> {
        self.node(element).styles.get(&property).copied()
    }

    /// The current value of a length property, if set.
    #[must_use]
    pub fn length(&self, element: NodeId, property: StyleProperty) -> Option<f64> {
        self.node(element).length(property)
    }

    /// Returns `true` if `element` carries `class`.
    #[must_use]
    pub fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.node(element).classes.iter().any(|c| c == class)
    }

    /// The value of an attribute, if set.
    #[must_use]
    pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.node(element)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` unless `element` is hidden.
    #[must_use]
    pub fn is_visible(&self, element: NodeId) -> bool {
        self.node(element).visible
    }

    /// Current opacity of `element`.
    #[must_use]
    pub fn opacity(&self, element: NodeId) -> f64 {
        self.node(element).opacity
    }

    /// Parent of `element`, or `None` if detached.
    #[must_use]
    pub fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.node(element).parent
    }

    /// Returns `true` if `element` is subscribed to `kind`.
    #[must_use]
    pub fn is_listening(&self, element: NodeId, kind: EventKind) -> bool {
        self.listeners.contains(&(element, kind))
    }

    /// Number of resize subscriptions.
    #[must_use]
    pub fn resize_listeners(&self) -> usize {
        self.resize_listeners
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != child);
        }
    }

    fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.detach(child);
        let siblings = &mut self.node_mut(parent).children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    fn width_of(&self, id: NodeId) -> f64 {
        if id == self.body {
            return self.viewport.width;
        }
        let node = self.node(id);
        node.length(StyleProperty::Width)
            .or(node.intrinsic_width)
            .or_else(|| node.parent.map(|p| self.width_of(p)))
            .unwrap_or(0.0)
    }

    fn height_of(&self, id: NodeId) -> f64 {
        if id == self.body {
            return self.viewport.height;
        }
        let node = self.node(id);
        node.length(StyleProperty::Height)
            .or(node.intrinsic_height)
            .unwrap_or(0.0)
    }

    fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let mut copy = self.node(id).clone();
        copy.parent = None;
        let children = core::mem::take(&mut copy.children);
        let new_id = self.push(copy);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.node_mut(child_copy).parent = Some(new_id);
            self.node_mut(new_id).children.push(child_copy);
        }
        new_id
    }

    fn subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in &self.node(id).children {
            self.subtree(*child, out);
        }
    }
}

impl Timers for HeadlessSurface {
    type Timer = TimerId;

    fn set_timer(&mut self, delay_ms: u32, repeat: Repeat) -> TimerId {
        self.clock.set_timer(delay_ms, repeat)
    }

    fn clear_timer(&mut self, timer: TimerId) {
        self.clock.clear_timer(timer);
    }
}

impl Surface for HeadlessSurface {
    type Element = NodeId;
    type Animation = AnimationId;

    fn children(&self, parent: &NodeId) -> Vec<NodeId> {
        self.node(*parent).children.clone()
    }

    fn measure(&self, element: &NodeId) -> Size {
        if !self.node(*element).visible {
            return Size::ZERO;
        }
        Size::new(self.width_of(*element), self.height_of(*element))
    }

    fn position(&self, element: &NodeId) -> Position {
        match self.style(*element, StyleProperty::Position) {
            Some(Style::Position(position)) => position,
            _ => Position::Static,
        }
    }

    fn set_style(&mut self, element: &NodeId, styles: &[Style]) {
        let node = self.node_mut(*element);
        for style in styles {
            node.styles.insert(style.property(), *style);
        }
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        let node = self.node_mut(*element);
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(String::from(class));
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        self.node_mut(*element).classes.retain(|c| c != class);
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        let node = self.node_mut(*element);
        match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = String::from(value),
            None => node.attributes.push((String::from(name), String::from(value))),
        }
    }

    fn create_element(&mut self, tag: Tag, class: &str) -> NodeId {
        let mut node = Node::new(tag);
        node.classes = class.split_whitespace().map(String::from).collect();
        self.push(node)
    }

    fn clone_element(&mut self, element: &NodeId) -> NodeId {
        self.deep_clone(*element)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.attach_at(*parent, *child, usize::MAX);
    }

    fn prepend_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.attach_at(*parent, *child, 0);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        self.detach(*child);
        let index = self
            .node(*parent)
            .children
            .iter()
            .position(|c| c == reference)
            .unwrap_or(usize::MAX);
        self.attach_at(*parent, *child, index);
    }

    fn remove(&mut self, element: &NodeId) {
        self.detach(*element);
        let mut ids = Vec::new();
        self.subtree(*element, &mut ids);
        self.listeners.retain(|(id, _)| !ids.contains(id));
    }

    fn show(&mut self, element: &NodeId) {
        let node = self.node_mut(*element);
        node.visible = true;
        node.opacity = 1.0;
    }

    fn hide(&mut self, element: &NodeId) {
        self.node_mut(*element).visible = false;
    }

    fn animate(&mut self, element: &NodeId, targets: &[Style], duration_ms: u32) -> AnimationId {
        let node = self.node(*element);
        let tweens = targets
            .iter()
            .filter_map(|target| {
                let to = target.length()?;
                let property = target.property();
                let from = node.length(property).unwrap_or(0.0);
                Some(Tween { property, from, to })
            })
            .collect();
        let kind = AnimationKind::Tween {
            tweens,
            finals: targets.iter().copied().collect(),
        };
        self.clock.start_animation(*element, duration_ms, kind)
    }

    fn fade_in(&mut self, element: &NodeId, duration_ms: u32) -> AnimationId {
        let node = self.node_mut(*element);
        let from = if node.visible { node.opacity } else { 0.0 };
        node.visible = true;
        node.opacity = from;
        self.clock
            .start_animation(*element, duration_ms, AnimationKind::FadeIn { from })
    }

    fn fade_out(&mut self, element: &NodeId, duration_ms: u32) -> AnimationId {
        let from = self.node(*element).opacity;
        self.clock
            .start_animation(*element, duration_ms, AnimationKind::FadeOut { from })
    }

    fn listen(&mut self, element: &NodeId, kind: EventKind) {
        self.listeners.insert((*element, kind));
    }

    fn listen_resize(&mut self) {
        self.resize_listeners += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_inherits_from_parent_and_body() {
        let mut s = HeadlessSurface::new(Size::new(640.0, 480.0));
        let outer = s.insert_block(s.body(), "outer", 100.0);
        let inner = s.insert_block(outer, "inner", 20.0);

        assert_eq!(s.measure(&inner), Size::new(640.0, 20.0));
        s.set_style(&outer, &[Style::Width(300.0)]);
        assert_eq!(s.measure(&inner).width, 300.0);

        s.hide(&inner);
        assert_eq!(s.measure(&inner), Size::ZERO);
    }

    #[test]
    fn tree_edits_keep_parent_links_consistent() {
        let mut s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let body = s.body();
        let a = s.insert_block(body, "a", 0.0);
        let b = s.insert_block(body, "b", 0.0);
        let c = s.detached_block("c", 0.0);

        s.insert_before(&body, &c, &b);
        assert_eq!(s.children(&body), [a, c, b]);

        s.prepend_child(&body, &b);
        assert_eq!(s.children(&body), [b, a, c]);

        s.remove(&a);
        assert_eq!(s.children(&body), [b, c]);
        assert_eq!(s.parent(a), None);
    }

    #[test]
    fn clones_are_deep_and_detached() {
        let mut s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let slide = s.insert_block(s.body(), "slide", 40.0);
        let caption = s.insert_block(slide, "caption", 10.0);
        s.listen(&slide, EventKind::Click);

        let copy = s.clone_element(&slide);
        assert_ne!(copy, slide);
        assert_eq!(s.parent(copy), None);
        assert!(s.has_class(copy, "slide"));
        assert_eq!(s.children(&copy).len(), 1);
        assert_ne!(s.children(&copy)[0], caption);
        assert!(!s.is_listening(copy, EventKind::Click));
    }

    #[test]
    fn tweens_interpolate_and_land_on_target() {
        let mut s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let el = s.insert_block(s.body(), "strip", 0.0);
        s.set_style(&el, &[Style::MarginLeft(-100.0)]);
        let anim = s.animate(&el, &[Style::MarginLeft(-200.0)], 100);

        s.advance_to(50);
        assert_eq!(s.length(el, StyleProperty::MarginLeft), Some(-150.0));

        assert_eq!(s.pop_due(1000), Some(Wake::Animation(anim)));
        assert_eq!(s.length(el, StyleProperty::MarginLeft), Some(-200.0));
        assert_eq!(s.animation_count(), 0);
    }

    #[test]
    fn fades_toggle_visibility() {
        let mut s = HeadlessSurface::new(Size::new(100.0, 100.0));
        let a = s.insert_block(s.body(), "a", 0.0);
        let b = s.insert_block(s.body(), "b", 0.0);
        s.hide(&b);

        s.fade_out(&a, 100);
        s.fade_in(&b, 100);
        assert!(s.is_visible(b));
        assert_eq!(s.opacity(b), 0.0);

        while s.pop_due(100).is_some() {}
        assert!(!s.is_visible(a));
        assert_eq!(s.opacity(b), 1.0);
    }
}
