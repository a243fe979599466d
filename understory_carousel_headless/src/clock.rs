// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual clock: pending timers and running animations, ordered by due time.

use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_carousel::{Repeat, Style, StyleProperty};

use crate::dom::NodeId;

/// Handle to a timer armed on a [`HeadlessSurface`](crate::HeadlessSurface).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Handle to an animation running on a [`HeadlessSurface`](crate::HeadlessSurface).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// Something that became due on the virtual clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wake {
    /// A timer fired. Repeating timers stay armed.
    Timer(TimerId),
    /// An animation reached its end; its final values are applied.
    Animation(AnimationId),
}

#[derive(Clone, Debug)]
struct TimerEntry {
    id: TimerId,
    due: u64,
    seq: u64,
    interval: Option<u64>,
}

/// One length property moving between two values.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Tween {
    pub(crate) property: StyleProperty,
    pub(crate) from: f64,
    pub(crate) to: f64,
}

#[derive(Clone, Debug)]
pub(crate) enum AnimationKind {
    Tween {
        tweens: SmallVec<[Tween; 2]>,
        /// Applied verbatim at the end, including non-length targets.
        finals: SmallVec<[Style; 2]>,
    },
    FadeIn {
        from: f64,
    },
    FadeOut {
        from: f64,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct AnimationEntry {
    pub(crate) id: AnimationId,
    pub(crate) element: NodeId,
    pub(crate) kind: AnimationKind,
    start: u64,
    duration: u64,
    seq: u64,
}

impl AnimationEntry {
    fn due(&self) -> u64 {
        self.start + self.duration
    }

    /// Linear progress in `0.0..=1.0` at time `now`.
    pub(crate) fn progress(&self, now: u64) -> f64 {
        if self.duration == 0 || now >= self.due() {
            return 1.0;
        }
        now.saturating_sub(self.start) as f64 / self.duration as f64
    }
}

/// What [`Clock::pop_due`] produced.
#[derive(Debug)]
pub(crate) enum Popped {
    Timer(TimerId),
    Animation(AnimationEntry),
}

#[derive(Debug, Default)]
pub(crate) struct Clock {
    now: u64,
    seq: u64,
    next_id: u64,
    timers: Vec<TimerEntry>,
    animations: Vec<AnimationEntry>,
}

impl Clock {
    pub(crate) fn now(&self) -> u64 {
        self.now
    }

    fn bump_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn bump_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn set_timer(&mut self, delay_ms: u32, repeat: Repeat) -> TimerId {
        let id = TimerId(self.bump_id());
        let seq = self.bump_seq();
        let delay = u64::from(delay_ms);
        let interval = match repeat {
            Repeat::Once => None,
            // A zero interval would fire forever without time passing.
            Repeat::Every => Some(delay.max(1)),
        };
        self.timers.push(TimerEntry {
            id,
            due: self.now + delay,
            seq,
            interval,
        });
        id
    }

    pub(crate) fn clear_timer(&mut self, timer: TimerId) {
        self.timers.retain(|t| t.id != timer);
    }

    pub(crate) fn start_animation(
        &mut self,
        element: NodeId,
        duration_ms: u32,
        kind: AnimationKind,
    ) -> AnimationId {
        let id = AnimationId(self.bump_id());
        let seq = self.bump_seq();
        self.animations.push(AnimationEntry {
            id,
            element,
            kind,
            start: self.now,
            duration: u64::from(duration_ms),
            seq,
        });
        id
    }

    pub(crate) fn animations(&self) -> &[AnimationEntry] {
        &self.animations
    }

    pub(crate) fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn repeating_timer_count(&self) -> usize {
        self.timers.iter().filter(|t| t.interval.is_some()).count()
    }

    /// Earliest due time of anything pending.
    pub(crate) fn next_due(&self) -> Option<u64> {
        let timers = self.timers.iter().map(|t| t.due);
        let animations = self.animations.iter().map(AnimationEntry::due);
        timers.chain(animations).min()
    }

    /// Pops the earliest item due at or before `deadline`, moving the clock
    /// to its due time. Ties go to whichever was scheduled first.
    pub(crate) fn pop_due(&mut self, deadline: u64) -> Option<Popped> {
        let timer = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, t)| (t.due, t.seq, i));
        let animation = self
            .animations
            .iter()
            .enumerate()
            .filter(|(_, a)| a.due() <= deadline)
            .min_by_key(|(_, a)| (a.due(), a.seq))
            .map(|(i, a)| (a.due(), a.seq, i));

        let pick_timer = match (timer, animation) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some((td, ts, _)), Some((ad, as_, _))) => (td, ts) <= (ad, as_),
        };

        if pick_timer {
            let (due, _, index) = timer?;
            self.now = self.now.max(due);
            let seq = self.bump_seq();
            let TimerEntry { id, interval, .. } = self.timers[index];
            match interval {
                Some(interval) => {
                    let entry = &mut self.timers[index];
                    entry.due += interval;
                    entry.seq = seq;
                }
                None => {
                    self.timers.remove(index);
                }
            }
            Some(Popped::Timer(id))
        } else {
            let (due, _, index) = animation?;
            self.now = self.now.max(due);
            Some(Popped::Animation(self.animations.remove(index)))
        }
    }

    /// Moves the clock forward without popping anything.
    pub(crate) fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}
