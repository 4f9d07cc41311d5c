#![forbid(unsafe_code)]

//! Swipe resolution: the decision that turns a finished drag into a
//! [`SwipeResult`], and the per-item lifecycle it runs in.
//!
//! ```text
//! Idle -> Dragging -> Resolved(result) -> Committing(result, reaction) -> Idle
//!            \-------------------------------------------------------> Idle (aborted)
//! ```
//!
//! # Resolution rules
//!
//! 1. No locked axis or zero displacement: canceled.
//! 2. The direction is the sign of the displacement on the locked axis.
//! 3. Anything short of [`DirectionReaction::Allowed`] cancels, so
//!    rubber-band directions always spring back.
//! 4. A magnitude at or below `release_threshold` cancels.
//! 5. Otherwise the swipe completes when the magnitude strictly exceeds
//!    `completion_ratio * extent`, or when the velocity points the same way
//!    and strictly exceeds `fling_velocity`. Values exactly at a threshold
//!    do not complete.

use swipe_core::{
    AfterSwipeReaction, DirectionReaction, ItemExtent, ReactionMask, SwipeAxis, SwipeDirection,
    SwipeResult, SwipeTuning,
};
use web_time::Instant;

use crate::tracker::SlideTracker;

/// Everything resolution looks at, captured at release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseSnapshot {
    pub mask: ReactionMask,
    pub axis: Option<SwipeAxis>,
    /// Raw pointer displacement along `axis`.
    pub offset: f32,
    /// Velocity along `axis`, units per second.
    pub velocity: f32,
    pub extent: ItemExtent,
}

impl ReleaseSnapshot {
    #[must_use]
    pub fn from_tracker(tracker: &SlideTracker) -> Self {
        Self {
            mask: *tracker.mask(),
            axis: tracker.axis(),
            offset: tracker.raw_offset(),
            velocity: tracker.velocity(),
            extent: tracker.extent(),
        }
    }
}

/// Resolve a released gesture.
#[must_use]
pub fn resolve(snapshot: &ReleaseSnapshot, tuning: &SwipeTuning) -> SwipeResult {
    let Some(axis) = snapshot.axis else {
        return SwipeResult::Canceled;
    };
    let Some(direction) = SwipeDirection::from_slide(axis, snapshot.offset) else {
        return SwipeResult::Canceled;
    };
    if snapshot.mask.get(direction) != DirectionReaction::Allowed {
        return SwipeResult::Canceled;
    }

    let magnitude = snapshot.offset.abs();
    if magnitude <= tuning.release_threshold {
        return SwipeResult::Canceled;
    }

    let by_distance = magnitude > tuning.completion_distance(snapshot.extent.along(axis));
    let by_fling = snapshot.velocity.is_finite()
        && snapshot.velocity * direction.sign() > tuning.fling_velocity;

    if by_distance || by_fling {
        SwipeResult::swiped(direction)
    } else {
        SwipeResult::Canceled
    }
}

/// Lifecycle phase of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipePhase {
    #[default]
    Idle,
    Dragging,
    Resolved {
        result: SwipeResult,
    },
    Committing {
        result: SwipeResult,
        reaction: AfterSwipeReaction,
    },
}

impl SwipePhase {
    /// Whether moving from `self` to `to` is a legal lifecycle step.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Dragging)
                | (Self::Dragging, Self::Resolved { .. })
                | (Self::Dragging, Self::Idle)
                | (Self::Resolved { .. }, Self::Committing { .. })
                | (Self::Committing { .. }, Self::Idle)
        )
    }

    /// Whether a touch-down on an item in this phase must be ignored.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Resolved { .. } => "resolved",
            Self::Committing { .. } => "committing",
        }
    }
}

/// State of one in-flight gesture.
#[derive(Debug, Clone)]
pub struct SwipeGesture {
    tracker: SlideTracker,
    phase: SwipePhase,
    started_at: Instant,
    start_position: usize,
}

impl SwipeGesture {
    #[must_use]
    pub fn new(tracker: SlideTracker, start_position: usize, started_at: Instant) -> Self {
        Self {
            tracker,
            phase: SwipePhase::Dragging,
            started_at,
            start_position,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> SwipePhase {
        self.phase
    }

    #[must_use]
    pub const fn tracker(&self) -> &SlideTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SlideTracker {
        &mut self.tracker
    }

    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Index the item had at touch-down. Diagnostic only; never use it to
    /// address the data set.
    #[must_use]
    pub const fn start_position(&self) -> usize {
        self.start_position
    }

    /// Move to `to`, returning the previous phase, or `None` if the step is
    /// not a legal lifecycle transition.
    pub fn advance(&mut self, to: SwipePhase) -> Option<SwipePhase> {
        let from = self.phase;
        if !from.can_transition_to(to) {
            return None;
        }
        self.phase = to;
        Some(from)
    }

    /// Resolve the release from the tracked slide.
    pub fn resolve(&mut self, tuning: &SwipeTuning) -> Option<SwipeResult> {
        let result = resolve(&ReleaseSnapshot::from_tracker(&self.tracker), tuning);
        self.advance(SwipePhase::Resolved { result })?;
        Some(result)
    }

    /// Resolve as canceled regardless of the slide.
    pub fn force_cancel(&mut self) -> Option<SwipeResult> {
        let result = SwipeResult::Canceled;
        self.advance(SwipePhase::Resolved { result })?;
        Some(result)
    }
}
