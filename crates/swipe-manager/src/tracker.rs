#![forbid(unsafe_code)]

//! Slide tracking for one active gesture.
//!
//! [`SlideTracker`] turns pointer positions into the visual slide amount the
//! adapter sees. It locks onto an axis once the pointer leaves the touch
//! slop, applies the reaction mask (allowed directions follow the pointer up
//! to the item extent, elastic directions follow with resistance, blocked
//! directions stay put), and keeps a short sample window for the release
//! velocity.
//!
//! # Invariants
//!
//! 1. No slide amount is produced before the axis is locked.
//! 2. The visual amount never points into a blocked direction.
//! 3. The background changes only when the sign of the visual amount does.

use std::collections::VecDeque;

use web_time::Instant;

use swipe_core::{
    DirectionReaction, ItemExtent, MAX_VELOCITY_SAMPLES, ReactionMask, SwipeAxis,
    SwipeBackground, SwipeDirection, SwipeTuning, TouchPoint,
};

/// Outcome of feeding one pointer position to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackStep {
    /// Pointer still inside the touch slop; no axis yet.
    BelowSlop,
    /// The gesture locked onto an axis on which nothing may move.
    AxisBlocked { axis: SwipeAxis },
    /// The visual amount did not change.
    Unchanged,
    /// The visual amount changed. `background` is set when the sign changed.
    Moved {
        amount: f32,
        background: Option<SwipeBackground>,
        axis_locked: Option<SwipeAxis>,
    },
}

/// Visual slide for a raw displacement along `axis`.
#[must_use]
pub fn visual_slide(
    mask: &ReactionMask,
    axis: SwipeAxis,
    raw: f32,
    extent: ItemExtent,
    tuning: &SwipeTuning,
) -> f32 {
    let Some(direction) = SwipeDirection::from_slide(axis, raw) else {
        return 0.0;
    };
    let length = extent.along(axis);
    match mask.get(direction) {
        DirectionReaction::Allowed => raw.clamp(-length, length),
        DirectionReaction::BlockedElastic => {
            let limit = length * tuning.rubber_band_factor;
            (raw * tuning.rubber_band_factor).clamp(-limit, limit)
        }
        DirectionReaction::Blocked => 0.0,
    }
}

/// Per-gesture slide state.
#[derive(Debug, Clone)]
pub struct SlideTracker {
    origin: TouchPoint,
    extent: ItemExtent,
    mask: ReactionMask,
    axis: Option<SwipeAxis>,
    raw: f32,
    amount: f32,
    background: SwipeBackground,
    samples: VecDeque<(Instant, f32)>,
    max_samples: usize,
}

impl SlideTracker {
    #[must_use]
    pub fn new(
        origin: TouchPoint,
        extent: ItemExtent,
        mask: ReactionMask,
        tuning: &SwipeTuning,
    ) -> Self {
        // Tunings built in code skip validation.
        let max_samples = tuning.max_velocity_samples.clamp(2, MAX_VELOCITY_SAMPLES);
        Self {
            origin,
            extent,
            mask,
            axis: None,
            raw: 0.0,
            amount: 0.0,
            background: SwipeBackground::Neutral,
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    /// Feed one pointer position.
    pub fn update(&mut self, point: TouchPoint, now: Instant, tuning: &SwipeTuning) -> TrackStep {
        if !point.is_finite() {
            return TrackStep::Unchanged;
        }
        let (dx, dy) = point.delta_from(self.origin);

        let mut axis_locked = None;
        let axis = match self.axis {
            Some(axis) => axis,
            None => {
                let (ax, ay) = (dx.abs(), dy.abs());
                if ax.max(ay) <= tuning.touch_slop {
                    return TrackStep::BelowSlop;
                }
                let axis = if ax >= ay {
                    SwipeAxis::Horizontal
                } else {
                    SwipeAxis::Vertical
                };
                self.axis = Some(axis);
                if !self.mask.is_axis_interactive(axis) {
                    return TrackStep::AxisBlocked { axis };
                }
                axis_locked = Some(axis);
                axis
            }
        };

        self.raw = axis.component(dx, dy);
        self.push_sample(now);

        let amount = visual_slide(&self.mask, axis, self.raw, self.extent, tuning);
        if amount == self.amount && axis_locked.is_none() {
            return TrackStep::Unchanged;
        }
        self.amount = amount;

        let background = SwipeBackground::for_slide(axis, amount);
        let changed_background = (background != self.background).then(|| {
            self.background = background;
            background
        });

        TrackStep::Moved {
            amount,
            background: changed_background,
            axis_locked,
        }
    }

    fn push_sample(&mut self, now: Instant) {
        if self.samples.len() == self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back((now, self.raw));
    }

    /// Estimated velocity along the locked axis, in units per second.
    ///
    /// Zero until two samples with distinct timestamps exist.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = t1.saturating_duration_since(t0).as_secs_f32();
        if dt <= 0.0 {
            return 0.0;
        }
        (p1 - p0) / dt
    }

    #[must_use]
    pub const fn axis(&self) -> Option<SwipeAxis> {
        self.axis
    }

    /// Raw pointer displacement along the locked axis.
    #[must_use]
    pub const fn raw_offset(&self) -> f32 {
        self.raw
    }

    /// Last visual slide amount.
    #[must_use]
    pub const fn amount(&self) -> f32 {
        self.amount
    }

    #[must_use]
    pub const fn background(&self) -> SwipeBackground {
        self.background
    }

    #[must_use]
    pub const fn mask(&self) -> &ReactionMask {
        &self.mask
    }

    #[must_use]
    pub const fn extent(&self) -> ItemExtent {
        self.extent
    }

    /// Length of the item along the locked axis, zero before locking.
    #[must_use]
    pub fn axis_length(&self) -> f32 {
        self.axis.map_or(0.0, |axis| self.extent.along(axis))
    }
}
