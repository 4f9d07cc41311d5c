#![forbid(unsafe_code)]

//! Multi-item swipe manager.
//!
//! [`SwipeManager`] owns one [`SwipeGesture`] per item that is currently
//! being dragged and drives it through the lifecycle:
//!
//! ```text
//! touch_down ──► Dragging ──touch_move──► Dragging
//!                   │
//!                   ├─ release ────────► Resolved(result) ─► Committing ─► Idle
//!                   ├─ cancel / axis blocked / slide failure
//!                   │                 ─► Resolved(canceled) ─► Committing ─► Idle
//!                   └─ key lost ─────► Idle (aborted, no adapter calls)
//! ```
//!
//! Resolution and both commit phases run inside the call that ends the drag,
//! so between calls an item is either idle or dragging. Items are addressed by
//! key; the position handed to the adapter is looked up from the data set on
//! every call.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;
use swipe_core::{
    ItemExtent, ReactionMask, SwipeBackground, SwipeTuning, SwipeTuningError, TouchPoint,
};
use web_time::Instant;

use crate::adapter::{ItemSequence, SwipeableItemAdapter};
use crate::committer::{self, PendingRemovals, Settle};
use crate::resolver::{SwipeGesture, SwipePhase};
use crate::tracker::{SlideTracker, TrackStep};
use crate::transition::{CancelReason, SwipeEffect, SwipeNoopReason, SwipeTransition};

/// What one pointer update did to a dragging gesture.
enum DragStep<K> {
    Noop(SwipeNoopReason),
    Moved(SwipeTransition<K>),
    Ended,
}

/// Swipe gesture coordinator for one list.
#[derive(Debug, Clone)]
pub struct SwipeManager<K> {
    tuning: SwipeTuning,
    gestures: AHashMap<K, SwipeGesture>,
    pending_removals: PendingRemovals<K>,
    transition_counter: u64,
}

impl<K> Default for SwipeManager<K> {
    fn default() -> Self {
        Self {
            tuning: SwipeTuning::default(),
            gestures: AHashMap::default(),
            pending_removals: PendingRemovals::default(),
            transition_counter: 0,
        }
    }
}

impl<K> SwipeManager<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Construct a manager with explicit tuning.
    pub fn new(tuning: SwipeTuning) -> Result<Self, SwipeTuningError> {
        Ok(Self {
            tuning: tuning.validated()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub const fn tuning(&self) -> &SwipeTuning {
        &self.tuning
    }

    /// Replace the tuning. Gestures already in flight keep their sample
    /// window but resolve against the new thresholds.
    pub fn set_tuning(&mut self, tuning: SwipeTuning) -> Result<(), SwipeTuningError> {
        self.tuning = tuning.validated()?;
        Ok(())
    }

    /// Lifecycle phase of `key`. Idle unless a drag is in flight.
    #[must_use]
    pub fn phase(&self, key: &K) -> SwipePhase {
        self.gestures
            .get(key)
            .map_or(SwipePhase::Idle, SwipeGesture::phase)
    }

    /// Whether a touch-down on `key` would be rejected as busy.
    #[must_use]
    pub fn is_busy(&self, key: &K) -> bool {
        self.gestures.contains_key(key) || self.pending_removals.contains(key)
    }

    #[must_use]
    pub fn is_awaiting_removal(&self, key: &K) -> bool {
        self.pending_removals.contains(key)
    }

    /// Number of items currently being dragged.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.gestures.len()
    }

    /// Last visual slide amount reported for `key`.
    #[must_use]
    pub fn slide_amount(&self, key: &K) -> Option<f32> {
        self.gestures.get(key).map(|g| g.tracker().amount())
    }

    /// Pointer went down on an item.
    ///
    /// Starts a drag if the item is idle, resolves to a position and the
    /// adapter allows at least one direction from `touch`.
    pub fn touch_down<S, A>(
        &mut self,
        adapter: &mut A,
        data: &S,
        key: K,
        touch: TouchPoint,
        extent: ItemExtent,
        now: Instant,
    ) -> SwipeTransition<K>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "touch_down").entered();

        if self.gestures.contains_key(&key) {
            tracing::trace!("touch-down on busy item ignored");
            return self.noop(key, SwipePhase::Dragging, SwipeNoopReason::Busy);
        }
        if self.pending_removals.contains(&key) {
            tracing::trace!("touch-down on item awaiting removal ignored");
            return self.noop(key, SwipePhase::Idle, SwipeNoopReason::AwaitingRemoval);
        }
        if !extent.is_valid() || !touch.is_finite() || !extent.contains(touch) {
            return self.noop(key, SwipePhase::Idle, SwipeNoopReason::TouchOutsideItem);
        }
        let Some(position) = data.valid_position(&key) else {
            tracing::debug!("touch-down on item without a valid position");
            return self.noop(key, SwipePhase::Idle, SwipeNoopReason::InvalidPosition);
        };

        let mask = match adapter.swipe_reaction(data, &key, position, touch) {
            Ok(mask) => mask,
            Err(error) => {
                tracing::warn!(%error, position, "swipe reaction query failed; blocking all directions");
                ReactionMask::BLOCKED
            }
        };
        if mask.is_fully_blocked() {
            return self.noop(key, SwipePhase::Idle, SwipeNoopReason::AllDirectionsBlocked);
        }

        adapter.set_swipe_background(data, &key, position, SwipeBackground::Neutral);

        let tracker = SlideTracker::new(touch, extent, mask, &self.tuning);
        self.gestures
            .insert(key.clone(), SwipeGesture::new(tracker, position, now));
        tracing::debug!(position, ?mask, "swipe drag started");

        self.transition(
            key,
            SwipePhase::Idle,
            SwipePhase::Dragging,
            SwipeEffect::Started { mask, position },
        )
    }

    /// Pointer moved while down.
    ///
    /// Takes `&mut S` because a move can end the gesture (axis locked onto a
    /// blocked axis, failing slide report), which commits it.
    pub fn touch_move<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        point: TouchPoint,
        now: Instant,
    ) -> Vec<SwipeTransition<K>>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "touch_move").entered();

        if !self.gestures.contains_key(key) {
            return vec![self.noop(key.clone(), SwipePhase::Idle, SwipeNoopReason::NoActiveGesture)];
        }
        let mut out = Vec::new();
        match self.drag_to(adapter, data, key, point, now, &mut out) {
            DragStep::Noop(reason) => out.push(self.noop(key.clone(), SwipePhase::Dragging, reason)),
            DragStep::Moved(transition) => out.push(transition),
            DragStep::Ended => {}
        }
        out
    }

    /// Pointer released at `point`.
    ///
    /// The release position is tracked like a final move, then the gesture
    /// is resolved and committed.
    pub fn release<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        point: TouchPoint,
        now: Instant,
    ) -> Vec<SwipeTransition<K>>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "release").entered();

        if !self.gestures.contains_key(key) {
            return vec![self.noop(key.clone(), SwipePhase::Idle, SwipeNoopReason::NoActiveGesture)];
        }
        let mut out = Vec::new();
        match self.drag_to(adapter, data, key, point, now, &mut out) {
            DragStep::Ended => return out,
            DragStep::Moved(transition) => out.push(transition),
            DragStep::Noop(_) => {}
        }
        if let Some(gesture) = self.gestures.remove(key) {
            self.finish(adapter, data, key, gesture, None, &mut out);
        }
        out
    }

    /// Force-cancel the drag on `key`.
    ///
    /// The gesture resolves as canceled and still runs both commit phases.
    pub fn cancel<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        reason: CancelReason,
    ) -> Vec<SwipeTransition<K>>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "cancel").entered();

        let Some(gesture) = self.gestures.remove(key) else {
            return vec![self.noop(key.clone(), SwipePhase::Idle, SwipeNoopReason::NoActiveGesture)];
        };
        let mut out = Vec::new();
        self.finish(adapter, data, key, gesture, Some(reason), &mut out);
        out
    }

    /// Force-cancel every drag in flight, oldest first.
    pub fn cancel_all<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        reason: CancelReason,
    ) -> Vec<SwipeTransition<K>>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let mut active: Vec<(K, SwipeGesture)> = self.gestures.drain().collect();
        active.sort_by(|(_, a), (_, b)| {
            a.started_at()
                .cmp(&b.started_at())
                .then(a.start_position().cmp(&b.start_position()))
        });

        let mut out = Vec::new();
        for (key, gesture) in active {
            let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "cancel_all").entered();
            self.finish(adapter, data, &key, gesture, Some(reason), &mut out);
        }
        out
    }

    /// The host confirmed that `key` left the data set.
    ///
    /// Finalizes a pending removal. A drag still in flight on the item is
    /// dropped without adapter calls since it no longer has a position.
    pub fn notify_item_removed(&mut self, key: &K) -> Vec<SwipeTransition<K>> {
        let _span = tracing::debug_span!("swipe.gesture", key = ?key, step = "item_removed").entered();

        let mut out = Vec::new();
        if self.gestures.remove(key).is_some() {
            tracing::debug!("dragged item removed by host; gesture aborted");
            out.push(self.transition(
                key.clone(),
                SwipePhase::Dragging,
                SwipePhase::Idle,
                SwipeEffect::Aborted {
                    reason: CancelReason::ItemRemoved,
                },
            ));
        }
        if self.pending_removals.finalize(key) {
            tracing::debug!("removal finalized");
            out.push(self.transition(
                key.clone(),
                SwipePhase::Idle,
                SwipePhase::Idle,
                SwipeEffect::RemovalFinalized,
            ));
        }
        if out.is_empty() {
            out.push(self.noop(key.clone(), SwipePhase::Idle, SwipeNoopReason::NoActiveGesture));
        }
        out
    }

    /// The host replaced or reshuffled the data set.
    ///
    /// Every drag is force-canceled, and every pending removal whose key no
    /// longer resolves is finalized.
    pub fn notify_data_set_changed<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
    ) -> Vec<SwipeTransition<K>>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let mut out = self.cancel_all(adapter, data, CancelReason::DataSetChanged);
        for key in self.pending_removals.sweep(&*data) {
            tracing::debug!(key = ?key, "removal finalized by data set change");
            let transition =
                self.transition(key, SwipePhase::Idle, SwipePhase::Idle, SwipeEffect::RemovalFinalized);
            out.push(transition);
        }
        out
    }

    /// Feed one pointer position to the dragging gesture on `key`.
    fn drag_to<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        point: TouchPoint,
        now: Instant,
        out: &mut Vec<SwipeTransition<K>>,
    ) -> DragStep<K>
    where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let Some(position) = data.valid_position(key) else {
            if self.gestures.remove(key).is_some() {
                out.push(self.abort(key));
            }
            return DragStep::Ended;
        };
        let Some(gesture) = self.gestures.get_mut(key) else {
            return DragStep::Noop(SwipeNoopReason::NoActiveGesture);
        };

        let (amount, background) = match gesture.tracker_mut().update(point, now, &self.tuning) {
            TrackStep::BelowSlop => return DragStep::Noop(SwipeNoopReason::BelowTouchSlop),
            TrackStep::Unchanged => return DragStep::Noop(SwipeNoopReason::SlideUnchanged),
            TrackStep::AxisBlocked { axis } => {
                tracing::debug!(?axis, "gesture locked onto a blocked axis; handing back");
                self.end_drag(adapter, data, key, CancelReason::AxisBlocked, out);
                return DragStep::Ended;
            }
            TrackStep::Moved {
                amount, background, ..
            } => (amount, background),
        };

        if let Some(background) = background {
            adapter.set_swipe_background(&*data, key, position, background);
        }
        if let Err(error) = adapter.swipe_slide_amount_updated(&*data, key, position, amount, true) {
            tracing::warn!(%error, position, amount, "slide report failed; canceling gesture");
            self.end_drag(adapter, data, key, CancelReason::SlideCallbackFailed, out);
            return DragStep::Ended;
        }

        DragStep::Moved(self.transition(
            key.clone(),
            SwipePhase::Dragging,
            SwipePhase::Dragging,
            SwipeEffect::Slid { amount, background },
        ))
    }

    fn end_drag<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        reason: CancelReason,
        out: &mut Vec<SwipeTransition<K>>,
    ) where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        if let Some(gesture) = self.gestures.remove(key) {
            self.finish(adapter, data, key, gesture, Some(reason), out);
        }
    }

    /// Resolve `gesture` (or cancel it for `cancel`) and run both commit
    /// phases.
    fn finish<S, A>(
        &mut self,
        adapter: &mut A,
        data: &mut S,
        key: &K,
        mut gesture: SwipeGesture,
        cancel: Option<CancelReason>,
        out: &mut Vec<SwipeTransition<K>>,
    ) where
        S: ItemSequence<Key = K> + ?Sized,
        A: SwipeableItemAdapter<S> + ?Sized,
    {
        let Some(position) = data.valid_position(key) else {
            out.push(self.abort(key));
            return;
        };

        let from = gesture.phase();
        let resolved = match cancel {
            Some(_) => gesture.force_cancel(),
            None => gesture.resolve(&self.tuning),
        };
        let Some(result) = resolved else {
            tracing::warn!(phase = from.name(), "gesture not in a resolvable phase");
            return;
        };
        let effect = match cancel {
            Some(reason) => SwipeEffect::Canceled { reason },
            None => SwipeEffect::Resolved { result },
        };
        tracing::debug!(?result, ?cancel, position, "swipe resolved");
        out.push(self.transition(key.clone(), from, gesture.phase(), effect));

        let decision = committer::decide(adapter, &*data, key, position, result);
        let reaction = committer::settle_visuals(
            adapter,
            &*data,
            key,
            position,
            result,
            decision.reaction,
            gesture.tracker(),
        );
        let from = gesture.phase();
        gesture.advance(SwipePhase::Committing { result, reaction });
        out.push(self.transition(
            key.clone(),
            from,
            gesture.phase(),
            SwipeEffect::Decided {
                requested: decision.requested,
                reaction,
            },
        ));

        let settle = committer::apply(adapter, data, key, position, result, reaction);
        let from = gesture.phase();
        gesture.advance(SwipePhase::Idle);
        if settle == Settle::AwaitingRemoval {
            self.pending_removals.insert(key.clone());
        }
        tracing::debug!(?result, ?reaction, ?settle, position, "swipe committed");
        out.push(self.transition(
            key.clone(),
            from,
            SwipePhase::Idle,
            SwipeEffect::Applied {
                result,
                reaction,
                settle,
            },
        ));
    }

    fn abort(&mut self, key: &K) -> SwipeTransition<K> {
        tracing::debug!("item position lost; gesture aborted");
        self.transition(
            key.clone(),
            SwipePhase::Dragging,
            SwipePhase::Idle,
            SwipeEffect::Aborted {
                reason: CancelReason::PositionLost,
            },
        )
    }

    fn noop(&mut self, key: K, phase: SwipePhase, reason: SwipeNoopReason) -> SwipeTransition<K> {
        self.transition(key, phase, phase, SwipeEffect::Noop { reason })
    }

    fn transition(
        &mut self,
        key: K,
        from: SwipePhase,
        to: SwipePhase,
        effect: SwipeEffect,
    ) -> SwipeTransition<K> {
        self.transition_counter = self.transition_counter.saturating_add(1);
        SwipeTransition {
            transition_id: self.transition_counter,
            key,
            from,
            to,
            effect,
        }
    }
}
