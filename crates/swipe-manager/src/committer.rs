#![forbid(unsafe_code)]

//! Two-phase outcome commit.
//!
//! After resolution the manager runs three steps against the adapter, in
//! this order and each exactly once:
//!
//! 1. [`decide`]: `swipe_item` with a read-only data set. A failure or an
//!    answer that does not fit the result becomes
//!    [`AfterSwipeReaction::Default`].
//! 2. [`settle_visuals`]: the final slide report (`is_swiping = false`) at
//!    the resting amount, plus a neutral background when snapping back.
//! 3. [`apply`]: `perform_after_swipe_reaction` with the mutable data set.
//!
//! [`Settle`] is the terminal visual state. A removal is not final until the
//! host reports the structural change; [`PendingRemovals`] holds those items
//! and keeps new gestures off them meanwhile.

use std::hash::Hash;

use ahash::AHashSet;
use swipe_core::{AfterSwipeReaction, SwipeBackground, SwipeDirection, SwipeResult};

use crate::adapter::{ItemSequence, SwipeableItemAdapter};
use crate::tracker::SlideTracker;

/// Terminal visual state of an item after a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settle {
    /// Back at the neutral position.
    Neutral,
    /// Held at the swiped-through offset.
    SwipedThrough { direction: SwipeDirection },
    /// Removed by the adapter; waiting for the host's structural-change
    /// notification before tearing the visual down.
    AwaitingRemoval,
}

/// Outcome of the decide phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// What the adapter answered, `None` if it failed.
    pub requested: Option<AfterSwipeReaction>,
    /// What will be applied.
    pub reaction: AfterSwipeReaction,
}

/// Phase one: ask the adapter what to do with `result`.
pub fn decide<S, A>(
    adapter: &mut A,
    data: &S,
    key: &S::Key,
    position: usize,
    result: SwipeResult,
) -> Decision
where
    S: ItemSequence + ?Sized,
    A: SwipeableItemAdapter<S> + ?Sized,
{
    match adapter.swipe_item(data, key, position, result) {
        Ok(requested) => {
            let reaction = requested.sanitize(result);
            if reaction != requested {
                tracing::debug!(
                    ?result,
                    ?requested,
                    position,
                    "swipe reaction does not fit result; snapping back"
                );
            }
            Decision {
                requested: Some(requested),
                reaction,
            }
        }
        Err(error) => {
            tracing::warn!(%error, ?result, position, "swipe decision failed; snapping back");
            Decision {
                requested: None,
                reaction: AfterSwipeReaction::Default,
            }
        }
    }
}

/// Slide amount an item rests at once the gesture is over.
///
/// Zero when snapping back, otherwise the full axis length toward the swiped
/// direction.
#[must_use]
pub fn resting_amount(result: SwipeResult, reaction: AfterSwipeReaction, axis_length: f32) -> f32 {
    match (reaction, result.direction()) {
        (AfterSwipeReaction::Default, _) | (_, None) => 0.0,
        (_, Some(direction)) => direction.sign() * axis_length,
    }
}

/// Final visual reports before the apply phase.
///
/// Returns the reaction to apply, which falls back to
/// [`AfterSwipeReaction::Default`] if the final slide report fails.
pub fn settle_visuals<S, A>(
    adapter: &mut A,
    data: &S,
    key: &S::Key,
    position: usize,
    result: SwipeResult,
    reaction: AfterSwipeReaction,
    tracker: &SlideTracker,
) -> AfterSwipeReaction
where
    S: ItemSequence + ?Sized,
    A: SwipeableItemAdapter<S> + ?Sized,
{
    let resting = resting_amount(result, reaction, tracker.axis_length());
    if reaction == AfterSwipeReaction::Default && tracker.background() != SwipeBackground::Neutral {
        adapter.set_swipe_background(data, key, position, SwipeBackground::Neutral);
    }
    match adapter.swipe_slide_amount_updated(data, key, position, resting, false) {
        Ok(()) => reaction,
        Err(error) => {
            tracing::warn!(%error, position, resting, "final slide report failed; snapping back");
            AfterSwipeReaction::Default
        }
    }
}

/// Phase two: let the adapter apply the reaction, then pick the settle.
pub fn apply<S, A>(
    adapter: &mut A,
    data: &mut S,
    key: &S::Key,
    position: usize,
    result: SwipeResult,
    reaction: AfterSwipeReaction,
) -> Settle
where
    S: ItemSequence + ?Sized,
    A: SwipeableItemAdapter<S> + ?Sized,
{
    let applied = adapter.perform_after_swipe_reaction(data, key, position, result, reaction);
    if let Err(error) = &applied {
        tracing::warn!(%error, ?result, ?reaction, position, "after-swipe reaction failed");
    }

    match (reaction, result.direction()) {
        (AfterSwipeReaction::Default, _) | (_, None) => Settle::Neutral,
        (AfterSwipeReaction::MoveToSwipedDirection, Some(direction)) => {
            Settle::SwipedThrough { direction }
        }
        (AfterSwipeReaction::RemoveItem, Some(_)) => {
            if applied.is_err() && data.position_of(key).is_some() {
                Settle::Neutral
            } else {
                Settle::AwaitingRemoval
            }
        }
    }
}

/// Items whose removal has been applied but not yet confirmed by the host.
#[derive(Debug, Clone)]
pub struct PendingRemovals<K> {
    keys: AHashSet<K>,
}

impl<K> Default for PendingRemovals<K> {
    fn default() -> Self {
        Self {
            keys: AHashSet::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> PendingRemovals<K> {
    pub fn insert(&mut self, key: K) {
        self.keys.insert(key);
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Confirm the removal of `key`. Returns false if it was not pending.
    pub fn finalize(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    /// Confirm every pending removal whose key no longer resolves in `data`.
    pub fn sweep<S>(&mut self, data: &S) -> Vec<K>
    where
        S: ItemSequence<Key = K> + ?Sized,
    {
        let gone: Vec<K> = self
            .keys
            .iter()
            .filter(|key| data.valid_position(key).is_none())
            .cloned()
            .collect();
        for key in &gone {
            self.keys.remove(key);
        }
        gone
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterError, AdapterResult};
    use swipe_core::{ItemExtent, ReactionMask, SwipeAxis, SwipeTuning, TouchPoint};
    use web_time::Instant;

    #[derive(Debug, Default)]
    struct Ids(Vec<u32>);

    impl ItemSequence for Ids {
        type Key = u32;

        fn len(&self) -> usize {
            self.0.len()
        }

        fn position_of(&self, key: &u32) -> Option<usize> {
            self.0.iter().position(|id| id == key)
        }
    }

    #[derive(Debug, Default)]
    struct Scripted {
        answer: Option<AfterSwipeReaction>,
        fail_slide: bool,
        fail_apply: bool,
        backgrounds: Vec<SwipeBackground>,
        slides: Vec<(f32, bool)>,
        applied: Vec<(SwipeResult, AfterSwipeReaction)>,
    }

    impl SwipeableItemAdapter<Ids> for Scripted {
        fn swipe_reaction(
            &self,
            _data: &Ids,
            _key: &u32,
            _position: usize,
            _touch: TouchPoint,
        ) -> AdapterResult<ReactionMask> {
            Ok(ReactionMask::allow_axis(SwipeAxis::Horizontal))
        }

        fn set_swipe_background(
            &mut self,
            _data: &Ids,
            _key: &u32,
            _position: usize,
            background: SwipeBackground,
        ) {
            self.backgrounds.push(background);
        }

        fn swipe_slide_amount_updated(
            &mut self,
            _data: &Ids,
            _key: &u32,
            _position: usize,
            amount: f32,
            is_swiping: bool,
        ) -> AdapterResult<()> {
            self.slides.push((amount, is_swiping));
            if self.fail_slide {
                return Err(AdapterError::new("slide"));
            }
            Ok(())
        }

        fn swipe_item(
            &mut self,
            _data: &Ids,
            _key: &u32,
            _position: usize,
            _result: SwipeResult,
        ) -> AdapterResult<AfterSwipeReaction> {
            self.answer.ok_or_else(|| AdapterError::new("no answer"))
        }

        fn perform_after_swipe_reaction(
            &mut self,
            data: &mut Ids,
            key: &u32,
            _position: usize,
            result: SwipeResult,
            reaction: AfterSwipeReaction,
        ) -> AdapterResult<()> {
            self.applied.push((result, reaction));
            if self.fail_apply {
                return Err(AdapterError::new("apply"));
            }
            if reaction == AfterSwipeReaction::RemoveItem {
                data.0.retain(|id| id != key);
            }
            Ok(())
        }
    }

    fn swiped_tracker() -> SlideTracker {
        let tuning = SwipeTuning::default();
        let mut tracker = SlideTracker::new(
            TouchPoint::new(150.0, 10.0),
            ItemExtent::new(200.0, 40.0),
            ReactionMask::allow_axis(SwipeAxis::Horizontal),
            &tuning,
        );
        tracker.update(TouchPoint::new(10.0, 10.0), Instant::now(), &tuning);
        tracker
    }

    #[test]
    fn failed_decision_becomes_default() {
        let mut adapter = Scripted::default();
        let data = Ids(vec![1]);
        let decision = decide(&mut adapter, &data, &1, 0, SwipeResult::SwipedLeft);
        assert_eq!(
            decision,
            Decision {
                requested: None,
                reaction: AfterSwipeReaction::Default,
            }
        );
    }

    #[test]
    fn inconsistent_decision_is_sanitized() {
        let mut adapter = Scripted {
            answer: Some(AfterSwipeReaction::RemoveItem),
            ..Scripted::default()
        };
        let data = Ids(vec![1]);
        let decision = decide(&mut adapter, &data, &1, 0, SwipeResult::Canceled);
        assert_eq!(decision.requested, Some(AfterSwipeReaction::RemoveItem));
        assert_eq!(decision.reaction, AfterSwipeReaction::Default);
    }

    #[test]
    fn resting_amounts() {
        assert_eq!(
            resting_amount(SwipeResult::SwipedLeft, AfterSwipeReaction::RemoveItem, 200.0),
            -200.0
        );
        assert_eq!(
            resting_amount(
                SwipeResult::SwipedDown,
                AfterSwipeReaction::MoveToSwipedDirection,
                40.0
            ),
            40.0
        );
        assert_eq!(
            resting_amount(SwipeResult::SwipedRight, AfterSwipeReaction::Default, 200.0),
            0.0
        );
        assert_eq!(
            resting_amount(SwipeResult::Canceled, AfterSwipeReaction::RemoveItem, 200.0),
            0.0
        );
    }

    #[test]
    fn snap_back_resets_background_and_reports_zero() {
        let mut adapter = Scripted::default();
        let data = Ids(vec![1]);
        let tracker = swiped_tracker();
        let reaction = settle_visuals(
            &mut adapter,
            &data,
            &1,
            0,
            SwipeResult::SwipedLeft,
            AfterSwipeReaction::Default,
            &tracker,
        );
        assert_eq!(reaction, AfterSwipeReaction::Default);
        assert_eq!(adapter.backgrounds, vec![SwipeBackground::Neutral]);
        assert_eq!(adapter.slides, vec![(0.0, false)]);
    }

    #[test]
    fn swipe_through_reports_full_extent() {
        let mut adapter = Scripted::default();
        let data = Ids(vec![1]);
        let tracker = swiped_tracker();
        let reaction = settle_visuals(
            &mut adapter,
            &data,
            &1,
            0,
            SwipeResult::SwipedLeft,
            AfterSwipeReaction::RemoveItem,
            &tracker,
        );
        assert_eq!(reaction, AfterSwipeReaction::RemoveItem);
        assert!(adapter.backgrounds.is_empty());
        assert_eq!(adapter.slides, vec![(-200.0, false)]);
    }

    #[test]
    fn failed_final_slide_falls_back_to_default() {
        let mut adapter = Scripted {
            fail_slide: true,
            ..Scripted::default()
        };
        let data = Ids(vec![1]);
        let tracker = swiped_tracker();
        let reaction = settle_visuals(
            &mut adapter,
            &data,
            &1,
            0,
            SwipeResult::SwipedLeft,
            AfterSwipeReaction::MoveToSwipedDirection,
            &tracker,
        );
        assert_eq!(reaction, AfterSwipeReaction::Default);
    }

    #[test]
    fn apply_settles_by_reaction() {
        let mut adapter = Scripted::default();
        let mut data = Ids(vec![1, 2]);

        let settle = apply(
            &mut adapter,
            &mut data,
            &1,
            0,
            SwipeResult::SwipedUp,
            AfterSwipeReaction::MoveToSwipedDirection,
        );
        assert_eq!(
            settle,
            Settle::SwipedThrough {
                direction: SwipeDirection::Up
            }
        );

        let settle = apply(
            &mut adapter,
            &mut data,
            &2,
            1,
            SwipeResult::SwipedLeft,
            AfterSwipeReaction::RemoveItem,
        );
        assert_eq!(settle, Settle::AwaitingRemoval);
        assert_eq!(data.0, vec![1]);

        let settle = apply(
            &mut adapter,
            &mut data,
            &1,
            0,
            SwipeResult::Canceled,
            AfterSwipeReaction::Default,
        );
        assert_eq!(settle, Settle::Neutral);
        assert_eq!(adapter.applied.len(), 3);
    }

    #[test]
    fn failed_removal_that_left_item_in_place_settles_neutral() {
        let mut adapter = Scripted {
            fail_apply: true,
            ..Scripted::default()
        };
        let mut data = Ids(vec![1]);
        let settle = apply(
            &mut adapter,
            &mut data,
            &1,
            0,
            SwipeResult::SwipedLeft,
            AfterSwipeReaction::RemoveItem,
        );
        assert_eq!(settle, Settle::Neutral);
        assert_eq!(data.0, vec![1]);
    }

    #[test]
    fn pending_removals_sweep_only_gone_keys() {
        let mut pending = PendingRemovals::default();
        pending.insert(1u32);
        pending.insert(2u32);
        assert!(pending.contains(&1));

        let data = Ids(vec![2, 3]);
        assert_eq!(pending.sweep(&data), vec![1]);
        assert!(!pending.contains(&1));
        assert!(pending.contains(&2));

        assert!(pending.finalize(&2));
        assert!(!pending.finalize(&2));
        assert!(pending.is_empty());
    }
}
