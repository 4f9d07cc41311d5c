#![forbid(unsafe_code)]

//! The adapter seam.
//!
//! A host plugs its data set and its adapter into the manager through two
//! traits:
//!
//! - [`ItemSequence`] is the ordered data set. It resolves a stable item key
//!   to its current index so the manager never caches positions across
//!   calls.
//! - [`SwipeableItemAdapter`] receives the five swipe callbacks.
//!
//! Mutation rules are carried by the signatures. Every callback receives the
//! data set as `&S`, except [`SwipeableItemAdapter::perform_after_swipe_reaction`],
//! which is the only place the adapter is handed `&mut S` and may change the
//! data set's structure. The adapter itself is `&mut` in visual callbacks so
//! it can keep per-item presentation state.

use swipe_core::{AfterSwipeReaction, ReactionMask, SwipeBackground, SwipeResult, TouchPoint};

/// Failure reported by an adapter callback.
///
/// The manager never propagates it: it logs the failure and continues with
/// the safest value for the call (blocked mask, default reaction, neutral
/// position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("adapter callback failed: {message}")]
pub struct AdapterError {
    message: String,
}

impl AdapterError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;

/// Ordered data set backing a swipeable list.
pub trait ItemSequence {
    /// Stable identity of one item, independent of its index.
    type Key;

    /// Number of items currently in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current index of `key`, or `None` if the item is gone.
    fn position_of(&self, key: &Self::Key) -> Option<usize>;

    /// Current index of `key` if it is also within bounds.
    fn valid_position(&self, key: &Self::Key) -> Option<usize> {
        self.position_of(key).filter(|&pos| pos < self.len())
    }
}

/// An element that knows its own stable key.
pub trait Keyed {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
}

impl<T: Keyed> ItemSequence for Vec<T> {
    type Key = T::Key;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn position_of(&self, key: &Self::Key) -> Option<usize> {
        self.iter().position(|item| item.key() == key)
    }
}

/// Callbacks a data adapter implements to take part in swipe gestures.
///
/// `position` is only valid for the duration of the call it is passed to.
pub trait SwipeableItemAdapter<S: ItemSequence + ?Sized> {
    /// Which directions the item at `position` may be swiped, given where the
    /// pointer went down. Must be free of side effects.
    fn swipe_reaction(
        &self,
        data: &S,
        key: &S::Key,
        position: usize,
        touch: TouchPoint,
    ) -> AdapterResult<ReactionMask>;

    /// Show `background` behind the swiping item.
    fn set_swipe_background(
        &mut self,
        _data: &S,
        _key: &S::Key,
        _position: usize,
        _background: SwipeBackground,
    ) {
    }

    /// The item's visual slide offset changed. `is_swiping` is false for the
    /// final report of a gesture, carrying the resting amount.
    fn swipe_slide_amount_updated(
        &mut self,
        _data: &S,
        _key: &S::Key,
        _position: usize,
        _amount: f32,
        _is_swiping: bool,
    ) -> AdapterResult<()> {
        Ok(())
    }

    /// Decide what happens after `result`. The data set is read-only here.
    fn swipe_item(
        &mut self,
        data: &S,
        key: &S::Key,
        position: usize,
        result: SwipeResult,
    ) -> AdapterResult<AfterSwipeReaction>;

    /// Apply the decision. This is the only callback allowed to change the
    /// data set and notify observers of structural changes.
    fn perform_after_swipe_reaction(
        &mut self,
        data: &mut S,
        key: &S::Key,
        position: usize,
        result: SwipeResult,
        reaction: AfterSwipeReaction,
    ) -> AdapterResult<()>;
}
