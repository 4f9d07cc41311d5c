#![forbid(unsafe_code)]

//! Transition telemetry emitted by [`SwipeManager`](crate::SwipeManager).
//!
//! Every manager call reports what it did as one or more
//! [`SwipeTransition`] records numbered from a single monotonically
//! increasing counter, so a host can replay or assert a gesture's lifecycle
//! without hooking the adapter.

use swipe_core::{AfterSwipeReaction, ReactionMask, SwipeBackground, SwipeResult};

use crate::committer::Settle;
use crate::resolver::SwipePhase;

/// Why an in-flight drag was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The list took over the pointer to scroll.
    Scroll,
    /// The host removed the item while it was being dragged.
    ItemRemoved,
    /// Orientation, size or other configuration change.
    ConfigurationChanged,
    /// The whole data set changed underneath the gesture.
    DataSetChanged,
    /// The gesture locked onto an axis with no interactive direction.
    AxisBlocked,
    /// The adapter failed to take a slide report.
    SlideCallbackFailed,
    /// The item's key stopped resolving to a position.
    PositionLost,
    Programmatic,
}

/// Why a manager call changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeNoopReason {
    /// A gesture is already in flight for the item.
    Busy,
    /// The item was removed and the host has not confirmed it yet.
    AwaitingRemoval,
    /// The key does not resolve to a position in the data set.
    InvalidPosition,
    /// The reaction query blocked every direction, or failed.
    AllDirectionsBlocked,
    /// The touch point lies outside the item bounds.
    TouchOutsideItem,
    /// No gesture is in flight for the item.
    NoActiveGesture,
    /// The pointer has not left the touch slop yet.
    BelowTouchSlop,
    /// The visual slide amount did not change.
    SlideUnchanged,
}

/// Observable effect of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEffect {
    Started {
        mask: ReactionMask,
        position: usize,
    },
    Slid {
        amount: f32,
        background: Option<SwipeBackground>,
    },
    Resolved {
        result: SwipeResult,
    },
    Canceled {
        reason: CancelReason,
    },
    Decided {
        /// The adapter's answer, `None` if the decision failed.
        requested: Option<AfterSwipeReaction>,
        reaction: AfterSwipeReaction,
    },
    Applied {
        result: SwipeResult,
        reaction: AfterSwipeReaction,
        settle: Settle,
    },
    /// Gesture dropped without adapter calls.
    Aborted {
        reason: CancelReason,
    },
    RemovalFinalized,
    Noop {
        reason: SwipeNoopReason,
    },
}

/// One state-machine transition with deterministic telemetry fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTransition<K> {
    pub transition_id: u64,
    pub key: K,
    pub from: SwipePhase,
    pub to: SwipePhase,
    pub effect: SwipeEffect,
}

impl<K> SwipeTransition<K> {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, SwipeEffect::Noop { .. })
    }

    #[must_use]
    pub const fn noop_reason(&self) -> Option<SwipeNoopReason> {
        match self.effect {
            SwipeEffect::Noop { reason } => Some(reason),
            _ => None,
        }
    }
}
