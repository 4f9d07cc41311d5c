#![forbid(unsafe_code)]

//! Terminal results of a swipe gesture and the directive that follows them.

use serde::{Deserialize, Serialize};

use crate::direction::SwipeDirection;

/// Result of one completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeResult {
    Canceled,
    SwipedLeft,
    SwipedUp,
    SwipedRight,
    SwipedDown,
}

impl SwipeResult {
    /// Swiped result for `direction`.
    #[must_use]
    pub const fn swiped(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::SwipedLeft,
            SwipeDirection::Up => Self::SwipedUp,
            SwipeDirection::Right => Self::SwipedRight,
            SwipeDirection::Down => Self::SwipedDown,
        }
    }

    /// Direction the item was swiped toward, `None` when canceled.
    #[must_use]
    pub const fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Canceled => None,
            Self::SwipedLeft => Some(SwipeDirection::Left),
            Self::SwipedUp => Some(SwipeDirection::Up),
            Self::SwipedRight => Some(SwipeDirection::Right),
            Self::SwipedDown => Some(SwipeDirection::Down),
        }
    }

    #[must_use]
    pub const fn is_canceled(self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Legacy numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Canceled => 0,
            Self::SwipedLeft => 1,
            Self::SwipedUp => 2,
            Self::SwipedRight => 3,
            Self::SwipedDown => 4,
        }
    }

    /// Parse a legacy numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Canceled),
            1 => Some(Self::SwipedLeft),
            2 => Some(Self::SwipedUp),
            3 => Some(Self::SwipedRight),
            4 => Some(Self::SwipedDown),
            _ => None,
        }
    }
}

/// What happens to the item once the adapter has seen the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterSwipeReaction {
    /// Snap back to the neutral position.
    #[default]
    Default,
    /// Stay at the swiped-through offset.
    MoveToSwipedDirection,
    /// The adapter removes the item from its data set.
    RemoveItem,
}

impl AfterSwipeReaction {
    /// Legacy numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::MoveToSwipedDirection => 1,
            Self::RemoveItem => 2,
        }
    }

    /// Parse a legacy numeric code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Default),
            1 => Some(Self::MoveToSwipedDirection),
            2 => Some(Self::RemoveItem),
            _ => None,
        }
    }

    /// Whether this reaction may follow `result`.
    ///
    /// A canceled gesture only ever snaps back.
    #[must_use]
    pub const fn is_consistent_with(self, result: SwipeResult) -> bool {
        match self {
            Self::Default => true,
            Self::MoveToSwipedDirection | Self::RemoveItem => !result.is_canceled(),
        }
    }

    /// `self` if consistent with `result`, otherwise [`AfterSwipeReaction::Default`].
    #[must_use]
    pub const fn sanitize(self, result: SwipeResult) -> Self {
        if self.is_consistent_with(result) {
            self
        } else {
            Self::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swiped_and_direction_agree() {
        for dir in SwipeDirection::ALL {
            let result = SwipeResult::swiped(dir);
            assert_eq!(result.direction(), Some(dir));
            assert!(!result.is_canceled());
        }
        assert_eq!(SwipeResult::Canceled.direction(), None);
    }

    #[test]
    fn result_codes_parse_back() {
        for code in 0..=4 {
            let result = SwipeResult::from_code(code).unwrap();
            assert_eq!(result.code(), code);
        }
        assert_eq!(SwipeResult::from_code(5), None);
    }

    #[test]
    fn reaction_codes_parse_back() {
        for code in 0..=2 {
            let reaction = AfterSwipeReaction::from_code(code).unwrap();
            assert_eq!(reaction.code(), code);
        }
        assert_eq!(AfterSwipeReaction::from_code(3), None);
    }

    #[test]
    fn canceled_result_only_allows_default() {
        assert_eq!(
            AfterSwipeReaction::RemoveItem.sanitize(SwipeResult::Canceled),
            AfterSwipeReaction::Default
        );
        assert_eq!(
            AfterSwipeReaction::MoveToSwipedDirection.sanitize(SwipeResult::Canceled),
            AfterSwipeReaction::Default
        );
        assert_eq!(
            AfterSwipeReaction::RemoveItem.sanitize(SwipeResult::SwipedLeft),
            AfterSwipeReaction::RemoveItem
        );
    }
}
