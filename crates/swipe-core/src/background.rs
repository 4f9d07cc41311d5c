#![forbid(unsafe_code)]

//! Background selection for a swiping item.

use serde::{Deserialize, Serialize};

use crate::direction::{SwipeAxis, SwipeDirection};

/// Visual background shown behind a swiping item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeBackground {
    #[default]
    Neutral,
    Left,
    Up,
    Right,
    Down,
}

impl SwipeBackground {
    /// Background for a direction, or neutral when there is none.
    #[must_use]
    pub const fn select(direction: Option<SwipeDirection>) -> Self {
        match direction {
            None => Self::Neutral,
            Some(SwipeDirection::Left) => Self::Left,
            Some(SwipeDirection::Up) => Self::Up,
            Some(SwipeDirection::Right) => Self::Right,
            Some(SwipeDirection::Down) => Self::Down,
        }
    }

    /// Background matching a signed slide amount on `axis`.
    #[must_use]
    pub fn for_slide(axis: SwipeAxis, amount: f32) -> Self {
        Self::select(SwipeDirection::from_slide(axis, amount))
    }

    /// Direction this background stands for, if any.
    #[must_use]
    pub const fn direction(self) -> Option<SwipeDirection> {
        match self {
            Self::Neutral => None,
            Self::Left => Some(SwipeDirection::Left),
            Self::Up => Some(SwipeDirection::Up),
            Self::Right => Some(SwipeDirection::Right),
            Self::Down => Some(SwipeDirection::Down),
        }
    }

    /// Legacy numeric identifier.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Neutral => 0,
            Self::Left => 1,
            Self::Up => 2,
            Self::Right => 3,
            Self::Down => 4,
        }
    }

    /// Parse a legacy identifier; unknown codes fall back to neutral.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Left,
            2 => Self::Up,
            3 => Self::Right,
            4 => Self::Down,
            _ => Self::Neutral,
        }
    }
}
