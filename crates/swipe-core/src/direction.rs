#![forbid(unsafe_code)]

//! Cardinal swipe directions and the axis they belong to.

use serde::{Deserialize, Serialize};

/// Cardinal direction an item can be swiped toward.
///
/// Declaration order matches the legacy flag layout (left, up, right, down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Up,
    Right,
    Down,
}

impl SwipeDirection {
    /// All four directions in legacy flag order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> SwipeAxis {
        match self {
            Self::Left | Self::Right => SwipeAxis::Horizontal,
            Self::Up | Self::Down => SwipeAxis::Vertical,
        }
    }

    /// Direction a signed slide amount points to on `axis`.
    ///
    /// Negative amounts map to left/up, positive to right/down. Zero and
    /// non-finite amounts have no direction.
    #[must_use]
    pub fn from_slide(axis: SwipeAxis, amount: f32) -> Option<Self> {
        if !amount.is_finite() || amount == 0.0 {
            return None;
        }
        let negative = amount < 0.0;
        Some(match (axis, negative) {
            (SwipeAxis::Horizontal, true) => Self::Left,
            (SwipeAxis::Horizontal, false) => Self::Right,
            (SwipeAxis::Vertical, true) => Self::Up,
            (SwipeAxis::Vertical, false) => Self::Down,
        })
    }

    /// Sign applied to a magnitude travelling in this direction.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left | Self::Up => -1.0,
            Self::Right | Self::Down => 1.0,
        }
    }
}

/// Axis a gesture is locked to once it leaves the touch slop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

impl SwipeAxis {
    /// The (negative, positive) directions on this axis.
    #[must_use]
    pub const fn directions(self) -> (SwipeDirection, SwipeDirection) {
        match self {
            Self::Horizontal => (SwipeDirection::Left, SwipeDirection::Right),
            Self::Vertical => (SwipeDirection::Up, SwipeDirection::Down),
        }
    }

    /// Component of `(dx, dy)` that lies along this axis.
    #[must_use]
    pub const fn component(self, dx: f32, dy: f32) -> f32 {
        match self {
            Self::Horizontal => dx,
            Self::Vertical => dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_directions_belong_to_axis() {
        for axis in [SwipeAxis::Horizontal, SwipeAxis::Vertical] {
            let (negative, positive) = axis.directions();
            assert_eq!(negative.axis(), axis);
            assert_eq!(positive.axis(), axis);
            assert_eq!(SwipeDirection::from_slide(axis, -1.0), Some(negative));
            assert_eq!(SwipeDirection::from_slide(axis, 1.0), Some(positive));
        }
    }

    #[test]
    fn from_slide_uses_sign() {
        assert_eq!(
            SwipeDirection::from_slide(SwipeAxis::Horizontal, -3.0),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            SwipeDirection::from_slide(SwipeAxis::Horizontal, 0.5),
            Some(SwipeDirection::Right)
        );
        assert_eq!(
            SwipeDirection::from_slide(SwipeAxis::Vertical, -0.1),
            Some(SwipeDirection::Up)
        );
        assert_eq!(
            SwipeDirection::from_slide(SwipeAxis::Vertical, 9.0),
            Some(SwipeDirection::Down)
        );
    }

    #[test]
    fn from_slide_zero_and_nan_have_no_direction() {
        assert_eq!(SwipeDirection::from_slide(SwipeAxis::Horizontal, 0.0), None);
        assert_eq!(SwipeDirection::from_slide(SwipeAxis::Vertical, -0.0), None);
        assert_eq!(
            SwipeDirection::from_slide(SwipeAxis::Vertical, f32::NAN),
            None
        );
    }

    #[test]
    fn sign_round_trips_through_from_slide() {
        for dir in SwipeDirection::ALL {
            assert_eq!(SwipeDirection::from_slide(dir.axis(), dir.sign()), Some(dir));
        }
    }

    #[test]
    fn axis_component_picks_coordinate() {
        assert_eq!(SwipeAxis::Horizontal.component(3.0, 7.0), 3.0);
        assert_eq!(SwipeAxis::Vertical.component(3.0, 7.0), 7.0);
    }
}
