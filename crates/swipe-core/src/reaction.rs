#![forbid(unsafe_code)]

//! Per-direction swipe reactions.
//!
//! A [`ReactionMask`] records, for each of the four [`SwipeDirection`]s,
//! whether a swipe that way is blocked, blocked but allowed to stretch
//! elastically, or fully allowed. Each direction holds exactly one
//! [`DirectionReaction`], so the mask can never describe two states for one
//! direction at once.
//!
//! # Legacy encoding
//!
//! Hosts that still speak the packed integer format can convert through
//! [`ReactionBits`]: two bits per direction, left at bit 0, up at bit 8,
//! right at bit 16, down at bit 24, with `0` blocked, `1` blocked with
//! rubber band, `2` allowed. The value `3` is undefined; the lenient decoder
//! treats it as blocked, the strict decoder reports it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::direction::{SwipeAxis, SwipeDirection};

/// Reaction of a single direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionReaction {
    /// The item does not move at all in this direction.
    #[default]
    Blocked,
    /// The item follows the pointer with resistance and always springs back.
    BlockedElastic,
    /// The item follows the pointer and may complete a swipe.
    Allowed,
}

impl DirectionReaction {
    /// Whether the item moves at all (elastic or allowed).
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// Whether a release in this direction may produce a swiped result.
    #[must_use]
    pub const fn can_complete(self) -> bool {
        matches!(self, Self::Allowed)
    }

    const fn two_bit_code(self) -> u32 {
        match self {
            Self::Blocked => 0,
            Self::BlockedElastic => 1,
            Self::Allowed => 2,
        }
    }

    const fn from_two_bit_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Blocked),
            1 => Some(Self::BlockedElastic),
            2 => Some(Self::Allowed),
            _ => None,
        }
    }
}

bitflags! {
    /// Packed legacy reaction flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReactionBits: u32 {
        const CAN_NOT_SWIPE_LEFT_WITH_RUBBER_BAND_EFFECT  = 1 << 0;
        const CAN_SWIPE_LEFT                              = 2 << 0;
        const CAN_NOT_SWIPE_UP_WITH_RUBBER_BAND_EFFECT    = 1 << 8;
        const CAN_SWIPE_UP                                = 2 << 8;
        const CAN_NOT_SWIPE_RIGHT_WITH_RUBBER_BAND_EFFECT = 1 << 16;
        const CAN_SWIPE_RIGHT                             = 2 << 16;
        const CAN_NOT_SWIPE_DOWN_WITH_RUBBER_BAND_EFFECT  = 1 << 24;
        const CAN_SWIPE_DOWN                              = 2 << 24;

        const CAN_SWIPE_LEFT_RIGHT = Self::CAN_SWIPE_LEFT.bits() | Self::CAN_SWIPE_RIGHT.bits();
        const CAN_SWIPE_UP_DOWN = Self::CAN_SWIPE_UP.bits() | Self::CAN_SWIPE_DOWN.bits();
    }
}

impl Default for ReactionBits {
    fn default() -> Self {
        Self::empty()
    }
}

const fn bit_shift(direction: SwipeDirection) -> u32 {
    match direction {
        SwipeDirection::Left => 0,
        SwipeDirection::Up => 8,
        SwipeDirection::Right => 16,
        SwipeDirection::Down => 24,
    }
}

/// Errors from strict decoding of packed reaction flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactionDecodeError {
    /// Both state bits of one direction were set.
    #[error("conflicting reaction bits for {direction:?} in {raw:#010x}")]
    ConflictingStates { direction: SwipeDirection, raw: u32 },
    /// Bits outside the four direction fields were set.
    #[error("unknown reaction bits {unknown:#010x}")]
    UnknownBits { unknown: u32 },
}

/// Reaction of all four directions for one item at one touch point.
///
/// The [`Default`] mask blocks everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionMask {
    pub left: DirectionReaction,
    pub up: DirectionReaction,
    pub right: DirectionReaction,
    pub down: DirectionReaction,
}

impl ReactionMask {
    /// Mask blocking every direction without rubber band.
    pub const BLOCKED: Self = Self::uniform(DirectionReaction::Blocked);

    /// Mask with the same reaction in every direction.
    #[must_use]
    pub const fn uniform(reaction: DirectionReaction) -> Self {
        Self {
            left: reaction,
            up: reaction,
            right: reaction,
            down: reaction,
        }
    }

    /// Mask allowing both directions on `axis` and blocking the other axis.
    #[must_use]
    pub const fn allow_axis(axis: SwipeAxis) -> Self {
        let (neg, pos) = axis.directions();
        Self::BLOCKED
            .with(neg, DirectionReaction::Allowed)
            .with(pos, DirectionReaction::Allowed)
    }

    /// Returns a copy with `direction` set to `reaction`.
    #[must_use]
    pub const fn with(mut self, direction: SwipeDirection, reaction: DirectionReaction) -> Self {
        match direction {
            SwipeDirection::Left => self.left = reaction,
            SwipeDirection::Up => self.up = reaction,
            SwipeDirection::Right => self.right = reaction,
            SwipeDirection::Down => self.down = reaction,
        }
        self
    }

    /// Reaction for `direction`.
    #[must_use]
    pub const fn get(&self, direction: SwipeDirection) -> DirectionReaction {
        match direction {
            SwipeDirection::Left => self.left,
            SwipeDirection::Up => self.up,
            SwipeDirection::Right => self.right,
            SwipeDirection::Down => self.down,
        }
    }

    /// True when no direction allows any movement, elastic or not.
    ///
    /// A gesture over such an item is rejected at touch-down.
    #[must_use]
    pub fn is_fully_blocked(&self) -> bool {
        SwipeDirection::ALL
            .iter()
            .all(|&dir| !self.get(dir).is_interactive())
    }

    /// True when at least one direction on `axis` moves at all.
    #[must_use]
    pub fn is_axis_interactive(&self, axis: SwipeAxis) -> bool {
        let (neg, pos) = axis.directions();
        self.get(neg).is_interactive() || self.get(pos).is_interactive()
    }

    /// Decode packed legacy flags, treating undefined states and unknown
    /// bits as blocked.
    #[must_use]
    pub fn from_bits(bits: ReactionBits) -> Self {
        let raw = bits.bits();
        let mut mask = Self::BLOCKED;
        for dir in SwipeDirection::ALL {
            let code = (raw >> bit_shift(dir)) & 0b11;
            let reaction =
                DirectionReaction::from_two_bit_code(code).unwrap_or(DirectionReaction::Blocked);
            mask = mask.with(dir, reaction);
        }
        mask
    }

    /// Decode packed legacy flags, rejecting undefined states and bits
    /// outside the four direction fields.
    pub fn try_from_bits(raw: u32) -> Result<Self, ReactionDecodeError> {
        let unknown = raw & !ReactionBits::all().bits();
        if unknown != 0 {
            return Err(ReactionDecodeError::UnknownBits { unknown });
        }
        let mut mask = Self::BLOCKED;
        for dir in SwipeDirection::ALL {
            let code = (raw >> bit_shift(dir)) & 0b11;
            let reaction = DirectionReaction::from_two_bit_code(code)
                .ok_or(ReactionDecodeError::ConflictingStates {
                    direction: dir,
                    raw,
                })?;
            mask = mask.with(dir, reaction);
        }
        Ok(mask)
    }

    /// Encode as packed legacy flags.
    #[must_use]
    pub fn to_bits(&self) -> ReactionBits {
        let raw = SwipeDirection::ALL.iter().fold(0u32, |acc, &dir| {
            acc | (self.get(dir).two_bit_code() << bit_shift(dir))
        });
        ReactionBits::from_bits_retain(raw)
    }
}

impl From<ReactionBits> for ReactionMask {
    fn from(bits: ReactionBits) -> Self {
        Self::from_bits(bits)
    }
}

impl From<ReactionMask> for ReactionBits {
    fn from(mask: ReactionMask) -> Self {
        mask.to_bits()
    }
}
