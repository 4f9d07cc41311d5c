#![forbid(unsafe_code)]

//! Core vocabulary for swipeable list items.
//!
//! # Role
//! `swipe-core` holds the value types shared between a host list widget, its
//! data adapter, and the swipe state machine in `swipe-manager`: directions,
//! per-direction reactions, backgrounds, gesture results, post-swipe
//! directives, and the tuning that drives resolution.
//!
//! Everything here is plain data with no callbacks and no clock, so it can be
//! used from any UI toolkit.

pub mod background;
pub mod direction;
pub mod geometry;
pub mod outcome;
pub mod reaction;
pub mod tuning;

pub use background::SwipeBackground;
pub use direction::{SwipeAxis, SwipeDirection};
pub use geometry::{ItemExtent, TouchPoint};
pub use outcome::{AfterSwipeReaction, SwipeResult};
pub use reaction::{DirectionReaction, ReactionBits, ReactionDecodeError, ReactionMask};
pub use tuning::{MAX_VELOCITY_SAMPLES, SwipeTuning, SwipeTuningError};
