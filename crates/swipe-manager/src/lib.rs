#![forbid(unsafe_code)]

//! Swipe gesture state machine for swipeable list items.
//!
//! # Role
//! `swipe-manager` sits between a host list widget and its data adapter. The
//! host forwards raw pointer events for an item; the manager tracks the
//! slide, resolves the release into a [`SwipeResult`](swipe_core::SwipeResult)
//! and runs the two-phase commit through the adapter's
//! [`SwipeableItemAdapter`] callbacks.
//!
//! # Key components
//! - [`adapter`]: the [`ItemSequence`] and [`SwipeableItemAdapter`] seam.
//! - [`tracker`]: axis lock, rubber band and velocity sampling.
//! - [`resolver`]: release resolution and the per-item lifecycle phases.
//! - [`committer`]: decide, final slide report, apply, removal tracking.
//! - [`manager`]: the [`SwipeManager`] that owns every in-flight gesture.
//! - [`transition`]: telemetry records returned by every manager call.
//!
//! # How it fits
//! Rendering, animation and view recycling stay with the host. The manager
//! only ever calls the adapter, and never holds a position across calls.

pub mod adapter;
pub mod committer;
pub mod manager;
pub mod resolver;
pub mod tracker;
pub mod transition;

pub use adapter::{AdapterError, AdapterResult, ItemSequence, Keyed, SwipeableItemAdapter};
pub use committer::{Decision, PendingRemovals, Settle};
pub use manager::SwipeManager;
pub use resolver::{ReleaseSnapshot, SwipeGesture, SwipePhase, resolve};
pub use tracker::{SlideTracker, TrackStep, visual_slide};
pub use transition::{CancelReason, SwipeEffect, SwipeNoopReason, SwipeTransition};

pub use swipe_core;
