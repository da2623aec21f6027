// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, easing, platform curves, and inset math.
//!
//! # Role in kbinset
//! `kbinset-core` is the computational kernel. It has no notion of windows
//! or frames; the runtime pushes metrics in and ticks animations.
//!
//! # Primary responsibilities
//! - **Platform curve table**: [`platform::select`] maps a [`platform::Platform`]
//!   to the native keyboard duration and easing.
//! - **KeyboardAnimationController**: forward/reverse/dispose over a single
//!   retargetable timeline, ticked through the [`animation::TickerProvider`] seam.
//! - **Inset geometry**: [`inset::compute`] turns keyboard height, screen height
//!   and widget bounds into [`inset::AnimationData`].
//!
//! # How it fits in the system
//! `kbinset-runtime` implements the ticker provider and the metrics hub;
//! `kbinset-widgets` renders the spacer from the values computed here.

pub mod animation;
pub mod color;
pub mod geometry;
pub mod inset;
pub mod platform;
