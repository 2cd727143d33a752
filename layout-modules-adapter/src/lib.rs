//! Adapter utilities for the `layout-modules` crate.
//!
//! The `layout-modules` crate is UI-agnostic and focuses on arrangement math and layout state.
//! This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A controller that owns the collection state, the viewport and the scroll offset
//! - Tweens that animate inserted and removed items between transition and steady attributes
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod tween;


pub use controller::Controller;
pub use tween::{AttributeTween, Easing};
