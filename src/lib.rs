//! # tiller
//!
//! Screen-lifecycle and navigation-stack management over a pluggable UI
//! toolkit. Application code opens, closes, and composes screens; tiller
//! keeps the stack semantics, parent/child relationships, and return-value
//! propagation correct, and delegates the actual display work to a
//! [`Toolkit`](toolkit::Toolkit) implementation.
//!
//! The [`core`] module is the state machine; [`toolkit`] is the adapter
//! seam; [`tui`] ships a terminal-backed adapter plus an interactive
//! playground built on it.

pub mod core;
pub mod toolkit;
pub mod tui;

#[cfg(test)]
pub mod test_support;
