//! # Navigation Core
//!
//! This module contains the screen-lifecycle state machine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │        (this module)         │
//!                    │                              │
//!                    │  • Screen (lifecycle unit)   │
//!                    │  • Navigator (app context)   │
//!                    │  • open/close resolvers      │
//!                    │                              │
//!                    │  No I/O. No rendering.       │
//!                    └──────────────┬───────────────┘
//!                                   │ Toolkit trait
//!             ┌─────────────────────┼─────────────────────┐
//!             ▼                     ▼                     ▼
//!      ┌────────────┐        ┌────────────┐        ┌────────────┐
//!      │  Terminal  │        │   native   │        │ Recording  │
//!      │  adapter   │        │  adapter   │        │ fake       │
//!      │ (ratatui)  │        │  (future)  │        │ (tests)    │
//!      └────────────┘        └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screen`]: the `Screen` entity, its lifecycle states, and the
//!   `ScreenContent` override points
//! - [`registry`]: `ScreenId` handles and the slab-backed screen store
//! - [`navigator`]: the `Navigator` — registry + toolkit + pending returns
//! - [`open`]: open-strategy resolution (push, modal, tab, root-replace)
//! - [`close`]: pop/dismiss resolution and return propagation
//! - [`error`]: the `NavError` taxonomy
//! - [`config`]: demo playground configuration (not used by the core types)

pub mod close;
pub mod config;
pub mod error;
pub mod navigator;
pub mod open;
pub mod registry;
pub mod screen;

// Re-export the types application code touches on every call.
pub use close::{CloseOptions, CloseTarget};
pub use error::NavError;
pub use navigator::Navigator;
pub use open::OpenOptions;
pub use registry::ScreenId;
pub use screen::{Payload, Placement, ScreenContent, ScreenOptions};
