//! # Toolkit Adapter
//!
//! The navigation core never touches the host UI toolkit directly; it talks
//! to this trait and nothing else. An implementation translates the
//! primitives into whatever the host actually does — the shipped
//! [`TerminalToolkit`](crate::tui::TerminalToolkit) maintains a terminal
//! topology, a GUI adapter would drive real native containers, and tests use
//! a recording fake.
//!
//! All calls happen on the single main execution context. `present` and
//! `dismiss` take an optional [`Completion`]: the toolkit must invoke it
//! strictly after the transition has finished (immediately, for a toolkit
//! without animations), and on the same context. The core relies on that
//! ordering for return propagation.

use std::fmt;

use crate::core::ScreenId;

/// Handle to a navigation container (an ordered stack of screens) owned by
/// the toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Continuation invoked by the toolkit once an animated transition has
/// completed. Scheduled back onto the main context, never a separate thread.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// What a modal layer displays: a screen that owns a navigation container
/// presents the container, a bare screen presents itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalContent {
    Screen(ScreenId),
    Container(ContainerId),
}

/// The host toolkit's navigation primitives.
pub trait Toolkit {
    /// Create a navigation container with `root` as its bottom-most screen.
    fn create_container(&mut self, root: ScreenId) -> ContainerId;

    /// Push `screen` onto `container`.
    fn push(&mut self, container: ContainerId, screen: ScreenId, animated: bool);

    /// Pop the top screen off `container`.
    fn pop(&mut self, container: ContainerId, animated: bool);

    /// Current top of `container`, if the container exists and is non-empty.
    fn top_of(&self, container: ContainerId) -> Option<ScreenId>;

    /// Present `content` as a modal layer over `host`. `completion` fires
    /// after the presentation finishes.
    fn present(
        &mut self,
        host: ContainerId,
        content: ModalContent,
        animated: bool,
        completion: Option<Completion>,
    );

    /// Dismiss the top-most modal layer presented over `host`. `completion`
    /// fires after the toolkit confirms the modal is removed.
    fn dismiss(&mut self, host: ContainerId, animated: bool, completion: Option<Completion>);

    /// Place `screen` into the tab slot named `tab`.
    fn place_in_tab(&mut self, tab: &str, screen: ScreenId);

    /// Replace the application root with `screen`, tearing down the previous
    /// hierarchy.
    fn replace_root(&mut self, screen: ScreenId);
}
