//! # Navigator
//!
//! The navigator is the application context for screen navigation,
//! constructed once and passed explicitly to whoever opens screens — there
//! is no ambient lookup. It owns the screen registry and the toolkit
//! adapter, and carries the queue of return propagations waiting on toolkit
//! completions.
//!
//! ```text
//! app code ──open/close──▶ Navigator ──primitives──▶ dyn Toolkit
//!                              │
//!                              └── registry: ScreenId → Screen
//!                                  pending:  completed dismissals → pump()
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

use crate::core::close::CloseTarget;
use crate::core::error::NavError;
use crate::core::registry::{Registry, ScreenId};
use crate::core::screen::{Payload, Placement, Screen, ScreenContent, ScreenOptions};
use crate::toolkit::{ContainerId, Toolkit};

/// A return propagation whose toolkit transition has completed and which is
/// waiting to be delivered by [`Navigator::pump`].
pub(crate) struct PendingReturn {
    pub(crate) closing: ScreenId,
    pub(crate) to: Option<CloseTarget>,
    pub(crate) payload: Payload,
}

pub(crate) type PendingQueue = Rc<RefCell<VecDeque<PendingReturn>>>;

pub struct Navigator {
    pub(crate) screens: Registry,
    pub(crate) toolkit: Box<dyn Toolkit>,
    pub(crate) pending: PendingQueue,
}

impl Navigator {
    pub fn new(toolkit: Box<dyn Toolkit>) -> Self {
        Self {
            screens: Registry::new(),
            toolkit,
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Construct a screen directly, without an opener. The screen starts in
    /// the `Created` state with no parent; it reaches the display through
    /// [`open_root`](Self::open_root) or another screen's `open`.
    ///
    /// `nav_bar: true` gives the screen its own navigation container right
    /// away, mirroring construction-time nav-bar creation in the original.
    pub fn register(
        &mut self,
        content: Box<dyn ScreenContent>,
        opts: ScreenOptions,
    ) -> ScreenId {
        let nav_bar = opts.nav_bar;
        let id = self.screens.insert(Screen::new(content, opts));
        if nav_bar {
            let container = self.toolkit.create_container(id);
            self.screens.get_mut(id).expect("just inserted").nav = Some(container);
            debug!("{id} registered with its own {container}");
        } else {
            debug!("{id} registered");
        }
        id
    }

    /// Place a `Created` screen as the application root, tearing down every
    /// other screen. This is the reset/logout flow: the previous hierarchy
    /// is released wholesale and nobody receives `on_return`.
    pub fn open_root(&mut self, screen: ScreenId) -> Result<ScreenId, NavError> {
        if self.screen(screen)?.is_opened() {
            return Err(NavError::InvalidState(format!(
                "{screen} is already opened and cannot become the root"
            )));
        }
        for id in self.screens.ids() {
            if id != screen {
                self.screens.remove(id);
            }
        }
        self.toolkit.replace_root(screen);
        let slot = self.screen_mut(screen)?;
        slot.parent = None;
        slot.mark_opened(Placement::Root);
        debug!("{screen} set as root");
        Ok(screen)
    }

    /// Deliver `payload` to the parent's `on_return`, if a parent exists.
    /// Without a parent this is a no-op. The parent always receives a
    /// mapping — pass `Payload::new()` for "nothing to report".
    pub fn send_on_return(
        &mut self,
        screen: ScreenId,
        payload: Payload,
    ) -> Result<(), NavError> {
        let parent = self.screen(screen)?.parent;
        match parent {
            Some(parent) => self.deliver_return(parent, payload),
            None => debug!("{screen} has no parent; return payload dropped"),
        }
        Ok(())
    }

    pub(crate) fn deliver_return(&mut self, target: ScreenId, payload: Payload) {
        if let Some(slot) = self.screens.get_mut(target) {
            debug!("on_return delivered to {target}");
            slot.content.on_return(payload);
        } else {
            debug!("return target {target} already released; payload dropped");
        }
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn contains(&self, screen: ScreenId) -> bool {
        self.screens.contains(screen)
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    pub fn parent_screen(&self, screen: ScreenId) -> Option<ScreenId> {
        self.screens.get(screen).and_then(|s| s.parent)
    }

    pub fn is_modal(&self, screen: ScreenId) -> bool {
        self.screens.get(screen).is_some_and(|s| s.modal)
    }

    pub fn is_opened(&self, screen: ScreenId) -> bool {
        self.screens.get(screen).is_some_and(|s| s.is_opened())
    }

    pub fn placement(&self, screen: ScreenId) -> Option<Placement> {
        self.screens.get(screen).and_then(|s| s.placement())
    }

    pub fn navigation_container(&self, screen: ScreenId) -> Option<ContainerId> {
        self.screens.get(screen).and_then(|s| s.nav)
    }

    pub fn has_nav_bar(&self, screen: ScreenId) -> bool {
        self.screens.get(screen).is_some_and(|s| s.nav_bar)
    }

    pub fn hides_tab_bar(&self, screen: ScreenId) -> bool {
        self.screens.get(screen).is_some_and(|s| s.hide_tab_bar)
    }

    pub fn title(&self, screen: ScreenId) -> Option<&str> {
        self.screens.get(screen).map(|s| s.title.as_str())
    }

    // ------------------------------------------------------------------
    // Internal plumbing shared by the open/close resolvers
    // ------------------------------------------------------------------

    pub(crate) fn screen(&self, id: ScreenId) -> Result<&Screen, NavError> {
        self.screens.get(id).ok_or(NavError::UnknownScreen(id))
    }

    pub(crate) fn screen_mut(&mut self, id: ScreenId) -> Result<&mut Screen, NavError> {
        self.screens.get_mut(id).ok_or(NavError::UnknownScreen(id))
    }

    /// The screen's navigation container, created on demand with the screen
    /// as its root when it has none yet.
    pub(crate) fn ensure_container(&mut self, id: ScreenId) -> Result<ContainerId, NavError> {
        if let Some(container) = self.screen(id)?.nav {
            return Ok(container);
        }
        let container = self.toolkit.create_container(id);
        self.screen_mut(id)?.nav = Some(container);
        debug!("{container} created for {id}");
        Ok(container)
    }
}
