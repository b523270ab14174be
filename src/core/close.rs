//! # Close Resolver
//!
//! Decides pop-vs-dismiss for a closing screen, walks the parent chain to
//! the return target, and delivers the payload to that target's `on_return`.
//!
//! Ordering is the contract here: a modal's return propagation runs only
//! after the toolkit confirms the dismissal, via the completion it is
//! handed. The completion pushes a ready job onto the navigator's pending
//! queue; [`Navigator::pump`] drains it, resolving the target against state
//! as of drain time. `close` pumps before returning, so a toolkit that
//! completes synchronously propagates synchronously, and a toolkit that
//! defers (animation in flight) propagates on the application's next pump.

use log::{debug, warn};

use crate::core::error::NavError;
use crate::core::navigator::{Navigator, PendingReturn};
use crate::core::registry::ScreenId;
use crate::core::screen::{Payload, Placement, ScreenState};

/// Where a closing screen sends its return payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseTarget {
    /// The root-most ancestor, reached by following parent links until none
    /// remain.
    Root,
    /// A specific ancestor. Screens strictly between the closing screen and
    /// this one are removed as well; none of them receive the payload.
    Screen(ScreenId),
}

/// Options for a single `close` call.
pub struct CloseOptions {
    pub animated: bool,
    /// Return target; the immediate parent when absent.
    pub to_screen: Option<CloseTarget>,
    /// Delivered to the target's `on_return`. Always a mapping; defaults to
    /// the empty mapping.
    pub payload: Payload,
}

impl Default for CloseOptions {
    fn default() -> Self {
        Self { animated: true, to_screen: None, payload: Payload::new() }
    }
}

impl Navigator {
    /// Close an opened screen, removing it from its stack or modal layer and
    /// propagating the payload to the resolved ancestor.
    pub fn close(&mut self, screen: ScreenId, opts: CloseOptions) -> Result<(), NavError> {
        let placement = match self.screen(screen)?.state {
            ScreenState::Opened(placement) => placement,
            ScreenState::Created => {
                return Err(NavError::InvalidState(format!(
                    "{screen} was never opened and cannot be closed"
                )));
            }
            ScreenState::Closed => {
                return Err(NavError::InvalidState(format!("{screen} is already closed")));
            }
        };

        // Surface a bad `to_screen` now; the target is re-resolved against
        // live state when the propagation actually runs.
        if let Some(CloseTarget::Screen(target)) = opts.to_screen
            && !self.screens.is_ancestor(target, screen)
        {
            return Err(NavError::UnresolvedTarget { from: screen, to: target });
        }

        let job = PendingReturn { closing: screen, to: opts.to_screen, payload: opts.payload };

        match placement {
            Placement::Modal => {
                let host = self
                    .screen(screen)?
                    .presented_from
                    .ok_or(NavError::MissingContainer(screen))?;
                self.screen_mut(screen)?.state = ScreenState::Closed;
                let queue = self.pending.clone();
                let completion = Box::new(move || {
                    queue.borrow_mut().push_back(job);
                });
                debug!("{screen} dismissing from {host}");
                self.toolkit.dismiss(host, opts.animated, Some(completion));
            }
            Placement::NavStack => {
                let container =
                    self.screen(screen)?.nav.ok_or(NavError::MissingContainer(screen))?;
                self.screen_mut(screen)?.state = ScreenState::Closed;
                debug!("{screen} popping from {container}");
                self.toolkit.pop(container, opts.animated);
                self.pending.borrow_mut().push_back(job);
            }
            Placement::Tab | Placement::Root => {
                // Nothing to pop or dismiss; the screen just leaves the display.
                self.screen_mut(screen)?.state = ScreenState::Closed;
                self.pending.borrow_mut().push_back(job);
            }
        }

        self.pump();
        Ok(())
    }

    /// Drain return propagations whose toolkit transition has completed.
    ///
    /// Applications with a deferring toolkit call this from their main loop;
    /// with a synchronous toolkit `close` already pumps everything.
    pub fn pump(&mut self) {
        loop {
            let job = self.pending.borrow_mut().pop_front();
            match job {
                Some(job) => self.propagate_return(job),
                None => break,
            }
        }
    }

    /// Resolve the return target, remove intermediates, deliver the payload,
    /// and release the closing screen. Runs against live registry state.
    fn propagate_return(&mut self, job: PendingReturn) {
        let PendingReturn { closing, to, payload } = job;
        if !self.screens.contains(closing) {
            debug!("{closing} vanished before return propagation; dropping");
            return;
        }

        let target = match to {
            Some(CloseTarget::Root) => self.screens.root_of(closing),
            Some(CloseTarget::Screen(target)) => {
                if self.screens.is_ancestor(target, closing) {
                    Some(target)
                } else {
                    warn!("{target} left the ancestor chain before propagation; payload dropped");
                    self.screens.remove(closing);
                    return;
                }
            }
            None => self.screens.get(closing).and_then(|s| s.parent),
        };

        // Screens strictly between the closing screen and a distant target
        // leave the display too, without receiving the payload.
        if let Some(target) = target {
            for skipped in self.screens.ancestors(closing) {
                if skipped == target {
                    break;
                }
                debug!("{skipped} removed while closing to {target}");
                if let Some(slot) = self.screens.get(skipped)
                    && slot.placement() == Some(Placement::NavStack)
                    && let Some(container) = slot.nav
                {
                    self.toolkit.pop(container, false);
                }
                self.screens.remove(skipped);
            }
        }

        self.screens.remove(closing);

        match target {
            Some(target) => self.deliver_return(target, payload),
            None => debug!("{closing} closed with no return target; payload dropped"),
        }
    }
}
