//! # Screen Entity
//!
//! A screen is a lifecycle-bearing wrapper around one displayable unit (the
//! [`ScreenContent`]) plus its navigation metadata: parent link, stack
//! container, modal flag, open/closed status, title.
//!
//! Lifecycle is strictly `Created → Opened → Closed`, with `Opened` refined
//! by a [`Placement`] fixed at open time. The transition to `Opened` happens
//! exactly once per instance; the open resolver treats any further open of
//! the same instance as a no-op with respect to stack mutation.

use crate::core::registry::ScreenId;
use crate::toolkit::ContainerId;

/// Data flowing back from a closed screen to an ancestor. Always a mapping;
/// the empty mapping stands in for "nothing to report".
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The displayable unit a screen wraps, and the override points application
/// code implements to participate in the lifecycle.
///
/// `on_return` is the capability any screen-like type implements to receive
/// data from a closed descendant; it is invoked polymorphically through this
/// trait, never by name lookup.
pub trait ScreenContent {
    /// Called once, when the screen first reaches the display.
    fn on_load(&mut self) {}

    /// Receives the payload from a closing child (or deeper descendant that
    /// targeted this screen).
    fn on_return(&mut self, payload: Payload) {
        let _ = payload;
    }
}

/// How an opened screen reached the display. Exactly one applies per open
/// call, fixed for the life of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Pushed onto a navigation container.
    NavStack,
    /// Presented as a modal layer.
    Modal,
    /// Placed into a tab slot.
    Tab,
    /// Set as the application root.
    Root,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScreenState {
    Created,
    Opened(Placement),
    Closed,
}

/// Constructor-relevant attributes for [`register`](crate::core::Navigator::register)
/// and `open_new`.
#[derive(Default)]
pub struct ScreenOptions {
    pub title: Option<String>,
    /// Whether the screen owns its own navigation container when none is
    /// supplied at open time. Set at construction, like the original's
    /// nav-bar flag; a container is created for the screen immediately.
    pub nav_bar: bool,
    /// Container-application attribute: hide the tab bar while this screen
    /// is displayed. Carried through to the toolkit, no state machine here.
    pub hide_tab_bar: bool,
}

pub(crate) struct Screen {
    pub(crate) content: Box<dyn ScreenContent>,
    pub(crate) title: String,
    /// Back reference to the screen that opened this one. Relation only, not
    /// ownership; `None` for root screens constructed directly.
    pub(crate) parent: Option<ScreenId>,
    /// The stack container this screen lives in. Shared with the opener when
    /// pushed onto an existing stack, or owned when `nav_bar` created one.
    pub(crate) nav: Option<ContainerId>,
    /// Host container recorded at present time; consumed by dismiss.
    pub(crate) presented_from: Option<ContainerId>,
    pub(crate) modal: bool,
    pub(crate) nav_bar: bool,
    pub(crate) hide_tab_bar: bool,
    pub(crate) state: ScreenState,
}

impl Screen {
    pub(crate) fn new(content: Box<dyn ScreenContent>, opts: ScreenOptions) -> Self {
        Self {
            content,
            title: opts.title.unwrap_or_default(),
            parent: None,
            nav: None,
            presented_from: None,
            modal: false,
            nav_bar: opts.nav_bar,
            hide_tab_bar: opts.hide_tab_bar,
            state: ScreenState::Created,
        }
    }

    pub(crate) fn is_opened(&self) -> bool {
        matches!(self.state, ScreenState::Opened(_))
    }

    pub(crate) fn placement(&self) -> Option<Placement> {
        match self.state {
            ScreenState::Opened(placement) => Some(placement),
            _ => None,
        }
    }

    /// Flip `Created → Opened(placement)` and fire `on_load`. Returns false
    /// (and does nothing) if the screen already left `Created`.
    pub(crate) fn mark_opened(&mut self, placement: Placement) -> bool {
        if self.state != ScreenState::Created {
            return false;
        }
        self.state = ScreenState::Opened(placement);
        self.content.on_load();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Probe;

    #[test]
    fn test_new_screen_is_created_and_parentless() {
        let screen = Screen::new(Box::new(Probe::new().content()), ScreenOptions::default());
        assert_eq!(screen.state, ScreenState::Created);
        assert!(screen.parent.is_none());
        assert!(screen.nav.is_none());
        assert!(!screen.modal);
    }

    #[test]
    fn test_mark_opened_flips_exactly_once() {
        let probe = Probe::new();
        let mut screen = Screen::new(Box::new(probe.content()), ScreenOptions::default());

        assert!(screen.mark_opened(Placement::NavStack));
        assert_eq!(screen.placement(), Some(Placement::NavStack));
        assert_eq!(probe.load_count(), 1);

        // Second transition is refused and the placement stays fixed.
        assert!(!screen.mark_opened(Placement::Modal));
        assert_eq!(screen.placement(), Some(Placement::NavStack));
        assert_eq!(probe.load_count(), 1);
    }

    #[test]
    fn test_options_apply_title_and_flags() {
        let screen = Screen::new(
            Box::new(Probe::new().content()),
            ScreenOptions {
                title: Some("Settings".to_string()),
                nav_bar: true,
                hide_tab_bar: true,
            },
        );
        assert_eq!(screen.title, "Settings");
        assert!(screen.nav_bar);
        assert!(screen.hide_tab_bar);
    }
}
