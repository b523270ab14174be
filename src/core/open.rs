//! # Open Resolver
//!
//! Decides, for each `open` call, which of the five strategies applies —
//! root-replace, modal, tab, push onto a fresh stack, push onto the opener's
//! existing stack — and guards against double-opening.
//!
//! Resolution order, first match wins:
//! 1. `close_all`  → the target becomes a parentless root; everything else
//!    is torn down (reset/logout flow).
//! 2. `modal`      → present over the opener's container.
//! 3. `in_tab`     → place into the named tab slot.
//! 4. already open → no-op with respect to stack mutation.
//! 5. otherwise    → push onto the opener's container, creating one if the
//!    opener has none.
//!
//! Strategies are mutually exclusive; asking for more than one of
//! `close_all` / `modal` / `in_tab` in a single call is an error, not a
//! precedence question.

use log::{debug, warn};

use crate::core::error::NavError;
use crate::core::navigator::Navigator;
use crate::core::registry::ScreenId;
use crate::core::screen::{Placement, ScreenContent, ScreenOptions, ScreenState};
use crate::toolkit::{Completion, ModalContent};

/// Options for a single `open` call.
///
/// `title`, `nav_bar` and `hide_tab_bar` are constructor-relevant: they are
/// applied to the target screen while it is being set up for open.
/// `completion` is forwarded to the toolkit's present primitive and is only
/// meaningful for modal opens.
pub struct OpenOptions {
    pub modal: bool,
    /// Replace the entire hierarchy with the target (logout/reset flows).
    pub close_all: bool,
    /// Place the target into the tab slot with this identifier.
    pub in_tab: Option<String>,
    pub animated: bool,
    pub completion: Option<Completion>,
    pub title: Option<String>,
    pub nav_bar: bool,
    pub hide_tab_bar: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            modal: false,
            close_all: false,
            in_tab: None,
            animated: true,
            completion: None,
            title: None,
            nav_bar: false,
            hide_tab_bar: false,
        }
    }
}

impl Navigator {
    /// Open an already-registered screen from `opener`.
    ///
    /// Returns the target id. Opening a screen that is already open does not
    /// mutate any stack; `is_opened` flips exactly once per instance.
    pub fn open(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        validate_options(&opts)?;
        if opener == target {
            return Err(NavError::InvalidState(format!("{target} cannot open itself")));
        }
        self.screen(opener)?;

        match self.screen(target)?.state {
            ScreenState::Closed => Err(NavError::InvalidState(format!(
                "{target} is closed; closed screens cannot be reopened"
            ))),
            ScreenState::Opened(_) => {
                let at_top = self
                    .screen(opener)?
                    .nav
                    .and_then(|container| self.toolkit.top_of(container))
                    == Some(target);
                if at_top {
                    debug!("{target} is already the stack top; open is a no-op");
                } else {
                    warn!("{target} is already open elsewhere; open is a no-op");
                }
                Ok(target)
            }
            ScreenState::Created => {
                self.set_up_for_open(opener, target, &opts)?;
                self.resolve_strategy(opener, target, opts)
            }
        }
    }

    /// The "target is a type" form: register `content` as a fresh screen
    /// with the constructor-relevant options applied and `parent` set to the
    /// opener, then resolve the open as usual.
    pub fn open_new(
        &mut self,
        opener: ScreenId,
        content: Box<dyn ScreenContent>,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        validate_options(&opts)?;
        self.screen(opener)?;
        let target = self.register(content, ScreenOptions::default());
        self.set_up_for_open(opener, target, &opts)?;
        self.resolve_strategy(opener, target, opts)
    }

    /// Sugar for `open` with `modal` forced on.
    pub fn open_modal(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        self.open(opener, target, OpenOptions { modal: true, ..opts })
    }

    /// Sugar for `open_new` with `modal` forced on.
    pub fn open_modal_new(
        &mut self,
        opener: ScreenId,
        content: Box<dyn ScreenContent>,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        self.open_new(opener, content, OpenOptions { modal: true, ..opts })
    }

    /// Apply open-time attributes to a `Created` target: parent link, title,
    /// nav-bar ownership (creating the screen's own container, as a nav-bar
    /// constructor argument would), tab-bar visibility.
    fn set_up_for_open(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: &OpenOptions,
    ) -> Result<(), NavError> {
        if opts.nav_bar && self.screen(target)?.nav.is_none() {
            let container = self.toolkit.create_container(target);
            self.screen_mut(target)?.nav = Some(container);
        }
        let slot = self.screen_mut(target)?;
        slot.parent = Some(opener);
        if let Some(title) = &opts.title {
            slot.title = title.clone();
        }
        if opts.nav_bar {
            slot.nav_bar = true;
        }
        if opts.hide_tab_bar {
            slot.hide_tab_bar = true;
        }
        Ok(())
    }

    fn resolve_strategy(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        if opts.close_all {
            return self.open_root(target);
        }
        if opts.modal {
            return self.present_modal(opener, target, opts);
        }
        if let Some(tab) = &opts.in_tab {
            self.toolkit.place_in_tab(tab, target);
            self.screen_mut(target)?.mark_opened(Placement::Tab);
            debug!("{target} placed in tab {tab:?}");
            return Ok(target);
        }
        self.push_onto_stack(opener, target, opts)
    }

    fn present_modal(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        let host = self.ensure_container(opener)?;
        // A modal that owns a navigation container presents the container,
        // a bare screen presents itself.
        let content = match self.screen(target)?.nav {
            Some(container) => ModalContent::Container(container),
            None => ModalContent::Screen(target),
        };
        {
            let slot = self.screen_mut(target)?;
            slot.modal = true;
            slot.presented_from = Some(host);
        }
        self.toolkit.present(host, content, opts.animated, opts.completion);
        self.screen_mut(target)?.mark_opened(Placement::Modal);
        debug!("{target} presented modally over {host}");
        Ok(target)
    }

    fn push_onto_stack(
        &mut self,
        opener: ScreenId,
        target: ScreenId,
        opts: OpenOptions,
    ) -> Result<ScreenId, NavError> {
        if opts.completion.is_some() {
            debug!("completion option ignored for a non-modal open");
        }
        let container = self.ensure_container(opener)?;
        if let Some(own) = self.screen(target)?.nav
            && own != container
        {
            // The target's own container never reached the display; it is
            // discarded in favor of the opener's.
            debug!("{target} discards its dangling {own} and adopts {container}");
        }
        self.screen_mut(target)?.nav = Some(container);
        self.toolkit.push(container, target, opts.animated);
        self.screen_mut(target)?.mark_opened(Placement::NavStack);
        debug!("{target} pushed onto {container}");
        Ok(target)
    }
}

fn validate_options(opts: &OpenOptions) -> Result<(), NavError> {
    let requested =
        [opts.close_all, opts.modal, opts.in_tab.is_some()].iter().filter(|&&set| set).count();
    if requested > 1 {
        return Err(NavError::InvalidState(
            "conflicting open options: at most one of close_all, modal, in_tab".to_string(),
        ));
    }
    Ok(())
}
