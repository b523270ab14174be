//! # TUI Playground
//!
//! The ratatui-specific layer: an interactive playground that drives the
//! navigation core and renders the live topology. This is the only module
//! that knows about ratatui and crossterm — the core talks to the
//! [`TerminalToolkit`] through the `Toolkit` trait and nothing else.
//!
//! Keys map one-to-one onto navigation operations: push, modal, tab,
//! root-replace, close-to-parent, close-to-root. Every `on_return` delivery
//! lands in a shared log pane, so payload propagation is visible as you
//! navigate.

mod event;
pub mod terminal;
mod ui;

pub use terminal::{TerminalToolkit, Topology};

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::{
    CloseOptions, CloseTarget, Navigator, OpenOptions, Payload, ScreenContent, ScreenId,
    ScreenOptions,
};
use crate::tui::event::{poll_event, DemoEvent};

/// A playground screen: a label plus a shared log that records every
/// `on_return` delivery for the log pane.
struct DemoScreen {
    label: String,
    returns: Rc<RefCell<Vec<String>>>,
}

impl ScreenContent for DemoScreen {
    fn on_load(&mut self) {
        debug!("{} loaded", self.label);
    }

    fn on_return(&mut self, payload: Payload) {
        let rendered = serde_json::Value::Object(payload).to_string();
        self.returns.borrow_mut().push(format!("{} ← {}", self.label, rendered));
    }
}

pub(crate) struct DemoApp {
    pub(crate) nav: Navigator,
    pub(crate) topology: Rc<RefCell<Topology>>,
    pub(crate) returns: Rc<RefCell<Vec<String>>>,
    /// The screen the next operation originates from.
    pub(crate) cursor: ScreenId,
    pub(crate) status: String,
    pub(crate) config: ResolvedConfig,
    counter: usize,
    next_tab: usize,
}

impl DemoApp {
    fn new(config: ResolvedConfig) -> Self {
        let toolkit = TerminalToolkit::new();
        let topology = toolkit.topology();
        let mut nav = Navigator::new(Box::new(toolkit));
        let returns: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let root = nav.register(
            Box::new(DemoScreen { label: config.root_title.clone(), returns: returns.clone() }),
            ScreenOptions { title: Some(config.root_title.clone()), nav_bar: true, ..Default::default() },
        );
        nav.open_root(root).expect("fresh screen becomes root");

        Self {
            nav,
            topology,
            returns,
            cursor: root,
            status: String::from("Welcome aboard!"),
            config,
            counter: 0,
            next_tab: 0,
        }
    }

    fn fresh_content(&mut self) -> (String, Box<dyn ScreenContent>) {
        self.counter += 1;
        let label = format!("Screen {}", self.counter);
        let content =
            Box::new(DemoScreen { label: label.clone(), returns: self.returns.clone() });
        (label, content)
    }

    fn open_opts(&self, title: &str) -> OpenOptions {
        OpenOptions {
            title: Some(title.to_string()),
            animated: self.config.animated,
            ..Default::default()
        }
    }

    fn handle(&mut self, event: DemoEvent) {
        let outcome = match event {
            DemoEvent::PushScreen => self.push_screen(),
            DemoEvent::OpenModal => self.open_modal(),
            DemoEvent::PlaceTab => self.place_tab(),
            DemoEvent::RootReplace => self.root_replace(),
            DemoEvent::CloseTop => self.close_top(),
            DemoEvent::CloseToRoot => self.close_to_root(),
            DemoEvent::Quit | DemoEvent::Resize => Ok(()),
        };
        if let Err(e) = outcome {
            warn!("navigation rejected: {e}");
            self.status = e.to_string();
        }
    }

    fn push_screen(&mut self) -> Result<(), crate::core::NavError> {
        let (label, content) = self.fresh_content();
        let opts = self.open_opts(&label);
        let opened = self.nav.open_new(self.cursor, content, opts)?;
        self.cursor = opened;
        self.status = format!("pushed {label}");
        Ok(())
    }

    fn open_modal(&mut self) -> Result<(), crate::core::NavError> {
        let (label, content) = self.fresh_content();
        let opts = self.open_opts(&label);
        let opened = self.nav.open_modal_new(self.cursor, content, opts)?;
        self.cursor = opened;
        self.status = format!("presented {label}");
        Ok(())
    }

    fn place_tab(&mut self) -> Result<(), crate::core::NavError> {
        let tab = self.config.tabs[self.next_tab % self.config.tabs.len()].clone();
        self.next_tab += 1;
        let (label, content) = self.fresh_content();
        let opts = OpenOptions { in_tab: Some(tab.clone()), ..self.open_opts(&label) };
        let opened = self.nav.open_new(self.cursor, content, opts)?;
        self.cursor = opened;
        self.status = format!("placed {label} in {tab:?}");
        Ok(())
    }

    fn root_replace(&mut self) -> Result<(), crate::core::NavError> {
        let (label, content) = self.fresh_content();
        let opts = OpenOptions {
            close_all: true,
            nav_bar: true,
            ..self.open_opts(&label)
        };
        let opened = self.nav.open_new(self.cursor, content, opts)?;
        self.cursor = opened;
        self.status = format!("{label} is the new root");
        Ok(())
    }

    fn close_top(&mut self) -> Result<(), crate::core::NavError> {
        let Some(parent) = self.nav.parent_screen(self.cursor) else {
            self.status = String::from("the root stays put");
            return Ok(());
        };
        let label = self.nav.title(self.cursor).unwrap_or_default().to_string();
        let mut payload = Payload::new();
        payload.insert("from".to_string(), serde_json::Value::String(label.clone()));
        self.nav.close(
            self.cursor,
            CloseOptions { animated: self.config.animated, payload, ..Default::default() },
        )?;
        self.cursor = parent;
        self.status = format!("closed {label}");
        Ok(())
    }

    fn close_to_root(&mut self) -> Result<(), crate::core::NavError> {
        let mut root = self.cursor;
        while let Some(parent) = self.nav.parent_screen(root) {
            root = parent;
        }
        if root == self.cursor {
            self.status = String::from("already at the root");
            return Ok(());
        }
        let label = self.nav.title(self.cursor).unwrap_or_default().to_string();
        let mut payload = Payload::new();
        payload.insert("from".to_string(), serde_json::Value::String(label.clone()));
        self.nav.close(
            self.cursor,
            CloseOptions {
                animated: self.config.animated,
                to_screen: Some(CloseTarget::Root),
                payload,
            },
        )?;
        self.cursor = root;
        self.status = format!("closed {label} to the root");
        Ok(())
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Playground starting (animated: {})", config.animated);
    let mut app = DemoApp::new(config);
    let mut terminal = ratatui::init();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &app))?;
        match poll_event() {
            Some(DemoEvent::Quit) => break,
            Some(event) => app.handle(event),
            None => {}
        }
        // A deferring toolkit would hand completions back between frames;
        // the terminal toolkit completes synchronously, so this is a no-op.
        app.nav.pump();
    }

    ratatui::restore();
    info!("Playground shut down");
    Ok(())
}
