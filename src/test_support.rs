//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::{Payload, ScreenContent, ScreenId};
use crate::toolkit::{Completion, ContainerId, ModalContent, Toolkit};

// ============================================================================
// Recording Toolkit
// ============================================================================

/// Every primitive the navigator invoked, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolkitCall {
    CreateContainer { container: ContainerId, root: ScreenId },
    Push { container: ContainerId, screen: ScreenId, animated: bool },
    Pop { container: ContainerId, animated: bool },
    Present { host: ContainerId, content: ModalContent, animated: bool, with_completion: bool },
    Dismiss { host: ContainerId, animated: bool },
    PlaceInTab { tab: String, screen: ScreenId },
    ReplaceRoot { screen: ScreenId },
}

#[derive(Default)]
struct RecorderState {
    calls: Vec<ToolkitCall>,
    stacks: HashMap<ContainerId, Vec<ScreenId>>,
    modals: Vec<(ContainerId, ModalContent)>,
    tabs: Vec<(String, ScreenId)>,
    root: Option<ScreenId>,
    next_container: u64,
    defer_completions: bool,
    held: Vec<Completion>,
}

/// A `Toolkit` fake that records every call and maintains a minimal stack
/// topology (enough for `top_of` to answer the double-open guard). Clones
/// share state, so tests keep one handle while the navigator owns another.
///
/// By default present/dismiss completions fire synchronously; a toolkit
/// built with [`deferring`](Self::deferring) holds them until the test calls
/// [`fire_held`](Self::fire_held), modeling an animation in flight.
#[derive(Clone)]
pub struct RecordingToolkit {
    state: Rc<RefCell<RecorderState>>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(RecorderState::default())) }
    }

    pub fn deferring() -> Self {
        let toolkit = Self::new();
        toolkit.state.borrow_mut().defer_completions = true;
        toolkit
    }

    pub fn calls(&self) -> Vec<ToolkitCall> {
        self.state.borrow().calls.clone()
    }

    pub fn push_count(&self) -> usize {
        self.count(|call| matches!(call, ToolkitCall::Push { .. }))
    }

    pub fn pop_count(&self) -> usize {
        self.count(|call| matches!(call, ToolkitCall::Pop { .. }))
    }

    pub fn container_count(&self) -> usize {
        self.state.borrow().stacks.len()
    }

    pub fn stack(&self, container: ContainerId) -> Vec<ScreenId> {
        self.state.borrow().stacks.get(&container).cloned().unwrap_or_default()
    }

    pub fn depth(&self, container: ContainerId) -> usize {
        self.stack(container).len()
    }

    pub fn modal_count(&self) -> usize {
        self.state.borrow().modals.len()
    }

    pub fn tabs(&self) -> Vec<(String, ScreenId)> {
        self.state.borrow().tabs.clone()
    }

    pub fn root(&self) -> Option<ScreenId> {
        self.state.borrow().root
    }

    /// Invoke completions held by a deferring toolkit. Returns how many fired.
    pub fn fire_held(&self) -> usize {
        let held: Vec<Completion> = self.state.borrow_mut().held.drain(..).collect();
        let fired = held.len();
        for completion in held {
            completion();
        }
        fired
    }

    fn count(&self, predicate: impl Fn(&ToolkitCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|call| predicate(call)).count()
    }

    fn finish(&self, completion: Option<Completion>) {
        let Some(completion) = completion else { return };
        if self.state.borrow().defer_completions {
            self.state.borrow_mut().held.push(completion);
        } else {
            completion();
        }
    }
}

impl Toolkit for RecordingToolkit {
    fn create_container(&mut self, root: ScreenId) -> ContainerId {
        let mut state = self.state.borrow_mut();
        let container = ContainerId(state.next_container);
        state.next_container += 1;
        state.stacks.insert(container, vec![root]);
        state.calls.push(ToolkitCall::CreateContainer { container, root });
        container
    }

    fn push(&mut self, container: ContainerId, screen: ScreenId, animated: bool) {
        let mut state = self.state.borrow_mut();
        state.stacks.entry(container).or_default().push(screen);
        state.calls.push(ToolkitCall::Push { container, screen, animated });
    }

    fn pop(&mut self, container: ContainerId, animated: bool) {
        let mut state = self.state.borrow_mut();
        if let Some(stack) = state.stacks.get_mut(&container) {
            stack.pop();
        }
        state.calls.push(ToolkitCall::Pop { container, animated });
    }

    fn top_of(&self, container: ContainerId) -> Option<ScreenId> {
        self.state.borrow().stacks.get(&container).and_then(|stack| stack.last().copied())
    }

    fn present(
        &mut self,
        host: ContainerId,
        content: ModalContent,
        animated: bool,
        completion: Option<Completion>,
    ) {
        let with_completion = completion.is_some();
        {
            let mut state = self.state.borrow_mut();
            state.modals.push((host, content));
            state.calls.push(ToolkitCall::Present { host, content, animated, with_completion });
        }
        self.finish(completion);
    }

    fn dismiss(&mut self, host: ContainerId, animated: bool, completion: Option<Completion>) {
        {
            let mut state = self.state.borrow_mut();
            if let Some(index) = state.modals.iter().rposition(|(h, _)| *h == host) {
                state.modals.remove(index);
            }
            state.calls.push(ToolkitCall::Dismiss { host, animated });
        }
        self.finish(completion);
    }

    fn place_in_tab(&mut self, tab: &str, screen: ScreenId) {
        let mut state = self.state.borrow_mut();
        state.tabs.retain(|(name, _)| name != tab);
        state.tabs.push((tab.to_string(), screen));
        state.calls.push(ToolkitCall::PlaceInTab { tab: tab.to_string(), screen });
    }

    fn replace_root(&mut self, screen: ScreenId) {
        let mut state = self.state.borrow_mut();
        state.stacks.retain(|_, stack| stack.contains(&screen));
        state.modals.clear();
        state.tabs.clear();
        state.root = Some(screen);
        state.calls.push(ToolkitCall::ReplaceRoot { screen });
    }
}

// ============================================================================
// Screen Probes
// ============================================================================

/// Observation handle for a test screen: counts `on_load` calls and records
/// every `on_return` payload. The handle stays with the test while the
/// [`ProbeContent`] it produces moves into the navigator.
pub struct Probe {
    loads: Rc<Cell<usize>>,
    returns: Rc<RefCell<Vec<Payload>>>,
}

impl Probe {
    pub fn new() -> Self {
        Self {
            loads: Rc::new(Cell::new(0)),
            returns: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn content(&self) -> ProbeContent {
        ProbeContent {
            loads: self.loads.clone(),
            returns: self.returns.clone(),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    pub fn returns(&self) -> Vec<Payload> {
        self.returns.borrow().clone()
    }

    pub fn return_count(&self) -> usize {
        self.returns.borrow().len()
    }
}

pub struct ProbeContent {
    loads: Rc<Cell<usize>>,
    returns: Rc<RefCell<Vec<Payload>>>,
}

impl ScreenContent for ProbeContent {
    fn on_load(&mut self) {
        self.loads.set(self.loads.get() + 1);
    }

    fn on_return(&mut self, payload: Payload) {
        self.returns.borrow_mut().push(payload);
    }
}

/// Build a string-valued payload from literal pairs.
pub fn payload(entries: &[(&str, &str)]) -> Payload {
    let mut map = Payload::new();
    for (key, value) in entries {
        map.insert((*key).to_string(), serde_json::Value::String((*value).to_string()));
    }
    map
}
