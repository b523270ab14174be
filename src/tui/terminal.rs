//! # Terminal Toolkit
//!
//! The shipped [`Toolkit`] implementation. A terminal has no native
//! navigation controllers, so this adapter maintains the topology itself —
//! which screens sit on which stack, which modal layers are up, which tab
//! slots are filled — and the playground renders straight from it.
//!
//! Terminal transitions are instantaneous: present/dismiss completions are
//! invoked synchronously, after the topology mutation, which satisfies the
//! ordering the core relies on ("completion fires strictly after the toolkit
//! confirms the transition").

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

use crate::core::ScreenId;
use crate::toolkit::{Completion, ContainerId, ModalContent, Toolkit};

/// How many recent primitive calls the journal keeps for display.
const JOURNAL_LIMIT: usize = 8;

/// A modal layer currently on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalLayer {
    pub host: ContainerId,
    pub content: ModalContent,
}

/// Live display state, shared between the toolkit (writer) and the
/// playground renderer (reader).
#[derive(Default)]
pub struct Topology {
    /// Stack containers in creation order, bottom of each stack first.
    pub stacks: Vec<(ContainerId, Vec<ScreenId>)>,
    /// Modal layers in presentation order, top-most last.
    pub modals: Vec<ModalLayer>,
    /// Filled tab slots in placement order.
    pub tabs: Vec<(String, ScreenId)>,
    pub root: Option<ScreenId>,
    /// Recent primitive calls, oldest first.
    pub journal: VecDeque<String>,
}

impl Topology {
    pub fn stack_of(&self, container: ContainerId) -> Option<&Vec<ScreenId>> {
        self.stacks.iter().find(|(id, _)| *id == container).map(|(_, stack)| stack)
    }

    fn stack_of_mut(&mut self, container: ContainerId) -> Option<&mut Vec<ScreenId>> {
        self.stacks.iter_mut().find(|(id, _)| *id == container).map(|(_, stack)| stack)
    }

    fn record(&mut self, entry: String) {
        debug!("toolkit: {entry}");
        self.journal.push_back(entry);
        while self.journal.len() > JOURNAL_LIMIT {
            self.journal.pop_front();
        }
    }
}

pub struct TerminalToolkit {
    topology: Rc<RefCell<Topology>>,
    next_container: u64,
}

impl TerminalToolkit {
    pub fn new() -> Self {
        Self { topology: Rc::new(RefCell::new(Topology::default())), next_container: 0 }
    }

    /// Shared read handle for the renderer. The toolkit itself moves into
    /// the navigator.
    pub fn topology(&self) -> Rc<RefCell<Topology>> {
        self.topology.clone()
    }
}

impl Default for TerminalToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for TerminalToolkit {
    fn create_container(&mut self, root: ScreenId) -> ContainerId {
        let container = ContainerId(self.next_container);
        self.next_container += 1;
        let mut topo = self.topology.borrow_mut();
        topo.stacks.push((container, vec![root]));
        topo.record(format!("create {container} (root {root})"));
        container
    }

    fn push(&mut self, container: ContainerId, screen: ScreenId, animated: bool) {
        let mut topo = self.topology.borrow_mut();
        if let Some(stack) = topo.stack_of_mut(container) {
            stack.push(screen);
        }
        let suffix = if animated { "" } else { " (instant)" };
        topo.record(format!("push {screen} → {container}{suffix}"));
    }

    fn pop(&mut self, container: ContainerId, animated: bool) {
        let mut topo = self.topology.borrow_mut();
        let popped = topo.stack_of_mut(container).and_then(|stack| stack.pop());
        let suffix = if animated { "" } else { " (instant)" };
        match popped {
            Some(screen) => topo.record(format!("pop {screen} ← {container}{suffix}")),
            None => topo.record(format!("pop on empty {container}")),
        }
    }

    fn top_of(&self, container: ContainerId) -> Option<ScreenId> {
        self.topology.borrow().stack_of(container).and_then(|stack| stack.last().copied())
    }

    fn present(
        &mut self,
        host: ContainerId,
        content: ModalContent,
        animated: bool,
        completion: Option<Completion>,
    ) {
        {
            let mut topo = self.topology.borrow_mut();
            topo.modals.push(ModalLayer { host, content });
            let suffix = if animated { "" } else { " (instant)" };
            topo.record(format!("present modal over {host}{suffix}"));
        }
        if let Some(completion) = completion {
            completion();
        }
    }

    fn dismiss(&mut self, host: ContainerId, animated: bool, completion: Option<Completion>) {
        {
            let mut topo = self.topology.borrow_mut();
            if let Some(index) = topo.modals.iter().rposition(|layer| layer.host == host) {
                topo.modals.remove(index);
            }
            let suffix = if animated { "" } else { " (instant)" };
            topo.record(format!("dismiss modal over {host}{suffix}"));
        }
        if let Some(completion) = completion {
            completion();
        }
    }

    fn place_in_tab(&mut self, tab: &str, screen: ScreenId) {
        let mut topo = self.topology.borrow_mut();
        topo.tabs.retain(|(name, _)| name != tab);
        topo.tabs.push((tab.to_string(), screen));
        topo.record(format!("tab {tab:?} ← {screen}"));
    }

    fn replace_root(&mut self, screen: ScreenId) {
        let mut topo = self.topology.borrow_mut();
        topo.stacks.retain(|(_, stack)| stack.contains(&screen));
        topo.modals.clear();
        topo.tabs.clear();
        topo.root = Some(screen);
        topo.record(format!("root ← {screen}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_push_and_pop_maintain_stack_order() {
        let mut toolkit = TerminalToolkit::new();
        let container = toolkit.create_container(ScreenId(0));

        toolkit.push(container, ScreenId(1), true);
        toolkit.push(container, ScreenId(2), true);
        assert_eq!(toolkit.top_of(container), Some(ScreenId(2)));

        toolkit.pop(container, true);
        assert_eq!(toolkit.top_of(container), Some(ScreenId(1)));
    }

    #[test]
    fn test_present_completion_fires_after_the_layer_is_up() {
        let mut toolkit = TerminalToolkit::new();
        let topology = toolkit.topology();
        let container = toolkit.create_container(ScreenId(0));

        let layers_at_completion = Rc::new(Cell::new(0));
        let seen = layers_at_completion.clone();
        let observed = topology.clone();
        toolkit.present(
            container,
            ModalContent::Screen(ScreenId(1)),
            true,
            Some(Box::new(move || seen.set(observed.borrow().modals.len()))),
        );

        assert_eq!(layers_at_completion.get(), 1);
    }

    #[test]
    fn test_dismiss_removes_the_topmost_layer_for_the_host() {
        let mut toolkit = TerminalToolkit::new();
        let topology = toolkit.topology();
        let container = toolkit.create_container(ScreenId(0));

        toolkit.present(container, ModalContent::Screen(ScreenId(1)), true, None);
        toolkit.present(container, ModalContent::Screen(ScreenId(2)), true, None);
        toolkit.dismiss(container, true, None);

        let topo = topology.borrow();
        assert_eq!(topo.modals.len(), 1);
        assert_eq!(topo.modals[0].content, ModalContent::Screen(ScreenId(1)));
    }

    #[test]
    fn test_replace_root_tears_down_unrelated_topology() {
        let mut toolkit = TerminalToolkit::new();
        let topology = toolkit.topology();
        let container = toolkit.create_container(ScreenId(0));
        toolkit.push(container, ScreenId(1), true);
        toolkit.present(container, ModalContent::Screen(ScreenId(2)), true, None);
        toolkit.place_in_tab("library", ScreenId(3));

        toolkit.replace_root(ScreenId(4));

        let topo = topology.borrow();
        assert_eq!(topo.root, Some(ScreenId(4)));
        assert!(topo.stacks.is_empty());
        assert!(topo.modals.is_empty());
        assert!(topo.tabs.is_empty());
    }

    #[test]
    fn test_journal_is_bounded() {
        let mut toolkit = TerminalToolkit::new();
        let topology = toolkit.topology();
        let container = toolkit.create_container(ScreenId(0));
        for i in 0..20 {
            toolkit.push(container, ScreenId(i), true);
        }
        assert_eq!(topology.borrow().journal.len(), JOURNAL_LIMIT);
    }
}
