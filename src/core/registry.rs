//! # Screen Registry
//!
//! Screens are owned by the [`Navigator`](crate::core::navigator::Navigator)
//! and addressed by [`ScreenId`] — an index into a slab. Parent/child
//! relationships and stack membership are plain ids resolved by lookup, so
//! the back-references of a navigation chain never form ownership cycles.
//!
//! A released id may be reused by a later screen; holding a `ScreenId`
//! across a close is a programmer error and surfaces as
//! `NavError::UnknownScreen`.

use std::fmt;

use slab::Slab;

use crate::core::screen::Screen;

/// Handle to a screen owned by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub(crate) usize);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

pub(crate) struct Registry {
    screens: Slab<Screen>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self { screens: Slab::new() }
    }

    pub(crate) fn insert(&mut self, screen: Screen) -> ScreenId {
        ScreenId(self.screens.insert(screen))
    }

    pub(crate) fn get(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.get_mut(id.0)
    }

    pub(crate) fn remove(&mut self, id: ScreenId) -> Option<Screen> {
        self.screens.try_remove(id.0)
    }

    pub(crate) fn contains(&self, id: ScreenId) -> bool {
        self.screens.contains(id.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.screens.len()
    }

    pub(crate) fn ids(&self) -> Vec<ScreenId> {
        self.screens.iter().map(|(key, _)| ScreenId(key)).collect()
    }

    /// Parent chain of `id`, nearest first, excluding `id` itself.
    ///
    /// Bounded by the registry size as a cycle guard.
    pub(crate) fn ancestors(&self, id: ScreenId) -> Vec<ScreenId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|s| s.parent);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            if chain.len() > self.screens.len() {
                break;
            }
            current = self.get(ancestor).and_then(|s| s.parent);
        }
        chain
    }

    /// Root-most ancestor of `id`, or `None` if `id` has no parent.
    pub(crate) fn root_of(&self, id: ScreenId) -> Option<ScreenId> {
        self.ancestors(id).last().copied()
    }

    pub(crate) fn is_ancestor(&self, ancestor: ScreenId, of: ScreenId) -> bool {
        self.ancestors(of).contains(&ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen::{Screen, ScreenOptions};
    use crate::test_support::Probe;

    fn blank() -> Screen {
        Screen::new(Box::new(Probe::new().content()), ScreenOptions::default())
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut reg = Registry::new();
        let id = reg.insert(blank());
        assert!(reg.contains(id));
        assert_eq!(reg.len(), 1);
        assert!(reg.get(id).is_some());
    }

    #[test]
    fn test_remove_frees_slot() {
        let mut reg = Registry::new();
        let id = reg.insert(blank());
        assert!(reg.remove(id).is_some());
        assert!(!reg.contains(id));
        assert!(reg.remove(id).is_none());
    }

    #[test]
    fn test_ancestor_chain_nearest_first() {
        let mut reg = Registry::new();
        let root = reg.insert(blank());
        let a = reg.insert(blank());
        let b = reg.insert(blank());
        reg.get_mut(a).unwrap().parent = Some(root);
        reg.get_mut(b).unwrap().parent = Some(a);

        assert_eq!(reg.ancestors(b), vec![a, root]);
        assert_eq!(reg.root_of(b), Some(root));
        assert_eq!(reg.root_of(root), None);
        assert!(reg.is_ancestor(root, b));
        assert!(!reg.is_ancestor(b, root));
    }
}
