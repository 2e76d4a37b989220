//! The navigation branch: menu ids from the root to the current menu.

use crate::menu::table::{MenuError, MenuTable};

/// Never empty. The root pushed by [`Branch::new`] stays at the bottom for
/// the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    ids: Vec<&'static str>,
}

impl Branch {
    pub fn new(root: &'static str) -> Self {
        Self { ids: vec![root] }
    }

    pub fn current(&self) -> &'static str {
        // non-empty by construction
        self.ids[self.ids.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[&'static str] {
        &self.ids
    }

    pub fn push(&mut self, id: &'static str) {
        self.ids.push(id);
    }

    /// Drop the current menu. At the root this does nothing and returns false.
    pub fn pop(&mut self) -> bool {
        if self.ids.len() > 1 {
            self.ids.pop();
            true
        } else {
            false
        }
    }

    /// Titles of every menu on the branch, root first.
    pub fn titles(&self, table: &MenuTable) -> Result<Vec<&'static str>, MenuError> {
        self.ids
            .iter()
            .map(|id| table.lookup(id).map(|def| def.title))
            .collect()
    }
}
