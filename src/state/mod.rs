use crate::config::EnvConfig;
use crate::dnd::{compute_drop, DropTarget};
use crate::models::{NavItem, DEFAULT_PATH};
use crate::tree::NavTree;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Selection plus the two form buffers (edit selected / add new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EditSession {
    pub selected: Option<u64>,
    pub edit_text: String,
    pub edit_path: String,
    pub child_text: String,
    pub child_path: String,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            selected: None,
            edit_text: String::new(),
            edit_path: DEFAULT_PATH.to_string(),
            child_text: String::new(),
            child_path: DEFAULT_PATH.to_string(),
        }
    }
}

impl EditSession {
    /// Select `id` and load its fields into the edit buffer.
    pub fn select(&mut self, tree: &NavTree, id: u64) {
        match tree.get(id) {
            Some(n) => {
                self.selected = Some(n.id);
                self.edit_text = n.text.clone();
                self.edit_path = n.display_path().to_string();
            }
            None => self.clear_selection(),
        }
    }

    /// Subsequent adds go to the top level.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected item, if it still exists in `tree`.
    pub fn selected_node<'a>(&self, tree: &'a NavTree) -> Option<&'a NavItem> {
        self.selected.and_then(|id| tree.get(id))
    }

    /// Write the edit buffer back to the selected item. No-op without a selection.
    pub fn save(&self, tree: &mut NavTree) -> bool {
        let Some(id) = self.selected_node(tree).map(|n| n.id) else {
            return false;
        };
        tree.update_node(id, &self.edit_text, &self.edit_path)
    }

    /// Add the child buffer under the selection (or at top level) and reset it.
    pub fn add(&mut self, tree: &mut NavTree) -> NavItem {
        let parent = self.selected_node(tree).map(|n| n.id);
        let item = tree.add_node(parent, &self.child_text, &self.child_path);
        self.child_text.clear();
        self.child_path = DEFAULT_PATH.to_string();
        item
    }

    pub fn heading(&self, tree: &NavTree) -> String {
        match self.selected_node(tree) {
            Some(n) => format!("Editing: \"{}\"", n.text),
            None => "Create New Top-Level Item".to_string(),
        }
    }

    pub fn add_label(&self, tree: &NavTree) -> &'static str {
        if self.selected_node(tree).is_some() {
            "Add Child"
        } else {
            "Add Top-Level Item"
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub tree: RwSignal<NavTree>,
    pub session: RwSignal<EditSession>,

    /// Expanded item ids.
    pub open_ids: RwSignal<BTreeSet<u64>>,

    pub config: EnvConfig,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(EnvConfig::new())
    }

    pub fn with_config(config: EnvConfig) -> Self {
        let tree = NavTree::seeded();

        let open_ids = if config.initial_open {
            tree.items().iter().map(|n| n.id).collect()
        } else {
            BTreeSet::new()
        };

        Self {
            tree: RwSignal::new(tree),
            session: RwSignal::new(EditSession::default()),
            open_ids: RwSignal::new(open_ids),
            config,
        }
    }

    pub fn select(&self, id: u64) {
        let tree = self.tree.get_untracked();
        self.session.update(|s| s.select(&tree, id));
    }

    pub fn clear_selection(&self) {
        self.session.update(|s| s.clear_selection());
    }

    pub fn toggle_open(&self, id: u64) {
        self.open_ids.update(|open| {
            if !open.remove(&id) {
                open.insert(id);
            }
        });
    }

    /// Move the selection to the next/previous visible row.
    pub fn select_adjacent(&self, forward: bool) {
        let current = self.session.get_untracked().selected;
        let next = self
            .tree
            .with_untracked(|t| self.open_ids.with_untracked(|open| t.step_visible(open, current, forward)));
        if let Some(id) = next {
            self.select(id);
        }
    }

    pub fn save(&self) {
        let session = self.session.get_untracked();
        let mut saved = false;
        self.tree.update(|t| saved = session.save(t));
        if saved {
            log!("saved item {:?}", session.selected);
        }
    }

    pub fn add(&self) {
        let mut session = self.session.get_untracked();
        let mut tree = self.tree.get_untracked();
        let item = session.add(&mut tree);

        // Keep the new item visible under its parent.
        if !item.is_top_level() {
            self.open_ids.update(|open| {
                open.insert(item.parent);
            });
        }

        self.tree.set(tree);
        self.session.set(session);
        log!("added item {} under {}", item.id, item.parent);
    }

    /// Adopt a list produced by a drop.
    pub fn adopt_drop(&self, items: Vec<NavItem>) {
        let count = items.len();
        self.tree.update(|t| t.reparent(items));
        log!("adopted reordered tree ({count} items)");
    }

    /// Run a drop against the current tree. Returns whether the store changed.
    pub fn apply_drop(&self, dragged: u64, target: DropTarget) -> bool {
        let all = self.tree.get_untracked();
        match compute_drop(all.items(), dragged, target) {
            Ok(next) if next.as_slice() != all.items() => {
                self.adopt_drop(next);
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("drop of item {dragged} rejected: {e}");
                false
            }
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
