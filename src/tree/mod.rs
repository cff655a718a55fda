use crate::models::{seed_items, NavItem, DEFAULT_PATH, ROOT_ID};
use std::collections::BTreeSet;

/// Canonical flat list of navigation items.
///
/// Parent links are plain ids; siblings render in collection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NavTree {
    items: Vec<NavItem>,
}

impl NavTree {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    pub fn seeded() -> Self {
        Self::new(seed_items())
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: u64) -> Option<&NavItem> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn next_id(&self) -> u64 {
        let max = self.items.iter().map(|n| n.id).max().unwrap_or(ROOT_ID);
        if let Some(id) = max.checked_add(1) {
            return id;
        }

        // Counter exhausted: take the lowest id not in use.
        let used: BTreeSet<u64> = self.items.iter().map(|n| n.id).collect();
        (ROOT_ID + 1..u64::MAX)
            .find(|id| !used.contains(id))
            .unwrap_or(u64::MAX)
    }

    /// Append a new item under `parent` (top level when `None`).
    pub fn add_node(&mut self, parent: Option<u64>, text: &str, path: &str) -> NavItem {
        let path = if path.is_empty() { DEFAULT_PATH } else { path };
        let item = NavItem::new(self.next_id(), parent.unwrap_or(ROOT_ID), text, path);
        self.items.push(item.clone());
        item
    }

    /// Replace text and path of the item with `id`. Returns false when nothing matched.
    pub fn update_node(&mut self, id: u64, text: &str, path: &str) -> bool {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            n.text = text.to_string();
            n.path = path.to_string();
            true
        } else {
            false
        }
    }

    /// Adopt a reordered list wholesale. Parent links and order are trusted.
    pub fn reparent(&mut self, items: Vec<NavItem>) {
        self.items = items;
    }

    pub fn children_of(&self, parent: u64) -> Vec<&NavItem> {
        self.items.iter().filter(|n| n.parent == parent).collect()
    }

    pub fn roots(&self) -> Vec<&NavItem> {
        self.children_of(ROOT_ID)
    }

    /// Distance from the root sentinel; top-level items are depth 0.
    pub fn depth_of(&self, id: u64) -> usize {
        depth_in(&self.items, id)
    }

    pub fn is_descendant(&self, id: u64, ancestor: u64) -> bool {
        is_descendant_in(&self.items, id, ancestor)
    }

    /// Pre-order ids of the rows shown when only `open` items are expanded.
    pub fn visible_order(&self, open: &BTreeSet<u64>) -> Vec<u64> {
        fn walk(tree: &NavTree, parent: u64, open: &BTreeSet<u64>, out: &mut Vec<u64>) {
            for n in tree.children_of(parent) {
                out.push(n.id);
                if open.contains(&n.id) {
                    walk(tree, n.id, open, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, ROOT_ID, open, &mut out);
        out
    }

    /// Neighbour of `current` in the visible row order, for keyboard stepping.
    ///
    /// Without a current row (or when it is hidden) the first/last visible row is returned.
    pub fn step_visible(&self, open: &BTreeSet<u64>, current: Option<u64>, forward: bool) -> Option<u64> {
        let order = self.visible_order(open);
        let pos = current.and_then(|id| order.iter().position(|x| *x == id));
        match (pos, forward) {
            (None, true) => order.first().copied(),
            (None, false) => order.last().copied(),
            (Some(i), true) => order.get(i + 1).or(order.last()).copied(),
            (Some(i), false) => order.get(i.saturating_sub(1)).copied(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.items)
    }
}

pub(crate) fn depth_in(items: &[NavItem], id: u64) -> usize {
    let mut depth = 0;
    let mut cur = items.iter().find(|n| n.id == id);
    // Bounded by the list length so a malformed parent chain cannot spin.
    while let Some(n) = cur {
        if n.parent == ROOT_ID || depth >= items.len() {
            break;
        }
        depth += 1;
        cur = items.iter().find(|x| x.id == n.parent);
    }
    depth
}

pub(crate) fn is_descendant_in(items: &[NavItem], id: u64, ancestor: u64) -> bool {
    let mut steps = 0;
    let mut cur = items.iter().find(|n| n.id == id).map(|n| n.parent);
    while let Some(p) = cur {
        if p == ancestor {
            return true;
        }
        if p == ROOT_ID || steps >= items.len() {
            return false;
        }
        steps += 1;
        cur = items.iter().find(|n| n.id == p).map(|n| n.parent);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&NavItem]) -> Vec<String> {
        items.iter().map(|n| n.text.clone()).collect()
    }

    #[test]
    fn test_add_top_level_node() {
        let mut tree = NavTree::seeded();
        let item = tree.add_node(None, "Contact", "/contact");
        assert_eq!(item.parent, ROOT_ID);
        assert_eq!(item.path, "/contact");
        assert!(item.droppable);
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.items().last(), Some(&item));
    }

    #[test]
    fn test_add_child_defaults_path() {
        let mut tree = NavTree::seeded();
        let item = tree.add_node(Some(2), "Cloud", "");
        assert_eq!(tree.len(), 7);
        assert_eq!(item.parent, 2);
        assert_eq!(item.text, "Cloud");
        assert_eq!(item.path, "#");
        assert_eq!(
            texts(&tree.children_of(2)),
            vec!["Web Dev", "Mobile Dev", "Cloud"]
        );
    }

    #[test]
    fn test_add_accepts_empty_and_duplicate_text() {
        let mut tree = NavTree::seeded();
        let a = tree.add_node(None, "", "#");
        let b = tree.add_node(None, "Home", "#");
        assert_eq!(a.text, "");
        assert_eq!(b.text, "Home");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut tree = NavTree::new(vec![]);
        let first = tree.add_node(None, "a", "");
        assert_eq!(first.id, 1);

        let mut tree = NavTree::seeded();
        let mut seen = tree.items().iter().map(|n| n.id).collect::<BTreeSet<_>>();
        for i in 0..20 {
            let item = tree.add_node(Some(1), &format!("n{i}"), "");
            assert!(seen.insert(item.id), "duplicate id {}", item.id);
        }
    }

    #[test]
    fn test_ids_unique_after_reparent_drops_max() {
        let mut tree = NavTree::seeded();
        let mut items = tree.items().to_vec();
        items.retain(|n| n.id != 6);
        tree.reparent(items);
        let item = tree.add_node(None, "x", "");
        assert!(tree.items().iter().filter(|n| n.id == item.id).count() == 1);
    }

    #[test]
    fn test_next_id_when_counter_exhausted() {
        let mut tree = NavTree::new(vec![
            NavItem::new(1, ROOT_ID, "a", "#"),
            NavItem::new(u64::MAX, ROOT_ID, "b", "#"),
        ]);
        let item = tree.add_node(None, "c", "");
        assert_eq!(item.id, 2);
        assert_eq!(tree.items().iter().filter(|n| n.id == item.id).count(), 1);
    }

    #[test]
    fn test_is_empty() {
        assert!(NavTree::new(vec![]).is_empty());
        assert!(!NavTree::seeded().is_empty());
    }

    #[test]
    fn test_update_changes_only_target() {
        let mut tree = NavTree::seeded();
        let before = tree.clone();
        assert!(tree.update_node(3, "Web Development", "/web"));

        for (old, new) in before.items().iter().zip(tree.items()) {
            if old.id == 3 {
                assert_eq!(new.text, "Web Development");
                assert_eq!(new.path, "/web");
                assert_eq!(new.parent, old.parent);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_keeps_empty_path_verbatim() {
        let mut tree = NavTree::seeded();
        assert!(tree.update_node(1, "Home", ""));
        let n = tree.get(1).expect("item 1 exists");
        assert_eq!(n.path, "");
        assert_eq!(n.display_path(), "#");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut tree = NavTree::seeded();
        let before = tree.clone();
        assert!(!tree.update_node(42, "x", "y"));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_reparent_replaces_contents_exactly() {
        let mut tree = NavTree::seeded();
        let next = vec![
            NavItem::new(5, ROOT_ID, "About", "#"),
            NavItem::new(1, 5, "Home", "#"),
        ];
        tree.reparent(next.clone());
        assert_eq!(tree.items(), next.as_slice());
    }

    #[test]
    fn test_depth_of() {
        let mut tree = NavTree::seeded();
        let cloud = tree.add_node(Some(3), "Cloud", "");
        assert_eq!(tree.depth_of(1), 0);
        assert_eq!(tree.depth_of(3), 1);
        assert_eq!(tree.depth_of(cloud.id), 2);
        assert_eq!(tree.depth_of(99), 0);
    }

    #[test]
    fn test_depth_of_terminates_on_cycle() {
        let tree = NavTree::new(vec![
            NavItem::new(1, 2, "a", "#"),
            NavItem::new(2, 1, "b", "#"),
        ]);
        assert!(tree.depth_of(1) <= 2);
        assert!(is_descendant_in(tree.items(), 1, 2));
        assert!(!is_descendant_in(tree.items(), 1, 7));
    }

    #[test]
    fn test_is_descendant() {
        let mut tree = NavTree::seeded();
        let cloud = tree.add_node(Some(3), "Cloud", "");
        assert!(tree.is_descendant(cloud.id, 2));
        assert!(tree.is_descendant(3, 2));
        assert!(!tree.is_descendant(2, 3));
        assert!(!tree.is_descendant(6, 2));
    }

    #[test]
    fn test_visible_order_respects_open_set() {
        let tree = NavTree::seeded();
        let all: BTreeSet<u64> = tree.items().iter().map(|n| n.id).collect();
        assert_eq!(tree.visible_order(&all), vec![1, 2, 3, 4, 5, 6]);

        let only_about: BTreeSet<u64> = [5].into_iter().collect();
        assert_eq!(tree.visible_order(&only_about), vec![1, 2, 5, 6]);
        assert_eq!(tree.visible_order(&BTreeSet::new()), vec![1, 2, 5]);
    }

    #[test]
    fn test_step_visible() {
        let tree = NavTree::seeded();
        let open: BTreeSet<u64> = [2].into_iter().collect();
        // Visible: 1, 2, 3, 4, 5
        assert_eq!(tree.step_visible(&open, None, true), Some(1));
        assert_eq!(tree.step_visible(&open, None, false), Some(5));
        assert_eq!(tree.step_visible(&open, Some(2), true), Some(3));
        assert_eq!(tree.step_visible(&open, Some(4), true), Some(5));
        assert_eq!(tree.step_visible(&open, Some(5), true), Some(5));
        assert_eq!(tree.step_visible(&open, Some(1), false), Some(1));
        // Hidden row restarts from the edge.
        assert_eq!(tree.step_visible(&open, Some(6), true), Some(1));
        assert_eq!(NavTree::new(vec![]).step_visible(&open, None, true), None);
    }

    #[test]
    fn test_to_json_pretty_lists_items() {
        let tree = NavTree::seeded();
        let json = tree.to_json_pretty().expect("should serialize");
        let v: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(v.as_array().map(|a| a.len()), Some(6));
        assert_eq!(v[1]["text"], "Services");
        assert_eq!(v[2]["parent"], 2);
    }
}
