use serde::{Deserialize, Serialize};

/// Parent value of top-level items.
pub(crate) const ROOT_ID: u64 = 0;

/// Placeholder navigation target for items without a path.
pub(crate) const DEFAULT_PATH: &str = "#";

/// One entry of the navigation tree.
///
/// Field names follow the tree-view node model (`id`, `parent`, `text`,
/// `droppable`) so the flat list can be handed to/from a drop computation as-is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NavItem {
    pub id: u64,

    /// Owning item id, or [`ROOT_ID`] for top-level items.
    pub parent: u64,

    pub text: String,

    #[serde(default)]
    pub path: String,

    /// Whether the item accepts children (renders an expand affordance).
    #[serde(default)]
    pub droppable: bool,
}

impl NavItem {
    pub fn new(id: u64, parent: u64, text: &str, path: &str) -> Self {
        Self {
            id,
            parent,
            text: text.to_string(),
            path: path.to_string(),
            droppable: true,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent == ROOT_ID
    }

    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            DEFAULT_PATH
        } else {
            &self.path
        }
    }
}

pub(crate) fn seed_items() -> Vec<NavItem> {
    vec![
        NavItem::new(1, ROOT_ID, "Home", DEFAULT_PATH),
        NavItem::new(2, ROOT_ID, "Services", DEFAULT_PATH),
        NavItem::new(3, 2, "Web Dev", DEFAULT_PATH),
        NavItem::new(4, 2, "Mobile Dev", DEFAULT_PATH),
        NavItem::new(5, ROOT_ID, "About", DEFAULT_PATH),
        NavItem::new(6, 5, "Team", DEFAULT_PATH),
    ]
}
