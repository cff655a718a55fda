use crate::models::{NavItem, ROOT_ID};
use crate::tree::is_descendant_in;
use thiserror::Error;

/// Where a dragged row lands relative to the row under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum DropPlacement {
    Before,
    Inside,
    After,
}

impl DropPlacement {
    /// Pick a placement from the pointer's offset inside the row.
    ///
    /// The outer quarters insert as a sibling; the middle nests.
    pub fn from_offset(offset_y: f64, height: f64) -> Self {
        if height <= 0.0 {
            return DropPlacement::Inside;
        }
        let ratio = offset_y / height;
        if ratio < 0.25 {
            DropPlacement::Before
        } else if ratio > 0.75 {
            DropPlacement::After
        } else {
            DropPlacement::Inside
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DropTarget {
    Node { id: u64, placement: DropPlacement },
    /// The empty area below the tree.
    RootEnd,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum DropError {
    #[error("unknown item {0}")]
    UnknownNode(u64),
    #[error("cannot drop an item onto itself")]
    SelfDrop,
    #[error("cannot move item {dragged} into its own descendant {target}")]
    Cycle { dragged: u64, target: u64 },
    #[error("item {0} does not accept children")]
    NotDroppable(u64),
}

/// Compute the full reordered list after dropping `dragged_id` on `target`.
///
/// The input is left untouched; callers adopt the returned list wholesale.
pub(crate) fn compute_drop(
    all: &[NavItem],
    dragged_id: u64,
    target: DropTarget,
) -> Result<Vec<NavItem>, DropError> {
    let from_idx = all
        .iter()
        .position(|n| n.id == dragged_id)
        .ok_or(DropError::UnknownNode(dragged_id))?;

    let (new_parent, anchor) = match target {
        DropTarget::RootEnd => {
            // Already top level: the root area is its current parent.
            if all[from_idx].parent == ROOT_ID {
                return Ok(all.to_vec());
            }
            (ROOT_ID, None)
        }
        DropTarget::Node { id, placement } => {
            if id == dragged_id {
                return Err(DropError::SelfDrop);
            }
            let t = all
                .iter()
                .find(|n| n.id == id)
                .ok_or(DropError::UnknownNode(id))?;

            match placement {
                DropPlacement::Inside => {
                    if !t.droppable {
                        return Err(DropError::NotDroppable(id));
                    }
                    if is_descendant_in(all, id, dragged_id) {
                        return Err(DropError::Cycle {
                            dragged: dragged_id,
                            target: id,
                        });
                    }
                    // Dropping onto the current parent leaves everything as is.
                    if all[from_idx].parent == id {
                        return Ok(all.to_vec());
                    }
                    (id, None)
                }
                DropPlacement::Before | DropPlacement::After => {
                    if t.parent != ROOT_ID
                        && (t.parent == dragged_id || is_descendant_in(all, t.parent, dragged_id))
                    {
                        return Err(DropError::Cycle {
                            dragged: dragged_id,
                            target: id,
                        });
                    }
                    (t.parent, Some((id, placement == DropPlacement::After)))
                }
            }
        }
    };

    let mut next = all.to_vec();
    let mut moved = next.remove(from_idx);
    moved.parent = new_parent;

    let insert_idx = match anchor {
        Some((anchor_id, after)) => {
            let aidx = next
                .iter()
                .position(|n| n.id == anchor_id)
                .ok_or(DropError::UnknownNode(anchor_id))?;
            if after {
                aidx + 1
            } else {
                aidx
            }
        }
        None => next.len(),
    };
    next.insert(insert_idx, moved);

    Ok(next)
}
