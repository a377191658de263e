//! Pure path-copying transforms over a [`Tree`].
//!
//! Each function returns `None` when the target does not exist, meaning the
//! tree is unchanged. On success only the chain from the root down to the
//! touched node is rebuilt; every other subtree is the same `Arc` as before.

use std::sync::Arc;

use treevault_core::types::NodeId;
use treevault_entity::{Tree, TreeNode};

use crate::locator;

/// Replace node `id` with `updater(node)`.
pub fn update_node<F>(tree: &Tree, id: &NodeId, updater: F) -> Option<Tree>
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    let mut updater = Some(updater);
    update_in(&tree.root, id, &mut updater).map(|root| Tree { root })
}

/// Append `node` to the children of `parent_id`, then order the children
/// by position (stable; missing positions sort as 0). On equal positions the
/// existing sibling stays first.
///
/// If a node with the same id is already in the tree it is merged in place
/// instead, so an id never appears twice.
pub fn add_node(tree: &Tree, parent_id: &NodeId, node: TreeNode) -> Option<Tree> {
    if locator::find_by_id(tree, &node.id).is_some() {
        return update_node(tree, &node.id, |existing| existing.merged_with(&node));
    }

    update_node(tree, parent_id, move |parent| {
        let mut parent = parent.clone();
        parent.children.push(Arc::new(node));
        parent.children.sort_by_key(|child| child.sort_position());
        parent
    })
}

/// Drop `id` from every children list it appears in, at any depth.
pub fn remove_node(tree: &Tree, id: &NodeId) -> Option<Tree> {
    remove_in(&tree.root, id).map(|root| Tree { root })
}

fn update_in<F>(node: &Arc<TreeNode>, id: &NodeId, updater: &mut Option<F>) -> Option<Arc<TreeNode>>
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    if &node.id == id {
        let updater = updater.take()?;
        return Some(Arc::new(updater(node)));
    }

    for (index, child) in node.children.iter().enumerate() {
        if let Some(replaced) = update_in(child, id, updater) {
            let mut copy = TreeNode::clone(node);
            copy.children[index] = replaced;
            return Some(Arc::new(copy));
        }
    }

    None
}

fn remove_in(node: &Arc<TreeNode>, id: &NodeId) -> Option<Arc<TreeNode>> {
    let mut changed = false;
    let mut children = Vec::with_capacity(node.children.len());

    for child in &node.children {
        if &child.id == id {
            changed = true;
            continue;
        }
        match remove_in(child, id) {
            Some(pruned) => {
                changed = true;
                children.push(pruned);
            }
            None => children.push(Arc::clone(child)),
        }
    }

    if !changed {
        return None;
    }

    let mut copy = TreeNode::clone(node);
    copy.children = children;
    Some(Arc::new(copy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new(TreeNode::folder("root", "root").with_children([
            TreeNode::folder("docs", "docs").with_children([
                TreeNode::file("a", "a.txt"),
                TreeNode::folder("deep", "deep").with_children([TreeNode::file("z", "z.txt")]),
            ]),
            TreeNode::folder("media", "media").with_children([TreeNode::file("m", "m.png")]),
        ]))
    }

    fn id(raw: &str) -> NodeId {
        NodeId::from(raw)
    }

    #[test]
    fn test_update_rebuilds_only_ancestor_chain() {
        let tree = sample();
        let updated = update_node(&tree, &id("z"), |node| {
            let mut node = node.clone();
            node.name = "renamed.txt".to_string();
            node
        })
        .expect("found");

        assert_eq!(updated.root.children[0].children[1].children[0].name, "renamed.txt");
        assert!(!Arc::ptr_eq(&tree.root, &updated.root));
        assert!(!Arc::ptr_eq(&tree.root.children[0], &updated.root.children[0]));
        assert!(Arc::ptr_eq(&tree.root.children[1], &updated.root.children[1]));
        assert!(Arc::ptr_eq(
            &tree.root.children[0].children[0],
            &updated.root.children[0].children[0]
        ));
    }

    #[test]
    fn test_update_missing_id_is_none() {
        let tree = sample();
        let mut called = false;
        let result = update_node(&tree, &id("ghost"), |node| {
            called = true;
            node.clone()
        });
        assert!(result.is_none());
        assert!(!called);
    }

    #[test]
    fn test_update_root() {
        let tree = sample();
        let updated = update_node(&tree, &id("root"), |node| {
            node.clone().with_tag("scope", "all")
        })
        .expect("root");
        assert_eq!(updated.root.tags.get("scope").map(String::as_str), Some("all"));
        assert!(Arc::ptr_eq(&tree.root.children[0], &updated.root.children[0]));
    }

    #[test]
    fn test_add_sorts_by_position() {
        let tree = sample();
        let inserted = TreeNode::file("b", "b.txt").with_parent("docs").with_position(1);
        let updated = add_node(&tree, &id("docs"), inserted).expect("parent");

        let docs = &updated.root.children[0];
        let order: Vec<_> = docs.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["a", "deep", "b"]);
    }

    #[test]
    fn test_add_keeps_existing_sibling_first_on_equal_position() {
        let tree = Tree::new(TreeNode::folder("root", "root").with_children([
            TreeNode::file("x", "x.txt").with_position(0),
            TreeNode::file("y", "y.txt").with_position(1),
        ]));
        let updated = add_node(&tree, &id("root"), TreeNode::file("n", "n.txt").with_position(1))
            .expect("parent");
        let order: Vec<_> = updated.root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["x", "y", "n"]);
    }

    #[test]
    fn test_add_existing_id_merges_in_place() {
        let tree = sample();
        let again = TreeNode::file("z", "z2.txt").with_parent("deep");
        let updated = add_node(&tree, &id("docs"), again).expect("present");

        let docs = &updated.root.children[0];
        let order: Vec<_> = docs.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["a", "deep"]);
        let z = locator::find_by_id(&updated, &id("z")).expect("still there");
        assert_eq!(z.name, "z2.txt");
        assert_eq!(docs.children[1].child_count(), 1);
    }

    #[test]
    fn test_add_without_position_sorts_as_zero() {
        let tree = Tree::new(
            TreeNode::folder("root", "root")
                .with_children([TreeNode::file("p", "p.txt").with_position(1)]),
        );
        let updated = add_node(&tree, &id("root"), TreeNode::file("n", "n.txt")).expect("parent");
        let order: Vec<_> = updated.root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["n", "p"]);
    }

    #[test]
    fn test_add_under_leaf_starts_children() {
        let tree = sample();
        let grown = add_node(&tree, &id("deep"), TreeNode::file("y", "y.txt"))
            .and_then(|t| add_node(&t, &id("y"), TreeNode::file("x", "x.txt")));
        let tree = grown.expect("parents present");
        let deep = &tree.root.children[0].children[1];
        assert_eq!(deep.children[1].id, id("y"));
        let y = locator::find_by_id(&tree, &id("y")).expect("inserted");
        assert_eq!(y.child_count(), 1);
    }

    #[test]
    fn test_add_to_missing_parent_is_none() {
        assert!(add_node(&sample(), &id("ghost"), TreeNode::file("x", "x")).is_none());
    }

    #[test]
    fn test_remove_nested_and_shares_siblings() {
        let tree = sample();
        let updated = remove_node(&tree, &id("z")).expect("present");
        assert_eq!(updated.root.children[0].children[1].child_count(), 0);
        assert!(Arc::ptr_eq(&tree.root.children[1], &updated.root.children[1]));
    }

    #[test]
    fn test_remove_every_occurrence() {
        let duplicate = TreeNode::file("dup", "dup");
        let tree = Tree::new(TreeNode::folder("root", "root").with_children([
            duplicate.clone(),
            TreeNode::folder("f", "f").with_children([duplicate]),
        ]));
        let updated = remove_node(&tree, &id("dup")).expect("present");
        assert_eq!(updated.root.child_count(), 1);
        assert_eq!(updated.root.children[0].child_count(), 0);
    }

    #[test]
    fn test_remove_missing_or_root_is_none() {
        let tree = sample();
        assert!(remove_node(&tree, &id("ghost")).is_none());
        assert!(remove_node(&tree, &id("root")).is_none());
    }
}
