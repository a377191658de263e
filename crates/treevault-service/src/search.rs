//! Case-insensitive name filter for tree listings.

use std::sync::Arc;

use treevault_entity::TreeNode;

/// Whether `node` or anything below it has a name containing `query`,
/// ignoring case. An empty query matches everything.
pub fn matches_query(node: &TreeNode, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    subtree_matches(node, &needle)
}

/// The children worth showing for `query`.
pub fn filter_children<'a>(children: &'a [Arc<TreeNode>], query: &str) -> Vec<&'a Arc<TreeNode>> {
    children
        .iter()
        .filter(|child| matches_query(child, query))
        .collect()
}

fn subtree_matches(node: &TreeNode, needle: &str) -> bool {
    node.name.to_lowercase().contains(needle)
        || node.children.iter().any(|child| subtree_matches(child, needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> TreeNode {
        TreeNode::folder("docs", "Docs").with_children([
            TreeNode::file("r", "Report.PDF"),
            TreeNode::folder("img", "images").with_children([TreeNode::file("c", "cat.png")]),
        ])
    }

    #[test]
    fn test_matches_own_name_ignoring_case() {
        assert!(matches_query(&docs(), "DOC"));
        assert!(matches_query(&docs(), "report"));
    }

    #[test]
    fn test_matches_through_descendants() {
        assert!(matches_query(&docs(), "cat"));
        assert!(!matches_query(&docs(), "dog"));
    }

    #[test]
    fn test_blank_query_matches_all() {
        assert!(matches_query(&TreeNode::file("x", "x"), "   "));
    }

    #[test]
    fn test_filter_children_keeps_ancestors_of_hits() {
        let root = TreeNode::folder("root", "root")
            .with_children([docs(), TreeNode::file("n", "notes.txt")]);
        let shown: Vec<_> = filter_children(&root.children, "png")
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(shown, ["docs"]);
    }
}
