//! Drag-and-drop gestures resolved against a loaded mirror.

mod helpers;

use std::sync::Arc;

use treevault_entity::TreeNode;
use treevault_service::{DragAndDrop, DropPosition, MoveCommand, locator};

use helpers::{TestTree, id};

fn flat_siblings() -> TestTree {
    TestTree::with_root(TreeNode::folder("root", "root").with_children([
        TreeNode::file("A", "A"),
        TreeNode::file("B", "B"),
        TreeNode::file("C", "C"),
    ]))
}

#[tokio::test]
async fn test_into_empty_folder_targets_index_zero() {
    let test = TestTree::with_root(TreeNode::folder("root", "root").with_children([
        TreeNode::file("A", "A"),
        TreeNode::folder("B", "B"),
    ]));
    test.ops.load_tree().await.unwrap();

    let command = test
        .ops
        .drop_node(&id("A"), &id("B"), DropPosition::Into)
        .await
        .unwrap();

    assert_eq!(
        command,
        Some(MoveCommand {
            node_id: id("A"),
            new_parent_id: id("B"),
            position: 0,
        })
    );
    assert_eq!(test.child_ids("B"), ["A"]);
}

#[tokio::test]
async fn test_before_first_sibling_targets_index_zero() {
    let test = flat_siblings();
    test.ops.load_tree().await.unwrap();

    let command = test
        .ops
        .drop_node(&id("C"), &id("A"), DropPosition::Before)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(command.new_parent_id, id("root"));
    assert_eq!(command.position, 0);
    assert_eq!(test.child_ids("root"), ["C", "A", "B"]);
}

#[tokio::test]
async fn test_after_later_sibling_compensates_index() {
    let test = flat_siblings();
    test.ops.load_tree().await.unwrap();
    let fetches = test.api.tree_fetches();

    let command = test
        .ops
        .drop_node(&id("A"), &id("C"), DropPosition::After)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(command.position, 2);
    assert_eq!(test.child_ids("root"), ["B", "C", "A"]);
    assert_eq!(test.api.tree_fetches(), fetches + 1);
    assert_eq!(test.notifier.successes(), ["Node moved successfully"]);
}

#[tokio::test]
async fn test_self_drop_is_silent() {
    let test = TestTree::loaded().await;

    let command = test
        .ops
        .drop_node(&id("docs"), &id("docs"), DropPosition::Into)
        .await
        .unwrap();

    assert!(command.is_none());
    assert_eq!(test.api.calls("move_node"), 0);
    assert!(test.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_cyclic_drop_never_reaches_backend() {
    let test = TestTree::with_root(TreeNode::folder("root", "root").with_children([
        TreeNode::folder("X", "X").with_children([
            TreeNode::folder("Y", "Y").with_children([TreeNode::file("W", "W")]),
        ]),
    ]));
    test.ops.load_tree().await.unwrap();
    let before = test.tree();

    test.ops
        .drop_node(&id("X"), &id("Y"), DropPosition::Into)
        .await
        .unwrap();
    test.ops
        .drop_node(&id("X"), &id("W"), DropPosition::Before)
        .await
        .unwrap();

    assert_eq!(test.api.calls("move_node"), 0);
    assert!(Arc::ptr_eq(&before.root, &test.tree().root));
    assert_eq!(
        test.notifier.errors(),
        [
            "Cannot move a folder into itself or its descendants",
            "Cannot move a folder into itself or its descendants",
        ]
    );
}

#[tokio::test]
async fn test_reorder_against_root_is_rejected() {
    let test = TestTree::loaded().await;

    let command = test
        .ops
        .drop_node(&id("a"), &id("root"), DropPosition::After)
        .await
        .unwrap();

    assert!(command.is_none());
    assert_eq!(test.api.calls("move_node"), 0);
    assert_eq!(test.notifier.errors(), ["Cannot reorder root level nodes"]);
}

#[tokio::test]
async fn test_into_file_is_rejected() {
    let test = TestTree::loaded().await;

    test.ops
        .drop_node(&id("a"), &id("d"), DropPosition::Into)
        .await
        .unwrap();

    assert_eq!(test.notifier.errors(), ["Can only move nodes into folders"]);
}

#[tokio::test]
async fn test_unknown_nodes_report_failed_position() {
    let test = TestTree::loaded().await;

    let command = test
        .ops
        .drop_node(&id("ghost"), &id("docs"), DropPosition::Into)
        .await
        .unwrap();

    assert!(command.is_none());
    assert_eq!(test.notifier.errors(), ["Failed to determine drop position"]);
}

#[tokio::test]
async fn test_pointer_gesture_end_to_end() {
    let test = TestTree::loaded().await;
    let tree = test.tree();
    let a = locator::find_by_id(&tree, &id("a")).unwrap();
    let docs = locator::find_by_id(&tree, &id("docs")).unwrap();
    let c = locator::find_by_id(&tree, &id("c")).unwrap();

    let mut dnd = DragAndDrop::new();
    dnd.drag_start(a);
    assert_eq!(dnd.drag_over(&docs, 12.0, 24.0), Some(DropPosition::Into));
    assert_eq!(dnd.drag_over(&c, 20.0, 24.0), Some(DropPosition::After));

    let parent = locator::find_parent(&tree, &c.id);
    let ops = &test.ops;
    let command = dnd
        .handle_drop(&c, parent.as_deref(), test.notifier.as_ref(), |command| async move {
            ops.move_node(&command.node_id, &command.new_parent_id, command.position)
                .await
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(command.new_parent_id, id("docs"));
    assert_eq!(command.position, 1);
    assert_eq!(test.child_ids("docs"), ["c", "a"]);
    assert!(!dnd.is_dragging());
}

#[tokio::test]
async fn test_failed_move_propagates_and_notifies_once() {
    let test = TestTree::loaded().await;
    test.api
        .fail_next("move_node", helpers::backend_error("Target parent must be a folder"));

    let err = test
        .ops
        .drop_node(&id("a"), &id("docs"), DropPosition::Into)
        .await
        .unwrap_err();

    assert_eq!(err.detail.as_deref(), Some("Target parent must be a folder"));
    assert_eq!(test.notifier.errors(), ["Target parent must be a folder"]);
    assert!(test.notifier.successes().is_empty());
}
