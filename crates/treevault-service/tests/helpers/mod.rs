//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use treevault_client::{MemoryNodeApi, NodeApi};
use treevault_core::error::AppError;
use treevault_core::result::AppResult;
use treevault_core::traits::notifier::Notifier;
use treevault_core::types::NodeId;
use treevault_entity::{
    CreateNodeRequest, MoveNodeRequest, TagRequest, Tree, TreeNode, UpdateNodeRequest,
};
use treevault_service::{NodeOperations, TreeStore};

/// Notifier that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Memory backend wrapper that counts calls and fails on demand.
#[derive(Debug)]
pub struct ScriptedApi {
    inner: MemoryNodeApi,
    calls: Mutex<HashMap<&'static str, usize>>,
    tree_fetches: AtomicUsize,
    failures: Mutex<HashMap<&'static str, AppError>>,
}

impl ScriptedApi {
    pub fn new(inner: MemoryNodeApi) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
            tree_fetches: AtomicUsize::new(0),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make the next call to `operation` fail with `err`.
    pub fn fail_next(&self, operation: &'static str, err: AppError) {
        self.failures.lock().unwrap().insert(operation, err);
    }

    pub fn tree_fetches(&self) -> usize {
        self.tree_fetches.load(Ordering::SeqCst)
    }

    pub fn calls(&self, operation: &'static str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    fn enter(&self, operation: &'static str) -> AppResult<()> {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        match self.failures.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NodeApi for ScriptedApi {
    async fn get_tree(&self) -> AppResult<Tree> {
        self.tree_fetches.fetch_add(1, Ordering::SeqCst);
        self.enter("get_tree")?;
        self.inner.get_tree().await
    }

    async fn get_node(&self, id: &NodeId) -> AppResult<TreeNode> {
        self.enter("get_node")?;
        self.inner.get_node(id).await
    }

    async fn create_node(&self, request: &CreateNodeRequest) -> AppResult<TreeNode> {
        self.enter("create_node")?;
        self.inner.create_node(request).await
    }

    async fn update_node(&self, id: &NodeId, request: &UpdateNodeRequest) -> AppResult<TreeNode> {
        self.enter("update_node")?;
        self.inner.update_node(id, request).await
    }

    async fn delete_node(&self, id: &NodeId) -> AppResult<()> {
        self.enter("delete_node")?;
        self.inner.delete_node(id).await
    }

    async fn move_node(&self, id: &NodeId, request: &MoveNodeRequest) -> AppResult<TreeNode> {
        self.enter("move_node")?;
        self.inner.move_node(id, request).await
    }

    async fn add_tag(&self, id: &NodeId, request: &TagRequest) -> AppResult<()> {
        self.enter("add_tag")?;
        self.inner.add_tag(id, request).await
    }

    async fn remove_tag(&self, id: &NodeId, key: &str) -> AppResult<()> {
        self.enter("remove_tag")?;
        self.inner.remove_tag(id, key).await
    }
}

/// Operations wired to a seeded memory backend.
pub struct TestTree {
    pub ops: NodeOperations,
    pub api: Arc<ScriptedApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: TreeStore,
}

impl TestTree {
    /// Backend seeded with:
    ///
    /// ```text
    /// root
    /// ├── a.txt      (a)
    /// ├── docs/      (docs)
    /// │   └── c.txt  (c)
    /// └── d.txt      (d)
    /// ```
    pub fn new() -> Self {
        Self::with_root(
            TreeNode::folder("root", "root").with_children([
                TreeNode::file("a", "a.txt"),
                TreeNode::folder("docs", "docs").with_children([TreeNode::file("c", "c.txt")]),
                TreeNode::file("d", "d.txt"),
            ]),
        )
    }

    pub fn with_root(root: TreeNode) -> Self {
        let api = Arc::new(ScriptedApi::new(MemoryNodeApi::with_tree(&root)));
        let notifier = Arc::new(RecordingNotifier::default());
        let store = TreeStore::new();
        let ops = NodeOperations::new(api.clone(), store.clone(), notifier.clone());
        Self {
            ops,
            api,
            notifier,
            store,
        }
    }

    /// Seeded backend with the mirror already loaded.
    pub async fn loaded() -> Self {
        let test = Self::new();
        test.ops.load_tree().await.expect("initial load");
        test
    }

    pub fn tree(&self) -> Tree {
        self.store.tree().expect("tree loaded")
    }

    /// Ids of `parent`'s children in mirror order.
    pub fn child_ids(&self, parent: &str) -> Vec<String> {
        let tree = self.tree();
        let parent = treevault_service::locator::find_by_id(&tree, &NodeId::from(parent))
            .expect("parent in mirror");
        parent
            .children
            .iter()
            .map(|child| child.id.as_str().to_string())
            .collect()
    }
}

pub fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

pub fn transport_error() -> AppError {
    AppError::transport("connection refused")
}

pub fn backend_error(detail: &str) -> AppError {
    AppError::validation("request rejected").with_detail(detail)
}
