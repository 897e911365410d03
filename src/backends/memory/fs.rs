//! Core FileSystem implementation.

use std::fmt;
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{FsError, FsResult};
use crate::types::{NodeId, NodeKind, Stat};

use super::node::{Node, NodeData};

/// Rooted tree of files and folders.
///
/// Every node lives in an arena owned by the tree. Folders own their
/// children through the id lists in their payload; `parent` links are
/// plain back-references. The arena never shrinks, so any `NodeId` the
/// tree handed out stays addressable. Detached nodes simply become
/// unreachable from the root.
#[derive(Debug, Clone)]
pub struct FileSystem {
    nodes: Vec<Node>,
    root: NodeId,
    /// Sum of the declared sizes reachable from the root
    total: u64,
    case_sensitive: bool,
}

impl FileSystem {
    /// Create a tree holding only a root folder
    pub fn new(root_name: impl Into<String>, created: SystemTime) -> Self {
        let root = Node::new(root_name.into(), created, 0, NodeKind::Folder, None);
        Self {
            nodes: vec![root],
            root: NodeId(0),
            total: 0,
            case_sensitive: false,
        }
    }

    pub fn from_config(config: &StoreConfig) -> FsResult<Self> {
        config.validate()?;
        let mut fs = Self::new(config.root_name.clone(), SystemTime::now());
        fs.case_sensitive = config.case_sensitive;
        Ok(fs)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> NodeRef<'_> {
        NodeRef {
            fs: self,
            id: self.root,
        }
    }

    /// Borrow a read view of `id`
    pub fn node(&self, id: NodeId) -> FsResult<NodeRef<'_>> {
        self.slot(id)?;
        Ok(NodeRef { fs: self, id })
    }

    fn slot(&self, id: NodeId) -> FsResult<&Node> {
        self.nodes.get(id.0).ok_or(FsError::UnknownNode(id))
    }

    // Ids reachable through the arena are always in bounds.
    fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn names_match(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a == b || a.to_lowercase() == b.to_lowercase()
        }
    }

    fn validate_name(name: &str) -> FsResult<()> {
        if name.is_empty() {
            return Err(FsError::InvalidName("empty name".into()));
        }
        if name.contains('/') {
            return Err(FsError::InvalidName(format!("`{}` contains '/'", name)));
        }
        Ok(())
    }

    /// Normalize an absolute path such as `/root/a/b` into the relative form
    /// `root/a/b` understood by [`NodeRef::search`].
    pub(crate) fn normalize_path(path: &str) -> FsResult<String> {
        if path.is_empty() {
            return Err(FsError::InvalidPath("empty path".into()));
        }

        let clean = path.trim_matches('/');
        if clean.is_empty() {
            return Err(FsError::InvalidPath(format!("`{}` names no node", path)));
        }

        // Check for empty components (e.g., "//")
        if clean.split('/').any(|s| s.is_empty()) {
            return Err(FsError::InvalidPath("empty path component".into()));
        }
        if clean.split('/').any(|s| s == "." || s == "..") {
            return Err(FsError::InvalidPath(". and .. are not supported".into()));
        }

        Ok(clean.to_string())
    }

    /// Create a file or folder named `name` inside folder `dir`.
    ///
    /// Re-creating an existing sibling of the same kind returns it unchanged.
    /// A same-named sibling of the other kind is a [`FsError::NameConflict`].
    /// `size` is ignored for folders. A file whose size would push the
    /// tree's total past `u64::MAX` is a [`FsError::SizeOverflow`].
    /// Folders that were deleted no longer accept children and report
    /// [`FsError::NotFound`].
    pub fn create_file(
        &mut self,
        dir: NodeId,
        name: &str,
        size: u64,
        kind: NodeKind,
    ) -> FsResult<NodeId> {
        Self::validate_name(name)?;

        let folder = self.slot(dir)?;
        let NodeData::Folder { children } = &folder.data else {
            return Err(FsError::NotAFolder(self.path_of(dir)));
        };
        if !(NodeRef { fs: self, id: dir }).is_attached() {
            return Err(FsError::NotFound(self.path_of(dir)));
        }

        let existing = children
            .iter()
            .copied()
            .find(|&child| self.names_match(&self.get(child).name, name));
        if let Some(existing) = existing {
            let found = self.get(existing).kind();
            if found != kind {
                return Err(FsError::NameConflict {
                    name: name.to_string(),
                    requested: kind,
                    existing: found,
                });
            }
            debug!(path = %self.path_of(existing), %kind, "create returned existing node");
            return Ok(existing);
        }

        let size = if kind.is_folder() { 0 } else { size };
        let Some(total) = self.total.checked_add(size) else {
            let path = format!("{}/{}", self.path_of(dir), name);
            warn!(%path, size, "refusing to create file past the size limit");
            return Err(FsError::SizeOverflow { path, size });
        };
        self.total = total;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(
            name.to_string(),
            SystemTime::now(),
            size,
            kind,
            Some(dir),
        ));
        if let NodeData::Folder { children } = &mut self.nodes[dir.0].data {
            children.push(id);
        }

        debug!(path = %self.path_of(id), %kind, size, "created node");
        Ok(id)
    }

    /// Detach `id` from its parent.
    ///
    /// Files always succeed. Folders need `force` unless empty, and the root
    /// folder is never deleted. Deleting an already detached node is a no-op.
    /// Every descendant of a deleted folder is detached as well, leaving no
    /// parent link pointing into the removed subtree.
    pub fn delete(&mut self, id: NodeId, force: bool) -> FsResult<()> {
        let node = self.slot(id)?;

        if id == self.root {
            warn!(path = %self.path_of(id), force, "refusing to delete root folder");
            return Err(FsError::RootDeletionForbidden);
        }

        let Some(parent) = node.parent else {
            return Ok(());
        };

        if let NodeData::Folder { children } = &node.data {
            if !force && !children.is_empty() {
                let path = self.path_of(id);
                warn!(%path, children = children.len(), "refusing to delete non-empty folder");
                return Err(FsError::NotEmpty(path));
            }
        }

        let path = self.path_of(id);
        self.total -= self.size_of(id);
        if let NodeData::Folder { children } = &mut self.nodes[parent.0].data {
            children.retain(|&child| child != id);
        }
        self.nodes[id.0].parent = None;
        let descendants = self.detach_descendants(id);

        debug!(%path, descendants, "deleted node");
        Ok(())
    }

    fn detach_descendants(&mut self, id: NodeId) -> usize {
        let mut detached = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let children = match &mut self.nodes[current.0].data {
                NodeData::Folder { children } => std::mem::take(children),
                NodeData::File { .. } => continue,
            };
            for child in children {
                self.nodes[child.0].parent = None;
                stack.push(child);
                detached += 1;
            }
        }
        detached
    }

    /// Search from the root, e.g. `root/a/b`
    pub fn search(&self, relative_path: &str) -> Option<NodeRef<'_>> {
        self.root_node().search(relative_path)
    }

    /// Resolve an absolute path such as `/root/a/b`
    pub fn resolve(&self, path: &str) -> FsResult<NodeRef<'_>> {
        let relative = Self::normalize_path(path)?;
        self.search(&relative)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// Stats of the direct children of folder `dir`, in insertion order
    pub fn readdir(&self, dir: NodeId) -> FsResult<Vec<Stat>> {
        match &self.slot(dir)?.data {
            NodeData::Folder { children } => Ok(children
                .iter()
                .map(|&child| NodeRef { fs: self, id: child }.stat())
                .collect()),
            NodeData::File { .. } => Err(FsError::NotAFolder(self.path_of(dir))),
        }
    }

    fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.get(c);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn size_of(&self, id: NodeId) -> u64 {
        let mut total = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.get(current).data {
                // Bounded by `self.total`, which create_file keeps within u64.
                NodeData::File { size } => total += size,
                NodeData::Folder { children } => stack.extend(children.iter().copied()),
            }
        }
        total
    }

    fn search_from(&self, id: NodeId, relative_path: &str) -> Option<NodeId> {
        let start = self.get(id);
        let mut components = relative_path.split('/');
        let head = components.next()?;

        match &start.data {
            // A file never consumes more than one component.
            NodeData::File { .. } => {
                return self.names_match(&start.name, relative_path).then_some(id);
            }
            NodeData::Folder { .. } if !self.names_match(&start.name, head) => return None,
            NodeData::Folder { .. } => {}
        }

        // Sibling names are unique, so at most one child matches per level.
        let mut current = id;
        for component in components {
            let NodeData::Folder { children } = &self.get(current).data else {
                return None;
            };
            current = children
                .iter()
                .copied()
                .find(|&child| self.names_match(&self.get(child).name, component))?;
        }
        Some(current)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new("root", SystemTime::now())
    }
}

/// Borrowed read view of one node in a [`FileSystem`]
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    fs: &'a FileSystem,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        self.fs.get(self.id)
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef { fs: self.fs, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind()
    }

    pub fn is_folder(&self) -> bool {
        self.kind().is_folder()
    }

    pub fn creation_date(&self) -> SystemTime {
        self.node().created
    }

    /// Size given at creation; 0 for folders
    pub fn declared_size(&self) -> u64 {
        self.node().declared_size()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.node().parent
    }

    pub fn parent_node(&self) -> Option<NodeRef<'a>> {
        self.parent().map(|id| self.at(id))
    }

    pub fn children(&self) -> &'a [NodeId] {
        self.node().children()
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let fs = self.fs;
        self.children().iter().map(move |&id| NodeRef { fs, id })
    }

    /// Declared size for files; recursive sum of children for folders.
    /// Recomputed on every call.
    pub fn size(&self) -> u64 {
        self.fs.size_of(self.id)
    }

    /// `/`-joined names from the topmost ancestor down to this node
    pub fn path(&self) -> String {
        self.fs.path_of(self.id)
    }

    /// Whether a direct child with the same name as `node` exists
    pub fn contains(&self, node: NodeId) -> bool {
        self.fs
            .slot(node)
            .is_ok_and(|other| self.contains_name(&other.name))
    }

    /// Whether `node` itself is a direct child of this folder
    pub fn is_parent_of(&self, node: NodeId) -> bool {
        self.children().contains(&node)
    }

    /// Whether a direct child with this name exists
    pub fn contains_name(&self, name: &str) -> bool {
        self.child_nodes()
            .any(|child| self.fs.names_match(child.name(), name))
    }

    /// Whether the parent chain reaches the tree's root
    pub fn is_attached(&self) -> bool {
        let mut current = Some(self.id);
        while let Some(id) = current {
            if id == self.fs.root {
                return true;
            }
            current = self.fs.get(id).parent;
        }
        false
    }

    /// Depth-first search for `relative_path`, whose first component must
    /// name this node. The first match in children order wins.
    pub fn search(&self, relative_path: &str) -> Option<NodeRef<'a>> {
        self.fs
            .search_from(self.id, relative_path)
            .map(|id| self.at(id))
    }

    pub fn stat(&self) -> Stat {
        let node = self.node();
        Stat {
            id: self.id,
            name: node.name.clone(),
            kind: node.kind(),
            path: self.path(),
            size: self.size(),
            created: node.created,
            parent: node.parent,
            children: node.children().len(),
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("path", &self.path())
            .finish()
    }
}
