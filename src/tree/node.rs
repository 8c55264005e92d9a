//! Node types for the JSON tree document

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

/// Kind of filesystem entry a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One entry of the walked tree.
///
/// Serializes to the shape expected by hierarchy layouts:
/// `{"id", "name", "type", "size_bytes", "children"}`. `size_bytes` is always
/// written, as `null` when the size is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute path of the entry; unique within a tree. Written lossily when
    /// the path is not valid UTF-8.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub id: PathBuf,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub children: Vec<Node>,
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl Node {
    pub fn file(id: PathBuf, name: String, size_bytes: Option<u64>) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::File,
            size_bytes,
            children: Vec::new(),
        }
    }

    /// A folder whose size is the aggregate of `children`.
    pub fn folder(id: PathBuf, name: String, children: Vec<Node>) -> Self {
        let mut node = Self {
            id,
            name,
            kind: NodeKind::Folder,
            size_bytes: None,
            children,
        };
        node.size_bytes = Some(node.aggregate_size());
        node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Sum of the direct children's sizes, unknown sizes counting as zero.
    pub fn aggregate_size(&self) -> u64 {
        self.children
            .iter()
            .map(|c| c.size_bytes.unwrap_or(0))
            .fold(0u64, u64::saturating_add)
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Find a node by its id.
    pub fn find(&self, id: &Path) -> Option<&Node> {
        self.iter().find(|n| n.id == id)
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Pre-order traversal of a [`Node`] tree.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
