use crate::artifacts::objects::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;

/// What a tree entry holds, as far as the walk is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Directory; `None` until its body has been loaded
    Subtree(Option<Tree>),
    /// File, symlink or submodule; never fetched by the walk
    Leaf(EntryMode),
}

/// An entry yielded by a tree walk
///
/// `path` is absolute within the walked tree: the root is `/`, and
/// directories end with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: String,
    oid: ObjectId,
    contents: Contents,
}

impl WalkEntry {
    pub fn root(oid: ObjectId, body: Tree) -> Self {
        WalkEntry {
            path: "/".to_string(),
            oid,
            contents: Contents::Subtree(Some(body)),
        }
    }

    /// Entry `name` of the directory at `parent_path`
    pub fn child(parent_path: &str, name: &str, entry: &DatabaseEntry) -> Self {
        let (path, contents) = if entry.is_tree() {
            (format!("{parent_path}{name}/"), Contents::Subtree(None))
        } else {
            (format!("{parent_path}{name}"), Contents::Leaf(entry.mode))
        };

        WalkEntry {
            path,
            oid: entry.oid.clone(),
            contents,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn mode(&self) -> EntryMode {
        match self.contents {
            Contents::Subtree(_) => EntryMode::Directory,
            Contents::Leaf(mode) => mode,
        }
    }

    pub fn is_subtree(&self) -> bool {
        matches!(self.contents, Contents::Subtree(_))
    }

    /// The loaded directory body, if this is a directory
    pub fn body(&self) -> Option<&Tree> {
        match &self.contents {
            Contents::Subtree(body) => body.as_ref(),
            Contents::Leaf(_) => None,
        }
    }

    pub(crate) fn with_body(self, body: Tree) -> Self {
        WalkEntry {
            contents: Contents::Subtree(Some(body)),
            ..self
        }
    }

    /// Entries of a loaded directory, in name order
    pub(crate) fn children(&self) -> Vec<WalkEntry> {
        match &self.contents {
            Contents::Subtree(Some(tree)) => tree
                .entries()
                .map(|(name, entry)| WalkEntry::child(&self.path, name, entry))
                .collect(),
            Contents::Subtree(None) | Contents::Leaf(_) => Vec::new(),
        }
    }
}
