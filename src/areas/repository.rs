use crate::areas::database::Database;
use crate::areas::object_store::ObjectStore;
use crate::areas::refs::Refs;
use crate::artifacts::log::rev_list::{LogWalk, RevList};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::revision;
use crate::artifacts::tree_walk::tree_list::{TreeList, TreeWalk};
use crate::errors::WalkResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Environment variable overriding where the git directory is
pub const GIT_DIR_ENV: &str = "GIT_DIR";

/// Shortest abbreviation accepted for an object id
const MIN_ABBREV_LENGTH: usize = 4;

/// An on-disk repository, opened for reading
#[derive(Debug, Clone)]
pub struct Repository {
    git_dir: Box<Path>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open the repository at `path`
    ///
    /// `path` may be a working tree (with a `.git` directory) or a bare
    /// repository. When `GIT_DIR` is set it wins over `path`.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let git_dir = match std::env::var_os(GIT_DIR_ENV) {
            Some(git_dir) if !git_dir.is_empty() => PathBuf::from(git_dir),
            _ => Self::find_git_dir(path.as_ref())?,
        };

        if !git_dir.join("objects").is_dir() {
            anyhow::bail!("not a git repository: {}", git_dir.display());
        }
        debug!(git_dir = %git_dir.display(), "opened repository");

        Ok(Self::at_git_dir(git_dir))
    }

    /// Use `git_dir` as is, without checking it
    pub fn at_git_dir(git_dir: impl Into<PathBuf>) -> Self {
        let git_dir = git_dir.into();
        let database = Database::new(git_dir.join("objects").into_boxed_path());
        let refs = Refs::new(git_dir.clone().into_boxed_path());

        Repository {
            git_dir: git_dir.into_boxed_path(),
            database,
            refs,
        }
    }

    fn find_git_dir(path: &Path) -> anyhow::Result<PathBuf> {
        let dot_git = path.join(".git");
        if dot_git.is_dir() {
            return Ok(dot_git);
        }
        if path.join("objects").is_dir() && path.join("HEAD").is_file() {
            return Ok(path.to_path_buf());
        }

        anyhow::bail!("not a git repository: {}", path.display())
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub async fn resolve(&self, hashish: &str) -> WalkResult<ObjectId> {
        revision::resolve(self, hashish).await
    }

    /// History of `hashish`, newest first
    pub async fn log_walk(&self, hashish: &str) -> WalkResult<LogWalk> {
        RevList::new(Arc::new(self.clone()), hashish.to_string())
            .into_walk()
            .await
    }

    /// Every entry below the tree `oid`, in path order
    pub async fn tree_walk(&self, oid: &ObjectId) -> WalkResult<TreeWalk> {
        TreeList::new(Arc::new(self.clone()), oid.clone())
            .into_walk()
            .await
    }

    async fn expand_abbreviation(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let is_abbreviation = (MIN_ABBREV_LENGTH..=OBJECT_ID_LENGTH).contains(&name.len())
            && name.chars().all(|c| c.is_ascii_hexdigit());
        if !is_abbreviation {
            return Ok(None);
        }

        let mut candidates = self.database.find_objects_by_prefix(name).await?;
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => {
                let hint = candidates
                    .iter()
                    .map(|oid| format!("hint:   {oid}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                anyhow::bail!(
                    "short SHA1 {name} is ambiguous\nhint: The candidates are:\n{hint}"
                )
            }
        }
    }
}

#[async_trait]
impl ObjectStore for Repository {
    async fn load_object(
        &self,
        kind: ObjectType,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectBox>> {
        trace!(%kind, %oid, "loading object");
        self.database.parse_object(oid).await
    }

    /// Refs take precedence over abbreviated ids, as in `git rev-parse`
    async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        if let Some(oid) = self.refs.read_ref(name).await? {
            return Ok(Some(oid));
        }

        self.expand_abbreviation(name).await
    }

    /// Reads the `shallow` file only, so branches and tags named `shallow`
    /// and abbreviations never count as boundaries
    async fn read_shallow(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.refs.read_shallow().await
    }
}
