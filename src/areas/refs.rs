//! Git references (branches, HEAD, tags)
//!
//! This module reads references, human-readable names pointing to objects.
//! References can be:
//! - Direct: Containing an object SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Lookup
//!
//! A short name is tried the way `git rev-parse` does it, first match wins:
//! `<name>`, `refs/<name>`, `refs/tags/<name>`, `refs/heads/<name>`,
//! `refs/remotes/<name>`, `refs/remotes/<name>/HEAD`. Each candidate is read
//! from its loose file first and from `packed-refs` second.
//!
//! ## File Format
//!
//! Loose refs are text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references
//!
//! Only the first line is considered. Files whose first line is neither form
//! (`description`, `config`, `index`, ...) are not refs and are skipped.
//!
//! ## Shallow boundaries
//!
//! `shallow` lists one boundary commit per line. It is only read through
//! [`Refs::read_shallow`], never through the lookup rules.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Regex for parsing symbolic references
static SYMREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ref: (.+)$").expect("symref regex is valid"));

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const PACKED_REFS_FILE: &str = "packed-refs";

const SHALLOW_FILE: &str = "shallow";

/// Symbolic refs pointing at symbolic refs beyond this depth are rejected
const MAX_SYMREF_DEPTH: usize = 5;

pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

const LOOKUP_RULES: [&str; 6] = [
    "{}",
    "refs/{}",
    "refs/tags/{}",
    "refs/heads/{}",
    "refs/remotes/{}",
    "refs/remotes/{}/HEAD",
];

/// Git references reader
#[derive(Debug, Clone, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Internal representation of a reference value
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { target: String },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    async fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to stat ref file at {:?}", path));
            }
        }

        // binary files such as `index` are read lossily and then rejected
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = String::from_utf8_lossy(&content);

        Ok(Self::parse(content.lines().next().unwrap_or("").trim()))
    }

    /// `None` when `content` is neither a symref nor an object id
    fn parse(content: &str) -> Option<SymRefOrOid> {
        if let Some(symref_match) = SYMREF_REGEX.captures(content) {
            return Some(SymRefOrOid::SymRef {
                target: symref_match[1].trim().to_string(),
            });
        }

        ObjectId::try_parse(content.to_string())
            .ok()
            .map(SymRefOrOid::Oid)
    }
}

impl Refs {
    /// Resolve a (possibly short) ref name to the object id it points to
    ///
    /// Follows symbolic references. Unknown names, and names that could
    /// escape the git directory, are `Ok(None)`.
    pub async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let name = REF_ALIASES.get(name).copied().unwrap_or(name);

        if !Self::is_safe_ref_name(name) {
            return Ok(None);
        }

        for rule in LOOKUP_RULES {
            let full_name = rule.replace("{}", name);
            if let Some(oid) = self.read_full_ref(&full_name, 0).await? {
                return Ok(Some(oid));
            }
        }

        Ok(None)
    }

    /// Every boundary commit listed in the `shallow` file
    ///
    /// A missing file means the history is complete. Lines that are not
    /// object ids make the file corrupt.
    pub async fn read_shallow(&self) -> anyhow::Result<Vec<ObjectId>> {
        let shallow_path = self.path.join(SHALLOW_FILE);
        let content = match tokio::fs::read_to_string(&shallow_path).await {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read {:?}", shallow_path));
            }
        };

        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                ObjectId::try_parse(line.to_string())
                    .with_context(|| format!("corrupt shallow file {:?}", shallow_path))
            })
            .collect()
    }

    /// Read HEAD, following it to the branch it points at
    pub async fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_full_ref(HEAD_REF_NAME, 0).await
    }

    /// Read a fully qualified ref, loose file first, then `packed-refs`
    async fn read_full_ref(&self, full_name: &str, depth: usize) -> anyhow::Result<Option<ObjectId>> {
        if depth > MAX_SYMREF_DEPTH {
            anyhow::bail!("symbolic ref chain too deep at {}", full_name);
        }

        match SymRefOrOid::read_symref_or_oid(&self.path.join(full_name)).await? {
            Some(SymRefOrOid::SymRef { target }) => {
                if !Self::is_safe_ref_name(&target) {
                    anyhow::bail!("symbolic ref {} points outside the repository", full_name);
                }
                Box::pin(self.read_full_ref(&target, depth + 1)).await
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => self.read_packed_ref(full_name).await,
        }
    }

    async fn read_packed_ref(&self, full_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let packed_path = self.path.join(PACKED_REFS_FILE);
        let content = match tokio::fs::read_to_string(&packed_path).await {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read {:?}", packed_path));
            }
        };

        // "<oid> <refname>" lines; '#' starts the header, '^' peels the tag above
        for line in content.lines() {
            if line.starts_with('#') || line.starts_with('^') {
                continue;
            }
            if let Some((oid, name)) = line.split_once(' ')
                && name.trim() == full_name
            {
                return Ok(Some(ObjectId::try_parse(oid.to_string())?));
            }
        }

        Ok(None)
    }

    fn is_safe_ref_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('/')
            && !name
                .split('/')
                .any(|component| component.is_empty() || component == "." || component == "..")
    }
}
