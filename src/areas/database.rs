//! Loose object database
//!
//! Objects live under `objects/xx/yyyy...`, zlib-compressed, each starting
//! with a `<type> <size>\0` header. This module only reads them.

use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles so that cloned and gc'd repositories can be walked
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Inflated content of `object_id`, header included
    ///
    /// A missing object is `Ok(None)`.
    pub async fn load(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = match tokio::fs::read(&object_path).await {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error).context(format!(
                    "Unable to read object file {}",
                    object_path.display()
                ));
            }
        };
        trace!(oid = %object_id, bytes = object_content.len(), "read loose object");

        Self::decompress(object_content.into())
            .with_context(|| format!("Corrupt object {object_id}"))
            .map(Some)
    }

    pub async fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<Option<ObjectBox>> {
        let Some(object_content) = self.load(object_id).await? else {
            return Ok(None);
        };

        let mut object_reader = Cursor::new(object_content);
        let (object_type, size) = ObjectType::parse_object_header(&mut object_reader)
            .with_context(|| format!("Corrupt object {object_id}"))?;

        let body_size = object_reader.get_ref().len() - object_reader.position() as usize;
        if body_size != size {
            anyhow::bail!(
                "Corrupt object {object_id}: header declares {size} bytes, found {body_size}"
            );
        }

        ObjectBox::parse(object_type, object_reader)
            .with_context(|| format!("Unable to parse {object_type} {object_id}"))
            .map(Some)
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to expand abbreviated OIDs. Only the fan-out directory named by
    /// the first two characters is scanned, so `prefix` must have at least
    /// two. Several matches mean the prefix is ambiguous.
    pub async fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() < 2 || !prefix.is_char_boundary(2) {
            anyhow::bail!("Object prefix {prefix:?} is too short");
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        let mut entries = match tokio::fs::read_dir(&dir_path).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(error).context(format!(
                    "Unable to list object directory {}",
                    dir_path.display()
                ));
            }
        };

        let mut matches = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix) {
                // temp files and other strays don't parse as ids
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }
}
