use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// A loaded object body, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBox {
    Blob(Bytes),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
    Tag(Box<Tag>),
}

impl ObjectBox {
    /// Parse a body of the given kind
    pub fn parse(object_type: ObjectType, reader: impl BufRead) -> Result<Self> {
        match object_type {
            ObjectType::Blob => {
                let content = reader
                    .bytes()
                    .collect::<std::result::Result<Vec<u8>, std::io::Error>>()?;
                Ok(ObjectBox::Blob(content.into()))
            }
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(reader)?))),
            ObjectType::Tag => Ok(ObjectBox::Tag(Box::new(Tag::deserialize(reader)?))),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
            ObjectBox::Tag(_) => ObjectType::Tag,
        }
    }
}

impl From<Commit> for ObjectBox {
    fn from(commit: Commit) -> Self {
        ObjectBox::Commit(Box::new(commit))
    }
}

impl From<Tree> for ObjectBox {
    fn from(tree: Tree) -> Self {
        ObjectBox::Tree(Box::new(tree))
    }
}
