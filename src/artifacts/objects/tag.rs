//! Git annotated tag object
//!
//! ## Format
//!
//! On disk:
//! ```text
//! tag <size>\0
//! object <target-sha>
//! type <target-type>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <tag message>
//! ```
//!
//! Lightweight tags are plain refs and never produce one of these.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::BufRead;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    target: ObjectId,
    target_type: ObjectType,
    name: String,
    message: String,
}

impl Tag {
    /// Object the tag points at
    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    /// Kind of the target, as the tag declares it
    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Unpackable for Tag {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let (headers, message) = content.split_once("\n\n").unwrap_or((content.as_str(), ""));

        let mut target = None;
        let mut target_type = None;
        let mut name = None;

        for line in headers.lines() {
            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            match key {
                "object" => target = Some(ObjectId::try_parse(value.to_string())?),
                "type" => target_type = Some(ObjectType::try_from(value)?),
                "tag" => name = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(Tag {
            target: target.context("Invalid tag object: missing object line")?,
            target_type: target_type.context("Invalid tag object: missing type line")?,
            name: name.unwrap_or_default(),
            message: message.to_string(),
        })
    }
}
