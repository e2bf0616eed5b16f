//! Declarative folder structure grammar.
//!
//! A structure file is a mapping from names to nodes, where a node is one of
//! `null` (empty directory), a string (file content for names containing a
//! `.`, README text otherwise), a sequence of names (empty sibling
//! directories), or a nested mapping. Inside a mapping the `_readme` key is
//! README text for the mapping's own directory rather than a child.
//!
//! The polymorphism is resolved once, while deserializing, so the resolver
//! only ever matches on [`StructureNode`]. Mapping order is kept as written.

pub mod overview;
pub mod resolve;
pub mod template;

pub use overview::{render_overview, render_project_readme};
pub use resolve::{resolve, NodeKind, ResolvedEntry};
pub use template::{interpolate, TemplateLabels};

use std::fmt;
use std::path::{Component, Path};

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::error::Result;

/// Key carrying README text for the enclosing directory.
pub const README_KEY: &str = "_readme";

/// One node of a structure definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureNode {
    /// Empty directory.
    Leaf,
    /// File content, or README text when the key has no `.`.
    FileContent(String),
    /// Nested directory.
    Children(StructureMap),
    /// Empty sibling directories inside this one.
    SiblingList(Vec<String>),
}

/// Ordered mapping of names to nodes plus the optional `_readme` text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureMap {
    pub readme: Option<String>,
    pub entries: Vec<(String, StructureNode)>,
}

impl StructureMap {
    /// Mapping of empty directories, e.g. the per-install default structure.
    pub fn from_leaves<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            readme: None,
            entries: names
                .into_iter()
                .map(|name| (name.into(), StructureNode::Leaf))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StructureNode> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Copy with every top-level key rewritten to `<inv>-<study>_<key>`.
    pub fn with_label_prefix(&self, investigation_label: &str, study_label: &str) -> Self {
        Self {
            readme: self.readme.clone(),
            entries: self
                .entries
                .iter()
                .map(|(name, node)| {
                    (
                        format!("{investigation_label}-{study_label}_{name}"),
                        node.clone(),
                    )
                })
                .collect(),
        }
    }
}

/// Loads a structure definition from a JSON or YAML file.
pub fn load_structure_file(path: &Path) -> Result<StructureMap> {
    crate::config::read_document(path)
}

impl<'de> Deserialize<'de> for StructureNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for StructureMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match deserializer.deserialize_any(NodeVisitor)? {
            StructureNode::Children(map) => Ok(map),
            StructureNode::Leaf => Ok(StructureMap::default()),
            _ => Err(de::Error::custom(
                "structure definition must be a mapping of folder names",
            )),
        }
    }
}

/// Names must be one plain path segment, so the tree stays below its root.
fn check_name<E: de::Error>(name: &str) -> std::result::Result<(), E> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) if segment == name => Ok(()),
        _ => Err(E::custom(format!(
            "invalid folder or file name '{name}': must be a single path segment"
        ))),
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = StructureNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null, a string, a list of folder names, or a mapping")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(StructureNode::Leaf)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(StructureNode::Leaf)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
        Ok(StructureNode::FileContent(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Self::Value, E> {
        Ok(StructureNode::FileContent(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut names = Vec::new();
        while let Some(name) = seq.next_element::<String>()? {
            check_name::<A::Error>(&name)?;
            names.push(name);
        }
        Ok(StructureNode::SiblingList(names))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut structure = StructureMap::default();
        while let Some(key) = map.next_key::<String>()? {
            if key == README_KEY {
                structure.readme = Some(map.next_value::<String>()?);
                continue;
            }
            check_name::<A::Error>(&key)?;
            let node = map.next_value::<StructureNode>()?;
            structure.entries.push((key, node));
        }
        Ok(StructureNode::Children(structure))
    }
}
