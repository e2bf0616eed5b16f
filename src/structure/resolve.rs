//! Expansion of a structure definition into an ordered creation plan.

use std::path::{Path, PathBuf};

use super::{StructureMap, StructureNode};

/// What the materializer must ensure at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    /// File whose content is regenerated on every run.
    FileWrite(String),
    /// Directory plus a `README.md` holding the text.
    DirectoryWithReadme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl ResolvedEntry {
    fn new(path: PathBuf, kind: NodeKind) -> Self {
        Self { path, kind }
    }
}

/// Depth-first plan for `structure` rooted at `root`.
///
/// When both labels are given every first-level name is prefixed with
/// `<investigation>-<study>_`. Entries follow the definition's own order.
pub fn resolve(
    root: &Path,
    structure: &StructureMap,
    labels: Option<(&str, &str)>,
) -> Vec<ResolvedEntry> {
    let labeled;
    let structure = match labels {
        Some((investigation_label, study_label)) => {
            labeled = structure.with_label_prefix(investigation_label, study_label);
            &labeled
        }
        None => structure,
    };

    let mut plan = Vec::new();
    if let Some(readme) = &structure.readme {
        plan.push(ResolvedEntry::new(
            root.to_path_buf(),
            NodeKind::DirectoryWithReadme(readme.clone()),
        ));
    }
    resolve_entries(root, structure, &mut plan);
    plan
}

fn resolve_entries(parent: &Path, structure: &StructureMap, plan: &mut Vec<ResolvedEntry>) {
    for (name, node) in &structure.entries {
        resolve_node(parent.join(name), name, node, plan);
    }
}

fn resolve_node(path: PathBuf, name: &str, node: &StructureNode, plan: &mut Vec<ResolvedEntry>) {
    match node {
        StructureNode::Leaf => plan.push(ResolvedEntry::new(path, NodeKind::Directory)),
        StructureNode::FileContent(text) if name.contains('.') => {
            plan.push(ResolvedEntry::new(path, NodeKind::FileWrite(text.clone())))
        }
        StructureNode::FileContent(text) => plan.push(ResolvedEntry::new(
            path,
            NodeKind::DirectoryWithReadme(text.clone()),
        )),
        StructureNode::SiblingList(names) => {
            let children: Vec<_> = names
                .iter()
                .map(|sibling| ResolvedEntry::new(path.join(sibling), NodeKind::Directory))
                .collect();
            plan.push(ResolvedEntry::new(path, NodeKind::Directory));
            plan.extend(children);
        }
        StructureNode::Children(map) => {
            let kind = match &map.readme {
                Some(readme) => NodeKind::DirectoryWithReadme(readme.clone()),
                None => NodeKind::Directory,
            };
            plan.push(ResolvedEntry::new(path.clone(), kind));
            resolve_entries(&path, map, plan);
        }
    }
}
