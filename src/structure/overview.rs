use chrono::NaiveDate;

use super::{StructureMap, StructureNode, TemplateLabels};

/// Markdown bullet list describing a structure, two spaces per level.
pub fn render_overview(structure: &StructureMap, level: usize) -> String {
    let mut overview = String::new();
    let indent = "  ".repeat(level);
    for (name, node) in &structure.entries {
        overview.push_str(&format!("{indent}- `{name}`"));
        let note = match node {
            _ if name.contains('.') => " - File",
            StructureNode::FileContent(_) => " - Directory with README",
            StructureNode::Children(map) if map.readme.is_some() => " - Directory with README",
            _ => " - Directory",
        };
        overview.push_str(note);
        overview.push('\n');

        match node {
            StructureNode::Children(map) => overview.push_str(&render_overview(map, level + 1)),
            StructureNode::SiblingList(names) => {
                let child_indent = "  ".repeat(level + 1);
                for sibling in names {
                    overview.push_str(&format!("{child_indent}- `{sibling}` - Directory\n"));
                }
            }
            _ => {}
        }
    }
    overview
}

/// Top-level README written at the root of an ISA project.
pub fn render_project_readme(
    labels: &TemplateLabels,
    structure: &StructureMap,
    generated_on: NaiveDate,
) -> String {
    let mut readme = format!("# {}\n\n", labels.investigation);
    readme.push_str(&format!(
        "ISA model project generated on {}.\n\n",
        generated_on.format("%Y-%m-%d")
    ));
    if let Some(intro) = &structure.readme {
        readme.push_str(&format!("{intro}\n\n"));
    }
    readme.push_str(&format!("## Investigation\n\n{}\n\n", labels.investigation));
    readme.push_str(&format!("## Study\n\n{}\n\n", labels.study));
    readme.push_str(&format!("## Assay\n\n{}\n\n", labels.assay));
    readme.push_str("## Structure Overview\n\n");
    readme.push_str(&render_overview(structure, 0));
    readme
}
