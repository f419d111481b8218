//! HTML rendering of the condition hierarchy.

pub mod html;
pub mod nodes;
pub mod template;

use crate::model::ResourceDoc;
use nodes::{ConditionNode, ReasonNode, ResourceNode, SectionNode};
use template::Templates;

/// A node of the render tree that produces an HTML fragment.
pub trait Render {
    fn render(&self) -> String;
}

/// Build the render tree for `resources`, leaves first.
pub fn build_section<'t>(
    templates: &'t Templates,
    title: &str,
    resources: &[ResourceDoc],
) -> SectionNode<'t> {
    let resource_nodes = resources
        .iter()
        .map(|resource| {
            let condition_nodes = resource
                .conditions
                .iter()
                .map(|condition| {
                    let reason_nodes = condition
                        .reasons
                        .iter()
                        .map(|r| ReasonNode::new(&templates.reason, &r.name, &r.description))
                        .collect();
                    ConditionNode::new(
                        &templates.condition,
                        &resource.name,
                        &condition.name,
                        &condition.description,
                        reason_nodes,
                    )
                })
                .collect();
            ResourceNode::new(&templates.resource, &resource.name, condition_nodes)
        })
        .collect();

    SectionNode::new(&templates.section, title, resource_nodes)
}
