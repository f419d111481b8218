//! Render tree nodes: section, resource, condition, reason.
//!
//! Nodes are built bottom-up with their children already in place and
//! render once. Each node borrows its template from [`Templates`].
//!
//! [`Templates`]: crate::render::template::Templates

use crate::render::html::{format_comment, html_escape, slug};
use crate::render::template::Template;
use crate::render::Render;

/// Concatenate the fragments of `children` in order.
fn render_children<R: Render>(children: &[R]) -> String {
    children.iter().map(Render::render).collect()
}

/// A documented reason (leaf).
pub struct ReasonNode<'t> {
    template: &'t Template,
    name: String,
    description: String,
}

impl<'t> ReasonNode<'t> {
    pub fn new(template: &'t Template, name: &str, description: &str) -> Self {
        Self {
            template,
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Render for ReasonNode<'_> {
    fn render(&self) -> String {
        let name = html_escape(&self.name);
        let description = format_comment(&self.description);
        self.template.render(&[
            ("name", name.as_str()),
            ("description", description.as_str()),
        ])
    }
}

/// A condition type with its reasons.
pub struct ConditionNode<'t> {
    template: &'t Template,
    /// Owning resource, used to scope element ids.
    resource: String,
    name: String,
    description: String,
    children: Vec<ReasonNode<'t>>,
}

impl<'t> ConditionNode<'t> {
    pub fn new(
        template: &'t Template,
        resource: &str,
        name: &str,
        description: &str,
        children: Vec<ReasonNode<'t>>,
    ) -> Self {
        Self {
            template,
            resource: resource.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            children,
        }
    }
}

impl Render for ConditionNode<'_> {
    fn render(&self) -> String {
        let name = html_escape(&self.name);
        let description = format_comment(&self.description);
        let id = format!("{}-{}", slug(&self.resource), slug(&self.name));
        let children = render_children(&self.children);
        self.template.render(&[
            ("name", name.as_str()),
            ("description", description.as_str()),
            ("id", id.as_str()),
            ("children", children.as_str()),
        ])
    }
}

/// A resource and its conditions.
pub struct ResourceNode<'t> {
    template: &'t Template,
    name: String,
    children: Vec<ConditionNode<'t>>,
}

impl<'t> ResourceNode<'t> {
    pub fn new(template: &'t Template, name: &str, children: Vec<ConditionNode<'t>>) -> Self {
        Self {
            template,
            name: name.to_string(),
            children,
        }
    }
}

impl Render for ResourceNode<'_> {
    fn render(&self) -> String {
        let name = html_escape(&self.name);
        let id = slug(&self.name);
        let children = render_children(&self.children);
        self.template.render(&[
            ("name", name.as_str()),
            ("id", id.as_str()),
            ("children", children.as_str()),
        ])
    }
}

/// Root card holding every resource.
pub struct SectionNode<'t> {
    template: &'t Template,
    title: String,
    children: Vec<ResourceNode<'t>>,
}

impl<'t> SectionNode<'t> {
    pub fn new(template: &'t Template, title: &str, children: Vec<ResourceNode<'t>>) -> Self {
        Self {
            template,
            title: title.to_string(),
            children,
        }
    }
}

impl Render for SectionNode<'_> {
    fn render(&self) -> String {
        let title = html_escape(&self.title);
        let children = render_children(&self.children);
        self.template.render(&[("title", title.as_str()), ("children", children.as_str())])
    }
}
