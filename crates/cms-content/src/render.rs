//! Recursive tree walker
//!
//! Dispatches each [`StyleNode`] through [`StyleKind`] to a typed renderer.
//!
//! # Guarantees
//! - holes in child lists are skipped silently
//! - children keep their authored order
//! - unknown tags render as [`Element::Unknown`]
//! - a renderer error is contained to its node ([`Element::Failed`])
//! - no state is kept between calls, so rendering is idempotent

use crate::element::{Element, Rendered};
use crate::error::RenderError;
use crate::node::{NodeKey, StyleNode};
use crate::registry::StyleKind;

/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 64;

const ALERT_SEVERITIES: [&str; 4] = ["info", "success", "warning", "error"];

/// Walker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Levels rendered before nodes are replaced by a depth failure
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Style tree renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create renderer with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With nesting limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Active options
    #[inline]
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render a root node; `None` renders nothing
    #[must_use]
    pub fn render(&self, node: Option<&StyleNode>) -> Option<Rendered> {
        node.map(|node| self.render_node(node, NodeKey::for_node(node, 0), 0))
    }

    /// Render a top-level section list, skipping holes
    #[must_use]
    pub fn render_all(&self, nodes: &[Option<StyleNode>]) -> Vec<Rendered> {
        self.render_children(nodes, 0)
    }

    fn render_children(&self, nodes: &[Option<StyleNode>], depth: usize) -> Vec<Rendered> {
        nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                node.as_ref()
                    .map(|node| self.render_node(node, NodeKey::for_node(node, index), depth))
            })
            .collect()
    }

    fn render_node(&self, node: &StyleNode, key: NodeKey, depth: usize) -> Rendered {
        let css = node.content("css").ok().flatten().filter(|c| !c.is_empty());

        let element = if depth >= self.options.max_depth {
            failed(node, &RenderError::DepthExceeded(self.options.max_depth))
        } else {
            let kind = StyleKind::from_tag(&node.style_name);
            match self.dispatch(&kind, node, depth) {
                Ok(element) => element,
                Err(err) => failed(node, &err),
            }
        };

        Rendered { key, css, element }
    }

    fn dispatch(&self, kind: &StyleKind, node: &StyleNode, depth: usize) -> Result<Element, RenderError> {
        let children = || self.render_children(&node.children, depth + 1);

        match kind {
            StyleKind::Container => Ok(Element::Container { children: children() }),
            StyleKind::Heading => render_heading(node),
            StyleKind::Text => Ok(Element::Text {
                text: node.content("text")?.unwrap_or_default(),
            }),
            StyleKind::Markdown => Ok(Element::Markdown {
                source: node.content("text_md")?.unwrap_or_default(),
            }),
            StyleKind::Image => Ok(Element::Image {
                src: node.required("img_src")?,
                alt: node.content("alt")?.unwrap_or_default(),
            }),
            StyleKind::Link => render_link(node),
            StyleKind::Button => Ok(Element::Button {
                label: node.required("label")?,
                href: node.content("url")?.filter(|u| !u.is_empty()),
            }),
            StyleKind::Card => Ok(Element::Card {
                title: node.content("title")?.filter(|t| !t.is_empty()),
                children: children(),
            }),
            StyleKind::Divider => Ok(Element::Divider),
            StyleKind::Alert => render_alert(node, children),
            StyleKind::Unknown(tag) => {
                tracing::debug!(style_name = %tag, id = ?node.id, "no renderer for style");
                Ok(Element::Unknown {
                    style_name: tag.clone(),
                })
            }
        }
    }
}

fn failed(node: &StyleNode, err: &RenderError) -> Element {
    tracing::warn!(
        style_name = %node.style_name,
        id = ?node.id,
        error = %err,
        "style node failed to render"
    );
    Element::Failed {
        style_name: node.style_name.clone(),
        reason: err.to_string(),
    }
}

fn render_heading(node: &StyleNode) -> Result<Element, RenderError> {
    let level = match node.content("level")? {
        None => 1,
        Some(raw) => match raw.trim().parse::<u8>() {
            Ok(level) if (1..=6).contains(&level) => level,
            _ => {
                return Err(RenderError::InvalidValue {
                    field: "level",
                    value: raw,
                })
            }
        },
    };
    Ok(Element::Heading {
        level,
        text: node.content("title")?.unwrap_or_default(),
    })
}

fn render_link(node: &StyleNode) -> Result<Element, RenderError> {
    let href = node.required("url")?;
    let label = node
        .content("label")?
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| href.clone());
    let new_tab = matches!(
        node.content("open_in_new_tab")?.as_deref().map(str::trim),
        Some("1" | "true" | "on" | "yes")
    );
    Ok(Element::Link {
        href,
        label,
        new_tab,
    })
}

fn render_alert(
    node: &StyleNode,
    children: impl FnOnce() -> Vec<Rendered>,
) -> Result<Element, RenderError> {
    let severity = match node.content("type")? {
        None => "info".to_string(),
        Some(raw) if ALERT_SEVERITIES.contains(&raw.as_str()) => raw,
        Some(raw) => {
            return Err(RenderError::InvalidValue {
                field: "type",
                value: raw,
            })
        }
    };
    Ok(Element::Alert {
        severity,
        message: node.content("content")?.filter(|m| !m.is_empty()),
        children: children(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(node: &StyleNode) -> Element {
        Renderer::new().render(Some(node)).unwrap().element
    }

    #[test]
    fn absent_root_renders_nothing() {
        assert_eq!(Renderer::new().render(None), None);
    }

    #[test]
    fn heading_with_level() {
        let node = StyleNode::new("heading").with_field("title", "Hi").with_field("level", "3");
        assert_eq!(
            render(&node),
            Element::Heading {
                level: 3,
                text: "Hi".into()
            }
        );
    }

    #[test]
    fn heading_level_out_of_range_fails_node() {
        let node = StyleNode::new("heading").with_field("level", "9");
        assert_eq!(
            render(&node),
            Element::Failed {
                style_name: "heading".into(),
                reason: "invalid value for 'level': 9".into()
            }
        );
    }

    #[test]
    fn image_requires_source() {
        let node = StyleNode::new("image").with_field("alt", "logo");
        assert!(matches!(render(&node), Element::Failed { .. }));
    }

    #[test]
    fn link_label_defaults_to_href() {
        let node = StyleNode::new("link")
            .with_field("url", "/about")
            .with_field("open_in_new_tab", "1");
        assert_eq!(
            render(&node),
            Element::Link {
                href: "/about".into(),
                label: "/about".into(),
                new_tab: true
            }
        );
    }

    #[test]
    fn alert_rejects_unknown_severity() {
        let node = StyleNode::new("alert").with_field("type", "shout");
        assert!(matches!(render(&node), Element::Failed { .. }));
    }

    #[test]
    fn css_field_is_carried() {
        let node = StyleNode::new("divider").with_field("css", "my-4");
        let out = Renderer::new().render(Some(&node)).unwrap();
        assert_eq!(out.css.as_deref(), Some("my-4"));
    }

    #[test]
    fn leaf_kinds_ignore_children() {
        let node = StyleNode::new("text")
            .with_field("text", "a")
            .with_child(StyleNode::new("divider"));
        assert_eq!(render(&node), Element::Text { text: "a".into() });
    }

    #[test]
    fn depth_limit_replaces_deep_nodes() {
        let tree = StyleNode::new("container")
            .with_id(1)
            .with_child(StyleNode::new("container").with_id(2).with_child(StyleNode::new("divider").with_id(3)));

        let out = Renderer::new().with_max_depth(2).render(Some(&tree)).unwrap();
        let level2 = &out.element.children()[0];
        assert_eq!(level2.key, NodeKey::Id(2));
        assert_eq!(
            level2.element.children()[0].element,
            Element::Failed {
                style_name: "divider".into(),
                reason: "tree deeper than 2 levels".into()
            }
        );
    }
}
