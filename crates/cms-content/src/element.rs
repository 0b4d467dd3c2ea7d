//! Rendered output tree
//!
//! The walker produces [`Rendered`] values: a structured, framework-neutral
//! description of what to display. [`Rendered::to_html`] serialises it for
//! server-side output and previews.

use crate::node::NodeKey;
use pulldown_cmark::{CowStr, Event, Tag};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One rendered node with its identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    /// Stable key among siblings
    pub key: NodeKey,
    /// Extra CSS classes authored on the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// What to display
    pub element: Element,
}

/// Display element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Generic wrapper
    Container {
        /// Rendered children in authored order
        children: Vec<Rendered>,
    },
    /// Heading of level 1–6
    Heading {
        /// Level
        level: u8,
        /// Text
        text: String,
    },
    /// Plain text
    Text {
        /// Text
        text: String,
    },
    /// Markdown source
    Markdown {
        /// Source text
        source: String,
    },
    /// Image
    Image {
        /// Source URL
        src: String,
        /// Alternative text
        alt: String,
    },
    /// Hyperlink
    Link {
        /// Target URL
        href: String,
        /// Visible label
        label: String,
        /// Open in a new browsing context
        new_tab: bool,
    },
    /// Button, optionally navigating
    Button {
        /// Visible label
        label: String,
        /// Target URL
        href: Option<String>,
    },
    /// Titled card
    Card {
        /// Title
        title: Option<String>,
        /// Rendered children in authored order
        children: Vec<Rendered>,
    },
    /// Horizontal rule
    Divider,
    /// Highlighted notice
    Alert {
        /// Severity: `info`, `success`, `warning` or `error`
        severity: String,
        /// Message
        message: Option<String>,
        /// Rendered children in authored order
        children: Vec<Rendered>,
    },
    /// Placeholder for a tag with no renderer
    Unknown {
        /// Raw tag
        style_name: String,
    },
    /// Placeholder for a node whose renderer failed
    Failed {
        /// Raw tag
        style_name: String,
        /// Failure description
        reason: String,
    },
}

impl Element {
    /// Rendered children, empty for leaf elements
    #[must_use]
    pub fn children(&self) -> &[Rendered] {
        match self {
            Self::Container { children } | Self::Card { children, .. } | Self::Alert { children, .. } => {
                children
            }
            _ => &[],
        }
    }
}

impl Rendered {
    /// Serialise subtree as HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }

    /// Number of nodes in this subtree, including itself
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.element.children().iter().map(Rendered::count).sum::<usize>()
    }
}

/// Serialise a sequence of top-level nodes as HTML
#[must_use]
pub fn to_html(nodes: &[Rendered]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_html(node, &mut out);
    }
    out
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `url` is relative or uses an allowed scheme
///
/// Whitespace and control characters are ignored when reading the scheme,
/// as browsers do.
#[must_use]
pub fn is_safe_url(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let scheme_end = compact.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if compact[i..].starts_with(':') => {
            let scheme = &compact[..i];
            SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme))
        }
        _ => true,
    }
}

fn safe_url(url: &str) -> &str {
    if is_safe_url(url) {
        url
    } else {
        "#"
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn open(out: &mut String, tag: &str, base_class: &str, node: &Rendered, extra: &str) {
    let class = match &node.css {
        Some(css) if !css.is_empty() => format!("{base_class} {css}"),
        _ => base_class.to_string(),
    };
    let _ = write!(
        out,
        "<{tag} class=\"{}\" data-key=\"{}\"{extra}>",
        escape(&class),
        node.key
    );
}

fn write_children(children: &[Rendered], out: &mut String) {
    for child in children {
        write_html(child, out);
    }
}

fn write_html(node: &Rendered, out: &mut String) {
    match &node.element {
        Element::Container { children } => {
            open(out, "div", "cms-container", node, "");
            write_children(children, out);
            out.push_str("</div>");
        }
        Element::Heading { level, text } => {
            let tag = format!("h{level}");
            open(out, &tag, "cms-heading", node, "");
            out.push_str(&escape(text));
            let _ = write!(out, "</{tag}>");
        }
        Element::Text { text } => {
            open(out, "p", "cms-text", node, "");
            out.push_str(&escape(text));
            out.push_str("</p>");
        }
        Element::Markdown { source } => {
            open(out, "div", "cms-markdown", node, "");
            // Raw HTML in authored markdown is escaped, not passed through.
            let events = pulldown_cmark::Parser::new(source).map(|event| match event {
                Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
                    link_type,
                    dest_url: CowStr::Borrowed("#"),
                    title,
                    id,
                }),
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
                    link_type,
                    dest_url: CowStr::Borrowed("#"),
                    title,
                    id,
                }),
                other => other,
            });
            pulldown_cmark::html::push_html(out, events);
            out.push_str("</div>");
        }
        Element::Image { src, alt } => {
            let extra = format!(" src=\"{}\" alt=\"{}\"", escape(safe_url(src)), escape(alt));
            open(out, "img", "cms-image", node, &extra);
        }
        Element::Link { href, label, new_tab } => {
            let target = if *new_tab {
                " target=\"_blank\" rel=\"noopener noreferrer\""
            } else {
                ""
            };
            let extra = format!(" href=\"{}\"{target}", escape(safe_url(href)));
            open(out, "a", "cms-link", node, &extra);
            out.push_str(&escape(label));
            out.push_str("</a>");
        }
        Element::Button { label, href } => match href {
            Some(href) => {
                let extra = format!(" href=\"{}\" role=\"button\"", escape(safe_url(href)));
                open(out, "a", "cms-button", node, &extra);
                out.push_str(&escape(label));
                out.push_str("</a>");
            }
            None => {
                open(out, "button", "cms-button", node, " type=\"button\"");
                out.push_str(&escape(label));
                out.push_str("</button>");
            }
        },
        Element::Card { title, children } => {
            open(out, "section", "cms-card", node, "");
            if let Some(title) = title {
                let _ = write!(out, "<header>{}</header>", escape(title));
            }
            write_children(children, out);
            out.push_str("</section>");
        }
        Element::Divider => {
            open(out, "hr", "cms-divider", node, "");
        }
        Element::Alert {
            severity,
            message,
            children,
        } => {
            let class = format!("cms-alert cms-alert-{severity}");
            open(out, "div", &class, node, " role=\"alert\"");
            if let Some(message) = message {
                let _ = write!(out, "<p>{}</p>", escape(message));
            }
            write_children(children, out);
            out.push_str("</div>");
        }
        Element::Unknown { style_name } => {
            open(out, "div", "cms-unknown", node, "");
            let _ = write!(out, "Unknown style: {}", escape(style_name));
            out.push_str("</div>");
        }
        Element::Failed { style_name, reason } => {
            open(out, "div", "cms-render-error", node, "");
            let _ = write!(out, "{}: {}", escape(style_name), escape(reason));
            out.push_str("</div>");
        }
    }
}
