//! Style type registry
//!
//! Closed mapping from `style_name` tags to the renderers this crate knows.
//! Anything else becomes [`StyleKind::Unknown`] and degrades to a visible
//! placeholder instead of failing the tree.

use std::fmt;

/// Known style kinds, plus the fallback
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Generic wrapper (`container`, `div`)
    Container,
    /// Section heading
    Heading,
    /// Plain text block
    Text,
    /// Markdown block
    Markdown,
    /// Image
    Image,
    /// Hyperlink
    Link,
    /// Call-to-action button
    Button,
    /// Titled card wrapping children
    Card,
    /// Horizontal rule
    Divider,
    /// Highlighted notice wrapping children
    Alert,
    /// Tag with no renderer; carries the raw tag
    Unknown(String),
}

impl StyleKind {
    /// Every known kind
    pub const ALL: [StyleKind; 10] = [
        Self::Container,
        Self::Heading,
        Self::Text,
        Self::Markdown,
        Self::Image,
        Self::Link,
        Self::Button,
        Self::Card,
        Self::Divider,
        Self::Alert,
    ];

    /// Look up kind for a tag
    ///
    /// Matching is exact; the CMS emits lower-case tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "container" | "div" => Self::Container,
            "heading" => Self::Heading,
            "text" | "plaintext" => Self::Text,
            "markdown" => Self::Markdown,
            "image" => Self::Image,
            "link" => Self::Link,
            "button" => Self::Button,
            "card" => Self::Card,
            "divider" => Self::Divider,
            "alert" => Self::Alert,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Canonical tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Container => "container",
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Image => "image",
            Self::Link => "link",
            Self::Button => "button",
            Self::Card => "card",
            Self::Divider => "divider",
            Self::Alert => "alert",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this kind renders its children
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container | Self::Card | Self::Alert)
    }

    /// Whether a renderer exists for this kind
    #[inline]
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tags_round_trip() {
        for kind in StyleKind::ALL {
            assert_eq!(StyleKind::from_tag(kind.tag()), kind);
            assert!(kind.is_known());
        }
    }

    #[test]
    fn aliases_map_to_canonical_kind() {
        assert_eq!(StyleKind::from_tag("div"), StyleKind::Container);
        assert_eq!(StyleKind::from_tag("plaintext"), StyleKind::Text);
    }

    #[test]
    fn unknown_tag_keeps_raw_text() {
        let kind = StyleKind::from_tag("unknown_tag_xyz");
        assert_eq!(kind, StyleKind::Unknown("unknown_tag_xyz".into()));
        assert_eq!(kind.to_string(), "unknown_tag_xyz");
        assert!(!kind.is_known());
    }

    #[test]
    fn container_kinds() {
        assert!(StyleKind::Card.is_container());
        assert!(!StyleKind::Heading.is_container());
        assert!(!StyleKind::Unknown("x".into()).is_container());
    }
}
