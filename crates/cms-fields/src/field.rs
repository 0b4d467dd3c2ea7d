//! Field metadata
//!
//! Server-defined descriptions of the editable fields of a page or section.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag
///
/// Decides which editor widget is used. Tags without a widget map to
/// [`FieldKind::Unknown`], which editors show as a raw text input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    Textarea,
    /// Markdown editor
    Markdown,
    /// Numeric input
    Number,
    /// Boolean toggle
    Checkbox,
    /// Choice from options
    Select,
    /// Colour picker
    Color,
    /// Asset picker
    Image,
    /// JSON editor
    Json,
    /// Date picker
    Date,
    /// Tag with no widget
    Unknown(String),
}

impl FieldKind {
    /// Look up kind for a tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "markdown" | "markdown-inline" => Self::Markdown,
            "number" => Self::Number,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "color" => Self::Color,
            "image" => Self::Image,
            "json" => Self::Json,
            "date" => Self::Date,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Canonical tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Markdown => "markdown",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Color => "color",
            Self::Image => "image",
            Self::Json => "json",
            Self::Date => "date",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether values of this kind are read as booleans
    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.tag().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Stored value of a field in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Language the value belongs to
    pub language_id: u64,
    /// Stored content; `None` when the server sent `null`
    #[serde(default)]
    pub content: Option<String>,
}

impl Translation {
    /// Create translation
    pub fn new(language_id: u64, content: impl Into<String>) -> Self {
        Self {
            language_id,
            content: Some(content.into()),
        }
    }
}

/// Editable field of a page or section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field id
    pub id: u64,
    /// Field name, unique within its owner
    pub name: String,
    /// Widget type
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Value used when no translation exists
    #[serde(default)]
    pub default_value: Option<String>,
    /// Help text shown beside the editor
    #[serde(default)]
    pub help: Option<String>,
    /// Shown but not editable
    #[serde(default)]
    pub disabled: bool,
    /// Not shown
    #[serde(default)]
    pub hidden: bool,
    /// Holds one value per language
    #[serde(default)]
    pub translatable: bool,
    /// Stored values
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl FieldDescriptor {
    /// Create field with no stored values
    pub fn new(id: u64, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            default_value: None,
            help: None,
            disabled: false,
            hidden: false,
            translatable: false,
            translations: Vec::new(),
        }
    }

    /// With default value
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// With translatable flag
    #[must_use]
    pub fn translatable(mut self, translatable: bool) -> Self {
        self.translatable = translatable;
        self
    }

    /// With disabled flag
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// With hidden flag
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// With stored value
    #[must_use]
    pub fn with_translation(mut self, language_id: u64, content: impl Into<String>) -> Self {
        self.translations.push(Translation::new(language_id, content));
        self
    }
}

/// Language content can be edited in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language id
    pub id: u64,
    /// Locale code, e.g. `de-CH`
    pub locale: String,
    /// Display name
    pub title: String,
}

impl Language {
    /// Create language
    pub fn new(id: u64, locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            locale: locale.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for tag in ["text", "textarea", "markdown", "number", "checkbox", "select", "color", "image", "json", "date"] {
            assert_eq!(FieldKind::from_tag(tag).tag(), tag);
        }
        assert_eq!(FieldKind::from_tag("markdown-inline"), FieldKind::Markdown);
        assert_eq!(FieldKind::from_tag("slider"), FieldKind::Unknown("slider".into()));
    }

    #[test]
    fn deserializes_server_shape() {
        let field: FieldDescriptor = serde_json::from_str(
            r#"{
                "id": 5,
                "name": "title",
                "type": "markdown-inline",
                "default_value": "Hi",
                "translatable": true,
                "translations": [
                    { "language_id": 2, "content": "Hola" },
                    { "language_id": 3, "content": null }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(field.kind, FieldKind::Markdown);
        assert!(field.translatable);
        assert!(!field.hidden);
        assert_eq!(field.translations[1].content, None);
    }

    #[test]
    fn kind_serializes_as_tag() {
        let json = serde_json::to_string(&FieldKind::Checkbox).unwrap();
        assert_eq!(json, "\"checkbox\"");
    }
}
