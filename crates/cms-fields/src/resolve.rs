//! Field value resolution
//!
//! Pure lookups computing the display/edit value of a field. Fallback chain:
//! matching non-null translation, then the field default, then `""`.

use crate::field::FieldDescriptor;

/// Language bucket holding values of non-translatable fields
pub const PROPERTY_LANGUAGE_ID: u64 = 1;

const TRUTHY: [&str; 4] = ["1", "true", "on", "yes"];

/// Value of `field` in `language_id`
#[must_use]
pub fn get_content_value(field: &FieldDescriptor, language_id: u64) -> String {
    field
        .translations
        .iter()
        .find(|t| t.language_id == language_id)
        .and_then(|t| t.content.clone())
        .or_else(|| field.default_value.clone())
        .unwrap_or_default()
}

/// Value of a non-translatable field
#[must_use]
pub fn get_property_value(field: &FieldDescriptor) -> String {
    get_content_value(field, PROPERTY_LANGUAGE_ID)
}

/// Property value read as a flag
///
/// True for `1`, `true`, `on` and `yes`, ignoring case and surrounding
/// whitespace.
#[must_use]
pub fn get_property_value_as_boolean(field: &FieldDescriptor) -> bool {
    is_truthy(&get_property_value(field))
}

/// Whether `value` is one of the truthy tokens
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, Translation};

    fn greeting() -> FieldDescriptor {
        FieldDescriptor::new(1, "greeting", FieldKind::Text)
            .translatable(true)
            .with_default("Hi")
            .with_translation(2, "Hola")
    }

    #[test]
    fn matching_translation_wins() {
        assert_eq!(get_content_value(&greeting(), 2), "Hola");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(get_content_value(&greeting(), 3), "Hi");
    }

    #[test]
    fn null_translation_falls_back_to_default() {
        let mut field = greeting();
        field.translations.push(Translation {
            language_id: 4,
            content: None,
        });
        assert_eq!(get_content_value(&field, 4), "Hi");
    }

    #[test]
    fn empty_translation_is_kept() {
        let field = greeting().with_translation(5, "");
        assert_eq!(get_content_value(&field, 5), "");
    }

    #[test]
    fn no_default_gives_empty_string() {
        let field = FieldDescriptor::new(1, "x", FieldKind::Text);
        assert_eq!(get_content_value(&field, 2), "");
    }

    #[test]
    fn property_reads_sentinel_language() {
        let field = FieldDescriptor::new(1, "css", FieldKind::Text)
            .with_translation(2, "de")
            .with_translation(PROPERTY_LANGUAGE_ID, "wide");
        assert_eq!(get_property_value(&field), "wide");
    }

    #[test]
    fn boolean_tokens() {
        for value in ["1", "true", "on", "yes", "TRUE", " Yes "] {
            let field = FieldDescriptor::new(1, "flag", FieldKind::Checkbox).with_translation(PROPERTY_LANGUAGE_ID, value);
            assert!(get_property_value_as_boolean(&field), "{value:?} should be true");
        }
        for value in ["0", "", "no", "false", "off", "2"] {
            let field = FieldDescriptor::new(1, "flag", FieldKind::Checkbox).with_translation(PROPERTY_LANGUAGE_ID, value);
            assert!(!get_property_value_as_boolean(&field), "{value:?} should be false");
        }
    }

    #[test]
    fn boolean_uses_default_when_unset() {
        let field = FieldDescriptor::new(1, "flag", FieldKind::Checkbox).with_default("1");
        assert!(get_property_value_as_boolean(&field));
    }
}
