//! Per-language edit state
//!
//! Opened when a page or section is loaded for editing. Holds the initial
//! and current value of every visible field; dropping it discards the edits.
//! Saving is the caller's job, via [`EditState::changes`].

use crate::error::FieldError;
use crate::field::{FieldDescriptor, FieldKind, Language};
use crate::resolve::{get_content_value, get_property_value, PROPERTY_LANGUAGE_ID};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value of one field in an edit session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Non-translatable field
    Single(String),
    /// Translatable field, keyed by language id
    PerLanguage(BTreeMap<u64, String>),
}

/// Changed value ready to be sent to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    /// Field id
    pub field_id: u64,
    /// Field name
    pub name: String,
    /// Language of the value; [`PROPERTY_LANGUAGE_ID`] for properties
    pub language_id: u64,
    /// New content
    pub content: String,
}

#[derive(Debug, Clone)]
struct Entry {
    field_id: u64,
    kind: FieldKind,
    disabled: bool,
    initial: FieldValue,
    current: FieldValue,
}

/// Edit session over a set of fields
#[derive(Debug, Clone, Default)]
pub struct EditState {
    languages: Vec<u64>,
    entries: IndexMap<String, Entry>,
}

impl EditState {
    /// Initialise from field metadata
    ///
    /// Hidden fields are skipped. The property bucket is never offered as an
    /// editing language.
    #[must_use]
    pub fn open(fields: &[FieldDescriptor], languages: &[Language]) -> Self {
        let languages: Vec<u64> = languages
            .iter()
            .map(|l| l.id)
            .filter(|id| *id != PROPERTY_LANGUAGE_ID)
            .collect();

        let entries = fields
            .iter()
            .filter(|f| !f.hidden)
            .map(|field| {
                let value = if field.translatable {
                    FieldValue::PerLanguage(
                        languages
                            .iter()
                            .map(|id| (*id, get_content_value(field, *id)))
                            .collect(),
                    )
                } else {
                    FieldValue::Single(get_property_value(field))
                };
                let entry = Entry {
                    field_id: field.id,
                    kind: field.kind.clone(),
                    disabled: field.disabled,
                    initial: value.clone(),
                    current: value,
                };
                (field.name.clone(), entry)
            })
            .collect::<IndexMap<_, _>>();

        tracing::debug!(fields = entries.len(), languages = languages.len(), "edit state opened");
        Self { languages, entries }
    }

    /// Editing languages, in the order given
    #[must_use]
    pub fn languages(&self) -> &[u64] {
        &self.languages
    }

    /// Visible field names, in the order given
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Widget type of a field
    #[must_use]
    pub fn kind(&self, field: &str) -> Option<&FieldKind> {
        self.entries.get(field).map(|e| &e.kind)
    }

    /// Current value of a field
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<&FieldValue> {
        self.entries.get(field).map(|e| &e.current)
    }

    /// Current value of a field in a language
    ///
    /// `language_id` is ignored for non-translatable fields.
    #[must_use]
    pub fn value(&self, field: &str, language_id: u64) -> Option<&str> {
        match &self.entries.get(field)?.current {
            FieldValue::Single(v) => Some(v),
            FieldValue::PerLanguage(map) => map.get(&language_id).map(String::as_str),
        }
    }

    /// Update a value
    ///
    /// `language_id` is ignored for non-translatable fields.
    ///
    /// # Errors
    /// - [`FieldError::UnknownField`] if the field is not part of this session
    /// - [`FieldError::Disabled`] if the field is read-only
    /// - [`FieldError::UnknownLanguage`] for a translatable field and a language not being edited
    pub fn set_value(
        &mut self,
        field: &str,
        language_id: u64,
        value: impl Into<String>,
    ) -> Result<(), FieldError> {
        let entry = self
            .entries
            .get_mut(field)
            .ok_or_else(|| FieldError::UnknownField(field.to_string()))?;
        if entry.disabled {
            return Err(FieldError::Disabled(field.to_string()));
        }
        match &mut entry.current {
            FieldValue::Single(v) => *v = value.into(),
            FieldValue::PerLanguage(map) => {
                let slot = map.get_mut(&language_id).ok_or_else(|| FieldError::UnknownLanguage {
                    field: field.to_string(),
                    language_id,
                })?;
                *slot = value.into();
            }
        }
        Ok(())
    }

    /// Whether any value differs from its initial state
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.entries.values().any(|e| e.initial != e.current)
    }

    /// Names of fields with changed values
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.initial != e.current)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Changed values, one per field and language
    #[must_use]
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut out = Vec::new();
        for (name, entry) in &self.entries {
            match (&entry.initial, &entry.current) {
                (FieldValue::Single(before), FieldValue::Single(after)) if before != after => {
                    out.push(FieldChange {
                        field_id: entry.field_id,
                        name: name.clone(),
                        language_id: PROPERTY_LANGUAGE_ID,
                        content: after.clone(),
                    });
                }
                (FieldValue::PerLanguage(before), FieldValue::PerLanguage(after)) => {
                    for (language_id, content) in after {
                        if before.get(language_id) != Some(content) {
                            out.push(FieldChange {
                                field_id: entry.field_id,
                                name: name.clone(),
                                language_id: *language_id,
                                content: content.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Restore every field to its initial value
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.current = entry.initial.clone();
        }
    }
}
