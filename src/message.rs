//! Chat messages and batch cleaning.
//!
//! A [`Message`] is kept as the raw JSON object the host stores, so fields
//! the cleaner does not know about round-trip untouched. Only string values
//! in the primary `mes` field and the `extra.display_text` / `extra.original`
//! variants are cleaned; anything else is skipped.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{cleaner::clean, config::CleanerConfig};

/// Key of the primary text field.
pub const PRIMARY_FIELD: &str = "mes";
/// Key of the object holding auxiliary text variants.
pub const EXTRA_FIELD: &str = "extra";
/// Auxiliary text variants, cleaned before the primary field.
pub const AUXILIARY_FIELDS: [&str; 2] = ["display_text", "original"];

/// One record of a host's chat history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Map<String, Value>);

impl Message {
    /// A message whose primary field is `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(PRIMARY_FIELD.to_string(), Value::String(text.into()));
        Self(fields)
    }

    /// Attach an auxiliary text variant.
    #[must_use]
    pub fn with_auxiliary(mut self, field: &str, text: impl Into<String>) -> Self {
        let extra = self
            .0
            .entry(EXTRA_FIELD)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(extra) = extra {
            extra.insert(field.to_string(), Value::String(text.into()));
        }
        self
    }

    /// The primary text, if it is a string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.0.get(PRIMARY_FIELD).and_then(Value::as_str)
    }

    /// An auxiliary variant, if present and a string.
    #[must_use]
    pub fn auxiliary(&self, field: &str) -> Option<&str> {
        self.0
            .get(EXTRA_FIELD)
            .and_then(|extra| extra.get(field))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Clean a JSON value in place if it is a string.
///
/// Returns the number of characters removed; non-string values count zero.
pub fn clean_field(value: &mut Value, config: &CleanerConfig) -> usize {
    let Value::String(text) = value else {
        return 0;
    };
    let res = clean(text, config);
    let removed = res.removed;
    if removed > 0 {
        *text = res.text.into_owned();
    }
    removed
}

/// Clean every text field of `message` and sum the removals.
///
/// Auxiliary variants go first, then the primary field; each is cleaned
/// independently.
pub fn clean_message(message: &mut Message, config: &CleanerConfig) -> usize {
    let mut total = 0;
    if let Some(Value::Object(extra)) = message.0.get_mut(EXTRA_FIELD) {
        for field in AUXILIARY_FIELDS {
            if let Some(value) = extra.get_mut(field) {
                total += clean_field(value, config);
            }
        }
    }
    if let Some(value) = message.0.get_mut(PRIMARY_FIELD) {
        total += clean_field(value, config);
    }
    total
}

/// Clean a whole chat, in order, and return the total removed.
pub fn clean_chat(chat: &mut [Message], config: &CleanerConfig) -> usize {
    let total = chat.iter_mut().map(|m| clean_message(m, config)).sum();
    debug!("cleaned {} messages, removed {total}", chat.len());
    total
}

/// Count what [`clean_chat`] would remove from the primary fields.
///
/// Auxiliary variants are not counted, and nothing is modified.
#[must_use]
pub fn check_chat(chat: &[Message], config: &CleanerConfig) -> usize {
    chat.iter()
        .filter_map(Message::text)
        .map(|text| clean(text, config).removed)
        .sum()
}
