//! Cleaner switches and the persisted settings record.
//!
//! [`CleanerConfig`] is the value the cleaning functions take. [`Settings`]
//! is the camelCase record a host keeps in its settings store: missing keys
//! fall back to their defaults, and non-boolean values are read by
//! truthiness rather than rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Switches controlling a single cleaning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "four independent switches"
)]
pub struct CleanerConfig {
    /// Strip every period, not just ellipsis runs.
    pub remove_all_dots: bool,
    /// Treat `..` as an ellipsis.
    pub treat_two_dots: bool,
    /// Leave a single space where removing a run would fuse two words.
    pub preserve_space: bool,
    /// Leave code and markup untouched.
    pub protect_code: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            remove_all_dots: false,
            treat_two_dots: false,
            preserve_space: true,
            protect_code: true,
        }
    }
}

/// A settings key, as exposed by a host's settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    AutoRemove,
    RemoveAllDots,
    TreatTwoDots,
    PreserveSpace,
    ProtectCode,
    Notifications,
}

impl SettingKey {
    /// The key's name in the persisted record.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoRemove => "autoRemove",
            Self::RemoveAllDots => "removeAllDots",
            Self::TreatTwoDots => "treatTwoDots",
            Self::PreserveSpace => "preserveSpace",
            Self::ProtectCode => "protectCode",
            Self::Notifications => "notifications",
        }
    }
}

/// Persisted settings record.
///
/// Unknown keys are kept in `other` so that saving does not drop data
/// written by a newer host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "the record is six independent flags"
)]
pub struct Settings {
    #[serde(default, deserialize_with = "truthy")]
    pub auto_remove: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub remove_all_dots: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub treat_two_dots: bool,
    #[serde(default = "enabled", deserialize_with = "truthy")]
    pub preserve_space: bool,
    #[serde(default = "enabled", deserialize_with = "truthy")]
    pub protect_code: bool,
    #[serde(default = "enabled", deserialize_with = "truthy")]
    pub notifications: bool,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_remove: false,
            remove_all_dots: false,
            treat_two_dots: false,
            preserve_space: true,
            protect_code: true,
            notifications: true,
            other: Map::new(),
        }
    }
}

impl Settings {
    /// Read a settings record, backfilling absent keys.
    ///
    /// Anything other than a JSON object yields the defaults, mirroring a
    /// store that has no entry yet.
    ///
    /// # Errors
    /// Returns an error only if `serde_json` rejects the object itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use unellipsis::config::Settings;
    ///
    /// let settings = Settings::from_value(json!({ "treatTwoDots": 1 })).unwrap();
    /// assert!(settings.treat_two_dots);
    /// assert!(settings.preserve_space);
    /// ```
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }

    /// Cleaner switches derived from this record.
    #[must_use]
    pub fn cleaner_config(&self) -> CleanerConfig {
        CleanerConfig {
            remove_all_dots: self.remove_all_dots,
            treat_two_dots: self.treat_two_dots,
            preserve_space: self.preserve_space,
            protect_code: self.protect_code,
        }
    }

    #[must_use]
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::AutoRemove => self.auto_remove,
            SettingKey::RemoveAllDots => self.remove_all_dots,
            SettingKey::TreatTwoDots => self.treat_two_dots,
            SettingKey::PreserveSpace => self.preserve_space,
            SettingKey::ProtectCode => self.protect_code,
            SettingKey::Notifications => self.notifications,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::AutoRemove => &mut self.auto_remove,
            SettingKey::RemoveAllDots => &mut self.remove_all_dots,
            SettingKey::TreatTwoDots => &mut self.treat_two_dots,
            SettingKey::PreserveSpace => &mut self.preserve_space,
            SettingKey::ProtectCode => &mut self.protect_code,
            SettingKey::Notifications => &mut self.notifications,
        };
        *slot = value;
    }
}

const fn enabled() -> bool {
    true
}

/// JavaScript-style truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| is_truthy(&v))
}
