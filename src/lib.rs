//! Library for stripping ellipses from chat messages.
//!
//! The entry point is [`clean`], a pure function of text and
//! [`CleanerConfig`]. The remaining modules adapt it to a chat host: message
//! records, persisted settings, notices, and file helpers.

#[macro_use]
pub mod macros;

pub mod cleaner;
pub mod config;
pub mod error;
pub mod host;
pub mod io;
pub mod message;
pub mod notify;
pub mod patterns;
pub mod protect;

pub use cleaner::{CleanResult, clean};
pub use config::{CleanerConfig, SettingKey, Settings};
pub use error::Error;
pub use host::{App, ChatHost, HostEvent};
pub use io::{
    JsonFileStore, SettingsStore, load_chat, load_text, read_chat, save_chat, save_text,
    write_chat,
};
pub use message::{Message, check_chat, clean_chat, clean_message};
pub use notify::{LogNotifier, Notifier, Severity};
