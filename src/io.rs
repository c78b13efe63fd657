//! File helpers for chats, settings and plain text.

use std::{
    fs,
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    config::Settings,
    error::{Error, Result},
    message::Message,
};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a chat in JSON Lines form, one message object per line.
///
/// Blank lines are skipped. Line numbers in errors are one-based.
///
/// # Errors
/// Returns an error if reading fails or a line is not valid JSON.
pub fn read_chat<R: BufRead>(reader: R) -> Result<Vec<Message>> {
    let mut chat = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let message = serde_json::from_str(&line).map_err(|source| Error::Chat {
            line: idx + 1,
            source,
        })?;
        chat.push(message);
    }
    Ok(chat)
}

/// Write a chat in JSON Lines form.
///
/// # Errors
/// Returns an error if serialisation or writing fails.
pub fn write_chat<W: Write>(mut writer: W, chat: &[Message]) -> Result<()> {
    for message in chat {
        serde_json::to_writer(&mut writer, message)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a chat file.
///
/// # Errors
/// Returns an error naming the file if it cannot be read or a line is not
/// valid JSON.
pub fn load_chat(path: &Path) -> Result<Vec<Message>> {
    let file = fs::File::open(path).map_err(io_error(path))?;
    read_chat(BufReader::new(file)).map_err(|err| match err {
        Error::Chat { line, source } => Error::ChatFile {
            path: path.to_path_buf(),
            line,
            source,
        },
        Error::Stream(source) => io_error(path)(source),
        other => other,
    })
}

/// Save a chat file, replacing its contents.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_chat(path: &Path, chat: &[Message]) -> Result<()> {
    let mut buf = Vec::new();
    write_chat(&mut buf, chat)?;
    fs::write(path, buf).map_err(io_error(path))
}

/// Read a whole text file.
///
/// # Errors
/// Returns an error naming the file if it cannot be read as UTF-8.
pub fn load_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(io_error(path))
}

/// Replace the contents of a text file.
///
/// # Errors
/// Returns an error naming the file if it cannot be written.
pub fn save_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(io_error(path))
}

/// Where a host keeps its settings record.
pub trait SettingsStore {
    /// Load the record, backfilling defaults.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read.
    fn load(&self) -> Result<Settings>;

    /// Persist the record.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings kept as a JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for JsonFileStore {
    /// A missing file yields the defaults.
    fn load(&self) -> Result<Settings> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(err) => return Err(io_error(&self.path)(err)),
        };
        let settings_error = |source| Error::Settings {
            path: self.path.clone(),
            source,
        };
        let value = serde_json::from_str(&text).map_err(settings_error)?;
        Settings::from_value(value).map_err(settings_error)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let mut text = serde_json::to_string_pretty(settings)?;
        text.push('\n');
        fs::write(&self.path, text).map_err(io_error(&self.path))
    }
}
