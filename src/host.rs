//! Host integration: events, chat refresh and user notices.
//!
//! The cleaner never calls into a host. Instead a host forwards its events to
//! [`App::handle`], and `App` cleans the chat the host exposes through
//! [`ChatHost`], asks it to persist and redraw, and reports the outcome to a
//! [`Notifier`]. Failures on the host side are logged and never undo a
//! clean that has already been applied.

use log::{debug, warn};

use crate::{
    config::{SettingKey, Settings},
    io::SettingsStore,
    message::{Message, check_chat, clean_chat},
    notify::{Notifier, Severity, found_notice, removed_notice},
};

/// A chat owned by the host application.
pub trait ChatHost {
    fn chat(&self) -> &[Message];

    fn chat_mut(&mut self) -> &mut [Message];

    /// Persist the chat after it was cleaned.
    ///
    /// # Errors
    /// Host-specific; reported errors are logged by the caller.
    fn save_chat(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Redraw the chat after it was cleaned.
    ///
    /// # Errors
    /// Host-specific; reported errors are logged by the caller.
    fn render_chat(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl ChatHost for Vec<Message> {
    fn chat(&self) -> &[Message] {
        self
    }

    fn chat_mut(&mut self) -> &mut [Message] {
        self
    }
}

/// Events a host forwards to [`App::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A new message arrived in the chat.
    MessageReceived,
    /// The user sent a message.
    MessageSent,
    /// The user pressed "Clean now".
    CleanRequested,
    /// The user pressed "Check".
    CheckRequested,
}

/// Glue between a host, its settings and the cleaner.
#[derive(Debug)]
pub struct App<N> {
    settings: Settings,
    notifier: N,
}

impl<N: Notifier> App<N> {
    #[must_use]
    pub fn new(settings: Settings, notifier: N) -> Self {
        Self { settings, notifier }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// React to a host event. Returns the count cleaned or found.
    pub fn handle<H: ChatHost>(&self, host: &mut H, event: HostEvent) -> usize {
        match event {
            HostEvent::MessageReceived | HostEvent::MessageSent => {
                if self.settings.auto_remove {
                    self.remove_all(host)
                } else {
                    0
                }
            }
            HostEvent::CleanRequested => self.remove_all(host),
            HostEvent::CheckRequested => self.check_all(host),
        }
    }

    /// Clean every message, then save and redraw the chat.
    pub fn remove_all<H: ChatHost>(&self, host: &mut H) -> usize {
        let count = clean_chat(host.chat_mut(), &self.settings.cleaner_config());
        refresh(host);
        let (notice, severity) = removed_notice(count);
        self.notify(&notice, severity);
        count
    }

    /// Count removable characters in primary fields without changing them.
    ///
    /// The result is always reported, even with notices switched off.
    pub fn check_all<H: ChatHost>(&self, host: &H) -> usize {
        let count = check_chat(host.chat(), &self.settings.cleaner_config());
        self.notifier.notify(&found_notice(count), Severity::Info);
        count
    }

    /// Change one setting, persist it and acknowledge the change.
    ///
    /// A failed save is logged; the new value stays in effect.
    pub fn update_setting<S: SettingsStore + ?Sized>(
        &mut self,
        store: &S,
        key: SettingKey,
        value: bool,
    ) {
        self.settings.set(key, value);
        if let Err(err) = store.save(&self.settings) {
            warn!("failed to save setting {}: {err}", key.name());
        }
        let on_off = if value { "ON" } else { "OFF" };
        match key {
            SettingKey::AutoRemove => {
                self.notify(&format!("Auto Remove: {on_off}"), Severity::Info);
            }
            SettingKey::ProtectCode => {
                self.notify(&format!("Code Protection: {on_off}"), Severity::Info);
            }
            SettingKey::RemoveAllDots if value => {
                self.notify("Warning: Will remove ALL periods!", Severity::Warning);
            }
            SettingKey::Notifications if value => {
                self.notify("Notifications Enabled", Severity::Success);
            }
            _ => {}
        }
    }

    fn notify(&self, message: &str, severity: Severity) {
        if self.settings.notifications {
            self.notifier.notify(message, severity);
        } else {
            debug!("notice suppressed: {message}");
        }
    }
}

fn refresh<H: ChatHost>(host: &mut H) {
    if let Err(err) = host.save_chat() {
        warn!("failed to save chat: {err:#}");
    }
    if let Err(err) = host.render_chat() {
        warn!("failed to render chat: {err:#}");
    }
}
