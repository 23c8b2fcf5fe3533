//! User-visible notices (toasts) raised by services and the app shell.
//!
//! DESIGN
//! ======
//! Notices stack in the top-right corner, oldest first, and dismiss
//! themselves after a timeout. Hovering a notice pauses its countdown, and
//! losing window focus pauses all of them. Time only moves through
//! [`NoticeState::tick`], which a browser interval drives.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use leptos::prelude::{RwSignal, Update};
use uuid::Uuid;

use crate::config::DEFAULT_NOTICE_TIMEOUT_MS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Error,
    Info,
    Success,
}

impl NoticeLevel {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Error => "notice--error",
            Self::Info => "notice--info",
            Self::Success => "notice--success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub remaining_ms: u32,
    /// Paused by hover.
    pub paused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    pub timeout_ms: u32,
    /// Window lost focus; every countdown is held.
    pub focus_lost: bool,
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_NOTICE_TIMEOUT_MS)
    }
}

impl NoticeState {
    #[must_use]
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self { items: Vec::new(), timeout_ms, focus_lost: false }
    }

    /// Append a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Notice {
            id,
            level,
            message: message.into(),
            remaining_ms: self.timeout_ms,
            paused: false,
        });
        id
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|n| n.id != id);
    }

    pub fn pause(&mut self, id: Uuid) {
        self.set_paused(id, true);
    }

    pub fn resume(&mut self, id: Uuid) {
        self.set_paused(id, false);
    }

    fn set_paused(&mut self, id: Uuid, paused: bool) {
        if let Some(notice) = self.items.iter_mut().find(|n| n.id == id) {
            notice.paused = paused;
        }
    }

    pub fn pause_all(&mut self) {
        self.focus_lost = true;
    }

    pub fn resume_all(&mut self) {
        self.focus_lost = false;
    }

    /// Advance countdowns by `elapsed_ms` and drop expired notices.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.focus_lost {
            return;
        }
        for notice in self.items.iter_mut().filter(|n| !n.paused) {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.items.retain(|n| n.remaining_ms > 0);
    }
}

/// Sink for user-visible notices, injected into services.
pub trait Notifier: Send + Sync {
    fn raise(&self, level: NoticeLevel, message: &str);

    fn error(&self, message: &str) {
        self.raise(NoticeLevel::Error, message);
    }
}

impl Notifier for RwSignal<NoticeState> {
    fn raise(&self, level: NoticeLevel, message: &str) {
        self.update(|state| {
            state.push(level, message);
        });
    }
}
