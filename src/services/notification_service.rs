//! Toast notifications.
//!
//! Context-provided signal state so any view can surface an operator-visible
//! message. Fetch and resolve failures go through here instead of dying in
//! the console.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub toast_type: ToastType,
    pub title: String,
    pub message: Option<String>,
}

#[derive(Clone, Copy)]
pub struct NotificationState {
    pub notifications: RwSignal<Vec<Notification>>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(Vec::new()),
        }
    }

    pub fn add(&self, toast_type: ToastType, title: &str, message: Option<&str>) {
        let id = Uuid::new_v4();
        self.notifications.update(|list| {
            list.push(Notification {
                id,
                toast_type,
                title: title.to_string(),
                message: message.map(String::from),
            })
        });

        // Auto-dismiss. try_update keeps a late timer harmless if the
        // signal's owner is already gone.
        let notifications = self.notifications;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            notifications.try_update(|list| list.retain(|n| n.id != id));
        });
    }

    pub fn success(&self, title: &str, message: Option<&str>) {
        self.add(ToastType::Success, title, message);
    }

    pub fn error(&self, title: &str, message: Option<&str>) {
        self.add(ToastType::Error, title, message);
    }

    pub fn info(&self, title: &str, message: Option<&str>) {
        self.add(ToastType::Info, title, message);
    }

    pub fn remove(&self, id: Uuid) {
        self.notifications.update(|list| {
            if let Some(pos) = list.iter().position(|n| n.id == id) {
                list.remove(pos);
            }
        });
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notification_state() {
    provide_context(NotificationState::new());
}

pub fn use_notification_state() -> NotificationState {
    expect_context::<NotificationState>()
}
