//! Toast overlay rendering the notification service's queue.

use leptos::prelude::*;

use crate::services::notification_service::{use_notification_state, ToastType};

#[component]
pub fn ToastContainer() -> impl IntoView {
    let state = use_notification_state();

    view! {
        <div class="fixed top-4 right-4 z-50 w-80 space-y-2">
            <For
                each=move || state.notifications.get()
                key=|notification| notification.id
                children=move |notification| {
                    let accent = match notification.toast_type {
                        ToastType::Success => "border-l-green-600",
                        ToastType::Error => "border-l-red-600",
                        ToastType::Info => "border-l-blue-600",
                    };
                    let id = notification.id;
                    view! {
                        <div class=format!(
                            "bg-white border border-zinc-200 border-l-4 {} rounded shadow-lg \
                             px-4 py-3 flex items-start justify-between gap-3",
                            accent,
                        )>
                            <div class="min-w-0">
                                <div class="text-sm font-semibold text-zinc-900">
                                    {notification.title.clone()}
                                </div>
                                {notification.message.clone().map(|message| view! {
                                    <div class="text-xs text-zinc-500 mt-0.5 break-words">
                                        {message}
                                    </div>
                                })}
                            </div>
                            <button
                                class="text-zinc-400 hover:text-zinc-900 text-sm shrink-0"
                                on:click=move |_| state.remove(id)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
