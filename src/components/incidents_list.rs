//! Incidents List View
//!
//! Entry point: a filterable list of incident summaries. Selecting a row
//! navigates to the detail view; changing the filter refetches the list.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::design_system::LoadingSpinner;
use crate::models::{IncidentSummary, StatusFilter};
use crate::services::notification_service::use_notification_state;
use crate::utils::display::{color_for_severity, format_timestamp, severity_label};

/// Filter tab button; the active filter gets the inverted style.
#[component]
fn FilterButton(filter: StatusFilter, current: RwSignal<StatusFilter>) -> impl IntoView {
    view! {
        <button
            class=move || {
                if current.get() == filter {
                    "px-4 py-2 rounded text-sm bg-zinc-900 text-white border border-zinc-900"
                } else {
                    "px-4 py-2 rounded text-sm bg-white text-zinc-600 border border-zinc-200 \
                     hover:border-zinc-400 transition-colors"
                }
            }
            on:click=move |_| current.set(filter)
        >
            {filter.label()}
        </button>
    }
}

/// Summary card for one incident. Click-through to the detail view.
#[component]
fn IncidentCard(incident: IncidentSummary) -> impl IntoView {
    let navigate = use_navigate();
    let severity_color = color_for_severity(incident.severity.as_deref());
    let severity_text = severity_label(incident.severity.as_deref()).to_string();
    let started = format_timestamp(&incident.start_time, false);
    let incident_id = incident.id;

    let handle_click = move |_: ev::MouseEvent| {
        navigate(&format!("/incidents/{}", incident_id), Default::default());
    };

    view! {
        <div
            class="bg-white border border-zinc-200 rounded-md p-5 cursor-pointer \
                   hover:border-zinc-900 transition-colors"
            on:click=handle_click
        >
            <div class="flex items-center gap-3 mb-3">
                <span class="text-sm font-semibold text-zinc-900">
                    {format!("#{}", incident.id)}
                </span>
                <span
                    class="px-2.5 py-1 rounded-full text-xs font-medium text-white"
                    style:background-color=severity_color
                >
                    {severity_text}
                </span>
                <span class="px-2.5 py-1 rounded-full text-xs font-medium bg-zinc-100 \
                             text-zinc-500 uppercase">
                    {incident.status.as_str()}
                </span>
            </div>

            <div class="flex items-center gap-3 mb-3">
                <div class="text-base font-medium text-zinc-900">
                    {incident.primary_service.clone()}
                </div>
                <div class="text-sm text-zinc-500 px-2 py-0.5 bg-zinc-100 rounded">
                    {incident.environment.clone()}
                </div>
            </div>

            <div class="text-[13px] text-zinc-400">
                {format!("Started: {}", started)}
            </div>
        </div>
    }
}

/// Body of the list view, one branch per state: loading takes precedence
/// until the request completes, then a failed fetch shows the error display
/// and an empty result the empty-state message — never each other's.
#[component]
pub fn IncidentListContent(
    incidents: RwSignal<Vec<IncidentSummary>>,
    is_loading: RwSignal<bool>,
    load_error: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || {
            if is_loading.get() {
                view! {
                    <div class="flex flex-col items-center gap-4 py-16 text-zinc-500">
                        <LoadingSpinner size="lg" />
                        "Loading incidents..."
                    </div>
                }
                .into_any()
            } else if let Some(error) = load_error.get() {
                view! {
                    <div class="text-center py-16 text-red-700">
                        <div class="font-medium mb-1">"Failed to load incidents"</div>
                        <div class="text-sm text-zinc-500">{error}</div>
                    </div>
                }
                .into_any()
            } else if incidents.get().is_empty() {
                view! {
                    <div class="text-center py-16 text-zinc-400">"No incidents found"</div>
                }
                .into_any()
            } else {
                view! {
                    <div class="grid gap-4">
                        {incidents
                            .get()
                            .into_iter()
                            .map(|incident| view! { <IncidentCard incident=incident /> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
        }}
    }
}

#[component]
pub fn IncidentsList() -> impl IntoView {
    let incidents = RwSignal::new(Vec::<IncidentSummary>::new());
    let is_loading = RwSignal::new(true);
    let load_error = RwSignal::new(None::<String>);
    let filter = RwSignal::new(StatusFilter::All);
    let toasts = use_notification_state();

    // Monotonic request generation: only the most recent fetch may update
    // state, so two racing filter changes cannot finish out of order.
    let generation = StoredValue::new(0u64);

    let load_incidents = move |current_filter: StatusFilter| {
        let issued = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        is_loading.set(true);
        load_error.set(None);

        spawn_local(async move {
            let params: Vec<(&str, &str)> = current_filter.as_query().into_iter().collect();
            let result = api::list_incidents(&params).await;

            // Stale or post-unmount completions are discarded.
            if generation.try_get_value() != Some(issued) {
                return;
            }
            match result {
                Ok(list) => {
                    incidents.try_set(list);
                }
                Err(err) => {
                    load_error.try_set(Some(err.to_string()));
                    toasts.error("Failed to load incidents", Some(&err.to_string()));
                }
            }
            is_loading.try_set(false);
        });
    };

    // Initial fetch plus a refetch on every filter change.
    Effect::new(move |_| {
        load_incidents(filter.get());
    });

    view! {
        <div class="max-w-5xl mx-auto px-5 py-10">
            <header class="mb-10 pb-5 border-b border-zinc-200">
                <h1 class="text-3xl font-semibold text-zinc-900 mb-2">"BLACKBOX"</h1>
                <p class="text-base text-zinc-500">"Incident Reasoning Platform"</p>
            </header>

            <div class="flex gap-2.5 mb-8">
                <FilterButton filter=StatusFilter::All current=filter />
                <FilterButton filter=StatusFilter::Open current=filter />
                <FilterButton filter=StatusFilter::Resolved current=filter />
            </div>

            <IncidentListContent
                incidents=incidents
                is_loading=is_loading
                load_error=load_error
            />
        </div>
    }
}
