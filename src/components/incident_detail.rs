//! Incident Detail View
//!
//! Primary analysis interface. The timeline is the hero: events render in
//! the exact order the server supplied, with per-event expand/collapse state
//! that lives only as long as the view does.

use std::collections::HashSet;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::components::design_system::{Button, ButtonVariant};
use crate::models::{Incident, IncidentStatus, TimelineEvent};
use crate::services::notification_service::use_notification_state;
use crate::utils::display::{color_for_level, format_timestamp, severity_label};

/// Copy-on-write toggle: presence removes, absence inserts. The caller
/// replaces the whole set, keeping state updates pure and independent of
/// rendering.
pub fn toggled(expanded: &HashSet<i64>, event_id: i64) -> HashSet<i64> {
    let mut next = expanded.clone();
    if !next.remove(&event_id) {
        next.insert(event_id);
    }
    next
}

/// Resolution is offered only while the incident is still open.
pub fn offers_resolve(incident: &Incident) -> bool {
    incident.status == IncidentStatus::Open
}

/// A resolve acknowledgement warrants a refetch only while its incident is
/// still the one on screen; the route may have moved on mid-flight.
pub fn refetch_after_resolve(current_id: Option<i64>, resolved_id: i64) -> bool {
    current_id == Some(resolved_id)
}

/// One timeline row: marker dot, connecting line (except after the last
/// event), collapsed header plus message, and expandable correlation detail.
#[component]
pub fn TimelineEventRow(
    event: TimelineEvent,
    is_last: bool,
    expanded: RwSignal<HashSet<i64>>,
    #[prop(into)] on_toggle: Callback<i64>,
) -> impl IntoView {
    let event_id = event.id;
    let is_expanded = Memo::new(move |_| expanded.get().contains(&event_id));
    let level_color = color_for_level(&event.level);
    let time = format_timestamp(&event.timestamp, true);

    let level = event.level.clone();
    let service = event.service.clone();
    let message = event.message.clone();
    let request_id = event.request_id.clone();
    let correlation_reason = event.correlation_reason.clone();

    view! {
        <div class="flex gap-4">
            // Marker column
            <div class="flex flex-col items-center pt-1.5">
                <div
                    class="w-3 h-3 rounded-full shrink-0"
                    style:background-color=level_color
                />
                {(!is_last).then(|| view! {
                    <div class="w-0.5 grow bg-zinc-200 mt-1" />
                })}
            </div>

            // Event content
            <div class="flex-1 mb-4">
                <div
                    class="flex items-center justify-between px-4 py-3 bg-white border \
                           border-zinc-200 rounded-t-md cursor-pointer"
                    on:click=move |_| on_toggle.run(event_id)
                >
                    <div class="flex items-center gap-3">
                        <span class="text-[13px] font-mono text-zinc-500">{time}</span>
                        <span
                            class="px-2 py-1 rounded-full text-[11px] font-semibold \
                                   text-white uppercase"
                            style:background-color=level_color
                        >
                            {level}
                        </span>
                        <span class="text-sm font-medium text-zinc-900">{service}</span>
                    </div>
                    <span class="text-lg font-semibold text-zinc-500">
                        {move || if is_expanded.get() { "−" } else { "+" }}
                    </span>
                </div>

                <div class="px-4 py-3 bg-zinc-50 border border-t-0 border-zinc-200 \
                            rounded-b-md text-sm leading-relaxed text-zinc-700">
                    {message}
                </div>

                {move || {
                    is_expanded.get().then(|| {
                        let request_id = request_id.clone();
                        let correlation = correlation_reason.clone();
                        view! {
                            <div class="px-4 py-3 bg-zinc-100 border border-t-0 \
                                        border-zinc-200 rounded-b-md -mt-1.5 text-[13px]">
                                <div class="flex gap-3 mb-1.5">
                                    <span class="min-w-[120px] text-zinc-500 font-medium">
                                        "Event ID:"
                                    </span>
                                    <span class="font-mono text-zinc-900">{event_id}</span>
                                </div>
                                {request_id.map(|rid| view! {
                                    <div class="flex gap-3 mb-1.5">
                                        <span class="min-w-[120px] text-zinc-500 font-medium">
                                            "Request ID:"
                                        </span>
                                        <span class="font-mono text-zinc-900">{rid}</span>
                                    </div>
                                })}
                                <div class="flex gap-3">
                                    <span class="min-w-[120px] text-zinc-500 font-medium">
                                        "Correlation:"
                                    </span>
                                    <span class="font-mono text-zinc-900">{correlation}</span>
                                </div>
                            </div>
                        }
                    })
                }}
            </div>
        </div>
    }
}

/// Loaded incident: header with the conditional resolve action, root cause
/// summary, metadata strip, and the timeline.
#[component]
pub fn IncidentView(
    incident: Incident,
    expanded: RwSignal<HashSet<i64>>,
    #[prop(into)] on_toggle: Callback<i64>,
    #[prop(into)] on_resolve: Callback<ev::MouseEvent>,
) -> impl IntoView {
    let navigate = use_navigate();
    let nav_back = move |_: ev::MouseEvent| {
        navigate("/", Default::default());
    };

    let timeline_len = incident.timeline.len();
    let can_resolve = offers_resolve(&incident);
    let severity = severity_label(incident.severity.as_deref()).to_string();

    view! {
        <header class="mb-10">
            <button
                class="px-4 py-2 mb-5 border border-zinc-200 bg-white rounded text-sm \
                       text-zinc-600 hover:border-zinc-400 transition-colors"
                on:click=nav_back
            >
                "← Back to Incidents"
            </button>
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-semibold text-zinc-900">
                    {format!("Incident #{}", incident.id)}
                </h1>
                {can_resolve.then(|| view! {
                    <Button variant=ButtonVariant::Primary on_click=on_resolve>
                        "Mark as Resolved"
                    </Button>
                })}
            </div>
        </header>

        // Root Cause Summary
        <section class="mb-10">
            <h2 class="text-xl font-semibold text-zinc-900 mb-4">"Root Cause Summary"</h2>
            <div class="bg-amber-50 border border-amber-200 rounded-md p-5 mb-4">
                <p class="text-base leading-relaxed text-zinc-900">
                    {incident.root_cause_summary.clone()}
                </p>
            </div>
            <div class="flex flex-wrap gap-6 text-sm text-zinc-500">
                <span>
                    "Service: "
                    <strong class="text-zinc-900">{incident.primary_service.clone()}</strong>
                </span>
                <span>
                    "Environment: "
                    <strong class="text-zinc-900">{incident.environment.clone()}</strong>
                </span>
                <span>
                    "Events: "
                    <strong class="text-zinc-900">{incident.event_count}</strong>
                </span>
                <span>
                    "Severity: "
                    <strong class="text-zinc-900">{severity}</strong>
                </span>
            </div>
        </section>

        // Timeline - the hero
        <section class="mb-10">
            <h2 class="text-xl font-semibold text-zinc-900 mb-4">"Timeline"</h2>
            <p class="text-sm text-zinc-500 mb-6">
                "Events in strict chronological order. Click to expand details."
            </p>

            <div class="relative">
                {incident
                    .timeline
                    .iter()
                    .enumerate()
                    .map(|(index, event)| view! {
                        <TimelineEventRow
                            event=event.clone()
                            is_last=index + 1 == timeline_len
                            expanded=expanded
                            on_toggle=on_toggle
                        />
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn IncidentDetail() -> impl IntoView {
    let params = use_params_map();
    let incident = RwSignal::new(None::<Incident>);
    let is_loading = RwSignal::new(true);
    let expanded = RwSignal::new(HashSet::<i64>::new());
    let toasts = use_notification_state();

    // Monotonic request generation: a Load issued for an older route id (or
    // an older refetch) may still complete, but only the most recent one is
    // allowed to update state.
    let generation = StoredValue::new(0u64);

    let incident_id = Memo::new(move |_| {
        params
            .get()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
    });

    let load_incident = move |id: i64| {
        let issued = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        is_loading.set(true);

        spawn_local(async move {
            let result = api::get_incident(id).await;

            if generation.try_get_value() != Some(issued) {
                return;
            }
            match result {
                Ok(data) => {
                    incident.try_set(Some(data));
                }
                Err(api::ApiError::NotFound) => {
                    incident.try_set(None);
                }
                Err(err) => {
                    incident.try_set(None);
                    toasts.error("Failed to load incident", Some(&err.to_string()));
                }
            }
            is_loading.try_set(false);
        });
    };

    // Load on mount and whenever the route id changes; each navigation gets
    // a fresh expansion set.
    Effect::new(move |_| {
        expanded.set(HashSet::new());
        match incident_id.get() {
            Some(id) => load_incident(id),
            None => {
                // Non-numeric id in the URL: nothing to fetch.
                incident.set(None);
                is_loading.set(false);
            }
        }
    });

    let handle_toggle = Callback::new(move |event_id: i64| {
        let next = toggled(&expanded.get_untracked(), event_id);
        expanded.set(next);
    });

    let handle_resolve = Callback::new(move |_: ev::MouseEvent| {
        let Some(id) = incident_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match api::resolve_incident(id).await {
                Ok(()) => {
                    toasts.success(
                        "Incident resolved",
                        Some(&format!("Incident #{} marked as resolved.", id)),
                    );
                    // Full refetch rather than a local patch, so the display
                    // always reflects server truth. Skipped if the route id
                    // changed while the PATCH was in flight.
                    if refetch_after_resolve(incident_id.try_get_untracked().flatten(), id) {
                        load_incident(id);
                    }
                }
                Err(err) => {
                    leptos::logging::error!("resolve failed for incident {}: {}", id, err);
                    toasts.error("Failed to resolve incident", Some(&err.to_string()));
                }
            }
        });
    });

    view! {
        <div class="max-w-5xl mx-auto px-5 py-10">
            {move || {
                if is_loading.get() {
                    view! {
                        <div class="text-center py-16 text-zinc-500">"Loading incident..."</div>
                    }
                    .into_any()
                } else {
                    match incident.get() {
                        Some(data) => view! {
                            <IncidentView
                                incident=data
                                expanded=expanded
                                on_toggle=handle_toggle
                                on_resolve=handle_resolve
                            />
                        }
                        .into_any(),
                        None => view! {
                            <div class="text-center py-16 text-red-700">"Incident not found"</div>
                        }
                        .into_any(),
                    }
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident_with_status(status: IncidentStatus) -> Incident {
        Incident {
            id: 42,
            primary_service: "payments".into(),
            environment: "prod".into(),
            start_time: "2024-01-01T00:00:00".into(),
            end_time: None,
            severity: Some("high".into()),
            status,
            root_cause_summary: "Database timeout.".into(),
            timeline: Vec::new(),
            event_count: 0,
        }
    }

    #[test]
    fn toggle_inserts_then_removes() {
        let empty = HashSet::new();
        let one = toggled(&empty, 7);
        assert!(one.contains(&7));

        let back = toggled(&one, 7);
        assert_eq!(back, empty, "double-toggle must restore the original set");
    }

    #[test]
    fn toggle_is_copy_on_write() {
        let original: HashSet<i64> = [1, 2].into_iter().collect();
        let next = toggled(&original, 3);
        // The input set is untouched.
        assert_eq!(original.len(), 2);
        assert_eq!(next.len(), 3);
    }

    #[test]
    fn toggling_one_event_never_affects_another() {
        let original: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let next = toggled(&original, 2);
        assert!(next.contains(&1));
        assert!(next.contains(&3));
        assert!(!next.contains(&2));
    }

    #[test]
    fn multiple_events_expand_independently() {
        let mut set = HashSet::new();
        set = toggled(&set, 1);
        set = toggled(&set, 2);
        assert!(set.contains(&1) && set.contains(&2));
    }

    #[test]
    fn resolve_refetches_only_the_incident_on_screen() {
        // Resolve for #42 completed while #42 is still displayed.
        assert!(refetch_after_resolve(Some(42), 42));
        // The operator navigated to another incident mid-flight: the stale
        // acknowledgement must not trigger a refetch under the new route.
        assert!(!refetch_after_resolve(Some(43), 42));
        // Or to a route with no parsable id at all.
        assert!(!refetch_after_resolve(None, 42));
    }

    #[test]
    fn resolve_offered_iff_open() {
        assert!(offers_resolve(&incident_with_status(IncidentStatus::Open)));
        assert!(!offers_resolve(&incident_with_status(
            IncidentStatus::Resolved
        )));
    }
}
