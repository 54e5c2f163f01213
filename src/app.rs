use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::incident_detail::IncidentDetail;
use crate::components::incidents_list::IncidentsList;
use crate::components::toast::ToastContainer;
use crate::services::notification_service::provide_notification_state;

#[component]
pub fn App() -> impl IntoView {
    // Toast state is the only shared context; each view owns its fetch state
    // and rebuilds it from scratch on navigation.
    provide_notification_state();

    view! {
        <Router>
            <ToastContainer />

            <Routes fallback=|| view! {
                <div class="text-center py-16 text-zinc-500">"404 - Page Not Found"</div>
            }>
                <Route path=path!("/") view=IncidentsList />
                <Route path=path!("/incidents/:id") view=IncidentDetail />
            </Routes>
        </Router>
    }
}
