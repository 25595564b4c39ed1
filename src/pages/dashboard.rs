use leptos::prelude::*;

use crate::components::history_panel::HistoryPanel;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="page dashboard-page">
            <h2>"Dashboard"</h2>
            <p class="page-description">
                "Analyses you saved on this device, newest first. Only the 50 most recent are kept."
            </p>
            <HistoryPanel />
        </div>
    }
}
