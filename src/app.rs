use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::sidebar::Sidebar;
use crate::components::toast::{ToastContainer, Toasts};
use crate::pages::analyze::AnalyzePage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::settings::SettingsPage;

#[component]
pub fn App() -> impl IntoView {
    let toasts = Toasts::new();
    provide_context(toasts);

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=AnalyzePage />
                        <Route path=path!("/dashboard") view=DashboardPage />
                        <Route path=path!("/settings") view=SettingsPage />
                    </Routes>
                </main>
            </div>
            <ToastContainer toasts=toasts />
        </Router>
    }
}
