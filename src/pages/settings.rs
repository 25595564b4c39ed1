use leptos::prelude::*;
use log::info;

use crate::config::{AppConfig, DEFAULT_BACKEND_URL};
use crate::storage::BrowserStorage;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let (backend_url, set_backend_url) = signal(String::new());
    let (status, set_status) = signal::<Option<String>>(None);

    // Load the saved backend URL on mount
    Effect::new(move |_| {
        let config = AppConfig::load(&BrowserStorage);
        set_backend_url.set(config.backend_url().to_string());
    });

    let save_backend_url = move |_| {
        let result = AppConfig::with_backend_url(&backend_url.get_untracked())
            .and_then(|config| config.save(&BrowserStorage).map(|_| config));
        match result {
            Ok(config) => {
                info!("Backend URL set to {}", config.backend_url());
                set_backend_url.set(config.backend_url().to_string());
                set_status.set(Some("Backend URL saved".to_string()));
            }
            Err(e) => {
                set_status.set(Some(format!("Failed to save: {}", e)));
            }
        }
    };

    let reset_backend_url = move |_| {
        let config = AppConfig::default();
        match config.save(&BrowserStorage) {
            Ok(()) => {
                set_backend_url.set(config.backend_url().to_string());
                set_status.set(Some("Restored default backend URL".to_string()));
            }
            Err(e) => {
                set_status.set(Some(format!("Failed to save: {}", e)));
            }
        }
    };

    view! {
        <div class="page settings-page">
            <h2>"Settings"</h2>

            <section class="settings-section">
                <h3>"Analysis Backend"</h3>
                <p class="section-description">
                    "Audio files are uploaded to this server's /analyze endpoint."
                </p>

                <div class="form-group">
                    <label for="backend-url">"Backend URL"</label>
                    <div class="input-row">
                        <input
                            id="backend-url"
                            type="url"
                            placeholder=DEFAULT_BACKEND_URL
                            class="input"
                            prop:value=move || backend_url.get()
                            on:input=move |ev| {
                                set_backend_url.set(event_target_value(&ev));
                            }
                        />
                        <button class="btn btn-save" on:click=save_backend_url>"Save"</button>
                        <button class="btn btn-secondary" on:click=reset_backend_url>"Reset"</button>
                    </div>
                    <Show when=move || status.get().is_some()>
                        <span class="status-text">{move || status.get().unwrap_or_default()}</span>
                    </Show>
                </div>
            </section>
        </div>
    }
}
