//! Toast notifications.

use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: usize,
    pub message: String,
    pub kind: ToastKind,
}

static TOAST_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// App-wide toast list, provided as context by the app shell.
#[derive(Debug, Clone, Copy)]
pub struct Toasts(pub RwSignal<Vec<ToastMessage>>);

impl Toasts {
    pub fn new() -> Self {
        Self(RwSignal::new(Vec::new()))
    }

    /// Add a toast and return its id. The toast is removed automatically
    /// after a few seconds.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> usize {
        let id = self.push(message.into(), kind);

        let toasts = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            toasts.dismiss(id);
        });
        id
    }

    fn push(&self, message: String, kind: ToastKind) -> usize {
        let id = TOAST_COUNTER.fetch_add(1, Ordering::SeqCst);
        self.0.update(|t| t.push(ToastMessage { id, message, kind }));
        id
    }

    pub fn dismiss(&self, id: usize) {
        self.0.update(|t| t.retain(|m| m.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastContainer(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toast-container">
            {move || toasts.0.get().into_iter().map(|toast| {
                let id = toast.id;
                let class = match toast.kind {
                    ToastKind::Success => "toast toast-success",
                    ToastKind::Error => "toast toast-error",
                    ToastKind::Info => "toast toast-info",
                };

                view! {
                    <div class=class role="status">
                        <span class="toast-message">{toast.message}</span>
                        <button class="toast-dismiss" on:click=move |_| toasts.dismiss(id)>
                            "Dismiss"
                        </button>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
