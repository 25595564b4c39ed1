//! Dashboard history panel.
//!
//! Renders the saved analysis log as cards and offers a confirmed clear.
//! The view logic is independent of Leptos: it renders into any
//! [`RenderTarget`] and asks any [`Confirm`] before clearing.

use leptos::either::Either;
use leptos::prelude::*;
use log::error;

use crate::components::history_card::{HistoryCard, HistoryCardView};
use crate::error::AuralisError;
use crate::history::HistoryStore;
use crate::storage::{BrowserStorage, KeyValueStore, STORAGE_HISTORY};

const CLEAR_PROMPT: &str = "Clear all saved analyses? This cannot be undone.";

/// What the history panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryViewState {
    #[default]
    Empty,
    Populated(Vec<HistoryCard>),
}

impl HistoryViewState {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Populated(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Destination for rendered history states.
pub trait RenderTarget {
    fn show(&self, state: HistoryViewState);
}

impl RenderTarget for RwSignal<HistoryViewState> {
    fn show(&self, state: HistoryViewState) {
        self.set(state);
    }
}

/// Yes/no confirmation surface.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// `window.confirm`. Declines when no window is available.
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Renders a [`HistoryStore`] into a [`RenderTarget`].
#[derive(Debug, Clone)]
pub struct HistoryView<S, T> {
    store: HistoryStore<S>,
    target: T,
}

impl<S: KeyValueStore, T: RenderTarget> HistoryView<S, T> {
    pub fn new(store: HistoryStore<S>, target: T) -> Self {
        Self { store, target }
    }

    /// Load the log and show it. Returns the number of cards shown.
    pub fn render(&self) -> usize {
        let records = self.store.load();
        if records.is_empty() {
            self.target.show(HistoryViewState::Empty);
            return 0;
        }

        let cards: Vec<HistoryCard> = records.iter().map(HistoryCard::from).collect();
        let count = cards.len();
        self.target.show(HistoryViewState::Populated(cards));
        count
    }

    /// Clear the log after confirmation and re-render. Returns whether the
    /// log was cleared; an already empty log is left alone without asking.
    pub fn request_clear(&self, confirm: &impl Confirm) -> Result<bool, AuralisError> {
        if self.store.load().is_empty() {
            return Ok(false);
        }
        if !confirm.confirm(CLEAR_PROMPT) {
            return Ok(false);
        }

        self.store.clear()?;
        self.render();
        Ok(true)
    }
}

/// Saved analyses backed by browser storage.
#[component]
pub fn HistoryPanel() -> impl IntoView {
    let state = RwSignal::new(HistoryViewState::Empty);
    let (error_message, set_error_message) = signal::<Option<String>>(None);
    let storage_available = BrowserStorage::is_available();

    let history = HistoryView::new(HistoryStore::new(BrowserStorage, STORAGE_HISTORY), state);
    history.render();

    let on_clear = move |_| match history.request_clear(&BrowserConfirm) {
        Ok(_) => set_error_message.set(None),
        Err(e) => {
            error!("Failed to clear history: {}", e);
            set_error_message.set(Some(format!("Could not clear history: {}", e)));
        }
    };

    view! {
        <div class="history-panel">
            <style>{include_str!("history_panel.css")}</style>
            <div class="history-header">
                <h3 class="history-title">"Saved Analyses"</h3>
                <span class="history-count">
                    {move || format!("{} saved", state.with(HistoryViewState::len))}
                </span>
                <button
                    class="btn btn-small btn-secondary"
                    disabled=move || state.with(HistoryViewState::is_empty)
                    on:click=on_clear
                >
                    "Clear History"
                </button>
            </div>

            {(!storage_available).then(|| view! {
                <p class="history-error">
                    "Browser storage is unavailable, so analyses cannot be saved here."
                </p>
            })}

            {move || error_message.get().map(|msg| view! {
                <p class="history-error">{msg}</p>
            })}

            {move || view! { <HistoryList state=state.get() /> }}
        </div>
    }
}

/// Static rendering of one history state.
#[component]
pub fn HistoryList(state: HistoryViewState) -> impl IntoView {
    match state {
        HistoryViewState::Empty => Either::Left(view! {
            <p class="history-empty">
                "No saved analyses yet. Analyze a file and choose \"Save to Dashboard\"."
            </p>
        }),
        HistoryViewState::Populated(cards) => Either::Right(view! {
            <div class="history-list">
                {cards
                    .into_iter()
                    .map(|card| view! { <HistoryCardView card=card /> })
                    .collect_view()}
            </div>
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use leptos::tachys::view::RenderHtml;

    use crate::history::HistoryRecord;
    use crate::storage::{FailingStorage, MemoryStorage};

    const KEY: &str = "test.history";

    /// Records every state shown.
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<HistoryViewState>>>);

    impl Recorder {
        fn last(&self) -> Option<HistoryViewState> {
            self.0.borrow().last().cloned()
        }

        fn renders(&self) -> usize {
            self.0.borrow().len()
        }
    }

    impl RenderTarget for Recorder {
        fn show(&self, state: HistoryViewState) {
            self.0.borrow_mut().push(state);
        }
    }

    /// Fixed answer that counts prompts.
    struct Answer {
        yes: bool,
        asked: Cell<usize>,
    }

    impl Answer {
        fn new(yes: bool) -> Self {
            Self {
                yes,
                asked: Cell::new(0),
            }
        }
    }

    impl Confirm for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.yes
        }
    }

    fn create_test_view() -> (
        HistoryView<MemoryStorage, Recorder>,
        HistoryStore<MemoryStorage>,
        Recorder,
    ) {
        let store = HistoryStore::new(MemoryStorage::new(), KEY);
        let recorder = Recorder::default();
        (
            HistoryView::new(store.clone(), recorder.clone()),
            store,
            recorder,
        )
    }

    fn record(location: &str) -> HistoryRecord {
        HistoryRecord {
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_empty_log() {
        let (view, _store, recorder) = create_test_view();
        assert_eq!(view.render(), 0);
        assert_eq!(recorder.last(), Some(HistoryViewState::Empty));
    }

    #[test]
    fn test_render_single_record_with_defaults() {
        let (view, store, recorder) = create_test_view();
        store.append(record("Airport")).unwrap();

        assert_eq!(view.render(), 1);
        let Some(HistoryViewState::Populated(cards)) = recorder.last() else {
            panic!("expected populated state");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].location, "Airport");
        assert_eq!(cards[0].situation, "Unknown");
        assert_eq!(cards[0].file_name, "Unnamed file");
    }

    #[test]
    fn test_render_keeps_newest_first() {
        let (view, store, recorder) = create_test_view();
        for location in ["Road", "Airport", "Railway Station"] {
            store.append(record(location)).unwrap();
        }

        view.render();
        let Some(HistoryViewState::Populated(cards)) = recorder.last() else {
            panic!("expected populated state");
        };
        let locations: Vec<&str> = cards.iter().map(|c| c.location.as_str()).collect();
        assert_eq!(locations, vec!["Railway Station", "Airport", "Road"]);
    }

    #[test]
    fn test_render_at_capacity_stays_at_fifty() {
        let (view, store, recorder) = create_test_view();
        for n in 1..=51 {
            store.append(record(&format!("Place {}", n))).unwrap();
        }

        assert_eq!(view.render(), 50);
        let state = recorder.last().unwrap();
        assert_eq!(state.len(), 50);
        let HistoryViewState::Populated(cards) = state else {
            panic!("expected populated state");
        };
        assert_eq!(cards[0].location, "Place 51");
        assert!(cards.iter().all(|c| c.location != "Place 1"));
    }

    #[test]
    fn test_confirmed_clear_empties_and_rerenders() {
        let (view, store, recorder) = create_test_view();
        store.append(record("Road")).unwrap();
        view.render();

        let answer = Answer::new(true);
        assert!(view.request_clear(&answer).unwrap());
        assert_eq!(answer.asked.get(), 1);
        assert!(store.load().is_empty());
        assert_eq!(recorder.last(), Some(HistoryViewState::Empty));
    }

    #[test]
    fn test_declined_clear_keeps_log() {
        let (view, store, recorder) = create_test_view();
        store.append(record("Road")).unwrap();
        view.render();
        let renders = recorder.renders();

        let answer = Answer::new(false);
        assert!(!view.request_clear(&answer).unwrap());
        assert_eq!(answer.asked.get(), 1);
        assert_eq!(store.load().len(), 1);
        assert_eq!(recorder.renders(), renders);
    }

    #[test]
    fn test_clear_on_empty_log_does_not_prompt() {
        let (view, _store, recorder) = create_test_view();
        let answer = Answer::new(true);

        assert!(!view.request_clear(&answer).unwrap());
        assert_eq!(answer.asked.get(), 0);
        assert_eq!(recorder.renders(), 0);
    }

    #[test]
    fn test_closure_confirm() {
        let (view, store, _recorder) = create_test_view();
        store.append(record("Road")).unwrap();

        let cleared = view
            .request_clear(&|message: &str| message.contains("cannot be undone"))
            .unwrap();
        assert!(cleared);
    }

    #[test]
    fn test_failed_clear_propagates_without_rerender() {
        let storage = MemoryStorage::new();
        HistoryStore::new(storage.clone(), KEY)
            .append(record("Road"))
            .unwrap();

        let recorder = Recorder::default();
        let view = HistoryView::new(
            HistoryStore::new(FailingStorage::read_only(storage.clone()), KEY),
            recorder.clone(),
        );
        assert_eq!(view.render(), 1);
        let renders = recorder.renders();

        let answer = Answer::new(true);
        let result = view.request_clear(&answer);
        assert!(matches!(result, Err(AuralisError::Storage(_))));
        assert_eq!(answer.asked.get(), 1);
        assert_eq!(recorder.renders(), renders);
        assert!(storage.contains(KEY));
    }

    #[test]
    fn test_signal_render_escapes_markup_and_shows_badge() {
        let store = HistoryStore::new(MemoryStorage::new(), KEY);
        store
            .append(HistoryRecord {
                location: Some("<b>x</b>".to_string()),
                confidence: Some("91%".to_string()),
                ..Default::default()
            })
            .unwrap();

        let state = RwSignal::new(HistoryViewState::Empty);
        assert_eq!(HistoryView::new(store, state).render(), 1);

        let html = view! { <HistoryList state={state.get_untracked()} /> }.to_html();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"), "{}", html);
        assert!(!html.contains("<b>"));
        assert!(html.contains("91% Confidence"));
        assert!(html.contains("confidence-high"));
        assert_eq!(html.matches("<article").count(), 1);
    }

    #[test]
    fn test_history_list_empty_state_html() {
        let html = view! { <HistoryList state={HistoryViewState::Empty} /> }.to_html();
        assert!(html.contains("history-empty"));
        assert!(!html.contains("history-card"));
    }

    #[test]
    fn test_history_list_one_card_html() {
        let cards = vec![HistoryCard::from(&record("Subway Platform"))];
        let html = view! { <HistoryList state={HistoryViewState::Populated(cards)} /> }.to_html();
        assert_eq!(html.matches("<article").count(), 1);
        assert!(html.contains("Subway Platform"));
        assert!(!html.contains("history-empty"));
    }
}
