use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::LookupConfig;
use crate::error::{LookupError, Result};
use crate::events::{EventEmitter, SelectionChange};
use crate::record::{RawRecord, SelectedRecord};
use crate::selection::{SelectionMode, SelectionStore};
use crate::session::{SearchRequest, SearchSession};

/// How the selection renders, derived from config and store contents on
/// every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Multi-select: pills below the input.
    MultiPills,
    /// Single-select with pills enabled: one pill below the input.
    SinglePill,
    /// Single-select, no pills, one record chosen: label inside the input.
    Inline,
    /// Nothing chosen, no pills: plain search input.
    Input,
}

/// The typeahead widget: configuration, selection store, search session,
/// and change notifications behind one host-facing surface.
pub struct Lookup {
    config: LookupConfig,
    store: SelectionStore,
    session: SearchSession,
    emitter: EventEmitter,
}

impl Lookup {
    pub fn new(config: LookupConfig) -> Result<Self> {
        config.validate()?;
        let mode = if config.multi_select {
            SelectionMode::Multi
        } else {
            SelectionMode::Single
        };
        Ok(Self {
            config,
            store: SelectionStore::new(mode),
            session: SearchSession::new(),
            emitter: EventEmitter::new(),
        })
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn selection(&self) -> &[SelectedRecord] {
        self.store.records()
    }

    /// Feed the current input text; returns the query to dispatch, if any.
    pub fn input(&mut self, term: impl Into<String>) -> Option<SearchRequest> {
        self.session.set_term(term, &self.config)
    }

    /// Route a completed query back into the session. Stale generations are
    /// discarded there; failures collapse into the no-results state.
    pub fn apply_results(
        &mut self,
        generation: u64,
        outcome: std::result::Result<Vec<RawRecord>, LookupError>,
    ) {
        self.session.apply(generation, outcome, &self.config);
    }

    /// Select the dropdown entry at `index`, notify subscribers, and reset
    /// the search session. No-op returning `None` when out of range.
    pub fn pick(&mut self, index: usize) -> Option<&SelectedRecord> {
        let entry = self.session.take_result(index)?;
        let id = entry.record.id();
        self.store.add(SelectedRecord::from_entry(entry));
        self.emitter.emit(&self.store);
        self.session.reset();
        self.store.records().iter().find(|r| r.id == id)
    }

    /// Remove one selection (single mode clears everything) and leave the
    /// session cleared, ready for the user to keep typing.
    pub fn remove(&mut self, id: &str) {
        self.store.remove(id);
        self.emitter.emit(&self.store);
        self.session.reset();
    }

    /// Host operation: drop the whole selection and notify.
    pub fn clear_selection(&mut self) {
        self.store.clear();
        self.emitter.emit(&self.store);
        self.session.reset();
    }

    /// Host operation: current comma-joined ids. Never emits.
    pub fn selected_values(&self) -> String {
        self.store.joined_ids()
    }

    /// An explicitly scoped change subscription; drop the receiver to
    /// deregister.
    pub fn subscribe(&mut self) -> UnboundedReceiver<SelectionChange> {
        self.emitter.subscribe()
    }

    /// Hide the dropdown (outside click) without touching the term.
    pub fn dismiss(&mut self) {
        self.session.dismiss();
    }

    /// The required-field message, present exactly while validation fails.
    pub fn validation_message(&self) -> Option<&str> {
        if self.config.required && self.store.is_empty() {
            Some(&self.config.required_message)
        } else {
            None
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        match (
            self.config.multi_select,
            self.config.show_pills,
            !self.store.is_empty(),
        ) {
            (true, _, _) => DisplayMode::MultiPills,
            (false, true, _) => DisplayMode::SinglePill,
            (false, false, true) => DisplayMode::Inline,
            (false, false, false) => DisplayMode::Input,
        }
    }
}
