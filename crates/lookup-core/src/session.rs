use tracing::warn;

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::record::{RawRecord, ResultEntry};

/// Terms shorter than this never reach the search source.
pub const MIN_TERM_LEN: usize = 2;

/// One outbound query, tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub generation: u64,
    pub object_name: String,
    pub display_field: String,
    pub term: String,
    pub record_type: Option<String>,
    pub search_fields: Vec<String>,
    pub additional_fields: Vec<String>,
}

/// Owns the live query term, the most recent result set, and dropdown
/// visibility. Sans-IO: callers dispatch the returned [`SearchRequest`] and
/// feed the outcome back through [`SearchSession::apply`].
#[derive(Debug, Default)]
pub struct SearchSession {
    term: String,
    generation: u64,
    results: Vec<ResultEntry>,
    searching: bool,
    visible: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new term. Returns the query to dispatch, or `None` when the
    /// term is too short (results are cleared and the dropdown hidden
    /// synchronously). Every call bumps the generation, so responses to any
    /// earlier term are dead on arrival.
    pub fn set_term(
        &mut self,
        term: impl Into<String>,
        config: &LookupConfig,
    ) -> Option<SearchRequest> {
        self.term = term.into();
        self.generation += 1;

        if self.term.chars().count() < MIN_TERM_LEN {
            self.results.clear();
            self.searching = false;
            self.visible = false;
            return None;
        }

        self.searching = true;
        Some(SearchRequest {
            generation: self.generation,
            object_name: config.object_name.clone(),
            display_field: config.display_field.clone(),
            term: self.term.clone(),
            record_type: config.record_type.clone(),
            search_fields: config.search_field_list(),
            additional_fields: config.additional_field_list(),
        })
    }

    /// Apply a completed query. Responses tagged with a stale generation are
    /// discarded outright. A failed search collapses into the no-results
    /// state; it is logged and consumed here, never propagated.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<Vec<RawRecord>, LookupError>,
        config: &LookupConfig,
    ) {
        if generation != self.generation {
            return;
        }

        match outcome {
            Ok(records) => {
                self.results = records
                    .into_iter()
                    .map(|r| ResultEntry::map(r, config))
                    .collect();
            }
            Err(e) => {
                warn!("Search for '{}' on {} failed: {}", self.term, config.object_name, e);
                self.results.clear();
            }
        }

        // Shown even when empty so the no-results affordance can render.
        self.visible = true;
        self.searching = false;
    }

    /// Hide the dropdown without touching the term (outside click).
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Drop term and results, ready for a fresh query. Bumps the generation
    /// so anything still in flight is discarded.
    pub fn reset(&mut self) {
        self.term.clear();
        self.generation += 1;
        self.results.clear();
        self.searching = false;
        self.visible = false;
    }

    /// Remove and return the entry at `index`, if any.
    pub fn take_result(&mut self, index: usize) -> Option<ResultEntry> {
        if index < self.results.len() {
            Some(self.results.remove(index))
        } else {
            None
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> LookupConfig {
        LookupConfig::for_object("Account")
    }

    fn acme() -> RawRecord {
        serde_json::from_value(json!({"Id": "1", "Name": "Acme"})).unwrap()
    }

    #[test]
    fn test_short_term_never_queries() {
        let cfg = config();
        let mut session = SearchSession::new();

        assert!(session.set_term("a", &cfg).is_none());
        assert!(!session.is_visible());
        assert!(!session.is_searching());
        assert!(session.results().is_empty());

        assert!(session.set_term("", &cfg).is_none());
        assert!(!session.is_visible());
    }

    #[test]
    fn test_request_carries_config() {
        let mut cfg = config();
        cfg.record_type = Some("Customer".to_string());
        cfg.search_fields = String::new();
        let mut session = SearchSession::new();

        let req = session.set_term("ac", &cfg).expect("long enough");
        assert_eq!(req.term, "ac");
        assert_eq!(req.object_name, "Account");
        assert_eq!(req.record_type.as_deref(), Some("Customer"));
        // Unset search fields fall back to Name.
        assert_eq!(req.search_fields, vec!["Name"]);
        assert!(session.is_searching());
    }

    #[test]
    fn test_apply_success_shows_dropdown() {
        let cfg = config();
        let mut session = SearchSession::new();
        let req = session.set_term("ac", &cfg).unwrap();

        session.apply(req.generation, Ok(vec![acme()]), &cfg);
        assert!(session.is_visible());
        assert!(!session.is_searching());
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].display_value, "Acme");
    }

    #[test]
    fn test_apply_empty_still_visible() {
        let cfg = config();
        let mut session = SearchSession::new();
        let req = session.set_term("zz", &cfg).unwrap();

        session.apply(req.generation, Ok(vec![]), &cfg);
        assert!(session.is_visible());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_apply_failure_is_swallowed() {
        let cfg = config();
        let mut session = SearchSession::new();
        let req = session.set_term("ac", &cfg).unwrap();

        session.apply(
            req.generation,
            Err(LookupError::Search("boom".to_string())),
            &cfg,
        );
        assert!(session.is_visible());
        assert!(session.results().is_empty());
        assert!(!session.is_searching());
    }

    #[test]
    fn test_stale_generation_discarded() {
        let cfg = config();
        let mut session = SearchSession::new();

        let first = session.set_term("ac", &cfg).unwrap();
        let second = session.set_term("acm", &cfg).unwrap();

        // Late response for the first term arrives after the second query.
        session.apply(first.generation, Ok(vec![acme()]), &cfg);
        assert!(!session.is_visible());
        assert!(session.results().is_empty());

        session.apply(second.generation, Ok(vec![acme()]), &cfg);
        assert!(session.is_visible());
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_cleared_term_kills_inflight_response() {
        let cfg = config();
        let mut session = SearchSession::new();

        let req = session.set_term("ac", &cfg).unwrap();
        assert!(session.set_term("", &cfg).is_none());

        session.apply(req.generation, Ok(vec![acme()]), &cfg);
        assert!(!session.is_visible());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_reset_and_dismiss() {
        let cfg = config();
        let mut session = SearchSession::new();
        let req = session.set_term("ac", &cfg).unwrap();
        session.apply(req.generation, Ok(vec![acme()]), &cfg);

        session.dismiss();
        assert!(!session.is_visible());
        assert_eq!(session.term(), "ac");

        session.reset();
        assert_eq!(session.term(), "");
        assert!(session.results().is_empty());
    }
}
