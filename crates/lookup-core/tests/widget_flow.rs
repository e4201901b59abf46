use async_trait::async_trait;
use serde_json::json;

use lookup_core::{
    DisplayMode, Lookup, LookupConfig, LookupError, MemorySource, RawRecord, RecordSearch,
    SearchRequest,
};

const ACCOUNTS: &str = r#"[
    {"Id": "1", "Name": "Acme Corporation", "Industry": "Tech", "Rating": "Hot"},
    {"Id": "2", "Name": "Acme Labs", "Industry": "Research"},
    {"Id": "3", "Name": "Globex", "Industry": "Energy"}
]"#;

struct FailingSource;

#[async_trait]
impl RecordSearch for FailingSource {
    async fn search(&self, _request: &SearchRequest) -> lookup_core::Result<Vec<RawRecord>> {
        Err(LookupError::Search("remote unavailable".to_string()))
    }
}

async fn run_query(lookup: &mut Lookup, source: &dyn RecordSearch, term: &str) {
    let request = lookup.input(term).expect("queryable term");
    let outcome = source.search(&request).await;
    lookup.apply_results(request.generation, outcome);
}

#[tokio::test]
async fn single_select_end_to_end() {
    let source = MemorySource::from_json(ACCOUNTS).unwrap();
    let mut lookup = Lookup::new(LookupConfig::for_object("Account")).unwrap();
    let mut changes = lookup.subscribe();

    run_query(&mut lookup, &source, "acme corp").await;
    assert!(lookup.session().is_visible());
    assert_eq!(lookup.session().results()[0].display_value, "Acme Corporation");

    lookup.pick(0).unwrap();
    assert_eq!(lookup.selected_values(), "1");
    assert_eq!(lookup.display_mode(), DisplayMode::Inline);
    assert_eq!(changes.try_recv().unwrap().record_id, "1");

    lookup.clear_selection();
    assert_eq!(lookup.selected_values(), "");
    assert_eq!(changes.try_recv().unwrap().record_id, "");
}

#[tokio::test]
async fn multi_select_with_additional_fields() {
    let source = MemorySource::from_json(ACCOUNTS).unwrap();
    let mut cfg = LookupConfig::for_object("Account");
    cfg.multi_select = true;
    cfg.additional_fields = "Industry,Rating".to_string();
    let mut lookup = Lookup::new(cfg).unwrap();

    run_query(&mut lookup, &source, "acme corp").await;
    let entry = &lookup.session().results()[0];
    let info = entry.additional_info.as_ref().unwrap();
    assert_eq!(info.len(), 2);
    assert_eq!(info[0].field, "Industry");
    assert_eq!(info[0].value, json!("Tech"));

    lookup.pick(0);
    run_query(&mut lookup, &source, "globex").await;
    lookup.pick(0);

    assert_eq!(lookup.selected_values(), "1,3");
    assert_eq!(lookup.display_mode(), DisplayMode::MultiPills);

    // Record 2 has no Rating; only Industry qualifies.
    run_query(&mut lookup, &source, "acme labs").await;
    let entry = &lookup.session().results()[0];
    let info = entry.additional_info.as_ref().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].field, "Industry");
}

#[tokio::test]
async fn failed_search_leaves_widget_usable() {
    let mut lookup = Lookup::new(LookupConfig::for_object("Account")).unwrap();
    let mut changes = lookup.subscribe();

    // Establish a selection first so we can see it survive the failure.
    let good = MemorySource::from_json(ACCOUNTS).unwrap();
    run_query(&mut lookup, &good, "globex").await;
    lookup.pick(0);
    assert_eq!(changes.try_recv().unwrap().record_id, "3");

    run_query(&mut lookup, &FailingSource, "acme").await;
    assert_eq!(lookup.selected_values(), "3");
    assert!(lookup.session().results().is_empty());
    // No-results state still renders.
    assert!(lookup.session().is_visible());
    assert!(!lookup.session().is_searching());
    assert!(changes.try_recv().is_err());

    // And the widget keeps working afterwards.
    run_query(&mut lookup, &good, "acme corp").await;
    assert_eq!(lookup.session().results().len(), 1);
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_term() {
    let source = MemorySource::from_json(ACCOUNTS).unwrap();
    let mut lookup = Lookup::new(LookupConfig::for_object("Account")).unwrap();

    let first = lookup.input("acme").expect("first query");
    let second = lookup.input("globex").expect("second query");

    let first_outcome = source.search(&first).await;
    let second_outcome = source.search(&second).await;

    // Responses arrive out of order: the newer term's results land first,
    // then the stale response shows up.
    lookup.apply_results(second.generation, second_outcome);
    lookup.apply_results(first.generation, first_outcome);

    let names: Vec<&str> = lookup
        .session()
        .results()
        .iter()
        .map(|e| e.display_value.as_str())
        .collect();
    assert_eq!(names, vec!["Globex"]);
}

#[tokio::test]
async fn clearing_the_term_kills_inflight_results() {
    let source = MemorySource::from_json(ACCOUNTS).unwrap();
    let mut lookup = Lookup::new(LookupConfig::for_object("Account")).unwrap();

    let request = lookup.input("acme").expect("queryable term");
    let outcome = source.search(&request).await;

    // User wipes the input before the response lands.
    assert!(lookup.input("").is_none());
    lookup.apply_results(request.generation, outcome);

    assert!(!lookup.session().is_visible());
    assert!(lookup.session().results().is_empty());
}

#[tokio::test]
async fn short_term_is_synchronous_and_silent() {
    let mut lookup = Lookup::new(LookupConfig::for_object("Account")).unwrap();
    assert!(lookup.input("a").is_none());
    assert!(!lookup.session().is_visible());
    assert!(lookup.session().results().is_empty());
}
