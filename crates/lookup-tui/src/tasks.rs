use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use lookup_core::{RecordSearch, SearchRequest};

use crate::event::AppEvent;

/// Run one query on the runtime and post the outcome back to the UI loop.
/// The generation travels with the outcome, so late responses for an older
/// term are discarded by the session rather than by timing luck.
pub fn spawn_search(
    tx: UnboundedSender<AppEvent>,
    source: Arc<dyn RecordSearch>,
    request: SearchRequest,
) {
    tokio::spawn(async move {
        let generation = request.generation;
        let outcome = source.search(&request).await;
        let _ = tx.send(AppEvent::SearchLoaded { generation, outcome });
    });
}
