use async_trait::async_trait;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::error::Result;
use crate::record::{RawRecord, RECORD_TYPE_FIELD};
use crate::session::SearchRequest;

/// The search collaborator seam. Implementations take the full request —
/// object, term, fields, record-type filter — and return raw records; the
/// session never sees how the query was answered.
#[async_trait]
pub trait RecordSearch: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawRecord>>;
}

/// In-memory source backing demos and tests: fuzzy match over the requested
/// search fields, scored and sorted by relevance.
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Build from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSearch for MemorySource {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawRecord>> {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            &request.term,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut buf = Vec::new();

        let mut scored: Vec<(u32, &RawRecord)> = self
            .records
            .iter()
            .filter(|record| match &request.record_type {
                Some(wanted) => record.text(RECORD_TYPE_FIELD).as_deref() == Some(wanted.as_str()),
                None => true,
            })
            .filter_map(|record| {
                let haystack = request
                    .search_fields
                    .iter()
                    .filter_map(|field| record.text(field))
                    .collect::<Vec<_>>()
                    .join(" ");

                pattern
                    .score(Utf32Str::new(&haystack, &mut buf), &mut matcher)
                    .map(|score| (score, record))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, r)| r.clone()).collect())
    }
}
