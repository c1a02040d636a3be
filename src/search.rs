use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use heapdex_core::{Error, HashIndexSet, Result};
use log::debug;

use crate::{
    Document,
    analyzers::{PageRankAnalyzer, RankConfig, TfIdfAnalyzer},
    top_k,
};

/// A document matching a query, with the scores it was ranked by.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub relevance: f64,
    pub page_rank: f64,
}

impl Ord for SearchHit {
    fn cmp(&self, other: &Self) -> Ordering {
        // 1. Compare relevance
        // 2. Compare page rank
        // 3. Compare ids, so that equal scores still order deterministically
        self.relevance
            .total_cmp(&other.relevance)
            .then_with(|| self.page_rank.total_cmp(&other.page_rank))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for SearchHit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for SearchHit {}
impl PartialEq for SearchHit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Hash for SearchHit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal hits always share an id
        self.id.hash(state);
    }
}

/// Ranks a fixed set of documents against free text queries.
pub struct SearchEngine {
    documents: Vec<Document>,
    tf_idf: TfIdfAnalyzer,
    page_rank: PageRankAnalyzer,
}

impl SearchEngine {
    /// Indexes `documents`, which must have distinct ids.
    pub fn new(documents: Vec<Document>, config: &RankConfig) -> Result<Self> {
        let mut ids = HashIndexSet::new();
        for doc in &documents {
            if !ids.insert(doc.id.as_str()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate document id {:?}",
                    doc.id
                )));
            }
        }

        let page_rank = PageRankAnalyzer::new(&documents, config)?;
        let tf_idf = TfIdfAnalyzer::new(&documents);
        Ok(SearchEngine {
            documents,
            tf_idf,
            page_rank,
        })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn page_rank(&self) -> &PageRankAnalyzer {
        &self.page_rank
    }

    /// Returns up to `k` documents with a positive relevance to `query`, best first.
    pub fn search<S: AsRef<str>>(&self, query: &[S], k: usize) -> Result<Vec<SearchHit>> {
        let query: Vec<String> = query
            .iter()
            .flat_map(|word| Document::parse("", word.as_ref()).words)
            .collect();

        let mut hits = Vec::new();
        for doc in &self.documents {
            let relevance = self.tf_idf.relevance(&query, &doc.id)?;
            if relevance > 0.0 {
                hits.push(SearchHit {
                    id: doc.id.clone(),
                    relevance,
                    page_rank: self.page_rank.page_rank(&doc.id)?,
                });
            }
        }
        debug!("{} of {} documents match {:?}", hits.len(), self.documents.len(), query);

        let mut best = top_k(k, &hits)?;
        best.reverse();
        Ok(best)
    }
}
