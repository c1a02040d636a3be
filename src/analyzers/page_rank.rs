use heapdex_core::{HashIndex, HashIndexSet, Result};
use log::{debug, info};

use crate::{Document, analyzers::RankConfig};

/// Scores documents by how much of the link graph points at them.
///
/// Ranks start at `1/n` and are redistributed along links on every pass, with a
/// `1 - decay` share spread evenly over all documents. Iteration stops once no rank
/// moves by more than `epsilon`, or after `limit` passes.
pub struct PageRankAnalyzer {
    ranks: HashIndex<String, f64>,
    iterations: usize,
}

impl PageRankAnalyzer {
    pub fn new(documents: &[Document], config: &RankConfig) -> Result<Self> {
        config.validate()?;

        let graph = make_graph(documents);
        let (ranks, iterations) = make_ranks(&graph, config);
        Ok(PageRankAnalyzer { ranks, iterations })
    }

    /// Returns the rank of the document with id `id`.
    pub fn page_rank(&self, id: &str) -> Result<f64> {
        self.ranks.get(id).copied()
    }

    /// Number of update passes that were applied.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn ranks(&self) -> &HashIndex<String, f64> {
        &self.ranks
    }
}

/// Builds the adjacency sets of the link graph. Links leaving the document set and
/// self-links are dropped.
fn make_graph(documents: &[Document]) -> HashIndex<String, HashIndexSet<String>> {
    let ids: HashIndexSet<&str> = documents.iter().map(|d| d.id.as_str()).collect();

    let mut graph = HashIndex::new();
    for doc in documents {
        let targets: HashIndexSet<String> = doc
            .links
            .iter()
            .filter(|link| ids.contains(link.as_str()) && **link != doc.id)
            .cloned()
            .collect();
        graph.put(doc.id.clone(), targets);
    }
    graph
}

fn make_ranks(
    graph: &HashIndex<String, HashIndexSet<String>>,
    config: &RankConfig,
) -> (HashIndex<String, f64>, usize) {
    let num_pages = graph.len() as f64;
    let initial = 1.0 / num_pages;
    let mut old_ranks: HashIndex<String, f64> =
        graph.keys().map(|page| (page.clone(), initial)).collect();

    for iteration in 0..config.limit {
        let mut new_ranks: HashIndex<String, f64> =
            graph.keys().map(|page| (page.clone(), 0.0)).collect();
        // Share of pages without outgoing links, handed to every page at the end
        let mut dangling = 0.0;

        for (page, links) in graph {
            let rank = old_ranks.get_or_default(page.as_str(), 0.0);
            if links.is_empty() {
                dangling += config.decay * rank / num_pages;
                continue;
            }

            let share = config.decay * rank / links.len() as f64;
            for link in links.iter() {
                if let Ok(r) = new_ranks.get_mut(link.as_str()) {
                    *r += share;
                }
            }
        }

        let base = dangling + (1.0 - config.decay) / num_pages;
        let mut max_delta: f64 = 0.0;
        for page in graph.keys() {
            if let Ok(r) = new_ranks.get_mut(page.as_str()) {
                *r += base;
                let old = old_ranks.get_or_default(page.as_str(), 0.0);
                max_delta = max_delta.max((*r - old).abs());
            }
        }
        debug!("Page rank pass {}: max delta {:e}", iteration + 1, max_delta);

        if max_delta <= config.epsilon {
            info!("Page rank converged after {} passes", iteration + 1);
            return (old_ranks, iteration);
        }
        old_ranks = new_ranks;
    }

    info!("Page rank stopped after {} passes", config.limit);
    (old_ranks, config.limit)
}
