use heapdex_core::{HashIndex, HashIndexSet, Result};

use crate::Document;

/// Term frequency / inverse document frequency weights for one document or query.
pub type TfIdfVector = HashIndex<String, f64>;

/// Scores how relevant a document is to a query, as the cosine similarity of their
/// TF-IDF vectors.
pub struct TfIdfAnalyzer {
    idf_scores: HashIndex<String, f64>,
    document_vectors: HashIndex<String, TfIdfVector>,
    /// Euclidean norm of every document vector, computed once up front.
    norms: HashIndex<String, f64>,
}

impl TfIdfAnalyzer {
    pub fn new(documents: &[Document]) -> Self {
        let idf_scores = compute_idf_scores(documents);

        let mut document_vectors = HashIndex::new();
        let mut norms = HashIndex::new();
        for doc in documents {
            let vector = tf_idf_vector(&doc.words, &idf_scores);
            norms.put(doc.id.clone(), norm(&vector));
            document_vectors.put(doc.id.clone(), vector);
        }

        TfIdfAnalyzer {
            idf_scores,
            document_vectors,
            norms,
        }
    }

    pub fn idf(&self, word: &str) -> Option<f64> {
        self.idf_scores.get(word).ok().copied()
    }

    pub fn document_vector(&self, id: &str) -> Result<&TfIdfVector> {
        self.document_vectors.get(id)
    }

    /// Cosine similarity between `query` and the document `id`, in `[0, 1]`.
    /// Query words that appear in no document are ignored.
    pub fn relevance<S: AsRef<str>>(&self, query: &[S], id: &str) -> Result<f64> {
        let document = self.document_vectors.get(id)?;
        let document_norm = *self.norms.get(id)?;

        let query_vector = tf_idf_vector(query, &self.idf_scores);
        let numerator: f64 = query_vector
            .iter()
            .map(|(word, q)| q * document.get_or_default(word.as_str(), 0.0))
            .sum();

        let denominator = document_norm * norm(&query_vector);
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(numerator / denominator)
    }
}

/// `idf(w) = ln(n / number of documents containing w)`
fn compute_idf_scores(documents: &[Document]) -> HashIndex<String, f64> {
    let mut doc_counts: HashIndex<&str, f64> = HashIndex::new();
    for doc in documents {
        let unique: HashIndexSet<&str> = doc.words.iter().map(String::as_str).collect();
        for word in unique.iter() {
            let count = doc_counts.get_or_default(*word, 0.0);
            doc_counts.put(*word, count + 1.0);
        }
    }

    let num_docs = documents.len() as f64;
    doc_counts
        .iter()
        .map(|(word, count)| (word.to_string(), (num_docs / count).ln()))
        .collect()
}

/// `tf(w) = occurrences of w / number of words`
fn compute_tf_scores<S: AsRef<str>>(words: &[S]) -> HashIndex<&str, f64> {
    let mut counts: HashIndex<&str, f64> = HashIndex::new();
    for word in words {
        let word = word.as_ref();
        let count = counts.get_or_default(word, 0.0);
        counts.put(word, count + 1.0);
    }

    let total = words.len() as f64;
    counts
        .iter()
        .map(|(word, count)| (*word, count / total))
        .collect()
}

/// Weights the term frequencies of `words` by `idf_scores`. Words without an IDF
/// score are left out.
fn tf_idf_vector<S: AsRef<str>>(
    words: &[S],
    idf_scores: &HashIndex<String, f64>,
) -> TfIdfVector {
    compute_tf_scores(words)
        .iter()
        .filter_map(|(word, tf)| {
            idf_scores
                .get(*word)
                .ok()
                .map(|idf| (word.to_string(), tf * idf))
        })
        .collect()
}

fn norm(vector: &TfIdfVector) -> f64 {
    vector.values().map(|v| v * v).sum::<f64>().sqrt()
}
