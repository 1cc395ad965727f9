//! Term-frequency / inverse-document-frequency weighting.

use std::collections::HashMap;
use std::sync::OnceLock;

use ndarray::Array2;
use regex::Regex;

/// Word tokens of at least two word characters, unicode-aware.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A fitted mapping from text terms to numeric importance weights.
///
/// The vocabulary is learned once, from training text only, and applied
/// unchanged to any later partition: [`transform`](Self::transform) never
/// adds terms, so there is no leakage of test vocabulary into the model.
///
/// Weighting follows the common smoothed scheme: raw term counts scaled by
/// `idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1`, with each document row
/// L2-normalized. When the corpus has more distinct terms than
/// `max_features`, the terms with the highest total corpus frequency are
/// kept (ties broken alphabetically). Columns are ordered alphabetically
/// by term, so fitting is fully deterministic.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and IDF weights from the given documents.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let n_docs = documents.len();

        // Total corpus frequency (for the max_features cut) and document
        // frequency (for IDF) per term.
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for token in &tokens {
                *seen.entry(token).or_insert(0) += 1;
            }
            for (token, count) in seen {
                *corpus_freq.entry(token.to_string()).or_insert(0) += count;
                *doc_freq.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let mut vocabulary: Vec<String> = if corpus_freq.len() > max_features {
            let mut ranked: Vec<(&String, usize)> =
                corpus_freq.iter().map(|(t, &c)| (t, c)).collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked
                .into_iter()
                .take(max_features)
                .map(|(t, _)| t.clone())
                .collect()
        } else {
            corpus_freq.keys().cloned().collect()
        };
        vocabulary.sort_unstable();

        let index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let idf = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0);
                ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0
            })
            .collect();

        Self {
            vocabulary,
            index,
            idf,
        }
    }

    /// Transforms documents into a dense matrix using the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored; the output always has
    /// exactly [`n_features`](Self::n_features) columns.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let n_features = self.vocabulary.len();
        let mut matrix = Array2::<f64>::zeros((documents.len(), n_features));

        for (row, doc) in documents.iter().enumerate() {
            for token in tokenize(doc.as_ref()) {
                if let Some(&col) = self.index.get(&token) {
                    matrix[[row, col]] += 1.0;
                }
            }

            for col in 0..n_features {
                matrix[[row, col]] *= self.idf[col];
            }

            let norm = matrix
                .row(row)
                .iter()
                .map(|v| v * v)
                .sum::<f64>()
                .sqrt();
            if norm > 0.0 {
                for col in 0..n_features {
                    matrix[[row, col]] /= norm;
                }
            }
        }

        matrix
    }

    /// The learned terms, in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Width of the transformed matrices.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS: [&str; 4] = [
        "win a free prize now",
        "free prize inside claim now",
        "meeting moved to tuesday",
        "see you at the meeting",
    ];

    #[test]
    fn test_tokenizer_lowercases_and_drops_short_tokens() {
        assert_eq!(tokenize("Win A FREE Prize"), vec!["win", "free", "prize"]);
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn test_vocabulary_capped_and_sorted() {
        let vectorizer = TfidfVectorizer::fit(&DOCS, 5);
        assert_eq!(vectorizer.n_features(), 5);
        let mut sorted = vectorizer.vocabulary().to_vec();
        sorted.sort();
        assert_eq!(vectorizer.vocabulary(), sorted.as_slice());
    }

    #[test]
    fn test_cap_keeps_most_frequent_terms() {
        let vectorizer = TfidfVectorizer::fit(&DOCS, 4);
        // "free", "prize", "now" and "meeting" each appear twice in the
        // corpus; everything else appears once.
        for term in ["free", "prize", "now", "meeting"] {
            assert!(
                vectorizer.vocabulary().contains(&term.to_string()),
                "expected '{term}' in {:?}",
                vectorizer.vocabulary()
            );
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let a = TfidfVectorizer::fit(&DOCS, 5);
        let b = TfidfVectorizer::fit(&DOCS, 5);
        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_eq!(a.transform(&DOCS), b.transform(&DOCS));
    }

    #[test]
    fn test_transform_ignores_unseen_terms() {
        let vectorizer = TfidfVectorizer::fit(&DOCS, 10);
        let unseen = ["completely unrelated words here"];
        let matrix = vectorizer.transform(&unseen);
        assert_eq!(matrix.ncols(), vectorizer.n_features());
        assert!(matrix.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let vectorizer = TfidfVectorizer::fit(&DOCS, 10);
        let matrix = vectorizer.transform(&DOCS);
        for row in matrix.rows() {
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "row norm was {norm}");
        }
    }

    #[test]
    fn test_empty_document_row_is_zero() {
        let vectorizer = TfidfVectorizer::fit(&DOCS, 10);
        let matrix = vectorizer.transform(&[""]);
        assert!(matrix.row(0).iter().all(|&v| v == 0.0));
    }
}
