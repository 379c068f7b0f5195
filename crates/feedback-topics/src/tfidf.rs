//! TF-IDF (Term Frequency - Inverse Document Frequency) vectorizer.
//!
//! Builds a dense document-term matrix over unigrams and bigrams with
//! document-frequency pruning, a vocabulary cap, smoothed IDF and
//! L2-normalized rows.

use std::collections::HashMap;

use feedback_types::ClusteringConfig;
use tracing::debug;

/// Vectorizer settings, taken from [`ClusteringConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    /// Vocabulary cap, chosen by corpus term frequency
    pub max_features: usize,
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Maximum share of documents a term may appear in
    pub max_df: f64,
    /// Longest n-gram
    pub max_ngram: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self::from(&ClusteringConfig::default())
    }
}

impl From<&ClusteringConfig> for VectorizerConfig {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            max_features: config.max_features,
            min_df: config.min_df,
            max_df: config.max_df,
            max_ngram: config.max_ngram,
        }
    }
}

/// Weighted document-term matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    /// Terms in lexicographic order; column `i` is `vocabulary[i]`
    pub vocabulary: Vec<String>,
    /// Smoothed IDF per column
    pub idf: Vec<f64>,
    /// One L2-normalized row per document, in corpus order
    pub rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    fn empty(doc_count: usize) -> Self {
        Self {
            vocabulary: Vec::new(),
            idf: Vec::new(),
            rows: vec![Vec::new(); doc_count],
        }
    }

    /// True when pruning left no terms.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn doc_count(&self) -> usize {
        self.rows.len()
    }

    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }
}

/// Fits a vocabulary on a corpus and weights it in one pass.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
}

impl TfIdfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Build the weighted matrix for `documents`.
    ///
    /// Returns an empty vocabulary (rows of length zero) when the corpus is
    /// empty, when the max-df bound falls below `min_df`, or when no term
    /// survives pruning.
    pub fn fit_transform(&self, documents: &[&str]) -> TfIdfMatrix {
        let n = documents.len();
        if n == 0 {
            return TfIdfMatrix::empty(0);
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| count_terms(&analyze(doc, self.config.max_ngram)))
            .collect();

        let mut doc_frequencies: HashMap<&str, usize> = HashMap::new();
        let mut term_frequencies: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, &count) in doc {
                *doc_frequencies.entry(term.as_str()).or_insert(0) += 1;
                *term_frequencies.entry(term.as_str()).or_insert(0) += count;
            }
        }

        let max_doc_count = (self.config.max_df * n as f64).floor() as usize;
        if max_doc_count < self.config.min_df {
            debug!(
                doc_count = n,
                max_doc_count,
                min_df = self.config.min_df,
                "Document-frequency bounds leave no room for terms"
            );
            return TfIdfMatrix::empty(n);
        }

        let mut kept: Vec<&str> = doc_frequencies
            .iter()
            .filter(|(_, &df)| df >= self.config.min_df && df <= max_doc_count)
            .map(|(&term, _)| term)
            .collect();

        if kept.len() > self.config.max_features {
            kept.sort_by(|a, b| {
                term_frequencies[b]
                    .cmp(&term_frequencies[a])
                    .then_with(|| a.cmp(b))
            });
            kept.truncate(self.config.max_features);
        }
        kept.sort_unstable();

        if kept.is_empty() {
            debug!(doc_count = n, "No terms survived pruning");
            return TfIdfMatrix::empty(n);
        }

        let idf: Vec<f64> = kept
            .iter()
            .map(|term| smoothed_idf(n, doc_frequencies[term]))
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = kept
                    .iter()
                    .zip(&idf)
                    .map(|(term, weight)| {
                        doc.get(*term).copied().unwrap_or(0) as f64 * weight
                    })
                    .collect();
                crate::similarity::normalize(&mut row);
                row
            })
            .collect();

        debug!(doc_count = n, term_count = kept.len(), "Built TF-IDF matrix");

        TfIdfMatrix {
            vocabulary: kept.into_iter().map(String::from).collect(),
            idf,
            rows,
        }
    }
}

/// Smoothed IDF: ln((1 + n) / (1 + df)) + 1
fn smoothed_idf(doc_count: usize, df: usize) -> f64 {
    ((1.0 + doc_count as f64) / (1.0 + df as f64)).ln() + 1.0
}

fn count_terms(terms: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.clone()).or_insert(0) += 1;
    }
    counts
}

/// Tokenize, drop stop words, then form n-grams up to `max_ngram`.
///
/// Bigrams join neighbouring tokens that survived stop-word removal.
pub fn analyze(text: &str, max_ngram: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = tokens.clone();
    for n in 2..=max_ngram {
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}

/// Lowercase word tokens of two or more characters, stop words removed.
///
/// Letters, digits and underscores form words; everything else separates.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1)
        .filter(|s| !is_stop_word(s))
        .map(String::from)
        .collect()
}

/// Check if a word is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
    "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
    "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next",
    "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
    "someone", "something", "sometime", "sometimes", "somewhere", "still", "such", "system",
    "take", "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they", "thick",
    "thin", "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under",
    "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(docs: &[&str]) -> TfIdfMatrix {
        TfIdfVectorizer::default().fit_transform(docs)
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words_and_single_chars() {
        assert_eq!(tokenize("the app is a mess x"), vec!["app", "mess"]);
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        assert_eq!(tokenize("error 404 on v2"), vec!["error", "404", "v2"]);
    }

    #[test]
    fn test_analyze_forms_bigrams_after_stop_words() {
        let terms = analyze("slow loading of the dashboard", 2);
        assert_eq!(
            terms,
            vec![
                "slow",
                "loading",
                "dashboard",
                "slow loading",
                "loading dashboard"
            ]
        );
    }

    #[test]
    fn test_analyze_unigrams_only() {
        assert_eq!(analyze("dark mode", 1), vec!["dark", "mode"]);
    }

    #[test]
    fn test_is_stop_word() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("system"));
        assert!(!is_stop_word("dashboard"));
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let m = fit(&["dark mode please", "dark mode toggle", "export csv"]);
        assert_eq!(m.vocabulary, vec!["dark", "dark mode", "mode"]);
    }

    #[test]
    fn test_max_df_prunes_ubiquitous_terms() {
        let m = fit(&[
            "app crash login",
            "app crash export",
            "app slow login",
            "app slow export",
        ]);
        // "app" appears in 4 of 4 documents; floor(0.95 * 4) = 3
        assert!(m.column("app").is_none());
        assert!(m.column("crash").is_some());
    }

    #[test]
    fn test_bounds_below_min_df_yield_empty_vocabulary() {
        // floor(0.95 * 2) = 1 < min_df = 2
        let m = fit(&["dark mode", "dark mode"]);
        assert!(m.is_empty());
        assert_eq!(m.doc_count(), 2);
    }

    #[test]
    fn test_no_shared_terms_yield_empty_vocabulary() {
        let m = fit(&["alpha", "beta", "gamma"]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let m = fit(&[]);
        assert!(m.is_empty());
        assert_eq!(m.doc_count(), 0);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_features: 1,
            max_ngram: 1,
            ..Default::default()
        });
        let m = vectorizer.fit_transform(&["crash crash login", "crash login", "other"]);
        assert_eq!(m.vocabulary, vec!["crash"]);
    }

    #[test]
    fn test_max_features_ties_broken_by_term() {
        let vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_features: 1,
            max_ngram: 1,
            ..Default::default()
        });
        let m = vectorizer.fit_transform(&["zebra apple", "zebra apple", "other"]);
        assert_eq!(m.vocabulary, vec!["apple"]);
    }

    #[test]
    fn test_smoothed_idf() {
        assert!((smoothed_idf(3, 3) - 1.0).abs() < 1e-12);
        assert!((smoothed_idf(3, 1) - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length_or_zero() {
        let m = fit(&["dark mode", "dark theme", "mode theme", "unrelated words"]);
        for row in &m.rows {
            assert_eq!(row.len(), m.term_count());
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9 || norm == 0.0);
        }
        // Last document shares nothing with the vocabulary
        assert!(m.rows[3].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_weights_reflect_rarity() {
        let m = fit(&["crash login", "crash export", "slow login", "slow export", "crash"]);
        let row = &m.rows[0];
        let crash = m.column("crash").unwrap();
        let login = m.column("login").unwrap();
        // crash: df 3, login: df 2; same raw count, rarer term weighs more
        assert!(row[login] > row[crash]);
    }
}
