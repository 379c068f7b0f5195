//! Topic labeling from centroid keyword weights.

use feedback_types::ClusteringConfig;

/// Label used when a centroid carries no weighted term.
pub const UNKNOWN_TOPIC: &str = "Unknown Topic";

/// Labeling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelingConfig {
    /// Keywords kept per cluster
    pub top_keywords: usize,
    /// Keywords joined into the label
    pub label_terms: usize,
    pub label_separator: String,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self::from(&ClusteringConfig::default())
    }
}

impl From<&ClusteringConfig> for LabelingConfig {
    fn from(config: &ClusteringConfig) -> Self {
        Self {
            top_keywords: config.top_keywords,
            label_terms: config.label_terms,
            label_separator: config.label_separator.clone(),
        }
    }
}

/// Generated topic label with its keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicLabel {
    /// Human-readable label
    pub label: String,
    /// Strongest centroid terms, highest weight first
    pub keywords: Vec<String>,
}

impl TopicLabel {
    pub fn new(label: String, keywords: Vec<String>) -> Self {
        Self { label, keywords }
    }
}

/// Trait for generating topic labels from a cluster centroid.
pub trait TopicLabeler: Send + Sync {
    /// `centroid[i]` is the weight of `vocabulary[i]`.
    fn label_cluster(&self, centroid: &[f64], vocabulary: &[String]) -> TopicLabel;
}

/// Keyword-based labeler: the label is the top few centroid terms joined.
#[derive(Debug, Clone, Default)]
pub struct KeywordLabeler {
    config: LabelingConfig,
}

impl KeywordLabeler {
    pub fn new(config: LabelingConfig) -> Self {
        Self { config }
    }

    /// Terms with positive weight, descending by weight, ties by term.
    ///
    /// A zero-weight term appears in no member of the cluster, so padding
    /// with it would pick arbitrary vocabulary; small clusters get fewer
    /// than `top_keywords` keywords instead.
    fn extract_keywords<'a>(&self, centroid: &[f64], vocabulary: &'a [String]) -> Vec<&'a str> {
        let mut weighted: Vec<(&str, f64)> = vocabulary
            .iter()
            .zip(centroid)
            .filter(|(_, &w)| w > 0.0)
            .map(|(term, &w)| (term.as_str(), w))
            .collect();

        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        weighted.truncate(self.config.top_keywords);
        weighted.into_iter().map(|(term, _)| term).collect()
    }

    fn generate_label(&self, keywords: &[&str]) -> String {
        if keywords.is_empty() {
            return UNKNOWN_TOPIC.to_string();
        }

        keywords
            .iter()
            .take(self.config.label_terms)
            .copied()
            .collect::<Vec<_>>()
            .join(&self.config.label_separator)
    }
}

impl TopicLabeler for KeywordLabeler {
    fn label_cluster(&self, centroid: &[f64], vocabulary: &[String]) -> TopicLabel {
        let keywords = self.extract_keywords(centroid, vocabulary);
        let label = self.generate_label(&keywords);
        TopicLabel::new(label, keywords.into_iter().map(String::from).collect())
    }
}
