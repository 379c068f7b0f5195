//! Topic clustering pipeline: TF-IDF, k-means, keyword labels.

use std::sync::Arc;

use tracing::{debug, instrument};

use feedback_types::{ClusteringConfig, CorpusDocument, TopicCluster};

use crate::error::TopicsError;
use crate::kmeans::{KMeans, KMeansConfig};
use crate::labeling::{KeywordLabeler, LabelingConfig, TopicLabeler};
use crate::tfidf::{TfIdfVectorizer, VectorizerConfig};

/// Groups a feedback corpus into ranked topic clusters.
///
/// Deterministic for a fixed seed: the same corpus and k always give the
/// same clusters in the same order.
#[derive(Clone)]
pub struct TopicClusterer {
    config: ClusteringConfig,
    labeler: Arc<dyn TopicLabeler>,
}

impl TopicClusterer {
    pub fn new(config: ClusteringConfig) -> Result<Self, TopicsError> {
        config.validate().map_err(TopicsError::InvalidConfig)?;
        let labeler = Arc::new(KeywordLabeler::new(LabelingConfig::from(&config)));
        Ok(Self { config, labeler })
    }

    /// Replace the keyword labeler.
    pub fn with_labeler(mut self, labeler: Arc<dyn TopicLabeler>) -> Self {
        self.labeler = labeler;
        self
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster `corpus` into at most `k` topics.
    ///
    /// Returns an empty list when the corpus has fewer than `k` documents or
    /// when no term survives vocabulary pruning. Fails only for `k < 2`.
    #[instrument(skip(self, corpus), fields(corpus_size = corpus.len()))]
    pub fn cluster(
        &self,
        corpus: &[CorpusDocument],
        k: usize,
    ) -> Result<Vec<TopicCluster>, TopicsError> {
        if k < 2 {
            return Err(TopicsError::InvalidInput(format!(
                "k must be at least 2, got {k}"
            )));
        }
        if corpus.len() < k {
            debug!(corpus_size = corpus.len(), k, "Corpus smaller than k");
            return Ok(Vec::new());
        }

        let texts: Vec<String> = corpus
            .iter()
            .map(|doc| doc.text().as_str().to_string())
            .collect();
        let documents: Vec<&str> = texts.iter().map(String::as_str).collect();

        let matrix = TfIdfVectorizer::new(VectorizerConfig::from(&self.config))
            .fit_transform(&documents);
        if matrix.is_empty() {
            debug!(corpus_size = corpus.len(), "Empty vocabulary after pruning");
            return Ok(Vec::new());
        }

        let fit = KMeans::new(k, KMeansConfig::from(&self.config))?.fit(&matrix.rows)?;

        let mut clusters: Vec<TopicCluster> = (0..k)
            .filter_map(|cluster_id| {
                let members = fit.members(cluster_id);
                if members.is_empty() {
                    return None;
                }

                let topic = self
                    .labeler
                    .label_cluster(&fit.centroids[cluster_id], &matrix.vocabulary);
                let examples: Vec<&CorpusDocument> = members
                    .iter()
                    .take(self.config.max_examples)
                    .map(|&i| &corpus[i])
                    .collect();

                Some(TopicCluster {
                    cluster_id,
                    label: topic.label,
                    keywords: topic.keywords,
                    example_feedback_ids: examples.iter().map(|doc| doc.id).collect(),
                    example_titles: examples.iter().map(|doc| doc.title.clone()).collect(),
                    count: members.len(),
                })
            })
            .collect();

        clusters.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.cluster_id.cmp(&b.cluster_id))
        });

        debug!(
            k,
            cluster_count = clusters.len(),
            vocabulary = matrix.term_count(),
            "Clustered corpus"
        );
        Ok(clusters)
    }
}

impl Default for TopicClusterer {
    fn default() -> Self {
        Self {
            config: ClusteringConfig::default(),
            labeler: Arc::new(KeywordLabeler::default()),
        }
    }
}

impl std::fmt::Debug for TopicClusterer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicClusterer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
