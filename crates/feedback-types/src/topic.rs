//! Clustering input and output types.

use serde::{Deserialize, Serialize};

use crate::feedback::{Feedback, FeedbackId, FeedbackText};

/// One document of the clustering corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub id: FeedbackId,
    pub title: String,
    pub content: String,
}

impl CorpusDocument {
    pub fn new(id: FeedbackId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn text(&self) -> FeedbackText {
        FeedbackText::new(&self.title, &self.content)
    }
}

impl From<&Feedback> for CorpusDocument {
    fn from(feedback: &Feedback) -> Self {
        Self::new(feedback.id, feedback.title.clone(), feedback.content.clone())
    }
}

/// A topic cluster computed on demand. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    pub cluster_id: usize,
    /// Top keywords joined for display
    pub label: String,
    /// At most five terms, strongest first
    pub keywords: Vec<String>,
    /// At most three member ids, in corpus order
    pub example_feedback_ids: Vec<FeedbackId>,
    pub example_titles: Vec<String>,
    /// Number of member documents
    pub count: usize,
}
