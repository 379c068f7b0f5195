//! Demo corpus.
//!
//! Twenty-five product feedback items spanning the three sentiment labels,
//! spread over the last two weeks with a mix of statuses. Seeding goes
//! through the regular create and status paths, so every seeded item has a
//! complete audit trail.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use feedback_types::SentimentLabel::{Negative, Neutral, Positive};
use feedback_types::{Actor, FeedbackStatus, SentimentLabel};

use crate::error::ServiceError;
use crate::service::{CreateFeedbackRequest, FeedbackService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFeedback {
    pub title: &'static str,
    pub content: &'static str,
    /// Label a reader would assign
    pub expected: SentimentLabel,
}

const fn sample(title: &'static str, content: &'static str, expected: SentimentLabel) -> SampleFeedback {
    SampleFeedback {
        title,
        content,
        expected,
    }
}

pub const SAMPLE_FEEDBACK: &[SampleFeedback] = &[
    sample("Terrible UI experience", "The interface is confusing and clunky. I can't find basic features and the navigation is awful.", Negative),
    sample("Login keeps failing", "I've tried multiple times but the login is broken. Getting error messages constantly.", Negative),
    sample("App is unusable on mobile", "The mobile experience is terrible. Buttons are too small and the layout is completely broken on my phone.", Negative),
    sample("Slow performance issues", "Everything takes forever to load. The app is painfully slow and frustrating to use.", Negative),
    sample("Buggy checkout process", "Lost my cart twice due to bugs. The checkout is broken and unreliable.", Negative),
    sample("Awful error handling", "When something goes wrong, I just see a blank screen. No helpful error messages at all.", Negative),
    sample("Hate the new update", "The recent update made everything worse. Please revert to the old version.", Negative),
    sample("Feature request: dark mode", "It would be nice to have a dark mode option for nighttime use.", Neutral),
    sample("Question about export", "Is there a way to export data to CSV? I couldn't find this option anywhere.", Neutral),
    sample("Suggestion for dashboard", "Maybe consider adding more customization options to the dashboard layout.", Neutral),
    sample("Mobile app availability", "Are there plans for a dedicated mobile app in the future?", Neutral),
    sample("Documentation feedback", "The help docs could use some more examples for common use cases.", Neutral),
    sample("Keyboard shortcuts", "Would be helpful to have keyboard shortcuts for common actions.", Neutral),
    sample("Integration question", "Does this integrate with Slack or Microsoft Teams?", Neutral),
    sample("Account settings", "Could you add an option to change username in settings?", Neutral),
    sample("Amazing new feature!", "Love the new analytics dashboard! It's intuitive and really helpful for tracking progress.", Positive),
    sample("Great customer support", "The support team was amazing and resolved my issue quickly. Thank you!", Positive),
    sample("Smooth onboarding", "Just signed up and the onboarding process was clean and easy to follow.", Positive),
    sample("Perfect for our team", "This tool is exactly what we needed. Great job on making it so intuitive!", Positive),
    sample("Love the simplicity", "Finally a product that doesn't overcomplicate things. The UI is clean and beautiful.", Positive),
    sample("Excellent performance", "The app is super fast and responsive. Really impressed with the performance.", Positive),
    sample("Best in class", "Tried many similar tools but this is by far the best. Intuitive and powerful.", Positive),
    sample("Fantastic update", "The latest update is amazing! All the new features work perfectly.", Positive),
    sample("Recommend to everyone", "Already recommended this to all my colleagues. Such a great product!", Positive),
    sample("Worth every penny", "The value you get is incredible. Smooth experience and great features.", Positive),
];

/// Category names; ids are positions starting at 1.
pub const CATEGORIES: &[&str] = &["UI/UX", "Bugs", "Feature Request", "Performance"];

/// Tag names; ids are positions starting at 1.
pub const TAGS: &[&str] = &[
    "ui", "login", "slow", "mobile", "layout", "dashboard", "analytics", "support",
];

/// Status pool; NEW, TRIAGED and IN_PROGRESS appear twice.
const SEED_STATUSES: [FeedbackStatus; 8] = [
    FeedbackStatus::New,
    FeedbackStatus::New,
    FeedbackStatus::Triaged,
    FeedbackStatus::Triaged,
    FeedbackStatus::InProgress,
    FeedbackStatus::InProgress,
    FeedbackStatus::Resolved,
    FeedbackStatus::Rejected,
];

/// Spread window for creation times.
const SEED_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Owner of the seeded items
    pub user: Actor,
    /// Actor recorded on seeded status changes
    pub admin: Actor,
    /// RNG seed for dates, categories, tags and statuses
    pub rng_seed: u64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            user: Actor::user(2),
            admin: Actor::admin(1),
            rng_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    /// Corpus was already present
    pub skipped: bool,
}

impl FeedbackService {
    /// Load the demo corpus unless its first item already exists.
    pub async fn seed_demo(&self, options: &SeedOptions) -> Result<SeedReport, ServiceError> {
        let marker = SAMPLE_FEEDBACK[0].title;
        if self
            .storage
            .list_feedback()?
            .iter()
            .any(|f| f.title == marker)
        {
            info!("Demo feedback already exists, skipping seed");
            return Ok(SeedReport {
                created: 0,
                skipped: true,
            });
        }

        let mut rng = StdRng::seed_from_u64(options.rng_seed);
        let now = Utc::now();

        for sample in SAMPLE_FEEDBACK {
            let age = Duration::days(rng.random_range(0..SEED_DAYS))
                + Duration::hours(rng.random_range(0..24));
            let created_at = now - age;

            let category_id = rng.random_range(1..=CATEGORIES.len() as u64);
            let tag_count = rng.random_range(1..=3);
            let mut tag_ids: Vec<u64> = index::sample(&mut rng, TAGS.len(), tag_count)
                .into_iter()
                .map(|i| i as u64 + 1)
                .collect();
            tag_ids.sort_unstable();
            let status = SEED_STATUSES[rng.random_range(0..SEED_STATUSES.len())];

            let request = CreateFeedbackRequest {
                title: sample.title.to_string(),
                content: sample.content.to_string(),
                category_id: Some(category_id),
                tag_ids,
            };
            let feedback = self.create_feedback_at(&options.user, request, created_at)?;
            if status != FeedbackStatus::New {
                self.update_status_at(&options.admin, feedback.id, status, created_at)?;
            }
        }

        info!(created = SAMPLE_FEEDBACK.len(), "Seeded demo feedback");
        Ok(SeedReport {
            created: SAMPLE_FEEDBACK.len(),
            skipped: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_sentiment::SentimentScorer;
    use feedback_storage::Storage;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_corpus_shape() {
        assert_eq!(SAMPLE_FEEDBACK.len(), 25);
        let count = |label| SAMPLE_FEEDBACK.iter().filter(|s| s.expected == label).count();
        assert_eq!(count(Negative), 7);
        assert_eq!(count(Neutral), 8);
        assert_eq!(count(Positive), 10);
    }

    #[test]
    fn test_override_words_label_samples() {
        let scorer = SentimentScorer::default();
        for sample in SAMPLE_FEEDBACK {
            let result = scorer.score_feedback(sample.title, sample.content);
            let analysis = scorer.analyze(&format!("{} {}", sample.title, sample.content));
            if analysis.override_word.is_some() {
                assert_eq!(result.label, sample.expected, "{}", sample.title);
            }
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::open(temp_dir.path()).unwrap());
        let service = FeedbackService::with_defaults(Arc::clone(&storage)).unwrap();

        let report = service.seed_demo(&SeedOptions::default()).await.unwrap();
        assert_eq!(report.created, 25);
        assert!(!report.skipped);

        let again = service.seed_demo(&SeedOptions::default()).await.unwrap();
        assert!(again.skipped);
        assert_eq!(storage.list_feedback().unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_seeded_items_have_consistent_trails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::open(temp_dir.path()).unwrap());
        let service = FeedbackService::with_defaults(Arc::clone(&storage)).unwrap();
        service.seed_demo(&SeedOptions::default()).await.unwrap();

        for feedback in storage.list_feedback().unwrap() {
            let history = service
                .history(&Actor::admin(1), feedback.id)
                .await
                .unwrap();
            assert_eq!(history.current(), feedback.status);
            assert_eq!(
                feedback.resolved_at.is_some(),
                feedback.status == FeedbackStatus::Resolved
            );
            assert!(!feedback.tag_ids.is_empty() && feedback.tag_ids.len() <= 3);
            assert!(feedback.created_at <= Utc::now());
        }
    }
}
