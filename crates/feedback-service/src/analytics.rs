//! Aggregate statistics over stored feedback.
//!
//! The aggregations are plain functions over a feedback slice and a clock
//! value; [`FeedbackService`] wires them to storage and role checks.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use feedback_types::{Actor, Feedback, FeedbackStatus, SentimentLabel};

use crate::error::ServiceError;
use crate::service::{ensure_admin, FeedbackService};

/// Longest accepted reporting window in days.
pub const MAX_WINDOW_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_feedback: u64,
    pub open_feedback: u64,
    pub resolved_feedback: u64,
    /// Mean creation-to-resolution time over resolved items
    pub average_resolution_time_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPoint {
    pub date: NaiveDate,
    /// Mean score of the day, rounded to 3 decimals
    pub average_sentiment: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub negative: u64,
    pub neutral: u64,
    pub positive: u64,
}

/// Item count for a tag or category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCount {
    pub id: u64,
    pub count: u64,
}

pub fn overview(items: &[Feedback]) -> OverviewStats {
    let resolved: Vec<&Feedback> = items
        .iter()
        .filter(|f| f.status == FeedbackStatus::Resolved)
        .collect();
    let hours: Vec<f64> = resolved.iter().filter_map(|f| f.resolution_hours()).collect();
    let average_resolution_time_hours = if hours.is_empty() {
        None
    } else {
        Some(hours.iter().sum::<f64>() / hours.len() as f64)
    };

    OverviewStats {
        total_feedback: items.len() as u64,
        open_feedback: items.iter().filter(|f| f.status.is_open()).count() as u64,
        resolved_feedback: resolved.len() as u64,
        average_resolution_time_hours,
    }
}

/// Daily submission counts from `now - days` through today, zero days included.
pub fn volume(items: &[Feedback], days: u32, now: DateTime<Utc>) -> Vec<VolumePoint> {
    let start = now - Duration::days(i64::from(days));
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for f in items.iter().filter(|f| f.created_at >= start) {
        *counts.entry(f.created_at.date_naive()).or_default() += 1;
    }

    let end = now.date_naive();
    let mut points = Vec::new();
    let mut date = start.date_naive();
    while date <= end {
        points.push(VolumePoint {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    points
}

/// Mean sentiment per day since `now - days`. Days without feedback are omitted.
pub fn sentiment_trends(items: &[Feedback], days: u32, now: DateTime<Utc>) -> Vec<SentimentPoint> {
    let start = now - Duration::days(i64::from(days));
    let mut by_day: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
    for f in items.iter().filter(|f| f.created_at >= start) {
        let entry = by_day.entry(f.created_at.date_naive()).or_default();
        entry.0 += f.sentiment.score;
        entry.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (sum, count))| SentimentPoint {
            date,
            average_sentiment: round3(sum / count as f64),
            count,
        })
        .collect()
}

pub fn sentiment_breakdown(items: &[Feedback]) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown::default();
    for f in items {
        match f.sentiment.label {
            SentimentLabel::Negative => breakdown.negative += 1,
            SentimentLabel::Neutral => breakdown.neutral += 1,
            SentimentLabel::Positive => breakdown.positive += 1,
        }
    }
    breakdown
}

/// Most used tag ids, by count descending then id ascending.
pub fn top_tags(items: &[Feedback], limit: usize) -> Vec<IdCount> {
    rank(items.iter().flat_map(|f| f.tag_ids.iter().copied()), limit)
}

/// Most used category ids, by count descending then id ascending.
pub fn top_categories(items: &[Feedback], limit: usize) -> Vec<IdCount> {
    rank(items.iter().filter_map(|f| f.category_id), limit)
}

fn rank(ids: impl Iterator<Item = u64>, limit: usize) -> Vec<IdCount> {
    let mut counts: HashMap<u64, u64> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    let mut ranked: Vec<IdCount> = counts
        .into_iter()
        .map(|(id, count)| IdCount { id, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));
    ranked.truncate(limit);
    ranked
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn check_window(days: u32) -> Result<(), ServiceError> {
    if (1..=MAX_WINDOW_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(ServiceError::BadRequest(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}, got {days}"
        )))
    }
}

impl FeedbackService {
    /// Totals and mean resolution time. Admin only.
    pub async fn overview(&self, actor: &Actor) -> Result<OverviewStats, ServiceError> {
        ensure_admin(actor)?;
        let stats = overview(&self.storage.list_feedback()?);
        debug!(total = stats.total_feedback, "Computed overview");
        Ok(stats)
    }

    /// Daily submission counts. Admin only.
    pub async fn volume(&self, actor: &Actor, days: u32) -> Result<Vec<VolumePoint>, ServiceError> {
        ensure_admin(actor)?;
        check_window(days)?;
        Ok(volume(&self.storage.list_feedback()?, days, Utc::now()))
    }

    /// Daily mean sentiment. Admin only.
    pub async fn sentiment_trends(
        &self,
        actor: &Actor,
        days: u32,
    ) -> Result<Vec<SentimentPoint>, ServiceError> {
        ensure_admin(actor)?;
        check_window(days)?;
        Ok(sentiment_trends(&self.storage.list_feedback()?, days, Utc::now()))
    }

    /// Counts per sentiment label. Admin only.
    pub async fn sentiment_breakdown(&self, actor: &Actor) -> Result<SentimentBreakdown, ServiceError> {
        ensure_admin(actor)?;
        Ok(sentiment_breakdown(&self.storage.list_feedback()?))
    }

    /// Most used tags. Admin only.
    pub async fn top_tags(&self, actor: &Actor, limit: usize) -> Result<Vec<IdCount>, ServiceError> {
        ensure_admin(actor)?;
        Ok(top_tags(&self.storage.list_feedback()?, limit))
    }

    /// Most used categories. Admin only.
    pub async fn top_categories(
        &self,
        actor: &Actor,
        limit: usize,
    ) -> Result<Vec<IdCount>, ServiceError> {
        ensure_admin(actor)?;
        Ok(top_categories(&self.storage.list_feedback()?, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use feedback_types::SentimentResult;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn item(id: u64, hours_ago: i64, status: FeedbackStatus, score: f64, label: SentimentLabel) -> Feedback {
        let created = now() - Duration::hours(hours_ago);
        Feedback {
            id,
            user_id: 1,
            title: format!("t{id}"),
            content: String::new(),
            category_id: Some(id % 2 + 1),
            tag_ids: vec![1, id],
            status,
            sentiment: SentimentResult::new(score, label),
            created_at: created,
            updated_at: created,
            resolved_at: (status == FeedbackStatus::Resolved)
                .then(|| created + Duration::hours(4)),
            revision: 0,
        }
    }

    fn corpus() -> Vec<Feedback> {
        use FeedbackStatus::*;
        use SentimentLabel::*;
        vec![
            item(1, 1, New, -0.5, Negative),
            item(2, 2, Resolved, 0.3, Positive),
            item(3, 26, Triaged, 0.1, Neutral),
            item(4, 27, Rejected, 0.2, Positive),
            item(5, 100, InProgress, -0.25, Negative),
        ]
    }

    #[test]
    fn test_overview() {
        let stats = overview(&corpus());
        assert_eq!(stats.total_feedback, 5);
        assert_eq!(stats.open_feedback, 3);
        assert_eq!(stats.resolved_feedback, 1);
        assert_eq!(stats.average_resolution_time_hours, Some(4.0));
    }

    #[test]
    fn test_overview_without_resolved() {
        let stats = overview(&[]);
        assert_eq!(stats.total_feedback, 0);
        assert_eq!(stats.average_resolution_time_hours, None);
    }

    #[test]
    fn test_volume_fills_zero_days() {
        let points = volume(&corpus(), 3, now());
        let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, ["2024-05-07", "2024-05-08", "2024-05-09", "2024-05-10"]);
        let counts: Vec<u64> = points.iter().map(|p| p.count).collect();
        assert_eq!(counts, [0, 0, 2, 2]);
    }

    #[test]
    fn test_sentiment_trends() {
        let points = sentiment_trends(&corpus(), 30, now());
        assert_eq!(points.len(), 3);
        let today = &points[2];
        assert_eq!(today.date.to_string(), "2024-05-10");
        assert_eq!(today.count, 2);
        assert_eq!(today.average_sentiment, -0.1);
        let yesterday = &points[1];
        assert_eq!(yesterday.average_sentiment, 0.15);
    }

    #[test]
    fn test_trends_window_excludes_old_items() {
        let points = sentiment_trends(&corpus(), 1, now());
        assert_eq!(points.iter().map(|p| p.count).sum::<u64>(), 2);
    }

    #[test]
    fn test_breakdown() {
        let breakdown = sentiment_breakdown(&corpus());
        assert_eq!(
            breakdown,
            SentimentBreakdown {
                negative: 2,
                neutral: 1,
                positive: 2
            }
        );
    }

    #[test]
    fn test_top_tags_and_categories() {
        let tags = top_tags(&corpus(), 2);
        assert_eq!(tags[0], IdCount { id: 1, count: 6 });
        assert_eq!(tags[1], IdCount { id: 2, count: 1 });

        let categories = top_categories(&corpus(), 10);
        assert_eq!(
            categories,
            vec![IdCount { id: 2, count: 3 }, IdCount { id: 1, count: 2 }]
        );
    }

    #[test]
    fn test_window_bounds() {
        assert!(check_window(0).is_err());
        assert!(check_window(1).is_ok());
        assert!(check_window(365).is_ok());
        assert!(check_window(366).is_err());
    }
}
