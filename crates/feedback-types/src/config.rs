//! Configuration loading for the feedback engine.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! Default config file: ~/.config/feedback-engine/config.toml

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FeedbackError;
use crate::status::FeedbackStatus;

const APP_NAME: &str = "feedback-engine";

/// Sentiment labeling thresholds and score normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Scores at or above this are positive (closed interval)
    #[serde(default = "default_positive_threshold")]
    pub positive_threshold: f64,

    /// Scores at or below this are negative (closed interval)
    #[serde(default = "default_negative_threshold")]
    pub negative_threshold: f64,

    /// Alpha in `x / sqrt(x^2 + alpha)`
    #[serde(default = "default_normalization_alpha")]
    pub normalization_alpha: f64,
}

fn default_positive_threshold() -> f64 {
    0.20
}
fn default_negative_threshold() -> f64 {
    -0.20
}
fn default_normalization_alpha() -> f64 {
    15.0
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_threshold: default_positive_threshold(),
            negative_threshold: default_negative_threshold(),
            normalization_alpha: default_normalization_alpha(),
        }
    }
}

impl SentimentConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !(-1.0..=1.0).contains(&self.negative_threshold)
            || !(-1.0..=1.0).contains(&self.positive_threshold)
        {
            return Err("thresholds must lie in [-1.0, 1.0]".to_string());
        }
        if self.negative_threshold >= self.positive_threshold {
            return Err(format!(
                "negative_threshold ({}) must be below positive_threshold ({})",
                self.negative_threshold, self.positive_threshold
            ));
        }
        if self.normalization_alpha <= 0.0 {
            return Err(format!(
                "normalization_alpha must be > 0, got {}",
                self.normalization_alpha
            ));
        }
        Ok(())
    }
}

/// Topic clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Cluster count used when the caller does not pass one
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Vocabulary cap
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Terms in fewer documents than this are dropped
    #[serde(default = "default_min_df")]
    pub min_df: usize,

    /// Terms in more than this fraction of documents are dropped
    #[serde(default = "default_max_df")]
    pub max_df: f64,

    /// Longest n-gram (1 = unigrams only)
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,

    /// k-means restarts
    #[serde(default = "default_n_init")]
    pub n_init: usize,

    /// Lloyd iterations per restart
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Relative convergence tolerance
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Seed for k-means initialisation
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    #[serde(default = "default_max_examples")]
    pub max_examples: usize,

    /// Keywords used to build the label
    #[serde(default = "default_label_terms")]
    pub label_terms: usize,

    #[serde(default = "default_label_separator")]
    pub label_separator: String,

    /// Memoized results kept by the cluster cache (0 disables caching)
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_k() -> usize {
    5
}
fn default_max_features() -> usize {
    1000
}
fn default_min_df() -> usize {
    2
}
fn default_max_df() -> f64 {
    0.95
}
fn default_max_ngram() -> usize {
    2
}
fn default_n_init() -> usize {
    10
}
fn default_max_iter() -> usize {
    300
}
fn default_tolerance() -> f64 {
    1e-4
}
fn default_seed() -> u64 {
    42
}
fn default_top_keywords() -> usize {
    5
}
fn default_max_examples() -> usize {
    3
}
fn default_label_terms() -> usize {
    3
}
fn default_label_separator() -> String {
    ", ".to_string()
}
fn default_cache_capacity() -> usize {
    16
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_features: default_max_features(),
            min_df: default_min_df(),
            max_df: default_max_df(),
            max_ngram: default_max_ngram(),
            n_init: default_n_init(),
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            seed: default_seed(),
            top_keywords: default_top_keywords(),
            max_examples: default_max_examples(),
            label_terms: default_label_terms(),
            label_separator: default_label_separator(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl ClusteringConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_k < 2 {
            return Err(format!("default_k must be >= 2, got {}", self.default_k));
        }
        if self.max_features == 0 {
            return Err("max_features must be > 0".to_string());
        }
        if self.min_df == 0 {
            return Err("min_df must be >= 1".to_string());
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(format!("max_df must be in (0.0, 1.0], got {}", self.max_df));
        }
        if !(1..=3).contains(&self.max_ngram) {
            return Err(format!("max_ngram must be 1-3, got {}", self.max_ngram));
        }
        if self.n_init == 0 || self.max_iter == 0 {
            return Err("n_init and max_iter must be > 0".to_string());
        }
        if self.tolerance < 0.0 {
            return Err("tolerance must be >= 0".to_string());
        }
        if self.top_keywords == 0 || self.max_examples == 0 {
            return Err("top_keywords and max_examples must be > 0".to_string());
        }
        if self.label_terms == 0 || self.label_terms > self.top_keywords {
            return Err(format!(
                "label_terms must be 1..={}, got {}",
                self.top_keywords, self.label_terms
            ));
        }
        Ok(())
    }
}

/// How the status transition table is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may move to any other status
    #[default]
    Permissive,
    /// Permissive minus the configured `denied` pairs
    Restricted,
}

/// A status change that a restricted table refuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeniedTransition {
    pub from: FeedbackStatus,
    pub to: FeedbackStatus,
}

/// Status lifecycle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleConfig {
    #[serde(default)]
    pub policy: TransitionPolicy,

    /// Only honoured with `policy = "restricted"`
    #[serde(default)]
    pub denied: Vec<DeniedTransition>,
}

impl LifecycleConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.policy == TransitionPolicy::Permissive && !self.denied.is_empty() {
            return Err("denied transitions require policy = \"restricted\"".to_string());
        }
        if let Some(same) = self.denied.iter().find(|d| d.from == d.to) {
            return Err(format!(
                "same-state requests cannot be denied ({} -> {})",
                same.from, same.to
            ));
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to RocksDB storage directory
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub sentiment: SentimentConfig,

    #[serde(default)]
    pub clustering: ClusteringConfig,

    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

fn default_db_path() -> String {
    ProjectDirs::from("", "", APP_NAME)
        .map(|p| p.data_local_dir().join("db"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
            sentiment: SentimentConfig::default(),
            clustering: ClusteringConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/feedback-engine/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (FEEDBACK_*, nested keys joined by `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, FeedbackError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("db_path", default_db_path())
            .map_err(|e| FeedbackError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| FeedbackError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // FEEDBACK_DB_PATH, FEEDBACK_CLUSTERING__SEED, ...
        builder = builder.add_source(
            Environment::with_prefix("FEEDBACK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| FeedbackError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| FeedbackError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every component section.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        self.sentiment
            .validate()
            .map_err(|e| FeedbackError::Config(format!("sentiment: {e}")))?;
        self.clustering
            .validate()
            .map_err(|e| FeedbackError::Config(format!("clustering: {e}")))?;
        self.lifecycle
            .validate()
            .map_err(|e| FeedbackError::Config(format!("lifecycle: {e}")))?;
        Ok(())
    }

    /// Expand ~ in db_path to the home directory
    pub fn expanded_db_path(&self) -> PathBuf {
        if let Some(rest) = self.db_path.strip_prefix("~/") {
            if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.db_path)
    }
}
