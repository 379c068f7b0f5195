//! Command implementations for the feedback tool.
//!
//! Every command produces a JSON value; `main` prints it to stdout. Logs go
//! to stderr so the output stays machine-readable.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;

use feedback_lifecycle::FeedbackEdit;
use feedback_sentiment::{Lexicon, SentimentScorer};
use feedback_service::{CreateFeedbackRequest, FeedbackFilter, FeedbackService, SeedOptions};
use feedback_storage::Storage;
use feedback_topics::TopicClusterer;
use feedback_types::{Actor, CorpusDocument, FeedbackStatus, Settings};

use crate::cli::{Cli, Commands};

/// Load settings and apply CLI overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(db_path) = &cli.db_path {
        settings.db_path = db_path.clone();
    }
    if let Some(log_level) = &cli.log_level {
        settings.log_level = log_level.clone();
    }
    Ok(settings)
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Open the store and build the service over it.
pub fn open_service(settings: &Settings) -> Result<FeedbackService> {
    let db_path = settings.expanded_db_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    info!("Opening storage at {:?}", db_path);
    let storage = Storage::open(&db_path).context("Failed to open storage")?;
    FeedbackService::new(Arc::new(storage), settings).context("Failed to build service")
}

/// Run a command and return its JSON output.
pub async fn execute(command: Commands, settings: &Settings) -> Result<Value> {
    match command {
        Commands::Score {
            title,
            content,
            explain,
        } => score_text(settings, &title, &content, explain),
        Commands::Cluster { input, k } => cluster_file(settings, &input, k),
        command => {
            let service = open_service(settings)?;
            handle_store(&service, settings, command).await
        }
    }
}

/// Score a title/body pair without touching the store.
pub fn score_text(settings: &Settings, title: &str, content: &str, explain: bool) -> Result<Value> {
    let scorer = SentimentScorer::new(Arc::new(Lexicon::feedback()), settings.sentiment.clone());
    if explain {
        let text = format!("{title} {content}");
        Ok(serde_json::to_value(scorer.analyze(&text))?)
    } else {
        Ok(serde_json::to_value(scorer.score_feedback(title, content))?)
    }
}

/// Cluster a JSON corpus file without touching the store.
pub fn cluster_file(settings: &Settings, input: &str, k: Option<usize>) -> Result<Value> {
    let raw = fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?;
    let corpus: Vec<CorpusDocument> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid corpus in {input}"))?;
    let clusterer =
        TopicClusterer::new(settings.clustering.clone()).context("Invalid clustering config")?;
    let k = k.unwrap_or(settings.clustering.default_k);
    let clusters = clusterer.cluster(&corpus, k).context("Clustering failed")?;
    Ok(json!({ "clusters": clusters }))
}

/// Store-backed commands. The CLI acts as a local operator: user commands
/// take a `--user` id, everything else runs with the admin role.
pub async fn handle_store(
    service: &FeedbackService,
    settings: &Settings,
    command: Commands,
) -> Result<Value> {
    let operator = Actor::admin(1);

    let value = match command {
        Commands::Submit {
            user,
            title,
            content,
            category,
            tags,
        } => {
            let request = CreateFeedbackRequest {
                title,
                content,
                category_id: category,
                tag_ids: tags,
            };
            let feedback = service
                .create_feedback(&Actor::user(user), request)
                .await
                .context("Failed to submit feedback")?;
            serde_json::to_value(feedback)?
        }
        Commands::Edit {
            id,
            user,
            title,
            content,
        } => {
            let edit = FeedbackEdit { title, content };
            let feedback = service
                .update_feedback(&Actor::user(user), id, edit)
                .await
                .with_context(|| format!("Failed to edit feedback {id}"))?;
            serde_json::to_value(feedback)?
        }
        Commands::Delete { id, user } => {
            service
                .delete_feedback(&Actor::user(user), id)
                .await
                .with_context(|| format!("Failed to delete feedback {id}"))?;
            json!({ "deleted": id })
        }
        Commands::Status { id, status, admin } => {
            let status: FeedbackStatus = status.parse()?;
            let feedback = service
                .update_status(&Actor::admin(admin), id, status)
                .await
                .with_context(|| format!("Failed to change status of feedback {id}"))?;
            serde_json::to_value(feedback)?
        }
        Commands::Respond { id, message, admin } => {
            let response = service
                .respond(&Actor::admin(admin), id, &message)
                .await
                .with_context(|| format!("Failed to respond to feedback {id}"))?;
            serde_json::to_value(response)?
        }
        Commands::Category {
            id,
            category,
            admin,
        } => {
            let feedback = service
                .update_category(&Actor::admin(admin), id, category)
                .await
                .with_context(|| format!("Failed to change category of feedback {id}"))?;
            serde_json::to_value(feedback)?
        }
        Commands::Tags { id, tags, admin } => {
            let feedback = service
                .update_tags(&Actor::admin(admin), id, tags)
                .await
                .with_context(|| format!("Failed to change tags of feedback {id}"))?;
            serde_json::to_value(feedback)?
        }
        Commands::Show { id } => {
            let feedback = service.get_feedback(&operator, id).await?;
            let responses = service.responses(&operator, id).await?;
            json!({ "feedback": feedback, "responses": responses })
        }
        Commands::List { status, category } => {
            let status = status.map(|s| s.parse::<FeedbackStatus>()).transpose()?;
            let filter = FeedbackFilter {
                status,
                category_id: category,
            };
            serde_json::to_value(service.list_feedback(&operator, filter).await?)?
        }
        Commands::History { id } => {
            let history = service
                .history(&operator, id)
                .await
                .with_context(|| format!("Failed to read history of feedback {id}"))?;
            json!({ "feedback_id": id, "events": history.events() })
        }
        Commands::Topics { k } => {
            let k = k.unwrap_or(settings.clustering.default_k);
            let clusters = service.topics(&operator, k).await?;
            json!({ "clusters": clusters.as_slice() })
        }
        Commands::Overview => {
            let overview = service.overview(&operator).await?;
            let breakdown = service.sentiment_breakdown(&operator).await?;
            json!({ "overview": overview, "sentiment": breakdown })
        }
        Commands::Trends { days } => {
            json!({ "data": service.sentiment_trends(&operator, days).await? })
        }
        Commands::Volume { days } => json!({ "data": service.volume(&operator, days).await? }),
        Commands::Top { limit } => json!({
            "tags": service.top_tags(&operator, limit).await?,
            "categories": service.top_categories(&operator, limit).await?,
        }),
        Commands::Seed { rng_seed } => {
            let options = SeedOptions {
                rng_seed,
                ..SeedOptions::default()
            };
            serde_json::to_value(service.seed_demo(&options).await?)?
        }
        Commands::Stats => {
            let stats = service.storage().stats()?;
            json!({
                "feedback_count": stats.feedback_count,
                "status_event_count": stats.status_event_count,
                "response_count": stats.response_count,
                "disk_usage_bytes": stats.disk_usage_bytes,
            })
        }
        Commands::Score { .. } | Commands::Cluster { .. } => {
            anyhow::bail!("Command does not use the store")
        }
    };
    Ok(value)
}
