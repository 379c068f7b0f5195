//! CLI argument parsing for the feedback tool.
//!
//! CLI flags override every other configuration source.

use clap::{Parser, Subcommand};

/// Feedback intelligence engine
///
/// Scores sentiment, clusters topics and manages the status lifecycle of
/// product feedback.
#[derive(Parser, Debug)]
#[command(name = "feedback")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/feedback-engine/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Score the sentiment of a title and body
    Score {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Print matched words and the deciding override
        #[arg(long)]
        explain: bool,
    },

    /// Cluster a JSON corpus file ([{id, title, content}, ...])
    Cluster {
        /// Corpus file
        #[arg(short, long)]
        input: String,

        /// Number of clusters (default from config)
        #[arg(short)]
        k: Option<usize>,
    },

    /// Submit new feedback
    Submit {
        /// Submitting user id
        #[arg(long, default_value = "2")]
        user: u64,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        #[arg(long)]
        category: Option<u64>,

        /// Tag id (repeatable)
        #[arg(long = "tag")]
        tags: Vec<u64>,
    },

    /// Edit title and/or content of your own feedback
    Edit {
        id: u64,

        #[arg(long, default_value = "2")]
        user: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },

    /// Delete your own feedback
    Delete {
        id: u64,

        #[arg(long, default_value = "2")]
        user: u64,
    },

    /// Change feedback status (admin)
    Status {
        id: u64,

        /// new, triaged, in_progress, resolved or rejected
        status: String,

        #[arg(long, default_value = "1")]
        admin: u64,
    },

    /// Add a response note to an item (admin)
    Respond {
        id: u64,

        message: String,

        #[arg(long, default_value = "1")]
        admin: u64,
    },

    /// Move an item to another category (admin)
    Category {
        id: u64,

        category: u64,

        #[arg(long, default_value = "1")]
        admin: u64,
    },

    /// Replace the tags of an item (admin)
    Tags {
        id: u64,

        /// Tag ids; none clears the tags
        tags: Vec<u64>,

        #[arg(long, default_value = "1")]
        admin: u64,
    },

    /// Show one feedback item with its responses
    Show { id: u64 },

    /// List feedback, newest first
    List {
        /// Only items with this status
        #[arg(long)]
        status: Option<String>,

        /// Only items in this category
        #[arg(long)]
        category: Option<u64>,
    },

    /// Show the status audit trail of an item
    History { id: u64 },

    /// Cluster stored feedback into topics
    Topics {
        #[arg(short)]
        k: Option<usize>,
    },

    /// Totals, resolution time and sentiment breakdown
    Overview,

    /// Daily average sentiment
    Trends {
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Daily submission counts
    Volume {
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Most used tags and categories
    Top {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Load the demo corpus
    Seed {
        #[arg(long, default_value = "42")]
        rng_seed: u64,
    },

    /// Storage statistics
    Stats,
}

impl Commands {
    /// Whether the command needs the feedback store.
    pub fn uses_store(&self) -> bool {
        !matches!(self, Commands::Score { .. } | Commands::Cluster { .. })
    }
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
