//! Feedback CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (score, cluster, store-backed commands)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    cluster_file, execute, handle_store, init_logging, load_settings, open_service, score_text,
};
