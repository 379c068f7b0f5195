//! Feedback CLI
//!
//! # Usage
//!
//! ```bash
//! feedback score --title "Login" --content "Keeps failing"
//! feedback cluster --input corpus.json -k 4
//! feedback seed
//! feedback status 3 in_progress
//! feedback topics -k 5
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/feedback-engine/config.toml)
//! 3. `--config` file
//! 4. Environment variables (FEEDBACK_*)
//! 5. CLI flags

use anyhow::Result;

use feedback_cli::{execute, init_logging, load_settings, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let settings = load_settings(&cli)?;
    init_logging(&settings)?;

    let output = execute(cli.command, &settings).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
