//! Labelkit demo binary
//!
//! Runs a small sentiment-classification session over built-in sample
//! sentences and prints the collected records as JSON lines once the
//! terminal is restored. Logs go to stderr so they never fight the UI;
//! tune them with the usual `RUST_LOG` filter.

use std::io::{self, Write};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use labelkit_core::{SessionConfig, TaskMode};
use labelkit_tui::{run_annotator, DisplayPresenter};

const SAMPLE_ITEMS: &[&str] = &[
    "The checkout flow is so much faster now, thank you!",
    "App crashes every time I open the settings page.",
    "It works, I guess.",
    "Best update in years, the new search is fantastic.",
    "Why did you move the export button? Took me ten minutes to find it.",
    "Received the package on time, nothing to add.",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let items: Vec<String> = SAMPLE_ITEMS.iter().map(ToString::to_string).collect();
    let mode = TaskMode::classification(["positive", "negative", "neutral"]);
    let config = SessionConfig {
        shuffle: false,
        include_skip: true,
    };

    let records = run_annotator(items, mode, config, DisplayPresenter)?;
    tracing::info!(records = records.len(), "session closed");

    let mut out = io::stdout().lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
