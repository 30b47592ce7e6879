//! task-import — bulk-import tasks from a CSV file.
//!
//! Reads a two-column CSV (title, description) with a header row and replays
//! each row as a `POST /tasks` against a running taskd instance.

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "task-import", about = "Bulk-import tasks from CSV", version)]
struct Args {
    /// CSV file with a header row and title,description columns.
    #[arg(long, default_value = "tasks.csv")]
    file: PathBuf,

    /// Base URL of a running taskd instance.
    #[arg(long, default_value = "http://localhost:3333")]
    url: String,
}

/// Map one CSV row to a `POST /tasks` body.
///
/// Column 0 is the title, column 1 the description; an empty or missing
/// description is left out of the body entirely.
fn row_to_body(record: &csv::StringRecord) -> Value {
    let mut body = Map::new();
    body.insert(
        "title".to_string(),
        json!(record.get(0).unwrap_or_default()),
    );
    if let Some(description) = record.get(1).filter(|d| !d.is_empty()) {
        body.insert("description".to_string(), json!(description));
    }
    Value::Object(body)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let endpoint = format!("{}/tasks", args.url.trim_end_matches('/'));

    // Header row is consumed by the reader, so records start at line 2
    let mut reader = csv::Reader::from_path(&args.file)?;
    let client = reqwest::Client::new();

    let mut imported = 0usize;
    let mut failed = 0usize;

    for result in reader.records() {
        let record = result?;
        let title = record.get(0).unwrap_or_default().to_string();
        let body = row_to_body(&record);

        match client.post(&endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                imported += 1;
                tracing::debug!(title = %title, "Task imported");
            }
            Ok(response) => {
                failed += 1;
                tracing::warn!(title = %title, status = %response.status(), "Row rejected");
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(title = %title, error = %err, "Request failed");
            }
        }
    }

    tracing::info!(imported, failed, "Import finished");

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
