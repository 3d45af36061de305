//! Command-line interface for news-sniffer
//!
//! ```bash
//! export GOOGLE_API_KEY=... GOOGLE_CSE_ID=... OPENAI_API_KEY=...
//! news-sniffer market volatility
//! ```
//!
//! The assistant id is read from `news_sniffer_config.json` (or the file named
//! by `NEWS_SNIFFER_CONFIG`). A `.env` file in the working directory is
//! honored.

use anyhow::Context;
use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use sniffer_core::{NewsSniffer, SnifferConfig, SnifferOutput, SnifferReport};
use sniffer_prompt::NewsEntry;
use tracing::info;

const BIN_NAME: &str = "news-sniffer";

#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version)]
#[command(about = "Scan web news for a topic and summarize it with a hosted assistant", long_about = None)]
struct Args {
    /// Topic to search for; multiple words are joined with spaces
    #[arg(value_name = "TOPIC", trailing_var_arg = true)]
    topic: Vec<String>,
}

impl Args {
    /// The search query, or `None` when no topic was given
    fn query(&self) -> Option<String> {
        let query = self.topic.join(" ");
        let query = query.trim();
        (!query.is_empty()).then(|| query.to_string())
    }
}

fn usage() -> String {
    format!("Usage: {BIN_NAME} \"your search query here\"")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Args::parse()).await
}

async fn run(args: Args) -> anyhow::Result<()> {
    let Some(topic) = args.query() else {
        println!("{}", usage());
        return Ok(());
    };

    // Initialize tracing
    sniffer_utils::init_tracing();

    let config = SnifferConfig::from_env().context("Failed to load configuration")?;
    info!(assistant_id = %config.assistant.id, "Starting {BIN_NAME}");

    let sniffer = NewsSniffer::from_config(&config)?;

    println!("🔍 Searching for: {topic}");
    let report = sniffer
        .run_with_progress(&topic, |count| {
            println!("📡 Found {count} articles. Passing to NewsSniffer...");
        })
        .await?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &SnifferReport) {
    println!("\n🧠 NewsSniffer Output:\n");
    println!("{}", report.response);

    match &report.output {
        SnifferOutput::Parsed(value) => {
            if let Some(table) = NewsEntry::list_from_value(value)
                .filter(|entries| !entries.is_empty())
                .map(|entries| summary_table(&entries))
            {
                println!("\n{table}");
            }
            println!("\n✅ Output saved to {}", report.written_to.display());
        }
        SnifferOutput::Unparsed(_) => {
            println!("\n⚠️ Could not parse output as JSON. Manual review required.");
            println!("📝 Raw response saved to {}", report.written_to.display());
        }
    }
}

fn summary_table(entries: &[NewsEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Sentiment", "Headline", "Source", "Category"]);

    for (i, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.sentiment.to_string(),
            entry.headline.clone(),
            entry.source.clone(),
            entry.category.join(", "),
        ]);
    }

    table
}
