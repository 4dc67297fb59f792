// src/bin/news_cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use news_radar::config::FeedsConfig;
use news_radar::export::{
    export_titles, find_answer, DEFAULT_EXPORT_FEED, DEFAULT_EXPORT_LIMIT, DEFAULT_EXPORT_PATH,
};
use news_radar::ingest::providers::RssFeedProvider;
use news_radar::telemetry;

#[derive(Debug, Parser)]
#[command(name = "news-cli")]
#[command(about = "Export summarized feed titles to CSV and look them up")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize feed titles into a `title,summary` CSV.
    Export {
        #[arg(long, default_value = DEFAULT_EXPORT_FEED)]
        feed: String,
        #[arg(long, default_value = DEFAULT_EXPORT_PATH)]
        out: PathBuf,
        /// Number of titles to summarize.
        #[arg(long, default_value_t = DEFAULT_EXPORT_LIMIT)]
        limit: usize,
    },
    /// Answer a question from an exported CSV.
    Ask {
        question: String,
        #[arg(long, default_value = DEFAULT_EXPORT_PATH, env = "NEWS_EXPORT_CSV")]
        csv: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export { feed, out, limit } => {
            let provider = RssFeedProvider::from_url(&feed, FeedsConfig::default().fetch_timeout())?;
            let rows = export_titles(&provider, limit, &out).await?;
            for row in &rows {
                println!("{}\n  -> {}", row.title, row.summary);
            }
            println!("wrote {} rows to {}", rows.len(), out.display());
        }
        Commands::Ask { question, csv } => {
            println!("{}", find_answer(&csv, &question)?);
        }
    }

    Ok(())
}
