mod api;
mod driver;
mod entry;
mod error;
mod http;
mod output;
mod parser;
mod profile;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use crate::driver::Job;
use crate::settings::{Credentials, Settings, KEYWORDS};

#[derive(Parser)]
#[command(
    name = "careers_prepop",
    about = "Build the prepopulated careers dataset from CareerOneStop"
)]
struct Cli {
    /// Output JSON path (default: PREPOP_OUTPUT or data/prepopulated-careers.json);
    /// relative paths resolve against the working directory
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Credentials file with CAREERONESTOP_USER_ID / CAREERONESTOP_TOKEN lines
    /// (default: .env in the working directory)
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// Pause between keywords, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Keyword to collect (repeatable; replaces the built-in list)
    #[arg(short = 'k', long = "keyword", value_parser = non_blank)]
    keywords: Vec<String>,
    /// Skip the API and scrape profile pages only
    #[arg(long)]
    scrape_only: bool,
    /// Print the keyword list and exit
    #[arg(long)]
    list_keywords: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let keywords: Vec<String> = if cli.keywords.is_empty() {
        KEYWORDS.iter().map(|k| k.to_string()).collect()
    } else {
        cli.keywords
    };
    if cli.list_keywords {
        for k in &keywords {
            println!("{}", k);
        }
        return Ok(());
    }

    let mut settings = Settings::load()?;
    if let Some(out) = cli.out {
        settings.output = out;
    }
    if let Some(env_file) = cli.env_file {
        settings.env_file = env_file;
    }
    if let Some(delay_ms) = cli.delay_ms {
        settings.delay_ms = delay_ms;
    }

    let creds = Credentials::load(&settings.env_file);
    let client = http::build_client(&settings)?;
    let job = Job {
        client: &client,
        settings: &settings,
        creds: &creds,
        scrape_only: cli.scrape_only,
    };

    let stats = job.run(&keywords, &settings.output).await?;
    println!(
        "Done: {} keywords ({} ok, {} failed).",
        stats.total, stats.ok, stats.failed
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

/// Trimmed keyword; blank values are rejected.
fn non_blank(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("keyword must not be blank".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
