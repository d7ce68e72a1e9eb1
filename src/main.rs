//! # pagelens CLI Application
//!
//! This module implements the command-line interface for the pagelens
//! browser assistant.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for the assistant's workflows:
//!   - `serve`: JSON API and embedded UI
//!   - `analyze`: one-shot page analysis for a URL or local file
//!   - `tasks`: inspection of the tracked task list
//!
//! ## Features
//!
//! - Both JSON and text output formats
//! - Database path selection for server and task inspection
//! - Tracing integration controlled through `RUST_LOG`

mod telemetry;

use clap::{Args, Parser, Subcommand};
use pagelens::analyzer::analyze_page;
use pagelens::store::Database;
use std::path::PathBuf;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "A browser assistant that distills pages into insights and tracked tasks", long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server with the JSON API and embedded UI
    Serve(ServeArgs),

    /// Analyze a page and print the derived insight
    Analyze(AnalyzeArgs),

    /// List tracked tasks
    Tasks(TasksArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value = "8787")]
    port: u16,

    /// Database path
    #[arg(long, default_value = "pagelens.db")]
    database: PathBuf,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Page to analyze (URL or local file)
    #[arg(required = true)]
    source: String,

    /// Source URL to attribute when analyzing a local file
    #[arg(short, long)]
    url: Option<String>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Args, Debug)]
struct TasksArgs {
    /// Database path
    #[arg(long, default_value = "pagelens.db")]
    database: PathBuf,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing_subscriber();

    match cli.command {
        Commands::Serve(args) => serve_command(args).await?,
        Commands::Analyze(args) => analyze_command(args).await?,
        Commands::Tasks(args) => tasks_command(args).await?,
    }

    Ok(())
}

#[instrument]
async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let db = Database::new_from_path(&args.database.to_string_lossy()).await?;
    pagelens::server::start_server(&args.host, args.port, db).await?;
    Ok(())
}

#[instrument]
async fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let is_remote = args.source.starts_with("http://") || args.source.starts_with("https://");

    let markup = if is_remote {
        println!("Fetching {}...", args.source);
        pagelens::fetch::fetch_page(&args.source).await?
    } else {
        tokio::fs::read_to_string(&args.source).await?
    };

    let source_url = if is_remote {
        Some(args.source.as_str())
    } else {
        args.url.as_deref()
    };

    let insight = analyze_page(&markup, source_url);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&insight)?);
        return Ok(());
    }

    println!("Title:   {}", insight.metadata.title.as_deref().unwrap_or("-"));
    println!("Author:  {}", insight.metadata.byline.as_deref().unwrap_or("-"));
    println!("Domain:  {}", insight.metadata.domain.as_deref().unwrap_or("-"));
    println!("Length:  {} chars", insight.metadata.length);
    println!("\nSummary:\n  {}", insight.summary);

    if !insight.key_points.is_empty() {
        println!("\nKey points:");
        for point in &insight.key_points {
            println!("  - {}", point);
        }
    }

    if !insight.action_items.is_empty() {
        println!("\nSuggested actions:");
        for action in &insight.action_items {
            println!("  - {}", action);
        }
    }

    if !insight.metadata.headings.is_empty() {
        println!("\nOutline:");
        for heading in &insight.metadata.headings {
            println!("  {}", heading);
        }
    }

    Ok(())
}

#[instrument]
async fn tasks_command(args: TasksArgs) -> anyhow::Result<()> {
    let db = Database::new_from_path(&args.database.to_string_lossy()).await?;
    let tasks = db.list_tasks().await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tracked tasks.");
        return Ok(());
    }

    for task in tasks {
        let created = chrono::DateTime::from_timestamp(task.created_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| task.created_at.to_string());

        println!(
            "#{:<4} [{:<11}] [{:<6}] {}  ({})",
            task.id,
            task.status.as_str(),
            task.priority.as_str(),
            task.title,
            created
        );

        if let Some(url) = &task.page_url {
            println!("      from {}", url);
        }
        if let Some(notes) = &task.notes {
            println!("      note: {}", notes);
        }
    }

    Ok(())
}
