//! Lessonreel CLI - Terminal Lesson Player
//!
//! Features:
//! - Lesson catalog listing with manual retry
//! - Two-step lesson resolution to a playable embed
//! - Embedded player error-code lookup

use clap::{Parser, Subcommand};
use lessonreel_core::{ClientConfig, LessonApp, LessonId};

mod commands;
mod output;

/// Lessonreel CLI - Browse and play video lessons
#[derive(Parser)]
#[command(name = "lessonreel")]
#[command(author = "Lessonreel Developers")]
#[command(version)]
#[command(about = "Browse video lessons and resolve them for playback", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Backend base URL (defaults to $LESSONREEL_API_URL or the public backend)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in milliseconds (defaults to $LESSONREEL_TIMEOUT_MS or 30000)
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available lessons
    List {
        /// Fail immediately instead of offering a retry
        #[arg(long)]
        no_retry: bool,
    },

    /// Resolve a lesson and print its player embed
    Play {
        /// Lesson identifier
        lesson_id: String,
    },

    /// Explain an embedded player error code
    ExplainError {
        /// Numeric code reported by the player
        code: i32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    lessonreel_core::init();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    tracing::debug!(base_url = %config.base_url, timeout_ms = config.request_timeout_ms, "Client configured");

    match cli.command {
        Commands::List { no_retry } => {
            let app = LessonApp::from_config(&config)?;
            commands::list(&app, !no_retry, &cli.format).await?;
        }
        Commands::Play { lesson_id } => {
            let app = LessonApp::from_config(&config)?;
            commands::play(&app, LessonId::from(lesson_id), &cli.format).await?;
        }
        Commands::ExplainError { code } => {
            commands::explain_error(code, &cli.format)?;
        }
    }

    Ok(())
}
