//! CLI command implementations

use console::style;
use dialoguer::{console::Term, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use lessonreel_core::{
    catalog::EMPTY_CATALOG_MESSAGE, playback_error_message, CatalogState, LessonApp, LessonId,
    SessionStatus,
};
use serde_json::json;
use std::time::Duration;

use crate::output::{self, OutputFormat};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// List the lesson catalog, offering a manual retry on failure
pub async fn list(app: &LessonApp, interactive: bool, format: &str) -> anyhow::Result<()> {
    let mut state = {
        let pb = spinner("Loading Videos...");
        let state = app.mount().await;
        pb.finish_and_clear();
        state
    };

    loop {
        match state {
            CatalogState::Loaded(lessons) if lessons.is_empty() => {
                println!("{}", EMPTY_CATALOG_MESSAGE);
                return Ok(());
            }
            CatalogState::Loaded(lessons) => {
                println!("{}", output::format_lessons(&lessons, format));
                return Ok(());
            }
            CatalogState::Failed(message) => {
                eprintln!("{} {}", style("Error:").red().bold(), message);

                let retry = interactive
                    && Confirm::new()
                        .with_prompt("Retry?")
                        .default(true)
                        .interact_on(&Term::stderr())?;
                if !retry {
                    std::process::exit(1);
                }

                let pb = spinner("Loading Videos...");
                state = app.catalog().retry().await;
                pb.finish_and_clear();
            }
            CatalogState::Loading => anyhow::bail!("lesson catalog is still loading"),
        }
    }
}

/// Resolve a lesson and print its embed
pub async fn play(app: &LessonApp, lesson_id: LessonId, format: &str) -> anyhow::Result<()> {
    let pb = spinner("Loading Video...");
    app.play(&lesson_id).await;
    pb.finish_and_clear();

    let playback = app.playback();
    match playback.status() {
        SessionStatus::Ready(_) => {
            let embed_url = playback
                .embed_url()
                .ok_or_else(|| anyhow::anyhow!("session closed before embed was ready"))?;
            let player_vars = playback.embed_config().player_vars_json();

            match OutputFormat::from(format) {
                OutputFormat::Json => println!(
                    "{}",
                    output::to_json(&json!({
                        "lessonId": lesson_id,
                        "embedUrl": embed_url,
                        "playerVars": player_vars,
                    }))
                ),
                OutputFormat::Text | OutputFormat::Table => {
                    println!("Lesson:      {}", lesson_id);
                    println!("Embed URL:   {}", embed_url);
                    println!("Player vars: {}", player_vars);
                }
            }

            app.close_player().await;
            Ok(())
        }
        SessionStatus::Failed(message) => {
            app.close_player().await;
            eprintln!("{} {}", style("Error:").red().bold(), message);
            std::process::exit(1);
        }
        other => anyhow::bail!("unexpected session status: {}", other),
    }
}

/// Print the user-facing message for a player error code
pub fn explain_error(code: i32, format: &str) -> anyhow::Result<()> {
    let message = playback_error_message(code);
    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", output::to_json(&json!({ "code": code, "message": message }))),
        _ => println!("{}", message),
    }
    Ok(())
}
