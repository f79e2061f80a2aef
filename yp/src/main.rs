//! yogaplan - personalized yoga plans
//!
//! CLI entry point.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use yogaplan::cli::{Cli, Command, OutputFormat};
use yogaplan::config::Config;
use yogaplan::form;
use yogaplan::plan::{PlanGenerator, YogaPlan, extract_plan_or_fallback};
use yogaplan::profile::UserProfile;
use yogaplan::prompts::PromptComposer;
use yogaplan::render::{self, export_text, render_markdown, render_terminal, write_export};
use yogaplan::session::Session;

fn parse_level(s: &str) -> tracing::Level {
    match s.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yogaplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = cli_log_level
        .or(config_log_level)
        .map(parse_level)
        .unwrap_or(tracing::Level::INFO);

    let log_file = fs::File::create(log_dir.join("yogaplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("yogaplan loaded config: provider={} model={}", config.llm.provider, config.llm.model);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            profile,
            output,
            no_export,
        }) => {
            debug!(?profile, ?output, no_export, "main: matched Plan command");
            cmd_plan(&config, profile.as_deref(), output, no_export).await
        }
        Some(Command::Profile { profile }) => {
            debug!(?profile, "main: matched Profile command");
            cmd_profile(profile.as_deref())
        }
        Some(Command::Prompt { profile }) => {
            debug!(?profile, "main: matched Prompt command");
            cmd_prompt(profile.as_deref())
        }
        Some(Command::Render { input, format, output }) => {
            debug!(?input, ?format, ?output, "main: matched Render command");
            cmd_render(&input, format, output.as_deref())
        }
        None => {
            debug!("main: no command specified, running interactive plan");
            cmd_plan(&config, None, None, false).await
        }
    }
}

/// Profile from a YAML file, or from the interactive form
fn load_profile(path: Option<&Path>) -> Result<UserProfile> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "load_profile: reading file");
            let content = fs::read_to_string(path).context(format!("Failed to read profile {}", path.display()))?;
            UserProfile::from_yaml(&content).context(format!("Failed to load profile {}", path.display()))
        }
        None => form::prompt_profile(),
    }
}

/// Collect a profile, generate, display and export, repeating while the user asks for more
async fn cmd_plan(config: &Config, profile_path: Option<&Path>, output: Option<PathBuf>, no_export: bool) -> Result<()> {
    debug!(?profile_path, ?output, no_export, "cmd_plan: called");
    let mut session = Session::new();

    let api_key = match config.llm.api_key_from_env() {
        Some(key) => key,
        None => form::prompt_api_key()?,
    };
    if session.set_api_key(api_key) {
        println!("{}", "✅ API key updated!".green());
    }

    let generator = PlanGenerator::new(config.llm.max_tokens);
    let export_path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
    let one_shot = profile_path.is_some();

    loop {
        println!();
        let profile = load_profile(profile_path)?;

        let client = match session.client(&config.llm) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "cmd_plan: model init failed");
                if one_shot {
                    return Err(e.into());
                }
                eprintln!("{}", format!("❌ {e}").red());
                break;
            }
        };

        println!("{}", "Creating your customized Yoga Plan ...".dimmed());
        match session.generate(client.as_ref(), &generator, &profile).await {
            Ok(generation) => {
                if let Some(e) = &generation.extraction_error {
                    eprintln!("{}", e.to_string().red());
                }
                if generation.is_truncated() {
                    eprintln!(
                        "{}",
                        format!(
                            "⚠️ The reply was cut off at {} tokens; raise llm.max-tokens in the config",
                            config.llm.max_tokens
                        )
                        .yellow()
                    );
                }
                println!();
                print!("{}", render_terminal(&generation.plan));

                if !no_export {
                    save_export(&generation.plan, &export_path, one_shot)?;
                }
            }
            Err(e) => {
                warn!(error = %e, "cmd_plan: generation failed");
                if one_shot {
                    return Err(e).context("Failed to generate yoga plan");
                }
                eprintln!("{}", format!("❌ {e}").red());
            }
        }

        if one_shot || !ask_again()? {
            break;
        }
    }

    Ok(())
}

/// Write the export file; outside one-shot mode a failure is only reported
fn save_export(plan: &YogaPlan, path: &Path, one_shot: bool) -> Result<()> {
    debug!(path = %path.display(), one_shot, "save_export: called");
    match write_export(plan, path) {
        Ok(()) => {
            println!("📥 Plan saved to {} ({})", path.display(), render::EXPORT_MIME);
            Ok(())
        }
        Err(e) if !one_shot => {
            warn!(error = %e, "save_export: write failed");
            eprintln!("{}", format!("❌ {e}").red());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn ask_again() -> Result<bool> {
    Confirm::new()
        .with_prompt("Create another plan?")
        .default(false)
        .interact()
        .context("Failed to get user input")
}

/// Print the profile text and the pose count it selects
fn cmd_profile(profile_path: Option<&Path>) -> Result<()> {
    debug!(?profile_path, "cmd_profile: called");
    let text = load_profile(profile_path)?.to_prompt_text();
    println!("{}", text);
    println!("Pose count: {}", yogaplan::prompts::pose_count_for(&text));
    Ok(())
}

/// Print the system prompt the model would receive
fn cmd_prompt(profile_path: Option<&Path>) -> Result<()> {
    debug!(?profile_path, "cmd_prompt: called");
    let text = load_profile(profile_path)?.to_prompt_text();
    let prompt = PromptComposer::new().compose(&text)?;
    println!("{}", prompt.system_prompt());
    Ok(())
}

/// Extract a plan from a saved response and display it
fn cmd_render(input: &Path, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    debug!(input = %input.display(), ?format, "cmd_render: called");
    let raw = fs::read_to_string(input).context(format!("Failed to read {}", input.display()))?;

    let (plan, extraction_error) = extract_plan_or_fallback(&raw);
    if let Some(e) = extraction_error {
        eprintln!("{}", e.to_string().red());
    }

    match format {
        OutputFormat::Text => print!("{}", render_terminal(&plan)),
        OutputFormat::Markdown => print!("{}", render_markdown(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Export => println!("{}", export_text(&plan)),
    }

    if let Some(path) = output {
        write_export(&plan, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), tracing::Level::DEBUG);
        assert_eq!(parse_level("Warning"), tracing::Level::WARN);
        assert_eq!(parse_level("loud"), tracing::Level::INFO);
    }

    #[test]
    fn test_save_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yoga_plan.txt");

        save_export(&YogaPlan::fallback(), &path, true).unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with("🧩 Sequence Overview"));
    }

    #[test]
    fn test_save_export_failure_keeps_interactive_loop_alive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("yoga_plan.txt");

        assert!(save_export(&YogaPlan::fallback(), &path, false).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_export_failure_is_fatal_in_one_shot_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("yoga_plan.txt");

        let err = save_export(&YogaPlan::fallback(), &path, true).unwrap_err();
        assert!(err.to_string().contains("yoga_plan.txt"), "{err}");
    }
}
