#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::Path;

use anyhow::Context;
use args::{Args, Command as CliCommand};
use artgen_client::{ArtgenClient, ImageModel, ImageQuality, ImageSize};
use artgen_config::Config;
use artgen_ui::{Command, Controller, DirectorySink, FormState, NotificationTiming, Outcome, options};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    artgen_telemetry::init(&config.telemetry)?;

    tracing::debug!(
        config_path = ?args.config.as_ref().map(|p| p.display().to_string()),
        "configuration loaded"
    );

    match args.command {
        CliCommand::Generate {
            prompt,
            model,
            size,
            quality,
            count,
        } => {
            let client = build_client(&mut config)?;
            let selection = Selection {
                prompt,
                model,
                size,
                quality,
                count,
            };
            generate(client, &config, selection).await
        }
        CliCommand::Options { model } => {
            print_options(model);
            Ok(())
        }
        CliCommand::Health => {
            let client = build_client(&mut config)?;
            let health = client.health().await?;
            println!(
                "{} (api {})",
                health.status,
                health.api_version.as_deref().unwrap_or("unknown")
            );
            Ok(())
        }
    }
}

/// Form values given on the command line
struct Selection {
    prompt: String,
    model: Option<ImageModel>,
    size: Option<ImageSize>,
    quality: Option<ImageQuality>,
    count: Option<String>,
}

fn build_client(config: &mut Config) -> anyhow::Result<ArtgenClient> {
    let client = ArtgenClient::new(&config.client.base_url)?.with_endpoint(config.client.endpoint.clone());

    let client = match config.client.api_key.take() {
        Some(key) => client.with_api_key(&config.client.api_key_header, key)?,
        None => client,
    };

    Ok(client)
}

async fn generate(client: ArtgenClient, config: &Config, selection: Selection) -> anyhow::Result<()> {
    let mut form = FormState::from_config(&config.form)?;

    if let Some(model) = selection.model {
        form.select_model(model);
    }
    if let Some(size) = selection.size {
        form.select_size(size)?;
    }
    if let Some(quality) = selection.quality {
        form.select_quality(quality)?;
    }
    if let Some(count) = &selection.count {
        form.set_count(count);
    }
    form.set_prompt(&selection.prompt);

    let directory = &config.downloads.directory;
    ensure_directory(directory)?;

    let timing = NotificationTiming::from_config(&config.notifications)?;
    let mut controller = Controller::new(client, DirectorySink::new(directory), form, timing);

    let outcome = controller.dispatch(Command::Submit).await;

    for toast in controller.notifications().active() {
        eprintln!("[{}] {}", toast.severity, toast.message);
    }

    match outcome {
        Outcome::Generated { count } => {
            println!("{}", controller.state().status());

            for index in 0..count {
                if let Outcome::DownloadFailed(e) = controller.dispatch(Command::DownloadRequested(index)).await {
                    return Err::<(), _>(e).with_context(|| format!("failed to save image {}", index + 1));
                }
            }

            for path in controller.surface().written() {
                println!("{}", path.display());
            }

            Ok(())
        }
        Outcome::Rejected(e) => Err(e.into()),
        Outcome::Failed { message } => anyhow::bail!(message),
        other => anyhow::bail!("unexpected outcome: {other:?}"),
    }
}

fn ensure_directory(directory: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create download directory {}", directory.display()))
}

fn print_options(model: ImageModel) {
    let marker = |selected: bool| if selected { " (default)" } else { "" };

    println!("{model}");
    println!("  sizes:");
    for option in options::size_options(model).options() {
        println!("    {:<10} {}{}", option.value.as_ref(), option.label, marker(option.selected));
    }
    println!("  qualities:");
    for option in options::quality_options(model).options() {
        println!("    {:<10} {}{}", option.value.as_ref(), option.label, marker(option.selected));
    }
}
