mod cli;

use photoforge::{batch::BatchRunner, config, storage::DriveClient};
use photoforge_enhance::Enhancer;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "photoforge=trace,photoforge_enhance=trace,photoforge_common=debug".to_string()
        } else {
            "photoforge=info,photoforge_enhance=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Run {
            source_folder,
            target_folder,
            dry_run,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_batch(
                cli.config.as_deref(),
                source_folder,
                target_folder,
                dry_run,
            ))
        }
        Commands::List { source_folder } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_items(cli.config.as_deref(), source_folder))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("photoforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn build_runner(config: &config::Config) -> BatchRunner {
    let client = Arc::new(DriveClient::new(&config.storage));
    let enhancer = Enhancer::new(config.enhance);
    BatchRunner::new(client, enhancer, config.batch.page_size)
}

fn resolve_folder(flag: Option<String>, configured: &Option<String>, which: &str) -> Result<String> {
    flag.or_else(|| configured.clone()).ok_or_else(|| {
        anyhow::anyhow!(
            "No {which} folder configured; set [batch] {which}_folder or pass --{which}-folder"
        )
    })
}

async fn run_batch(
    config_path: Option<&Path>,
    source_flag: Option<String>,
    target_flag: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let source = resolve_folder(source_flag, &config.batch.source_folder, "source")?;
    let target = resolve_folder(target_flag, &config.batch.target_folder, "target")?;
    let runner = build_runner(&config);

    if dry_run {
        let eligible = runner.preview(&source).await?;
        println!("Would process {} images:", eligible.len());
        for (item, kind) in &eligible {
            println!("  {} ({})", item.display_name(), kind);
        }
        return Ok(());
    }

    let outcome = runner.run(&source, &target).await?;

    println!("Processed: {}", outcome.processed);
    println!("Failed:    {}", outcome.failed);
    println!("Total:     {}", outcome.total());
    if !outcome.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &outcome.failures {
            println!("  - {}: {}", failure.name, failure.reason);
        }
    }
    Ok(())
}

async fn list_items(config_path: Option<&Path>, source_flag: Option<String>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let source = resolve_folder(source_flag, &config.batch.source_folder, "source")?;
    let runner = build_runner(&config);

    let eligible = runner.preview(&source).await?;
    if eligible.is_empty() {
        println!("No eligible images found.");
        return Ok(());
    }
    for (item, kind) in &eligible {
        println!("{} ({})", item.display_name(), kind);
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            config::load_config(path)
                .with_context(|| format!("Invalid config: {}", path.display()))?;
            println!("Configuration OK: {}", path.display());
        }
        None => {
            config::load_config_or_default(None)?;
            println!("Configuration OK");
        }
    }
    Ok(())
}
