mod cli;
mod dataset;
mod eval;
mod scoring;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command, ScoreConfig, ScoreSettings};
use eval::{AnnotateOptions, AnnotationSummary};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(args.verbose, directives.as_deref()))
        .with_target(false)
        .init();

    match args.command.unwrap_or_else(|| Command::Score(Default::default())) {
        Command::Score(score_args) => {
            score_dataset(score_args)?;
        }
        Command::Init(init_args) => {
            generate_sample_config(init_args)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` directives when set and valid, else INFO (DEBUG with `--verbose`)
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

fn score_dataset(args: cli::ScoreArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            ScoreConfig::load(path)?
        }
        None => ScoreConfig::default(),
    };

    let settings = ScoreSettings::resolve(args, config)?;
    if let Some(map) = &settings.dimension_map {
        if map.is_empty() {
            warn!("Dimension normalization enabled with an empty rename table");
        }
        info!("Normalizing dimensions with {} renames", map.len());
    }

    info!("Reading {:?}...", settings.input);
    let mut tasks = dataset::load(&settings.input)?;

    let options = AnnotateOptions {
        dimension_map: settings.dimension_map.as_ref(),
    };
    let summary = eval::annotate(&mut tasks, &options)
        .with_context(|| format!("Failed to score {:?}", settings.input))?;

    if settings.dry_run {
        println!("\nDry run mode - {:?} was not modified", settings.output);
    } else {
        info!("Saving updated data to {:?}...", settings.output);
        dataset::save(&settings.output, &tasks)?;
    }

    print_summary(&summary);

    if let Some(path) = &settings.summary_json {
        summary
            .save_json(path)
            .with_context(|| format!("Failed to write summary {:?}", path))?;
        info!("Saved summary to {:?}", path);
    }

    if !settings.dry_run {
        println!("\nSuccessfully updated {:?}", settings.output);
    }

    Ok(())
}

fn print_summary(summary: &AnnotationSummary) {
    println!("\n{}", summary.generate_report());
}

fn generate_sample_config(args: cli::InitArgs) -> Result<()> {
    let config = ScoreConfig::sample();

    config.save(&args.output)?;
    println!("Generated sample config at: {:?}", args.output);

    Ok(())
}
