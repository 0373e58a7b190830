use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use shapeclass::{ClassificationPipeline, ClassifierConfig, ReferenceSet};

#[derive(Parser)]
#[command(name = "shapeclass")]
#[command(about = "Classify silhouettes in an image by nearest reference area")]
struct Cli {
    /// Images to classify
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Reference image, one per category in label order (repeatable)
    #[arg(short, long = "reference", value_name = "PATH")]
    references: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save annotated renderings to this directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => ClassifierConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    if !args.references.is_empty() {
        config = config.with_references(args.references.clone());
    }

    let references = ReferenceSet::build(&config).context("Failed to load reference images")?;

    let mut pipeline = ClassificationPipeline::new(config)?;
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut failures = 0usize;
    for image_path in &args.images {
        // A bad image is reported and skipped; the reference set stays usable
        if let Err(e) = classify_one(&pipeline, &references, image_path, args.output.as_deref()) {
            tracing::error!("{}: {:#}", image_path.display(), e);
            failures += 1;
        }
    }

    check_failures(failures, args.images.len())
}

/// Partial failure is a warning; failing every image is an error
fn check_failures(failures: usize, total: usize) -> anyhow::Result<()> {
    if total > 0 && failures == total {
        anyhow::bail!("None of the {} images could be classified", total);
    }
    if failures > 0 {
        tracing::warn!("{} of {} images could not be classified", failures, total);
    }
    Ok(())
}

fn classify_one(
    pipeline: &ClassificationPipeline,
    references: &ReferenceSet,
    image_path: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let Some(result) = pipeline.classify(image_path, references)? else {
        return Ok(());
    };

    println!("=== {} ===", image_path.display());
    println!("Objects detected: {}", result.count());
    print!("{}", result.report);

    if let Some(dir) = output {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let out_path = dir.join(format!("{stem}_annotated.png"));
        result
            .rendering
            .save(&out_path)
            .with_context(|| format!("Failed to save rendering {}", out_path.display()))?;
        println!("Rendering saved to {}", out_path.display());
    }

    Ok(())
}
