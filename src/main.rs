use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use featured_images::{GeneratorConfig, GradientRenderer, generate_images};

#[derive(Parser)]
#[command(name = "featured-images")]
#[command(about = "Generate gradient featured images for blog posts")]
struct Cli {
    /// JSON configuration file (defaults to the built-in post list)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write images into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Only generate the given post (repeatable)
    #[arg(long, value_name = "SLUG")]
    only: Vec<String>,

    /// Save intermediate render stages to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// List configured posts and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(output_dir) = args.output_dir {
        config = config.with_output_dir(output_dir);
    }
    if !args.only.is_empty() {
        config = config.select(&args.only)?;
    }

    if args.list {
        for item in &config.items {
            println!("{}\t{}", item.slug, item.alt);
        }
        return Ok(());
    }

    let mut renderer = GradientRenderer::new();
    if let Some(debug_dir) = args.debug_out {
        renderer = renderer.with_debug(debug_dir)?;
    }

    let results = generate_images(&config, &renderer)?;

    let oversized: Vec<_> = results.iter().filter(|r| !r.within_ceiling).collect();
    for result in &oversized {
        warn!("{} exceeds the size ceiling ({} bytes)", result.slug, result.size);
    }

    info!(
        "All images generated successfully! ({} written to {})",
        results.len(),
        config.output_dir.display()
    );

    Ok(())
}
