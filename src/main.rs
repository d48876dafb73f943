//! Vignette CLI - render deterministic scene art from text prompts.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use vignette::config::VignetteConfig;
use vignette::generators::scene::SceneGenerator;
use vignette::generators::Generator;
use vignette::output::ImageStore;
use vignette::prompt;

#[derive(Parser)]
#[command(name = "vignette")]
#[command(about = "Generate deterministic scene art from text prompts")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "vignette.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a single prompt
    Generate {
        /// The prompt text driving the image
        prompt: String,

        /// Identifier embedded in the output filename
        #[arg(short, long, default_value = "0")]
        id: i64,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },

    /// Render one image per themed sample prompt
    Showcase {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Width of the output
        #[arg(long)]
        width: Option<u32>,

        /// Height of the output
        #[arg(long)]
        height: Option<u32>,
    },
}

const SHOWCASE_PROMPTS: [&str; 5] = [
    "a quiet night under the stars and moon",
    "waves breaking on the ocean coast at dawn",
    "deep forest of old trees and green leaves",
    "busy city street at night with neon lights",
    "abstract geometric shapes in warm light",
];

fn build_generator(name: &str, width: u32, height: u32) -> Result<Box<dyn Generator>> {
    match name {
        "scene" => Ok(Box::new(SceneGenerator::new(width, height))),
        other => bail!("unknown generator '{other}'"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vignette=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = VignetteConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Generate {
            prompt: prompt_text,
            id,
            output_dir,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let generator = build_generator(&config.generator.default, width, height)?;

            let store = ImageStore::new(
                output_dir.unwrap_or_else(|| PathBuf::from(&config.output.directory)),
            );
            store.init()?;

            let seed = prompt::derive_seed(&prompt_text);
            println!("Generating with seed {seed:#010x}...");
            let path = store.generate(generator.as_ref(), id, &prompt_text)?;
            println!("Saved to {}", path.display());
        }

        Commands::Showcase {
            output_dir,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.output.width);
            let height = height.unwrap_or(config.output.height);
            let generator = build_generator(&config.generator.default, width, height)?;

            let store = ImageStore::new(output_dir.unwrap_or_else(|| {
                PathBuf::from(&config.output.directory).join("showcase")
            }));
            store.init()?;

            for (i, sample) in SHOWCASE_PROMPTS.iter().enumerate() {
                let path = store.generate(generator.as_ref(), i as i64, sample)?;
                println!("  {} -> {}", sample, path.display());
            }
            println!("Done! Showcase saved to {}", store.root().display());
        }
    }

    Ok(())
}
