use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facemash::prompt::{ComposeRequest, Prompter};
use facemash::{config, storage::Layout, Studio};
use log::info;

#[derive(Parser)]
#[command(name = "facemash")]
#[command(
    version,
    about = "Cut faces into parts and reassemble them into random collages"
)]
struct Cli {
    /// Config file (defaults to facemash.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Working directory holding images/, collages/ and the keypoint file
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut every face in the keypoint file into eye, nose and mouth parts
    Extract {
        /// Seed the random generator for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Assemble collages from the extracted parts
    Compose {
        /// Number of collages to generate (asked when omitted)
        #[arg(short = 'n', long)]
        count: Option<u32>,
        /// Fill the canvas with a solid color
        #[arg(long, conflicts_with = "no_background")]
        background: bool,
        /// Keep the canvas transparent
        #[arg(long)]
        no_background: bool,
        /// Background color, hex code or name; implies --background
        #[arg(long, conflicts_with = "no_background")]
        color: Option<String>,
        /// Seed the random generator for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Create the images/ and collages/ directories
    Init,
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        cfg.root = root;
    }

    match cli.command {
        Commands::Extract { seed } => extract(&cfg, seed),
        Commands::Compose {
            count,
            background,
            no_background,
            color: color_name,
            seed,
        } => {
            let request = ComposeRequest::from_flags(count, background, no_background, color_name);
            compose(&cfg, request, seed)
        }
        Commands::Init => init(&cfg),
        Commands::Config => open_config(cli.config),
    }
}

fn extract(cfg: &config::Config, seed: Option<u64>) -> Result<()> {
    let mut studio = Studio::open(cfg, seed)?;
    let processed = studio.extract_all()?;
    info!("✓ Extracted parts from {} face(s)", processed);
    Ok(())
}

fn compose(cfg: &config::Config, request: ComposeRequest, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let settings = prompter.complete(request, &cfg.default_color)?;

    let mut studio = Studio::open(cfg, seed)?;
    let written = studio.generate_collages(settings.count, settings.background)?;
    info!(
        "✓ Wrote {} collage(s) to {}",
        written.len(),
        studio.layout.collages_dir().display()
    );
    Ok(())
}

fn init(cfg: &config::Config) -> Result<()> {
    let layout = Layout::from_config(cfg);
    layout.ensure().context("Failed to create directories")?;
    info!("✓ Directory layout ready under {}", layout.root().display());
    Ok(())
}

fn open_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| config::CONFIG_PATH.to_path_buf());
    if !config_path.exists() {
        config::save_config(&config::Config::default(), Some(config_path.as_path()))
            .context("Failed to write default config")?;
    }
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
