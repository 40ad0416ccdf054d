use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use img2pix::assets::{AssetLoader, ConfigSource};
use img2pix::codec::{self, OutputFormat};
use img2pix::models::{AppConfig, ParameterSet};
use img2pix::services::ConvertService;

#[derive(Parser)]
#[command(name = "img2pix")]
#[command(about = "Turn images into pixel art: block pixelation, median-cut palettes")]
#[command(version)]
struct Cli {
    /// Config file (default: $IMG2PIX_CONFIG, else the built-in config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline stages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single image
    Convert {
        /// Input image (PNG, JPEG, BMP, GIF, TIFF, ...)
        input: PathBuf,

        /// Output file; the extension picks the format (png, jpg, bmp)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Convert many images in parallel
    Batch {
        /// Input images
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the converted files
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Output format: png, jpg or bmp
        #[arg(short, long, default_value = "png")]
        format: String,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Print image dimensions, mode and format as JSON
    Info {
        /// Image to inspect
        file: PathBuf,
    },
    /// Write the default config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Processing overrides shared by convert and batch
#[derive(Args)]
struct ParamArgs {
    /// Named preset from the config file
    #[arg(long)]
    preset: Option<String>,

    /// Pixel block size (2-50)
    #[arg(short, long)]
    pixel_size: Option<u32>,

    /// Maximum palette size (2-256)
    #[arg(short, long)]
    colors: Option<u32>,

    /// Contrast multiplier (0.5-2.0)
    #[arg(long)]
    contrast: Option<f32>,

    /// Saturation multiplier (0.0-2.0)
    #[arg(long)]
    saturation: Option<f32>,

    /// Background color for flattening, e.g. "#ffffff"
    #[arg(long)]
    background: Option<String>,

    /// Flatten transparency onto the background
    #[arg(long)]
    flatten: bool,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,
}

impl ParamArgs {
    fn overrides(&self) -> ParameterSet {
        ParameterSet {
            pixel_size: self.pixel_size,
            colors: self.colors,
            contrast: self.contrast,
            saturation: self.saturation,
            background: self.background.clone(),
            flatten: self.flatten.then_some(true),
        }
    }

    fn service(&self, config: &AppConfig) -> anyhow::Result<ConvertService> {
        let service =
            ConvertService::from_config(config, self.preset.as_deref(), &self.overrides(), self.quality)?;
        Ok(service)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "img2pix=debug,pixel_art=debug"
    } else {
        "img2pix=info,pixel_art=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("IMG2PIX_CONFIG").ok().map(PathBuf::from));
    let loader = AssetLoader::new(config_file);

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            params,
        }) => run_convert_command(&loader, &input, &output, &params),
        Some(Commands::Batch {
            inputs,
            out_dir,
            format,
            params,
        }) => run_batch_command(&loader, &inputs, &out_dir, &format, &params),
        Some(Commands::Info { file }) => run_info_command(&file),
        Some(Commands::Init { force }) => run_init_command(&loader, force),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

fn load_config(loader: &AssetLoader) -> AppConfig {
    if let ConfigSource::Missing(path) = loader.config_source() {
        tracing::warn!(path = %path.display(), "Config file not found, using built-in config");
    }
    AppConfig::load_from_assets(loader)
}

/// Convert one file
fn run_convert_command(
    loader: &AssetLoader,
    input: &Path,
    output: &Path,
    params: &ParamArgs,
) -> anyhow::Result<()> {
    let config = load_config(loader);
    let service = params.service(&config)?;

    let report = service
        .convert_file(input, output)
        .with_context(|| format!("converting {}", input.display()))?;

    println!(
        "Converted {} -> {} ({}x{}, {} colors, {} bytes)",
        report.input.display(),
        report.output.display(),
        report.width,
        report.height,
        report.palette_size,
        report.bytes
    );
    Ok(())
}

/// Convert many files; exits non-zero if any file failed
fn run_batch_command(
    loader: &AssetLoader,
    inputs: &[PathBuf],
    out_dir: &Path,
    format: &str,
    params: &ParamArgs,
) -> anyhow::Result<()> {
    let format: OutputFormat = format.parse()?;
    let config = load_config(loader);
    let service = params.service(&config)?;

    let report = service.convert_batch(inputs, out_dir, format)?;

    for converted in &report.converted {
        println!("  ok    {}", converted.output.display());
    }
    for (input, e) in &report.failed {
        println!("  FAIL  {}: {e}", input.display());
    }
    println!(
        "\n{} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );

    if !report.is_success() {
        anyhow::bail!("{} of {} files failed", report.failed.len(), inputs.len());
    }
    Ok(())
}

/// Print image info as JSON
fn run_info_command(file: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let info = codec::image_info(&bytes)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Write the embedded config to disk
fn run_init_command(loader: &AssetLoader, force: bool) -> anyhow::Result<()> {
    let report = loader.init(force)?;

    for path in &report.written {
        println!("  wrote   {path}");
    }
    for path in &report.skipped {
        println!("  skipped {path} (exists, use --force to overwrite)");
    }
    Ok(())
}

/// Show version, config source and effective defaults
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("img2pix v{VERSION} - pixel art from the command line\n");

    println!("Environment Variables:");
    println!(
        "  IMG2PIX_CONFIG = {}",
        std::env::var("IMG2PIX_CONFIG")
            .ok()
            .as_deref()
            .unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG       = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("(not set)")
    );

    println!("\nConfig:  {}", loader.config_source());

    let config = AppConfig::load_from_assets(loader);
    println!("\nEffective Defaults:");
    match config.resolve(None, &ParameterSet::default()) {
        Ok(p) => {
            println!("  pixel_size = {}", p.pixel_size);
            println!("  colors     = {}", p.colors);
            println!("  contrast   = {}", p.contrast);
            println!("  saturation = {}", p.saturation);
            println!("  background = {}", p.background);
            println!("  flatten    = {}", p.composite);
            if let Err(e) = p.validate() {
                println!("  (invalid: {e})");
            }
        }
        Err(e) => println!("  (error: {e})"),
    }
    println!(
        "  jpeg_quality = {}, optimize_png = {}",
        config.output.jpeg_quality, config.output.optimize_png
    );

    println!("\nPresets:");
    let mut any = false;
    for name in config.preset_names() {
        let marker = if config.default_preset.as_deref() == Some(name) {
            " (default)"
        } else {
            ""
        };
        println!("  {name}{marker}");
        any = true;
    }
    if !any {
        println!("  (none)");
    }

    println!("\nRun 'img2pix --help' for usage.");
}
