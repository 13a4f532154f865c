use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use polytrace::config::FileConfig;
use polytrace::editor::Editor;
use polytrace::raster::{ppm::estimate_ppm_size, write_ppm};
use polytrace::scene::Scene;

/// Replay a polygon editing scene and render it to a PPM image
///
/// Examples:
///   # Render a scene with default canvas and palette
///   polytrace shapes.toml
///
///   # Larger canvas, custom output, dump the resulting polygons as JSON
///   polytrace shapes.json --width 1024 --height 768 -o shapes.ppm --dump
///
///   # Use a config file
///   polytrace shapes.toml --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "polytrace")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scene file (.toml, or .json)
    scene: PathBuf,

    /// Path to config file (optional, auto-searches polytrace.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PPM file path (defaults to {scene}.ppm)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Print the final polygon collection as JSON
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let default_level = if args.verbose { "polytrace=debug" } else { "polytrace=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let width = args.width.unwrap_or(file_config.width);
    let height = args.height.unwrap_or(file_config.height);
    if width == 0 || height == 0 {
        bail!("Canvas must be at least 1x1 pixels, got {}x{}", width, height);
    }
    let verbose = args.verbose || file_config.verbose;
    let palette = file_config.palette;

    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| args.scene.with_extension("ppm"));

    println!("polytrace - Raster Polygon Editor");
    println!("=================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Scene: {}", args.scene.display());
        println!("  Canvas: {}x{}", width, height);
        println!(
            "  Palette: background #{:06X}, boundary #{:06X}, fill #{:06X}",
            palette.background, palette.boundary, palette.fill
        );
        println!("  Default fill mode: {:?}", file_config.fill_mode);
        println!("  Output: {}", output_path.display());
        println!();
    }

    let spinner = create_spinner("Loading scene...");
    let start = Instant::now();
    let scene = Scene::load(&args.scene)?;
    spinner.finish_with_message(format!(
        "Loaded {} steps [{:.1}s]",
        scene.steps.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Replaying scene...");
    let start = Instant::now();
    let mut editor =
        Editor::new(width, height, palette).with_default_fill_mode(file_config.fill_mode);
    scene.apply(&mut editor).context("Failed to replay scene")?;
    editor.redraw();

    let holes: usize = editor.polygons().iter().map(|p| p.holes().len()).sum();
    spinner.finish_with_message(format!(
        "{} polygons, {} holes [{:.1}s]",
        editor.polygons().len(),
        holes,
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Writing PPM file...");
    let start = Instant::now();
    write_ppm(&output_path, editor.surface()).context("Failed to write PPM file")?;
    spinner.finish_with_message(format!(
        "Wrote {}x{} image ({:.1} KB) [{:.1}s]",
        width,
        height,
        estimate_ppm_size(width, height) as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    if args.dump {
        let json = serde_json::to_string_pretty(editor.polygons())
            .context("Failed to serialize polygons")?;
        println!("{}", json);
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
