//! # Tinta CLI
//!
//! Command-line interface for printing pictures on a 58mm thermal printer.
//!
//! ## Usage
//!
//! ```bash
//! # Print a photo with the saved settings
//! tinta print cat.jpg
//!
//! # Floyd-Steinberg, darker, sharpened, rotated a quarter turn
//! tinta print --dither fs --gamma 0.7 --sharpen --rotate 1 cat.jpg
//!
//! # Print normally even though the saved settings say invert
//! tinta print --no-invert cat.jpg
//!
//! # Write the ESC/POS job to a file instead of the printer
//! tinta print --dry-run job.bin cat.jpg
//!
//! # Render what would be printed
//! tinta preview --png preview.png cat.jpg
//!
//! # Inspect or reset the saved settings
//! tinta settings show
//! tinta settings reset
//! ```
//!
//! Set `RUST_LOG=debug` to see per-stage timings.

use clap::{Args, Parser, Subcommand};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tinta::{
    DitherConfig, DitheringAlgorithm, PrinterConfig, TintaError, pipeline,
    render::preview,
    settings::{self, Settings},
    transport::{self, BluetoothTransport, MemoryTransport, bluetooth::DEFAULT_DEVICE},
};

/// Tinta - thermal printer photo utility
#[derive(Parser, Debug)]
#[command(name = "tinta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dither an image and send it to the printer
    Print {
        #[command(flatten)]
        image: ImageOptions,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Write the command buffer to FILE instead of printing
        #[arg(long, value_name = "FILE")]
        dry_run: Option<PathBuf>,
    },

    /// Dither an image and save a PNG preview
    Preview {
        #[command(flatten)]
        image: ImageOptions,

        /// Output PNG file
        #[arg(long, value_name = "FILE", default_value = "preview.png")]
        png: PathBuf,

        /// Integer upscale factor (defaults to fitting about 800px wide)
        #[arg(long)]
        scale: Option<u32>,
    },

    /// Inspect or reset the saved print settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,

        /// Settings file (defaults to the user config directory)
        #[arg(long, value_name = "FILE", global = true)]
        settings: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Restore the defaults
    Reset,
}

/// Options shared by `print` and `preview`. Anything given here overrides
/// the settings file.
#[derive(Args, Debug)]
struct ImageOptions {
    /// Image file (any format the image crate can decode)
    image: PathBuf,

    /// Dither mode: atkinson, floyd-steinberg (fs), ordered (bayer), none
    #[arg(long)]
    dither: Option<DitheringAlgorithm>,

    /// Gamma, 0.10 to 1.50 (lower is darker). Used as given; the settings
    /// file keeps two decimals
    #[arg(long)]
    gamma: Option<f32>,

    /// Black/white threshold, 0 to 255
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i32>,

    /// Swap black and white
    #[arg(long, overrides_with = "no_invert")]
    invert: bool,

    /// Print normally even if the settings file says invert
    #[arg(long, overrides_with = "invert")]
    no_invert: bool,

    /// Apply an unsharp mask before dithering
    #[arg(long, overrides_with = "no_sharpen")]
    sharpen: bool,

    /// Skip the unsharp mask even if the settings file enables it
    #[arg(long, overrides_with = "sharpen")]
    no_sharpen: bool,

    /// Quarter turns clockwise before processing
    #[arg(long, default_value_t = 0)]
    rotate: u8,

    /// Maximum print width in dots
    #[arg(long, default_value_t = PrinterConfig::MM58.width_dots)]
    width: u16,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Store the effective options back into the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TintaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            image,
            device,
            dry_run,
        } => {
            let (source, cfg, printer) = load_job(&image)?;
            let job = pipeline::print_job(&source, &cfg, &printer)?;

            match dry_run {
                Some(path) => {
                    let mut sink = MemoryTransport::new();
                    transport::send(&mut sink, &job)?;
                    sink.save(&path)?;
                    println!("Wrote {} bytes to {}", job.len(), path.display());
                }
                None => {
                    let mut printer = BluetoothTransport::open(&device)?;
                    transport::send(&mut printer, &job)?;
                    println!("Printed successfully!");
                }
            }
        }

        Commands::Preview { image, png, scale } => {
            let (source, cfg, printer) = load_job(&image)?;
            let mono = pipeline::process(&source, &cfg, printer.width_dots as u32);
            let scale = scale.unwrap_or_else(|| preview::preview_scale(mono.width() as u32));

            preview::save_png(&mono, scale, &png)?;
            println!(
                "Saved {}x{} preview ({}x) to {}",
                mono.width(),
                mono.height(),
                scale,
                png.display()
            );
        }

        Commands::Settings { action, settings: file } => {
            let path = file.unwrap_or_else(settings::default_path);
            match action {
                SettingsAction::Show => {
                    let current = Settings::load(&path);
                    println!("# {}", path.display());
                    println!("{}", current.to_json()?);
                }
                SettingsAction::Reset => {
                    Settings::default().save(&path)?;
                    println!("Reset {}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Decode and rotate the image, and resolve the effective dither options.
fn load_job(opts: &ImageOptions) -> Result<(DynamicImage, DitherConfig, PrinterConfig), TintaError> {
    let settings_path = opts.settings.clone().unwrap_or_else(settings::default_path);
    let mut settings = Settings::load(&settings_path);
    let cfg = resolve_config(&mut settings, opts);

    if opts.save_settings {
        settings.save(&settings_path)?;
        info!(path = %settings_path.display(), "Saved settings");
    }

    let source = open_image(&opts.image)?;
    let source = rotate(source, opts.rotate);

    let printer = if opts.width == PrinterConfig::MM58.width_dots {
        PrinterConfig::MM58
    } else {
        PrinterConfig::with_width(opts.width.max(1))
    };

    info!(
        image = %opts.image.display(),
        mode = %cfg.mode,
        gamma = cfg.gamma,
        threshold = cfg.threshold,
        invert = cfg.invert,
        sharpen = cfg.sharpen,
        "Processing"
    );
    Ok((source, cfg, printer))
}

/// Fold the command-line options into `settings` and build the dither
/// options for this run. A `--gamma` value reaches the ditherer unrounded.
fn resolve_config(settings: &mut Settings, opts: &ImageOptions) -> DitherConfig {
    if let Some(mode) = opts.dither {
        settings.dither_mode = mode;
    }
    if let Some(gamma) = opts.gamma {
        settings.set_gamma(gamma);
    }
    if let Some(threshold) = opts.threshold {
        settings.threshold = threshold.clamp(0, 255) as u8;
    }
    if opts.invert {
        settings.invert = true;
    } else if opts.no_invert {
        settings.invert = false;
    }
    if opts.sharpen {
        settings.sharpen = true;
    } else if opts.no_sharpen {
        settings.sharpen = false;
    }

    let cfg = settings.to_dither_config();
    match opts.gamma {
        Some(gamma) => DitherConfig::new(
            cfg.mode,
            gamma,
            cfg.threshold as i32,
            cfg.invert,
            cfg.sharpen,
        ),
        None => cfg,
    }
}

fn open_image(path: &Path) -> Result<DynamicImage, TintaError> {
    let img = image::open(path)
        .map_err(|e| TintaError::Image(format!("Failed to open {}: {}", path.display(), e)))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(TintaError::Image(format!("{} has no pixels", path.display())));
    }
    Ok(img)
}

fn rotate(img: DynamicImage, quarter_turns: u8) -> DynamicImage {
    match quarter_turns % 4 {
        1 => img.rotate90(),
        2 => img.rotate180(),
        3 => img.rotate270(),
        _ => img,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn image_options(args: &[&str]) -> ImageOptions {
        let mut argv = vec!["tinta", "preview"];
        argv.extend_from_slice(args);
        argv.push("cat.jpg");
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Preview { image, .. } => image,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn stored(invert: bool, sharpen: bool) -> Settings {
        Settings {
            invert,
            sharpen,
            ..Settings::default()
        }
    }

    #[test]
    fn test_no_flags_keep_stored_toggles() {
        let mut settings = stored(true, true);
        let cfg = resolve_config(&mut settings, &image_options(&[]));
        assert!(cfg.invert);
        assert!(cfg.sharpen);
    }

    #[test]
    fn test_no_invert_clears_stored_invert() {
        let mut settings = stored(true, false);
        let cfg = resolve_config(&mut settings, &image_options(&["--no-invert"]));
        assert!(!cfg.invert);
        assert!(!settings.invert);
    }

    #[test]
    fn test_no_sharpen_clears_stored_sharpen() {
        let mut settings = stored(false, true);
        let cfg = resolve_config(&mut settings, &image_options(&["--no-sharpen"]));
        assert!(!cfg.sharpen);
        assert!(!settings.sharpen);
    }

    #[test]
    fn test_last_toggle_wins() {
        let opts = image_options(&["--invert", "--no-invert", "--no-sharpen", "--sharpen"]);
        let cfg = resolve_config(&mut stored(true, false), &opts);
        assert!(!cfg.invert);
        assert!(cfg.sharpen);
    }

    #[test]
    fn test_cli_gamma_is_not_rounded() {
        let mut settings = Settings::default();
        let cfg = resolve_config(&mut settings, &image_options(&["--gamma", "0.757"]));
        assert_eq!(cfg.gamma, 0.757);
        // The stored copy keeps the settings file's two-decimal precision.
        assert_eq!(settings.gamma_progress, 76);
    }

    #[test]
    fn test_cli_gamma_is_still_clamped() {
        let cfg = resolve_config(&mut Settings::default(), &image_options(&["--gamma", "9"]));
        assert_eq!(cfg.gamma, 1.5);
    }
}
