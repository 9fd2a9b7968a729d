use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use print_score::probe::{self, ScoredImage};
use print_score::types::Extent;
use print_score::{
    CalculationInput, CalculatorConfig, InputError, MediumProfile, PrintScoreError, ResolutionMetadata, Result,
    UpscaleProfile, ViewingDistanceProfile,
};

#[derive(Parser)]
#[command(name = "print-score", about = "Score how well an image will print at a given size")]
struct Cli {
    /// Path to TOML config file
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Log scoring decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score image files or raw pixel dimensions for a print size
    Score {
        /// Image files to score (JPEG, PNG or WebP)
        #[arg(long = "image", num_args = 1.., conflicts_with = "pixels", required_unless_present = "pixels")]
        images: Vec<PathBuf>,

        /// Pixel dimensions as WIDTHxHEIGHT, instead of an image file
        #[arg(long)]
        pixels: Option<String>,

        #[command(flatten)]
        print: PrintArgs,

        #[arg(long)]
        upscale: Option<String>,
    },

    /// DPI and pixel dimensions to aim for at a print size
    SweetSpot {
        #[command(flatten)]
        print: PrintArgs,
    },

    /// Show the resolution record embedded in an image file
    Metadata { path: PathBuf },

    /// List medium, viewing distance and upscale profiles
    Profiles,

    /// Convert a length in inches to cm, mm and pixels at 300 DPI
    Convert { inches: f64 },
}

#[derive(clap::Args)]
struct PrintArgs {
    /// Print width in inches
    #[arg(long)]
    width: Option<f64>,

    /// Print height in inches
    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    medium: Option<String>,

    #[arg(long)]
    viewing_distance: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry {
    Scored(Box<ScoredImage>),
    Failed { path: PathBuf, error: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataOutput {
    path: PathBuf,
    mime_type: &'static str,
    pixels: Extent<u32>,
    resolution: Option<ResolutionMetadata>,
    plausible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfilesOutput {
    mediums: BTreeMap<&'static str, &'static MediumProfile>,
    viewing_distances: BTreeMap<&'static str, &'static ViewingDistanceProfile>,
    upscale_profiles: BTreeMap<&'static str, &'static UpscaleProfile>,
}

fn error_json(error: &str) -> String {
    serde_json::json!({ "error": error }).to_string()
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "print_score=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse `WIDTHxHEIGHT` (also accepts `X` and `×`).
fn parse_pixels(raw: &str) -> Result<(u32, u32)> {
    let invalid = || PrintScoreError::InvalidPixels(raw.to_string());
    let (w, h) = raw
        .split_once(['x', 'X', '×'])
        .ok_or_else(invalid)?;
    let w = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let h = h.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((w, h))
}

/// Flags override config defaults; print size is checked against the config limit.
fn request(print: &PrintArgs, upscale: Option<&str>, config: &CalculatorConfig) -> Result<CalculationInput> {
    for (field, value) in [("target_width_in", print.width), ("target_height_in", print.height)] {
        if let Some(value) = value.filter(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(InputError::InvalidValue { field, value }.into());
        }
    }
    if let (Some(w), Some(h)) = (print.width, print.height) {
        config.check_print_size(w, h)?;
    }
    Ok(CalculationInput {
        target_width_in: print.width,
        target_height_in: print.height,
        ..CalculationInput::default()
    }
    .medium(print.medium.as_deref().unwrap_or(&config.medium))
    .viewing_distance(print.viewing_distance.as_deref().unwrap_or(&config.viewing_distance))
    .upscale(upscale.unwrap_or(&config.upscale)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Returns the JSON document and whether every item succeeded.
fn run(cli: &Cli) -> Result<(String, bool)> {
    let config = print_score::load_config(cli.config_path.as_deref())?;

    match &cli.command {
        Command::Score { images, pixels, print, upscale } => {
            let mut input = request(print, upscale.as_deref(), &config)?;
            if let Some(raw) = pixels {
                let (w, h) = parse_pixels(raw)?;
                input.pixel_width = Some(w);
                input.pixel_height = Some(h);
                let result = print_score::calculate(&input)?;
                return Ok((to_json(&result)?, true));
            }

            let entries: Vec<BatchEntry> = probe::score_images(images, &input, &config)
                .into_iter()
                .zip(images)
                .map(|(result, path)| match result {
                    Ok(scored) => BatchEntry::Scored(Box::new(scored)),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to score image");
                        BatchEntry::Failed { path: path.clone(), error: e.to_string() }
                    }
                })
                .collect();
            let all_ok = entries.iter().all(|e| matches!(e, BatchEntry::Scored(_)));
            Ok((to_json(&entries)?, all_ok))
        }

        Command::SweetSpot { print } => {
            let input = request(print, None, &config)?;
            let (Some(w), Some(h)) = (input.target_width_in, input.target_height_in) else {
                return Err(InputError::MissingValue {
                    field: if input.target_width_in.is_none() { "target_width_in" } else { "target_height_in" },
                }
                .into());
            };
            let result = print_score::sweet_spot(w, h, &input.medium, &input.viewing_distance);
            Ok((to_json(&result)?, true))
        }

        Command::Metadata { path } => Ok((to_json(&metadata_output(path, &config)?)?, true)),

        Command::Profiles => {
            let profiles = ProfilesOutput {
                mediums: print_score::list_mediums(),
                viewing_distances: print_score::list_viewing_distances(),
                upscale_profiles: print_score::list_upscale_profiles(),
            };
            Ok((to_json(&profiles)?, true))
        }

        Command::Convert { inches } => Ok((to_json(&print_score::convert_units(*inches))?, true)),
    }
}

fn metadata_output(path: &Path, config: &CalculatorConfig) -> Result<MetadataOutput> {
    let bytes = probe::read_image_bytes(path, config)?;
    let image = probe::probe_bytes(path, &bytes, config)?;
    let (resolution, reason) = match print_score::try_read_resolution_metadata(&bytes, image.mime_type) {
        Ok(meta) => (Some(meta), None),
        Err(e) => (None, Some(e.to_string())),
    };
    Ok(MetadataOutput {
        path: image.path,
        mime_type: image.mime_type,
        pixels: image.pixels,
        plausible: resolution.as_ref().is_some_and(|m| m.is_plausible(config.max_plausible_dpi)),
        resolution,
        reason,
    })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok((json, all_ok)) => {
            println!("{json}");
            if !all_ok {
                process::exit(1);
            }
        }
        Err(e) => {
            println!("{}", error_json(&e.to_string()));
            process::exit(1);
        }
    }
}
